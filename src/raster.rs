// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The two pixel containers: the read-only `SourceImage` that gets
//! sampled, and the `Raster` the renderers write into.

use image::{DynamicImage, ImageBuffer, Rgba, RgbaImage};
use std::slice::ChunksMut;

/// A decoded image, widened to 16 bits per channel.  Never mutated
/// after construction.
#[derive(Clone, Debug)]
pub struct SourceImage {
    pixels: ImageBuffer<Rgba<u16>, Vec<u16>>,
}

impl SourceImage {
    /// Wraps whatever the decoder produced.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        SourceImage {
            pixels: image.to_rgba16(),
        }
    }

    /// Wraps an 8-bit image; every channel is widened by `v * 0x101`.
    pub fn from_rgba8(image: RgbaImage) -> Self {
        SourceImage::from_dynamic(DynamicImage::ImageRgba8(image))
    }

    /// An image of a single color.
    pub fn solid(width: u32, height: u32, color: Rgba<u8>) -> Self {
        SourceImage::from_rgba8(RgbaImage::from_pixel(width, height, color))
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// The color at x, y as alpha-premultiplied 16-bit channels.
    /// Out-of-bounds reads are transparent black.
    #[inline]
    pub fn sample(&self, x: u32, y: u32) -> [u16; 4] {
        if x >= self.width() || y >= self.height() {
            return [0; 4];
        }
        let Rgba([r, g, b, a]) = *self.pixels.get_pixel(x, y);
        let premultiply = |c: u16| (u32::from(c) * u32::from(a) / 0xffff) as u16;
        [premultiply(r), premultiply(g), premultiply(b), a]
    }

    /// `sample` narrowed back to 8 bits by dropping the low byte.
    #[inline]
    pub fn sample8(&self, x: u32, y: u32) -> Rgba<u8> {
        let [r, g, b, a] = self.sample(x, y);
        Rgba([(r >> 8) as u8, (g >> 8) as u8, (b >> 8) as u8, (a >> 8) as u8])
    }
}

/// The grid being rendered.  Pixels are stored column by column, so
/// each column is a single contiguous slice and columns can be handed
/// to different threads without any locking.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    pub(crate) pixels: Vec<Rgba<u8>>,
}

impl Raster {
    /// A raster of transparent black.
    pub fn new(width: u32, height: u32) -> Self {
        Raster {
            width,
            height,
            pixels: vec![Rgba([0, 0, 0, 0]); width as usize * height as usize],
        }
    }

    /// A freshly allocated raster with the source's bounds, holding a
    /// copy of the source at 8-bit precision.
    pub fn seeded(source: &SourceImage) -> Self {
        let mut raster = Raster::new(source.width(), source.height());
        for (x, column) in raster.columns_mut().enumerate() {
            for (y, pixel) in column.iter_mut().enumerate() {
                *pixel = source.sample8(x as u32, y as u32);
            }
        }
        raster
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// True when there is nothing to render.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Reads one pixel.  Panics if x, y is outside the raster.
    pub fn get(&self, x: u32, y: u32) -> Rgba<u8> {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        self.pixels[self.offset(x, y)]
    }

    /// Writes one pixel.  Panics if x, y is outside the raster.
    pub fn put(&mut self, x: u32, y: u32, color: Rgba<u8>) {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        let offset = self.offset(x, y);
        self.pixels[offset] = color;
    }

    /// Splits the raster into its columns, left to right.
    pub fn columns_mut(&mut self) -> ChunksMut<'_, Rgba<u8>> {
        // chunks_mut(0) panics; an empty raster has no columns anyway.
        let height = (self.height as usize).max(1);
        self.pixels.chunks_mut(height)
    }

    /// Converts to a row-major image for encoding.
    pub fn into_image(self) -> RgbaImage {
        ImageBuffer::from_fn(self.width, self.height, |x, y| self.get(x, y))
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        x as usize * self.height as usize + y as usize
    }
}
