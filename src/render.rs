// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The two drivers over the per-pixel computation.
//!
//! Every pixel goes through the same three steps: map the pixel to a
//! point on the complex plane, run the escape-time test on it, and
//! composite the resulting color with the source image.  The
//! sequential driver does that in one loop.  The parallel driver
//! splits the raster into columns, hands each column to its own
//! scoped thread, and returns only once all of them have been joined.
//! Because a column is a disjoint `&mut` slice, no two threads can
//! ever touch the same pixel, and both drivers produce the same
//! raster bit for bit.

use image::Rgba;
use itertools::iproduct;
use log::debug;

use crate::compositor::{composite, CompositeMode};
use crate::config::RenderConfig;
use crate::error::{Error, Result};
use crate::escape::escape_time;
use crate::planes::{Pixel, PlaneMapper};
use crate::raster::{Raster, SourceImage};

/// How the parallel driver partitions the raster.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Fanout {
    /// One thread per column, all launched at once.
    PerColumn,
    /// A fixed number of threads, each owning a contiguous band of
    /// columns.
    Pool(usize),
}

impl Fanout {
    /// A pool with one thread per logical CPU.
    pub fn cpus() -> Self {
        Fanout::Pool(num_cpus::get())
    }
}

impl Default for Fanout {
    fn default() -> Self {
        Fanout::PerColumn
    }
}

/// Holds the fixed parameters of a run.  Once built, it is only ever
/// read, and can be shared between as many threads as needed.
#[derive(Debug)]
pub struct MandelbrotRenderer {
    config: RenderConfig,
    plane: PlaneMapper,
    mode: CompositeMode,
    #[cfg(test)]
    panic_at_column: Option<u32>,
}

impl MandelbrotRenderer {
    /// Requires the run configuration and the way fractal and source
    /// colors are to be combined.
    pub fn new(config: RenderConfig, mode: CompositeMode) -> Self {
        MandelbrotRenderer {
            config,
            plane: PlaneMapper::new(&config),
            mode,
            #[cfg(test)]
            panic_at_column: None,
        }
    }

    /// The configuration this renderer was built with.
    pub fn config(&self) -> RenderConfig {
        self.config
    }

    /// The composite mode this renderer was built with.
    pub fn mode(&self) -> CompositeMode {
        self.mode
    }

    /// The final color of a single pixel.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32, source: &SourceImage) -> Rgba<u8> {
        let c = self.plane.pixel_to_point(Pixel(x, y));
        let fractal = escape_time(c, self.config.max_iterations).color();
        composite(self.mode, fractal, source.sample(x, y))
    }

    /// Fills one column, top to bottom.
    fn render_column(&self, x: u32, column: &mut [Rgba<u8>], source: &SourceImage) {
        #[cfg(test)]
        assert!(self.panic_at_column != Some(x), "column {} failed", x);
        for (y, pixel) in column.iter_mut().enumerate() {
            *pixel = self.pixel(x, y as u32, source);
        }
    }

    /// The single-threaded driver.  Visits every pixel of the raster
    /// exactly once, column by column.
    pub fn render_sequential(&self, raster: &mut Raster, source: &SourceImage) {
        for (x, y) in iproduct!(0..raster.width(), 0..raster.height()) {
            let color = self.pixel(x, y, source);
            raster.put(x, y, color);
        }
    }

    /// The multi-threaded driver.  Returns once every worker has
    /// finished.  If any worker panics, the rest are still joined and
    /// `Error::WorkerPanicked` is returned; the raster is then only
    /// partly rendered.
    pub fn render_parallel(
        &self,
        raster: &mut Raster,
        source: &SourceImage,
        fanout: Fanout,
    ) -> Result<()> {
        if raster.is_empty() {
            return Ok(());
        }
        let joined = match fanout {
            Fanout::PerColumn => {
                debug!("Fanning out over {} columns", raster.width());
                crossbeam::scope(|spawner| {
                    for (x, column) in raster.columns_mut().enumerate() {
                        spawner.spawn(move |_| self.render_column(x as u32, column, source));
                    }
                })
            }
            Fanout::Pool(threads) => {
                let threads = threads.max(1);
                let height = raster.height() as usize;
                let columns_per_band = (raster.width() as usize + threads - 1) / threads;
                debug!(
                    "Fanning out over {} threads, {} columns each",
                    threads, columns_per_band
                );
                let bands: Vec<&mut [Rgba<u8>]> =
                    raster.pixels.chunks_mut(columns_per_band * height).collect();
                crossbeam::scope(|spawner| {
                    for (i, band) in bands.into_iter().enumerate() {
                        let left = i * columns_per_band;
                        spawner.spawn(move |_| {
                            for (j, column) in band.chunks_mut(height).enumerate() {
                                self.render_column((left + j) as u32, column, source);
                            }
                        });
                    }
                })
            }
        };
        joined.map_err(|_| Error::WorkerPanicked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    fn gradient(width: u32, height: u32) -> SourceImage {
        SourceImage::from_rgba8(RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x * 7) as u8, (y * 5) as u8, ((x + y) * 3) as u8, (x * y) as u8])
        }))
    }

    fn renderer(width: u32, height: u32, mode: CompositeMode) -> MandelbrotRenderer {
        MandelbrotRenderer::new(RenderConfig::new(width, height, 50), mode)
    }

    fn all_strategies(renderer: &MandelbrotRenderer, source: &SourceImage) -> Vec<Raster> {
        let mut sequential = Raster::seeded(source);
        renderer.render_sequential(&mut sequential, source);

        let mut rasters = vec![sequential];
        let fanouts = [
            Fanout::PerColumn,
            Fanout::cpus(),
            Fanout::Pool(1),
            Fanout::Pool(3),
            Fanout::Pool(500),
        ];
        for fanout in &fanouts {
            let mut raster = Raster::seeded(source);
            renderer.render_parallel(&mut raster, source, *fanout).unwrap();
            rasters.push(raster);
        }
        rasters
    }

    #[test]
    fn every_strategy_produces_the_same_raster() {
        for mode in &[CompositeMode::Literal, CompositeMode::Overlay] {
            let renderer = renderer(64, 48, *mode);
            let source = gradient(64, 48);
            let rasters = all_strategies(&renderer, &source);
            for raster in &rasters[1..] {
                assert_eq!(raster, &rasters[0]);
            }
        }
    }

    #[test]
    fn full_size_sequential_and_parallel_agree() {
        let renderer = MandelbrotRenderer::new(RenderConfig::default(), CompositeMode::Overlay);
        let source = gradient(800, 800);
        let mut sequential = Raster::seeded(&source);
        let mut parallel = Raster::seeded(&source);
        renderer.render_sequential(&mut sequential, &source);
        renderer
            .render_parallel(&mut parallel, &source, Fanout::PerColumn)
            .unwrap();
        assert!(sequential == parallel);
    }

    #[test]
    fn literal_mode_reproduces_a_solid_source() {
        let color = Rgba([30, 140, 250, 255]);
        let source = SourceImage::solid(40, 40, color);
        for raster in all_strategies(&renderer(40, 40, CompositeMode::Literal), &source) {
            for (x, y) in iproduct!(0..40, 0..40) {
                assert_eq!(raster.get(x, y), color);
            }
        }
    }

    #[test]
    fn literal_mode_forces_full_opacity() {
        let source = SourceImage::solid(8, 8, Rgba([255, 255, 255, 128]));
        let mut raster = Raster::seeded(&source);
        renderer(8, 8, CompositeMode::Literal).render_sequential(&mut raster, &source);
        assert_eq!(raster.get(3, 5), Rgba([128, 128, 128, 255]));
    }

    #[test]
    fn overlay_mode_shows_the_fractal() {
        let source = SourceImage::solid(32, 32, Rgba([255, 255, 255, 255]));
        let renderer = renderer(32, 32, CompositeMode::Overlay);
        let mut raster = Raster::seeded(&source);
        renderer.render_sequential(&mut raster, &source);
        // 16,16 is the origin, which is bounded and therefore black.
        assert_eq!(raster.get(16, 16), Rgba([127, 127, 127, 255]));
        // 0,0 is -2-2i, which escapes immediately and is also black.
        assert_eq!(raster.get(0, 0), Rgba([127, 127, 127, 255]));
    }

    #[test]
    fn sequential_renders_are_idempotent() {
        let renderer = renderer(30, 20, CompositeMode::Overlay);
        let source = gradient(30, 20);
        let mut first = Raster::seeded(&source);
        let mut second = Raster::seeded(&source);
        renderer.render_sequential(&mut first, &source);
        renderer.render_sequential(&mut second, &source);
        assert_eq!(first.into_image().into_raw(), second.into_image().into_raw());
    }

    #[test]
    fn the_raster_follows_the_source_not_the_config() {
        let renderer = renderer(800, 800, CompositeMode::Literal);
        let source = gradient(5, 9);
        let rasters = all_strategies(&renderer, &source);
        assert_eq!((rasters[0].width(), rasters[0].height()), (5, 9));
        for raster in &rasters[1..] {
            assert_eq!(raster, &rasters[0]);
        }
    }

    #[test]
    fn a_panicking_column_is_joined_and_reported() {
        let source = SourceImage::solid(12, 6, Rgba([50, 60, 70, 255]));
        let mut renderer = renderer(12, 6, CompositeMode::Overlay);
        renderer.panic_at_column = Some(4);
        let finished = renderer.pixel(11, 5, &source);
        assert_ne!(finished, Rgba([50, 60, 70, 255]));
        for fanout in &[Fanout::PerColumn, Fanout::Pool(3)] {
            let mut raster = Raster::seeded(&source);
            match renderer.render_parallel(&mut raster, &source, *fanout) {
                Err(Error::WorkerPanicked) => (),
                other => panic!("unexpected {:?}", other),
            }
            // Columns owned by other workers still ran to completion.
            assert_eq!(raster.get(11, 5), finished);
        }
    }

    #[test]
    fn empty_rasters_render_to_nothing() {
        let source = SourceImage::solid(0, 0, Rgba([0, 0, 0, 0]));
        let mut raster = Raster::seeded(&source);
        renderer(8, 8, CompositeMode::Literal)
            .render_parallel(&mut raster, &source, Fanout::PerColumn)
            .unwrap();
        assert!(raster.is_empty());
    }
}
