// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Merging a fractal color with the source image.
//!
//! The historical behavior of this program is to compute the fractal
//! color for a pixel, store it, and then immediately store the source
//! image's color over it.  The result is the source image, re-encoded
//! at 8 bits per channel and made fully opaque; the fractal is never
//! visible.  That is `CompositeMode::Literal`, and it remains the
//! default so the benchmark's output files don't change.
//! `CompositeMode::Overlay` is what was presumably intended: the
//! fractal laid over the source at half opacity.

use image::Rgba;
use std::fmt;
use std::str::FromStr;

/// Opacity of the fractal layer in `Overlay` mode.
pub const OVERLAY_OPACITY: u8 = 128;

/// How the fractal and source colors combine.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CompositeMode {
    /// Last write wins: the source pixel replaces the fractal pixel.
    Literal,
    /// The fractal is blended over the source at `OVERLAY_OPACITY`.
    Overlay,
}

impl Default for CompositeMode {
    fn default() -> Self {
        CompositeMode::Literal
    }
}

impl FromStr for CompositeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "literal" => Ok(CompositeMode::Literal),
            "overlay" => Ok(CompositeMode::Overlay),
            _ => Err(format!("Unknown composite mode '{}'", s)),
        }
    }
}

impl fmt::Display for CompositeMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CompositeMode::Literal => write!(f, "literal"),
            CompositeMode::Overlay => write!(f, "overlay"),
        }
    }
}

/// Produces the stored pixel from the fractal color and the source's
/// 16-bit premultiplied sample at the same coordinates.
#[inline]
pub fn composite(mode: CompositeMode, fractal: Rgba<u8>, source: [u16; 4]) -> Rgba<u8> {
    let narrowed = [
        (source[0] >> 8) as u8,
        (source[1] >> 8) as u8,
        (source[2] >> 8) as u8,
    ];
    match mode {
        CompositeMode::Literal => Rgba([narrowed[0], narrowed[1], narrowed[2], 255]),
        CompositeMode::Overlay => {
            let alpha = u32::from(OVERLAY_OPACITY);
            let blend = |f: u8, s: u8| {
                ((u32::from(f) * alpha + u32::from(s) * (255 - alpha) + 127) / 255) as u8
            };
            Rgba([
                blend(fractal[0], narrowed[0]),
                blend(fractal[1], narrowed[1]),
                blend(fractal[2], narrowed[2]),
                255,
            ])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_discards_the_fractal() {
        let source = [0x1234, 0xff00, 0x00ff, 0x8000];
        let white = Rgba([255, 255, 255, 255]);
        let black = Rgba([0, 0, 0, 255]);
        let expected = Rgba([0x12, 0xff, 0x00, 255]);
        assert_eq!(composite(CompositeMode::Literal, white, source), expected);
        assert_eq!(composite(CompositeMode::Literal, black, source), expected);
    }

    #[test]
    fn overlay_blends_at_half_opacity() {
        let source = [0, 0, 0, 0xffff];
        let out = composite(CompositeMode::Overlay, Rgba([255, 255, 255, 255]), source);
        assert_eq!(out, Rgba([128, 128, 128, 255]));

        let source = [0xffff, 0xffff, 0xffff, 0xffff];
        let out = composite(CompositeMode::Overlay, Rgba([0, 0, 0, 255]), source);
        assert_eq!(out, Rgba([127, 127, 127, 255]));
    }

    #[test]
    fn overlay_of_equal_colors_is_unchanged() {
        let source = [90 * 0x101, 90 * 0x101, 90 * 0x101, 0xffff];
        let out = composite(CompositeMode::Overlay, Rgba([90, 90, 90, 255]), source);
        assert_eq!(out, Rgba([90, 90, 90, 255]));
    }

    #[test]
    fn modes_parse_from_their_names() {
        assert_eq!("literal".parse::<CompositeMode>(), Ok(CompositeMode::Literal));
        assert_eq!("overlay".parse::<CompositeMode>(), Ok(CompositeMode::Overlay));
        assert!("blend".parse::<CompositeMode>().is_err());
        assert_eq!(CompositeMode::Overlay.to_string(), "overlay");
    }
}
