// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the PlaneMapper struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0,
//! and a window onto the complex plane centered on the middle of that
//! rectangle.
use num::Complex;

use crate::config::RenderConfig;

/// Describes the width and height of an integral plane that is assumed
/// to start at 0,0.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct IntegralPlane(pub u32, pub u32);

/// Describes the x, y of a point in a region.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Pixel(pub u32, pub u32);

/// Maps pixels on the integral plane to points on the complex plane.
///
/// The middle pixel of the integral plane lands on the origin, and a
/// quarter of the plane's width (or height) is one unit on the complex
/// plane, so the whole window spans roughly -2..2 on both axes.  Both
/// the center and the quarter are computed with integer division:
/// an 810-pixel plane has its center at 405 and a scale of 202, not
/// 202.5.
#[derive(Debug)]
pub struct PlaneMapper {
    /// The right-lower corner of the integral plane.
    pub integral_plane: IntegralPlane,
    // Pixel that maps to the origin.
    center: (i64, i64),
    // Pixels per complex unit, already truncated.
    scale: (f64, f64),
}

impl PlaneMapper {
    /// Builds the mapper for the plane described by `config`.
    pub fn new(config: &RenderConfig) -> PlaneMapper {
        let (width, height) = (i64::from(config.width), i64::from(config.height));
        PlaneMapper {
            integral_plane: IntegralPlane(config.width, config.height),
            center: (width / 2, height / 2),
            scale: ((width / 4) as f64, (height / 4) as f64),
        }
    }

    /// The pixel that sits on 0+0i.
    pub fn center(&self) -> (i64, i64) {
        self.center
    }

    /// The truncated number of pixels per unit along each axis.
    pub fn scale(&self) -> (f64, f64) {
        self.scale
    }

    /// Given a pixel on the integral cartesian plane, return the
    /// complex number it stands for.
    #[inline]
    pub fn pixel_to_point(&self, pixel: Pixel) -> Complex<f64> {
        Complex::new(
            (i64::from(pixel.0) - self.center.0) as f64 / self.scale.0,
            (i64::from(pixel.1) - self.center.1) as f64 / self.scale.1,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper(width: u32, height: u32) -> PlaneMapper {
        PlaneMapper::new(&RenderConfig::new(width, height, 1))
    }

    #[test]
    fn center_pixel_maps_to_origin() {
        let pm = mapper(800, 800);
        assert_eq!(pm.pixel_to_point(Pixel(400, 400)), Complex::new(0.0, 0.0));
    }

    #[test]
    fn corners_map_to_the_window_edges() {
        let pm = mapper(800, 800);
        assert_eq!(pm.pixel_to_point(Pixel(0, 0)), Complex::new(-2.0, -2.0));
        assert_eq!(pm.pixel_to_point(Pixel(600, 200)), Complex::new(1.0, -1.0));
        assert_eq!(
            pm.pixel_to_point(Pixel(799, 799)),
            Complex::new(399.0 / 200.0, 399.0 / 200.0)
        );
    }

    #[test]
    fn center_and_scale_truncate() {
        let pm = mapper(10, 7);
        assert_eq!(pm.integral_plane, IntegralPlane(10, 7));
        assert_eq!(pm.center(), (5, 3));
        assert_eq!(pm.scale(), (2.0, 1.0));
        assert_eq!(pm.pixel_to_point(Pixel(0, 0)), Complex::new(-2.5, -3.0));
        assert_eq!(pm.pixel_to_point(Pixel(9, 6)), Complex::new(2.0, 3.0));
    }

    #[test]
    fn pixels_beyond_the_configured_plane_still_map() {
        let pm = mapper(8, 8);
        assert_eq!(pm.pixel_to_point(Pixel(12, 4)), Complex::new(4.0, 0.0));
    }
}
