// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time test, and the single grayscale rule used to turn
//! its answer into a color.

use image::Rgba;
use num::Complex;

/// What happened to a point after iterating it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Escape {
    /// `|z|` exceeded 2 after the given (zero-based) iteration.
    Escaped(usize),
    /// The point never left the circle within the iteration cap.
    Bounded,
}

impl Escape {
    /// Grayscale by escape iteration: `i mod 256` on every color
    /// channel, opaque.  Bounded points are black.
    pub fn color(self) -> Rgba<u8> {
        match self {
            Escape::Escaped(i) => {
                let v = (i % 256) as u8;
                Rgba([v, v, v, 255])
            }
            Escape::Bounded => Rgba([0, 0, 0, 255]),
        }
    }
}

/// This is our classic iterator function: start at zero, square and
/// add `c`, and report the first iteration at which the point leaves
/// the circle of radius two.
#[inline]
pub fn escape_time(c: Complex<f64>, max_iterations: usize) -> Escape {
    let mut z: Complex<f64> = Complex::new(0.0, 0.0);
    for i in 0..max_iterations {
        z = z * z + c;
        if z.norm_sqr() > 4.0 {
            return Escape::Escaped(i);
        }
    }
    Escape::Bounded
}
