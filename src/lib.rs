#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot compositing benchmark
//!
//! The Mandelbrot set is the set of points `c` on the complex plane
//! for which repeatedly squaring `z` and adding `c`, starting from
//! zero, never runs off to infinity.  The number of steps a point
//! takes to leave the circle of radius two is its "escape time," and
//! that number, taken modulo 256, is the gray level of its pixel.
//!
//! This crate computes that fractal for every pixel of a source
//! image, composites it with the source, and times two ways of doing
//! so: a single thread walking the whole raster, and one thread per
//! column joined at the end.  Both must produce exactly the same
//! pixels; the only thing allowed to differ is how long they take.

pub mod compositor;
pub mod config;
pub mod error;
pub mod escape;
pub mod persist;
pub mod planes;
pub mod presets;
pub mod raster;
pub mod render;
pub mod timing;

pub use compositor::CompositeMode;
pub use config::RenderConfig;
pub use error::{Error, Result};
pub use raster::{Raster, SourceImage};
pub use render::{Fanout, MandelbrotRenderer};
