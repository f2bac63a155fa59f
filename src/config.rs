// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The fixed parameters of a render.  There is no way to change these
//! once a run has started; a `RenderConfig` is built once and handed,
//! by value, to every renderer.

/// Width of the integral plane the fractal is computed against.
pub const WIDTH: u32 = 800;

/// Height of the integral plane the fractal is computed against.
pub const HEIGHT: u32 = 800;

/// The number of `z = z * z + c` steps before a point is declared
/// bounded.
pub const MAX_ITERATIONS: usize = 200;

/// The immutable configuration shared by every pixel of a run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RenderConfig {
    /// Width of the integral plane, in pixels.
    pub width: u32,
    /// Height of the integral plane, in pixels.
    pub height: u32,
    /// Iteration cap for the escape-time test.
    pub max_iterations: usize,
}

impl RenderConfig {
    /// Builds a configuration with explicit dimensions.  Production
    /// runs use `RenderConfig::default()`; this exists so smaller
    /// planes can be exercised.
    pub fn new(width: u32, height: u32, max_iterations: usize) -> Self {
        RenderConfig {
            width,
            height,
            max_iterations,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig::new(WIDTH, HEIGHT, MAX_ITERATIONS)
    }
}
