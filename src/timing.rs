// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Wall-clock measurement around a single call.

use std::time::{Duration, Instant};

/// A value together with how long it took to produce.
#[derive(Debug)]
pub struct Timed<T> {
    /// Whatever the measured call returned.
    pub value: T,
    /// Time between just before the call and just after it returned.
    pub elapsed: Duration,
}

/// Runs `f`, bracketing exactly the call with two instants.
pub fn timed<T, F: FnOnce() -> T>(f: F) -> Timed<T> {
    let start = Instant::now();
    let value = f();
    let elapsed = start.elapsed();
    Timed { value, elapsed }
}
