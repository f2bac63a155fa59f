// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Named render jobs, and the driver that runs several of them at
//! once.  Each preset loads its own source, renders it twice into two
//! private rasters, and writes both; nothing is shared between presets
//! except the (read-only) renderer, so one preset failing has no
//! effect on the others.

use crossbeam::thread::ScopedJoinHandle;
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::persist::{load_source, save_raster};
use crate::raster::Raster;
use crate::render::{Fanout, MandelbrotRenderer};
use crate::timing::timed;

/// The preset names, in the order they are run and reported.
pub const PRESET_NAMES: [&str; 3] = ["easy", "normal", "hard"];

/// File name of the single-threaded render.
pub const SEQUENTIAL_OUTPUT: &str = "mandelbrot_sequential.png";

/// File name of the multi-threaded render.
pub const PARALLEL_OUTPUT: &str = "mandelbrot_parallel.png";

/// A named job bound to one input image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Preset {
    /// Used in log lines and as the output directory name.
    pub name: String,
    /// The source image.
    pub input: PathBuf,
}

impl Preset {
    /// A preset reading `<photo_root>/<name>.png`.
    pub fn new(name: &str, photo_root: &Path) -> Self {
        Preset {
            name: name.to_string(),
            input: photo_root.join(format!("{}.png", name)),
        }
    }

    /// Where the sequential render of this preset is written.
    pub fn sequential_output(&self, result_root: &Path) -> PathBuf {
        result_root.join(&self.name).join(SEQUENTIAL_OUTPUT)
    }

    /// Where the parallel render of this preset is written.
    pub fn parallel_output(&self, result_root: &Path) -> PathBuf {
        result_root.join(&self.name).join(PARALLEL_OUTPUT)
    }
}

/// The easy, normal and hard presets under `photo_root`.
pub fn default_presets(photo_root: &Path) -> Vec<Preset> {
    PRESET_NAMES
        .iter()
        .map(|name| Preset::new(name, photo_root))
        .collect()
}

/// The timings of a preset that ran to completion.
#[derive(Clone, Debug)]
pub struct PresetReport {
    /// The preset's name.
    pub name: String,
    /// Time spent in the sequential renderer.
    pub sequential: Duration,
    /// Time spent in the parallel renderer.
    pub parallel: Duration,
}

/// Runs a single preset: load, render sequentially, render in
/// parallel, then save both.  Stops at the first error, and on error
/// writes nothing and reports no timings.
pub fn process_preset(
    preset: &Preset,
    renderer: &MandelbrotRenderer,
    fanout: Fanout,
    result_root: &Path,
) -> Result<PresetReport> {
    info!("Processing {} image...", preset.name);
    let source = load_source(&preset.input)?;

    let mut sequential = Raster::seeded(&source);
    let mut parallel = Raster::seeded(&source);

    let sequential_time = timed(|| renderer.render_sequential(&mut sequential, &source)).elapsed;
    let parallel_timed = timed(|| renderer.render_parallel(&mut parallel, &source, fanout));
    parallel_timed.value?;

    let sequential_path = preset.sequential_output(result_root);
    debug!("Writing {}", sequential_path.display());
    save_raster(sequential, &sequential_path)?;

    let parallel_path = preset.parallel_output(result_root);
    debug!("Writing {}", parallel_path.display());
    if let Err(e) = save_raster(parallel, &parallel_path) {
        // A failed preset leaves no output behind.
        if let Err(cleanup) = fs::remove_file(&sequential_path) {
            debug!("Could not remove {}: {}", sequential_path.display(), cleanup);
        }
        return Err(e);
    }

    info!("{} Sequential: Elapsed time: {:?}", preset.name, sequential_time);
    info!("{} Parallel: Elapsed time: {:?}", preset.name, parallel_timed.elapsed);

    Ok(PresetReport {
        name: preset.name.clone(),
        sequential: sequential_time,
        parallel: parallel_timed.elapsed,
    })
}

/// Runs every preset on its own thread and waits for all of them.
/// The results come back in the same order as `presets`; a failure
/// in one is returned without touching the rest.
pub fn run_presets(
    presets: &[Preset],
    renderer: &MandelbrotRenderer,
    fanout: Fanout,
    result_root: &Path,
) -> Vec<(String, Result<PresetReport>)> {
    let mut outcomes = vec![];
    let joined = crossbeam::scope(|spawner| {
        let handles: Vec<ScopedJoinHandle<Result<PresetReport>>> = presets
            .iter()
            .map(|preset| {
                spawner.spawn(move |_| process_preset(preset, renderer, fanout, result_root))
            })
            .collect();

        outcomes = handles
            .into_iter()
            .zip(presets)
            .map(|(handle, preset)| {
                let outcome = handle.join().unwrap_or(Err(Error::WorkerPanicked));
                if let Err(ref e) = outcome {
                    debug!("{} failed: {}", preset.name, e);
                }
                (preset.name.clone(), outcome)
            })
            .collect();
    });
    if joined.is_err() {
        warn!("Preset scope reported a panic after every handle was joined");
    }
    outcomes
}
