// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use clap::{App, Arg, ArgMatches};
use std::path::Path;
use std::str::FromStr;

use mandelbench::presets::{run_presets, Preset, PRESET_NAMES};
use mandelbench::{CompositeMode, Fanout, MandelbrotRenderer, RenderConfig};

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const PHOTOS: &str = "photos";
const RESULTS: &str = "results";
const MODE: &str = "mode";
const THREADS: &str = "threads";
const PRESET: &str = "preset";

const MAX_THREADS: usize = 1024;

fn args<'a>() -> ArgMatches<'a> {
    App::new("mandelbench")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Times sequential and parallel Mandelbrot renders over a set of images")
        .arg(
            Arg::with_name(PHOTOS)
                .long(PHOTOS)
                .short("p")
                .takes_value(true)
                .default_value("photos")
                .help("Directory holding easy.png, normal.png and hard.png"),
        )
        .arg(
            Arg::with_name(RESULTS)
                .long(RESULTS)
                .short("r")
                .takes_value(true)
                .default_value("photos/result")
                .help("Directory the renders are written under"),
        )
        .arg(
            Arg::with_name(MODE)
                .long(MODE)
                .short("m")
                .takes_value(true)
                .possible_values(&["literal", "overlay"])
                .default_value("literal")
                .help("How the fractal is combined with the source image"),
        )
        .arg(
            Arg::with_name(THREADS)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        MAX_THREADS,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", MAX_THREADS),
                    )
                })
                .help("Use a pool of this many threads instead of one per column"),
        )
        .arg(
            Arg::with_name(PRESET)
                .multiple(true)
                .possible_values(&PRESET_NAMES)
                .help("Presets to run (default: all)"),
        )
        .get_matches()
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = args();
    let photos = Path::new(matches.value_of(PHOTOS).unwrap_or("photos"));
    let results = Path::new(matches.value_of(RESULTS).unwrap_or("photos/result"));
    let mode = matches
        .value_of(MODE)
        .and_then(|s| CompositeMode::from_str(s).ok())
        .unwrap_or_default();
    let fanout = matches
        .value_of(THREADS)
        .and_then(|s| usize::from_str(s).ok())
        .map_or(Fanout::PerColumn, Fanout::Pool);

    // Keep the canonical order however the presets were named.
    let selected: Vec<&str> = matches
        .values_of(PRESET)
        .map(|values| values.collect())
        .unwrap_or_else(|| PRESET_NAMES.to_vec());
    let presets: Vec<Preset> = PRESET_NAMES
        .iter()
        .filter(|name| selected.contains(*name))
        .map(|name| Preset::new(name, photos))
        .collect();

    let renderer = MandelbrotRenderer::new(RenderConfig::default(), mode);
    let outcomes = run_presets(&presets, &renderer, fanout, results);

    let mut failed = false;
    for (name, outcome) in &outcomes {
        if let Err(e) = outcome {
            eprintln!("Render failure in {}: {}", name, e);
            failed = true;
        }
    }
    if failed {
        std::process::exit(1);
    }
}
