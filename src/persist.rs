// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Reading the source image and writing finished rasters.

use image::codecs::png::PngEncoder;
use image::io::Reader;
use image::{ColorType, ImageEncoder};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::error::{Error, Result};
use crate::raster::{Raster, SourceImage};

/// Opens and decodes an image.  The format is guessed from the file's
/// contents, not its name.
pub fn load_source(path: &Path) -> Result<SourceImage> {
    let input_open = |cause| Error::InputOpen {
        path: path.display().to_string(),
        cause,
    };
    let file = File::open(path).map_err(input_open)?;
    let image = Reader::new(BufReader::new(file))
        .with_guessed_format()
        .map_err(input_open)?
        .decode()
        .map_err(|cause| Error::Decode {
            path: path.display().to_string(),
            cause,
        })?;
    Ok(SourceImage::from_dynamic(image))
}

/// Consumes a finished raster and writes it as an 8-bit RGBA PNG,
/// creating any missing parent directories.
pub fn save_raster(raster: Raster, path: &Path) -> Result<()> {
    let write = |cause| Error::Write {
        path: path.display().to_string(),
        cause,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write)?;
    }
    let output = BufWriter::new(File::create(path).map_err(write)?);
    let image = raster.into_image();
    PngEncoder::new(output)
        .write_image(&image, image.width(), image.height(), ColorType::Rgba8)
        .map_err(|cause| Error::Encode {
            path: path.display().to_string(),
            cause,
        })
}
