// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Everything that can stop a preset.  None of the rendering math can
//! fail; only the I/O on either side of it, and a worker thread that
//! panics, produce these.

use failure::Fail;
use image::ImageError;
use std::io;

/// The error type for every fallible operation in this crate.
#[derive(Debug, Fail)]
pub enum Error {
    /// The source image could not be opened or read.
    #[fail(display = "Error opening file {}: {}", path, cause)]
    InputOpen {
        /// The file that was asked for.
        path: String,
        /// What the filesystem said.
        #[cause]
        cause: io::Error,
    },

    /// The source image was read but is not a decodable image.
    #[fail(display = "Error decoding image {}: {}", path, cause)]
    Decode {
        /// The file that was read.
        path: String,
        /// What the decoder said.
        #[cause]
        cause: ImageError,
    },

    /// The output file (or its directory) could not be created.
    #[fail(display = "Error creating file {}: {}", path, cause)]
    Write {
        /// The destination.
        path: String,
        /// What the filesystem said.
        #[cause]
        cause: io::Error,
    },

    /// The PNG encoder rejected the raster.
    #[fail(display = "Error encoding PNG {}: {}", path, cause)]
    Encode {
        /// The destination.
        path: String,
        /// What the encoder said.
        #[cause]
        cause: ImageError,
    },

    /// A render thread panicked.  Every other thread was still joined.
    #[fail(display = "A render worker panicked")]
    WorkerPanicked,
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
