// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for conversion
pub type Result<T> = std::result::Result<T, Error>;

/// Conversion failures
///
/// Degenerate input geometry never shows up here; it is skipped and counted.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Model error: {0}")]
    Model(#[from] hbmesh_core::Error),

    #[error("Geometry error: {0}")]
    Geometry(#[from] hbmesh_geometry::Error),

    #[error("GLB export failed: {0}")]
    Export(String),
}

impl From<gltf::Error> for Error {
    fn from(err: gltf::Error) -> Self {
        Error::Export(err.to_string())
    }
}
