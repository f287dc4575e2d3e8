// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HBJSON → GLB conversion pipeline
//!
//! Linear stages, leaf to root:
//!
//! 1. [`walker`]: rooms → faces → apertures, classified and triangulated
//!    into per-category fragment buckets
//! 2. [`assembler`]: fragments of a category concatenated, welded and given
//!    smooth normals (categories run in parallel)
//! 3. [`scene`]: one named, colored node per non-empty category
//! 4. [`export`]: binary glTF serialization
//!
//! ```rust,ignore
//! use hbmesh_processing::{hbjson_to_glb, ConvertOptions};
//!
//! let bytes = std::fs::read("model.hbjson")?;
//! let output = hbjson_to_glb(&bytes, &ConvertOptions { rotate: true, ..Default::default() })?;
//! std::fs::write("model.glb", &output.glb)?;
//! ```

pub mod assembler;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod scene;
pub mod walker;

pub use assembler::{assemble, assemble_all, MeshAssembly};
pub use error::{Error, Result};
pub use export::{export_glb, GENERATOR};
pub use pipeline::{
    build_scene, convert_model, hbjson_to_glb, CategoryStats, ConvertOptions, ConvertOutput,
    ConvertStats,
};
pub use scene::{Material, Scene, SceneNode};
pub use walker::{walk, CategoryBuckets, WalkStats};
