// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HBMesh Geometry Processing
//!
//! Turns building boundary loops into triangle meshes: up-axis rotation, fan
//! triangulation, aperture offsetting, vertex welding and smooth normals,
//! using nalgebra for the vector math.

pub mod builder;
pub mod error;
pub mod mesh;
pub mod normals;
pub mod transform;
pub mod triangulation;
pub mod weld;

// Re-export nalgebra types for convenience
pub use nalgebra::{Matrix4, Point3, Vector3};

pub use builder::{build, BuildOutcome, Fragment, SkipReason, APERTURE_OFFSET};
pub use error::{Error, Result};
pub use mesh::Mesh;
pub use normals::calculate_normals;
pub use transform::Rotation;
pub use triangulation::{fan_triangulate, loop_normal, triangle_normal};
pub use weld::{weld_vertices, WELD_TOLERANCE};
