// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # HBMesh Core
//!
//! Building model types for Honeybee JSON (HBJSON) documents and the rules
//! that sort their surfaces into render categories.
//!
//! ## Overview
//!
//! - **Model**: serde types for the room → face → aperture hierarchy
//! - **Category table**: the closed set of surface categories and base colors
//! - **Classification**: face type + boundary condition → category
//!
//! ## Quick Start
//!
//! ```rust
//! use hbmesh_core::{classify_face, Category, Model};
//!
//! let json = r#"{"rooms": [{"faces": [{
//!     "face_type": "Floor",
//!     "boundary_condition": {"type": "Ground"},
//!     "geometry": {"boundary": [[0,0,0],[1,0,0],[1,1,0]]}
//! }]}]}"#;
//!
//! let model = Model::from_json(json).unwrap();
//! let face = &model.rooms[0].faces[0];
//! assert_eq!(classify_face(face), Category::ExteriorFloors);
//! assert_eq!(Category::ExteriorFloors.color(), [0.9, 0.88, 0.85]);
//! ```

pub mod category;
pub mod classify;
pub mod error;
pub mod model;

pub use category::{Category, CATEGORY_COUNT};
pub use classify::{classify, classify_aperture, classify_face};
pub use error::{Error, Result};
pub use model::{
    Aperture, BoundaryCondition, BoundaryLoop, BoundaryPoint, Face, FaceType, Geometry, Model, Room,
    GROUND_BOUNDARY_CONDITION,
};
