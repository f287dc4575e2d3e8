// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Boundary classification
//!
//! Resolves the surface [`Category`] of a face or of an aperture hosted by it.
//! Unrecognized face types resolve as walls instead of failing.

use crate::category::Category;
use crate::model::{BoundaryCondition, Face, FaceType};

/// Resolve the category for a face, or for an aperture whose parent face has
/// `face_type` and `boundary_condition`
pub fn classify(
    face_type: &FaceType,
    boundary_condition: Option<&BoundaryCondition>,
    is_aperture: bool,
) -> Category {
    match face_type {
        FaceType::Wall if is_aperture => Category::Apertures,
        FaceType::Wall => Category::Walls,
        FaceType::RoofCeiling if is_aperture => Category::InteriorApertures,
        FaceType::RoofCeiling => Category::Roofs,
        // No floor-specific aperture category
        FaceType::Floor if is_aperture => Category::Apertures,
        FaceType::Floor => {
            if boundary_condition.is_some_and(BoundaryCondition::is_ground) {
                Category::ExteriorFloors
            } else {
                Category::InteriorFloors
            }
        }
        _ if is_aperture => Category::Apertures,
        _ => Category::Walls,
    }
}

/// Category of the face itself
#[inline]
pub fn classify_face(face: &Face) -> Category {
    classify(&face.face_type, face.boundary_condition.as_ref(), false)
}

/// Category of any aperture hosted by `face`
#[inline]
pub fn classify_aperture(face: &Face) -> Category {
    classify(&face.face_type, face.boundary_condition.as_ref(), true)
}
