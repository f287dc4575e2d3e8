// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Up-axis conversion applied to every boundary vertex
//!
//! HBJSON models are Z-up while glTF viewers are Y-up. The conversion is a
//! fixed rotation of -90° about the X axis.

use std::f64::consts::FRAC_PI_2;

use nalgebra::{Matrix4, Point3, Vector3};

/// Fixed rigid transform applied to model coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    matrix: Matrix4<f64>,
}

impl Rotation {
    /// Identity: keep model coordinates as they are
    pub fn none() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// -90° about X, mapping a Z-up model into a Y-up frame
    pub fn z_up_to_y_up() -> Self {
        Self {
            matrix: Matrix4::from_axis_angle(&Vector3::x_axis(), -FRAC_PI_2),
        }
    }

    /// Identity or Z-up → Y-up, selected by `rotate`
    pub fn from_flag(rotate: bool) -> Self {
        if rotate {
            Self::z_up_to_y_up()
        } else {
            Self::none()
        }
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        self.matrix == Matrix4::identity()
    }

    /// Transform a point
    #[inline]
    pub fn apply(&self, point: &Point3<f64>) -> Point3<f64> {
        if self.is_identity() {
            return *point;
        }
        self.matrix.transform_point(point)
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::none()
    }
}
