// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geometry builder: one boundary loop → one triangulated fragment
//!
//! A loop that cannot form a triangle is reported as [`BuildOutcome::Skipped`]
//! rather than as an error, so one malformed face never aborts a conversion.

use hbmesh_core::{BoundaryPoint, Category};
use nalgebra::{Point3, Vector3};

use crate::mesh::Mesh;
use crate::transform::Rotation;
use crate::triangulation::{fan_triangulate, loop_normal};

/// Distance apertures are pushed off their host face along its normal.
/// Keeps coplanar windows from z-fighting with the wall behind them.
pub const APERTURE_OFFSET: f64 = 0.1;

/// Triangulated geometry of one boundary loop in local indices
#[derive(Debug, Clone)]
pub struct Fragment {
    pub category: Category,
    pub color: [f32; 3],
    /// Transformed (and, for apertures, offset) loop vertices
    pub positions: Vec<Point3<f64>>,
    /// Fan triangle indices into `positions`
    pub indices: Vec<u32>,
    /// Unit normal of the first triangle, zero if it is degenerate
    pub normal: Vector3<f64>,
}

impl Fragment {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Flat-shaded mesh of this fragment
    pub fn to_mesh(&self) -> Mesh {
        let mut mesh = Mesh::with_capacity(self.positions.len(), self.indices.len());
        for p in &self.positions {
            mesh.add_vertex(*p, self.normal);
        }
        for triangle in self.indices.chunks_exact(3) {
            mesh.add_triangle(triangle[0], triangle[1], triangle[2]);
        }
        mesh
    }
}

/// Why a loop produced no geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Fewer than three points
    TooFewPoints { count: usize },
    /// Entry `index` is not a 3D point
    MalformedPoint { index: usize },
    /// Vertex `index` does not fit the f32 output buffers
    OutOfRange { index: usize },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::TooFewPoints { count } => {
                write!(f, "boundary has {} point(s), need at least 3", count)
            }
            SkipReason::MalformedPoint { index } => {
                write!(f, "boundary entry {} is not an [x, y, z] point", index)
            }
            SkipReason::OutOfRange { index } => {
                write!(f, "boundary point {} is outside the f32 range", index)
            }
        }
    }
}

/// Result of building one loop
#[derive(Debug, Clone)]
pub enum BuildOutcome {
    Fragment(Fragment),
    Skipped(SkipReason),
}

impl BuildOutcome {
    /// The fragment, if one was built
    #[inline]
    pub fn fragment(self) -> Option<Fragment> {
        match self {
            BuildOutcome::Fragment(fragment) => Some(fragment),
            BuildOutcome::Skipped(_) => None,
        }
    }
}

/// Build a fragment from a boundary loop
///
/// Every vertex is transformed by `rotation`, the loop is fanned from vertex
/// 0 and the normal taken from the first triangle. Apertures are then moved
/// [`APERTURE_OFFSET`] along that normal. Loops with short, malformed or
/// f32-overflowing points are skipped whole.
pub fn build(
    boundary: &[BoundaryPoint],
    rotation: &Rotation,
    is_aperture: bool,
    category: Category,
) -> BuildOutcome {
    if boundary.len() < 3 {
        return BuildOutcome::Skipped(SkipReason::TooFewPoints {
            count: boundary.len(),
        });
    }

    let mut positions = Vec::with_capacity(boundary.len());
    for (index, point) in boundary.iter().enumerate() {
        let Some([x, y, z]) = point.coords() else {
            return BuildOutcome::Skipped(SkipReason::MalformedPoint { index });
        };
        positions.push(rotation.apply(&Point3::new(x, y, z)));
    }

    let normal = loop_normal(&positions);

    if is_aperture {
        let offset = normal * APERTURE_OFFSET;
        for p in positions.iter_mut() {
            *p += offset;
        }
    }

    if let Some(index) = positions
        .iter()
        .position(|p| p.coords.iter().any(|&c| !(c as f32).is_finite()))
    {
        return BuildOutcome::Skipped(SkipReason::OutOfRange { index });
    }

    let indices = fan_triangulate(positions.len());

    BuildOutcome::Fragment(Fragment {
        category,
        color: category.color(),
        positions,
        indices,
        normal,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn points(raw: &[[f64; 3]]) -> Vec<BoundaryPoint> {
        raw.iter().copied().map(BoundaryPoint::from).collect()
    }

    fn wall_loop() -> Vec<[f64; 3]> {
        vec![
            [0.0, 0.0, 0.0],
            [4.0, 0.0, 0.0],
            [4.0, 0.0, 3.0],
            [0.0, 0.0, 3.0],
        ]
    }

    #[test]
    fn test_triangle_count_is_n_minus_two() {
        for n in 3..10 {
            let boundary: Vec<[f64; 3]> = (0..n)
                .map(|i| {
                    let a = i as f64 / n as f64 * std::f64::consts::TAU;
                    [a.cos(), a.sin(), 0.0]
                })
                .collect();
            let fragment = build(&points(&boundary), &Rotation::none(), false, Category::Roofs)
                .fragment()
                .unwrap();
            assert_eq!(fragment.triangle_count(), n - 2);
            assert_eq!(fragment.vertex_count(), n);
        }
    }

    #[test]
    fn test_short_loops_are_skipped() {
        for n in 0..3 {
            let boundary = vec![[0.0, 0.0, 0.0]; n];
            let outcome = build(&points(&boundary), &Rotation::none(), false, Category::Walls);
            match outcome {
                BuildOutcome::Skipped(SkipReason::TooFewPoints { count }) => assert_eq!(count, n),
                BuildOutcome::Fragment(_) => panic!("Expected skip for {} points", n),
                BuildOutcome::Skipped(other) => {
                    panic!("Expected TooFewPoints for {} points, got {:?}", n, other)
                }
            }
        }
    }

    #[test]
    fn test_malformed_point_skips_loop() {
        let json: Vec<BoundaryPoint> =
            serde_json::from_str("[[0, 0, 0], [1, 0, 0], [1, 1], [0, 1, 0]]").unwrap();
        match build(&json, &Rotation::none(), false, Category::Walls) {
            BuildOutcome::Skipped(reason) => {
                assert_eq!(reason, SkipReason::MalformedPoint { index: 2 })
            }
            BuildOutcome::Fragment(_) => panic!("Expected malformed loop to be skipped"),
        }
    }

    #[test]
    fn test_coordinates_beyond_f32_skip_loop() {
        let boundary = [[0.0, 0.0, 0.0], [1e39, 0.0, 0.0], [0.0, 1.0, 0.0]];
        let outcome = build(&points(&boundary), &Rotation::none(), false, Category::Walls);
        assert!(matches!(
            outcome,
            BuildOutcome::Skipped(SkipReason::OutOfRange { index: 1 })
        ));

        let near_limit = [[0.0, 0.0, 0.0], [1e38, 0.0, 0.0], [0.0, 1.0, 0.0]];
        assert!(build(&points(&near_limit), &Rotation::none(), false, Category::Walls)
            .fragment()
            .is_some());
    }

    #[test]
    fn test_fragment_carries_category_color() {
        let fragment = build(&points(&wall_loop()), &Rotation::none(), false, Category::Walls)
            .fragment()
            .unwrap();
        assert_eq!(fragment.category, Category::Walls);
        assert_eq!(fragment.color, Category::Walls.color());
        assert_eq!(fragment.indices, vec![0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn test_face_is_not_offset() {
        let boundary = wall_loop();
        let fragment = build(&points(&boundary), &Rotation::none(), false, Category::Walls)
            .fragment()
            .unwrap();
        for (p, q) in fragment.positions.iter().zip(&boundary) {
            assert_eq!([p.x, p.y, p.z], *q);
        }
    }

    #[test]
    fn test_aperture_offset_along_normal() {
        let boundary = wall_loop();
        let fragment = build(&points(&boundary), &Rotation::none(), true, Category::Apertures)
            .fragment()
            .unwrap();

        assert_relative_eq!(fragment.normal.y, -1.0, epsilon = 1e-12);
        for (p, q) in fragment.positions.iter().zip(&boundary) {
            assert_relative_eq!(p.x, q[0], epsilon = 1e-12);
            assert_relative_eq!(p.y, q[1] - APERTURE_OFFSET, epsilon = 1e-12);
            assert_relative_eq!(p.z, q[2], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_degenerate_aperture_has_no_offset() {
        let collinear = vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 0.0, 1.0]];
        let fragment = build(&points(&collinear), &Rotation::none(), true, Category::Apertures)
            .fragment()
            .unwrap();
        assert_eq!(fragment.normal, Vector3::zeros());
        assert_eq!(fragment.positions[0], Point3::origin());
    }

    #[test]
    fn test_rotation_applied_before_offset() {
        // Roof at z = 3 facing +Z becomes a Y-up roof at y = 3
        let roof = vec![[0.0, 0.0, 3.0], [1.0, 0.0, 3.0], [1.0, 1.0, 3.0], [0.0, 1.0, 3.0]];
        let fragment = build(&points(&roof), &Rotation::z_up_to_y_up(), true, Category::InteriorApertures)
            .fragment()
            .unwrap();

        assert_relative_eq!(fragment.normal.y, 1.0, epsilon = 1e-12);
        for p in &fragment.positions {
            assert_relative_eq!(p.y, 3.0 + APERTURE_OFFSET, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_to_mesh() {
        let mesh = build(&points(&wall_loop()), &Rotation::none(), false, Category::Walls)
            .fragment()
            .unwrap()
            .to_mesh();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert!(mesh.has_normals());
        assert_eq!(&mesh.normals[0..3], &[0.0, -1.0, 0.0]);
    }
}
