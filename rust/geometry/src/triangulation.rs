// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Boundary loop triangulation utilities
//!
//! Loops are fanned from their first vertex. This is exact for convex and
//! star-shaped (from vertex 0) planar loops; concave loops still produce a
//! valid index list but may cover area outside the polygon.

use nalgebra::{Point3, Vector3};

/// Fan triangulation for a loop of `n` vertices
///
/// Emits `(0, i, i + 1)` for `i` in `1..=n-2`, i.e. `n - 2` triangles.
/// Loops with fewer than three vertices yield no triangles.
#[inline]
pub fn fan_triangulate(n: usize) -> Vec<u32> {
    if n < 3 {
        return Vec::new();
    }
    let mut indices = Vec::with_capacity((n - 2) * 3);
    for i in 1..(n - 1) as u32 {
        indices.push(0);
        indices.push(i);
        indices.push(i + 1);
    }
    indices
}

/// Unit normal of the triangle `(a, b, c)`
///
/// Returns the zero vector when the triangle is degenerate (collinear or
/// coincident points).
#[inline]
pub fn triangle_normal(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> Vector3<f64> {
    let cross = (b - a).cross(&(c - a));
    cross.try_normalize(f64::EPSILON).unwrap_or_else(Vector3::zeros)
}

/// Normal of a loop, taken from its first fan triangle
#[inline]
pub fn loop_normal(points: &[Point3<f64>]) -> Vector3<f64> {
    match points {
        [a, b, c, ..] => triangle_normal(a, b, c),
        _ => Vector3::zeros(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fan_triangle_counts() {
        for n in 3..12 {
            assert_eq!(fan_triangulate(n).len(), (n - 2) * 3);
        }
        assert!(fan_triangulate(0).is_empty());
        assert!(fan_triangulate(2).is_empty());
    }

    #[test]
    fn test_fan_quad() {
        assert_eq!(fan_triangulate(4), vec![0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn test_fan_indices_in_range() {
        let n = 9;
        assert!(fan_triangulate(n).iter().all(|&i| (i as usize) < n));
    }

    #[test]
    fn test_triangle_normal_ccw() {
        let n = triangle_normal(
            &Point3::new(0.0, 0.0, 0.0),
            &Point3::new(1.0, 0.0, 0.0),
            &Point3::new(0.0, 1.0, 0.0),
        );
        assert_relative_eq!(n.z, 1.0, epsilon = 1e-12);
        assert_relative_eq!(n.norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_degenerate_normal_is_zero() {
        let n = triangle_normal(
            &Point3::new(0.0, 0.0, 0.0),
            &Point3::new(1.0, 0.0, 0.0),
            &Point3::new(2.0, 0.0, 0.0),
        );
        assert_eq!(n, Vector3::zeros());
        assert_eq!(loop_normal(&[Point3::origin()]), Vector3::zeros());
    }

    #[test]
    fn test_loop_normal_uses_first_triangle() {
        // Wall in the XZ plane, wound so the normal faces -Y
        let points = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(4.0, 0.0, 0.0),
            Point3::new(4.0, 0.0, 3.0),
            Point3::new(0.0, 0.0, 3.0),
        ];
        let n = loop_normal(&points);
        assert_relative_eq!(n.y, -1.0, epsilon = 1e-12);
    }
}
