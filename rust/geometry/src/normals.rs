// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Smooth vertex normals

use nalgebra::{Point3, Vector3};

use crate::mesh::Mesh;

#[inline]
fn point(mesh: &Mesh, i: usize) -> Point3<f64> {
    Point3::new(
        mesh.positions[i * 3] as f64,
        mesh.positions[i * 3 + 1] as f64,
        mesh.positions[i * 3 + 2] as f64,
    )
}

/// Recompute per-vertex normals from the triangle set
///
/// Each vertex gets the normalized sum of the unnormalized normals of the
/// triangles using it, so larger triangles weigh more. Vertices used by no
/// triangle, or only by degenerate ones, get a zero normal.
pub fn calculate_normals(mesh: &mut Mesh) {
    let vertex_count = mesh.vertex_count();
    if vertex_count == 0 {
        mesh.normals.clear();
        return;
    }

    let mut normals = vec![Vector3::<f64>::zeros(); vertex_count];

    for triangle in mesh.indices.chunks_exact(3) {
        let i0 = triangle[0] as usize;
        let i1 = triangle[1] as usize;
        let i2 = triangle[2] as usize;

        let v0 = point(mesh, i0);
        let v1 = point(mesh, i1);
        let v2 = point(mesh, i2);

        let normal = (v1 - v0).cross(&(v2 - v0));

        normals[i0] += normal;
        normals[i1] += normal;
        normals[i2] += normal;
    }

    mesh.normals.clear();
    mesh.normals.reserve(vertex_count * 3);

    for normal in normals {
        let normalized = normal
            .try_normalize(f64::EPSILON)
            .unwrap_or_else(Vector3::zeros);
        mesh.normals.push(normalized.x as f32);
        mesh.normals.push(normalized.y as f32);
        mesh.normals.push(normalized.z as f32);
    }
}
