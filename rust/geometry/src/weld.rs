// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Vertex welding
//!
//! Positions are snapped to a grid of `tolerance`-sized cells; vertices that
//! land in the same cell collapse onto the first one encountered and indices
//! are remapped. Triangle topology is unchanged.

use rustc_hash::FxHashMap;

use crate::mesh::Mesh;

/// Default weld tolerance in model length units
pub const WELD_TOLERANCE: f32 = 1e-4;

#[inline]
fn cell_key(position: &[f32], inv_tolerance: f64) -> [i64; 3] {
    [
        (position[0] as f64 * inv_tolerance).round() as i64,
        (position[1] as f64 * inv_tolerance).round() as i64,
        (position[2] as f64 * inv_tolerance).round() as i64,
    ]
}

/// Merge coincident vertices in place
///
/// Normals, when present for every vertex, follow their vertex. Returns the
/// number of vertices removed. Welding an already welded mesh is a no-op.
pub fn weld_vertices(mesh: &mut Mesh, tolerance: f32) -> usize {
    let vertex_count = mesh.vertex_count();
    if vertex_count == 0 {
        return 0;
    }

    let inv_tolerance = 1.0 / tolerance.max(f32::EPSILON) as f64;
    let carry_normals = mesh.has_normals();

    let mut cells: FxHashMap<[i64; 3], u32> = FxHashMap::default();
    cells.reserve(vertex_count);
    let mut remap = Vec::with_capacity(vertex_count);
    let mut positions = Vec::with_capacity(mesh.positions.len());
    let mut normals = Vec::with_capacity(if carry_normals { mesh.normals.len() } else { 0 });

    for (i, position) in mesh.positions.chunks_exact(3).enumerate() {
        let key = cell_key(position, inv_tolerance);
        let next = (positions.len() / 3) as u32;
        let target = *cells.entry(key).or_insert(next);
        if target == next {
            positions.extend_from_slice(position);
            if carry_normals {
                normals.extend_from_slice(&mesh.normals[i * 3..i * 3 + 3]);
            }
        }
        remap.push(target);
    }

    for index in mesh.indices.iter_mut() {
        *index = remap[*index as usize];
    }

    let removed = vertex_count - positions.len() / 3;
    mesh.positions = positions;
    mesh.normals = normals;
    removed
}
