// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh assembler
//!
//! Folds all fragments of one category into a single welded mesh with smooth
//! normals. Categories are independent, so they are assembled in parallel.

use hbmesh_core::Category;
use hbmesh_geometry::{calculate_normals, weld_vertices, Fragment, Mesh};
use rayon::prelude::*;

use crate::walker::CategoryBuckets;

/// Combined geometry for one category
#[derive(Debug, Clone)]
pub struct MeshAssembly {
    pub category: Category,
    pub mesh: Mesh,
    /// Number of fragments folded in
    pub fragment_count: usize,
    /// Vertices removed by welding
    pub welded_vertices: usize,
}

/// Merge fragment meshes, weld coincident vertices and recompute normals
///
/// Returns `None` for an empty fragment list. Fragments are expected to share
/// one category; the first fragment's category names the assembly.
pub fn assemble(fragments: &[Fragment], weld_tolerance: f32) -> Option<MeshAssembly> {
    let category = fragments.first()?.category;

    let vertex_total: usize = fragments.iter().map(Fragment::vertex_count).sum();
    let index_total: usize = fragments.iter().map(|f| f.indices.len()).sum();
    let mut mesh = Mesh::with_capacity(vertex_total, index_total);
    for fragment in fragments {
        mesh.merge(&fragment.to_mesh());
    }

    let welded_vertices = weld_vertices(&mut mesh, weld_tolerance);
    // Flat fragment normals no longer hold once differently oriented faces
    // share vertices
    calculate_normals(&mut mesh);

    debug_assert!(mesh.validate_indices().is_ok());

    Some(MeshAssembly {
        category,
        mesh,
        fragment_count: fragments.len(),
        welded_vertices,
    })
}

/// Assemble every non-empty category, in category order
pub fn assemble_all(buckets: &CategoryBuckets, weld_tolerance: f32) -> Vec<MeshAssembly> {
    Category::ALL
        .par_iter()
        .filter_map(|&category| assemble(buckets.get(category), weld_tolerance))
        .collect()
}
