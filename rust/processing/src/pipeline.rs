// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end conversion: HBJSON bytes → GLB bytes
//!
//! walk → assemble → scene → export. Everything a call allocates is owned by
//! that call, so conversions can run concurrently without coordination.

use std::time::Instant;

use hbmesh_core::{Category, Model};
use hbmesh_geometry::{Rotation, WELD_TOLERANCE};
use serde::Serialize;

use crate::assembler::{assemble_all, MeshAssembly};
use crate::error::Result;
use crate::export::export_glb;
use crate::scene::Scene;
use crate::walker::{walk, WalkStats};

/// Conversion options
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvertOptions {
    /// Rotate the Z-up model into a Y-up frame
    pub rotate: bool,
    /// Grid size for vertex welding
    pub weld_tolerance: f32,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            rotate: false,
            weld_tolerance: WELD_TOLERANCE,
        }
    }
}

/// Per-category output counts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryStats {
    pub category: &'static str,
    pub fragments: usize,
    pub vertices: usize,
    pub triangles: usize,
    pub welded_vertices: usize,
}

impl From<&MeshAssembly> for CategoryStats {
    fn from(assembly: &MeshAssembly) -> Self {
        Self {
            category: assembly.category.name(),
            fragments: assembly.fragment_count,
            vertices: assembly.mesh.vertex_count(),
            triangles: assembly.mesh.triangle_count(),
            welded_vertices: assembly.welded_vertices,
        }
    }
}

/// Summary of one conversion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConvertStats {
    #[serde(flatten)]
    pub walk: WalkStats,
    pub categories: Vec<CategoryStats>,
    pub glb_bytes: usize,
}

impl ConvertStats {
    /// Stats for `category`, if it produced a node
    pub fn category(&self, category: Category) -> Option<&CategoryStats> {
        self.categories.iter().find(|c| c.category == category.name())
    }
}

/// GLB bytes plus what went into them
#[derive(Debug, Clone)]
pub struct ConvertOutput {
    pub glb: Vec<u8>,
    pub stats: ConvertStats,
}

/// Convert a raw HBJSON document
pub fn hbjson_to_glb(bytes: &[u8], options: &ConvertOptions) -> Result<ConvertOutput> {
    let model = Model::from_slice(bytes)?;
    convert_model(&model, options)
}

/// Convert an already parsed model
pub fn convert_model(model: &Model, options: &ConvertOptions) -> Result<ConvertOutput> {
    let span = tracing::info_span!("convert", model = model.identifier.as_deref().unwrap_or(""));
    let _guard = span.enter();
    let start = Instant::now();

    let (scene, walk_stats, categories) = build_scene(model, options);
    let glb = export_glb(&scene)?;

    let stats = ConvertStats {
        walk: walk_stats,
        categories,
        glb_bytes: glb.len(),
    };

    tracing::info!(
        rooms = stats.walk.rooms,
        faces = stats.walk.faces,
        apertures = stats.walk.apertures,
        skipped = stats.walk.skipped,
        nodes = stats.categories.len(),
        glb_bytes = stats.glb_bytes,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Converted HBJSON model"
    );

    Ok(ConvertOutput { glb, stats })
}

/// Walk, assemble and build the scene without exporting it
pub fn build_scene(model: &Model, options: &ConvertOptions) -> (Scene, WalkStats, Vec<CategoryStats>) {
    let rotation = Rotation::from_flag(options.rotate);

    let (buckets, walk_stats) = walk(model, &rotation);
    if walk_stats.skipped > 0 {
        tracing::warn!(skipped = walk_stats.skipped, "Skipped degenerate boundary loops");
    }

    let assemblies = assemble_all(&buckets, options.weld_tolerance);
    let categories = assemblies.iter().map(CategoryStats::from).collect();

    (Scene::from_assemblies(assemblies), walk_stats, categories)
}
