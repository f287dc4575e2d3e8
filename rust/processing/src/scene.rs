// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scene graph handed to the exporter: one named node per category

use hbmesh_core::Category;
use hbmesh_geometry::Mesh;

use crate::assembler::MeshAssembly;

/// Metalness shared by every category material
pub const MATERIAL_METALLIC: f32 = 0.2;
/// Roughness shared by every category material
pub const MATERIAL_ROUGHNESS: f32 = 0.8;

/// PBR material derived from a category's base color
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    /// Linear RGBA
    pub base_color: [f32; 4],
    pub metallic: f32,
    pub roughness: f32,
    /// Boundary loops are single-sided surfaces viewed from both sides
    pub double_sided: bool,
}

impl Material {
    pub fn for_category(category: Category) -> Self {
        let [r, g, b] = category.color();
        Self {
            name: category.name().to_string(),
            base_color: [r, g, b, 1.0],
            metallic: MATERIAL_METALLIC,
            roughness: MATERIAL_ROUGHNESS,
            double_sided: true,
        }
    }
}

/// A named mesh with its material
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub name: String,
    pub category: Category,
    pub mesh: Mesh,
    pub material: Material,
}

/// Flat list of category nodes
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub nodes: Vec<SceneNode>,
}

impl Scene {
    /// One node per non-empty assembly, keeping assembly order
    pub fn from_assemblies(assemblies: Vec<MeshAssembly>) -> Self {
        let nodes = assemblies
            .into_iter()
            .filter(|a| !a.mesh.is_empty())
            .map(|a| SceneNode {
                name: a.category.name().to_string(),
                category: a.category,
                material: Material::for_category(a.category),
                mesh: a.mesh,
            })
            .collect();
        Self { nodes }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, category: Category) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| n.category == category)
    }
}
