// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Binary glTF (`.glb`) exporter
//!
//! Every scene node becomes a glTF node → mesh → single triangle primitive
//! with POSITION, NORMAL and u32 index accessors over one shared binary
//! buffer, plus one PBR material. A scene without nodes still produces a
//! loadable GLB: asset only, with no scene entry and no BIN chunk.

use std::borrow::Cow;
use std::collections::BTreeMap;

use gltf::binary::{Glb, Header};
use gltf::json as gj;

use crate::error::{Error, Result};
use crate::scene::{Material, Scene, SceneNode};

/// Written to `asset.generator`
pub const GENERATOR: &str = concat!("hbmesh ", env!("CARGO_PKG_VERSION"));

const GLB_HEADER_LEN: usize = 12;
const GLB_CHUNK_HEADER_LEN: usize = 8;

/// Serialize a scene to GLB bytes
pub fn export_glb(scene: &Scene) -> Result<Vec<u8>> {
    let mut ctx = ExportContext::new();
    for node in &scene.nodes {
        ctx.push_node(node)?;
    }
    ctx.finish()
}

struct ExportContext {
    root: gj::Root,
    buffer_data: Vec<u8>,
    scene_nodes: Vec<gj::Index<gj::Node>>,
}

impl ExportContext {
    fn new() -> Self {
        Self {
            root: gj::Root::default(),
            buffer_data: Vec::new(),
            scene_nodes: Vec::new(),
        }
    }

    fn push_node(&mut self, node: &SceneNode) -> Result<()> {
        let mesh = &node.mesh;
        if mesh.is_empty() {
            return Err(hbmesh_geometry::Error::EmptyMesh(node.name.clone()).into());
        }
        mesh.validate_indices()?;
        if let Some(i) = mesh.positions.iter().position(|v| !v.is_finite()) {
            return Err(Error::Export(format!(
                "node '{}' vertex {} has a non-finite coordinate",
                node.name,
                i / 3
            )));
        }
        if !mesh.has_normals() {
            return Err(Error::Export(format!(
                "node '{}' has {} normals for {} positions",
                node.name,
                mesh.normals.len(),
                mesh.positions.len()
            )));
        }

        let vertex_count = mesh.vertex_count() as u64;
        let (min, max) = mesh.bounds();

        let position_view = self.push_buffer_view(
            &f32_bytes(&mesh.positions),
            Some(gj::buffer::Target::ArrayBuffer),
        );
        let position_accessor = self.push_accessor(
            position_view,
            vertex_count,
            gj::accessor::ComponentType::F32,
            gj::accessor::Type::Vec3,
            Some(json_f32_array(&[min.x, min.y, min.z])),
            Some(json_f32_array(&[max.x, max.y, max.z])),
        );

        let normal_view = self.push_buffer_view(
            &f32_bytes(&mesh.normals),
            Some(gj::buffer::Target::ArrayBuffer),
        );
        let normal_accessor = self.push_accessor(
            normal_view,
            vertex_count,
            gj::accessor::ComponentType::F32,
            gj::accessor::Type::Vec3,
            None,
            None,
        );

        let index_bytes: Vec<u8> = mesh.indices.iter().flat_map(|i| i.to_le_bytes()).collect();
        let index_view =
            self.push_buffer_view(&index_bytes, Some(gj::buffer::Target::ElementArrayBuffer));
        let index_accessor = self.push_accessor(
            index_view,
            mesh.indices.len() as u64,
            gj::accessor::ComponentType::U32,
            gj::accessor::Type::Scalar,
            None,
            None,
        );

        let material = self.push_material(&node.material);

        let mut attributes = BTreeMap::new();
        attributes.insert(
            gj::validation::Checked::Valid(gj::mesh::Semantic::Positions),
            gj::Index::new(position_accessor),
        );
        attributes.insert(
            gj::validation::Checked::Valid(gj::mesh::Semantic::Normals),
            gj::Index::new(normal_accessor),
        );

        let primitive = gj::mesh::Primitive {
            attributes,
            extensions: None,
            extras: gj::Extras::default(),
            indices: Some(gj::Index::new(index_accessor)),
            material: Some(gj::Index::new(material)),
            mode: gj::validation::Checked::Valid(gj::mesh::Mode::Triangles),
            targets: None,
        };

        let mesh_idx = self.root.meshes.len() as u32;
        self.root.meshes.push(gj::Mesh {
            name: Some(node.name.clone()),
            primitives: vec![primitive],
            weights: None,
            extensions: None,
            extras: gj::Extras::default(),
        });

        let node_idx = self.root.nodes.len() as u32;
        self.root.nodes.push(gj::Node {
            name: Some(node.name.clone()),
            mesh: Some(gj::Index::new(mesh_idx)),
            ..gj::Node::default()
        });
        self.scene_nodes.push(gj::Index::new(node_idx));

        Ok(())
    }

    fn push_material(&mut self, material: &Material) -> u32 {
        let idx = self.root.materials.len() as u32;

        let pbr = gj::material::PbrMetallicRoughness {
            base_color_factor: gj::material::PbrBaseColorFactor(material.base_color),
            base_color_texture: None,
            metallic_factor: gj::material::StrengthFactor(material.metallic),
            roughness_factor: gj::material::StrengthFactor(material.roughness),
            metallic_roughness_texture: None,
            extensions: None,
            extras: gj::Extras::default(),
        };

        self.root.materials.push(gj::Material {
            name: Some(material.name.clone()),
            alpha_cutoff: None,
            alpha_mode: gj::validation::Checked::Valid(gj::material::AlphaMode::Opaque),
            double_sided: material.double_sided,
            pbr_metallic_roughness: pbr,
            normal_texture: None,
            occlusion_texture: None,
            emissive_texture: None,
            emissive_factor: gj::material::EmissiveFactor([0.0, 0.0, 0.0]),
            extensions: None,
            extras: gj::Extras::default(),
        });

        idx
    }

    // -- Buffer/accessor helpers ---------------------------------------------

    fn align_buffer(&mut self) {
        let padding = (4 - (self.buffer_data.len() % 4)) % 4;
        self.buffer_data.extend(std::iter::repeat(0u8).take(padding));
    }

    fn push_buffer_view(&mut self, data: &[u8], target: Option<gj::buffer::Target>) -> u32 {
        self.align_buffer();
        let offset = self.buffer_data.len();
        self.buffer_data.extend_from_slice(data);

        let view_idx = self.root.buffer_views.len() as u32;
        self.root.buffer_views.push(gj::buffer::View {
            buffer: gj::Index::new(0),
            byte_offset: Some(gj::validation::USize64(offset as u64)),
            byte_length: gj::validation::USize64(data.len() as u64),
            byte_stride: None,
            target: target.map(gj::validation::Checked::Valid),
            name: None,
            extensions: None,
            extras: gj::Extras::default(),
        });

        view_idx
    }

    fn push_accessor(
        &mut self,
        buffer_view: u32,
        count: u64,
        component_type: gj::accessor::ComponentType,
        type_: gj::accessor::Type,
        min: Option<gj::Value>,
        max: Option<gj::Value>,
    ) -> u32 {
        let acc_idx = self.root.accessors.len() as u32;
        self.root.accessors.push(gj::Accessor {
            buffer_view: Some(gj::Index::new(buffer_view)),
            byte_offset: Some(gj::validation::USize64(0)),
            count: gj::validation::USize64(count),
            component_type: gj::validation::Checked::Valid(gj::accessor::GenericComponentType(
                component_type,
            )),
            type_: gj::validation::Checked::Valid(type_),
            min,
            max,
            normalized: false,
            name: None,
            sparse: None,
            extensions: None,
            extras: gj::Extras::default(),
        });
        acc_idx
    }

    // -- GLB assembly --------------------------------------------------------

    fn finish(mut self) -> Result<Vec<u8>> {
        self.align_buffer();
        if !self.buffer_data.is_empty() {
            self.root.buffers.push(gj::Buffer {
                byte_length: gj::validation::USize64(self.buffer_data.len() as u64),
                name: None,
                uri: None,
                extensions: None,
                extras: gj::Extras::default(),
            });
        }

        // An empty `nodes` list is omitted on write but required on read
        if !self.scene_nodes.is_empty() {
            self.root.scenes.push(gj::Scene {
                name: None,
                nodes: std::mem::take(&mut self.scene_nodes),
                extensions: None,
                extras: gj::Extras::default(),
            });
            self.root.scene = Some(gj::Index::new(0));
        }
        self.root.asset = gj::Asset {
            generator: Some(GENERATOR.into()),
            version: "2.0".into(),
            ..Default::default()
        };

        let json = self
            .root
            .to_vec()
            .map_err(|e| Error::Export(format!("JSON serialization failed: {e}")))?;

        let bin_len = if self.buffer_data.is_empty() {
            0
        } else {
            GLB_CHUNK_HEADER_LEN + padded_len(self.buffer_data.len())
        };
        let total_length = GLB_HEADER_LEN + GLB_CHUNK_HEADER_LEN + padded_len(json.len()) + bin_len;
        let length = u32::try_from(total_length).map_err(|_| {
            Error::Export(format!("{total_length} bytes exceeds the 4 GiB GLB limit"))
        })?;

        let glb = Glb {
            header: Header {
                magic: *b"glTF",
                version: 2,
                length,
            },
            json: Cow::Owned(json),
            bin: if self.buffer_data.is_empty() {
                None
            } else {
                Some(Cow::Owned(self.buffer_data))
            },
        };

        let bytes = glb.to_vec()?;
        if bytes.len() != total_length {
            return Err(Error::Export(format!(
                "GLB writer produced {} bytes, expected {}",
                bytes.len(),
                total_length
            )));
        }
        Ok(bytes)
    }
}

#[inline]
fn padded_len(len: usize) -> usize {
    (len + 3) & !3
}

fn f32_bytes(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

/// Build a JSON array of f32 values (for accessor min/max).
fn json_f32_array(values: &[f32]) -> gj::Value {
    gj::Value::Array(values.iter().map(|&v| gj::Value::from(v as f64)).collect())
}
