// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HBJSON building model
//!
//! Only the parts of the Honeybee schema the mesh pipeline reads are modelled.
//! Unknown fields are ignored and absent ones fall back to defaults, so
//! partially populated documents still load.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::Result;

/// Ordered closed polygon of boundary vertices
pub type BoundaryLoop = Vec<BoundaryPoint>;

/// Boundary condition value that marks a floor as ground-adjacent
pub const GROUND_BOUNDARY_CONDITION: &str = "Ground";

/// `null` reads as the field's default, same as an absent field
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Anything other than an array reads as an empty loop
fn lenient_loop<'de, D>(deserializer: D) -> std::result::Result<BoundaryLoop, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(points) => points.iter().map(BoundaryPoint::from_value).collect(),
        _ => Vec::new(),
    })
}

/// One boundary vertex as written in the document
///
/// Holds `None` when the entry is not exactly three numbers. The loop it
/// belongs to is then skipped at build time instead of failing the parse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryPoint(Option<[f64; 3]>);

impl BoundaryPoint {
    fn from_value(value: &Value) -> Self {
        let coords = match value.as_array().map(Vec::as_slice) {
            Some([x, y, z]) => x
                .as_f64()
                .zip(y.as_f64())
                .zip(z.as_f64())
                .map(|((x, y), z)| [x, y, z]),
            _ => None,
        };
        Self(coords)
    }

    /// Coordinates, if the entry was a valid 3D point
    #[inline]
    pub fn coords(&self) -> Option<[f64; 3]> {
        self.0
    }
}

impl From<[f64; 3]> for BoundaryPoint {
    fn from(coords: [f64; 3]) -> Self {
        Self(Some(coords))
    }
}

impl<'de> Deserialize<'de> for BoundaryPoint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Ok(Self::from_value(&Value::deserialize(deserializer)?))
    }
}

/// Root of an HBJSON document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Model {
    #[serde(default)]
    pub identifier: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rooms: Vec<Room>,
}

/// A room: a collection of faces
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Room {
    #[serde(default)]
    pub identifier: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub faces: Vec<Face>,
}

/// A room face with its boundary and openings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Face {
    #[serde(default)]
    pub identifier: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub face_type: FaceType,
    #[serde(default)]
    pub boundary_condition: Option<BoundaryCondition>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub geometry: Geometry,
    #[serde(default, deserialize_with = "null_as_default")]
    pub apertures: Vec<Aperture>,
}

/// An opening nested inside a face
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Aperture {
    #[serde(default)]
    pub identifier: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub geometry: Geometry,
}

/// Face3D geometry; only the outer boundary is read
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Geometry {
    #[serde(default, deserialize_with = "lenient_loop")]
    pub boundary: BoundaryLoop,
}

/// Boundary condition object, e.g. `{"type": "Ground"}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BoundaryCondition {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
}

impl BoundaryCondition {
    pub fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into() }
    }

    #[inline]
    pub fn is_ground(&self) -> bool {
        self.kind == GROUND_BOUNDARY_CONDITION
    }
}

/// Face type vocabulary
///
/// Values outside the known vocabulary are kept verbatim in
/// [`FaceType::Other`] rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(from = "String")]
pub enum FaceType {
    #[default]
    Wall,
    RoofCeiling,
    Floor,
    AirBoundary,
    Other(String),
}

impl From<&str> for FaceType {
    fn from(value: &str) -> Self {
        match value {
            "Wall" => FaceType::Wall,
            "RoofCeiling" => FaceType::RoofCeiling,
            "Floor" => FaceType::Floor,
            "AirBoundary" => FaceType::AirBoundary,
            other => FaceType::Other(other.to_string()),
        }
    }
}

impl From<String> for FaceType {
    fn from(value: String) -> Self {
        FaceType::from(value.as_str())
    }
}

impl Model {
    /// Parse a model from raw document bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Parse a model from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Total number of faces across all rooms
    pub fn face_count(&self) -> usize {
        self.rooms.iter().map(|r| r.faces.len()).sum()
    }

    /// Total number of apertures across all faces
    pub fn aperture_count(&self) -> usize {
        self.rooms
            .iter()
            .flat_map(|r| &r.faces)
            .map(|f| f.apertures.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WALL_WITH_WINDOW: &str = r#"{
        "type": "Model",
        "identifier": "office",
        "rooms": [{
            "type": "Room",
            "identifier": "room_1",
            "faces": [{
                "type": "Face",
                "identifier": "room_1..Face0",
                "face_type": "Wall",
                "boundary_condition": {"type": "Outdoors", "sun_exposure": true},
                "geometry": {
                    "type": "Face3D",
                    "boundary": [[0, 0, 0], [4, 0, 0], [4, 0, 3], [0, 0, 3]]
                },
                "apertures": [{
                    "identifier": "win_1",
                    "geometry": {"boundary": [[1, 0, 1], [3, 0, 1], [3, 0, 2], [1, 0, 2]]}
                }]
            }]
        }]
    }"#;

    #[test]
    fn test_parse_wall_with_window() {
        let model = Model::from_json(WALL_WITH_WINDOW).unwrap();
        assert_eq!(model.identifier.as_deref(), Some("office"));
        assert_eq!(model.rooms.len(), 1);
        assert_eq!(model.face_count(), 1);
        assert_eq!(model.aperture_count(), 1);

        let face = &model.rooms[0].faces[0];
        assert_eq!(face.face_type, FaceType::Wall);
        assert!(!face.boundary_condition.as_ref().unwrap().is_ground());
        assert_eq!(face.geometry.boundary.len(), 4);
        assert_eq!(face.geometry.boundary[2].coords(), Some([4.0, 0.0, 3.0]));
        assert_eq!(
            face.apertures[0].geometry.boundary[0].coords(),
            Some([1.0, 0.0, 1.0])
        );
    }

    #[test]
    fn test_missing_fields_default() {
        let model = Model::from_json(r#"{"rooms": [{"faces": [{}]}]}"#).unwrap();
        let face = &model.rooms[0].faces[0];
        assert_eq!(face.face_type, FaceType::Wall);
        assert!(face.boundary_condition.is_none());
        assert!(face.geometry.boundary.is_empty());
        assert!(face.apertures.is_empty());

        let empty = Model::from_json("{}").unwrap();
        assert!(empty.rooms.is_empty());
    }

    #[test]
    fn test_unknown_face_type_is_kept() {
        let model =
            Model::from_json(r#"{"rooms": [{"faces": [{"face_type": "Skylight"}]}]}"#).unwrap();
        let face_type = &model.rooms[0].faces[0].face_type;
        assert_eq!(face_type, &FaceType::Other("Skylight".into()));
    }

    #[test]
    fn test_null_fields_read_as_absent() {
        let model = Model::from_json(
            r#"{"rooms": [
                {"faces": [
                    {"face_type": null, "geometry": null, "apertures": null},
                    {"geometry": {"boundary": null}, "boundary_condition": {"type": null}},
                    {"boundary_condition": null}
                ]},
                {"faces": null}
            ]}"#,
        )
        .unwrap();
        assert_eq!(model.face_count(), 3);
        assert_eq!(model.aperture_count(), 0);

        let faces = &model.rooms[0].faces;
        assert_eq!(faces[0].face_type, FaceType::Wall);
        assert!(faces[0].geometry.boundary.is_empty());
        assert!(faces[1].geometry.boundary.is_empty());
        assert_eq!(faces[1].boundary_condition.as_ref().unwrap().kind, "");
        assert!(faces[2].boundary_condition.is_none());

        assert!(Model::from_json(r#"{"rooms": null}"#).unwrap().rooms.is_empty());
    }

    #[test]
    fn test_malformed_points_are_kept_as_invalid() {
        let model = Model::from_json(
            r#"{"rooms": [{"faces": [{"geometry": {"boundary": [
                [0, 0, 0], [1, 0], [1, 1, "z"], null, [0, 1, 0, 7], [2.5, 1, 0]
            ]}}]}]}"#,
        )
        .unwrap();
        let points: Vec<Option<[f64; 3]>> = model.rooms[0].faces[0]
            .geometry
            .boundary
            .iter()
            .map(BoundaryPoint::coords)
            .collect();
        assert_eq!(
            points,
            vec![Some([0.0, 0.0, 0.0]), None, None, None, None, Some([2.5, 1.0, 0.0])]
        );
    }

    #[test]
    fn test_non_array_boundary_is_empty() {
        let model =
            Model::from_json(r#"{"rooms": [{"faces": [{"geometry": {"boundary": "oops"}}]}]}"#)
                .unwrap();
        assert!(model.rooms[0].faces[0].geometry.boundary.is_empty());
    }

    #[test]
    fn test_ground_boundary_condition() {
        assert!(BoundaryCondition::new("Ground").is_ground());
        assert!(!BoundaryCondition::new("Adiabatic").is_ground());
        assert!(!BoundaryCondition::new("ground").is_ground());
    }

    #[test]
    fn test_malformed_document() {
        assert!(Model::from_slice(b"{\"rooms\": [").is_err());
        assert!(Model::from_json(r#"{"rooms": 3}"#).is_err());
    }
}
