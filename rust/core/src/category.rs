// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Surface categories and their base colors
//!
//! The category set is closed. Its declaration order is the order in which
//! meshes are grouped, assembled and written to the output scene, so changing
//! it changes the exported bytes.

use std::fmt;

/// Surface class driving mesh grouping and material color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Walls,
    InteriorWalls,
    Roofs,
    Ceilings,
    ExteriorFloors,
    InteriorFloors,
    AirWalls,
    Apertures,
    InteriorApertures,
    Doors,
    InteriorDoors,
    OutdoorShades,
    IndoorShades,
    ShadeMeshes,
}

/// Number of categories
pub const CATEGORY_COUNT: usize = 14;

/// Name and RGB base color per category, indexed by [`Category::index`]
const CATEGORY_TABLE: [(&str, [f32; 3]); CATEGORY_COUNT] = [
    ("walls", [0.8, 0.8, 0.8]),
    ("interior_walls", [0.99, 0.98, 0.97]),
    ("roofs", [0.2, 0.2, 0.2]),
    ("ceilings", [1.0, 1.0, 1.0]),
    ("exterior_floors", [0.9, 0.88, 0.85]),
    ("interior_floors", [0.95, 0.92, 0.9]),
    ("air_walls", [0.99, 0.99, 0.99]),
    ("apertures", [0.7, 0.75, 0.92]),
    ("interior_apertures", [0.85, 0.88, 0.92]),
    ("doors", [0.2, 0.18, 0.16]),
    ("interior_doors", [0.3, 0.28, 0.26]),
    ("outdoor_shades", [0.65, 0.65, 0.65]),
    ("indoor_shades", [0.75, 0.75, 0.75]),
    ("shade_meshes", [0.55, 0.55, 0.55]),
];

impl Category {
    /// All categories in grouping order
    pub const ALL: [Category; CATEGORY_COUNT] = [
        Category::Walls,
        Category::InteriorWalls,
        Category::Roofs,
        Category::Ceilings,
        Category::ExteriorFloors,
        Category::InteriorFloors,
        Category::AirWalls,
        Category::Apertures,
        Category::InteriorApertures,
        Category::Doors,
        Category::InteriorDoors,
        Category::OutdoorShades,
        Category::IndoorShades,
        Category::ShadeMeshes,
    ];

    /// Position of this category in [`Category::ALL`]
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Snake-case identifier, used as the scene node and material name
    #[inline]
    pub const fn name(self) -> &'static str {
        CATEGORY_TABLE[self.index()].0
    }

    /// Linear RGB base color
    #[inline]
    pub const fn color(self) -> [f32; 3] {
        CATEGORY_TABLE[self.index()].1
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_table_order() {
        for (i, category) in Category::ALL.iter().enumerate() {
            assert_eq!(category.index(), i);
        }
    }

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<&str> = Category::ALL.iter().map(|c| c.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), CATEGORY_COUNT);
    }

    #[test]
    fn test_colors() {
        assert_eq!(Category::Walls.color(), [0.8, 0.8, 0.8]);
        assert_eq!(Category::Roofs.color(), [0.2, 0.2, 0.2]);
        assert_eq!(Category::Apertures.color(), [0.7, 0.75, 0.92]);
        assert_eq!(Category::ExteriorFloors.color(), [0.9, 0.88, 0.85]);

        for category in Category::ALL {
            assert!(category.color().iter().all(|c| (0.0..=1.0).contains(c)));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Category::InteriorApertures.to_string(), "interior_apertures");
    }
}
