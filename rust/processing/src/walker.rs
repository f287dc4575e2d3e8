// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Model walker
//!
//! Visits rooms → faces → apertures in document order, classifies each loop,
//! builds its fragment and files it under its category.

use hbmesh_core::{classify_aperture, classify_face, Category, Model, CATEGORY_COUNT};
use hbmesh_geometry::{build, BuildOutcome, Fragment, Rotation};
use serde::Serialize;

/// One append-only fragment list per category, indexed by [`Category::index`]
///
/// Every category always has a (possibly empty) slot.
#[derive(Debug, Clone)]
pub struct CategoryBuckets {
    buckets: [Vec<Fragment>; CATEGORY_COUNT],
}

impl CategoryBuckets {
    pub fn new() -> Self {
        Self {
            buckets: std::array::from_fn(|_| Vec::new()),
        }
    }

    /// File a fragment under its own category
    #[inline]
    pub fn push(&mut self, fragment: Fragment) {
        self.buckets[fragment.category.index()].push(fragment);
    }

    #[inline]
    pub fn get(&self, category: Category) -> &[Fragment] {
        &self.buckets[category.index()]
    }

    /// Categories with their fragments, in category order
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[Fragment])> + '_ {
        Category::ALL
            .into_iter()
            .map(move |category| (category, self.get(category)))
    }

    pub fn fragment_count(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }
}

impl Default for CategoryBuckets {
    fn default() -> Self {
        Self::new()
    }
}

/// Counters collected while walking a model
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WalkStats {
    pub rooms: usize,
    pub faces: usize,
    pub apertures: usize,
    pub fragments: usize,
    pub skipped: usize,
}

/// Walk the model and bucket every buildable loop by category
///
/// A face whose own boundary is skipped still has its apertures built and
/// classified from its face type. Converters that drop the whole face at that
/// point lose openings that are themselves well formed.
pub fn walk(model: &Model, rotation: &Rotation) -> (CategoryBuckets, WalkStats) {
    let mut buckets = CategoryBuckets::new();
    let mut stats = WalkStats {
        rooms: model.rooms.len(),
        ..Default::default()
    };

    let mut file = |outcome: BuildOutcome, kind: &str, id: Option<&str>, stats: &mut WalkStats| {
        match outcome {
            BuildOutcome::Fragment(fragment) => {
                stats.fragments += 1;
                buckets.push(fragment);
            }
            BuildOutcome::Skipped(reason) => {
                stats.skipped += 1;
                tracing::debug!(kind, id = id.unwrap_or("<unnamed>"), %reason, "skipping loop");
            }
        }
    };

    for room in &model.rooms {
        for face in &room.faces {
            stats.faces += 1;
            let category = classify_face(face);
            let outcome = build(&face.geometry.boundary, rotation, false, category);
            file(outcome, "face", face.identifier.as_deref(), &mut stats);

            if face.apertures.is_empty() {
                continue;
            }

            // A degenerate host face does not drop its apertures
            let aperture_category = classify_aperture(face);
            for aperture in &face.apertures {
                stats.apertures += 1;
                let outcome = build(&aperture.geometry.boundary, rotation, true, aperture_category);
                file(outcome, "aperture", aperture.identifier.as_deref(), &mut stats);
            }
        }
    }

    (buckets, stats)
}
