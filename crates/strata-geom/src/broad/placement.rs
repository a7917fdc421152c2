// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use thiserror::Error;
use tracing::debug;

use crate::broad::sap::SweepAndPrune;
use crate::types::{aabb::Aabb, vec3::Vec3};

/// Error returned when a footprint cannot be placed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    /// The candidate overlaps already placed footprints (indices, ascending).
    #[error("footprint overlaps placed footprints {with:?}")]
    Overlaps {
        /// Indices into [`FootprintLayout::placed`].
        with: Vec<usize>,
    },
}

/// Set of non-overlapping footprints resting on the ground plane (`y = 0`).
///
/// Each placement attempt builds a fresh [`SweepAndPrune`] over every placed
/// footprint plus the candidate and rejects the candidate if any reported pair
/// involves it.
#[derive(Debug, Default, Clone)]
pub struct FootprintLayout {
    placed: Vec<Aabb>,
}

impl FootprintLayout {
    /// Creates an empty layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Footprints accepted so far, in placement order.
    pub fn placed(&self) -> &[Aabb] {
        &self.placed
    }

    /// Places `shape` with its minimum corner moved to ground position
    /// `(x, z)`, returning the new footprint's index.
    ///
    /// The shape's own `min` acts as a local offset; `min.y` is dropped so
    /// every footprint sits on the ground plane.
    pub fn try_place(&mut self, shape: Aabb, ground: [f32; 2]) -> Result<usize, PlacementError> {
        let candidate = shape.translated(Vec3::new(ground[0], 0.0, ground[1])).with_min_y(0.0);

        let mut sap = SweepAndPrune::new();
        let handles: Vec<_> = self.placed.iter().map(|bb| sap.insert(*bb)).collect();
        let probe = sap.insert(candidate);

        let mut with: Vec<usize> = sap
            .collisions()
            .into_iter()
            .filter_map(|(a, b)| match (a == probe, b == probe) {
                (true, _) => Some(b),
                (_, true) => Some(a),
                _ => None,
            })
            .filter_map(|other| handles.iter().position(|h| *h == other))
            .collect();

        if !with.is_empty() {
            with.sort_unstable();
            debug!(conflicts = with.len(), "footprint rejected");
            return Err(PlacementError::Overlaps { with });
        }

        self.placed.push(candidate);
        Ok(self.placed.len() - 1)
    }
}
