// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use std::collections::BTreeMap;

use crate::broad::{BroadPhase, BroadPhaseError, HandleCounter, SapHandle};
use crate::types::aabb::Aabb;

/// A minimal broad phase using an `O(n^2)` all-pairs sweep.
///
/// Serves as the correctness baseline for [`super::sap::SweepAndPrune`]:
/// identical insert/update/remove sequences must yield identical pair lists.
#[derive(Debug, Default, Clone)]
pub struct AllPairs {
    handles: HandleCounter,
    items: BTreeMap<SapHandle, Aabb>,
}

impl AllPairs {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live proxies.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` when no proxies are tracked.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl BroadPhase for AllPairs {
    fn insert(&mut self, aabb: Aabb) -> SapHandle {
        let handle = self.handles.issue();
        self.items.insert(handle, aabb);
        handle
    }

    fn update(&mut self, handle: SapHandle, aabb: Aabb) -> Result<(), BroadPhaseError> {
        let slot = self.items.get_mut(&handle).ok_or(BroadPhaseError::UnknownHandle(handle))?;
        *slot = aabb;
        Ok(())
    }

    fn remove(&mut self, handle: SapHandle) -> Result<Aabb, BroadPhaseError> {
        self.items.remove(&handle).ok_or(BroadPhaseError::UnknownHandle(handle))
    }

    fn pairs(&self) -> Vec<(SapHandle, SapHandle)> {
        // BTreeMap iteration is already sorted by handle, so (a, b) is canonical.
        let items: Vec<(SapHandle, Aabb)> = self.items.iter().map(|(h, bb)| (*h, *bb)).collect();
        let mut out = Vec::new();
        for (i, (a_id, a_bb)) in items.iter().enumerate() {
            for (b_id, b_bb) in items.iter().skip(i + 1) {
                if a_bb.overlaps(b_bb) {
                    out.push((*a_id, *b_id));
                }
            }
        }
        out
    }
}
