// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Broad-phase interfaces and implementations.
//!
//! Determinism contract (applies to every implementation here):
//! - Handles are issued from a monotonically increasing counter and are never
//!   reissued, not even after `remove`.
//! - Pair identity is canonicalized as `(min_handle, max_handle)`.
//! - The emitted pair list is strictly sorted lexicographically by that tuple.
//! - Overlap is inclusive on faces (touching AABBs are considered overlapping).

use core::fmt;

use thiserror::Error;

use crate::types::aabb::Aabb;

#[doc = "All-pairs reference broad phase used as a correctness baseline."]
pub mod brute;
#[doc = "Footprint placement checks built on the sweep-and-prune index."]
pub mod placement;
#[doc = "Sweep-and-prune along X with Y/Z interval checks."]
pub mod sap;

/// Opaque proxy identifier returned by [`BroadPhase::insert`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SapHandle(u64);

impl fmt::Display for SapHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic handle source shared by the broad-phase implementations.
#[derive(Debug, Default, Clone)]
pub(crate) struct HandleCounter {
    next: u64,
}

impl HandleCounter {
    pub(crate) fn issue(&mut self) -> SapHandle {
        let id = SapHandle(self.next);
        self.next += 1;
        id
    }
}

/// Errors reported by broad-phase mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BroadPhaseError {
    /// The handle was never issued by this index, or has been removed.
    #[error("unknown broad-phase handle {0}")]
    UnknownHandle(SapHandle),
}

/// Broad-phase interface for tracking proxies and querying overlapping pairs.
///
/// Implementations must return pairs deterministically: the pair `(a, b)` is
/// canonicalized such that `a < b`, and the full list is sorted ascending by
/// `(a, b)`.
pub trait BroadPhase {
    /// Adds a proxy and returns its freshly issued handle.
    fn insert(&mut self, aabb: Aabb) -> SapHandle;
    /// Replaces the bounds of an existing proxy.
    fn update(&mut self, handle: SapHandle, aabb: Aabb) -> Result<(), BroadPhaseError>;
    /// Removes a proxy, returning its last bounds.
    fn remove(&mut self, handle: SapHandle) -> Result<Aabb, BroadPhaseError>;
    /// Returns a canonical, deterministically-ordered list of overlapping pairs.
    fn pairs(&self) -> Vec<(SapHandle, SapHandle)>;
}

/// Orders a pair as `(lo, hi)`.
pub(crate) fn canonical(a: SapHandle, b: SapHandle) -> (SapHandle, SapHandle) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
