// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use core::cmp::Ordering;
use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::broad::{canonical, BroadPhase, BroadPhaseError, HandleCounter, SapHandle};
use crate::types::aabb::Aabb;

/// Which side of a proxy's X interval an endpoint marks.
///
/// `Begin` orders before `End` so that at equal coordinates a box opening is
/// seen before another box closing, making X contact an overlap.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EndpointKind {
    /// `min.x` of the proxy.
    Begin,
    /// `min.x + width` of the proxy.
    End,
}

/// One end of a proxy's X interval.
///
/// Carries a copy of the proxy's box so the sweep can run the Y/Z tests
/// without a side-table lookup.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SapEndpoint {
    /// Owning proxy.
    pub handle: SapHandle,
    /// Cached bounds of the owning proxy.
    pub aabb: Aabb,
    /// Begin or end of the interval.
    pub kind: EndpointKind,
    /// X coordinate of this endpoint.
    pub value: f32,
}

impl SapEndpoint {
    fn pair_for(handle: SapHandle, aabb: Aabb) -> [Self; 2] {
        let begin = aabb.min().x;
        let end = begin + aabb.width();
        [
            Self { handle, aabb, kind: EndpointKind::Begin, value: begin },
            Self { handle, aabb, kind: EndpointKind::End, value: end },
        ]
    }
}

fn endpoint_order(a: &SapEndpoint, b: &SapEndpoint) -> Ordering {
    a.value.total_cmp(&b.value).then(a.kind.cmp(&b.kind))
}

/// Sweep-and-prune broad phase over the X axis.
///
/// Keeps one endpoint list sorted ascending by X (ties: `Begin` before `End`,
/// then insertion order). [`SweepAndPrune::collisions`] walks that list once,
/// maintaining the set of proxies whose interval is open, and checks Y and Z
/// only for proxies that are open at the same time.
///
/// Invariants:
/// - Every live handle owns exactly one `Begin` and one `End` endpoint, and
///   `Begin.value <= End.value`.
/// - The endpoint list is sorted whenever control returns to the caller.
///
/// `update` performs a full stable re-sort; the sort is adaptive, so
/// frame-to-frame motion (nearly sorted input) stays cheap.
#[derive(Debug, Default, Clone)]
pub struct SweepAndPrune {
    handles: HandleCounter,
    x_axis: Vec<SapEndpoint>,
    proxies: FxHashMap<SapHandle, Aabb>,
}

impl SweepAndPrune {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live proxies.
    pub fn len(&self) -> usize {
        self.proxies.len()
    }

    /// Returns `true` when no proxies are tracked.
    pub fn is_empty(&self) -> bool {
        self.proxies.is_empty()
    }

    /// Returns `true` if `handle` is live in this index.
    pub fn contains(&self, handle: SapHandle) -> bool {
        self.proxies.contains_key(&handle)
    }

    /// Current bounds of `handle`.
    pub fn get(&self, handle: SapHandle) -> Option<Aabb> {
        self.proxies.get(&handle).copied()
    }

    /// The sorted endpoint list.
    pub fn endpoints(&self) -> &[SapEndpoint] {
        &self.x_axis
    }

    /// Returns `true` when the endpoint list is in sweep order.
    pub fn is_sorted(&self) -> bool {
        self.x_axis.windows(2).all(|w| endpoint_order(&w[0], &w[1]) != Ordering::Greater)
    }

    /// Adds a proxy and returns its handle.
    pub fn insert(&mut self, aabb: Aabb) -> SapHandle {
        let handle = self.handles.issue();
        for endpoint in SapEndpoint::pair_for(handle, aabb) {
            self.sorted_insert(endpoint);
        }
        self.proxies.insert(handle, aabb);
        trace!(%handle, min_x = aabb.min().x, width = aabb.width(), "sap insert");
        handle
    }

    /// Moves both endpoints of `handle` to `aabb` and re-sorts.
    pub fn update(&mut self, handle: SapHandle, aabb: Aabb) -> Result<(), BroadPhaseError> {
        let slot = self.proxies.get_mut(&handle).ok_or(BroadPhaseError::UnknownHandle(handle))?;
        *slot = aabb;
        let [begin, end] = SapEndpoint::pair_for(handle, aabb);
        for endpoint in self.x_axis.iter_mut().filter(|e| e.handle == handle) {
            *endpoint = match endpoint.kind {
                EndpointKind::Begin => begin,
                EndpointKind::End => end,
            };
        }
        self.x_axis.sort_by(endpoint_order);
        trace!(%handle, min_x = aabb.min().x, width = aabb.width(), "sap update");
        Ok(())
    }

    /// Deletes both endpoints of `handle`, returning its last bounds.
    ///
    /// The handle is retired; later handles keep counting upward.
    pub fn remove(&mut self, handle: SapHandle) -> Result<Aabb, BroadPhaseError> {
        let aabb = self.proxies.remove(&handle).ok_or(BroadPhaseError::UnknownHandle(handle))?;
        let [begin, end] = SapEndpoint::pair_for(handle, aabb);
        match (self.locate(&begin), self.locate(&end)) {
            (Some(b), Some(e)) => {
                // Remove the later index first so the earlier one stays valid.
                self.x_axis.remove(b.max(e));
                self.x_axis.remove(b.min(e));
            }
            _ => self.x_axis.retain(|ep| ep.handle != handle),
        }
        trace!(%handle, "sap remove");
        Ok(aabb)
    }

    /// Reports every pair of proxies whose boxes overlap on all three axes.
    ///
    /// Pairs are canonical `(lo, hi)` and sorted ascending.
    pub fn collisions(&self) -> Vec<(SapHandle, SapHandle)> {
        // Proxies whose Begin has been seen but whose End has not.
        let mut active: BTreeMap<SapHandle, &Aabb> = BTreeMap::new();
        let mut out = Vec::new();

        for endpoint in &self.x_axis {
            match endpoint.kind {
                EndpointKind::Begin => {
                    active.insert(endpoint.handle, &endpoint.aabb);
                }
                EndpointKind::End => {
                    active.remove(&endpoint.handle);
                    let bb = &endpoint.aabb;
                    for (other, other_bb) in &active {
                        if bb.overlaps_y(other_bb) && bb.overlaps_z(other_bb) {
                            out.push(canonical(endpoint.handle, *other));
                        }
                    }
                }
            }
        }

        out.sort_unstable();
        out.dedup();
        debug!(proxies = self.proxies.len(), pairs = out.len(), "sap sweep");
        out
    }

    fn sorted_insert(&mut self, endpoint: SapEndpoint) {
        let idx = self
            .x_axis
            .partition_point(|e| endpoint_order(e, &endpoint) != Ordering::Greater);
        self.x_axis.insert(idx, endpoint);
    }

    /// Index of the endpoint matching `probe`'s handle, kind and value.
    fn locate(&self, probe: &SapEndpoint) -> Option<usize> {
        let start = self.x_axis.partition_point(|e| endpoint_order(e, probe) == Ordering::Less);
        self.x_axis[start..]
            .iter()
            .take_while(|e| endpoint_order(e, probe) == Ordering::Equal)
            .position(|e| e.handle == probe.handle)
            .map(|i| start + i)
    }
}

impl BroadPhase for SweepAndPrune {
    fn insert(&mut self, aabb: Aabb) -> SapHandle {
        SweepAndPrune::insert(self, aabb)
    }

    fn update(&mut self, handle: SapHandle, aabb: Aabb) -> Result<(), BroadPhaseError> {
        SweepAndPrune::update(self, handle, aabb)
    }

    fn remove(&mut self, handle: SapHandle) -> Result<Aabb, BroadPhaseError> {
        SweepAndPrune::remove(self, handle)
    }

    fn pairs(&self) -> Vec<(SapHandle, SapHandle)> {
        self.collisions()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::vec3::Vec3;

    fn cube(x: f32, size: f32) -> Aabb {
        Aabb::cube(Vec3::new(x, 0.0, 0.0), size).unwrap()
    }

    #[test]
    fn insert_keeps_two_endpoints_per_handle_in_order() {
        let mut sap = SweepAndPrune::new();
        let a = sap.insert(cube(10.0, 5.0));
        let b = sap.insert(cube(0.0, 20.0));
        assert_eq!(sap.endpoints().len(), 4);
        assert!(sap.is_sorted());
        let order: Vec<_> = sap.endpoints().iter().map(|e| (e.handle, e.kind)).collect();
        assert_eq!(
            order,
            vec![
                (b, EndpointKind::Begin),
                (a, EndpointKind::Begin),
                (a, EndpointKind::End),
                (b, EndpointKind::End),
            ]
        );
    }

    #[test]
    fn equal_values_keep_insertion_order() {
        let mut sap = SweepAndPrune::new();
        let a = sap.insert(cube(0.0, 1.0));
        let b = sap.insert(cube(0.0, 1.0));
        let begins: Vec<_> = sap
            .endpoints()
            .iter()
            .filter(|e| e.kind == EndpointKind::Begin)
            .map(|e| e.handle)
            .collect();
        assert_eq!(begins, vec![a, b]);
    }

    #[test]
    fn locate_finds_endpoint_within_tie_run() {
        let mut sap = SweepAndPrune::new();
        let _a = sap.insert(cube(0.0, 1.0));
        let b = sap.insert(cube(0.0, 1.0));
        let [begin, _] = SapEndpoint::pair_for(b, cube(0.0, 1.0));
        assert_eq!(sap.locate(&begin), Some(1));
    }
}
