// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![doc = r"Geometry primitives for Strata.

This crate provides:
- A small `Vec3` and an axis-aligned bounding box (`Aabb`) stored as a minimum
  corner plus extents.
- A broad-phase trait with a sweep-and-prune implementation
  (`SweepAndPrune`) and an all-pairs reference (`AllPairs`).
- Footprint placement built on the broad phase.

Design notes:
- Deterministic: pair output is canonical `(lo, hi)` and sorted ascending.
- Overlap is inclusive on faces (touching boxes are reported as a pair).
- Float32 throughout.
"]

/// Broad-phase interfaces and implementations.
pub mod broad;
/// Foundational geometric types.
pub mod types;

pub use broad::{
    brute::AllPairs,
    placement::{FootprintLayout, PlacementError},
    sap::{EndpointKind, SapEndpoint, SweepAndPrune},
    BroadPhase, BroadPhaseError, SapHandle,
};
pub use types::aabb::{Aabb, GeomError};
pub use types::vec3::Vec3;
