// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![doc = r"Grid primitives for Strata.

This crate provides:
- Signed cell positions (`GridPos`) and unsigned map sizes (`Extents`).
- A dense, row-major value map (`ValueMap<T>`) used for visited flags, event
  timers, and caller-owned cost fields.
- Rectangular windows (`Volume`) for sampling and viewport clamping.

Design notes:
- Positions are signed so that off-map neighbours can be formed and rejected
  with a bounds check instead of wrapping.
- Iteration order is always row-major ascending (`y` outer, `x` inner).
"]

/// Cell positions, map extents and 4-neighbourhoods.
pub mod pos;
/// Dense row-major storage keyed by [`GridPos`].
pub mod value_map;
/// Rectangular windows over a map.
pub mod volume;

pub use pos::{Extents, GridPos};
pub use value_map::{GridError, ValueMap};
pub use volume::Volume;
