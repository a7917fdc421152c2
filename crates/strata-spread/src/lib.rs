// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![doc = r"Event propagation over a grid.

An event (a signal, a fire front, a discovery wave) starts at one or more
seeded cells and spreads to the four axis neighbours of every cell it
crosses. The time needed to cross a cell comes from a caller-owned
[`CostMap`]. [`PropagationGrid::spread`] advances the clock and matures the
cells whose crossing time has elapsed; callers drain cascades by calling
`spread(cost, 0.0)` until it returns `false` (or use
[`PropagationGrid::step`], which does both).
"]

/// Per-cell propagation state and the spread pass.
pub mod propagation;
/// Per-cell activation timer.
pub mod timer;

pub use propagation::{CostMap, PropagationGrid, SpreadError, SpreadStep};
pub use timer::EventTimer;
