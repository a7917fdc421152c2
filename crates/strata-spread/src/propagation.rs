// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use strata_grid::{Extents, GridPos, ValueMap};
use thiserror::Error;
use tracing::{debug, trace};

use crate::timer::EventTimer;

/// Seconds needed for an event to cross each cell. Owned by the caller.
pub type CostMap = ValueMap<f32>;

/// Errors reported by [`PropagationGrid`] seeding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpreadError {
    /// The position does not address a cell of the grid.
    #[error("cell ({}, {}) is outside the {}x{} grid", pos.x, pos.y, extents.width, extents.height)]
    OutOfBounds {
        /// Requested cell.
        pos: GridPos,
        /// Grid size.
        extents: Extents,
    },
}

/// Summary of a [`PropagationGrid::step`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpreadStep {
    /// Spread passes that matured at least one cell.
    pub passes: usize,
    /// Cells that matured across all passes.
    pub matured: usize,
}

/// Grid-wide propagation state: visited flags, per-cell timers and the clock.
///
/// Invariants:
/// - `visited` and `timers` share the extents given to [`PropagationGrid::new`].
/// - A visited cell never holds an active timer and is never reactivated.
/// - `accum_time` only grows (for non-negative `dt`).
#[derive(Debug, Clone)]
pub struct PropagationGrid {
    visited: ValueMap<bool>,
    timers: ValueMap<EventTimer>,
    accum_time: f32,
}

impl PropagationGrid {
    /// Allocates a grid with no visited cells, no active timers and the clock at zero.
    pub fn new(extents: Extents) -> Self {
        Self { visited: ValueMap::new(extents), timers: ValueMap::new(extents), accum_time: 0.0 }
    }

    /// Grid size in cells.
    pub fn extents(&self) -> Extents {
        self.visited.extents()
    }

    /// Accumulated simulation clock.
    pub fn accum_time(&self) -> f32 {
        self.accum_time
    }

    /// Visited flags for every cell.
    pub fn visited(&self) -> &ValueMap<bool> {
        &self.visited
    }

    /// Timers for every cell (inactive ones included).
    pub fn timers(&self) -> &ValueMap<EventTimer> {
        &self.timers
    }

    /// Returns `true` once the event has crossed `pos`. Off-grid cells are never visited.
    pub fn is_visited(&self, pos: GridPos) -> bool {
        self.visited.get(pos).copied().unwrap_or(false)
    }

    /// The active timer at `pos`, if the event is currently crossing it.
    pub fn timer(&self, pos: GridPos) -> Option<EventTimer> {
        self.timers.get(pos).copied().filter(|t| t.active)
    }

    /// Number of cells the event is currently crossing.
    pub fn active_count(&self) -> usize {
        self.timers.as_slice().iter().filter(|t| t.active).count()
    }

    /// Number of cells the event has crossed.
    pub fn visited_count(&self) -> usize {
        self.visited.as_slice().iter().filter(|v| **v).count()
    }

    /// Returns `true` when no timer is running, so no further `spread` can change state.
    pub fn is_settled(&self) -> bool {
        self.active_count() == 0
    }

    /// Seeds the event at `pos`, entering the cell at clock value `start_time`.
    ///
    /// Seeding a visited cell does nothing; seeding a cell that is already
    /// active keeps the earlier of the two start times.
    pub fn activate(&mut self, pos: GridPos, start_time: f32) -> Result<(), SpreadError> {
        if !self.visited.is_in_bounds(pos) {
            return Err(SpreadError::OutOfBounds { pos, extents: self.extents() });
        }
        self.adjust_event_at(pos, start_time, 0.0);
        trace!(x = pos.x, y = pos.y, start_time, "event seeded");
        Ok(())
    }

    /// Advances the clock by `dt` and matures every cell whose crossing time
    /// has elapsed, returning `true` if any did.
    ///
    /// Maturity is decided against the state at the start of the call: cells
    /// activated by this call are first examined by the next one. Matured
    /// cells then propagate in row-major order from their current start
    /// time, so an earlier arrival from a neighbour that matured in the same
    /// call is carried through. After a
    /// call that returns `true`, keep calling `spread(cost, 0.0)` until it
    /// returns `false` to drain cascades (see [`Self::drain`]).
    ///
    /// # Panics
    /// Panics if `cost` does not have the grid's extents.
    pub fn spread(&mut self, cost: &CostMap, dt: f32) -> bool {
        self.pass(cost, dt) > 0
    }

    /// Calls `spread(cost, 0.0)` until nothing matures; returns the number of
    /// passes that matured at least one cell.
    ///
    /// Always terminates: each such pass marks at least one more cell visited.
    pub fn drain(&mut self, cost: &CostMap) -> usize {
        let mut passes = 0;
        while self.spread(cost, 0.0) {
            passes += 1;
        }
        passes
    }

    /// One `spread(cost, dt)` followed by a full drain.
    pub fn step(&mut self, cost: &CostMap, dt: f32) -> SpreadStep {
        let mut summary = SpreadStep::default();
        let mut matured = self.pass(cost, dt);
        while matured > 0 {
            summary.passes += 1;
            summary.matured += matured;
            matured = self.pass(cost, 0.0);
        }
        summary
    }

    fn pass(&mut self, cost: &CostMap, dt: f32) -> usize {
        assert_eq!(
            cost.extents(),
            self.extents(),
            "cost map extents must match the propagation grid"
        );

        self.accum_time += dt;
        let now = self.accum_time;

        // Which cells mature is decided against the state at the start of the pass.
        let mut matured: Vec<(GridPos, f32)> = Vec::new();
        for (pos, timer) in self.timers.iter() {
            if !timer.active {
                continue;
            }
            let Some(&cell_cost) = cost.get(pos) else { continue };
            if timer.elapsed(now) > cell_cost {
                matured.push((pos, cell_cost));
            }
        }

        // Row-major. A cell's start time is read when it is processed, so a
        // co-matured neighbour handled earlier in this pass may have lowered it.
        for &(pos, cell_cost) in &matured {
            let Some(timer) = self.timers.get_mut(pos) else { continue };
            let start_time = timer.start_time;
            timer.active = false;
            self.visited.set(pos, true);
            for neighbor in pos.neighbors4() {
                self.adjust_event_at(neighbor, start_time, cell_cost);
            }
        }

        if !matured.is_empty() {
            debug!(matured = matured.len(), accum_time = now, "spread pass");
        }
        matured.len()
    }

    /// Proposes that the event enters `pos` at `adj_start_time + adj_cost`.
    ///
    /// `adj_cost` is the cost of the cell the event is leaving, not of `pos`:
    /// the neighbour's clock starts at the exact moment the source cell was
    /// crossed, so any overshoot in `dt` is not carried forward.
    fn adjust_event_at(&mut self, pos: GridPos, adj_start_time: f32, adj_cost: f32) {
        if self.visited.get(pos).copied().unwrap_or(true) {
            return;
        }
        if let Some(timer) = self.timers.get_mut(pos) {
            timer.propose(adj_start_time + adj_cost);
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn neighbor_start_uses_triggering_cell_cost() {
        let extents = Extents::new(3, 1);
        let mut cost = CostMap::filled(extents, 5.0);
        cost.set(GridPos::new(0, 0), 2.0);
        let mut grid = PropagationGrid::new(extents);
        grid.activate(GridPos::new(0, 0), 0.0).unwrap();

        assert!(grid.spread(&cost, 2.5));
        // 0.0 + cost(0,0) = 2.0, not 0.0 + cost(1,0) = 5.0 and not the clock 2.5.
        assert_eq!(grid.timer(GridPos::new(1, 0)).map(|t| t.start_time), Some(2.0));
    }

    #[test]
    fn adjust_keeps_earliest_proposal() {
        let mut grid = PropagationGrid::new(Extents::new(2, 2));
        grid.adjust_event_at(GridPos::new(1, 1), 4.0, 1.0);
        grid.adjust_event_at(GridPos::new(1, 1), 1.0, 1.0);
        grid.adjust_event_at(GridPos::new(1, 1), 3.0, 0.5);
        assert_eq!(grid.timer(GridPos::new(1, 1)).map(|t| t.start_time), Some(2.0));
    }

    #[test]
    fn adjust_ignores_off_grid_and_visited_cells() {
        let mut grid = PropagationGrid::new(Extents::new(2, 2));
        grid.adjust_event_at(GridPos::new(-1, 0), 0.0, 0.0);
        grid.adjust_event_at(GridPos::new(2, 0), 0.0, 0.0);
        assert_eq!(grid.active_count(), 0);

        grid.visited.set(GridPos::new(0, 0), true);
        grid.adjust_event_at(GridPos::new(0, 0), 0.0, 0.0);
        assert_eq!(grid.timer(GridPos::new(0, 0)), None);
    }
}
