// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! ASCII frames of a propagation grid.

use strata_grid::{GridPos, Volume};
use strata_spread::PropagationGrid;

pub const VISITED: char = '#';
pub const ACTIVE: char = '+';
pub const UNTOUCHED: char = '.';
/// Window cells that fall outside the grid.
pub const OFF_GRID: char = ' ';

/// Renders the cells of `window`, one text row per grid row.
pub fn frame(grid: &PropagationGrid, window: Volume) -> String {
    let extents = grid.extents();
    let mut text = String::new();
    for y in window.pos.y..window.pos.y + window.height {
        for x in window.pos.x..window.pos.x + window.width {
            let pos = GridPos::new(x, y);
            let glyph = if !extents.contains(pos) {
                OFF_GRID
            } else if grid.is_visited(pos) {
                VISITED
            } else if grid.timer(pos).is_some() {
                ACTIVE
            } else {
                UNTOUCHED
            };
            text.push(glyph);
        }
        text.push('\n');
    }
    text
}

/// Window covering the whole grid.
pub fn full_window(grid: &PropagationGrid) -> Volume {
    let e = grid.extents();
    Volume::new(
        GridPos::new(0, 0),
        i32::try_from(e.width).unwrap_or(i32::MAX),
        i32::try_from(e.height).unwrap_or(i32::MAX),
    )
}
