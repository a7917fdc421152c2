// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use crate::pos::{Extents, GridPos};

/// Axis-aligned rectangle of cells: top-left corner plus size.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Volume {
    /// Top-left cell.
    pub pos: GridPos,
    /// Number of columns covered.
    pub width: i32,
    /// Number of rows covered.
    pub height: i32,
}

impl Volume {
    /// Creates a window at `pos` spanning `width × height` cells.
    pub const fn new(pos: GridPos, width: i32, height: i32) -> Self {
        Self { pos, width, height }
    }

    /// Window of `view` size centred on `center`, shifted to stay inside `map`.
    ///
    /// When the view is larger than the map along an axis the window starts at
    /// the map edge and overhangs past the far side.
    pub fn centered_view(view: Extents, map: Extents, center: GridPos) -> Self {
        let vw = i32::try_from(view.width).unwrap_or(i32::MAX);
        let vh = i32::try_from(view.height).unwrap_or(i32::MAX);
        let mw = i32::try_from(map.width).unwrap_or(i32::MAX);
        let mh = i32::try_from(map.height).unwrap_or(i32::MAX);
        let x = (center.x - vw / 2).min(mw - vw).max(0);
        let y = (center.y - vh / 2).min(mh - vh).max(0);
        Self::new(GridPos::new(x, y), vw, vh)
    }

    /// Returns `true` when `pos` lies inside the window.
    pub fn contains(&self, pos: GridPos) -> bool {
        self.pos.x <= pos.x
            && pos.x < self.pos.x + self.width
            && self.pos.y <= pos.y
            && pos.y < self.pos.y + self.height
    }

    /// Row-major iteration over the covered cells.
    pub fn positions(&self) -> impl Iterator<Item = GridPos> {
        let Self { pos, width, height } = *self;
        (pos.y..pos.y + height).flat_map(move |y| (pos.x..pos.x + width).map(move |x| GridPos::new(x, y)))
    }
}
