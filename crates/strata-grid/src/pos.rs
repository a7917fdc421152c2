// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

/// Integer cell coordinate on a 2-D grid.
///
/// `x` grows to the right and `y` grows downward (row index).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPos {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl GridPos {
    /// Creates a position from column and row.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns this position shifted by `(dx, dy)`.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }

    /// The four axis neighbours in propagation order: left, right, up, down.
    ///
    /// Neighbours may lie outside any particular map; callers bounds-check.
    pub const fn neighbors4(self) -> [Self; 4] {
        [self.offset(-1, 0), self.offset(1, 0), self.offset(0, -1), self.offset(0, 1)]
    }
}

impl From<(i32, i32)> for GridPos {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Width and height of a grid in cells.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Extents {
    /// Number of columns.
    pub width: u32,
    /// Number of rows.
    pub height: u32,
}

impl Extents {
    /// Creates extents from a column and row count.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Total number of cells.
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns `true` when `pos` addresses a cell inside these extents.
    pub fn contains(&self, pos: GridPos) -> bool {
        self.index_of(pos).is_some()
    }

    /// Row-major linear index of `pos`, or `None` when it is off the grid.
    pub fn index_of(&self, pos: GridPos) -> Option<usize> {
        let x = u32::try_from(pos.x).ok()?;
        let y = u32::try_from(pos.y).ok()?;
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Iterates every position in row-major ascending order.
    pub fn positions(&self) -> impl Iterator<Item = GridPos> {
        let width = i32::try_from(self.width).unwrap_or(i32::MAX);
        let height = i32::try_from(self.height).unwrap_or(i32::MAX);
        (0..height).flat_map(move |y| (0..width).map(move |x| GridPos::new(x, y)))
    }
}
