// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Dense per-cell storage.
//!
//! A `ValueMap<T>` stores exactly `extents.area()` values in row-major order
//! (`index = y * width + x`). Every cell starts at `T::default()`, so a fresh
//! `ValueMap<bool>` is all `false` and a fresh timer map is all inactive.

use thiserror::Error;

use crate::pos::{Extents, GridPos};
use crate::volume::Volume;

/// Error returned when building a [`ValueMap`] from raw parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    /// The value buffer does not hold exactly one value per cell.
    #[error("value count {got} does not match extents area {expected}")]
    LengthMismatch {
        /// `extents.area()`.
        expected: usize,
        /// Length of the supplied buffer.
        got: usize,
    },
}

/// Row-major grid of `T` values.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawValueMap<T>"))]
pub struct ValueMap<T> {
    extents: Extents,
    values: Vec<T>,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawValueMap<T> {
    extents: Extents,
    values: Vec<T>,
}

#[cfg(feature = "serde")]
impl<T> TryFrom<RawValueMap<T>> for ValueMap<T> {
    type Error = GridError;

    fn try_from(raw: RawValueMap<T>) -> Result<Self, Self::Error> {
        Self::from_values(raw.extents, raw.values)
    }
}

impl<T: Clone + Default> ValueMap<T> {
    /// Allocates a map of `extents` with every cell set to `T::default()`.
    pub fn new(extents: Extents) -> Self {
        Self::filled(extents, T::default())
    }
}

impl<T: Clone> ValueMap<T> {
    /// Allocates a map of `extents` with every cell set to `value`.
    pub fn filled(extents: Extents, value: T) -> Self {
        Self { extents, values: vec![value; extents.area()] }
    }
}

impl<T> ValueMap<T> {
    /// Wraps a row-major buffer; `values.len()` must equal `extents.area()`.
    pub fn from_values(extents: Extents, values: Vec<T>) -> Result<Self, GridError> {
        if values.len() != extents.area() {
            return Err(GridError::LengthMismatch { expected: extents.area(), got: values.len() });
        }
        Ok(Self { extents, values })
    }

    /// Builds a map by evaluating `f` at every position in row-major order.
    pub fn from_fn(extents: Extents, mut f: impl FnMut(GridPos) -> T) -> Self {
        let values = extents.positions().map(&mut f).collect();
        Self { extents, values }
    }

    /// Map size in cells.
    pub fn extents(&self) -> Extents {
        self.extents
    }

    /// Returns `true` when `pos` addresses a cell of this map.
    pub fn is_in_bounds(&self, pos: GridPos) -> bool {
        self.extents.contains(pos)
    }

    /// Returns the value at `pos`, or `None` when off the map.
    pub fn get(&self, pos: GridPos) -> Option<&T> {
        self.extents.index_of(pos).map(|i| &self.values[i])
    }

    /// Mutable access to the value at `pos`, or `None` when off the map.
    pub fn get_mut(&mut self, pos: GridPos) -> Option<&mut T> {
        self.extents.index_of(pos).map(|i| &mut self.values[i])
    }

    /// Overwrites the value at `pos`; returns `false` when off the map.
    pub fn set(&mut self, pos: GridPos, value: T) -> bool {
        match self.get_mut(pos) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Row-major view of every value.
    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    /// Iterates `(position, value)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (GridPos, &T)> {
        self.extents.positions().zip(self.values.iter())
    }
}

impl ValueMap<f32> {
    /// Average of the cells covered by `vol`, clipped to the map.
    ///
    /// Returns `None` when the clipped window covers no cells.
    pub fn sample(&self, vol: Volume) -> Option<f32> {
        let mut sum = 0.0_f32;
        let mut count = 0_u32;
        for pos in vol.positions() {
            if let Some(v) = self.get(pos) {
                sum += *v;
                count += 1;
            }
        }
        if count == 0 {
            return None;
        }
        #[allow(clippy::cast_precision_loss)]
        let avg = sum / count as f32;
        Some(avg)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn new_map_is_default_initialised() {
        let m: ValueMap<bool> = ValueMap::new(Extents::new(3, 2));
        assert_eq!(m.as_slice().len(), 6);
        assert!(m.as_slice().iter().all(|v| !v));
    }

    #[test]
    fn set_and_get_round_trip_in_bounds_only() {
        let mut m: ValueMap<u8> = ValueMap::new(Extents::new(3, 2));
        assert!(m.set(GridPos::new(2, 1), 7));
        assert_eq!(m.get(GridPos::new(2, 1)), Some(&7));
        assert_eq!(m.as_slice()[5], 7);
        assert!(!m.set(GridPos::new(3, 1), 9));
        assert_eq!(m.get(GridPos::new(-1, 0)), None);
    }

    #[test]
    fn from_values_rejects_wrong_length() {
        let err = ValueMap::from_values(Extents::new(2, 2), vec![0.0_f32; 3]).unwrap_err();
        assert_eq!(err, GridError::LengthMismatch { expected: 4, got: 3 });
    }

    #[test]
    fn sample_averages_window_and_clips() {
        let m = ValueMap::from_fn(Extents::new(4, 4), |p| if p.x < 2 { 1.0 } else { 3.0 });
        assert_eq!(m.sample(Volume::new(GridPos::new(0, 0), 4, 4)), Some(2.0));
        assert_eq!(m.sample(Volume::new(GridPos::new(0, 0), 2, 2)), Some(1.0));
        // Half the window hangs off the right edge.
        assert_eq!(m.sample(Volume::new(GridPos::new(3, 0), 2, 1)), Some(3.0));
        assert_eq!(m.sample(Volume::new(GridPos::new(10, 10), 2, 2)), None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_validates_length() {
        let ok: ValueMap<f32> =
            serde_json::from_str(r#"{"extents":{"width":2,"height":1},"values":[1.0,2.0]}"#)
                .unwrap();
        assert_eq!(ok.get(GridPos::new(1, 0)), Some(&2.0));
        let bad = serde_json::from_str::<ValueMap<f32>>(
            r#"{"extents":{"width":2,"height":2},"values":[1.0,2.0]}"#,
        );
        assert!(bad.is_err());
    }
}
