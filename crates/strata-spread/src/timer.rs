// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

/// Tracks when an event started crossing a cell.
///
/// `start_time` is on the grid's accumulated clock and only meaningful while
/// `active` is set. The event leaves the cell once
/// `accum_time - start_time > cost`.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventTimer {
    /// Clock value at which the event entered the cell.
    pub start_time: f32,
    /// Whether the event is currently crossing this cell.
    pub active: bool,
}

impl EventTimer {
    /// An active timer started at `start_time`.
    pub const fn started(start_time: f32) -> Self {
        Self { start_time, active: true }
    }

    /// Time spent in the cell at clock value `now`.
    pub fn elapsed(&self, now: f32) -> f32 {
        now - self.start_time
    }

    /// Activates the timer, or pulls an already running timer back to
    /// `start_time` when that is earlier.
    pub(crate) fn propose(&mut self, start_time: f32) {
        if self.active {
            self.start_time = self.start_time.min(start_time);
        } else {
            *self = Self::started(start_time);
        }
    }
}
