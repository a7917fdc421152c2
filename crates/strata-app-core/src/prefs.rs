// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Saved simulation defaults used by Strata tools.

use serde::{Deserialize, Serialize};

/// Config key under which [`SimPrefs`] are stored.
pub const SIM_PREFS_KEY: &str = "sim";

/// Saved preferences for simulation runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SimPrefs {
    /// Event-spread defaults.
    pub spread: SpreadPrefs,
    /// Logging defaults.
    pub log: LogPrefs,
}

/// Defaults for an event-spread run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpreadPrefs {
    /// Grid columns.
    pub width: u32,
    /// Grid rows.
    pub height: u32,
    /// Uniform per-cell crossing time (seconds) when no cost map file is given.
    pub cost: f32,
    /// Clock advance per step (seconds).
    pub dt: f32,
    /// Number of steps to run.
    pub steps: u32,
    /// Cells where the event starts, as `[x, y]`.
    pub seeds: Vec<[i32; 2]>,
}

impl Default for SpreadPrefs {
    fn default() -> Self {
        Self { width: 50, height: 50, cost: 1.0, dt: 0.5, steps: 100, seeds: vec![[0, 0]] }
    }
}

/// Logging defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogPrefs {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LogPrefs {
    fn default() -> Self {
        Self { filter: "info".to_owned() }
    }
}
