// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared application services for Strata tools (config, simulation prefs).
//! Keeps the CLI thin and storage-agnostic.

pub mod config;
pub mod prefs;
