// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Strata CLI entrypoint.
//!
//! Developer-facing commands for the Strata simulation crates:
//!
//! - `strata spread` floods a grid from seed cells and prints ASCII frames.
//! - `strata collide` runs a sweep-and-prune pass over a set of boxes and
//!   prints the overlapping pairs.
//!
//! # Usage
//! ```text
//! strata [--config-dir DIR] [--no-config] [-v...] <command> [options]
//! ```
//!
//! Run defaults come from the `sim` config blob; the first run writes it.
//! Logs go to stderr, reports to stdout.

// The CLI is expected to print to stdout.
#![allow(clippy::print_stdout)]

mod args;
mod boxes;
mod collide;
mod render;
mod spread;

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use strata_app_core::config::{ConfigService, ConfigStore, MemoryConfigStore};
use strata_app_core::prefs::{SimPrefs, SIM_PREFS_KEY};
use strata_config_fs::FsConfigStore;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use crate::args::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (prefs, config_note) = load_prefs(&cli)?;
    init_tracing(cli.verbose, &prefs.log.filter);
    if let Some(note) = config_note {
        warn!("{note}; using built-in defaults");
    }
    debug!(?prefs, "loaded sim prefs");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match &cli.cmd {
        Command::Spread(args) => spread::run(args, &prefs.spread, &mut out)?,
        Command::Collide(args) => collide::run(args, &mut out)?,
    }
    out.flush()?;
    Ok(())
}

/// Loads saved prefs, persisting defaults the first time.
///
/// `--no-config` reads from a throwaway in-memory store. An explicit
/// `--config-dir` must be usable; when the platform directory cannot be
/// resolved the run continues on defaults and the returned note says why.
fn load_prefs(cli: &Cli) -> Result<(SimPrefs, Option<String>)> {
    if cli.no_config {
        return Ok((load_with(MemoryConfigStore::new())?, None));
    }
    let store = match &cli.config_dir {
        Some(dir) => FsConfigStore::at(dir).with_context(|| format!("open config dir {}", dir.display()))?,
        None => match FsConfigStore::new() {
            Ok(store) => store,
            Err(err) => return Ok((SimPrefs::default(), Some(format!("config store unavailable: {err}")))),
        },
    };
    Ok((load_with(store)?, None))
}

fn load_with(store: impl ConfigStore) -> Result<SimPrefs> {
    ConfigService::new(store).load_or_init(SIM_PREFS_KEY).context("load sim prefs")
}

fn init_tracing(verbose: u8, default_filter: &str) {
    let directive = match verbose {
        0 => default_filter,
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(directive))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .init();
}
