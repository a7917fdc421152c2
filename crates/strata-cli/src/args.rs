// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Command-line surface.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use strata_grid::{Extents, GridPos};

use crate::boxes::BoxSpec;

#[derive(Parser, Debug)]
#[command(name = "strata", author, version, about = "Strata simulation tools")]
pub struct Cli {
    /// Directory holding config files (defaults to the platform config dir)
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,
    /// Ignore saved config and use built-in defaults
    #[arg(long, global = true, conflicts_with = "config_dir")]
    pub no_config: bool,
    /// Raise log verbosity (-v debug, -vv trace); `RUST_LOG` wins when set
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Flood a grid from seed cells and report how far the event reached
    Spread(SpreadArgs),
    /// Report overlapping pairs among a set of boxes
    Collide(CollideArgs),
}

#[derive(Args, Debug, Default)]
pub struct SpreadArgs {
    /// Grid columns (ignored with --cost-map)
    #[arg(long)]
    pub width: Option<u32>,
    /// Grid rows (ignored with --cost-map)
    #[arg(long)]
    pub height: Option<u32>,
    /// Uniform crossing time per cell in seconds (ignored with --cost-map)
    #[arg(long)]
    pub cost: Option<f32>,
    /// JSON cost map: {"extents":{"width":W,"height":H},"values":[..]}
    #[arg(long, value_name = "FILE")]
    pub cost_map: Option<PathBuf>,
    /// Seed cell as X,Y (repeatable)
    #[arg(long = "seed", value_name = "X,Y", value_parser = parse_pos)]
    pub seeds: Vec<GridPos>,
    /// Clock advance per step in seconds
    #[arg(long)]
    pub dt: Option<f32>,
    /// Number of steps to run
    #[arg(long)]
    pub steps: Option<u32>,
    /// Print the grid after every step
    #[arg(long)]
    pub frames: bool,
    /// Frame window as W,H, centred on the first seed
    #[arg(long, value_name = "W,H", value_parser = parse_extents)]
    pub view: Option<Extents>,
}

#[derive(Args, Debug, Default)]
pub struct CollideArgs {
    /// JSON array of {"min":[x,y,z],"size":[w,h,d]}
    #[arg(long, value_name = "FILE")]
    pub boxes: Option<PathBuf>,
    /// Box as x,y,z,w,h,d (repeatable, appended after --boxes)
    #[arg(long = "box", value_name = "X,Y,Z,W,H,D")]
    pub inline: Vec<BoxSpec>,
}

fn split_pair(s: &str) -> Result<(&str, &str), String> {
    s.split_once(',')
        .map(|(a, b)| (a.trim(), b.trim()))
        .ok_or_else(|| format!("expected two comma-separated numbers, got `{s}`"))
}

pub fn parse_pos(s: &str) -> Result<GridPos, String> {
    let (x, y) = split_pair(s)?;
    let x = x.parse::<i32>().map_err(|e| format!("bad x `{x}`: {e}"))?;
    let y = y.parse::<i32>().map_err(|e| format!("bad y `{y}`: {e}"))?;
    Ok(GridPos::new(x, y))
}

pub fn parse_extents(s: &str) -> Result<Extents, String> {
    let (w, h) = split_pair(s)?;
    let w = w.parse::<u32>().map_err(|e| format!("bad width `{w}`: {e}"))?;
    let h = h.parse::<u32>().map_err(|e| format!("bad height `{h}`: {e}"))?;
    Ok(Extents::new(w, h))
}
