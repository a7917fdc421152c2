// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `strata spread`: run an event flood and print it.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{bail, ensure, Context, Result};
use strata_app_core::prefs::SpreadPrefs;
use strata_grid::{Extents, GridPos, Volume};
use strata_spread::{CostMap, PropagationGrid};
use tracing::{debug, info};

use crate::args::SpreadArgs;
use crate::render;

pub fn run(args: &SpreadArgs, prefs: &SpreadPrefs, out: &mut impl Write) -> Result<()> {
    let cost = match &args.cost_map {
        Some(path) => load_cost_map(path)?,
        None => {
            let extents = Extents::new(args.width.unwrap_or(prefs.width), args.height.unwrap_or(prefs.height));
            CostMap::filled(extents, args.cost.unwrap_or(prefs.cost))
        }
    };
    if let Some((pos, bad)) = cost.iter().find(|(_, c)| !c.is_finite() || **c < 0.0) {
        bail!("cell ({}, {}) has invalid cost {bad}", pos.x, pos.y);
    }
    let dt = args.dt.unwrap_or(prefs.dt);
    ensure!(dt.is_finite() && dt >= 0.0, "dt must be a non-negative number, got {dt}");
    let steps = args.steps.unwrap_or(prefs.steps);

    let seeds: Vec<GridPos> = if args.seeds.is_empty() {
        prefs.seeds.iter().map(|&[x, y]| GridPos::new(x, y)).collect()
    } else {
        args.seeds.clone()
    };
    ensure!(!seeds.is_empty(), "no seed cells; pass --seed X,Y");

    let extents = cost.extents();
    let mut grid = PropagationGrid::new(extents);
    for &seed in &seeds {
        grid.activate(seed, 0.0).with_context(|| format!("seed ({}, {})", seed.x, seed.y))?;
    }
    info!(width = extents.width, height = extents.height, seeds = seeds.len(), dt, steps, "spread start");

    let window = match args.view {
        Some(view) => Volume::centered_view(view, extents, seeds[0]),
        None => render::full_window(&grid),
    };

    let mut steps_run = 0;
    for step in 1..=steps {
        let summary = grid.step(&cost, dt);
        steps_run = step;
        debug!(step, passes = summary.passes, matured = summary.matured, "step");
        if args.frames {
            writeln!(out, "step {step} t={:.2}", grid.accum_time())?;
            write!(out, "{}", render::frame(&grid, window))?;
        }
        if grid.is_settled() {
            info!(step, "spread settled");
            break;
        }
    }

    writeln!(
        out,
        "visited {}/{} cells after {steps_run} steps (t={:.2}), {} active",
        grid.visited_count(),
        extents.area(),
        grid.accum_time(),
        grid.active_count(),
    )?;
    Ok(())
}

fn load_cost_map(path: &Path) -> Result<CostMap> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parse cost map from {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(args: &SpreadArgs) -> Result<String> {
        let mut buf = Vec::new();
        run(args, &SpreadPrefs::default(), &mut buf)?;
        Ok(String::from_utf8(buf)?)
    }

    #[test]
    fn settles_before_the_step_budget() {
        let args = SpreadArgs {
            width: Some(3),
            height: Some(3),
            cost: Some(0.5),
            seeds: vec![GridPos::new(1, 1)],
            dt: Some(1.0),
            steps: Some(50),
            ..SpreadArgs::default()
        };
        let text = report(&args).unwrap();
        assert!(text.starts_with("visited 9/9 cells after "), "{text}");
        assert!(text.ends_with(", 0 active\n"), "{text}");
    }

    #[test]
    fn seeds_fall_back_to_prefs() {
        let args = SpreadArgs { width: Some(4), height: Some(1), steps: Some(0), ..SpreadArgs::default() };
        let text = report(&args).unwrap();
        assert_eq!(text, "visited 0/4 cells after 0 steps (t=0.00), 1 active\n");
    }

    #[test]
    fn off_grid_seed_is_an_error() {
        let args = SpreadArgs {
            width: Some(2),
            height: Some(2),
            seeds: vec![GridPos::new(5, 5)],
            ..SpreadArgs::default()
        };
        assert!(report(&args).is_err());
    }

    #[test]
    fn negative_cost_is_rejected() {
        let args = SpreadArgs { width: Some(2), height: Some(2), cost: Some(-1.0), ..SpreadArgs::default() };
        assert!(report(&args).is_err());
    }
}
