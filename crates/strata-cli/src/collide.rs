// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `strata collide`: broad-phase pair report.

use std::collections::BTreeMap;
use std::io::Write;

use anyhow::{bail, Context, Result};
use comfy_table::{presets, Table};
use strata_geom::{Aabb, SapHandle, SweepAndPrune};
use tracing::info;

use crate::args::CollideArgs;
use crate::boxes::{self, BoxSpec};

pub fn run(args: &CollideArgs, out: &mut impl Write) -> Result<()> {
    let mut specs: Vec<BoxSpec> = match &args.boxes {
        Some(path) => boxes::load(path)?,
        None => Vec::new(),
    };
    specs.extend(args.inline.iter().copied());
    if specs.is_empty() {
        bail!("no boxes given; pass --boxes FILE or --box x,y,z,w,h,d");
    }

    let mut sap = SweepAndPrune::new();
    let mut index_of: BTreeMap<SapHandle, usize> = BTreeMap::new();
    let mut aabbs: Vec<Aabb> = Vec::with_capacity(specs.len());
    for (i, spec) in specs.iter().enumerate() {
        let aabb = spec.to_aabb().with_context(|| format!("box {i}"))?;
        index_of.insert(sap.insert(aabb), i);
        aabbs.push(aabb);
    }

    let pairs = sap.collisions();
    info!(boxes = specs.len(), pairs = pairs.len(), "broad phase complete");

    if !pairs.is_empty() {
        let mut table = Table::new();
        table.load_preset(presets::ASCII_FULL);
        table.set_header(vec!["a", "b", "a bounds", "b bounds"]);
        for (ha, hb) in pairs.iter().copied() {
            let (Some(&a), Some(&b)) = (index_of.get(&ha), index_of.get(&hb)) else {
                continue;
            };
            table.add_row(vec![a.to_string(), b.to_string(), bounds(&aabbs[a]), bounds(&aabbs[b])]);
        }
        writeln!(out, "{table}")?;
    }
    writeln!(out, "{} overlapping pairs among {} boxes", pairs.len(), specs.len())?;
    Ok(())
}

fn bounds(aabb: &Aabb) -> String {
    let lo = aabb.min();
    let hi = aabb.max();
    format!("[{}, {}, {}] .. [{}, {}, {}]", lo.x, lo.y, lo.z, hi.x, hi.y, hi.z)
}
