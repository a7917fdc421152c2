// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Box input for `strata collide`.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::Deserialize;
use strata_geom::{Aabb, GeomError, Vec3};

/// A box as written by users: min corner plus size.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct BoxSpec {
    pub min: [f32; 3],
    pub size: [f32; 3],
}

impl BoxSpec {
    pub fn to_aabb(self) -> Result<Aabb, GeomError> {
        let [w, h, d] = self.size;
        Aabb::new(Vec3::from(self.min), w, h, d)
    }
}

impl FromStr for BoxSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let nums = s
            .split(',')
            .map(|part| part.trim().parse::<f32>().map_err(|e| format!("bad number `{}`: {e}", part.trim())))
            .collect::<Result<Vec<_>, _>>()?;
        match nums.as_slice() {
            &[x, y, z, w, h, d] => Ok(Self { min: [x, y, z], size: [w, h, d] }),
            _ => Err(format!("expected six comma-separated numbers, got {}", nums.len())),
        }
    }
}

/// Reads a JSON array of [`BoxSpec`] from `path`.
pub fn load(path: &Path) -> Result<Vec<BoxSpec>> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parse boxes from {}", path.display()))
}
