// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
use proptest::prelude::*;
use proptest::test_runner::{Config as PropConfig, RngAlgorithm, TestRng, TestRunner};

use strata_grid::{Extents, GridPos};
use strata_spread::{CostMap, PropagationGrid};

#[derive(Debug, Clone)]
struct Case {
    extents: Extents,
    costs: Vec<f32>,
    seeds: Vec<(i32, i32)>,
    steps: Vec<f32>,
}

fn case_strategy() -> impl Strategy<Value = Case> {
    (1u32..10, 1u32..10)
        .prop_flat_map(|(w, h)| {
            let area = (w * h) as usize;
            let wi = i32::try_from(w).unwrap_or(1);
            let hi = i32::try_from(h).unwrap_or(1);
            (
                Just(Extents::new(w, h)),
                prop::collection::vec(1u8..=40, area)
                    .prop_map(|v| v.into_iter().map(|c| f32::from(c) * 0.05).collect()),
                prop::collection::vec((0..wi, 0..hi), 1..4),
                prop::collection::vec((0u8..=40).prop_map(|d| f32::from(d) * 0.1), 1..12),
            )
        })
        .prop_map(|(extents, costs, seeds, steps)| Case { extents, costs, seeds, steps })
}

// Pinned seed keeps failures reproducible across machines and CI.
const SEED_BYTES: [u8; 32] = [
    0x17, 0x5e, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0,
];

#[test]
fn spread_invariants_hold_over_random_runs() {
    let rng = TestRng::from_seed(RngAlgorithm::ChaCha, &SEED_BYTES);
    let mut runner =
        TestRunner::new_with_rng(PropConfig { cases: 96, ..PropConfig::default() }, rng);

    runner
        .run(&case_strategy(), |case| {
            let cost = CostMap::from_values(case.extents, case.costs.clone())
                .expect("one cost per cell");
            let mut grid = PropagationGrid::new(case.extents);
            for (x, y) in &case.seeds {
                grid.activate(GridPos::new(*x, *y), 0.0).expect("seed on grid");
            }

            let area = case.extents.area();
            let mut last_clock = grid.accum_time();
            let mut visited_before: Vec<bool> = grid.visited().as_slice().to_vec();

            for dt in &case.steps {
                grid.spread(&cost, *dt);
                let passes = grid.drain(&cost);
                prop_assert!(passes <= area, "drain must terminate within one pass per cell");
                prop_assert!(!grid.spread(&cost, 0.0), "drained grid stays drained");

                prop_assert!(grid.accum_time() >= last_clock);
                last_clock = grid.accum_time();

                let visited_now = grid.visited().as_slice();
                for (before, now) in visited_before.iter().zip(visited_now) {
                    prop_assert!(!*before || *now, "visited cells stay visited");
                }
                for (pos, timer) in grid.timers().iter() {
                    prop_assert!(!(timer.active && grid.is_visited(pos)));
                }
                visited_before = visited_now.to_vec();
            }
            Ok(())
        })
        .expect("spread invariants hold");
}

#[test]
fn enough_time_reaches_every_cell() {
    let rng = TestRng::from_seed(RngAlgorithm::ChaCha, &SEED_BYTES);
    let mut runner = TestRunner::new_with_rng(PropConfig::default(), rng);

    runner
        .run(&case_strategy(), |case| {
            let total: f32 = case.costs.iter().sum();
            let cost = CostMap::from_values(case.extents, case.costs.clone())
                .expect("one cost per cell");
            let mut grid = PropagationGrid::new(case.extents);
            let (x, y) = case.seeds[0];
            grid.activate(GridPos::new(x, y), 0.0).expect("seed on grid");

            let summary = grid.step(&cost, total + 1.0);
            prop_assert_eq!(summary.matured, case.extents.area());
            prop_assert_eq!(grid.visited_count(), case.extents.area());
            prop_assert!(grid.is_settled());
            Ok(())
        })
        .expect("connected grid is fully reached");
}
