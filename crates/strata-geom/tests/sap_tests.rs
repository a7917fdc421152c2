// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
//! Integration tests for the sweep-and-prune broad phase.

use strata_geom::{Aabb, BroadPhase, BroadPhaseError, EndpointKind, SweepAndPrune, Vec3};

fn cube(min: [f32; 3], size: f32) -> Aabb {
    Aabb::cube(Vec3::from(min), size).expect("valid cube")
}

#[test]
fn four_box_scenario_reports_exactly_four_pairs() {
    //  a1 [0, 50]
    //  a2      [25, 75]
    //  a3            [55, 105]
    //  a4 [2, 52]
    // Expected pairs: (a1,a2), (a1,a4), (a2,a4), (a2,a3). a1/a3 must not pair.
    let mut sap = SweepAndPrune::new();
    let a1 = sap.insert(cube([0.0, 0.0, 0.0], 50.0));
    let a2 = sap.insert(cube([25.0, 25.0, 25.0], 50.0));
    let a3 = sap.insert(cube([55.0, 55.0, 55.0], 50.0));
    let a4 = sap.insert(cube([2.0, 2.0, 2.0], 50.0));

    let pairs = sap.collisions();
    assert_eq!(pairs, vec![(a1, a2), (a1, a4), (a2, a3), (a2, a4)]);
    assert!(!pairs.contains(&(a1, a3)));
    assert!(!pairs.contains(&(a3, a4)));
}

#[test]
fn pairs_never_contain_self_and_overlap_on_every_axis() {
    let mut sap = SweepAndPrune::new();
    let boxes = [
        cube([0.0, 0.0, 0.0], 4.0),
        cube([3.0, 0.0, 0.0], 4.0),
        cube([3.0, 10.0, 0.0], 4.0),
        cube([5.0, 2.0, 3.5], 1.0),
        cube([-8.0, 0.0, 0.0], 2.0),
    ];
    let handles: Vec<_> = boxes.iter().map(|bb| sap.insert(*bb)).collect();
    let pairs = sap.collisions();
    assert!(!pairs.is_empty());
    for (a, b) in pairs {
        assert!(a < b, "pairs are canonical and never self-paired");
        let ia = handles.iter().position(|h| *h == a).expect("known handle");
        let ib = handles.iter().position(|h| *h == b).expect("known handle");
        assert!(boxes[ia].overlaps_x(&boxes[ib]));
        assert!(boxes[ia].overlaps_y(&boxes[ib]));
        assert!(boxes[ia].overlaps_z(&boxes[ib]));
    }
}

#[test]
fn touching_faces_pair_up_on_every_axis() {
    let mut sap = SweepAndPrune::new();
    let a = sap.insert(cube([0.0, 0.0, 0.0], 1.0));
    let b = sap.insert(cube([1.0, 0.0, 0.0], 1.0));
    let c = sap.insert(cube([0.0, 1.0, 0.0], 1.0));
    let pairs = sap.collisions();
    assert!(pairs.contains(&(a, b)));
    assert!(pairs.contains(&(a, c)));
    // b and c only touch along an edge: x ranges [1,2]/[0,1], y ranges [0,1]/[1,2].
    assert!(pairs.contains(&(b, c)));
}

#[test]
fn update_moves_proxy_and_keeps_order() {
    let mut sap = SweepAndPrune::new();
    let a = sap.insert(cube([0.0, 0.0, 0.0], 1.0));
    let b = sap.insert(cube([10.0, 0.0, 0.0], 1.0));
    assert!(sap.collisions().is_empty());

    sap.update(b, cube([0.5, 0.0, 0.0], 1.0)).expect("live handle");
    assert!(sap.is_sorted());
    assert_eq!(sap.collisions(), vec![(a, b)]);

    sap.update(a, cube([-20.0, 0.0, 0.0], 1.0)).expect("live handle");
    assert!(sap.is_sorted());
    assert!(sap.collisions().is_empty());
    assert_eq!(sap.endpoints()[0].handle, a);
    assert_eq!(sap.endpoints()[0].kind, EndpointKind::Begin);
    assert_eq!(sap.get(a).map(|bb| bb.min().x), Some(-20.0));
}

#[test]
fn x_overlap_alone_is_not_a_collision() {
    let mut sap = SweepAndPrune::new();
    sap.insert(cube([0.0, 0.0, 0.0], 5.0));
    sap.insert(cube([1.0, 20.0, 0.0], 5.0));
    sap.insert(cube([2.0, 0.0, 20.0], 5.0));
    assert!(sap.collisions().is_empty());
}

#[test]
fn finished_intervals_do_not_linger_in_the_active_set() {
    // a closes before c opens; only their cached Y/Z bounds would match.
    let mut sap = SweepAndPrune::new();
    let a = sap.insert(cube([0.0, 0.0, 0.0], 1.0));
    let b = sap.insert(cube([0.5, 0.0, 0.0], 10.0));
    let c = sap.insert(cube([5.0, 0.0, 0.0], 1.0));
    assert_eq!(sap.collisions(), vec![(a, b), (b, c)]);
}

#[test]
fn unknown_and_removed_handles_are_reported() {
    let mut sap = SweepAndPrune::new();
    let a = sap.insert(cube([0.0, 0.0, 0.0], 1.0));
    let b = sap.insert(cube([0.5, 0.0, 0.0], 1.0));
    let removed = sap.remove(a).expect("live handle");
    assert_eq!(removed, cube([0.0, 0.0, 0.0], 1.0));
    assert_eq!(sap.len(), 1);
    assert_eq!(sap.endpoints().len(), 2);
    assert!(sap.is_sorted());
    assert!(sap.collisions().is_empty());

    assert_eq!(
        sap.update(a, cube([0.0, 0.0, 0.0], 1.0)),
        Err(BroadPhaseError::UnknownHandle(a))
    );
    assert_eq!(sap.remove(a), Err(BroadPhaseError::UnknownHandle(a)));

    // Retired handles are never reissued.
    let c = sap.insert(cube([0.0, 0.0, 0.0], 1.0));
    assert!(c > b);
    assert_ne!(c, a);
    assert_eq!(sap.collisions(), vec![(b, c)]);
}

#[test]
fn remove_picks_the_right_proxy_among_identical_boxes() {
    let mut sap = SweepAndPrune::new();
    let a = sap.insert(cube([0.0, 0.0, 0.0], 1.0));
    let b = sap.insert(cube([0.0, 0.0, 0.0], 1.0));
    let c = sap.insert(cube([0.0, 0.0, 0.0], 1.0));
    sap.remove(b).expect("live handle");
    assert!(sap.endpoints().iter().all(|e| e.handle != b));
    assert_eq!(sap.collisions(), vec![(a, c)]);
}

#[test]
fn trait_object_dispatch_matches_inherent_calls() {
    let mut sap = SweepAndPrune::new();
    let bp: &mut dyn BroadPhase = &mut sap;
    let a = bp.insert(cube([0.0, 0.0, 0.0], 2.0));
    let b = bp.insert(cube([1.0, 1.0, 1.0], 2.0));
    assert_eq!(bp.pairs(), vec![(a, b)]);
}
