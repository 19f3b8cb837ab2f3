// Copyright (C) 2025. See LICENSE for details.

//! Canonicalization properties: every symmetry image of a state maps to
//! the same tracker entry, and distinct states never collide.

mod common;

use common::{full_flex_set, start_state};
use flex_search::{Explore, Flexagon, Tracker};
use pretty_assertions::assert_eq;

/// Every image of the state under the full symmetry group: rotations,
/// mirror, negation, and their compositions.
fn all_images(f: &Flexagon) -> Vec<Flexagon> {
    let mut images = Vec::new();
    for mirrored in [false, true] {
        let s1 = if mirrored { f.mirrored() } else { f.clone() };
        for negated in [false, true] {
            let s2 = if negated { s1.negated() } else { s1.clone() };
            for r in 0..f.pat_count() {
                images.push(s2.rotated(r));
            }
        }
    }
    images
}

#[test]
fn test_all_images_are_one_state() {
    let f = start_state();
    let mut tracker = Tracker::with_state(&f);
    for image in all_images(&f) {
        assert_eq!(tracker.find_maybe_add(&image), Some(0));
    }
    assert_eq!(tracker.total_states(), 1);

    // turned_over is mirror plus negate, so it is covered too
    assert_eq!(tracker.find_maybe_add(&f.turned_over()), Some(0));
    assert_eq!(tracker.find_maybe_add(&f.turned_over().rotated(2)), Some(0));
}

#[test]
fn test_turn_over_identity() {
    let f = start_state();
    assert_eq!(
        f.turned_over().rotated(2).to_string(),
        "[-3,[-2,-1],-6,[-5,-4]]"
    );
}

#[test]
fn test_indices_are_first_come_first_served() {
    let a = start_state();
    let b: Flexagon = "[2,[3,-4],5,[6,-1]]".parse().unwrap();
    let c: Flexagon = "[1,2,3,4]".parse().unwrap();
    let mut tracker = Tracker::new();
    assert_eq!(tracker.find_maybe_add(&a), None);
    assert_eq!(tracker.find_maybe_add(&b), None);
    assert_eq!(tracker.find_maybe_add(&c), None);
    assert_eq!(tracker.find_maybe_add(&b.negated().rotated(1)), Some(1));
    assert_eq!(tracker.find(&c), Some(2));
    assert_eq!(tracker.total_states(), 3);
}

#[test]
fn test_discovery_order_does_not_change_identity() {
    // walk the state space twice with the flexes in different orders; the
    // set of canonical states must be identical
    let forward = full_flex_set();
    let mut first = Explore::new(&start_state(), forward.iter().cloned().collect());
    first.explore_all();

    let mut reversed: Vec<_> = forward.iter().cloned().collect();
    reversed.reverse();
    let mut second = Explore::new(&start_state(), reversed);
    second.explore_all();

    assert_eq!(first.total_states(), second.total_states());

    let mut tracker = Tracker::new();
    for i in 0..first.total_states() {
        tracker.find_maybe_add(first.state(i).unwrap());
    }
    for i in 0..second.total_states() {
        // every state the second walk found is already known
        assert!(tracker
            .find_maybe_add(second.state(i).unwrap())
            .is_some());
    }
}
