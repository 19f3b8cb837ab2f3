// Copyright (C) 2025. See LICENSE for details.

//! State tracker: canonical identity for flexagon states.
//!
//! Two states are the same if one is a rotation of the other, a mirror
//! image, a face relabelling (every id negated), or any composition of
//! those. The canonical key of a state is the least pat sequence over all
//! `4n` images under that group, using the derived ordering on [`Pat`]
//! (leaves sort before groups, then by id or children). Keys index a map
//! from canonical state to the order of first discovery.

use crate::model::{Flexagon, Pat};
use std::collections::HashMap;

/// Assigns a stable index to each distinct state, up to symmetry.
#[derive(Debug, Default)]
pub struct Tracker {
    states: HashMap<Vec<Pat>, usize>,
}

impl Tracker {
    pub fn new() -> Self {
        Tracker::default()
    }

    /// Start a tracker already holding one state.
    pub fn with_state(flexagon: &Flexagon) -> Self {
        let mut tracker = Tracker::new();
        tracker.find_maybe_add(flexagon);
        tracker
    }

    /// Look the state up; if it is new, record it and return `None`,
    /// otherwise return the index it was first recorded under.
    pub fn find_maybe_add(&mut self, flexagon: &Flexagon) -> Option<usize> {
        let key = canonical_key(flexagon);
        if let Some(&index) = self.states.get(&key) {
            return Some(index);
        }
        let index = self.states.len();
        self.states.insert(key, index);
        None
    }

    /// Look the state up without recording it.
    pub fn find(&self, flexagon: &Flexagon) -> Option<usize> {
        self.states.get(&canonical_key(flexagon)).copied()
    }

    pub fn total_states(&self) -> usize {
        self.states.len()
    }
}

/// The least pat sequence over every rotation of the state, its mirror
/// image, its negation, and its mirrored negation.
fn canonical_key(flexagon: &Flexagon) -> Vec<Pat> {
    let n = flexagon.pat_count();
    let mut best: Option<Vec<Pat>> = None;
    for mirrored in [false, true] {
        let stage1 = if mirrored {
            flexagon.mirrored()
        } else {
            flexagon.clone()
        };
        for negated in [false, true] {
            let stage2 = if negated { stage1.negated() } else { stage1.clone() };
            for r in 0..n {
                let candidate = stage2.rotated(r);
                match &best {
                    Some(b) if candidate.pats() >= b.as_slice() => {}
                    _ => best = Some(candidate.pats().to_vec()),
                }
            }
        }
    }
    best.unwrap_or_default()
}
