// Copyright (C) 2025. See LICENSE for details.

//! Explore: breadth-first enumeration of reachable states.
//!
//! Starting from one flexagon, repeatedly applies every flex in the set to
//! the oldest unexplored state, deduplicating through the [`Tracker`]. The
//! tracker identifies states up to rotation, mirror and negation, so each
//! flex is applied to every symmetry image of the state under expansion;
//! otherwise the reachable set would depend on which image happened to be
//! enqueued first. The loop is resumable: each [`Explore::check_next`] call
//! explores exactly one state, so a caller can interleave exploration with
//! other work or stop early, and totals are meaningful at every point.

use crate::flex::Flex;
use crate::model::Flexagon;
use crate::tracker::Tracker;
use strum::EnumCount;
use strum_macros::EnumCount as EnumCountMacro;
use tracing::debug;

#[derive(EnumCountMacro, Copy, Clone)]
#[repr(u8)]
pub enum Counters {
    StatesExplored,
    StatesFound,
    FlexesTried,
    FlexesApplied,
    DuplicateStates,
}

/// Counters accumulated over an exploration.
#[derive(Debug, Default)]
pub struct Statistics {
    stats: [u64; Counters::COUNT],
}

impl Statistics {
    fn increment(&mut self, counter: Counters) {
        self.stats[counter as usize] += 1;
    }

    pub fn get(&self, counter: Counters) -> u64 {
        self.stats[counter as usize]
    }
}

/// One entry in the search queue: a state and the index of the state it
/// was first reached from.
#[derive(Debug, Clone)]
struct QueueEntry {
    state: Flexagon,
    found_from: usize,
}

/// A resumable breadth-first search over flex applications.
#[derive(Debug)]
pub struct Explore {
    tracker: Tracker,
    queue: Vec<QueueEntry>,
    position: usize,
    flexes: Vec<Flex>,
    statistics: Statistics,
}

impl Explore {
    pub fn new(start: &Flexagon, flexes: Vec<Flex>) -> Self {
        let mut statistics = Statistics::default();
        statistics.increment(Counters::StatesFound);
        Explore {
            tracker: Tracker::with_state(start),
            queue: vec![QueueEntry {
                state: start.clone(),
                found_from: 0,
            }],
            position: 0,
            flexes,
            statistics,
        }
    }

    /// Explore the next queued state. Returns `false` once every reachable
    /// state has been explored.
    pub fn check_next(&mut self) -> bool {
        if self.position >= self.queue.len() {
            return false;
        }
        let entry = self.queue[self.position].clone();
        self.position += 1;
        // rotations are searched inside apply; mirror and negation are not,
        // so expand them here
        let images = [
            entry.state.clone(),
            entry.state.mirrored(),
            entry.state.negated(),
            entry.state.turned_over(),
        ];
        for i in 0..self.flexes.len() {
            for image in &images {
                self.statistics.increment(Counters::FlexesTried);
                let Ok(next) = self.flexes[i].apply(image) else {
                    continue;
                };
                self.statistics.increment(Counters::FlexesApplied);
                match self.tracker.find_maybe_add(&next) {
                    Some(_) => self.statistics.increment(Counters::DuplicateStates),
                    None => {
                        self.statistics.increment(Counters::StatesFound);
                        debug!(
                            state = %next,
                            index = self.tracker.total_states() - 1,
                            flex = self.flexes[i].name(),
                            "found state"
                        );
                        self.queue.push(QueueEntry {
                            state: next,
                            found_from: self.position - 1,
                        });
                    }
                }
            }
        }
        self.statistics.increment(Counters::StatesExplored);
        true
    }

    /// Run the search to completion.
    pub fn explore_all(&mut self) {
        while self.check_next() {}
    }

    /// Distinct states found so far, explored or not.
    pub fn total_states(&self) -> usize {
        self.tracker.total_states()
    }

    /// States whose outgoing flexes have all been tried.
    pub fn explored_states(&self) -> usize {
        self.position
    }

    /// The state at a given discovery index.
    pub fn state(&self, index: usize) -> Option<&Flexagon> {
        self.queue.get(index).map(|e| &e.state)
    }

    /// The discovery index of the state `index` was first reached from.
    pub fn found_from(&self, index: usize) -> Option<usize> {
        self.queue.get(index).map(|e| e.found_from)
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flex::set::{rotate_left, rotate_right, turn_over};
    use crate::flex::FlexRotation;
    use crate::model::tree::parse_pat_list;

    fn ring_and_reorientations(pinch: Flex) -> Vec<Flex> {
        vec![
            rotate_right(4).unwrap(),
            rotate_left(4).unwrap(),
            turn_over(4).unwrap(),
            pinch,
        ]
    }

    #[test]
    fn test_reorientations_alone_reach_nothing_new() {
        let start: Flexagon = "[[1,2],3,[4,5],6]".parse().unwrap();
        let flexes = vec![
            rotate_right(4).unwrap(),
            rotate_left(4).unwrap(),
            turn_over(4).unwrap(),
        ];
        let mut explore = Explore::new(&start, flexes);
        explore.explore_all();
        assert_eq!(explore.total_states(), 1);
        assert_eq!(explore.explored_states(), 1);
    }

    #[test]
    fn test_exploration_is_resumable() {
        let pinch = Flex::new(
            "A",
            parse_pat_list("[[1,2],3,[4,5],6]").unwrap(),
            parse_pat_list("[2,[3,-4],5,[6,-1]]").unwrap(),
            FlexRotation::None,
        )
        .unwrap();
        let start: Flexagon = "[[1,2],3,[4,5],6]".parse().unwrap();
        let mut explore = Explore::new(&start, ring_and_reorientations(pinch));
        assert!(explore.check_next());
        let after_one = explore.total_states();
        assert!(after_one >= 2);
        explore.explore_all();
        assert!(!explore.check_next());
        assert_eq!(explore.explored_states(), explore.total_states());
        assert_eq!(
            explore.statistics().get(Counters::StatesFound),
            explore.total_states() as u64
        );
        // state 0 is the start, reached from itself
        assert_eq!(explore.state(0), Some(&start));
        assert_eq!(explore.found_from(0), Some(0));
    }
}
