// Copyright (C) 2025. See LICENSE for details.

//! Common test fixtures shared across integration tests.

use flex_search::flex::set::{rotate_left, rotate_right, turn_over};
use flex_search::flex::FlexRotation;
use flex_search::model::tree::parse_pat_list;
use flex_search::{Flex, FlexSet, Flexagon};

/// The four-pat starting state used throughout: two pairs and two single
/// leaves.
pub fn start_state() -> Flexagon {
    "[[1,2],3,[4,5],6]".parse().unwrap()
}

/// A pinch-style flex: folds each pair open and tucks the single leaves
/// into new pairs.
pub fn pinch() -> Flex {
    Flex::new(
        "A",
        parse_pat_list("[[1,2],3,[4,5],6]").unwrap(),
        parse_pat_list("[2,[3,-4],5,[6,-1]]").unwrap(),
        FlexRotation::None,
    )
    .unwrap()
}

/// A tuck-style flex: folds two leaves into a new pair and sends the top
/// of the old pair, flipped, to the far side of the ring.
pub fn tuck() -> Flex {
    Flex::new(
        "B",
        parse_pat_list("[[1,2],3,4,5]").unwrap(),
        parse_pat_list("[[2,-3],4,5,-1]").unwrap(),
        FlexRotation::None,
    )
    .unwrap()
}

/// The full fixture set: both structural flexes plus the three ring
/// reorientations for a four-pat ring.
pub fn full_flex_set() -> FlexSet {
    let mut set = FlexSet::new();
    set.add(rotate_right(4).unwrap());
    set.add(rotate_left(4).unwrap());
    set.add(turn_over(4).unwrap());
    set.add(pinch());
    set.add(tuck());
    set
}
