// Copyright (C) 2025. See LICENSE for details.

//! Integration tests for the atomic algebra: formulas over the base
//! library and expansion of derived flexes to ring flexes.

use flex_search::atomic::formula::{derive, run_formula};
use flex_search::atomic::parse::parse_formula;
use flex_search::flex::FlexRotation;
use flex_search::{make_atomic_flexes, AtomicPattern, Flexagon};
use pretty_assertions::assert_eq;

#[test]
fn test_worked_example() {
    // ~ Ur ~ performs Ur on the turned-over strip
    let lib = make_atomic_flexes().unwrap();
    let start: AtomicPattern = "a / 1 > 2 < -b".parse().unwrap();
    let ops = parse_formula("~ Ur ~").unwrap();
    let out = run_formula(&ops, &start, &lib, None).unwrap();
    assert_eq!(out.to_string(), "a / [1,-2] < b");
}

#[test]
fn test_formula_agrees_with_derived_flex() {
    // running a formula and applying the flex derived from it are the
    // same operation
    let lib = make_atomic_flexes().unwrap();
    for (name, formula) in [("T", "Ur > Ul"), ("S", "(Ur>)2"), ("F", "Ur ~ Ur ~")] {
        let derived = derive(name, formula, &lib).unwrap();
        let registered = lib.get(name).unwrap();
        assert_eq!(&derived, registered, "{name}");

        let start = registered.input().clone();
        let ops = parse_formula(formula).unwrap();
        let via_formula = run_formula(&ops, &start, &lib, None).unwrap();
        let direct = registered.apply(&start, None).unwrap();
        assert_eq!(direct, via_formula, "{name}");
    }
}

#[test]
fn test_inverse_formula_round_trips() {
    let lib = make_atomic_flexes().unwrap();
    let p = lib.get("P").unwrap();
    let start = p.input().clone();
    let ops = parse_formula("P P'").unwrap();
    let out = run_formula(&ops, &start, &lib, None).unwrap();
    assert_eq!(out, start);
}

#[test]
fn test_pinch_expands_to_a_six_pat_ring_flex() {
    let lib = make_atomic_flexes().unwrap();
    let flex = lib
        .get("P")
        .unwrap()
        .as_flex(6, FlexRotation::None)
        .unwrap();
    let ring: Flexagon = "[1,2,3,[4,5],6,7]".parse().unwrap();
    let out = flex.apply(&ring).unwrap();
    assert_eq!(out.to_string(), "[-4,5,6,7,[-2,1],-3]");
    assert_eq!(out.leaf_count(), ring.leaf_count());

    // and the inverse ring flex undoes it
    let back = flex.inverse().apply(&out).unwrap();
    assert_eq!(back, ring);
}

#[test]
fn test_expanded_flexes_preserve_leaves_everywhere_they_apply() {
    let lib = make_atomic_flexes().unwrap();
    let ring: Flexagon = "[1,2,3,[4,5],6,7]".parse().unwrap();
    for atomic in lib.iter() {
        let Ok(flex) = atomic.as_flex(6, FlexRotation::None) else {
            continue;
        };
        if let Ok(out) = flex.apply(&ring) {
            assert_eq!(
                out.leaf_count(),
                ring.leaf_count(),
                "{} must conserve leaves",
                atomic.name()
            );
        }
    }
}

#[test]
fn test_derivation_of_a_novel_flex() {
    // a caller can extend the library with their own formula
    let lib = make_atomic_flexes().unwrap();
    let double = derive("Kk", "K ~ K ~", &lib).unwrap();
    let start = double.input().clone();
    let via_flex = double.apply(&start, None).unwrap();
    let ops = parse_formula("K ~ K ~").unwrap();
    let via_formula = run_formula(&ops, &start, &lib, None).unwrap();
    assert_eq!(via_flex, via_formula);
}
