// Copyright (C) 2025. See LICENSE for details.

//! Flex set: the read-only name -> flex registry built once at setup.
//!
//! Also provides the ring reorientation flexes (`>`, `<`, `^`) for a given
//! ring size; these let callers and the explorer treat "rotate the ring"
//! and "turn the whole thing over" uniformly as flexes.

use crate::flex::{Flex, FlexError, FlexRotation, FlexSource};
use crate::model::Pat;
use std::collections::BTreeMap;

/// An immutable mapping from flex name to flex.
///
/// Lookup understands the `'` suffix: `get("P'")` returns the inverse of
/// the registered flex `P`.
#[derive(Debug, Clone, Default)]
pub struct FlexSet {
    flexes: BTreeMap<String, Flex>,
}

impl FlexSet {
    pub fn new() -> Self {
        FlexSet::default()
    }

    pub fn add(&mut self, flex: Flex) {
        self.flexes.insert(flex.name().to_string(), flex);
    }

    pub fn len(&self) -> usize {
        self.flexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flexes.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.flexes.contains_key(name)
    }

    /// Look up a flex by name. A trailing `'` resolves to the inverse of
    /// the named flex.
    pub fn get(&self, name: &str) -> Result<Flex, FlexError> {
        if let Some(base) = name.strip_suffix('\'') {
            let flex = self
                .flexes
                .get(base)
                .ok_or_else(|| FlexError::UnknownFlex(name.to_string()))?;
            return Ok(flex.inverse());
        }
        self.flexes
            .get(name)
            .cloned()
            .ok_or_else(|| FlexError::UnknownFlex(name.to_string()))
    }

    /// Names in deterministic (sorted) order.
    pub fn names(&self) -> Vec<String> {
        self.flexes.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Flex> {
        self.flexes.values()
    }

    /// Names of the prime flexes: those registered from explicit patterns,
    /// not derived, inverted or reorientations.
    pub fn prime_names(&self) -> Vec<String> {
        self.flexes
            .values()
            .filter(|f| f.is_prime())
            .map(|f| f.name().to_string())
            .collect()
    }
}

fn slot_run(range: impl Iterator<Item = i32>) -> Vec<Pat> {
    range.map(Pat::Leaf).collect()
}

/// `>`: rotate the ring one step right.
pub fn rotate_right(num_pats: usize) -> Result<Flex, FlexError> {
    let n = num_pats as i32;
    let mut output = slot_run(2..=n);
    output.push(Pat::Leaf(1));
    Flex::with_source(
        ">",
        slot_run(1..=n),
        output,
        FlexRotation::None,
        FlexSource::Ring,
    )
}

/// `<`: rotate the ring one step left.
pub fn rotate_left(num_pats: usize) -> Result<Flex, FlexError> {
    let n = num_pats as i32;
    let mut output = vec![Pat::Leaf(n)];
    output.extend(slot_run(1..n));
    Flex::with_source(
        "<",
        slot_run(1..=n),
        output,
        FlexRotation::None,
        FlexSource::Ring,
    )
}

/// `^`: turn the whole flexagon over.
pub fn turn_over(num_pats: usize) -> Result<Flex, FlexError> {
    let n = num_pats as i32;
    Flex::with_source(
        "^",
        slot_run(1..=n),
        slot_run((1..=n).rev().map(|s| -s)),
        FlexRotation::None,
        FlexSource::Ring,
    )
}
