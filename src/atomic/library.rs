// Copyright (C) 2025. See LICENSE for details.

//! The base flex library.
//!
//! Only `Ur` (fold the next pat to the right under the current one) is
//! primitive; everything else is derived by formula at build time, so each
//! definition is proved by execution. `Ul` is its mirror, `Xr`/`Xl` the
//! exchanging flexes, and `K` (pocket), `T` (tuck), `S` (pyramid shuffle),
//! `F` (forced) and `P` (pinch-like) the composite flexes a caller would
//! actually perform.

use crate::atomic::formula::derive;
use crate::atomic::{AtomicError, AtomicFlex};
use std::collections::BTreeMap;

/// Derivation formulas for the non-primitive base flexes, in dependency
/// order.
const DERIVED: &[(&str, &str)] = &[
    ("Ul", "~ Ur ~"),
    ("Xr", "Ur> ^Ur'^"),
    ("Xl", "Ul< ^Ul'^"),
    ("K", "Xr>"),
    ("T", "Ur > Ul"),
    ("S", "(Ur>)2"),
    ("F", "Ur ~ Ur ~"),
    ("P", "Xr ~ Xl' ~"),
];

/// An immutable name -> atomic flex mapping.
#[derive(Debug, Clone, Default)]
pub struct AtomicFlexes {
    flexes: BTreeMap<String, AtomicFlex>,
}

impl AtomicFlexes {
    pub fn new() -> Self {
        AtomicFlexes::default()
    }

    pub fn add(&mut self, flex: AtomicFlex) {
        self.flexes.insert(flex.name().to_string(), flex);
    }

    pub fn get(&self, name: &str) -> Option<&AtomicFlex> {
        self.flexes.get(name)
    }

    pub fn len(&self) -> usize {
        self.flexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flexes.is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.flexes.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AtomicFlex> {
        self.flexes.values()
    }
}

/// Build the base library: the `Ur` primitive plus every derived flex.
pub fn make_atomic_flexes() -> Result<AtomicFlexes, AtomicError> {
    let mut lib = AtomicFlexes::new();
    lib.add(AtomicFlex::new(
        "Ur",
        "a / 1 < 2 > b".parse()?,
        "a / [-2,1] > -b".parse()?,
    ));
    for (name, formula) in DERIVED {
        let flex = derive(name, formula, &lib)?;
        lib.add(flex);
    }
    Ok(lib)
}
