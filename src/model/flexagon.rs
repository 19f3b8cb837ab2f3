// Copyright (C) 2025. See LICENSE for details.

//! Flexagon type: an ordered, circular ring of pats.
//!
//! Flexagons are immutable values. Applying a flex produces a new flexagon;
//! nothing mutates a ring in place. The symmetry images defined here
//! (rotation, mirror, negation, turn-over) are used both by flex matching
//! and by the tracker's canonicalization.

use crate::model::tree::{parse_pat_list, TreeError};
use crate::model::{LeafId, Pat};
use std::fmt;
use std::str::FromStr;

/// A ring of pats.
///
/// Structural equality (`==`) compares the pat sequence exactly; equality
/// *as flexagon states* is weaker and lives in the tracker, which quotients
/// by rotation, reflection and face flips.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Flexagon {
    pats: Vec<Pat>,
}

impl Flexagon {
    pub fn new(pats: Vec<Pat>) -> Self {
        Flexagon { pats }
    }

    pub fn pats(&self) -> &[Pat] {
        &self.pats
    }

    pub fn pat_count(&self) -> usize {
        self.pats.len()
    }

    pub fn leaf_count(&self) -> usize {
        self.pats.iter().map(Pat::leaf_count).sum()
    }

    /// Ids of the leaves visible on top, one per pat.
    pub fn top_ids(&self) -> Vec<LeafId> {
        self.pats.iter().map(Pat::top_id).collect()
    }

    /// Ids of the leaves visible underneath, one per pat.
    pub fn bottom_ids(&self) -> Vec<LeafId> {
        self.pats.iter().map(Pat::bottom_id).collect()
    }

    /// Largest absolute leaf id in the ring.
    pub fn max_abs_id(&self) -> LeafId {
        self.pats.iter().map(Pat::max_abs_id).max().unwrap_or(0)
    }

    /// Nesting shape of each pat, e.g. `["[- -]", "-", "[- -]", "-"]`.
    pub fn structures(&self) -> Vec<String> {
        self.pats.iter().map(Pat::structure).collect()
    }

    /// The ring rotated so that pat `r` becomes pat 0.
    pub fn rotated(&self, r: usize) -> Flexagon {
        let n = self.pats.len();
        if n == 0 {
            return self.clone();
        }
        let r = r % n;
        let mut pats = Vec::with_capacity(n);
        pats.extend_from_slice(&self.pats[r..]);
        pats.extend_from_slice(&self.pats[..r]);
        Flexagon { pats }
    }

    /// The whole flexagon turned over: pat order reverses and every pat flips.
    pub fn turned_over(&self) -> Flexagon {
        Flexagon {
            pats: self.pats.iter().rev().map(Pat::flip).collect(),
        }
    }

    /// Mirror image: pat order and fold nesting reverse, signs kept.
    pub fn mirrored(&self) -> Flexagon {
        Flexagon {
            pats: self.pats.iter().rev().map(Pat::mirror).collect(),
        }
    }

    /// Every leaf viewed from its other side, order kept.
    pub fn negated(&self) -> Flexagon {
        Flexagon {
            pats: self.pats.iter().map(Pat::negate).collect(),
        }
    }

    /// Check the construction invariant: the absolute leaf ids are exactly
    /// `{1..N}`, each appearing once. A precondition helper for callers
    /// building flexagons by hand; flex application preserves it.
    pub fn validate_ids(&self) -> bool {
        let mut ids = Vec::new();
        for pat in &self.pats {
            pat.collect_ids(&mut ids);
        }
        let mut abs: Vec<LeafId> = ids.iter().map(|id| id.abs()).collect();
        abs.sort_unstable();
        abs.iter().enumerate().all(|(i, &id)| id == i as LeafId + 1)
    }
}

impl FromStr for Flexagon {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Flexagon::new(parse_pat_list(s)?))
    }
}

impl fmt::Display for Flexagon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Pat::Group(self.pats.clone()))
    }
}
