// Copyright (C) 2025. See LICENSE for details.

//! Pat type: one stack of folded leaves.
//!
//! A pat is a recursive tree: either a single leaf (a signed integer, where
//! the sign records whether the facet is seen face-up or face-down) or an
//! ordered group of sub-pats folded together. The tree *shape* is what flex
//! patterns match against; the leaf ids are the substitution payload.

use std::fmt;

/// A leaf identifier. Nonzero; `-n` is facet `n` seen from the other side.
pub type LeafId = i32;

/// One stack position in a flexagon's ring.
///
/// The derived `Ord` gives a total order over pats (leaves sort before
/// groups, groups compare lexicographically), which the tracker relies on
/// to pick canonical representatives deterministically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Pat {
    /// A single unfolded leaf.
    Leaf(LeafId),
    /// Sub-pats folded into one stack, in order.
    Group(Vec<Pat>),
}

impl Pat {
    /// Physically turn the pat over: every leaf shows its other face and
    /// the fold order reverses.
    pub fn flip(&self) -> Pat {
        match self {
            Pat::Leaf(id) => Pat::Leaf(-id),
            Pat::Group(pats) => Pat::Group(pats.iter().rev().map(Pat::flip).collect()),
        }
    }

    /// Mirror-image the fold nesting: reverse order at every level, signs kept.
    pub fn mirror(&self) -> Pat {
        match self {
            Pat::Leaf(id) => Pat::Leaf(*id),
            Pat::Group(pats) => Pat::Group(pats.iter().rev().map(Pat::mirror).collect()),
        }
    }

    /// View every leaf from its other side, order kept.
    pub fn negate(&self) -> Pat {
        match self {
            Pat::Leaf(id) => Pat::Leaf(-id),
            Pat::Group(pats) => Pat::Group(pats.iter().map(Pat::negate).collect()),
        }
    }

    /// Id of the leaf visible on top of the stack.
    pub fn top_id(&self) -> LeafId {
        match self {
            Pat::Leaf(id) => *id,
            // first sub-pat is on top
            Pat::Group(pats) => pats[0].top_id(),
        }
    }

    /// Id of the leaf visible on the bottom of the stack.
    pub fn bottom_id(&self) -> LeafId {
        match self {
            Pat::Leaf(id) => -id,
            Pat::Group(pats) => pats[pats.len() - 1].bottom_id(),
        }
    }

    /// Number of leaves in the stack.
    pub fn leaf_count(&self) -> usize {
        match self {
            Pat::Leaf(_) => 1,
            Pat::Group(pats) => pats.iter().map(Pat::leaf_count).sum(),
        }
    }

    /// Largest absolute leaf id in the pat, 0 if impossible (empty group).
    pub fn max_abs_id(&self) -> LeafId {
        match self {
            Pat::Leaf(id) => id.abs(),
            Pat::Group(pats) => pats.iter().map(Pat::max_abs_id).max().unwrap_or(0),
        }
    }

    /// Collect every signed leaf id in fold order.
    pub fn collect_ids(&self, out: &mut Vec<LeafId>) {
        match self {
            Pat::Leaf(id) => out.push(*id),
            Pat::Group(pats) => {
                for p in pats {
                    p.collect_ids(out);
                }
            }
        }
    }

    /// Short descriptive string of the nesting shape, ignoring leaf ids:
    /// `-` for a leaf, `[- [- -]]` for nested folds.
    pub fn structure(&self) -> String {
        match self {
            Pat::Leaf(_) => "-".to_string(),
            Pat::Group(pats) => {
                let inner: Vec<String> = pats.iter().map(Pat::structure).collect();
                format!("[{}]", inner.join(" "))
            }
        }
    }
}

impl fmt::Display for Pat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pat::Leaf(id) => write!(f, "{}", id),
            Pat::Group(pats) => {
                write!(f, "[")?;
                for (i, p) in pats.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", p)?;
                }
                write!(f, "]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(a: LeafId, b: LeafId) -> Pat {
        Pat::Group(vec![Pat::Leaf(a), Pat::Leaf(b)])
    }

    #[test]
    fn test_flip_reverses_and_negates() {
        assert_eq!(Pat::Leaf(3).flip(), Pat::Leaf(-3));
        assert_eq!(pair(1, 2).flip(), pair(-2, -1));
        // flip is an involution
        let nested = Pat::Group(vec![pair(1, 2), Pat::Leaf(3)]);
        assert_eq!(nested.flip().flip(), nested);
    }

    #[test]
    fn test_mirror_keeps_signs() {
        assert_eq!(pair(1, -2).mirror(), pair(-2, 1));
        assert_eq!(Pat::Leaf(-4).mirror(), Pat::Leaf(-4));
    }

    #[test]
    fn test_top_and_bottom() {
        let p = Pat::Group(vec![pair(1, 2), Pat::Leaf(3)]);
        assert_eq!(p.top_id(), 1);
        assert_eq!(p.bottom_id(), -3);
        assert_eq!(Pat::Leaf(5).top_id(), 5);
        assert_eq!(Pat::Leaf(5).bottom_id(), -5);
    }

    #[test]
    fn test_structure() {
        let p = Pat::Group(vec![Pat::Leaf(1), pair(2, 3)]);
        assert_eq!(p.structure(), "[- [- -]]");
        assert_eq!(Pat::Leaf(9).structure(), "-");
    }

    #[test]
    fn test_ordering_leaves_before_groups() {
        assert!(Pat::Leaf(100) < pair(-9, -9));
        assert!(pair(1, 2) < pair(1, 3));
    }

    #[test]
    fn test_display() {
        let p = Pat::Group(vec![Pat::Leaf(1), pair(-2, 3)]);
        assert_eq!(p.to_string(), "[1,[-2,3]]");
    }
}
