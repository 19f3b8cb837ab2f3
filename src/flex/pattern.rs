// Copyright (C) 2025. See LICENSE for details.

//! Pattern unification over pat trees.
//!
//! A pattern is itself a `Pat` whose leaves are placeholder slots: slot `n`
//! binds the whole concrete subtree found at that position, slot `-n` binds
//! its flipped image. Pattern groups require a concrete group of the same
//! arity at the same position. A slot appearing twice must bind equal
//! subtrees both times.

use crate::model::{LeafId, Pat};
use std::collections::HashMap;

/// Slot bindings accumulated during a match.
pub type Binding = HashMap<LeafId, Pat>;

/// Try to unify `pattern` against `concrete`, extending `binding`.
pub fn unify(pattern: &Pat, concrete: &Pat, binding: &mut Binding) -> bool {
    match pattern {
        Pat::Leaf(slot) => {
            let value = if *slot > 0 {
                concrete.clone()
            } else {
                concrete.flip()
            };
            match binding.get(&slot.abs()) {
                Some(existing) => *existing == value,
                None => {
                    binding.insert(slot.abs(), value);
                    true
                }
            }
        }
        Pat::Group(children) => match concrete {
            Pat::Leaf(_) => false,
            Pat::Group(found) => {
                children.len() == found.len()
                    && children
                        .iter()
                        .zip(found)
                        .all(|(p, c)| unify(p, c, binding))
            }
        },
    }
}

/// Rebuild `pattern` with every slot replaced by its bound subtree.
/// `None` if the pattern references an unbound slot.
pub fn substitute(pattern: &Pat, binding: &Binding) -> Option<Pat> {
    match pattern {
        Pat::Leaf(slot) => {
            let value = binding.get(&slot.abs())?;
            Some(if *slot > 0 { value.clone() } else { value.flip() })
        }
        Pat::Group(children) => {
            let rebuilt: Option<Vec<Pat>> =
                children.iter().map(|c| substitute(c, binding)).collect();
            Some(Pat::Group(rebuilt?))
        }
    }
}

/// Collect the slot numbers referenced by a pattern.
pub fn collect_slots(pattern: &Pat, out: &mut Vec<LeafId>) {
    match pattern {
        Pat::Leaf(slot) => out.push(slot.abs()),
        Pat::Group(children) => {
            for c in children {
                collect_slots(c, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tree::parse_pat;

    fn pat(s: &str) -> Pat {
        parse_pat(s).unwrap()
    }

    #[test]
    fn test_slot_binds_subtree() {
        let mut b = Binding::new();
        assert!(unify(&pat("1"), &pat("[4,-5]"), &mut b));
        assert_eq!(b[&1], pat("[4,-5]"));
    }

    #[test]
    fn test_negative_slot_binds_flipped() {
        let mut b = Binding::new();
        assert!(unify(&pat("-1"), &pat("[4,5]"), &mut b));
        assert_eq!(b[&1], pat("[-5,-4]"));
    }

    #[test]
    fn test_group_requires_same_arity() {
        let mut b = Binding::new();
        assert!(!unify(&pat("[1,2]"), &pat("7"), &mut b));
        let mut b = Binding::new();
        assert!(!unify(&pat("[1,2]"), &pat("[7,8,9]"), &mut b));
        let mut b = Binding::new();
        assert!(unify(&pat("[1,2]"), &pat("[7,[8,9]]"), &mut b));
        assert_eq!(b[&2], pat("[8,9]"));
    }

    #[test]
    fn test_repeated_slot_must_agree() {
        let mut b = Binding::new();
        assert!(!unify(&pat("[1,1]"), &pat("[7,8]"), &mut b));
        let mut b = Binding::new();
        assert!(unify(&pat("[1,-1]"), &pat("[7,-7]"), &mut b));
    }

    #[test]
    fn test_substitute_round_trip() {
        let mut b = Binding::new();
        assert!(unify(&pat("[[1,2],3]"), &pat("[[6,[7,8]],-9]"), &mut b));
        let rebuilt = substitute(&pat("[[1,2],3]"), &b).unwrap();
        assert_eq!(rebuilt, pat("[[6,[7,8]],-9]"));
        // unbound slot is reported, not invented
        assert_eq!(substitute(&pat("4"), &b), None);
    }
}
