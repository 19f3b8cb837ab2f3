// Copyright (C) 2025. See LICENSE for details.

//! Flex: a single named structural transformation.
//!
//! A flex carries an input pattern, an output pattern and a symmetry
//! descriptor. Application unifies the input pattern against every rotation
//! of the ring (and, for `Mirror` flexes, every rotation of the turned-over
//! ring), substitutes the bound subtrees into the output pattern, then
//! undoes the rotation/reflection used for matching so the flexagon's
//! reference frame is preserved. The first successful unification wins.

pub mod error;
pub mod pattern;
pub mod set;

pub use error::FlexError;
pub use set::FlexSet;

use crate::flex::pattern::{collect_slots, substitute, unify, Binding};
use crate::model::{Flexagon, LeafId, Pat};

/// Whether a flex that fails at every rotation should also be tried against
/// the turned-over ring before giving up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlexRotation {
    None,
    Mirror,
}

/// How a flex entered the flex set. Only `Pattern` flexes count as prime
/// for the manager's "what can I do from here" queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlexSource {
    /// Hand-specified input/output patterns.
    Pattern,
    /// Derived from a formula over other flexes.
    Formula,
    /// Generated inverse of another flex.
    Inverse,
    /// Ring reorientation (`>`, `<`, `^`).
    Ring,
}

/// A named transformation over a flexagon's pat ring. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flex {
    name: String,
    input: Vec<Pat>,
    output: Vec<Pat>,
    rotation: FlexRotation,
    source: FlexSource,
}

impl Flex {
    /// Build a flex from explicit patterns, checking that every slot the
    /// output references is bound by the input.
    pub fn new(
        name: &str,
        input: Vec<Pat>,
        output: Vec<Pat>,
        rotation: FlexRotation,
    ) -> Result<Self, FlexError> {
        Self::with_source(name, input, output, rotation, FlexSource::Pattern)
    }

    pub(crate) fn with_source(
        name: &str,
        input: Vec<Pat>,
        output: Vec<Pat>,
        rotation: FlexRotation,
        source: FlexSource,
    ) -> Result<Self, FlexError> {
        let mut bound = Vec::new();
        for pat in &input {
            collect_slots(pat, &mut bound);
        }
        let mut referenced = Vec::new();
        for pat in &output {
            collect_slots(pat, &mut referenced);
        }
        if let Some(&slot) = referenced.iter().find(|s| !bound.contains(s)) {
            return Err(FlexError::BadDefinition {
                flex: name.to_string(),
                slot,
            });
        }
        Ok(Flex {
            name: name.to_string(),
            input,
            output,
            rotation,
            source,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rotation(&self) -> FlexRotation {
        self.rotation
    }

    pub fn is_prime(&self) -> bool {
        matches!(self.source, FlexSource::Pattern)
    }

    /// The inverse flex: patterns swapped, applied right-to-left.
    pub fn inverse(&self) -> Flex {
        Flex {
            name: format!("{}'", self.name),
            input: self.output.clone(),
            output: self.input.clone(),
            rotation: self.rotation,
            source: FlexSource::Inverse,
        }
    }

    /// Apply the flex, producing a new flexagon.
    ///
    /// Fails with `CantApplyFlex` when no rotation (or reflection, for
    /// `Mirror` flexes) of the ring matches the input pattern.
    pub fn apply(&self, flexagon: &Flexagon) -> Result<Flexagon, FlexError> {
        let n = flexagon.pat_count();
        if self.input.len() != n || n == 0 {
            return Err(FlexError::CantApplyFlex(self.name.clone()));
        }
        let mirrors: &[bool] = match self.rotation {
            FlexRotation::None => &[false],
            FlexRotation::Mirror => &[false, true],
        };
        for &mirrored in mirrors {
            let base = if mirrored {
                flexagon.turned_over()
            } else {
                flexagon.clone()
            };
            for r in 0..n {
                let rotated = base.rotated(r);
                if let Some(out) = self.try_match(rotated.pats()) {
                    // un-rotate in the output's own ring, which may have a
                    // different pat count than the input
                    let m = out.len();
                    let restored = if m == 0 {
                        Flexagon::new(out)
                    } else {
                        Flexagon::new(out).rotated(m - r % m)
                    };
                    return Ok(if mirrored {
                        restored.turned_over()
                    } else {
                        restored
                    });
                }
            }
        }
        Err(FlexError::CantApplyFlex(self.name.clone()))
    }

    fn try_match(&self, pats: &[Pat]) -> Option<Vec<Pat>> {
        let mut binding = Binding::new();
        for (pattern, concrete) in self.input.iter().zip(pats) {
            if !unify(pattern, concrete, &mut binding) {
                return None;
            }
        }
        self.output
            .iter()
            .map(|pat| substitute(pat, &binding))
            .collect()
    }

    /// Regenerate the flexagon so it has the nested structure the input
    /// pattern needs, splitting flat leaves into fresh sub-leaves at the
    /// current rotation. Used for `name+` application: the result can then
    /// be flexed without a structure mismatch.
    pub fn create_pattern(&self, flexagon: &Flexagon) -> Result<Flexagon, FlexError> {
        if self.input.len() != flexagon.pat_count() {
            return Err(FlexError::CantApplyFlex(self.name.clone()));
        }
        let mut next_id = flexagon.max_abs_id() + 1;
        let mut pats = Vec::with_capacity(flexagon.pat_count());
        for (pattern, concrete) in self.input.iter().zip(flexagon.pats()) {
            pats.push(self.split_to_shape(pattern, concrete, &mut next_id)?);
        }
        Ok(Flexagon::new(pats))
    }

    fn split_to_shape(
        &self,
        pattern: &Pat,
        concrete: &Pat,
        next_id: &mut LeafId,
    ) -> Result<Pat, FlexError> {
        match (pattern, concrete) {
            (Pat::Leaf(_), c) => Ok(c.clone()),
            (Pat::Group(pp), Pat::Group(cc)) => {
                if pp.len() != cc.len() {
                    return Err(FlexError::CantApplyFlex(self.name.clone()));
                }
                let mut rebuilt = Vec::with_capacity(pp.len());
                for (p, c) in pp.iter().zip(cc) {
                    rebuilt.push(self.split_to_shape(p, c, next_id)?);
                }
                Ok(Pat::Group(rebuilt))
            }
            (Pat::Group(_), Pat::Leaf(id)) => Ok(expand_leaf(pattern, *id, next_id)),
        }
    }
}

/// Split a single leaf into the nesting shape of `pattern`. The first new
/// leaf keeps the original id; the rest are fresh, face-down so adjacent
/// folds alternate.
fn expand_leaf(pattern: &Pat, id: LeafId, next_id: &mut LeafId) -> Pat {
    match pattern {
        Pat::Leaf(_) => Pat::Leaf(id),
        Pat::Group(children) => {
            let mut built = Vec::with_capacity(children.len());
            for (i, child) in children.iter().enumerate() {
                if i == 0 {
                    built.push(expand_leaf(child, id, next_id));
                } else {
                    let fresh = -*next_id;
                    *next_id += 1;
                    built.push(expand_leaf(child, fresh, next_id));
                }
            }
            Pat::Group(built)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tree::parse_pat_list;

    fn pats(s: &str) -> Vec<Pat> {
        parse_pat_list(s).unwrap()
    }

    fn pinch() -> Flex {
        Flex::new(
            "A",
            pats("[[1,2],3,[4,5],6]"),
            pats("[2,[3,-4],5,[6,-1]]"),
            FlexRotation::None,
        )
        .unwrap()
    }

    #[test]
    fn test_apply_at_identity_rotation() {
        let f: Flexagon = "[[1,2],3,[4,5],6]".parse().unwrap();
        let out = pinch().apply(&f).unwrap();
        assert_eq!(out.to_string(), "[2,[3,-4],5,[6,-1]]");
        assert!(out.validate_ids());
    }

    #[test]
    fn test_apply_searches_rotations() {
        // same flexagon presented rotated: the result must come back in the
        // caller's reference frame
        let f: Flexagon = "[3,[4,5],6,[1,2]]".parse().unwrap();
        let out = pinch().apply(&f).unwrap();
        assert_eq!(out.to_string(), "[[3,-4],5,[6,-1],2]");
    }

    #[test]
    fn test_apply_failure_is_clean() {
        let f: Flexagon = "[1,2,3,4]".parse().unwrap();
        assert_eq!(
            pinch().apply(&f),
            Err(FlexError::CantApplyFlex("A".to_string()))
        );
    }

    #[test]
    fn test_apply_wrong_pat_count() {
        let f: Flexagon = "[[1,2],3]".parse().unwrap();
        assert!(pinch().apply(&f).is_err());
    }

    #[test]
    fn test_inverse_round_trip() {
        let f: Flexagon = "[[1,2],3,[4,5],6]".parse().unwrap();
        let there = pinch().apply(&f).unwrap();
        let back = pinch().inverse().apply(&there).unwrap();
        assert_eq!(back, f);
    }

    #[test]
    fn test_mirror_rotation_tries_turned_over() {
        // the pattern wants a left-nested pat [[x,y],z]; the ring only has a
        // right-nested one, so only the turned-over ring matches
        let flex = Flex::new(
            "M",
            pats("[[[1,2],3],4]"),
            pats("[4,[[1,2],3]]"),
            FlexRotation::Mirror,
        )
        .unwrap();
        let left_nested: Flexagon = "[[[1,2],3],4]".parse().unwrap();
        assert!(flex.apply(&left_nested).is_ok());

        let right_nested: Flexagon = "[[1,[2,3]],4]".parse().unwrap();
        let out = flex.apply(&right_nested).unwrap();
        assert!(out.validate_ids());

        let none = Flex::new(
            "M0",
            pats("[[[1,2],3],4]"),
            pats("[4,[[1,2],3]]"),
            FlexRotation::None,
        )
        .unwrap();
        assert_eq!(
            none.apply(&right_nested),
            Err(FlexError::CantApplyFlex("M0".to_string()))
        );
    }

    #[test]
    fn test_bad_definition_rejected() {
        let err = Flex::new("X", pats("[1,2]"), pats("[1,3]"), FlexRotation::None);
        assert_eq!(
            err.unwrap_err(),
            FlexError::BadDefinition {
                flex: "X".to_string(),
                slot: 3
            }
        );
    }

    #[test]
    fn test_create_pattern_splits_leaves() {
        let f: Flexagon = "[1,2,3,4]".parse().unwrap();
        let shaped = pinch().create_pattern(&f).unwrap();
        assert_eq!(shaped.structures(), vec!["[- -]", "-", "[- -]", "-"]);
        // original ids survive as the top of each split
        assert_eq!(shaped.top_ids(), vec![1, 2, 3, 4]);
        // and the flex now applies at the identity rotation
        assert!(pinch().apply(&shaped).is_ok());
    }
}
