// Copyright (C) 2025. See LICENSE for details.

//! Atomic pattern algebra.
//!
//! An atomic pattern describes a strip of pats around the current hinge
//! position `/`: explicit pats (each with a fold direction) on either side,
//! bracketed by the wildcards `a` and `b` standing for the unspecified
//! remainder of the strip. Example: `a / 1 > 2 < -b`.
//!
//! The algebra is used only at setup time, to *derive* composite flexes by
//! running a formula over already-known flexes and recording the resulting
//! input/output pattern pair. A derived flex is therefore proved correct by
//! execution rather than hand-derived.
//!
//! Transform conventions (the invariants everything else leans on):
//! - `~` turns the strip over about its long axis: every pat flips in
//!   place, every fold direction toggles, both wildcards flip.
//! - `^` turns the strip end over end: the sides swap and reverse, every
//!   pat flips, the direction marks are kept (the reversal and the flip
//!   each toggle the direction sense, so they cancel).
//! - a wildcard's `-` records the in-place flip; a wildcard sitting on the
//!   opposite side from its source end records a reversal.

pub mod flex;
pub mod formula;
pub mod library;
pub mod parse;

pub use flex::{AtomicFlex, PullContext};
pub use formula::{derive, run_formula, FormulaOp};
pub use library::{make_atomic_flexes, AtomicFlexes};
pub use parse::ParseError;

use crate::model::Pat;
use thiserror::Error;

/// Failures composing or applying atomic flexes. Any failure aborts the
/// formula; no partial flex is registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AtomicError {
    #[error("unknown flex {0:?} referenced in formula")]
    UnknownFlex(String),

    #[error("flex {0:?} does not match the pattern")]
    PatternMismatch(String),

    #[error("flex {flex:?} needs {needed} explicit pats {side} of the current position, found {found}")]
    NotEnoughPats {
        flex: String,
        side: &'static str,
        needed: usize,
        found: usize,
    },

    #[error("no explicit pat to shift across the current position")]
    NothingToShift,

    #[error("flex {flex:?} cannot expand to a ring of {num_pats} pats")]
    CannotExpand { flex: String, num_pats: usize },

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Fold direction of one pat relative to the strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// `>`
    Right,
    /// `<`
    Left,
}

impl Direction {
    pub fn toggled(self) -> Direction {
        match self {
            Direction::Right => Direction::Left,
            Direction::Left => Direction::Right,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Direction::Right => '>',
            Direction::Left => '<',
        }
    }
}

/// Which end of the strip a wildcard stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WildcardEnd {
    A,
    B,
}

impl WildcardEnd {
    pub fn as_char(self) -> char {
        match self {
            WildcardEnd::A => 'a',
            WildcardEnd::B => 'b',
        }
    }
}

/// The unspecified remainder of the strip at one end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wildcard {
    pub end: WildcardEnd,
    pub flipped: bool,
}

impl Wildcard {
    pub fn toggled(self) -> Wildcard {
        Wildcard {
            end: self.end,
            flipped: !self.flipped,
        }
    }
}

/// One explicit pat in the strip, with its fold direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectedPat {
    pub pat: Pat,
    pub direction: Direction,
}

impl ConnectedPat {
    pub fn new(pat: Pat, direction: Direction) -> Self {
        ConnectedPat { pat, direction }
    }

    /// In-place flip: pat flips, direction toggles (the `~` treatment).
    pub fn flipped(&self) -> Self {
        ConnectedPat {
            pat: self.pat.flip(),
            direction: self.direction.toggled(),
        }
    }

    /// Flip under reversal: pat flips, direction mark kept (the `^`
    /// treatment, where the order reversal supplies the second toggle).
    pub fn flipped_same_direction(&self) -> Self {
        ConnectedPat {
            pat: self.pat.flip(),
            direction: self.direction,
        }
    }
}

/// A strip pattern: `a <left pats> / <right pats> b`.
///
/// `left` is stored in reading order, so `left.last()` and `right.first()`
/// are the pats adjacent to the current position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomicPattern {
    pub left_wild: Wildcard,
    pub left: Vec<ConnectedPat>,
    pub right: Vec<ConnectedPat>,
    pub right_wild: Wildcard,
}

impl AtomicPattern {
    /// The fully generic pattern `a / b`.
    pub fn generic() -> Self {
        AtomicPattern {
            left_wild: Wildcard {
                end: WildcardEnd::A,
                flipped: false,
            },
            left: Vec::new(),
            right: Vec::new(),
            right_wild: Wildcard {
                end: WildcardEnd::B,
                flipped: false,
            },
        }
    }

    /// `~`: turn over about the strip's long axis.
    pub fn turn_over(&self) -> Self {
        AtomicPattern {
            left_wild: self.left_wild.toggled(),
            left: self.left.iter().map(ConnectedPat::flipped).collect(),
            right: self.right.iter().map(ConnectedPat::flipped).collect(),
            right_wild: self.right_wild.toggled(),
        }
    }

    /// `^`: turn over end for end. The sides swap and reverse.
    pub fn reverse_ends(&self) -> Self {
        AtomicPattern {
            left_wild: self.right_wild.toggled(),
            left: self
                .right
                .iter()
                .rev()
                .map(ConnectedPat::flipped_same_direction)
                .collect(),
            right: self
                .left
                .iter()
                .rev()
                .map(ConnectedPat::flipped_same_direction)
                .collect(),
            right_wild: self.left_wild.toggled(),
        }
    }

    /// `>`: move the pat after the current position to before it.
    /// When deriving, an empty right side pulls a fresh pat from the
    /// wildcard; otherwise it is an error.
    pub fn shift_right(
        &self,
        pull: Option<&mut PullContext>,
    ) -> Result<Self, AtomicError> {
        let mut out = self.clone();
        if out.right.is_empty() {
            match pull {
                Some(ctx) => ctx.pull(
                    &mut out,
                    true,
                    &[ConnectedPat::new(Pat::Leaf(1), Direction::Right)],
                ),
                None => return Err(AtomicError::NothingToShift),
            }
        }
        let moved = out.right.remove(0);
        out.left.push(moved);
        Ok(out)
    }

    /// `<`: move the pat before the current position to after it.
    pub fn shift_left(
        &self,
        pull: Option<&mut PullContext>,
    ) -> Result<Self, AtomicError> {
        let mut out = self.clone();
        if out.left.is_empty() {
            match pull {
                Some(ctx) => ctx.pull(
                    &mut out,
                    false,
                    &[ConnectedPat::new(Pat::Leaf(1), Direction::Right)],
                ),
                None => return Err(AtomicError::NothingToShift),
            }
        }
        let moved = out.left.pop().ok_or(AtomicError::NothingToShift)?;
        out.right.insert(0, moved);
        Ok(out)
    }

    /// Largest absolute leaf id used by the explicit pats.
    pub fn max_abs_id(&self) -> i32 {
        self.left
            .iter()
            .chain(&self.right)
            .map(|cp| cp.pat.max_abs_id())
            .max()
            .unwrap_or(0)
    }
}
