// Copyright (C) 2025. See LICENSE for details.

//! Formula interpretation over atomic patterns.
//!
//! A formula is a sequence of strip operations and flex applications. Run
//! against a concrete pattern it computes the result of performing the
//! whole sequence; run against the generic pattern `a / b` with a
//! [`PullContext`] it performs a derivation, producing a new flex whose
//! input is everything the sequence needed and whose output is where the
//! sequence ended up.

use crate::atomic::library::AtomicFlexes;
use crate::atomic::parse::parse_formula;
use crate::atomic::{AtomicError, AtomicFlex, AtomicPattern, PullContext};
use tracing::debug;

/// One step of a formula.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormulaOp {
    /// `>`
    ShiftRight,
    /// `<`
    ShiftLeft,
    /// `~`
    TurnOver,
    /// `^`
    ReverseEnds,
    /// A named flex, possibly inverted (`'`). The `create` mark (`+`) is
    /// meaningful only at the ring level; derivation always pulls the
    /// structure it needs.
    Apply {
        name: String,
        inverse: bool,
        create: bool,
    },
}

/// Run a formula's operations over a pattern. Any failure aborts the run.
pub fn run_formula(
    ops: &[FormulaOp],
    start: &AtomicPattern,
    flexes: &AtomicFlexes,
    mut pull: Option<&mut PullContext>,
) -> Result<AtomicPattern, AtomicError> {
    let mut current = start.clone();
    for op in ops {
        current = match op {
            FormulaOp::ShiftRight => current.shift_right(pull.as_deref_mut())?,
            FormulaOp::ShiftLeft => current.shift_left(pull.as_deref_mut())?,
            FormulaOp::TurnOver => current.turn_over(),
            FormulaOp::ReverseEnds => current.reverse_ends(),
            FormulaOp::Apply { name, inverse, .. } => {
                let flex = flexes
                    .get(name)
                    .ok_or_else(|| AtomicError::UnknownFlex(name.clone()))?;
                let flex = if *inverse { flex.inverse() } else { flex.clone() };
                flex.apply(&current, pull.as_deref_mut())?
            }
        };
    }
    Ok(current)
}

/// Derive a new flex from a formula over already-known flexes.
pub fn derive(
    name: &str,
    formula: &str,
    flexes: &AtomicFlexes,
) -> Result<AtomicFlex, AtomicError> {
    let ops = parse_formula(formula)?;
    let mut ctx = PullContext::new();
    let output = run_formula(&ops, &AtomicPattern::generic(), flexes, Some(&mut ctx))?;
    let input = ctx.into_input();
    debug!(name, formula, input = %input, output = %output, "derived flex");
    Ok(AtomicFlex::new(name, input, output))
}
