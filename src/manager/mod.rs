// Copyright (C) 2025. See LICENSE for details.

//! Manager facade: current flexagon, flex set and linear history.
//!
//! The manager is the composition root for interactive use. It owns one
//! flexagon, a flex set, and an undo/redo history of snapshots. Every
//! operation either succeeds and appends exactly one history entry, or
//! fails and leaves the flexagon, flex set and history untouched.
//!
//! History is strictly linear. Undoing and then applying a new flex
//! discards the redo tail; there is no branching timeline.

use crate::atomic::formula::FormulaOp;
use crate::atomic::parse::parse_formula;
use crate::flex::{FlexError, FlexSet};
use crate::model::Flexagon;
use tracing::debug;

/// One history step: the flexes applied and the flexagon they produced.
#[derive(Debug, Clone)]
struct HistoryEntry {
    applied: String,
    result: Flexagon,
}

/// Interactive facade over a flexagon and its flex set.
#[derive(Debug)]
pub struct FlexagonManager {
    flexagon: Flexagon,
    flexes: FlexSet,
    start: Flexagon,
    history: Vec<HistoryEntry>,
    cursor: usize,
}

impl FlexagonManager {
    pub fn new(flexagon: Flexagon, flexes: FlexSet) -> Self {
        FlexagonManager {
            start: flexagon.clone(),
            flexagon,
            flexes,
            history: Vec::new(),
            cursor: 0,
        }
    }

    pub fn flexagon(&self) -> &Flexagon {
        &self.flexagon
    }

    pub fn flexes(&self) -> &FlexSet {
        &self.flexes
    }

    pub fn history_len(&self) -> usize {
        self.cursor
    }

    /// Apply one named flex. `name'` applies the inverse; `name+` first
    /// regenerates the pat structure the flex needs.
    pub fn apply_flex(&mut self, name: &str) -> Result<&Flexagon, FlexError> {
        let result = self.perform(&self.flexagon, name)?;
        self.commit(name, result);
        Ok(&self.flexagon)
    }

    /// Apply a whole flex sequence, e.g. `"P > > P'"`, as one atomic step:
    /// either every flex applies and one history entry is recorded, or
    /// nothing changes.
    pub fn apply_flexes(&mut self, sequence: &str) -> Result<&Flexagon, FlexError> {
        let ops = parse_formula(sequence)
            .map_err(|_| FlexError::BadFlexSequence(sequence.to_string()))?;
        let mut current = self.flexagon.clone();
        for op in &ops {
            let name = match op {
                FormulaOp::ShiftRight => ">".to_string(),
                FormulaOp::ShiftLeft => "<".to_string(),
                FormulaOp::ReverseEnds => "^".to_string(),
                FormulaOp::TurnOver => "~".to_string(),
                FormulaOp::Apply {
                    name,
                    inverse,
                    create,
                } => {
                    let mut n = name.clone();
                    if *create {
                        n.push('+');
                    }
                    if *inverse {
                        n.push('\'');
                    }
                    n
                }
            };
            current = self.perform(&current, &name)?;
        }
        self.commit(sequence, current);
        Ok(&self.flexagon)
    }

    /// Apply one flex name to a working copy, without touching state.
    fn perform(&self, flexagon: &Flexagon, name: &str) -> Result<Flexagon, FlexError> {
        if name == "~" {
            // ~ is ^ seen from the other axis; at ring level both are the
            // turn-over
            return self.flexes.get("^")?.apply(flexagon);
        }
        match name.strip_suffix('+') {
            Some(base) => {
                let flex = self.flexes.get(base)?;
                let shaped = flex.create_pattern(flexagon)?;
                flex.apply(&shaped)
            }
            None => self.flexes.get(name)?.apply(flexagon),
        }
    }

    fn commit(&mut self, applied: &str, result: Flexagon) {
        self.history.truncate(self.cursor);
        debug!(applied, state = %result, "applied");
        self.history.push(HistoryEntry {
            applied: applied.to_string(),
            result: result.clone(),
        });
        self.cursor = self.history.len();
        self.flexagon = result;
    }

    /// Step back one history entry. Returns `false` at the start.
    pub fn undo(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.flexagon = self.state_at_cursor();
        true
    }

    /// Step forward one previously undone entry. Returns `false` at the end.
    pub fn redo(&mut self) -> bool {
        if self.cursor == self.history.len() {
            return false;
        }
        self.cursor += 1;
        self.flexagon = self.state_at_cursor();
        true
    }

    pub fn undo_all(&mut self) {
        self.cursor = 0;
        self.flexagon = self.start.clone();
    }

    pub fn redo_all(&mut self) {
        self.cursor = self.history.len();
        self.flexagon = self.state_at_cursor();
    }

    fn state_at_cursor(&self) -> Flexagon {
        if self.cursor == 0 {
            self.start.clone()
        } else {
            self.history[self.cursor - 1].result.clone()
        }
    }

    /// The names applied so far, oldest first, up to the cursor.
    pub fn applied_history(&self) -> Vec<&str> {
        self.history[..self.cursor]
            .iter()
            .map(|e| e.applied.as_str())
            .collect()
    }

    /// Which prime flexes would apply after optionally turning the
    /// flexagon over and rotating it `right_steps` pats. Works on a copy;
    /// the current flexagon is never changed.
    pub fn check_for_prime_flexes(&self, flip: bool, right_steps: usize) -> Vec<String> {
        let mut probe = self.flexagon.clone();
        if flip {
            probe = probe.turned_over();
        }
        probe = probe.rotated(right_steps);
        self.flexes
            .prime_names()
            .into_iter()
            .filter(|name| {
                self.flexes
                    .get(name)
                    .map(|flex| flex.apply(&probe).is_ok())
                    .unwrap_or(false)
            })
            .collect()
    }
}
