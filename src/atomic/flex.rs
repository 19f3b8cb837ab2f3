// Copyright (C) 2025. See LICENSE for details.

//! Atomic flex application and derivation support.
//!
//! Applying an atomic flex matches its input pattern against the explicit
//! pats adjacent to the current position, folds any surplus explicit pats
//! into the wildcard bindings, then substitutes the output pattern. In
//! derivation mode a [`PullContext`] is threaded through: whenever the
//! pattern needs more explicit pats than the strip has, fresh pats of the
//! required shape are drawn out of the wildcard and simultaneously recorded
//! (with the wildcard's content transform undone) in the accumulated input
//! pattern. Running a formula this way computes both the minimal input
//! pattern the whole formula requires and its output, which is exactly the
//! derived flex.

use crate::atomic::{AtomicError, AtomicPattern, ConnectedPat, Wildcard, WildcardEnd};
use crate::flex::pattern::{substitute, unify, Binding};
use crate::flex::{Flex, FlexRotation, FlexSource};
use crate::model::{LeafId, Pat};

/// Derivation state: the input pattern accumulated so far and the next
/// fresh leaf id.
#[derive(Debug)]
pub struct PullContext {
    input: AtomicPattern,
    next_id: LeafId,
}

impl PullContext {
    pub fn new() -> Self {
        PullContext {
            input: AtomicPattern::generic(),
            next_id: 1,
        }
    }

    /// The accumulated input pattern.
    pub fn into_input(self) -> AtomicPattern {
        self.input
    }

    fn fresh_like(&mut self, shape: &Pat) -> Pat {
        match shape {
            Pat::Leaf(_) => {
                let id = self.next_id;
                self.next_id += 1;
                Pat::Leaf(id)
            }
            Pat::Group(children) => {
                Pat::Group(children.iter().map(|c| self.fresh_like(c)).collect())
            }
        }
    }

    /// Draw pats of the given shapes out of one of `ap`'s wildcards,
    /// appending them to the strip and recording them in the accumulated
    /// input. `shaped` is in pull order, nearest the current position
    /// first.
    ///
    /// Recording undoes the wildcard's content transform: a flipped
    /// wildcard flips the pat and toggles its direction, and a wildcard
    /// that has crossed to the other side toggles the direction again.
    pub(crate) fn pull(
        &mut self,
        ap: &mut AtomicPattern,
        into_right: bool,
        shaped: &[ConnectedPat],
    ) {
        let w = if into_right {
            ap.right_wild
        } else {
            ap.left_wild
        };
        let crossed = into_right != (w.end == WildcardEnd::B);
        for cp in shaped {
            let fresh = ConnectedPat::new(self.fresh_like(&cp.pat), cp.direction);
            let recorded_pat = if w.flipped {
                fresh.pat.flip()
            } else {
                fresh.pat.clone()
            };
            let recorded_dir = if w.flipped != crossed {
                fresh.direction.toggled()
            } else {
                fresh.direction
            };
            let recorded = ConnectedPat::new(recorded_pat, recorded_dir);
            match w.end {
                WildcardEnd::B => self.input.right.push(recorded),
                WildcardEnd::A => self.input.left.insert(0, recorded),
            }
            if into_right {
                ap.right.push(fresh);
            } else {
                ap.left.insert(0, fresh);
            }
        }
    }
}

impl Default for PullContext {
    fn default() -> Self {
        PullContext::new()
    }
}

/// A flex expressed as an input/output pair of atomic patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomicFlex {
    name: String,
    input: AtomicPattern,
    output: AtomicPattern,
}

impl AtomicFlex {
    pub fn new(name: &str, input: AtomicPattern, output: AtomicPattern) -> Self {
        AtomicFlex {
            name: name.to_string(),
            input,
            output,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn input(&self) -> &AtomicPattern {
        &self.input
    }

    pub fn output(&self) -> &AtomicPattern {
        &self.output
    }

    /// The inverse flex: patterns swapped. `X` names invert to `X'` and
    /// back again.
    pub fn inverse(&self) -> AtomicFlex {
        let name = match self.name.strip_suffix('\'') {
            Some(base) => base.to_string(),
            None => format!("{}'", self.name),
        };
        AtomicFlex {
            name,
            input: self.output.clone(),
            output: self.input.clone(),
        }
    }

    /// Apply this flex to a strip pattern. With a [`PullContext`], missing
    /// explicit pats are pulled from the wildcards instead of failing.
    pub fn apply(
        &self,
        ap: &AtomicPattern,
        mut pull: Option<&mut PullContext>,
    ) -> Result<AtomicPattern, AtomicError> {
        let mut cur = ap.clone();
        let pin = &self.input;

        let have_right = cur.right.len();
        if have_right < pin.right.len() {
            match pull.as_deref_mut() {
                Some(ctx) => ctx.pull(&mut cur, true, &pin.right[have_right..]),
                None => {
                    return Err(AtomicError::NotEnoughPats {
                        flex: self.name.clone(),
                        side: "right",
                        needed: pin.right.len(),
                        found: have_right,
                    })
                }
            }
        }
        if cur.left.len() < pin.left.len() {
            let missing = pin.left.len() - cur.left.len();
            // pull order works outward from the current position
            let shaped: Vec<ConnectedPat> =
                pin.left[..missing].iter().rev().cloned().collect();
            match pull.as_deref_mut() {
                Some(ctx) => ctx.pull(&mut cur, false, &shaped),
                None => {
                    return Err(AtomicError::NotEnoughPats {
                        flex: self.name.clone(),
                        side: "left",
                        needed: pin.left.len(),
                        found: cur.left.len(),
                    })
                }
            }
        }

        let mismatch = || AtomicError::PatternMismatch(self.name.clone());
        let mut binding = Binding::new();
        for (p, c) in pin.right.iter().zip(&cur.right) {
            if p.direction != c.direction || !unify(&p.pat, &c.pat, &mut binding) {
                return Err(mismatch());
            }
        }
        for (p, c) in pin.left.iter().rev().zip(cur.left.iter().rev()) {
            if p.direction != c.direction || !unify(&p.pat, &c.pat, &mut binding) {
                return Err(mismatch());
            }
        }

        // surplus explicit pats fold into the wildcard bindings
        let bound_a = bind_wildcard(
            cur.left_wild,
            &cur.left[..cur.left.len() - pin.left.len()],
            pin.left_wild.flipped,
        );
        let bound_b = bind_wildcard(
            cur.right_wild,
            &cur.right[pin.right.len()..],
            pin.right_wild.flipped,
        );

        let out = &self.output;
        let (left_wild, extra_left) = emit_wildcard(out.left_wild, &bound_a, &bound_b, true);
        let (right_wild, extra_right) =
            emit_wildcard(out.right_wild, &bound_a, &bound_b, false);

        let mut left = extra_left;
        for cp in &out.left {
            let pat = substitute(&cp.pat, &binding).ok_or_else(mismatch)?;
            left.push(ConnectedPat::new(pat, cp.direction));
        }
        let mut right = Vec::new();
        for cp in &out.right {
            let pat = substitute(&cp.pat, &binding).ok_or_else(mismatch)?;
            right.push(ConnectedPat::new(pat, cp.direction));
        }
        right.extend(extra_right);

        Ok(AtomicPattern {
            left_wild,
            left,
            right,
            right_wild,
        })
    }

    /// Expand to a ring flex over `num_pats` pats. The wildcards become a
    /// run of hidden pats threaded unchanged (or flipped in place, for a
    /// flex that turns the strip over) between the explicit pats.
    ///
    /// Only expressible when both patterns keep `a` on the left and `b` on
    /// the right with matching flip marks; building blocks like `Ur` have
    /// no ring form.
    pub fn as_flex(
        &self,
        num_pats: usize,
        rotation: FlexRotation,
    ) -> Result<Flex, AtomicError> {
        let cannot = || AtomicError::CannotExpand {
            flex: self.name.clone(),
            num_pats,
        };
        let i = &self.input;
        let o = &self.output;
        let plain_a = Wildcard {
            end: WildcardEnd::A,
            flipped: false,
        };
        let plain_b = Wildcard {
            end: WildcardEnd::B,
            flipped: false,
        };
        if i.left_wild != plain_a || i.right_wild != plain_b {
            return Err(cannot());
        }
        if o.left_wild.end != WildcardEnd::A
            || o.right_wild.end != WildcardEnd::B
            || o.left_wild.flipped != o.right_wild.flipped
        {
            return Err(cannot());
        }
        let explicit = i.left.len() + i.right.len();
        if num_pats < explicit {
            return Err(cannot());
        }
        let hidden = num_pats - explicit;
        let base = i.max_abs_id().max(o.max_abs_id()) + 1;
        let arc: Vec<LeafId> = (0..hidden as LeafId).map(|k| base + k).collect();

        // position 0 is the pat just right of the current position; the
        // hidden arc sits between the b end and the a end
        let mut input: Vec<Pat> = i.right.iter().map(|cp| cp.pat.clone()).collect();
        input.extend(arc.iter().map(|&s| Pat::Leaf(s)));
        input.extend(i.left.iter().map(|cp| cp.pat.clone()));

        let flip_arc = o.left_wild.flipped;
        let mut output: Vec<Pat> = o.right.iter().map(|cp| cp.pat.clone()).collect();
        output.extend(
            arc.iter()
                .map(|&s| Pat::Leaf(if flip_arc { -s } else { s })),
        );
        output.extend(o.left.iter().map(|cp| cp.pat.clone()));

        Flex::with_source(&self.name, input, output, rotation, FlexSource::Formula)
            .map_err(|_| cannot())
    }
}

fn bind_wildcard(
    w: Wildcard,
    surplus: &[ConnectedPat],
    pattern_flipped: bool,
) -> (Wildcard, Vec<ConnectedPat>) {
    let bound = Wildcard {
        end: w.end,
        flipped: w.flipped != pattern_flipped,
    };
    let extras = if pattern_flipped {
        surplus.iter().map(ConnectedPat::flipped).collect()
    } else {
        surplus.to_vec()
    };
    (bound, extras)
}

fn emit_wildcard(
    ow: Wildcard,
    bound_a: &(Wildcard, Vec<ConnectedPat>),
    bound_b: &(Wildcard, Vec<ConnectedPat>),
    position_left: bool,
) -> (Wildcard, Vec<ConnectedPat>) {
    let (mut w, extras) = match ow.end {
        WildcardEnd::A => bound_a.clone(),
        WildcardEnd::B => bound_b.clone(),
    };
    let mut extras: Vec<ConnectedPat> = if ow.flipped {
        w = w.toggled();
        extras.iter().map(ConnectedPat::flipped).collect()
    } else {
        extras
    };
    let captured_left = ow.end == WildcardEnd::A;
    if captured_left != position_left {
        // crossing sides reverses the surplus run and reads each fold
        // from the other side
        extras = extras
            .iter()
            .rev()
            .map(|cp| ConnectedPat::new(cp.pat.clone(), cp.direction.toggled()))
            .collect();
    }
    (w, extras)
}
