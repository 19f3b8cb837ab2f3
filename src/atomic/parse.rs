// Copyright (C) 2025. See LICENSE for details.

//! Text forms for atomic patterns and formulas.
//!
//! Pattern strings are whitespace separated: wildcard, left pats (each a
//! pat literal followed by `>` or `<`), `/`, right pats, wildcard. Pat
//! literals use the bracket notation from [`crate::model::tree`] with no
//! internal spaces, e.g. `a [1,-2] < / 3 > -b`.
//!
//! Formula strings are sequences of: flex names (alphabetic, optional
//! trailing `+` for generate-and-apply, optional `'` for inverse, optional
//! repeat count), the strip operations `>` `<` `^` `~`, and parenthesised
//! groups with a repeat count, e.g. `(Ur>)2`.

use crate::atomic::formula::FormulaOp;
use crate::atomic::{AtomicPattern, ConnectedPat, Direction, Wildcard, WildcardEnd};
use crate::model::tree::{parse_pat, TreeError};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("bad wildcard token {0:?}, expected a, b, -a or -b")]
    BadWildcard(String),

    #[error("pattern needs exactly one `/` separator")]
    BadSeparator,

    #[error("pat {0:?} must be followed by a direction mark `>` or `<`")]
    MissingDirection(String),

    #[error("unexpected character {0:?} in formula")]
    UnexpectedChar(char),

    #[error("parenthesised group must be closed and followed by a repeat count")]
    BadGroup,

    #[error("repeat count {0:?} is out of range")]
    BadRepeat(String),

    #[error(transparent)]
    Tree(#[from] TreeError),
}

fn wildcard_from_token(tok: &str) -> Result<Wildcard, ParseError> {
    let (flipped, rest) = match tok.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, tok),
    };
    let end = match rest {
        "a" => WildcardEnd::A,
        "b" => WildcardEnd::B,
        _ => return Err(ParseError::BadWildcard(tok.to_string())),
    };
    Ok(Wildcard { end, flipped })
}

impl FromStr for AtomicPattern {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, ParseError> {
        let toks: Vec<&str> = s.split_whitespace().collect();
        if toks.len() < 3 {
            return Err(ParseError::BadSeparator);
        }
        let left_wild = wildcard_from_token(toks[0])?;
        let right_wild = wildcard_from_token(toks[toks.len() - 1])?;
        let mid = &toks[1..toks.len() - 1];

        let mut left = Vec::new();
        let mut right = Vec::new();
        let mut seen_separator = false;
        let mut i = 0;
        while i < mid.len() {
            if mid[i] == "/" {
                if seen_separator {
                    return Err(ParseError::BadSeparator);
                }
                seen_separator = true;
                i += 1;
                continue;
            }
            let pat = parse_pat(mid[i])?;
            let direction = match mid.get(i + 1) {
                Some(&">") => Direction::Right,
                Some(&"<") => Direction::Left,
                Some(&"/") => return Err(ParseError::BadSeparator),
                _ => return Err(ParseError::MissingDirection(mid[i].to_string())),
            };
            let side = if seen_separator { &mut right } else { &mut left };
            side.push(ConnectedPat::new(pat, direction));
            i += 2;
        }
        if !seen_separator {
            return Err(ParseError::BadSeparator);
        }
        Ok(AtomicPattern {
            left_wild,
            left,
            right,
            right_wild,
        })
    }
}

impl fmt::Display for Wildcard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.flipped {
            write!(f, "-")?;
        }
        write!(f, "{}", self.end.as_char())
    }
}

impl fmt::Display for AtomicPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.left_wild)?;
        for cp in &self.left {
            write!(f, " {} {}", cp.pat, cp.direction.as_char())?;
        }
        write!(f, " /")?;
        for cp in &self.right {
            write!(f, " {} {}", cp.pat, cp.direction.as_char())?;
        }
        write!(f, " {}", self.right_wild)
    }
}

/// Parse a formula into its operation sequence. Repeats are unrolled.
pub fn parse_formula(s: &str) -> Result<Vec<FormulaOp>, ParseError> {
    let chars: Vec<char> = s.chars().collect();
    parse_ops(&chars)
}

fn parse_ops(chars: &[char]) -> Result<Vec<FormulaOp>, ParseError> {
    let mut ops = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            c if c.is_whitespace() => i += 1,
            '>' => {
                ops.push(FormulaOp::ShiftRight);
                i += 1;
            }
            '<' => {
                ops.push(FormulaOp::ShiftLeft);
                i += 1;
            }
            '^' => {
                ops.push(FormulaOp::ReverseEnds);
                i += 1;
            }
            '~' => {
                ops.push(FormulaOp::TurnOver);
                i += 1;
            }
            '(' => {
                let close = matching_paren(chars, i)?;
                let inner = parse_ops(&chars[i + 1..close])?;
                let (count, next) = read_count(chars, close + 1)?;
                let count = count.ok_or(ParseError::BadGroup)?;
                for _ in 0..count {
                    ops.extend(inner.iter().cloned());
                }
                i = next;
            }
            c if c.is_ascii_alphabetic() => {
                let mut j = i;
                while j < chars.len() && chars[j].is_ascii_alphabetic() {
                    j += 1;
                }
                let name: String = chars[i..j].iter().collect();
                let mut create = false;
                if chars.get(j) == Some(&'+') {
                    create = true;
                    j += 1;
                }
                let mut inverse = false;
                if chars.get(j) == Some(&'\'') {
                    inverse = true;
                    j += 1;
                }
                let (count, next) = read_count(chars, j)?;
                let op = FormulaOp::Apply {
                    name,
                    inverse,
                    create,
                };
                for _ in 0..count.unwrap_or(1) {
                    ops.push(op.clone());
                }
                i = next;
            }
            c => return Err(ParseError::UnexpectedChar(c)),
        }
    }
    Ok(ops)
}

fn matching_paren(chars: &[char], open: usize) -> Result<usize, ParseError> {
    let mut depth = 0;
    for (i, &c) in chars.iter().enumerate().skip(open) {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(i);
                }
            }
            _ => {}
        }
    }
    Err(ParseError::BadGroup)
}

fn read_count(chars: &[char], mut i: usize) -> Result<(Option<usize>, usize), ParseError> {
    let start = i;
    while i < chars.len() && chars[i].is_ascii_digit() {
        i += 1;
    }
    if i == start {
        return Ok((None, i));
    }
    let digits: String = chars[start..i].iter().collect();
    let n: usize = digits.parse().map_err(|_| ParseError::BadRepeat(digits))?;
    Ok((Some(n), i))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_round_trip() {
        for s in [
            "a / b",
            "a / 1 > 2 < -b",
            "a [-5,-4] < 3 > / 1 > 2 < b",
            "b [2,-1] < / -3 > -a",
        ] {
            let p: AtomicPattern = s.parse().unwrap();
            assert_eq!(p.to_string(), s);
        }
    }

    #[test]
    fn test_pattern_errors() {
        assert!(matches!(
            "x / b".parse::<AtomicPattern>(),
            Err(ParseError::BadWildcard(_))
        ));
        assert_eq!("a 1 > b".parse::<AtomicPattern>(), Err(ParseError::BadSeparator));
        assert_eq!(
            "a / 1 / b".parse::<AtomicPattern>(),
            Err(ParseError::BadSeparator)
        );
        assert!(matches!(
            "a / 1 b".parse::<AtomicPattern>(),
            Err(ParseError::MissingDirection(_))
        ));
    }

    #[test]
    fn test_formula_ops() {
        let ops = parse_formula("~ Ur ~").unwrap();
        assert_eq!(ops.len(), 3);
        assert_eq!(ops[0], FormulaOp::TurnOver);
        assert_eq!(
            ops[1],
            FormulaOp::Apply {
                name: "Ur".to_string(),
                inverse: false,
                create: false
            }
        );
    }

    #[test]
    fn test_formula_inverse_and_create() {
        let ops = parse_formula("Xl' P+").unwrap();
        assert_eq!(
            ops[0],
            FormulaOp::Apply {
                name: "Xl".to_string(),
                inverse: true,
                create: false
            }
        );
        assert_eq!(
            ops[1],
            FormulaOp::Apply {
                name: "P".to_string(),
                inverse: false,
                create: true
            }
        );
    }

    #[test]
    fn test_formula_repeats() {
        assert_eq!(parse_formula("(Ur>)2").unwrap(), parse_formula("Ur > Ur >").unwrap());
        assert_eq!(parse_formula("Ur2").unwrap(), parse_formula("Ur Ur").unwrap());
        assert_eq!(parse_formula("Ur'2").unwrap(), parse_formula("Ur' Ur'").unwrap());
    }

    #[test]
    fn test_formula_errors() {
        assert_eq!(parse_formula("(Ur"), Err(ParseError::BadGroup));
        assert_eq!(parse_formula("(Ur)"), Err(ParseError::BadGroup));
        assert_eq!(parse_formula("P ?"), Err(ParseError::UnexpectedChar('?')));
    }

    #[test]
    fn test_formula_repeat_overflow() {
        let digits = "9".repeat(40);
        assert_eq!(
            parse_formula(&format!("Ur{digits}")),
            Err(ParseError::BadRepeat(digits.clone()))
        );
        assert_eq!(
            parse_formula(&format!("(Ur>){digits}")),
            Err(ParseError::BadRepeat(digits))
        );
    }
}
