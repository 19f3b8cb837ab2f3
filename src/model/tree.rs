// Copyright (C) 2025. See LICENSE for details.

//! Parser for the flexagon literal notation.
//!
//! A literal is a nested bracket expression where each element is either a
//! signed integer (a single leaf) or a nested list (a folded pat):
//! `[[1,2],3,[4,5],6]`. The same token syntax is used for pat tokens inside
//! atomic pattern strings, so the atomic parser reuses this module.

use crate::model::Pat;
use thiserror::Error;

/// Failures parsing a pat or flexagon literal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("unbalanced brackets in {0:?}")]
    UnbalancedBrackets(String),
    #[error("expected a signed integer, found {0:?}")]
    BadLeafId(String),
    #[error("leaf ids must be nonzero")]
    ZeroLeafId,
    #[error("unexpected trailing input {0:?}")]
    TrailingInput(String),
    #[error("a flexagon literal must be a bracketed list of pats")]
    NotAList,
}

/// Parse one pat token, e.g. `-3` or `[1,[2,-3]]`. No interior whitespace.
pub fn parse_pat(input: &str) -> Result<Pat, TreeError> {
    let (pat, rest) = parse_node(input)?;
    if !rest.is_empty() {
        return Err(TreeError::TrailingInput(rest.to_string()));
    }
    Ok(pat)
}

/// Parse a whole flexagon literal: a bracketed list of pat tokens.
pub fn parse_pat_list(input: &str) -> Result<Vec<Pat>, TreeError> {
    match parse_pat(input.trim())? {
        Pat::Group(pats) => Ok(pats),
        Pat::Leaf(_) => Err(TreeError::NotAList),
    }
}

fn parse_node(input: &str) -> Result<(Pat, &str), TreeError> {
    if let Some(mut rest) = input.strip_prefix('[') {
        let mut children = Vec::new();
        loop {
            let (child, after) = parse_node(rest)?;
            children.push(child);
            if let Some(after_comma) = after.strip_prefix(',') {
                rest = after_comma;
            } else if let Some(after_close) = after.strip_prefix(']') {
                return Ok((Pat::Group(children), after_close));
            } else {
                return Err(TreeError::UnbalancedBrackets(input.to_string()));
            }
        }
    }

    let digits_end = input
        .char_indices()
        .find(|&(i, c)| !(c == '-' && i == 0) && !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(input.len());
    let (num, rest) = input.split_at(digits_end);
    let id: i32 = num
        .parse()
        .map_err(|_| TreeError::BadLeafId(input.to_string()))?;
    if id == 0 {
        return Err(TreeError::ZeroLeafId);
    }
    Ok((Pat::Leaf(id), rest))
}
