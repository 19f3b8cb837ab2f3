// Copyright (C) 2025. See LICENSE for details.

//! Data model for flexagons.
//!
//! Leaves-first:
//! - `Leaf`: a signed integer id; the sign is the face-up/face-down orientation.
//! - `Pat`: one stack of folded leaves, a recursive tree.
//! - `Flexagon`: an ordered circular ring of pats.
//!
//! `tree` parses the literal notation (`[[1,2],3,[4,5],6]`) used to
//! construct flexagons and pat tokens.

pub mod flexagon;
pub mod pat;
pub mod tree;

pub use flexagon::Flexagon;
pub use pat::{LeafId, Pat};
pub use tree::TreeError;
