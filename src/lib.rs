// Copyright (C) 2025. See LICENSE for details.

//! Flexagon flex transformation and state-space exploration engine.
//!
//! A flexagon state is a ring of *pats* (recursively nested stacks of
//! leaves); a *flex* is a named transformation matching a pattern against
//! the ring and rebuilding it.
//!
//! # Architecture
//!
//! ## Structural core (pure values)
//!
//! - [`model`] - pats, the flexagon ring, and the literal notation parser
//! - [`flex`] - pattern unification, flex application over every
//!   rotation/reflection of the ring, and the flex set registry
//! - [`atomic`] - the atomic pattern algebra and formula interpreter used
//!   at setup time to derive composite flexes, plus the base library
//!
//! ## Stateful layers (one owner, linear mutation)
//!
//! - [`tracker`] - canonical state identity under rotation, reflection and
//!   turning over
//! - [`explore`] - resumable breadth-first enumeration of every state
//!   reachable through a flex set
//! - [`manager`] - interactive facade with undo/redo history
//!
//! Everything is synchronous and single-threaded; exploration is resumable
//! by construction (`check_next` does one state per call) rather than
//! through any background execution.

pub mod atomic;
pub mod explore;
pub mod flex;
pub mod manager;
pub mod model;
pub mod tracker;

// Re-export commonly used types
pub use atomic::{make_atomic_flexes, AtomicFlex, AtomicPattern};
pub use explore::Explore;
pub use flex::{Flex, FlexError, FlexRotation, FlexSet};
pub use manager::FlexagonManager;
pub use model::{Flexagon, Pat};
pub use tracker::Tracker;
