// Copyright (C) 2025. See LICENSE for details.

//! Error codes for flex lookup and application.

use thiserror::Error;

/// Tagged failure codes returned by flex application and the manager.
///
/// Every failure leaves the flexagon, flex set and history exactly as they
/// were before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlexError {
    /// The name is not present in the active flex set.
    #[error("unknown flex {0:?}")]
    UnknownFlex(String),

    /// The flex's input pattern matches no rotation (or reflection) of the
    /// current pat ring.
    #[error("flex {0:?} cannot be applied to the current flexagon")]
    CantApplyFlex(String),

    /// The flex definition itself is unusable: its output references a leaf
    /// slot the input never binds. Caught at construction time.
    #[error("flex {flex:?} output references slot {slot} missing from its input")]
    BadDefinition { flex: String, slot: i32 },

    /// A flex sequence string did not parse.
    #[error("cannot parse flex sequence {0:?}")]
    BadFlexSequence(String),
}
