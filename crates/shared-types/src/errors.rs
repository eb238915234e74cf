//! # Error Types
//!
//! Validation errors raised while building shared values from untrusted input.

use thiserror::Error;

/// Errors raised when parsing or validating shared values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    /// User id is empty after trimming.
    #[error("user id must not be empty")]
    EmptyUserId,

    /// User id exceeds the maximum length.
    #[error("user id is {len} bytes, maximum is {max}")]
    UserIdTooLong { len: usize, max: usize },

    /// Display name is empty after trimming.
    #[error("display name must not be empty")]
    EmptyDisplayName,

    /// Match id is empty or contains whitespace.
    #[error("malformed match id: {0:?}")]
    MalformedMatchId(String),

    /// Direction string is not part of the direction space.
    #[error("unknown direction: {0:?}")]
    UnknownDirection(String),

    /// Role string is neither challenger nor defender.
    #[error("unknown role: {0:?}")]
    UnknownRole(String),
}
