//! Match error types.
//!
//! One enum covers every failure an action or query can report. Callers map
//! `code()` to user-facing text and use `is_retryable()` to offer a retry.

use shared_types::{MatchId, ValueError};
use thiserror::Error;

use super::entities::MatchStatus;
use crate::ports::outbound::StoreError;

/// Errors returned by the match store and everything built on it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    /// Unknown match id.
    #[error("match not found: {match_id}")]
    NotFound { match_id: MatchId },

    /// Join attempted on a match whose defender slot is taken.
    #[error("match {match_id} already has a defender")]
    AlreadyFull { match_id: MatchId },

    /// Challenger tried to join their own match.
    #[error("challenger cannot join their own match {match_id}")]
    SelfJoin { match_id: MatchId },

    /// Caller lacks the role or relationship the action needs.
    #[error("forbidden: {reason}")]
    Forbidden { reason: String },

    /// Action is illegal in the current lifecycle state.
    #[error("invalid state {status}: {reason}")]
    InvalidState { status: MatchStatus, reason: String },

    /// Lost a concurrent-mutation race.
    #[error("conflict on match {match_id}: expected version {expected}, found {found}")]
    Conflict {
        match_id: MatchId,
        expected: u64,
        found: u64,
    },

    /// Malformed input or missing required field.
    #[error("validation failed: {reason}")]
    Validation { reason: String },

    /// Storage did not answer in time or failed; safe to retry.
    #[error("store unavailable: {reason}")]
    Unavailable { reason: String },
}

impl MatchError {
    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::Forbidden {
            reason: reason.into(),
        }
    }

    pub fn invalid_state(status: MatchStatus, reason: impl Into<String>) -> Self {
        Self::InvalidState {
            status,
            reason: reason.into(),
        }
    }

    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::AlreadyFull { .. } => "already_full",
            Self::SelfJoin { .. } => "self_join",
            Self::Forbidden { .. } => "forbidden",
            Self::InvalidState { .. } => "invalid_state",
            Self::Conflict { .. } => "conflict",
            Self::Validation { .. } => "validation_error",
            Self::Unavailable { .. } => "unavailable",
        }
    }

    /// True when repeating the request after re-reading state can succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Conflict { .. } | Self::Unavailable { .. })
    }
}

impl From<ValueError> for MatchError {
    fn from(err: ValueError) -> Self {
        Self::validation(err.to_string())
    }
}

impl From<StoreError> for MatchError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(match_id) => Self::NotFound { match_id },
            StoreError::VersionConflict {
                match_id,
                expected,
                found,
            } => Self::Conflict {
                match_id,
                expected,
                found,
            },
            StoreError::DuplicateId(match_id) => Self::Conflict {
                match_id,
                expected: 0,
                found: 0,
            },
            StoreError::Io(reason) | StoreError::Serialization(reason) => {
                Self::Unavailable { reason }
            }
        }
    }
}

/// Result type for match operations.
pub type MatchResult<T> = Result<T, MatchError>;
