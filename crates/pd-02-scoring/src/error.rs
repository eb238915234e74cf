//! Error types for the Scoring Engine.

use pd_01_match_store::MatchError;
use shared_types::{MatchId, Role};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    /// A choice sequence does not hold exactly one entry per shot.
    #[error("{role} sequence has {found} choices, expected {expected}")]
    SequenceLength {
        role: Role,
        expected: usize,
        found: usize,
    },

    /// Scoring was requested before a defender joined.
    #[error("match {match_id} has no defender")]
    MissingDefender { match_id: MatchId },

    /// Rule set that cannot produce meaningful scores.
    #[error("invalid scoring rules: {reason}")]
    InvalidRules { reason: String },
}

pub type ScoringResult<T> = Result<T, ScoringError>;

impl From<ScoringError> for MatchError {
    fn from(err: ScoringError) -> Self {
        MatchError::validation(err.to_string())
    }
}
