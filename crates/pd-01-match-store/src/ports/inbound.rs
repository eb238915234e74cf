//! # Inbound Port - MatchStoreApi
//!
//! Primary driving port of the Match Store. Each mutation loads the record,
//! runs one lifecycle transition and commits with a version check, so a
//! concurrent writer either sees the committed state or gets `Conflict`.

use async_trait::async_trait;
use shared_types::{Direction, Identity, MatchId, Role, UserId};

use crate::domain::{Match, MatchResult, StatusChange};

#[async_trait]
pub trait MatchStoreApi: Send + Sync {
    /// Opens a match for `challenger`.
    ///
    /// # Errors
    /// - `Validation`: invalid identity
    async fn create(&self, challenger: Identity) -> MatchResult<Match>;

    /// # Errors
    /// - `NotFound`: unknown id
    async fn get(&self, id: &MatchId) -> MatchResult<Match>;

    /// # Errors
    /// - `NotFound`, `AlreadyFull`, `SelfJoin`, `InvalidState`, `Conflict`
    async fn join(&self, id: &MatchId, defender: Identity) -> MatchResult<Match>;

    /// # Errors
    /// - `NotFound`, `InvalidState`, `Conflict`
    async fn record_choice(&self, id: &MatchId, role: Role, choice: Direction)
        -> MatchResult<Match>;

    /// # Errors
    /// - `NotFound`, `Forbidden`, `InvalidState`, `Conflict`
    async fn set_status(&self, id: &MatchId, change: StatusChange) -> MatchResult<Match>;

    /// Matches where `user` is challenger or defender.
    async fn list_for_user(&self, user: &UserId) -> MatchResult<Vec<Match>>;
}
