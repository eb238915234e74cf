//! # Inbound Port - ActionApi
//!
//! Entry point used by presentation. Every operation runs its store round
//! trips under the configured timeout; expiry reports `Unavailable`.

use async_trait::async_trait;
use pd_01_match_store::MatchResult;
use pd_02_scoring::{LeaderboardEntry, PlayerStats};
use pd_03_challenge_classifier::ChallengeView;
use shared_types::{Direction, Identity, MatchId, Role};
use std::collections::HashSet;

use crate::domain::{ActionCommand, ActionEnvelope, MatchProjection};

#[async_trait]
pub trait ActionApi: Send + Sync {
    /// Validates and executes a wire request.
    async fn handle(&self, envelope: ActionEnvelope) -> MatchResult<MatchProjection> {
        let command = envelope.into_command()?;
        self.execute(command).await
    }

    /// Executes a validated command.
    async fn execute(&self, command: ActionCommand) -> MatchResult<MatchProjection>;

    /// Opens a new challenge.
    async fn create(&self, identity: Identity) -> MatchResult<MatchProjection> {
        self.execute(ActionCommand::Create { identity }).await
    }

    /// # Errors
    /// - `NotFound`, `AlreadyFull`, `SelfJoin`, `InvalidState`, `Conflict`
    async fn join(&self, match_id: MatchId, identity: Identity) -> MatchResult<MatchProjection> {
        self.execute(ActionCommand::Join { match_id, identity }).await
    }

    /// # Errors
    /// - `Forbidden` unless the requester is the defender of an active match
    ///   who has not saved yet
    async fn decline(&self, match_id: MatchId, identity: Identity) -> MatchResult<MatchProjection> {
        self.execute(ActionCommand::Decline { match_id, identity }).await
    }

    /// # Errors
    /// - `Forbidden` unless the requester is the challenger of a match still
    ///   awaiting an opponent
    async fn cancel(&self, match_id: MatchId, identity: Identity) -> MatchResult<MatchProjection> {
        self.execute(ActionCommand::Cancel { match_id, identity }).await
    }

    /// Appends one choice; the final one scores and finishes the match in the
    /// same commit.
    ///
    /// # Errors
    /// - `InvalidState` on a closed match or a full sequence
    /// - `Forbidden` if `role` is not the caller's role
    /// - `Conflict` when another write landed first
    async fn submit_choice(
        &self,
        match_id: MatchId,
        identity: Identity,
        role: Option<Role>,
        choice: Direction,
    ) -> MatchResult<MatchProjection> {
        self.execute(ActionCommand::SubmitChoice {
            match_id,
            identity,
            role,
            choice,
        })
        .await
    }

    /// Projection of one match for `viewer`.
    async fn view(&self, viewer: &Identity, match_id: &MatchId) -> MatchResult<MatchProjection>;

    /// Challenge list of `viewer`.
    async fn classify(
        &self,
        viewer: &Identity,
        viewed: &HashSet<MatchId>,
    ) -> MatchResult<Vec<ChallengeView>>;

    async fn player_stats(&self, identity: &Identity) -> MatchResult<PlayerStats>;

    async fn leaderboard(&self, limit: usize) -> MatchResult<Vec<LeaderboardEntry>>;
}
