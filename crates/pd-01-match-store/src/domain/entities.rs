//! Core domain entities for the Match Store.
//!
//! The lifecycle transitions live in `lifecycle.rs`; this file holds the
//! record shapes and read accessors.

use serde::{Deserialize, Serialize};
use shared_types::{
    Direction, FinalScore, Identity, MatchId, Role, Timestamp, UserId, Winner, SHOTS_PER_PLAYER,
};
use std::fmt;

/// Lifecycle status of a match.
///
/// ```text
/// [AWAITING_OPPONENT] ──join──→ [ACTIVE] ──both sequences complete──→ [FINISHED]
///        │                         │
///        └──cancel──→ [CANCELLED]  └──decline (no saves yet)──→ [DECLINED]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    AwaitingOpponent,
    Active,
    Finished,
    Cancelled,
    Declined,
}

impl MatchStatus {
    /// Terminal statuses accept no further mutation.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            MatchStatus::Finished | MatchStatus::Cancelled | MatchStatus::Declined
        )
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MatchStatus::AwaitingOpponent => "awaiting_opponent",
            MatchStatus::Active => "active",
            MatchStatus::Finished => "finished",
            MatchStatus::Cancelled => "cancelled",
            MatchStatus::Declined => "declined",
        };
        f.write_str(name)
    }
}

/// One side of a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub identity: Identity,
    /// Submitted choices in order, never longer than `SHOTS_PER_PLAYER`.
    pub choices: Vec<Direction>,
}

impl Participant {
    pub fn new(identity: Identity) -> Self {
        Self {
            identity,
            choices: Vec::with_capacity(SHOTS_PER_PLAYER),
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.identity.user_id
    }

    pub fn choice_count(&self) -> usize {
        self.choices.len()
    }

    pub fn is_complete(&self) -> bool {
        self.choices.len() >= SHOTS_PER_PLAYER
    }
}

/// Result recorded on entry to `Finished`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchOutcome {
    pub score: FinalScore,
    pub finished_at: Timestamp,
}

/// Status change requested through `set_status`, carrying the data the
/// target status needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusChange {
    /// `AwaitingOpponent → Cancelled`, challenger only.
    Cancel { requester: UserId },
    /// `Active → Declined`, defender only, before any save was submitted.
    Decline { requester: UserId },
    /// `Active → Finished` once both sequences are complete.
    Finish { score: FinalScore },
}

impl StatusChange {
    pub fn target(&self) -> MatchStatus {
        match self {
            StatusChange::Cancel { .. } => MatchStatus::Cancelled,
            StatusChange::Decline { .. } => MatchStatus::Declined,
            StatusChange::Finish { .. } => MatchStatus::Finished,
        }
    }
}

/// A penalty duel between a challenger and (eventually) a defender.
///
/// INVARIANTS:
/// - defender is `None` while `AwaitingOpponent`, `Some` once `Active`
/// - choice sequences only grow and never exceed `SHOTS_PER_PLAYER`
/// - `outcome` (winner + finished_at) is set once, on entry to `Finished`
/// - `version` increases by one on every committed mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub(crate) id: MatchId,
    pub(crate) status: MatchStatus,
    pub(crate) challenger: Participant,
    pub(crate) defender: Option<Participant>,
    pub(crate) created_at: Timestamp,
    pub(crate) outcome: Option<MatchOutcome>,
    /// When the match was cancelled or declined.
    pub(crate) closed_at: Option<Timestamp>,
    pub(crate) version: u64,
}

impl Match {
    pub fn id(&self) -> &MatchId {
        &self.id
    }

    pub fn status(&self) -> MatchStatus {
        self.status
    }

    pub fn challenger(&self) -> &Participant {
        &self.challenger
    }

    pub fn defender(&self) -> Option<&Participant> {
        self.defender.as_ref()
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn outcome(&self) -> Option<&MatchOutcome> {
        self.outcome.as_ref()
    }

    pub fn finished_at(&self) -> Option<Timestamp> {
        self.outcome.map(|o| o.finished_at)
    }

    pub fn winner(&self) -> Option<Winner> {
        self.outcome.map(|o| o.score.winner)
    }

    pub fn closed_at(&self) -> Option<Timestamp> {
        self.closed_at
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn participant(&self, role: Role) -> Option<&Participant> {
        match role {
            Role::Challenger => Some(&self.challenger),
            Role::Defender => self.defender.as_ref(),
        }
    }

    pub(crate) fn participant_mut(&mut self, role: Role) -> Option<&mut Participant> {
        match role {
            Role::Challenger => Some(&mut self.challenger),
            Role::Defender => self.defender.as_mut(),
        }
    }

    /// Role the user holds in this match, if any.
    pub fn role_of(&self, user: &UserId) -> Option<Role> {
        if self.challenger.user_id() == user {
            Some(Role::Challenger)
        } else if self.defender.as_ref().map(Participant::user_id) == Some(user) {
            Some(Role::Defender)
        } else {
            None
        }
    }

    pub fn involves(&self, user: &UserId) -> bool {
        self.role_of(user).is_some()
    }

    /// Identity of whoever plays opposite `role`.
    pub fn counterpart_of(&self, role: Role) -> Option<&Identity> {
        self.participant(role.opponent()).map(|p| &p.identity)
    }

    pub fn choice_count(&self, role: Role) -> usize {
        self.participant(role).map_or(0, Participant::choice_count)
    }

    /// Both sequences hold all their choices.
    pub fn is_complete(&self) -> bool {
        self.challenger.is_complete() && self.defender.as_ref().is_some_and(Participant::is_complete)
    }
}
