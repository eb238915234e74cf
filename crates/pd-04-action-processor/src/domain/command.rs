//! Action requests.
//!
//! `ActionEnvelope` is the wire shape (JSON, camelCase); `ActionCommand` is
//! the validated form the processor executes.
//!
//! ```json
//! {"action": "submit-choice", "matchId": "…", "choice": "left",
//!  "role": "challenger", "identity": {"userId": "…", "displayName": "…"}}
//! ```

use pd_01_match_store::{MatchError, MatchResult};
use serde::{Deserialize, Serialize};
use shared_types::{Direction, Identity, MatchId, Role};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    Create,
    Join,
    DeclineChallenge,
    CancelChallenge,
    SubmitChoice,
}

impl ActionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Create => "create",
            ActionKind::Join => "join",
            ActionKind::DeclineChallenge => "decline-challenge",
            ActionKind::CancelChallenge => "cancel-challenge",
            ActionKind::SubmitChoice => "submit-choice",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tagged action request as received from presentation.
///
/// Optional fields stay raw strings so that malformed values surface as
/// `Validation` errors instead of deserialization failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionEnvelope {
    pub action: ActionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choice: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub identity: Identity,
}

/// Validated action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionCommand {
    Create {
        identity: Identity,
    },
    Join {
        match_id: MatchId,
        identity: Identity,
    },
    Decline {
        match_id: MatchId,
        identity: Identity,
    },
    Cancel {
        match_id: MatchId,
        identity: Identity,
    },
    SubmitChoice {
        match_id: MatchId,
        identity: Identity,
        /// Claimed role; must equal the caller's role when given.
        role: Option<Role>,
        choice: Direction,
    },
}

impl ActionCommand {
    pub fn kind(&self) -> ActionKind {
        match self {
            ActionCommand::Create { .. } => ActionKind::Create,
            ActionCommand::Join { .. } => ActionKind::Join,
            ActionCommand::Decline { .. } => ActionKind::DeclineChallenge,
            ActionCommand::Cancel { .. } => ActionKind::CancelChallenge,
            ActionCommand::SubmitChoice { .. } => ActionKind::SubmitChoice,
        }
    }

    pub fn identity(&self) -> &Identity {
        match self {
            ActionCommand::Create { identity }
            | ActionCommand::Join { identity, .. }
            | ActionCommand::Decline { identity, .. }
            | ActionCommand::Cancel { identity, .. }
            | ActionCommand::SubmitChoice { identity, .. } => identity,
        }
    }

    pub fn match_id(&self) -> Option<&MatchId> {
        match self {
            ActionCommand::Create { .. } => None,
            ActionCommand::Join { match_id, .. }
            | ActionCommand::Decline { match_id, .. }
            | ActionCommand::Cancel { match_id, .. }
            | ActionCommand::SubmitChoice { match_id, .. } => Some(match_id),
        }
    }
}

impl ActionEnvelope {
    /// Validates fields required by `action`.
    ///
    /// # Errors
    /// - `Validation`: invalid identity, missing or malformed match id,
    ///   choice or role
    pub fn into_command(self) -> MatchResult<ActionCommand> {
        self.identity.validate()?;
        let action = self.action;
        let identity = self.identity;

        if action == ActionKind::Create {
            return Ok(ActionCommand::Create { identity });
        }

        let raw_id = self
            .match_id
            .ok_or_else(|| MatchError::validation(format!("{action} requires matchId")))?;
        let match_id = MatchId::parse(&raw_id)?;

        Ok(match action {
            ActionKind::Create => ActionCommand::Create { identity },
            ActionKind::Join => ActionCommand::Join { match_id, identity },
            ActionKind::DeclineChallenge => ActionCommand::Decline { match_id, identity },
            ActionKind::CancelChallenge => ActionCommand::Cancel { match_id, identity },
            ActionKind::SubmitChoice => {
                let choice = self
                    .choice
                    .ok_or_else(|| MatchError::validation("submit-choice requires choice"))?
                    .parse::<Direction>()?;
                let role = self.role.map(|r| r.parse::<Role>()).transpose()?;
                ActionCommand::SubmitChoice {
                    match_id,
                    identity,
                    role,
                    choice,
                }
            }
        })
    }
}
