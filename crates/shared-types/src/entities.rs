//! # Core Domain Entities
//!
//! ## Clusters
//!
//! - **Participants**: `UserId`, `Identity`, `Role`
//! - **Matches**: `MatchId`, `Timestamp`
//! - **Play**: `Direction`, `SHOTS_PER_PLAYER`
//! - **Outcome**: `Winner`, `FinalScore`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::ValueError;

/// Timestamp in milliseconds since UNIX epoch.
pub type Timestamp = u64;

/// Number of choices each participant submits in one match.
pub const SHOTS_PER_PLAYER: usize = 5;

/// Longest accepted user id (an e-mail address at most).
pub const MAX_USER_ID_LEN: usize = 320;

// =============================================================================
// PARTICIPANTS
// =============================================================================

/// Opaque user identifier supplied by the session collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Builds a validated user id. Surrounding whitespace is dropped.
    pub fn parse(raw: &str) -> Result<Self, ValueError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValueError::EmptyUserId);
        }
        if trimmed.len() > MAX_USER_ID_LEN {
            return Err(ValueError::UserIdTooLong {
                len: trimmed.len(),
                max: MAX_USER_ID_LEN,
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = ValueError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Caller identity as handed over by authentication.
///
/// The core authorizes relative to match roles only; it never checks
/// credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub user_id: UserId,
    pub display_name: String,
    /// Avatar reference, opaque to the core.
    #[serde(default)]
    pub avatar: String,
}

impl Identity {
    pub fn new(
        user_id: &str,
        display_name: impl Into<String>,
        avatar: impl Into<String>,
    ) -> Result<Self, ValueError> {
        let identity = Self {
            user_id: UserId::parse(user_id)?,
            display_name: display_name.into(),
            avatar: avatar.into(),
        };
        identity.validate()?;
        Ok(identity)
    }

    /// Re-checks an identity that arrived through deserialization.
    pub fn validate(&self) -> Result<(), ValueError> {
        UserId::parse(self.user_id.as_str())?;
        if self.display_name.trim().is_empty() {
            return Err(ValueError::EmptyDisplayName);
        }
        Ok(())
    }
}

/// Role a participant holds in a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Creates the match and takes the shots.
    Challenger,
    /// Joins the match and attempts the saves.
    Defender,
}

impl Role {
    pub fn opponent(self) -> Role {
        match self {
            Role::Challenger => Role::Defender,
            Role::Defender => Role::Challenger,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Challenger => f.write_str("challenger"),
            Role::Defender => f.write_str("defender"),
        }
    }
}

impl FromStr for Role {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "challenger" => Ok(Role::Challenger),
            "defender" => Ok(Role::Defender),
            _ => Err(ValueError::UnknownRole(s.to_string())),
        }
    }
}

// =============================================================================
// MATCHES
// =============================================================================

/// Opaque match identifier, generated once and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MatchId(String);

impl MatchId {
    /// Generates a fresh id (UUID v4, simple form).
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Accepts an id received from a caller.
    pub fn parse(raw: &str) -> Result<Self, ValueError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
            return Err(ValueError::MalformedMatchId(raw.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for MatchId {
    type Error = ValueError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw)
    }
}

impl From<MatchId> for String {
    fn from(id: MatchId) -> Self {
        id.0
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// PLAY
// =============================================================================

/// Shot or dive direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Center,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 3] = [Direction::Left, Direction::Center, Direction::Right];
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => f.write_str("left"),
            Direction::Center => f.write_str("center"),
            Direction::Right => f.write_str("right"),
        }
    }
}

impl FromStr for Direction {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Direction::Left),
            "center" | "centre" | "middle" => Ok(Direction::Center),
            "right" => Ok(Direction::Right),
            _ => Err(ValueError::UnknownDirection(s.to_string())),
        }
    }
}

// =============================================================================
// OUTCOME
// =============================================================================

/// Who won a finished match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Challenger,
    Defender,
    Draw,
}

impl Winner {
    /// The winning role, `None` for a draw.
    pub fn role(self) -> Option<Role> {
        match self {
            Winner::Challenger => Some(Role::Challenger),
            Winner::Defender => Some(Role::Defender),
            Winner::Draw => None,
        }
    }
}

/// Bonus-inclusive final scores of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalScore {
    pub challenger_score: u32,
    pub defender_score: u32,
    pub winner: Winner,
}

impl FinalScore {
    pub fn score_for(&self, role: Role) -> u32 {
        match role {
            Role::Challenger => self.challenger_score,
            Role::Defender => self.defender_score,
        }
    }
}
