//! Category of a match as seen by one viewer.
//!
//! ```text
//! status             viewer       condition                      category
//! ─────────────────  ───────────  ─────────────────────────────  ──────────────────
//! AwaitingOpponent   challenger                                  cancelable
//! Active             defender     no saves yet, defender's turn  invitation
//! Active             defender     some saves, defender's turn    active
//! Active             challenger                                  waiting_for_opponent
//! Finished           either       recent and not viewed          finished_recent
//! ```
//!
//! Every other combination is omitted.

use pd_01_match_store::{Match, MatchStatus};
use serde::{Deserialize, Serialize};
use shared_types::{MatchId, Role, Timestamp, UserId};
use std::collections::HashSet;
use std::fmt;

use crate::config::ClassifierConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeCategory {
    Invitation,
    Active,
    WaitingForOpponent,
    Cancelable,
    FinishedRecent,
}

impl fmt::Display for ChallengeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChallengeCategory::Invitation => "invitation",
            ChallengeCategory::Active => "active",
            ChallengeCategory::WaitingForOpponent => "waiting_for_opponent",
            ChallengeCategory::Cancelable => "cancelable",
            ChallengeCategory::FinishedRecent => "finished_recent",
        };
        f.write_str(name)
    }
}

/// Role and category of `record` for `viewer`, or `None` if it is not shown.
pub fn categorize(
    record: &Match,
    viewer: &UserId,
    viewed: &HashSet<MatchId>,
    now: Timestamp,
    config: &ClassifierConfig,
) -> Option<(Role, ChallengeCategory)> {
    let role = record.role_of(viewer)?;

    let category = match (record.status(), role) {
        (MatchStatus::AwaitingOpponent, Role::Challenger) => ChallengeCategory::Cancelable,
        (MatchStatus::AwaitingOpponent, Role::Defender) => return None,
        (MatchStatus::Active, Role::Defender) => {
            let saves = record.choice_count(Role::Defender);
            let shots = record.choice_count(Role::Challenger);
            if saves == 0 {
                ChallengeCategory::Invitation
            } else if saves < shots {
                ChallengeCategory::Active
            } else {
                return None;
            }
        }
        (MatchStatus::Active, Role::Challenger) => {
            if record.defender().is_none() || record.outcome().is_some() {
                return None;
            }
            ChallengeCategory::WaitingForOpponent
        }
        (MatchStatus::Finished, _) => {
            let finished_at = record.finished_at()?;
            if viewed.contains(record.id()) || !config.is_recent(finished_at, now) {
                return None;
            }
            ChallengeCategory::FinishedRecent
        }
        (MatchStatus::Cancelled | MatchStatus::Declined, _) => return None,
    };

    Some((role, category))
}
