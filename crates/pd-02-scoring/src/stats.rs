//! Player statistics and leaderboard over finished matches.
//!
//! Points come from the final scores stored with each outcome, so a later
//! change to `ScoringRules` never rewrites history. Goals and saves are
//! recounted from the stored choices with the judge.

use pd_01_match_store::{Match, MatchStatus};
use serde::Serialize;
use shared_types::{Identity, Role, Timestamp, UserId, Winner, SHOTS_PER_PLAYER};
use std::collections::HashMap;

use crate::judge::OutcomeJudge;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub identity: Identity,
    pub games_played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub total_points: u64,
    pub goals_scored: u32,
    pub saves_made: u32,
    pub perfect_rounds: u32,
}

impl PlayerStats {
    pub fn empty(identity: Identity) -> Self {
        Self {
            identity,
            games_played: 0,
            wins: 0,
            draws: 0,
            losses: 0,
            total_points: 0,
            goals_scored: 0,
            saves_made: 0,
            perfect_rounds: 0,
        }
    }

    /// Aggregates every finished match of `identity` in `matches`.
    /// Matches in any other status, or without the user, are skipped.
    pub fn from_matches<'a, I, J>(identity: &Identity, matches: I, judge: &J) -> Self
    where
        I: IntoIterator<Item = &'a Match>,
        J: OutcomeJudge,
    {
        let mut stats = Self::empty(identity.clone());
        for record in matches {
            if let Some(role) = record.role_of(&identity.user_id) {
                stats.record(record, role, judge);
            }
        }
        stats
    }

    pub fn user_id(&self) -> &UserId {
        &self.identity.user_id
    }

    /// Share of games won, 0.0 with no games.
    pub fn win_rate(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        f64::from(self.wins) / f64::from(self.games_played)
    }

    fn record<J: OutcomeJudge>(&mut self, record: &Match, role: Role, judge: &J) {
        let (Some(outcome), Some(defender)) = (record.outcome(), record.defender()) else {
            return;
        };
        if record.status() != MatchStatus::Finished {
            return;
        }

        self.games_played += 1;
        self.total_points += u64::from(outcome.score.score_for(role));
        match outcome.score.winner {
            Winner::Draw => self.draws += 1,
            winner if winner.role() == Some(role) => self.wins += 1,
            _ => self.losses += 1,
        }

        let saves = record
            .challenger()
            .choices
            .iter()
            .zip(&defender.choices)
            .filter(|(shot, dive)| judge.is_save(**shot, **dive))
            .count() as u32;
        let shots = record.challenger().choice_count().min(defender.choice_count()) as u32;

        let made = match role {
            Role::Challenger => {
                let goals = shots - saves;
                self.goals_scored += goals;
                goals
            }
            Role::Defender => {
                self.saves_made += saves;
                saves
            }
        };
        if made as usize == SHOTS_PER_PLAYER {
            self.perfect_rounds += 1;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    /// 1-based position.
    pub rank: usize,
    #[serde(flatten)]
    pub stats: PlayerStats,
}

/// Ranks every player found in `matches` by total points (desc), then wins
/// (desc), then user id (asc), keeping the first `limit` entries.
///
/// Each player is listed under the identity of their most recent finished
/// match.
pub fn leaderboard<J: OutcomeJudge>(
    matches: &[Match],
    limit: usize,
    judge: &J,
) -> Vec<LeaderboardEntry> {
    let mut latest: HashMap<UserId, (Timestamp, Identity)> = HashMap::new();
    for record in matches.iter().filter(|m| m.status() == MatchStatus::Finished) {
        let finished_at = record.finished_at().unwrap_or_default();
        let players = std::iter::once(record.challenger()).chain(record.defender());
        for participant in players {
            let entry = latest
                .entry(participant.user_id().clone())
                .or_insert_with(|| (finished_at, participant.identity.clone()));
            if finished_at > entry.0 {
                *entry = (finished_at, participant.identity.clone());
            }
        }
    }

    let mut table: Vec<PlayerStats> = latest
        .into_values()
        .map(|(_, identity)| PlayerStats::from_matches(&identity, matches, judge))
        .collect();
    table.sort_by(|a, b| {
        b.total_points
            .cmp(&a.total_points)
            .then(b.wins.cmp(&a.wins))
            .then_with(|| a.user_id().cmp(b.user_id()))
    });

    table
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(index, stats)| LeaderboardEntry {
            rank: index + 1,
            stats,
        })
        .collect()
}
