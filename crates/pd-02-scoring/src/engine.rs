//! Scoring Engine.
//!
//! ## Algorithm
//!
//! 1. Per index, a save if the judge says the dive stops the shot, else a goal.
//! 2. Base: goals × `points_per_goal` (+ perfect bonus on 5/5) for the
//!    challenger, saves × `points_per_save` (+ perfect bonus on 5/5) for the
//!    defender.
//! 3. Higher base gets `win_bonus`, plus `streak_bonus` if its round was
//!    perfect. Equal bases give `draw_bonus` to both.
//! 4. Winner from the final scores.

use pd_01_match_store::Match;
use serde::Serialize;
use shared_types::{Direction, FinalScore, Role, Winner, SHOTS_PER_PLAYER};
use tracing::trace;

use crate::error::{ScoringError, ScoringResult};
use crate::judge::{DirectionJudge, OutcomeJudge};
use crate::rules::ScoringRules;

/// Result of a single shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShotOutcome {
    Goal,
    Save,
}

/// Points of one side, split by source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SideScore {
    pub base: u32,
    pub perfect_bonus: u32,
    pub result_bonus: u32,
    pub streak_bonus: u32,
}

impl SideScore {
    /// Score compared to decide the win bonus.
    pub fn base_total(&self) -> u32 {
        self.base.saturating_add(self.perfect_bonus)
    }

    pub fn total(&self) -> u32 {
        self.base_total()
            .saturating_add(self.result_bonus)
            .saturating_add(self.streak_bonus)
    }

    pub fn is_perfect(&self) -> bool {
        self.perfect_bonus > 0
    }
}

/// Full scoring of one match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub shots: Vec<ShotOutcome>,
    pub goals: u32,
    pub saves: u32,
    pub challenger: SideScore,
    pub defender: SideScore,
    pub winner: Winner,
}

impl ScoreBreakdown {
    pub fn final_score(&self) -> FinalScore {
        FinalScore {
            challenger_score: self.challenger.total(),
            defender_score: self.defender.total(),
            winner: self.winner,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScoringEngine<J = DirectionJudge>
where
    J: OutcomeJudge,
{
    rules: ScoringRules,
    judge: J,
}

impl Default for ScoringEngine<DirectionJudge> {
    fn default() -> Self {
        Self::new(ScoringRules::default())
    }
}

impl ScoringEngine<DirectionJudge> {
    pub fn new(rules: ScoringRules) -> Self {
        Self::with_judge(rules, DirectionJudge)
    }
}

impl<J: OutcomeJudge> ScoringEngine<J> {
    pub fn with_judge(rules: ScoringRules, judge: J) -> Self {
        Self { rules, judge }
    }

    pub fn rules(&self) -> &ScoringRules {
        &self.rules
    }

    pub fn judge(&self) -> &J {
        &self.judge
    }

    /// Per-shot outcomes for two aligned sequences of any common length.
    pub fn outcomes(&self, shots: &[Direction], dives: &[Direction]) -> Vec<ShotOutcome> {
        shots
            .iter()
            .zip(dives)
            .map(|(shot, dive)| {
                if self.judge.is_save(*shot, *dive) {
                    ShotOutcome::Save
                } else {
                    ShotOutcome::Goal
                }
            })
            .collect()
    }

    /// Scores two complete sequences.
    ///
    /// # Errors
    /// - `SequenceLength` unless both hold exactly `SHOTS_PER_PLAYER` choices
    /// - `InvalidRules` if a total could exceed `u32::MAX` under the rules
    pub fn score(&self, shots: &[Direction], dives: &[Direction]) -> ScoringResult<ScoreBreakdown> {
        self.rules.validate()?;
        check_length(Role::Challenger, shots)?;
        check_length(Role::Defender, dives)?;

        let outcomes = self.outcomes(shots, dives);
        let goals = outcomes.iter().filter(|o| **o == ShotOutcome::Goal).count() as u32;
        let saves = outcomes.len() as u32 - goals;
        let rounds = SHOTS_PER_PLAYER as u32;

        let mut challenger = SideScore {
            base: goals * self.rules.points_per_goal,
            perfect_bonus: if goals == rounds {
                self.rules.perfect_attack_bonus
            } else {
                0
            },
            ..SideScore::default()
        };
        let mut defender = SideScore {
            base: saves * self.rules.points_per_save,
            perfect_bonus: if saves == rounds {
                self.rules.perfect_defense_bonus
            } else {
                0
            },
            ..SideScore::default()
        };

        match challenger.base_total().cmp(&defender.base_total()) {
            std::cmp::Ordering::Greater => self.award_win(&mut challenger),
            std::cmp::Ordering::Less => self.award_win(&mut defender),
            std::cmp::Ordering::Equal => {
                challenger.result_bonus = self.rules.draw_bonus;
                defender.result_bonus = self.rules.draw_bonus;
            }
        }

        let winner = match challenger.total().cmp(&defender.total()) {
            std::cmp::Ordering::Greater => Winner::Challenger,
            std::cmp::Ordering::Less => Winner::Defender,
            std::cmp::Ordering::Equal => Winner::Draw,
        };
        trace!(goals, saves, ?winner, "sequences scored");

        Ok(ScoreBreakdown {
            shots: outcomes,
            goals,
            saves,
            challenger,
            defender,
            winner,
        })
    }

    /// Scores the sequences stored on `record`.
    pub fn score_match(&self, record: &Match) -> ScoringResult<ScoreBreakdown> {
        let defender = record
            .defender()
            .ok_or_else(|| ScoringError::MissingDefender {
                match_id: record.id().clone(),
            })?;
        self.score(&record.challenger().choices, &defender.choices)
    }

    fn award_win(&self, side: &mut SideScore) {
        side.result_bonus = self.rules.win_bonus;
        if side.is_perfect() {
            side.streak_bonus = self.rules.streak_bonus;
        }
    }
}

fn check_length(role: Role, sequence: &[Direction]) -> ScoringResult<()> {
    if sequence.len() != SHOTS_PER_PLAYER {
        return Err(ScoringError::SequenceLength {
            role,
            expected: SHOTS_PER_PLAYER,
            found: sequence.len(),
        });
    }
    Ok(())
}
