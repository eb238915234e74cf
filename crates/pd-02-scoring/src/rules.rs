//! Scoring constants.

use serde::{Deserialize, Serialize};
use shared_types::SHOTS_PER_PLAYER;

use crate::error::{ScoringError, ScoringResult};

/// Point values applied by the engine.
///
/// The perfect-round bonus rewards 5/5 goals or 5/5 saves. The streak bonus
/// is added on top of it when that player also wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoringRules {
    pub points_per_goal: u32,
    pub points_per_save: u32,
    pub perfect_attack_bonus: u32,
    pub perfect_defense_bonus: u32,
    /// Awarded to the higher base score.
    pub win_bonus: u32,
    /// Awarded to both players on equal base scores.
    pub draw_bonus: u32,
    pub streak_bonus: u32,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            points_per_goal: 10,
            points_per_save: 15,
            perfect_attack_bonus: 100,
            perfect_defense_bonus: 100,
            win_bonus: 50,
            draw_bonus: 20,
            streak_bonus: 300,
        }
    }
}

impl ScoringRules {
    pub fn validate(&self) -> ScoringResult<()> {
        if self.points_per_goal == 0 || self.points_per_save == 0 {
            return Err(ScoringError::InvalidRules {
                reason: "goals and saves must be worth at least one point".into(),
            });
        }
        let sides = [
            ("challenger", self.points_per_goal, self.perfect_attack_bonus),
            ("defender", self.points_per_save, self.perfect_defense_bonus),
        ];
        for (side, per_round, perfect) in sides {
            let ceiling = self.max_total(per_round, perfect);
            if ceiling > u64::from(u32::MAX) {
                return Err(ScoringError::InvalidRules {
                    reason: format!("{side} can reach {ceiling} points, above {}", u32::MAX),
                });
            }
        }
        Ok(())
    }

    /// Highest total one side can collect under these rules.
    fn max_total(&self, per_round: u32, perfect: u32) -> u64 {
        SHOTS_PER_PLAYER as u64 * u64::from(per_round)
            + u64::from(perfect)
            + u64::from(self.win_bonus.max(self.draw_bonus))
            + u64::from(self.streak_bonus)
    }
}
