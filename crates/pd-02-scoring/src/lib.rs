//! # pd-02-scoring
//!
//! Scoring Engine for completed matches.
//!
//! ## Overview
//!
//! - **Engine**: per-shot goal/save, base points, perfect-round, win, draw
//!   and streak bonuses, winner from the final scores
//! - **Judge**: pluggable goal/save rule (`OutcomeJudge`), exact direction
//!   match by default
//! - **Stats**: per-player aggregates and the leaderboard over finished
//!   matches
//!
//! | Rule | Default |
//! |------|---------|
//! | points per goal | 10 |
//! | points per save | 15 |
//! | 5/5 goals or saves | +100 |
//! | higher base score | +50 |
//! | equal base scores | +20 each |
//! | perfect round and win | +300 |
//!
//! The engine is pure: identical inputs always give identical scores.

pub mod engine;
pub mod error;
pub mod judge;
pub mod rules;
pub mod stats;

pub use engine::{ScoreBreakdown, ScoringEngine, ShotOutcome, SideScore};
pub use error::{ScoringError, ScoringResult};
pub use judge::{DirectionJudge, OutcomeJudge};
pub use rules::ScoringRules;
pub use stats::{leaderboard, LeaderboardEntry, PlayerStats};
