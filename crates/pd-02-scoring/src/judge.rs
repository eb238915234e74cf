//! Goal/save decision per shot.

use shared_types::Direction;

/// Decides whether a dive stops a shot.
pub trait OutcomeJudge: Send + Sync {
    fn is_save(&self, shot: Direction, dive: Direction) -> bool;
}

/// The keeper saves when diving the same way the ball goes.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectionJudge;

impl OutcomeJudge for DirectionJudge {
    fn is_save(&self, shot: Direction, dive: Direction) -> bool {
        shot == dive
    }
}
