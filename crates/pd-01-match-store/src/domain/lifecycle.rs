//! Match lifecycle state machine.
//!
//! Every transition validates against the current record and either mutates
//! it completely or returns an error leaving it untouched. Terminal statuses
//! are checked first so any action on a closed match reports `InvalidState`.
//!
//! ```text
//! (AwaitingOpponent, join)         → Active
//! (AwaitingOpponent, cancel)       → Cancelled
//! (Active, decline, 0 saves)       → Declined
//! (Active, record_choice)          → Active
//! (Active, finish, both complete)  → Finished
//! ```

use shared_types::{
    Direction, FinalScore, Identity, MatchId, Role, Timestamp, UserId, SHOTS_PER_PLAYER,
};

use super::entities::{Match, MatchOutcome, MatchStatus, Participant, StatusChange};
use super::errors::{MatchError, MatchResult};

impl Match {
    /// Opens a new match in `AwaitingOpponent`.
    pub fn open(id: MatchId, challenger: Identity, created_at: Timestamp) -> Self {
        Self {
            id,
            status: MatchStatus::AwaitingOpponent,
            challenger: Participant::new(challenger),
            defender: None,
            created_at,
            outcome: None,
            closed_at: None,
            version: 0,
        }
    }

    /// Fails with `InvalidState` once the match reached a terminal status.
    pub fn ensure_open(&self) -> MatchResult<()> {
        if self.status.is_terminal() {
            return Err(MatchError::invalid_state(
                self.status,
                "match is closed to further actions",
            ));
        }
        Ok(())
    }

    /// `AwaitingOpponent → Active`.
    ///
    /// # Errors
    /// - `InvalidState` on a terminal match
    /// - `AlreadyFull` if a defender is present
    /// - `SelfJoin` if the joiner is the challenger
    pub fn join(&mut self, defender: Identity) -> MatchResult<()> {
        self.ensure_open()?;
        if self.defender.is_some() {
            return Err(MatchError::AlreadyFull {
                match_id: self.id.clone(),
            });
        }
        if self.challenger.user_id() == &defender.user_id {
            return Err(MatchError::SelfJoin {
                match_id: self.id.clone(),
            });
        }
        self.defender = Some(Participant::new(defender));
        self.status = MatchStatus::Active;
        Ok(())
    }

    /// `AwaitingOpponent → Cancelled`, challenger only.
    pub fn cancel(&mut self, requester: &UserId, now: Timestamp) -> MatchResult<()> {
        self.ensure_open()?;
        if self.challenger.user_id() != requester {
            return Err(MatchError::forbidden("only the challenger can cancel"));
        }
        if self.status != MatchStatus::AwaitingOpponent {
            return Err(MatchError::forbidden(
                "a defender already joined, the challenge can no longer be cancelled",
            ));
        }
        self.status = MatchStatus::Cancelled;
        self.closed_at = Some(now);
        Ok(())
    }

    /// `Active → Declined`, defender only and only before any save.
    pub fn decline(&mut self, requester: &UserId, now: Timestamp) -> MatchResult<()> {
        self.ensure_open()?;
        let defender = match &self.defender {
            Some(defender) if defender.user_id() == requester => defender,
            _ => return Err(MatchError::forbidden("only the defender can decline")),
        };
        if self.status != MatchStatus::Active {
            return Err(MatchError::forbidden("match is not waiting for the defender"));
        }
        if defender.choice_count() > 0 {
            return Err(MatchError::forbidden(
                "defender already played, the challenge can no longer be declined",
            ));
        }
        self.status = MatchStatus::Declined;
        self.closed_at = Some(now);
        Ok(())
    }

    /// Appends one choice to the sequence of `role`.
    ///
    /// # Errors
    /// - `InvalidState` if the match is not `Active` or the sequence is full
    pub fn record_choice(&mut self, role: Role, choice: Direction) -> MatchResult<usize> {
        self.ensure_open()?;
        if self.status != MatchStatus::Active {
            return Err(MatchError::invalid_state(
                self.status,
                "choices can only be submitted while the match is active",
            ));
        }
        let status = self.status;
        let participant = self
            .participant_mut(role)
            .ok_or_else(|| MatchError::forbidden(format!("no {role} in this match")))?;
        if participant.is_complete() {
            return Err(MatchError::invalid_state(
                status,
                format!("{role} already submitted every choice"),
            ));
        }
        participant.choices.push(choice);
        Ok(participant.choice_count())
    }

    /// `Active → Finished`, sets winner and finish time together.
    pub fn finish(&mut self, score: FinalScore, now: Timestamp) -> MatchResult<()> {
        self.ensure_open()?;
        if self.status != MatchStatus::Active || !self.is_complete() {
            return Err(MatchError::invalid_state(
                self.status,
                "both sequences must be complete before the match can finish",
            ));
        }
        self.outcome = Some(MatchOutcome {
            score,
            finished_at: now,
        });
        self.status = MatchStatus::Finished;
        Ok(())
    }

    /// Applies a `StatusChange`.
    pub fn apply(&mut self, change: &StatusChange, now: Timestamp) -> MatchResult<()> {
        match change {
            StatusChange::Cancel { requester } => self.cancel(requester, now),
            StatusChange::Decline { requester } => self.decline(requester, now),
            StatusChange::Finish { score } => self.finish(*score, now),
        }
    }

    /// Checks a record built outside the state machine, e.g. read back from
    /// storage. Returns the first broken rule.
    pub fn check_consistent(&self) -> Result<(), String> {
        for participant in std::iter::once(&self.challenger).chain(self.defender.as_ref()) {
            if participant.choice_count() > SHOTS_PER_PLAYER {
                return Err(format!(
                    "{} has {} choices, at most {SHOTS_PER_PLAYER} allowed",
                    participant.user_id(),
                    participant.choice_count()
                ));
            }
        }
        if let Some(defender) = &self.defender {
            if defender.user_id() == self.challenger.user_id() {
                return Err("challenger and defender are the same user".into());
            }
        }

        let has_defender = self.defender.is_some();
        match self.status {
            MatchStatus::AwaitingOpponent | MatchStatus::Cancelled if has_defender => {
                return Err(format!("{} match has a defender", self.status));
            }
            MatchStatus::Active | MatchStatus::Finished | MatchStatus::Declined
                if !has_defender =>
            {
                return Err(format!("{} match has no defender", self.status));
            }
            MatchStatus::AwaitingOpponent | MatchStatus::Cancelled
                if self.challenger.choice_count() > 0 =>
            {
                return Err(format!("{} match already has choices", self.status));
            }
            MatchStatus::Declined
                if self.defender.as_ref().map(Participant::choice_count) != Some(0) =>
            {
                return Err("declined match has defender choices".into());
            }
            MatchStatus::Finished if !self.is_complete() => {
                return Err("finished match has incomplete sequences".into());
            }
            _ => {}
        }

        match (self.status, self.outcome.is_some()) {
            (MatchStatus::Finished, false) => return Err("finished match has no outcome".into()),
            (status, true) if status != MatchStatus::Finished => {
                return Err(format!("{status} match has an outcome"));
            }
            _ => {}
        }
        let closed = matches!(self.status, MatchStatus::Cancelled | MatchStatus::Declined);
        if closed != self.closed_at.is_some() {
            return Err(format!("{} match has inconsistent closed_at", self.status));
        }
        Ok(())
    }
}
