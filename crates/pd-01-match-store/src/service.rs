//! Match Store service.
//!
//! Every mutation follows the same cycle: load the record, apply one
//! lifecycle transition to a private copy, commit with the loaded version.
//! A concurrent writer that committed first makes the commit fail with
//! `Conflict`; nothing is retried internally.

use async_trait::async_trait;
use shared_types::{Direction, Identity, MatchId, Role, Timestamp, UserId};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::{Match, MatchError, MatchResult, StatusChange};
use crate::ports::inbound::MatchStoreApi;
use crate::ports::outbound::{MatchRepository, TimeSource};

/// Match Store over a repository and a clock.
pub struct MatchStore<R, T>
where
    R: MatchRepository,
    T: TimeSource,
{
    repository: Arc<R>,
    clock: Arc<T>,
}

impl<R, T> Clone for MatchStore<R, T>
where
    R: MatchRepository,
    T: TimeSource,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, T> MatchStore<R, T>
where
    R: MatchRepository,
    T: TimeSource,
{
    pub fn new(repository: Arc<R>, clock: Arc<T>) -> Self {
        Self { repository, clock }
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// Runs `mutate` against the current record and commits the result as a
    /// single version step.
    ///
    /// `mutate` receives a copy; if it fails, nothing is written. Returns the
    /// committed record together with whatever `mutate` produced.
    pub async fn update<F, O>(&self, id: &MatchId, mutate: F) -> MatchResult<(Match, O)>
    where
        F: FnOnce(&mut Match, Timestamp) -> MatchResult<O> + Send,
        O: Send,
    {
        let mut record = self.load_existing(id).await?;
        let loaded_version = record.version();
        let output = mutate(&mut record, self.clock.now())?;

        match self.repository.commit(record).await {
            Ok(committed) => {
                debug!(
                    match_id = %id,
                    version = committed.version(),
                    status = %committed.status(),
                    "match committed"
                );
                Ok((committed, output))
            }
            Err(err) => {
                let err = MatchError::from(err);
                warn!(match_id = %id, loaded_version, error = %err, "match commit rejected");
                Err(err)
            }
        }
    }

    /// All finished matches, for aggregate statistics.
    pub async fn list_finished(&self) -> MatchResult<Vec<Match>> {
        Ok(self.repository.list_finished().await?)
    }

    async fn load_existing(&self, id: &MatchId) -> MatchResult<Match> {
        self.repository
            .load(id)
            .await?
            .ok_or_else(|| MatchError::NotFound {
                match_id: id.clone(),
            })
    }
}

#[async_trait]
impl<R, T> MatchStoreApi for MatchStore<R, T>
where
    R: MatchRepository,
    T: TimeSource,
{
    async fn create(&self, challenger: Identity) -> MatchResult<Match> {
        challenger.validate()?;
        let record = Match::open(MatchId::generate(), challenger, self.clock.now());
        let stored = self.repository.insert(record).await?;
        debug!(
            match_id = %stored.id(),
            challenger = %stored.challenger().user_id(),
            "match created"
        );
        Ok(stored)
    }

    async fn get(&self, id: &MatchId) -> MatchResult<Match> {
        self.load_existing(id).await
    }

    async fn join(&self, id: &MatchId, defender: Identity) -> MatchResult<Match> {
        defender.validate()?;
        let (record, ()) = self.update(id, |m, _| m.join(defender)).await?;
        Ok(record)
    }

    async fn record_choice(
        &self,
        id: &MatchId,
        role: Role,
        choice: Direction,
    ) -> MatchResult<Match> {
        let (record, _) = self
            .update(id, |m, _| m.record_choice(role, choice))
            .await?;
        Ok(record)
    }

    async fn set_status(&self, id: &MatchId, change: StatusChange) -> MatchResult<Match> {
        let (record, ()) = self.update(id, |m, now| m.apply(&change, now)).await?;
        Ok(record)
    }

    async fn list_for_user(&self, user: &UserId) -> MatchResult<Vec<Match>> {
        Ok(self.repository.list_for_user(user).await?)
    }
}
