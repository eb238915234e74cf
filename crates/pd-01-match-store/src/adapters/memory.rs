//! In-memory match repository.
//!
//! ## Data Structures
//!
//! - `slots`: match id → per-match lock holding the record
//! - `by_user`: user id → ids of matches the user takes part in
//! - `pending`: ids reserved by inserts whose persist step is still running
//!
//! The outer map lock is only held to find or add a slot. Compare-and-swap
//! happens under the slot's own lock, so commits on different matches never
//! contend. Lock order is always slot → `by_user` and `pending` → `slots`.

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use shared_types::{MatchId, UserId};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use crate::domain::{Match, MatchStatus};
use crate::ports::outbound::{MatchRepository, StoreError, StoreResult};

type Slot = Arc<Mutex<Match>>;

#[derive(Debug, Default)]
pub struct InMemoryMatchRepository {
    slots: RwLock<HashMap<MatchId, Slot>>,
    by_user: RwLock<HashMap<UserId, BTreeSet<MatchId>>>,
    pending: Mutex<HashSet<MatchId>>,
}

impl InMemoryMatchRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.read().is_empty()
    }

    /// Inserts `record`, running `persist` before it becomes visible.
    ///
    /// The id is reserved while `persist` runs, so a slow write only holds
    /// back inserts of the same id. A failing `persist` leaves the repository
    /// unchanged.
    pub(crate) fn insert_with<F>(&self, record: Match, persist: F) -> StoreResult<Match>
    where
        F: FnOnce(&Match) -> StoreResult<()>,
    {
        self.reserve(record.id())?;
        if let Err(err) = persist(&record) {
            self.pending.lock().remove(record.id());
            return Err(err);
        }

        self.index(record.challenger().user_id(), record.id());
        if let Some(defender) = record.defender() {
            self.index(defender.user_id(), record.id());
        }
        self.slots
            .write()
            .insert(record.id().clone(), Arc::new(Mutex::new(record.clone())));
        self.pending.lock().remove(record.id());
        Ok(record)
    }

    fn reserve(&self, id: &MatchId) -> StoreResult<()> {
        let mut pending = self.pending.lock();
        if pending.contains(id) || self.slots.read().contains_key(id) {
            return Err(StoreError::DuplicateId(id.clone()));
        }
        pending.insert(id.clone());
        Ok(())
    }

    /// Compare-and-swap on `version`, running `persist` on the bumped record
    /// before it replaces the stored one.
    pub(crate) fn commit_with<F>(&self, record: Match, persist: F) -> StoreResult<Match>
    where
        F: FnOnce(&Match) -> StoreResult<()>,
    {
        let slot = self
            .slot(record.id())
            .ok_or_else(|| StoreError::NotFound(record.id().clone()))?;
        let mut current = slot.lock();

        if current.version != record.version {
            return Err(StoreError::VersionConflict {
                match_id: record.id.clone(),
                expected: record.version,
                found: current.version,
            });
        }

        let mut next = record;
        next.version += 1;
        persist(&next)?;

        if current.defender.is_none() {
            if let Some(defender) = next.defender() {
                self.index(defender.user_id(), next.id());
            }
        }
        *current = next.clone();
        Ok(next)
    }

    fn slot(&self, id: &MatchId) -> Option<Slot> {
        self.slots.read().get(id).cloned()
    }

    fn index(&self, user: &UserId, id: &MatchId) {
        self.by_user
            .write()
            .entry(user.clone())
            .or_default()
            .insert(id.clone());
    }

    pub(crate) fn load_now(&self, id: &MatchId) -> Option<Match> {
        self.slot(id).map(|slot| slot.lock().clone())
    }

    pub(crate) fn list_for_user_now(&self, user: &UserId) -> Vec<Match> {
        let ids: Vec<MatchId> = self
            .by_user
            .read()
            .get(user)
            .map(|ids| ids.iter().cloned().collect())
            .unwrap_or_default();

        ids.iter()
            .filter_map(|id| self.load_now(id))
            .filter(|m| m.involves(user))
            .collect()
    }

    pub(crate) fn list_finished_now(&self) -> Vec<Match> {
        let slots: Vec<Slot> = self.slots.read().values().cloned().collect();
        slots
            .iter()
            .map(|slot| slot.lock().clone())
            .filter(|m| m.status() == MatchStatus::Finished)
            .collect()
    }
}

#[async_trait]
impl MatchRepository for InMemoryMatchRepository {
    async fn insert(&self, record: Match) -> StoreResult<Match> {
        self.insert_with(record, |_| Ok(()))
    }

    async fn load(&self, id: &MatchId) -> StoreResult<Option<Match>> {
        Ok(self.load_now(id))
    }

    async fn commit(&self, record: Match) -> StoreResult<Match> {
        self.commit_with(record, |_| Ok(()))
    }

    async fn list_for_user(&self, user: &UserId) -> StoreResult<Vec<Match>> {
        Ok(self.list_for_user_now(user))
    }

    async fn list_finished(&self) -> StoreResult<Vec<Match>> {
        Ok(self.list_finished_now())
    }
}
