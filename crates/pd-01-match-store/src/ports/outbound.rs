//! Outbound (Driven) ports for the Match Store.
//!
//! `MatchRepository` is the persisted-state layout: a keyed collection of
//! match records plus a per-user index. `TimeSource` keeps timestamps
//! deterministic under test.

use async_trait::async_trait;
use shared_types::{MatchId, Timestamp, UserId};
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

use crate::domain::Match;

/// Repository failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("match not found: {0}")]
    NotFound(MatchId),

    /// Stored version differs from the one the writer loaded.
    #[error("version conflict on {match_id}: expected {expected}, found {found}")]
    VersionConflict {
        match_id: MatchId,
        expected: u64,
        found: u64,
    },

    #[error("match id already in use: {0}")]
    DuplicateId(MatchId),

    #[error("storage I/O failed: {0}")]
    Io(String),

    #[error("record (de)serialization failed: {0}")]
    Serialization(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Durable collection of match records.
///
/// # Concurrency contract
///
/// `commit` is a compare-and-swap: it succeeds only when the stored version
/// equals `record.version()`, and stores the record with the version bumped
/// by one. Commits on different ids never wait on each other.
#[async_trait]
pub trait MatchRepository: Send + Sync {
    /// Stores a new record. Fails with `DuplicateId` if the id exists.
    async fn insert(&self, record: Match) -> StoreResult<Match>;

    /// Loads a record by id.
    async fn load(&self, id: &MatchId) -> StoreResult<Option<Match>>;

    /// Replaces a record if nobody committed since it was loaded.
    async fn commit(&self, record: Match) -> StoreResult<Match>;

    /// All matches where `user` is challenger or defender.
    async fn list_for_user(&self, user: &UserId) -> StoreResult<Vec<Match>>;

    /// All finished matches.
    async fn list_finished(&self) -> StoreResult<Vec<Match>>;
}

/// Time source for consistent timestamp handling.
pub trait TimeSource: Send + Sync {
    /// Current timestamp in milliseconds.
    fn now(&self) -> Timestamp;
}

/// Wall-clock time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as Timestamp
    }
}

/// Manually driven clock for tests and replays.
#[derive(Debug, Default)]
pub struct ManualClock {
    time: AtomicU64,
}

impl ManualClock {
    pub fn new(initial: Timestamp) -> Self {
        Self {
            time: AtomicU64::new(initial),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.time.fetch_add(ms, Ordering::SeqCst);
    }

    pub fn set(&self, time: Timestamp) {
        self.time.store(time, Ordering::SeqCst);
    }
}

impl TimeSource for ManualClock {
    fn now(&self) -> Timestamp {
        self.time.load(Ordering::SeqCst)
    }
}
