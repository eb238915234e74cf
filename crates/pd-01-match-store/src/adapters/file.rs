//! File-backed match repository.
//!
//! One JSON document per match (`<match_id>.json`) in a data directory. The
//! in-memory repository stays the source of truth for reads and the
//! compare-and-swap; a record is written to disk under its slot lock before
//! it becomes visible, so the file never lags behind what readers saw.
//!
//! Writes go to a `.tmp` sibling first and are renamed into place. They run
//! on the blocking pool, so a caller's timeout fires even while the disk
//! stalls. A write that outlives its caller still completes.
//!
//! Records read back on open must pass `Match::check_consistent`.

use async_trait::async_trait;
use shared_types::{MatchId, UserId};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use super::memory::InMemoryMatchRepository;
use crate::domain::Match;
use crate::ports::outbound::{MatchRepository, StoreError, StoreResult};

const RECORD_EXTENSION: &str = "json";

#[derive(Debug)]
pub struct JsonFileMatchRepository {
    dir: PathBuf,
    cache: Arc<InMemoryMatchRepository>,
}

impl JsonFileMatchRepository {
    /// Opens `dir`, creating it if missing, and loads every stored record.
    pub fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| io_error(&dir, e))?;

        let cache = InMemoryMatchRepository::new();
        let entries = fs::read_dir(&dir).map_err(|e| io_error(&dir, e))?;
        for entry in entries {
            let path = entry.map_err(|e| io_error(&dir, e))?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(RECORD_EXTENSION) {
                continue;
            }
            let record = read_record(&path)?;
            cache.insert_with(record, |_| Ok(()))?;
        }

        info!(dir = %dir.display(), matches = cache.len(), "match repository opened");
        Ok(Self {
            dir,
            cache: Arc::new(cache),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Runs `op` against the cache on the blocking pool.
    pub(crate) async fn persist_off_thread<F>(&self, op: F) -> StoreResult<Match>
    where
        F: FnOnce(&InMemoryMatchRepository, &Path) -> StoreResult<Match> + Send + 'static,
    {
        let cache = Arc::clone(&self.cache);
        let dir = self.dir.clone();
        tokio::task::spawn_blocking(move || op(&cache, &dir))
            .await
            .map_err(|e| StoreError::Io(format!("persist task failed: {e}")))?
    }
}

fn record_path(dir: &Path, id: &MatchId) -> PathBuf {
    dir.join(format!("{}.{}", id.as_str(), RECORD_EXTENSION))
}

fn write_record(dir: &Path, record: &Match) -> StoreResult<()> {
    let path = record_path(dir, record.id());
    let tmp = path.with_extension("tmp");
    let bytes =
        serde_json::to_vec_pretty(record).map_err(|e| StoreError::Serialization(e.to_string()))?;
    fs::write(&tmp, bytes).map_err(|e| io_error(&tmp, e))?;
    fs::rename(&tmp, &path).map_err(|e| io_error(&path, e))?;
    debug!(match_id = %record.id(), version = record.version(), "match record written");
    Ok(())
}

fn read_record(path: &Path) -> StoreResult<Match> {
    let bytes = fs::read(path).map_err(|e| io_error(path, e))?;
    let record: Match = serde_json::from_slice(&bytes)
        .map_err(|e| StoreError::Serialization(format!("{}: {e}", path.display())))?;

    let stem = path.file_stem().and_then(|s| s.to_str());
    if stem != Some(record.id().as_str()) {
        return Err(StoreError::Serialization(format!(
            "{}: holds match {}",
            path.display(),
            record.id()
        )));
    }
    record
        .check_consistent()
        .map_err(|reason| StoreError::Serialization(format!("{}: {reason}", path.display())))?;
    Ok(record)
}

fn io_error(path: &Path, err: std::io::Error) -> StoreError {
    StoreError::Io(format!("{}: {err}", path.display()))
}

#[async_trait]
impl MatchRepository for JsonFileMatchRepository {
    async fn insert(&self, record: Match) -> StoreResult<Match> {
        self.persist_off_thread(move |cache, dir| {
            cache.insert_with(record, |r| write_record(dir, r))
        })
        .await
    }

    async fn load(&self, id: &MatchId) -> StoreResult<Option<Match>> {
        Ok(self.cache.load_now(id))
    }

    async fn commit(&self, record: Match) -> StoreResult<Match> {
        self.persist_off_thread(move |cache, dir| {
            cache.commit_with(record, |r| write_record(dir, r))
        })
        .await
    }

    async fn list_for_user(&self, user: &UserId) -> StoreResult<Vec<Match>> {
        Ok(self.cache.list_for_user_now(user))
    }

    async fn list_finished(&self) -> StoreResult<Vec<Match>> {
        Ok(self.cache.list_finished_now())
    }
}
