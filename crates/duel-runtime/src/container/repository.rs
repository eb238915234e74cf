//! Repository selected at startup.

use async_trait::async_trait;
use pd_01_match_store::{
    InMemoryMatchRepository, JsonFileMatchRepository, Match, MatchRepository, StoreResult,
};
use shared_types::{MatchId, UserId};
use tracing::info;

use super::config::{StorageBackend, StorageConfig};

/// Either repository adapter behind one concrete type, so the processor is
/// monomorphized once.
#[derive(Debug)]
pub enum RuntimeRepository {
    Memory(InMemoryMatchRepository),
    File(JsonFileMatchRepository),
}

impl RuntimeRepository {
    pub fn open(config: &StorageConfig) -> StoreResult<Self> {
        let repository = match config.backend {
            StorageBackend::Memory => Self::Memory(InMemoryMatchRepository::new()),
            StorageBackend::File => Self::File(JsonFileMatchRepository::open(&config.data_dir)?),
        };
        info!(backend = repository.name(), "match repository ready");
        Ok(repository)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            Self::File(_) => "file",
        }
    }
}

#[async_trait]
impl MatchRepository for RuntimeRepository {
    async fn insert(&self, record: Match) -> StoreResult<Match> {
        match self {
            Self::Memory(inner) => inner.insert(record).await,
            Self::File(inner) => inner.insert(record).await,
        }
    }

    async fn load(&self, id: &MatchId) -> StoreResult<Option<Match>> {
        match self {
            Self::Memory(inner) => inner.load(id).await,
            Self::File(inner) => inner.load(id).await,
        }
    }

    async fn commit(&self, record: Match) -> StoreResult<Match> {
        match self {
            Self::Memory(inner) => inner.commit(record).await,
            Self::File(inner) => inner.commit(record).await,
        }
    }

    async fn list_for_user(&self, user: &UserId) -> StoreResult<Vec<Match>> {
        match self {
            Self::Memory(inner) => inner.list_for_user(user).await,
            Self::File(inner) => inner.list_for_user(user).await,
        }
    }

    async fn list_finished(&self) -> StoreResult<Vec<Match>> {
        match self {
            Self::Memory(inner) => inner.list_finished().await,
            Self::File(inner) => inner.list_finished().await,
        }
    }
}
