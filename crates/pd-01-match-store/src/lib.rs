//! # pd-01-match-store
//!
//! Match records and their lifecycle.
//!
//! ## Overview
//!
//! This subsystem provides:
//! - **Lifecycle**: the state machine every match moves through
//! - **Atomic mutation**: load, transition, commit with a version check
//! - **Per-user index**: every match a user takes part in, either role
//!
//! ## Lifecycle
//!
//! ```text
//! [AWAITING_OPPONENT] ──join──→ [ACTIVE] ──both sequences complete──→ [FINISHED]
//!        │                         │
//!        └──cancel──→ [CANCELLED]  └──decline (no saves yet)──→ [DECLINED]
//! ```
//!
//! Finished, Cancelled and Declined are terminal. Any action on a terminal
//! match fails with `InvalidState`.
//!
//! ## Concurrency
//!
//! Mutations on one match are serialized through optimistic versioning: the
//! commit succeeds only if nobody committed since the record was loaded. The
//! loser of a race gets `Conflict` and may retry after re-reading.
//!
//! ## Example
//!
//! ```rust,ignore
//! use pd_01_match_store::{InMemoryMatchRepository, MatchStore, SystemTimeSource};
//! use pd_01_match_store::ports::MatchStoreApi;
//!
//! let store = MatchStore::new(
//!     Arc::new(InMemoryMatchRepository::new()),
//!     Arc::new(SystemTimeSource),
//! );
//! let m = store.create(challenger).await?;
//! let m = store.join(m.id(), defender).await?;
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{InMemoryMatchRepository, JsonFileMatchRepository};
pub use domain::{
    Match, MatchError, MatchOutcome, MatchResult, MatchStatus, Participant, StatusChange,
};
pub use ports::{
    ManualClock, MatchRepository, MatchStoreApi, StoreError, StoreResult, SystemTimeSource,
    TimeSource,
};
pub use service::MatchStore;
