//! # pd-04-action-processor
//!
//! Entry point for every state-changing action on a match.
//!
//! ## Architecture
//!
//! ```text
//! Presentation ──ActionEnvelope──→ Action Processor (4)
//!                                     │
//!                                     ├── update / set_status ──→ Match Store (1)
//!                                     ├── score_match ──────────→ Scoring Engine (2)
//!                                     └── classify ─────────────→ Challenge Classifier (3)
//! ```
//!
//! ## Actions
//!
//! | Action | Who | From | To |
//! |--------|-----|------|----|
//! | `create` | anyone | | AwaitingOpponent |
//! | `join` | anyone but the challenger | AwaitingOpponent | Active |
//! | `cancel-challenge` | challenger | AwaitingOpponent | Cancelled |
//! | `decline-challenge` | defender, before any save | Active | Declined |
//! | `submit-choice` | either participant | Active | Active / Finished |
//!
//! Terminal matches reject every action with `InvalidState`. Each action is
//! a single commit; the fifth choice of the second player scores and
//! finishes the match in that same commit.

pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

pub use config::{ProcessorConfig, DEFAULT_MAX_LEADERBOARD_LIMIT, DEFAULT_STORE_TIMEOUT_MS};
pub use domain::{ActionCommand, ActionEnvelope, ActionKind, MatchProjection, ParticipantView};
pub use ports::ActionApi;
pub use service::ActionProcessor;
