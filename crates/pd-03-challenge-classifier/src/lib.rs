//! # pd-03-challenge-classifier
//!
//! Derives, for one viewer, how every match they take part in should be
//! presented: an `invitation` to answer, an `active` duel to continue,
//! `waiting_for_opponent`, a `cancelable` open challenge, or a
//! `finished_recent` result not yet seen.
//!
//! ## Architecture
//!
//! ```text
//! Presentation ──classify(viewer, viewed)──→ Classifier (3)
//!                                               │
//!                                               └── list_for_user ──→ Match Store (1)
//! ```
//!
//! Categories are recomputed on every query and never stored. The viewed
//! set is owned by presentation.

pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

pub use config::{ClassifierConfig, DEFAULT_RECENCY_WINDOW_MS};
pub use domain::{categorize, classify_matches, ChallengeCategory, ChallengeView};
pub use ports::ChallengeClassifierApi;
pub use service::ClassifierService;
