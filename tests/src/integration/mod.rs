//! # Integration Flows
//!
//! Drive the action processor against real repositories and check what the
//! store, classifier and scoring engine agree on afterwards.

pub mod concurrency;
pub mod envelopes;
pub mod flows;
pub mod persistence;
