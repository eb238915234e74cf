//! # Penalty-Duel Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── src/integration/
//! │   ├── flows.rs         # Lifecycle and classifier across pd-01..pd-04
//! │   ├── concurrency.rs   # Races on a multi-thread runtime
//! │   ├── envelopes.rs     # JSON action envelopes and queries
//! │   └── persistence.rs   # JSON-file repository through the runtime
//! └── benches/
//!     └── duel_benchmarks.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p duel-tests
//! cargo test -p duel-tests integration::concurrency::
//! cargo bench -p duel-tests
//! ```

#![allow(dead_code)]

pub mod integration;
