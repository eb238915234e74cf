//! Adapters for the Match Store.
//!
//! - `memory`: in-process repository with per-match locks
//! - `file`: the same repository persisted as one JSON file per match

pub mod file;
pub mod memory;

pub use file::JsonFileMatchRepository;
pub use memory::InMemoryMatchRepository;
