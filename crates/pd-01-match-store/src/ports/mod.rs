//! Ports for the Match Store subsystem.

pub mod inbound;
pub mod outbound;

pub use inbound::MatchStoreApi;
pub use outbound::{
    ManualClock, MatchRepository, StoreError, StoreResult, SystemTimeSource, TimeSource,
};
