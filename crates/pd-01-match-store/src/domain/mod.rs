//! # Domain Layer - Match Store
//!
//! ## Components
//!
//! - `entities`: `Match`, `Participant`, `MatchStatus`, `MatchOutcome`, `StatusChange`
//! - `lifecycle`: state machine transitions on `Match`
//! - `errors`: `MatchError` enumeration shared by every subsystem

pub mod entities;
pub mod errors;
pub mod lifecycle;

pub use entities::*;
pub use errors::*;
