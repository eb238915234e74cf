//! # Shared Types Crate
//!
//! Domain vocabulary used by every duel subsystem: who plays (`Identity`),
//! which match (`MatchId`), in which role (`Role`), what they picked
//! (`Direction`) and how it ended (`Winner`, `FinalScore`).
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: cross-subsystem types live here only.
//! - **Opaque identity**: the core never inspects credentials. A `UserId` is
//!   whatever the external session collaborator vouches for.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
