//! # Domain Layer - Action Processor
//!
//! - `command`: wire envelope and validated commands
//! - `projection`: what a participant is allowed to see of a match

pub mod command;
pub mod projection;

pub use command::{ActionCommand, ActionEnvelope, ActionKind};
pub use projection::{MatchProjection, ParticipantView};
