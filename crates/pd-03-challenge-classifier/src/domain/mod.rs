//! # Domain Layer - Challenge Classifier
//!
//! Pure functions over `{status, role, viewed set, time}`. Nothing here
//! touches storage.

pub mod category;
pub mod view;

pub use category::{categorize, ChallengeCategory};
pub use view::{classify_matches, ChallengeView};
