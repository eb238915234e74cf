//! Inbound port of the Challenge Classifier.

use async_trait::async_trait;
use pd_01_match_store::MatchResult;
use shared_types::{Identity, MatchId};
use std::collections::HashSet;

use crate::domain::ChallengeView;

#[async_trait]
pub trait ChallengeClassifierApi: Send + Sync {
    /// Challenge list of `viewer`. `viewed` holds the ids of finished
    /// matches presentation already showed as recent.
    ///
    /// # Errors
    /// - `Validation`: invalid viewer identity
    /// - `Unavailable`: the store could not be read
    async fn classify(
        &self,
        viewer: &Identity,
        viewed: &HashSet<MatchId>,
    ) -> MatchResult<Vec<ChallengeView>>;
}
