//! Classifier service over the match repository.

use async_trait::async_trait;
use pd_01_match_store::{MatchRepository, MatchResult, TimeSource};
use shared_types::{Identity, MatchId};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

use crate::config::ClassifierConfig;
use crate::domain::{classify_matches, ChallengeView};
use crate::ports::ChallengeClassifierApi;

pub struct ClassifierService<R, T>
where
    R: MatchRepository,
    T: TimeSource,
{
    config: ClassifierConfig,
    repository: Arc<R>,
    clock: Arc<T>,
}

impl<R, T> ClassifierService<R, T>
where
    R: MatchRepository,
    T: TimeSource,
{
    pub fn new(config: ClassifierConfig, repository: Arc<R>, clock: Arc<T>) -> Self {
        Self {
            config,
            repository,
            clock,
        }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }
}

#[async_trait]
impl<R, T> ChallengeClassifierApi for ClassifierService<R, T>
where
    R: MatchRepository,
    T: TimeSource,
{
    async fn classify(
        &self,
        viewer: &Identity,
        viewed: &HashSet<MatchId>,
    ) -> MatchResult<Vec<ChallengeView>> {
        viewer.validate()?;
        let matches = self.repository.list_for_user(&viewer.user_id).await?;
        let views = classify_matches(
            &matches,
            &viewer.user_id,
            viewed,
            self.clock.now(),
            &self.config,
        );
        debug!(
            user_id = %viewer.user_id,
            matches = matches.len(),
            shown = views.len(),
            "challenges classified"
        );
        Ok(views)
    }
}
