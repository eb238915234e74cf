//! Action Processor service.
//!
//! Validates actions, enforces the role rules on top of the lifecycle state
//! machine and applies each action as one compare-and-swap on the match.
//! The final choice scores the match and moves it to `Finished` inside the
//! same commit.

use async_trait::async_trait;
use duel_telemetry::log_match_event;
use pd_01_match_store::{
    Match, MatchError, MatchRepository, MatchResult, MatchStatus, MatchStore, MatchStoreApi,
    StatusChange, TimeSource,
};
use pd_02_scoring::{
    leaderboard, DirectionJudge, LeaderboardEntry, OutcomeJudge, PlayerStats, ScoringEngine,
    ScoringRules,
};
use pd_03_challenge_classifier::{
    ChallengeClassifierApi, ChallengeView, ClassifierConfig, ClassifierService,
};
use shared_types::{Direction, FinalScore, Identity, MatchId, Role, UserId};
use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;

use crate::config::ProcessorConfig;
use crate::domain::{ActionCommand, ActionKind, MatchProjection};
use crate::ports::inbound::ActionApi;

const SUBSYSTEM: &str = "action-processor";

/// Action Processor over a match repository.
pub struct ActionProcessor<R, T, J = DirectionJudge>
where
    R: MatchRepository,
    T: TimeSource,
    J: OutcomeJudge,
{
    config: ProcessorConfig,
    store: MatchStore<R, T>,
    classifier: ClassifierService<R, T>,
    engine: ScoringEngine<J>,
}

impl<R, T> ActionProcessor<R, T, DirectionJudge>
where
    R: MatchRepository,
    T: TimeSource,
{
    pub fn new(
        config: ProcessorConfig,
        classifier_config: ClassifierConfig,
        rules: ScoringRules,
        repository: Arc<R>,
        clock: Arc<T>,
    ) -> Self {
        Self::with_engine(
            config,
            classifier_config,
            ScoringEngine::new(rules),
            repository,
            clock,
        )
    }
}

impl<R, T, J> ActionProcessor<R, T, J>
where
    R: MatchRepository,
    T: TimeSource,
    J: OutcomeJudge,
{
    pub fn with_engine(
        config: ProcessorConfig,
        classifier_config: ClassifierConfig,
        engine: ScoringEngine<J>,
        repository: Arc<R>,
        clock: Arc<T>,
    ) -> Self {
        Self {
            config,
            store: MatchStore::new(Arc::clone(&repository), Arc::clone(&clock)),
            classifier: ClassifierService::new(classifier_config, repository, clock),
            engine,
        }
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    pub fn store(&self) -> &MatchStore<R, T> {
        &self.store
    }

    pub fn engine(&self) -> &ScoringEngine<J> {
        &self.engine
    }

    /// Runs `operation` under the store timeout.
    async fn bounded<F, O>(&self, operation: &'static str, future: F) -> MatchResult<O>
    where
        F: Future<Output = MatchResult<O>> + Send,
    {
        let limit = self.config.store_timeout();
        match tokio::time::timeout(limit, future).await {
            Ok(result) => result,
            Err(_) => Err(MatchError::Unavailable {
                reason: format!("{operation} timed out after {} ms", limit.as_millis()),
            }),
        }
    }

    /// Appends `choice` for the caller and finishes the match if it was the
    /// last one outstanding.
    async fn submit(
        &self,
        match_id: &MatchId,
        caller: &UserId,
        claimed: Option<Role>,
        choice: Direction,
    ) -> MatchResult<(Match, Option<FinalScore>)> {
        let engine = &self.engine;
        self.store
            .update(match_id, move |record, now| {
                record.ensure_open()?;
                let role = record
                    .role_of(caller)
                    .ok_or_else(|| MatchError::forbidden("caller is not part of this match"))?;
                if let Some(claimed) = claimed {
                    if claimed != role {
                        return Err(MatchError::forbidden(format!(
                            "caller plays {role}, not {claimed}"
                        )));
                    }
                }

                record.record_choice(role, choice)?;
                if !record.is_complete() {
                    return Ok(None);
                }
                let score = engine.score_match(record)?.final_score();
                record.finish(score, now)?;
                Ok(Some(score))
            })
            .await
    }

    async fn apply(&self, command: ActionCommand) -> MatchResult<Match> {
        let operation = command.kind().as_str();
        match command {
            ActionCommand::Create { identity } => {
                self.bounded(operation, self.store.create(identity)).await
            }
            ActionCommand::Join { match_id, identity } => {
                self.bounded(operation, self.store.join(&match_id, identity))
                    .await
            }
            ActionCommand::Decline { match_id, identity } => {
                let change = StatusChange::Decline {
                    requester: identity.user_id,
                };
                self.bounded(operation, self.store.set_status(&match_id, change))
                    .await
            }
            ActionCommand::Cancel { match_id, identity } => {
                let change = StatusChange::Cancel {
                    requester: identity.user_id,
                };
                self.bounded(operation, self.store.set_status(&match_id, change))
                    .await
            }
            ActionCommand::SubmitChoice {
                match_id,
                identity,
                role,
                choice,
            } => {
                let (record, score) = self
                    .bounded(
                        operation,
                        self.submit(&match_id, &identity.user_id, role, choice),
                    )
                    .await?;
                if let Some(score) = score {
                    log_match_event!(
                        info,
                        SUBSYSTEM,
                        "match finished",
                        record.id(),
                        identity.user_id,
                        winner = ?score.winner,
                        challenger_score = score.challenger_score,
                        defender_score = score.defender_score
                    );
                }
                Ok(record)
            }
        }
    }
}

#[async_trait]
impl<R, T, J> ActionApi for ActionProcessor<R, T, J>
where
    R: MatchRepository,
    T: TimeSource,
    J: OutcomeJudge,
{
    async fn execute(&self, command: ActionCommand) -> MatchResult<MatchProjection> {
        command.identity().validate()?;
        let kind: ActionKind = command.kind();
        let viewer = command.identity().user_id.clone();
        let target = command
            .match_id()
            .map_or_else(|| "-".to_string(), ToString::to_string);

        match self.apply(command).await {
            Ok(record) => {
                log_match_event!(
                    info,
                    SUBSYSTEM,
                    "action applied",
                    record.id(),
                    viewer,
                    action = %kind,
                    status = %record.status(),
                    version = record.version()
                );
                Ok(MatchProjection::for_viewer(&record, &viewer))
            }
            Err(err) if err.is_retryable() => {
                log_match_event!(
                    warn,
                    SUBSYSTEM,
                    "action failed, retry possible",
                    target,
                    viewer,
                    action = %kind,
                    code = err.code(),
                    error = %err
                );
                Err(err)
            }
            Err(err) => {
                log_match_event!(
                    debug,
                    SUBSYSTEM,
                    "action rejected",
                    target,
                    viewer,
                    action = %kind,
                    code = err.code()
                );
                Err(err)
            }
        }
    }

    async fn view(&self, viewer: &Identity, match_id: &MatchId) -> MatchResult<MatchProjection> {
        viewer.validate()?;
        let record = self.bounded("view", self.store.get(match_id)).await?;
        if !record.involves(&viewer.user_id) && record.status() != MatchStatus::AwaitingOpponent {
            return Err(MatchError::forbidden("match is private to its participants"));
        }
        Ok(MatchProjection::for_viewer(&record, &viewer.user_id))
    }

    async fn classify(
        &self,
        viewer: &Identity,
        viewed: &HashSet<MatchId>,
    ) -> MatchResult<Vec<ChallengeView>> {
        self.bounded("classify", self.classifier.classify(viewer, viewed))
            .await
    }

    async fn player_stats(&self, identity: &Identity) -> MatchResult<PlayerStats> {
        identity.validate()?;
        let matches = self
            .bounded("player-stats", self.store.list_for_user(&identity.user_id))
            .await?;
        Ok(PlayerStats::from_matches(
            identity,
            &matches,
            self.engine.judge(),
        ))
    }

    async fn leaderboard(&self, limit: usize) -> MatchResult<Vec<LeaderboardEntry>> {
        let max = self.config.max_leaderboard_limit;
        if limit == 0 || limit > max {
            return Err(MatchError::validation(format!(
                "leaderboard limit must be between 1 and {max}"
            )));
        }
        let matches = self
            .bounded("leaderboard", self.store.list_finished())
            .await?;
        Ok(leaderboard(&matches, limit, self.engine.judge()))
    }
}
