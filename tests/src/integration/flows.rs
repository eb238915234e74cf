//! # Lifecycle Flows
//!
//! A match from creation to the end of its recency window, as seen by both
//! players through the classifier, plus the side exits and statistics.

#[cfg(test)]
mod tests {
    use crate::fixtures::{identity, processor, TestProcessor, EPOCH};
    use pd_01_match_store::{MatchError, MatchStatus};
    use pd_03_challenge_classifier::{ChallengeCategory, DEFAULT_RECENCY_WINDOW_MS};
    use pd_04_action_processor::ActionApi;
    use shared_types::{Direction, MatchId, Role, Winner};
    use std::collections::HashSet;

    // =========================================================================
    // HELPERS
    // =========================================================================

    async fn categories(processor: &TestProcessor, user: &str) -> Vec<(MatchId, ChallengeCategory)> {
        categories_viewed(processor, user, &HashSet::new()).await
    }

    async fn categories_viewed(
        processor: &TestProcessor,
        user: &str,
        viewed: &HashSet<MatchId>,
    ) -> Vec<(MatchId, ChallengeCategory)> {
        processor
            .classify(&identity(user), viewed)
            .await
            .unwrap()
            .into_iter()
            .map(|view| (view.match_id, view.category))
            .collect()
    }

    async fn shoot(processor: &TestProcessor, id: &MatchId, user: &str, choice: Direction) {
        processor
            .submit_choice(id.clone(), identity(user), None, choice)
            .await
            .unwrap();
    }

    async fn play_out(
        processor: &TestProcessor,
        id: &MatchId,
        challenger: &str,
        defender: &str,
        shots: [Direction; 5],
        dives: [Direction; 5],
    ) {
        for (shot, dive) in shots.into_iter().zip(dives) {
            shoot(processor, id, challenger, shot).await;
            shoot(processor, id, defender, dive).await;
        }
    }

    // =========================================================================
    // CLASSIFIER ACROSS THE LIFECYCLE
    // =========================================================================

    #[tokio::test]
    async fn test_categories_follow_the_match() {
        let (processor, clock) = processor();
        let created = processor.create(identity("anna")).await.unwrap();
        let id = created.match_id.clone();
        assert_eq!(created.status, MatchStatus::AwaitingOpponent);
        assert!(created.defender.is_none());

        assert_eq!(categories(&processor, "anna").await, vec![(id.clone(), ChallengeCategory::Cancelable)]);
        assert!(categories(&processor, "ben").await.is_empty());

        let joined = processor.join(id.clone(), identity("ben")).await.unwrap();
        assert_eq!(joined.status, MatchStatus::Active);
        assert_eq!(joined.role, Some(Role::Defender));
        assert_eq!(categories(&processor, "ben").await, vec![(id.clone(), ChallengeCategory::Invitation)]);
        assert_eq!(
            categories(&processor, "anna").await,
            vec![(id.clone(), ChallengeCategory::WaitingForOpponent)]
        );

        shoot(&processor, &id, "anna", Direction::Left).await;
        assert_eq!(categories(&processor, "ben").await, vec![(id.clone(), ChallengeCategory::Invitation)]);

        // level sequences: nothing for the defender to answer
        shoot(&processor, &id, "ben", Direction::Right).await;
        assert!(categories(&processor, "ben").await.is_empty());

        shoot(&processor, &id, "anna", Direction::Left).await;
        assert_eq!(categories(&processor, "ben").await, vec![(id.clone(), ChallengeCategory::Active)]);
        assert_eq!(
            categories(&processor, "anna").await,
            vec![(id.clone(), ChallengeCategory::WaitingForOpponent)]
        );

        shoot(&processor, &id, "ben", Direction::Right).await;
        for _ in 0..3 {
            shoot(&processor, &id, "anna", Direction::Left).await;
            shoot(&processor, &id, "ben", Direction::Right).await;
        }

        let anna_views = processor.classify(&identity("anna"), &HashSet::new()).await.unwrap();
        assert_eq!(anna_views.len(), 1);
        assert_eq!(anna_views[0].category, ChallengeCategory::FinishedRecent);
        assert_eq!(anna_views[0].winner, Some(Winner::Challenger));
        assert_eq!(anna_views[0].counterpart.as_ref().map(|c| c.user_id.as_str()), Some("ben"));

        // viewed ids never come back as finished_recent
        let viewed: HashSet<MatchId> = [id.clone()].into_iter().collect();
        assert!(categories_viewed(&processor, "anna", &viewed).await.is_empty());
        assert_eq!(categories(&processor, "ben").await, vec![(id.clone(), ChallengeCategory::FinishedRecent)]);

        clock.advance(DEFAULT_RECENCY_WINDOW_MS);
        assert_eq!(categories(&processor, "ben").await.len(), 1);
        clock.advance(1);
        assert!(categories(&processor, "ben").await.is_empty());
        assert!(categories(&processor, "anna").await.is_empty());
    }

    #[tokio::test]
    async fn test_classifier_orders_newest_first() {
        let (processor, clock) = processor();
        let first = processor.create(identity("anna")).await.unwrap().match_id;
        clock.advance(10);
        let second = processor.create(identity("anna")).await.unwrap().match_id;
        clock.advance(10);
        let third = processor.create(identity("carl")).await.unwrap().match_id;
        processor.join(third.clone(), identity("anna")).await.unwrap();

        let ids: Vec<MatchId> = categories(&processor, "anna").await.into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![third, second, first]);
    }

    #[tokio::test]
    async fn test_viewer_without_matches_sees_nothing() {
        let (processor, _) = processor();
        processor.create(identity("anna")).await.unwrap();
        assert!(categories(&processor, "zoe").await.is_empty());
    }

    // =========================================================================
    // SIDE EXITS
    // =========================================================================

    #[tokio::test]
    async fn test_cancelled_challenge_disappears() {
        let (processor, clock) = processor();
        let id = processor.create(identity("anna")).await.unwrap().match_id;

        let by_stranger = processor.cancel(id.clone(), identity("ben")).await.unwrap_err();
        assert!(matches!(by_stranger, MatchError::Forbidden { .. }));

        clock.advance(5);
        let cancelled = processor.cancel(id.clone(), identity("anna")).await.unwrap();
        assert_eq!(cancelled.status, MatchStatus::Cancelled);
        assert_eq!(cancelled.closed_at, Some(EPOCH + 5));
        assert!(cancelled.defender.is_none());
        assert!(categories(&processor, "anna").await.is_empty());

        let join = processor.join(id, identity("ben")).await.unwrap_err();
        assert!(matches!(join, MatchError::InvalidState { .. }));
    }

    #[tokio::test]
    async fn test_cancel_after_join_is_forbidden() {
        let (processor, _) = processor();
        let id = processor.create(identity("anna")).await.unwrap().match_id;
        processor.join(id.clone(), identity("ben")).await.unwrap();

        let err = processor.cancel(id, identity("anna")).await.unwrap_err();
        assert!(matches!(err, MatchError::Forbidden { .. }));
    }

    #[tokio::test]
    async fn test_decline_only_before_first_save() {
        let (processor, _) = processor();
        let declined = processor.create(identity("anna")).await.unwrap().match_id;
        processor.join(declined.clone(), identity("ben")).await.unwrap();
        shoot(&processor, &declined, "anna", Direction::Center).await;

        let by_challenger = processor.decline(declined.clone(), identity("anna")).await.unwrap_err();
        assert!(matches!(by_challenger, MatchError::Forbidden { .. }));

        let projection = processor.decline(declined.clone(), identity("ben")).await.unwrap();
        assert_eq!(projection.status, MatchStatus::Declined);
        assert!(categories(&processor, "anna").await.is_empty());
        assert!(categories(&processor, "ben").await.is_empty());

        let started = processor.create(identity("anna")).await.unwrap().match_id;
        processor.join(started.clone(), identity("ben")).await.unwrap();
        shoot(&processor, &started, "anna", Direction::Center).await;
        shoot(&processor, &started, "ben", Direction::Left).await;
        let late = processor.decline(started, identity("ben")).await.unwrap_err();
        assert!(matches!(late, MatchError::Forbidden { .. }));
    }

    #[tokio::test]
    async fn test_join_errors() {
        let (processor, _) = processor();
        let id = processor.create(identity("anna")).await.unwrap().match_id;

        let own = processor.join(id.clone(), identity("anna")).await.unwrap_err();
        assert!(matches!(own, MatchError::SelfJoin { .. }));

        processor.join(id.clone(), identity("ben")).await.unwrap();
        let full = processor.join(id, identity("carl")).await.unwrap_err();
        assert!(matches!(full, MatchError::AlreadyFull { .. }));

        let missing = processor
            .join(MatchId::parse("missing").unwrap(), identity("carl"))
            .await
            .unwrap_err();
        assert!(matches!(missing, MatchError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_sixth_choice_is_rejected() {
        let (processor, _) = processor();
        let id = processor.create(identity("anna")).await.unwrap().match_id;
        processor.join(id.clone(), identity("ben")).await.unwrap();
        for _ in 0..5 {
            shoot(&processor, &id, "anna", Direction::Left).await;
        }
        let err = processor
            .submit_choice(id, identity("anna"), None, Direction::Left)
            .await
            .unwrap_err();
        assert!(matches!(err, MatchError::InvalidState { .. }));
    }

    // =========================================================================
    // STATISTICS
    // =========================================================================

    #[tokio::test]
    async fn test_stats_and_leaderboard_over_several_matches() {
        use Direction::{Center as C, Left as L, Right as R};
        let (processor, clock) = processor();

        let m1 = processor.create(identity("anna")).await.unwrap().match_id;
        processor.join(m1.clone(), identity("ben")).await.unwrap();
        play_out(&processor, &m1, "anna", "ben", [L; 5], [R; 5]).await;

        clock.advance(100);
        let m2 = processor.create(identity("carl")).await.unwrap().match_id;
        processor.join(m2.clone(), identity("ben")).await.unwrap();
        play_out(&processor, &m2, "carl", "ben", [C; 5], [C; 5]).await;

        clock.advance(100);
        let m3 = processor.create(identity("anna")).await.unwrap().match_id;
        processor.join(m3.clone(), identity("carl")).await.unwrap();
        play_out(&processor, &m3, "anna", "carl", [L, R, C, L, R], [L, R, L, R, L]).await;

        // unfinished matches do not count
        let open = processor.create(identity("anna")).await.unwrap().match_id;
        processor.join(open, identity("ben")).await.unwrap();

        let anna = processor.player_stats(&identity("anna")).await.unwrap();
        assert_eq!((anna.games_played, anna.wins, anna.draws, anna.losses), (2, 1, 1, 0));
        assert_eq!(anna.total_points, 550);
        assert_eq!(anna.goals_scored, 8);
        assert_eq!(anna.perfect_rounds, 1);

        let ben = processor.player_stats(&identity("ben")).await.unwrap();
        assert_eq!((ben.wins, ben.losses), (1, 1));
        assert_eq!(ben.total_points, 525);
        assert_eq!(ben.saves_made, 5);

        let board = processor.leaderboard(10).await.unwrap();
        let order: Vec<(&str, u64)> = board
            .iter()
            .map(|e| (e.stats.identity.user_id.as_str(), e.stats.total_points))
            .collect();
        assert_eq!(order, vec![("anna", 550), ("ben", 525), ("carl", 50)]);
        assert_eq!(board.iter().map(|e| e.rank).collect::<Vec<_>>(), vec![1, 2, 3]);

        assert_eq!(processor.leaderboard(1).await.unwrap().len(), 1);
        let zero = processor.leaderboard(0).await.unwrap_err();
        assert!(matches!(zero, MatchError::Validation { .. }));
    }
}
