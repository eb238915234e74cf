//! # Concurrency Races
//!
//! Many tasks on a multi-thread runtime hitting the same match, or many
//! matches at once. A race has exactly one winner and the losers see a typed
//! error, never a partial write.

#[cfg(test)]
mod tests {
    use crate::fixtures::{directions, identity, processor, TestProcessor};
    use pd_01_match_store::{MatchError, MatchStatus};
    use pd_04_action_processor::ActionApi;
    use shared_types::{Direction, MatchId};
    use std::sync::Arc;
    use tokio::task::JoinSet;

    async fn one_choice_from_the_end(processor: &TestProcessor) -> MatchId {
        let id = processor.create(identity("anna")).await.unwrap().match_id;
        processor.join(id.clone(), identity("ben")).await.unwrap();
        for round in 0..5 {
            processor
                .submit_choice(id.clone(), identity("anna"), None, Direction::Left)
                .await
                .unwrap();
            if round < 4 {
                processor
                    .submit_choice(id.clone(), identity("ben"), None, Direction::Right)
                    .await
                    .unwrap();
            }
        }
        id
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_racing_final_choice_finishes_once() {
        for _ in 0..20 {
            let (processor, _) = processor();
            let id = one_choice_from_the_end(&processor).await;

            let mut tasks = JoinSet::new();
            for dive in [Direction::Left, Direction::Center, Direction::Right, Direction::Left] {
                let processor = Arc::clone(&processor);
                let id = id.clone();
                tasks.spawn(async move {
                    processor.submit_choice(id, identity("ben"), None, dive).await
                });
            }

            let mut finished = Vec::new();
            while let Some(joined) = tasks.join_next().await {
                match joined.unwrap() {
                    Ok(projection) => finished.push(projection),
                    Err(err) => assert!(
                        matches!(err, MatchError::Conflict { .. } | MatchError::InvalidState { .. }),
                        "unexpected loser error: {err}"
                    ),
                }
            }

            assert_eq!(finished.len(), 1, "exactly one final choice commits");
            let winner = &finished[0];
            assert_eq!(winner.status, MatchStatus::Finished);

            let stored = processor.view(&identity("ben"), &id).await.unwrap();
            assert_eq!(stored.defender.unwrap().choice_count, 5);
            assert_eq!(stored.score, winner.score);
            assert_eq!(stored.version, winner.version);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_racing_joins_seat_one_defender() {
        let (processor, _) = processor();
        let id = processor.create(identity("anna")).await.unwrap().match_id;

        let mut tasks = JoinSet::new();
        for n in 0..16 {
            let processor = Arc::clone(&processor);
            let id = id.clone();
            tasks.spawn(async move {
                let user = format!("player-{n}");
                processor.join(id, identity(&user)).await.map(|_| user)
            });
        }

        let mut seated = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined.unwrap() {
                Ok(user) => seated.push(user),
                Err(err) => assert!(
                    matches!(err, MatchError::Conflict { .. } | MatchError::AlreadyFull { .. }),
                    "unexpected loser error: {err}"
                ),
            }
        }

        assert_eq!(seated.len(), 1);
        let view = processor.view(&identity("anna"), &id).await.unwrap();
        assert_eq!(view.status, MatchStatus::Active);
        assert_eq!(view.version, 1);
        assert_eq!(
            view.defender.unwrap().identity.user_id.as_str(),
            seated[0].as_str()
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_independent_matches_progress_in_parallel() {
        let (processor, _) = processor();

        let mut tasks = JoinSet::new();
        for n in 0..32u64 {
            let processor = Arc::clone(&processor);
            tasks.spawn(async move {
                let challenger = format!("c-{n}");
                let defender = format!("d-{n}");
                let id = processor.create(identity(&challenger)).await?.match_id;
                processor.join(id.clone(), identity(&defender)).await?;
                let mut last = None;
                for (shot, dive) in directions(n).into_iter().zip(directions(n + 1000)) {
                    processor
                        .submit_choice(id.clone(), identity(&challenger), None, shot)
                        .await?;
                    last = Some(
                        processor
                            .submit_choice(id.clone(), identity(&defender), None, dive)
                            .await?,
                    );
                }
                Ok::<_, MatchError>(last)
            });
        }

        let mut completed = 0;
        while let Some(joined) = tasks.join_next().await {
            let last = joined.unwrap().unwrap().unwrap();
            assert_eq!(last.status, MatchStatus::Finished);
            assert!(last.winner.is_some());
            completed += 1;
        }
        assert_eq!(completed, 32);
        assert_eq!(processor.leaderboard(100).await.unwrap().len(), 64);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_choices_from_both_players_interleave_safely() {
        let (processor, _) = processor();
        let id = processor.create(identity("anna")).await.unwrap().match_id;
        processor.join(id.clone(), identity("ben")).await.unwrap();

        let submit_all = |user: &'static str, choice: Direction| {
            let processor = Arc::clone(&processor);
            let id = id.clone();
            tokio::spawn(async move {
                let mut accepted = 0;
                while accepted < 5 {
                    match processor.submit_choice(id.clone(), identity(user), None, choice).await {
                        Ok(_) => accepted += 1,
                        Err(err) if err.is_retryable() => tokio::task::yield_now().await,
                        Err(err) => panic!("{user}: {err}"),
                    }
                }
            })
        };

        let anna = submit_all("anna", Direction::Left);
        let ben = submit_all("ben", Direction::Left);
        anna.await.unwrap();
        ben.await.unwrap();

        let view = processor.view(&identity("anna"), &id).await.unwrap();
        assert_eq!(view.status, MatchStatus::Finished);
        assert_eq!(view.version, 11);
        let score = view.score.unwrap();
        assert_eq!((score.challenger_score, score.defender_score), (0, 525));
    }
}
