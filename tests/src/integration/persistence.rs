//! # File Persistence
//!
//! The JSON-file repository behind the full runtime: matches survive a
//! restart and keep classifying and scoring the same way.

#[cfg(test)]
mod tests {
    use duel_runtime::container::StorageBackend;
    use duel_runtime::{DuelConfig, DuelRuntime};
    use pd_01_match_store::{JsonFileMatchRepository, MatchRepository};
    use serde_json::{json, Value};
    use std::path::Path;

    fn config(dir: &Path) -> DuelConfig {
        let mut config = DuelConfig::default();
        config.storage.backend = StorageBackend::File;
        config.storage.data_dir = dir.to_path_buf();
        config
    }

    fn identity(user: &str) -> Value {
        json!({"userId": user, "displayName": user})
    }

    async fn run(runtime: &DuelRuntime, requests: &[Value]) -> Vec<Value> {
        let input: String = requests.iter().map(|r| format!("{r}\n")).collect();
        let mut output = Vec::new();
        runtime.serve(input.as_bytes(), &mut output).await.unwrap();
        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_matches_survive_restart() {
        let dir = tempfile::tempdir().unwrap();

        let match_id = {
            let runtime = DuelRuntime::new(&config(dir.path())).unwrap();
            let created = run(&runtime, &[json!({"action": "create", "identity": identity("anna")})]).await;
            let id = created[0]["ok"]["matchId"].as_str().unwrap().to_string();

            let mut requests = vec![json!({"action": "join", "matchId": id, "identity": identity("ben")})];
            for _ in 0..5 {
                requests.push(json!({"action": "submit-choice", "matchId": id, "choice": "center", "identity": identity("anna")}));
                requests.push(json!({"action": "submit-choice", "matchId": id, "choice": "left", "identity": identity("ben")}));
            }
            let responses = run(&runtime, &requests).await;
            assert!(responses.iter().all(|r| r.get("ok").is_some()), "{responses:?}");
            id
        };

        let reopened = DuelRuntime::new(&config(dir.path())).unwrap();
        let responses = run(
            &reopened,
            &[
                json!({"query": "view", "matchId": match_id, "identity": identity("ben")}),
                json!({"query": "classify", "identity": identity("ben")}),
                json!({"query": "leaderboard"}),
            ],
        )
        .await;

        let view = &responses[0]["ok"];
        assert_eq!(view["status"], "finished");
        assert_eq!(view["version"], 11);
        assert_eq!(view["score"]["challengerScore"], 500);

        assert_eq!(responses[1]["ok"][0]["category"], "finished_recent");
        assert_eq!(responses[1]["ok"][0]["winner"], "challenger");

        let board = responses[2]["ok"].as_array().unwrap();
        assert_eq!(board[0]["identity"]["userId"], "anna");
        assert_eq!(board[0]["rank"], 1);
        assert_eq!(board[1]["identity"]["userId"], "ben");
    }

    #[tokio::test]
    async fn test_one_file_per_match() {
        let dir = tempfile::tempdir().unwrap();
        let runtime = DuelRuntime::new(&config(dir.path())).unwrap();
        run(
            &runtime,
            &[
                json!({"action": "create", "identity": identity("anna")}),
                json!({"action": "create", "identity": identity("ben")}),
                json!({"action": "create", "identity": identity("carl")}),
            ],
        )
        .await;

        let files = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "json"))
            .count();
        assert_eq!(files, 3);

        let repository = JsonFileMatchRepository::open(dir.path()).unwrap();
        assert_eq!(repository.list_finished().await.unwrap().len(), 0);
    }
}
