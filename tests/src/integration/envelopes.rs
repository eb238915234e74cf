//! # JSON Envelopes
//!
//! Action envelopes and queries as presentation sends them, through both the
//! processor's `handle` and the runtime's line protocol.

#[cfg(test)]
mod tests {
    use crate::fixtures::processor;
    use duel_runtime::{handle_line, Response};
    use pd_01_match_store::MatchError;
    use pd_04_action_processor::{ActionApi, ActionEnvelope};
    use serde_json::{json, Value};

    fn identity(user: &str) -> Value {
        json!({"userId": user, "displayName": user.to_uppercase(), "avatar": "keeper"})
    }

    fn envelope(value: Value) -> ActionEnvelope {
        serde_json::from_value(value).unwrap()
    }

    async fn send(processor: &crate::fixtures::TestProcessor, request: Value) -> Value {
        serde_json::to_value(handle_line(processor, &request.to_string()).await).unwrap()
    }

    #[tokio::test]
    async fn test_envelope_drives_full_match() {
        let (processor, _) = processor();
        let created = processor
            .handle(envelope(json!({"action": "create", "identity": identity("anna")})))
            .await
            .unwrap();
        let id = created.match_id.to_string();

        processor
            .handle(envelope(json!({"action": "join", "matchId": id, "identity": identity("ben")})))
            .await
            .unwrap();

        let mut last = None;
        for round in 0..5 {
            let shot = ["left", "center", "right", "left", "center"][round];
            processor
                .handle(envelope(json!({
                    "action": "submit-choice", "matchId": id, "choice": shot,
                    "role": "challenger", "identity": identity("anna"),
                })))
                .await
                .unwrap();
            last = Some(
                processor
                    .handle(envelope(json!({
                        "action": "submit-choice", "matchId": id, "choice": shot,
                        "role": "defender", "identity": identity("ben"),
                    })))
                    .await
                    .unwrap(),
            );
        }

        let body = serde_json::to_value(last.unwrap()).unwrap();
        assert_eq!(body["status"], "finished");
        assert_eq!(body["winner"], "defender");
        assert_eq!(body["score"]["defenderScore"], 525);
        assert_eq!(body["challenger"]["choices"], json!(["left", "center", "right", "left", "center"]));
    }

    #[tokio::test]
    async fn test_opponent_choices_hidden_in_response() {
        let (processor, _) = processor();
        let created = send(&processor, json!({"action": "create", "identity": identity("anna")})).await;
        let id = created["ok"]["matchId"].clone();
        send(&processor, json!({"action": "join", "matchId": id, "identity": identity("ben")})).await;
        send(
            &processor,
            json!({"action": "submit-choice", "matchId": id, "choice": "right", "identity": identity("anna")}),
        )
        .await;

        let for_ben = send(&processor, json!({"query": "view", "matchId": id, "identity": identity("ben")})).await;
        assert_eq!(for_ben["ok"]["role"], "defender");
        assert_eq!(for_ben["ok"]["challenger"]["choiceCount"], 1);
        assert!(for_ben["ok"]["challenger"].get("choices").is_none());

        let for_anna = send(&processor, json!({"query": "view", "matchId": id, "identity": identity("anna")})).await;
        assert_eq!(for_anna["ok"]["challenger"]["choices"], json!(["right"]));

        let for_carl = send(&processor, json!({"query": "view", "matchId": id, "identity": identity("carl")})).await;
        assert_eq!(for_carl["error"]["code"], "forbidden");
    }

    #[tokio::test]
    async fn test_missing_fields_are_validation_errors() {
        let (processor, _) = processor();
        let cases = [
            json!({"action": "join", "identity": identity("ben")}),
            json!({"action": "submit-choice", "matchId": "m1", "identity": identity("ben")}),
            json!({"action": "submit-choice", "matchId": "m1", "choice": "upper-ninety", "identity": identity("ben")}),
            json!({"action": "cancel-challenge", "matchId": "m1", "identity": {"userId": "ben", "displayName": " "}}),
        ];
        for case in cases {
            let err = processor.handle(envelope(case.clone())).await.unwrap_err();
            assert!(matches!(err, MatchError::Validation { .. }), "{case}");
            assert!(!err.is_retryable());
        }

        let missing_identity = send(&processor, json!({"action": "create"})).await;
        assert_eq!(missing_identity["error"]["code"], "validation_error");

        let blank_user = send(
            &processor,
            json!({"action": "create", "identity": {"userId": "  ", "displayName": "X"}}),
        )
        .await;
        assert_eq!(blank_user["error"]["code"], "validation_error");
    }

    #[tokio::test]
    async fn test_padded_user_id_cannot_join_own_match() {
        let (processor, _) = processor();
        let created = send(&processor, json!({"action": "create", "identity": identity("anna")})).await;
        let id = created["ok"]["matchId"].clone();

        let padded = json!({"userId": " anna ", "displayName": "Anna"});
        let joined = send(&processor, json!({"action": "join", "matchId": id, "identity": padded.clone()})).await;
        assert_eq!(joined["error"]["code"], "self_join");

        let err = processor
            .handle(envelope(json!({"action": "join", "matchId": id, "identity": {"userId": "anna\t", "displayName": "Anna"}})))
            .await
            .unwrap_err();
        assert!(matches!(err, MatchError::SelfJoin { .. }));

        let listed = send(&processor, json!({"query": "classify", "identity": padded})).await;
        assert_eq!(listed["ok"][0]["category"], "cancelable");
    }

    #[tokio::test]
    async fn test_claimed_role_must_match() {
        let (processor, _) = processor();
        let created = send(&processor, json!({"action": "create", "identity": identity("anna")})).await;
        let id = created["ok"]["matchId"].clone();
        send(&processor, json!({"action": "join", "matchId": id, "identity": identity("ben")})).await;

        let response = send(
            &processor,
            json!({"action": "submit-choice", "matchId": id, "choice": "left", "role": "challenger", "identity": identity("ben")}),
        )
        .await;
        assert_eq!(response["error"]["code"], "forbidden");
        assert_eq!(response["error"]["retryable"], false);
    }

    #[tokio::test]
    async fn test_decline_and_cancel_envelopes() {
        let (processor, _) = processor();
        let open = send(&processor, json!({"action": "create", "identity": identity("anna")})).await;
        let open_id = open["ok"]["matchId"].clone();
        let cancelled = send(
            &processor,
            json!({"action": "cancel-challenge", "matchId": open_id, "identity": identity("anna")}),
        )
        .await;
        assert_eq!(cancelled["ok"]["status"], "cancelled");

        let again = send(
            &processor,
            json!({"action": "cancel-challenge", "matchId": open_id, "identity": identity("anna")}),
        )
        .await;
        assert_eq!(again["error"]["code"], "invalid_state");

        let joined = send(&processor, json!({"action": "create", "identity": identity("anna")})).await;
        let joined_id = joined["ok"]["matchId"].clone();
        send(&processor, json!({"action": "join", "matchId": joined_id, "identity": identity("ben")})).await;
        let declined = send(
            &processor,
            json!({"action": "decline-challenge", "matchId": joined_id, "identity": identity("ben")}),
        )
        .await;
        assert_eq!(declined["ok"]["status"], "declined");
    }

    #[tokio::test]
    async fn test_queries_over_the_line_protocol() {
        let (processor, _) = processor();
        let created = send(&processor, json!({"action": "create", "identity": identity("anna")})).await;
        let id = created["ok"]["matchId"].clone();

        let listed = send(
            &processor,
            json!({"query": "classify", "identity": identity("anna"), "viewed": [id]}),
        )
        .await;
        assert_eq!(listed["ok"][0]["category"], "cancelable");
        assert_eq!(listed["ok"][0]["role"], "challenger");
        assert!(listed["ok"][0]["counterpart"].is_null());

        let stats = send(&processor, json!({"query": "stats", "identity": identity("anna")})).await;
        assert_eq!(stats["ok"]["gamesPlayed"], 0);

        let board = send(&processor, json!({"query": "leaderboard", "limit": 1000})).await;
        assert_eq!(board["error"]["code"], "validation_error");

        let unknown = handle_line(processor.as_ref(), r#"{"query":"history"}"#).await;
        assert!(matches!(unknown, Response::Error(ref body) if body.code == "validation_error"));
    }
}
