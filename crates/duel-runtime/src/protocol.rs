//! Line-oriented JSON protocol.
//!
//! One request per line, one response per line.
//!
//! ```text
//! → {"action":"create","identity":{"userId":"anna","displayName":"Anna"}}
//! ← {"ok":{"matchId":"…","status":"awaiting_opponent",…}}
//! → {"query":"classify","identity":{…},"viewed":["…"]}
//! ← {"ok":[{"matchId":"…","category":"cancelable",…}]}
//! → {"action":"join","matchId":"nope","identity":{…}}
//! ← {"error":{"code":"not_found","message":"match not found: nope","retryable":false}}
//! ```
//!
//! Queries: `classify`, `view`, `stats`, `leaderboard`.

use pd_01_match_store::{MatchError, MatchResult};
use pd_04_action_processor::{ActionApi, ActionEnvelope};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared_types::{Identity, MatchId};
use std::collections::HashSet;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

pub const DEFAULT_LEADERBOARD_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "query", rename_all = "kebab-case")]
pub enum QueryRequest {
    Classify {
        identity: Identity,
        #[serde(default)]
        viewed: Vec<String>,
    },
    View {
        identity: Identity,
        #[serde(rename = "matchId")]
        match_id: String,
    },
    Stats {
        identity: Identity,
    },
    Leaderboard {
        #[serde(default)]
        limit: Option<usize>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    pub retryable: bool,
}

impl From<&MatchError> for ErrorBody {
    fn from(err: &MatchError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
            retryable: err.is_retryable(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Response {
    Ok(Value),
    Error(ErrorBody),
}

impl Response {
    fn from_result<T: Serialize>(result: MatchResult<T>) -> Self {
        match result.and_then(|value| {
            serde_json::to_value(value).map_err(|e| MatchError::Unavailable {
                reason: format!("response encoding failed: {e}"),
            })
        }) {
            Ok(value) => Response::Ok(value),
            Err(err) => Response::Error(ErrorBody::from(&err)),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Response::Ok(_))
    }
}

/// Parses and executes one request line.
pub async fn handle_line<P>(processor: &P, line: &str) -> Response
where
    P: ActionApi + ?Sized,
{
    let value: Value = match serde_json::from_str(line) {
        Ok(value) => value,
        Err(e) => return malformed(format!("request is not valid JSON: {e}")),
    };

    if value.get("query").is_some() {
        match serde_json::from_value::<QueryRequest>(value) {
            Ok(query) => run_query(processor, query).await,
            Err(e) => malformed(format!("malformed query: {e}")),
        }
    } else {
        match serde_json::from_value::<ActionEnvelope>(value) {
            Ok(envelope) => Response::from_result(processor.handle(envelope).await),
            Err(e) => malformed(format!("malformed action: {e}")),
        }
    }
}

async fn run_query<P>(processor: &P, query: QueryRequest) -> Response
where
    P: ActionApi + ?Sized,
{
    match query {
        QueryRequest::Classify { identity, viewed } => {
            let viewed = match parse_ids(&viewed) {
                Ok(viewed) => viewed,
                Err(err) => return Response::Error(ErrorBody::from(&err)),
            };
            Response::from_result(processor.classify(&identity, &viewed).await)
        }
        QueryRequest::View { identity, match_id } => match MatchId::parse(&match_id) {
            Ok(id) => Response::from_result(processor.view(&identity, &id).await),
            Err(e) => Response::Error(ErrorBody::from(&MatchError::from(e))),
        },
        QueryRequest::Stats { identity } => {
            Response::from_result(processor.player_stats(&identity).await)
        }
        QueryRequest::Leaderboard { limit } => Response::from_result(
            processor
                .leaderboard(limit.unwrap_or(DEFAULT_LEADERBOARD_LIMIT))
                .await,
        ),
    }
}

fn parse_ids(raw: &[String]) -> MatchResult<HashSet<MatchId>> {
    raw.iter()
        .map(|id| MatchId::parse(id).map_err(MatchError::from))
        .collect()
}

fn malformed(reason: String) -> Response {
    Response::Error(ErrorBody::from(&MatchError::validation(reason)))
}

/// Serves requests from `reader` until end of input. Returns the number of
/// requests answered.
pub async fn serve<P, R, W>(processor: &P, reader: R, mut writer: W) -> std::io::Result<u64>
where
    P: ActionApi + ?Sized,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    let mut served = 0u64;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let response = handle_line(processor, line).await;
        debug!(request = served, ok = response.is_ok(), "request served");

        let mut encoded = serde_json::to_vec(&response)?;
        encoded.push(b'\n');
        writer.write_all(&encoded).await?;
        writer.flush().await?;
        served += 1;
    }

    info!(served, "input closed");
    Ok(served)
}
