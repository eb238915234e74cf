//! Viewer-specific projection of a match.
//!
//! The viewer always sees their own choices. The opponent's choices stay
//! hidden behind a count until the match is finished.

use pd_01_match_store::{Match, MatchStatus, Participant};
use serde::Serialize;
use shared_types::{Direction, FinalScore, Identity, MatchId, Role, Timestamp, UserId, Winner};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantView {
    pub identity: Identity,
    pub choice_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<Direction>>,
}

impl ParticipantView {
    fn build(participant: &Participant, reveal: bool) -> Self {
        Self {
            identity: participant.identity.clone(),
            choice_count: participant.choice_count(),
            choices: reveal.then(|| participant.choices.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchProjection {
    pub match_id: MatchId,
    pub status: MatchStatus,
    /// Role of the viewer, `None` for a non-participant.
    pub role: Option<Role>,
    pub created_at: Timestamp,
    pub version: u64,
    pub challenger: ParticipantView,
    pub defender: Option<ParticipantView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<FinalScore>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<Winner>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<Timestamp>,
}

impl MatchProjection {
    pub fn for_viewer(record: &Match, viewer: &UserId) -> Self {
        let role = record.role_of(viewer);
        let finished = record.status() == MatchStatus::Finished;
        let reveal = |side: Role| finished || role == Some(side);

        Self {
            match_id: record.id().clone(),
            status: record.status(),
            role,
            created_at: record.created_at(),
            version: record.version(),
            challenger: ParticipantView::build(record.challenger(), reveal(Role::Challenger)),
            defender: record
                .defender()
                .map(|d| ParticipantView::build(d, reveal(Role::Defender))),
            score: record.outcome().map(|o| o.score),
            winner: record.winner(),
            finished_at: record.finished_at(),
            closed_at: record.closed_at(),
        }
    }
}
