//! Challenge views handed to presentation.

use pd_01_match_store::Match;
use serde::Serialize;
use shared_types::{Identity, MatchId, Role, Timestamp, UserId, Winner};
use std::collections::HashSet;

use super::category::{categorize, ChallengeCategory};
use crate::config::ClassifierConfig;

/// One entry of a viewer's challenge list. Derived per query, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeView {
    pub match_id: MatchId,
    /// The other player, `None` while nobody joined.
    pub counterpart: Option<Identity>,
    pub created_at: Timestamp,
    pub category: ChallengeCategory,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<Winner>,
}

impl ChallengeView {
    fn build(record: &Match, role: Role, category: ChallengeCategory) -> Self {
        Self {
            match_id: record.id().clone(),
            counterpart: record.counterpart_of(role).cloned(),
            created_at: record.created_at(),
            category,
            role,
            winner: match category {
                ChallengeCategory::FinishedRecent => record.winner(),
                _ => None,
            },
        }
    }
}

/// Classifies `matches` for `viewer`, newest first, ties by match id.
pub fn classify_matches<'a, I>(
    matches: I,
    viewer: &UserId,
    viewed: &HashSet<MatchId>,
    now: Timestamp,
    config: &ClassifierConfig,
) -> Vec<ChallengeView>
where
    I: IntoIterator<Item = &'a Match>,
{
    let mut views: Vec<ChallengeView> = matches
        .into_iter()
        .filter_map(|record| {
            categorize(record, viewer, viewed, now, config)
                .map(|(role, category)| ChallengeView::build(record, role, category))
        })
        .collect();

    views.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.match_id.cmp(&b.match_id))
    });
    views
}
