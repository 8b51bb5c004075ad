//! Vote and mission card counting.

use super::super::PlayerId;
use std::collections::BTreeMap;
use tracing::instrument;

/// Counts `(approvals, rejections)` among cast team votes.
#[instrument(level = "debug")]
pub fn tally_votes(votes: &BTreeMap<PlayerId, bool>) -> (usize, usize) {
    let approvals = votes.values().filter(|approve| **approve).count();
    (approvals, votes.len() - approvals)
}

/// A team passes on a strict majority of the whole table. Ties reject.
#[instrument(level = "debug")]
pub fn team_approved(approvals: usize, player_count: usize) -> bool {
    approvals > player_count.saturating_sub(approvals)
}

/// Counts fail cards in a mission submission.
#[instrument(level = "debug")]
pub fn count_fails(cards: &BTreeMap<PlayerId, bool>) -> usize {
    cards.values().filter(|success| !**success).count()
}
