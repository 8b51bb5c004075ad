//! Mission configuration table.
//!
//! One row of five rounds per supported player count. The table is a
//! process-wide constant; games copy the rows they need at construction.

use super::action::SetupError;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Smallest supported table size.
pub const MIN_PLAYERS: usize = 5;
/// Largest supported table size.
pub const MAX_PLAYERS: usize = 10;
/// Rounds in every game.
pub const ROUNDS: usize = 5;

/// Team size and fail threshold for one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MissionConfig {
    /// 1-based round number.
    pub round_number: usize,
    /// Players on the mission team.
    pub team_size: usize,
    /// Fail cards needed to fail the mission.
    pub fails_needed: usize,
}

impl MissionConfig {
    const fn new(round_number: usize, team_size: usize, fails_needed: usize) -> Self {
        Self {
            round_number,
            team_size,
            fails_needed,
        }
    }

    /// Whether a mission with `fail_count` fail cards succeeds.
    pub fn succeeds_with(&self, fail_count: usize) -> bool {
        fail_count < self.fails_needed
    }
}

const fn rounds(sizes: [usize; ROUNDS], fails: [usize; ROUNDS]) -> [MissionConfig; ROUNDS] {
    [
        MissionConfig::new(1, sizes[0], fails[0]),
        MissionConfig::new(2, sizes[1], fails[1]),
        MissionConfig::new(3, sizes[2], fails[2]),
        MissionConfig::new(4, sizes[3], fails[3]),
        MissionConfig::new(5, sizes[4], fails[4]),
    ]
}

const TABLE: [[MissionConfig; ROUNDS]; MAX_PLAYERS - MIN_PLAYERS + 1] = [
    rounds([2, 3, 2, 3, 3], [1, 1, 1, 1, 1]),
    rounds([2, 3, 4, 3, 4], [1, 1, 1, 1, 1]),
    rounds([2, 3, 3, 4, 4], [1, 1, 1, 2, 1]),
    rounds([3, 4, 4, 5, 5], [1, 1, 1, 2, 1]),
    rounds([3, 4, 4, 5, 5], [1, 1, 1, 2, 1]),
    rounds([3, 4, 4, 5, 5], [1, 1, 1, 2, 1]),
];

/// Returns the five round configs for `player_count`.
///
/// # Errors
///
/// Returns [`SetupError::UnsupportedPlayerCount`] outside `5..=10`.
#[instrument]
pub fn mission_configs(
    player_count: usize,
) -> Result<&'static [MissionConfig; ROUNDS], SetupError> {
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&player_count) {
        return Err(SetupError::UnsupportedPlayerCount(player_count));
    }
    Ok(&TABLE[player_count - MIN_PLAYERS])
}
