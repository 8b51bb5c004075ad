//! Public state summaries.

use super::missions::MissionConfig;
use super::visibility::PrivateInfo;
use super::{GameState, MissionResult, Phase, PlayerId, Team};
use serde::{Deserialize, Serialize};

/// Public record of one completed mission.
///
/// Individual mission cards stay secret; only the fail count is public.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionRecord {
    /// Round the mission belonged to.
    pub round: usize,
    /// Team member names in proposal order.
    pub team: Vec<String>,
    /// Team member seats in proposal order.
    pub team_ids: Vec<PlayerId>,
    /// Whether the mission succeeded.
    pub success: bool,
    /// Fail cards played.
    pub fail_count: usize,
    /// Team size.
    pub team_size: usize,
}

impl MissionRecord {
    pub(super) fn from_result(state: &GameState, result: &MissionResult) -> Self {
        let team = result
            .team_members()
            .iter()
            .filter_map(|seat| state.player(*seat))
            .map(|player| player.name().clone())
            .collect();
        Self {
            round: *result.round_number(),
            team,
            team_ids: result.team_members().clone(),
            success: *result.success(),
            fail_count: *result.fail_count(),
            team_size: result.team_members().len(),
        }
    }
}

/// Observable game state, optionally from one player's point of view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSummary {
    /// Current phase.
    pub phase: Phase,
    /// Round being played.
    pub current_round: usize,
    /// Seat of the current leader.
    pub current_leader: PlayerId,
    /// Missions that succeeded.
    pub successful_missions: usize,
    /// Missions that failed.
    pub failed_missions: usize,
    /// Rejected proposals in the current round.
    pub vote_round: usize,
    /// Whether the game is over.
    pub game_over: bool,
    /// Winning team, once decided.
    pub winner: Option<Team>,
    /// Team awaiting a vote or on the mission.
    pub proposed_team: Vec<PlayerId>,
    /// Seats that have voted on the current proposal.
    pub voted: Vec<PlayerId>,
    /// Config of the round being played.
    pub mission_config: Option<MissionConfig>,
    /// Completed missions in order.
    pub mission_history: Vec<MissionRecord>,
    /// The viewer's private information, when a viewer was given.
    pub private_info: Option<PrivateInfo>,
}

impl StateSummary {
    /// Whether the viewer (if any) leads this round.
    pub fn viewer_leads(&self) -> bool {
        self.private_info
            .as_ref()
            .is_some_and(|info| info.player_id == self.current_leader)
    }

    /// Whether the viewer (if any) is on the proposed team.
    pub fn viewer_on_team(&self) -> bool {
        self.private_info
            .as_ref()
            .is_some_and(|info| self.proposed_team.contains(&info.player_id))
    }
}
