//! Core domain types for Avalon.

use super::missions::MissionConfig;
use super::roles::Role;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Seat index of a player, stable for the lifetime of a game (0..N-1).
pub type PlayerId = usize;

/// Allegiance of a role.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Team {
    /// Loyal servants of Arthur.
    #[display("GOOD")]
    Good,
    /// Minions of Mordred.
    #[display("EVIL")]
    Evil,
}

/// Phase of the game state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// Roles are being dealt.
    #[display("INITIALIZATION")]
    Initialization,
    /// Table talk; the leader proposes a team.
    #[display("DISCUSSION")]
    Discussion,
    /// Every player votes on the proposed team.
    #[display("VOTING")]
    Voting,
    /// The approved team runs the mission.
    #[display("MISSION")]
    Mission,
    /// Good has three successes; the assassin picks a target.
    #[display("ASSASSINATION")]
    Assassination,
    /// The game is over.
    #[display("FINISHED")]
    Finished,
}

/// A seated player.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct Player {
    /// Seat index.
    id: PlayerId,
    /// Display name.
    name: String,
    /// Secret role.
    role: Role,
}

impl Player {
    /// Seats a player.
    pub fn new(id: PlayerId, name: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            name: name.into(),
            role,
        }
    }

    /// Returns the player's team.
    pub fn team(&self) -> Team {
        self.role.team()
    }
}

/// Append-only record of one completed mission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct MissionResult {
    /// Round this mission belonged to (1-based).
    round_number: usize,
    /// Team members in proposal order.
    team_members: Vec<PlayerId>,
    /// Secret per-member vote (`true` = success card).
    votes: BTreeMap<PlayerId, bool>,
    /// Whether the mission succeeded.
    success: bool,
    /// Number of fail cards played.
    fail_count: usize,
}

impl MissionResult {
    pub(super) fn new(
        round_number: usize,
        team_members: Vec<PlayerId>,
        votes: BTreeMap<PlayerId, bool>,
        success: bool,
        fail_count: usize,
    ) -> Self {
        Self {
            round_number,
            team_members,
            votes,
            success,
            fail_count,
        }
    }
}

/// Complete mutable state of one game.
///
/// Only the engine mutates it; once `game_over` is set it is read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct GameState {
    /// Seated players, indexed by seat.
    pub(super) players: Vec<Player>,
    /// Current phase.
    pub(super) phase: Phase,
    /// Round being played (1-based; 0 before the first round).
    pub(super) current_round: usize,
    /// Seat of the current leader.
    pub(super) current_leader: PlayerId,
    /// Per-round mission configs for this player count.
    pub(super) mission_configs: Vec<MissionConfig>,
    /// Completed missions in order.
    pub(super) mission_results: Vec<MissionResult>,
    /// Team awaiting a vote or running the mission.
    pub(super) proposed_team: Vec<PlayerId>,
    /// Team votes cast so far (`true` = approve).
    pub(super) votes: BTreeMap<PlayerId, bool>,
    /// Rejected proposals in the current round.
    pub(super) vote_round: usize,
    /// Missions that succeeded.
    pub(super) successful_missions: usize,
    /// Missions that failed.
    pub(super) failed_missions: usize,
    /// Set once a winner is decided.
    pub(super) game_over: bool,
    /// Winning team, present iff `game_over`.
    pub(super) winner: Option<Team>,
    /// Seat named by the assassin.
    pub(super) assassination_target: Option<PlayerId>,
}

impl GameState {
    /// Creates the state for freshly seated players, before the first round.
    pub(super) fn new(players: Vec<Player>, mission_configs: Vec<MissionConfig>) -> Self {
        Self {
            players,
            phase: Phase::Initialization,
            current_round: 0,
            current_leader: 0,
            mission_configs,
            mission_results: Vec::new(),
            proposed_team: Vec::new(),
            votes: BTreeMap::new(),
            vote_round: 0,
            successful_missions: 0,
            failed_missions: 0,
            game_over: false,
            winner: None,
            assassination_target: None,
        }
    }

    /// Looks up a player by seat.
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    /// Number of seated players.
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Config of the round being played, if any.
    pub fn current_mission(&self) -> Option<&MissionConfig> {
        self.current_round
            .checked_sub(1)
            .and_then(|index| self.mission_configs.get(index))
    }

    /// Seat that follows `seat` around the table.
    pub(super) fn next_seat(&self, seat: PlayerId) -> PlayerId {
        (seat + 1) % self.players.len()
    }
}
