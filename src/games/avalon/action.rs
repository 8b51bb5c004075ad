//! First-class action types for Avalon.
//!
//! Actions are domain events: they carry a player's intent, can be checked
//! against the current state before anything changes, and can be
//! serialized and replayed.

use super::types::{Phase, PlayerId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The leader names a mission team.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamProposal {
    /// Seat proposing the team.
    pub leader: PlayerId,
    /// Proposed members in order.
    pub members: Vec<PlayerId>,
}

/// One player's vote on the proposed team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamVote {
    /// Voting seat.
    pub player: PlayerId,
    /// `true` approves the team.
    pub approve: bool,
}

/// Secret mission cards from every team member.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MissionVotes {
    /// Member seat to card (`true` = success).
    pub votes: BTreeMap<PlayerId, bool>,
}

/// The assassin names a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssassinationAttempt {
    /// Seat being assassinated.
    pub target: PlayerId,
}

/// Any action accepted by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::From)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Propose a mission team.
    ProposeTeam(TeamProposal),
    /// Vote on the proposed team.
    VoteOnTeam(TeamVote),
    /// Resolve the team vote.
    #[from(ignore)]
    ProcessVotes,
    /// Submit the mission cards.
    SubmitMission(MissionVotes),
    /// Assassinate a player.
    Assassinate(AssassinationAttempt),
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::ProposeTeam(p) => write!(f, "seat {} proposes {:?}", p.leader, p.members),
            Action::VoteOnTeam(v) => {
                write!(f, "seat {} {}", v.player, if v.approve { "approves" } else { "rejects" })
            }
            Action::ProcessVotes => write!(f, "resolve team vote"),
            Action::SubmitMission(m) => write!(f, "mission cards from {:?}", m.votes.keys()),
            Action::Assassinate(a) => write!(f, "assassinate seat {}", a.target),
        }
    }
}

/// Outcome of resolving the team vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoteResolution {
    /// Not everyone has voted; nothing changed.
    Pending {
        /// Votes still missing.
        missing: usize,
    },
    /// Strict majority approved; the mission begins.
    Approved {
        /// Approving votes.
        approvals: usize,
        /// Rejecting votes.
        rejections: usize,
    },
    /// The proposal failed.
    Rejected {
        /// Approving votes.
        approvals: usize,
        /// Rejecting votes.
        rejections: usize,
        /// Rejected proposals this round, including this one.
        vote_round: usize,
    },
}

impl VoteResolution {
    /// Whether every vote was in and the tally was applied.
    pub fn completed(&self) -> bool {
        !matches!(self, VoteResolution::Pending { .. })
    }

    /// Whether the team was approved.
    pub fn passed(&self) -> bool {
        matches!(self, VoteResolution::Approved { .. })
    }
}

/// Recoverable refusal of an action. State is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Rejection {
    /// The game already has a winner.
    #[display("Game is already over")]
    GameOver,

    /// The action does not belong to the current phase.
    #[display("Action needs phase {expected}, game is in {actual}")]
    WrongPhase {
        /// Phase the action requires.
        expected: Phase,
        /// Phase the game is in.
        actual: Phase,
    },

    /// Someone other than the leader proposed a team.
    #[display("Seat {player} is not the leader (leader is seat {leader})")]
    NotLeader {
        /// Seat that tried to propose.
        player: PlayerId,
        /// Actual leader.
        leader: PlayerId,
    },

    /// Proposed team has the wrong number of members.
    #[display("Team needs {expected} members, got {actual}")]
    WrongTeamSize {
        /// Size the round requires.
        expected: usize,
        /// Size proposed.
        actual: usize,
    },

    /// A seat that is not at the table.
    #[display("Unknown player {_0}")]
    UnknownPlayer(PlayerId),

    /// A seat listed twice in one proposal.
    #[display("Player {_0} appears twice in the team")]
    DuplicateMember(PlayerId),

    /// The player already voted on this proposal.
    #[display("Player {_0} already voted")]
    AlreadyVoted(PlayerId),

    /// Mission cards do not come from exactly the team.
    #[display("Mission votes must come from exactly {expected:?}, got {actual:?}")]
    MissionVoteMismatch {
        /// Team members.
        expected: Vec<PlayerId>,
        /// Seats that submitted cards.
        actual: Vec<PlayerId>,
    },
}

impl std::error::Error for Rejection {}

/// Construction-time failure; retrying cannot fix it.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SetupError {
    /// Player count outside the supported range.
    #[display("Unsupported player count {_0} (supported: 5-10)")]
    UnsupportedPlayerCount(#[error(not(source))] usize),

    /// Name list length differs from the player count.
    #[display("Expected {expected} player names, got {actual}")]
    NameCountMismatch {
        /// Declared player count.
        expected: usize,
        /// Names supplied.
        actual: usize,
    },

    /// Explicit role list is not the canonical set for the table size.
    #[display("Roles {_0:?} are not the canonical set for this player count")]
    NonCanonicalRoles(#[error(not(source))] Vec<super::roles::Role>),
}
