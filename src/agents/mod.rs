//! Decision collaborators.
//!
//! The engine never asks anyone anything. An [`Agent`] is consulted by the
//! orchestrator whenever the game needs a choice from one seat, and sees
//! only that seat's redacted [`StateSummary`].

mod random;

pub use random::{DEFAULT_SABOTAGE_CHANCE, RandomAgent};

use crate::games::avalon::{PlayerId, StateSummary};
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// The kind of choice being asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum DecisionKind {
    /// The leader names a team.
    #[display("propose team")]
    ProposeTeam,
    /// Approve or reject the proposed team.
    #[display("vote on team")]
    VoteOnTeam,
    /// Play a success or fail card on the mission.
    #[display("mission vote")]
    MissionVote,
    /// Name the assassination target.
    #[display("assassinate")]
    Assassinate,
}

/// Everything an agent is shown when asked to decide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct DecisionRequest {
    /// Seat being asked.
    pub seat: PlayerId,
    /// What is being decided.
    pub kind: DecisionKind,
    /// The seat's view of the game, private information included.
    pub summary: StateSummary,
}

/// An agent's answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", content = "value", rename_all = "snake_case")]
pub enum Decision {
    /// Proposed team members.
    Team(Vec<PlayerId>),
    /// Team vote (`true` approves).
    Vote(bool),
    /// Mission card (`true` is a success card).
    MissionCard(bool),
    /// Assassination target.
    Target(PlayerId),
}

impl Decision {
    /// The kind of request this decision answers.
    pub fn kind(&self) -> DecisionKind {
        match self {
            Decision::Team(_) => DecisionKind::ProposeTeam,
            Decision::Vote(_) => DecisionKind::VoteOnTeam,
            Decision::MissionCard(_) => DecisionKind::MissionVote,
            Decision::Target(_) => DecisionKind::Assassinate,
        }
    }
}

/// A participant that makes choices for one seat.
#[async_trait::async_trait]
pub trait Agent: Send {
    /// Answers a decision request.
    async fn decide(&mut self, request: &DecisionRequest) -> Result<Decision>;

    /// Returns the agent's display name.
    fn name(&self) -> &str;
}
