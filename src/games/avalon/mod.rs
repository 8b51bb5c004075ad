//! Avalon: a hidden-role social-deduction game.
//!
//! The engine ([`Game`]) owns the state machine; the surrounding modules
//! are pure tables and functions it consults: the role catalog, the
//! mission table, role distribution, the information filter and the win
//! check.

mod action;
mod contracts;
mod distributor;
mod engine;
mod invariants;
mod missions;
mod roles;
mod rules;
mod summary;
mod types;
mod visibility;

pub use action::{
    Action, AssassinationAttempt, MissionVotes, Rejection, SetupError, TeamProposal, TeamVote,
    VoteResolution,
};
pub use contracts::{
    AssassinationContract, Contract, GameActive, InPhase, KnownPlayer, MissionContract,
    ProposalContract, ResolutionContract, TeamVoteContract,
};
pub use distributor::{assign, canonical_roles, distribute, evil_count};
pub use engine::{Game, ReplayError};
pub use invariants::{
    AvalonInvariants, Invariant, InvariantSet, InvariantViolation, MissionTallyInvariant,
    TeamSizeInvariant, TerminalInvariant, assert_invariants,
};
pub use missions::{MAX_PLAYERS, MIN_PLAYERS, MissionConfig, ROUNDS, mission_configs};
pub use roles::{Reveal, Role, RoleSpec, SightRule, VisibilityRules, can_see, catalog};
pub use rules::{
    FAILURES_TO_LOSE, MAX_REJECTED_PROPOSALS, SUCCESSES_TO_WIN, check_game_over, count_fails,
    tally_votes, team_approved,
};
pub use summary::{MissionRecord, StateSummary};
pub use types::{GameState, MissionResult, Phase, Player, PlayerId, Team};
pub use visibility::{Knowledge, PlayerView, PrivateInfo, private_info, visible_players};
