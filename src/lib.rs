//! Strictly Avalon library - a deterministic hidden-role game engine
//!
//! This library implements the Avalon social-deduction game as a strict
//! state machine with an information-asymmetry filter, plus the pieces
//! needed to host and simulate games.
//!
//! # Architecture
//!
//! - **Games**: the Avalon engine, role catalog, mission table, information filter and win check
//! - **Session**: per-game locking for hosted games
//! - **Agents**: decision collaborators behind one async trait
//! - **Orchestrator**: drives a game to completion with one agent per seat
//!
//! # Example
//!
//! ```
//! use strictly_avalon::{Game, Phase, Role};
//!
//! let names: Vec<String> = ["Alice", "Bob", "Carol", "Dave", "Eve"]
//!     .into_iter()
//!     .map(String::from)
//!     .collect();
//! let roles = [Role::Merlin, Role::Percival, Role::Servant, Role::Assassin, Role::Morgana];
//! let mut game = Game::from_roles(&names, &roles)?;
//!
//! game.propose_team(0, &[0, 1])?;
//! assert_eq!(game.phase(), Phase::Voting);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod agents;
mod game_config;
mod games;
mod orchestrator;
mod session;

// Crate-level exports - Agents
pub use agents::{
    Agent, DEFAULT_SABOTAGE_CHANCE, Decision, DecisionKind, DecisionRequest, RandomAgent,
};

// Crate-level exports - Configuration
pub use game_config::{ConfigError, GameConfig, default_names};

// Crate-level exports - Orchestration
pub use orchestrator::{DEFAULT_MAX_STEPS, GameEvent, Orchestrator};

// Crate-level exports - Session management
pub use session::{GameSession, SessionError, SessionId, SessionManager};

// Crate-level exports - Game types
pub use games::avalon::{
    Action, AssassinationAttempt, AssassinationContract, AvalonInvariants, Contract,
    FAILURES_TO_LOSE, Game, GameActive, GameState, InPhase, Invariant, InvariantSet,
    InvariantViolation, Knowledge, KnownPlayer, MAX_PLAYERS, MAX_REJECTED_PROPOSALS, MIN_PLAYERS,
    MissionConfig, MissionContract, MissionRecord, MissionResult, MissionTallyInvariant,
    MissionVotes, Phase, Player, PlayerId, PlayerView, PrivateInfo, ProposalContract, ROUNDS,
    Rejection, ReplayError, ResolutionContract, Reveal, Role, RoleSpec, SUCCESSES_TO_WIN,
    SetupError, SightRule, StateSummary, Team, TeamProposal, TeamSizeInvariant, TeamVote,
    TeamVoteContract, TerminalInvariant, VisibilityRules, VoteResolution, assert_invariants, assign,
    can_see, canonical_roles, catalog, check_game_over, count_fails, distribute, evil_count,
    mission_configs, private_info, tally_votes, team_approved, visible_players,
};
