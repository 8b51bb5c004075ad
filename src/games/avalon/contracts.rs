//! Contract-based validation for Avalon.
//!
//! Every action is guarded by a precondition checked against the current
//! state, and followed in debug builds by a postcondition comparing the
//! state before and after: {P} action {Q}.

use super::action::{AssassinationAttempt, MissionVotes, Rejection, TeamProposal, TeamVote};
use super::invariants::{AvalonInvariants, InvariantSet, InvariantViolation};
use super::{GameState, Phase};
use std::collections::BTreeSet;
use tracing::instrument;

/// Preconditions and postconditions for one kind of action.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), Rejection>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), Vec<InvariantViolation>> {
        let _ = before;
        let _ = after;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Shared preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the game has no winner yet.
pub struct GameActive;

impl GameActive {
    /// Rejects every action once the game is over.
    pub fn check(state: &GameState) -> Result<(), Rejection> {
        if state.game_over {
            Err(Rejection::GameOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: the game is in the phase the action belongs to.
pub struct InPhase;

impl InPhase {
    /// Rejects the action unless the game is in `expected`.
    pub fn check(state: &GameState, expected: Phase) -> Result<(), Rejection> {
        if state.phase == expected {
            Ok(())
        } else {
            Err(Rejection::WrongPhase {
                expected,
                actual: state.phase,
            })
        }
    }
}

/// Precondition: the seat exists.
pub struct KnownPlayer;

impl KnownPlayer {
    /// Rejects seats outside `0..N`.
    pub fn check(state: &GameState, seat: usize) -> Result<(), Rejection> {
        if seat < state.player_count() {
            Ok(())
        } else {
            Err(Rejection::UnknownPlayer(seat))
        }
    }
}

/// Shared postcondition: invariants hold and the leader moved at most one seat.
fn transition_holds(before: &GameState, after: &GameState) -> Result<(), Vec<InvariantViolation>> {
    let mut violations = AvalonInvariants::check_all(after).err().unwrap_or_default();

    let stayed = after.current_leader == before.current_leader;
    let rotated = after.current_leader == before.next_seat(before.current_leader);
    if !stayed && !rotated {
        violations.push(InvariantViolation::new("Leader advances by exactly one seat"));
    }

    if after.mission_results.len() < before.mission_results.len()
        || after.mission_results[..before.mission_results.len()] != before.mission_results[..]
    {
        violations.push(InvariantViolation::new("Mission results are append-only"));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

// ─────────────────────────────────────────────────────────────
//  Action contracts
// ─────────────────────────────────────────────────────────────

/// Contract for team proposals.
///
/// Preconditions:
/// - Game not over, phase is DISCUSSION or VOTING (a new proposal
///   replaces the one under vote)
/// - Proposer is the current leader
/// - Team has the round's size, known seats only, no duplicates
pub struct ProposalContract;

impl Contract<GameState, TeamProposal> for ProposalContract {
    #[instrument(skip(state))]
    fn pre(state: &GameState, action: &TeamProposal) -> Result<(), Rejection> {
        GameActive::check(state)?;
        if state.phase != Phase::Voting {
            InPhase::check(state, Phase::Discussion)?;
        }

        if action.leader != state.current_leader {
            return Err(Rejection::NotLeader {
                player: action.leader,
                leader: state.current_leader,
            });
        }

        let expected = state.current_mission().map_or(0, |config| config.team_size);
        if action.members.len() != expected {
            return Err(Rejection::WrongTeamSize {
                expected,
                actual: action.members.len(),
            });
        }

        let mut seen = BTreeSet::new();
        for &member in &action.members {
            KnownPlayer::check(state, member)?;
            if !seen.insert(member) {
                return Err(Rejection::DuplicateMember(member));
            }
        }
        Ok(())
    }

    fn post(before: &GameState, after: &GameState) -> Result<(), Vec<InvariantViolation>> {
        transition_holds(before, after)
    }
}

/// Contract for team votes.
///
/// Preconditions:
/// - Game not over, phase is VOTING
/// - Voter is seated and has not voted on this proposal
pub struct TeamVoteContract;

impl Contract<GameState, TeamVote> for TeamVoteContract {
    #[instrument(skip(state))]
    fn pre(state: &GameState, action: &TeamVote) -> Result<(), Rejection> {
        GameActive::check(state)?;
        InPhase::check(state, Phase::Voting)?;
        KnownPlayer::check(state, action.player)?;

        if state.votes.contains_key(&action.player) {
            return Err(Rejection::AlreadyVoted(action.player));
        }
        Ok(())
    }

    fn post(before: &GameState, after: &GameState) -> Result<(), Vec<InvariantViolation>> {
        transition_holds(before, after)
    }
}

/// Contract for resolving the team vote.
///
/// Preconditions:
/// - Game not over, phase is VOTING
pub struct ResolutionContract;

impl Contract<GameState, ()> for ResolutionContract {
    fn pre(state: &GameState, _action: &()) -> Result<(), Rejection> {
        GameActive::check(state)?;
        InPhase::check(state, Phase::Voting)
    }

    fn post(before: &GameState, after: &GameState) -> Result<(), Vec<InvariantViolation>> {
        transition_holds(before, after)
    }
}

/// Contract for mission results.
///
/// Preconditions:
/// - Game not over, phase is MISSION
/// - Cards come from exactly the team members
///
/// Postconditions:
/// - Exactly one result was appended
pub struct MissionContract;

impl Contract<GameState, MissionVotes> for MissionContract {
    #[instrument(skip(state, action), fields(cards = action.votes.len()))]
    fn pre(state: &GameState, action: &MissionVotes) -> Result<(), Rejection> {
        GameActive::check(state)?;
        InPhase::check(state, Phase::Mission)?;

        let expected: BTreeSet<_> = state.proposed_team.iter().copied().collect();
        let actual: BTreeSet<_> = action.votes.keys().copied().collect();
        if expected != actual {
            return Err(Rejection::MissionVoteMismatch {
                expected: expected.into_iter().collect(),
                actual: actual.into_iter().collect(),
            });
        }
        Ok(())
    }

    fn post(before: &GameState, after: &GameState) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = transition_holds(before, after).err().unwrap_or_default();
        if after.mission_results.len() != before.mission_results.len() + 1 {
            violations.push(InvariantViolation::new("A mission appends exactly one result"));
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Contract for the assassination.
///
/// Preconditions:
/// - Game not over, phase is ASSASSINATION
/// - Target is seated
///
/// Postconditions:
/// - The game is over
pub struct AssassinationContract;

impl Contract<GameState, AssassinationAttempt> for AssassinationContract {
    #[instrument(skip(state))]
    fn pre(state: &GameState, action: &AssassinationAttempt) -> Result<(), Rejection> {
        GameActive::check(state)?;
        InPhase::check(state, Phase::Assassination)?;
        KnownPlayer::check(state, action.target)
    }

    fn post(before: &GameState, after: &GameState) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = transition_holds(before, after).err().unwrap_or_default();
        if !after.game_over {
            violations.push(InvariantViolation::new("Assassination ends the game"));
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}
