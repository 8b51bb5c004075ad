//! Terminal consistency invariant.

use super::super::rules::MAX_REJECTED_PROPOSALS;
use super::super::{GameState, Phase};
use super::Invariant;

/// Invariant: the game-over flag, winner and phase agree, and the leader
/// and rejected-proposal counter stay in range.
///
/// - `game_over ⇔ winner.is_some() ⇔ phase == FINISHED`
/// - `current_leader < N`
/// - `vote_round <= 5`
pub struct TerminalInvariant;

impl Invariant<GameState> for TerminalInvariant {
    fn holds(state: &GameState) -> bool {
        let finished = state.phase == Phase::Finished;

        state.game_over == state.winner.is_some()
            && state.game_over == finished
            && state.current_leader < state.player_count()
            && state.vote_round <= MAX_REJECTED_PROPOSALS
    }

    fn description() -> &'static str {
        "Game over, winner and FINISHED phase agree; leader and vote round in range"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::avalon::tests::{FIVE_ROLES, five_names};
    use crate::games::avalon::{Game, Team};

    #[test]
    fn test_holds_for_new_game() {
        let game = Game::from_roles(&five_names(), &FIVE_ROLES).unwrap();
        assert!(TerminalInvariant::holds(game.state()));
    }

    #[test]
    fn test_detects_winner_without_game_over() {
        let game = Game::from_roles(&five_names(), &FIVE_ROLES).unwrap();
        let mut state = game.state().clone();
        state.winner = Some(Team::Good);
        assert!(!TerminalInvariant::holds(&state));
    }

    #[test]
    fn test_detects_leader_out_of_range() {
        let game = Game::from_roles(&five_names(), &FIVE_ROLES).unwrap();
        let mut state = game.state().clone();
        state.current_leader = 5;
        assert!(!TerminalInvariant::holds(&state));
    }
}
