//! Team invariant: a team under vote or on mission has the round's size.

use super::super::{GameState, Phase};
use super::Invariant;
use std::collections::BTreeSet;

/// Invariant: the proposed team matches the round's team size.
///
/// Whenever the phase is VOTING or MISSION the team has exactly
/// `team_size` distinct, seated members. Team votes only ever come from
/// seated players.
pub struct TeamSizeInvariant;

impl Invariant<GameState> for TeamSizeInvariant {
    fn holds(state: &GameState) -> bool {
        let n = state.player_count();
        if state.votes.keys().any(|seat| *seat >= n) {
            return false;
        }

        if !matches!(state.phase, Phase::Voting | Phase::Mission) {
            return true;
        }

        let Some(config) = state.current_mission() else {
            return false;
        };
        let distinct: BTreeSet<_> = state.proposed_team.iter().collect();

        state.proposed_team.len() == config.team_size
            && distinct.len() == config.team_size
            && state.proposed_team.iter().all(|seat| *seat < n)
    }

    fn description() -> &'static str {
        "Proposed team has the round's team size while voting or on mission"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::avalon::tests::{FIVE_ROLES, five_names};
    use crate::games::avalon::{Game, Phase};

    fn game() -> Game {
        Game::from_roles(&five_names(), &FIVE_ROLES).unwrap()
    }

    #[test]
    fn test_holds_in_discussion() {
        assert!(TeamSizeInvariant::holds(game().state()));
    }

    #[test]
    fn test_holds_while_voting() {
        let mut game = game();
        game.propose_team(0, &[0, 1]).unwrap();
        assert_eq!(*game.state().phase(), Phase::Voting);
        assert!(TeamSizeInvariant::holds(game.state()));
    }

    #[test]
    fn test_detects_short_team() {
        let mut game = game();
        game.propose_team(0, &[0, 1]).unwrap();
        let mut state = game.state().clone();
        state.proposed_team.pop();
        assert!(!TeamSizeInvariant::holds(&state));
    }
}
