//! Win detection logic for Avalon.

use super::super::{GameState, Phase, Team};
use tracing::{debug, instrument};

/// Mission successes that send the game to the assassination.
pub const SUCCESSES_TO_WIN: usize = 3;
/// Mission failures that hand evil the game.
pub const FAILURES_TO_LOSE: usize = 3;
/// Rejected proposals within one round that hand evil the game.
pub const MAX_REJECTED_PROPOSALS: usize = 5;

/// Decides whether the game is over and who won.
///
/// Derived only from the mission tallies, the rejected-proposal counter,
/// the phase and the assassination target. Returns `None` while play
/// continues, including while good's three successes await the assassin.
#[instrument(skip(state), fields(
    phase = %state.phase,
    successes = state.successful_missions,
    failures = state.failed_missions,
    vote_round = state.vote_round,
))]
pub fn check_game_over(state: &GameState) -> Option<Team> {
    if state.vote_round >= MAX_REJECTED_PROPOSALS {
        debug!("Stalemate: too many rejected proposals");
        return Some(Team::Evil);
    }

    if state.successful_missions >= SUCCESSES_TO_WIN || state.phase == Phase::Assassination {
        let target = state.assassination_target.and_then(|seat| state.player(seat))?;
        let merlin_hit = target.role().is_assassination_target();
        debug!(target = target.id(), merlin_hit, "Assassination decided the game");
        return Some(if merlin_hit { Team::Evil } else { Team::Good });
    }

    if state.failed_missions >= FAILURES_TO_LOSE {
        return Some(Team::Evil);
    }

    // Guard for an exhausted schedule; unreachable with five-round tables.
    if state.mission_results.len() >= state.mission_configs.len() {
        debug!("No rounds left, comparing mission counts");
        return Some(if state.successful_missions > state.failed_missions {
            Team::Good
        } else {
            Team::Evil
        });
    }

    None
}

#[cfg(test)]
mod tests {
    use super::super::super::missions::mission_configs;
    use super::super::super::roles::Role::*;
    use super::super::super::{MissionResult, Player};
    use super::*;
    use std::collections::BTreeMap;

    fn state() -> GameState {
        let players = [Merlin, Percival, Servant, Assassin, Morgana]
            .into_iter()
            .enumerate()
            .map(|(id, role)| Player::new(id, format!("P{id}"), role))
            .collect();
        let mut state = GameState::new(players, mission_configs(5).unwrap().to_vec());
        state.phase = Phase::Discussion;
        state.current_round = 1;
        state
    }

    fn record(state: &mut GameState, success: bool) {
        let round = state.mission_results.len() + 1;
        let fails = usize::from(!success);
        state
            .mission_results
            .push(MissionResult::new(round, vec![0, 1], BTreeMap::new(), success, fails));
        if success {
            state.successful_missions += 1;
        } else {
            state.failed_missions += 1;
        }
    }

    #[test]
    fn test_fresh_game_continues() {
        assert_eq!(check_game_over(&state()), None);
    }

    #[test]
    fn test_stalemate_favors_evil_even_with_successes() {
        let mut state = state();
        record(&mut state, true);
        record(&mut state, true);
        state.vote_round = MAX_REJECTED_PROPOSALS;
        assert_eq!(check_game_over(&state), Some(Team::Evil));
    }

    #[test]
    fn test_three_successes_wait_for_assassin() {
        let mut state = state();
        for _ in 0..3 {
            record(&mut state, true);
        }
        state.phase = Phase::Assassination;
        assert_eq!(check_game_over(&state), None);

        state.assassination_target = Some(0);
        assert_eq!(check_game_over(&state), Some(Team::Evil));

        state.assassination_target = Some(2);
        assert_eq!(check_game_over(&state), Some(Team::Good));
    }

    #[test]
    fn test_three_failures() {
        let mut state = state();
        record(&mut state, false);
        record(&mut state, true);
        record(&mut state, false);
        assert_eq!(check_game_over(&state), None);
        record(&mut state, false);
        assert_eq!(check_game_over(&state), Some(Team::Evil));
    }

    #[test]
    fn test_exhausted_schedule_compares_counts() {
        let mut state = state();
        state.mission_configs.truncate(2);
        record(&mut state, true);
        record(&mut state, false);
        assert_eq!(check_game_over(&state), Some(Team::Evil));

        let mut state = self::state();
        state.mission_configs.truncate(1);
        record(&mut state, true);
        assert_eq!(check_game_over(&state), Some(Team::Good));
    }
}
