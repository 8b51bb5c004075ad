//! Mission tally invariant: counters agree with the result log.

use super::super::GameState;
use super::Invariant;

/// Invariant: `successful_missions + failed_missions == len(mission_results)`,
/// and each counter matches the results it summarizes.
pub struct MissionTallyInvariant;

impl Invariant<GameState> for MissionTallyInvariant {
    fn holds(state: &GameState) -> bool {
        let successes = state.mission_results.iter().filter(|r| *r.success()).count();
        let failures = state.mission_results.len() - successes;

        state.successful_missions + state.failed_missions == state.mission_results.len()
            && state.successful_missions == successes
            && state.failed_missions == failures
    }

    fn description() -> &'static str {
        "Mission counters match the mission result log"
    }
}
