//! Game rules for Avalon.
//!
//! Pure functions over game state: vote and mission tallies, and the single
//! authoritative terminal-condition check every mutation path consults.

pub mod tally;
pub mod win;

pub use tally::{count_fails, tally_votes, team_approved};
pub use win::{FAILURES_TO_LOSE, MAX_REJECTED_PROPOSALS, SUCCESSES_TO_WIN, check_game_over};
