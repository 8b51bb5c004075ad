//! Role distribution.
//!
//! Each supported table size has exactly one canonical role multiset. A
//! game deals it with a uniform shuffle, or takes an explicit permutation
//! of it for reproducible setups.

use super::action::SetupError;
use super::missions::{MAX_PLAYERS, MIN_PLAYERS};
use super::roles::Role;
use super::types::{Player, Team};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument};

use super::roles::Role::{Assassin, Merlin, Minion, Mordred, Morgana, Oberon, Percival, Servant};

const ROLE_SETS: [&[Role]; MAX_PLAYERS - MIN_PLAYERS + 1] = [
    &[Merlin, Percival, Servant, Assassin, Morgana],
    &[Merlin, Percival, Servant, Servant, Assassin, Morgana],
    &[Merlin, Percival, Servant, Servant, Assassin, Morgana, Minion],
    &[Merlin, Percival, Servant, Servant, Servant, Assassin, Morgana, Minion],
    &[Merlin, Percival, Servant, Servant, Servant, Servant, Assassin, Morgana, Mordred],
    &[Merlin, Percival, Servant, Servant, Servant, Servant, Assassin, Morgana, Mordred, Oberon],
];

/// Number of evil players at each table size.
#[instrument]
pub fn evil_count(player_count: usize) -> Result<usize, SetupError> {
    Ok(canonical_roles(player_count)?
        .iter()
        .filter(|role| role.team() == Team::Evil)
        .count())
}

/// Returns the canonical role multiset for `player_count`.
///
/// # Errors
///
/// Returns [`SetupError::UnsupportedPlayerCount`] outside `5..=10`.
#[instrument]
pub fn canonical_roles(player_count: usize) -> Result<&'static [Role], SetupError> {
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&player_count) {
        return Err(SetupError::UnsupportedPlayerCount(player_count));
    }
    Ok(ROLE_SETS[player_count - MIN_PLAYERS])
}

/// Deals the canonical roles for `player_count` to `names` at random.
///
/// Seats are numbered `0..N-1` in name order.
#[instrument(skip(names, rng), fields(names = names.len()))]
pub fn distribute<R>(
    player_count: usize,
    names: &[String],
    rng: &mut R,
) -> Result<Vec<Player>, SetupError>
where
    R: Rng + ?Sized,
{
    check_names(player_count, names)?;
    let mut roles = canonical_roles(player_count)?.to_vec();
    roles.shuffle(rng);
    debug!(player_count, "Shuffled role deck");
    Ok(seat(names, roles))
}

/// Seats `names` with an explicit role list.
///
/// `roles` must be a permutation of the canonical set for the table size.
#[instrument(skip(names), fields(names = names.len()))]
pub fn assign(names: &[String], roles: &[Role]) -> Result<Vec<Player>, SetupError> {
    check_names(roles.len(), names)?;
    let mut expected = canonical_roles(roles.len())?.to_vec();
    let mut supplied = roles.to_vec();
    expected.sort();
    supplied.sort();
    if expected != supplied {
        return Err(SetupError::NonCanonicalRoles(roles.to_vec()));
    }
    Ok(seat(names, roles.to_vec()))
}

fn check_names(player_count: usize, names: &[String]) -> Result<(), SetupError> {
    if names.len() != player_count {
        return Err(SetupError::NameCountMismatch {
            expected: player_count,
            actual: names.len(),
        });
    }
    Ok(())
}

fn seat(names: &[String], roles: Vec<Role>) -> Vec<Player> {
    names
        .iter()
        .zip(roles)
        .enumerate()
        .map(|(id, (name, role))| Player::new(id, name.clone(), role))
        .collect()
}
