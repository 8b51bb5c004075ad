//! Information filter.
//!
//! Renders what one player is allowed to know about the table. This is
//! the only channel through which role or team information leaves the
//! engine.

use super::roles::{Reveal, Role, VisibilityRules, can_see};
use super::types::{Player, PlayerId, Team};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// What the viewer knows about one seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Knowledge {
    /// The viewer's own seat.
    Own {
        /// Viewer's role.
        role: Role,
        /// Viewer's team.
        team: Team,
    },
    /// Exact team, role withheld.
    Team {
        /// Revealed team.
        team: Team,
    },
    /// One of Merlin or Morgana; team withheld.
    PossibleMerlin,
    /// Nothing beyond the name.
    Unknown,
}

impl Knowledge {
    /// Revealed team, if any.
    pub fn team(&self) -> Option<Team> {
        match self {
            Knowledge::Own { team, .. } | Knowledge::Team { team } => Some(*team),
            Knowledge::PossibleMerlin | Knowledge::Unknown => None,
        }
    }
}

/// Redacted view of one seat.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerView {
    /// Seat index.
    pub player_id: PlayerId,
    /// Display name.
    pub name: String,
    /// What the viewer knows.
    pub knowledge: Knowledge,
}

impl PlayerView {
    /// Whether this is the viewer's own seat.
    pub fn is_self(&self) -> bool {
        matches!(self.knowledge, Knowledge::Own { .. })
    }
}

/// Private information payload for one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateInfo {
    /// Viewer's seat.
    pub player_id: PlayerId,
    /// Viewer's role.
    pub my_role: Role,
    /// Viewer's team.
    pub my_team: Team,
    /// Seats the viewer can see, self first.
    pub visible_players: Vec<PlayerView>,
    /// Every seat in seat order, redacted.
    pub all_players: Vec<PlayerView>,
    /// Table size.
    pub total_players: usize,
}

/// Returns the players whose allegiance `player` can see, self first.
#[instrument(skip(player, all_players), fields(seat = player.id()))]
pub fn visible_players<'a>(
    player: &'a Player,
    all_players: &'a [Player],
    rules: &VisibilityRules,
) -> Vec<&'a Player> {
    std::iter::once(player)
        .chain(
            all_players.iter().filter(|other| {
                other.id() != player.id() && can_see(*player.role(), *other.role(), rules)
            }),
        )
        .collect()
}

/// Renders `player`'s private information.
#[instrument(skip(player, all_players), fields(seat = player.id(), role = %player.role()))]
pub fn private_info(
    player: &Player,
    all_players: &[Player],
    rules: &VisibilityRules,
) -> PrivateInfo {
    let reveal = player.role().spec().reveal;
    let view = |other: &Player| PlayerView {
        player_id: *other.id(),
        name: other.name().clone(),
        knowledge: knowledge_of(player, other, reveal, rules),
    };

    let visible: Vec<PlayerView> = visible_players(player, all_players, rules)
        .into_iter()
        .map(view)
        .collect();
    debug!(visible = visible.len() - 1, "Filtered private information");

    PrivateInfo {
        player_id: *player.id(),
        my_role: *player.role(),
        my_team: player.team(),
        visible_players: visible,
        all_players: all_players.iter().map(view).collect(),
        total_players: all_players.len(),
    }
}

fn knowledge_of(
    viewer: &Player,
    other: &Player,
    reveal: Reveal,
    rules: &VisibilityRules,
) -> Knowledge {
    if viewer.id() == other.id() {
        return Knowledge::Own {
            role: *viewer.role(),
            team: viewer.team(),
        };
    }
    if !can_see(*viewer.role(), *other.role(), rules) {
        return Knowledge::Unknown;
    }
    match reveal {
        Reveal::Team => Knowledge::Team { team: other.team() },
        Reveal::PossibleMerlin => Knowledge::PossibleMerlin,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::avalon::roles::Role::*;

    fn table(roles: &[Role]) -> Vec<Player> {
        roles
            .iter()
            .enumerate()
            .map(|(id, role)| Player::new(id, format!("P{id}"), *role))
            .collect()
    }

    #[test]
    fn test_self_always_visible_first() {
        let players = table(&[Servant, Merlin, Percival, Assassin, Morgana]);
        let visible = visible_players(&players[0], &players, &VisibilityRules::default());
        assert_eq!(visible.len(), 1);
        assert_eq!(*visible[0].id(), 0);
    }

    #[test]
    fn test_percival_gets_ambiguous_flag() {
        let players = table(&[Merlin, Percival, Servant, Assassin, Morgana]);
        let info = private_info(&players[1], &players, &VisibilityRules::default());
        assert_eq!(info.my_role, Percival);
        assert_eq!(info.all_players[0].knowledge, Knowledge::PossibleMerlin);
        assert_eq!(info.all_players[4].knowledge, Knowledge::PossibleMerlin);
        assert_eq!(info.all_players[3].knowledge, Knowledge::Unknown);
        assert!(info.all_players.iter().all(|v| v.is_self() || v.knowledge.team().is_none()));
    }

    #[test]
    fn test_evil_sees_evil_team_only() {
        let players = table(&[Merlin, Percival, Servant, Assassin, Morgana]);
        let info = private_info(&players[3], &players, &VisibilityRules::default());
        assert_eq!(info.visible_players.len(), 2);
        assert_eq!(info.all_players[4].knowledge, Knowledge::Team { team: Team::Evil });
        for seat in 0..3 {
            assert_eq!(info.all_players[seat].knowledge, Knowledge::Unknown);
        }
    }

    #[test]
    fn test_merlin_house_rule() {
        let players = table(&[Merlin, Percival, Servant, Assassin, Morgana]);
        let observed = private_info(&players[0], &players, &VisibilityRules::default());
        assert_eq!(observed.all_players[4].knowledge, Knowledge::Unknown);
        let standard = private_info(&players[0], &players, &VisibilityRules::standard());
        assert_eq!(standard.all_players[4].knowledge, Knowledge::Team { team: Team::Evil });
    }

    #[test]
    fn test_roles_never_leak_for_others() {
        let players = table(&[
            Merlin, Percival, Servant, Servant, Servant, Servant, Assassin, Morgana, Mordred,
            Oberon,
        ]);
        for player in &players {
            let info = private_info(player, &players, &VisibilityRules::standard());
            for view in &info.all_players {
                if !view.is_self() {
                    assert!(!matches!(view.knowledge, Knowledge::Own { .. }));
                }
            }
            assert_eq!(info.total_players, 10);
        }
    }
}
