//! Role catalog for Avalon.
//!
//! Every role maps to a flat [`RoleSpec`] row: its team, what it can see
//! of other roles, and how that sight is rendered. Visibility is a pure
//! lookup over this table so the asymmetric sight graph can be audited in
//! one place.

use super::types::Team;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A secret role held by exactly one player.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Leader of good; sees most of evil and is the assassination target.
    Merlin,
    /// Sees Merlin and Morgana without telling them apart.
    Percival,
    /// Loyal servant with no special knowledge.
    Servant,
    /// Leader of evil; names the assassination target.
    Assassin,
    /// Appears as a possible Merlin to Percival.
    Morgana,
    /// Hidden from Merlin.
    Mordred,
    /// Evil loner: sees nobody and is seen by no evil peer.
    Oberon,
    /// Plain minion of evil.
    Minion,
}

/// Which other roles a holder can see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SightRule {
    /// Sees nobody.
    Nobody,
    /// Sees every evil role except the listed ones.
    EvilExcept(&'static [Role]),
    /// Sees exactly the listed roles.
    Only(&'static [Role]),
}

/// How a visible player is revealed to the holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Reveal {
    /// The exact team is revealed.
    Team,
    /// Only an ambiguous "possible Merlin" flag; team withheld.
    PossibleMerlin,
}

/// Static capability descriptor for one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleSpec {
    /// The role this row describes.
    pub role: Role,
    /// Allegiance of the role.
    pub team: Team,
    /// Sight rule under the default house rules.
    pub sight: SightRule,
    /// Form in which sighted players are revealed.
    pub reveal: Reveal,
    /// Short rules summary.
    pub description: &'static str,
}

const EVIL_PEERS_HIDDEN: &[Role] = &[Role::Oberon];

const CATALOG: [RoleSpec; 8] = [
    RoleSpec {
        role: Role::Merlin,
        team: Team::Good,
        sight: SightRule::EvilExcept(&[Role::Mordred, Role::Morgana]),
        reveal: Reveal::Team,
        description: "Sees evil players except Mordred and Morgana; must survive the assassination",
    },
    RoleSpec {
        role: Role::Percival,
        team: Team::Good,
        sight: SightRule::Only(&[Role::Merlin, Role::Morgana]),
        reveal: Reveal::PossibleMerlin,
        description: "Sees Merlin and Morgana but cannot tell which is which",
    },
    RoleSpec {
        role: Role::Servant,
        team: Team::Good,
        sight: SightRule::Nobody,
        reveal: Reveal::Team,
        description: "Loyal servant with no special knowledge",
    },
    RoleSpec {
        role: Role::Assassin,
        team: Team::Evil,
        sight: SightRule::EvilExcept(EVIL_PEERS_HIDDEN),
        reveal: Reveal::Team,
        description: "Sees fellow evil players except Oberon; may assassinate Merlin at the end",
    },
    RoleSpec {
        role: Role::Morgana,
        team: Team::Evil,
        sight: SightRule::EvilExcept(EVIL_PEERS_HIDDEN),
        reveal: Reveal::Team,
        description: "Sees fellow evil players except Oberon; looks like Merlin to Percival",
    },
    RoleSpec {
        role: Role::Mordred,
        team: Team::Evil,
        sight: SightRule::EvilExcept(EVIL_PEERS_HIDDEN),
        reveal: Reveal::Team,
        description: "Sees fellow evil players except Oberon; invisible to Merlin",
    },
    RoleSpec {
        role: Role::Oberon,
        team: Team::Evil,
        sight: SightRule::Nobody,
        reveal: Reveal::Team,
        description: "Sees nobody and is unseen by the rest of evil",
    },
    RoleSpec {
        role: Role::Minion,
        team: Team::Evil,
        sight: SightRule::EvilExcept(EVIL_PEERS_HIDDEN),
        reveal: Reveal::Team,
        description: "Sees fellow evil players except Oberon",
    },
];

impl Role {
    /// Returns the catalog row for this role.
    pub fn spec(self) -> &'static RoleSpec {
        // CATALOG is ordered like the enum.
        &CATALOG[self as usize]
    }

    /// Returns the role's team.
    pub fn team(self) -> Team {
        self.spec().team
    }

    /// True for the good-team leader whose death hands evil the game.
    pub fn is_assassination_target(self) -> bool {
        self == Role::Merlin
    }

    /// True for the evil role that performs the assassination.
    pub fn is_assassin(self) -> bool {
        self == Role::Assassin
    }
}

/// House rules for Merlin's sight.
///
/// The observed rule set hides both Mordred and Morgana from Merlin. The
/// standard rulebook only hides Mordred, so each exclusion can be lifted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct VisibilityRules {
    /// Lift Morgana's exclusion from Merlin's sight.
    pub merlin_sees_morgana: bool,
    /// Lift Mordred's exclusion from Merlin's sight.
    pub merlin_sees_mordred: bool,
}

impl VisibilityRules {
    /// Standard rulebook: Merlin sees Morgana but not Mordred.
    pub fn standard() -> Self {
        Self {
            merlin_sees_morgana: true,
            merlin_sees_mordred: false,
        }
    }

    fn lifts(&self, holder: Role, other: Role) -> bool {
        holder == Role::Merlin
            && match other {
                Role::Morgana => self.merlin_sees_morgana,
                Role::Mordred => self.merlin_sees_mordred,
                _ => false,
            }
    }
}

/// Returns whether `holder` can see `other`'s allegiance.
///
/// Not symmetric and not transitive. Callers skip the holder itself.
#[instrument(level = "trace")]
pub fn can_see(holder: Role, other: Role, rules: &VisibilityRules) -> bool {
    match holder.spec().sight {
        SightRule::Nobody => false,
        SightRule::Only(roles) => roles.contains(&other),
        SightRule::EvilExcept(excluded) => {
            other.team() == Team::Evil && (!excluded.contains(&other) || rules.lifts(holder, other))
        }
    }
}

/// Returns every catalog row in enum order.
pub fn catalog() -> &'static [RoleSpec] {
    &CATALOG
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_catalog_matches_enum_order() {
        for role in Role::iter() {
            assert_eq!(role.spec().role, role);
        }
        assert_eq!(catalog().len(), Role::iter().count());
    }

    #[test]
    fn test_percival_sees_candidates_but_not_back() {
        let rules = VisibilityRules::default();
        assert!(can_see(Role::Percival, Role::Merlin, &rules));
        assert!(can_see(Role::Percival, Role::Morgana, &rules));
        assert!(!can_see(Role::Merlin, Role::Percival, &rules));
        assert!(!can_see(Role::Morgana, Role::Percival, &rules));
    }

    #[test]
    fn test_oberon_isolated() {
        let rules = VisibilityRules::default();
        for other in Role::iter() {
            assert!(!can_see(Role::Oberon, other, &rules));
            if other.team() == Team::Evil {
                assert!(!can_see(other, Role::Oberon, &rules), "{other} sees Oberon");
            }
        }
    }

    #[test]
    fn test_merlin_default_excludes_mordred_and_morgana() {
        let rules = VisibilityRules::default();
        assert!(can_see(Role::Merlin, Role::Assassin, &rules));
        assert!(can_see(Role::Merlin, Role::Minion, &rules));
        assert!(can_see(Role::Merlin, Role::Oberon, &rules));
        assert!(!can_see(Role::Merlin, Role::Mordred, &rules));
        assert!(!can_see(Role::Merlin, Role::Morgana, &rules));
        assert!(!can_see(Role::Merlin, Role::Servant, &rules));
    }

    #[test]
    fn test_standard_rules_reveal_morgana_to_merlin() {
        let rules = VisibilityRules::standard();
        assert!(can_see(Role::Merlin, Role::Morgana, &rules));
        assert!(!can_see(Role::Merlin, Role::Mordred, &rules));
        // House rules only touch Merlin.
        assert!(!can_see(Role::Servant, Role::Morgana, &rules));
    }

    #[test]
    fn test_good_roles_never_seen_by_evil() {
        let rules = VisibilityRules::standard();
        for holder in Role::iter().filter(|r| r.team() == Team::Evil) {
            for other in Role::iter().filter(|r| r.team() == Team::Good) {
                assert!(!can_see(holder, other, &rules));
            }
        }
    }
}
