//! Tests for role distribution and the information filter.

use strictly_avalon::{
    Game, Knowledge, MAX_PLAYERS, MIN_PLAYERS, Role, Team, VisibilityRules, can_see,
    canonical_roles, evil_count, mission_configs,
};

fn names(count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("Player{i}")).collect()
}

const TEN: [Role; 10] = [
    Role::Merlin,
    Role::Percival,
    Role::Servant,
    Role::Servant,
    Role::Servant,
    Role::Servant,
    Role::Assassin,
    Role::Morgana,
    Role::Mordred,
    Role::Oberon,
];

#[test]
fn test_every_table_size_is_playable() {
    for (count, evil) in (MIN_PLAYERS..=MAX_PLAYERS).zip([2, 2, 3, 3, 3, 4]) {
        let roles = canonical_roles(count).unwrap();
        assert_eq!(roles.iter().filter(|r| **r == Role::Merlin).count(), 1);
        assert_eq!(roles.iter().filter(|r| **r == Role::Assassin).count(), 1);
        assert_eq!(evil_count(count).unwrap(), evil);
        assert_eq!(mission_configs(count).unwrap().len(), 5);

        let game = Game::new(count, &names(count)).unwrap();
        let dealt_evil = game.players().iter().filter(|p| p.team() == Team::Evil).count();
        assert_eq!(dealt_evil, evil);
    }
}

#[test]
fn test_percival_sight_is_one_way() {
    let rules = VisibilityRules::default();
    assert!(can_see(Role::Percival, Role::Merlin, &rules));
    assert!(can_see(Role::Percival, Role::Morgana, &rules));
    assert!(!can_see(Role::Merlin, Role::Percival, &rules));
    assert!(!can_see(Role::Morgana, Role::Percival, &rules));
}

#[test]
fn test_oberon_is_isolated_from_evil() {
    let rules = VisibilityRules::standard();
    for role in TEN {
        assert!(!can_see(Role::Oberon, role, &rules));
        if role.team() == Team::Evil {
            assert!(!can_see(role, Role::Oberon, &rules), "{role} sees Oberon");
        }
    }
    assert!(can_see(Role::Merlin, Role::Oberon, &rules));
}

#[test]
fn test_ten_player_private_info() {
    let game = Game::from_roles(&names(10), &TEN).unwrap();

    let merlin = game.get_player_info(0).unwrap();
    let seen: Vec<_> = merlin.visible_players.iter().skip(1).map(|v| v.player_id).collect();
    assert_eq!(seen, vec![6, 9], "Merlin sees Assassin and Oberon only");

    let percival = game.get_player_info(1).unwrap();
    assert_eq!(percival.all_players[0].knowledge, Knowledge::PossibleMerlin);
    assert_eq!(percival.all_players[7].knowledge, Knowledge::PossibleMerlin);
    assert_eq!(percival.visible_players.len(), 3);

    let mordred = game.get_player_info(8).unwrap();
    let seen: Vec<_> = mordred.visible_players.iter().skip(1).map(|v| v.player_id).collect();
    assert_eq!(seen, vec![6, 7]);
    assert_eq!(mordred.all_players[9].knowledge, Knowledge::Unknown);

    let servant = game.get_player_info(2).unwrap();
    assert_eq!(servant.visible_players.len(), 1);
    assert!(servant.visible_players[0].is_self());
    assert_eq!(
        servant.visible_players[0].knowledge,
        Knowledge::Own {
            role: Role::Servant,
            team: Team::Good
        }
    );
}

#[test]
fn test_house_rules_widen_merlin_sight() {
    let game = Game::from_roles(&names(10), &TEN).unwrap().with_visibility(VisibilityRules {
        merlin_sees_morgana: true,
        merlin_sees_mordred: true,
    });
    let merlin = game.get_player_info(0).unwrap();
    let seen: Vec<_> = merlin.visible_players.iter().skip(1).map(|v| v.player_id).collect();
    assert_eq!(seen, vec![6, 7, 8, 9]);
}

#[test]
fn test_summary_without_viewer_has_no_secrets() {
    let game = Game::from_roles(&names(10), &TEN).unwrap();
    let summary = game.get_state_summary(None).unwrap();
    assert!(summary.private_info.is_none());
    assert_eq!(summary.mission_config.map(|c| c.team_size), Some(3));

    let json = serde_json::to_string(&summary).unwrap();
    assert!(!json.contains("MERLIN"));
    assert!(!json.contains("ASSASSIN"));
}
