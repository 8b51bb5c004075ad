//! Tests for concurrent session access.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::thread;
use strictly_avalon::{Game, Phase, Rejection, SessionManager, TeamVote};

fn names() -> Vec<String> {
    (1..=5).map(|i| format!("Player{i}")).collect()
}

#[test]
fn test_concurrent_votes_serialize_per_session() {
    let manager = Arc::new(SessionManager::new());
    manager
        .create_session("table".into(), Game::with_seed(5, &names(), 8).unwrap())
        .unwrap();
    manager
        .with_session("table", |session| session.game.propose_team(0, &[0, 1]))
        .unwrap()
        .unwrap();

    // Every seat votes twice from its own thread; only the first vote counts.
    let handles: Vec<_> = (0..10)
        .map(|i| {
            let manager = Arc::clone(&manager);
            thread::spawn(move || {
                let vote = TeamVote {
                    player: i % 5,
                    approve: true,
                };
                manager
                    .with_session("table", |session| session.apply(vote.into()))
                    .unwrap()
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let accepted = results.iter().filter(|r| r.is_ok()).count();
    let duplicates = results
        .iter()
        .filter(|r| matches!(r, Err(Rejection::AlreadyVoted(_))))
        .count();
    assert_eq!(accepted, 5);
    assert_eq!(duplicates, 5);

    let resolution = manager
        .with_session("table", |session| session.game.process_voting_result())
        .unwrap()
        .unwrap();
    assert!(resolution.passed());
}

#[test]
fn test_sessions_are_independent() {
    let manager = SessionManager::new();
    for id in ["one", "two"] {
        manager
            .create_session(id.into(), Game::with_seed(5, &names(), 1).unwrap())
            .unwrap();
    }

    manager
        .with_session("one", |session| {
            session.game.propose_team(0, &[0, 1])?;
            for seat in 0..5 {
                session.game.vote_on_team(seat, true)?;
            }
            session.game.process_voting_result()?;
            session
                .game
                .submit_mission_result(&BTreeMap::from([(0, true), (1, true)]))
        })
        .unwrap()
        .unwrap();

    let one = manager.with_session("one", |s| s.game.state().clone()).unwrap();
    let two = manager.with_session("two", |s| s.game.state().clone()).unwrap();
    assert_eq!(*one.current_round(), 2);
    assert_eq!(*two.current_round(), 1);
    assert_eq!(*two.phase(), Phase::Discussion);
}
