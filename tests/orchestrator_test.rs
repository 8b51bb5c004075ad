//! Tests for driving full games with agents.

use anyhow::Result;
use strictly_avalon::{
    Agent, Decision, DecisionKind, DecisionRequest, Game, GameConfig, GameEvent, Orchestrator,
    Phase, RandomAgent, Team, VoteResolution,
};
use tokio::sync::mpsc;

fn names(count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("Player{i}")).collect()
}

fn random_agents(count: usize, seed: u64) -> Vec<Box<dyn Agent>> {
    (0..count)
        .map(|seat| {
            Box::new(RandomAgent::new(format!("Bot{seat}"), seed + seat as u64)) as Box<dyn Agent>
        })
        .collect()
}

/// Proposes itself plus the next seats and rejects every other team.
struct Obstructionist {
    name: String,
}

#[async_trait::async_trait]
impl Agent for Obstructionist {
    async fn decide(&mut self, request: &DecisionRequest) -> Result<Decision> {
        let summary = &request.summary;
        Ok(match request.kind {
            DecisionKind::ProposeTeam => {
                let size = summary.mission_config.map(|c| c.team_size).unwrap_or(0);
                let total = summary.private_info.as_ref().map(|i| i.total_players).unwrap_or(0);
                Decision::Team((0..size).map(|i| (request.seat + i) % total).collect())
            }
            DecisionKind::VoteOnTeam => Decision::Vote(false),
            DecisionKind::MissionVote => Decision::MissionCard(true),
            DecisionKind::Assassinate => Decision::Target(0),
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Answers every request with a vote.
struct Confused;

#[async_trait::async_trait]
impl Agent for Confused {
    async fn decide(&mut self, _request: &DecisionRequest) -> Result<Decision> {
        Ok(Decision::Vote(true))
    }

    fn name(&self) -> &str {
        "Confused"
    }
}

#[tokio::test]
async fn test_random_agents_finish_every_table_size() {
    for count in 5..=10 {
        let game = Game::with_seed(count, &names(count), 99).unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut orchestrator = Orchestrator::new(game, random_agents(count, 7), tx).unwrap();

        let winner = orchestrator.run().await.unwrap();
        let game = orchestrator.into_game();
        assert!(game.is_over());
        assert_eq!(game.winner(), Some(winner));
        assert_eq!(game.phase(), Phase::Finished);

        let mut last = None;
        while let Ok(event) = rx.try_recv() {
            last = Some(event);
        }
        assert_eq!(last, Some(GameEvent::GameOver { winner }));
    }
}

#[tokio::test]
async fn test_seeded_simulation_is_reproducible() {
    let config = GameConfig::for_players(6).with_seed(Some(2024));
    let mut finals = Vec::new();
    for _ in 0..2 {
        let agents: Vec<Box<dyn Agent>> = config
            .build_agents()
            .into_iter()
            .map(|a| Box::new(a) as Box<dyn Agent>)
            .collect();
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut orchestrator = Orchestrator::new(config.build_game().unwrap(), agents, tx).unwrap();
        orchestrator.run().await.unwrap();
        finals.push(orchestrator.into_game());
    }
    assert_eq!(finals[0], finals[1]);
}

#[tokio::test]
async fn test_leader_approves_own_team_but_table_stalemates() {
    let game = Game::with_seed(5, &names(5), 3).unwrap();
    let agents: Vec<Box<dyn Agent>> = (0..5)
        .map(|seat| {
            Box::new(Obstructionist {
                name: format!("No{seat}"),
            }) as Box<dyn Agent>
        })
        .collect();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut orchestrator = Orchestrator::new(game, agents, tx).unwrap();

    assert_eq!(orchestrator.run().await.unwrap(), Team::Evil);

    let mut rejections = 0;
    while let Ok(event) = rx.try_recv() {
        if let GameEvent::VoteResolved(VoteResolution::Rejected { approvals, .. }) = event {
            assert_eq!(approvals, 1);
            rejections += 1;
        }
    }
    assert_eq!(rejections, 5);
}

#[tokio::test]
async fn test_wrong_decision_kind_is_an_error() {
    let game = Game::with_seed(5, &names(5), 3).unwrap();
    let agents: Vec<Box<dyn Agent>> =
        (0..5).map(|_| Box::new(Confused) as Box<dyn Agent>).collect();
    let (tx, _rx) = mpsc::unbounded_channel();
    let mut orchestrator = Orchestrator::new(game, agents, tx).unwrap();
    let err = orchestrator.run().await.unwrap_err();
    assert!(err.to_string().contains("team proposal"));
}

#[tokio::test]
async fn test_step_guard_aborts() {
    let game = Game::with_seed(5, &names(5), 3).unwrap();
    let (tx, _rx) = mpsc::unbounded_channel();
    let mut orchestrator =
        Orchestrator::new(game, random_agents(5, 1), tx).unwrap().with_max_steps(1);
    let err = orchestrator.run().await.unwrap_err();
    assert!(err.to_string().contains("did not finish"));
}

#[test]
fn test_agent_count_must_match_table() {
    let game = Game::with_seed(5, &names(5), 3).unwrap();
    let (tx, _rx) = mpsc::unbounded_channel();
    assert!(Orchestrator::new(game, random_agents(4, 1), tx).is_err());
}
