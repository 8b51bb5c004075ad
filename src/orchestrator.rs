//! Game orchestration between agents.
//!
//! The orchestrator reads the phase, asks the right seats for decisions
//! and feeds them back into the engine until the game ends.

use crate::agents::{Agent, Decision, DecisionKind, DecisionRequest};
use crate::games::avalon::{Game, Phase, PlayerId, Team, VoteResolution};
use anyhow::{Context, Result, bail};
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

/// Default cap on orchestration steps before a game is abandoned.
pub const DEFAULT_MAX_STEPS: usize = 500;

/// Messages sent from the orchestrator to observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A leader named a team.
    TeamProposed {
        /// Round being played.
        round: usize,
        /// Proposing seat.
        leader: PlayerId,
        /// Proposed members.
        members: Vec<PlayerId>,
    },
    /// The team vote was resolved.
    VoteResolved(VoteResolution),
    /// A mission finished.
    MissionCompleted {
        /// Round the mission belonged to.
        round: usize,
        /// Whether it succeeded.
        success: bool,
        /// Fail cards played.
        fail_count: usize,
    },
    /// The assassin named a target.
    Assassinated {
        /// Seat named by the assassin.
        target: PlayerId,
    },
    /// The game ended.
    GameOver {
        /// Winning team.
        winner: Team,
    },
}

/// Drives one game to completion with one agent per seat.
pub struct Orchestrator {
    game: Game,
    agents: Vec<Box<dyn Agent>>,
    event_tx: mpsc::UnboundedSender<GameEvent>,
    max_steps: usize,
}

impl Orchestrator {
    /// Creates an orchestrator; `agents[i]` plays seat `i`.
    pub fn new(
        game: Game,
        agents: Vec<Box<dyn Agent>>,
        event_tx: mpsc::UnboundedSender<GameEvent>,
    ) -> Result<Self> {
        if agents.len() != game.players().len() {
            bail!(
                "Expected {} agents, got {}",
                game.players().len(),
                agents.len()
            );
        }
        Ok(Self {
            game,
            agents,
            event_tx,
            max_steps: DEFAULT_MAX_STEPS,
        })
    }

    /// Sets the step guard.
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// The game being driven.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Consumes the orchestrator, returning the game.
    pub fn into_game(self) -> Game {
        self.game
    }

    /// Runs the game loop until a winner is decided.
    ///
    /// # Errors
    ///
    /// Fails if an agent errors or answers out of turn, if the engine rejects
    /// an agent's choice, or if `max_steps` is exceeded.
    #[instrument(skip(self), fields(players = self.agents.len(), max_steps = self.max_steps))]
    pub async fn run(&mut self) -> Result<Team> {
        info!("Starting game orchestration");

        for step in 0..self.max_steps {
            debug!(step, phase = %self.game.phase(), "Orchestration step");
            match self.game.phase() {
                Phase::Discussion => self.proposal().await?,
                Phase::Voting => self.voting().await?,
                Phase::Mission => self.mission().await?,
                Phase::Assassination => self.assassination().await?,
                Phase::Finished => {
                    let winner = self.game.winner().context("Finished game without a winner")?;
                    self.event_tx.send(GameEvent::GameOver { winner })?;
                    info!(%winner, step, "Orchestration complete");
                    return Ok(winner);
                }
                Phase::Initialization => bail!("Game was never started"),
            }
        }

        bail!("Game did not finish within {} steps", self.max_steps)
    }

    async fn ask(&mut self, seat: PlayerId, kind: DecisionKind) -> Result<Decision> {
        let summary = self.game.get_state_summary(Some(seat))?;
        let request = DecisionRequest::new(seat, kind, summary);
        let agent = self
            .agents
            .get_mut(seat)
            .with_context(|| format!("No agent for seat {seat}"))?;

        debug!(seat, agent = agent.name(), %kind, "Waiting for decision");
        agent.decide(&request).await
    }

    async fn proposal(&mut self) -> Result<()> {
        let leader = *self.game.state().current_leader();
        let members = match self.ask(leader, DecisionKind::ProposeTeam).await? {
            Decision::Team(members) => members,
            other => bail!("Seat {leader} answered {} to a team proposal", other.kind()),
        };

        self.game.propose_team(leader, &members)?;
        self.event_tx.send(GameEvent::TeamProposed {
            round: *self.game.state().current_round(),
            leader,
            members,
        })?;
        Ok(())
    }

    async fn voting(&mut self) -> Result<()> {
        let leader = *self.game.state().current_leader();
        for seat in 0..self.agents.len() {
            let approve = if seat == leader {
                true
            } else {
                match self.ask(seat, DecisionKind::VoteOnTeam).await? {
                    Decision::Vote(approve) => approve,
                    other => bail!("Seat {seat} answered {} to a team vote", other.kind()),
                }
            };
            self.game.vote_on_team(seat, approve)?;
        }

        let resolution = self.game.process_voting_result()?;
        self.event_tx.send(GameEvent::VoteResolved(resolution))?;
        Ok(())
    }

    async fn mission(&mut self) -> Result<()> {
        let team = self.game.state().proposed_team().clone();
        let mut cards = BTreeMap::new();
        for seat in team {
            let success = match self.ask(seat, DecisionKind::MissionVote).await? {
                Decision::MissionCard(success) => success,
                other => bail!("Seat {seat} answered {} to a mission vote", other.kind()),
            };
            cards.insert(seat, success);
        }

        self.game.submit_mission_result(&cards)?;
        let result = self
            .game
            .state()
            .mission_results()
            .last()
            .context("Mission result missing after submission")?;
        self.event_tx.send(GameEvent::MissionCompleted {
            round: *result.round_number(),
            success: *result.success(),
            fail_count: *result.fail_count(),
        })?;
        Ok(())
    }

    async fn assassination(&mut self) -> Result<()> {
        let assassin = self
            .game
            .players()
            .iter()
            .find(|player| player.role().is_assassin())
            .map(|player| *player.id())
            .context("No assassin at the table")?;
        let target = match self.ask(assassin, DecisionKind::Assassinate).await? {
            Decision::Target(target) => target,
            other => bail!("Seat {assassin} answered {} to the assassination", other.kind()),
        };

        self.game.assassinate(target)?;
        self.event_tx.send(GameEvent::Assassinated { target })?;
        Ok(())
    }
}
