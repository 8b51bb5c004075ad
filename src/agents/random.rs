//! Seeded random agent for simulations and tests.

use super::{Agent, Decision, DecisionKind, DecisionRequest};
use crate::games::avalon::{Knowledge, PlayerId, Team};
use anyhow::{Context, Result};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, instrument};

/// Default probability that an evil agent fails a mission.
pub const DEFAULT_SABOTAGE_CHANCE: f64 = 0.7;

/// Probability of approving a team the agent is not on.
const APPROVE_CHANCE: f64 = 0.6;

/// Agent that decides at random within the rules.
///
/// Good agents always play success cards; evil agents fail missions with
/// `sabotage_chance`. Proposals always include the leader, and agents
/// approve any team they lead or sit on.
#[derive(Debug, Clone)]
pub struct RandomAgent {
    name: String,
    rng: ChaCha8Rng,
    sabotage_chance: f64,
}

impl RandomAgent {
    /// Creates an agent whose choices are fixed by `seed`.
    pub fn new(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            sabotage_chance: DEFAULT_SABOTAGE_CHANCE,
        }
    }

    /// Sets the probability that this agent fails a mission while evil.
    pub fn with_sabotage_chance(mut self, chance: f64) -> Self {
        self.sabotage_chance = chance.clamp(0.0, 1.0);
        self
    }

    fn propose(&mut self, request: &DecisionRequest) -> Result<Vec<PlayerId>> {
        let summary = &request.summary;
        let size = summary
            .mission_config
            .map(|config| config.team_size)
            .context("No mission config while proposing")?;
        let total = summary
            .private_info
            .as_ref()
            .map(|info| info.total_players)
            .context("Proposal request without private info")?;

        let mut others: Vec<PlayerId> = (0..total).filter(|seat| *seat != request.seat).collect();
        others.shuffle(&mut self.rng);

        let mut team = vec![request.seat];
        team.extend(others.into_iter().take(size.saturating_sub(1)));
        Ok(team)
    }

    fn vote(&mut self, request: &DecisionRequest) -> bool {
        let summary = &request.summary;
        summary.viewer_leads() || summary.viewer_on_team() || self.rng.gen_bool(APPROVE_CHANCE)
    }

    fn mission_card(&mut self, request: &DecisionRequest) -> Result<bool> {
        anyhow::ensure!(
            request.summary.viewer_on_team(),
            "Seat {} asked for a mission card but is not on the team",
            request.seat
        );
        let info = request
            .summary
            .private_info
            .as_ref()
            .context("Mission request without private info")?;
        Ok(match info.my_team {
            Team::Good => true,
            Team::Evil => !self.rng.gen_bool(self.sabotage_chance),
        })
    }

    fn target(&mut self, request: &DecisionRequest) -> Result<PlayerId> {
        let info = request
            .summary
            .private_info
            .as_ref()
            .context("Assassination request without private info")?;
        let suspects: Vec<PlayerId> = info
            .all_players
            .iter()
            .filter(|view| {
                !view.is_self() && view.knowledge != (Knowledge::Team { team: Team::Evil })
            })
            .map(|view| view.player_id)
            .collect();
        suspects
            .choose(&mut self.rng)
            .copied()
            .context("No assassination candidates")
    }
}

#[async_trait::async_trait]
impl Agent for RandomAgent {
    #[instrument(skip(self, request), fields(agent = %self.name, kind = %request.kind))]
    async fn decide(&mut self, request: &DecisionRequest) -> Result<Decision> {
        let decision = match request.kind {
            DecisionKind::ProposeTeam => Decision::Team(self.propose(request)?),
            DecisionKind::VoteOnTeam => Decision::Vote(self.vote(request)),
            DecisionKind::MissionVote => Decision::MissionCard(self.mission_card(request)?),
            DecisionKind::Assassinate => Decision::Target(self.target(request)?),
        };
        debug!(?decision, "Agent decided");
        Ok(decision)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
