//! The Avalon game state machine.
//!
//! [`Game`] owns all mutable state. Collaborators read summaries and feed
//! actions back in; the engine never calls out. Every accepted action ends
//! by asking [`check_game_over`] whether the game is decided, so terminal
//! conditions are evaluated in exactly one place.

use super::action::{
    Action, AssassinationAttempt, MissionVotes, Rejection, SetupError, TeamProposal, TeamVote,
    VoteResolution,
};
use super::contracts::{
    AssassinationContract, Contract, MissionContract, ProposalContract, ResolutionContract,
    TeamVoteContract,
};
use super::distributor::{assign, distribute};
use super::invariants::{InvariantViolation, assert_invariants};
use super::missions::{MissionConfig, mission_configs};
use super::roles::{Role, VisibilityRules};
use super::rules::{
    FAILURES_TO_LOSE, MAX_REJECTED_PROPOSALS, SUCCESSES_TO_WIN, check_game_over, count_fails,
    tally_votes, team_approved,
};
use super::summary::{MissionRecord, StateSummary};
use super::visibility::{PrivateInfo, private_info};
use super::{GameState, MissionResult, Phase, Player, PlayerId, Team};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;
use tracing::{debug, info, instrument, warn};

/// Failure while replaying a recorded action log.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum ReplayError {
    /// The recorded seating could not start a game.
    #[display("Cannot seat recorded players: {_0}")]
    Setup(SetupError),

    /// A recorded action was refused.
    #[display("Action {index} was rejected: {rejection}")]
    #[from(ignore)]
    Rejected {
        /// Position in the log.
        index: usize,
        /// Why the engine refused it.
        #[error(source)]
        rejection: Rejection,
    },
}

/// A single Avalon game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    state: GameState,
    visibility: VisibilityRules,
    history: Vec<Action>,
}

impl Game {
    /// Deals a new game with thread-local randomness.
    ///
    /// # Errors
    ///
    /// Fails on an unsupported player count or a name-count mismatch.
    #[instrument(skip(names))]
    pub fn new(player_count: usize, names: &[String]) -> Result<Self, SetupError> {
        let players = distribute(player_count, names, &mut rand::thread_rng())?;
        Self::seat(players)
    }

    /// Deals a new game reproducibly from `seed`.
    #[instrument(skip(names))]
    pub fn with_seed(player_count: usize, names: &[String], seed: u64) -> Result<Self, SetupError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let players = distribute(player_count, names, &mut rng)?;
        Self::seat(players)
    }

    /// Starts a game from an explicit role list, one role per name.
    ///
    /// `roles` must be a permutation of the canonical set for its length.
    #[instrument(skip(names, roles), fields(players = roles.len()))]
    pub fn from_roles(names: &[String], roles: &[Role]) -> Result<Self, SetupError> {
        Self::seat(assign(names, roles)?)
    }

    /// Rebuilds a game by replaying `actions` on the given seating.
    ///
    /// Two replays of the same log over the same seating end in identical
    /// states.
    #[instrument(skip(players, actions), fields(players = players.len(), actions = actions.len()))]
    pub fn replay(players: &[Player], actions: &[Action]) -> Result<Self, ReplayError> {
        let names: Vec<String> = players.iter().map(|p| p.name().clone()).collect();
        let roles: Vec<Role> = players.iter().map(|p| *p.role()).collect();
        let mut game = Self::from_roles(&names, &roles)?;
        for (index, action) in actions.iter().enumerate() {
            game.apply(action.clone())
                .map_err(|rejection| ReplayError::Rejected { index, rejection })?;
        }
        assert_invariants(&game.state);
        info!(final_phase = %game.state.phase, "Replay complete");
        Ok(game)
    }

    /// Replaces the sight rules used when rendering private information.
    pub fn with_visibility(mut self, visibility: VisibilityRules) -> Self {
        self.visibility = visibility;
        self
    }

    fn seat(players: Vec<Player>) -> Result<Self, SetupError> {
        let configs = mission_configs(players.len())?.to_vec();
        let mut state = GameState::new(players, configs);

        state.phase = Phase::Discussion;
        state.current_round = 1;
        state.current_leader = 0;
        info!(players = state.player_count(), "Game started");

        Ok(Self {
            state,
            visibility: VisibilityRules::default(),
            history: Vec::new(),
        })
    }

    // ─────────────────────────────────────────────────────────────
    //  Queries
    // ─────────────────────────────────────────────────────────────

    /// Full game state, including secrets.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Seated players.
    pub fn players(&self) -> &[Player] {
        &self.state.players
    }

    /// Accepted actions in order.
    pub fn history(&self) -> &[Action] {
        &self.history
    }

    /// Sight rules in force.
    pub fn visibility(&self) -> &VisibilityRules {
        &self.visibility
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Whether a winner is decided.
    pub fn is_over(&self) -> bool {
        self.state.game_over
    }

    /// Winning team, once decided.
    pub fn winner(&self) -> Option<Team> {
        self.state.winner
    }

    /// Config of the round being played.
    pub fn current_mission(&self) -> Option<&MissionConfig> {
        self.state.current_mission()
    }

    /// Private information for one player.
    #[instrument(skip(self))]
    pub fn get_player_info(&self, player_id: PlayerId) -> Result<PrivateInfo, Rejection> {
        let player = self
            .state
            .player(player_id)
            .ok_or(Rejection::UnknownPlayer(player_id))?;
        Ok(private_info(player, &self.state.players, &self.visibility))
    }

    /// Observable state, with the viewer's private information when given.
    #[instrument(skip(self))]
    pub fn get_state_summary(&self, viewer: Option<PlayerId>) -> Result<StateSummary, Rejection> {
        let private_info = viewer.map(|seat| self.get_player_info(seat)).transpose()?;
        let state = &self.state;

        Ok(StateSummary {
            phase: state.phase,
            current_round: state.current_round,
            current_leader: state.current_leader,
            successful_missions: state.successful_missions,
            failed_missions: state.failed_missions,
            vote_round: state.vote_round,
            game_over: state.game_over,
            winner: state.winner,
            proposed_team: state.proposed_team.clone(),
            voted: state.votes.keys().copied().collect(),
            mission_config: state.current_mission().copied(),
            mission_history: state
                .mission_results
                .iter()
                .map(|result| MissionRecord::from_result(state, result))
                .collect(),
            private_info,
        })
    }

    // ─────────────────────────────────────────────────────────────
    //  Actions
    // ─────────────────────────────────────────────────────────────

    /// Applies any action, dispatching to the matching method.
    ///
    /// Returns the vote resolution for [`Action::ProcessVotes`].
    pub fn apply(&mut self, action: Action) -> Result<Option<VoteResolution>, Rejection> {
        match action {
            Action::ProposeTeam(p) => self.propose_team(p.leader, &p.members).map(|_| None),
            Action::VoteOnTeam(v) => self.vote_on_team(v.player, v.approve).map(|_| None),
            Action::ProcessVotes => self.process_voting_result().map(Some),
            Action::SubmitMission(m) => self.submit_mission_result(&m.votes).map(|_| None),
            Action::Assassinate(a) => self.assassinate(a.target).map(|_| None),
        }
    }

    /// The leader proposes a mission team; the table moves to VOTING.
    ///
    /// A proposal made while VOTING replaces the team under vote and
    /// discards the votes cast on it. `vote_round` is unchanged.
    #[instrument(skip(self), fields(round = self.state.current_round))]
    pub fn propose_team(
        &mut self,
        leader: PlayerId,
        members: &[PlayerId],
    ) -> Result<(), Rejection> {
        let proposal = TeamProposal {
            leader,
            members: members.to_vec(),
        };
        ProposalContract::pre(&self.state, &proposal)
            .inspect_err(|e| warn!(error = %e, "Proposal rejected"))?;
        let before = self.snapshot();

        let discarded = self.state.votes.len();
        self.state.proposed_team = proposal.members.clone();
        self.state.votes.clear();
        if self.state.phase == Phase::Voting {
            info!(?members, discarded, "Team re-proposed, votes discarded");
        } else {
            self.state.phase = Phase::Voting;
            info!(?members, "Team proposed");
        }

        self.commit::<ProposalContract, TeamProposal>(before, proposal.into());
        Ok(())
    }

    /// Records one player's vote on the proposed team.
    #[instrument(skip(self))]
    pub fn vote_on_team(&mut self, player: PlayerId, approve: bool) -> Result<(), Rejection> {
        let vote = TeamVote { player, approve };
        TeamVoteContract::pre(&self.state, &vote)
            .inspect_err(|e| warn!(error = %e, "Vote rejected"))?;
        let before = self.snapshot();

        self.state.votes.insert(player, approve);
        debug!(cast = self.state.votes.len(), "Vote recorded");

        self.commit::<TeamVoteContract, TeamVote>(before, vote.into());
        Ok(())
    }

    /// Resolves the team vote once every player has voted.
    ///
    /// Returns [`VoteResolution::Pending`] and changes nothing while votes
    /// are missing.
    #[instrument(
        skip(self),
        fields(round = self.state.current_round, vote_round = self.state.vote_round)
    )]
    pub fn process_voting_result(&mut self) -> Result<VoteResolution, Rejection> {
        ResolutionContract::pre(&self.state, &())
            .inspect_err(|e| warn!(error = %e, "Resolution rejected"))?;

        let n = self.state.player_count();
        let missing = n - self.state.votes.len();
        if missing > 0 {
            debug!(missing, "Votes outstanding");
            self.history.push(Action::ProcessVotes);
            return Ok(VoteResolution::Pending { missing });
        }

        let before = self.snapshot();
        let (approvals, rejections) = tally_votes(&self.state.votes);
        self.state.votes.clear();

        let resolution = if team_approved(approvals, n) {
            self.state.vote_round = 0;
            self.state.phase = Phase::Mission;
            info!(approvals, rejections, team = ?self.state.proposed_team, "Team approved");
            VoteResolution::Approved { approvals, rejections }
        } else {
            self.state.vote_round += 1;
            let vote_round = self.state.vote_round;
            info!(approvals, rejections, vote_round, "Team rejected");
            if vote_round < MAX_REJECTED_PROPOSALS {
                self.rotate_leader();
                self.state.proposed_team.clear();
                self.state.phase = Phase::Discussion;
            }
            VoteResolution::Rejected {
                approvals,
                rejections,
                vote_round,
            }
        };

        self.commit::<ResolutionContract, ()>(before, Action::ProcessVotes);
        Ok(resolution)
    }

    /// Scores the mission from every team member's secret card.
    #[instrument(skip(self, votes), fields(round = self.state.current_round))]
    pub fn submit_mission_result(
        &mut self,
        votes: &BTreeMap<PlayerId, bool>,
    ) -> Result<(), Rejection> {
        let cards = MissionVotes { votes: votes.clone() };
        MissionContract::pre(&self.state, &cards)
            .inspect_err(|e| warn!(error = %e, "Mission result rejected"))?;
        let config = *self
            .state
            .current_mission()
            .ok_or(Rejection::WrongPhase {
                expected: Phase::Mission,
                actual: self.state.phase,
            })?;
        let before = self.snapshot();

        let fail_count = count_fails(votes);
        let success = config.succeeds_with(fail_count);
        self.state.mission_results.push(MissionResult::new(
            config.round_number,
            self.state.proposed_team.clone(),
            votes.clone(),
            success,
            fail_count,
        ));
        if success {
            self.state.successful_missions += 1;
        } else {
            self.state.failed_missions += 1;
        }
        info!(
            success,
            fail_count,
            fails_needed = config.fails_needed,
            successes = self.state.successful_missions,
            failures = self.state.failed_missions,
            "Mission complete"
        );

        if self.state.successful_missions >= SUCCESSES_TO_WIN {
            self.state.vote_round = 0;
            self.state.phase = Phase::Assassination;
            info!("Good completed three missions, assassin to act");
        } else if self.state.failed_missions < FAILURES_TO_LOSE
            && self.state.current_round < self.state.mission_configs.len()
        {
            self.state.current_round += 1;
            self.rotate_leader();
            self.state.proposed_team.clear();
            self.state.votes.clear();
            self.state.vote_round = 0;
            self.state.phase = Phase::Discussion;
            info!(
                round = self.state.current_round,
                leader = self.state.current_leader,
                "Next round"
            );
        }

        self.commit::<MissionContract, MissionVotes>(before, cards.into());
        Ok(())
    }

    /// The assassin names a target, ending the game.
    #[instrument(skip(self))]
    pub fn assassinate(&mut self, target: PlayerId) -> Result<(), Rejection> {
        let attempt = AssassinationAttempt { target };
        AssassinationContract::pre(&self.state, &attempt)
            .inspect_err(|e| warn!(error = %e, "Assassination rejected"))?;
        let before = self.snapshot();

        self.state.assassination_target = Some(target);
        info!(target, "Assassin strikes");

        self.commit::<AssassinationContract, AssassinationAttempt>(before, attempt.into());
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────
    //  Internals
    // ─────────────────────────────────────────────────────────────

    fn rotate_leader(&mut self) {
        self.state.current_leader = self.state.next_seat(self.state.current_leader);
        debug!(leader = self.state.current_leader, "Leader rotated");
    }

    fn snapshot(&self) -> Option<GameState> {
        cfg!(debug_assertions).then(|| self.state.clone())
    }

    /// Settles terminal conditions, records the action and checks the
    /// postcondition in debug builds.
    fn commit<C, A>(&mut self, before: Option<GameState>, action: Action)
    where
        C: Contract<GameState, A>,
    {
        if let Some(winner) = check_game_over(&self.state) {
            self.finish(winner);
        }
        self.history.push(action);

        if let Some(before) = before {
            if let Err(violations) = C::post(&before, &self.state) {
                report(&violations);
            }
        }
    }

    fn finish(&mut self, winner: Team) {
        self.state.game_over = true;
        self.state.winner = Some(winner);
        self.state.phase = Phase::Finished;
        info!(%winner, round = self.state.current_round, "Game over");
    }
}

fn report(violations: &[InvariantViolation]) {
    for violation in violations {
        warn!(description = %violation.description, "Postcondition failed");
    }
    debug_assert!(violations.is_empty(), "Postconditions violated: {:?}", violations);
}
