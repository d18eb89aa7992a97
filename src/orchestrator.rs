//! Match and round orchestration.
//!
//! This module defines the [`Orchestrator`] type, which drives a whole duel between the human
//! board and the computer board. Its responsibilities include:
//!
//! - Walking the game states: hello screen, tutorial steps, then the competition
//! - Sampling one shared candy layout per round and pushing it to both boards
//! - Pacing rounds with presentation delays, countdowns and pauses
//! - Deciding round winners and ending the match at the win threshold
//! - Forwarding everything that happens to the [`PresentationHooks`] and [`TelemetrySink`]
//!
//! # Ticking
//!
//! The orchestrator never blocks and never reads a clock. The host calls
//! [`Orchestrator::tick`] with the elapsed time, and each tick runs in a fixed order:
//!
//! 1. due continuations (end of a presentation delay, next round...)
//! 2. round countdown, timing out both boards when it reaches zero
//! 3. input sampling for every playing side
//! 4. movement and collision resolution for every playing side
//! 5. round arbitration, once both sides have reported
//!
//! Hosts that run their own physics report contacts through
//! [`Orchestrator::report_collision`] instead. Anything reported outside a live round is
//! dropped.
//!
//! # Example
//!
//! ```
//! use candy_arena::prelude::*;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let settings = MatchSettingsBuilder::new().with_rounds_to_win(2).build().unwrap();
//! let config = Configuration::new().with_skip_tutorial(true);
//! let mut orchestrator = Orchestrator::new(
//!     settings,
//!     config,
//!     StdRng::seed_from_u64(1),
//!     (),
//!     MemoryTelemetry::default(),
//! );
//! orchestrator.start().unwrap();
//!
//! let mut moves = Sides::new(ChaseNearest::default(), Stand);
//! for _ in 0..100_000 {
//!     orchestrator.tick(0.02, &mut moves);
//!     if orchestrator.state() == GameState::CompetitionFinished {
//!         break;
//!     }
//! }
//! assert_eq!(orchestrator.state(), GameState::CompetitionFinished);
//! assert!(orchestrator.telemetry().match_record().is_some());
//! ```

use std::fmt;

use rand::Rng;
use tracing::{debug, info, instrument, trace, warn};

use crate::configuration::Configuration;
use crate::episode::{Collider, EpisodeController, EpisodeEvent, EpisodeOutcome};
use crate::error::ArenaError;
use crate::game_interface::{MoveSource, PresentationHooks, Side, TelemetrySink};
use crate::geometry::Vec2;
use crate::logger::init_logger;
use crate::placement::{place_entities_relaxed, Layout, PlacementRequest};
use crate::scoring::{arbitrate, EndReason, MatchScore, MatchSummary, RoundSummary};
use crate::settings::{MatchSettings, TutorialStage};
use crate::telemetry::OutcomeRecord;
use crate::timer::DelayQueue;

/// Steps of the tutorial, in play order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TutorialStep {
    /// The empty board is shown.
    ShowBoard,
    /// One candy, untimed.
    OneCandy,
    /// Two candies, untimed.
    TwoCandies,
    /// Four candies, untimed.
    FourCandies,
    /// Four candies, 10 seconds by default.
    TimedTen,
    /// Four candies, 5 seconds by default.
    TimedFive,
}

impl TutorialStep {
    /// 1-based step number.
    pub const fn number(self) -> u8 {
        match self {
            Self::ShowBoard => 1,
            Self::OneCandy => 2,
            Self::TwoCandies => 3,
            Self::FourCandies => 4,
            Self::TimedTen => 5,
            Self::TimedFive => 6,
        }
    }

    /// The step that follows, `None` after the last one.
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::ShowBoard => Some(Self::OneCandy),
            Self::OneCandy => Some(Self::TwoCandies),
            Self::TwoCandies => Some(Self::FourCandies),
            Self::FourCandies => Some(Self::TimedTen),
            Self::TimedTen => Some(Self::TimedFive),
            Self::TimedFive => None,
        }
    }

    /// Index in [`MatchSettings::tutorial`]. `None` for the board presentation.
    const fn stage_index(self) -> Option<usize> {
        match self {
            Self::ShowBoard => None,
            Self::OneCandy => Some(0),
            Self::TwoCandies => Some(1),
            Self::FourCandies => Some(2),
            Self::TimedTen => Some(3),
            Self::TimedFive => Some(4),
        }
    }
}

/// Top level state of a duel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    /// Not started.
    #[default]
    None,
    /// Greeting screen.
    Hello,
    /// Human-only practice.
    Tutorial(TutorialStep),
    /// Tutorial over, waiting for the competition to start.
    CompetitionPending,
    /// Rounds are being played.
    CompetitionActive,
    /// A side reached the win threshold.
    CompetitionFinished,
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameState::Tutorial(step) => write!(f, "Tutorial {} ({step:?})", step.number()),
            other => fmt::Debug::fmt(other, f),
        }
    }
}

/// Work resumed once a delay elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Continuation {
    HelloDone,
    ShowBoardDone,
    ActivateEpisodes,
    RestartTutorialEpisode,
    NextTutorialStep,
    NextRound,
    StartCompetition,
}

/// What happened during a call to the orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchEvent {
    /// The game state moved.
    StateChanged {
        /// Previous state.
        from: GameState,
        /// New state.
        to: GameState,
    },
    /// A board was laid out. Movement starts after the presentation delay.
    EpisodeStarted {
        /// Board laid out.
        side: Side,
        /// Candies on the board.
        candies: usize,
    },
    /// The presentation delay ended and the playing boards accept movement.
    EpisodesActivated {
        /// Countdown length, `None` when untimed.
        time_budget: Option<f32>,
    },
    /// First move of a side this episode.
    FirstMove(Side),
    /// A side collected a candy.
    RewardCollected {
        /// Collecting side.
        side: Side,
        /// Candy index in placement order.
        candy: usize,
        /// Points awarded.
        value: u32,
        /// Points of the side this round, `value` included.
        round_points: u32,
    },
    /// A side left its board.
    WallHit(Side),
    /// A board reached an end phase.
    EpisodeEnded {
        /// Board that ended.
        side: Side,
        /// How it ended.
        outcome: EpisodeOutcome,
    },
    /// The human reached the points needed to leave a tutorial step.
    TutorialAdvanced {
        /// Step completed.
        step: TutorialStep,
        /// Cumulative tutorial points.
        points: u32,
    },
    /// A competition round was decided.
    RoundEnded(RoundSummary),
    /// No layout could be sampled for this round. The next round is scheduled.
    RoundSkipped {
        /// Skipped round number.
        round: u32,
        /// Why placement failed.
        error: ArenaError,
    },
    /// A side reached the win threshold.
    MatchEnded(MatchSummary),
}

/// Drives a full duel: hello screen, tutorial and competition rounds.
///
/// # Type Parameters
/// - `R`: random source used for candy placement
/// - `H`: presentation collaborator, see [`PresentationHooks`]
/// - `T`: telemetry collaborator, see [`TelemetrySink`]
pub struct Orchestrator<R, H, T> {
    settings: MatchSettings,
    config: Configuration,
    rng: R,
    hooks: H,
    telemetry: T,
    state: GameState,
    boards: [EpisodeController; 2],
    round: u32,
    score: MatchScore,
    round_points: [u32; 2],
    tutorial_points: u32,
    countdown: Option<f32>,
    round_live: bool,
    timers: DelayQueue<Continuation>,
    started: bool,
}

impl<R: Rng, H: PresentationHooks, T: TelemetrySink> Orchestrator<R, H, T> {
    /// Create an [`Orchestrator`] with its collaborators.
    ///
    /// Installs the file logger when `config` asks for it. A logger that cannot be installed
    /// is reported and the match runs without it.
    #[instrument(skip_all)]
    pub fn new(
        settings: MatchSettings,
        config: Configuration,
        rng: R,
        hooks: H,
        telemetry: T,
    ) -> Self {
        if config.log {
            if let Err(err) = init_logger() {
                warn!("file logging disabled: {err:#}");
            }
        }

        trace!(?config, ?settings);

        let boards =
            Side::ALL.map(|side| EpisodeController::new(side, settings.arena, settings.episode));
        Self {
            settings,
            config,
            rng,
            hooks,
            telemetry,
            state: GameState::None,
            boards,
            round: 0,
            score: MatchScore::default(),
            round_points: [0; 2],
            tutorial_points: 0,
            countdown: None,
            round_live: false,
            timers: DelayQueue::new(),
            started: false,
        }
    }

    /// Starts the duel: greets the player, or goes straight to the pending competition when
    /// the tutorial is skipped.
    ///
    /// # Errors
    /// [`ArenaError::InvalidTransition`] when already started.
    pub fn start(&mut self) -> Result<Vec<MatchEvent>, ArenaError> {
        if self.state != GameState::None {
            return Err(self.invalid("start"));
        }
        self.hooks.init();
        self.telemetry.init();
        self.started = true;

        let mut events = vec![];
        if self.config.skip_tutorial {
            self.enter_competition_pending(&mut events);
        } else {
            self.transition(GameState::Hello, &mut events);
            self.timers
                .schedule(self.settings.hello_duration, Continuation::HelloDone);
        }
        Ok(events)
    }

    /// Leaves the hello screen or the tutorial for the pending competition.
    ///
    /// # Errors
    /// [`ArenaError::InvalidTransition`] outside `Hello` and `Tutorial`.
    pub fn skip_tutorial(&mut self) -> Result<Vec<MatchEvent>, ArenaError> {
        if !matches!(self.state, GameState::Hello | GameState::Tutorial(_)) {
            return Err(self.invalid("skip_tutorial"));
        }
        info!("tutorial skipped");
        self.timers.clear();
        self.close_episodes();

        let mut events = vec![];
        self.enter_competition_pending(&mut events);
        Ok(events)
    }

    /// Starts a new competition with cleared win counters, then lays out round 1.
    ///
    /// # Errors
    /// [`ArenaError::InvalidTransition`] unless the competition is pending or finished.
    pub fn start_competition(&mut self) -> Result<Vec<MatchEvent>, ArenaError> {
        if !matches!(
            self.state,
            GameState::CompetitionPending | GameState::CompetitionFinished
        ) {
            return Err(self.invalid("start_competition"));
        }
        let mut events = vec![];
        self.begin_competition(&mut events);
        Ok(events)
    }

    /// Advances the simulation by `dt` seconds.
    ///
    /// Non-finite or non-positive steps are ignored. Steps longer than the configured maximum
    /// are shortened to it.
    pub fn tick<M: MoveSource + ?Sized>(&mut self, dt: f32, moves: &mut M) -> Vec<MatchEvent> {
        let mut events = vec![];
        if !dt.is_finite() || dt <= 0.0 {
            trace!(dt, "tick ignored");
            return events;
        }
        let dt = dt.min(self.settings.max_tick);

        for continuation in self.timers.advance(dt) {
            self.resume(continuation, &mut events);
        }

        if !self.round_live {
            return events;
        }

        let mut ended = vec![];

        if let Some(remaining) = self.countdown {
            let remaining = (remaining - dt).max(0.0);
            self.countdown = Some(remaining);
            self.hooks.on_countdown(remaining);
            if remaining <= 0.0 {
                debug!(round = self.round, "countdown elapsed");
                for side in self.playing_sides() {
                    if let Some(event) = self.boards[side.index()].timeout() {
                        self.absorb(side, [event], &mut events, &mut ended);
                    }
                }
                self.resolve_round(&ended, &mut events);
                return events;
            }
        }

        let sides = self.playing_sides();
        let actions: Vec<(Side, Vec2)> = sides
            .iter()
            .map(|&side| (side, moves.move_vector(side, &self.boards[side.index()].view())))
            .collect();
        for (side, action) in actions {
            let board_events = self.boards[side.index()].tick(dt, action);
            self.absorb(side, board_events, &mut events, &mut ended);
        }

        self.resolve_round(&ended, &mut events);
        events
    }

    /// Feeds a contact detected by the host's physics.
    ///
    /// Dropped unless `side` is playing a live round.
    pub fn report_collision(&mut self, side: Side, collider: Collider) -> Vec<MatchEvent> {
        let mut events = vec![];
        if !self.round_live || !self.playing_sides().contains(&side) {
            debug!(%side, ?collider, state = %self.state, "stale collision dropped");
            return events;
        }
        let mut ended = vec![];
        let board_events = self.boards[side.index()].report_collision(collider);
        self.absorb(side, board_events, &mut events, &mut ended);
        self.resolve_round(&ended, &mut events);
        events
    }

    /// Stops everything and releases the collaborators.
    ///
    /// Pending continuations are cancelled and both boards are closed. Calling it twice only
    /// tears the collaborators down once.
    pub fn shutdown(&mut self) {
        self.timers.clear();
        self.close_episodes();
        if std::mem::take(&mut self.started) {
            info!(state = %self.state, score = %self.score, "shutting down");
            self.telemetry.teardown();
            self.hooks.teardown();
        }
    }

    fn resume(&mut self, continuation: Continuation, events: &mut Vec<MatchEvent>) {
        trace!(?continuation, state = %self.state);
        match (continuation, self.state) {
            (Continuation::HelloDone, GameState::Hello) => {
                self.transition(GameState::Tutorial(TutorialStep::ShowBoard), events);
                self.timers
                    .schedule(self.settings.show_board_delay, Continuation::ShowBoardDone);
            }
            (Continuation::ShowBoardDone, GameState::Tutorial(TutorialStep::ShowBoard)) => {
                self.enter_tutorial_step(TutorialStep::OneCandy, events);
            }
            (
                Continuation::ActivateEpisodes,
                GameState::Tutorial(_) | GameState::CompetitionActive,
            ) => {
                self.activate_episodes(events);
            }
            (Continuation::RestartTutorialEpisode, GameState::Tutorial(step)) => {
                self.start_tutorial_episode(step, events);
            }
            (Continuation::NextTutorialStep, GameState::Tutorial(step)) => match step.next() {
                Some(next) => self.enter_tutorial_step(next, events),
                None => self.enter_competition_pending(events),
            },
            (Continuation::NextRound, GameState::CompetitionActive) => {
                self.start_round(events);
            }
            (Continuation::StartCompetition, GameState::CompetitionPending) => {
                self.begin_competition(events);
            }
            (continuation, state) => {
                debug!(?continuation, %state, "stale continuation dropped");
            }
        }
    }

    fn transition(&mut self, to: GameState, events: &mut Vec<MatchEvent>) {
        let from = self.state;
        if from == to {
            return;
        }
        info!(%from, %to, "state changed");
        self.state = to;
        self.hooks.on_state_changed(from, to);
        events.push(MatchEvent::StateChanged { from, to });
    }

    fn enter_competition_pending(&mut self, events: &mut Vec<MatchEvent>) {
        self.transition(GameState::CompetitionPending, events);
        if let Some(delay) = self.settings.competition_start_delay {
            self.timers.schedule(delay, Continuation::StartCompetition);
        }
    }

    fn enter_tutorial_step(&mut self, step: TutorialStep, events: &mut Vec<MatchEvent>) {
        self.transition(GameState::Tutorial(step), events);
        self.start_tutorial_episode(step, events);
    }

    fn tutorial_stage(&self, step: TutorialStep) -> Option<TutorialStage> {
        step.stage_index().map(|i| self.settings.tutorial[i])
    }

    fn start_tutorial_episode(&mut self, step: TutorialStep, events: &mut Vec<MatchEvent>) {
        let Some(stage) = self.tutorial_stage(step) else {
            return;
        };
        // practice boards always start at the center
        let request = self.placement_request(stage.candies).with_agent_random(false);
        match self.lay_out(&request, &[Side::Human], events) {
            Ok(()) => {
                debug!(step = step.number(), candies = stage.candies, "tutorial episode");
            }
            Err(err) => {
                warn!(step = step.number(), "tutorial episode not laid out: {err}");
                self.timers
                    .schedule(self.settings.round_end_pause, Continuation::RestartTutorialEpisode);
            }
        }
    }

    fn begin_competition(&mut self, events: &mut Vec<MatchEvent>) {
        self.timers.clear();
        self.close_episodes();
        self.score = MatchScore::default();
        self.round = 0;
        self.round_points = [0; 2];
        self.transition(GameState::CompetitionActive, events);
        self.start_round(events);
    }

    fn start_round(&mut self, events: &mut Vec<MatchEvent>) {
        self.round += 1;
        let request = self.placement_request(self.settings.competition_candies);
        match self.lay_out(&request, &Side::ALL, events) {
            Ok(()) => info!(round = self.round, "round laid out"),
            Err(error) => {
                warn!(round = self.round, "round skipped: {error}");
                self.close_episodes();
                events.push(MatchEvent::RoundSkipped {
                    round: self.round,
                    error,
                });
                self.timers
                    .schedule(self.settings.round_end_pause, Continuation::NextRound);
            }
        }
    }

    fn placement_request(&self, candies: usize) -> PlacementRequest {
        let arena = &self.settings.arena;
        PlacementRequest::new(candies, arena.half_extent(), arena.min_separation)
            .with_agent_random(arena.agent_random)
            .with_max_attempts(self.settings.max_placement_attempts)
            .with_separation_floor(arena.pickup_radius)
    }

    /// Samples one layout and starts it on every side in `sides`.
    fn lay_out(
        &mut self,
        request: &PlacementRequest,
        sides: &[Side],
        events: &mut Vec<MatchEvent>,
    ) -> Result<(), ArenaError> {
        let layout: Layout = place_entities_relaxed(
            &mut self.rng,
            request,
            self.settings.relax_factor,
            self.settings.max_relaxations,
        )?;
        for &side in sides {
            self.boards[side.index()].start_episode(&layout)?;
        }
        self.round_points = [0; 2];
        for &side in sides {
            self.hooks.on_episode_start(side, &layout);
            events.push(MatchEvent::EpisodeStarted {
                side,
                candies: layout.candies.len(),
            });
        }
        self.timers
            .schedule(self.settings.presentation_delay, Continuation::ActivateEpisodes);
        Ok(())
    }

    fn activate_episodes(&mut self, events: &mut Vec<MatchEvent>) {
        let mut activated = false;
        for side in self.playing_sides() {
            activated |= self.boards[side.index()].activate();
        }
        if !activated {
            debug!(state = %self.state, "no board to activate");
            return;
        }

        let time_budget = match self.state {
            GameState::Tutorial(step) => self.tutorial_stage(step).and_then(|s| s.time_budget),
            GameState::CompetitionActive => {
                Some(self.settings.round_time_budget(self.round.saturating_sub(1)))
            }
            _ => None,
        };
        self.round_live = true;
        self.countdown = time_budget;
        if let Some(budget) = time_budget {
            self.hooks.on_countdown(budget);
        }
        debug!(?time_budget, "boards active");
        events.push(MatchEvent::EpisodesActivated { time_budget });
    }

    fn playing_sides(&self) -> Vec<Side> {
        match self.state {
            GameState::Tutorial(_) => vec![Side::Human],
            GameState::CompetitionActive => Side::ALL.to_vec(),
            _ => vec![],
        }
    }

    /// Applies one board's events to the round tallies and forwards them.
    fn absorb(
        &mut self,
        side: Side,
        board_events: impl IntoIterator<Item = EpisodeEvent>,
        events: &mut Vec<MatchEvent>,
        ended: &mut Vec<(Side, EpisodeOutcome)>,
    ) {
        for event in board_events {
            match event {
                EpisodeEvent::FirstMove => {
                    self.hooks.on_first_move(side);
                    events.push(MatchEvent::FirstMove(side));
                }
                EpisodeEvent::Collected { candy, value, .. } => {
                    let points = &mut self.round_points[side.index()];
                    *points += value;
                    let round_points = *points;
                    if matches!(self.state, GameState::Tutorial(_)) {
                        self.tutorial_points += value;
                    }
                    self.hooks.on_reward_collected(side, value, round_points);
                    events.push(MatchEvent::RewardCollected {
                        side,
                        candy,
                        value,
                        round_points,
                    });
                }
                EpisodeEvent::WallHit => {
                    self.hooks.on_wall_hit(side);
                    events.push(MatchEvent::WallHit(side));
                }
                EpisodeEvent::Ended(outcome) => {
                    events.push(MatchEvent::EpisodeEnded { side, outcome });
                    ended.push((side, outcome));
                }
            }
        }
    }

    /// Decides what the tick's reports mean for the running round.
    fn resolve_round(&mut self, ended: &[(Side, EpisodeOutcome)], events: &mut Vec<MatchEvent>) {
        if !self.round_live {
            return;
        }
        match self.state {
            GameState::Tutorial(step) => {
                let reached = self
                    .tutorial_stage(step)
                    .is_some_and(|stage| self.tutorial_points >= stage.points_to_advance);
                if reached {
                    info!(
                        step = step.number(),
                        points = self.tutorial_points,
                        "tutorial step done"
                    );
                    self.close_episodes();
                    events.push(MatchEvent::TutorialAdvanced {
                        step,
                        points: self.tutorial_points,
                    });
                    self.timers
                        .schedule(self.settings.round_end_pause, Continuation::NextTutorialStep);
                } else if !ended.is_empty() {
                    self.close_episodes();
                    self.timers.schedule(
                        self.settings.round_end_pause,
                        Continuation::RestartTutorialEpisode,
                    );
                }
            }
            GameState::CompetitionActive => {
                if let Some(&(side, outcome)) = ended.first() {
                    let reason = match outcome {
                        EpisodeOutcome::Succeeded => EndReason::AllCollected(side),
                        EpisodeOutcome::HitWall => EndReason::HitWall(side),
                        EpisodeOutcome::TimedOut => EndReason::Timeout,
                    };
                    self.end_round(reason, events);
                }
            }
            _ => {}
        }
    }

    fn end_round(&mut self, reason: EndReason, events: &mut Vec<MatchEvent>) {
        self.close_episodes();

        let winner = arbitrate(self.round_points);
        self.score.record(winner);
        let summary = RoundSummary {
            round: self.round,
            winner,
            reason,
            points: self.round_points,
            wins: self.score.wins_array(),
        };
        info!(%summary, "round ended");
        self.hooks.on_round_end(&summary);
        self.telemetry.record(&OutcomeRecord::from(&summary));
        events.push(MatchEvent::RoundEnded(summary));
        self.round_points = [0; 2];

        match self.score.leader_at(self.settings.rounds_to_win) {
            Some(winner) => self.finish_match(winner, events),
            None => {
                self.timers
                    .schedule(self.settings.round_end_pause, Continuation::NextRound);
            }
        }
    }

    fn finish_match(&mut self, winner: Side, events: &mut Vec<MatchEvent>) {
        self.timers.clear();
        self.transition(GameState::CompetitionFinished, events);
        let summary = MatchSummary {
            winner,
            wins: self.score.wins_array(),
            rounds_played: self.score.rounds_played(),
            draws: self.score.draws,
        };
        info!(%winner, score = %self.score, "match ended");
        self.hooks.on_match_end(&summary);
        self.telemetry.record(&OutcomeRecord::from(&summary));
        self.telemetry.flush();
        events.push(MatchEvent::MatchEnded(summary));
    }

    /// Ends live play on both boards.
    fn close_episodes(&mut self) {
        self.round_live = false;
        self.countdown = None;
        for board in &mut self.boards {
            board.conclude();
        }
    }

    fn invalid(&self, action: &'static str) -> ArenaError {
        ArenaError::InvalidTransition {
            action,
            state: self.state,
        }
    }

    /// Current game state.
    pub fn state(&self) -> GameState {
        self.state
    }

    /// 1-based number of the current (or last) competition round. 0 before the first one.
    pub fn round_number(&self) -> u32 {
        self.round
    }

    /// Round wins of `side`.
    pub fn wins(&self, side: Side) -> u32 {
        self.score.wins(side)
    }

    /// Points of `side` in the running round or tutorial episode.
    pub fn round_points(&self, side: Side) -> u32 {
        self.round_points[side.index()]
    }

    /// Points the human collected over the whole tutorial.
    pub fn tutorial_points(&self) -> u32 {
        self.tutorial_points
    }

    /// Time left in the running round, `None` when untimed or between rounds.
    pub fn countdown(&self) -> Option<f32> {
        self.countdown
    }

    /// True while boards accept movement and collisions.
    pub fn is_round_live(&self) -> bool {
        self.round_live
    }

    /// The board of `side`.
    pub fn board(&self, side: Side) -> &EpisodeController {
        &self.boards[side.index()]
    }

    /// Win tally of the competition.
    pub fn score(&self) -> MatchScore {
        self.score
    }

    /// Settings the duel runs with.
    pub fn settings(&self) -> &MatchSettings {
        &self.settings
    }

    /// The presentation collaborator.
    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    /// The telemetry collaborator.
    pub fn telemetry(&self) -> &T {
        &self.telemetry
    }

    /// Mutable access to the telemetry collaborator.
    pub fn telemetry_mut(&mut self) -> &mut T {
        &mut self.telemetry
    }
}
