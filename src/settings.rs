//! Board, episode and match tunables.
//!
//! This module provides the knobs of a duel: arena geometry, agent movement and learning
//! penalties, the tutorial progression and the competition pacing.
//!
//! # Overview
//!
//! The main entry point is the [`MatchSettingsBuilder`] struct, which uses a builder
//! pattern. These include:
//!
//! - **Arena**: stage size and scale, wall margin, candy spacing, pickup radius
//! - **Episode**: move speed, idle / timeout / off-stage learning penalties
//! - **Competition**: rounds needed to win, candies per round, round time ramp
//! - **Pacing**: hello screen, presentation delay, pause between rounds
//!
//! Once built, a [`MatchSettings`] object is handed to the
//! [`Orchestrator`](crate::orchestrator::Orchestrator). Everything is validated in
//! [`MatchSettingsBuilder::build`], so a bad value never reaches the simulation tick.
//!
//! # Example
//!
//! ```
//! use candy_arena::settings::MatchSettingsBuilder;
//!
//! let settings = MatchSettingsBuilder::new()
//!     .with_rounds_to_win(5)
//!     .with_round_time(8.0, 3.0)
//!     .with_move_speed(5.0)
//!     .build()
//!     .unwrap();
//! assert_eq!(settings.round_time_budget(0), 8.0);
//! assert_eq!(settings.round_time_budget(20), 3.0);
//! ```
//!
//! You may also construct settings from environment variables using
//! [`MatchSettingsBuilder::from_env()`] for runtime configurability.

use std::{env, f32::consts::PI};

use anyhow::bail;
use tracing::warn;

use crate::placement::DEFAULT_MAX_ATTEMPTS;

/// Densest packing of equal disks in the plane.
const HEX_PACKING_DENSITY: f32 = 0.9069;

/// Most candies a board can hold.
pub const MAX_CANDIES: usize = 5;

/// Square arena geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArenaSettings {
    /// Half side of the area where entities spawn, before scaling.
    pub stage_size: f32,
    /// Scale of the stage, in `[1, 2]`.
    pub stage_scale: f32,
    /// Distance between the spawn area edge and the boundary markers.
    pub wall_margin: f32,
    /// Minimum distance between spawned entities.
    pub min_separation: f32,
    /// Distance at which the agent picks a candy up.
    pub pickup_radius: f32,
    /// Spawn the agent at a random spot instead of the center.
    pub agent_random: bool,
}

impl Default for ArenaSettings {
    fn default() -> Self {
        Self {
            stage_size: 4.0,
            stage_scale: 1.0,
            wall_margin: 1.0,
            min_separation: 1.5,
            pickup_radius: 0.75,
            agent_random: false,
        }
    }
}

impl ArenaSettings {
    /// Half side of the spawn square.
    pub fn half_extent(&self) -> f32 {
        self.stage_size * self.stage_scale
    }

    /// Coordinate (on either axis) beyond which the agent is off stage.
    pub fn boundary(&self) -> f32 {
        self.half_extent() + self.wall_margin
    }
}

/// Agent movement and the learning signals reported to a training collaborator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeSettings {
    /// Units per second at full stick.
    pub move_speed: f32,
    /// Added to the learning signal every tick of live play.
    pub idle_time_penalty: f32,
    /// Learning signal on timeout.
    pub timeout_penalty: f32,
    /// Learning signal on leaving the board.
    pub off_stage_penalty: f32,
}

impl Default for EpisodeSettings {
    fn default() -> Self {
        Self {
            move_speed: 4.0,
            idle_time_penalty: 0.0,
            timeout_penalty: -2.0,
            off_stage_penalty: -2.0,
        }
    }
}

/// One playable tutorial step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TutorialStage {
    /// Candies on the board.
    pub candies: usize,
    /// Episode time limit in seconds, `None` for untimed.
    pub time_budget: Option<f32>,
    /// Cumulative human tutorial points needed to move on.
    pub points_to_advance: u32,
}

impl TutorialStage {
    const fn new(candies: usize, time_budget: Option<f32>, points_to_advance: u32) -> Self {
        Self {
            candies,
            time_budget,
            points_to_advance,
        }
    }
}

/// Tutorial steps 2 to 6: candies grow 1 -> 2 -> 4, then time pressure 10 s -> 5 s.
pub const DEFAULT_TUTORIAL: [TutorialStage; 5] = [
    TutorialStage::new(1, None, 3),
    TutorialStage::new(2, None, 13),
    TutorialStage::new(4, None, 50),
    TutorialStage::new(4, Some(10.0), 70),
    TutorialStage::new(4, Some(5.0), 90),
];

/// A builder for the settings of a duel.
///
/// Every field left unset falls back to its default when [`build`](Self::build) is called.
///
/// # Examples
///
/// ```
/// # use candy_arena::settings::MatchSettingsBuilder;
/// let settings = MatchSettingsBuilder::new()
///     .with_stage_scale(1.5)
///     .with_competition_candies(3)
///     .with_rounds_to_win(3)
///     .build();
/// assert!(settings.is_ok());
/// ```
#[derive(Debug, Default, Clone)]
pub struct MatchSettingsBuilder {
    arena: ArenaSettings,
    episode: EpisodeSettings,
    rounds_to_win: Option<u32>,
    competition_candies: Option<usize>,
    round_time: Option<(f32, f32)>,
    presentation_delay: Option<f32>,
    round_end_pause: Option<f32>,
    hello_duration: Option<f32>,
    show_board_delay: Option<f32>,
    competition_start_delay: Option<Option<f32>>,
    tutorial: Option<[TutorialStage; 5]>,
    max_placement_attempts: Option<usize>,
    relaxation: Option<(f32, usize)>,
    max_tick: Option<f32>,
}

impl MatchSettingsBuilder {
    /// Creates a builder with every setting at its default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder configured from environment variables.
    ///
    /// Read environment variables are:
    /// - `ARENA_STAGE_SIZE` (f32): half side of the spawn area
    /// - `ARENA_STAGE_SCALE` (f32): stage scale in `[1, 2]`
    /// - `ARENA_MIN_SEPARATION` (f32): minimum spawn distance between entities
    /// - `ARENA_MOVE_SPEED` (f32): agent speed in units per second
    /// - `ARENA_AGENT_RANDOM` (bool): random agent spawn
    /// - `ARENA_ROUNDS_TO_WIN` (u32): round wins needed to take the match
    /// - `ARENA_COMPETITION_CANDIES` (usize): candies per competition round
    /// - `ARENA_ROUND_TIME_SECS` (f32): time budget of the first round
    /// - `ARENA_ROUND_TIME_FLOOR_SECS` (f32): smallest round time budget
    ///
    /// Unset or unparsable variables keep their default.
    #[must_use]
    pub fn from_env() -> Self {
        fn parse<T: std::str::FromStr>(var: &str) -> Option<T> {
            env::var(var).ok()?.trim().parse().ok()
        }

        fn parse_flag(var: &str) -> Option<bool> {
            env::var(var)
                .ok()
                .map(|val| val.trim().eq_ignore_ascii_case("true"))
        }

        let mut builder = Self::new();
        if let Some(size) = parse("ARENA_STAGE_SIZE") {
            builder = builder.with_stage_size(size);
        }
        if let Some(scale) = parse("ARENA_STAGE_SCALE") {
            builder = builder.with_stage_scale(scale);
        }
        if let Some(separation) = parse("ARENA_MIN_SEPARATION") {
            builder = builder.with_min_separation(separation);
        }
        if let Some(speed) = parse("ARENA_MOVE_SPEED") {
            builder = builder.with_move_speed(speed);
        }
        if let Some(random) = parse_flag("ARENA_AGENT_RANDOM") {
            builder = builder.with_agent_random(random);
        }
        if let Some(rounds) = parse("ARENA_ROUNDS_TO_WIN") {
            builder = builder.with_rounds_to_win(rounds);
        }
        if let Some(candies) = parse("ARENA_COMPETITION_CANDIES") {
            builder = builder.with_competition_candies(candies);
        }
        let initial = parse("ARENA_ROUND_TIME_SECS");
        let floor = parse("ARENA_ROUND_TIME_FLOOR_SECS");
        if initial.is_some() || floor.is_some() {
            builder = builder.with_round_time(initial.unwrap_or(10.0), floor.unwrap_or(3.0));
        }
        builder
    }

    /// Sets the half side of the spawn area (before scaling).
    #[must_use]
    pub fn with_stage_size(mut self, size: f32) -> Self {
        self.arena.stage_size = size;
        self
    }

    /// Sets the stage scale, in `[1, 2]`.
    #[must_use]
    pub fn with_stage_scale(mut self, scale: f32) -> Self {
        self.arena.stage_scale = scale;
        self
    }

    /// Sets the gap between the spawn area and the boundary markers.
    #[must_use]
    pub fn with_wall_margin(mut self, margin: f32) -> Self {
        self.arena.wall_margin = margin;
        self
    }

    /// Sets the minimum spawn distance between entities.
    #[must_use]
    pub fn with_min_separation(mut self, separation: f32) -> Self {
        self.arena.min_separation = separation;
        self
    }

    /// Sets the candy pickup radius.
    #[must_use]
    pub fn with_pickup_radius(mut self, radius: f32) -> Self {
        self.arena.pickup_radius = radius;
        self
    }

    /// Spawns competition agents at random spots instead of the center.
    ///
    /// Tutorial episodes always start at the center.
    #[must_use]
    pub fn with_agent_random(mut self, random: bool) -> Self {
        self.arena.agent_random = random;
        self
    }

    /// Sets the agent speed in units per second.
    #[must_use]
    pub fn with_move_speed(mut self, speed: f32) -> Self {
        self.episode.move_speed = speed;
        self
    }

    /// Sets the learning penalties: per tick idle cost (`[0, 0.1]`), timeout and off stage
    /// (both `<= 0`).
    #[must_use]
    pub fn with_penalties(mut self, idle: f32, timeout: f32, off_stage: f32) -> Self {
        self.episode.idle_time_penalty = idle;
        self.episode.timeout_penalty = timeout;
        self.episode.off_stage_penalty = off_stage;
        self
    }

    /// Sets how many round wins take the match.
    #[must_use]
    pub fn with_rounds_to_win(self, rounds: u32) -> Self {
        Self {
            rounds_to_win: Some(rounds),
            ..self
        }
    }

    /// Sets the number of candies in competition rounds.
    #[must_use]
    pub fn with_competition_candies(self, candies: usize) -> Self {
        Self {
            competition_candies: Some(candies),
            ..self
        }
    }

    /// Sets the round time ramp: round `i` (0-based) lasts `max(initial - i, floor)` seconds.
    #[must_use]
    pub fn with_round_time(self, initial: f32, floor: f32) -> Self {
        Self {
            round_time: Some((initial, floor)),
            ..self
        }
    }

    /// Sets the delay between laying a board out and enabling movement.
    #[must_use]
    pub fn with_presentation_delay(self, seconds: f32) -> Self {
        Self {
            presentation_delay: Some(seconds),
            ..self
        }
    }

    /// Sets the pause between the end of a round (or tutorial episode) and the next one.
    #[must_use]
    pub fn with_round_end_pause(self, seconds: f32) -> Self {
        Self {
            round_end_pause: Some(seconds),
            ..self
        }
    }

    /// Sets how long the hello screen lasts.
    #[must_use]
    pub fn with_hello_duration(self, seconds: f32) -> Self {
        Self {
            hello_duration: Some(seconds),
            ..self
        }
    }

    /// Sets how long the board is shown before the first tutorial candy appears.
    #[must_use]
    pub fn with_show_board_delay(self, seconds: f32) -> Self {
        Self {
            show_board_delay: Some(seconds),
            ..self
        }
    }

    /// Sets the automatic competition start delay. `None` waits for
    /// [`Orchestrator::start_competition`](crate::orchestrator::Orchestrator::start_competition).
    #[must_use]
    pub fn with_competition_start_delay(self, delay: Option<f32>) -> Self {
        Self {
            competition_start_delay: Some(delay),
            ..self
        }
    }

    /// Replaces the tutorial steps 2 to 6.
    #[must_use]
    pub fn with_tutorial(self, stages: [TutorialStage; 5]) -> Self {
        Self {
            tutorial: Some(stages),
            ..self
        }
    }

    /// Sets the number of draws per candy before placement gives up.
    #[must_use]
    pub fn with_max_placement_attempts(self, attempts: usize) -> Self {
        Self {
            max_placement_attempts: Some(attempts),
            ..self
        }
    }

    /// Sets how spacing is relaxed after an exhausted placement.
    #[must_use]
    pub fn with_relaxation(self, factor: f32, max_relaxations: usize) -> Self {
        Self {
            relaxation: Some((factor, max_relaxations)),
            ..self
        }
    }

    /// Sets the longest tick accepted; longer ticks are cut down to it.
    #[must_use]
    pub fn with_max_tick(self, seconds: f32) -> Self {
        Self {
            max_tick: Some(seconds),
            ..self
        }
    }

    /// Consumes the builder and returns validated `MatchSettings`.
    ///
    /// # Errors
    ///
    /// Returns an error when a value is out of range, e.g. a negative move speed, no candy
    /// per round, or more candies than the arena can fit at the requested spacing.
    pub fn build(self) -> anyhow::Result<MatchSettings> {
        let arena = self.arena;
        let episode = self.episode;

        if !arena.stage_size.is_finite() || arena.stage_size <= 0.0 {
            bail!("stage size must be positive, got {}", arena.stage_size);
        }
        if !(1.0..=2.0).contains(&arena.stage_scale) {
            bail!("stage scale must be in [1, 2], got {}", arena.stage_scale);
        }
        if !arena.wall_margin.is_finite() || arena.wall_margin < 0.0 {
            bail!("wall margin must be non-negative, got {}", arena.wall_margin);
        }
        if !arena.min_separation.is_finite() || arena.min_separation < 0.0 {
            bail!(
                "minimum separation must be non-negative, got {}",
                arena.min_separation
            );
        }
        if !arena.pickup_radius.is_finite() || arena.pickup_radius <= 0.0 {
            bail!("pickup radius must be positive, got {}", arena.pickup_radius);
        }
        if !(2.0 * arena.boundary()).is_finite() {
            bail!(
                "board of half extent {} and wall margin {} is too large",
                arena.half_extent(),
                arena.wall_margin
            );
        }
        if arena.min_separation < arena.pickup_radius {
            bail!(
                "minimum separation ({}) must be at least the pickup radius ({})",
                arena.min_separation,
                arena.pickup_radius
            );
        }
        if !episode.move_speed.is_finite() || episode.move_speed <= 0.0 {
            bail!("move speed must be positive, got {}", episode.move_speed);
        }
        if !(0.0..=0.1).contains(&episode.idle_time_penalty) {
            bail!(
                "idle penalty must be in [0, 0.1], got {}",
                episode.idle_time_penalty
            );
        }
        if !(episode.timeout_penalty <= 0.0 && episode.off_stage_penalty <= 0.0) {
            bail!(
                "timeout and off stage penalties must be <= 0, got {} and {}",
                episode.timeout_penalty,
                episode.off_stage_penalty
            );
        }

        let rounds_to_win = self.rounds_to_win.unwrap_or(10);
        if rounds_to_win == 0 {
            bail!("at least one round win is needed to take a match");
        }

        let competition_candies = self.competition_candies.unwrap_or(4);
        check_candy_count(competition_candies, "competition")?;

        let tutorial = self.tutorial.unwrap_or(DEFAULT_TUTORIAL);
        for (i, stage) in tutorial.iter().enumerate() {
            check_candy_count(stage.candies, "tutorial")?;
            if let Some(budget) = stage.time_budget {
                if !budget.is_finite() || budget <= 0.0 {
                    bail!("tutorial step {} time budget must be positive", i + 2);
                }
            }
        }
        if tutorial
            .windows(2)
            .any(|w| w[1].points_to_advance < w[0].points_to_advance)
        {
            warn!("tutorial point thresholds decrease, some steps will be skipped");
        }

        let (round_time_initial, round_time_floor) = self.round_time.unwrap_or((10.0, 3.0));
        if !round_time_floor.is_finite() || round_time_floor <= 0.0 {
            bail!("round time floor must be positive, got {round_time_floor}");
        }
        if !round_time_initial.is_finite() || round_time_initial < round_time_floor {
            bail!(
                "initial round time ({round_time_initial}) must be at least the floor \
                 ({round_time_floor})"
            );
        }

        let presentation_delay = self.presentation_delay.unwrap_or(1.0);
        let round_end_pause = self.round_end_pause.unwrap_or(1.5);
        let hello_duration = self.hello_duration.unwrap_or(6.0);
        let show_board_delay = self.show_board_delay.unwrap_or(2.0);
        let competition_start_delay = self.competition_start_delay.unwrap_or(Some(2.0));
        for (name, delay) in [
            ("presentation delay", Some(presentation_delay)),
            ("round end pause", Some(round_end_pause)),
            ("hello duration", Some(hello_duration)),
            ("show board delay", Some(show_board_delay)),
            ("competition start delay", competition_start_delay),
        ] {
            if let Some(delay) = delay {
                if !delay.is_finite() || delay < 0.0 {
                    bail!("{name} must be non-negative, got {delay}");
                }
            }
        }

        let max_placement_attempts = self.max_placement_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS);
        if max_placement_attempts == 0 {
            bail!("at least one placement attempt is needed");
        }
        let (relax_factor, max_relaxations) = self.relaxation.unwrap_or((0.75, 3));
        if !(relax_factor > 0.0 && relax_factor < 1.0) {
            bail!("relax factor must be in (0, 1), got {relax_factor}");
        }

        let max_tick = self.max_tick.unwrap_or(0.25);
        if !max_tick.is_finite() || max_tick <= 0.0 {
            bail!("max tick must be positive, got {max_tick}");
        }

        let most_candies = tutorial
            .iter()
            .map(|s| s.candies)
            .chain([competition_candies])
            .max()
            .unwrap_or(competition_candies);
        check_fits(&arena, most_candies)?;

        Ok(MatchSettings {
            arena,
            episode,
            rounds_to_win,
            competition_candies,
            round_time_initial,
            round_time_floor,
            presentation_delay,
            round_end_pause,
            hello_duration,
            show_board_delay,
            competition_start_delay,
            tutorial,
            max_placement_attempts,
            relax_factor,
            max_relaxations,
            max_tick,
        })
    }
}

fn check_candy_count(candies: usize, what: &str) -> anyhow::Result<()> {
    if candies == 0 || candies > MAX_CANDIES {
        bail!("{what} candy count must be in 1..={MAX_CANDIES}, got {candies}");
    }
    Ok(())
}

/// Rejects layouts that cannot exist: disks of diameter `min_separation` around every
/// entity must fit in the spawn square grown by one radius.
fn check_fits(arena: &ArenaSettings, candies: usize) -> anyhow::Result<()> {
    let h = arena.half_extent();
    let s = arena.min_separation;
    if !arena.agent_random && s > h * std::f32::consts::SQRT_2 {
        bail!("no candy can be {s} away from the center of a board of half extent {h}");
    }
    let needed = (candies + 1) as f32 * PI * (s / 2.0).powi(2);
    let available = HEX_PACKING_DENSITY * (2.0 * h + s).powi(2);
    if needed > available {
        bail!("{candies} candies {s} apart do not fit on a board of half extent {h}");
    }
    Ok(())
}

/// Validated tunables of a duel. Obtained using [`MatchSettingsBuilder`].
#[derive(Debug, Clone, PartialEq)]
pub struct MatchSettings {
    pub(crate) arena: ArenaSettings,
    pub(crate) episode: EpisodeSettings,
    pub(crate) rounds_to_win: u32,
    pub(crate) competition_candies: usize,
    pub(crate) round_time_initial: f32,
    pub(crate) round_time_floor: f32,
    pub(crate) presentation_delay: f32,
    pub(crate) round_end_pause: f32,
    pub(crate) hello_duration: f32,
    pub(crate) show_board_delay: f32,
    pub(crate) competition_start_delay: Option<f32>,
    pub(crate) tutorial: [TutorialStage; 5],
    pub(crate) max_placement_attempts: usize,
    pub(crate) relax_factor: f32,
    pub(crate) max_relaxations: usize,
    pub(crate) max_tick: f32,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            arena: ArenaSettings::default(),
            episode: EpisodeSettings::default(),
            rounds_to_win: 10,
            competition_candies: 4,
            round_time_initial: 10.0,
            round_time_floor: 3.0,
            presentation_delay: 1.0,
            round_end_pause: 1.5,
            hello_duration: 6.0,
            show_board_delay: 2.0,
            competition_start_delay: Some(2.0),
            tutorial: DEFAULT_TUTORIAL,
            max_placement_attempts: DEFAULT_MAX_ATTEMPTS,
            relax_factor: 0.75,
            max_relaxations: 3,
            max_tick: 0.25,
        }
    }
}

impl MatchSettings {
    /// Create a MatchSettingsBuilder
    pub fn builder() -> MatchSettingsBuilder {
        MatchSettingsBuilder::new()
    }

    /// Time budget of round `round_index` (0-based): `max(initial - round_index, floor)`.
    pub fn round_time_budget(&self, round_index: u32) -> f32 {
        (self.round_time_initial - round_index as f32).max(self.round_time_floor)
    }

    /// Arena geometry.
    pub fn arena(&self) -> &ArenaSettings {
        &self.arena
    }

    /// Movement and learning penalties.
    pub fn episode(&self) -> &EpisodeSettings {
        &self.episode
    }

    /// Round wins that take the match.
    pub fn rounds_to_win(&self) -> u32 {
        self.rounds_to_win
    }

    /// Candies in each competition round.
    pub fn competition_candies(&self) -> usize {
        self.competition_candies
    }

    /// Tutorial steps 2 to 6.
    pub fn tutorial(&self) -> &[TutorialStage; 5] {
        &self.tutorial
    }

    /// Delay between layout and movement.
    pub fn presentation_delay(&self) -> f32 {
        self.presentation_delay
    }

    /// Pause after a round ends.
    pub fn round_end_pause(&self) -> f32 {
        self.round_end_pause
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_build() {
        let settings = MatchSettingsBuilder::new().build().unwrap();
        assert_eq!(settings, MatchSettings::default());
        assert_eq!(settings.arena().half_extent(), 4.0);
        assert_eq!(settings.arena().boundary(), 5.0);
    }

    #[test]
    fn round_budget_ramps_down_to_floor() {
        let settings = MatchSettings::default();
        let budgets: Vec<f32> = (0..10).map(|r| settings.round_time_budget(r)).collect();
        assert_eq!(
            budgets,
            vec![10.0, 9.0, 8.0, 7.0, 6.0, 5.0, 4.0, 3.0, 3.0, 3.0]
        );
    }

    #[test]
    fn rejects_bad_values() {
        let cases = [
            MatchSettingsBuilder::new().with_move_speed(-1.0),
            MatchSettingsBuilder::new().with_competition_candies(0),
            MatchSettingsBuilder::new().with_competition_candies(9),
            MatchSettingsBuilder::new().with_rounds_to_win(0),
            MatchSettingsBuilder::new().with_round_time(2.0, 5.0),
            MatchSettingsBuilder::new().with_stage_scale(3.0),
            MatchSettingsBuilder::new().with_penalties(0.5, -2.0, -2.0),
            MatchSettingsBuilder::new().with_penalties(0.0, 1.0, -2.0),
            MatchSettingsBuilder::new().with_presentation_delay(-0.5),
            MatchSettingsBuilder::new().with_relaxation(1.5, 2),
            MatchSettingsBuilder::new().with_max_placement_attempts(0),
        ];
        for builder in cases {
            assert!(builder.clone().build().is_err(), "{builder:?}");
        }
    }

    #[test]
    fn rejects_boards_too_large_to_sample() {
        let err = MatchSettingsBuilder::new()
            .with_stage_size(2.0e38)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("too large"), "{err}");

        assert!(MatchSettingsBuilder::new()
            .with_stage_size(1.0e38)
            .with_stage_scale(2.0)
            .build()
            .is_err());
    }

    #[test]
    fn candies_never_spawn_inside_the_pickup_radius() {
        let err = MatchSettingsBuilder::new()
            .with_min_separation(0.5)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("pickup radius"), "{err}");

        assert!(MatchSettingsBuilder::new()
            .with_min_separation(0.75)
            .build()
            .is_ok());
    }

    #[test]
    fn rejects_boards_too_small_for_the_candies() {
        let err = MatchSettingsBuilder::new()
            .with_stage_size(1.0)
            .with_min_separation(3.0)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("center"), "{err}");

        let err = MatchSettingsBuilder::new()
            .with_stage_size(1.0)
            .with_min_separation(1.9)
            .with_agent_random(true)
            .with_competition_candies(5)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("do not fit"), "{err}");
    }

    #[test]
    fn tutorial_stages_are_validated() {
        let mut stages = DEFAULT_TUTORIAL;
        stages[2].candies = 0;
        assert!(MatchSettingsBuilder::new()
            .with_tutorial(stages)
            .build()
            .is_err());

        let mut stages = DEFAULT_TUTORIAL;
        stages[4].time_budget = Some(0.0);
        assert!(MatchSettingsBuilder::new()
            .with_tutorial(stages)
            .build()
            .is_err());
    }
}
