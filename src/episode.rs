//! Episode controller: one board, one agent, one round at a time.
//!
//! A controller cycles through
//! `Idle -> Placing -> Active -> {Succeeded | Failed | TimedOut} -> Idle`.
//! It never talks to the other board or to the orchestrator directly: every call returns
//! the [`EpisodeEvent`]s it produced and the caller decides what they mean for the round.
//!
//! Collisions are resolved by the controller itself after each movement step (candies
//! first, in index order, then the boundary), or reported by a host that runs its own
//! physics through [`EpisodeController::report_collision`]. Both paths share the same rules:
//! nothing is processed outside `Active`, and a candy awards its value at most once.

use std::fmt;

use tracing::{debug, info, trace};

use crate::error::ArenaError;
use crate::game_interface::Side;
use crate::geometry::Vec2;
use crate::placement::Layout;
use crate::reward::{reward_value_for, RewardItem};
use crate::settings::{ArenaSettings, EpisodeSettings};

/// Candy slots in [`BoardView::observation`].
pub const OBSERVATION_SLOTS: usize = 4;

/// Reward value reported for an already collected candy slot in an observation.
const COLLECTED_SLOT_VALUE: f32 = -0.001;

/// Lifecycle phase of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EpisodePhase {
    /// No episode running.
    #[default]
    Idle,
    /// Laid out, waiting for the presentation delay. Movement is disabled.
    Placing,
    /// Live play.
    Active,
    /// Every candy was collected.
    Succeeded,
    /// The agent left the board.
    Failed,
    /// Time ran out.
    TimedOut,
}

impl EpisodePhase {
    /// True for the three end phases.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed | Self::TimedOut)
    }

    /// True while an episode is set up or running.
    pub const fn is_live(self) -> bool {
        matches!(self, Self::Placing | Self::Active)
    }
}

impl fmt::Display for EpisodePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Why an episode ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EpisodeOutcome {
    /// All candies collected.
    Succeeded,
    /// Boundary hit.
    HitWall,
    /// Timeout forced by the caller's clock.
    TimedOut,
}

/// Something that touched the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collider {
    /// A boundary marker.
    Wall,
    /// The candy with this index.
    Candy(usize),
}

/// What a controller call produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EpisodeEvent {
    /// First non-zero move of the episode.
    FirstMove,
    /// A candy was collected.
    Collected {
        /// Candy index in placement order.
        candy: usize,
        /// Points awarded.
        value: u32,
        /// True when this collection emptied the board.
        all_collected: bool,
    },
    /// The agent crossed the boundary. Always followed by `Ended(HitWall)`.
    WallHit,
    /// The episode reached an end phase.
    Ended(EpisodeOutcome),
}

/// The agent of a board.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Agent {
    /// Current position.
    pub position: Vec2,
    /// Movement gate.
    pub ready_to_move: bool,
    /// False once the agent hit a wall or timed out this round.
    pub alive: bool,
}

/// Read-only view of a board, handed to move sources.
#[derive(Debug, Clone, Copy)]
pub struct BoardView<'a> {
    /// Agent position.
    pub agent: Vec2,
    /// Candies in placement order, collected ones included.
    pub candies: &'a [RewardItem],
}

impl BoardView<'_> {
    /// Candies still on the board, with their index.
    pub fn remaining(&self) -> impl Iterator<Item = (usize, &RewardItem)> + '_ {
        self.candies
            .iter()
            .enumerate()
            .filter(|(_, candy)| !candy.is_collected())
    }

    /// Flat observation vector for a learning policy.
    ///
    /// Layout: agent `(x, 0, z)`, then [`OBSERVATION_SLOTS`] groups of `(x, 0, z, value)`.
    /// A collected candy reads `(0, 0, 0, -0.001)`; unused slots read all zeros.
    pub fn observation(&self) -> Vec<f32> {
        let mut obs = Vec::with_capacity(3 + OBSERVATION_SLOTS * 4);
        obs.extend([self.agent.x, 0.0, self.agent.z]);
        for slot in 0..OBSERVATION_SLOTS {
            match self.candies.get(slot) {
                Some(candy) if candy.is_collected() => {
                    obs.extend([0.0, 0.0, 0.0, COLLECTED_SLOT_VALUE]);
                }
                Some(candy) => {
                    let p = candy.position();
                    obs.extend([p.x, 0.0, p.z, candy.value() as f32]);
                }
                None => obs.extend([0.0; 4]),
            }
        }
        obs
    }
}

/// Runs one side's board through one episode at a time.
#[derive(Debug, Clone)]
pub struct EpisodeController {
    side: Side,
    arena: ArenaSettings,
    settings: EpisodeSettings,
    phase: EpisodePhase,
    agent: Agent,
    candies: Vec<RewardItem>,
    collected: usize,
    elapsed: f32,
    learning_signal: f32,
    has_moved: bool,
    episodes_started: u32,
}

impl EpisodeController {
    /// An idle board for `side`.
    pub fn new(side: Side, arena: ArenaSettings, settings: EpisodeSettings) -> Self {
        Self {
            side,
            arena,
            settings,
            phase: EpisodePhase::Idle,
            agent: Agent::default(),
            candies: vec![],
            collected: 0,
            elapsed: 0.0,
            learning_signal: 0.0,
            has_moved: false,
            episodes_started: 0,
        }
    }

    /// Lays out a new episode and enters `Placing`.
    ///
    /// Any episode still running is abandoned. Movement stays disabled until
    /// [`activate`](Self::activate).
    ///
    /// # Errors
    /// [`ArenaError::InvalidConfig`] when the layout holds no candy or a non-finite position.
    pub fn start_episode(&mut self, layout: &Layout) -> Result<(), ArenaError> {
        if layout.candies.is_empty() {
            return Err(ArenaError::InvalidConfig(
                "an episode needs at least one candy".to_owned(),
            ));
        }
        let all_finite = std::iter::once(layout.agent)
            .chain(layout.candies.iter().copied())
            .all(|p| p.x.is_finite() && p.z.is_finite());
        if !all_finite {
            return Err(ArenaError::InvalidConfig(
                "layout contains a non-finite position".to_owned(),
            ));
        }

        // reuse candies when the count did not change
        self.candies.truncate(layout.candies.len());
        for (index, position) in layout.candies.iter().enumerate() {
            let value = reward_value_for(index);
            match self.candies.get_mut(index) {
                Some(candy) => candy.reset(value, *position),
                None => self.candies.push(RewardItem::new(*position, value)),
            }
        }

        self.agent = Agent {
            position: layout.agent,
            ready_to_move: false,
            alive: true,
        };
        self.collected = 0;
        self.elapsed = 0.0;
        self.learning_signal = 0.0;
        self.has_moved = false;
        self.episodes_started += 1;
        self.phase = EpisodePhase::Placing;

        debug!(
            side = ?self.side,
            candies = self.candies.len(),
            total = self.total_reward(),
            "episode laid out"
        );
        Ok(())
    }

    /// Ends the presentation delay: `Placing -> Active`, movement enabled.
    ///
    /// Returns false (and does nothing) from any other phase.
    pub fn activate(&mut self) -> bool {
        if self.phase != EpisodePhase::Placing {
            debug!(side = ?self.side, phase = ?self.phase, "activate ignored");
            return false;
        }
        self.phase = EpisodePhase::Active;
        self.agent.ready_to_move = true;
        trace!(side = ?self.side, "episode active");
        true
    }

    /// Movement gate. Can only be opened while `Active`.
    pub fn set_ready_to_move(&mut self, ready: bool) {
        if ready && self.phase != EpisodePhase::Active {
            debug!(side = ?self.side, phase = ?self.phase, "cannot enable movement");
            return;
        }
        self.agent.ready_to_move = ready;
    }

    /// Advances the board by `dt` seconds with the given action.
    ///
    /// Order: movement integration, idle penalty, then collision resolution.
    pub fn tick(&mut self, dt: f32, action: Vec2) -> Vec<EpisodeEvent> {
        let mut events = vec![];
        if self.phase != EpisodePhase::Active || !self.agent.ready_to_move {
            return events;
        }
        if !dt.is_finite() || dt <= 0.0 {
            return events;
        }

        self.elapsed += dt;

        let action = action.clamp_axes();
        if action.is_nonzero() && !self.has_moved {
            self.has_moved = true;
            events.push(EpisodeEvent::FirstMove);
        }
        self.agent.position += action * (self.settings.move_speed * dt);
        self.learning_signal += self.settings.idle_time_penalty;

        for index in 0..self.candies.len() {
            if self.phase != EpisodePhase::Active {
                break;
            }
            let candy = &self.candies[index];
            if !candy.is_collected()
                && candy.position().distance(self.agent.position) <= self.arena.pickup_radius
            {
                self.collect(index, &mut events);
            }
        }

        if self.phase == EpisodePhase::Active && self.is_off_stage() {
            self.hit_wall(&mut events);
        }

        events
    }

    /// Resolves a collision reported by the host.
    ///
    /// Ignored unless the board is `Active`.
    pub fn report_collision(&mut self, collider: Collider) -> Vec<EpisodeEvent> {
        let mut events = vec![];
        if self.phase != EpisodePhase::Active {
            debug!(side = ?self.side, ?collider, phase = ?self.phase, "stale collision ignored");
            return events;
        }
        match collider {
            Collider::Wall => self.hit_wall(&mut events),
            Collider::Candy(index) if index < self.candies.len() => {
                self.collect(index, &mut events)
            }
            Collider::Candy(index) => {
                debug!(side = ?self.side, index, "collision with unknown candy ignored");
            }
        }
        events
    }

    /// Forces `TimedOut` from `Placing` or `Active`.
    ///
    /// Returns `None` when no episode is live.
    pub fn timeout(&mut self) -> Option<EpisodeEvent> {
        if !self.phase.is_live() {
            debug!(side = ?self.side, phase = ?self.phase, "stale timeout ignored");
            return None;
        }
        info!(side = ?self.side, "episode timed out");
        self.phase = EpisodePhase::TimedOut;
        self.agent.ready_to_move = false;
        self.agent.alive = false;
        self.learning_signal = self.settings.timeout_penalty;
        Some(EpisodeEvent::Ended(EpisodeOutcome::TimedOut))
    }

    /// Closes the episode and returns to `Idle`.
    ///
    /// Returns how the episode ended, or `None` if it was still live or already idle.
    pub fn conclude(&mut self) -> Option<EpisodeOutcome> {
        let outcome = match self.phase {
            EpisodePhase::Succeeded => Some(EpisodeOutcome::Succeeded),
            EpisodePhase::Failed => Some(EpisodeOutcome::HitWall),
            EpisodePhase::TimedOut => Some(EpisodeOutcome::TimedOut),
            _ => None,
        };
        self.phase = EpisodePhase::Idle;
        self.agent.ready_to_move = false;
        outcome
    }

    fn collect(&mut self, index: usize, events: &mut Vec<EpisodeEvent>) {
        let Some(value) = self.candies[index].mark_collected() else {
            debug!(side = ?self.side, index, "candy already collected");
            return;
        };
        self.collected += 1;
        self.learning_signal = value as f32;
        let all_collected = self.collected == self.candies.len();
        debug!(side = ?self.side, index, value, all_collected, "candy collected");
        events.push(EpisodeEvent::Collected {
            candy: index,
            value,
            all_collected,
        });
        if all_collected {
            info!(side = ?self.side, points = self.total_points(), "all candies collected");
            self.phase = EpisodePhase::Succeeded;
            self.agent.ready_to_move = false;
            events.push(EpisodeEvent::Ended(EpisodeOutcome::Succeeded));
        }
    }

    fn hit_wall(&mut self, events: &mut Vec<EpisodeEvent>) {
        info!(side = ?self.side, position = %self.agent.position, "agent hit the wall");
        self.phase = EpisodePhase::Failed;
        self.agent.ready_to_move = false;
        self.agent.alive = false;
        self.learning_signal = self.settings.off_stage_penalty;
        events.push(EpisodeEvent::WallHit);
        events.push(EpisodeEvent::Ended(EpisodeOutcome::HitWall));
    }

    fn is_off_stage(&self) -> bool {
        let boundary = self.arena.boundary();
        self.agent.position.x.abs() > boundary || self.agent.position.z.abs() > boundary
    }

    /// Which board this is.
    pub fn side(&self) -> Side {
        self.side
    }

    /// Current phase.
    pub fn phase(&self) -> EpisodePhase {
        self.phase
    }

    /// True while live play is running.
    pub fn is_active(&self) -> bool {
        self.phase == EpisodePhase::Active
    }

    /// The agent.
    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    /// Candies of the current (or last) episode.
    pub fn candies(&self) -> &[RewardItem] {
        &self.candies
    }

    /// Candies collected this episode.
    pub fn collected_count(&self) -> usize {
        self.collected
    }

    /// Sum of the values collected this episode.
    pub fn total_points(&self) -> u32 {
        self.candies
            .iter()
            .filter(|c| c.is_collected())
            .map(RewardItem::value)
            .sum()
    }

    /// Sum of every candy value on the board.
    pub fn total_reward(&self) -> u32 {
        self.candies.iter().map(RewardItem::value).sum()
    }

    /// Seconds of live play this episode.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Number of `start_episode` calls so far.
    pub fn episodes_started(&self) -> u32 {
        self.episodes_started
    }

    /// Returns and clears the pending learning signal (candy value, penalties, idle cost).
    pub fn take_learning_signal(&mut self) -> f32 {
        std::mem::take(&mut self.learning_signal)
    }

    /// Read-only snapshot for move sources.
    pub fn view(&self) -> BoardView<'_> {
        BoardView {
            agent: self.agent.position,
            candies: &self.candies,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> EpisodeController {
        EpisodeController::new(
            Side::Human,
            ArenaSettings::default(),
            EpisodeSettings::default(),
        )
    }

    fn square_layout() -> Layout {
        Layout {
            agent: Vec2::ZERO,
            candies: vec![
                Vec2::new(2.0, 0.0),
                Vec2::new(0.0, 2.0),
                Vec2::new(-2.0, 0.0),
                Vec2::new(0.0, -2.0),
            ],
            separation: 1.5,
        }
    }

    fn active_controller() -> EpisodeController {
        let mut c = controller();
        c.start_episode(&square_layout()).unwrap();
        assert!(c.activate());
        c
    }

    #[test]
    fn start_assigns_increasing_values() {
        let mut c = controller();
        c.start_episode(&square_layout()).unwrap();
        assert_eq!(c.phase(), EpisodePhase::Placing);
        let values: Vec<u32> = c.candies().iter().map(RewardItem::value).collect();
        assert_eq!(values, vec![2, 4, 6, 8]);
        assert!(!c.agent().ready_to_move);
    }

    #[test]
    fn collecting_everything_succeeds_on_last_candy_only() {
        let mut c = active_controller();
        let mut flags = vec![];
        let mut total = 0;
        for index in 0..4 {
            for event in c.report_collision(Collider::Candy(index)) {
                if let EpisodeEvent::Collected {
                    value,
                    all_collected,
                    ..
                } = event
                {
                    total += value;
                    flags.push(all_collected);
                }
            }
        }
        assert_eq!(total, 20);
        assert_eq!(flags, vec![false, false, false, true]);
        assert_eq!(c.phase(), EpisodePhase::Succeeded);
        assert_eq!(c.total_points(), 20);
    }

    #[test]
    fn wall_hit_while_placing_is_ignored() {
        let mut c = controller();
        c.start_episode(&square_layout()).unwrap();
        assert!(c.report_collision(Collider::Wall).is_empty());
        assert_eq!(c.phase(), EpisodePhase::Placing);
    }

    #[test]
    fn wall_hit_fails_and_freezes() {
        let mut c = active_controller();
        let events = c.report_collision(Collider::Wall);
        assert_eq!(
            events,
            vec![
                EpisodeEvent::WallHit,
                EpisodeEvent::Ended(EpisodeOutcome::HitWall)
            ]
        );
        assert_eq!(c.phase(), EpisodePhase::Failed);
        assert!(!c.agent().ready_to_move);
        assert_eq!(c.take_learning_signal(), -2.0);

        // late events after the end are dropped
        assert!(c.report_collision(Collider::Candy(0)).is_empty());
        assert!(c.tick(0.1, Vec2::new(1.0, 0.0)).is_empty());
        assert_eq!(c.total_points(), 0);
    }

    #[test]
    fn same_candy_twice_awards_once() {
        let mut c = active_controller();
        assert_eq!(c.report_collision(Collider::Candy(1)).len(), 1);
        assert!(c.report_collision(Collider::Candy(1)).is_empty());
        assert_eq!(c.collected_count(), 1);
        assert_eq!(c.total_points(), 4);
    }

    #[test]
    fn movement_picks_up_candies_by_proximity() {
        let mut c = active_controller();
        // speed 4: 0.25 s moves one unit. Candy 0 sits at x = 2, pickup radius 0.75.
        let mut events = c.tick(0.25, Vec2::new(1.0, 0.0));
        assert_eq!(events.remove(0), EpisodeEvent::FirstMove);
        assert!(events.is_empty());
        let events = c.tick(0.1, Vec2::new(1.0, 0.0));
        assert_eq!(
            events,
            vec![EpisodeEvent::Collected {
                candy: 0,
                value: 2,
                all_collected: false
            }]
        );
        assert!((c.agent().position.x - 1.4).abs() < 1e-5);
    }

    #[test]
    fn running_off_the_board_hits_the_wall() {
        let mut c = active_controller();
        let mut ended = false;
        for _ in 0..100 {
            let events = c.tick(0.05, Vec2::new(0.7, 0.7));
            if events.contains(&EpisodeEvent::Ended(EpisodeOutcome::HitWall)) {
                ended = true;
                break;
            }
        }
        assert!(ended);
        assert!(c.agent().position.x.abs() > c.arena.boundary() - 1e-3);
    }

    #[test]
    fn no_movement_before_activation() {
        let mut c = controller();
        c.start_episode(&square_layout()).unwrap();
        assert!(c.tick(1.0, Vec2::new(1.0, 0.0)).is_empty());
        assert_eq!(c.agent().position, Vec2::ZERO);
        c.set_ready_to_move(true);
        assert!(!c.agent().ready_to_move);
    }

    #[test]
    fn timeout_from_placing_or_active_only() {
        let mut c = controller();
        assert_eq!(c.timeout(), None);
        c.start_episode(&square_layout()).unwrap();
        assert_eq!(
            c.timeout(),
            Some(EpisodeEvent::Ended(EpisodeOutcome::TimedOut))
        );
        assert_eq!(c.phase(), EpisodePhase::TimedOut);
        assert_eq!(c.timeout(), None);
        assert_eq!(c.conclude(), Some(EpisodeOutcome::TimedOut));
        assert_eq!(c.phase(), EpisodePhase::Idle);
    }

    #[test]
    fn idle_penalty_accumulates_per_tick() {
        let settings = EpisodeSettings {
            idle_time_penalty: 0.01,
            ..EpisodeSettings::default()
        };
        let mut c = EpisodeController::new(Side::Computer, ArenaSettings::default(), settings);
        c.start_episode(&square_layout()).unwrap();
        c.activate();
        for _ in 0..3 {
            c.tick(0.02, Vec2::ZERO);
        }
        assert!((c.take_learning_signal() - 0.03).abs() < 1e-6);
        assert_eq!(c.take_learning_signal(), 0.0);
    }

    #[test]
    fn restart_resets_collection_state() {
        let mut c = active_controller();
        c.report_collision(Collider::Candy(0));
        c.conclude();
        c.start_episode(&square_layout()).unwrap();
        assert_eq!(c.collected_count(), 0);
        assert!(c.candies().iter().all(|candy| !candy.is_collected()));
        assert_eq!(c.episodes_started(), 2);
    }

    #[test]
    fn empty_layout_is_rejected() {
        let mut c = controller();
        let layout = Layout {
            agent: Vec2::ZERO,
            candies: vec![],
            separation: 1.5,
        };
        assert!(matches!(
            c.start_episode(&layout),
            Err(ArenaError::InvalidConfig(_))
        ));
        assert_eq!(c.phase(), EpisodePhase::Idle);
    }

    #[test]
    fn observation_masks_collected_and_pads_slots() {
        let mut c = controller();
        let layout = Layout {
            agent: Vec2::new(0.5, -0.5),
            candies: vec![Vec2::new(2.0, 1.0), Vec2::new(-2.0, 3.0)],
            separation: 1.5,
        };
        c.start_episode(&layout).unwrap();
        c.activate();
        c.report_collision(Collider::Candy(0));
        let obs = c.view().observation();
        assert_eq!(obs.len(), 3 + OBSERVATION_SLOTS * 4);
        assert_eq!(&obs[..3], &[0.5, 0.0, -0.5]);
        assert_eq!(&obs[3..7], &[0.0, 0.0, 0.0, -0.001]);
        assert_eq!(&obs[7..11], &[-2.0, 0.0, 3.0, 4.0]);
        assert!(obs[11..].iter().all(|v| *v == 0.0));
    }
}
