//! Score texts, round label, clock and win-progress indicators.
//!
//! [`ScoreBoard`] is a [`PresentationHooks`] implementation that keeps the strings and
//! counters a HUD shows. A host renders them however it likes; nothing here draws.

use crate::game_interface::{PresentationHooks, Side};
use crate::orchestrator::GameState;
use crate::placement::Layout;
use crate::scoring::{MatchSummary, RoundSummary};

/// Formats a duration as zero-padded `mm:ss`. Negative and non-finite values read `00:00`.
///
/// ```
/// use candy_arena::scoreboard::format_clock;
///
/// assert_eq!(format_clock(75.4), "01:15");
/// assert_eq!(format_clock(-1.0), "00:00");
/// ```
pub fn format_clock(seconds: f32) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u32
    } else {
        0
    };
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Filled slots out of the round wins needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WinProgress {
    slots: u32,
    filled: u32,
}

impl WinProgress {
    /// An empty indicator with `slots` slots.
    pub fn new(slots: u32) -> Self {
        Self { slots, filled: 0 }
    }

    /// Fills the next slot. Does nothing once full.
    pub fn add_progress(&mut self) {
        self.filled = (self.filled + 1).min(self.slots);
    }

    /// Empties every slot.
    pub fn reset(&mut self) {
        self.filled = 0;
    }

    /// Number of slots.
    pub fn slots(&self) -> u32 {
        self.slots
    }

    /// Number of filled slots.
    pub fn filled(&self) -> u32 {
        self.filled
    }

    /// True once every slot is filled.
    pub fn is_full(&self) -> bool {
        self.filled == self.slots
    }
}

/// HUD state fed by orchestrator notifications.
#[derive(Debug, Clone)]
pub struct ScoreBoard {
    points: [String; 2],
    round_label: String,
    clock: String,
    progress: [WinProgress; 2],
    round: u32,
    tutorial_points: u32,
    state: GameState,
}

impl ScoreBoard {
    /// A blank board for a match played to `rounds_to_win` round wins.
    pub fn new(rounds_to_win: u32) -> Self {
        Self {
            points: Side::ALL.map(|side| points_text(side, 0)),
            round_label: String::new(),
            clock: format_clock(0.0),
            progress: [WinProgress::new(rounds_to_win); 2],
            round: 0,
            tutorial_points: 0,
            state: GameState::None,
        }
    }

    /// `"Human: N"` or `"Computer: N"`.
    ///
    /// During the tutorial, the human count runs across every tutorial episode.
    pub fn points_text(&self, side: Side) -> &str {
        &self.points[side.index()]
    }

    /// `"Round N"` during the competition, empty before.
    pub fn round_label(&self) -> &str {
        &self.round_label
    }

    /// Remaining round time as `mm:ss`.
    pub fn clock_text(&self) -> &str {
        &self.clock
    }

    /// Win progress of `side`.
    pub fn progress(&self, side: Side) -> &WinProgress {
        &self.progress[side.index()]
    }

    /// Last state notified.
    pub fn state(&self) -> GameState {
        self.state
    }

    fn set_points(&mut self, side: Side, points: u32) {
        self.points[side.index()] = points_text(side, points);
    }
}

fn points_text(side: Side, points: u32) -> String {
    format!("{side}: {points}")
}

impl PresentationHooks for ScoreBoard {
    fn on_state_changed(&mut self, from: GameState, to: GameState) {
        self.state = to;
        if matches!(to, GameState::Tutorial(_)) && !matches!(from, GameState::Tutorial(_)) {
            self.tutorial_points = 0;
        }
        if to == GameState::CompetitionActive {
            self.round = 0;
            self.progress.iter_mut().for_each(WinProgress::reset);
        }
    }

    fn on_episode_start(&mut self, side: Side, _layout: &Layout) {
        if matches!(self.state, GameState::Tutorial(_)) {
            self.set_points(side, self.tutorial_points);
        } else {
            self.set_points(side, 0);
        }
        if self.state == GameState::CompetitionActive && side == Side::Human {
            self.round += 1;
            self.round_label = format!("Round {}", self.round);
        }
    }

    fn on_reward_collected(&mut self, side: Side, value: u32, round_points: u32) {
        if matches!(self.state, GameState::Tutorial(_)) {
            self.tutorial_points += value;
            self.set_points(side, self.tutorial_points);
        } else {
            self.set_points(side, round_points);
        }
    }

    fn on_countdown(&mut self, remaining: f32) {
        self.clock = format_clock(remaining);
    }

    fn on_round_end(&mut self, summary: &RoundSummary) {
        if let Some(winner) = summary.winner {
            self.progress[winner.index()].add_progress();
        }
        for side in Side::ALL {
            self.set_points(side, 0);
        }
        self.round = summary.round;
        self.round_label = format!("Round {}", summary.round);
    }

    fn on_match_end(&mut self, summary: &MatchSummary) {
        self.round_label = format!("{} wins", summary.winner);
    }
}
