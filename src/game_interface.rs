//! Traits the host implements to plug input, presentation and telemetry into the engine.
//!
//! The engine never polls a keyboard, plays a sound or talks to an analytics vendor. It
//! asks a [`MoveSource`] for movement, notifies [`PresentationHooks`] and hands outcome
//! records to a [`TelemetrySink`]. All notifications are fire-and-forget: the engine does
//! not wait for an animation to finish.

use std::fmt;

use crate::episode::BoardView;
use crate::geometry::Vec2;
use crate::orchestrator::GameState;
use crate::placement::Layout;
use crate::scoring::{MatchSummary, RoundSummary};
use crate::telemetry::OutcomeRecord;

/// The two boards of a duel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    /// Board driven by the player.
    Human,
    /// Board driven by a policy.
    Computer,
}

impl Side {
    /// Both sides, human first.
    pub const ALL: [Side; 2] = [Side::Human, Side::Computer];

    /// Position of the side in per-side arrays.
    pub const fn index(self) -> usize {
        match self {
            Side::Human => 0,
            Side::Computer => 1,
        }
    }

    /// The other side.
    pub const fn opponent(self) -> Side {
        match self {
            Side::Human => Side::Computer,
            Side::Computer => Side::Human,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Human => write!(f, "Human"),
            Side::Computer => write!(f, "Computer"),
        }
    }
}

/// Produces the movement of a board each tick.
///
/// Human input and automated policies are treated the same way. Components outside
/// `[-1, 1]` are clamped by the board.
pub trait MoveSource {
    /// Move vector for `side`, given what its board currently looks like.
    fn move_vector(&mut self, side: Side, board: &BoardView<'_>) -> Vec2;
}

impl<F> MoveSource for F
where
    F: FnMut(Side, &BoardView<'_>) -> Vec2,
{
    fn move_vector(&mut self, side: Side, board: &BoardView<'_>) -> Vec2 {
        self(side, board)
    }
}

/// Notifications for animation, audio and UI.
///
/// Every method has an empty default body, so implementors only override what they show.
#[allow(unused_variables)]
pub trait PresentationHooks {
    /// Called once when the match starts.
    fn init(&mut self) {}

    /// Called once when the match is shut down.
    fn teardown(&mut self) {}

    /// The game state machine moved.
    fn on_state_changed(&mut self, from: GameState, to: GameState) {}

    /// A board was laid out and its presentation delay started.
    fn on_episode_start(&mut self, side: Side, layout: &Layout) {}

    /// The agent of `side` moved for the first time this episode.
    fn on_first_move(&mut self, side: Side) {}

    /// The agent of `side` left the board.
    fn on_wall_hit(&mut self, side: Side) {}

    /// A candy was collected. `round_points` already includes `value`.
    fn on_reward_collected(&mut self, side: Side, value: u32, round_points: u32) {}

    /// Remaining time of the running round or timed tutorial episode.
    fn on_countdown(&mut self, remaining: f32) {}

    /// A competition round was decided.
    fn on_round_end(&mut self, summary: &RoundSummary) {}

    /// A side reached the win threshold.
    fn on_match_end(&mut self, summary: &MatchSummary) {}
}

impl PresentationHooks for () {}

impl<A: PresentationHooks, B: PresentationHooks> PresentationHooks for (A, B) {
    fn init(&mut self) {
        self.0.init();
        self.1.init();
    }

    fn teardown(&mut self) {
        self.0.teardown();
        self.1.teardown();
    }

    fn on_state_changed(&mut self, from: GameState, to: GameState) {
        self.0.on_state_changed(from, to);
        self.1.on_state_changed(from, to);
    }

    fn on_episode_start(&mut self, side: Side, layout: &Layout) {
        self.0.on_episode_start(side, layout);
        self.1.on_episode_start(side, layout);
    }

    fn on_first_move(&mut self, side: Side) {
        self.0.on_first_move(side);
        self.1.on_first_move(side);
    }

    fn on_wall_hit(&mut self, side: Side) {
        self.0.on_wall_hit(side);
        self.1.on_wall_hit(side);
    }

    fn on_reward_collected(&mut self, side: Side, value: u32, round_points: u32) {
        self.0.on_reward_collected(side, value, round_points);
        self.1.on_reward_collected(side, value, round_points);
    }

    fn on_countdown(&mut self, remaining: f32) {
        self.0.on_countdown(remaining);
        self.1.on_countdown(remaining);
    }

    fn on_round_end(&mut self, summary: &RoundSummary) {
        self.0.on_round_end(summary);
        self.1.on_round_end(summary);
    }

    fn on_match_end(&mut self, summary: &MatchSummary) {
        self.0.on_match_end(summary);
        self.1.on_match_end(summary);
    }
}

/// Receives structured outcome records at round and match boundaries.
pub trait TelemetrySink {
    /// Called once when the match starts.
    fn init(&mut self) {}

    /// One round or match outcome.
    fn record(&mut self, record: &OutcomeRecord);

    /// Push buffered records out.
    fn flush(&mut self) {}

    /// Called once when the match is shut down. Flushes by default.
    fn teardown(&mut self) {
        self.flush();
    }
}

impl TelemetrySink for () {
    fn record(&mut self, _record: &OutcomeRecord) {}
}

#[cfg(test)]
mod interface_tests {
    use super::*;
    use crate::reward::RewardItem;

    #[derive(Default)]
    struct CountingHooks {
        walls: u32,
        inits: u32,
    }

    impl PresentationHooks for CountingHooks {
        fn init(&mut self) {
            self.inits += 1;
        }

        fn on_wall_hit(&mut self, _side: Side) {
            self.walls += 1;
        }
    }

    #[test]
    fn sides_index_and_oppose() {
        assert_eq!(Side::Human.index(), 0);
        assert_eq!(Side::Computer.index(), 1);
        assert_eq!(Side::Human.opponent(), Side::Computer);
        assert_eq!(Side::ALL.map(Side::opponent), [Side::Computer, Side::Human]);
    }

    #[test]
    fn tuple_hooks_fan_out() {
        let mut hooks = (CountingHooks::default(), CountingHooks::default());
        hooks.init();
        hooks.on_wall_hit(Side::Human);
        hooks.on_countdown(1.0);
        assert_eq!((hooks.0.walls, hooks.1.walls), (1, 1));
        assert_eq!((hooks.0.inits, hooks.1.inits), (1, 1));
    }

    #[test]
    fn closures_are_move_sources() {
        let candies = vec![RewardItem::new(Vec2::new(1.0, 0.0), 2)];
        let view = BoardView {
            agent: Vec2::ZERO,
            candies: &candies,
        };
        let mut calls = 0;
        let mut source = |side: Side, board: &BoardView<'_>| {
            calls += 1;
            match side {
                Side::Human => board.candies[0].position() - board.agent,
                Side::Computer => Vec2::ZERO,
            }
        };
        assert_eq!(
            MoveSource::move_vector(&mut source, Side::Human, &view),
            Vec2::new(1.0, 0.0)
        );
        assert_eq!(
            MoveSource::move_vector(&mut source, Side::Computer, &view),
            Vec2::ZERO
        );
        assert_eq!(calls, 2);
    }
}
