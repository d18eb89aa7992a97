//! # Candy Arena
//!
//! A headless engine for a candy-collection duel between a human-driven board and a
//! computer-driven board, played to a number of round wins.
//!
//! It provides:
//! - Random, well-spaced candy layouts (`placement`)
//! - Per-board episode lifecycle with movement, pickups and wall failures (`episode`)
//! - A tutorial followed by timed competition rounds (`orchestrator`)
//! - Round arbitration and match tallies (`scoring`)
//! - HUD texts and win-progress indicators (`scoreboard`)
//!
//! Each board owns one agent and its candies. Every round, both boards receive the same
//! layout; the side holding strictly more points when the round ends wins it. The engine is
//! single threaded and stepped by the host with
//! [`Orchestrator::tick`](crate::orchestrator::Orchestrator::tick).
//!
//! # Documentation Overview
//!
//! - For the game flow and the tick order, see the [`orchestrator`] module.
//! - For tuning the arena, the tutorial and the pacing, see [`settings`].
//! - For runtime flags (logging, tutorial skip, seed), see
//!   [`Configuration`](crate::configuration::Configuration).
//! - For plugging input, presentation and analytics in, check out the [`MoveSource`],
//!   [`PresentationHooks`] and [`TelemetrySink`] traits.
//!
//! # Usage Example
//!
//! ```no_run
//! use anyhow;
//! use candy_arena::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let settings = MatchSettingsBuilder::from_env()
//!         .with_rounds_to_win(5)
//!         .build()?;
//!     let config = Configuration::from_env();
//!
//!     let mut orchestrator = Orchestrator::new(
//!         settings,
//!         config,
//!         config.rng(),
//!         ScoreBoard::new(5),
//!         TracingTelemetry::new(),
//!     );
//!     orchestrator.start()?;
//!
//!     // Any FnMut(Side, &BoardView) -> Vec2 is a move source
//!     let mut moves = Sides::new(ChaseNearest::default(), ChaseHighestValue);
//!     while orchestrator.state() != GameState::CompetitionFinished {
//!         for event in orchestrator.tick(1.0 / 60.0, &mut moves) {
//!             if let MatchEvent::RoundEnded(summary) = event {
//!                 println!("{summary}");
//!             }
//!         }
//!     }
//!     println!("{}", orchestrator.score());
//!     orchestrator.shutdown();
//!     Ok(())
//! }
//! ```
//!
//! [`MoveSource`]: crate::game_interface::MoveSource
//! [`PresentationHooks`]: crate::game_interface::PresentationHooks
//! [`TelemetrySink`]: crate::game_interface::TelemetrySink
#![warn(missing_docs)]

pub mod configuration;
pub mod episode;
pub mod error;
pub mod game_interface;
pub mod geometry;
pub use anyhow;
mod logger;
pub mod orchestrator;
pub mod placement;
pub mod policy;
pub mod reward;
pub mod scoreboard;
pub mod scoring;
pub mod settings;
pub mod telemetry;
pub mod timer;

/// Commonly used types and traits for quick access.
///
/// Import this prelude to get started easily:
/// ```rust
/// use candy_arena::prelude::*;
/// ```
///
/// Includes:
/// - [`Configuration`](crate::configuration::Configuration)
/// - [`MatchSettingsBuilder`](crate::settings::MatchSettingsBuilder)
/// - [`Orchestrator`](crate::orchestrator::Orchestrator) and its states and events
/// - the collaborator traits and the built-in [`policies`](crate::policy)
pub mod prelude {
    pub use crate::configuration::Configuration;
    pub use crate::episode::{BoardView, Collider};
    pub use crate::error::ArenaError;
    pub use crate::game_interface::{MoveSource, PresentationHooks, Side, TelemetrySink};
    pub use crate::geometry::Vec2;
    pub use crate::orchestrator::{GameState, MatchEvent, Orchestrator, TutorialStep};
    pub use crate::policy::*;
    pub use crate::scoreboard::ScoreBoard;
    pub use crate::scoring::{MatchScore, MatchSummary, RoundSummary};
    pub use crate::settings::{MatchSettings, MatchSettingsBuilder};
    pub use crate::telemetry::{MemoryTelemetry, TracingTelemetry};
}
