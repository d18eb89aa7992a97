//! Typed errors raised by the arena engine.
//!
//! Nothing in here is fatal: a placement failure skips a round, a configuration error is
//! rejected before any tick runs and an invalid transition leaves the state untouched.

use thiserror::Error;

use crate::orchestrator::GameState;

/// Errors returned by the engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArenaError {
    /// A setting or round setup parameter is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Rejection sampling gave up before every candy found a valid spot.
    #[error(
        "could not place candy {placed} of {requested} after {attempts} attempts \
         (min separation {min_separation})"
    )]
    PlacementExhausted {
        /// Candies successfully placed before giving up.
        placed: usize,
        /// Candies requested.
        requested: usize,
        /// Attempts spent on the candy that could not be placed.
        attempts: usize,
        /// Separation that was enforced.
        min_separation: f32,
    },

    /// The requested operation does not apply to the current game state.
    #[error("cannot {action} while in state {state}")]
    InvalidTransition {
        /// What was attempted.
        action: &'static str,
        /// State at the time of the call.
        state: GameState,
    },
}
