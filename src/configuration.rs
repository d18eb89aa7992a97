//! Runtime flags of a duel
//!
//! This module provides configuration options that do not change the rules of the game:
//! console output, file logging, tutorial skipping and the random seed.
//!
//! Configuration can be created programmatically using [`Configuration::new()`] or by reading
//! environment variables using [`Configuration::from_env()`].
//!
//! # Environment Variables
//!
//! The following environment variables can be used to override configuration values. All
//! values are optional, and case-insensitive. Set the value to `"true"` to enable a flag.
//!
//! - `ARENA_VERBOSE`: print round results to stdout (default: `true`)
//! - `ARENA_LOG`: enable logging to a file (default: `false`)
//! - `ARENA_SKIP_TUTORIAL`: go straight to the competition (default: `false`)
//! - `ARENA_SEED`: seed of the placement random generator (default: unset, OS entropy)

use rand::{rngs::StdRng, SeedableRng};

/// Configuration for runtime behaviors.
#[derive(Debug, Clone, Copy)]
pub struct Configuration {
    pub(crate) verbose: bool,
    pub(crate) log: bool,
    pub(crate) skip_tutorial: bool,
    pub(crate) seed: Option<u64>,
}

impl Configuration {
    /// Create a new configuration with default parameters.
    ///
    /// By default:
    /// - Round results are printed to stdout.
    /// - Logging to file is disabled.
    /// - The tutorial is played.
    /// - Placement is seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            verbose: true,
            log: false,
            skip_tutorial: false,
            seed: None,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// The following environment variables are recognized:
    /// - `ARENA_VERBOSE`: if set to `"true"`, enables verbose output (default: `true`)
    /// - `ARENA_LOG`: if set to `"true"`, enables logging to file (default: `false`)
    /// - `ARENA_SKIP_TUTORIAL`: if set to `"true"`, skips the tutorial (default: `false`)
    /// - `ARENA_SEED`: an unsigned integer seed (default: unset)
    ///
    /// Any other value (including unset) will result in using the default value for each field.
    pub fn from_env() -> Self {
        fn get_env_flag(var: &str, default: bool) -> bool {
            match std::env::var(var) {
                Ok(val) => val.eq_ignore_ascii_case("true"),
                Err(_) => default,
            }
        }

        Self {
            verbose: get_env_flag("ARENA_VERBOSE", true),
            log: get_env_flag("ARENA_LOG", false),
            skip_tutorial: get_env_flag("ARENA_SKIP_TUTORIAL", false),
            seed: std::env::var("ARENA_SEED")
                .ok()
                .and_then(|val| val.trim().parse().ok()),
        }
    }

    /// Enable or disable console output.
    pub fn with_verbose(mut self, value: bool) -> Self {
        self.verbose = value;
        self
    }

    /// Enable or disable logging to file.
    pub fn with_log(mut self, value: bool) -> Self {
        self.log = value;
        self
    }

    /// Enable or disable the tutorial.
    ///
    /// When enabled, [`Orchestrator::start`](crate::orchestrator::Orchestrator::start) goes
    /// straight to the pending competition.
    pub fn with_skip_tutorial(mut self, value: bool) -> Self {
        self.skip_tutorial = value;
        self
    }

    /// Fix the placement seed, or clear it with `None`.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// True when round results should be printed.
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// True when logs go to a file.
    pub fn log(&self) -> bool {
        self.log
    }

    /// Configured seed, if any.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// A random generator seeded from [`seed`](Self::seed), or from OS entropy when unset.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new()
    }
}
