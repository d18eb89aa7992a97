//! Candy placement sampler.
//!
//! Positions for the agent and the candies are drawn uniformly in the square
//! `[-half_extent, half_extent]^2` with rejection sampling: a candy spot is redrawn until it
//! keeps `min_separation` from the agent and from every candy already placed in the same
//! call. Attempts per candy are bounded, so tight boards fail with
//! [`ArenaError::PlacementExhausted`] instead of spinning forever.

use rand::Rng;
use tracing::{trace, warn};

use crate::error::ArenaError;
use crate::geometry::Vec2;

/// Default number of draws allowed per candy.
pub const DEFAULT_MAX_ATTEMPTS: usize = 1000;

/// Parameters of one placement call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementRequest {
    /// Number of candies to place. Must be at least one.
    pub candy_count: usize,
    /// Half side of the square the positions are drawn from.
    pub half_extent: f32,
    /// Minimum distance between any two placed entities.
    pub min_separation: f32,
    /// Draw the agent position too instead of using the board center.
    pub agent_random: bool,
    /// Draws allowed per candy before giving up.
    pub max_attempts: usize,
    /// Spacing below which relaxation never goes.
    pub separation_floor: f32,
}

impl PlacementRequest {
    /// A request with [`DEFAULT_MAX_ATTEMPTS`] and the agent at the center.
    pub fn new(candy_count: usize, half_extent: f32, min_separation: f32) -> Self {
        Self {
            candy_count,
            half_extent,
            min_separation,
            agent_random: false,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            separation_floor: 0.0,
        }
    }

    /// Sets whether the agent spawns at a random spot.
    #[must_use]
    pub fn with_agent_random(self, agent_random: bool) -> Self {
        Self {
            agent_random,
            ..self
        }
    }

    /// Sets the attempt budget per candy.
    #[must_use]
    pub fn with_max_attempts(self, max_attempts: usize) -> Self {
        Self {
            max_attempts,
            ..self
        }
    }

    /// Sets the spacing relaxation stops at, typically the pickup radius.
    #[must_use]
    pub fn with_separation_floor(self, separation_floor: f32) -> Self {
        Self {
            separation_floor,
            ..self
        }
    }

    fn validate(&self) -> Result<(), ArenaError> {
        if self.candy_count == 0 {
            return Err(ArenaError::InvalidConfig(
                "candy count must be at least 1".to_owned(),
            ));
        }
        // the sampled range is twice as wide as the half extent
        if !(2.0 * self.half_extent).is_finite() || self.half_extent <= 0.0 {
            return Err(ArenaError::InvalidConfig(format!(
                "arena half extent must be positive and finite, got {}",
                self.half_extent
            )));
        }
        if !self.min_separation.is_finite() || self.min_separation < 0.0 {
            return Err(ArenaError::InvalidConfig(format!(
                "minimum separation must be non-negative, got {}",
                self.min_separation
            )));
        }
        if !self.separation_floor.is_finite() || self.separation_floor < 0.0 {
            return Err(ArenaError::InvalidConfig(format!(
                "separation floor must be non-negative, got {}",
                self.separation_floor
            )));
        }
        if self.max_attempts == 0 {
            return Err(ArenaError::InvalidConfig(
                "at least one placement attempt is required".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Positions produced for one round.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    /// Agent spawn point.
    pub agent: Vec2,
    /// Candy positions, in placement order.
    pub candies: Vec<Vec2>,
    /// Separation actually enforced. Lower than requested when spacing was relaxed.
    pub separation: f32,
}

impl Layout {
    /// Smallest distance between any two entities of the layout (agent included).
    ///
    /// `None` when there is nothing to compare.
    pub fn min_pairwise_distance(&self) -> Option<f32> {
        let points: Vec<Vec2> = std::iter::once(self.agent)
            .chain(self.candies.iter().copied())
            .collect();
        let mut min: Option<f32> = None;
        for (i, a) in points.iter().enumerate() {
            for b in &points[i + 1..] {
                let d = a.distance(*b);
                min = Some(min.map_or(d, |m| m.min(d)));
            }
        }
        min
    }
}

fn sample_point<R: Rng + ?Sized>(rng: &mut R, half_extent: f32) -> Vec2 {
    Vec2::new(
        rng.random_range(-half_extent..=half_extent),
        rng.random_range(-half_extent..=half_extent),
    )
}

/// Places the agent and `request.candy_count` candies.
///
/// # Errors
/// - [`ArenaError::InvalidConfig`] when the request is malformed.
/// - [`ArenaError::PlacementExhausted`] when a candy could not be placed within
///   `request.max_attempts` draws.
pub fn place_entities<R: Rng + ?Sized>(
    rng: &mut R,
    request: &PlacementRequest,
) -> Result<Layout, ArenaError> {
    request.validate()?;

    let agent = if request.agent_random {
        sample_point(rng, request.half_extent)
    } else {
        Vec2::ZERO
    };

    let mut candies: Vec<Vec2> = Vec::with_capacity(request.candy_count);
    for candy_index in 0..request.candy_count {
        let mut accepted = None;
        for attempt in 1..=request.max_attempts {
            let candidate = sample_point(rng, request.half_extent);
            let too_close_to_agent = candidate.distance(agent) < request.min_separation;
            let too_close_to_candy = candies
                .iter()
                .any(|other| candidate.distance(*other) < request.min_separation);
            if !too_close_to_agent && !too_close_to_candy {
                trace!(candy_index, attempt, %candidate, "candy placed");
                accepted = Some(candidate);
                break;
            }
        }

        match accepted {
            Some(position) => candies.push(position),
            None => {
                return Err(ArenaError::PlacementExhausted {
                    placed: candies.len(),
                    requested: request.candy_count,
                    attempts: request.max_attempts,
                    min_separation: request.min_separation,
                })
            }
        }
    }

    Ok(Layout {
        agent,
        candies,
        separation: request.min_separation,
    })
}

/// Like [`place_entities`], but shrinks the separation by `relax_factor` after each
/// exhausted attempt, up to `max_relaxations` times. The separation never drops below
/// `request.separation_floor`.
///
/// # Errors
/// Configuration errors are returned immediately. When every relaxation is exhausted the
/// last [`ArenaError::PlacementExhausted`] is returned.
pub fn place_entities_relaxed<R: Rng + ?Sized>(
    rng: &mut R,
    request: &PlacementRequest,
    relax_factor: f32,
    max_relaxations: usize,
) -> Result<Layout, ArenaError> {
    if !(relax_factor > 0.0 && relax_factor < 1.0) {
        return Err(ArenaError::InvalidConfig(format!(
            "relax factor must be in (0, 1), got {relax_factor}"
        )));
    }

    let mut current = *request;
    let mut relaxations = 0;
    loop {
        match place_entities(rng, &current) {
            Ok(layout) => return Ok(layout),
            Err(err @ ArenaError::PlacementExhausted { .. }) => {
                if relaxations >= max_relaxations
                    || current.min_separation <= current.separation_floor
                {
                    return Err(err);
                }
                relaxations += 1;
                let relaxed =
                    (current.min_separation * relax_factor).max(current.separation_floor);
                warn!(
                    from = current.min_separation,
                    to = relaxed,
                    relaxations,
                    "placement exhausted, relaxing candy spacing"
                );
                current.min_separation = relaxed;
            }
            Err(err) => return Err(err),
        }
    }
}
