//! Round arbitration and match tallies.
//!
//! A round is won by the side holding strictly more round points when it ends, no matter
//! which side ended it. A tie has no winner but still counts as a played round. The match
//! goes to the first side whose win counter reaches the threshold.

use std::fmt;

use crate::game_interface::Side;

/// Winner of a round given both sides' round points, indexed by [`Side::index`].
///
/// ```
/// use candy_arena::game_interface::Side;
/// use candy_arena::scoring::arbitrate;
///
/// assert_eq!(arbitrate([6, 4]), Some(Side::Human));
/// assert_eq!(arbitrate([4, 4]), None);
/// ```
pub fn arbitrate(points: [u32; 2]) -> Option<Side> {
    let [human, computer] = points;
    match human.cmp(&computer) {
        std::cmp::Ordering::Greater => Some(Side::Human),
        std::cmp::Ordering::Less => Some(Side::Computer),
        std::cmp::Ordering::Equal => None,
    }
}

/// What closed a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndReason {
    /// This side emptied its board.
    AllCollected(Side),
    /// This side left its board.
    HitWall(Side),
    /// The round countdown reached zero.
    Timeout,
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndReason::AllCollected(side) => write!(f, "{side} collected every candy"),
            EndReason::HitWall(side) => write!(f, "{side} hit the wall"),
            EndReason::Timeout => write!(f, "time ran out"),
        }
    }
}

/// Result of one competition round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundSummary {
    /// 1-based round number.
    pub round: u32,
    /// `None` on a tie.
    pub winner: Option<Side>,
    /// What ended the round.
    pub reason: EndReason,
    /// Round points, indexed by [`Side::index`].
    pub points: [u32; 2],
    /// Win counters after this round.
    pub wins: [u32; 2],
}

impl fmt::Display for RoundSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let winner = match self.winner {
            Some(side) => side.to_string(),
            None => "nobody".to_owned(),
        };
        write!(
            f,
            "round {}: {} wins {} to {} ({}), wins {}-{}",
            self.round,
            winner,
            self.points[0],
            self.points[1],
            self.reason,
            self.wins[0],
            self.wins[1]
        )
    }
}

/// Result of a finished competition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSummary {
    /// Side that reached the win threshold.
    pub winner: Side,
    /// Final win counters, indexed by [`Side::index`].
    pub wins: [u32; 2],
    /// Rounds that ended with an outcome, ties included.
    pub rounds_played: u32,
    /// Rounds without a winner.
    pub draws: u32,
}

/// Running tally of a competition.
#[derive(PartialEq, Eq, Default, Debug, Clone, Copy)]
pub struct MatchScore {
    /// Rounds won by the human board.
    pub human_wins: u32,
    /// Rounds won by the computer board.
    pub computer_wins: u32,
    /// Tied rounds.
    pub draws: u32,
}

impl MatchScore {
    /// Counts one round outcome.
    pub fn record(&mut self, winner: Option<Side>) {
        match winner {
            Some(Side::Human) => self.human_wins += 1,
            Some(Side::Computer) => self.computer_wins += 1,
            None => self.draws += 1,
        }
    }

    /// Wins of `side`.
    pub fn wins(&self, side: Side) -> u32 {
        match side {
            Side::Human => self.human_wins,
            Side::Computer => self.computer_wins,
        }
    }

    /// Win counters indexed by [`Side::index`].
    pub fn wins_array(&self) -> [u32; 2] {
        [self.human_wins, self.computer_wins]
    }

    /// Rounds with an outcome so far.
    pub fn rounds_played(&self) -> u32 {
        self.human_wins + self.computer_wins + self.draws
    }

    /// The side holding `threshold` wins, if any.
    pub fn leader_at(&self, threshold: u32) -> Option<Side> {
        Side::ALL.into_iter().find(|side| self.wins(*side) >= threshold)
    }
}

impl fmt::Display for MatchScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "human: {}, computer: {}, draw: {}",
            self.human_wins, self.computer_wins, self.draws
        )
    }
}
