//! Reward candies.

use crate::geometry::Vec2;

/// Value of the `index`-th candy (0-based) in placement order.
///
/// Values ramp up by two per candy: `2, 4, 6, 8, ...`
pub fn reward_value_for(index: usize) -> u32 {
    (index as u32 + 1) * 2
}

/// Total reward available on a board holding `candy_count` candies.
pub fn total_reward(candy_count: usize) -> u32 {
    (0..candy_count).map(reward_value_for).sum()
}

/// One collectible candy.
///
/// A candy is collected at most once between two calls to [`RewardItem::reset`].
#[derive(Debug, Clone, PartialEq)]
pub struct RewardItem {
    position: Vec2,
    value: u32,
    collected: bool,
}

impl RewardItem {
    /// An active candy at `position` worth `value`.
    pub fn new(position: Vec2, value: u32) -> Self {
        Self {
            position,
            value,
            collected: false,
        }
    }

    /// Points awarded when collected.
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Where the candy sits on the board.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// True once collected in the current round.
    pub fn is_collected(&self) -> bool {
        self.collected
    }

    /// Reassigns value and position and puts the candy back on the board.
    pub fn reset(&mut self, value: u32, position: Vec2) {
        self.value = value;
        self.position = position;
        self.collected = false;
    }

    /// Collects the candy.
    ///
    /// Returns the awarded value on the first call and `None` afterwards, until the next
    /// reset.
    pub fn mark_collected(&mut self) -> Option<u32> {
        if self.collected {
            return None;
        }
        self.collected = true;
        Some(self.value)
    }
}
