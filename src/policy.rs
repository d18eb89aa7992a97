//! Scripted move sources for the computer board, demos and tests.

use crate::episode::BoardView;
use crate::game_interface::{MoveSource, Side};
use crate::geometry::Vec2;

/// Heads for the closest candy still on the board.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChaseNearest {
    /// Stick deflection in `[0, 1]`.
    pub gain: f32,
}

impl Default for ChaseNearest {
    fn default() -> Self {
        Self { gain: 1.0 }
    }
}

impl MoveSource for ChaseNearest {
    fn move_vector(&mut self, _side: Side, board: &BoardView<'_>) -> Vec2 {
        let target = board
            .remaining()
            .map(|(_, candy)| candy.position())
            .min_by(|a, b| {
                a.distance(board.agent)
                    .total_cmp(&b.distance(board.agent))
            });
        match target {
            Some(target) => (target - board.agent).normalized_or_zero() * self.gain,
            None => Vec2::ZERO,
        }
    }
}

/// Heads for the most valuable candy still on the board, ties going to the first placed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChaseHighestValue;

impl MoveSource for ChaseHighestValue {
    fn move_vector(&mut self, _side: Side, board: &BoardView<'_>) -> Vec2 {
        let mut best: Option<(u32, Vec2)> = None;
        for (_, candy) in board.remaining() {
            if best.map_or(true, |(value, _)| candy.value() > value) {
                best = Some((candy.value(), candy.position()));
            }
        }
        best.map_or(Vec2::ZERO, |(_, target)| {
            (target - board.agent).normalized_or_zero()
        })
    }
}

/// Never moves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stand;

impl MoveSource for Stand {
    fn move_vector(&mut self, _side: Side, _board: &BoardView<'_>) -> Vec2 {
        Vec2::ZERO
    }
}

/// One move source per side.
#[derive(Debug, Clone, Default)]
pub struct Sides<H, C> {
    /// Drives the human board.
    pub human: H,
    /// Drives the computer board.
    pub computer: C,
}

impl<H: MoveSource, C: MoveSource> Sides<H, C> {
    /// Pairs two move sources.
    pub fn new(human: H, computer: C) -> Self {
        Self { human, computer }
    }
}

impl<H: MoveSource, C: MoveSource> MoveSource for Sides<H, C> {
    fn move_vector(&mut self, side: Side, board: &BoardView<'_>) -> Vec2 {
        match side {
            Side::Human => self.human.move_vector(side, board),
            Side::Computer => self.computer.move_vector(side, board),
        }
    }
}
