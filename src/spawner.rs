#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation and wrapping when casting board dimensions to i32 since they are always small
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap
)]

use bevy_ecs::prelude::*;
use log::trace;

use crate::components::Piece;
use crate::game::SPECIAL_KIND;
use crate::progression::Difficulty;
use crate::shapes::{Shape, ShapeFamily};

/// Piece factory. Owns its random source so games can be replayed from a seed.
#[derive(Resource, Debug, Clone)]
pub struct PieceSpawner {
    rng: fastrand::Rng,
}

impl Default for PieceSpawner {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceSpawner {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Draws the next piece, horizontally centred on the top row of a board
    /// `board_width` columns wide.
    pub fn spawn(&mut self, difficulty: Difficulty, family: ShapeFamily, board_width: usize) -> Piece {
        let special = self.rng.f64() < difficulty.config().special_probability;

        let (kind, shape) = if special {
            (SPECIAL_KIND, Shape::special())
        } else {
            let kind = self.rng.u8(1..=family.type_count());
            let shape = family.shape(kind).unwrap_or_else(Shape::special);
            (kind, shape)
        };

        let x = (board_width.saturating_sub(shape.width()) / 2) as i32;
        trace!("Spawned piece type {kind} at x={x} (special: {special})");
        Piece::new(kind, shape, x, 0, special)
    }
}
