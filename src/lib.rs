pub mod app;
pub mod collision;
pub mod components;
pub mod config;
pub mod events;
pub mod game;
pub mod merge;
pub mod progression;
pub mod records;
pub mod scheduler;
pub mod shapes;
pub mod spawner;
pub mod systems;
pub mod ui;

#[cfg(test)]
mod tests;

use bevy_ecs::prelude::Resource;
use std::time::Instant;

pub use app::{Game, Hold};
pub use components::{Board, GameState, Phase, Piece};
pub use events::{GameEvent, GameObserver, GameRecord};
pub use progression::Difficulty;
pub use shapes::{Shape, ShapeFamily};

/// Wall-clock time since the current game started.
#[derive(Resource, Debug, Clone)]
pub struct PlayClock {
    started: Instant,
}

impl PlayClock {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn restart(&mut self) {
        self.started = Instant::now();
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.started.elapsed().as_secs()
    }
}

impl Default for PlayClock {
    fn default() -> Self {
        Self::new()
    }
}
