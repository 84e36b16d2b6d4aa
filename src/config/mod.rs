pub mod loader;

use std::time::Duration;

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

use crate::game::{
    BOARD_HEIGHT, BOARD_WIDTH, FAST_DROP_INTERVAL_MS, MAX_BOARD_HEIGHT, MAX_BOARD_WIDTH,
    MOVE_REPEAT_INTERVAL_MS, ROTATE_REPEAT_INTERVAL_MS,
};
use crate::progression::Difficulty;
use crate::shapes::ShapeFamily;

/// On-disk settings. Every section falls back to its defaults when missing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub board: BoardConfig,
    pub game: GameConfig,
    pub timing: TimingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub rows: usize,
    pub cols: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            rows: BOARD_HEIGHT,
            cols: BOARD_WIDTH,
        }
    }
}

// Selection the first game starts with
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub difficulty: Difficulty,
    pub block_family: ShapeFamily,
}

// Held-input timings in milliseconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub fast_drop_ms: u64,
    pub move_repeat_ms: u64,
    pub rotate_repeat_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            fast_drop_ms: FAST_DROP_INTERVAL_MS,
            move_repeat_ms: MOVE_REPEAT_INTERVAL_MS,
            rotate_repeat_ms: ROTATE_REPEAT_INTERVAL_MS,
        }
    }
}

impl Config {
    #[must_use]
    pub fn settings(&self) -> Settings {
        Settings {
            rows: self.board.rows,
            cols: self.board.cols,
            fast_drop_interval: Duration::from_millis(self.timing.fast_drop_ms),
            move_repeat_interval: Duration::from_millis(self.timing.move_repeat_ms),
            rotate_repeat_interval: Duration::from_millis(self.timing.rotate_repeat_ms),
        }
    }
}

/// Runtime form of the configuration, fixed for the lifetime of a game.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub rows: usize,
    pub cols: usize,
    pub fast_drop_interval: Duration,
    pub move_repeat_interval: Duration,
    pub rotate_repeat_interval: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Config::default().settings()
    }
}

impl Settings {
    /// Fails fast on settings no game could run with.
    ///
    /// # Panics
    ///
    /// Panics on an empty or oversized board, a board narrower than the widest
    /// shape of any family, or a zero input interval.
    pub fn validate(&self) {
        assert!(self.rows > 0, "board must have at least one row");
        assert!(self.cols > 0, "board must have at least one column");
        assert!(
            self.rows <= MAX_BOARD_HEIGHT && self.cols <= MAX_BOARD_WIDTH,
            "board is {}x{} but at most {MAX_BOARD_HEIGHT}x{MAX_BOARD_WIDTH} is supported",
            self.rows,
            self.cols
        );
        for family in ShapeFamily::ALL {
            assert!(
                self.cols >= family.max_width(),
                "board is {} columns wide but {} shapes need {}",
                self.cols,
                family.name(),
                family.max_width()
            );
        }
        assert!(
            !self.fast_drop_interval.is_zero()
                && !self.move_repeat_interval.is_zero()
                && !self.rotate_repeat_interval.is_zero(),
            "input intervals must be non-zero"
        );
    }
}
