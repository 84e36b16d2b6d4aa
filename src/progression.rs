#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation when converting the f64 curves back to integers since the values are clamped first
    clippy::cast_possible_truncation,
    // Allow sign loss since every curve value is non-negative
    clippy::cast_sign_loss,
    // Allow precision loss when lifting scores into f64 for the multiplier
    clippy::cast_precision_loss,
    // Allow wrapping when narrowing levels to i32 exponents since they are clamped to i32::MAX
    clippy::cast_possible_wrap
)]

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::game::{LEVEL_THRESHOLD_GROWTH, STARTING_LEVEL, VICTORY_LEVEL, line_clear_points};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

/// Fixed tuning constants for one difficulty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyConfig {
    pub name: &'static str,
    pub initial_speed_ms: u64,
    pub decay: f64,
    pub speed_floor_ms: u64,
    pub score_multiplier: f64,
    pub level_up_threshold: u64,
    pub special_probability: f64,
}

const EASY: DifficultyConfig = DifficultyConfig {
    name: "Easy",
    initial_speed_ms: 1000,
    decay: 0.92,
    speed_floor_ms: 200,
    score_multiplier: 1.0,
    level_up_threshold: 1200,
    special_probability: 0.10,
};

const NORMAL: DifficultyConfig = DifficultyConfig {
    name: "Normal",
    initial_speed_ms: 800,
    decay: 0.88,
    speed_floor_ms: 120,
    score_multiplier: 1.5,
    level_up_threshold: 1000,
    special_probability: 0.07,
};

const HARD: DifficultyConfig = DifficultyConfig {
    name: "Hard",
    initial_speed_ms: 600,
    decay: 0.85,
    speed_floor_ms: 80,
    score_multiplier: 2.0,
    level_up_threshold: 800,
    special_probability: 0.05,
};

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    #[must_use]
    pub fn config(self) -> &'static DifficultyConfig {
        match self {
            Difficulty::Easy => &EASY,
            Difficulty::Normal => &NORMAL,
            Difficulty::Hard => &HARD,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        self.config().name
    }
}

impl DifficultyConfig {
    /// Checks the invariants every curve below relies on.
    ///
    /// # Panics
    ///
    /// Panics if the decay is outside (0, 1), the floor is zero or the multiplier is not positive.
    pub fn validate(&self) {
        assert!(
            self.decay > 0.0 && self.decay < 1.0,
            "{}: decay factor must be in (0, 1)",
            self.name
        );
        assert!(self.speed_floor_ms > 0, "{}: speed floor must be positive", self.name);
        assert!(
            self.score_multiplier > 0.0,
            "{}: score multiplier must be positive",
            self.name
        );
        assert!(
            self.level_up_threshold > 0,
            "{}: level-up threshold must be positive",
            self.name
        );
        assert!(
            (0.0..=1.0).contains(&self.special_probability),
            "{}: special probability must be a probability",
            self.name
        );
    }
}

/// Gravity interval in milliseconds: `initial * decay^(level - 1)`, rounded and clamped to the floor.
#[must_use]
pub fn speed_curve(difficulty: Difficulty, level: u32) -> u64 {
    let config = difficulty.config();
    let exponent = level.saturating_sub(1).min(i32::MAX as u32) as i32;
    let speed = (config.initial_speed_ms as f64 * config.decay.powi(exponent)).round() as u64;
    speed.max(config.speed_floor_ms)
}

#[must_use]
pub fn drop_interval(difficulty: Difficulty, level: u32) -> Duration {
    Duration::from_millis(speed_curve(difficulty, level))
}

/// Points for a line clear: `floor(base[lines] * level * multiplier)`.
#[must_use]
pub fn score_for_clear(lines_cleared: usize, level: u32, difficulty: Difficulty) -> u64 {
    let base = line_clear_points(lines_cleared) * u64::from(level);
    (base as f64 * difficulty.config().score_multiplier).floor() as u64
}

/// Points needed to complete `level` (1-indexed): `floor(base * 1.15^(level - 1))`.
#[must_use]
pub fn level_threshold(difficulty: Difficulty, level: u32) -> u64 {
    let base = difficulty.config().level_up_threshold as f64;
    let exponent = level.saturating_sub(1).min(i32::MAX as u32) as i32;
    (base * LEVEL_THRESHOLD_GROWTH.powi(exponent)).floor() as u64
}

/// Level reached with `score` points, capped at the victory level.
#[must_use]
pub fn level_for_score(difficulty: Difficulty, score: u64) -> u32 {
    let mut level = STARTING_LEVEL;
    let mut remaining = score;
    while level < VICTORY_LEVEL {
        let threshold = level_threshold(difficulty, level);
        if threshold > remaining {
            break;
        }
        remaining -= threshold;
        level += 1;
    }
    level
}

/// Total score at which `level` begins: the sum of thresholds for levels `1..level`.
#[must_use]
pub fn score_at_level_start(difficulty: Difficulty, level: u32) -> u64 {
    (STARTING_LEVEL..level.min(VICTORY_LEVEL))
        .map(|l| level_threshold(difficulty, l))
        .sum()
}

/// Score needed to leave `level`.
#[must_use]
pub fn next_level_score(difficulty: Difficulty, level: u32) -> u64 {
    score_at_level_start(difficulty, level + 1)
}

/// Fraction of the current level's threshold already earned, in `[0, 1]`.
#[must_use]
pub fn level_progress(difficulty: Difficulty, score: u64) -> f64 {
    let level = level_for_score(difficulty, score);
    if level >= VICTORY_LEVEL {
        return 1.0;
    }
    let earned = score - score_at_level_start(difficulty, level);
    (earned as f64 / level_threshold(difficulty, level) as f64).clamp(0.0, 1.0)
}
