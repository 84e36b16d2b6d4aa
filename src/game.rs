#![warn(clippy::all, clippy::pedantic)]

// Default game board dimensions
pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

// Largest board a config file may ask for
pub const MAX_BOARD_WIDTH: usize = 100;
pub const MAX_BOARD_HEIGHT: usize = 100;

// Settled-cell value for the phasing single block. Ordinary shapes use 1..=7.
pub const SPECIAL_KIND: u8 = 8;

// Line clear base points indexed by lines cleared (scaled by level and difficulty)
pub const LINE_CLEAR_POINTS: [u64; 5] = [0, 100, 300, 500, 800];

// Flat drop bonuses, independent of level and difficulty
pub const SOFT_DROP_POINTS: u64 = 1; // Points per row descended while fast dropping
pub const HARD_DROP_POINTS: u64 = 2; // Points per row hard dropped

// Level progression
pub const STARTING_LEVEL: u32 = 1;
pub const VICTORY_LEVEL: u32 = 50; // Reaching this level wins the game
pub const LEVEL_THRESHOLD_GROWTH: f64 = 1.15; // Each level needs 15% more points than the last

// Default input timing in milliseconds
pub const FAST_DROP_INTERVAL_MS: u64 = 50;
pub const MOVE_REPEAT_INTERVAL_MS: u64 = 100;
pub const ROTATE_REPEAT_INTERVAL_MS: u64 = 150;

/// Base points for clearing `lines` rows at once. Anything past a four-row
/// clear is paid as a four-row clear.
#[must_use]
pub fn line_clear_points(lines: usize) -> u64 {
    LINE_CLEAR_POINTS[lines.min(LINE_CLEAR_POINTS.len() - 1)]
}
