#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation when casting from usize to i32 since board dimensions are always small enough to fit in i32
    clippy::cast_possible_truncation,
    // Allow sign loss when going from signed to unsigned types since we validate values are non-negative before casting
    clippy::cast_sign_loss,
    // Allow potential wrapping when casting between types of same size as we validate values are in range
    clippy::cast_possible_wrap,
    // Allow more than 3 bools in structs for game states where bools represent distinct flags
    clippy::struct_excessive_bools
)]

use bevy_ecs::prelude::*;

use crate::game::STARTING_LEVEL;
use crate::progression::Difficulty;
use crate::shapes::{Shape, ShapeFamily};

/// Grid of settled cells, stored row-major. `0` is empty, any other value is the
/// type id of the shape that settled there.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<Vec<u8>>,
}

impl Board {
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0, "board must have at least one column");
        assert!(height > 0, "board must have at least one row");
        Self {
            width,
            height,
            cells: vec![vec![0; width]; height],
        }
    }

    pub fn clear(&mut self) {
        for row in &mut self.cells {
            row.fill(0);
        }
    }

    #[must_use]
    pub fn in_columns(&self, x: i32) -> bool {
        x >= 0 && x < self.width as i32
    }

    #[must_use]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        self.in_columns(x) && y >= 0 && y < self.height as i32
    }

    /// Cell value at column `x`, row `y`, or `None` outside the grid.
    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> Option<u8> {
        if self.in_bounds(x, y) {
            Some(self.cells[y as usize][x as usize])
        } else {
            None
        }
    }

    #[must_use]
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_some_and(|cell| cell != 0)
    }

    /// Writes `value` at column `x`, row `y`. Writes outside the grid are dropped.
    pub fn set(&mut self, x: i32, y: i32, value: u8) {
        if self.in_bounds(x, y) {
            self.cells[y as usize][x as usize] = value;
        }
    }

    #[must_use]
    pub fn is_row_full(&self, row: usize) -> bool {
        self.cells[row].iter().all(|&cell| cell != 0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().flatten().all(|&cell| cell == 0)
    }

    /// Removes every full row, inserting an empty row at the top for each one.
    /// Returns the number of rows removed.
    pub fn clear_full_lines(&mut self) -> usize {
        let mut lines_cleared = 0;
        let mut row = self.height;

        // Walk bottom to top. After a removal the same index holds the row that
        // was above it, so it is examined again before moving up.
        while row > 0 {
            let index = row - 1;
            if self.is_row_full(index) {
                self.cells.remove(index);
                self.cells.insert(0, vec![0; self.width]);
                lines_cleared += 1;
            } else {
                row -= 1;
            }
        }

        lines_cleared
    }
}

/// An active, movable piece. Each piece owns its current rotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub kind: u8,
    pub x: i32,
    pub y: i32,
    pub special: bool,
    pub shape: Shape,
}

impl Piece {
    #[must_use]
    pub fn new(kind: u8, shape: Shape, x: i32, y: i32, special: bool) -> Self {
        Self {
            kind,
            x,
            y,
            special,
            shape,
        }
    }

    /// Board coordinates `(x, y)` of every occupied cell.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .occupied()
            .map(|(r, c)| (self.x + c as i32, self.y + r as i32))
    }

    #[must_use]
    pub fn shifted(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self.clone()
        }
    }

    /// Same piece with its shape turned clockwise. Special pieces do not rotate.
    #[must_use]
    pub fn rotated(&self) -> Self {
        if self.special {
            return self.clone();
        }
        Self {
            shape: self.shape.rotated(),
            ..self.clone()
        }
    }
}

/// Externally observable lifecycle state, derived from the session flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Ready,
    Running,
    Paused,
    GameOver,
    Victory,
}

#[derive(Debug, Resource, Clone)]
pub struct GameState {
    pub current: Option<Piece>,
    pub next: Option<Piece>,
    pub score: u64,
    pub level: u32,
    pub difficulty: Difficulty,
    pub family: ShapeFamily,
    pub is_paused: bool,
    pub is_game_over: bool,
    pub is_dropping: bool,
    pub is_victory: bool,
    pub lines_cleared: u32,
    pub pieces_placed: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Difficulty::default(), ShapeFamily::default())
    }
}

impl GameState {
    #[must_use]
    pub fn new(difficulty: Difficulty, family: ShapeFamily) -> Self {
        Self {
            current: None,
            next: None,
            score: 0,
            level: STARTING_LEVEL,
            difficulty,
            family,
            is_paused: false,
            is_game_over: false,
            is_dropping: false,
            is_victory: false,
            lines_cleared: 0,
            pieces_placed: 0,
        }
    }

    /// Clears the session, keeping only the difficulty and family selection.
    pub fn reset(&mut self) {
        *self = Self::new(self.difficulty, self.family);
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.is_victory {
            Phase::Victory
        } else if self.is_game_over {
            Phase::GameOver
        } else if self.current.is_none() {
            Phase::Ready
        } else if self.is_paused {
            Phase::Paused
        } else {
            Phase::Running
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.is_game_over || self.is_victory
    }

    /// True when gravity and input may change the session.
    #[must_use]
    pub fn accepts_input(&self) -> bool {
        self.phase() == Phase::Running
    }
}
