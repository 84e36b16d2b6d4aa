#![warn(clippy::all, clippy::pedantic)]

use serde::{Deserialize, Serialize};

use crate::game::SPECIAL_KIND;

type Matrix = &'static [&'static [u8]];

const TROMINOES: &[Matrix] = &[
    &[&[1, 1, 1]],      // I
    &[&[1, 0], &[1, 1]], // L
];

const TETROMINOES: &[Matrix] = &[
    &[&[1, 1, 1, 1]],             // I
    &[&[1, 0, 0], &[1, 1, 1]],    // J
    &[&[0, 0, 1], &[1, 1, 1]],    // L
    &[&[1, 1], &[1, 1]],          // O
    &[&[0, 1, 1], &[1, 1, 0]],    // S
    &[&[0, 1, 0], &[1, 1, 1]],    // T
    &[&[1, 1, 0], &[0, 1, 1]],    // Z
];

const PENTOMINOES: &[Matrix] = &[
    &[&[1, 1, 1, 1, 1]],                   // I
    &[&[1, 0, 0, 0], &[1, 1, 1, 1]],       // L
    &[&[1, 1], &[1, 1], &[1, 0]],          // P
    &[&[1, 1, 1], &[0, 1, 0], &[0, 1, 0]], // T
    &[&[1, 0, 1], &[1, 1, 1]],             // U
    &[&[0, 1, 0], &[1, 1, 1], &[0, 1, 0]], // X
    &[&[1, 1, 0], &[0, 1, 0], &[0, 1, 1]], // Z
];

/// Occupied/empty pattern of a piece in one rotation, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    cells: Vec<Vec<u8>>,
}

impl Shape {
    /// Builds a shape from a row-major 0/1 matrix.
    ///
    /// # Panics
    ///
    /// Panics if the matrix is empty, ragged or has no occupied cell.
    #[must_use]
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        assert!(!rows.is_empty(), "shape must have at least one row");
        let width = rows[0].len();
        assert!(
            rows.iter().all(|row| row.len() == width && width > 0),
            "shape rows must share a non-zero width"
        );
        let cells: Vec<Vec<u8>> = rows
            .iter()
            .map(|row| row.iter().map(|&cell| u8::from(cell != 0)).collect())
            .collect();
        assert!(
            cells.iter().flatten().any(|&cell| cell != 0),
            "shape must occupy at least one cell"
        );
        Self { cells }
    }

    /// The non-rotating single block used by phasing pieces.
    #[must_use]
    pub fn special() -> Self {
        Self { cells: vec![vec![1]] }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.cells[0].len()
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        self.cells
            .get(row)
            .and_then(|r| r.get(col))
            .is_some_and(|&cell| cell != 0)
    }

    /// Iterates the occupied cells as `(row, col)` offsets from the top-left corner.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, cell)| **cell != 0)
                .map(move |(c, _)| (r, c))
        })
    }

    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.occupied().count()
    }

    /// Returns the 90 degree clockwise rotation: transpose, then reverse each row.
    #[must_use]
    pub fn rotated(&self) -> Self {
        let height = self.height();
        let cells = (0..self.width())
            .map(|c| (0..height).rev().map(|r| self.cells[r][c]).collect())
            .collect();
        Self { cells }
    }
}

/// Block-size family the ordinary shapes are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeFamily {
    Tromino,
    #[default]
    Tetromino,
    Pentomino,
}

impl ShapeFamily {
    pub const ALL: [ShapeFamily; 3] = [
        ShapeFamily::Tromino,
        ShapeFamily::Tetromino,
        ShapeFamily::Pentomino,
    ];

    fn catalog(self) -> &'static [Matrix] {
        match self {
            ShapeFamily::Tromino => TROMINOES,
            ShapeFamily::Tetromino => TETROMINOES,
            ShapeFamily::Pentomino => PENTOMINOES,
        }
    }

    /// Number of ordinary shape types; ids run from 1 to this value.
    #[must_use]
    pub fn type_count(self) -> u8 {
        u8::try_from(self.catalog().len()).unwrap_or(u8::MAX)
    }

    /// Cells per ordinary piece in this family.
    #[must_use]
    pub fn block_size(self) -> usize {
        match self {
            ShapeFamily::Tromino => 3,
            ShapeFamily::Tetromino => 4,
            ShapeFamily::Pentomino => 5,
        }
    }

    /// Spawn orientation of shape type `kind`. The special id maps to the single block.
    #[must_use]
    pub fn shape(self, kind: u8) -> Option<Shape> {
        if kind == SPECIAL_KIND {
            return Some(Shape::special());
        }
        let index = usize::from(kind).checked_sub(1)?;
        self.catalog().get(index).map(|rows| Shape::from_rows(rows))
    }

    /// Widest spawn footprint across the family, used to validate board width.
    #[must_use]
    pub fn max_width(self) -> usize {
        self.catalog()
            .iter()
            .map(|rows| rows[0].len())
            .max()
            .unwrap_or(1)
    }

    #[must_use]
    pub fn next(self) -> Self {
        match self {
            ShapeFamily::Tromino => ShapeFamily::Tetromino,
            ShapeFamily::Tetromino => ShapeFamily::Pentomino,
            ShapeFamily::Pentomino => ShapeFamily::Tromino,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ShapeFamily::Tromino => "3-block",
            ShapeFamily::Tetromino => "4-block",
            ShapeFamily::Pentomino => "5-block",
        }
    }
}
