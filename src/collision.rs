#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation and wrapping when casting board dimensions to i32 since they are always small
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap
)]

use crate::components::{Board, Piece};

/// Whether moving `piece` by `(dx, dy)` would leave it in an illegal position.
/// Phasing pieces use a different rule when moving down.
#[must_use]
pub fn collides(board: &Board, piece: &Piece, dx: i32, dy: i32) -> bool {
    if piece.special && dy > 0 {
        phasing_collides(board, piece, dx, dy)
    } else {
        ordinary_collides(board, piece, dx, dy)
    }
}

/// Walls, floor and settled cells all block. Rows above the top never do.
fn ordinary_collides(board: &Board, piece: &Piece, dx: i32, dy: i32) -> bool {
    piece.cells().any(|(x, y)| {
        let (x, y) = (x + dx, y + dy);
        !board.in_columns(x) || y >= board.height as i32 || (y >= 0 && board.is_occupied(x, y))
    })
}

/// Settled cells do not block a downward move as long as some empty cell is still
/// left below the target in the same column. The last row always blocks.
fn phasing_collides(board: &Board, piece: &Piece, dx: i32, dy: i32) -> bool {
    let last_row = board.height as i32 - 1;
    piece.cells().any(|(x, y)| {
        let (x, y) = (x + dx, y + dy);
        if !board.in_columns(x) || y >= last_row {
            return true;
        }
        ((y + 1).max(0)..=last_row).all(|row| board.is_occupied(x, row))
    })
}
