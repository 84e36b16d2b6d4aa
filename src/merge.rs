#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation and wrapping when casting board dimensions to i32 since they are always small
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap
)]

use crate::components::{Board, Piece};
use crate::game::SPECIAL_KIND;

/// Commits a resting piece into the board.
pub fn merge_piece(board: &mut Board, piece: &Piece) {
    if piece.special {
        merge_phasing(board, piece);
    } else {
        merge_ordinary(board, piece);
    }
}

/// Stamps every cell where it is. Cells still above the top never reach the board.
fn merge_ordinary(board: &mut Board, piece: &Piece) {
    for (x, y) in piece.cells() {
        if y >= 0 {
            board.set(x, y, piece.kind);
        }
    }
}

/// Each cell sinks through empty rows and settles directly above the first
/// obstruction or on the floor, wherever the piece nominally is.
fn merge_phasing(board: &mut Board, piece: &Piece) {
    let last_row = board.height as i32 - 1;
    for (x, y) in piece.cells() {
        let mut row = y;
        while row < last_row && !board.is_occupied(x, row + 1) {
            row += 1;
        }
        board.set(x, row, SPECIAL_KIND);
    }
}
