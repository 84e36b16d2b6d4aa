#[cfg(test)]
mod tests {
    use crate::collision::collides;
    use crate::components::Board;
    use crate::game::{BOARD_HEIGHT, BOARD_WIDTH};
    use crate::tests::test_utils::{i_piece, special_piece, square_piece};

    fn create_board() -> Board {
        Board::new(BOARD_WIDTH, BOARD_HEIGHT)
    }

    #[test]
    fn test_square_blocked_by_right_wall() {
        let board = create_board();
        let piece = square_piece(9, 0);
        assert!(collides(&board, &piece, 1, 0));
    }

    #[test]
    fn test_walls() {
        let board = create_board();
        assert!(collides(&board, &square_piece(0, 5), -1, 0));
        assert!(!collides(&board, &square_piece(0, 5), 1, 0));
        assert!(!collides(&board, &square_piece(8, 5), 0, 0));
        assert!(collides(&board, &square_piece(8, 5), 1, 0));
    }

    #[test]
    fn test_floor() {
        let board = create_board();
        let piece = square_piece(4, 18);
        assert!(!collides(&board, &piece, 0, 0));
        assert!(collides(&board, &piece, 0, 1));
    }

    #[test]
    fn test_rows_above_top_are_free() {
        let mut board = create_board();
        board.set(4, 0, 1);
        let piece = square_piece(4, -2);
        assert!(!collides(&board, &piece, 0, 0));
        assert!(collides(&board, &piece, 0, 1));
    }

    #[test]
    fn test_settled_cells_block_ordinary_piece() {
        let mut board = create_board();
        board.set(5, 10, 3);
        let piece = i_piece(2, 9);
        assert!(collides(&board, &piece, 0, 1));
        assert!(!collides(&board, &piece, -2, 1));
        assert!(!collides(&board, &i_piece(6, 9), 0, 1));
    }

    #[test]
    fn test_special_falls_to_last_row_only_by_merge() {
        let board = create_board();
        let piece = special_piece(5, 17);
        assert!(!collides(&board, &piece, 0, 1));

        // The last row always stops a phasing move
        let piece = special_piece(5, 18);
        assert!(collides(&board, &piece, 0, 1));
    }

    #[test]
    fn test_special_phases_through_settled_cells() {
        let mut board = create_board();
        for row in 10..19 {
            board.set(5, row, 2);
        }
        // Row 19 is still empty in column 5, so every row above can be entered
        let piece = special_piece(5, 8);
        assert!(!collides(&board, &piece, 0, 1));
        assert!(!collides(&board, &special_piece(5, 12), 0, 1));
        assert!(!collides(&board, &special_piece(5, 17), 0, 1));
        // The empty cell is in the last row, which can never be entered
        assert!(collides(&board, &special_piece(5, 18), 0, 1));
    }

    #[test]
    fn test_special_blocked_when_column_below_is_full() {
        let mut board = create_board();
        for row in 12..20 {
            board.set(3, row, 1);
        }
        let piece = special_piece(3, 10);
        assert!(collides(&board, &piece, 0, 1));
        assert!(!collides(&board, &special_piece(3, 9), 0, 1));
    }

    #[test]
    fn test_special_sideways_blocked_like_ordinary() {
        let mut board = create_board();
        board.set(6, 4, 1);
        let piece = special_piece(5, 4);
        assert!(collides(&board, &piece, 1, 0));
        assert!(!collides(&board, &piece, -1, 0));
        assert!(collides(&board, &special_piece(0, 4), -1, 0));
        assert!(collides(&board, &special_piece(9, 4), 1, 0));
    }

    #[test]
    fn test_special_stops_above_settled_floor() {
        let mut board = create_board();
        board.set(5, 19, 1);
        let mut piece = special_piece(5, 0);
        while !collides(&board, &piece, 0, 1) {
            piece.y += 1;
        }
        assert_eq!(piece.y, 17);
    }

    #[test]
    fn test_special_in_place_uses_occupancy() {
        let mut board = create_board();
        board.set(4, 0, 1);
        assert!(collides(&board, &special_piece(4, 0), 0, 0));
        assert!(!collides(&board, &special_piece(5, 0), 0, 0));
    }
}
