#[cfg(test)]
mod tests {
    use crate::game::{BOARD_WIDTH, SPECIAL_KIND};
    use crate::progression::Difficulty;
    use crate::shapes::ShapeFamily;
    use crate::spawner::PieceSpawner;

    #[test]
    fn test_spawned_pieces_are_centered_on_top_row() {
        let mut spawner = PieceSpawner::with_seed(7);
        for _ in 0..200 {
            let piece = spawner.spawn(Difficulty::Normal, ShapeFamily::Tetromino, BOARD_WIDTH);
            assert_eq!(piece.y, 0);
            let expected = (BOARD_WIDTH - piece.shape.width()) / 2;
            assert_eq!(piece.x, i32::try_from(expected).unwrap());
        }
    }

    #[test]
    fn test_kinds_stay_in_family_range() {
        for family in ShapeFamily::ALL {
            let mut spawner = PieceSpawner::with_seed(11);
            for _ in 0..300 {
                let piece = spawner.spawn(Difficulty::Hard, family, BOARD_WIDTH);
                if piece.special {
                    assert_eq!(piece.kind, SPECIAL_KIND);
                    assert_eq!(piece.shape.cell_count(), 1);
                } else {
                    assert!((1..=family.type_count()).contains(&piece.kind));
                    assert_eq!(piece.shape.cell_count(), family.block_size());
                    assert_eq!(Some(piece.shape.clone()), family.shape(piece.kind));
                }
            }
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = PieceSpawner::with_seed(1234);
        let mut b = PieceSpawner::with_seed(1234);
        for _ in 0..50 {
            assert_eq!(
                a.spawn(Difficulty::Easy, ShapeFamily::Pentomino, BOARD_WIDTH),
                b.spawn(Difficulty::Easy, ShapeFamily::Pentomino, BOARD_WIDTH)
            );
        }
    }

    #[test]
    fn test_special_frequency_follows_difficulty() {
        let mut spawner = PieceSpawner::with_seed(99);
        let specials = (0..2000)
            .filter(|_| {
                spawner
                    .spawn(Difficulty::Easy, ShapeFamily::Tetromino, BOARD_WIDTH)
                    .special
            })
            .count();

        // Easy draws a special roughly one time in ten
        assert!((100..=300).contains(&specials), "got {specials} specials");
    }

    #[test]
    fn test_every_kind_appears() {
        let mut spawner = PieceSpawner::with_seed(5);
        let mut seen = [false; 7];
        for _ in 0..500 {
            let piece = spawner.spawn(Difficulty::Normal, ShapeFamily::Tetromino, BOARD_WIDTH);
            if !piece.special {
                seen[usize::from(piece.kind) - 1] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }
}
