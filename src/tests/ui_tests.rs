#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use crate::app::Game;
    use crate::events::GameRecord;
    use crate::progression::Difficulty;
    use crate::records::RecordStore;
    use crate::shapes::ShapeFamily;
    use crate::tests::test_utils::{
        board_mut, create_started_game, create_test_game, set_current, special_piece, state_mut,
    };
    use crate::ui::{self, HistoryView, Screen, centered_rect};
    use ratatui::{backend::TestBackend, layout::Rect, prelude::*};

    // Helper function to create a test terminal
    fn create_test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
        let backend = TestBackend::new(width, height);
        Terminal::new(backend).unwrap()
    }

    fn draw(
        game: &Game,
        history: &RecordStore,
        screen: Screen,
        width: u16,
        height: u16,
    ) -> Terminal<TestBackend> {
        let mut terminal = create_test_terminal(width, height);
        terminal
            .draw(|f| ui::render(f, game, history, &screen))
            .unwrap();
        terminal
    }

    // Everything on screen, one line per terminal row
    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let area = buffer.area;
        (area.top()..area.bottom())
            .map(|y| {
                (area.left()..area.right())
                    .map(|x| buffer.cell((x, y)).map_or(" ", |cell| cell.symbol()))
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn symbol_at(terminal: &Terminal<TestBackend>, x: u16, y: u16) -> String {
        terminal
            .backend()
            .buffer()
            .cell((x, y))
            .map(|cell| cell.symbol().to_string())
            .unwrap_or_default()
    }

    fn record(difficulty: Difficulty, score: u64, is_victory: bool) -> GameRecord {
        GameRecord {
            difficulty,
            family: ShapeFamily::Tetromino,
            score,
            level: 4,
            is_victory,
            duration: 125,
        }
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 100);
        let centered = centered_rect(50, 40, area);

        assert_eq!(centered.width, 50);
        assert_eq!(centered.height, 40);
        assert_eq!(centered.x, 25); // (100 - 50) / 2
        assert_eq!(centered.y, 30); // (100 - 40) / 2
    }

    #[test]
    fn test_small_terminal_shows_warning() {
        let game = create_started_game();
        let terminal = draw(&game, &RecordStore::in_memory(), Screen::Game, 44, 20);

        let text = buffer_text(&terminal);
        assert!(text.contains("Terminal too small"));
        assert!(!text.contains("PHASEFALL"));
    }

    #[test]
    fn test_settled_cell_position() {
        let mut game = create_test_game();
        board_mut(&mut game).set(3, 19, 2);

        let terminal = draw(&game, &RecordStore::in_memory(), Screen::Game, 80, 30);

        // Board block starts below the 2-row title; cells are 2 columns wide inside the border
        assert_eq!(symbol_at(&terminal, 7, 22), "█");
        assert_eq!(symbol_at(&terminal, 8, 22), "█");
        assert_eq!(symbol_at(&terminal, 9, 22), " ");
        assert!(buffer_text(&terminal).contains("Press S to start"));
    }

    #[test]
    fn test_special_piece_drawn_hollow() {
        let mut game = create_started_game();
        set_current(&mut game, special_piece(5, 0));

        let terminal = draw(&game, &RecordStore::in_memory(), Screen::Game, 80, 30);

        assert_eq!(symbol_at(&terminal, 11, 3), "▒");
        assert_eq!(symbol_at(&terminal, 12, 3), "▒");
    }

    #[test]
    fn test_paused_banner() {
        let mut game = create_started_game();
        game.pause();

        let terminal = draw(&game, &RecordStore::in_memory(), Screen::Game, 80, 30);
        assert!(buffer_text(&terminal).contains("PAUSED"));
    }

    #[test]
    fn test_game_over_banner() {
        let mut game = create_started_game();
        state_mut(&mut game).is_game_over = true;

        let terminal = draw(&game, &RecordStore::in_memory(), Screen::Game, 80, 30);
        let text = buffer_text(&terminal);
        assert!(text.contains("GAME OVER!"));
        assert!(!text.contains("PAUSED"));
    }

    #[test]
    fn test_victory_banner() {
        let mut game = create_started_game();
        state_mut(&mut game).is_victory = true;

        let terminal = draw(&game, &RecordStore::in_memory(), Screen::Game, 80, 30);
        assert!(buffer_text(&terminal).contains("VICTORY!"));
    }

    #[test]
    fn test_best_score_from_history() {
        let game = create_test_game();
        let mut history = RecordStore::in_memory();
        history.save(record(Difficulty::Normal, 4321, false)).unwrap();
        history.save(record(Difficulty::Hard, 9999, false)).unwrap();

        let terminal = draw(&game, &history, Screen::Game, 80, 30);
        let text = buffer_text(&terminal);
        assert!(text.contains("Best: 4321"));
    }

    #[test]
    fn test_history_screen_lists_records() {
        let game = create_test_game();
        let mut history = RecordStore::in_memory();
        history.save(record(Difficulty::Easy, 100, true)).unwrap();
        history.save(record(Difficulty::Hard, 50, false)).unwrap();

        let terminal = draw(
            &game,
            &history,
            Screen::History(HistoryView::default()),
            100,
            20,
        );
        let text = buffer_text(&terminal);

        assert!(text.contains("Game Records"));
        assert!(text.contains("Filter: All"));
        assert!(text.contains("Victories: 1"));
        assert!(text.contains("Easy"));
        assert!(text.contains("Hard"));
        assert!(text.contains("2:05"));
        assert!(text.contains("memory only"));
    }

    #[test]
    fn test_history_screen_filter() {
        let game = create_test_game();
        let mut history = RecordStore::in_memory();
        history.save(record(Difficulty::Easy, 100, true)).unwrap();
        history.save(record(Difficulty::Hard, 50, false)).unwrap();

        let view = HistoryView {
            filter: Some(Difficulty::Hard),
            confirm_clear: false,
        };
        let terminal = draw(&game, &history, Screen::History(view), 100, 20);
        let text = buffer_text(&terminal);

        assert!(text.contains("Filter: Hard"));
        assert!(text.contains("Victories: 0"));
        assert!(!text.contains("Easy"));
    }

    #[test]
    fn test_history_screen_empty_and_confirm() {
        let game = create_test_game();
        let history = RecordStore::in_memory();

        let view = HistoryView {
            filter: None,
            confirm_clear: true,
        };
        let terminal = draw(&game, &history, Screen::History(view), 100, 20);
        let text = buffer_text(&terminal);

        assert!(text.contains("No records yet"));
        assert!(text.contains("Clear all records?"));
    }
}
