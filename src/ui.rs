#![allow(
    // Allow truncation when casting board coordinates to u16 since they are bounds-checked first
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

use crate::app::Game;
use crate::components::{Board, Phase, Piece};
use crate::game::SPECIAL_KIND;
use crate::progression::{Difficulty, level_progress, speed_curve};
use crate::records::{RecordStore, format_duration, format_timestamp};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Gauge, Paragraph, Row, Table, Wrap},
};

// Each cell is 2 characters wide and 1 tall to look roughly square
const CELL_WIDTH: u16 = 2;

/// Which screen the frontend is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Game,
    History(HistoryView),
}

/// State of the match history screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HistoryView {
    /// Only show games at this difficulty, or all of them.
    pub filter: Option<Difficulty>,
    /// Waiting for the player to confirm clearing the history.
    pub confirm_clear: bool,
}

fn kind_color(kind: u8) -> Color {
    match kind {
        1 => Color::Cyan,
        2 => Color::Blue,
        3 => Color::LightYellow,
        4 => Color::Yellow,
        5 => Color::Green,
        6 => Color::Magenta,
        7 => Color::Red,
        SPECIAL_KIND => Color::White,
        _ => Color::DarkGray,
    }
}

fn to_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

/// Draws a read-only view of the game or the match history.
pub fn render(f: &mut Frame, game: &Game, history: &RecordStore, screen: &Screen) {
    match screen {
        Screen::Game => render_game(f, game, history),
        Screen::History(view) => render_history(f, history, view),
    }
}

fn render_game(f: &mut Frame, game: &Game, history: &RecordStore) {
    let board = game.board();
    let board_width = to_u16(board.width)
        .saturating_mul(CELL_WIDTH)
        .saturating_add(2); // +2 for borders
    let board_height = to_u16(board.height).saturating_add(2);
    let min_info_width = 24u16;

    if f.area().width < board_width.saturating_add(min_info_width)
        || f.area().height < board_height.saturating_add(2)
    {
        let warning_text = Paragraph::new(
            "Terminal too small!\nPlease resize your terminal\nto continue playing.",
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Phasefall"));
        f.render_widget(warning_text, centered_rect(50, 30, f.area()));
        return;
    }

    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(board_width), Constraint::Min(min_info_width)])
        .split(f.area());

    let game_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),            // Title
            Constraint::Length(board_height), // Game board
            Constraint::Fill(1),
        ])
        .split(main_layout[0]);

    let info_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Length(6), // Next piece
            Constraint::Length(6), // Stats
            Constraint::Length(1), // Level progress
            Constraint::Length(3), // Status
            Constraint::Min(9),    // Controls
        ])
        .split(main_layout[1]);

    let title = Paragraph::new("PHASEFALL")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, game_layout[0]);

    render_game_board(f, game, game_layout[1]);

    let info_title = Paragraph::new("INFO")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(info_title, info_layout[0]);

    render_next_piece(f, game.state().next.as_ref(), info_layout[1]);

    let state = game.state();
    let best = history
        .high_score(state.difficulty)
        .map_or(0, |record| record.game.score);
    let stats = format!(
        "Score: {}\nLevel: {}\nLines: {}\nDifficulty: {} ({})\nSpeed: {}ms  Best: {}",
        state.score,
        state.level,
        state.lines_cleared,
        state.difficulty.name(),
        state.family.name(),
        speed_curve(state.difficulty, state.level),
        best,
    );
    f.render_widget(
        Paragraph::new(stats).wrap(Wrap { trim: true }),
        info_layout[2],
    );

    let progress = Gauge::default()
        .gauge_style(Style::default().fg(Color::LightGreen))
        .ratio(level_progress(state.difficulty, state.score));
    f.render_widget(progress, info_layout[3]);

    let (status, color) = match game.phase() {
        Phase::Ready => ("Press S to start", Color::White),
        Phase::Running => ("", Color::White),
        Phase::Paused => ("PAUSED\nPress P to resume", Color::Yellow),
        Phase::GameOver => ("GAME OVER!\nPress S to play again", Color::Red),
        Phase::Victory => ("VICTORY!\nPress S to play again", Color::LightGreen),
    };
    f.render_widget(
        Paragraph::new(status)
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .wrap(Wrap { trim: true }),
        info_layout[4],
    );

    let controls = Paragraph::new(
        "Controls:\n\
        ←/→: Move left/right\n\
        ↑: Rotate\n\
        ↓: Fast drop\n\
        Space: Hard drop\n\
        P: Pause  S: Start  R: Reset\n\
        1/2/3: Difficulty  F: Blocks\n\
        V: Records  Q: Quit\n\
        ",
    )
    .block(Block::default().borders(Borders::TOP))
    .wrap(Wrap { trim: true });
    f.render_widget(controls, info_layout[5]);
}

fn render_game_board(f: &mut Frame, game: &Game, area: Rect) {
    let inner_area = Block::default().borders(Borders::ALL).inner(area);
    f.render_widget(Block::default().borders(Borders::ALL), area);

    let board = game.board();
    for (y, row) in board.cells.iter().enumerate() {
        for (x, &kind) in row.iter().enumerate() {
            if kind != 0 {
                draw_cell(f, inner_area, x as i32, y as i32, kind_color(kind), "█");
            }
        }
    }

    if let Some(piece) = &game.state().current {
        draw_piece(f, inner_area, board, piece);
    }
}

fn draw_piece(f: &mut Frame, area: Rect, board: &Board, piece: &Piece) {
    let color = kind_color(piece.kind);
    // Phasing pieces are drawn hollow so they stay visible over settled cells
    let symbol = if piece.special { "▒" } else { "█" };
    for (x, y) in piece.cells() {
        if board.in_bounds(x, y) {
            draw_cell(f, area, x, y, color, symbol);
        }
    }
}

fn draw_cell(f: &mut Frame, area: Rect, x: i32, y: i32, color: Color, symbol: &str) {
    let cell_x = area.left() + x as u16 * CELL_WIDTH;
    let cell_y = area.top() + y as u16;
    if cell_y >= area.bottom() {
        return;
    }
    for offset in 0..CELL_WIDTH {
        if cell_x + offset >= area.right() {
            break;
        }
        if let Some(cell) = f.buffer_mut().cell_mut((cell_x + offset, cell_y)) {
            cell.set_symbol(symbol);
            cell.set_fg(color);
            cell.set_bg(Color::Black);
        }
    }
}

fn render_next_piece(f: &mut Frame, next: Option<&Piece>, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Next");
    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let Some(piece) = next else {
        return;
    };
    let color = kind_color(piece.kind);
    for (row, col) in piece.shape.occupied() {
        draw_cell(f, inner_area, col as i32 + 1, row as i32, color, "█");
    }
}

fn render_history(f: &mut Frame, history: &RecordStore, view: &HistoryView) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title and victories
            Constraint::Min(3),    // Records
            Constraint::Length(3), // Keys
        ])
        .split(f.area());

    let filter_name = view.filter.map_or("All", Difficulty::name);
    let header = Paragraph::new(format!(
        "Filter: {filter_name}    Victories: {}",
        history.victory_count(view.filter)
    ))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title("Game Records"));
    f.render_widget(header, layout[0]);

    let records: Vec<_> = history
        .records()
        .iter()
        .filter(|r| view.filter.is_none_or(|d| r.game.difficulty == d))
        .collect();

    if records.is_empty() {
        let empty = Paragraph::new("No records yet")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(empty, layout[1]);
    } else {
        let rows = records.iter().map(|r| {
            let style = if r.game.is_victory {
                Style::default().fg(Color::LightGreen)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(format_timestamp(r.timestamp)),
                Cell::from(r.game.difficulty.name()),
                Cell::from(r.game.family.name()),
                Cell::from(r.game.score.to_string()),
                Cell::from(r.game.level.to_string()),
                Cell::from(format_duration(r.game.duration)),
                Cell::from(if r.game.is_victory { "Yes" } else { "" }),
            ])
            .style(style)
        });
        let table = Table::new(
            rows,
            [
                Constraint::Length(16),
                Constraint::Length(10),
                Constraint::Length(8),
                Constraint::Length(9),
                Constraint::Length(6),
                Constraint::Length(9),
                Constraint::Length(8),
            ],
        )
        .header(
            Row::new(vec![
                "Time", "Difficulty", "Blocks", "Score", "Level", "Duration", "Victory",
            ])
            .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(table, layout[1]);
    }

    let storage = history
        .path()
        .map_or_else(|| String::from("memory only"), |p| p.display().to_string());
    let footer = if view.confirm_clear {
        Paragraph::new("Clear all records? Y: Confirm  Any other key: Cancel")
            .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
    } else {
        Paragraph::new(format!(
            "A: All  1/2/3: Filter  C: Clear records  V/Esc: Back    Saved to: {storage}"
        ))
    };
    f.render_widget(
        footer
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::TOP)),
        layout[2],
    );
}

/// Helper function to create a centered rect using up certain percentage of the available rect
#[must_use]
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
