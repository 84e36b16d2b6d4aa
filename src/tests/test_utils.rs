use std::cell::RefCell;
use std::rc::Rc;

use crate::app::Game;
use crate::components::{Board, GameState, Piece};
use crate::config::Settings;
use crate::events::GameEvent;
use crate::game::SPECIAL_KIND;
use crate::progression::Difficulty;
use crate::shapes::{Shape, ShapeFamily};

// Seeded game on the default 20x10 board, still in Ready
#[must_use]
pub fn create_test_game() -> Game {
    Game::with_seed(
        Settings::default(),
        Difficulty::Normal,
        ShapeFamily::Tetromino,
        42,
    )
}

// Seeded game that has been started and is Running
#[must_use]
pub fn create_started_game() -> Game {
    let mut game = create_test_game();
    game.start();
    game
}

#[must_use]
pub fn square_piece(x: i32, y: i32) -> Piece {
    Piece::new(4, ShapeFamily::Tetromino.shape(4).unwrap(), x, y, false)
}

#[must_use]
pub fn i_piece(x: i32, y: i32) -> Piece {
    Piece::new(1, ShapeFamily::Tetromino.shape(1).unwrap(), x, y, false)
}

#[must_use]
pub fn special_piece(x: i32, y: i32) -> Piece {
    Piece::new(SPECIAL_KIND, Shape::special(), x, y, true)
}

// Fill a whole row with one shape type
pub fn fill_row(board: &mut Board, row: usize, kind: u8) {
    board.cells[row].fill(kind);
}

// Fill a row leaving the listed columns empty
pub fn fill_row_except(board: &mut Board, row: usize, gaps: &[usize], kind: u8) {
    for col in 0..board.width {
        board.cells[row][col] = if gaps.contains(&col) { 0 } else { kind };
    }
}

pub fn set_current(game: &mut Game, piece: Piece) {
    game.world.resource_mut::<GameState>().current = Some(piece);
}

pub fn set_next(game: &mut Game, piece: Piece) {
    game.world.resource_mut::<GameState>().next = Some(piece);
}

pub fn board_mut(game: &mut Game) -> bevy_ecs::world::Mut<'_, Board> {
    game.world.resource_mut::<Board>()
}

pub fn state_mut(game: &mut Game) -> bevy_ecs::world::Mut<'_, GameState> {
    game.world.resource_mut::<GameState>()
}

// Collect every event the game delivers from now on
pub fn record_events(game: &mut Game) -> Rc<RefCell<Vec<GameEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    game.add_observer(move |event: &GameEvent| sink.borrow_mut().push(event.clone()));
    events
}
