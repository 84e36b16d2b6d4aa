use bevy_ecs::prelude::*;
use log::{debug, info, trace};

use crate::PlayClock;
use crate::collision::collides;
use crate::components::{Board, GameState, Piece};
use crate::config::Settings;
use crate::events::{GameEvent, GameRecord, PendingEvents};
use crate::game::{HARD_DROP_POINTS, SOFT_DROP_POINTS, VICTORY_LEVEL};
use crate::merge::merge_piece;
use crate::progression::{drop_interval, level_for_score, score_for_clear};
use crate::scheduler::{Scheduler, TaskKind};
use crate::spawner::PieceSpawner;

/// Result of one attempted downward step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Nothing happened: no active piece, or the game is paused or finished.
    Idle,
    Moved,
    Landed,
}

fn push_event(world: &mut World, event: GameEvent) {
    world.resource_mut::<PendingEvents>().push(event);
}

// The current piece, if the session is accepting input
fn active_piece(world: &World) -> Option<Piece> {
    let state = world.resource::<GameState>();
    if state.accepts_input() {
        state.current.clone()
    } else {
        None
    }
}

fn set_current(world: &mut World, piece: Piece) {
    world.resource_mut::<GameState>().current = Some(piece);
}

/// Draws a piece for the session's difficulty and block family.
pub fn spawn_piece(world: &mut World) -> Piece {
    let (difficulty, family) = {
        let state = world.resource::<GameState>();
        (state.difficulty, state.family)
    };
    let cols = world.resource::<Settings>().cols;
    world
        .resource_mut::<PieceSpawner>()
        .spawn(difficulty, family, cols)
}

/// Moves the current piece `dx` columns. Blocked moves are ignored.
pub fn shift_piece(world: &mut World, dx: i32) -> bool {
    let Some(piece) = active_piece(world) else {
        return false;
    };

    if collides(world.resource::<Board>(), &piece, dx, 0) {
        trace!("Shift by {dx} blocked");
        return false;
    }

    set_current(world, piece.shifted(dx, 0));
    push_event(world, GameEvent::Moved);
    true
}

/// Turns the current piece clockwise in place. Blocked rotations leave the old
/// shape untouched; special pieces never rotate.
pub fn rotate_piece(world: &mut World) -> bool {
    let Some(piece) = active_piece(world) else {
        return false;
    };
    if piece.special {
        return false;
    }

    let rotated = piece.rotated();
    if collides(world.resource::<Board>(), &rotated, 0, 0) {
        trace!("Rotation blocked");
        return false;
    }

    set_current(world, rotated);
    push_event(world, GameEvent::Rotated);
    true
}

/// One gravity step: move down, or land the piece if it cannot.
pub fn step_down(world: &mut World) -> StepOutcome {
    let Some(piece) = active_piece(world) else {
        return StepOutcome::Idle;
    };

    if collides(world.resource::<Board>(), &piece, 0, 1) {
        land_piece(world);
        StepOutcome::Landed
    } else {
        set_current(world, piece.shifted(0, 1));
        StepOutcome::Moved
    }
}

/// A player-driven step down, worth a point for every row actually descended.
pub fn soft_drop(world: &mut World) -> StepOutcome {
    let outcome = step_down(world);
    if outcome == StepOutcome::Moved {
        world.resource_mut::<GameState>().score += SOFT_DROP_POINTS;
    }
    outcome
}

/// Drops the current piece as far as it goes, then lands it. Returns the rows
/// dropped, or `None` if there was nothing to drop.
pub fn hard_drop(world: &mut World) -> Option<u32> {
    let mut piece = active_piece(world)?;

    let mut rows = 0;
    {
        let board = world.resource::<Board>();
        while !collides(board, &piece, 0, 1) {
            piece.y += 1;
            rows += 1;
        }
    }

    debug!("Hard drop of {rows} rows");
    {
        let mut state = world.resource_mut::<GameState>();
        state.score += u64::from(rows) * HARD_DROP_POINTS;
        state.current = Some(piece);
    }

    land_piece(world);
    Some(rows)
}

/// Merges the current piece, clears lines, updates score and level, then brings
/// in the next piece. Ends the game on victory or when the new piece cannot spawn.
pub fn land_piece(world: &mut World) {
    let Some(piece) = world.resource_mut::<GameState>().current.take() else {
        return;
    };

    info!(
        "Locking piece type {} at ({}, {})",
        piece.kind, piece.x, piece.y
    );

    let lines_cleared = {
        let mut board = world.resource_mut::<Board>();
        merge_piece(&mut board, &piece);
        board.clear_full_lines()
    };
    push_event(
        world,
        GameEvent::Landed {
            special: piece.special,
        },
    );

    let (difficulty, old_level, new_level, points) = {
        let mut state = world.resource_mut::<GameState>();
        state.pieces_placed += 1;

        let points = score_for_clear(lines_cleared, state.level, state.difficulty);
        state.score += points;
        state.lines_cleared += u32::try_from(lines_cleared).unwrap_or(u32::MAX);

        let old_level = state.level;
        state.level = level_for_score(state.difficulty, state.score).max(old_level);
        (state.difficulty, old_level, state.level, points)
    };

    if lines_cleared > 0 {
        info!("Cleared {lines_cleared} lines for {points} points");
        push_event(
            world,
            GameEvent::LinesCleared {
                count: lines_cleared,
                points,
            },
        );
    }

    if new_level != old_level {
        info!("Level up: {old_level} -> {new_level}");
        push_event(world, GameEvent::LevelUp { level: new_level });

        if new_level >= VICTORY_LEVEL {
            finish(world, true);
            return;
        }

        // Replace the gravity task so the new speed takes effect immediately
        world
            .resource_mut::<Scheduler>()
            .schedule(TaskKind::Gravity, drop_interval(difficulty, new_level));
    }

    let fresh = spawn_piece(world);
    let current = {
        let mut state = world.resource_mut::<GameState>();
        let current = state.next.take();
        state.current = current.clone();
        state.next = Some(fresh);
        current
    };

    if let Some(current) = current {
        if collides(world.resource::<Board>(), &current, 0, 0) {
            finish(world, false);
        }
    }
}

/// Moves the session into its terminal state, stops every scheduled task and
/// emits the record of the game.
pub fn finish(world: &mut World, victory: bool) {
    let duration = world.resource::<PlayClock>().elapsed_secs();
    let record = {
        let mut state = world.resource_mut::<GameState>();
        if victory {
            state.is_victory = true;
        } else {
            state.is_game_over = true;
        }
        state.is_paused = false;
        state.is_dropping = false;

        GameRecord {
            difficulty: state.difficulty,
            family: state.family,
            score: state.score,
            level: state.level,
            is_victory: victory,
            duration,
        }
    };

    world.resource_mut::<Scheduler>().cancel_all();

    if victory {
        info!("Victory with {} points", record.score);
        push_event(world, GameEvent::Victory);
    } else {
        info!("Game over with {} points at level {}", record.score, record.level);
        push_event(world, GameEvent::GameOver);
    }
    push_event(world, GameEvent::Finished(record));
}
