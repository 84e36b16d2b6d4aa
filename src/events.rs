#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

use crate::progression::Difficulty;
use crate::shapes::ShapeFamily;

/// Summary of a finished game, handed to the persistence side exactly once per game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub difficulty: Difficulty,
    pub family: ShapeFamily,
    pub score: u64,
    pub level: u32,
    pub is_victory: bool,
    /// Play time in whole seconds.
    pub duration: u64,
}

/// Discrete things that happened during one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    Started,
    Moved,
    Rotated,
    Landed { special: bool },
    LinesCleared { count: usize, points: u64 },
    LevelUp { level: u32 },
    Paused,
    Resumed,
    GameOver,
    Victory,
    Finished(GameRecord),
}

/// Side-effecting listener (sound, persistence, UI effects). Receives events after the
/// action that produced them has finished; it cannot reach back into the game.
pub trait GameObserver {
    fn on_event(&mut self, event: &GameEvent);
}

impl<F> GameObserver for F
where
    F: FnMut(&GameEvent),
{
    fn on_event(&mut self, event: &GameEvent) {
        self(event);
    }
}

// Events raised inside systems, waiting to be delivered to observers
#[derive(Resource, Debug, Default)]
pub struct PendingEvents {
    events: Vec<GameEvent>,
}

impl PendingEvents {
    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
