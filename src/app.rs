#![warn(clippy::all, clippy::pedantic)]

use std::time::Duration;

use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::PlayClock;
use crate::components::{Board, GameState, Phase};
use crate::config::{Config, Settings};
use crate::events::{GameEvent, GameObserver, PendingEvents};
use crate::game::STARTING_LEVEL;
use crate::progression::{Difficulty, drop_interval};
use crate::scheduler::{Scheduler, TaskKind};
use crate::shapes::ShapeFamily;
use crate::spawner::PieceSpawner;
use crate::systems::{self, StepOutcome};

/// Inputs that auto-repeat while held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hold {
    Left,
    Right,
    Rotate,
}

impl Hold {
    fn task(self) -> TaskKind {
        match self {
            Hold::Left => TaskKind::RepeatLeft,
            Hold::Right => TaskKind::RepeatRight,
            Hold::Rotate => TaskKind::RepeatRotate,
        }
    }
}

/// The game state machine. Owns the world holding the session, the scheduled
/// tasks and the observers that hear about what happened.
///
/// Every mutating method is a no-op unless the game is in a state that allows it,
/// and events raised by a method are delivered before it returns.
pub struct Game {
    pub world: World,
    observers: Vec<Box<dyn GameObserver>>,
}

impl Game {
    /// # Panics
    ///
    /// Panics if `settings` describe a board or timings no game can run with.
    #[must_use]
    pub fn new(settings: Settings, difficulty: Difficulty, family: ShapeFamily) -> Self {
        Self::with_spawner(settings, difficulty, family, PieceSpawner::new())
    }

    /// Like [`Game::new`], with a deterministic piece sequence.
    #[must_use]
    pub fn with_seed(
        settings: Settings,
        difficulty: Difficulty,
        family: ShapeFamily,
        seed: u64,
    ) -> Self {
        Self::with_spawner(settings, difficulty, family, PieceSpawner::with_seed(seed))
    }

    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.settings(),
            config.game.difficulty,
            config.game.block_family,
        )
    }

    fn with_spawner(
        settings: Settings,
        difficulty: Difficulty,
        family: ShapeFamily,
        spawner: PieceSpawner,
    ) -> Self {
        settings.validate();
        for difficulty in Difficulty::ALL {
            difficulty.config().validate();
        }

        let mut world = World::new();
        world.insert_resource(settings);
        world.insert_resource(Board::new(settings.cols, settings.rows));
        world.insert_resource(GameState::new(difficulty, family));
        world.insert_resource(spawner);
        world.insert_resource(Scheduler::new());
        world.insert_resource(PendingEvents::default());
        world.insert_resource(PlayClock::new());

        Self {
            world,
            observers: Vec::new(),
        }
    }

    pub fn add_observer(&mut self, observer: impl GameObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        self.world.resource::<GameState>()
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        self.world.resource::<Board>()
    }

    #[must_use]
    pub fn scheduler(&self) -> &Scheduler {
        self.world.resource::<Scheduler>()
    }

    #[must_use]
    pub fn settings(&self) -> Settings {
        *self.world.resource::<Settings>()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state().phase()
    }

    /// Starts a fresh game with the current difficulty and family selection.
    pub fn start(&mut self) {
        self.world.resource_mut::<Scheduler>().cancel_all();
        self.world.resource_mut::<GameState>().reset();
        self.world.resource_mut::<Board>().clear();
        self.world.resource_mut::<PlayClock>().restart();

        let current = systems::spawn_piece(&mut self.world);
        let next = systems::spawn_piece(&mut self.world);
        let difficulty = {
            let mut state = self.world.resource_mut::<GameState>();
            state.current = Some(current);
            state.next = Some(next);
            state.difficulty
        };

        self.world
            .resource_mut::<Scheduler>()
            .schedule(TaskKind::Gravity, drop_interval(difficulty, STARTING_LEVEL));
        info!("Started a {} game", difficulty.name());
        self.world
            .resource_mut::<PendingEvents>()
            .push(GameEvent::Started);
        self.dispatch();
    }

    /// Abandons the current game and returns to `Ready`. Only the difficulty and
    /// family selection survive.
    pub fn reset(&mut self) {
        self.world.resource_mut::<Scheduler>().cancel_all();
        self.world.resource_mut::<GameState>().reset();
        self.world.resource_mut::<Board>().clear();
        self.world.resource_mut::<PendingEvents>().drain();
        info!("Game reset");
    }

    /// One gravity step, as fired by the drop timer.
    pub fn tick(&mut self) -> StepOutcome {
        let outcome = systems::step_down(&mut self.world);
        self.dispatch();
        outcome
    }

    pub fn move_left(&mut self) -> bool {
        let moved = systems::shift_piece(&mut self.world, -1);
        self.dispatch();
        moved
    }

    pub fn move_right(&mut self) -> bool {
        let moved = systems::shift_piece(&mut self.world, 1);
        self.dispatch();
        moved
    }

    pub fn rotate(&mut self) -> bool {
        let rotated = systems::rotate_piece(&mut self.world);
        self.dispatch();
        rotated
    }

    /// A single soft-drop step.
    pub fn soft_drop(&mut self) -> StepOutcome {
        let outcome = systems::soft_drop(&mut self.world);
        self.dispatch();
        outcome
    }

    pub fn hard_drop(&mut self) -> Option<u32> {
        let rows = systems::hard_drop(&mut self.world);
        self.dispatch();
        rows
    }

    /// Begins the repeating soft drop used while the down input is held.
    pub fn start_fast_drop(&mut self) {
        if !self.state().accepts_input() || self.state().is_dropping {
            return;
        }
        let interval = self.settings().fast_drop_interval;
        self.world.resource_mut::<GameState>().is_dropping = true;
        self.world
            .resource_mut::<Scheduler>()
            .schedule(TaskKind::FastDrop, interval);
    }

    pub fn stop_fast_drop(&mut self) {
        self.world.resource_mut::<Scheduler>().cancel(TaskKind::FastDrop);
        self.world.resource_mut::<GameState>().is_dropping = false;
    }

    /// Performs the held action once and keeps repeating it until released.
    pub fn press(&mut self, hold: Hold) {
        if !self.state().accepts_input() {
            return;
        }
        let settings = self.settings();
        let interval = match hold {
            Hold::Left | Hold::Right => settings.move_repeat_interval,
            Hold::Rotate => settings.rotate_repeat_interval,
        };
        self.world
            .resource_mut::<Scheduler>()
            .schedule(hold.task(), interval);
        self.run_hold(hold);
        self.dispatch();
    }

    pub fn release(&mut self, hold: Hold) {
        self.world.resource_mut::<Scheduler>().cancel(hold.task());
    }

    /// Freezes a running game. Held inputs and fast drop stop with it.
    pub fn pause(&mut self) {
        if self.phase() != Phase::Running {
            return;
        }
        self.world.resource_mut::<Scheduler>().cancel_input_tasks();
        {
            let mut state = self.world.resource_mut::<GameState>();
            state.is_paused = true;
            state.is_dropping = false;
        }
        debug!("Paused");
        self.world
            .resource_mut::<PendingEvents>()
            .push(GameEvent::Paused);
        self.dispatch();
    }

    pub fn resume(&mut self) {
        if self.phase() != Phase::Paused {
            return;
        }
        self.world.resource_mut::<GameState>().is_paused = false;
        debug!("Resumed");
        self.world
            .resource_mut::<PendingEvents>()
            .push(GameEvent::Resumed);
        self.dispatch();
    }

    pub fn toggle_pause(&mut self) {
        match self.phase() {
            Phase::Running => self.pause(),
            Phase::Paused => self.resume(),
            _ => {}
        }
    }

    /// Changes the difficulty for the next game. Ignored while a game is in progress.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> bool {
        if matches!(self.phase(), Phase::Running | Phase::Paused) {
            return false;
        }
        self.world.resource_mut::<GameState>().difficulty = difficulty;
        true
    }

    /// Changes the block family for the next game. Ignored while a game is in progress.
    pub fn set_family(&mut self, family: ShapeFamily) -> bool {
        if matches!(self.phase(), Phase::Running | Phase::Paused) {
            return false;
        }
        self.world.resource_mut::<GameState>().family = family;
        true
    }

    /// Advances the scheduled tasks by `elapsed` and runs those that fell due.
    /// Firings of tasks cancelled or replaced along the way are skipped.
    pub fn update(&mut self, elapsed: Duration) {
        let firings = self.world.resource_mut::<Scheduler>().advance(elapsed);
        for firing in firings {
            if !self.world.resource::<Scheduler>().is_current(firing) {
                continue;
            }
            match firing.kind {
                TaskKind::Gravity => {
                    systems::step_down(&mut self.world);
                }
                TaskKind::FastDrop => {
                    systems::soft_drop(&mut self.world);
                }
                TaskKind::RepeatLeft => self.run_hold(Hold::Left),
                TaskKind::RepeatRight => self.run_hold(Hold::Right),
                TaskKind::RepeatRotate => self.run_hold(Hold::Rotate),
            }
        }
        self.dispatch();
    }

    fn run_hold(&mut self, hold: Hold) {
        match hold {
            Hold::Left => {
                systems::shift_piece(&mut self.world, -1);
            }
            Hold::Right => {
                systems::shift_piece(&mut self.world, 1);
            }
            Hold::Rotate => {
                systems::rotate_piece(&mut self.world);
            }
        }
    }

    // Deliver buffered events to every observer
    fn dispatch(&mut self) {
        let events = self.world.resource_mut::<PendingEvents>().drain();
        for event in &events {
            for observer in &mut self.observers {
                observer.on_event(event);
            }
        }
    }
}
