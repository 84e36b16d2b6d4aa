#![warn(clippy::all, clippy::pedantic)]

use std::collections::BTreeMap;
use std::time::Duration;

use bevy_ecs::prelude::*;
use log::debug;

/// Kinds of periodic work the game can have pending. Ordering is the order in
/// which tasks that fall due together are run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TaskKind {
    Gravity,
    FastDrop,
    RepeatLeft,
    RepeatRight,
    RepeatRotate,
}

#[derive(Debug, Clone, Copy)]
struct Task {
    interval: Duration,
    elapsed: Duration,
    generation: u64,
}

/// One firing of a task, stamped with the generation that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Firing {
    pub kind: TaskKind,
    generation: u64,
}

/// Named periodic tasks. At most one task per kind exists at any time:
/// scheduling a kind replaces whatever was scheduled for it before.
#[derive(Resource, Debug, Clone, Default)]
pub struct Scheduler {
    tasks: BTreeMap<TaskKind, Task>,
    next_generation: u64,
}

impl Scheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts `kind` with a fresh period, cancelling any previous task of that kind.
    ///
    /// # Panics
    ///
    /// Panics if `interval` is zero.
    pub fn schedule(&mut self, kind: TaskKind, interval: Duration) {
        assert!(!interval.is_zero(), "{kind:?} interval must be non-zero");
        self.next_generation += 1;
        let previous = self.tasks.insert(
            kind,
            Task {
                interval,
                elapsed: Duration::ZERO,
                generation: self.next_generation,
            },
        );
        if previous.is_some() {
            debug!("Rescheduled {kind:?} every {interval:?}");
        } else {
            debug!("Scheduled {kind:?} every {interval:?}");
        }
    }

    /// Returns whether a task of that kind was pending.
    pub fn cancel(&mut self, kind: TaskKind) -> bool {
        let cancelled = self.tasks.remove(&kind).is_some();
        if cancelled {
            debug!("Cancelled {kind:?}");
        }
        cancelled
    }

    pub fn cancel_all(&mut self) {
        self.tasks.clear();
    }

    /// Cancels everything driven by held inputs (fast drop and auto repeat),
    /// leaving gravity alone.
    pub fn cancel_input_tasks(&mut self) {
        self.tasks.retain(|kind, _| *kind == TaskKind::Gravity);
    }

    #[must_use]
    pub fn is_active(&self, kind: TaskKind) -> bool {
        self.tasks.contains_key(&kind)
    }

    #[must_use]
    pub fn interval(&self, kind: TaskKind) -> Option<Duration> {
        self.tasks.get(&kind).map(|task| task.interval)
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.tasks.len()
    }

    /// Whether `firing` still belongs to the task currently scheduled for its kind.
    /// Firings from a cancelled or replaced task are stale and must be skipped.
    #[must_use]
    pub fn is_current(&self, firing: Firing) -> bool {
        self.tasks
            .get(&firing.kind)
            .is_some_and(|task| task.generation == firing.generation)
    }

    /// Advances every task by `elapsed` and returns the firings that fell due, in
    /// kind order. A task that missed several periods fires once per period.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<Firing> {
        let mut due = Vec::new();
        for (&kind, task) in &mut self.tasks {
            task.elapsed += elapsed;
            while task.elapsed >= task.interval {
                task.elapsed -= task.interval;
                due.push(Firing {
                    kind,
                    generation: task.generation,
                });
            }
        }
        due
    }
}
