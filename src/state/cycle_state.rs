//! The task cycle state machine
//!
//! `CycleState` owns the task list, the active-task pointer, the countdown
//! and the running flag. Every mutation goes through one of its operations,
//! which keep the following invariants:
//!
//! - `active_index` is `Some(i)` with `i < tasks.len()` whenever the list is
//!   non-empty, and `None` when it is empty.
//! - Whenever the active task changes, the run stops and `remaining_seconds`
//!   is reset to the new active task's full duration.
//! - `remaining_seconds` never goes below zero.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{
    task::{NewTask, Task, TaskId},
    timer_state::TimerState,
};
use crate::error::{CycleError, CycleResult};

/// Result of delivering one clock tick to the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing was running, the tick was ignored
    Idle,
    /// The countdown moved down by one second
    Counted { remaining_seconds: u64 },
    /// The countdown reached zero: `task` is now completed and the cycle
    /// advanced to `next_index` without starting it
    Completed { task: Task, next_index: usize },
}

/// Read-only projection of the engine handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleSnapshot {
    pub tasks: Vec<Task>,
    pub active_index: Option<usize>,
    pub remaining_seconds: u64,
    pub running: bool,
    pub progress_percent: Option<f64>,
}

impl CycleSnapshot {
    pub fn active_task(&self) -> Option<&Task> {
        self.active_index.and_then(|index| self.tasks.get(index))
    }
}

#[derive(Debug, Clone, Default)]
pub struct CycleState {
    tasks: Vec<Task>,
    active_index: Option<usize>,
    remaining_seconds: u64,
    running: bool,
    last_id: u64,
}

impl CycleState {
    /// Create an engine with an empty task list
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine seeded with `tasks` in order; the first one is active
    pub fn with_tasks(tasks: impl IntoIterator<Item = NewTask>) -> Self {
        let mut state = Self::new();
        for task in tasks {
            state.push(task);
        }
        state
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    pub fn active_task(&self) -> Option<&Task> {
        self.active_index.and_then(|index| self.tasks.get(index))
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn timer_state(&self) -> TimerState {
        TimerState::new(self.running, self.remaining_seconds)
    }

    /// Share of the active task already elapsed, from 0 to 100
    pub fn progress_percent(&self) -> Option<f64> {
        let task = self.active_task()?;
        let elapsed = task.duration_seconds.saturating_sub(self.remaining_seconds);
        Some(elapsed as f64 / task.duration_seconds as f64 * 100.0)
    }

    pub fn snapshot(&self) -> CycleSnapshot {
        CycleSnapshot {
            tasks: self.tasks.clone(),
            active_index: self.active_index,
            remaining_seconds: self.remaining_seconds,
            running: self.running,
            progress_percent: self.progress_percent(),
        }
    }

    /// Start or pause the countdown. Returns the new running flag, or `None`
    /// when there is no active task.
    pub fn toggle_run(&mut self) -> Option<bool> {
        if self.active_index.is_none() {
            debug!("Ignoring toggle: task list is empty");
            return None;
        }
        self.running = !self.running;
        Some(self.running)
    }

    /// Count down one second of the running task.
    ///
    /// On reaching zero the task is marked completed and the cycle advances,
    /// wrapping to the first task. The next task is left stopped.
    pub fn tick(&mut self) -> TickOutcome {
        let Some(index) = self.active_index else {
            return TickOutcome::Idle;
        };
        if !self.running || self.remaining_seconds == 0 {
            return TickOutcome::Idle;
        }

        self.remaining_seconds -= 1;
        if self.remaining_seconds > 0 {
            return TickOutcome::Counted {
                remaining_seconds: self.remaining_seconds,
            };
        }

        let Some(task) = self.tasks.get_mut(index) else {
            return TickOutcome::Idle;
        };
        task.completed = true;
        let task = task.clone();

        let next_index = self.next_index(index);
        self.activate(next_index);
        TickOutcome::Completed { task, next_index }
    }

    /// Move to the next task without completing the current one.
    /// Returns the new active index.
    pub fn skip(&mut self) -> Option<usize> {
        let Some(index) = self.active_index else {
            debug!("Ignoring skip: task list is empty");
            return None;
        };
        let next_index = self.next_index(index);
        self.activate(next_index);
        Some(next_index)
    }

    /// Stop and rewind the active task's countdown; its completed flag stays
    pub fn reset_active_task(&mut self) -> Option<u64> {
        self.running = false;
        let duration = self.active_task()?.duration_seconds;
        self.remaining_seconds = duration;
        Some(duration)
    }

    /// Stop, clear every completed flag and go back to the first task
    pub fn reset_cycle(&mut self) {
        self.running = false;
        for task in &mut self.tasks {
            task.completed = false;
        }
        if !self.tasks.is_empty() {
            self.activate(0);
        }
    }

    /// Append a task. The run and the countdown are untouched unless the
    /// list was empty, in which case the new task becomes active.
    pub fn add_task(&mut self, name: &str, duration_minutes: u64) -> CycleResult<TaskId> {
        let task = NewTask::new(name, duration_minutes)?;
        Ok(self.push(task))
    }

    /// Append an already validated task
    pub fn push(&mut self, task: NewTask) -> TaskId {
        self.last_id += 1;
        let id = TaskId(self.last_id);
        self.tasks.push(task.into_task(id));
        if self.active_index.is_none() {
            self.activate(0);
        }
        id
    }

    /// Remove the task with `id`, returning it, or `None` if no such task.
    ///
    /// The active index is not shifted when an earlier task is removed, so
    /// the task under the pointer changes. That counts as an active-task
    /// change: the run stops and the countdown is resynchronized.
    pub fn delete_task(&mut self, id: TaskId) -> Option<Task> {
        let position = self.tasks.iter().position(|task| task.id == id)?;
        let removed = self.tasks.remove(position);

        if self.tasks.is_empty() {
            self.active_index = None;
            self.remaining_seconds = 0;
            self.running = false;
            return Some(removed);
        }

        if let Some(active) = self.active_index {
            if active >= self.tasks.len() {
                self.activate(0);
            } else if position <= active {
                if position < active {
                    warn!(
                        "Deleted task {} ahead of the active slot; active index {} now points at task {}",
                        removed.id, active, self.tasks[active].id
                    );
                }
                self.activate(active);
            }
        }

        Some(removed)
    }

    /// Make the task at `index` active. Selecting the current task only pauses.
    pub fn select_task(&mut self, index: usize) -> CycleResult<()> {
        if index >= self.tasks.len() {
            return Err(CycleError::IndexOutOfRange {
                index,
                len: self.tasks.len(),
            });
        }
        self.running = false;
        if self.active_index != Some(index) {
            self.activate(index);
        }
        Ok(())
    }

    fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.tasks.len().max(1)
    }

    fn activate(&mut self, index: usize) {
        self.running = false;
        match self.tasks.get(index) {
            Some(task) => {
                self.active_index = Some(index);
                self.remaining_seconds = task.duration_seconds;
            }
            None => {
                self.active_index = None;
                self.remaining_seconds = 0;
            }
        }
    }
}
