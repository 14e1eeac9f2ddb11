//! Shared application state wrapping the cycle engine

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use crate::error::{CycleError, CycleResult};
use super::{CycleSnapshot, CycleState, NewTask, Task, TaskId, TickOutcome, TimerState};

/// Application state shared between the clock task and the terminal driver
#[derive(Debug)]
pub struct AppState {
    /// The engine itself; every mutation goes through `update_state`
    cycle: Arc<Mutex<CycleState>>,
    /// Clock period between two ticks
    pub tick_period: Duration,
    /// Last action tracking
    last_action: Arc<Mutex<Option<String>>>,
    last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Full snapshot after every state-changing operation
    pub state_change_tx: broadcast::Sender<CycleSnapshot>,
    /// Countdown projection, only sent when it actually changes
    pub timer_update_tx: watch::Sender<TimerState>,
    /// Keep the receiver alive to prevent channel closure
    _timer_update_rx: watch::Receiver<TimerState>,
}

impl AppState {
    /// Create the shared state around a cycle seeded with `tasks`
    pub fn new(tasks: Vec<NewTask>, tick_period: Duration) -> Self {
        let cycle = CycleState::with_tasks(tasks);
        let (state_change_tx, _) = broadcast::channel(100);
        let (timer_update_tx, timer_update_rx) = watch::channel(cycle.timer_state());

        Self {
            cycle: Arc::new(Mutex::new(cycle)),
            tick_period,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            state_change_tx,
            timer_update_tx,
            _timer_update_rx: timer_update_rx,
        }
    }

    fn lock_cycle(&self) -> CycleResult<MutexGuard<'_, CycleState>> {
        self.cycle
            .lock()
            .map_err(|e| CycleError::StateLock(e.to_string()))
    }

    /// Apply `updater` to the engine, then publish the new timer projection
    /// and snapshot. The lock is released before anything is sent.
    pub fn update_state<F, R>(&self, action: &str, updater: F) -> CycleResult<(R, CycleSnapshot)>
    where
        F: FnOnce(&mut CycleState) -> R,
    {
        let mut cycle = self.lock_cycle()?;
        let result = updater(&mut *cycle);
        let snapshot = cycle.snapshot();
        let timer_state = cycle.timer_state();
        drop(cycle);

        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        self.publish_timer(timer_state);

        // No subscribers is fine: nothing is rendering yet
        if self.state_change_tx.send(snapshot.clone()).is_err() {
            debug!("No listeners for state change after {}", action);
        }

        Ok((result, snapshot))
    }

    fn publish_timer(&self, timer_state: TimerState) {
        self.timer_update_tx.send_if_modified(|current| {
            if *current == timer_state {
                false
            } else {
                *current = timer_state;
                true
            }
        });
    }

    /// Start or pause the active task
    pub fn toggle_run(&self) -> CycleResult<CycleSnapshot> {
        let (running, snapshot) = self.update_state("toggle", CycleState::toggle_run)?;
        match running {
            Some(true) => info!("Timer started with {}s left", snapshot.remaining_seconds),
            Some(false) => info!("Timer paused with {}s left", snapshot.remaining_seconds),
            None => debug!("Toggle ignored, no active task"),
        }
        Ok(snapshot)
    }

    /// Deliver one clock tick
    pub fn tick(&self) -> CycleResult<(TickOutcome, CycleSnapshot)> {
        let (outcome, snapshot) = self.update_state("tick", CycleState::tick)?;
        if let TickOutcome::Completed { task, next_index } = &outcome {
            info!(task_id = %task.id, "Timer for \"{}\" finished", task.name);
            debug!("Advanced to task index {}", next_index);
        }
        Ok((outcome, snapshot))
    }

    /// Move to the next task without completing the current one
    pub fn skip(&self) -> CycleResult<CycleSnapshot> {
        let (next, snapshot) = self.update_state("skip", CycleState::skip)?;
        if let Some(next) = next {
            info!("Skipped to task index {}", next);
        }
        Ok(snapshot)
    }

    /// Stop and rewind the active task
    pub fn reset_active_task(&self) -> CycleResult<CycleSnapshot> {
        let (duration, snapshot) = self.update_state("reset-task", CycleState::reset_active_task)?;
        if let Some(duration) = duration {
            info!("Active task reset to {}s", duration);
        }
        Ok(snapshot)
    }

    /// Stop, clear completion flags and go back to the first task
    pub fn reset_cycle(&self) -> CycleResult<CycleSnapshot> {
        let ((), snapshot) = self.update_state("reset-cycle", CycleState::reset_cycle)?;
        info!("Cycle reset");
        Ok(snapshot)
    }

    /// Append a task. Invalid input is rejected without touching the state.
    pub fn add_task(&self, name: &str, duration_minutes: u64) -> CycleResult<(TaskId, CycleSnapshot)> {
        let task = NewTask::new(name, duration_minutes).map_err(|e| {
            warn!("Rejected new task: {}", e);
            e
        })?;
        let (id, snapshot) = self.update_state("add", |cycle| cycle.push(task))?;
        info!("Added task {} ({} min)", id, duration_minutes);
        Ok((id, snapshot))
    }

    /// Remove a task by id; `None` if it did not exist
    pub fn delete_task(&self, id: TaskId) -> CycleResult<(Option<Task>, CycleSnapshot)> {
        let (removed, snapshot) = self.update_state("delete", |cycle| cycle.delete_task(id))?;
        match &removed {
            Some(task) => info!("Deleted task {} \"{}\"", task.id, task.name),
            None => debug!("Delete ignored, no task with id {}", id),
        }
        Ok((removed, snapshot))
    }

    /// Make the task at `index` active
    pub fn select_task(&self, index: usize) -> CycleResult<CycleSnapshot> {
        let (selected, snapshot) = self.update_state("select", |cycle| cycle.select_task(index))?;
        selected?;
        info!("Selected task index {}", index);
        Ok(snapshot)
    }

    /// Get the current engine snapshot
    pub fn snapshot(&self) -> CycleResult<CycleSnapshot> {
        Ok(self.lock_cycle()?.snapshot())
    }

    /// Get the current countdown projection
    pub fn get_timer_state(&self) -> TimerState {
        *self.timer_update_tx.borrow()
    }

    /// Subscribe to countdown projection changes
    pub fn subscribe_timer(&self) -> watch::Receiver<TimerState> {
        self.timer_update_tx.subscribe()
    }

    /// Subscribe to full snapshots
    pub fn subscribe_changes(&self) -> broadcast::Receiver<CycleSnapshot> {
        self.state_change_tx.subscribe()
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(durations: &[u64]) -> AppState {
        let tasks = durations
            .iter()
            .enumerate()
            .map(|(i, secs)| NewTask::from_seconds(&format!("Task {i}"), *secs).unwrap())
            .collect();
        AppState::new(tasks, Duration::from_secs(1))
    }

    #[test]
    fn test_initial_timer_projection() {
        let state = state_with(&[5, 3]);
        assert_eq!(state.get_timer_state(), TimerState::paused(5));
    }

    #[test]
    fn test_operations_publish_timer_projection() {
        let state = state_with(&[5, 3]);
        state.toggle_run().unwrap();
        assert_eq!(state.get_timer_state(), TimerState::new(true, 5));
        state.tick().unwrap();
        assert_eq!(state.get_timer_state(), TimerState::new(true, 4));
        state.skip().unwrap();
        assert_eq!(state.get_timer_state(), TimerState::paused(3));
    }

    #[test]
    fn test_add_task_does_not_notify_timer_watchers() {
        let state = state_with(&[5]);
        let mut rx = state.subscribe_timer();
        rx.borrow_and_update();
        state.add_task("Extra", 1).unwrap();
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_invalid_add_is_rejected_without_change() {
        let state = state_with(&[5]);
        let err = state.add_task("   ", 5).unwrap_err();
        assert!(err.is_invalid_input());
        assert_eq!(state.snapshot().unwrap().tasks.len(), 1);
        assert_eq!(state.get_last_action(), (None, None));
    }

    #[test]
    fn test_select_out_of_range_is_reported() {
        let state = state_with(&[5]);
        assert_eq!(
            state.select_task(4).unwrap_err(),
            CycleError::IndexOutOfRange { index: 4, len: 1 }
        );
    }

    #[test]
    fn test_snapshots_are_broadcast() {
        let state = state_with(&[5, 3]);
        let mut rx = state.subscribe_changes();
        state.skip().unwrap();
        let snapshot = rx.try_recv().unwrap();
        assert_eq!(snapshot.active_index, Some(1));
    }

    #[test]
    fn test_last_action_is_tracked() {
        let state = state_with(&[5]);
        state.reset_cycle().unwrap();
        let (action, time) = state.get_last_action();
        assert_eq!(action.as_deref(), Some("reset-cycle"));
        assert!(time.is_some());
    }

    #[test]
    fn test_delete_reports_removed_task() {
        let state = state_with(&[5]);
        let id = state.snapshot().unwrap().tasks[0].id;
        let (removed, snapshot) = state.delete_task(id).unwrap();
        assert_eq!(removed.map(|t| t.id), Some(id));
        assert_eq!(snapshot.active_index, None);
        assert_eq!(state.get_timer_state(), TimerState::paused(0));
    }
}
