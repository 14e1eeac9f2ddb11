use std::{sync::Arc, time::Duration};

use task_cycle::{cycle_timer_task, AppState, NewTask};
use tokio::time::sleep;

fn start(tasks: &[(&str, u64)]) -> (Arc<AppState>, tokio::task::JoinHandle<()>) {
    let tasks = tasks
        .iter()
        .map(|(name, secs)| NewTask::from_seconds(name, *secs).unwrap())
        .collect();
    let state = Arc::new(AppState::new(tasks, Duration::from_secs(1)));
    let handle = tokio::spawn(cycle_timer_task(Arc::clone(&state)));
    (state, handle)
}

#[tokio::test(start_paused = true)]
async fn test_clock_runs_task_to_completion_and_stops() {
    let (state, handle) = start(&[("A", 5), ("B", 3)]);
    state.toggle_run().unwrap();

    sleep(Duration::from_millis(5500)).await;
    let snapshot = state.snapshot().unwrap();
    assert!(snapshot.tasks[0].completed);
    assert_eq!(snapshot.active_index, Some(1));
    assert_eq!(snapshot.remaining_seconds, 3);
    assert!(!snapshot.running);

    // The next task is not started automatically
    sleep(Duration::from_secs(10)).await;
    assert_eq!(state.snapshot().unwrap().remaining_seconds, 3);

    handle.abort();
}

#[tokio::test(start_paused = true)]
async fn test_pause_halts_ticking_and_resume_rearms() {
    let (state, handle) = start(&[("A", 10)]);
    state.toggle_run().unwrap();

    sleep(Duration::from_millis(2500)).await;
    assert_eq!(state.snapshot().unwrap().remaining_seconds, 8);

    state.toggle_run().unwrap();
    sleep(Duration::from_secs(5)).await;
    assert_eq!(state.snapshot().unwrap().remaining_seconds, 8);

    state.toggle_run().unwrap();
    sleep(Duration::from_millis(1500)).await;
    assert_eq!(state.snapshot().unwrap().remaining_seconds, 7);

    handle.abort();
}

#[tokio::test(start_paused = true)]
async fn test_skip_while_running_disarms_clock() {
    let (state, handle) = start(&[("A", 10), ("B", 4)]);
    state.toggle_run().unwrap();
    sleep(Duration::from_millis(1500)).await;

    state.skip().unwrap();
    sleep(Duration::from_secs(3)).await;
    let snapshot = state.snapshot().unwrap();
    assert_eq!(snapshot.active_index, Some(1));
    assert_eq!(snapshot.remaining_seconds, 4);
    assert!(!snapshot.tasks[0].completed);

    handle.abort();
}

#[tokio::test(start_paused = true)]
async fn test_adding_task_does_not_disturb_running_clock() {
    let (state, handle) = start(&[("A", 10)]);
    state.toggle_run().unwrap();
    sleep(Duration::from_millis(2500)).await;
    state.add_task("B", 1).unwrap();
    sleep(Duration::from_secs(1)).await;
    let snapshot = state.snapshot().unwrap();
    assert_eq!(snapshot.remaining_seconds, 7);
    assert!(snapshot.running);

    handle.abort();
}

#[tokio::test(start_paused = true)]
async fn test_clock_survives_poisoned_state() {
    let (state, handle) = start(&[("A", 10)]);
    state.toggle_run().unwrap();

    let poisoned = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let _ = state.update_state("poison", |_| panic!("poison cycle lock"));
    }));
    assert!(poisoned.is_err());

    sleep(Duration::from_secs(5)).await;
    assert!(state.snapshot().is_err());
    assert!(state.get_timer_state().is_armed());
    assert!(!handle.is_finished());

    handle.abort();
}
