//! One-second clock source driving the cycle countdown

use std::sync::Arc;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::{
    error::CycleResult,
    state::{AppState, CycleSnapshot, TickOutcome, TimerState},
};

/// Background task that ticks the engine while its countdown is armed.
///
/// The clock is armed only while the cycle is running with time left. Any
/// timer change it did not cause itself (pause, skip, reset, selection,
/// deletion) disarms it; it re-arms with a fresh full period on restart.
pub async fn cycle_timer_task(state: Arc<AppState>) {
    info!("Starting cycle timer task");

    let mut timer_rx = state.subscribe_timer();

    loop {
        let timer_state = *timer_rx.borrow_and_update();

        if !timer_state.is_armed() {
            debug!(
                "Clock disarmed: running={}, remaining={}s",
                timer_state.running, timer_state.remaining_seconds
            );
            if timer_rx.changed().await.is_err() {
                info!("Timer channel closed, stopping cycle timer task");
                return;
            }
            continue;
        }

        debug!("Clock armed with {}s remaining", timer_state.remaining_seconds);
        let period = state.tick_period;
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let result = state.tick();
                    match &result {
                        Ok((TickOutcome::Counted { remaining_seconds }, _)) => {
                            debug!("Tick, {}s remaining", remaining_seconds);
                        }
                        Ok((TickOutcome::Completed { next_index, .. }, _)) => {
                            debug!("Countdown finished, task index {} waits for start", next_index);
                        }
                        Ok((TickOutcome::Idle, _)) => {
                            debug!("Tick arrived after the countdown stopped");
                        }
                        Err(e) => {
                            error!("Failed to tick cycle state: {}", e);
                        }
                    }

                    // Mark our own update as seen; re-check in case something
                    // else changed the timer in between
                    let timer_state = *timer_rx.borrow_and_update();
                    if keep_ticking(&result, timer_state) {
                        continue;
                    }

                    // The projection is stale after a failed tick; hold until it changes
                    if result.is_err() && timer_rx.changed().await.is_err() {
                        info!("Timer channel closed, stopping cycle timer task");
                        return;
                    }
                    break;
                }

                changed = timer_rx.changed() => {
                    if changed.is_err() {
                        info!("Timer channel closed, stopping cycle timer task");
                        return;
                    }
                    debug!("Timer state changed, re-arming clock");
                    break;
                }
            }
        }
    }
}

/// Whether the clock keeps its interval after a tick attempt
fn keep_ticking(result: &CycleResult<(TickOutcome, CycleSnapshot)>, timer_state: TimerState) -> bool {
    result.is_ok() && timer_state.is_armed()
}
