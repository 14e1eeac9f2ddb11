//! Task Cycle - a looping sequence of named, timed tasks
//! 
//! This library provides the task cycle engine (an ordered task list, the
//! active-task pointer, the countdown and the running flag), a one-second
//! clock source that drives it, and a small terminal driver.

pub mod config;
pub mod error;
pub mod state;
pub mod tasks;
pub mod console;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{CycleError, CycleResult};
pub use state::{AppState, CycleSnapshot, CycleState, NewTask, Task, TaskId, TickOutcome, TimerState};
pub use tasks::cycle_timer_task;
pub use utils::signals::shutdown_signal;
