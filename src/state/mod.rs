//! State management module
//! 
//! This module contains the task cycle engine and the shared handle around it.

pub mod task;
pub mod cycle_state;
pub mod timer_state;
pub mod app_state;

// Re-export main types
pub use task::{default_tasks, NewTask, Task, TaskId};
pub use cycle_state::{CycleSnapshot, CycleState, TickOutcome};
pub use timer_state::TimerState;
pub use app_state::AppState;
