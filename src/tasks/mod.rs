//! Background tasks module
//! 
//! This module contains the clock source that drives the countdown.

pub mod cycle_timer;

// Re-export main functions
pub use cycle_timer::cycle_timer_task;
