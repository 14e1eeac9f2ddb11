//! Countdown projection consumed by the clock source

use serde::{Deserialize, Serialize};

/// The part of the cycle state that decides whether the clock should tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimerState {
    pub running: bool,
    pub remaining_seconds: u64,
}

impl TimerState {
    pub fn new(running: bool, remaining_seconds: u64) -> Self {
        Self {
            running,
            remaining_seconds,
        }
    }

    /// A stopped timer holding `remaining_seconds`
    pub fn paused(remaining_seconds: u64) -> Self {
        Self::new(false, remaining_seconds)
    }

    /// Whether a clock source should currently deliver ticks
    pub fn is_armed(&self) -> bool {
        self.running && self.remaining_seconds > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_armed_only_when_running_with_time_left() {
        assert!(TimerState::new(true, 3).is_armed());
        assert!(!TimerState::new(true, 0).is_armed());
        assert!(!TimerState::paused(3).is_armed());
        assert!(!TimerState::default().is_armed());
    }
}
