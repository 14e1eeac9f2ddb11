//! Error types for the task cycle engine

use thiserror::Error;

/// Errors returned by engine operations
///
/// Every variant except `StateLock` is a validation failure: the operation
/// was rejected and the engine state is unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CycleError {
    /// Task name is empty after trimming whitespace
    #[error("invalid input: task name must not be empty")]
    InvalidName,

    /// Task duration is zero or too large to express in seconds
    #[error("invalid input: duration must be a positive number of minutes, got {0}")]
    InvalidDuration(u64),

    /// Task index does not point into the current list
    #[error("invalid input: task index {index} is out of range for {len} tasks")]
    IndexOutOfRange { index: usize, len: usize },

    /// Shared engine state could not be locked
    #[error("failed to lock cycle state: {0}")]
    StateLock(String),
}

impl CycleError {
    /// Whether this error is a rejected user input rather than an internal failure
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, Self::StateLock(_))
    }
}

/// Result alias used across the crate
pub type CycleResult<T> = Result<T, CycleError>;
