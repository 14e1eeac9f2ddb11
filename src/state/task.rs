//! Task entity and its validated constructor input

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CycleError, CycleResult};

/// Stable identifier of a task, unique for the lifetime of an engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One named, timed unit of the cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub duration_seconds: u64,
    /// Set when the countdown for this task ran out while running
    pub completed: bool,
}

/// A task definition that passed validation but has no id yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    name: String,
    duration_seconds: u64,
}

impl NewTask {
    /// Validate a name and a duration in minutes.
    ///
    /// The name is trimmed; an empty result is rejected. Zero minutes, or a
    /// minute count that overflows when converted to seconds, is rejected.
    pub fn new(name: &str, duration_minutes: u64) -> CycleResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CycleError::InvalidName);
        }
        if duration_minutes == 0 {
            return Err(CycleError::InvalidDuration(duration_minutes));
        }
        let duration_seconds = duration_minutes
            .checked_mul(60)
            .ok_or(CycleError::InvalidDuration(duration_minutes))?;

        Ok(Self {
            name: name.to_string(),
            duration_seconds,
        })
    }

    /// Validate a task whose duration is already given in seconds
    pub fn from_seconds(name: &str, duration_seconds: u64) -> CycleResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CycleError::InvalidName);
        }
        if duration_seconds == 0 {
            return Err(CycleError::InvalidDuration(0));
        }
        Ok(Self {
            name: name.to_string(),
            duration_seconds,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn duration_seconds(&self) -> u64 {
        self.duration_seconds
    }

    pub(crate) fn into_task(self, id: TaskId) -> Task {
        Task {
            id,
            name: self.name,
            duration_seconds: self.duration_seconds,
            completed: false,
        }
    }
}

/// The three tasks a fresh cycle starts with when nothing else is supplied
pub fn default_tasks() -> Vec<NewTask> {
    [
        ("Morning routine", 5),
        ("Deep work 1", 25),
        ("Short break", 5),
    ]
    .into_iter()
    .filter_map(|(name, minutes)| NewTask::new(name, minutes).ok())
    .collect()
}
