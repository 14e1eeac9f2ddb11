//! Configuration and CLI argument handling

use std::time::Duration;

use clap::Parser;

use crate::state::{default_tasks, NewTask};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "task-cycle")]
#[command(about = "Run a looping sequence of named, timed tasks")]
#[command(version = "1.0.0")]
pub struct Config {
    /// Task to put in the cycle, as NAME=MINUTES (repeatable, kept in order)
    #[arg(short = 'T', long = "task", value_name = "NAME=MINUTES", value_parser = parse_task_arg)]
    pub tasks: Vec<NewTask>,

    /// Start with an empty cycle instead of the default tasks
    #[arg(long, conflicts_with = "tasks")]
    pub empty: bool,

    /// Clock period in milliseconds
    #[arg(long, default_value = "1000", value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_millis: u64,

    /// Print state as JSON lines instead of text
    #[arg(long)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Tasks the cycle starts with
    pub fn initial_tasks(&self) -> Vec<NewTask> {
        if self.empty {
            Vec::new()
        } else if self.tasks.is_empty() {
            default_tasks()
        } else {
            self.tasks.clone()
        }
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_millis)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

/// Parse a `NAME=MINUTES` task argument; the last `=` separates the duration
fn parse_task_arg(value: &str) -> Result<NewTask, String> {
    let (name, minutes) = value
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=MINUTES, got '{}'", value))?;
    let minutes: u64 = minutes
        .trim()
        .parse()
        .map_err(|e| format!("invalid minutes '{}': {}", minutes, e))?;
    NewTask::new(name, minutes).map_err(|e| e.to_string())
}
