//! Terminal driver
//!
//! Reads line commands from stdin, forwards them to the engine and prints
//! the resulting state. It holds no state of its own.

pub mod command;
pub mod render;

use std::sync::Arc;
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt},
    sync::broadcast::error::RecvError,
};
use tracing::{info, warn};

use crate::{
    error::CycleResult,
    state::{AppState, CycleSnapshot},
};
pub use command::{Command, HELP};
pub use render::{render_json, render_status, render_tasks};

/// What the driver should do after a command was applied
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// The state changed; the change printer will show it
    Applied(CycleSnapshot),
    /// Text to print as is
    Message(String),
    Quit,
}

/// Apply one command to the engine
pub fn dispatch(state: &AppState, command: Command) -> CycleResult<Reply> {
    let reply = match command {
        Command::Toggle => Reply::Applied(state.toggle_run()?),
        Command::Skip => Reply::Applied(state.skip()?),
        Command::ResetTask => Reply::Applied(state.reset_active_task()?),
        Command::ResetCycle => Reply::Applied(state.reset_cycle()?),
        Command::Add { name, minutes } => {
            let (id, _) = state.add_task(&name, minutes)?;
            Reply::Message(format!("added task #{}", id))
        }
        Command::Delete(id) => match state.delete_task(id)? {
            (Some(task), _) => Reply::Message(format!("deleted task #{} {}", task.id, task.name)),
            (None, _) => Reply::Message(format!("no task with id {}", id)),
        },
        Command::Select(index) => Reply::Applied(state.select_task(index)?),
        Command::Status => {
            let snapshot = state.snapshot()?;
            Reply::Message(format!(
                "{}\n{}",
                render_tasks(&snapshot),
                render_status(&snapshot)
            ))
        }
        Command::Help => Reply::Message(HELP.to_string()),
        Command::Quit => Reply::Quit,
    };
    Ok(reply)
}

/// Read commands from `input` until EOF or `quit`
pub async fn run_console<R>(state: Arc<AppState>, input: R) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    info!("Console ready, type 'help' for commands");
    let mut lines = input.lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match dispatch(&state, command) {
            Ok(Reply::Applied(_)) => {}
            Ok(Reply::Message(text)) => println!("{}", text),
            Ok(Reply::Quit) => break,
            Err(e) if e.is_invalid_input() => println!("{}", e),
            Err(e) => warn!("Command failed: {}", e),
        }
    }

    info!("Console closed");
    Ok(())
}

/// Print every published snapshot, as a status line or as JSON
pub async fn print_changes_task(state: Arc<AppState>, json: bool) {
    let mut changes = state.subscribe_changes();

    loop {
        match changes.recv().await {
            Ok(snapshot) => {
                if json {
                    match render_json(&snapshot) {
                        Ok(line) => println!("{}", line),
                        Err(e) => warn!("Failed to serialize snapshot: {}", e),
                    }
                } else {
                    println!("{}", render_status(&snapshot));
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!("Renderer lagged, skipped {} snapshots", skipped);
            }
            Err(RecvError::Closed) => break,
        }
    }
}
