//! Task Cycle - a looping sequence of named, timed tasks
//! 
//! This is the main entry point for the task-cycle terminal application.

use std::sync::Arc;
use tokio::io::BufReader;
use tracing::{error, info};

use task_cycle::{
    config::Config,
    console::{print_changes_task, render_status, render_tasks, run_console},
    state::AppState,
    tasks::cycle_timer_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr so stdout only carries rendered state
    tracing_subscriber::fmt()
        .with_env_filter(format!("task_cycle={}", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting task-cycle v1.0.0");
    info!("Configuration: tick={}ms, json={}", config.tick_millis, config.json);

    let state = Arc::new(AppState::new(config.initial_tasks(), config.tick_period()));

    let snapshot = state.snapshot()?;
    println!("{}", render_tasks(&snapshot));
    println!("{}", render_status(&snapshot));

    // Start the clock source
    let timer_state = Arc::clone(&state);
    tokio::spawn(async move {
        cycle_timer_task(timer_state).await;
    });

    // Render every state change
    let printer_state = Arc::clone(&state);
    let json = config.json;
    tokio::spawn(async move {
        print_changes_task(printer_state, json).await;
    });

    let stdin = BufReader::new(tokio::io::stdin());

    tokio::select! {
        result = run_console(Arc::clone(&state), stdin) => {
            if let Err(e) = result {
                error!("Console error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Shutdown complete");
    Ok(())
}
