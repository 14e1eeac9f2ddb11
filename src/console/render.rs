//! Text and JSON rendering of cycle snapshots

use crate::{
    state::CycleSnapshot,
    utils::{format_progress, format_time},
};

const BAR_WIDTH: usize = 20;

/// One status line for the active task
pub fn render_status(snapshot: &CycleSnapshot) -> String {
    let Some(task) = snapshot.active_task() else {
        return "no task selected, add one with 'add <minutes> <name>'".to_string();
    };
    let marker = if snapshot.running { ">" } else { "||" };
    let percent = snapshot.progress_percent.unwrap_or(0.0);
    format!(
        "{} {} {} {} {:.0}%",
        marker,
        task.name,
        format_time(snapshot.remaining_seconds),
        format_progress(percent, BAR_WIDTH),
        percent
    )
}

/// The full task list, one row per task, active row marked with `*`
pub fn render_tasks(snapshot: &CycleSnapshot) -> String {
    if snapshot.tasks.is_empty() {
        return "the cycle is empty".to_string();
    }
    snapshot
        .tasks
        .iter()
        .enumerate()
        .map(|(index, task)| {
            format!(
                "{} {:>2} [{}] #{:<3} {:<30} {}",
                if snapshot.active_index == Some(index) { "*" } else { " " },
                index,
                if task.completed { "x" } else { " " },
                task.id.0,
                task.name,
                format_time(task.duration_seconds)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_json(snapshot: &CycleSnapshot) -> Result<String, serde_json::Error> {
    serde_json::to_string(snapshot)
}
