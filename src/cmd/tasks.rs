//! Task listing command.

use anyhow::Result;
use std::path::Path;

use legion_board::board::models::{ProjectId, TaskStatus};
use legion_board::config::CliOverrides;

use super::connect;

pub async fn cmd_tasks(
    project_dir: &Path,
    overrides: CliOverrides,
    project: Option<ProjectId>,
    status: Option<TaskStatus>,
) -> Result<()> {
    let session = connect(project_dir, overrides)?;
    session.open_project(project).await?;
    let board = &session.board;

    let tasks = match status {
        Some(status) => board.tasks_by_status(status)?,
        None => board.tasks()?,
    };

    if tasks.is_empty() {
        println!("No tasks found.");
        return Ok(());
    }

    println!("{:<10} {:<12} {:<9} Title", "Key", "Status", "Priority");
    println!("{:<10} {:<12} {:<9} -----", "---", "------", "--------");
    for task in &tasks {
        println!(
            "{:<10} {:<12} {:<9} {}",
            task.key(),
            task.status.label(),
            task.priority.as_str(),
            task.title
        );
    }
    Ok(())
}
