//! Board view and status change commands.

use anyhow::{Result, bail};
use std::path::Path;

use legion_board::DragOutcome;
use legion_board::board::DropResolution;
use legion_board::board::models::{ColumnView, ProjectId, Task, TaskId, TaskStatus};
use legion_board::config::CliOverrides;

use super::connect;

fn task_line(task: &Task) -> String {
    format!("{} [{}] {}", task.key(), task.priority, task.title)
}

fn print_column(column: &ColumnView) {
    println!(
        "{} {}",
        console::style(column.label()).bold().cyan(),
        console::style(format!("({})", column.count())).dim()
    );
    if column.tasks.is_empty() {
        println!("  {}", console::style("No tasks").dim());
    }
    for task in &column.tasks {
        println!("  {}", task_line(task));
    }
    println!();
}

pub async fn cmd_board(
    project_dir: &Path,
    overrides: CliOverrides,
    project: Option<ProjectId>,
) -> Result<()> {
    let session = connect(project_dir, overrides)?;
    let project = session.open_project(project).await?;

    println!();
    println!("{}", console::style(format!("Project {}", project)).bold());
    println!();
    for column in session.board.columns()? {
        print_column(&column);
    }
    Ok(())
}

pub async fn cmd_move(
    project_dir: &Path,
    overrides: CliOverrides,
    project: Option<ProjectId>,
    task_id: TaskId,
    status: TaskStatus,
) -> Result<()> {
    let session = connect(project_dir, overrides)?;
    let project = session.open_project(project).await?;
    let board = &session.board;

    let Some(task) = board.drag_start(task_id)? else {
        bail!("Task {} not found in project {}", task_id, project);
    };
    let key = task.key();

    match board.drag_end(task_id, Some(status.as_str())).await? {
        DragOutcome::Confirmed(change) => {
            println!(
                "{} {}: {} → {}",
                console::style("Moved").green().bold(),
                key,
                change.from.label(),
                change.to.label()
            );
        }
        DragOutcome::Ignored(DropResolution::Unchanged) => {
            println!("{} is already in {}", key, status.label());
        }
        DragOutcome::Ignored(other) => {
            bail!("Move of {} was not applied: {:?}", key, other);
        }
        DragOutcome::Reverted { message, .. } => {
            if let Some(current) = board.status_of(task_id)? {
                println!("{} is in {}", key, current.label());
            }
            bail!("Failed to move task: {}", message);
        }
    }
    Ok(())
}
