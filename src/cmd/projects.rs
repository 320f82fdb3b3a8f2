//! Project listing command.

use anyhow::{Context, Result};
use std::path::Path;

use legion_board::config::CliOverrides;
use legion_board::service::ProjectService;

use super::connect;

pub async fn cmd_projects(project_dir: &Path, overrides: CliOverrides) -> Result<()> {
    let session = connect(project_dir, overrides)?;
    let workspace_id = session.workspace_id()?;
    let projects = session
        .service
        .list_projects_by_workspace(workspace_id)
        .await
        .with_context(|| format!("Failed to load projects of workspace {}", workspace_id))?;

    if projects.is_empty() {
        println!("No projects found in workspace {}.", workspace_id);
        return Ok(());
    }

    println!("{:<6} {:<8} Name", "ID", "Key");
    println!("{:<6} {:<8} ----", "--", "---");
    for project in &projects {
        println!(
            "{:<6} {:<8} {}",
            project.id,
            project.key.as_deref().unwrap_or("-"),
            project.name.as_deref().unwrap_or("")
        );
    }
    Ok(())
}
