//! CLI command implementations.
//!
//! | Module     | Commands handled        |
//! |------------|-------------------------|
//! | `board`    | `Board`, `Move`         |
//! | `tasks`    | `Tasks`                 |
//! | `projects` | `Projects`              |
//! | `config`   | `Config`                |

pub mod board;
pub mod config;
pub mod projects;
pub mod tasks;

pub use board::{cmd_board, cmd_move};
pub use config::cmd_config;
pub use projects::cmd_projects;
pub use tasks::cmd_tasks;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use legion_board::Board;
use legion_board::board::{Notice, NoticeKind, Notifier};
use legion_board::board::models::{ProjectId, WorkspaceId};
use legion_board::config::{CliOverrides, LegionConfig};
use legion_board::service::{HttpTaskService, ProjectService};

/// Prints board notices to stderr.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: &Notice) {
        let marker = match notice.kind {
            NoticeKind::MoveRejected => console::style("✗").red().bold(),
            NoticeKind::LoadFailed => console::style("!").yellow().bold(),
        };
        eprintln!("{} {}", marker, notice.message);
    }
}

/// Resolved configuration, the service client and a board on top of it.
pub struct Session {
    pub config: LegionConfig,
    pub service: Arc<HttpTaskService>,
    pub board: Board,
}

/// Resolve configuration and build a board talking to the Task Service.
pub fn connect(project_dir: &Path, overrides: CliOverrides) -> Result<Session> {
    let config = LegionConfig::with_cli_args(project_dir.to_path_buf(), overrides)?;
    for warning in config.validate() {
        tracing::warn!("{}", warning);
    }

    let service = Arc::new(
        HttpTaskService::new(config.service_config())
            .context("Failed to create Task Service client")?,
    );
    let board = Board::with_options(
        service.clone(),
        Arc::new(ConsoleNotifier),
        config.board_options(),
    );
    Ok(Session {
        config,
        service,
        board,
    })
}

impl Session {
    /// The selected workspace, required for project lookups.
    pub fn workspace_id(&self) -> Result<WorkspaceId> {
        self.config
            .toml
            .auth
            .workspace_id
            .context("No workspace selected. Pass --workspace or set LEGION_WORKSPACE_ID")
    }

    /// `project` when given, otherwise the workspace's first project.
    pub async fn resolve_project(&self, project: Option<ProjectId>) -> Result<ProjectId> {
        if let Some(id) = project {
            return Ok(id);
        }
        let workspace_id = self.workspace_id()?;
        let projects = self
            .service
            .list_projects_by_workspace(workspace_id)
            .await
            .with_context(|| format!("Failed to load projects of workspace {}", workspace_id))?;
        let first = projects
            .first()
            .with_context(|| format!("Workspace {} has no projects", workspace_id))?;
        tracing::info!(project_id = first.id, "Defaulting to the workspace's first project");
        Ok(first.id)
    }

    /// Resolve the project and load it into the board.
    pub async fn open_project(&self, project: Option<ProjectId>) -> Result<ProjectId> {
        let project = self.resolve_project(project).await?;
        self.board
            .select_project(project)
            .await
            .with_context(|| format!("Failed to load project {}", project))?;
        Ok(project)
    }
}
