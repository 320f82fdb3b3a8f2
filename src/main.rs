use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use legion_board::board::models::{ProjectId, TaskId, TaskStatus};
use legion_board::config::CliOverrides;
use legion_board::logging::{LogFormat, init_logging};

mod cmd;

#[derive(Parser)]
#[command(name = "legion")]
#[command(version, about = "Kanban board client for the Legion Task Service")]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log output format: text, json
    #[arg(long, global = true, default_value = "text")]
    pub log_format: LogFormat,

    #[arg(long, global = true)]
    pub project_dir: Option<PathBuf>,

    /// Task Service base URL. Overrides legion.toml and LEGION_API_URL.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Bearer token sent with every request
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Workspace id sent in the X-Workspace-Id header
    #[arg(long, global = true)]
    pub workspace: Option<i64>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            api_url: self.api_url.clone(),
            token: self.token.clone(),
            workspace_id: self.workspace,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the project's board, one section per status column
    Board {
        /// Project id. Defaults to the workspace's first project.
        #[arg(short, long)]
        project: Option<ProjectId>,
    },
    /// List the project's tasks
    Tasks {
        /// Project id. Defaults to the workspace's first project.
        #[arg(short, long)]
        project: Option<ProjectId>,

        /// Only tasks with this status (e.g. TODO, in-progress)
        #[arg(short, long)]
        status: Option<TaskStatus>,
    },
    /// Move a task to another column
    Move {
        task: TaskId,

        /// Target status: BACKLOG, TODO, IN_PROGRESS, REVIEW, DONE
        status: TaskStatus,

        /// Project id. Defaults to the workspace's first project.
        #[arg(short, long)]
        project: Option<ProjectId>,
    },
    /// List the projects of the selected workspace
    Projects,
    /// View or validate configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Validate configuration and show any warnings
    Validate,
    /// Initialize a default legion.toml file
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_format)?;

    let project_dir = match cli.project_dir.clone() {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };
    let overrides = cli.overrides();

    match &cli.command {
        Commands::Board { project } => {
            cmd::cmd_board(&project_dir, overrides, *project).await?;
        }
        Commands::Tasks { project, status } => {
            cmd::cmd_tasks(&project_dir, overrides, *project, *status).await?;
        }
        Commands::Move {
            task,
            status,
            project,
        } => {
            cmd::cmd_move(&project_dir, overrides, *project, *task, *status).await?;
        }
        Commands::Projects => {
            cmd::cmd_projects(&project_dir, overrides).await?;
        }
        Commands::Config { command } => {
            cmd::cmd_config(&project_dir, overrides, command.clone())?;
        }
    }

    Ok(())
}
