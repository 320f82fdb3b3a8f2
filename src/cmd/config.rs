//! Configuration view and validation commands: `legion config`.

use anyhow::Result;
use std::path::Path;

use legion_board::config::{CONFIG_DIR, CONFIG_FILE, CliOverrides, LegionConfig, LegionToml};

use super::super::ConfigCommands;

fn print_toml(toml: &LegionToml) {
    println!("[api]");
    println!("  base_url = \"{}\"", toml.api.base_url);
    match toml.api.timeout_secs {
        Some(secs) => println!("  timeout_secs = {}", secs),
        None => println!("  timeout_secs = (transport default)"),
    }
    println!();

    println!("[auth]");
    println!(
        "  token = {}",
        if toml.auth.token.is_some() { "(set)" } else { "(not set)" }
    );
    match toml.auth.workspace_id {
        Some(id) => println!("  workspace_id = {}", id),
        None => println!("  workspace_id = (not set)"),
    }
    println!();

    println!("[board]");
    println!("  merge_confirmed = {}", toml.board.merge_confirmed);
    println!();
}

pub fn cmd_config(
    project_dir: &Path,
    overrides: CliOverrides,
    command: Option<ConfigCommands>,
) -> Result<()> {
    let legion_dir = project_dir.join(CONFIG_DIR);
    let config_path = legion_dir.join(CONFIG_FILE);

    match command {
        None | Some(ConfigCommands::Show) => {
            println!();
            println!("Legion Configuration");
            println!("====================");
            println!();

            let config = LegionConfig::with_cli_args(project_dir.to_path_buf(), overrides)?;
            println!("Project dir: {}", config.project_dir.display());
            if config.config_path().exists() {
                println!("Config file: {}", config.config_path().display());
            } else {
                println!("No legion.toml found at {}", config.config_path().display());
                println!("Run 'legion config init' to create one.");
            }
            println!();

            println!("Effective values (with env/CLI overrides):");
            print_toml(&config.toml);
        }
        Some(ConfigCommands::Validate) => {
            println!();
            println!("Validating configuration...");
            println!();

            if !config_path.exists() {
                println!("No legion.toml found. Using defaults (valid).");
                return Ok(());
            }

            let toml = LegionToml::load(&config_path)?;
            let warnings = toml.validate();

            if warnings.is_empty() {
                println!("Configuration is valid.");
            } else {
                println!("Configuration warnings:");
                for warning in warnings {
                    println!("  - {}", warning);
                }
            }
            println!();
        }
        Some(ConfigCommands::Init) => {
            if config_path.exists() {
                println!("legion.toml already exists at {}", config_path.display());
                println!("Delete it first if you want to recreate it.");
                return Ok(());
            }

            if !legion_dir.exists() {
                std::fs::create_dir_all(&legion_dir)?;
            }

            LegionToml::default().save(&config_path)?;

            println!("Created legion.toml at {}", config_path.display());
            println!();
            println!("You can now customize:");
            println!("  - [api] base_url, timeout_secs");
            println!("  - [auth] token, workspace_id");
            println!("  - [board] merge_confirmed");
            println!();
        }
    }

    Ok(())
}
