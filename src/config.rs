//! Configuration for the board client.
//!
//! Settings are read from `.legion/legion.toml` and layered
//! file → environment → CLI flags.
//!
//! # Configuration File Format
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:8080/api"
//! timeout_secs = 30
//!
//! [auth]
//! token = "eyJhbGciOi..."
//! workspace_id = 3
//!
//! [board]
//! merge_confirmed = false
//! ```
//!
//! Environment overrides: `LEGION_API_URL`, `LEGION_TOKEN`,
//! `LEGION_WORKSPACE_ID`, `LEGION_MERGE_CONFIRMED`. A `.env` file in the
//! project directory is loaded first when present.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::board::BoardOptions;
use crate::service::ServiceConfig;

pub const CONFIG_DIR: &str = ".legion";
pub const CONFIG_FILE: &str = "legion.toml";

pub const ENV_API_URL: &str = "LEGION_API_URL";
pub const ENV_TOKEN: &str = "LEGION_TOKEN";
pub const ENV_WORKSPACE_ID: &str = "LEGION_WORKSPACE_ID";
pub const ENV_MERGE_CONFIRMED: &str = "LEGION_MERGE_CONFIRMED";

/// Task Service endpoint settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSection {
    /// Base URL the `/tasks` routes hang off
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout; transport default when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

/// Credentials attached to every request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSection {
    /// Replace the cached task with the service's record after a confirmed move
    #[serde(default)]
    pub merge_confirmed: bool,
}

/// The complete legion.toml structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegionToml {
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub auth: AuthSection,
    #[serde(default)]
    pub board: BoardSection,
}

impl LegionToml {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse legion.toml")
    }

    /// Load `legion.toml` from `legion_dir`, or defaults when the file is missing.
    pub fn load_or_default(legion_dir: &Path) -> Result<Self> {
        let config_path = legion_dir.join(CONFIG_FILE);
        if config_path.exists() {
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize legion.toml")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Validate the configuration and return any warnings.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        let base_url = self.api.base_url.trim();
        if base_url.is_empty() {
            warnings.push("api.base_url is empty".to_string());
        } else if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            warnings.push(format!(
                "Invalid api.base_url '{}': should start with http:// or https://",
                self.api.base_url
            ));
        }

        if self.api.timeout_secs == Some(0) {
            warnings.push("api.timeout_secs is 0: every request would time out".to_string());
        }

        if let Some(token) = &self.auth.token
            && token.trim().is_empty()
        {
            warnings.push("auth.token is set but empty".to_string());
        }

        if let Some(id) = self.auth.workspace_id
            && id <= 0
        {
            warnings.push(format!("Invalid auth.workspace_id {}: should be positive", id));
        }

        warnings
    }

    /// Overlay environment variables read through `lookup`.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL) {
            self.api.base_url = url;
        }
        if let Some(token) = lookup(ENV_TOKEN) {
            self.auth.token = Some(token);
        }
        if let Some(id) = lookup(ENV_WORKSPACE_ID) {
            let id = id
                .trim()
                .parse::<i64>()
                .with_context(|| format!("{} must be an integer, got '{}'", ENV_WORKSPACE_ID, id))?;
            self.auth.workspace_id = Some(id);
        }
        if let Some(flag) = lookup(ENV_MERGE_CONFIRMED) {
            self.board.merge_confirmed = parse_flag(&flag);
        }
        Ok(())
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Values given on the command line. `None` leaves the lower layers alone.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub api_url: Option<String>,
    pub token: Option<String>,
    pub workspace_id: Option<i64>,
}

/// Resolved configuration: legion.toml merged with environment and CLI.
#[derive(Debug, Clone)]
pub struct LegionConfig {
    pub project_dir: PathBuf,
    pub legion_dir: PathBuf,
    /// Effective settings after every layer is applied
    pub toml: LegionToml,
}

impl LegionConfig {
    /// Load file and environment layers for `project_dir`.
    pub fn new(project_dir: PathBuf) -> Result<Self> {
        let project_dir = project_dir
            .canonicalize()
            .context("Failed to resolve project directory")?;
        let legion_dir = project_dir.join(CONFIG_DIR);

        match dotenvy::from_path(project_dir.join(".env")) {
            Ok(()) => tracing::debug!("Loaded .env"),
            Err(e) if e.not_found() => {}
            Err(e) => return Err(e).context("Failed to load .env"),
        }

        let mut toml = LegionToml::load_or_default(&legion_dir)?;
        toml.apply_env_with(|key| std::env::var(key).ok())?;

        Ok(Self {
            project_dir,
            legion_dir,
            toml,
        })
    }

    /// Create LegionConfig with CLI overrides on top.
    pub fn with_cli_args(project_dir: PathBuf, overrides: CliOverrides) -> Result<Self> {
        let mut config = Self::new(project_dir)?;
        config.apply_overrides(overrides);
        Ok(config)
    }

    pub fn apply_overrides(&mut self, overrides: CliOverrides) {
        if let Some(url) = overrides.api_url {
            self.toml.api.base_url = url;
        }
        if let Some(token) = overrides.token {
            self.toml.auth.token = Some(token);
        }
        if let Some(id) = overrides.workspace_id {
            self.toml.auth.workspace_id = Some(id);
        }
    }

    /// Path to legion.toml.
    pub fn config_path(&self) -> PathBuf {
        self.legion_dir.join(CONFIG_FILE)
    }

    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            base_url: self.toml.api.base_url.clone(),
            token: self.toml.auth.token.clone(),
            workspace_id: self.toml.auth.workspace_id,
            timeout: self.toml.api.timeout_secs.map(Duration::from_secs),
        }
    }

    pub fn board_options(&self) -> BoardOptions {
        BoardOptions {
            merge_confirmed: self.toml.board.merge_confirmed,
        }
    }

    pub fn validate(&self) -> Vec<String> {
        self.toml.validate()
    }
}
