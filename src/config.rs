use crate::manifest::ManualEntry;
use crate::session::ClassificationPolicy;
use anyhow::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Settings and curation tables compiled into the binary
pub const DEFAULT_CONFIG: &str = include_str!("../config/spjall-sessions.toml");

/// Prefix for environment overrides, e.g. `SPJALL_API__SESSIONS_URL`
const ENV_PREFIX: &str = "SPJALL";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub output: OutputConfig,
    pub report: ReportConfig,
    pub policy: PolicyConfig,
    #[serde(default)]
    pub manual_entries: Vec<ManualEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Session list endpoint. Archives are fetched from `<sessions_url>/<session_id>`.
    pub sessions_url: String,
    /// Ask the API to include sessions where only one side was recorded
    #[serde(default)]
    pub include_partial: bool,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub manifest_path: String,
    pub archive_dir: String,
    #[serde(default = "default_true")]
    pub download_archives: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    pub collection_goal_hours: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PolicyConfig {
    #[serde(default)]
    pub valid_sessions: Vec<String>,
    #[serde(default)]
    pub partial_sessions: Vec<String>,
    #[serde(default)]
    pub invalid_sessions: Vec<String>,
}

fn default_true() -> bool {
    true
}

/// Command-line settings applied on top of the loaded configuration
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub sessions_url: Option<String>,
    pub manifest_path: Option<String>,
    pub archive_dir: Option<String>,
    /// Only ever switches partial sessions on
    pub include_partial: bool,
    /// Only ever switches downloads off
    pub no_download: bool,
}

impl Config {
    /// Load the embedded defaults, layered with an optional TOML file and
    /// `SPJALL_*` environment variables
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml));

        if let Some(path) = path {
            info!("Loading config overrides from {}", path.display());
            builder = builder.add_source(config::File::from(path));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn apply_overrides(&mut self, overrides: Overrides) {
        if let Some(url) = overrides.sessions_url {
            self.api.sessions_url = url;
        }
        if let Some(path) = overrides.manifest_path {
            self.output.manifest_path = path;
        }
        if let Some(dir) = overrides.archive_dir {
            self.output.archive_dir = dir;
        }
        if overrides.include_partial {
            self.api.include_partial = true;
        }
        if overrides.no_download {
            self.output.download_archives = false;
        }
    }

    /// The compiled-in defaults, without file or environment overrides
    pub fn embedded() -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

impl PolicyConfig {
    pub fn to_policy(&self) -> ClassificationPolicy {
        ClassificationPolicy::new(
            self.valid_sessions.iter().cloned(),
            self.partial_sessions.iter().cloned(),
            self.invalid_sessions.iter().cloned(),
        )
    }
}

impl OutputConfig {
    pub fn manifest_path(&self) -> PathBuf {
        expand(&self.manifest_path)
    }

    pub fn archive_dir(&self) -> PathBuf {
        expand(&self.archive_dir)
    }
}

fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}
