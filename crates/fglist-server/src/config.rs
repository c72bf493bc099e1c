//! Server configuration

use fglist_repository::{MissingFilePolicy, RepositoryConfig};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

fn default_base_dir() -> PathBuf {
    PathBuf::from("/home/data/share/txt")
}

/// Server configuration
///
/// Loaded once at startup from `config/server.*` and `FGLIST_*` environment
/// variables (for example `FGLIST_PORT=8080`, `FGLIST_BASE_DIR=/srv/lists`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host
    pub host: String,

    /// Server port (HTTP)
    pub port: u16,

    /// Directory holding the list files
    pub base_dir: PathBuf,

    /// Change log path (defaults to `<base_dir>/change.log`)
    pub change_log: Option<PathBuf>,

    /// Serve an empty list instead of 404 when reading an absent file
    pub read_missing_as_empty: bool,

    /// Log level used when `RUST_LOG` is not set
    pub log_level: String,

    /// Log output format
    pub log_format: LogFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3069,
            base_dir: default_base_dir(),
            change_log: None,
            read_missing_as_empty: false,
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
        }
    }
}

/// Result of [`ServerConfig::load`]
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: ServerConfig,
    /// Why defaults were used instead of the configured sources
    pub fallback_reason: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables and config file
    ///
    /// Runs before tracing is set up, so nothing is logged here; the caller
    /// reports [`LoadedConfig::fallback_reason`] once logging is ready.
    pub fn load() -> anyhow::Result<LoadedConfig> {
        // Load .env file if exists
        dotenvy::dotenv().ok();

        Self::from_sources(
            config::Config::builder()
                .add_source(config::File::with_name("config/server").required(false))
                .add_source(config::Environment::with_prefix("FGLIST").try_parsing(true))
                .build(),
        )
    }

    /// Deserialize built sources, falling back to defaults when they could not be built
    pub fn from_sources(
        sources: Result<config::Config, config::ConfigError>,
    ) -> anyhow::Result<LoadedConfig> {
        match sources {
            Ok(cfg) => Ok(LoadedConfig {
                config: cfg
                    .try_deserialize()
                    .map_err(|e| anyhow::anyhow!("Failed to deserialize config: {}", e))?,
                fallback_reason: None,
            }),
            Err(e) => Ok(LoadedConfig {
                config: Self::default(),
                fallback_reason: Some(e.to_string()),
            }),
        }
    }

    /// Address to bind, `host:port`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Repository settings derived from this configuration
    pub fn repository_config(&self) -> RepositoryConfig {
        let mut repo = RepositoryConfig::file_system(&self.base_dir).with_missing_file(
            if self.read_missing_as_empty {
                MissingFilePolicy::Empty
            } else {
                MissingFilePolicy::NotFound
            },
        );

        if let Some(change_log) = &self.change_log {
            repo = repo.with_change_log(change_log);
        }

        repo
    }

    /// Default tracing filter directive
    pub fn default_log_filter(&self) -> String {
        format!(
            "fglist_server={level},fglist_repository={level},tower_http=debug",
            level = self.log_level
        )
    }
}
