use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::analysis::DashboardSettings;
use crate::error::DashboardError;
use crate::io::{DataSource, LoadOptions, RowPolicy, DEFAULT_SOURCE};

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "salary-dashboard.toml";

/// Where and how to load the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Path or http(s) URL of the CSV document
    pub location: String,
    pub timeout_secs: u64,
    pub row_policy: RowPolicy,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            location: DEFAULT_SOURCE.to_string(),
            timeout_secs: 30,
            row_policy: RowPolicy::Strict,
        }
    }
}

impl SourceConfig {
    pub fn data_source(&self) -> DataSource {
        match self.location.parse() {
            Ok(source) => source,
            Err(never) => match never {},
        }
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            row_policy: self.row_policy,
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

/// Web server settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Idle sessions older than this are dropped
    pub session_ttl_secs: u64,
    /// Oldest session is evicted past this count
    pub max_sessions: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            session_ttl_secs: 2 * 60 * 60,
            max_sessions: 100,
        }
    }
}

/// Complete application configuration. Every field has a default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub source: SourceConfig,
    pub dashboard: DashboardSettings,
    pub server: ServerConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DashboardError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            DashboardError::Config(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, DashboardError> {
        let config: AppConfig = toml::from_str(content)
            .map_err(|e| DashboardError::Config(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Explicit file if given, else the default file if present, else defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, DashboardError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    tracing::debug!(path = %default_path.display(), "using default config file");
                    Self::from_file(&default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn validate(&self) -> Result<(), DashboardError> {
        if self.dashboard.histogram_bins == 0 {
            return Err(DashboardError::Config(
                "dashboard.histogram_bins must be positive".to_string(),
            ));
        }
        if self.dashboard.top_n == 0 {
            return Err(DashboardError::Config(
                "dashboard.top_n must be positive".to_string(),
            ));
        }
        if self.source.timeout_secs == 0 {
            return Err(DashboardError::Config(
                "source.timeout_secs must be positive".to_string(),
            ));
        }
        if self.server.max_sessions == 0 {
            return Err(DashboardError::Config(
                "server.max_sessions must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
