//! Service configuration file
//!
//! `catalogd.json`; every field is optional. A missing file means all
//! defaults, a malformed one is fatal.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};
use crate::catalog::DEFAULT_PAGE_SIZE;
use crate::http_server::HttpServerConfig;
use crate::item_store::ITEMS_FILE;
use crate::observability::{log_event_with_fields, Event, Severity};

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding items.json
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Bind address and CORS
    #[serde(flatten)]
    pub http: HttpServerConfig,

    /// Invalidate the stats cache on external edits to items.json
    #[serde(default = "default_watch_store")]
    pub watch_store: bool,

    /// Page size when only `page` is given
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,

    /// Minimum log severity: trace, info, warn, error, fatal
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_data_dir() -> String {
    "./data".to_string()
}
fn default_watch_store() -> bool {
    true
}
fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            http: HttpServerConfig::default(),
            watch_store: default_watch_store(),
            default_page_size: default_page_size(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file, falling back to defaults if it is absent
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log_event_with_fields(
                    Event::ConfigDefaulted,
                    &[("path", path.display().to_string().as_str())],
                );
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(CliError::config_error(format!(
                    "Failed to read config: {}",
                    e
                )))
            }
        };

        let config = Self::parse(&content)?;
        log_event_with_fields(
            Event::ConfigLoaded,
            &[
                ("data_dir", config.data_dir.as_str()),
                ("path", path.display().to_string().as_str()),
            ],
        );
        Ok(config)
    }

    /// Parse and validate configuration JSON
    pub fn parse(content: &str) -> CliResult<Self> {
        let config: Config = serde_json::from_str(content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.data_dir.trim().is_empty() {
            return Err(CliError::config_error("data_dir must not be empty"));
        }
        if self.http.port == 0 {
            return Err(CliError::config_error("port must be > 0"));
        }
        if self.default_page_size == 0 {
            return Err(CliError::config_error("default_page_size must be > 0"));
        }
        self.severity()?;
        Ok(())
    }

    /// Parsed `log_level`
    pub fn severity(&self) -> CliResult<Severity> {
        self.log_level
            .parse()
            .map_err(|e: String| CliError::config_error(format!("Invalid log_level: {}", e)))
    }

    /// Get data directory as Path
    pub fn data_path(&self) -> &Path {
        Path::new(&self.data_dir)
    }

    /// Location of the backing document
    pub fn items_path(&self) -> PathBuf {
        self.data_path().join(ITEMS_FILE)
    }
}
