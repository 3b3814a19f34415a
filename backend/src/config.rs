//! # Service Configuration
//!
//! Settings are read from a YAML file and then overridden by environment
//! variables. The file is the one named by `LWP_REVERSAL_CONFIG`, or
//! `service_config.yaml` in the data directory when that exists; without
//! either, built-in defaults apply.
//!
//! ## YAML Format
//!
//! ```yaml
//! data_directory: "/var/lib/lwp-reversal"
//! bind_address: "127.0.0.1:3000"
//! allowed_origin: "http://localhost:8080"
//! month_ordering: chronological
//! remote_url: "https://payroll.example.com"
//! remote_timeout_secs: 10
//! ```
//!
//! Every key is optional.

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::month_aggregator::MonthOrdering;
use crate::storage::csv::CsvConnection;

pub const CONFIG_FILE_NAME: &str = "service_config.yaml";

pub const CONFIG_PATH_ENV: &str = "LWP_REVERSAL_CONFIG";
pub const DATA_DIR_ENV: &str = "LWP_REVERSAL_DATA_DIR";
pub const BIND_ENV: &str = "LWP_REVERSAL_BIND";
pub const MONTH_ORDERING_ENV: &str = "LWP_REVERSAL_MONTH_ORDERING";
pub const REMOTE_URL_ENV: &str = "LWP_REVERSAL_REMOTE_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding `salary_slips.csv` and `payroll_corrections.csv`
    pub data_directory: PathBuf,
    pub bind_address: SocketAddr,
    /// Origin allowed by the CORS layer
    pub allowed_origin: String,
    pub month_ordering: MonthOrdering,
    /// Remote service that aggregates LWP months; local storage is used when unset
    pub remote_url: Option<String>,
    pub remote_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_directory: default_data_directory(),
            bind_address: SocketAddr::from(([127, 0, 0, 1], 3000)),
            allowed_origin: "http://localhost:8080".to_string(),
            month_ordering: MonthOrdering::default(),
            remote_url: None,
            remote_timeout_secs: 10,
        }
    }
}

fn default_data_directory() -> PathBuf {
    CsvConnection::default_data_directory().unwrap_or_else(|_| PathBuf::from("data"))
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn load() -> Result<Self> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Load configuration using `lookup` in place of the process environment
    pub fn load_with<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let data_directory = lookup(DATA_DIR_ENV).map(PathBuf::from);

        let config_path = match lookup(CONFIG_PATH_ENV) {
            Some(path) => Some(PathBuf::from(path)),
            None => {
                let candidate = data_directory
                    .clone()
                    .unwrap_or_else(default_data_directory)
                    .join(CONFIG_FILE_NAME);
                candidate.exists().then_some(candidate)
            }
        };

        let mut config = match config_path {
            Some(path) => Self::from_yaml_file(&path)?,
            None => {
                debug!("No {} found, using defaults", CONFIG_FILE_NAME);
                Self::default()
            }
        };

        if let Some(directory) = data_directory {
            config.data_directory = directory;
        }
        if let Some(bind) = lookup(BIND_ENV) {
            config.bind_address = bind
                .trim()
                .parse()
                .with_context(|| format!("Invalid {}: {}", BIND_ENV, bind))?;
        }
        if let Some(ordering) = lookup(MONTH_ORDERING_ENV) {
            config.month_ordering = ordering.parse()?;
        }
        if let Some(url) = lookup(REMOTE_URL_ENV) {
            config.remote_url = Some(url.trim().to_string());
        }

        Ok(config)
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let yaml_content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: AppConfig = serde_yaml::from_str(&yaml_content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn remote_timeout(&self) -> Duration {
        Duration::from_secs(self.remote_timeout_secs)
    }
}
