//! Store configuration loaded from `<root>/config.toml`.
//!
//! Every field has a default; a missing file is not an error.

use crate::core::error::LedgerError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LedgerConfig {
    pub storage: StorageConfig,
    pub audit: AuditConfig,
    pub limits: LimitsConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// File name of the SQLite database inside the store root.
    pub db_name: String,
    pub busy_timeout_ms: u64,
    /// Open connections in WAL journal mode.
    pub wal: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_name: "agents_data.db".to_string(),
            busy_timeout_ms: 5_000,
            wal: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    pub enabled: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub default_list_limit: i64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            default_list_limit: 20,
        }
    }
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE_NAME)
}

/// Load config from `<root>/config.toml`, falling back to defaults when absent.
pub fn load_config(root: &Path) -> Result<LedgerConfig, LedgerError> {
    let path = config_path(root);
    if !path.exists() {
        return Ok(LedgerConfig::default());
    }
    let content = fs::read_to_string(&path).map_err(LedgerError::IoError)?;
    parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<LedgerConfig, LedgerError> {
    let config: LedgerConfig =
        toml::from_str(content).map_err(|e| LedgerError::ConfigError(e.to_string()))?;
    if config.storage.db_name.trim().is_empty() {
        return Err(LedgerError::ConfigError(
            "storage.db_name must not be empty".to_string(),
        ));
    }
    if config.limits.default_list_limit < 1 {
        return Err(LedgerError::ConfigError(format!(
            "limits.default_list_limit must be positive, got {}",
            config.limits.default_list_limit
        )));
    }
    Ok(config)
}

/// Write the default config file unless one already exists. Returns true when written.
pub fn write_default_config(root: &Path) -> Result<bool, LedgerError> {
    let path = config_path(root);
    if path.exists() {
        return Ok(false);
    }
    let body = toml::to_string_pretty(&LedgerConfig::default())
        .map_err(|e| LedgerError::ConfigError(e.to_string()))?;
    fs::write(&path, body).map_err(LedgerError::IoError)?;
    Ok(true)
}
