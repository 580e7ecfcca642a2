//! TOML-based configuration for pidisag.
//!
//! Supports a config file (pidisag.toml) with environment variable expansion.
//!
//! Example configuration:
//! ```toml
//! [sql]
//! dialect = "doris"        # postgres | doris | clickhouse
//! group_by = "expression"  # alias | expression
//!
//! [catalog]
//! path = "${METADATA_DIR}/metadata.json"
//! timeout_ms = 2000
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::disag::GroupByMode;
use crate::sql::Dialect;

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid environment variable reference in: {0}")]
    InvalidEnvVar(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// SQL generation settings.
    pub sql: SqlSettings,

    /// Mapping catalog settings.
    pub catalog: CatalogSettings,
}

/// SQL generation settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SqlSettings {
    /// Analytics database dialect.
    pub dialect: Dialect,

    /// How GROUP BY refers to synthesized columns.
    pub group_by: GroupByMode,
}

/// Mapping catalog settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Metadata export to load (supports ${ENV_VAR} expansion).
    pub path: Option<String>,

    /// Upper bound on one planning fetch, in milliseconds.
    pub timeout_ms: Option<u64>,
}

impl CatalogSettings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Get the metadata path with environment variables expanded.
    pub fn resolved_path(&self) -> Result<Option<PathBuf>, SettingsError> {
        self.path
            .as_deref()
            .map(|p| expand_env_vars(p).map(PathBuf::from))
            .transpose()
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `PIDISAG_CONFIG`
    /// 2. `./pidisag.toml`
    /// 3. `~/.config/pidisag/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var("PIDISAG_CONFIG") {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("pidisag.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("pidisag").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        Ok(Settings::default())
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }

        let var_name: String = if chars.next_if_eq(&'{').is_some() {
            let name: String = std::iter::from_fn(|| chars.next_if(|&ch| ch != '}')).collect();
            // Unterminated or empty braces
            if chars.next().is_none() || name.is_empty() {
                return Err(SettingsError::InvalidEnvVar(s.to_string()));
            }
            name
        } else {
            std::iter::from_fn(|| chars.next_if(|&ch| ch.is_alphanumeric() || ch == '_')).collect()
        };

        if var_name.is_empty() {
            // Lone $
            result.push('$');
            continue;
        }

        let value =
            env::var(&var_name).map_err(|_| SettingsError::MissingEnvVar(var_name.clone()))?;
        result.push_str(&value);
    }

    Ok(result)
}
