//! Configuration module for pidisag.
//!
//! Handles SQL generation settings, catalog settings and environment
//! variable expansion.

mod settings;

pub use settings::{expand_env_vars, CatalogSettings, Settings, SettingsError, SqlSettings};
