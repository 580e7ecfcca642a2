//! MappingCatalog trait definition.
//!
//! The MappingCatalog trait abstracts over where program category mappings
//! come from. Production deployments back it with the metadata store; the
//! crate ships an in-memory implementation loaded from a metadata export.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;

use super::validate::validate_mappings;
use crate::config::SettingsError;
use crate::disag::error::{ConfigurationError, DisagResult};
use crate::model::{CategoryMapping, ProgramIndicator};

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Failure to read mapping metadata.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Program indicator not found: {0}")]
    IndicatorNotFound(String),

    #[error("Catalog did not answer within {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("Failed to read metadata file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse metadata: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid catalog settings: {0}")]
    Settings(#[from] SettingsError),

    #[error("Invalid {kind} UID: '{uid}'")]
    InvalidUid { kind: &'static str, uid: String },

    #[error("{kind} {uid} references unknown {target} {target_uid}")]
    DanglingReference {
        kind: &'static str,
        uid: String,
        target: &'static str,
        target_uid: String,
    },
}

/// Trait for fetching program category mappings.
///
/// # Example
///
/// ```ignore
/// use pidisag::catalog::MappingCatalog;
///
/// async fn example(catalog: &impl MappingCatalog, pi: &ProgramIndicator) -> DisagResult<()> {
///     let gender = catalog.get_category_mapping("gIgiL8ow0bi").await?;
///     let all = catalog.get_category_mappings(pi).await?;
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait MappingCatalog: Send + Sync {
    /// Fetch one mapping by UID; `None` when it does not exist.
    async fn get_category_mapping(&self, uid: &str) -> CatalogResult<Option<CategoryMapping>>;

    /// Fetch and validate every mapping the indicator references.
    ///
    /// Default implementation fetches mappings in parallel using `join_all`,
    /// then checks them against the indicator's combos.
    async fn get_category_mappings(
        &self,
        indicator: &ProgramIndicator,
    ) -> DisagResult<Vec<CategoryMapping>> {
        let futures: Vec<_> = indicator
            .category_mapping_ids
            .iter()
            .map(|uid| self.get_category_mapping(uid))
            .collect();

        let results = futures::future::join_all(futures).await;

        let mut mappings = Vec::with_capacity(results.len());
        for (uid, result) in indicator.category_mapping_ids.iter().zip(results) {
            match result? {
                Some(mapping) => mappings.push(mapping),
                None => {
                    return Err(ConfigurationError::MissingMapping {
                        indicator: indicator.uid.clone(),
                        mapping: uid.clone(),
                    }
                    .into())
                }
            }
        }

        validate_mappings(indicator, &mappings)?;
        Ok(mappings)
    }
}
