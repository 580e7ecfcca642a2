//! Category mapping catalog.
//!
//! The planner reads program category mappings through the async
//! [`MappingCatalog`] trait. [`InMemoryCatalog`] is the bundled
//! implementation, used by tests and by tools that load a metadata export.

pub mod memory;
pub mod provider;
pub mod validate;

pub use memory::{is_valid_uid, InMemoryCatalog};
pub use provider::{CatalogError, CatalogResult, MappingCatalog};
pub use validate::validate_mappings;
