//! Error types for disaggregation planning, SQL generation and row resolution.
//!
//! Configuration, catalog, invariant, filter and ambiguity errors abort the
//! query. Rows that merely fail to resolve are not errors: they come back
//! as `RowOutcome::Reject`.

use crate::catalog::CatalogError;

/// Result type for disaggregation operations.
pub type DisagResult<T> = Result<T, DisagError>;

/// Query-level disaggregation failure.
#[derive(Debug, thiserror::Error)]
pub enum DisagError {
    #[error("Invalid category mapping configuration: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Mapping catalog failure: {0}")]
    Catalog(#[from] CatalogError),

    /// Planner and generator/resolver disagree about what was planned.
    #[error("Disaggregation invariant violated for category {category}: {message}")]
    InvariantViolation { category: String, message: String },

    #[error("{0}")]
    AmbiguousMapping(Box<AmbiguousMapping>),

    #[error(
        "Failed to compile filter for option {option} of category {category} \
         in program indicator {indicator}: {source}"
    )]
    FilterCompile {
        indicator: String,
        category: String,
        option: String,
        #[source]
        source: FilterCompileError,
    },
}

impl DisagError {
    pub fn invariant(category: impl Into<String>, message: impl Into<String>) -> Self {
        DisagError::InvariantViolation {
            category: category.into(),
            message: message.into(),
        }
    }
}

/// Malformed or incomplete category mapping metadata, detected at plan time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Program indicator {indicator} references category mapping {mapping} which does not exist")]
    MissingMapping { indicator: String, mapping: String },

    #[error("Category mapping {mapping} option {option} has an empty filter")]
    EmptyFilter { mapping: String, option: String },

    #[error("Category mapping {mapping} has no option mappings")]
    NoOptions { mapping: String },

    #[error(
        "Category mapping {mapping} targets category {category}, which is not in the \
         category combo or attribute combo of program indicator {indicator}"
    )]
    UnknownCategory {
        indicator: String,
        mapping: String,
        category: String,
    },

    #[error("Category mapping {mapping} maps option {option}, which is not an option of category {category}")]
    OptionNotInCategory {
        mapping: String,
        category: String,
        option: String,
    },

    #[error("Category mapping {mapping} maps option {option} more than once")]
    DuplicateOption { mapping: String, option: String },

    #[error("Program indicator {indicator} has more than one mapping for category {category}")]
    DuplicateCategory { indicator: String, category: String },

    #[error(
        "Program indicator {indicator} disaggregates by category {category} \
         but has no category mapping for it"
    )]
    UnmappedCategory { indicator: String, category: String },

    #[error("Category option combos {first} and {second} of category combo {combo} share the option set {key}")]
    DuplicateOptionCombo {
        combo: String,
        first: String,
        second: String,
        key: String,
    },
}

/// Failure reported by the external filter compiler.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct FilterCompileError {
    pub message: String,
}

impl FilterCompileError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Details for a row on which several option filters of one category matched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "Program indicator {indicator_uid} ({indicator_name}) with category combo {combo_uid} \
     ({combo_name}): more than one filter of category {category_uid} ({category_name}) \
     matched the same row; colliding options: {}",
    options.join(", ")
)]
pub struct AmbiguousMapping {
    pub indicator_uid: String,
    pub indicator_name: String,
    pub combo_uid: String,
    pub combo_name: String,
    pub category_uid: String,
    pub category_name: String,
    pub options: Vec<String>,
}
