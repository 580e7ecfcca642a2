//! # pidisag
//!
//! Program indicator category disaggregation for event analytics.
//!
//! A program indicator's category option combo (COC) and attribute option
//! combo (AOC) are not stored columns. They are derived per row from
//! category mapping filters evaluated inside the analytics query.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │          MappingCatalog (category mappings)              │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [planner, once per query]
//! ┌─────────────────────────────────────────────────────────┐
//! │               DisaggregationContext                      │
//! │   (synthesized categories + COC/AOC reverse lookups)     │
//! └─────────────────────────────────────────────────────────┘
//!              │                              │
//!              ▼ [column generator]           ▼ [row resolver]
//! ┌──────────────────────────┐   ┌──────────────────────────┐
//! │ SELECT / GROUP BY / WHERE │   │  result row → COC + AOC  │
//! └──────────────────────────┘   └──────────────────────────┘
//! ```

pub mod catalog;
pub mod config;
pub mod disag;
pub mod model;
pub mod sql;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::catalog::{CatalogError, InMemoryCatalog, MappingCatalog};
    pub use crate::config::Settings;
    pub use crate::disag::{
        canonical_key, ColumnGenerator, ConfigurationError, DisagError, DisagResult,
        DisaggregationContext, DisaggregationPlanner, FilterCompileError, FilterCompiler,
        GroupByMode, NamedRow, ResultRow, RowOutcome, RowResolver, WILDCARD,
    };
    pub use crate::model::{
        Category, CategoryCombo, CategoryMapping, CategoryOptionCombo, DateRange, EventQuery,
        OptionMapping, ProgramIndicator, QueryDimension,
    };
    pub use crate::sql::{Dialect, SqlDialect};
}
