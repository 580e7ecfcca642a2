//! Program indicator category disaggregation.
//!
//! Two phases per query:
//!
//! 1. **Plan** ([`DisaggregationPlanner`], async): read the indicator's
//!    category mappings from the catalog and decide which categories are
//!    synthesized as SQL columns. Produces an immutable
//!    [`DisaggregationContext`].
//! 2. **Consume** (sync, pure): [`ColumnGenerator`] emits the SQL fragments
//!    for the base query; [`RowResolver`] maps each result row back to its
//!    category option combo and attribute option combo.

pub mod context;
pub mod error;
pub mod generator;
pub mod key;
pub mod planner;
pub mod resolver;
pub mod row;

pub use context::{DisaggregationContext, WILDCARD};
pub use error::{AmbiguousMapping, ConfigurationError, DisagError, DisagResult, FilterCompileError};
pub use generator::{ColumnGenerator, FilterCompiler, GroupByMode};
pub use key::canonical_key;
pub use planner::DisaggregationPlanner;
pub use resolver::{
    ResolvedRow, ResolvedRows, RowOutcome, RowResolver, COMPOSITE_DIM_SEPARATOR,
};
pub use row::{NamedRow, ResultRow};
