//! Metadata value types consumed by the disaggregation engine.
//!
//! These mirror the platform's metadata objects closely enough to plan a
//! query; persistence and CRUD live elsewhere.

pub mod category;
pub mod indicator;
pub mod mapping;
pub mod query;

pub use category::{
    Category, CategoryCombo, CategoryOptionCombo, DEFAULT_CATEGORY_COMBO_UID,
    DEFAULT_OPTION_COMBO_UID,
};
pub use indicator::{DateRange, ProgramIndicator};
pub use mapping::{CategoryMapping, OptionMapping};
pub use query::{EventQuery, QueryDimension};
