//! The immutable result of disaggregation planning.

use std::collections::HashMap;

use crate::model::CategoryMapping;

/// Stands in for a side (COC or AOC) that needs no resolution.
pub const WILDCARD: &str = "*";

/// What the planner decided for one query.
///
/// Built once by [`DisaggregationPlanner::plan`](super::DisaggregationPlanner::plan),
/// then shared read-only by the column generator and the row resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisaggregationContext {
    pub(crate) indicator_uid: String,
    pub(crate) indicator_name: String,
    pub(crate) combo_uid: String,
    pub(crate) combo_name: String,
    /// Mapped categories that are explicit query dimensions
    pub(crate) dimension_categories: Vec<String>,
    /// Categories synthesized as extra columns, in SQL column order
    pub(crate) coc_categories: Vec<String>,
    pub(crate) category_mappings: HashMap<String, CategoryMapping>,
    pub(crate) coc_resolver: HashMap<String, String>,
    pub(crate) aoc_resolver: HashMap<String, String>,
    /// Categories read from a row to assemble the COC key
    pub(crate) coc_side: Vec<String>,
    /// Categories read from a row to assemble the AOC key
    pub(crate) aoc_side: Vec<String>,
    pub(crate) category_names: HashMap<String, String>,
}

impl DisaggregationContext {
    /// The "nothing to do" context.
    pub fn noop() -> Self {
        Self::default()
    }

    pub fn is_noop(&self) -> bool {
        self.category_mappings.is_empty()
    }

    pub fn is_active(&self) -> bool {
        !self.is_noop()
    }

    pub fn indicator_uid(&self) -> &str {
        &self.indicator_uid
    }

    pub fn indicator_name(&self) -> &str {
        &self.indicator_name
    }

    pub fn combo_uid(&self) -> &str {
        &self.combo_uid
    }

    pub fn combo_name(&self) -> &str {
        &self.combo_name
    }

    pub fn dimension_categories(&self) -> &[String] {
        &self.dimension_categories
    }

    pub fn coc_categories(&self) -> &[String] {
        &self.coc_categories
    }

    pub fn category_mappings(&self) -> &HashMap<String, CategoryMapping> {
        &self.category_mappings
    }

    pub fn mapping(&self, category_uid: &str) -> Option<&CategoryMapping> {
        self.category_mappings.get(category_uid)
    }

    pub fn coc_resolver(&self) -> &HashMap<String, String> {
        &self.coc_resolver
    }

    pub fn aoc_resolver(&self) -> &HashMap<String, String> {
        &self.aoc_resolver
    }

    pub fn coc_side(&self) -> &[String] {
        &self.coc_side
    }

    pub fn aoc_side(&self) -> &[String] {
        &self.aoc_side
    }

    /// Display name of a category, falling back to its UID.
    pub fn category_name<'a>(&'a self, category_uid: &'a str) -> &'a str {
        self.category_names
            .get(category_uid)
            .map(String::as_str)
            .unwrap_or(category_uid)
    }

    /// Whether a query dimension's column must come from category mapping
    /// filters rather than from the analytics table.
    pub fn is_disag_dimension(&self, uid: &str) -> bool {
        self.category_mappings.contains_key(uid)
    }
}
