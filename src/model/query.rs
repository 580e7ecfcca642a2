// src/model/query.rs
use serde::{Deserialize, Serialize};

/// A dimension or filter of an analytics query.
///
/// The set of dimension kinds the disaggregation engine cares about is
/// closed; everything else is carried as `Other` and passed through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QueryDimension {
    Category { uid: String, items: Vec<String> },
    CategoryOptionGroupSet { uid: String, items: Vec<String> },
    /// Periods, org units, data items and other dimensions
    Other { uid: String, items: Vec<String> },
}

impl QueryDimension {
    pub fn category(uid: impl Into<String>, items: impl IntoIterator<Item = impl Into<String>>) -> Self {
        QueryDimension::Category {
            uid: uid.into(),
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    pub fn option_group_set(
        uid: impl Into<String>,
        items: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        QueryDimension::CategoryOptionGroupSet {
            uid: uid.into(),
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    pub fn other(uid: impl Into<String>, items: impl IntoIterator<Item = impl Into<String>>) -> Self {
        QueryDimension::Other {
            uid: uid.into(),
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    pub fn uid(&self) -> &str {
        match self {
            QueryDimension::Category { uid, .. }
            | QueryDimension::CategoryOptionGroupSet { uid, .. }
            | QueryDimension::Other { uid, .. } => uid,
        }
    }

    /// Selected items; empty means all items.
    pub fn items(&self) -> &[String] {
        match self {
            QueryDimension::Category { items, .. }
            | QueryDimension::CategoryOptionGroupSet { items, .. }
            | QueryDimension::Other { items, .. } => items,
        }
    }

    pub fn category_uid(&self) -> Option<&str> {
        match self {
            QueryDimension::Category { uid, .. } => Some(uid),
            _ => None,
        }
    }
}

/// The parts of an event analytics query the disaggregation engine reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventQuery {
    #[serde(default)]
    pub dimensions: Vec<QueryDimension>,
    #[serde(default)]
    pub filters: Vec<QueryDimension>,
}

impl EventQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dimension(mut self, dimension: QueryDimension) -> Self {
        self.dimensions.push(dimension);
        self
    }

    pub fn with_filter(mut self, filter: QueryDimension) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn dimensions_and_filters(&self) -> impl Iterator<Item = &QueryDimension> {
        self.dimensions.iter().chain(self.filters.iter())
    }

    /// UIDs of category dimensions and filters, in query order.
    pub fn category_uids(&self) -> impl Iterator<Item = &str> {
        self.dimensions_and_filters()
            .filter_map(QueryDimension::category_uid)
    }

    /// UIDs of categories requested as dimensions. Filters are not included.
    pub fn dimension_category_uids(&self) -> impl Iterator<Item = &str> {
        self.dimensions.iter().filter_map(QueryDimension::category_uid)
    }

    pub fn has_category_dimensions(&self) -> bool {
        self.category_uids().next().is_some()
    }
}
