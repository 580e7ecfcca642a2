// src/model/indicator.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::category::CategoryCombo;

/// A computed analytic measure over program events or enrollments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramIndicator {
    pub uid: String,
    pub name: String,
    /// Owning program
    pub program: String,
    pub category_combo: CategoryCombo,
    pub attribute_combo: CategoryCombo,
    /// Program category mappings this indicator disaggregates with
    #[serde(default)]
    pub category_mapping_ids: Vec<String>,
    /// Identifier used in place of the indicator UID in composite data value ids
    #[serde(default)]
    pub aggregate_export_data_element: Option<String>,
}

impl ProgramIndicator {
    pub fn new(
        uid: impl Into<String>,
        name: impl Into<String>,
        program: impl Into<String>,
    ) -> Self {
        Self {
            uid: uid.into(),
            name: name.into(),
            program: program.into(),
            category_combo: CategoryCombo::default_combo(),
            attribute_combo: CategoryCombo::default_combo(),
            category_mapping_ids: Vec::new(),
            aggregate_export_data_element: None,
        }
    }

    pub fn with_category_combo(mut self, combo: CategoryCombo) -> Self {
        self.category_combo = combo;
        self
    }

    pub fn with_attribute_combo(mut self, combo: CategoryCombo) -> Self {
        self.attribute_combo = combo;
        self
    }

    pub fn with_mappings(mut self, ids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.category_mapping_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_export_data_element(mut self, id: impl Into<String>) -> Self {
        self.aggregate_export_data_element = Some(id.into());
        self
    }

    /// The measure identifier used when composing `<measure>-<coc>-<aoc>` ids.
    pub fn export_id(&self) -> &str {
        self.aggregate_export_data_element
            .as_deref()
            .unwrap_or(&self.uid)
    }
}

/// Reporting period boundaries, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Whole calendar year, e.g. the `2021` period.
    pub fn year(year: i32) -> Option<Self> {
        Some(Self {
            start: NaiveDate::from_ymd_opt(year, 1, 1)?,
            end: NaiveDate::from_ymd_opt(year, 12, 31)?,
        })
    }
}
