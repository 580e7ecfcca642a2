//! Named-column access to base query result rows.

use std::collections::{BTreeMap, HashMap};

/// A result row whose columns can be read by name.
///
/// `None` covers a missing column and SQL NULL alike.
pub trait ResultRow {
    fn get(&self, column: &str) -> Option<&str>;
}

impl ResultRow for HashMap<String, String> {
    fn get(&self, column: &str) -> Option<&str> {
        HashMap::get(self, column).map(String::as_str)
    }
}

impl ResultRow for HashMap<String, Option<String>> {
    fn get(&self, column: &str) -> Option<&str> {
        HashMap::get(self, column).and_then(|v| v.as_deref())
    }
}

impl ResultRow for BTreeMap<String, String> {
    fn get(&self, column: &str) -> Option<&str> {
        BTreeMap::get(self, column).map(String::as_str)
    }
}

impl<R: ResultRow + ?Sized> ResultRow for &R {
    fn get(&self, column: &str) -> Option<&str> {
        (**self).get(column)
    }
}

/// A row as parallel column-name and value lists, the way a JDBC-style
/// cursor hands it out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamedRow {
    columns: Vec<String>,
    values: Vec<Option<String>>,
}

impl NamedRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: impl Into<String>, value: Option<&str>) -> Self {
        self.push(column, value.map(str::to_string));
        self
    }

    pub fn push(&mut self, column: impl Into<String>, value: Option<String>) {
        self.columns.push(column.into());
        self.values.push(value);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

impl ResultRow for NamedRow {
    fn get(&self, column: &str) -> Option<&str> {
        self.columns
            .iter()
            .position(|c| c == column)
            .and_then(|i| self.values.get(i))
            .and_then(|v| v.as_deref())
    }
}
