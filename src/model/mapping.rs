// src/model/mapping.rs
use serde::{Deserialize, Serialize};

/// Pairs a category option with the boolean filter that selects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionMapping {
    #[serde(rename = "optionId")]
    pub option_uid: String,
    /// Expression in the program indicator filter language
    pub filter: String,
}

impl OptionMapping {
    pub fn new(option_uid: impl Into<String>, filter: impl Into<String>) -> Self {
        Self {
            option_uid: option_uid.into(),
            filter: filter.into(),
        }
    }
}

/// How the options of one category are derived for a program's events.
///
/// For a well-formed mapping at most one option filter holds for any row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryMapping {
    #[serde(rename = "id")]
    pub uid: String,
    #[serde(rename = "categoryId")]
    pub category_uid: String,
    #[serde(default)]
    pub mapping_name: String,
    /// Evaluated in this order when building SQL
    pub option_mappings: Vec<OptionMapping>,
}

impl CategoryMapping {
    pub fn new(
        uid: impl Into<String>,
        category_uid: impl Into<String>,
        option_mappings: Vec<OptionMapping>,
    ) -> Self {
        Self {
            uid: uid.into(),
            category_uid: category_uid.into(),
            mapping_name: String::new(),
            option_mappings,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.mapping_name = name.into();
        self
    }

    pub fn option_uids(&self) -> impl Iterator<Item = &str> {
        self.option_mappings.iter().map(|m| m.option_uid.as_str())
    }

    pub fn has_option(&self, option_uid: &str) -> bool {
        self.option_uids().any(|o| o == option_uid)
    }

    /// Split a synthesized column value into the option UIDs it was built from.
    ///
    /// The generated column concatenates the UIDs of every option whose filter
    /// matched, in configured order. Returns `None` when the value cannot be
    /// assembled from configured options.
    pub fn decompose<'a>(&'a self, value: &str) -> Option<Vec<&'a str>> {
        if value.is_empty() {
            return None;
        }
        if let Some(option) = self.option_uids().find(|o| *o == value) {
            return Some(vec![option]);
        }

        let options: Vec<&str> = self.option_uids().collect();
        let mut matched = Vec::new();
        split_options(&options, 0, value, &mut matched).then_some(matched)
    }
}

/// Backtracking split of `rest` into options taken in order from `start`,
/// each at most once.
fn split_options<'a>(
    options: &[&'a str],
    start: usize,
    rest: &str,
    matched: &mut Vec<&'a str>,
) -> bool {
    if rest.is_empty() {
        return true;
    }
    for (i, &option) in options.iter().enumerate().skip(start) {
        if option.is_empty() {
            continue;
        }
        if let Some(tail) = rest.strip_prefix(option) {
            matched.push(option);
            if split_options(options, i + 1, tail, matched) {
                return true;
            }
            matched.pop();
        }
    }
    false
}
