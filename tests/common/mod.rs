//! Shared fixtures for integration tests.
//!
//! The 2×2 fixture: category A (A1, A2) × category B (B1, B2) with option
//! combos C11, C12, C21, C22.
#![allow(dead_code)]

use std::collections::HashMap;

use pidisag::catalog::InMemoryCatalog;
use pidisag::disag::{FilterCompileError, FilterCompiler};
use pidisag::model::{
    Category, CategoryCombo, CategoryMapping, CategoryOptionCombo, DateRange, OptionMapping,
    ProgramIndicator,
};
use pidisag::sql::Dialect;

pub const INDICATOR: &str = "piCases0001";
pub const CAT_A: &str = "catA";
pub const CAT_B: &str = "catB";

pub fn combo_2x2() -> CategoryCombo {
    CategoryCombo::new(
        "ccAB0000001",
        "A and B",
        vec![
            Category::new(CAT_A, "Category A", ["A1", "A2"]),
            Category::new(CAT_B, "Category B", ["B1", "B2"]),
        ],
        vec![
            CategoryOptionCombo::new("C11", ["A1", "B1"]),
            CategoryOptionCombo::new("C12", ["A1", "B2"]),
            CategoryOptionCombo::new("C21", ["A2", "B1"]),
            CategoryOptionCombo::new("C22", ["A2", "B2"]),
        ],
    )
}

pub fn mapping_a() -> CategoryMapping {
    CategoryMapping::new(
        "mapA",
        CAT_A,
        vec![
            OptionMapping::new("A1", "#{st.a} == 1"),
            OptionMapping::new("A2", "#{st.a} == 2"),
        ],
    )
    .with_name("A mapping")
}

pub fn mapping_b() -> CategoryMapping {
    CategoryMapping::new(
        "mapB",
        CAT_B,
        vec![
            OptionMapping::new("B1", "#{st.b} == 1"),
            OptionMapping::new("B2", "#{st.b} == 2"),
        ],
    )
    .with_name("B mapping")
}

/// Indicator disaggregated by the 2×2 combo with both mappings.
pub fn indicator_2x2() -> ProgramIndicator {
    ProgramIndicator::new(INDICATOR, "Cases", "prgInpatien")
        .with_category_combo(combo_2x2())
        .with_mappings(["mapA", "mapB"])
}

/// Same indicator with the 2×2 combo as attribute combo instead.
pub fn indicator_2x2_attribute() -> ProgramIndicator {
    ProgramIndicator::new(INDICATOR, "Cases", "prgInpatien")
        .with_attribute_combo(combo_2x2())
        .with_mappings(["mapA", "mapB"])
}

pub fn catalog_2x2() -> InMemoryCatalog {
    InMemoryCatalog::new()
        .with_mapping(mapping_a())
        .with_mapping(mapping_b())
}

pub fn range() -> DateRange {
    DateRange::year(2021).expect("valid year")
}

/// Filter compiler backed by a fixed translation table.
pub struct StubCompiler {
    translations: HashMap<String, String>,
}

impl StubCompiler {
    pub fn new<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            translations: pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    pub fn for_2x2() -> Self {
        Self::new([
            ("#{st.a} == 1", "\"a\" = 1"),
            ("#{st.a} == 2", "\"a\" = 2"),
            ("#{st.b} == 1", "\"b\" = 1"),
            ("#{st.b} == 2", "\"b\" = 2"),
        ])
    }
}

impl FilterCompiler for StubCompiler {
    fn compile(
        &self,
        expression: &str,
        _indicator: &ProgramIndicator,
        _range: &DateRange,
    ) -> Result<String, FilterCompileError> {
        self.translations
            .get(expression)
            .cloned()
            .ok_or_else(|| FilterCompileError::new(format!("cannot compile '{expression}'")))
    }
}

pub fn row(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Parse SQL with sqlparser for the given dialect, panicking on failure.
pub fn assert_valid_sql(sql: &str, dialect: Dialect) {
    use sqlparser::dialect::{ClickHouseDialect, MySqlDialect, PostgreSqlDialect};
    use sqlparser::parser::Parser;

    let parser_dialect: Box<dyn sqlparser::dialect::Dialect> = match dialect {
        Dialect::Postgres => Box::new(PostgreSqlDialect {}),
        Dialect::Doris => Box::new(MySqlDialect {}),
        Dialect::ClickHouse => Box::new(ClickHouseDialect {}),
    };

    if let Err(e) = Parser::parse_sql(&*parser_dialect, sql) {
        panic!("Invalid SQL for {dialect:?}: {e}\nSQL: {sql}");
    }
}
