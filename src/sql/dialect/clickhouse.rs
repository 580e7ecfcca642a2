//! ClickHouse SQL dialect.
//!
//! - ANSI identifier quoting (`"`), backticks also accepted
//! - Backslash escapes inside string literals
//! - `||` string concatenation

use super::helpers;
use super::SqlDialect;

/// ClickHouse SQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct ClickHouse;

impl SqlDialect for ClickHouse {
    fn name(&self) -> &'static str {
        "clickhouse"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_double(ident)
    }

    fn quote_string(&self, s: &str) -> String {
        helpers::quote_string_backslash(s)
    }
}
