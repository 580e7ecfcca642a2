//! Apache Doris SQL dialect.
//!
//! Doris speaks the MySQL protocol and inherits most of its quirks:
//! - Backtick identifier quoting (`` `name` ``)
//! - Backslash escapes inside string literals
//! - `||` is logical OR unless `PIPES_AS_CONCAT` is set, so string
//!   concatenation is emitted as `CONCAT(...)`

use super::helpers;
use super::SqlDialect;

/// Apache Doris SQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct Doris;

impl SqlDialect for Doris {
    fn name(&self) -> &'static str {
        "doris"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_backtick(ident)
    }

    fn quote_string(&self, s: &str) -> String {
        helpers::quote_string_backslash(s)
    }

    fn concat_operator(&self) -> Option<&'static str> {
        None
    }
}
