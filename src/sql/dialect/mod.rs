//! SQL Dialect definitions and formatting rules.
//!
//! Analytics tables can live in PostgreSQL, Apache Doris or ClickHouse.
//! Each dialect implements `SqlDialect` to handle its syntax differences:
//!
//! - Identifier quoting: `"` (PostgreSQL/ClickHouse), `` ` `` (Doris)
//! - String literal escaping: backslash is an escape in Doris/ClickHouse
//! - String concatenation: `||` vs `CONCAT()`
//!
//! # Usage
//!
//! ```ignore
//! use pidisag::sql::dialect::{Dialect, SqlDialect};
//!
//! let dialect = Dialect::Postgres;
//! let quoted = dialect.quote_identifier("cX5k9anHEHd");  // "cX5k9anHEHd"
//! ```

mod clickhouse;
mod doris;
pub mod helpers;
mod postgres;

pub use clickhouse::ClickHouse;
pub use doris::Doris;
pub use postgres::Postgres;

use serde::{Deserialize, Serialize};

/// SQL dialect trait - defines how SQL constructs are rendered.
///
/// The default implementations follow ANSI SQL where possible.
pub trait SqlDialect: std::fmt::Debug {
    /// Dialect name for display/logging.
    fn name(&self) -> &'static str;

    // =========================================================================
    // Identifier and Literal Quoting
    // =========================================================================

    /// Quote an identifier (column, alias).
    fn quote_identifier(&self, ident: &str) -> String;

    /// Quote a string literal.
    ///
    /// Single quotes with `''` for escaping by default.
    fn quote_string(&self, s: &str) -> String {
        helpers::quote_string_single(s)
    }

    // =========================================================================
    // Operators
    // =========================================================================

    /// String concatenation operator.
    ///
    /// `None` when the dialect has none; concatenation is then emitted as a
    /// `CONCAT(...)` call.
    fn concat_operator(&self) -> Option<&'static str> {
        Some("||")
    }
}

/// Supported SQL dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    Postgres,
    Doris,
    ClickHouse,
}

impl Dialect {
    /// Get the dialect implementation.
    pub fn dialect(&self) -> &'static dyn SqlDialect {
        match self {
            Dialect::Postgres => &Postgres,
            Dialect::Doris => &Doris,
            Dialect::ClickHouse => &ClickHouse,
        }
    }
}

// Implement SqlDialect for Dialect enum by delegating to concrete types
impl SqlDialect for Dialect {
    fn name(&self) -> &'static str {
        self.dialect().name()
    }

    fn quote_identifier(&self, ident: &str) -> String {
        self.dialect().quote_identifier(ident)
    }

    fn quote_string(&self, s: &str) -> String {
        self.dialect().quote_string(s)
    }

    fn concat_operator(&self) -> Option<&'static str> {
        self.dialect().concat_operator()
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.dialect().name())
    }
}
