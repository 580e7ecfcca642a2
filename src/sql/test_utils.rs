//! Test utilities for SQL emission validation.
//!
//! Generated fragments are wrapped in a SELECT and parsed with sqlparser-rs
//! so every dialect's output is checked for syntactic validity.

use sqlparser::dialect::{ClickHouseDialect, MySqlDialect, PostgreSqlDialect};
use sqlparser::parser::Parser;

use super::dialect::Dialect;

/// Validates that a SQL string is syntactically valid for the given dialect.
pub fn validate_sql(sql: &str, dialect: Dialect) -> Result<(), String> {
    let parser_dialect: Box<dyn sqlparser::dialect::Dialect> = match dialect {
        Dialect::Postgres => Box::new(PostgreSqlDialect {}),
        Dialect::Doris => Box::new(MySqlDialect {}), // Doris speaks the MySQL grammar
        Dialect::ClickHouse => Box::new(ClickHouseDialect {}),
    };

    Parser::parse_sql(&*parser_dialect, sql)
        .map(|_| ())
        .map_err(|e| format!("Invalid SQL for {:?}: {}\nSQL: {}", dialect, e, sql))
}

/// Validates a list of SELECT items by wrapping them in a full statement.
pub fn validate_select_items(items: &[String], dialect: Dialect) -> Result<(), String> {
    validate_sql(
        &format!("SELECT {} FROM analytics_event", items.join(", ")),
        dialect,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_valid_sql() {
        validate_sql("SELECT * FROM analytics_event", Dialect::Postgres).unwrap();
        validate_sql("SELECT `ou` FROM analytics_event", Dialect::Doris).unwrap();
        validate_sql("SELECT \"ou\" FROM analytics_event", Dialect::ClickHouse).unwrap();
    }

    #[test]
    fn test_validate_invalid_sql() {
        let result = validate_sql("SELEC * FORM analytics_event", Dialect::Postgres);
        assert!(result.is_err());
    }
}
