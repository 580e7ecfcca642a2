//! SQL generation module.
//!
//! A small type-safe SQL builder that renders expression fragments for
//! the analytics databases. It includes:
//!
//! - [`expr`] - Expression AST and builder DSL
//! - [`token`] - Token types for SQL generation
//! - [`dialect`] - SQL dialect implementations

pub mod dialect;
pub mod expr;
pub mod token;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types at the sql module level
pub use dialect::{Dialect, SqlDialect};
pub use expr::{col, concat_all, if_then_else, lit_str, raw_sql, Expr, ExprExt, SelectExpr};
pub use token::{Token, TokenStream};
