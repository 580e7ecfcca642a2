//! Expression AST for synthesized category columns.
//!
//! Covers exactly the shapes the disaggregation engine emits: option
//! branches (`CASE WHEN <predicate> THEN '<option>' ELSE '' END`), their
//! concatenation, aliases, `<> ''` pruning and `IN (...)` dimension filters.

use super::dialect::{Dialect, SqlDialect};
use super::token::{Token, TokenStream};

// =============================================================================
// Expression AST
// =============================================================================

/// A SQL expression.
///
/// Every variant must be handled in `to_tokens_for_dialect()` - the compiler enforces this.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Column or alias reference
    Column(String),

    /// String literal
    Literal(String),

    /// Left-to-right string concatenation of two or more parts
    Concat(Vec<Expr>),

    /// `left <> right`
    NotEqual { left: Box<Expr>, right: Box<Expr> },

    /// CASE WHEN... THEN... ELSE... END
    Case {
        when_clauses: Vec<(Expr, Expr)>,
        else_clause: Option<Box<Expr>>,
    },

    /// IN: expr IN (values...)
    In { expr: Box<Expr>, values: Vec<Expr> },

    /// Parenthesized expression
    Paren(Box<Expr>),

    /// Predicate from the filter compiler, emitted verbatim.
    ///
    /// # Security Warning
    ///
    /// **Never pass user input to this variant.** The filter compiler owns
    /// escaping of what it produces. Option UIDs and dimension items must
    /// use `Expr::Literal`.
    Raw(String),
}

impl Expr {
    /// Convert this expression to a token stream for a specific dialect.
    pub fn to_tokens_for_dialect(&self, dialect: Dialect) -> TokenStream {
        let mut ts = TokenStream::new();

        match self {
            Expr::Column(name) => {
                ts.push(Token::Ident(name.clone()));
            }

            Expr::Literal(s) => {
                ts.push(Token::LitString(s.clone()));
            }

            Expr::Concat(parts) => {
                if dialect.concat_operator().is_some() {
                    for (i, part) in parts.iter().enumerate() {
                        if i > 0 {
                            ts.space().push(Token::Concat).space();
                        }
                        ts.append(&part.to_tokens_for_dialect(dialect));
                    }
                } else {
                    ts.push(Token::FunctionName("CONCAT".into())).lparen();
                    append_list(&mut ts, parts, dialect);
                    ts.rparen();
                }
            }

            Expr::NotEqual { left, right } => {
                ts.append(&left.to_tokens_for_dialect(dialect));
                ts.space().push(Token::Ne).space();
                ts.append(&right.to_tokens_for_dialect(dialect));
            }

            Expr::Case {
                when_clauses,
                else_clause,
            } => {
                ts.push(Token::Case);
                for (when, then) in when_clauses {
                    ts.space().push(Token::When).space();
                    ts.append(&when.to_tokens_for_dialect(dialect));
                    ts.space().push(Token::Then).space();
                    ts.append(&then.to_tokens_for_dialect(dialect));
                }
                if let Some(else_expr) = else_clause {
                    ts.space().push(Token::Else).space();
                    ts.append(&else_expr.to_tokens_for_dialect(dialect));
                }
                ts.space().push(Token::End);
            }

            Expr::In { expr, values } => {
                // "x IN ()" is not valid SQL and selects nothing
                if values.is_empty() {
                    ts.push(Token::False);
                } else {
                    ts.append(&expr.to_tokens_for_dialect(dialect));
                    ts.space().push(Token::In).space().lparen();
                    append_list(&mut ts, values, dialect);
                    ts.rparen();
                }
            }

            Expr::Paren(inner) => {
                ts.lparen();
                ts.append(&inner.to_tokens_for_dialect(dialect));
                ts.rparen();
            }

            Expr::Raw(sql) => {
                ts.push(Token::Raw(sql.clone()));
            }
        }

        ts
    }

    /// Render this expression as SQL text for a dialect.
    pub fn to_sql(&self, dialect: Dialect) -> String {
        self.to_tokens_for_dialect(dialect).serialize(dialect)
    }
}

fn append_list(ts: &mut TokenStream, items: &[Expr], dialect: Dialect) {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            ts.comma().space();
        }
        ts.append(&item.to_tokens_for_dialect(dialect));
    }
}

// =============================================================================
// Select Expression (expression with alias)
// =============================================================================

/// A SELECT list item: expression with optional alias.
#[derive(Debug, Clone, PartialEq)]
#[must_use = "builders have no effect until used"]
pub struct SelectExpr {
    pub expr: Expr,
    pub alias: Option<String>,
}

impl SelectExpr {
    pub fn new(expr: Expr) -> Self {
        Self { expr, alias: None }
    }

    pub fn with_alias(mut self, alias: &str) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn to_sql(&self, dialect: Dialect) -> String {
        let mut ts = self.expr.to_tokens_for_dialect(dialect);
        if let Some(alias) = &self.alias {
            ts.space()
                .push(Token::As)
                .space()
                .push(Token::Ident(alias.clone()));
        }
        ts.serialize(dialect)
    }
}

// =============================================================================
// Expression Constructors
// =============================================================================

/// Create a column reference.
pub fn col(name: &str) -> Expr {
    Expr::Column(name.into())
}

/// Create a string literal.
pub fn lit_str(s: &str) -> Expr {
    Expr::Literal(s.into())
}

/// Raw SQL expression (pass-through, no parsing).
///
/// # Security Warning
///
/// **Never pass user input to this function.** The SQL is not sanitized.
pub fn raw_sql(sql: &str) -> Expr {
    Expr::Raw(sql.into())
}

/// `CASE WHEN condition THEN then ELSE otherwise END`
pub fn if_then_else(condition: Expr, then: Expr, otherwise: Expr) -> Expr {
    Expr::Case {
        when_clauses: vec![(condition, then)],
        else_clause: Some(Box::new(otherwise)),
    }
}

/// Concatenate expressions left to right.
///
/// Returns `None` for an empty list; a single expression is returned as-is.
pub fn concat_all(parts: impl IntoIterator<Item = Expr>) -> Option<Expr> {
    let mut parts: Vec<Expr> = parts.into_iter().collect();
    match parts.len() {
        0 => None,
        1 => parts.pop(),
        _ => Some(Expr::Concat(parts)),
    }
}

// =============================================================================
// Expression Builder Trait
// =============================================================================

/// Extension trait for building expressions fluently.
pub trait ExprExt: Sized {
    fn into_expr(self) -> Expr;

    fn ne(self, other: impl Into<Expr>) -> Expr {
        Expr::NotEqual {
            left: Box::new(self.into_expr()),
            right: Box::new(other.into()),
        }
    }

    fn in_list(self, values: Vec<Expr>) -> Expr {
        Expr::In {
            expr: Box::new(self.into_expr()),
            values,
        }
    }

    fn paren(self) -> Expr {
        Expr::Paren(Box::new(self.into_expr()))
    }

    fn alias(self, name: &str) -> SelectExpr {
        SelectExpr::new(self.into_expr()).with_alias(name)
    }
}

impl ExprExt for Expr {
    fn into_expr(self) -> Expr {
        self
    }
}

impl From<&str> for Expr {
    fn from(s: &str) -> Self {
        lit_str(s)
    }
}
