//! SQL Tokens - the atomic units of generated SQL fragments.
//!
//! Tokens are dialect-agnostic; quoting and operators are resolved when a
//! stream is serialized for a dialect.

use super::dialect::{Dialect, SqlDialect};

/// Every element a disaggregation fragment can contain.
///
/// Adding a new variant here will cause compile errors everywhere
/// it needs to be handled (exhaustive matching).
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // === Keywords ===
    As,
    Case,
    When,
    Then,
    Else,
    End,
    In,
    False,

    // === Punctuation ===
    Comma,
    LParen,
    RParen,

    // === Operators ===
    Ne,
    /// Only emitted for dialects with a concatenation operator
    Concat,

    Space,

    /// Column or alias, quoted per dialect
    Ident(String),
    /// String literal, escaped per dialect
    LitString(String),
    /// Function name, rendered upper-cased
    FunctionName(String),

    /// Compiled filter predicate, emitted verbatim.
    Raw(String),
}

impl Token {
    /// Serialize this token to a string for the given dialect.
    pub fn serialize(&self, dialect: Dialect) -> String {
        match self {
            Token::As => "AS".into(),
            Token::Case => "CASE".into(),
            Token::When => "WHEN".into(),
            Token::Then => "THEN".into(),
            Token::Else => "ELSE".into(),
            Token::End => "END".into(),
            Token::In => "IN".into(),
            Token::False => "FALSE".into(),

            Token::Comma => ",".into(),
            Token::LParen => "(".into(),
            Token::RParen => ")".into(),

            Token::Ne => "<>".into(),
            Token::Concat => dialect.concat_operator().unwrap_or_default().into(),

            Token::Space => " ".into(),

            Token::Ident(name) => dialect.quote_identifier(name),
            Token::LitString(s) => dialect.quote_string(s),
            Token::FunctionName(name) => name.to_uppercase(),
            Token::Raw(s) => s.clone(),
        }
    }
}

/// A stream of tokens that can be serialized to SQL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, token: Token) -> &mut Self {
        self.tokens.push(token);
        self
    }

    pub fn append(&mut self, other: &TokenStream) -> &mut Self {
        self.tokens.extend(other.tokens.iter().cloned());
        self
    }

    pub fn serialize(&self, dialect: Dialect) -> String {
        self.tokens.iter().map(|t| t.serialize(dialect)).collect()
    }

    pub fn space(&mut self) -> &mut Self {
        self.push(Token::Space)
    }

    pub fn comma(&mut self) -> &mut Self {
        self.push(Token::Comma)
    }

    pub fn lparen(&mut self) -> &mut Self {
        self.push(Token::LParen)
    }

    pub fn rparen(&mut self) -> &mut Self {
        self.push(Token::RParen)
    }
}
