//! Defines the `Token` and `TokenKind` types.
//!
//! These are the intermediate representation between the `Tokenizer`
//! (lexer) and the grammar rules in `parser`.

use std::fmt;

/// The specific kind of a `Token`.
///
/// Only `String` and `Number` carry a payload.
#[derive(Debug, PartialEq, Clone)]
pub enum TokenKind {
    /// `[`
    ArrayOpen,
    /// `]`
    ArrayClose,
    /// `{`
    ObjectOpen,
    /// `}`
    ObjectClose,
    /// `:`
    Colon,
    /// `,`
    Comma,
    /// The raw content between two quotes. Escapes are not decoded.
    String(String),
    /// A number, accumulated digit by digit.
    Number(f64),
    /// `true`
    True,
    /// `false`
    False,
    /// `null`
    Null,
}

/// A single token produced by the `Tokenizer`.
#[derive(Debug, PartialEq, Clone)]
pub struct Token {
    /// The kind (and payload) of the token.
    pub kind: TokenKind,
    /// The 1-indexed line the token was scanned on.
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, line: usize) -> Self {
        Token { kind, line }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::ArrayOpen => f.write_str("["),
            TokenKind::ArrayClose => f.write_str("]"),
            TokenKind::ObjectOpen => f.write_str("{"),
            TokenKind::ObjectClose => f.write_str("}"),
            TokenKind::Colon => f.write_str(":"),
            TokenKind::Comma => f.write_str(","),
            TokenKind::String(s) => f.write_str(s),
            TokenKind::Number(n) => write!(f, "{:.6}", n),
            TokenKind::True => f.write_str("TRUE"),
            TokenKind::False => f.write_str("FALSE"),
            TokenKind::Null => f.write_str("NULL"),
        }
    }
}

/// Renders as `line: N: X`, the format used for token dumps.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line: {}: {}", self.line, self.kind)
    }
}
