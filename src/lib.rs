//! # jsontree
//!
//! `jsontree` reads JSON-like text into an owned document tree in two
//! separate passes:
//!
//! * **Lexing:** a line-based `Tokenizer` turns the whole input into a
//!   `TokenStream`. Each token remembers the line it came from. Lines are
//!   read into a bounded buffer; a line that does not fit is rejected.
//! * **Parsing:** a backtracking recursive-descent `Parser` walks the stream
//!   with `Cursor`s and builds a `Node` tree. A rule that does not match
//!   simply yields nothing, and the document entry point reports whether the
//!   stream was consumed completely.
//!
//! Strings are kept exactly as written between their quotes: `\"` does not
//! end a string, and no escape sequence is decoded.
//!
//! ## Quick Start
//!
//! ```
//! use jsontree::{parse_json, tokenize_str, Node};
//!
//! let stream = tokenize_str(r#"{ "name": "Babbage", "id": 1815 }"#).unwrap();
//! let parsed = parse_json(&stream).unwrap();
//! assert!(parsed.remainder().is_none());
//!
//! let id = parsed.node.get_field("id");
//! assert_eq!(id, Some(&Node::Number(1815.0)));
//! ```
//!
//! Or in one step, treating trailing tokens as an error:
//!
//! ```
//! let tree = jsontree::parse_str("[1, true, null]").unwrap();
//! println!("{}", tree);
//! ```

/// Contains the `LexError` and `Error` types.
pub mod error;
/// Contains the grammar rules and the `Parser`.
pub mod parser;
/// Contains `TokenStream` and its `Cursor`.
pub mod stream;
/// Contains the `Token` and `TokenKind` types.
pub mod token;
/// Contains the line-based `Tokenizer`.
pub mod tokenizer;
/// Contains the document tree `Node` and its utilities.
pub mod tree;

pub use error::{Error, LexError};
pub use parser::{parse_json, Parsed, Parser};
pub use stream::{Cursor, TokenStream};
pub use token::{Token, TokenKind};
pub use tokenizer::Tokenizer;
pub use tree::{Node, Pair};

use std::io::BufRead;

// --- Constants ---
/// The default line buffer capacity in bytes, line terminator included.
pub const DEFAULT_MAX_LINE_LEN: usize = 16 * 1024;
/// The default maximum nesting depth of arrays and objects.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Lexes a string slice into a `TokenStream`.
///
/// # Errors
/// Returns `Error::Lex` if some position matches no token, or if a line is
/// longer than `DEFAULT_MAX_LINE_LEN`.
///
/// # Examples
/// ```
/// use jsontree::{tokenize_str, TokenKind};
///
/// let stream = tokenize_str("[1, \"a\"]").unwrap();
/// assert_eq!(
///     stream.kinds(),
///     vec![
///         TokenKind::ArrayOpen,
///         TokenKind::Number(1.0),
///         TokenKind::Comma,
///         TokenKind::String("a".to_string()),
///         TokenKind::ArrayClose,
///     ]
/// );
/// ```
pub fn tokenize_str(input: &str) -> Result<TokenStream, Error> {
    Tokenizer::new(input.as_bytes()).tokenize()
}

/// Lexes everything a reader yields into a `TokenStream`.
pub fn tokenize_reader<R: BufRead>(reader: R) -> Result<TokenStream, Error> {
    Tokenizer::new(reader).tokenize()
}

/// Lexes and parses a whole document.
///
/// Unlike [`parse_json`], this insists that the document uses up every
/// token.
///
/// # Errors
/// * `Error::Lex` if the input cannot be tokenized.
/// * `Error::NoDocument` if the tokens start with neither an array nor an
///   object that parses.
/// * `Error::TrailingTokens` if tokens are left after the document.
pub fn parse_str(input: &str) -> Result<Node, Error> {
    let stream = tokenize_str(input)?;
    let parsed = parse_json(&stream).ok_or(Error::NoDocument)?;
    match parsed.remainder().and_then(|rest| rest.peek()) {
        Some(token) => Err(Error::TrailingTokens { line: token.line }),
        None => Ok(parsed.node),
    }
}
