//! The token stream handed from the lexer to the parser.
//!
//! A `TokenStream` is built once and never modified. Readers walk it
//! through `Cursor`s, which are `Copy`: a grammar rule that wants to
//! backtrack just keeps the cursor it started from.

use crate::token::{Token, TokenKind};
use std::fmt;

/// The ordered tokens of one input.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    /// Appends a token. Only the tokenizer builds streams.
    pub(crate) fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    /// A cursor positioned at the first token.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor {
            stream: self,
            pos: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// The token kinds in order, mostly useful in tests.
    pub fn kinds(&self) -> Vec<TokenKind> {
        self.tokens.iter().map(|t| t.kind.clone()).collect()
    }
}

impl From<Vec<Token>> for TokenStream {
    fn from(tokens: Vec<Token>) -> Self {
        TokenStream { tokens }
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

/// One token per line.
impl fmt::Display for TokenStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.cursor(), f)
    }
}

/// A read position inside a `TokenStream`.
///
/// Advancing is O(1) and never touches the stream, so any number of
/// cursors can be alive at once.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    stream: &'a TokenStream,
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// The token under the cursor, if any.
    pub fn peek(&self) -> Option<&'a Token> {
        self.stream.tokens.get(self.pos)
    }

    /// The kind of the token under the cursor, if any.
    pub fn peek_kind(&self) -> Option<&'a TokenKind> {
        self.peek().map(|t| &t.kind)
    }

    /// The cursor one token further on. Advancing past the end stays at the end.
    pub fn advance(self) -> Cursor<'a> {
        Cursor {
            stream: self.stream,
            pos: (self.pos + 1).min(self.stream.len()),
        }
    }

    /// Advances only if the next token has exactly this payload-free kind.
    pub(crate) fn eat(self, kind: &TokenKind) -> Option<Cursor<'a>> {
        match self.peek_kind() {
            Some(k) if k == kind => Some(self.advance()),
            _ => None,
        }
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.stream.len()
    }

    /// Index of the token under the cursor, counted from the stream start.
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// The tokens not yet consumed.
    pub fn remaining(&self) -> &'a [Token] {
        &self.stream.tokens[self.pos..]
    }
}

/// Cursors are equal when they point at the same slot of the same stream.
/// Streams are told apart by address, so two empty streams never compare
/// equal either.
impl PartialEq for Cursor<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.stream, other.stream) && self.pos == other.pos
    }
}

impl Eq for Cursor<'_> {}

impl<'a> Iterator for Cursor<'a> {
    type Item = &'a Token;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.peek()?;
        *self = self.advance();
        Some(token)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining().len();
        (n, Some(n))
    }
}

impl ExactSizeIterator for Cursor<'_> {}

/// The remaining tokens, one per line.
impl fmt::Display for Cursor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in self.remaining() {
            writeln!(f, "{}", token)?;
        }
        Ok(())
    }
}
