//! Contains the grammar rules and the `Parser` that drives them.
//!
//! ```text
//! value    = object | array | string | number | true | false | null
//! object   = "{" [members] "}"
//! array    = "[" [elements] "]"
//! members  = pair ("," pair)*
//! elements = value ("," value)*
//! pair     = string ":" value
//! ```
//!
//! Every rule takes a `Cursor` and returns `Some(Parsed)` with the node it
//! built and the cursor after it, or `None`. A rule that fails has no
//! effect: cursors are `Copy` and nothing in the token stream is ever
//! changed, and whatever the rule had built is dropped before it returns.
//! This is what makes retrying another alternative from the same cursor
//! safe. Failures carry no location or reason.

use crate::stream::{Cursor, TokenStream};
use crate::token::TokenKind;
use crate::tree::{Node, Pair};
use crate::DEFAULT_MAX_DEPTH;
use log::trace;

/// A successful rule match.
#[derive(Debug, PartialEq, Clone)]
pub struct Parsed<'a> {
    /// The node the rule built.
    pub node: Node,
    /// The first token the rule did not consume.
    pub rest: Cursor<'a>,
}

impl<'a> Parsed<'a> {
    /// The unconsumed tail, or `None` if the rule used up the whole stream.
    pub fn remainder(&self) -> Option<Cursor<'a>> {
        if self.rest.is_at_end() {
            None
        } else {
            Some(self.rest)
        }
    }

    pub fn is_complete(&self) -> bool {
        self.rest.is_at_end()
    }
}

// --- Leaf rules ---

/// `string`: a single string token.
pub fn parse_string(cursor: Cursor<'_>) -> Option<Parsed<'_>> {
    match cursor.peek_kind()? {
        TokenKind::String(s) => Some(Parsed {
            node: Node::String(s.clone()),
            rest: cursor.advance(),
        }),
        _ => None,
    }
}

/// `number`: a single number token.
pub fn parse_number(cursor: Cursor<'_>) -> Option<Parsed<'_>> {
    match cursor.peek_kind()? {
        TokenKind::Number(n) => Some(Parsed {
            node: Node::Number(*n),
            rest: cursor.advance(),
        }),
        _ => None,
    }
}

/// `true`, `false` or `null`.
pub fn parse_keyword(cursor: Cursor<'_>) -> Option<Parsed<'_>> {
    let node = match cursor.peek_kind()? {
        TokenKind::True => Node::True,
        TokenKind::False => Node::False,
        TokenKind::Null => Node::Null,
        _ => return None,
    };
    Some(Parsed {
        node,
        rest: cursor.advance(),
    })
}

/// The recursive part of the grammar.
///
/// Only carries configuration; every rule is a pure function of the cursor
/// it is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parser {
    /// Arrays and objects nested deeper than this do not match.
    max_depth: usize,
}

impl Default for Parser {
    fn default() -> Self {
        Parser {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how deeply arrays and objects may nest.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// The document entry point: an array, or failing that an object.
    ///
    /// On `None` nothing was recognized and the caller's cursor is still
    /// where it was. On success, [`Parsed::remainder`] tells apart a fully
    /// consumed stream from one with trailing tokens.
    pub fn parse<'a>(&self, cursor: Cursor<'a>) -> Option<Parsed<'a>> {
        let parsed = self
            .array_at(cursor, 0)
            .or_else(|| self.object_at(cursor, 0));
        if parsed.is_none() {
            trace!("no array or object at token {}", cursor.offset());
        }
        parsed
    }

    /// `value`, picked by the kind of the next token.
    ///
    /// Every alternative starts with a different token, so this matches
    /// exactly what trying object, array, true, false, null, string and
    /// number in turn would.
    pub fn value<'a>(&self, cursor: Cursor<'a>) -> Option<Parsed<'a>> {
        self.value_at(cursor, 0)
    }

    pub fn array<'a>(&self, cursor: Cursor<'a>) -> Option<Parsed<'a>> {
        self.array_at(cursor, 0)
    }

    pub fn object<'a>(&self, cursor: Cursor<'a>) -> Option<Parsed<'a>> {
        self.object_at(cursor, 0)
    }

    /// `elements`, returned inside its `Elements` wrapper.
    pub fn elements<'a>(&self, cursor: Cursor<'a>) -> Option<Parsed<'a>> {
        let (items, rest) = self.elements_at(cursor, 0)?;
        Some(Parsed {
            node: Node::Elements(items),
            rest,
        })
    }

    /// `members`, returned inside its `Members` wrapper.
    pub fn members<'a>(&self, cursor: Cursor<'a>) -> Option<Parsed<'a>> {
        let (pairs, rest) = self.members_at(cursor, 0)?;
        Some(Parsed {
            node: Node::Members(pairs),
            rest,
        })
    }

    pub fn pair<'a>(&self, cursor: Cursor<'a>) -> Option<Parsed<'a>> {
        let (pair, rest) = self.pair_at(cursor, 0)?;
        Some(Parsed {
            node: Node::Pair(pair),
            rest,
        })
    }

    fn value_at<'a>(&self, cursor: Cursor<'a>, depth: usize) -> Option<Parsed<'a>> {
        match cursor.peek_kind()? {
            TokenKind::ObjectOpen => self.object_at(cursor, depth),
            TokenKind::ArrayOpen => self.array_at(cursor, depth),
            TokenKind::True | TokenKind::False | TokenKind::Null => parse_keyword(cursor),
            TokenKind::String(_) => parse_string(cursor),
            TokenKind::Number(_) => parse_number(cursor),
            _ => None,
        }
    }

    fn array_at<'a>(&self, cursor: Cursor<'a>, depth: usize) -> Option<Parsed<'a>> {
        let inside = cursor.eat(&TokenKind::ArrayOpen)?;
        if depth >= self.max_depth {
            trace!("array at token {} nests too deep", cursor.offset());
            return None;
        }
        // The element list is optional; without it we are right after '['.
        let (items, rest) = self
            .elements_at(inside, depth + 1)
            .unwrap_or((Vec::new(), inside));
        let rest = rest.eat(&TokenKind::ArrayClose)?;
        Some(Parsed {
            node: Node::Array(items),
            rest,
        })
    }

    fn object_at<'a>(&self, cursor: Cursor<'a>, depth: usize) -> Option<Parsed<'a>> {
        let inside = cursor.eat(&TokenKind::ObjectOpen)?;
        if depth >= self.max_depth {
            trace!("object at token {} nests too deep", cursor.offset());
            return None;
        }
        let (pairs, rest) = self
            .members_at(inside, depth + 1)
            .unwrap_or((Vec::new(), inside));
        let rest = rest.eat(&TokenKind::ObjectClose)?;
        Some(Parsed {
            node: Node::Object(pairs),
            rest,
        })
    }

    /// One value, then any number of `, value`. A comma that is not
    /// followed by a value fails the whole list.
    fn elements_at<'a>(&self, cursor: Cursor<'a>, depth: usize) -> Option<(Vec<Node>, Cursor<'a>)> {
        let first = self.value_at(cursor, depth)?;
        let mut items = vec![first.node];
        let mut rest = first.rest;
        while let Some(after_comma) = rest.eat(&TokenKind::Comma) {
            let next = self.value_at(after_comma, depth)?;
            items.push(next.node);
            rest = next.rest;
        }
        Some((items, rest))
    }

    fn members_at<'a>(&self, cursor: Cursor<'a>, depth: usize) -> Option<(Vec<Pair>, Cursor<'a>)> {
        let (first, mut rest) = self.pair_at(cursor, depth)?;
        let mut pairs = vec![first];
        while let Some(after_comma) = rest.eat(&TokenKind::Comma) {
            let (pair, after_pair) = self.pair_at(after_comma, depth)?;
            pairs.push(pair);
            rest = after_pair;
        }
        Some((pairs, rest))
    }

    fn pair_at<'a>(&self, cursor: Cursor<'a>, depth: usize) -> Option<(Pair, Cursor<'a>)> {
        let key = match cursor.peek_kind()? {
            TokenKind::String(key) => key,
            _ => return None,
        };
        let after_colon = cursor.advance().eat(&TokenKind::Colon)?;
        let value = self.value_at(after_colon, depth)?;
        Some((Pair::new(key.clone(), value.node), value.rest))
    }
}

/// Parses a whole token stream with the default settings.
///
/// `None` means neither an array nor an object starts the stream; the
/// stream itself is untouched and can be inspected or printed again.
pub fn parse_json(stream: &TokenStream) -> Option<Parsed<'_>> {
    Parser::default().parse(stream.cursor())
}
