//! The line-based tokenizer (lexer).
//!
//! Input is read one physical line at a time into a bounded buffer. Each
//! line is scanned on its raw bytes, using a lookup table to classify the
//! first byte of a token and `memchr` to jump through string literals.
//! The whole input is turned into a `TokenStream` before any parsing
//! happens; if any position cannot be classified the entire stream is
//! dropped and an error is returned instead.

use crate::error::{Error, LexError};
use crate::stream::TokenStream;
use crate::token::{Token, TokenKind};
use crate::DEFAULT_MAX_LINE_LEN;
use log::{debug, warn};
use memchr::memchr2;
use std::io::{BufRead, Read};
use std::str;

// --- The Lookup Table (LUT) ---
// One entry per byte value; the class decides which scanner runs.
pub(crate) const W: u8 = 1; // Whitespace
pub(crate) const S: u8 = 2; // Structural
pub(crate) const L: u8 = 3; // Keyword start
pub(crate) const D: u8 = 4; // Digit (and '-')
pub(crate) const Q: u8 = 5; // Quote

static BYTE_PROPERTIES: [u8; 256] = {
    let mut table = [0; 256];
    // 1: Whitespace
    table[b' ' as usize] = W;
    table[b'\n' as usize] = W;
    table[b'\r' as usize] = W;
    table[b'\t' as usize] = W;
    table[0x0B] = W; // vertical tab
    table[0x0C] = W; // form feed

    // 2: Structural
    table[b'{' as usize] = S;
    table[b'}' as usize] = S;
    table[b'[' as usize] = S;
    table[b']' as usize] = S;
    table[b':' as usize] = S;
    table[b',' as usize] = S;

    // 3: Keyword
    table[b't' as usize] = L;
    table[b'f' as usize] = L;
    table[b'n' as usize] = L;

    // 5: Quote
    table[b'"' as usize] = Q;

    // 4: Digit (and '-')
    table[b'-' as usize] = D;
    let mut digit = b'0';
    while digit <= b'9' {
        table[digit as usize] = D;
        digit += 1;
    }

    // 0: Everything else cannot start a token
    table
};

/// What scanning one position of a line produced.
#[derive(Debug)]
enum Scan {
    /// A token; the scanner has moved past it.
    Token(Token),
    /// Only whitespace was left on the line.
    EndOfLine,
    /// Nothing matched. The scanner did not move.
    NoMatch { column: usize, found: char },
}

/// Scans the tokens of a single line.
struct LineScanner<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
    line: usize,
}

impl<'a> LineScanner<'a> {
    fn new(text: &'a str, line: usize) -> Self {
        LineScanner {
            text,
            bytes: text.as_bytes(),
            pos: 0,
            line,
        }
    }

    #[inline]
    fn skip_whitespace(&mut self) {
        while let Some(&byte) = self.bytes.get(self.pos) {
            if BYTE_PROPERTIES[byte as usize] != W {
                break;
            }
            self.pos += 1;
        }
    }

    fn next_token(&mut self) -> Scan {
        self.skip_whitespace();

        let byte = match self.bytes.get(self.pos) {
            Some(&b) => b,
            None => return Scan::EndOfLine,
        };
        let start = self.pos;

        let kind = match BYTE_PROPERTIES[byte as usize] {
            S => {
                self.pos += 1;
                Some(match byte {
                    b'[' => TokenKind::ArrayOpen,
                    b']' => TokenKind::ArrayClose,
                    b'{' => TokenKind::ObjectOpen,
                    b'}' => TokenKind::ObjectClose,
                    b':' => TokenKind::Colon,
                    _ => TokenKind::Comma,
                })
            }
            L => self.lex_keyword(byte),
            Q => Some(self.lex_string()),
            D => self.lex_number(),
            _ => None,
        };

        match kind {
            Some(kind) => Scan::Token(Token::new(kind, self.line)),
            None => Scan::NoMatch {
                column: start + 1,
                found: self.text[start..]
                    .chars()
                    .next()
                    .unwrap_or(char::REPLACEMENT_CHARACTER),
            },
        }
    }

    /// Matches `true`, `false` or `null`, but not as the prefix of a longer word.
    fn lex_keyword(&mut self, first: u8) -> Option<TokenKind> {
        let (word, kind): (&[u8], TokenKind) = match first {
            b't' => (b"true", TokenKind::True),
            b'f' => (b"false", TokenKind::False),
            _ => (b"null", TokenKind::Null),
        };
        let end = self.pos + word.len();
        if self.bytes.get(self.pos..end) != Some(word) {
            return None;
        }
        match self.bytes.get(end) {
            Some(&b) if b.is_ascii_alphanumeric() || b == b'_' => None,
            _ => {
                self.pos = end;
                Some(kind)
            }
        }
    }

    /// Scans a string literal. The content is kept exactly as written:
    /// `\"` does not end the string, but it is not unescaped either.
    fn lex_string(&mut self) -> TokenKind {
        let content_start = self.pos + 1;
        let mut i = content_start;

        while let Some(offset) = memchr2(b'"', b'\\', &self.bytes[i..]) {
            let at = i + offset;
            if self.bytes[at] == b'"' {
                self.pos = at + 1;
                return TokenKind::String(self.text[content_start..at].to_string());
            }
            // A backslash only protects a quote right after it.
            i = if self.bytes.get(at + 1) == Some(&b'"') {
                at + 2
            } else {
                at + 1
            };
        }

        // No closing quote: keep the rest of the line and carry on.
        warn!(
            "line {}, column {}: unterminated string literal",
            self.line, content_start
        );
        let rest = &self.text[content_start..];
        let rest = rest.strip_suffix('\n').unwrap_or(rest);
        let rest = rest.strip_suffix('\r').unwrap_or(rest);
        self.pos = self.bytes.len();
        TokenKind::String(rest.to_string())
    }

    /// Scans a number by accumulating its digits straight into an `f64`.
    ///
    /// The result is not guaranteed to be bit-identical to `str::parse::<f64>`
    /// on every input; it is what the multiply-add accumulation yields.
    fn lex_number(&mut self) -> Option<TokenKind> {
        let bytes = self.bytes;
        let mut i = self.pos;

        let negative = bytes.get(i) == Some(&b'-');
        if negative {
            i += 1;
        }

        // Integer part: a lone zero, or a nonzero digit and any digits after it.
        let mut value = 0.0_f64;
        match bytes.get(i) {
            Some(b'0') => i += 1,
            Some(b'1'..=b'9') => {
                while let Some(&(d @ b'0'..=b'9')) = bytes.get(i) {
                    value = value * 10.0 + f64::from(d - b'0');
                    i += 1;
                }
            }
            _ => return None,
        }

        // Fraction: the point belongs to the number even with no digits after it.
        if bytes.get(i) == Some(&b'.') {
            i += 1;
            let mut scale = 1.0_f64;
            while let Some(&(d @ b'0'..=b'9')) = bytes.get(i) {
                scale /= 10.0;
                value += f64::from(d - b'0') * scale;
                i += 1;
            }
        }

        if negative {
            value = -value;
        }

        // Exponent: the marker and its sign are consumed even without digits,
        // which leaves the exponent at 0.
        if matches!(bytes.get(i), Some(b'e' | b'E')) {
            i += 1;
            let exp_negative = match bytes.get(i) {
                Some(b'-') => {
                    i += 1;
                    true
                }
                Some(b'+') => {
                    i += 1;
                    false
                }
                _ => false,
            };
            let mut exponent: i32 = 0;
            while let Some(&(d @ b'0'..=b'9')) = bytes.get(i) {
                exponent = exponent
                    .saturating_mul(10)
                    .saturating_add(i32::from(d - b'0'));
                i += 1;
            }
            if exp_negative {
                exponent = -exponent;
            }
            value *= 10f64.powi(exponent);
        }

        self.pos = i;
        Some(TokenKind::Number(value))
    }
}

/// The lexer. Owns its reader, the line buffer and the line counter.
pub struct Tokenizer<R> {
    reader: R,
    buf: Vec<u8>,
    line: usize,
    max_line_len: usize,
}

impl<R: BufRead> Tokenizer<R> {
    /// Creates a `Tokenizer` with the default line buffer capacity.
    pub fn new(reader: R) -> Self {
        Tokenizer {
            reader,
            buf: Vec::new(),
            line: 0,
            max_line_len: DEFAULT_MAX_LINE_LEN,
        }
    }

    /// Sets the line buffer capacity in bytes, line terminator included.
    /// Longer lines are rejected, never truncated.
    pub fn with_max_line_len(mut self, max_line_len: usize) -> Self {
        self.max_line_len = max_line_len.max(1);
        self
    }

    /// Reads the next physical line into the buffer.
    /// Returns `false` at end of input.
    fn read_line(&mut self) -> Result<bool, Error> {
        self.buf.clear();
        // One byte past the capacity is enough to tell that a line is too long.
        let limit = u64::try_from(self.max_line_len)
            .unwrap_or(u64::MAX)
            .saturating_add(1);
        let n = (&mut self.reader)
            .take(limit)
            .read_until(b'\n', &mut self.buf)?;
        if n == 0 {
            return Ok(false);
        }
        self.line += 1;
        if self.buf.len() > self.max_line_len {
            debug!("line {}: longer than {} bytes", self.line, self.max_line_len);
            return Err(LexError::LineTooLong {
                line: self.line,
                max: self.max_line_len,
            }
            .into());
        }
        Ok(true)
    }

    /// Lexes the whole input.
    ///
    /// # Errors
    /// Returns `Error::Io` if reading fails and `Error::Lex` if a line is too
    /// long, is not UTF-8, or contains a character no token starts with.
    /// In every error case the tokens gathered so far are dropped.
    pub fn tokenize(mut self) -> Result<TokenStream, Error> {
        let mut stream = TokenStream::default();

        while self.read_line()? {
            let line = self.line;
            let text = str::from_utf8(&self.buf).map_err(|_| LexError::InvalidUtf8 { line })?;
            let mut scanner = LineScanner::new(text, line);
            let before = stream.len();

            loop {
                match scanner.next_token() {
                    Scan::Token(token) => stream.push(token),
                    Scan::EndOfLine => break,
                    Scan::NoMatch { column, found } => {
                        debug!("line {}: no token matches at column {}", line, column);
                        return Err(LexError::UnexpectedCharacter {
                            line,
                            column,
                            found,
                        }
                        .into());
                    }
                }
            }
            debug!("line {}: {} tokens", line, stream.len() - before);
        }

        Ok(stream)
    }
}

// --- Unit Tests for Tokenizer ---
#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    // Helper to collect tokens into just their kinds for easy comparison
    fn collect_token_kinds(input: &str) -> Result<Vec<TokenKind>, Error> {
        Tokenizer::new(input.as_bytes())
            .tokenize()
            .map(|stream| stream.kinds())
    }

    fn lex_error(input: &str) -> LexError {
        match collect_token_kinds(input) {
            Err(Error::Lex(e)) => e,
            other => panic!("expected a lex error, got {:?}", other),
        }
    }

    fn string(s: &str) -> TokenKind {
        TokenKind::String(s.to_string())
    }

    #[test]
    fn test_tokenizer_structurals() {
        let expected = vec![
            TokenKind::ObjectOpen,
            TokenKind::ObjectClose,
            TokenKind::ArrayOpen,
            TokenKind::ArrayClose,
            TokenKind::Colon,
            TokenKind::Comma,
        ];
        assert_eq!(collect_token_kinds("{}[]:,").unwrap(), expected);
    }

    #[test]
    fn test_tokenizer_keywords() {
        let expected = vec![TokenKind::True, TokenKind::False, TokenKind::Null];
        assert_eq!(collect_token_kinds("true false null").unwrap(), expected);
        assert_eq!(
            collect_token_kinds("[true,null]").unwrap(),
            vec![
                TokenKind::ArrayOpen,
                TokenKind::True,
                TokenKind::Comma,
                TokenKind::Null,
                TokenKind::ArrayClose
            ]
        );
    }

    #[test]
    fn test_tokenizer_keyword_needs_boundary() {
        assert_eq!(
            lex_error("trueish"),
            LexError::UnexpectedCharacter {
                line: 1,
                column: 1,
                found: 't'
            }
        );
        assert!(matches!(lex_error("null_value"), LexError::UnexpectedCharacter { .. }));
        assert!(matches!(lex_error("false1"), LexError::UnexpectedCharacter { .. }));
        assert!(matches!(lex_error("nul"), LexError::UnexpectedCharacter { .. }));
    }

    #[test]
    fn test_tokenizer_numbers() {
        let expected = vec![
            TokenKind::Number(123.0),
            TokenKind::Number(-0.5),
            TokenKind::Number(10000000000.0),
            TokenKind::Number(0.0),
        ];
        assert_eq!(collect_token_kinds("123 -0.5 1e10 0").unwrap(), expected);
    }

    #[test]
    fn test_tokenizer_number_with_exponent() {
        assert_eq!(
            collect_token_kinds("-3.5e2").unwrap(),
            vec![TokenKind::Number(-350.0)]
        );
        assert_eq!(
            collect_token_kinds("25E-1 1e+2").unwrap(),
            vec![TokenKind::Number(2.5), TokenKind::Number(100.0)]
        );
    }

    #[test]
    fn test_tokenizer_number_boundaries() {
        // A lone zero is a whole integer part.
        assert_eq!(
            collect_token_kinds("0123").unwrap(),
            vec![TokenKind::Number(0.0), TokenKind::Number(123.0)]
        );
        // A minus sign needs an integer part after it.
        assert!(matches!(lex_error("-"), LexError::UnexpectedCharacter { column: 1, found: '-', .. }));
        assert!(matches!(lex_error("[-]"), LexError::UnexpectedCharacter { column: 2, found: '-', .. }));
        assert!(matches!(lex_error("-.5"), LexError::UnexpectedCharacter { column: 1, found: '-', .. }));
        // A number cannot start with its point.
        assert!(matches!(lex_error(".5"), LexError::UnexpectedCharacter { found: '.', .. }));
    }

    #[test]
    fn test_tokenizer_number_markers_without_digits() {
        assert_eq!(
            collect_token_kinds("[1.]").unwrap(),
            vec![TokenKind::ArrayOpen, TokenKind::Number(1.0), TokenKind::ArrayClose]
        );
        assert_eq!(
            collect_token_kinds("[1e]").unwrap(),
            vec![TokenKind::ArrayOpen, TokenKind::Number(1.0), TokenKind::ArrayClose]
        );
        assert_eq!(
            collect_token_kinds("1.e5 2E+ -3e-").unwrap(),
            vec![
                TokenKind::Number(100000.0),
                TokenKind::Number(2.0),
                TokenKind::Number(-3.0)
            ]
        );
        // The point ends up inside the number, the second one does not.
        assert!(matches!(lex_error("1.5.3"), LexError::UnexpectedCharacter { column: 4, found: '.', .. }));
    }

    #[test]
    fn test_tokenizer_strings() {
        let input = r#" "hello" "" "a b" "#;
        assert_eq!(
            collect_token_kinds(input).unwrap(),
            vec![string("hello"), string(""), string("a b")]
        );
    }

    #[test]
    fn test_tokenizer_escaped_quote_is_kept_verbatim() {
        let input = r#""a\"b""#;
        assert_eq!(collect_token_kinds(input).unwrap(), vec![string(r#"a\"b"#)]);
    }

    #[test]
    fn test_tokenizer_other_escapes_pass_through() {
        let input = r#"["a\nb", "\u0041", "c:\dir"]"#;
        assert_eq!(
            collect_token_kinds(input).unwrap(),
            vec![
                TokenKind::ArrayOpen,
                string(r"a\nb"),
                TokenKind::Comma,
                string(r"\u0041"),
                TokenKind::Comma,
                string(r"c:\dir"),
                TokenKind::ArrayClose,
            ]
        );
    }

    #[test]
    fn test_tokenizer_double_backslash_before_quote() {
        // The second backslash still protects the quote after it, so the
        // literal never closes and swallows the rest of the line.
        let input = r#"["a\\", 1]"#;
        assert_eq!(
            collect_token_kinds(input).unwrap(),
            vec![TokenKind::ArrayOpen, string(r#"a\\", 1]"#)]
        );
    }

    #[test]
    fn test_tokenizer_unterminated_string() {
        let input = "[\"abc\n1]\n";
        assert_eq!(
            collect_token_kinds(input).unwrap(),
            vec![
                TokenKind::ArrayOpen,
                string("abc"),
                TokenKind::Number(1.0),
                TokenKind::ArrayClose
            ]
        );

        // A CRLF terminator is not part of the content either.
        assert_eq!(collect_token_kinds("\"abc\r\n").unwrap(), vec![string("abc")]);
    }

    #[test]
    fn test_tokenizer_whitespace_skipping() {
        let input = "  { \n \t \"key\" \r\n : \n 123 \n } \n ";
        let expected = vec![
            TokenKind::ObjectOpen,
            string("key"),
            TokenKind::Colon,
            TokenKind::Number(123.0),
            TokenKind::ObjectClose,
        ];
        assert_eq!(collect_token_kinds(input).unwrap(), expected);
        assert!(collect_token_kinds("  \n\n \t ").unwrap().is_empty());
        assert!(collect_token_kinds("").unwrap().is_empty());
    }

    #[test]
    fn test_tokenizer_line_numbers() {
        let input = "{\n  \"a\": 1,\n\n  \"b\": [true]\n}";
        let stream = Tokenizer::new(input.as_bytes()).tokenize().unwrap();
        let lines: Vec<usize> = stream.iter().map(|t| t.line).collect();
        assert_eq!(lines, vec![1, 2, 2, 2, 2, 4, 4, 4, 4, 4, 5]);
    }

    #[test]
    fn test_tokenizer_invalid_char() {
        assert_eq!(
            lex_error("?"),
            LexError::UnexpectedCharacter {
                line: 1,
                column: 1,
                found: '?'
            }
        );
        assert_eq!(
            lex_error("[1,\n 2, &]"),
            LexError::UnexpectedCharacter {
                line: 2,
                column: 5,
                found: '&'
            }
        );
    }

    #[test]
    fn test_tokenizer_line_too_long() {
        let tokenize = |input: &str| {
            Tokenizer::new(input.as_bytes())
                .with_max_line_len(8)
                .tokenize()
        };

        // Exactly at capacity, terminator included.
        assert_eq!(tokenize("[1, 2 ]\n").unwrap().len(), 5);
        match tokenize("[1]\n[1, 2, 3]\n") {
            Err(Error::Lex(e)) => assert_eq!(e, LexError::LineTooLong { line: 2, max: 8 }),
            other => panic!("expected LineTooLong, got {:?}", other),
        }
    }

    #[test]
    fn test_tokenizer_unbounded_line_len() {
        let stream = Tokenizer::new("[1]\n\"x\"\n".as_bytes())
            .with_max_line_len(usize::MAX)
            .tokenize()
            .unwrap();
        assert_eq!(
            stream.kinds(),
            vec![TokenKind::ArrayOpen, TokenKind::Number(1.0), TokenKind::ArrayClose, string("x")]
        );
    }

    #[test]
    fn test_tokenizer_invalid_utf8() {
        let input: &[u8] = b"[1]\n[\"\xff\"]\n";
        match Tokenizer::new(input).tokenize() {
            Err(Error::Lex(e)) => assert_eq!(e, LexError::InvalidUtf8 { line: 2 }),
            other => panic!("expected InvalidUtf8, got {:?}", other),
        }
    }

    #[test]
    fn test_tokenizer_non_ascii_string_content() {
        assert_eq!(
            collect_token_kinds("[\"héllo\", \"日本\"]").unwrap(),
            vec![
                TokenKind::ArrayOpen,
                string("héllo"),
                TokenKind::Comma,
                string("日本"),
                TokenKind::ArrayClose
            ]
        );
    }
}
