//! Contains the error types for lexing and for the convenience entry points.
//!
//! Grammar mismatches are not errors: a rule that does not match simply
//! yields no result (see the `parser` module). The types here cover the
//! failures that abort a whole input.
use std::fmt;
use std::io;

/// Why the lexer gave up on an input.
///
/// Any of these discards every token collected so far; the lexer never
/// hands back a partial stream.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum LexError {
    /// No token rule matches at this position.
    UnexpectedCharacter {
        /// The 1-indexed line number.
        line: usize,
        /// The 1-indexed column (in bytes) of the offending character.
        column: usize,
        /// The character that could not be classified.
        found: char,
    },
    /// A physical line does not fit into the line buffer.
    LineTooLong {
        /// The 1-indexed line number.
        line: usize,
        /// The configured buffer capacity in bytes.
        max: usize,
    },
    /// A line is not valid UTF-8.
    InvalidUtf8 {
        /// The 1-indexed line number.
        line: usize,
    },
}

impl LexError {
    /// The line the error was detected on.
    pub fn line(&self) -> usize {
        match self {
            LexError::UnexpectedCharacter { line, .. }
            | LexError::LineTooLong { line, .. }
            | LexError::InvalidUtf8 { line } => *line,
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::UnexpectedCharacter {
                line,
                column,
                found,
            } => write!(
                f,
                "Error: Unexpected character '{}' at line {}, column {}.",
                found.escape_default(),
                line,
                column
            ),
            LexError::LineTooLong { line, max } => write!(
                f,
                "Error: Line {} exceeds the maximum line length of {} bytes.",
                line, max
            ),
            LexError::InvalidUtf8 { line } => {
                write!(f, "Error: Invalid UTF-8 at line {}.", line)
            }
        }
    }
}

impl std::error::Error for LexError {}

/// The crate-level error type.
#[derive(Debug)]
pub enum Error {
    /// Reading the input failed.
    Io(io::Error),
    /// The input could not be split into tokens.
    Lex(LexError),
    /// The token stream starts with neither an array nor an object.
    NoDocument,
    /// A document was parsed but tokens remain after it.
    TrailingTokens {
        /// The line of the first unconsumed token.
        line: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "Error: {}", e),
            Error::Lex(e) => fmt::Display::fmt(e, f),
            Error::NoDocument => f.write_str("Error: No array or object found."),
            Error::TrailingTokens { line } => {
                write!(f, "Error: Unexpected trailing token at line {}.", line)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Lex(e) => Some(e),
            Error::NoDocument | Error::TrailingTokens { .. } => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<LexError> for Error {
    fn from(e: LexError) -> Self {
        Error::Lex(e)
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_lex_error_display() {
        let error = LexError::UnexpectedCharacter {
            line: 10,
            column: 5,
            found: '&',
        };
        assert_eq!(
            error.to_string(),
            "Error: Unexpected character '&' at line 10, column 5."
        );
        assert_eq!(error.line(), 10);
    }

    #[test]
    fn test_line_too_long_display() {
        let error = LexError::LineTooLong { line: 3, max: 16 };
        assert_eq!(
            error.to_string(),
            "Error: Line 3 exceeds the maximum line length of 16 bytes."
        );
    }

    #[test]
    fn test_error_source_chain() {
        let error = Error::from(LexError::InvalidUtf8 { line: 2 });
        assert_eq!(error.to_string(), "Error: Invalid UTF-8 at line 2.");
        assert!(error.source().is_some());

        let error = Error::TrailingTokens { line: 4 };
        assert_eq!(
            error.to_string(),
            "Error: Unexpected trailing token at line 4."
        );
        assert!(error.source().is_none());
    }
}
