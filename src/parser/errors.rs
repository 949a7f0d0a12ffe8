//! Syntax error types for the ArkType parser
//!
//! Every failure is local to one parse call and reported as a single
//! [`SyntaxError`]. There is no partial tree and no error recovery: a failed
//! parse yields no tree, and parsing the same text again fails identically.

use crate::parser::ast::{Quote, SourceLocation};
use std::fmt;

/// Bracketing pair that was opened but never closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Bracket,
    Brace,
    Paren,
}

impl Delimiter {
    pub fn open(self) -> char {
        match self {
            Delimiter::Bracket => '[',
            Delimiter::Brace => '{',
            Delimiter::Paren => '(',
        }
    }

    pub fn close(self) -> char {
        match self {
            Delimiter::Bracket => ']',
            Delimiter::Brace => '}',
            Delimiter::Paren => ')',
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.open())
    }
}

/// Errors produced while tokenizing or parsing a definition.
///
/// All offsets are byte offsets into the source text.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    /// A token appeared where none of the attempted alternatives could start
    #[error("unexpected {found} at offset {offset}, expected one of: {}", .expected.join(", "))]
    UnexpectedToken {
        found: String,
        expected: Vec<&'static str>,
        offset: usize,
    },

    /// A character that cannot begin any token
    #[error("unexpected character {ch:?} at offset {offset}")]
    UnexpectedCharacter { ch: char, offset: usize },

    /// A string literal that hits a line break or the end of input
    #[error("unterminated {quote} string starting at offset {offset}")]
    UnterminatedQuote { quote: Quote, offset: usize },

    /// A `[`, `{` or `(` that is never closed
    #[error("unterminated {delimiter} opened at offset {offset}")]
    UnterminatedDelimiter { delimiter: Delimiter, offset: usize },

    /// `{}`: object types need at least one property
    #[error("object type at offset {offset} has no properties")]
    EmptyObjectBody { offset: usize },

    #[error("invalid number literal '{text}' at offset {offset}")]
    InvalidNumberLiteral { text: String, offset: usize },

    /// Escape sequences inside string literals are not supported
    #[error("unsupported escape sequence at offset {offset}")]
    UnsupportedEscape { offset: usize },

    /// Nesting exceeded [`ParserConfig::max_depth`](crate::parser::config::ParserConfig)
    #[error("nesting deeper than {limit} levels at offset {offset}")]
    NestingTooDeep { limit: usize, offset: usize },

    /// One expression chained more than
    /// [`ParserConfig::max_operators`](crate::parser::config::ParserConfig)
    /// operators and array suffixes
    #[error("expression chains more than {limit} operators at offset {offset}")]
    ExpressionTooLong { limit: usize, offset: usize },
}

impl SyntaxError {
    /// Byte offset the error points at.
    pub fn offset(&self) -> usize {
        match self {
            SyntaxError::UnexpectedToken { offset, .. }
            | SyntaxError::UnexpectedCharacter { offset, .. }
            | SyntaxError::UnterminatedQuote { offset, .. }
            | SyntaxError::UnterminatedDelimiter { offset, .. }
            | SyntaxError::EmptyObjectBody { offset }
            | SyntaxError::InvalidNumberLiteral { offset, .. }
            | SyntaxError::UnsupportedEscape { offset }
            | SyntaxError::NestingTooDeep { offset, .. }
            | SyntaxError::ExpressionTooLong { offset, .. } => *offset,
        }
    }

    /// Line and column of the error within `source`.
    pub fn location(&self, source: &str) -> SourceLocation {
        SourceLocation::from_offset(source, self.offset())
    }
}
