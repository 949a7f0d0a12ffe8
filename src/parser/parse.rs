//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure:
//! the token cursor, checkpoints for backtracking, the nesting guard, and
//! the public entry points.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, and coordination
//! - `definitions`: type definitions and keyword-headed ark definitions
//! - `expressions`: precedence climbing over infix operators and array suffixes
//! - `primary`: literals, primitives, tuples, objects, parentheses, strings
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.

use crate::parser::ast::*;
use crate::parser::config::ParserConfig;
use crate::parser::errors::{Delimiter, SyntaxError};
use crate::parser::lexer::{Lexer, Token};

/// Parse a single type definition.
///
/// Empty input is an error; use [`parse_source`] to accept it.
pub fn parse(text: &str) -> Result<TypeDefinition, SyntaxError> {
    parse_with_config(text, ParserConfig::default())
}

pub fn parse_with_config(text: &str, config: ParserConfig) -> Result<TypeDefinition, SyntaxError> {
    Parser::with_config(text, config)?.parse_definition()
}

/// Parse a whole source text, which may be empty.
pub fn parse_source(text: &str) -> Result<SourceFile, SyntaxError> {
    Parser::new(text)?.parse_source_file()
}

/// Saved parser state for backtracking
pub(crate) struct Checkpoint {
    position: usize,
    current: Token,
    depth: usize,
    quotes: usize,
}

/// Recursive descent parser for ArkType definitions
pub struct Parser<'a> {
    pub(crate) lexer: Lexer<'a>,
    /// One token of lookahead; the lexer sits just past it
    pub(crate) current: Token,
    pub(crate) config: ParserConfig,
    pub(crate) depth: usize,
    /// Quotes of the quoted expressions currently being parsed, innermost last
    pub(crate) enclosing_quotes: Vec<Quote>,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Result<Self, SyntaxError> {
        Self::with_config(source, ParserConfig::default())
    }

    pub fn with_config(source: &'a str, config: ParserConfig) -> Result<Self, SyntaxError> {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token()?;
        Ok(Self {
            lexer,
            current,
            config,
            depth: 0,
            enclosing_quotes: Vec::new(),
        })
    }

    /// Parse the entire source: nothing at all, or exactly one definition
    pub fn parse_source_file(&mut self) -> Result<SourceFile, SyntaxError> {
        let span = Span::new(0, self.lexer.source().len());
        if self.is_at_end() {
            return Ok(SourceFile {
                definition: None,
                span,
            });
        }
        let definition = self.parse_definition()?;
        Ok(SourceFile {
            definition: Some(definition),
            span,
        })
    }

    /// Parse one definition that must span the rest of the input
    pub fn parse_definition(&mut self) -> Result<TypeDefinition, SyntaxError> {
        let definition = self.parse_type_definition()?;
        if !self.is_at_end() {
            return Err(self.unexpected(&["end of input"]));
        }
        Ok(definition)
    }

    // ===== Helper methods =====

    pub(crate) fn match_token(&mut self, token: &Token) -> Result<bool, SyntaxError> {
        if self.check(token) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub(crate) fn check(&self, token: &Token) -> bool {
        std::mem::discriminant(self.peek()) == std::mem::discriminant(token)
    }

    /// Consume the current token and lex the next one
    pub(crate) fn advance(&mut self) -> Result<Token, SyntaxError> {
        if self.is_at_end() {
            return Ok(self.current.clone());
        }
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    pub(crate) fn is_at_end(&self) -> bool {
        matches!(self.peek(), Token::Eof(_))
    }

    pub(crate) fn peek(&self) -> &Token {
        &self.current
    }

    /// The token after the current one, without consuming anything
    pub(crate) fn peek_second(&self) -> Result<Token, SyntaxError> {
        self.lexer.clone().next_token()
    }

    pub(crate) fn current_span(&self) -> Span {
        self.peek().span()
    }

    pub(crate) fn current_offset(&self) -> usize {
        self.current_span().start
    }

    /// Error describing the current token and what would have been accepted
    pub(crate) fn unexpected(&self, expected: &[&'static str]) -> SyntaxError {
        SyntaxError::UnexpectedToken {
            found: self.peek().to_string(),
            expected: expected.to_vec(),
            offset: self.current_offset(),
        }
    }

    pub(crate) fn expect_token(
        &mut self,
        token: &Token,
        expected: &'static str,
    ) -> Result<Token, SyntaxError> {
        if self.check(token) {
            self.advance()
        } else {
            Err(self.unexpected(&[expected]))
        }
    }

    /// Expect the closing half of `delimiter`; running out of input reports
    /// the opening offset instead of the end of input.
    pub(crate) fn expect_closing(
        &mut self,
        delimiter: Delimiter,
        opened_at: usize,
        expected: &[&'static str],
    ) -> Result<Token, SyntaxError> {
        let closing = match delimiter {
            Delimiter::Bracket => Token::RBracket(self.current_span()),
            Delimiter::Brace => Token::RBrace(self.current_span()),
            Delimiter::Paren => Token::RParen(self.current_span()),
        };
        if self.check(&closing) {
            return self.advance();
        }
        if self.is_at_end() {
            return Err(SyntaxError::UnterminatedDelimiter {
                delimiter,
                offset: opened_at,
            });
        }
        Err(self.unexpected(expected))
    }

    /// Enter one nesting level, failing once the configured budget is spent
    pub(crate) fn descend(&mut self) -> Result<(), SyntaxError> {
        self.depth += 1;
        if self.depth > self.config.max_depth {
            return Err(SyntaxError::NestingTooDeep {
                limit: self.config.max_depth,
                offset: self.current_offset(),
            });
        }
        Ok(())
    }

    pub(crate) fn ascend(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub(crate) fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            position: self.lexer.position(),
            current: self.current.clone(),
            depth: self.depth,
            quotes: self.enclosing_quotes.len(),
        }
    }

    pub(crate) fn rewind(&mut self, checkpoint: Checkpoint) {
        self.lexer.reset(checkpoint.position);
        self.current = checkpoint.current;
        self.depth = checkpoint.depth;
        self.enclosing_quotes.truncate(checkpoint.quotes);
    }

    /// Whether `quote` closes a quoted expression we are inside of
    pub(crate) fn is_enclosing_quote(&self, quote: Quote) -> bool {
        self.enclosing_quotes.contains(&quote)
    }

    /// Scan a string literal whose opening quote is the current token
    pub(crate) fn parse_string_literal(&mut self) -> Result<(Quote, String, Span), SyntaxError> {
        let open = self.current_span();
        let Some(quote) = self.peek().quote() else {
            return Err(self.unexpected(&["string"]));
        };
        let value = match self.lexer.string_fragment(open.end, quote)? {
            Token::StringFragment(value, _, _) => value,
            _ => return Err(self.unexpected(&["string"])),
        };
        let span = Span::new(open.start, self.lexer.position());
        self.current = self.lexer.next_token()?;
        Ok((quote, value, span))
    }
}
