//! Expression parsing implementation
//!
//! This module combines primary expressions with postfix array suffixes and
//! infix operators using precedence climbing.
//!
//! # Precedence
//!
//! | Tier | Forms                    | Associativity |
//! |------|--------------------------|---------------|
//! | 2    | `[]` (array suffix)      | postfix       |
//! | 1    | `<` `>` `=` `%` `&` `\|` | left          |
//!
//! All infix operators share a single tier; `|` only differs in producing a
//! union node instead of an ark expression. The suffix is the two-token pair
//! `[]` with no space inside; `[ ]` is an empty tuple.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::errors::SyntaxError;
use crate::parser::lexer::Token;
use crate::parser::parse::Parser;
use log::trace;

/// Binding power of the `[]` suffix
const ARRAY_PRECEDENCE: u8 = 2;

/// Binding power shared by every infix operator
const INFIX_PRECEDENCE: u8 = 1;

/// Infix operator for the current token, if it is one
fn infix_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Lt(_) => Some(BinaryOperator::Lt),
        Token::Gt(_) => Some(BinaryOperator::Gt),
        Token::Eq(_) => Some(BinaryOperator::Eq),
        Token::Percent(_) => Some(BinaryOperator::Percent),
        Token::Amp(_) => Some(BinaryOperator::Amp),
        Token::Pipe(_) => Some(BinaryOperator::Pipe),
        _ => None,
    }
}

impl Parser<'_> {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_type_expression(&mut self) -> Result<TypeExpression, SyntaxError> {
        self.parse_precedence(0)
    }

    /// Parse an expression whose operators bind at least as tightly as
    /// `min_precedence`.
    ///
    /// Suffixes and operators are applied in a loop and do not count toward
    /// the nesting limit. Each one still adds a node to the left spine, so a
    /// single expression may chain at most `max_operators` of them.
    fn parse_precedence(&mut self, min_precedence: u8) -> Result<TypeExpression, SyntaxError> {
        trace!(
            "parse_precedence({}): next token = {:?}",
            min_precedence,
            self.peek()
        );

        let mut left = self.parse_primary()?;
        let mut chained = 0;

        loop {
            if ARRAY_PRECEDENCE >= min_precedence && self.at_array_suffix()? {
                self.count_chained(&mut chained)?;
                self.advance()?;
                let close = self.advance()?;
                left = TypeExpression::Array {
                    span: left.span().to(close.span()),
                    element: Box::new(left),
                };
                continue;
            }

            if let Some(operator) = infix_operator(self.peek()) {
                if INFIX_PRECEDENCE >= min_precedence {
                    self.count_chained(&mut chained)?;
                    self.advance()?;
                    // A strictly higher threshold keeps same-tier operators
                    // out of the right operand, so chains group to the left
                    let right = self.parse_precedence(INFIX_PRECEDENCE + 1)?;
                    left = TypeExpression::binary(operator, left, right);
                    continue;
                }
            }

            break;
        }

        Ok(left)
    }

    /// `[` directly followed by `]`, with nothing in between
    fn at_array_suffix(&self) -> Result<bool, SyntaxError> {
        let open = self.current_span();
        if !self.check(&Token::LBracket(open)) {
            return Ok(false);
        }
        Ok(matches!(self.peek_second()?, Token::RBracket(close) if close.start == open.end))
    }

    fn count_chained(&self, chained: &mut usize) -> Result<(), SyntaxError> {
        if *chained >= self.config.max_operators {
            return Err(SyntaxError::ExpressionTooLong {
                limit: self.config.max_operators,
                offset: self.current_offset(),
            });
        }
        *chained += 1;
        Ok(())
    }
}
