//! Type definition and ark definition parsing
//!
//! A type definition is what appears at the top level and in every nested
//! definition position (tuple elements, parenthesized contents, property
//! values, ark arguments). This module dispatches between its forms:
//!
//! - quoted expressions: `"string | number"`, `'string[]'`
//! - object types: `{ a: string }`
//! - ark definitions: `type(...)`, `scope(...)`, `arkAnything(...)`
//! - bare expressions, including tuples
//!
//! # Quotes
//!
//! A quote in definition position may delimit an embedded expression or open
//! a string literal. The quoted expression is tried first and kept only if
//! its contents parse, the matching quote follows, and the definition can end
//! right there; otherwise the parser backtracks and reads a string literal.

use crate::parser::ast::*;
use crate::parser::errors::{Delimiter, SyntaxError};
use crate::parser::lexer::{Keyword, Token};
use crate::parser::parse::Parser;
use log::{debug, trace};

impl Parser<'_> {
    /// Parse a type definition at the current position
    pub(crate) fn parse_type_definition(&mut self) -> Result<TypeDefinition, SyntaxError> {
        trace!("parse_type_definition: next token = {:?}", self.peek());

        match self.peek() {
            Token::SingleQuote(_) | Token::DoubleQuote(_) => {
                if let Some(definition) = self.try_quoted_definition()? {
                    return Ok(definition);
                }
                self.parse_bare_definition()
            }
            Token::LBrace(_) => Ok(TypeDefinition::Object(self.parse_object()?)),
            Token::Keyword(Keyword::Definition(_), _) => {
                Ok(TypeDefinition::Ark(self.parse_ark_definition()?))
            }
            _ => self.parse_bare_definition(),
        }
    }

    /// Unquoted expression; a lone tuple is reported as a tuple definition
    fn parse_bare_definition(&mut self) -> Result<TypeDefinition, SyntaxError> {
        Ok(match self.parse_type_expression()? {
            TypeExpression::Tuple(tuple) => TypeDefinition::Tuple(tuple),
            expression => TypeDefinition::Expression(expression),
        })
    }

    /// Try the quoted-expression reading of the current quote.
    ///
    /// Returns `Ok(None)` with the parser rewound when the text should be read
    /// as a string literal instead. Running out of nesting budget is not a
    /// reason to backtrack, and neither is an over-long operator chain; both
    /// are returned as errors.
    fn try_quoted_definition(&mut self) -> Result<Option<TypeDefinition>, SyntaxError> {
        let checkpoint = self.checkpoint();
        let offset = self.current_offset();

        match self.parse_quoted_definition() {
            Ok(definition) if self.can_end_definition() => Ok(Some(definition)),
            Err(
                err @ (SyntaxError::NestingTooDeep { .. }
                | SyntaxError::ExpressionTooLong { .. }),
            ) => Err(err),
            outcome => {
                debug!(
                    "quote at offset {} read as a string literal ({})",
                    offset,
                    match outcome {
                        Ok(_) => "operator follows the closing quote".to_string(),
                        Err(err) => err.to_string(),
                    }
                );
                self.rewind(checkpoint);
                Ok(None)
            }
        }
    }

    /// Parse quote, expression, matching quote
    fn parse_quoted_definition(&mut self) -> Result<TypeDefinition, SyntaxError> {
        let open = self.current_span();
        let Some(quote) = self.peek().quote() else {
            return Err(self.unexpected(&["quote"]));
        };

        self.descend()?;
        self.enclosing_quotes.push(quote);
        self.advance()?;

        let expression = self.parse_type_expression()?;

        if self.peek().quote() != Some(quote) {
            if self.is_at_end() {
                return Err(SyntaxError::UnterminatedQuote {
                    quote,
                    offset: open.start,
                });
            }
            return Err(self.unexpected(&["closing quote", "operator", "'[]'"]));
        }
        self.enclosing_quotes.pop();
        let close = self.advance()?;
        self.ascend();

        Ok(TypeDefinition::Quoted {
            quote,
            expression,
            span: open.to(close.span()),
        })
    }

    /// Whether the current token may follow a complete definition
    fn can_end_definition(&self) -> bool {
        match self.peek() {
            Token::Eof(_)
            | Token::Comma(_)
            | Token::RParen(_)
            | Token::RBracket(_)
            | Token::RBrace(_) => true,
            token => token.quote().is_some_and(|q| self.is_enclosing_quote(q)),
        }
    }

    /// Parse `keyword(arguments)`.
    ///
    /// The argument list is empty, a single placeholder comma, or one or more
    /// comma-separated definitions with an optional trailing comma.
    pub(crate) fn parse_ark_definition(&mut self) -> Result<ArkDefinition, SyntaxError> {
        trace!("parse_ark_definition: next token = {:?}", self.peek());

        let keyword_token = self.advance()?;
        let keyword = match &keyword_token {
            Token::Keyword(Keyword::Definition(keyword), _) => keyword.clone(),
            _ => return Err(self.unexpected(&["definition keyword"])),
        };
        let keyword_span = keyword_token.span();

        let open = self.expect_token(&Token::LParen(self.current_span()), "'('")?;
        self.descend()?;

        let mut arguments = Vec::new();
        let placeholder_comma = self.match_token(&Token::Comma(self.current_span()))?;
        if !placeholder_comma {
            loop {
                if self.check(&Token::RParen(self.current_span())) {
                    break;
                }
                if self.is_at_end() {
                    return Err(SyntaxError::UnterminatedDelimiter {
                        delimiter: Delimiter::Paren,
                        offset: open.span().start,
                    });
                }
                arguments.push(self.parse_type_definition()?);
                if !self.match_token(&Token::Comma(self.current_span()))? {
                    break;
                }
            }
        }

        let close = self.expect_closing(Delimiter::Paren, open.span().start, &["','", "')'"])?;
        self.ascend();

        Ok(ArkDefinition {
            keyword,
            keyword_span,
            arguments,
            placeholder_comma,
            span: keyword_span.to(close.span()),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::errors::{Delimiter, SyntaxError};
    use crate::parser::config::ParserConfig;
    use crate::parser::parse::{parse, parse_with_config};

    fn ark(source: &str) -> ArkDefinition {
        match parse(source).unwrap() {
            TypeDefinition::Ark(ark) => ark,
            other => panic!("Expected ark definition, got {other:?}"),
        }
    }

    #[test]
    fn test_quoted_expression() {
        match parse("'string | number'").unwrap() {
            TypeDefinition::Quoted {
                quote,
                expression,
                span,
            } => {
                assert_eq!(quote, Quote::Single);
                assert!(matches!(expression, TypeExpression::Union { .. }));
                assert_eq!(span, Span::new(0, 17));
            }
            other => panic!("Expected quoted definition, got {other:?}"),
        }
    }

    #[test]
    fn test_quote_falls_back_to_string_literal() {
        match parse("\"hello\"").unwrap() {
            TypeDefinition::Expression(TypeExpression::Literal {
                literal: LiteralType::String { quote, value },
                ..
            }) => {
                assert_eq!(quote, Quote::Double);
                assert_eq!(value, "hello");
            }
            other => panic!("Expected string literal, got {other:?}"),
        }
    }

    #[test]
    fn test_quote_followed_by_operator_is_a_literal() {
        match parse("'string' | 'number'").unwrap() {
            TypeDefinition::Expression(TypeExpression::Union { left, right, .. }) => {
                assert!(matches!(
                    *left,
                    TypeExpression::Literal { literal: LiteralType::String { ref value, .. }, .. }
                        if value == "string"
                ));
                assert!(matches!(
                    *right,
                    TypeExpression::Literal { literal: LiteralType::String { ref value, .. }, .. }
                        if value == "number"
                ));
            }
            other => panic!("Expected union of literals, got {other:?}"),
        }
    }

    #[test]
    fn test_nested_quotes() {
        match parse(r#""'a' | 'b'""#).unwrap() {
            TypeDefinition::Quoted {
                quote: Quote::Double,
                expression: TypeExpression::Union { .. },
                ..
            } => {}
            other => panic!("Expected quoted union, got {other:?}"),
        }
    }

    #[test]
    fn test_quoted_in_parentheses_closes_on_enclosing_quote() {
        // The inner single-quoted definition ends at `)`, then the outer quote closes
        match parse(r#""('string')[]""#).unwrap() {
            TypeDefinition::Quoted {
                expression: TypeExpression::Array { element, .. },
                ..
            } => match *element {
                TypeExpression::Parenthesized { inner, .. } => {
                    assert!(matches!(*inner, TypeDefinition::Quoted { quote: Quote::Single, .. }));
                }
                other => panic!("Expected parenthesized, got {other:?}"),
            },
            other => panic!("Expected quoted array, got {other:?}"),
        }
    }

    #[test]
    fn test_ark_definition_arguments() {
        let definition = ark("type(string, number)");
        assert_eq!(definition.keyword, ArkKeyword::Type);
        assert_eq!(definition.arguments.len(), 2);
        assert!(!definition.placeholder_comma);
        assert_eq!(definition.keyword_span, Span::new(0, 4));
        assert_eq!(definition.span, Span::new(0, 20));

        let trailing = ark("scope({ a: string },)");
        assert_eq!(trailing.arguments.len(), 1);
        assert!(matches!(trailing.arguments[0], TypeDefinition::Object(_)));
    }

    #[test]
    fn test_ark_definition_empty_and_placeholder() {
        let empty = ark("fn()");
        assert!(empty.arguments.is_empty());
        assert!(!empty.placeholder_comma);

        let placeholder = ark("module(,)");
        assert!(placeholder.arguments.is_empty());
        assert!(placeholder.placeholder_comma);
    }

    #[test]
    fn test_dynamic_keyword() {
        let definition = ark("arkPipe(type(string), [number])");
        assert_eq!(
            definition.keyword,
            ArkKeyword::Ark {
                capitalized: false,
                suffix: "Pipe".to_string()
            }
        );
        assert!(matches!(definition.arguments[0], TypeDefinition::Ark(_)));
        assert!(matches!(definition.arguments[1], TypeDefinition::Tuple(_)));
    }

    #[test]
    fn test_ark_definition_errors() {
        assert!(matches!(
            parse("type string"),
            Err(SyntaxError::UnexpectedToken { offset: 5, .. })
        ));
        assert_eq!(
            parse("generic(string"),
            Err(SyntaxError::UnterminatedDelimiter {
                delimiter: Delimiter::Paren,
                offset: 7
            })
        );
        assert!(matches!(
            parse("type(,string)"),
            Err(SyntaxError::UnexpectedToken { offset: 6, .. })
        ));
        assert!(matches!(
            parse("type(a,,)"),
            Err(SyntaxError::UnexpectedToken { .. })
        ));
    }

    #[test]
    fn test_ark_definition_is_not_an_operand() {
        assert!(matches!(
            parse("type(string) | number"),
            Err(SyntaxError::UnexpectedToken { offset: 13, .. })
        ));
    }

    #[test]
    fn test_chain_limit_inside_quotes_is_not_a_literal() {
        let config = ParserConfig::new().with_max_operators(2);
        assert!(matches!(
            parse_with_config("'1 | 2 | 3'", config),
            Err(SyntaxError::ExpressionTooLong { limit: 2, offset: 7 })
        ));
    }
}
