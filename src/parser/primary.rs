//! Primary expression parsing
//!
//! Primaries are the operands the precedence climber combines:
//!
//! - literals: `'text'`, `"text"`, `42`, `-1.5`, `true`, `false`, `null`, `undefined`
//! - primitives: `string`, `number`, `boolean`, ...
//! - tuples: `[string, number]`, `[]`
//! - parenthesized definitions: `(string | number)`
//!
//! Object types are also parsed here, though they only appear where a full
//! type definition is expected.
//!
//! # Grammar
//!
//! ```text
//! primary   ::= string | ('-' | '+')? number | literal_kw | primitive
//!             | tuple | '(' definition ')'
//! tuple     ::= '[' (definition (',' definition)* ','?)? definition? ']'
//! object    ::= '{' property (',' property)* ','? '}'
//! property  ::= key '?'? ':' definition
//! key       ::= word | string | number | '[' (word | string) ']'
//! ```

use crate::parser::ast::*;
use crate::parser::errors::{Delimiter, SyntaxError};
use crate::parser::lexer::{Keyword, Token};
use crate::parser::parse::Parser;
use log::trace;

const PRIMARY_EXPECTED: &[&str] = &[
    "string literal",
    "number",
    "primitive type",
    "'true'",
    "'false'",
    "'null'",
    "'undefined'",
    "'['",
    "'('",
];

impl Parser<'_> {
    /// Parse a primary expression
    pub(crate) fn parse_primary(&mut self) -> Result<TypeExpression, SyntaxError> {
        trace!("parse_primary: next token = {:?}", self.peek());

        let literal = |value, span| TypeExpression::Literal {
            literal: value,
            span,
        };

        match self.peek() {
            Token::SingleQuote(_) | Token::DoubleQuote(_) => {
                // The closing quote of an enclosing quoted expression
                if self.peek().quote().is_some_and(|q| self.is_enclosing_quote(q)) {
                    return Err(self.unexpected(PRIMARY_EXPECTED));
                }
                let (quote, value, span) = self.parse_string_literal()?;
                Ok(literal(LiteralType::String { quote, value }, span))
            }
            Token::Minus(_) | Token::Plus(_) => self.parse_signed_number(),
            Token::Number(..) => match self.advance()? {
                Token::Number(number, span) => Ok(literal(LiteralType::Number(number), span)),
                _ => Err(self.unexpected(&["number"])),
            },
            Token::Keyword(Keyword::True, span) => {
                let span = *span;
                self.advance()?;
                Ok(literal(LiteralType::True, span))
            }
            Token::Keyword(Keyword::False, span) => {
                let span = *span;
                self.advance()?;
                Ok(literal(LiteralType::False, span))
            }
            Token::Keyword(Keyword::Null, span) => {
                let span = *span;
                self.advance()?;
                Ok(literal(LiteralType::Null, span))
            }
            Token::Keyword(Keyword::Undefined, span) => {
                let span = *span;
                self.advance()?;
                Ok(literal(LiteralType::Undefined, span))
            }
            Token::Primitive(primitive, span) => {
                let (primitive, span) = (*primitive, *span);
                self.advance()?;
                Ok(TypeExpression::Primitive { primitive, span })
            }
            Token::LBracket(_) => Ok(TypeExpression::Tuple(self.parse_tuple()?)),
            Token::LParen(_) => self.parse_parenthesized(),
            _ => Err(self.unexpected(PRIMARY_EXPECTED)),
        }
    }

    /// Parse `-1`, `+0x10`: a sign folded onto the number that follows
    fn parse_signed_number(&mut self) -> Result<TypeExpression, SyntaxError> {
        let sign = self.advance()?;
        let operator = match sign {
            Token::Minus(_) => Sign::Minus,
            _ => Sign::Plus,
        };

        if !matches!(self.peek(), Token::Number(..)) {
            return Err(self.unexpected(&["number"]));
        }
        match self.advance()? {
            Token::Number(argument, span) => Ok(TypeExpression::UnaryNumber {
                operator,
                argument,
                span: sign.span().to(span),
            }),
            _ => Err(self.unexpected(&["number"])),
        }
    }

    /// Parse a tuple type.
    ///
    /// Elements are comma separated with an optional trailing comma; one
    /// final element may follow without a separator (`[a, b c]`).
    pub(crate) fn parse_tuple(&mut self) -> Result<TupleType, SyntaxError> {
        trace!("parse_tuple: next token = {:?}", self.peek());

        let open = self.expect_token(&Token::LBracket(self.current_span()), "'['")?;
        self.descend()?;

        let mut elements = Vec::new();
        let mut separated = true;
        let mut unseparated_last = false;
        while separated {
            if self.check(&Token::RBracket(self.current_span())) {
                break;
            }
            self.check_unterminated(Delimiter::Bracket, open.span().start)?;
            elements.push(self.parse_type_definition()?);
            separated = self.match_token(&Token::Comma(self.current_span()))?;

            if !separated
                && !self.check(&Token::RBracket(self.current_span()))
                && !self.is_at_end()
            {
                elements.push(self.parse_type_definition()?);
                unseparated_last = true;
            }
        }

        let close = self.expect_closing(Delimiter::Bracket, open.span().start, &["','", "']'"])?;
        self.ascend();

        Ok(TupleType {
            elements,
            unseparated_last,
            span: open.span().to(close.span()),
        })
    }

    /// Parse `( definition )`
    fn parse_parenthesized(&mut self) -> Result<TypeExpression, SyntaxError> {
        trace!("parse_parenthesized: next token = {:?}", self.peek());

        let open = self.expect_token(&Token::LParen(self.current_span()), "'('")?;
        self.descend()?;
        self.check_unterminated(Delimiter::Paren, open.span().start)?;

        let inner = self.parse_type_definition()?;
        let close = self.expect_closing(Delimiter::Paren, open.span().start, &["operator", "')'"])?;
        self.ascend();

        Ok(TypeExpression::Parenthesized {
            inner: Box::new(inner),
            span: open.span().to(close.span()),
        })
    }

    /// Parse an object type; `{}` is rejected
    pub(crate) fn parse_object(&mut self) -> Result<ObjectType, SyntaxError> {
        trace!("parse_object: next token = {:?}", self.peek());

        let open = self.expect_token(&Token::LBrace(self.current_span()), "'{'")?;
        self.descend()?;

        if self.check(&Token::RBrace(self.current_span())) {
            return Err(SyntaxError::EmptyObjectBody {
                offset: open.span().start,
            });
        }

        let mut properties = Vec::new();
        loop {
            self.check_unterminated(Delimiter::Brace, open.span().start)?;
            properties.push(self.parse_property()?);

            if !self.match_token(&Token::Comma(self.current_span()))? {
                break;
            }
            if self.check(&Token::RBrace(self.current_span())) {
                break;
            }
        }

        let close = self.expect_closing(Delimiter::Brace, open.span().start, &["','", "'}'"])?;
        self.ascend();

        Ok(ObjectType {
            properties,
            span: open.span().to(close.span()),
        })
    }

    /// Parse `name?: definition`
    fn parse_property(&mut self) -> Result<PropertySignature, SyntaxError> {
        let name = self.parse_property_name()?;
        self.expect_token(&Token::Colon(self.current_span()), "':'")?;
        let value = self.parse_type_definition()?;
        let span = name.span.to(value.span());

        Ok(PropertySignature { name, value, span })
    }

    fn parse_property_name(&mut self) -> Result<PropertyName, SyntaxError> {
        let start = self.current_offset();

        let (key, key_span) = match self.peek() {
            Token::SingleQuote(_) | Token::DoubleQuote(_) => {
                let (quote, value, span) = self.parse_string_literal()?;
                (PropertyKey::String { quote, value }, span)
            }
            Token::Number(..) => match self.advance()? {
                Token::Number(number, span) => (PropertyKey::Number(number), span),
                _ => return Err(self.unexpected(&["property name"])),
            },
            Token::LBracket(_) => {
                let (key, span) = self.parse_computed_key()?;
                (PropertyKey::Computed(key), span)
            }
            token => match token.word() {
                Some(word) => (PropertyKey::Identifier(word), self.advance()?.span()),
                None => {
                    return Err(self.unexpected(&[
                        "identifier",
                        "string literal",
                        "number",
                        "'['",
                    ]))
                }
            },
        };

        let mut end = key_span.end;
        let optional = self.check(&Token::Question(self.current_span()));
        if optional {
            end = self.advance()?.span().end;
        }

        Ok(PropertyName {
            key,
            optional,
            span: Span::new(start, end),
        })
    }

    /// Parse `[name]` or `['name']`
    fn parse_computed_key(&mut self) -> Result<(ComputedKey, Span), SyntaxError> {
        let open = self.expect_token(&Token::LBracket(self.current_span()), "'['")?;

        let key = match self.peek() {
            Token::SingleQuote(_) | Token::DoubleQuote(_) => {
                let (quote, value, _) = self.parse_string_literal()?;
                ComputedKey::String { quote, value }
            }
            token => match token.word() {
                Some(word) => {
                    self.advance()?;
                    ComputedKey::Identifier(word)
                }
                None => return Err(self.unexpected(&["identifier", "string literal"])),
            },
        };

        let close = self.expect_closing(Delimiter::Bracket, open.span().start, &["']'"])?;
        Ok((key, open.span().to(close.span())))
    }

    /// Report an unclosed delimiter when input runs out inside it
    fn check_unterminated(&self, delimiter: Delimiter, opened_at: usize) -> Result<(), SyntaxError> {
        if self.is_at_end() {
            return Err(SyntaxError::UnterminatedDelimiter {
                delimiter,
                offset: opened_at,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::errors::{Delimiter, SyntaxError};
    use crate::parser::parse::parse;

    fn expression(source: &str) -> TypeExpression {
        match parse(source).unwrap() {
            TypeDefinition::Expression(expr) => expr,
            other => panic!("Expected bare expression, got {other:?}"),
        }
    }

    fn tuple(source: &str) -> TupleType {
        match parse(source).unwrap() {
            TypeDefinition::Tuple(tuple) => tuple,
            other => panic!("Expected tuple, got {other:?}"),
        }
    }

    fn object(source: &str) -> ObjectType {
        match parse(source).unwrap() {
            TypeDefinition::Object(object) => object,
            other => panic!("Expected object, got {other:?}"),
        }
    }

    #[test]
    fn test_every_primitive() {
        for primitive in Primitive::ALL {
            match expression(primitive.as_str()) {
                TypeExpression::Primitive { primitive: p, .. } => assert_eq!(p, primitive),
                other => panic!("Expected primitive, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_keyword_literals() {
        for (source, expected) in [
            ("true", LiteralType::True),
            ("false", LiteralType::False),
            ("null", LiteralType::Null),
            ("undefined", LiteralType::Undefined),
        ] {
            match expression(source) {
                TypeExpression::Literal { literal, .. } => assert_eq!(literal, expected),
                other => panic!("Expected literal, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_signed_numbers() {
        match expression("-1.5") {
            TypeExpression::UnaryNumber {
                operator,
                argument,
                span,
            } => {
                assert_eq!(operator, Sign::Minus);
                assert_eq!(argument.text, "1.5");
                assert_eq!(argument.kind, NumberKind::Float);
                assert_eq!(span, Span::new(0, 4));
            }
            other => panic!("Expected unary number, got {other:?}"),
        }

        assert!(matches!(
            expression("+ 0x10"),
            TypeExpression::UnaryNumber {
                operator: Sign::Plus,
                ..
            }
        ));

        assert!(matches!(
            parse("-string"),
            Err(SyntaxError::UnexpectedToken { offset: 1, .. })
        ));
    }

    #[test]
    fn test_tuple_forms() {
        assert!(tuple("[]").elements.is_empty());
        assert_eq!(tuple("[string, number]").elements.len(), 2);
        assert_eq!(tuple("[string, number,]").elements.len(), 2);
        assert_eq!(tuple("[string, number boolean]").elements.len(), 3);
        assert_eq!(tuple("[string number]").elements.len(), 2);
        assert_eq!(tuple("[[], [[]]]").span, Span::new(0, 10));
    }

    #[test]
    fn test_tuple_remembers_missing_final_comma() {
        assert!(tuple("[string, number boolean]").unseparated_last);
        assert!(!tuple("[string, number, boolean]").unseparated_last);
        assert!(!tuple("[string, number,]").unseparated_last);
        assert!(!tuple("[string]").unseparated_last);
    }

    #[test]
    fn test_tuple_element_kinds() {
        let t = tuple("['a' | 'b', { x: 1 }, type(string), \"number[]\"]");
        assert!(matches!(
            t.elements[0],
            TypeDefinition::Expression(TypeExpression::Union { .. })
        ));
        assert!(matches!(t.elements[1], TypeDefinition::Object(_)));
        assert!(matches!(t.elements[2], TypeDefinition::Ark(_)));
        assert!(matches!(
            t.elements[3],
            TypeDefinition::Quoted {
                expression: TypeExpression::Array { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_tuple_errors() {
        assert_eq!(
            parse("[string, number"),
            Err(SyntaxError::UnterminatedDelimiter {
                delimiter: Delimiter::Bracket,
                offset: 0
            })
        );
        assert!(matches!(
            parse("[a b c]"),
            Err(SyntaxError::UnexpectedToken { .. })
        ));
        assert!(matches!(
            parse("[string number boolean]"),
            Err(SyntaxError::UnexpectedToken { offset: 15, .. })
        ));
        assert!(matches!(
            parse("[,]"),
            Err(SyntaxError::UnexpectedToken { offset: 1, .. })
        ));
    }

    #[test]
    fn test_tuple_followed_by_operator_is_an_expression() {
        assert!(matches!(
            parse("[string][]").unwrap(),
            TypeDefinition::Expression(TypeExpression::Array { .. })
        ));
    }

    #[test]
    fn test_object_properties() {
        let obj = object("{a: string, b?: number}");
        assert_eq!(obj.properties.len(), 2);
        assert_eq!(
            obj.properties[0].name.key,
            PropertyKey::Identifier("a".to_string())
        );
        assert!(!obj.properties[0].name.optional);
        assert!(obj.properties[1].name.optional);
        assert_eq!(obj.properties[1].name.span, Span::new(12, 14));
        assert_eq!(obj.span, Span::new(0, 23));
    }

    #[test]
    fn test_property_key_forms() {
        let obj = object("{ 'quoted key': string, 42: number, [sym]: symbol, [\"k\"]?: 1, type: 2, }");
        let keys: Vec<_> = obj.properties.iter().map(|p| p.name.key.clone()).collect();
        assert_eq!(
            keys,
            vec![
                PropertyKey::String {
                    quote: Quote::Single,
                    value: "quoted key".to_string()
                },
                PropertyKey::Number(NumberLiteral::new("42", NumberKind::Integer)),
                PropertyKey::Computed(ComputedKey::Identifier("sym".to_string())),
                PropertyKey::Computed(ComputedKey::String {
                    quote: Quote::Double,
                    value: "k".to_string()
                }),
                PropertyKey::Identifier("type".to_string()),
            ]
        );
        assert!(obj.properties[3].name.optional);
    }

    #[test]
    fn test_nested_object_values() {
        let obj = object("{ user: { name: string, tags: string[] }, pair: [1, 2] }");
        assert!(matches!(obj.properties[0].value, TypeDefinition::Object(_)));
        assert!(matches!(obj.properties[1].value, TypeDefinition::Tuple(_)));
    }

    #[test]
    fn test_object_errors() {
        assert_eq!(parse("{}"), Err(SyntaxError::EmptyObjectBody { offset: 0 }));
        assert_eq!(parse("{ }"), Err(SyntaxError::EmptyObjectBody { offset: 0 }));
        assert_eq!(
            parse("{ a: string"),
            Err(SyntaxError::UnterminatedDelimiter {
                delimiter: Delimiter::Brace,
                offset: 0
            })
        );
        assert!(matches!(
            parse("{ a string }"),
            Err(SyntaxError::UnexpectedToken { offset: 4, .. })
        ));
        assert!(matches!(
            parse("{ a: string,, }"),
            Err(SyntaxError::UnexpectedToken { offset: 12, .. })
        ));
        assert!(matches!(
            parse("{ a: string } | number"),
            Err(SyntaxError::UnexpectedToken { offset: 14, .. })
        ));
    }

    #[test]
    fn test_parenthesized() {
        match expression("(string)") {
            TypeExpression::Parenthesized { inner, span } => {
                assert!(matches!(
                    *inner,
                    TypeDefinition::Expression(TypeExpression::Primitive { .. })
                ));
                assert_eq!(span, Span::new(0, 8));
            }
            other => panic!("Expected parenthesized, got {other:?}"),
        }

        assert!(matches!(
            expression("({ a: string })[]"),
            TypeExpression::Array { .. }
        ));
        assert_eq!(
            parse("(string"),
            Err(SyntaxError::UnterminatedDelimiter {
                delimiter: Delimiter::Paren,
                offset: 0
            })
        );
        assert!(matches!(
            parse("()"),
            Err(SyntaxError::UnexpectedToken { offset: 1, .. })
        ));
    }

    #[test]
    fn test_string_literal_errors() {
        assert!(matches!(
            parse("'abc"),
            Err(SyntaxError::UnterminatedQuote {
                quote: Quote::Single,
                offset: 0
            })
        ));
        assert_eq!(
            parse(r#""a\"b""#),
            Err(SyntaxError::UnsupportedEscape { offset: 2 })
        );
    }

    #[test]
    fn test_identifiers_are_not_types() {
        match parse("foo") {
            Err(SyntaxError::UnexpectedToken { found, offset, .. }) => {
                assert_eq!(found, "identifier 'foo'");
                assert_eq!(offset, 0);
            }
            other => panic!("Expected unexpected token, got {other:?}"),
        }
    }
}
