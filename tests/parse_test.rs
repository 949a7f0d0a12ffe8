// Integration tests for the public parsing API
//
// Tree shapes are compared through their S-expressions, which carry node
// kinds, field labels and leaf text but no spans.

use arkscope::parser::ast::{
    ArkKeyword, LiteralType, Primitive, PropertyKey, Quote, Span, TypeDefinition, TypeExpression,
};
use arkscope::parser::errors::Delimiter;
use arkscope::{parse, parse_source, parse_with_config, ParserConfig, SyntaxError};

fn sexp(source: &str) -> String {
    match parse(source) {
        Ok(definition) => definition.to_sexp(),
        Err(e) => panic!("Failed to parse {source:?}: {e}"),
    }
}

fn error(source: &str) -> SyntaxError {
    match parse(source) {
        Ok(definition) => panic!("Expected {source:?} to fail, got {definition:?}"),
        Err(e) => e,
    }
}

// ========== Primitives and literals ==========

#[test]
fn test_every_primitive_keyword() {
    for primitive in Primitive::ALL {
        let definition = parse(primitive.as_str()).unwrap();
        match definition {
            TypeDefinition::Expression(TypeExpression::Primitive { primitive: p, span }) => {
                assert_eq!(p, primitive);
                assert_eq!(span, Span::new(0, primitive.as_str().len()));
            }
            other => panic!("Expected primitive for {primitive:?}, got {other:?}"),
        }
    }
}

#[test]
fn test_literal_keywords() {
    insta::assert_snapshot!(sexp("true"), @"(literal_type true)");
    insta::assert_snapshot!(sexp("null"), @"(literal_type null)");
    insta::assert_snapshot!(sexp("undefined"), @"(literal_type undefined)");
}

#[test]
fn test_number_forms() {
    insta::assert_snapshot!(sexp("1_000"), @"(literal_type 1_000)");
    insta::assert_snapshot!(sexp("0x1Fn"), @"(literal_type 0x1Fn)");
    insta::assert_snapshot!(sexp("2.5e-3"), @"(literal_type 2.5e-3)");
    insta::assert_snapshot!(
        sexp("-1"),
        @"(unary_expression operator: (sign -) argument: (number 1))"
    );
}

#[test]
fn test_plain_string_literal() {
    let definition = parse("'hello world'").unwrap();
    match definition {
        TypeDefinition::Expression(TypeExpression::Literal {
            literal: LiteralType::String { quote, value },
            span,
        }) => {
            assert_eq!(quote, Quote::Single);
            assert_eq!(value, "hello world");
            assert_eq!(span, Span::new(0, 13));
        }
        other => panic!("Expected string literal, got {other:?}"),
    }
}

// ========== Arrays and operators ==========

#[test]
fn test_array_nesting() {
    insta::assert_snapshot!(
        sexp("string[]"),
        @"(array_type element: (primitive_type string))"
    );
    insta::assert_snapshot!(
        sexp("string[][]"),
        @"(array_type element: (array_type element: (primitive_type string)))"
    );
}

#[test]
fn test_union() {
    insta::assert_snapshot!(
        sexp("string|number"),
        @"(union_type left: (primitive_type string) right: (primitive_type number))"
    );
}

#[test]
fn test_union_is_left_associative() {
    let definition = parse("string|number|boolean").unwrap();
    let expression = definition.expression().unwrap();
    let left = expression.left().unwrap();
    assert!(matches!(left, TypeExpression::Union { .. }));
    assert!(matches!(
        expression.right(),
        Some(TypeExpression::Primitive {
            primitive: Primitive::Boolean,
            ..
        })
    ));
    assert!(matches!(
        left.left(),
        Some(TypeExpression::Primitive {
            primitive: Primitive::String,
            ..
        })
    ));
    assert!(matches!(
        left.right(),
        Some(TypeExpression::Primitive {
            primitive: Primitive::Number,
            ..
        })
    ));
}

#[test]
fn test_range_constraint_chain() {
    insta::assert_snapshot!(
        sexp("number > 0 & number < 10"),
        @"(ark_expression left: (ark_expression left: (ark_expression left: (primitive_type number) operator: (ark_operator >) right: (literal_type 0)) operator: (ark_operator &) right: (primitive_type number)) operator: (ark_operator <) right: (literal_type 10))"
    );
}

#[test]
fn test_parentheses_group() {
    insta::assert_snapshot!(
        sexp("(string | number)[]"),
        @"(array_type element: (parenthesized_type (union_type left: (primitive_type string) right: (primitive_type number))))"
    );
}

// ========== Objects and tuples ==========

#[test]
fn test_object_with_optional_property() {
    let definition = parse("{a: string, b?: number}").unwrap();
    let TypeDefinition::Object(object) = &definition else {
        panic!("Expected object, got {definition:?}");
    };
    assert_eq!(object.properties.len(), 2);
    assert!(!object.properties[0].name.optional);
    assert!(object.properties[1].name.optional);
    assert_eq!(
        object.properties[1].name.key,
        PropertyKey::Identifier("b".to_string())
    );

    insta::assert_snapshot!(
        definition.to_sexp(),
        @"(object_type (property_signature name: (property_identifier a) type: (primitive_type string)) (property_signature name: (property_identifier b) (optional ?) type: (primitive_type number)))"
    );
}

#[test]
fn test_object_key_forms() {
    insta::assert_snapshot!(
        sexp("{ 'a b': string, 1: number, [key]: boolean, type: null, }"),
        @"(object_type (property_signature name: (string 'a b') type: (primitive_type string)) (property_signature name: (number 1) type: (primitive_type number)) (property_signature name: (computed_property_name [key]) type: (primitive_type boolean)) (property_signature name: (property_identifier type) type: (literal_type null)))"
    );
}

#[test]
fn test_nested_object_in_tuple() {
    insta::assert_snapshot!(
        sexp("[{ id: number }, 'string[]']"),
        @"(tuple_type (object_type (property_signature name: (property_identifier id) type: (primitive_type number))) (quoted_type (quote ') (array_type element: (primitive_type string))))"
    );
}

#[test]
fn test_tuple_and_empty_tuple() {
    let definition = parse("[string, number]").unwrap();
    let TypeDefinition::Tuple(tuple) = &definition else {
        panic!("Expected tuple, got {definition:?}");
    };
    assert_eq!(tuple.elements.len(), 2);

    match parse("[]").unwrap() {
        TypeDefinition::Tuple(tuple) => {
            assert!(tuple.elements.is_empty());
            assert_eq!(tuple.span, Span::new(0, 2));
        }
        other => panic!("Expected empty tuple, got {other:?}"),
    }
}

#[test]
fn test_tuple_trailing_comma_and_final_element() {
    assert_eq!(sexp("[string, number,]"), sexp("[string, number]"));
    assert_eq!(sexp("[string, number boolean]"), sexp("[string, number, boolean]"));
}

#[test]
fn test_unseparated_quote_stays_a_literal_when_printed() {
    let definition = parse("['string' 1]").unwrap();
    insta::assert_snapshot!(
        definition.to_sexp(),
        @"(tuple_type (literal_type 'string') (literal_type 1))"
    );
    let canonical = definition.to_string();
    assert_eq!(canonical, "['string' 1]");
    assert_eq!(sexp(&canonical), definition.to_sexp());

    // With a comma the same quote is a quoted expression
    insta::assert_snapshot!(
        sexp("['string', 1]"),
        @"(tuple_type (quoted_type (quote ') (primitive_type string)) (literal_type 1))"
    );
}

#[test]
fn test_spaced_brackets_are_not_an_array_suffix() {
    insta::assert_snapshot!(
        sexp("[string [ ]]"),
        @"(tuple_type (primitive_type string) (tuple_type))"
    );
    insta::assert_snapshot!(
        sexp("[string []]"),
        @"(tuple_type (array_type element: (primitive_type string)))"
    );
    assert!(matches!(
        error("number [ ]"),
        SyntaxError::UnexpectedToken { offset: 7, .. }
    ));
}

#[test]
fn test_empty_object_is_rejected() {
    assert_eq!(error("{}"), SyntaxError::EmptyObjectBody { offset: 0 });
    assert_eq!(error("[{ }]"), SyntaxError::EmptyObjectBody { offset: 1 });
}

// ========== Definitions ==========

#[test]
fn test_ark_definition_arguments() {
    let definition = parse("type(string, number)").unwrap();
    let TypeDefinition::Ark(ark) = &definition else {
        panic!("Expected ark definition, got {definition:?}");
    };
    assert_eq!(ark.keyword, ArkKeyword::Type);
    assert_eq!(ark.arguments.len(), 2);
    assert!(!ark.placeholder_comma);

    insta::assert_snapshot!(
        definition.to_sexp(),
        @"(ark_definition (ark_keyword type) (primitive_type string) (primitive_type number))"
    );
}

#[test]
fn test_dynamic_ark_keyword() {
    let definition = parse("arkEnv({ port: number })").unwrap();
    let TypeDefinition::Ark(ark) = &definition else {
        panic!("Expected ark definition, got {definition:?}");
    };
    assert_eq!(
        ark.keyword,
        ArkKeyword::Ark {
            capitalized: false,
            suffix: "Env".to_string()
        }
    );
    assert_eq!(ark.arguments.len(), 1);
}

#[test]
fn test_quoted_expression_versus_literal() {
    insta::assert_snapshot!(
        sexp("'string | number'"),
        @"(quoted_type (quote ') (union_type left: (primitive_type string) right: (primitive_type number)))"
    );
    insta::assert_snapshot!(sexp("'abc'"), @"(literal_type 'abc')");
    insta::assert_snapshot!(
        sexp("'a' | 'b'"),
        @"(union_type left: (literal_type 'a') right: (literal_type 'b'))"
    );
}

#[test]
fn test_source_file_accepts_empty_input() {
    let file = parse_source("  \n ").unwrap();
    assert!(file.definition.is_none());
    assert_eq!(file.span, Span::new(0, 4));

    let file = parse_source("string").unwrap();
    assert!(file.definition.is_some());
}

// ========== Errors ==========

#[test]
fn test_empty_input_is_an_error() {
    let err = error("");
    assert!(matches!(err, SyntaxError::UnexpectedToken { offset: 0, .. }));
}

#[test]
fn test_trailing_tokens() {
    match error("string number") {
        SyntaxError::UnexpectedToken {
            expected, offset, ..
        } => {
            assert_eq!(offset, 7);
            assert!(expected.contains(&"end of input"));
        }
        other => panic!("Expected unexpected token, got {other:?}"),
    }
}

#[test]
fn test_unterminated_delimiters() {
    assert_eq!(
        error("[string, number"),
        SyntaxError::UnterminatedDelimiter {
            delimiter: Delimiter::Bracket,
            offset: 0
        }
    );
    assert_eq!(
        error("{ a: string"),
        SyntaxError::UnterminatedDelimiter {
            delimiter: Delimiter::Brace,
            offset: 0
        }
    );
    assert_eq!(
        error("type(string"),
        SyntaxError::UnterminatedDelimiter {
            delimiter: Delimiter::Paren,
            offset: 4
        }
    );
}

#[test]
fn test_string_errors() {
    assert_eq!(
        error("'abc"),
        SyntaxError::UnterminatedQuote {
            quote: Quote::Single,
            offset: 0
        }
    );
    assert_eq!(error("'a\\'b'"), SyntaxError::UnsupportedEscape { offset: 2 });
}

#[test]
fn test_lexical_errors_surface_from_parse() {
    assert_eq!(
        error("string;"),
        SyntaxError::UnexpectedCharacter { ch: ';', offset: 6 }
    );
    assert!(matches!(
        error("01"),
        SyntaxError::InvalidNumberLiteral { offset: 0, .. }
    ));
}

#[test]
fn test_error_location() {
    let source = "{\n  a: string,\n  b: \n}";
    let err = error(source);
    let location = err.location(source);
    assert_eq!((location.line, location.column), (4, 1));
}

#[test]
fn test_failures_are_repeatable() {
    assert_eq!(error("[string,, number]"), error("[string,, number]"));
}

// ========== Depth limit ==========

#[test]
fn test_deep_tuple_hits_the_limit() {
    let depth = 10_000;
    let source = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
    match parse(&source) {
        Err(SyntaxError::NestingTooDeep { limit, offset }) => {
            assert_eq!(limit, arkscope::parser::DEFAULT_MAX_DEPTH);
            assert!(offset < depth);
        }
        other => panic!("Expected NestingTooDeep, got {other:?}"),
    }
}

#[test]
fn test_depth_within_limit() {
    let source = format!("{}{}", "[".repeat(50), "]".repeat(50));
    let definition = parse(&source).unwrap();
    assert_eq!(definition.syntax().height(), 50);
}

#[test]
fn test_long_flat_union_within_default_limits() {
    let source = (0..1000)
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(" | ");
    let definition = parse(&source).unwrap();
    assert_eq!(definition.to_string(), source);
    assert_eq!(
        definition.syntax().kind_counts().get("union_type"),
        Some(&999)
    );
    assert_eq!(sexp(&definition.to_string()), definition.to_sexp());
}

#[test]
fn test_chain_limit() {
    let config = ParserConfig::new().with_max_operators(10);
    let within = vec!["string"; 11].join(" | ");
    assert!(parse_with_config(&within, config).is_ok());

    let beyond = vec!["string"; 12].join(" | ");
    match parse_with_config(&beyond, config) {
        Err(SyntaxError::ExpressionTooLong { limit, offset }) => {
            assert_eq!(limit, 10);
            assert_eq!(&beyond[offset..offset + 1], "|");
        }
        other => panic!("Expected ExpressionTooLong, got {other:?}"),
    }
}

#[test]
fn test_custom_depth_limit() {
    let config = ParserConfig::new().with_max_depth(2);
    assert!(parse_with_config("[[string]]", config).is_ok());
    assert!(matches!(
        parse_with_config("[[[string]]]", config),
        Err(SyntaxError::NestingTooDeep { limit: 2, .. })
    ));
}
