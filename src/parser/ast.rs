// AST (Abstract Syntax Tree) definitions for ArkType definitions
//
// Every composite node owns its children outright: the tree is strict, with
// no sharing and no cycles, and it lives as long as the caller keeps it.

use serde::Serialize;
use std::fmt;

/// Byte range of a node or token within the source text (end exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Span covering `self` through the end of `other`.
    pub fn to(self, other: Span) -> Span {
        Span::new(self.start, other.end)
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }
}

/// Line/column position for error reporting (both 1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Convert a byte offset into a line/column pair. Offsets past the end
    /// clamp to the end of the text; columns count characters, not bytes.
    pub fn from_offset(source: &str, offset: usize) -> Self {
        let mut line = 1;
        let mut column = 1;
        for (idx, ch) in source.char_indices() {
            if idx >= offset {
                break;
            }
            if ch == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        Self { line, column }
    }
}

/// Which quote character delimits a string or quoted expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Quote {
    Single,
    Double,
}

impl Quote {
    pub fn as_char(self) -> char {
        match self {
            Quote::Single => '\'',
            Quote::Double => '"',
        }
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quote::Single => write!(f, "single-quoted"),
            Quote::Double => write!(f, "double-quoted"),
        }
    }
}

/// The closed set of primitive type keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    String,
    Number,
    Boolean,
    Bigint,
    Symbol,
    Unknown,
    Any,
    Never,
    Void,
}

impl Primitive {
    pub const ALL: [Primitive; 9] = [
        Primitive::String,
        Primitive::Number,
        Primitive::Boolean,
        Primitive::Bigint,
        Primitive::Symbol,
        Primitive::Unknown,
        Primitive::Any,
        Primitive::Never,
        Primitive::Void,
    ];

    pub fn from_word(word: &str) -> Option<Self> {
        Some(match word {
            "string" => Primitive::String,
            "number" => Primitive::Number,
            "boolean" => Primitive::Boolean,
            "bigint" => Primitive::Bigint,
            "symbol" => Primitive::Symbol,
            "unknown" => Primitive::Unknown,
            "any" => Primitive::Any,
            "never" => Primitive::Never,
            "void" => Primitive::Void,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Primitive::String => "string",
            Primitive::Number => "number",
            Primitive::Boolean => "boolean",
            Primitive::Bigint => "bigint",
            Primitive::Symbol => "symbol",
            Primitive::Unknown => "unknown",
            Primitive::Any => "any",
            Primitive::Never => "never",
            Primitive::Void => "void",
        }
    }
}

/// Lexical form of a number literal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberKind {
    Integer,
    Float,
    Hex,
    Binary,
    Octal,
    BigInt,
}

/// A number literal, kept as written (separators and prefixes included)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumberLiteral {
    pub text: String,
    pub kind: NumberKind,
}

impl NumberLiteral {
    pub fn new(text: impl Into<String>, kind: NumberKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }
}

/// Sign folded into a unary number (`-1`, `+1`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sign {
    Minus,
    Plus,
}

impl Sign {
    pub fn as_str(self) -> &'static str {
        match self {
            Sign::Minus => "-",
            Sign::Plus => "+",
        }
    }
}

/// Infix operators. All share one precedence tier and associate left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOperator {
    Lt,      // <
    Gt,      // >
    Eq,      // =
    Percent, // %
    Amp,     // &
    Pipe,    // |
}

impl BinaryOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOperator::Lt => "<",
            BinaryOperator::Gt => ">",
            BinaryOperator::Eq => "=",
            BinaryOperator::Percent => "%",
            BinaryOperator::Amp => "&",
            BinaryOperator::Pipe => "|",
        }
    }

    pub fn is_union(self) -> bool {
        self == BinaryOperator::Pipe
    }
}

/// Keyword heading an ark definition such as `type(...)`.
///
/// Besides the fixed set, any word matching `[aA]rk[a-zA-Z]*` is accepted
/// so new combinators work without a grammar change.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArkKeyword {
    Type,
    Generic,
    Scope,
    Define,
    Match,
    Fn,
    Module,
    Ark { capitalized: bool, suffix: String },
}

impl ArkKeyword {
    pub fn from_word(word: &str) -> Option<Self> {
        Some(match word {
            "type" => ArkKeyword::Type,
            "generic" => ArkKeyword::Generic,
            "scope" => ArkKeyword::Scope,
            "define" => ArkKeyword::Define,
            "match" => ArkKeyword::Match,
            "fn" => ArkKeyword::Fn,
            "module" => ArkKeyword::Module,
            _ => {
                let capitalized = match word.get(..3) {
                    Some("ark") => false,
                    Some("Ark") => true,
                    _ => return None,
                };
                let suffix = &word[3..];
                if !suffix.chars().all(|c| c.is_ascii_alphabetic()) {
                    return None;
                }
                ArkKeyword::Ark {
                    capitalized,
                    suffix: suffix.to_string(),
                }
            }
        })
    }
}

/// Literal types: strings, numbers and the value keywords
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LiteralType {
    /// Raw fragment between the quotes; escapes are not interpreted
    String { quote: Quote, value: String },
    Number(NumberLiteral),
    True,
    False,
    Null,
    Undefined,
}

/// `[a, b, ...]`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TupleType {
    pub elements: Vec<TypeDefinition>,
    /// The last element followed the one before it without a comma
    /// (`[a, b c]`). A quoted element reads differently before a comma, so
    /// the printer keeps the gap.
    pub unseparated_last: bool,
    pub span: Span,
}

/// `{ name: type, ... }`, at least one property
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectType {
    pub properties: Vec<PropertySignature>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertySignature {
    pub name: PropertyName,
    #[serde(rename = "type")]
    pub value: TypeDefinition,
    pub span: Span,
}

/// Property key plus the optional `?` marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyName {
    pub key: PropertyKey,
    pub optional: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKey {
    Identifier(String),
    String { quote: Quote, value: String },
    Number(NumberLiteral),
    Computed(ComputedKey),
}

/// Contents of a computed key `[...]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComputedKey {
    Identifier(String),
    String { quote: Quote, value: String },
}

/// `keyword(arg, ...)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArkDefinition {
    pub keyword: ArkKeyword,
    pub keyword_span: Span,
    pub arguments: Vec<TypeDefinition>,
    /// `keyword(,)`: a lone comma standing in for the argument list
    pub placeholder_comma: bool,
    pub span: Span,
}

/// Recursive expression forms combining primaries with operators
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeExpression {
    UnaryNumber {
        operator: Sign,
        argument: NumberLiteral,
        span: Span,
    },
    /// Infix expression for every operator except `|`
    Ark {
        operator: BinaryOperator,
        left: Box<TypeExpression>,
        right: Box<TypeExpression>,
        span: Span,
    },
    Union {
        left: Box<TypeExpression>,
        right: Box<TypeExpression>,
        span: Span,
    },
    Array {
        element: Box<TypeExpression>,
        span: Span,
    },
    Parenthesized {
        inner: Box<TypeDefinition>,
        span: Span,
    },
    Tuple(TupleType),
    Literal {
        literal: LiteralType,
        span: Span,
    },
    Primitive {
        primitive: Primitive,
        span: Span,
    },
}

impl TypeExpression {
    /// Combine two operands. `|` becomes a union, every other operator an
    /// ark expression; both share precedence and associativity.
    pub fn binary(operator: BinaryOperator, left: TypeExpression, right: TypeExpression) -> Self {
        let span = left.span().to(right.span());
        let left = Box::new(left);
        let right = Box::new(right);
        if operator.is_union() {
            TypeExpression::Union { left, right, span }
        } else {
            TypeExpression::Ark {
                operator,
                left,
                right,
                span,
            }
        }
    }

    pub fn span(&self) -> Span {
        match self {
            TypeExpression::UnaryNumber { span, .. }
            | TypeExpression::Ark { span, .. }
            | TypeExpression::Union { span, .. }
            | TypeExpression::Array { span, .. }
            | TypeExpression::Parenthesized { span, .. }
            | TypeExpression::Literal { span, .. }
            | TypeExpression::Primitive { span, .. } => *span,
            TypeExpression::Tuple(tuple) => tuple.span,
        }
    }

    /// Operator of a binary node; `|` for unions
    pub fn operator(&self) -> Option<BinaryOperator> {
        match self {
            TypeExpression::Ark { operator, .. } => Some(*operator),
            TypeExpression::Union { .. } => Some(BinaryOperator::Pipe),
            _ => None,
        }
    }

    pub fn left(&self) -> Option<&TypeExpression> {
        match self {
            TypeExpression::Ark { left, .. } | TypeExpression::Union { left, .. } => Some(left),
            _ => None,
        }
    }

    pub fn right(&self) -> Option<&TypeExpression> {
        match self {
            TypeExpression::Ark { right, .. } | TypeExpression::Union { right, .. } => Some(right),
            _ => None,
        }
    }

    pub fn element(&self) -> Option<&TypeExpression> {
        match self {
            TypeExpression::Array { element, .. } => Some(element),
            _ => None,
        }
    }

    /// Number operand of a unary number
    pub fn argument(&self) -> Option<&NumberLiteral> {
        match self {
            TypeExpression::UnaryNumber { argument, .. } => Some(argument),
            _ => None,
        }
    }
}

/// Top-level unit: one complete type description
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeDefinition {
    /// `"expr"` or `'expr'`: quotes delimiting an embedded expression
    Quoted {
        quote: Quote,
        expression: TypeExpression,
        span: Span,
    },
    Tuple(TupleType),
    Object(ObjectType),
    Ark(ArkDefinition),
    /// Any other expression written without quotes
    Expression(TypeExpression),
}

impl TypeDefinition {
    pub fn span(&self) -> Span {
        match self {
            TypeDefinition::Quoted { span, .. } => *span,
            TypeDefinition::Tuple(tuple) => tuple.span,
            TypeDefinition::Object(object) => object.span,
            TypeDefinition::Ark(ark) => ark.span,
            TypeDefinition::Expression(expr) => expr.span(),
        }
    }

    /// The expression carried by quoted and bare definitions
    pub fn expression(&self) -> Option<&TypeExpression> {
        match self {
            TypeDefinition::Quoted { expression, .. } | TypeDefinition::Expression(expression) => {
                Some(expression)
            }
            _ => None,
        }
    }
}

/// Whole input: at most one definition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceFile {
    pub definition: Option<TypeDefinition>,
    pub span: Span,
}
