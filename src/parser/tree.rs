//! Uniform view over the syntax tree
//!
//! [`SyntaxNode`] borrows any node of a parsed definition and exposes it the
//! way tree consumers want it: a snake_case kind, a span, leaf text, and
//! children labelled with their field names (`name`, `type`, `left`, `right`,
//! `element`, `operator`, `argument`). The inspector, the S-expression dump
//! and the kind statistics are all built on this view.
//!
//! Definitions without quotes are transparent: a bare expression appears
//! directly as its expression node.

use crate::parser::ast::*;
use rustc_hash::FxHashMap;
use std::borrow::Cow;

/// Field label attached to a child
pub type Field = Option<&'static str>;

/// A borrowed node of the syntax tree
#[derive(Debug, Clone)]
pub enum SyntaxNode<'a> {
    Source(&'a SourceFile),
    /// Only [`TypeDefinition::Quoted`]; other definitions map to their content
    Quoted(&'a TypeDefinition),
    Ark(&'a ArkDefinition),
    Object(&'a ObjectType),
    Property(&'a PropertySignature),
    Tuple(&'a TupleType),
    /// Any expression except tuples
    Expression(&'a TypeExpression),
    /// Token-level leaf: keyword, operator, sign, key, marker
    Leaf {
        kind: &'static str,
        text: Cow<'a, str>,
        span: Span,
    },
}

impl<'a> SyntaxNode<'a> {
    pub fn source(file: &'a SourceFile) -> Self {
        SyntaxNode::Source(file)
    }

    pub fn definition(definition: &'a TypeDefinition) -> Self {
        match definition {
            TypeDefinition::Quoted { .. } => SyntaxNode::Quoted(definition),
            TypeDefinition::Tuple(tuple) => SyntaxNode::Tuple(tuple),
            TypeDefinition::Object(object) => SyntaxNode::Object(object),
            TypeDefinition::Ark(ark) => SyntaxNode::Ark(ark),
            TypeDefinition::Expression(expression) => SyntaxNode::expression(expression),
        }
    }

    pub fn expression(expression: &'a TypeExpression) -> Self {
        match expression {
            TypeExpression::Tuple(tuple) => SyntaxNode::Tuple(tuple),
            _ => SyntaxNode::Expression(expression),
        }
    }

    fn leaf(kind: &'static str, text: impl Into<Cow<'a, str>>, span: Span) -> Self {
        SyntaxNode::Leaf {
            kind,
            text: text.into(),
            span,
        }
    }

    /// Node kind tag
    pub fn kind(&self) -> &'static str {
        match self {
            SyntaxNode::Source(_) => "source_file",
            SyntaxNode::Quoted(_) => "quoted_type",
            SyntaxNode::Ark(_) => "ark_definition",
            SyntaxNode::Object(_) => "object_type",
            SyntaxNode::Property(_) => "property_signature",
            SyntaxNode::Tuple(_) => "tuple_type",
            SyntaxNode::Expression(expression) => match expression {
                TypeExpression::UnaryNumber { .. } => "unary_expression",
                TypeExpression::Ark { .. } => "ark_expression",
                TypeExpression::Union { .. } => "union_type",
                TypeExpression::Array { .. } => "array_type",
                TypeExpression::Parenthesized { .. } => "parenthesized_type",
                TypeExpression::Tuple(_) => "tuple_type",
                TypeExpression::Literal { .. } => "literal_type",
                TypeExpression::Primitive { .. } => "primitive_type",
            },
            SyntaxNode::Leaf { kind, .. } => *kind,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            SyntaxNode::Source(file) => file.span,
            SyntaxNode::Quoted(definition) => definition.span(),
            SyntaxNode::Ark(ark) => ark.span,
            SyntaxNode::Object(object) => object.span,
            SyntaxNode::Property(property) => property.span,
            SyntaxNode::Tuple(tuple) => tuple.span,
            SyntaxNode::Expression(expression) => expression.span(),
            SyntaxNode::Leaf { span, .. } => *span,
        }
    }

    /// Source text of leaves: literals, primitives and token leaves
    pub fn text(&self) -> Option<String> {
        match self {
            SyntaxNode::Expression(TypeExpression::Literal { literal, .. }) => {
                Some(literal.to_string())
            }
            SyntaxNode::Expression(TypeExpression::Primitive { primitive, .. }) => {
                Some(primitive.to_string())
            }
            SyntaxNode::Leaf { text, .. } => Some(text.to_string()),
            _ => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.text().is_some()
    }

    /// Children in source order with their field labels
    pub fn children(&self) -> Vec<(Field, SyntaxNode<'a>)> {
        match *self {
            SyntaxNode::Source(file) => file
                .definition
                .iter()
                .map(|definition| (None, SyntaxNode::definition(definition)))
                .collect(),
            SyntaxNode::Quoted(definition) => match definition {
                TypeDefinition::Quoted {
                    quote,
                    expression,
                    span,
                } => {
                    let open = Span::new(span.start, span.start + 1);
                    vec![
                        (None, SyntaxNode::leaf("quote", quote.as_char().to_string(), open)),
                        (None, SyntaxNode::expression(expression)),
                    ]
                }
                _ => Vec::new(),
            },
            SyntaxNode::Ark(ark) => {
                let mut children = vec![(
                    None,
                    SyntaxNode::leaf("ark_keyword", ark.keyword.to_string(), ark.keyword_span),
                )];
                if ark.placeholder_comma {
                    let comma = Span::new(ark.keyword_span.end, ark.span.end);
                    children.push((None, SyntaxNode::leaf("placeholder", ",", comma)));
                }
                children.extend(
                    ark.arguments
                        .iter()
                        .map(|argument| (None, SyntaxNode::definition(argument))),
                );
                children
            }
            SyntaxNode::Object(object) => object
                .properties
                .iter()
                .map(|property| (None, SyntaxNode::Property(property)))
                .collect(),
            SyntaxNode::Property(property) => {
                let name = &property.name;
                let key_span = if name.optional {
                    Span::new(name.span.start, name.span.end.saturating_sub(1))
                } else {
                    name.span
                };
                let key_kind = match name.key {
                    PropertyKey::Identifier(_) => "property_identifier",
                    PropertyKey::String { .. } => "string",
                    PropertyKey::Number(_) => "number",
                    PropertyKey::Computed(_) => "computed_property_name",
                };
                let mut children = vec![(
                    Some("name"),
                    SyntaxNode::leaf(key_kind, name.key.to_string(), key_span),
                )];
                if name.optional {
                    let marker = Span::new(key_span.end, name.span.end);
                    children.push((None, SyntaxNode::leaf("optional", "?", marker)));
                }
                children.push((Some("type"), SyntaxNode::definition(&property.value)));
                children
            }
            SyntaxNode::Tuple(tuple) => tuple
                .elements
                .iter()
                .map(|element| (None, SyntaxNode::definition(element)))
                .collect(),
            SyntaxNode::Expression(expression) => expression_children(expression),
            SyntaxNode::Leaf { .. } => Vec::new(),
        }
    }

    /// Span-free S-expression; equal strings mean structurally identical trees
    pub fn to_sexp(&self) -> String {
        let mut out = String::new();
        let mut stack = vec![SexpStep::Open(None, self.clone())];

        while let Some(step) = stack.pop() {
            let (field, node) = match step {
                SexpStep::Open(field, node) => (field, node),
                SexpStep::Close => {
                    out.push(')');
                    continue;
                }
            };
            if !out.is_empty() {
                out.push(' ');
            }
            if let Some(field) = field {
                out.push_str(field);
                out.push_str(": ");
            }
            out.push('(');
            out.push_str(node.kind());
            if let Some(text) = node.text() {
                out.push(' ');
                out.push_str(&text);
            }
            stack.push(SexpStep::Close);
            for (field, child) in node.children().into_iter().rev() {
                stack.push(SexpStep::Open(field, child));
            }
        }

        out
    }

    /// Preorder walk with depth and field labels, starting at this node
    pub fn descendants(&self) -> Vec<Visit<'a>> {
        let mut visits = Vec::new();
        let mut stack = vec![Visit {
            depth: 0,
            field: None,
            node: self.clone(),
        }];

        while let Some(visit) = stack.pop() {
            let children = visit.node.children();
            for (field, node) in children.into_iter().rev() {
                stack.push(Visit {
                    depth: visit.depth + 1,
                    field,
                    node,
                });
            }
            visits.push(visit);
        }

        visits
    }

    /// Number of nodes of each kind in this subtree
    pub fn kind_counts(&self) -> FxHashMap<&'static str, usize> {
        let mut counts = FxHashMap::default();
        for visit in self.descendants() {
            *counts.entry(visit.node.kind()).or_insert(0) += 1;
        }
        counts
    }

    /// Total node count of this subtree
    pub fn node_count(&self) -> usize {
        self.descendants().len()
    }

    /// Length of the longest root-to-leaf path, counting nodes
    pub fn height(&self) -> usize {
        self.descendants()
            .iter()
            .map(|visit| visit.depth + 1)
            .max()
            .unwrap_or(0)
    }
}

fn expression_children(expression: &TypeExpression) -> Vec<(Field, SyntaxNode<'_>)> {
    match expression {
        TypeExpression::UnaryNumber {
            operator,
            argument,
            span,
        } => {
            let sign = Span::new(span.start, span.start + 1);
            let number = Span::new(span.end.saturating_sub(argument.text.len()), span.end);
            vec![
                (Some("operator"), SyntaxNode::leaf("sign", operator.as_str(), sign)),
                (
                    Some("argument"),
                    SyntaxNode::leaf("number", argument.text.as_str(), number),
                ),
            ]
        }
        TypeExpression::Ark {
            operator,
            left,
            right,
            ..
        } => {
            // Operator position is not stored; the leaf covers the gap
            let gap = Span::new(left.span().end, right.span().start);
            vec![
                (Some("left"), SyntaxNode::expression(left)),
                (
                    Some("operator"),
                    SyntaxNode::leaf("ark_operator", operator.symbol(), gap),
                ),
                (Some("right"), SyntaxNode::expression(right)),
            ]
        }
        TypeExpression::Union { left, right, .. } => vec![
            (Some("left"), SyntaxNode::expression(left)),
            (Some("right"), SyntaxNode::expression(right)),
        ],
        TypeExpression::Array { element, .. } => {
            vec![(Some("element"), SyntaxNode::expression(element))]
        }
        TypeExpression::Parenthesized { inner, .. } => {
            vec![(None, SyntaxNode::definition(inner))]
        }
        TypeExpression::Tuple(tuple) => SyntaxNode::Tuple(tuple).children(),
        TypeExpression::Literal { .. } | TypeExpression::Primitive { .. } => Vec::new(),
    }
}

/// Pending work for [`SyntaxNode::to_sexp`]
enum SexpStep<'a> {
    Open(Field, SyntaxNode<'a>),
    Close,
}

/// One step of a preorder walk
#[derive(Debug, Clone)]
pub struct Visit<'a> {
    pub depth: usize,
    pub field: Field,
    pub node: SyntaxNode<'a>,
}

impl TypeDefinition {
    pub fn syntax(&self) -> SyntaxNode<'_> {
        SyntaxNode::definition(self)
    }

    /// S-expression of the whole definition
    pub fn to_sexp(&self) -> String {
        self.syntax().to_sexp()
    }
}

impl SourceFile {
    pub fn syntax(&self) -> SyntaxNode<'_> {
        SyntaxNode::source(self)
    }
}
