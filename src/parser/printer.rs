//! Canonical text rendering
//!
//! Every node implements [`Display`](fmt::Display), writing the normalized
//! source form: single spaces around infix operators, `, ` between list
//! items and `{ key: value }` padding inside objects. Parsing the printed text
//! of a parsed tree gives back the same structure.

use crate::parser::ast::*;
use std::fmt;

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for NumberLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for ArkKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArkKeyword::Type => f.write_str("type"),
            ArkKeyword::Generic => f.write_str("generic"),
            ArkKeyword::Scope => f.write_str("scope"),
            ArkKeyword::Define => f.write_str("define"),
            ArkKeyword::Match => f.write_str("match"),
            ArkKeyword::Fn => f.write_str("fn"),
            ArkKeyword::Module => f.write_str("module"),
            ArkKeyword::Ark {
                capitalized,
                suffix,
            } => {
                let prefix = if *capitalized { "Ark" } else { "ark" };
                write!(f, "{}{}", prefix, suffix)
            }
        }
    }
}

/// Write `value` between a pair of `quote` characters
fn quoted(f: &mut fmt::Formatter<'_>, quote: Quote, value: &str) -> fmt::Result {
    let q = quote.as_char();
    write!(f, "{}{}{}", q, value, q)
}

/// Write items separated by `, `
fn comma_separated<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for LiteralType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralType::String { quote, value } => quoted(f, *quote, value),
            LiteralType::Number(number) => write!(f, "{}", number),
            LiteralType::True => f.write_str("true"),
            LiteralType::False => f.write_str("false"),
            LiteralType::Null => f.write_str("null"),
            LiteralType::Undefined => f.write_str("undefined"),
        }
    }
}

impl fmt::Display for TupleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        match self.elements.split_last() {
            Some((last, rest)) if self.unseparated_last && !rest.is_empty() => {
                comma_separated(f, rest)?;
                let last = last.to_string();
                // `[]` right after an element would become its array suffix
                match last.strip_prefix("[]") {
                    Some(tail) => write!(f, " [ ]{}", tail)?,
                    None => write!(f, " {}", last)?,
                }
            }
            _ => comma_separated(f, &self.elements)?,
        }
        f.write_str("]")
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{ ")?;
        comma_separated(f, &self.properties)?;
        f.write_str(" }")
    }
}

impl fmt::Display for PropertySignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}

impl fmt::Display for PropertyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key)?;
        if self.optional {
            f.write_str("?")?;
        }
        Ok(())
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyKey::Identifier(name) => f.write_str(name),
            PropertyKey::String { quote, value } => quoted(f, *quote, value),
            PropertyKey::Number(number) => write!(f, "{}", number),
            PropertyKey::Computed(key) => write!(f, "[{}]", key),
        }
    }
}

impl fmt::Display for ComputedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComputedKey::Identifier(name) => f.write_str(name),
            ComputedKey::String { quote, value } => quoted(f, *quote, value),
        }
    }
}

impl fmt::Display for ArkDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.keyword)?;
        if self.placeholder_comma {
            f.write_str(",")?;
        } else {
            comma_separated(f, &self.arguments)?;
        }
        f.write_str(")")
    }
}

impl fmt::Display for TypeExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Operator chains and array suffixes nest on the left; walk that
        // spine in a loop so long chains print without deep recursion
        let mut spine = Vec::new();
        let mut base = self;
        loop {
            match base {
                TypeExpression::Ark { left, .. } | TypeExpression::Union { left, .. } => {
                    spine.push(base);
                    base = &**left;
                }
                TypeExpression::Array { element, .. } => {
                    spine.push(base);
                    base = &**element;
                }
                _ => break,
            }
        }

        write_operand(f, base)?;
        for node in spine.iter().rev() {
            match node {
                TypeExpression::Ark {
                    operator, right, ..
                } => write!(f, " {} {}", operator, right)?,
                TypeExpression::Union { right, .. } => write!(f, " | {}", right)?,
                TypeExpression::Array { .. } => f.write_str("[]")?,
                _ => {}
            }
        }
        Ok(())
    }
}

/// Write an expression that does not continue a chain
fn write_operand(f: &mut fmt::Formatter<'_>, expression: &TypeExpression) -> fmt::Result {
    match expression {
        TypeExpression::UnaryNumber {
            operator, argument, ..
        } => write!(f, "{}{}", operator, argument),
        TypeExpression::Parenthesized { inner, .. } => write!(f, "({})", inner),
        TypeExpression::Tuple(tuple) => write!(f, "{}", tuple),
        TypeExpression::Literal { literal, .. } => write!(f, "{}", literal),
        TypeExpression::Primitive { primitive, .. } => write!(f, "{}", primitive),
        TypeExpression::Ark { .. } | TypeExpression::Union { .. } | TypeExpression::Array { .. } => {
            write!(f, "{}", expression)
        }
    }
}

impl fmt::Display for TypeDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDefinition::Quoted {
                quote, expression, ..
            } => {
                let q = quote.as_char();
                write!(f, "{}{}{}", q, expression, q)
            }
            TypeDefinition::Tuple(tuple) => write!(f, "{}", tuple),
            TypeDefinition::Object(object) => write!(f, "{}", object),
            TypeDefinition::Ark(ark) => write!(f, "{}", ark),
            TypeDefinition::Expression(expression) => write!(f, "{}", expression),
        }
    }
}

impl fmt::Display for SourceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.definition {
            Some(definition) => write!(f, "{}", definition),
            None => Ok(()),
        }
    }
}
