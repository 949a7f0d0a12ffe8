//! ArkType definition parser
//!
//! This module transforms definition text into a syntax tree:
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parser state and entry points (tokens → tree)
//! - [`ast`]: Tree node definitions
//! - [`tree`]: Uniform node view, S-expressions and statistics
//! - [`printer`]: Canonical text for any node
//!
//! # Supported Notation
//!
//! - Primitives: `string`, `number`, `boolean`, `bigint`, `symbol`, `unknown`, `any`, `never`, `void`
//! - Literals: quoted strings, numbers (decimal, hex, binary, octal, bigint), `true`, `false`, `null`, `undefined`
//! - Operators: `[]` suffix, then `<` `>` `=` `%` `&` `|` on one left-associative tier
//! - Structures: tuples, objects, parenthesized groups, quoted expressions
//! - Definitions: `type(...)`, `generic`, `scope`, `define`, `match`, `fn`, `module`, `ark*(...)`
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with precedence climbing for infix operators.
//! No external parser generator dependencies.

pub mod ast;
pub mod config;
mod definitions;
pub mod errors;
mod expressions;
pub mod lexer;
pub mod parse;
mod primary;
pub mod printer;
pub mod tree;

pub use config::{ParserConfig, DEFAULT_MAX_DEPTH, DEFAULT_MAX_OPERATORS};
pub use errors::SyntaxError;
pub use parse::{parse, parse_source, parse_with_config, Parser};
