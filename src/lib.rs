//! # Introduction
//!
//! arkscope parses ArkType type-definition syntax, the compact notation for
//! data shapes such as `string | number[]` or `{ id: number, tags?: string[] }`,
//! into a typed syntax tree. A terminal inspector built with
//! [ratatui](https://docs.rs/ratatui) shows the tree next to its source.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser → Tree → (S-expression | JSON | canonical text | TUI)
//! ```
//!
//! 1. [`parser`]: tokenises the text and builds the tree; exposes
//!    [`parser::parse`] and friends.
//! 2. [`parser::tree`]: a uniform node view with kinds, fields and spans.
//! 3. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! ## Example
//!
//! ```
//! use arkscope::parser::parse;
//!
//! let definition = parse("string | number[]").unwrap();
//! assert_eq!(definition.to_string(), "string | number[]");
//! assert_eq!(
//!     definition.to_sexp(),
//!     "(union_type left: (primitive_type string) right: (array_type element: (primitive_type number)))"
//! );
//! ```

pub mod parser;
pub mod ui;

pub use parser::{parse, parse_source, parse_with_config, ParserConfig, SyntaxError};
