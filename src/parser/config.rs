// Parser limits and settings

/// Default nesting budget for one parse.
///
/// Tuples, objects, parentheses, quoted expressions and ark definitions each
/// take one level.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Default cap on operators and array suffixes chained in one expression.
///
/// A flat chain such as `1 | 2 | 3` is parsed in a loop, but the tree it
/// builds leans left by one node per operator, and dropping or serializing
/// that spine recurses once per node.
pub const DEFAULT_MAX_OPERATORS: usize = 4096;

/// Settings that bound a parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum nesting depth before the parse fails with
    /// [`SyntaxError::NestingTooDeep`](crate::parser::errors::SyntaxError)
    pub max_depth: usize,
    /// Maximum operators plus suffixes in a single expression before the
    /// parse fails with
    /// [`SyntaxError::ExpressionTooLong`](crate::parser::errors::SyntaxError)
    pub max_operators: usize,
}

impl ParserConfig {
    pub fn new() -> Self {
        ParserConfig::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_operators(mut self, max_operators: usize) -> Self {
        self.max_operators = max_operators;
        self
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            max_depth: DEFAULT_MAX_DEPTH,
            max_operators: DEFAULT_MAX_OPERATORS,
        }
    }
}
