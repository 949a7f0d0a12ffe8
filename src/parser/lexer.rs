//! Lexer (tokenizer) for ArkType definitions
//!
//! Converts raw source text into [`Token`]s on demand. The [`Lexer`] is a
//! cheap cursor over the borrowed source: cloning it snapshots the position,
//! which is how the parser looks ahead and backtracks.
//!
//! String contents are context dependent (a quote either opens a string
//! literal or delimits an embedded expression), so the plain token stream only
//! reports quote characters. The parser scans literal contents itself through
//! [`Lexer::string_fragment`].

use super::ast::{ArkKeyword, NumberKind, NumberLiteral, Primitive, Quote, Span};
use super::errors::SyntaxError;
use std::fmt;

/// Reserved words that are not primitives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Keyword {
    True,
    False,
    Null,
    Undefined,
    Definition(ArkKeyword),
}

impl Keyword {
    pub fn from_word(word: &str) -> Option<Self> {
        Some(match word {
            "true" => Keyword::True,
            "false" => Keyword::False,
            "null" => Keyword::Null,
            "undefined" => Keyword::Undefined,
            _ => Keyword::Definition(ArkKeyword::from_word(word)?),
        })
    }
}

/// All token variants produced by the lexer.
///
/// Every variant carries its [`Span`] so errors can point at a byte offset
/// without a separate token→location table.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Words
    Ident(String, Span),
    Keyword(Keyword, Span),
    Primitive(Primitive, Span),

    // Literals
    Number(NumberLiteral, Span),
    /// Raw contents of a string literal (span excludes the quotes)
    StringFragment(String, Quote, Span),

    // Quotes
    SingleQuote(Span), // '
    DoubleQuote(Span), // "

    // Operators
    Lt(Span),      // <
    Gt(Span),      // >
    Eq(Span),      // =
    Percent(Span), // %
    Amp(Span),     // &
    Pipe(Span),    // |

    // Signs
    Plus(Span),  // +
    Minus(Span), // -

    // Punctuation
    Question(Span), // ?
    Colon(Span),    // :
    Comma(Span),    // ,
    LParen(Span),   // (
    RParen(Span),   // )
    LBrace(Span),   // {
    RBrace(Span),   // }
    LBracket(Span), // [
    RBracket(Span), // ]

    // End of input
    Eof(Span),
}

impl Token {
    /// Returns the source span of this token.
    pub fn span(&self) -> Span {
        match self {
            Token::Ident(_, span)
            | Token::Keyword(_, span)
            | Token::Primitive(_, span)
            | Token::Number(_, span)
            | Token::StringFragment(_, _, span)
            | Token::SingleQuote(span)
            | Token::DoubleQuote(span)
            | Token::Lt(span)
            | Token::Gt(span)
            | Token::Eq(span)
            | Token::Percent(span)
            | Token::Amp(span)
            | Token::Pipe(span)
            | Token::Plus(span)
            | Token::Minus(span)
            | Token::Question(span)
            | Token::Colon(span)
            | Token::Comma(span)
            | Token::LParen(span)
            | Token::RParen(span)
            | Token::LBrace(span)
            | Token::RBrace(span)
            | Token::LBracket(span)
            | Token::RBracket(span)
            | Token::Eof(span) => *span,
        }
    }

    /// The quote kind for quote tokens
    pub fn quote(&self) -> Option<Quote> {
        match self {
            Token::SingleQuote(_) => Some(Quote::Single),
            Token::DoubleQuote(_) => Some(Quote::Double),
            _ => None,
        }
    }

    /// Source text of word-like tokens, which may all serve as property names
    pub fn word(&self) -> Option<String> {
        match self {
            Token::Ident(name, _) => Some(name.clone()),
            Token::Primitive(primitive, _) => Some(primitive.as_str().to_string()),
            Token::Keyword(keyword, _) => Some(
                match keyword {
                    Keyword::True => "true",
                    Keyword::False => "false",
                    Keyword::Null => "null",
                    Keyword::Undefined => "undefined",
                    Keyword::Definition(ark) => return Some(ark.to_string()),
                }
                .to_string(),
            ),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Ident(s, _) => write!(f, "identifier '{}'", s),
            Token::Keyword(Keyword::Definition(k), _) => write!(f, "keyword '{}'", k),
            Token::Keyword(_, _) => write!(f, "keyword '{}'", self.word().unwrap_or_default()),
            Token::Primitive(p, _) => write!(f, "'{}'", p.as_str()),
            Token::Number(n, _) => write!(f, "number {}", n.text),
            Token::StringFragment(s, q, _) => write!(f, "string {}{}{}", q.as_char(), s, q.as_char()),
            Token::SingleQuote(_) => write!(f, "\"'\""),
            Token::DoubleQuote(_) => write!(f, "'\"'"),
            Token::Lt(_) => write!(f, "'<'"),
            Token::Gt(_) => write!(f, "'>'"),
            Token::Eq(_) => write!(f, "'='"),
            Token::Percent(_) => write!(f, "'%'"),
            Token::Amp(_) => write!(f, "'&'"),
            Token::Pipe(_) => write!(f, "'|'"),
            Token::Plus(_) => write!(f, "'+'"),
            Token::Minus(_) => write!(f, "'-'"),
            Token::Question(_) => write!(f, "'?'"),
            Token::Colon(_) => write!(f, "':'"),
            Token::Comma(_) => write!(f, "','"),
            Token::LParen(_) => write!(f, "'('"),
            Token::RParen(_) => write!(f, "')'"),
            Token::LBrace(_) => write!(f, "'{{'"),
            Token::RBrace(_) => write!(f, "'}}'"),
            Token::LBracket(_) => write!(f, "'['"),
            Token::RBracket(_) => write!(f, "']'"),
            Token::Eof(_) => write!(f, "end of input"),
        }
    }
}

/// Characters that can never appear in an identifier
fn is_forbidden(ch: char) -> bool {
    ch <= '\u{1F}'
        || ch.is_whitespace()
        || matches!(
            ch,
            ':' | ';'
                | '`'
                | '"'
                | '\''
                | '@'
                | '#'
                | '.'
                | ','
                | '|'
                | '^'
                | '&'
                | '<'
                | '='
                | '>'
                | '+'
                | '-'
                | '*'
                | '/'
                | '\\'
                | '%'
                | '?'
                | '!'
                | '~'
                | '('
                | ')'
                | '['
                | ']'
                | '{'
                | '}'
                | '\u{FEFF}'
                | '\u{2060}'
                | '\u{200B}'
                | '\u{2028}'
                | '\u{2029}'
        )
}

fn is_ident_start(ch: char) -> bool {
    !is_forbidden(ch) && !ch.is_ascii_digit()
}

fn is_ident_continue(ch: char) -> bool {
    !is_forbidden(ch)
}

/// Lazy, restartable tokenizer over a borrowed source string
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    source: &'a str,
    position: usize,
    finished: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source string.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            position: 0,
            finished: false,
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Byte offset of the next unread character
    pub fn position(&self) -> usize {
        self.position
    }

    /// Move the cursor to `position`, which must lie on a char boundary
    pub fn reset(&mut self, position: usize) {
        self.position = position.min(self.source.len());
        self.finished = false;
    }

    /// Tokenize the entire input, ending with [`Token::Eof`]
    pub fn tokenize(&mut self) -> Result<Vec<Token>, SyntaxError> {
        self.collect()
    }

    /// Get next token
    pub fn next_token(&mut self) -> Result<Token, SyntaxError> {
        self.skip_whitespace();

        let start = self.position;
        let Some(ch) = self.peek() else {
            return Ok(Token::Eof(Span::new(start, start)));
        };

        if ch.is_ascii_digit() || (ch == '.' && self.peek_ahead(1).is_some_and(|c| c.is_ascii_digit())) {
            return self.number_literal(start);
        }

        if is_ident_start(ch) || (ch == '\\' && self.unicode_escape_len(start).is_some()) {
            return Ok(self.identifier_or_keyword(start));
        }

        self.advance();
        let span = Span::new(start, self.position);
        match ch {
            '\'' => Ok(Token::SingleQuote(span)),
            '"' => Ok(Token::DoubleQuote(span)),
            '<' => Ok(Token::Lt(span)),
            '>' => Ok(Token::Gt(span)),
            '=' => Ok(Token::Eq(span)),
            '%' => Ok(Token::Percent(span)),
            '&' => Ok(Token::Amp(span)),
            '|' => Ok(Token::Pipe(span)),
            '+' => Ok(Token::Plus(span)),
            '-' => Ok(Token::Minus(span)),
            '?' => Ok(Token::Question(span)),
            ':' => Ok(Token::Colon(span)),
            ',' => Ok(Token::Comma(span)),
            '(' => Ok(Token::LParen(span)),
            ')' => Ok(Token::RParen(span)),
            '{' => Ok(Token::LBrace(span)),
            '}' => Ok(Token::RBrace(span)),
            '[' => Ok(Token::LBracket(span)),
            ']' => Ok(Token::RBracket(span)),
            _ => {
                self.position = start;
                Err(SyntaxError::UnexpectedCharacter { ch, offset: start })
            }
        }
    }

    /// Scan the raw contents of a string literal whose opening quote ends at
    /// `start`, and consume the closing quote.
    ///
    /// The fragment is a maximal run of characters other than the quote, a
    /// backslash or a line break; escapes are not interpreted.
    pub fn string_fragment(&mut self, start: usize, quote: Quote) -> Result<Token, SyntaxError> {
        self.reset(start);
        let opening = start.saturating_sub(1);
        let closing = quote.as_char();

        while let Some(ch) = self.peek() {
            if ch == closing {
                let span = Span::new(start, self.position);
                let text = self.source[start..self.position].to_string();
                self.advance();
                return Ok(Token::StringFragment(text, quote, span));
            }
            match ch {
                '\\' => {
                    return Err(SyntaxError::UnsupportedEscape {
                        offset: self.position,
                    })
                }
                '\r' | '\n' => break,
                _ => {
                    self.advance();
                }
            }
        }

        Err(SyntaxError::UnterminatedQuote {
            quote,
            offset: opening,
        })
    }

    /// Parse numeric literal: hex, binary, octal, decimal and bigint forms
    fn number_literal(&mut self, start: usize) -> Result<Token, SyntaxError> {
        let bytes = self.source.as_bytes();
        let mut pos = start;

        let radix = match (bytes.get(pos), bytes.get(pos + 1)) {
            (Some(b'0'), Some(b'x' | b'X')) => Some(NumberKind::Hex),
            (Some(b'0'), Some(b'b' | b'B')) => Some(NumberKind::Binary),
            (Some(b'0'), Some(b'o' | b'O')) => Some(NumberKind::Octal),
            _ => None,
        };

        let kind = if let Some(radix) = radix {
            let is_digit: fn(u8) -> bool = match radix {
                NumberKind::Hex => |b: u8| b.is_ascii_hexdigit(),
                NumberKind::Binary => |b: u8| matches!(b, b'0' | b'1'),
                _ => |b: u8| matches!(b, b'0'..=b'7'),
            };
            pos = self.digits(pos + 2, is_digit).ok_or_else(|| self.invalid_number(start))?;
            if bytes.get(pos) == Some(&b'n') {
                pos += 1;
                NumberKind::BigInt
            } else {
                radix
            }
        } else {
            let has_integer_part = bytes[pos] != b'.';
            if has_integer_part {
                pos = self
                    .digits(pos, |b| b.is_ascii_digit())
                    .ok_or_else(|| self.invalid_number(start))?;
                // Leading zeros are only allowed on a bare `0`
                if bytes[start] == b'0' && pos - start > 1 {
                    return Err(self.invalid_number(start));
                }
            }

            if has_integer_part && bytes.get(pos) == Some(&b'n') {
                pos += 1;
                NumberKind::BigInt
            } else {
                let mut kind = NumberKind::Integer;
                if bytes.get(pos) == Some(&b'.') {
                    kind = NumberKind::Float;
                    if bytes.get(pos + 1).is_some_and(|b| b.is_ascii_digit()) {
                        pos = self
                            .digits(pos + 1, |b| b.is_ascii_digit())
                            .ok_or_else(|| self.invalid_number(start))?;
                    } else {
                        // `1.` is a float; a leading dot always has digits
                        pos += 1;
                    }
                }
                if matches!(bytes.get(pos), Some(b'e' | b'E')) {
                    kind = NumberKind::Float;
                    pos += 1;
                    if matches!(bytes.get(pos), Some(b'+' | b'-')) {
                        pos += 1;
                    }
                    pos = self
                        .digits(pos, |b| b.is_ascii_digit())
                        .ok_or_else(|| self.invalid_number(start))?;
                }
                kind
            }
        };

        // A number must not run straight into a word (`12px`, `1_`, `0x1g`)
        if self.source[pos..]
            .chars()
            .next()
            .is_some_and(|c| is_ident_continue(c) || c == '\\')
        {
            return Err(self.invalid_number(start));
        }

        self.position = pos;
        let text = &self.source[start..pos];
        Ok(Token::Number(NumberLiteral::new(text, kind), Span::new(start, pos)))
    }

    /// Scan `digit (_? digit)*` starting at `pos`, returning the end offset
    fn digits(&self, mut pos: usize, is_digit: fn(u8) -> bool) -> Option<usize> {
        let bytes = self.source.as_bytes();
        if !bytes.get(pos).is_some_and(|&b| is_digit(b)) {
            return None;
        }
        pos += 1;
        loop {
            match bytes.get(pos) {
                Some(&b) if is_digit(b) => pos += 1,
                Some(b'_') if bytes.get(pos + 1).is_some_and(|&b| is_digit(b)) => pos += 2,
                _ => return Some(pos),
            }
        }
    }

    fn invalid_number(&self, start: usize) -> SyntaxError {
        let end = self.source[start..]
            .char_indices()
            .find(|&(_, c)| !(is_ident_continue(c) || matches!(c, '.' | '+' | '-')))
            .map_or(self.source.len(), |(idx, _)| start + idx);
        SyntaxError::InvalidNumberLiteral {
            text: self.source[start..end].to_string(),
            offset: start,
        }
    }

    /// Length of a `\uXXXX` or `\u{X+}` escape at `pos`, if there is one
    fn unicode_escape_len(&self, pos: usize) -> Option<usize> {
        let rest = self.source.get(pos..)?.as_bytes();
        if rest.len() < 2 || rest[0] != b'\\' || rest[1] != b'u' {
            return None;
        }
        if rest.get(2) == Some(&b'{') {
            let digits = rest[3..].iter().take_while(|b| b.is_ascii_hexdigit()).count();
            if digits > 0 && rest.get(3 + digits) == Some(&b'}') {
                return Some(4 + digits);
            }
            return None;
        }
        if rest.len() >= 6 && rest[2..6].iter().all(|b| b.is_ascii_hexdigit()) {
            return Some(6);
        }
        None
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self, start: usize) -> Token {
        while let Some(ch) = self.peek() {
            if is_ident_continue(ch) {
                self.advance();
            } else if let Some(len) = self.unicode_escape_len(self.position) {
                self.position += len;
            } else {
                break;
            }
        }

        let word = &self.source[start..self.position];
        let span = Span::new(start, self.position);

        // Check if it's a keyword
        if let Some(primitive) = Primitive::from_word(word) {
            Token::Primitive(primitive, span)
        } else if let Some(keyword) = Keyword::from_word(word) {
            Token::Keyword(keyword, span)
        } else {
            Token::Ident(word.to_string(), span)
        }
    }

    /// Skip whitespace; the notation has no comments
    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() || ch == '\u{FEFF}' {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.source[self.position..].chars().next()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.source[self.position..].chars().nth(n)
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += ch.len_utf8();
        Some(ch)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, SyntaxError>;

    /// Yields tokens up to and including [`Token::Eof`], or up to the first
    /// error, then `None`.
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let result = self.next_token();
        if matches!(result, Ok(Token::Eof(_)) | Err(_)) {
            self.finished = true;
        }
        Some(result)
    }
}
