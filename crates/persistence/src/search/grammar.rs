//! Lexer for the filter query language.
//!
//! # Grammar
//!
//! ```text
//! category_filter = field ":" value
//! range_filter    = field ":" lower bound separator bound upper
//! field           = 1*( ALPHA / DIGIT / "_" )
//! value           = 1*CHAR                  ; "*" matches any substring
//! lower           = "[" / "("               ; inclusive / exclusive
//! upper           = "]" / ")"               ; inclusive / exclusive
//! separator       = *WSP "TO" *WSP
//! bound           = "*" / 1*CHAR            ; "*" leaves the side open
//! ```
//!
//! The lexer only checks shape. Whether a field exists, and whether it accepts
//! range filters, is decided by the parser against a field schema.
//!
//! # Example
//!
//! ```ignore
//! filter=name:CLEAR*
//! range_filter=creation_date:[2002-09-22T00:00:00Z TO *]
//! range_filter=employee_count:(5TO10]
//! ```

/// The open-bound marker in range filters and the wildcard in category values.
pub const WILDCARD: char = '*';

/// Range separator keyword.
pub const SEPARATOR: &str = "TO";

/// Which of the two filter shapes to lex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterShape {
    /// `field:value`
    Category,
    /// `field:[start TO end]`
    Range,
}

/// Whether a range endpoint includes its bound value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inclusivity {
    /// `[` or `]`
    Inclusive,
    /// `(` or `)`
    Exclusive,
}

impl Inclusivity {
    /// Returns true for inclusive endpoints.
    pub fn is_inclusive(&self) -> bool {
        matches!(self, Inclusivity::Inclusive)
    }
}

/// A lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// The field name.
    Field(&'a str),
    /// The `:` between field and value.
    Colon,
    /// A category value, taken verbatim.
    Value(&'a str),
    /// `[` or `(`.
    LowerDelimiter(Inclusivity),
    /// A closed range bound, trimmed.
    Bound(&'a str),
    /// The `*` open-bound marker.
    OpenBound,
    /// The `TO` keyword.
    Separator,
    /// `]` or `)`.
    UpperDelimiter(Inclusivity),
}

/// Lexing error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarError {
    /// What was expected.
    pub message: String,
    /// Byte offset into the raw filter.
    pub position: usize,
}

impl GrammarError {
    fn new(message: impl Into<String>, position: usize) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }
}

impl std::fmt::Display for GrammarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Filter syntax error at position {}: {}",
            self.position, self.message
        )
    }
}

impl std::error::Error for GrammarError {}

/// Splits a raw filter string into tokens.
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer over one raw filter string.
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Tokenizes the whole input as the given shape.
    pub fn tokenize(input: &'a str, shape: FilterShape) -> Result<Vec<Token<'a>>, GrammarError> {
        let mut lexer = Lexer::new(input);
        let mut tokens = Vec::with_capacity(7);

        tokens.push(lexer.lex_field()?);
        tokens.push(lexer.lex_colon()?);

        match shape {
            FilterShape::Category => tokens.push(lexer.lex_value()?),
            FilterShape::Range => lexer.lex_range(&mut tokens)?,
        }

        Ok(tokens)
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn consume(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn lex_field(&mut self) -> Result<Token<'a>, GrammarError> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                self.consume();
            } else {
                break;
            }
        }

        if self.pos == start {
            return Err(GrammarError::new("Expected field name", self.pos));
        }
        Ok(Token::Field(&self.input[start..self.pos]))
    }

    fn lex_colon(&mut self) -> Result<Token<'a>, GrammarError> {
        match self.peek() {
            Some(':') => {
                self.consume();
                Ok(Token::Colon)
            }
            Some(c) => Err(GrammarError::new(
                format!("Unexpected character '{}' in field name", c),
                self.pos,
            )),
            None => Err(GrammarError::new("Expected ':' after field name", self.pos)),
        }
    }

    fn lex_value(&mut self) -> Result<Token<'a>, GrammarError> {
        let value = self.rest();
        if value.is_empty() {
            return Err(GrammarError::new("Expected filter value", self.pos));
        }
        self.pos = self.input.len();
        Ok(Token::Value(value))
    }

    fn lex_range(&mut self, tokens: &mut Vec<Token<'a>>) -> Result<(), GrammarError> {
        let lower = match self.consume() {
            Some('[') => Inclusivity::Inclusive,
            Some('(') => Inclusivity::Exclusive,
            _ => {
                return Err(GrammarError::new(
                    "Range must start with '[' or '('",
                    self.pos,
                ));
            }
        };

        let rest = self.rest();
        let body_start = self.pos;
        let (upper, body) = match rest.chars().last() {
            Some(']') => (Inclusivity::Inclusive, &rest[..rest.len() - 1]),
            Some(')') => (Inclusivity::Exclusive, &rest[..rest.len() - 1]),
            _ => {
                return Err(GrammarError::new(
                    "Range must end with ']' or ')'",
                    self.input.len(),
                ));
            }
        };

        let split = find_separator(body)
            .ok_or_else(|| GrammarError::new("Expected a single 'TO' separator", body_start))?;
        let start = &body[..split];
        let end = &body[split + SEPARATOR.len()..];

        tokens.push(Token::LowerDelimiter(lower));
        tokens.push(bound_token(start, body_start)?);
        tokens.push(Token::Separator);
        tokens.push(bound_token(end, body_start + split + SEPARATOR.len())?);
        tokens.push(Token::UpperDelimiter(upper));

        self.pos = self.input.len();
        Ok(())
    }
}

/// Locates the separator inside a range body.
///
/// A `TO` with whitespace on both sides wins; otherwise the body must contain
/// exactly one bare `TO`.
fn find_separator(body: &str) -> Option<usize> {
    let candidates: Vec<usize> = body.match_indices(SEPARATOR).map(|(i, _)| i).collect();

    let spaced: Vec<usize> = candidates
        .iter()
        .copied()
        .filter(|&i| {
            let before = body[..i].chars().next_back();
            let after = body[i + SEPARATOR.len()..].chars().next();
            before.is_some_and(char::is_whitespace) && after.is_some_and(char::is_whitespace)
        })
        .collect();

    match (spaced.as_slice(), candidates.as_slice()) {
        ([only], _) => Some(*only),
        ([], [only]) => Some(*only),
        _ => None,
    }
}

fn bound_token(raw: &str, position: usize) -> Result<Token<'_>, GrammarError> {
    let bound = raw.trim();
    if bound.is_empty() {
        return Err(GrammarError::new("Expected range bound", position));
    }
    if bound.len() == 1 && bound.starts_with(WILDCARD) {
        Ok(Token::OpenBound)
    } else {
        Ok(Token::Bound(bound))
    }
}
