//! Filter parser.
//!
//! Turns raw `filter` and `range_filter` strings into typed descriptors,
//! validating field names and kinds against a [`FieldSchema`].

use tracing::debug;

use crate::error::SearchError;

use super::grammar::{FilterShape, GrammarError, Inclusivity, Lexer, Token, WILDCARD};
use super::schema::FieldSchema;

/// Store-level pattern wildcard substituted for `*`.
pub const LIKE_WILDCARD: &str = "%";

/// Escape character for `LIKE` patterns; stores render `LIKE ? ESCAPE '\'`.
pub const LIKE_ESCAPE: char = '\\';

/// How a category filter matches its field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryMatch {
    /// Exact equality.
    Exact(String),
    /// Pattern match with `%` wildcards. Literal `%`, `_` and `\` in the
    /// user's value are escaped with [`LIKE_ESCAPE`].
    Like(String),
}

/// A validated `field:value` filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryFilter {
    /// Field name, present in the schema.
    pub field: String,
    /// How the value is matched.
    pub matcher: CategoryMatch,
}

impl CategoryFilter {
    /// The exact value, if this filter is an equality match.
    pub fn exact_value(&self) -> Option<&str> {
        match &self.matcher {
            CategoryMatch::Exact(value) => Some(value),
            CategoryMatch::Like(_) => None,
        }
    }

    /// The pattern, if this filter is a wildcard match.
    pub fn like_pattern(&self) -> Option<&str> {
        match &self.matcher {
            CategoryMatch::Like(pattern) => Some(pattern),
            CategoryMatch::Exact(_) => None,
        }
    }
}

/// One side of a range filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeBound {
    /// Trimmed bound text.
    pub value: String,
    /// `[` or `]` rather than `(` or `)`.
    pub inclusive: bool,
}

/// A validated range filter on a continuous field.
///
/// A `None` side is unbounded.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct RangeFilter {
    pub field: String,
    pub start: Option<RangeBound>,
    pub end: Option<RangeBound>,
}

/// Parses a `field:value` filter.
pub fn parse_category_filter(schema: &FieldSchema, raw: &str) -> Result<CategoryFilter, SearchError> {
    let tokens = Lexer::tokenize(raw, FilterShape::Category).map_err(|e| syntax_error(raw, e))?;
    let mut stream = TokenStream::new(raw, &tokens);

    let field = stream.expect_field()?;
    stream.expect(Token::Colon)?;
    let value = stream.expect_value()?;
    stream.expect_end()?;

    if !schema.contains(field) {
        return Err(SearchError::UnknownField {
            field: field.to_string(),
        });
    }

    let matcher = if value.contains(WILDCARD) {
        CategoryMatch::Like(like_pattern(value))
    } else {
        CategoryMatch::Exact(value.to_string())
    };

    Ok(CategoryFilter {
        field: field.to_string(),
        matcher,
    })
}

/// Escapes `LIKE` metacharacters, then turns every `*` into `%`.
fn like_pattern(value: &str) -> String {
    let mut pattern = String::with_capacity(value.len() + 4);
    for c in value.chars() {
        match c {
            '%' | '_' | LIKE_ESCAPE => {
                pattern.push(LIKE_ESCAPE);
                pattern.push(c);
            }
            WILDCARD => pattern.push_str(LIKE_WILDCARD),
            _ => pattern.push(c),
        }
    }
    pattern
}

/// Parses a `field:[start TO end]` filter.
pub fn parse_range_filter(schema: &FieldSchema, raw: &str) -> Result<RangeFilter, SearchError> {
    let tokens = Lexer::tokenize(raw, FilterShape::Range).map_err(|e| syntax_error(raw, e))?;
    let mut stream = TokenStream::new(raw, &tokens);

    let field = stream.expect_field()?;
    stream.expect(Token::Colon)?;
    let lower = stream.expect_lower()?;
    let start = stream.expect_bound()?;
    stream.expect(Token::Separator)?;
    let end = stream.expect_bound()?;
    let upper = stream.expect_upper()?;
    stream.expect_end()?;

    match schema.kind(field) {
        None => {
            return Err(SearchError::UnknownField {
                field: field.to_string(),
            });
        }
        Some(kind) if !kind.is_continuous() => {
            return Err(SearchError::FilterTypeMismatch {
                field: field.to_string(),
            });
        }
        Some(_) => {}
    }

    Ok(RangeFilter {
        field: field.to_string(),
        start: start.map(|value| RangeBound {
            value: value.to_string(),
            inclusive: lower.is_inclusive(),
        }),
        end: end.map(|value| RangeBound {
            value: value.to_string(),
            inclusive: upper.is_inclusive(),
        }),
    })
}

/// Parses every category and range filter of one request.
///
/// The first failing filter aborts the whole request.
pub fn parse_filters<C, R>(
    schema: &FieldSchema,
    category_filters: C,
    range_filters: R,
) -> Result<(Vec<CategoryFilter>, Vec<RangeFilter>), SearchError>
where
    C: IntoIterator,
    C::Item: AsRef<str>,
    R: IntoIterator,
    R::Item: AsRef<str>,
{
    let categories = category_filters
        .into_iter()
        .map(|raw| parse_category_filter(schema, raw.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    let ranges = range_filters
        .into_iter()
        .map(|raw| parse_range_filter(schema, raw.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok((categories, ranges))
}

fn syntax_error(raw: &str, err: GrammarError) -> SearchError {
    debug!(filter = %raw, error = %err, "Rejected filter");
    SearchError::InvalidFilterSyntax {
        filter: raw.to_string(),
    }
}

/// Cursor over lexed tokens.
struct TokenStream<'t, 'a> {
    raw: &'a str,
    tokens: &'t [Token<'a>],
    pos: usize,
}

impl<'t, 'a> TokenStream<'t, 'a> {
    fn new(raw: &'a str, tokens: &'t [Token<'a>]) -> Self {
        Self {
            raw,
            tokens,
            pos: 0,
        }
    }

    fn advance(&mut self) -> Option<Token<'a>> {
        let token = self.tokens.get(self.pos).copied();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn unexpected(&self) -> SearchError {
        SearchError::InvalidFilterSyntax {
            filter: self.raw.to_string(),
        }
    }

    fn expect(&mut self, expected: Token<'a>) -> Result<(), SearchError> {
        match self.advance() {
            Some(token) if token == expected => Ok(()),
            _ => Err(self.unexpected()),
        }
    }

    fn expect_field(&mut self) -> Result<&'a str, SearchError> {
        match self.advance() {
            Some(Token::Field(name)) => Ok(name),
            _ => Err(self.unexpected()),
        }
    }

    fn expect_value(&mut self) -> Result<&'a str, SearchError> {
        match self.advance() {
            Some(Token::Value(value)) => Ok(value),
            _ => Err(self.unexpected()),
        }
    }

    fn expect_lower(&mut self) -> Result<Inclusivity, SearchError> {
        match self.advance() {
            Some(Token::LowerDelimiter(inclusivity)) => Ok(inclusivity),
            _ => Err(self.unexpected()),
        }
    }

    fn expect_upper(&mut self) -> Result<Inclusivity, SearchError> {
        match self.advance() {
            Some(Token::UpperDelimiter(inclusivity)) => Ok(inclusivity),
            _ => Err(self.unexpected()),
        }
    }

    /// Returns `None` for an open bound.
    fn expect_bound(&mut self) -> Result<Option<&'a str>, SearchError> {
        match self.advance() {
            Some(Token::Bound(value)) => Ok(Some(value)),
            Some(Token::OpenBound) => Ok(None),
            _ => Err(self.unexpected()),
        }
    }

    fn expect_end(&mut self) -> Result<(), SearchError> {
        match self.advance() {
            None => Ok(()),
            Some(_) => Err(self.unexpected()),
        }
    }
}
