//! Named Query Parameters
//!
//! `PostgreSQL` only understands positional placeholders (`$1`, `$2`, ...).
//! [`QueryParams`] lets statements be written with `:name` placeholders and
//! rewrites them into positional form, collecting the bound values in the
//! order the placeholders first appear.

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use sqlx::{Arguments, error::BoxDynError, postgres::PgArguments};
use thiserror::Error;

/// Errors raised while rewriting a named query.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryParamsError {
    /// The template references a placeholder with no bound value.
    #[error("no value bound for query parameter `:{0}`")]
    MissingParam(String),
}

/// A value bound to a named placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryParam {
    Text(String),
    Decimal(Decimal),
}

impl QueryParam {
    fn add_to(self, arguments: &mut PgArguments) -> Result<(), BoxDynError> {
        match self {
            Self::Text(value) => arguments.add(value),
            Self::Decimal(value) => arguments.add(value),
        }
    }
}

impl From<String> for QueryParam {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Decimal> for QueryParam {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

/// Named values to substitute into a SQL template.
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    values: FxHashMap<String, QueryParam>,
}

impl QueryParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `value` to the placeholder `:name`, replacing any earlier value.
    #[must_use]
    pub fn with(mut self, name: &str, value: impl Into<QueryParam>) -> Self {
        self.values.insert(name.to_owned(), value.into());
        self
    }

    /// Rewrite `template` into positional form.
    ///
    /// Each distinct name gets the next position the first time it appears and
    /// keeps it for later occurrences. `::` casts are kept as they are. So is
    /// everything inside quoted strings and identifiers, `E'...'` escape
    /// strings, `$tag$...$tag$` bodies, `--` line comments and `/* */` block
    /// comments. Bound values the template never references are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`QueryParamsError::MissingParam`] when a placeholder has no
    /// bound value.
    pub fn rewrite(&self, template: &str) -> Result<NamedQuery, QueryParamsError> {
        let mut sql = String::with_capacity(template.len());
        let mut positions: FxHashMap<&str, usize> = FxHashMap::default();
        let mut params = Vec::new();
        let mut rest = template;

        while let Some(c) = rest.chars().next() {
            let after_word = sql.ends_with(|prev: char| is_name_continue(prev) || prev == '$');

            let literal_len = literal_len(rest, after_word);

            if literal_len > 0 {
                let (literal, tail) = rest.split_at(literal_len);

                sql.push_str(literal);
                rest = tail;

                continue;
            }

            if let Some(tail) = rest.strip_prefix("::") {
                sql.push_str("::");
                rest = tail;

                continue;
            }

            if let Some(tail) = rest.strip_prefix(':') {
                if tail.starts_with(is_name_start) {
                    let name_len = tail
                        .find(|next: char| !is_name_continue(next))
                        .unwrap_or(tail.len());

                    let (name, tail) = tail.split_at(name_len);

                    let position = if let Some(&position) = positions.get(name) {
                        position
                    } else {
                        let value = self
                            .values
                            .get(name)
                            .ok_or_else(|| QueryParamsError::MissingParam(name.to_owned()))?;

                        params.push(value.clone());
                        positions.insert(name, params.len());

                        params.len()
                    };

                    sql.push('$');
                    sql.push_str(&position.to_string());
                    rest = tail;

                    continue;
                }
            }

            let (head, tail) = rest.split_at(c.len_utf8());

            sql.push_str(head);
            rest = tail;
        }

        Ok(NamedQuery { sql, params })
    }
}

fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_name_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Length of the string, quoted identifier or comment `s` opens with, or 0.
///
/// Unterminated ones run to the end of `s`.
fn literal_len(s: &str, after_word: bool) -> usize {
    if s.starts_with("--") {
        return s.find('\n').map_or(s.len(), |end| end + 1);
    }

    if s.starts_with("/*") {
        return block_comment_len(s);
    }

    if !after_word && (s.starts_with("E'") || s.starts_with("e'")) {
        return 1 + escape_string_len(&s[1..]);
    }

    match s.chars().next() {
        Some(open @ ('\'' | '"')) => s[1..].find(open).map_or(s.len(), |end| end + 2),
        Some('$') if !after_word => dollar_quote_len(s),
        _ => 0,
    }
}

/// Block comments nest.
fn block_comment_len(s: &str) -> usize {
    let mut depth = 0_usize;
    let mut index = 0;

    while let Some(rest) = s.get(index..) {
        if rest.starts_with("/*") {
            depth += 1;
            index += 2;
        } else if rest.starts_with("*/") {
            depth = depth.saturating_sub(1);
            index += 2;

            if depth == 0 {
                return index;
            }
        } else if let Some(c) = rest.chars().next() {
            index += c.len_utf8();
        } else {
            break;
        }
    }

    s.len()
}

/// `s` starts at the opening quote; backslash escapes the next character.
fn escape_string_len(s: &str) -> usize {
    let mut chars = s.char_indices().skip(1);

    while let Some((index, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '\'' => return index + 1,
            _ => {}
        }
    }

    s.len()
}

/// `$$...$$` or `$tag$...$tag$`; anything else (such as `$1`) is not a quote.
fn dollar_quote_len(s: &str) -> usize {
    let Some(tag_len) = s[1..].find('$') else {
        return 0;
    };

    let tag = &s[1..1 + tag_len];

    let valid_tag = tag.chars().next().is_none_or(is_name_start)
        && tag.chars().all(is_name_continue);

    if !valid_tag {
        return 0;
    }

    let delimiter = &s[..tag_len + 2];

    s[delimiter.len()..]
        .find(delimiter)
        .map_or(s.len(), |end| 2 * delimiter.len() + end)
}

/// A statement rewritten into positional form with its ordered values.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedQuery {
    sql: String,
    params: Vec<QueryParam>,
}

impl NamedQuery {
    /// Encode the values for [`sqlx::query_with`].
    ///
    /// # Errors
    ///
    /// Returns [`sqlx::Error::Encode`] if a value cannot be encoded.
    pub fn into_arguments(self) -> Result<(String, PgArguments), sqlx::Error> {
        let mut arguments = PgArguments::default();

        for param in self.params {
            param.add_to(&mut arguments).map_err(sqlx::Error::Encode)?;
        }

        Ok((self.sql, arguments))
    }
}
