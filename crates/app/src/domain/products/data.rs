//! Products Data

use rust_decimal::Decimal;

use crate::domain::products::records::ProductUuid;

/// Page size used when a request asks for zero or fewer rows.
pub const DEFAULT_LIST_LIMIT: i64 = 10;

/// Longest prefix of the search term written to logs, in characters.
const SEARCH_PREVIEW_CHARS: usize = 64;

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: Decimal,
    pub category_id: String,
}

/// Product Update Data
///
/// Replaces every mutable field of the product identified by `uuid`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub uuid: ProductUuid,
    pub name: String,
    pub price: Decimal,
    pub category_id: String,
}

/// Product List Request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductListRequest {
    pub offset: i64,
    pub limit: i64,

    /// Case-insensitive substring to match against product names.
    pub search: Option<String>,
}

impl ProductListRequest {
    /// Rows to skip; non-positive values mean none.
    #[must_use]
    pub fn offset(&self) -> i64 {
        self.offset.max(0)
    }

    /// Page size; non-positive values fall back to [`DEFAULT_LIST_LIMIT`].
    #[must_use]
    pub fn limit(&self) -> i64 {
        if self.limit > 0 {
            self.limit
        } else {
            DEFAULT_LIST_LIMIT
        }
    }

    /// The search term, if a non-empty one was given.
    #[must_use]
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref().filter(|search| !search.is_empty())
    }

    /// The search term cut to a short prefix, for logs.
    #[must_use]
    pub fn search_preview(&self) -> Option<&str> {
        self.search().map(|search| {
            search
                .char_indices()
                .nth(SEARCH_PREVIEW_CHARS)
                .map_or(search, |(end, _)| &search[..end])
        })
    }

    /// `ILIKE` pattern matching names that contain the search term literally.
    #[must_use]
    pub fn search_pattern(&self) -> Option<String> {
        self.search()
            .map(|search| format!("%{}%", escape_like(search)))
    }
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }

        escaped.push(c);
    }

    escaped
}
