//! Product Records

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product Record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub name: String,
    pub price: Decimal,

    /// Category reference; only the database enforces that it exists.
    pub category_id: String,

    /// Assigned by the database on insert.
    pub created_at: Timestamp,

    /// Refreshed by the database on every write.
    pub updated_at: Timestamp,
}

/// A page of products plus the table total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductList {
    /// Rows in the whole table. Not narrowed by `search` or pagination.
    pub count: u64,
    pub products: Vec<ProductRecord>,
}
