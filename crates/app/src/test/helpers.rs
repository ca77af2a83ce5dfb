//! Test Helpers

use rust_decimal::Decimal;
use sqlx::query;

use crate::{
    domain::products::{
        ProductsService, ProductsServiceError, data::NewProduct, records::ProductUuid,
    },
    test::TestContext,
};

/// Insert a category row so products can reference it.
pub(crate) async fn create_category(ctx: &TestContext, id: &str) {
    query("INSERT INTO categories (id, name) VALUES ($1, $2)")
        .bind(id)
        .bind(format!("Category {id}"))
        .execute(ctx.db.pool())
        .await
        .expect("Failed to create test category");
}

/// A product priced at 9.99 in `category_id`.
pub(crate) fn widget(category_id: &str) -> NewProduct {
    NewProduct {
        name: "Widget".to_string(),
        price: Decimal::new(999, 2),
        category_id: category_id.to_string(),
    }
}

pub(crate) async fn create_product(
    ctx: &TestContext,
    name: &str,
    category_id: &str,
) -> Result<ProductUuid, ProductsServiceError> {
    ctx.products
        .create_product(NewProduct {
            name: name.to_string(),
            ..widget(category_id)
        })
        .await
}
