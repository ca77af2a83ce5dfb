//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{
    FromRow, PgPool, Postgres, QueryBuilder, Row, postgres::PgRow, query, query_as,
    query_scalar, query_with,
};
use tracing::debug;

use crate::{
    domain::products::{
        data::{NewProduct, ProductListRequest, ProductUpdate},
        errors::ProductsServiceError,
        records::{ProductList, ProductRecord, ProductUuid},
    },
    query_params::QueryParams,
};

const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const COUNT_PRODUCTS_SQL: &str = include_str!("sql/count_products.sql");
const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");

/// PostgreSQL-backed products repository.
#[derive(Debug, Clone)]
pub(crate) struct PgProductsRepository {
    pool: PgPool,
}

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(
        name = "products.repository.create_product",
        skip(self, product),
        fields(product_uuid = tracing::field::Empty),
        err
    )]
    pub(crate) async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductUuid, ProductsServiceError> {
        let uuid = ProductUuid::new();

        tracing::Span::current().record("product_uuid", tracing::field::display(uuid));

        query(CREATE_PRODUCT_SQL)
            .bind(uuid.to_string())
            .bind(product.name)
            .bind(product.price)
            .bind(product.category_id)
            .execute(&self.pool)
            .await?;

        Ok(uuid)
    }

    #[tracing::instrument(
        name = "products.repository.get_product",
        skip(self, product),
        fields(product_uuid = %product),
        err
    )]
    pub(crate) async fn get_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(ProductsServiceError::from)
    }

    /// Counts the whole table, then fetches one page.
    ///
    /// The two statements run outside a transaction, so a concurrent write can
    /// leave `count` out of step with the page.
    #[tracing::instrument(
        name = "products.repository.list_products",
        skip(self, request),
        fields(
            offset = request.offset(),
            limit = request.limit(),
            has_search = request.search().is_some(),
            count = tracing::field::Empty,
            page_len = tracing::field::Empty
        ),
        err
    )]
    pub(crate) async fn list_products(
        &self,
        request: &ProductListRequest,
    ) -> Result<ProductList, ProductsServiceError> {
        let count: i64 = query_scalar(COUNT_PRODUCTS_SQL)
            .fetch_one(&self.pool)
            .await?;

        let count = u64::try_from(count).map_err(|e| sqlx::Error::ColumnDecode {
            index: "count".to_string(),
            source: Box::new(e),
        })?;

        if let Some(search) = request.search_preview() {
            debug!(search, "filtering products by name");
        }

        let mut builder = QueryBuilder::<Postgres>::new(LIST_PRODUCTS_SQL.trim_end());

        if let Some(pattern) = request.search_pattern() {
            builder.push(" AND name ILIKE ").push_bind(pattern);
        }

        builder
            .push(" OFFSET ")
            .push_bind(request.offset())
            .push(" LIMIT ")
            .push_bind(request.limit());

        let products = builder
            .build_query_as::<ProductRecord>()
            .fetch_all(&self.pool)
            .await?;

        tracing::Span::current().record("count", count);
        tracing::Span::current().record("page_len", products.len());

        Ok(ProductList { count, products })
    }

    /// Rows affected is logged, not checked: updating an unknown product
    /// succeeds without changing anything.
    #[tracing::instrument(
        name = "products.repository.update_product",
        skip(self, update),
        fields(product_uuid = %update.uuid),
        err
    )]
    pub(crate) async fn update_product(
        &self,
        update: ProductUpdate,
    ) -> Result<ProductUuid, ProductsServiceError> {
        let uuid = update.uuid;

        let (sql, arguments) = QueryParams::new()
            .with("id", uuid.to_string())
            .with("name", update.name)
            .with("price", update.price)
            .with("category_id", update.category_id)
            .rewrite(UPDATE_PRODUCT_SQL)?
            .into_arguments()?;

        let rows_affected = query_with::<Postgres, _>(&sql, arguments)
            .execute(&self.pool)
            .await?
            .rows_affected();

        debug!(rows_affected, "updated product");

        Ok(uuid)
    }

    /// Like updates, deleting an unknown product is not an error.
    #[tracing::instrument(
        name = "products.repository.delete_product",
        skip(self, product),
        fields(product_uuid = %product),
        err
    )]
    pub(crate) async fn delete_product(
        &self,
        product: ProductUuid,
    ) -> Result<(), ProductsServiceError> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.to_string())
            .execute(&self.pool)
            .await?
            .rows_affected();

        debug!(rows_affected, "deleted product");

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row
                .try_get::<&str, _>("id")?
                .parse()
                .map_err(|e| sqlx::Error::ColumnDecode {
                    index: "id".to_string(),
                    source: Box::new(e),
                })?,
            name: row.try_get("name")?,
            price: row.try_get("price")?,
            category_id: row.try_get("category_id")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
