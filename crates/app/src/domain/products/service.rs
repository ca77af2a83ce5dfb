//! Products service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;
use tracing::info;

use crate::domain::products::{
    data::{NewProduct, ProductListRequest, ProductUpdate},
    errors::ProductsServiceError,
    records::{ProductList, ProductRecord, ProductUuid},
    repository::PgProductsRepository,
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgProductsRepository::new(pool),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductUuid, ProductsServiceError> {
        let uuid = self.repository.create_product(product).await?;

        info!(product_uuid = %uuid, "created product");

        Ok(uuid)
    }

    async fn get_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError> {
        self.repository.get_product(product).await
    }

    async fn list_products(
        &self,
        request: ProductListRequest,
    ) -> Result<ProductList, ProductsServiceError> {
        self.repository.list_products(&request).await
    }

    async fn update_product(
        &self,
        update: ProductUpdate,
    ) -> Result<ProductUuid, ProductsServiceError> {
        let uuid = self.repository.update_product(update).await?;

        info!(product_uuid = %uuid, "updated product");

        Ok(uuid)
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError> {
        self.repository.delete_product(product).await?;

        info!(product_uuid = %product, "deleted product");

        Ok(())
    }
}

#[automock]
#[async_trait]
/// Product persistence operations.
pub trait ProductsService: Send + Sync {
    /// Inserts a product under a freshly generated UUID and returns that UUID.
    async fn create_product(&self, product: NewProduct)
    -> Result<ProductUuid, ProductsServiceError>;

    /// Retrieve a single product.
    ///
    /// Fails with [`ProductsServiceError::NotFound`] when no row matches.
    async fn get_product(&self, product: ProductUuid)
    -> Result<ProductRecord, ProductsServiceError>;

    /// Retrieves one page of products, optionally filtered by name.
    ///
    /// `count` in the result is the size of the whole table; it ignores the
    /// search filter and pagination.
    async fn list_products(
        &self,
        request: ProductListRequest,
    ) -> Result<ProductList, ProductsServiceError>;

    /// Replaces the name, price and category of a product.
    ///
    /// Returns the UUID unchanged. An unknown UUID is not an error.
    async fn update_product(&self, update: ProductUpdate)
    -> Result<ProductUuid, ProductsServiceError>;

    /// Deletes a product. An unknown UUID is not an error.
    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError>;
}
