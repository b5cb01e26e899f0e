use async_trait::async_trait;

use crate::domain::product::models::CreateProductCommand;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductId;
use crate::domain::product::models::UpdateProductCommand;
use crate::product::errors::ProductError;

/// Port for product domain service operations.
#[async_trait]
pub trait ProductServicePort: Send + Sync + 'static {
    async fn create_product(&self, command: CreateProductCommand) -> Result<Product, ProductError>;

    /// # Errors
    /// * `NotFound` - Product does not exist
    async fn get_product(&self, id: &ProductId) -> Result<Product, ProductError>;

    async fn list_products(&self) -> Result<Vec<Product>, ProductError>;

    /// # Errors
    /// * `NotFound` - Product does not exist
    async fn update_product(
        &self,
        id: &ProductId,
        command: UpdateProductCommand,
    ) -> Result<Product, ProductError>;

    /// # Errors
    /// * `NotFound` - Product does not exist
    async fn delete_product(&self, id: &ProductId) -> Result<(), ProductError>;
}

/// Persistence operations for products.
#[async_trait]
pub trait ProductRepository: Send + Sync + 'static {
    async fn create(&self, product: Product) -> Result<Product, ProductError>;

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, ProductError>;

    /// Retrieve all products, newest first.
    async fn list_all(&self) -> Result<Vec<Product>, ProductError>;

    /// # Errors
    /// * `NotFound` - Product does not exist
    async fn update(&self, product: Product) -> Result<Product, ProductError>;

    /// # Errors
    /// * `NotFound` - Product does not exist
    async fn delete(&self, id: &ProductId) -> Result<(), ProductError>;
}
