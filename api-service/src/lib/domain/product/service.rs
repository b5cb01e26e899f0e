use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::product::models::CreateProductCommand;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductId;
use crate::domain::product::models::UpdateProductCommand;
use crate::product::errors::ProductError;
use crate::product::ports::ProductRepository;
use crate::product::ports::ProductServicePort;

/// Domain service implementation for product operations.
pub struct ProductService<PR>
where
    PR: ProductRepository,
{
    repository: Arc<PR>,
}

impl<PR> ProductService<PR>
where
    PR: ProductRepository,
{
    pub fn new(repository: Arc<PR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<PR> ProductServicePort for ProductService<PR>
where
    PR: ProductRepository,
{
    async fn create_product(&self, command: CreateProductCommand) -> Result<Product, ProductError> {
        let product = Product {
            id: ProductId::new(),
            name: command.name,
            category: command.category,
            price: command.price,
            is_active: command.is_active,
            created_at: Utc::now(),
        };

        let created = self.repository.create(product).await?;
        tracing::info!(product_id = %created.id, "Product created");

        Ok(created)
    }

    async fn get_product(&self, id: &ProductId) -> Result<Product, ProductError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id.to_string()))
    }

    async fn list_products(&self) -> Result<Vec<Product>, ProductError> {
        self.repository.list_all().await
    }

    async fn update_product(
        &self,
        id: &ProductId,
        command: UpdateProductCommand,
    ) -> Result<Product, ProductError> {
        let mut product = self.get_product(id).await?;

        if let Some(name) = command.name {
            product.name = name;
        }

        if let Some(category) = command.category {
            product.category = category;
        }

        if let Some(price) = command.price {
            product.price = price;
        }

        if let Some(is_active) = command.is_active {
            product.is_active = is_active;
        }

        self.repository.update(product).await
    }

    async fn delete_product(&self, id: &ProductId) -> Result<(), ProductError> {
        self.repository.delete(id).await?;
        tracing::info!(product_id = %id, "Product deleted");
        Ok(())
    }
}
