use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::product::models::Label;
use crate::domain::product::models::Price;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductId;
use crate::domain::product::ports::ProductRepository;
use crate::product::errors::ProductError;

pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    category: String,
    price: f64,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = ProductError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        Ok(Product {
            id: ProductId(row.id),
            name: Label::new(row.name)?,
            category: Label::new(row.category)?,
            price: Price::new(row.price)?,
            is_active: row.is_active,
            created_at: row.created_at,
        })
    }
}

fn database_error(e: sqlx::Error) -> ProductError {
    ProductError::DatabaseError(e.to_string())
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn create(&self, product: Product) -> Result<Product, ProductError> {
        sqlx::query(
            r#"
            INSERT INTO products (id, name, category, price, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(product.id.0)
        .bind(product.name.as_str())
        .bind(product.category.as_str())
        .bind(product.price.value())
        .bind(product.is_active)
        .bind(product.created_at)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(product)
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, ProductError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, category, price, is_active, created_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(Product::try_from).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Product>, ProductError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, category, price, is_active, created_at
            FROM products
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.into_iter().map(Product::try_from).collect()
    }

    async fn update(&self, product: Product) -> Result<Product, ProductError> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = $2, category = $3, price = $4, is_active = $5
            WHERE id = $1
            "#,
        )
        .bind(product.id.0)
        .bind(product.name.as_str())
        .bind(product.category.as_str())
        .bind(product.price.value())
        .bind(product.is_active)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(ProductError::NotFound(product.id.to_string()));
        }

        Ok(product)
    }

    async fn delete(&self, id: &ProductId) -> Result<(), ProductError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(ProductError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
