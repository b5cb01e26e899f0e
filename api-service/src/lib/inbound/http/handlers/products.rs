use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::product::models::CreateProductCommand;
use crate::domain::product::models::Label;
use crate::domain::product::models::Price;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductId;
use crate::domain::product::models::UpdateProductCommand;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::inbound::http::validation::FieldError;
use crate::inbound::http::validation::FieldErrors;
use crate::inbound::http::validation::Validate;
use crate::inbound::http::validation::ValidatedJson;

pub async fn list_products(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<ProductData>>, ApiError> {
    state
        .product_service
        .list_products()
        .await
        .map_err(ApiError::from)
        .map(|products| {
            ApiSuccess::new(
                StatusCode::OK,
                "Products retrieved",
                products.iter().map(ProductData::from).collect(),
            )
        })
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<ApiSuccess<ProductData>, ApiError> {
    let product_id = parse_product_id(&product_id)?;

    state
        .product_service
        .get_product(&product_id)
        .await
        .map_err(ApiError::from)
        .map(|ref product| ApiSuccess::new(StatusCode::OK, "Product retrieved", product.into()))
}

pub async fn create_product(
    State(state): State<AppState>,
    ValidatedJson(command): ValidatedJson<CreateProductRequest>,
) -> Result<ApiSuccess<ProductData>, ApiError> {
    state
        .product_service
        .create_product(command)
        .await
        .map_err(ApiError::from)
        .map(|ref product| ApiSuccess::new(StatusCode::CREATED, "Product created", product.into()))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    ValidatedJson(command): ValidatedJson<UpdateProductRequest>,
) -> Result<ApiSuccess<ProductData>, ApiError> {
    let product_id = parse_product_id(&product_id)?;

    state
        .product_service
        .update_product(&product_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref product| ApiSuccess::new(StatusCode::OK, "Product updated", product.into()))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<ApiSuccess<()>, ApiError> {
    let product_id = parse_product_id(&product_id)?;

    state
        .product_service
        .delete_product(&product_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::ack(StatusCode::OK, "Product deleted"))
}

fn parse_product_id(raw: &str) -> Result<ProductId, ApiError> {
    ProductId::from_string(raw)
        .map_err(|e| ApiError::Validation(vec![FieldError::new("product_id", e)]))
}

/// HTTP request body for creating a product (raw JSON)
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct CreateProductRequest {
    name: Option<String>,
    category: Option<String>,
    price: Option<f64>,
    is_active: Option<bool>,
}

impl Validate for CreateProductRequest {
    type Output = CreateProductCommand;

    fn validate(self) -> Result<CreateProductCommand, Vec<FieldError>> {
        let mut errors = FieldErrors::new();
        let name = errors.required("name", self.name, Label::new);
        let category = errors.required("category", self.category, Label::new);
        let price = errors.required("price", self.price, Price::new);

        match (name, category, price) {
            (Some(name), Some(category), Some(price)) if errors.is_empty() => {
                Ok(CreateProductCommand {
                    name,
                    category,
                    price,
                    is_active: self.is_active.unwrap_or(true),
                })
            }
            _ => Err(errors.into_vec()),
        }
    }
}

/// HTTP request body for a partial product update (raw JSON)
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct UpdateProductRequest {
    name: Option<String>,
    category: Option<String>,
    price: Option<f64>,
    is_active: Option<bool>,
}

impl Validate for UpdateProductRequest {
    type Output = UpdateProductCommand;

    fn validate(self) -> Result<UpdateProductCommand, Vec<FieldError>> {
        let mut errors = FieldErrors::new();
        let command = UpdateProductCommand {
            name: errors.optional("name", self.name, Label::new),
            category: errors.optional("category", self.category, Label::new),
            price: errors.optional("price", self.price, Price::new),
            is_active: self.is_active,
        };

        if errors.is_empty() {
            Ok(command)
        } else {
            Err(errors.into_vec())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductData {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Product> for ProductData {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.to_string(),
            category: product.category.to_string(),
            price: product.price.value(),
            is_active: product.is_active,
            created_at: product.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_create_request_requires_name_category_and_price() {
        let errors = CreateProductRequest::default().validate().unwrap_err();

        assert_eq!(
            errors,
            vec![
                FieldError::required("name"),
                FieldError::required("category"),
                FieldError::required("price"),
            ]
        );
    }

    #[test]
    fn test_create_request_rejects_negative_price() {
        let request: CreateProductRequest = serde_json::from_value(json!({
            "name": "Laptop",
            "category": "Electronics",
            "price": -1.0
        }))
        .unwrap();

        let errors = request.validate().unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "price");
    }

    #[test]
    fn test_update_request_accepts_partial_body() {
        let request: UpdateProductRequest =
            serde_json::from_value(json!({"price": 19.5})).unwrap();

        let command = request.validate().unwrap();

        assert_eq!(command.price.map(|p| p.value()), Some(19.5));
        assert!(command.name.is_none());
    }

    #[test]
    fn test_malformed_product_id() {
        assert!(matches!(
            parse_product_id("not-a-uuid"),
            Err(ApiError::Validation(errors)) if errors[0].field == "product_id"
        ));
    }
}
