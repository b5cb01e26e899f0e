use thiserror::Error;

/// Error for ProductId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProductIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for product name and category validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LabelError {
    #[error("Must not be empty")]
    Empty,

    #[error("Too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for Price validation failures
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PriceError {
    #[error("Price must be a finite number")]
    NotFinite,

    #[error("Price must not be negative, got {0}")]
    Negative(f64),
}

/// Top-level error for all product-related operations
#[derive(Debug, Clone, Error)]
pub enum ProductError {
    #[error("Invalid product ID: {0}")]
    InvalidProductId(#[from] ProductIdError),

    #[error("Invalid product field: {0}")]
    InvalidLabel(#[from] LabelError),

    #[error("Invalid price: {0}")]
    InvalidPrice(#[from] PriceError),

    #[error("Product not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
