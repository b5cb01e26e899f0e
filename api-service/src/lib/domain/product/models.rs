use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::product::errors::LabelError;
use crate::product::errors::PriceError;
use crate::product::errors::ProductIdError;

/// Product catalogue entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: Label,
    pub category: Label,
    pub price: Price,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Product unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProductId(pub Uuid);

impl ProductId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a product ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, ProductIdError> {
        Uuid::parse_str(s)
            .map(ProductId)
            .map_err(|e| ProductIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Non-blank text of at most 100 characters, used for product names and categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label(String);

impl Label {
    const MAX_LENGTH: usize = 100;

    /// # Errors
    /// * `Empty` - Blank after trimming
    /// * `TooLong` - More than 100 characters
    pub fn new(value: String) -> Result<Self, LabelError> {
        let value = value.trim().to_string();
        let length = value.chars().count();

        if length == 0 {
            Err(LabelError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(LabelError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(value))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Non-negative, finite price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Price(f64);

impl Price {
    /// # Errors
    /// * `NotFinite` - NaN or infinite
    /// * `Negative` - Below zero
    pub fn new(value: f64) -> Result<Self, PriceError> {
        if !value.is_finite() {
            Err(PriceError::NotFinite)
        } else if value < 0.0 {
            Err(PriceError::Negative(value))
        } else {
            Ok(Self(value))
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Command to create a product with validated fields
#[derive(Debug)]
pub struct CreateProductCommand {
    pub name: Label,
    pub category: Label,
    pub price: Price,
    pub is_active: bool,
}

/// Command to partially update a product.
#[derive(Debug, Default)]
pub struct UpdateProductCommand {
    pub name: Option<Label>,
    pub category: Option<Label>,
    pub price: Option<Price>,
    pub is_active: Option<bool>,
}
