//! Request validation for inbound HTTP adapters.
//!
//! Request bodies and query strings are deserialized into raw types whose
//! fields are all optional, then checked field by field so that every problem
//! is reported at once rather than only the first one serde trips over.

use std::fmt;

use axum::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::rejection::QueryRejection;
use axum::extract::FromRequest;
use axum::extract::FromRequestParts;
use axum::extract::Query;
use axum::extract::Request;
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::handlers::ApiError;

const REQUIRED: &str = "field required";

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl ToString) -> Self {
        Self {
            field: field.into(),
            message: message.to_string(),
        }
    }

    pub fn required(field: impl Into<String>) -> Self {
        Self::new(field, REQUIRED)
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Render failures as one human-readable message, joined by ", ".
pub fn join_field_errors(errors: &[FieldError]) -> String {
    if errors.is_empty() {
        return "Invalid request".to_string();
    }

    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Accumulates field errors while a raw request is parsed into domain types.
#[derive(Debug, Default)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a field that must be present.
    pub fn required<R, T, E>(
        &mut self,
        field: &str,
        value: Option<R>,
        parse: impl FnOnce(R) -> Result<T, E>,
    ) -> Option<T>
    where
        E: fmt::Display,
    {
        match value {
            Some(raw) => self.check(field, parse(raw)),
            None => {
                self.0.push(FieldError::required(field));
                None
            }
        }
    }

    /// Parse a field that may be absent. Absent fields are not an error.
    pub fn optional<R, T, E>(
        &mut self,
        field: &str,
        value: Option<R>,
        parse: impl FnOnce(R) -> Result<T, E>,
    ) -> Option<T>
    where
        E: fmt::Display,
    {
        value.and_then(|raw| self.check(field, parse(raw)))
    }

    fn check<T, E: fmt::Display>(&mut self, field: &str, result: Result<T, E>) -> Option<T> {
        result
            .map_err(|e| self.0.push(FieldError::new(field, e)))
            .ok()
    }

    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<FieldError> {
        self.0
    }
}

/// Conversion from a raw request type into its validated form.
pub trait Validate {
    type Output;

    fn validate(self) -> Result<Self::Output, Vec<FieldError>>;
}

/// JSON body extractor that runs [`Validate`] before the handler sees the input.
pub struct ValidatedJson<T: Validate>(pub T::Output);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send,
    T::Output: Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(raw) = Json::<T>::from_request(req, state).await?;
        raw.validate().map(ValidatedJson).map_err(ApiError::Validation)
    }
}

/// Query string extractor that runs [`Validate`] before the handler sees the input.
pub struct ValidatedQuery<T: Validate>(pub T::Output);

#[async_trait]
impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send,
    T::Output: Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(raw) = Query::<T>::from_request_parts(parts, state).await?;
        raw.validate().map(ValidatedQuery).map_err(ApiError::Validation)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(_)
            | JsonRejection::JsonSyntaxError(_)
            | JsonRejection::MissingJsonContentType(_) => {
                ApiError::Validation(vec![FieldError::new("body", rejection.body_text())])
            }
            other => ApiError::Http {
                status: other.status(),
                detail: other.body_text(),
            },
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(vec![FieldError::new("query", rejection.body_text())])
    }
}
