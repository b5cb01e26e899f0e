use axum::http::header;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use super::validation::join_field_errors;
use super::validation::FieldError;
use crate::dataset::errors::DatasetError;
use crate::product::errors::ProductError;
use crate::user::errors::UserError;
use crate::weather::errors::WeatherError;

pub mod authentication;
pub mod datasets;
pub mod health;
pub mod products;
pub mod users;
pub mod weather;

/// Message carried by every application-level failure.
pub const FAILED: &str = "Failed";

/// Successful response, rendered as `{status_code, message, result}`.
#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, message: impl Into<String>, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, message, data)))
    }
}

impl ApiSuccess<()> {
    /// Acknowledgement without a payload; `result` renders as `null`.
    pub fn ack(status: StatusCode, message: impl Into<String>) -> Self {
        Self::new(status, message, ())
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// Every failure a request can end in.
///
/// Handlers and extractors return these; `into_response` is the only place
/// that maps a variant to an HTTP status and envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Malformed or missing input fields.
    Validation(Vec<FieldError>),
    /// Business-rule violation.
    Application(String),
    /// Missing, invalid or expired credentials.
    Unauthorized(String),
    /// Framework-level error carrying its own status and detail.
    Http { status: StatusCode, detail: String },
    /// Failure of an upstream provider.
    Upstream(String),
    InternalServerError(String),
}

impl ApiError {
    pub fn not_found() -> Self {
        ApiError::Http {
            status: StatusCode::NOT_FOUND,
            detail: "Not Found".to_string(),
        }
    }

    pub fn forbidden(detail: impl Into<String>) -> Self {
        ApiError::Http {
            status: StatusCode::FORBIDDEN,
            detail: detail.into(),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::InternalServerError(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(errors) => {
                let status = StatusCode::BAD_REQUEST;
                (status, ApiResponseBody::failed(status, join_field_errors(&errors)))
            }
            ApiError::Application(message) => {
                let status = StatusCode::BAD_REQUEST;
                (status, ApiResponseBody::failed(status, message))
            }
            ApiError::Unauthorized(detail) => {
                let status = StatusCode::UNAUTHORIZED;
                let mut response =
                    (status, Json(ApiResponseBody::detail(status, detail))).into_response();
                response.headers_mut().insert(
                    header::WWW_AUTHENTICATE,
                    HeaderValue::from_static("Bearer"),
                );
                return response;
            }
            ApiError::Http { status, detail } => (status, ApiResponseBody::detail(status, detail)),
            ApiError::Upstream(message) => {
                let status = StatusCode::BAD_GATEWAY;
                (status, ApiResponseBody::failed(status, message))
            }
            ApiError::InternalServerError(message) => {
                tracing::error!(error = %message, "Internal server error");
                let status = StatusCode::INTERNAL_SERVER_ERROR;
                (
                    status,
                    ApiResponseBody::detail(status, "Internal Server Error".to_string()),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_)
            | UserError::NotFoundByEmail(_)
            | UserError::UsernameAlreadyExists(_)
            | UserError::EmailAlreadyExists(_)
            | UserError::InvalidUserId(_)
            | UserError::InvalidUsername(_)
            | UserError::InvalidEmail(_)
            | UserError::InvalidAge(_) => ApiError::Application(err.to_string()),
            UserError::Password(_) | UserError::DatabaseError(_) | UserError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<ProductError> for ApiError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(_)
            | ProductError::InvalidProductId(_)
            | ProductError::InvalidLabel(_)
            | ProductError::InvalidPrice(_) => ApiError::Application(err.to_string()),
            ProductError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<WeatherError> for ApiError {
    fn from(err: WeatherError) -> Self {
        match err {
            WeatherError::CityNotFound(_) => ApiError::Application(err.to_string()),
            WeatherError::NotConfigured
            | WeatherError::Upstream(_)
            | WeatherError::InvalidResponse(_) => ApiError::Upstream(err.to_string()),
        }
    }
}

impl From<DatasetError> for ApiError {
    fn from(err: DatasetError) -> Self {
        match err {
            DatasetError::Empty => ApiError::Validation(vec![FieldError::required("file")]),
            DatasetError::InvalidEncoding
            | DatasetError::DuplicateColumn(_)
            | DatasetError::Parse(_) => ApiError::Application(err.to_string()),
        }
    }
}

/// The uniform response envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    message: String,
    result: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, message: impl Into<String>, result: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            message: message.into(),
            result,
        }
    }
}

impl ApiResponseBody<Option<ApiErrorData>> {
    /// Application failure: `message` is "Failed", `result.error` carries the detail.
    pub fn failed(status_code: StatusCode, error: String) -> Self {
        Self::new(status_code, FAILED, Some(ApiErrorData { error }))
    }

    /// Transport-level failure: the detail is the message and `result` is null.
    pub fn detail(status_code: StatusCode, detail: String) -> Self {
        Self::new(status_code, detail, None)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub error: String,
}
