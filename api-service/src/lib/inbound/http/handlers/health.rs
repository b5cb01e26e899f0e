use axum::http::StatusCode;
use serde::Serialize;

use super::ApiSuccess;

pub async fn root() -> ApiSuccess<()> {
    ApiSuccess::ack(StatusCode::OK, "Welcome to the API")
}

pub async fn health() -> ApiSuccess<HealthData> {
    ApiSuccess::new(
        StatusCode::OK,
        "OK",
        HealthData {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthData {
    pub status: &'static str,
    pub version: &'static str,
}
