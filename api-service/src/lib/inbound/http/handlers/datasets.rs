use axum::body::Bytes;
use axum::http::StatusCode;
use serde::Serialize;
use serde_json::Value;

use crate::domain::dataset::converter::csv_to_records;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;

/// Convert an uploaded CSV body into JSON records.
///
/// The body is the raw CSV text; the first line is the header.
pub async fn csv_to_json(body: Bytes) -> Result<ApiSuccess<DatasetData>, ApiError> {
    let dataset = csv_to_records(&body)?;

    tracing::debug!(
        columns = dataset.columns.len(),
        rows = dataset.records.len(),
        "Converted CSV upload"
    );

    Ok(ApiSuccess::new(
        StatusCode::OK,
        "CSV converted",
        DatasetData {
            rows: dataset.records.len(),
            columns: dataset.columns,
            records: dataset.records,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetData {
    pub columns: Vec<String>,
    pub rows: usize,
    pub records: Vec<Value>,
}
