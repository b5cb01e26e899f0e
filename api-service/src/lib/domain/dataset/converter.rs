use std::collections::HashSet;

use serde_json::Map;
use serde_json::Number;
use serde_json::Value;

use crate::dataset::errors::DatasetError;

/// CSV content converted to JSON records.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub columns: Vec<String>,
    pub records: Vec<Value>,
}

/// Convert CSV text into one JSON object per data row, keyed by header.
///
/// The first row is the header. Cells are typed as integer, float, boolean,
/// null (empty cell) or string, in that order of preference.
///
/// # Errors
/// * `InvalidEncoding` - Input is not UTF-8
/// * `Empty` - Input has no header row
/// * `DuplicateColumn` - Two header cells share a name
/// * `Parse` - Ragged rows or other CSV syntax errors
pub fn csv_to_records(input: &[u8]) -> Result<Dataset, DatasetError> {
    let text = std::str::from_utf8(input).map_err(|_| DatasetError::InvalidEncoding)?;
    if text.trim().is_empty() {
        return Err(DatasetError::Empty);
    }

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| DatasetError::Parse(e.to_string()))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut seen = HashSet::new();
    if let Some(duplicate) = columns.iter().find(|column| !seen.insert(column.as_str())) {
        return Err(DatasetError::DuplicateColumn(duplicate.clone()));
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| DatasetError::Parse(e.to_string()))?;
        let record: Map<String, Value> = columns
            .iter()
            .zip(row.iter())
            .map(|(column, cell)| (column.clone(), infer_value(cell)))
            .collect();
        records.push(Value::Object(record));
    }

    Ok(Dataset { columns, records })
}

fn infer_value(cell: &str) -> Value {
    if cell.is_empty() {
        return Value::Null;
    }
    if let Ok(integer) = cell.parse::<i64>() {
        return Value::Number(integer.into());
    }
    if let Some(number) = cell.parse::<f64>().ok().and_then(Number::from_f64) {
        return Value::Number(number);
    }
    if cell.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if cell.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    Value::String(cell.to_string())
}
