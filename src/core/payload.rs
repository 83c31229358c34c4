use serde_json::{Map, Value};

use crate::error::PredictionError;
use crate::models::InputRecord;

/// Upper bound on records accepted in one request
pub const MAX_BATCH_RECORDS: usize = 1000;

/// Turn a request body into input records.
///
/// Accepted shapes:
/// - a single object of scalar fields
/// - a column-oriented object whose list values share one length
///   (scalars broadcast across rows)
/// - a non-empty list of objects
pub fn parse_records(body: Value) -> Result<Vec<InputRecord>, PredictionError> {
    let records = match body {
        Value::Object(map) if map.values().any(Value::is_array) => columnar_records(map)?,
        Value::Object(map) => vec![InputRecord::from(map)],
        Value::Array(items) => {
            if items.is_empty() {
                return Err(PredictionError::Validation(
                    "Invalid input data format. Expected at least one record.".to_string(),
                ));
            }
            items
                .into_iter()
                .enumerate()
                .map(|(i, item)| match item {
                    Value::Object(map) => Ok(InputRecord::from(map)),
                    _ => Err(PredictionError::Validation(format!(
                        "Invalid input data format. Record {} is not a JSON object.",
                        i
                    ))),
                })
                .collect::<Result<Vec<_>, _>>()?
        }
        _ => {
            return Err(PredictionError::Validation(
                "Invalid input data format. Expected JSON object.".to_string(),
            ))
        }
    };

    if records.len() > MAX_BATCH_RECORDS {
        return Err(PredictionError::Validation(format!(
            "Too many records: {} (max {})",
            records.len(),
            MAX_BATCH_RECORDS
        )));
    }
    Ok(records)
}

fn columnar_records(map: Map<String, Value>) -> Result<Vec<InputRecord>, PredictionError> {
    let mut rows: Option<usize> = None;
    for (field, value) in &map {
        if let Value::Array(items) = value {
            match rows {
                None => rows = Some(items.len()),
                Some(n) if n != items.len() => {
                    return Err(PredictionError::Validation(format!(
                        "Column '{}' has {} values, expected {}",
                        field,
                        items.len(),
                        n
                    )))
                }
                Some(_) => {}
            }
        }
    }

    let rows = rows.unwrap_or(0);
    if rows == 0 {
        return Err(PredictionError::Validation(
            "Invalid input data format. Columns must not be empty.".to_string(),
        ));
    }

    let mut records = vec![InputRecord::new(); rows];
    for (field, value) in map {
        match value {
            Value::Array(items) => {
                for (record, item) in records.iter_mut().zip(items) {
                    record.insert(field.clone(), item);
                }
            }
            scalar => {
                for record in records.iter_mut() {
                    record.insert(field.clone(), scalar.clone());
                }
            }
        }
    }
    Ok(records)
}
