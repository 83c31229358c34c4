use serde_json::Value;

use crate::core::preprocessing::{indicator_column, CategoricalEncoding, Preprocessing};
use crate::error::PredictionError;
use crate::models::{FeatureMatrix, FeatureValue, InputRecord, Schema};

/// Maps arbitrary input records onto a model's training column layout
///
/// # Pipeline Stages
/// 1. Numeric columns: convert, or fill from the fallback policy
/// 2. Categorical columns: required, stringified labels
/// 3. Persisted scaling of numeric columns
/// 4. Categorical encoding (passthrough or one-hot)
#[derive(Debug, Clone)]
pub struct Reconciler {
    schema: Schema,
    preprocessing: Preprocessing,
}

impl Reconciler {
    pub fn new(schema: Schema, preprocessing: Preprocessing) -> Self {
        Self { schema, preprocessing }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn preprocessing(&self) -> &Preprocessing {
        &self.preprocessing
    }

    /// Columns of the matrix produced by [`Reconciler::reconcile`]
    pub fn output_columns(&self) -> Vec<String> {
        let mut columns = self.schema.numeric.clone();
        match &self.preprocessing.encoding {
            CategoricalEncoding::Passthrough => columns.extend(self.schema.categorical.iter().cloned()),
            encoding @ CategoricalEncoding::OneHot { .. } => {
                for col in &self.schema.categorical {
                    columns.extend(
                        encoding
                            .encoded_levels(col)
                            .iter()
                            .map(|level| indicator_column(col, level)),
                    );
                }
            }
        }
        columns
    }

    /// Reconcile a single record into a one-row matrix
    pub fn reconcile(&self, record: &InputRecord) -> Result<FeatureMatrix, PredictionError> {
        self.reconcile_batch(std::slice::from_ref(record))
    }

    /// Reconcile every record; the first failing record aborts the batch
    pub fn reconcile_batch(&self, records: &[InputRecord]) -> Result<FeatureMatrix, PredictionError> {
        let mut matrix = FeatureMatrix::new(self.output_columns());
        matrix.rows.reserve(records.len());
        for record in records {
            matrix.rows.push(self.reconcile_row(record)?);
        }
        Ok(matrix)
    }

    fn reconcile_row(&self, record: &InputRecord) -> Result<Vec<FeatureValue>, PredictionError> {
        let mut row = Vec::with_capacity(self.schema.width());

        for col in &self.schema.numeric {
            let raw = match record.get(col) {
                Some(value) => numeric_value(col, value)?,
                None => self.preprocessing.fallback.fill_value(col).ok_or_else(|| {
                    PredictionError::SchemaMismatch(format!("{} (no fallback value available)", col))
                })?,
            };
            let value = match &self.preprocessing.scaler {
                Some(scaler) => scaler.transform(col, raw),
                None => raw,
            };
            row.push(FeatureValue::Numeric(value));
        }

        for col in &self.schema.categorical {
            let value = record
                .get(col)
                .ok_or_else(|| PredictionError::SchemaMismatch(col.clone()))?;
            let label = category_label(col, value)?;
            match &self.preprocessing.encoding {
                CategoricalEncoding::Passthrough => row.push(FeatureValue::Category(label)),
                encoding @ CategoricalEncoding::OneHot { .. } => {
                    // Unseen labels encode as all zeros
                    row.extend(encoding.encoded_levels(col).iter().map(|level| {
                        FeatureValue::Numeric(if *level == label { 1.0 } else { 0.0 })
                    }));
                }
            }
        }

        Ok(row)
    }
}

fn numeric_value(column: &str, value: &Value) -> Result<f64, PredictionError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(PredictionError::type_conversion(
            column,
            format!("expected a number, got {}", value),
        )),
    }
}

fn category_label(column: &str, value: &Value) -> Result<String, PredictionError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(PredictionError::type_conversion(
            column,
            format!("expected a scalar label, got {}", value),
        )),
    }
}
