use crate::core::predictor::Predictor;
use crate::core::reconciler::Reconciler;
use crate::error::PredictionError;
use crate::models::{InputRecord, ModelKey};

/// A predictor paired with the reconciler for its training layout.
/// Read-only once loaded.
#[derive(Debug)]
pub struct LoadedModel {
    key: ModelKey,
    reconciler: Reconciler,
    predictor: Box<dyn Predictor>,
}

impl LoadedModel {
    pub fn new(key: ModelKey, reconciler: Reconciler, predictor: Box<dyn Predictor>) -> Self {
        Self {
            key,
            reconciler,
            predictor,
        }
    }

    pub fn key(&self) -> ModelKey {
        self.key
    }

    pub fn reconciler(&self) -> &Reconciler {
        &self.reconciler
    }

    pub fn predictor(&self) -> &dyn Predictor {
        self.predictor.as_ref()
    }

    /// Reconcile the records and run the predictor over them
    pub fn predict(&self, records: &[InputRecord]) -> Result<Vec<f64>, PredictionError> {
        let matrix = self.reconciler.reconcile_batch(records)?;
        tracing::debug!(
            "Reconciled {} record(s) into {} column(s) for {}",
            matrix.len(),
            matrix.width(),
            self.key
        );
        let predictions = self.predictor.predict(&matrix)?;

        if let Some(row) = predictions.iter().position(|v| !v.is_finite()) {
            return Err(PredictionError::Prediction(format!(
                "prediction for record {} is not a finite number",
                row
            )));
        }
        Ok(predictions)
    }
}
