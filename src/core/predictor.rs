use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Debug;

use crate::error::PredictionError;
use crate::models::{FeatureMatrix, FeatureValue};

/// A trained model that only knows how to predict
pub trait Predictor: Debug + Send + Sync {
    /// Columns the predictor was trained on, in order
    fn features(&self) -> &[String];

    /// One predicted value per matrix row
    fn predict(&self, matrix: &FeatureMatrix) -> Result<Vec<f64>, PredictionError>;
}

/// Linear regression exported from the training pipeline.
///
/// Numeric features carry a coefficient. Categorical features left as
/// labels carry one weight per known level; unseen levels weigh zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearPredictor {
    pub intercept: f64,
    pub features: Vec<String>,
    #[serde(default)]
    pub coefficients: HashMap<String, f64>,
    #[serde(default)]
    pub category_weights: HashMap<String, HashMap<String, f64>>,
}

impl LinearPredictor {
    /// Every feature must have exactly one of a coefficient or level weights
    pub fn validate(&self) -> Result<(), String> {
        for feature in &self.features {
            let numeric = self.coefficients.contains_key(feature);
            let categorical = self.category_weights.contains_key(feature);
            if numeric == categorical {
                return Err(format!(
                    "feature '{}' needs exactly one of a coefficient or category weights",
                    feature
                ));
            }
        }
        Ok(())
    }

    fn predict_row(&self, row: &[FeatureValue]) -> Result<f64, PredictionError> {
        let mut total = self.intercept;
        for (feature, cell) in self.features.iter().zip(row) {
            total += if let Some(coef) = self.coefficients.get(feature) {
                let value = cell.as_f64().ok_or_else(|| {
                    PredictionError::Prediction(format!("feature '{}' expects a number", feature))
                })?;
                coef * value
            } else if let Some(weights) = self.category_weights.get(feature) {
                let label = cell.as_category().ok_or_else(|| {
                    PredictionError::Prediction(format!("feature '{}' expects a category label", feature))
                })?;
                weights.get(label).copied().unwrap_or(0.0)
            } else {
                return Err(PredictionError::Prediction(format!(
                    "feature '{}' has no weights",
                    feature
                )));
            };
        }
        Ok(total)
    }
}

impl Predictor for LinearPredictor {
    fn features(&self) -> &[String] {
        &self.features
    }

    fn predict(&self, matrix: &FeatureMatrix) -> Result<Vec<f64>, PredictionError> {
        if matrix.columns != self.features {
            return Err(PredictionError::Prediction(format!(
                "feature layout mismatch: got {} columns, expected {}",
                matrix.width(),
                self.features.len()
            )));
        }
        matrix.rows.iter().map(|row| self.predict_row(row)).collect()
    }
}
