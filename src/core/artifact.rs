use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::model::LoadedModel;
use crate::core::predictor::{LinearPredictor, Predictor};
use crate::core::preprocessing::Preprocessing;
use crate::core::reconciler::Reconciler;
use crate::core::schema::schema_for;
use crate::models::{ModelKey, Schema};

/// Errors that can occur when reading a model artifact
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Artifact is for model {found}, expected {expected}")]
    WrongModel { expected: ModelKey, found: ModelKey },

    #[error("Artifact schema does not match the declared column layout of {0}")]
    SchemaMismatch(ModelKey),

    #[error("Invalid artifact: {0}")]
    Invalid(String),
}

/// Estimator section of an artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Estimator {
    Linear(LinearPredictor),
}

/// Serialized predictor together with its preprocessing contract
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub model: ModelKey,
    #[serde(default)]
    pub description: Option<String>,
    pub schema: Schema,
    #[serde(default)]
    pub preprocessing: Preprocessing,
    pub estimator: Estimator,
}

impl ModelArtifact {
    pub fn from_json(text: &str) -> Result<Self, ArtifactError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Validate the artifact against the schema table and build the model
    pub fn into_model(self, key: ModelKey) -> Result<LoadedModel, ArtifactError> {
        if self.model != key {
            return Err(ArtifactError::WrongModel {
                expected: key,
                found: self.model,
            });
        }
        if self.schema != schema_for(key) {
            return Err(ArtifactError::SchemaMismatch(key));
        }
        self.preprocessing
            .validate(&self.schema)
            .map_err(ArtifactError::Invalid)?;

        let predictor: Box<dyn Predictor> = match self.estimator {
            Estimator::Linear(linear) => {
                linear.validate().map_err(ArtifactError::Invalid)?;
                Box::new(linear)
            }
        };

        let reconciler = Reconciler::new(self.schema, self.preprocessing);
        if reconciler.output_columns() != predictor.features() {
            return Err(ArtifactError::Invalid(
                "estimator features do not match the reconciled column layout".to_string(),
            ));
        }

        Ok(LoadedModel::new(key, reconciler, predictor))
    }
}
