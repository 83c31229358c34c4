use actix_web::{error, http::StatusCode, web, HttpRequest, HttpResponse};
use thiserror::Error;

use crate::models::{ErrorResponse, ModelKey};

/// Errors surfaced at the request boundary.
///
/// Caller-caused variants map to 400, server and artifact problems to 500.
#[derive(Debug, Clone, Error)]
pub enum PredictionError {
    #[error("Model type not recognized: {0}")]
    ModelNotFound(String),

    #[error("Failed to load model {key}: {reason}")]
    ModelLoad { key: String, reason: String },

    #[error("Missing required column: {0}")]
    SchemaMismatch(String),

    #[error("Column '{column}' could not be converted: {reason}")]
    TypeConversion { column: String, reason: String },

    #[error("{0}")]
    Validation(String),

    #[error("Prediction failed: {0}")]
    Prediction(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

impl PredictionError {
    pub fn model_load(key: ModelKey, reason: impl ToString) -> Self {
        PredictionError::ModelLoad {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn type_conversion(column: &str, reason: impl ToString) -> Self {
        PredictionError::TypeConversion {
            column: column.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Whether the caller can fix the request to make it succeed
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PredictionError::SchemaMismatch(_)
                | PredictionError::TypeConversion { .. }
                | PredictionError::Validation(_)
        )
    }
}

impl error::ResponseError for PredictionError {
    fn status_code(&self) -> StatusCode {
        if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
        })
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    PredictionError::Validation(format!("Invalid JSON: {}", err)).into()
}

/// JSON extractor configuration shared by the server and the tests
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(handle_json_payload_error)
}
