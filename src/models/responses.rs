use serde::{Deserialize, Serialize};
use crate::models::domain::PriceStatistics;

/// Response for the appliance prediction endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub predicted_energy_consumption: Vec<f64>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub models_loaded: Vec<String>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// House price estimate with the sub-location's price summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HousePriceResponse {
    pub predicted_price: f64,
    pub location: String,
    pub sub_location: String,
    pub training_rows: usize,
    pub statistics: Option<PriceStatistics>,
}
