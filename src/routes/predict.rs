use actix_web::{web, HttpResponse};
use serde_json::Value;
use tracing::Instrument;
use uuid::Uuid;

use crate::core::payload::parse_records;
use crate::error::PredictionError;
use crate::models::{HealthResponse, ModelKey, PredictionResponse};
use crate::routes::AppState;

/// Configure appliance prediction routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/predict-ac", web::post().to(predict_ac))
        .route("/predict-tv", web::post().to(predict_tv))
        .route("/predict/{model}", web::post().to(predict_model));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let loaded = state.registry.loaded();
    let configured = state.registry.configured();
    let status = if loaded.len() == configured.len() { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        models_loaded: loaded.iter().map(|k| k.to_string()).collect(),
    })
}

/// Air conditioner annual energy consumption
///
/// POST /predict-ac
///
/// Request body:
/// ```json
/// {
///   "height_inches": 30, "width_inches": 24, "depth_inches": 12,
///   "weight_lbs": 100, "cooling_capacity_btu_hour": 12000, "voltage_volts": 220,
///   "type": "Window", "installation_mounting_type": "Does Not Straddle Window or Windowsill",
///   "heating_mode": "Yes", "low_noise": "Yes"
/// }
/// ```
async fn predict_ac(
    state: web::Data<AppState>,
    body: web::Json<Value>,
) -> Result<HttpResponse, PredictionError> {
    run_prediction(&state, ModelKey::AirConditioners, body.into_inner()).await
}

/// Television annual energy consumption
///
/// POST /predict-tv
async fn predict_tv(
    state: web::Data<AppState>,
    body: web::Json<Value>,
) -> Result<HttpResponse, PredictionError> {
    run_prediction(&state, ModelKey::Televisions, body.into_inner()).await
}

/// Any configured appliance model by name
///
/// POST /predict/{model}
async fn predict_model(
    state: web::Data<AppState>,
    model: web::Path<String>,
    body: web::Json<Value>,
) -> Result<HttpResponse, PredictionError> {
    let key: ModelKey = model.parse()?;
    run_prediction(&state, key, body.into_inner()).await
}

/// parse -> validate shape -> reconcile -> predict -> serialize
async fn run_prediction(
    state: &AppState,
    key: ModelKey,
    body: Value,
) -> Result<HttpResponse, PredictionError> {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("predict", %request_id, model = %key);

    async move {
        let records = parse_records(body)?;
        let model = state.registry.load(key).await?;

        let predictions = model.predict(&records).map_err(|e| {
            if e.is_client_error() {
                tracing::info!("Rejected input: {}", e);
            } else {
                tracing::error!("Prediction failed: {}", e);
            }
            e
        })?;

        tracing::info!("Returning {} prediction(s)", predictions.len());

        Ok::<_, PredictionError>(HttpResponse::Ok().json(PredictionResponse {
            predicted_energy_consumption: predictions,
        }))
    }
    .instrument(span)
    .await
}
