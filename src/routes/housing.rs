use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::error::PredictionError;
use crate::models::{HousePriceRequest, HousePriceResponse};
use crate::routes::AppState;

/// Configure house price routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/predict-house-price", web::post().to(predict_house_price));
}

/// House price estimate
///
/// POST /predict-house-price
///
/// Request body:
/// ```json
/// {
///   "location": "Jakarta",
///   "sub_location": "Jakarta Selatan",
///   "land_area": 120,
///   "building_area": 100,
///   "bedrooms": 3,
///   "bathrooms": 2,
///   "garage": true
/// }
/// ```
async fn predict_house_price(
    state: web::Data<AppState>,
    req: web::Json<HousePriceRequest>,
) -> Result<HttpResponse, PredictionError> {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for house price request: {}", errors);
        return Err(PredictionError::Validation(format!("Validation failed: {}", errors)));
    }

    let dataset = state
        .housing
        .as_ref()
        .ok_or_else(|| PredictionError::Unavailable("housing dataset is not loaded".to_string()))?;

    let estimate = dataset.estimate(&req)?;

    tracing::info!(
        "Estimated {:.0} for {} / {} from {} listings",
        estimate.predicted_price,
        req.location,
        req.sub_location,
        estimate.training_rows
    );

    let req = req.into_inner();
    Ok(HttpResponse::Ok().json(HousePriceResponse {
        predicted_price: estimate.predicted_price,
        location: req.location,
        sub_location: req.sub_location,
        training_rows: estimate.training_rows,
        statistics: estimate.statistics,
    }))
}
