// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    FeatureMatrix, FeatureValue, HousingListing, InputRecord, ModelKey, PriceStatistics, Schema,
};
pub use requests::HousePriceRequest;
pub use responses::{ErrorResponse, HealthResponse, HousePriceResponse, PredictionResponse};
