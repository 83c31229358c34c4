//! Energy Predict - prediction service for household appliance energy use
//!
//! Serves trained regression models over HTTP. Each request is reconciled
//! against the column layout its model was trained on before prediction.
//! A small least-squares house price estimator is served alongside.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{schema_for, LoadedModel, Predictor, Reconciler};
pub use error::PredictionError;
pub use models::{FeatureMatrix, InputRecord, ModelKey, Schema};
pub use services::ModelRegistry;
