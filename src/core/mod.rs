// Core pipeline exports
pub mod artifact;
pub mod housing;
pub mod model;
pub mod payload;
pub mod predictor;
pub mod preprocessing;
pub mod reconciler;
pub mod regression;
pub mod schema;

pub use artifact::{ArtifactError, Estimator, ModelArtifact};
pub use housing::{estimate_price, summary_statistics, HousePriceEstimate};
pub use model::LoadedModel;
pub use payload::parse_records;
pub use predictor::{LinearPredictor, Predictor};
pub use preprocessing::{CategoricalEncoding, FallbackPolicy, Preprocessing, StandardScaler};
pub use reconciler::Reconciler;
pub use regression::{LinearRegression, RegressionError};
pub use schema::{schema_for, schema_for_name};
