use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::error::PredictionError;

/// Identifier of a trained appliance model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKey {
    AirConditioners,
    Televisions,
    Refrigerators,
    AirCleaner,
}

impl ModelKey {
    pub const ALL: [ModelKey; 4] = [
        ModelKey::AirConditioners,
        ModelKey::Televisions,
        ModelKey::Refrigerators,
        ModelKey::AirCleaner,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKey::AirConditioners => "air_conditioners",
            ModelKey::Televisions => "televisions",
            ModelKey::Refrigerators => "refrigerators",
            ModelKey::AirCleaner => "air_cleaner",
        }
    }

    /// File name of the artifact when none is configured explicitly
    pub fn default_artifact(&self) -> &'static str {
        match self {
            ModelKey::AirConditioners => "air-conditioners.json",
            ModelKey::Televisions => "televisions.json",
            ModelKey::Refrigerators => "refrigerators.json",
            ModelKey::AirCleaner => "air-cleaner.json",
        }
    }
}

impl fmt::Display for ModelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelKey {
    type Err = PredictionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModelKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| PredictionError::ModelNotFound(s.to_string()))
    }
}

/// Ordered column layout a model was trained on.
///
/// `numeric ++ categorical` is the exact column order of the training
/// pipeline and must only change together with a retrained artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub numeric: Vec<String>,
    pub categorical: Vec<String>,
}

impl Schema {
    pub fn new(numeric: &[&str], categorical: &[&str]) -> Self {
        Self {
            numeric: numeric.iter().map(|c| c.to_string()).collect(),
            categorical: categorical.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// All columns in training order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.numeric
            .iter()
            .chain(self.categorical.iter())
            .map(String::as_str)
    }

    pub fn width(&self) -> usize {
        self.numeric.len() + self.categorical.len()
    }
}

/// A caller-supplied record. Fields may be missing or extra.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputRecord(Map<String, Value>);

impl InputRecord {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Field value, treating `null` the same as an absent field
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field).filter(|v| !v.is_null())
    }

    pub fn insert(&mut self, field: impl Into<String>, value: Value) {
        self.0.insert(field.into(), value);
    }

    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.0.remove(field)
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for InputRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// One reconciled cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Numeric(f64),
    Category(String),
}

impl FeatureValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FeatureValue::Numeric(v) => Some(*v),
            FeatureValue::Category(_) => None,
        }
    }

    pub fn as_category(&self) -> Option<&str> {
        match self {
            FeatureValue::Numeric(_) => None,
            FeatureValue::Category(label) => Some(label),
        }
    }
}

/// Column-ordered, fully populated rows handed to a predictor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureMatrix {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<FeatureValue>>,
}

impl FeatureMatrix {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Look up a cell by row index and column name
    pub fn value(&self, row: usize, column: &str) -> Option<&FeatureValue> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row).and_then(|r| r.get(idx))
    }
}

/// A single row of the housing price dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HousingListing {
    pub price: f64,
    /// Land area in m2 (LT)
    pub land_area: f64,
    /// Building area in m2 (LB)
    pub building_area: f64,
    pub bedrooms: f64,
    pub bathrooms: f64,
    pub garage: bool,
    pub city: String,
}

impl HousingListing {
    /// Regression inputs in the order `[LT, LB, JKT, JKM, GRS]`
    pub fn features(&self) -> Vec<f64> {
        vec![
            self.land_area,
            self.building_area,
            self.bedrooms,
            self.bathrooms,
            if self.garage { 1.0 } else { 0.0 },
        ]
    }
}

/// Price summary over the listings of one sub-location
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceStatistics {
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_model_key_round_trip() {
        for key in ModelKey::ALL {
            assert_eq!(key.as_str().parse::<ModelKey>().unwrap(), key);
        }
        assert!(matches!(
            "dishwashers".parse::<ModelKey>(),
            Err(PredictionError::ModelNotFound(name)) if name == "dishwashers"
        ));
    }

    #[test]
    fn test_model_key_serde_matches_as_str() {
        let value = serde_json::to_value(ModelKey::AirCleaner).unwrap();
        assert_eq!(value, json!("air_cleaner"));
    }

    #[test]
    fn test_input_record_null_is_absent() {
        let record = InputRecord::new().with("a", Value::Null).with("b", 1);
        assert!(record.get("a").is_none());
        assert_eq!(record.get("b"), Some(&json!(1)));
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_schema_columns_order() {
        let schema = Schema::new(&["x", "y"], &["c"]);
        let cols: Vec<&str> = schema.columns().collect();
        assert_eq!(cols, vec!["x", "y", "c"]);
        assert_eq!(schema.width(), 3);
    }

    #[test]
    fn test_listing_features_order() {
        let listing = HousingListing {
            price: 1.0,
            land_area: 120.0,
            building_area: 90.0,
            bedrooms: 3.0,
            bathrooms: 2.0,
            garage: true,
            city: "Depok".to_string(),
        };
        assert_eq!(listing.features(), vec![120.0, 90.0, 3.0, 2.0, 1.0]);
    }
}
