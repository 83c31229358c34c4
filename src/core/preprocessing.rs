use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::Schema;

/// How a numeric column absent from the input record is filled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// A missing numeric column is a schema mismatch
    Reject,
    /// Every missing numeric column gets the same value
    Constant { value: f64 },
    /// Per-column statistics persisted when the model was trained
    TrainingStats { values: HashMap<String, f64> },
}

impl FallbackPolicy {
    /// Fill value for `column`, `None` when the policy has none
    pub fn fill_value(&self, column: &str) -> Option<f64> {
        match self {
            FallbackPolicy::Reject => None,
            FallbackPolicy::Constant { value } => Some(*value),
            FallbackPolicy::TrainingStats { values } => values.get(column).copied(),
        }
    }
}

impl Default for FallbackPolicy {
    fn default() -> Self {
        FallbackPolicy::Reject
    }
}

/// Standardization parameters fitted at training time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: HashMap<String, f64>,
    pub scale: HashMap<String, f64>,
}

impl StandardScaler {
    /// `(value - mean) / scale`; a zero scale leaves the centered value as is
    pub fn transform(&self, column: &str, value: f64) -> f64 {
        let mean = self.mean.get(column).copied().unwrap_or(0.0);
        let scale = match self.scale.get(column).copied() {
            Some(s) if s != 0.0 => s,
            _ => 1.0,
        };
        (value - mean) / scale
    }

    fn covers(&self, column: &str) -> bool {
        self.mean.contains_key(column) && self.scale.contains_key(column)
    }
}

/// How categorical columns are presented to the predictor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CategoricalEncoding {
    /// Labels are handed to the predictor unchanged
    Passthrough,
    /// Each column expands to `column=level` indicator columns
    OneHot {
        levels: HashMap<String, Vec<String>>,
        #[serde(default)]
        drop_first: bool,
    },
}

impl Default for CategoricalEncoding {
    fn default() -> Self {
        CategoricalEncoding::Passthrough
    }
}

impl CategoricalEncoding {
    /// Indicator levels emitted for a column under one-hot encoding
    pub fn encoded_levels(&self, column: &str) -> &[String] {
        match self {
            CategoricalEncoding::Passthrough => &[],
            CategoricalEncoding::OneHot { levels, drop_first } => {
                let all = levels.get(column).map(Vec::as_slice).unwrap_or(&[]);
                if *drop_first && !all.is_empty() {
                    &all[1..]
                } else {
                    all
                }
            }
        }
    }
}

pub fn indicator_column(column: &str, level: &str) -> String {
    format!("{}={}", column, level)
}

/// Preprocessing contract persisted next to a trained estimator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preprocessing {
    #[serde(default)]
    pub fallback: FallbackPolicy,
    #[serde(default)]
    pub scaler: Option<StandardScaler>,
    #[serde(default)]
    pub encoding: CategoricalEncoding,
}

impl Preprocessing {
    pub fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn with_scaler(mut self, scaler: StandardScaler) -> Self {
        self.scaler = Some(scaler);
        self
    }

    pub fn with_encoding(mut self, encoding: CategoricalEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Check that the persisted parameters cover every schema column
    pub fn validate(&self, schema: &Schema) -> Result<(), String> {
        if let Some(scaler) = &self.scaler {
            if let Some(col) = schema.numeric.iter().find(|c| !scaler.covers(c)) {
                return Err(format!("scaler has no parameters for column '{}'", col));
            }
        }
        if let CategoricalEncoding::OneHot { levels, .. } = &self.encoding {
            if let Some(col) = schema.categorical.iter().find(|c| !levels.contains_key(*c)) {
                return Err(format!("one-hot encoding has no levels for column '{}'", col));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scaler() -> StandardScaler {
        StandardScaler {
            mean: HashMap::from([("x".to_string(), 10.0), ("flat".to_string(), 3.0)]),
            scale: HashMap::from([("x".to_string(), 2.0), ("flat".to_string(), 0.0)]),
        }
    }

    #[test]
    fn test_fallback_values() {
        assert_eq!(FallbackPolicy::Reject.fill_value("x"), None);
        assert_eq!(FallbackPolicy::Constant { value: 1.5 }.fill_value("x"), Some(1.5));

        let stats = FallbackPolicy::TrainingStats {
            values: HashMap::from([("x".to_string(), 7.0)]),
        };
        assert_eq!(stats.fill_value("x"), Some(7.0));
        assert_eq!(stats.fill_value("y"), None);
    }

    #[test]
    fn test_scaler_transform() {
        let s = scaler();
        assert_eq!(s.transform("x", 14.0), 2.0);
        assert_eq!(s.transform("flat", 5.0), 2.0);
    }

    #[test]
    fn test_encoded_levels_drop_first() {
        let encoding = CategoricalEncoding::OneHot {
            levels: HashMap::from([("c".to_string(), vec!["a".to_string(), "b".to_string()])]),
            drop_first: true,
        };
        assert_eq!(encoding.encoded_levels("c"), &["b".to_string()]);
        assert!(encoding.encoded_levels("missing").is_empty());
        assert!(CategoricalEncoding::Passthrough.encoded_levels("c").is_empty());
    }

    #[test]
    fn test_validate_coverage() {
        let schema = Schema::new(&["x", "z"], &["c"]);
        let pre = Preprocessing::default().with_scaler(scaler());
        let err = pre.validate(&schema).unwrap_err();
        assert!(err.contains("'z'"));

        let pre = Preprocessing::default().with_encoding(CategoricalEncoding::OneHot {
            levels: HashMap::new(),
            drop_first: false,
        });
        assert!(pre.validate(&schema).unwrap_err().contains("'c'"));

        assert!(Preprocessing::default().validate(&schema).is_ok());
    }

    #[test]
    fn test_deserialize_tagged_policies() {
        let policy: FallbackPolicy =
            serde_json::from_str(r#"{"strategy":"constant","value":0.0}"#).unwrap();
        assert_eq!(policy, FallbackPolicy::Constant { value: 0.0 });

        let pre: Preprocessing = serde_json::from_str("{}").unwrap();
        assert_eq!(pre, Preprocessing::default());
    }
}
