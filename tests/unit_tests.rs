// Library-level tests for Energy Predict

use energy_predict::core::{
    parse_records, schema_for, schema_for_name, CategoricalEncoding, FallbackPolicy,
    LinearRegression, ModelArtifact, Preprocessing, Reconciler,
};
use energy_predict::models::{FeatureValue, InputRecord, ModelKey};
use energy_predict::PredictionError;
use serde_json::json;
use std::collections::HashMap;
use std::path::Path;

fn ac_record() -> InputRecord {
    InputRecord::new()
        .with("height_inches", 30)
        .with("width_inches", 24)
        .with("depth_inches", 12)
        .with("weight_lbs", 100)
        .with("cooling_capacity_btu_hour", 12000)
        .with("voltage_volts", 220)
        .with("type", "Window")
        .with("installation_mounting_type", "Does Not Straddle Window or Windowsill")
        .with("heating_mode", "Yes")
        .with("low_noise", "Yes")
}

fn ac_reconciler(fallback: FallbackPolicy) -> Reconciler {
    Reconciler::new(
        schema_for(ModelKey::AirConditioners),
        Preprocessing::default().with_fallback(fallback),
    )
}

fn shipped_artifact(key: ModelKey) -> ModelArtifact {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("models")
        .join(key.default_artifact());
    let text = std::fs::read_to_string(path).unwrap();
    ModelArtifact::from_json(&text).unwrap()
}

#[test]
fn test_schema_is_stable() {
    for key in ModelKey::ALL {
        assert_eq!(schema_for(key), schema_for(key));
    }
    let ac = schema_for(ModelKey::AirConditioners);
    assert_eq!(ac.numeric.len(), 6);
    assert_eq!(ac.categorical.len(), 4);
    assert_eq!(ac.width(), 10);
}

#[test]
fn test_schema_by_name() {
    assert_eq!(
        schema_for_name("televisions").unwrap(),
        schema_for(ModelKey::Televisions)
    );
    assert!(matches!(
        schema_for_name("dishwashers"),
        Err(PredictionError::ModelNotFound(_))
    ));
}

#[test]
fn test_ac_record_reconciles_to_schema_order() {
    let reconciler = ac_reconciler(FallbackPolicy::Reject);
    let matrix = reconciler.reconcile(&ac_record()).unwrap();

    let schema = schema_for(ModelKey::AirConditioners);
    let expected: Vec<String> = schema.columns().map(str::to_string).collect();
    assert_eq!(matrix.columns, expected);
    assert_eq!(matrix.len(), 1);
    assert_eq!(matrix.rows[0].len(), 10);
    assert_eq!(matrix.value(0, "weight_lbs"), Some(&FeatureValue::Numeric(100.0)));
    assert_eq!(
        matrix.value(0, "type"),
        Some(&FeatureValue::Category("Window".to_string()))
    );
}

#[test]
fn test_reconcile_is_deterministic() {
    let reconciler = ac_reconciler(FallbackPolicy::Reject);
    let first = reconciler.reconcile(&ac_record()).unwrap();
    let second = reconciler.reconcile(&ac_record()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_extra_fields_ignored() {
    let reconciler = ac_reconciler(FallbackPolicy::Reject);
    let plain = reconciler.reconcile(&ac_record()).unwrap();
    let extra = reconciler
        .reconcile(&ac_record().with("energy_star_partner", "Acme"))
        .unwrap();
    assert_eq!(plain, extra);
}

#[test]
fn test_missing_numeric_with_fallback() {
    let reconciler = ac_reconciler(FallbackPolicy::TrainingStats {
        values: HashMap::from([("depth_inches".to_string(), 17.5)]),
    });
    let mut record = ac_record();
    record.remove("depth_inches");

    let matrix = reconciler.reconcile(&record).unwrap();
    assert_eq!(matrix.value(0, "depth_inches"), Some(&FeatureValue::Numeric(17.5)));
}

#[test]
fn test_missing_numeric_without_fallback() {
    let reconciler = ac_reconciler(FallbackPolicy::Reject);
    let mut record = ac_record();
    record.remove("depth_inches");

    assert!(matches!(
        reconciler.reconcile(&record),
        Err(PredictionError::SchemaMismatch(col)) if col.contains("depth_inches")
    ));
}

#[test]
fn test_missing_categorical_is_schema_mismatch() {
    let reconciler = ac_reconciler(FallbackPolicy::Constant { value: 0.0 });
    let mut record = ac_record();
    record.remove("type");

    assert!(matches!(
        reconciler.reconcile(&record),
        Err(PredictionError::SchemaMismatch(col)) if col == "type"
    ));
}

#[test]
fn test_numeric_strings_convert() {
    let reconciler = ac_reconciler(FallbackPolicy::Reject);
    let record = ac_record().with("voltage_volts", "115");
    let matrix = reconciler.reconcile(&record).unwrap();
    assert_eq!(matrix.value(0, "voltage_volts"), Some(&FeatureValue::Numeric(115.0)));
}

#[test]
fn test_one_hot_unknown_level_all_zero() {
    let reconciler = Reconciler::new(
        schema_for(ModelKey::AirConditioners),
        Preprocessing::default().with_encoding(CategoricalEncoding::OneHot {
            levels: HashMap::from([
                ("type".to_string(), vec!["Portable".to_string(), "Window".to_string()]),
                ("installation_mounting_type".to_string(), vec![]),
                ("heating_mode".to_string(), vec!["Yes".to_string()]),
                ("low_noise".to_string(), vec!["Yes".to_string()]),
            ]),
            drop_first: false,
        }),
    );

    let record = ac_record().with("type", "Split System");
    let matrix = reconciler.reconcile(&record).unwrap();
    assert_eq!(matrix.value(0, "type=Portable"), Some(&FeatureValue::Numeric(0.0)));
    assert_eq!(matrix.value(0, "type=Window"), Some(&FeatureValue::Numeric(0.0)));
    assert_eq!(matrix.value(0, "heating_mode=Yes"), Some(&FeatureValue::Numeric(1.0)));
}

#[test]
fn test_shipped_artifacts_load() {
    for key in [ModelKey::AirConditioners, ModelKey::Televisions] {
        let model = shipped_artifact(key).into_model(key).unwrap();
        assert_eq!(model.key(), key);
        assert_eq!(model.reconciler().schema(), &schema_for(key));
    }
}

#[test]
fn test_shipped_artifacts_encoding() {
    let ac = shipped_artifact(ModelKey::AirConditioners)
        .into_model(ModelKey::AirConditioners)
        .unwrap();
    let ac_pre = ac.reconciler().preprocessing();
    assert_eq!(ac_pre.encoding, CategoricalEncoding::Passthrough);
    assert!(ac_pre.scaler.is_some());
    assert!(matches!(ac_pre.fallback, FallbackPolicy::TrainingStats { .. }));

    let tv = shipped_artifact(ModelKey::Televisions)
        .into_model(ModelKey::Televisions)
        .unwrap();
    assert!(matches!(
        tv.reconciler().preprocessing().encoding,
        CategoricalEncoding::OneHot { drop_first: true, .. }
    ));
}

#[test]
fn test_shipped_artifact_wrong_key() {
    let artifact = shipped_artifact(ModelKey::Televisions);
    assert!(artifact.into_model(ModelKey::AirConditioners).is_err());
}

#[test]
fn test_shipped_ac_model_predicts_from_payload() {
    let model = shipped_artifact(ModelKey::AirConditioners)
        .into_model(ModelKey::AirConditioners)
        .unwrap();

    let records = parse_records(json!({
        "height_inches": [30, 14],
        "width_inches": [24, 19],
        "depth_inches": [12, 17],
        "weight_lbs": [100, 55],
        "cooling_capacity_btu_hour": [12000, 8000],
        "voltage_volts": 115,
        "type": "Window",
        "installation_mounting_type": "Does Not Straddle Window or Windowsill",
        "heating_mode": ["Yes", "No"],
        "low_noise": "Yes"
    }))
    .unwrap();
    assert_eq!(records.len(), 2);

    let values = model.predict(&records).unwrap();
    assert_eq!(values.len(), 2);
    assert!(values.iter().all(|v| v.is_finite()));
}

#[test]
fn test_regression_recovers_plane() {
    // price = 5 + 2a + 3b
    let x = vec![
        vec![1.0, 0.0],
        vec![0.0, 1.0],
        vec![1.0, 1.0],
        vec![2.0, 1.0],
        vec![3.0, 5.0],
    ];
    let y: Vec<f64> = x.iter().map(|r| 5.0 + 2.0 * r[0] + 3.0 * r[1]).collect();

    let model = LinearRegression::fit(&x, &y).unwrap();
    assert!((model.intercept - 5.0).abs() < 1e-6);
    assert!((model.predict(&[4.0, 2.0]) - 19.0).abs() < 1e-6);
}
