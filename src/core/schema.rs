use crate::error::PredictionError;
use crate::models::{ModelKey, Schema};

const AIR_CONDITIONER_NUMERIC: &[&str] = &[
    "height_inches",
    "width_inches",
    "depth_inches",
    "weight_lbs",
    "cooling_capacity_btu_hour",
    "voltage_volts",
];

const AIR_CONDITIONER_CATEGORICAL: &[&str] = &[
    "type",
    "installation_mounting_type",
    "heating_mode",
    "low_noise",
];

const TELEVISION_NUMERIC: &[&str] = &[
    "Diagonal Viewable Screen Size (in.)",
    "Resolution Format",
    "Physical Data Ports Available",
];

const TELEVISION_CATEGORICAL: &[&str] = &[
    "Brand Name",
    "Display Type",
    "Backlight Technology Type",
    "High Contrast Ratio (HCR) Display",
    "Ethernet Supported",
    "Low Power Wireless Technologies Supported",
    "Automatic Brightness Control",
    "Auto Brightness",
];

const REFRIGERATOR_NUMERIC: &[&str] = &[
    "Height (in)",
    "Width (in)",
    "Capacity (Total Volume) (ft3)",
    "Adjusted Volume (ft3)",
    "US Federal Standard (kWh/yr)",
    "Percent Less Energy Use than US Federal Standard",
];

const REFRIGERATOR_CATEGORICAL: &[&str] = &[
    "Type",
    "Compact",
    "Thru the Door Dispenser",
    "Ice Maker",
    "Connected Functionality",
];

const AIR_CLEANER_NUMERIC: &[&str] = &[
    "room_size_sq_ft",
    "dust_free_clean_air_delivery",
    "smoke_free_clean_air_delivery",
    "pollen_free_clean_air_delivery",
    "dust_free_clean_air_delivery_1",
    "smoke_free_clean_air_delivery_1",
    "pollen_free_clean_air_delivery_1",
    "partial_on_mode_power_watts",
    "ozone_emissions_ppb",
];

const AIR_CLEANER_CATEGORICAL: &[&str] = &[
    "technology_types",
    "filter_1_type",
    "filter_2_type",
    "filter_3_type",
    "filter_4_type",
    "network_capability",
];

/// Declared training column layout for a model
pub fn schema_for(key: ModelKey) -> Schema {
    match key {
        ModelKey::AirConditioners => Schema::new(AIR_CONDITIONER_NUMERIC, AIR_CONDITIONER_CATEGORICAL),
        ModelKey::Televisions => Schema::new(TELEVISION_NUMERIC, TELEVISION_CATEGORICAL),
        ModelKey::Refrigerators => Schema::new(REFRIGERATOR_NUMERIC, REFRIGERATOR_CATEGORICAL),
        ModelKey::AirCleaner => Schema::new(AIR_CLEANER_NUMERIC, AIR_CLEANER_CATEGORICAL),
    }
}

/// Schema lookup by model name
pub fn schema_for_name(name: &str) -> Result<Schema, PredictionError> {
    let key: ModelKey = name.parse()?;
    Ok(schema_for(key))
}
