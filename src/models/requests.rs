use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to estimate a house price
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct HousePriceRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "lokasi")]
    pub location: String,
    #[validate(length(min = 1))]
    #[serde(alias = "subLocation", alias = "sub_lokasi")]
    pub sub_location: String,
    /// LT, m2
    #[validate(range(min = 50.0, max = 1000.0))]
    #[serde(alias = "landArea", alias = "lt")]
    pub land_area: f64,
    /// LB, m2
    #[validate(range(min = 50.0, max = 1000.0))]
    #[serde(alias = "buildingArea", alias = "lb")]
    pub building_area: f64,
    #[validate(range(min = 1, max = 10))]
    #[serde(alias = "kamar_tidur")]
    pub bedrooms: u8,
    #[validate(range(min = 1, max = 10))]
    #[serde(alias = "kamar_mandi")]
    pub bathrooms: u8,
    #[serde(default, alias = "garasi")]
    pub garage: bool,
}

impl HousePriceRequest {
    /// Regression inputs in the dataset's `[LT, LB, JKT, JKM, GRS]` order
    pub fn features(&self) -> Vec<f64> {
        vec![
            self.land_area,
            self.building_area,
            self.bedrooms as f64,
            self.bathrooms as f64,
            if self.garage { 1.0 } else { 0.0 },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> HousePriceRequest {
        HousePriceRequest {
            location: "Jakarta".to_string(),
            sub_location: "Jakarta Selatan".to_string(),
            land_area: 120.0,
            building_area: 100.0,
            bedrooms: 3,
            bathrooms: 2,
            garage: true,
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn test_area_out_of_range() {
        let mut req = request();
        req.land_area = 20.0;
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_room_count_out_of_range() {
        let mut req = request();
        req.bedrooms = 0;
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_indonesian_aliases() {
        let req: HousePriceRequest = serde_json::from_value(serde_json::json!({
            "lokasi": "Depok",
            "sub_lokasi": "Depok",
            "lt": 100,
            "lb": 80,
            "kamar_tidur": 2,
            "kamar_mandi": 1,
            "garasi": false
        }))
        .unwrap();
        assert_eq!(req.location, "Depok");
        assert_eq!(req.features(), vec![100.0, 80.0, 2.0, 1.0, 0.0]);
    }
}
