use crate::core::regression::LinearRegression;
use crate::error::PredictionError;
use crate::models::{HousePriceRequest, HousingListing, PriceStatistics};

/// Supported cities and their sub-locations
pub const LOCATIONS: &[(&str, &[&str])] = &[
    (
        "Jakarta",
        &["Jakarta Utara", "Jakarta Barat", "Jakarta Selatan", "Jakarta Timur", "Jakarta Pusat"],
    ),
    ("Bogor", &["Bogor Utara", "Bogor Selatan", "Bogor Timur", "Bogor Barat", "Bogor Tengah"]),
    ("Tangerang", &["Tangerang Kota", "Tangerang Selatan", "Tangerang Utara", "Tangerang Barat"]),
    ("Depok", &["Depok"]),
    ("Bekasi", &["Bekasi Barat", "Bekasi Timur", "Bekasi Utara", "Bekasi Selatan"]),
];

pub fn sub_locations(location: &str) -> Option<&'static [&'static str]> {
    LOCATIONS
        .iter()
        .find(|(name, _)| *name == location)
        .map(|(_, subs)| *subs)
}

/// Outcome of one house price estimate
#[derive(Debug, Clone, PartialEq)]
pub struct HousePriceEstimate {
    pub predicted_price: f64,
    pub training_rows: usize,
    pub statistics: Option<PriceStatistics>,
}

/// Fit a regression on the listings of the requested area and predict.
///
/// Training rows are listings whose city mentions both the location and
/// the sub-location; statistics cover listings whose city is exactly the
/// sub-location.
pub fn estimate_price(
    listings: &[HousingListing],
    request: &HousePriceRequest,
) -> Result<HousePriceEstimate, PredictionError> {
    let subs = sub_locations(&request.location).ok_or_else(|| {
        PredictionError::Validation(format!("Unknown location '{}'", request.location))
    })?;
    if !subs.contains(&request.sub_location.as_str()) {
        return Err(PredictionError::Validation(format!(
            "'{}' is not a sub-location of '{}'",
            request.sub_location, request.location
        )));
    }

    let area: Vec<&HousingListing> = listings
        .iter()
        .filter(|l| l.city.contains(&request.sub_location) && l.city.contains(&request.location))
        .collect();
    if area.is_empty() {
        return Err(PredictionError::Validation(format!(
            "No listings found for sub-location '{}' in '{}'",
            request.sub_location, request.location
        )));
    }

    let x: Vec<Vec<f64>> = area.iter().map(|l| l.features()).collect();
    let y: Vec<f64> = area.iter().map(|l| l.price).collect();
    let model = LinearRegression::fit(&x, &y).map_err(|e| PredictionError::Prediction(e.to_string()))?;

    Ok(HousePriceEstimate {
        predicted_price: model.predict(&request.features()),
        training_rows: area.len(),
        statistics: summary_statistics(listings, &request.sub_location),
    })
}

/// Price summary of listings whose city equals `city`
pub fn summary_statistics(listings: &[HousingListing], city: &str) -> Option<PriceStatistics> {
    let mut prices: Vec<f64> = listings
        .iter()
        .filter(|l| l.city == city)
        .map(|l| l.price)
        .collect();
    if prices.is_empty() {
        return None;
    }
    prices.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let count = prices.len();
    let mid = count / 2;
    let median = if count % 2 == 0 {
        (prices[mid - 1] + prices[mid]) / 2.0
    } else {
        prices[mid]
    };

    Some(PriceStatistics {
        mean: prices.iter().sum::<f64>() / count as f64,
        median,
        min: prices[0],
        max: prices[count - 1],
        count,
    })
}
