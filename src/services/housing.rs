use std::io::Read;
use std::path::Path;
use thiserror::Error;

use crate::core::housing::{estimate_price, HousePriceEstimate};
use crate::error::PredictionError;
use crate::models::{HousePriceRequest, HousingListing};

/// Errors that can occur when loading the housing dataset
#[derive(Debug, Error)]
pub enum HousingError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Dataset has no usable rows")]
    Empty,
}

const REQUIRED_COLUMNS: [&str; 7] = ["HARGA", "LT", "LB", "JKT", "JKM", "GRS", "KOTA"];

/// In-memory housing price dataset, read-only after load
#[derive(Debug, Clone)]
pub struct HousingDataset {
    listings: Vec<HousingListing>,
}

impl HousingDataset {
    /// Load the dataset from a CSV file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, HousingError> {
        let reader = csv::Reader::from_path(path.as_ref())?;
        Self::from_csv(reader)
    }

    /// Load the dataset from any CSV source
    pub fn from_reader<R: Read>(source: R) -> Result<Self, HousingError> {
        Self::from_csv(csv::Reader::from_reader(source))
    }

    pub fn from_listings(listings: Vec<HousingListing>) -> Self {
        Self { listings }
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>) -> Result<Self, HousingError> {
        let headers = reader.headers()?.clone();
        let mut idx = [0usize; 7];
        for (slot, name) in idx.iter_mut().zip(REQUIRED_COLUMNS) {
            *slot = headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
                .ok_or_else(|| HousingError::MissingColumn(name.to_string()))?;
        }

        let mut listings = Vec::new();
        let mut skipped = 0usize;
        for (line, result) in reader.records().enumerate() {
            let record = result?;
            let field = |i: usize| record.get(idx[i]).unwrap_or("").trim();
            match parse_listing(field(0), field(1), field(2), field(3), field(4), field(5), field(6)) {
                Some(listing) => listings.push(listing),
                None => {
                    skipped += 1;
                    tracing::debug!("Skipping unparseable housing row {}", line + 2);
                }
            }
        }

        if skipped > 0 {
            tracing::warn!("Skipped {} unparseable housing row(s)", skipped);
        }
        if listings.is_empty() {
            return Err(HousingError::Empty);
        }
        Ok(Self { listings })
    }

    pub fn listings(&self) -> &[HousingListing] {
        &self.listings
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn estimate(&self, request: &HousePriceRequest) -> Result<HousePriceEstimate, PredictionError> {
        estimate_price(&self.listings, request)
    }
}

/// Prices use `.` as thousands separator, e.g. `1.250.000.000`
pub fn parse_price(raw: &str) -> Option<f64> {
    raw.replace('.', "").trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// `ADA` (present) / `TIDAK ADA` (absent)
pub fn parse_garage(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_uppercase().as_str() {
        "ADA" => Some(true),
        "TIDAK ADA" => Some(false),
        _ => None,
    }
}

fn parse_listing(
    price: &str,
    lt: &str,
    lb: &str,
    jkt: &str,
    jkm: &str,
    grs: &str,
    kota: &str,
) -> Option<HousingListing> {
    let number = |s: &str| s.parse::<f64>().ok().filter(|v| v.is_finite());
    if kota.is_empty() {
        return None;
    }
    Some(HousingListing {
        price: parse_price(price)?,
        land_area: number(lt)?,
        building_area: number(lb)?,
        bedrooms: number(jkt)?,
        bathrooms: number(jkm)?,
        garage: parse_garage(grs)?,
        city: kota.to_string(),
    })
}
