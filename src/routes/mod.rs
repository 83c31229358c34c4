// Route exports
pub mod housing;
pub mod predict;

use actix_web::web;
use std::sync::Arc;

use crate::services::{HousingDataset, ModelRegistry};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ModelRegistry>,
    pub housing: Option<Arc<HousingDataset>>,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(predict::configure).configure(housing::configure);
}
