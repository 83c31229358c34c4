// Service exports
pub mod housing;
pub mod registry;

pub use housing::{HousingDataset, HousingError};
pub use registry::ModelRegistry;
