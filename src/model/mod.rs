pub mod aggregate;
pub mod analysis_config;
pub mod carpool;
pub mod corridor;
pub mod report;
mod taxipool_error;
pub mod trip;
pub mod zone;

pub use analysis_config::{AnalysisConfig, CityBounds};
pub use taxipool_error::TaxipoolError;
