mod operation;
mod taxipool_app;

pub use operation::TaxipoolOperation;
pub use taxipool_app::TaxipoolApp;
