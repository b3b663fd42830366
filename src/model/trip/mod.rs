mod labeled_trip;
mod trip_loader;
mod trip_record;
mod trip_schema;

pub use labeled_trip::{read_trip_cache, write_trip_cache, LabeledTrip};
pub use trip_loader::TripLoader;
pub use trip_record::TripRecord;
pub use trip_schema::{ColumnLayout, TripSchema};
