mod corridor_summary;

pub use corridor_summary::CorridorSummary;
