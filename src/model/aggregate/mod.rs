mod aggregate_ops;
mod corridor_bucket;
mod week_interval;

pub use aggregate_ops::{aggregate, write_aggregate};
pub use corridor_bucket::{BucketKey, CorridorBucket};
pub use week_interval::{interval_count, interval_index, week_minutes, week_start, MINUTES_PER_WEEK};
