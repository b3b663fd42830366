use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// aggregation key: one (route, week, time-of-week interval) cell. keys are
/// ordered so that aggregate output is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BucketKey {
    pub pickup_neighborhood: String,
    pub dropoff_neighborhood: String,
    pub week_start: NaiveDate,
    pub interval: u32,
}

/// summed trip quantities for one bucket, plus the estimated carpool count
/// derived from them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorridorBucket {
    pub taxi_count: u64,
    pub passenger_count: u64,
    pub trip_distance: f64,
    pub fare_amount: f64,
    pub carpool_count: u64,
}

impl CorridorBucket {
    pub fn add_trip(&mut self, passengers: u32, distance: f64, fare: f64) {
        self.taxi_count += 1;
        self.passenger_count += passengers as u64;
        self.trip_distance += distance;
        self.fare_amount += fare;
    }
}
