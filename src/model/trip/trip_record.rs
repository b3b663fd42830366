use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::ColumnLayout;

/// the TLC timestamp spelling, e.g. `2013-01-07 08:15:00`
pub const TLC_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// one taxi trip with typed fields, immutable once parsed. rows whose fields
/// fail to parse are dropped individually by the loader; a malformed row
/// never aborts its file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRecord {
    pub pickup_datetime: NaiveDateTime,
    pub dropoff_datetime: NaiveDateTime,
    pub pickup_longitude: f64,
    pub pickup_latitude: f64,
    pub dropoff_longitude: f64,
    pub dropoff_latitude: f64,
    pub passenger_count: u32,
    pub trip_distance: f64,
    pub fare_amount: f64,
}

impl TripRecord {
    /// parses one raw CSV row under the given column layout. `joined_fare`
    /// supplies the fare for layouts that carry it in a companion file; a row
    /// missing its fare counterpart yields None (inner join semantics).
    pub fn parse(
        row: &csv::StringRecord,
        layout: &ColumnLayout,
        joined_fare: Option<f64>,
    ) -> Option<TripRecord> {
        let datetime = |idx: usize| {
            NaiveDateTime::parse_from_str(row.get(idx)?.trim(), TLC_DATETIME_FORMAT).ok()
        };
        let float = |idx: usize| row.get(idx)?.trim().parse::<f64>().ok();
        let fare_amount = match layout.fare_amount {
            Some(idx) => float(idx)?,
            None => joined_fare?,
        };
        Some(TripRecord {
            pickup_datetime: datetime(layout.pickup_datetime)?,
            dropoff_datetime: datetime(layout.dropoff_datetime)?,
            pickup_longitude: float(layout.pickup_longitude)?,
            pickup_latitude: float(layout.pickup_latitude)?,
            dropoff_longitude: float(layout.dropoff_longitude)?,
            dropoff_latitude: float(layout.dropoff_latitude)?,
            passenger_count: row.get(layout.passenger_count)?.trim().parse::<u32>().ok()?,
            trip_distance: float(layout.trip_distance)?,
            fare_amount,
        })
    }
}
