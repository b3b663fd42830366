use std::path::Path;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::TripRecord;
use crate::model::zone::ZoneLabel;
use crate::model::TaxipoolError;

/// a trip record with both endpoints reverse-geocoded. this is the unit of
/// the per-file extract caches and the input to corridor aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledTrip {
    pub record: TripRecord,
    pub pickup: ZoneLabel,
    pub dropoff: ZoneLabel,
}

/// flattened cache row. zone labels are spelled as borough/zone column pairs
/// with `NA` for the unresolved sentinel, matching the original caches.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LabeledTripRow {
    pickup_datetime: NaiveDateTime,
    dropoff_datetime: NaiveDateTime,
    pickup_longitude: f64,
    pickup_latitude: f64,
    dropoff_longitude: f64,
    dropoff_latitude: f64,
    passenger_count: u32,
    trip_distance: f64,
    fare_amount: f64,
    pickup_borough: String,
    pickup_neighborhood: String,
    dropoff_borough: String,
    dropoff_neighborhood: String,
}

impl From<&LabeledTrip> for LabeledTripRow {
    fn from(trip: &LabeledTrip) -> Self {
        LabeledTripRow {
            pickup_datetime: trip.record.pickup_datetime,
            dropoff_datetime: trip.record.dropoff_datetime,
            pickup_longitude: trip.record.pickup_longitude,
            pickup_latitude: trip.record.pickup_latitude,
            dropoff_longitude: trip.record.dropoff_longitude,
            dropoff_latitude: trip.record.dropoff_latitude,
            passenger_count: trip.record.passenger_count,
            trip_distance: trip.record.trip_distance,
            fare_amount: trip.record.fare_amount,
            pickup_borough: String::from(trip.pickup.borough_or_na()),
            pickup_neighborhood: String::from(trip.pickup.zone_or_na()),
            dropoff_borough: String::from(trip.dropoff.borough_or_na()),
            dropoff_neighborhood: String::from(trip.dropoff.zone_or_na()),
        }
    }
}

impl From<LabeledTripRow> for LabeledTrip {
    fn from(row: LabeledTripRow) -> Self {
        LabeledTrip {
            record: TripRecord {
                pickup_datetime: row.pickup_datetime,
                dropoff_datetime: row.dropoff_datetime,
                pickup_longitude: row.pickup_longitude,
                pickup_latitude: row.pickup_latitude,
                dropoff_longitude: row.dropoff_longitude,
                dropoff_latitude: row.dropoff_latitude,
                passenger_count: row.passenger_count,
                trip_distance: row.trip_distance,
                fare_amount: row.fare_amount,
            },
            pickup: ZoneLabel::from_fields(&row.pickup_borough, &row.pickup_neighborhood),
            dropoff: ZoneLabel::from_fields(&row.dropoff_borough, &row.dropoff_neighborhood),
        }
    }
}

/// writes one extract cache file of labeled trips.
pub fn write_trip_cache(path: &Path, trips: &[LabeledTrip]) -> Result<(), TaxipoolError> {
    let mut writer = csv::Writer::from_path(path)?;
    for trip in trips {
        writer.serialize(LabeledTripRow::from(trip))?;
    }
    writer.flush()?;
    Ok(())
}

/// reads one extract cache file back into labeled trips.
pub fn read_trip_cache(path: &Path) -> Result<Vec<LabeledTrip>, TaxipoolError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut trips = vec![];
    for row in reader.deserialize() {
        let row: LabeledTripRow = row?;
        trips.push(LabeledTrip::from(row));
    }
    Ok(trips)
}
