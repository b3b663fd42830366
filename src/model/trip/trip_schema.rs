use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::model::TaxipoolError;

/// column layout of a raw TLC trip file. the TLC published three layouts over
/// the years covered by this analysis; each is selected explicitly by the
/// caller, or inferred from the vehicle-type tag embedded in the filename.
/// an unrecognized filename fails loudly rather than silently misparsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TripSchema {
    /// yellow cab files from 2015 onward (tpep columns)
    Yellow,
    /// green cab files from 2015 onward (lpep columns)
    Green,
    /// FOIL-era trip_data files, with fares in a companion trip_fare file
    /// joined by row order
    Pre2015,
}

/// 0-based column positions of the fields this analysis consumes.
/// `fare_amount` is None for the pre-2015 layout, where the fare is carried
/// in a companion file instead of the trip row.
#[derive(Debug, Clone, Copy)]
pub struct ColumnLayout {
    pub pickup_datetime: usize,
    pub dropoff_datetime: usize,
    pub passenger_count: usize,
    pub trip_distance: usize,
    pub pickup_longitude: usize,
    pub pickup_latitude: usize,
    pub dropoff_longitude: usize,
    pub dropoff_latitude: usize,
    pub fare_amount: Option<usize>,
}

impl TripSchema {
    /// infers the schema from a vehicle-type substring in the filename.
    pub fn for_filename(filename: &str) -> Result<TripSchema, TaxipoolError> {
        let lowered = filename.to_lowercase();
        if lowered.contains("yellow") {
            Ok(TripSchema::Yellow)
        } else if lowered.contains("green") {
            Ok(TripSchema::Green)
        } else if lowered.contains("trip_data") {
            Ok(TripSchema::Pre2015)
        } else {
            Err(TaxipoolError::UnknownSchemaError(String::from(filename)))
        }
    }

    pub fn columns(&self) -> ColumnLayout {
        match self {
            TripSchema::Yellow => ColumnLayout {
                pickup_datetime: 1,
                dropoff_datetime: 2,
                passenger_count: 3,
                trip_distance: 4,
                pickup_longitude: 5,
                pickup_latitude: 6,
                dropoff_longitude: 9,
                dropoff_latitude: 10,
                fare_amount: Some(12),
            },
            TripSchema::Green => ColumnLayout {
                pickup_datetime: 1,
                dropoff_datetime: 2,
                pickup_longitude: 5,
                pickup_latitude: 6,
                dropoff_longitude: 7,
                dropoff_latitude: 8,
                passenger_count: 9,
                trip_distance: 10,
                fare_amount: Some(11),
            },
            TripSchema::Pre2015 => ColumnLayout {
                pickup_datetime: 5,
                dropoff_datetime: 6,
                passenger_count: 7,
                trip_distance: 9,
                pickup_longitude: 10,
                pickup_latitude: 11,
                dropoff_longitude: 12,
                dropoff_latitude: 13,
                fare_amount: None,
            },
        }
    }

    /// for the pre-2015 layout, the companion fare file sits beside the trip
    /// file with `data` replaced by `fare` in its name. fare column 5 of that
    /// file is inner-joined onto trip rows by row order.
    pub fn fare_file_for(&self, trip_file: &Path) -> Option<PathBuf> {
        match self {
            TripSchema::Pre2015 => {
                let name = trip_file.file_name()?.to_string_lossy().replace("data", "fare");
                Some(trip_file.with_file_name(name))
            }
            _ => None,
        }
    }

    pub const FARE_FILE_AMOUNT_COLUMN: usize = 5;
}
