use std::collections::BTreeMap;
use std::fmt::Display;

use serde::Serialize;

use crate::model::aggregate::{BucketKey, CorridorBucket};
use crate::model::AnalysisConfig;

/// corridor-level reduction of one group's aggregate buckets. ratios over
/// taxi counts are None when the group has no trips at all, reported as
/// `undefined` rather than propagating a NaN or coercing to zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorridorSummary {
    pub group: String,
    pub total_taxis: u64,
    pub total_carpools: u64,
    pub car_reduction_ratio: Option<f64>,
    pub miles_reduction: f64,
    pub co2_reduction_tons: f64,
    pub total_fare: f64,
    pub mean_passengers_per_taxi: Option<f64>,
}

impl CorridorSummary {
    pub fn from_buckets(
        group: &str,
        buckets: &BTreeMap<BucketKey, CorridorBucket>,
        config: &AnalysisConfig,
    ) -> CorridorSummary {
        let total_taxis: u64 = buckets.values().map(|b| b.taxi_count).sum();
        let total_carpools: u64 = buckets.values().map(|b| b.carpool_count).sum();
        let total_passengers: u64 = buckets.values().map(|b| b.passenger_count).sum();
        let total_distance: f64 = buckets.values().map(|b| b.trip_distance).sum();
        let total_fare: f64 = buckets.values().map(|b| b.fare_amount).sum();

        let car_reduction_ratio = if total_taxis == 0 {
            None
        } else {
            Some(total_carpools as f64 / total_taxis as f64)
        };
        let miles_reduction = car_reduction_ratio.map(|r| r * total_distance).unwrap_or(0.0);
        let co2_reduction_tons = miles_reduction * config.co2_grams_per_mile / config.grams_per_ton;
        let mean_passengers_per_taxi = if total_taxis == 0 {
            None
        } else {
            Some(total_passengers as f64 / total_taxis as f64)
        };

        CorridorSummary {
            group: String::from(group),
            total_taxis,
            total_carpools,
            car_reduction_ratio,
            miles_reduction,
            co2_reduction_tons,
            total_fare,
            mean_passengers_per_taxi,
        }
    }
}

fn ratio_or_undefined(value: &Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => String::from("undefined"),
    }
}

impl Display for CorridorSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Total Taxi Count: {}", self.total_taxis)?;
        writeln!(f, "Total Carpool Count: {}", self.total_carpools)?;
        writeln!(
            f,
            "Car Reduction Ratio: {}",
            ratio_or_undefined(&self.car_reduction_ratio)
        )?;
        writeln!(f, "Mile Reduction: {:.2}", self.miles_reduction)?;
        writeln!(f, "CO2 Reduction (Tons): {:.2}", self.co2_reduction_tons)?;
        writeln!(f, "Total Fare: {:.2}", self.total_fare)?;
        write!(
            f,
            "Mean Passengers Per Taxi: {}",
            ratio_or_undefined(&self.mean_passengers_per_taxi)
        )
    }
}
