use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use super::{interval_index, week_minutes, week_start, BucketKey, CorridorBucket};
use crate::model::carpool::estimate_carpools;
use crate::model::trip::LabeledTrip;
use crate::model::{AnalysisConfig, TaxipoolError};

/// groups trips by (pickup zone, dropoff zone, week, time-of-week interval),
/// sums their numeric columns, and derives each bucket's carpool estimate.
pub fn aggregate(
    trips: &[LabeledTrip],
    config: &AnalysisConfig,
) -> BTreeMap<BucketKey, CorridorBucket> {
    let mut buckets: BTreeMap<BucketKey, CorridorBucket> = BTreeMap::new();
    for trip in trips {
        let t = &trip.record.pickup_datetime;
        let key = BucketKey {
            pickup_neighborhood: String::from(trip.pickup.zone_or_na()),
            dropoff_neighborhood: String::from(trip.dropoff.zone_or_na()),
            week_start: week_start(t),
            interval: interval_index(week_minutes(t), config.interval_week_minutes),
        };
        buckets.entry(key).or_default().add_trip(
            trip.record.passenger_count,
            trip.record.trip_distance,
            trip.record.fare_amount,
        );
    }
    for bucket in buckets.values_mut() {
        bucket.carpool_count =
            estimate_carpools(bucket.taxi_count, bucket.passenger_count, config.carpool_goal);
    }
    buckets
}

/// one line of the serialized aggregate output
#[derive(Debug, Serialize)]
struct AggregateRow<'a> {
    #[serde(flatten)]
    key: &'a BucketKey,
    #[serde(flatten)]
    bucket: &'a CorridorBucket,
}

/// writes an aggregate as a JSON array of flattened bucket rows.
pub fn write_aggregate(
    path: &Path,
    buckets: &BTreeMap<BucketKey, CorridorBucket>,
) -> Result<(), TaxipoolError> {
    let rows: Vec<AggregateRow> = buckets
        .iter()
        .map(|(key, bucket)| AggregateRow { key, bucket })
        .collect();
    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(std::io::BufWriter::new(file), &rows)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::trip::TripRecord;
    use crate::model::zone::ZoneLabel;
    use chrono::NaiveDate;

    fn astoria_midtown_trip(minute: u32, passengers: u32) -> LabeledTrip {
        let t = NaiveDate::from_ymd_opt(2016, 1, 4)
            .unwrap()
            .and_hms_opt(8, minute, 0)
            .unwrap();
        LabeledTrip {
            record: TripRecord {
                pickup_datetime: t,
                dropoff_datetime: t + chrono::Duration::minutes(20),
                pickup_longitude: -73.92,
                pickup_latitude: 40.77,
                dropoff_longitude: -73.98,
                dropoff_latitude: 40.75,
                passenger_count: passengers,
                trip_distance: 3.0,
                fare_amount: 12.0,
            },
            pickup: ZoneLabel::resolved("Queens", "Astoria"),
            dropoff: ZoneLabel::resolved("Manhattan", "Midtown Center"),
        }
    }

    #[test]
    fn test_single_trip_bucket() {
        let config = AnalysisConfig::default();
        let trips = vec![astoria_midtown_trip(7, 2)];
        let buckets = aggregate(&trips, &config);
        assert_eq!(buckets.len(), 1);
        let (key, bucket) = buckets.iter().next().unwrap();
        assert_eq!(key.pickup_neighborhood, "Astoria");
        assert_eq!(key.dropoff_neighborhood, "Midtown Center");
        assert_eq!(key.week_start, NaiveDate::from_ymd_opt(2016, 1, 4).unwrap());
        // Monday 08:07 = minute 487 of the week, interval 32 at 15-minute width
        assert_eq!(key.interval, 32);
        assert_eq!(bucket.taxi_count, 1);
        assert_eq!(bucket.passenger_count, 2);
        assert_eq!(bucket.carpool_count, 1);
    }

    #[test]
    fn test_trips_split_across_intervals() {
        let config = AnalysisConfig::default();
        // 08:07 and 08:08 share an interval; 08:16 starts the next
        let trips = vec![
            astoria_midtown_trip(7, 1),
            astoria_midtown_trip(8, 1),
            astoria_midtown_trip(16, 1),
        ];
        let buckets = aggregate(&trips, &config);
        assert_eq!(buckets.len(), 2);
        let counts: Vec<u64> = buckets.values().map(|b| b.taxi_count).collect();
        assert_eq!(counts, vec![2, 1]);
    }

    #[test]
    fn test_ten_trip_consolidation_scenario() {
        // ten trips in one 15-minute interval carrying 25 passengers at a
        // carpool goal of 3 consolidate into floor(25/3) = 8 vehicles
        let config = AnalysisConfig::default();
        let mut trips: Vec<LabeledTrip> = (0..5).map(|i| astoria_midtown_trip(i, 3)).collect();
        trips.extend((0..5).map(|i| astoria_midtown_trip(i, 2)));
        let buckets = aggregate(&trips, &config);
        assert_eq!(buckets.len(), 1);
        let bucket = buckets.values().next().unwrap();
        assert_eq!(bucket.taxi_count, 10);
        assert_eq!(bucket.passenger_count, 25);
        assert_eq!(bucket.carpool_count, 8);
    }

    #[test]
    fn test_group_selection_through_summary() {
        use crate::model::corridor::CorridorGroup;
        use crate::model::report::CorridorSummary;

        let config = AnalysisConfig::default();
        let mut trips: Vec<LabeledTrip> = (0..5).map(|i| astoria_midtown_trip(i, 3)).collect();
        trips.extend((0..5).map(|i| astoria_midtown_trip(i, 2)));

        let selected = CorridorGroup::AstoriaToManhattan.select(&trips, &config);
        assert_eq!(selected.len(), 10);
        let buckets = aggregate(&selected, &config);
        let summary = CorridorSummary::from_buckets("AM", &buckets, &config);
        assert_eq!(summary.total_taxis, 10);
        assert_eq!(summary.total_carpools, 8);
        assert_eq!(summary.car_reduction_ratio, Some(0.8));
    }
}
