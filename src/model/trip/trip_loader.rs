use std::path::Path;

use rayon::prelude::*;

use super::{LabeledTrip, TripRecord, TripSchema};
use crate::model::corridor::Corridor;
use crate::model::zone::ZoneResolver;
use crate::model::{AnalysisConfig, TaxipoolError};

/// reads raw trip files, reverse-geocodes both endpoints of every row, and
/// keeps only the rows matching at least one corridor predicate.
pub struct TripLoader<'a> {
    resolver: &'a ZoneResolver,
    config: &'a AnalysisConfig,
}

impl<'a> TripLoader<'a> {
    pub fn new(resolver: &'a ZoneResolver, config: &'a AnalysisConfig) -> TripLoader<'a> {
        TripLoader { resolver, config }
    }

    /// loads one trip file. when no schema is supplied it is inferred from
    /// the filename, failing loudly for unrecognized names. malformed rows
    /// are dropped and counted; the file continues.
    pub fn load_file(
        &self,
        path: &Path,
        schema: Option<TripSchema>,
    ) -> Result<Vec<LabeledTrip>, TaxipoolError> {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let schema = match schema {
            Some(s) => s,
            None => TripSchema::for_filename(&filename)?,
        };
        let layout = schema.columns();

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)?;
        let rows: Vec<csv::StringRecord> = reader.records().collect::<Result<Vec<_>, _>>()?;

        // fares for the pre-2015 layout come from the companion fare file,
        // inner-joined by row order
        let fares: Option<Vec<Option<f64>>> = match schema.fare_file_for(path) {
            None => None,
            Some(fare_path) => {
                if !fare_path.is_file() {
                    return Err(TaxipoolError::MissingFareFileError(
                        filename,
                        fare_path.to_string_lossy().to_string(),
                    ));
                }
                Some(read_fare_amounts(&fare_path)?)
            }
        };
        let joined_fare = |idx: usize| -> Option<f64> {
            match &fares {
                None => None,
                Some(amounts) => amounts.get(idx).copied().flatten(),
            }
        };

        let total_rows = rows.len();
        let labeled: Vec<LabeledTrip> = rows
            .par_iter()
            .enumerate()
            .filter_map(|(idx, row)| {
                let record = TripRecord::parse(row, &layout, joined_fare(idx))?;
                let trip = self.label(record);
                if Corridor::matches_any(&trip, self.config) {
                    Some(trip)
                } else {
                    None
                }
            })
            .collect();
        log::info!(
            "{}: kept {} of {} rows after geocoding and corridor filtering",
            filename,
            labeled.len(),
            total_rows
        );
        Ok(labeled)
    }

    fn label(&self, record: TripRecord) -> LabeledTrip {
        let pickup = self
            .resolver
            .resolve(record.pickup_longitude, record.pickup_latitude);
        let dropoff = self
            .resolver
            .resolve(record.dropoff_longitude, record.dropoff_latitude);
        LabeledTrip {
            record,
            pickup,
            dropoff,
        }
    }
}

/// reads the fare_amount column of a companion fare file, positionally.
/// unparseable amounts are kept as None so that row order stays aligned with
/// the trip file.
fn read_fare_amounts(path: &Path) -> Result<Vec<Option<f64>>, TaxipoolError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let mut amounts = vec![];
    for row in reader.records() {
        let row = row?;
        let amount = row
            .get(TripSchema::FARE_FILE_AMOUNT_COLUMN)
            .and_then(|s| s.trim().parse::<f64>().ok());
        amounts.push(amount);
    }
    Ok(amounts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::zone::{LayerCrs, ZoneFeature, ZoneLayer, ZoneLookup, ZoneResolver};
    use crate::model::CityBounds;
    use geo::polygon;
    use std::io::Write;

    /// two square zones: Astoria around (-73.92, 40.77) and Midtown Center
    /// around (-73.98, 40.755)
    fn test_resolver() -> ZoneResolver {
        let astoria = polygon![
            (x: -73.94, y: 40.75),
            (x: -73.90, y: 40.75),
            (x: -73.90, y: 40.79),
            (x: -73.94, y: 40.79),
            (x: -73.94, y: 40.75),
        ];
        let midtown = polygon![
            (x: -74.00, y: 40.74),
            (x: -73.96, y: 40.74),
            (x: -73.96, y: 40.77),
            (x: -74.00, y: 40.77),
            (x: -74.00, y: 40.74),
        ];
        let features = vec![
            ZoneFeature::new(7, geo::MultiPolygon(vec![astoria])).unwrap(),
            ZoneFeature::new(161, geo::MultiPolygon(vec![midtown])).unwrap(),
        ];
        let lookup_csv = "\
LocationID,Borough,Zone,service_zone
7,Queens,Astoria,Boro Zone
161,Manhattan,Midtown Center,Yellow Zone
";
        let dir = std::env::temp_dir().join("taxipool_loader_test");
        std::fs::create_dir_all(&dir).unwrap();
        let lookup_path = dir.join("zone_lookup.csv");
        std::fs::write(&lookup_path, lookup_csv).unwrap();
        let lookup = ZoneLookup::from_file(&lookup_path).unwrap();
        ZoneResolver::new(
            ZoneLayer::from_features(features),
            lookup,
            CityBounds::default(),
            LayerCrs::Wgs84,
        )
    }

    fn write_yellow_file(dir: &Path, name: &str, rows: &[&str]) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "VendorID,tpep_pickup_datetime,tpep_dropoff_datetime,passenger_count,trip_distance,pickup_longitude,pickup_latitude,RatecodeID,store_and_fwd_flag,dropoff_longitude,dropoff_latitude,payment_type,fare_amount,extra,mta_tax,tip_amount,tolls_amount,improvement_surcharge,total_amount").unwrap();
        for row in rows {
            writeln!(file, "{row}").unwrap();
        }
        path
    }

    #[test]
    fn test_load_filters_to_corridors_and_drops_malformed() {
        let resolver = test_resolver();
        let config = AnalysisConfig::default();
        let loader = TripLoader::new(&resolver, &config);
        let dir = std::env::temp_dir().join("taxipool_loader_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = write_yellow_file(
            &dir,
            "yellow_tripdata_test.csv",
            &[
                // Astoria -> Midtown Center (Manhattan): kept
                "2,2016-01-04 08:00:00,2016-01-04 08:20:00,2,3.1,-73.92,40.77,1,N,-73.98,40.75,1,13.5,0,0.5,0,0,0.3,14.3",
                // malformed passenger count: dropped, file continues
                "2,2016-01-04 08:01:00,2016-01-04 08:21:00,x,3.1,-73.92,40.77,1,N,-73.98,40.75,1,13.5,0,0.5,0,0,0.3,14.3",
                // outside every zone: unresolved endpoints, no corridor match
                "2,2016-01-04 08:02:00,2016-01-04 08:22:00,1,8.0,-74.20,40.60,1,N,-74.21,40.61,1,33.0,0,0.5,0,0,0.3,33.8",
            ],
        );
        let trips = loader.load_file(&path, None).unwrap();
        assert_eq!(trips.len(), 1);
        assert!(trips[0].pickup.zone_is("Astoria"));
        assert!(trips[0].dropoff.borough_is("Manhattan"));
    }

    #[test]
    fn test_unknown_filename_fails() {
        let resolver = test_resolver();
        let config = AnalysisConfig::default();
        let loader = TripLoader::new(&resolver, &config);
        let dir = std::env::temp_dir().join("taxipool_loader_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("mystery_cab.csv");
        std::fs::write(&path, "a,b,c\n1,2,3\n").unwrap();
        let result = loader.load_file(&path, None);
        assert!(matches!(result, Err(TaxipoolError::UnknownSchemaError(_))));
    }
}
