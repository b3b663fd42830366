use std::path::Path;

use serde::{Deserialize, Serialize};

use super::zone::LayerCrs;
use super::TaxipoolError;

/// all tunable values of the carpool analysis, threaded into each pipeline
/// stage at construction so that no stage depends on ambient constants.
///
/// the defaults reproduce the published study parameters: region membership
/// from the nyc.gov taxi zoning, the EPA light-duty emission factor of
/// 411 g CO2 per mile, and a carpool goal of 3 passengers per vehicle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// zone names comprising the Astoria region of interest
    pub astoria: Vec<String>,
    /// zone names comprising the Midtown region of interest
    pub midtown: Vec<String>,
    /// zone names comprising the Upper East Side region of interest
    pub upper_east_side: Vec<String>,
    /// zone name of the airport corridor endpoint
    pub airport_zone: String,
    /// borough name used by the Manhattan-wide corridor predicates
    pub manhattan_borough: String,
    /// lower cut-off latitude for Manhattan destinations whose route from the
    /// airport crosses the Queensboro or RFK bridge and so passes near Astoria
    pub upper_manhattan_lat: f64,
    /// outermost lon/lat extent of the metro area, used to reject points
    /// before any geometry work
    pub bounds: CityBounds,
    /// coordinate system of the zone polygon layer
    pub layer_crs: LayerCrs,
    /// target number of passengers per shared vehicle
    pub carpool_goal: u32,
    /// width in minutes of the time-of-week aggregation intervals
    pub interval_week_minutes: u32,
    /// mean drive time estimate in minutes from LaGuardia to Astoria
    pub lga_to_astoria_minutes: i64,
    /// mean drive time estimate in minutes from upper Manhattan to LaGuardia
    pub upper_manhattan_to_lga_minutes: i64,
    /// zone that airport pass-through legs are relabeled to when merged into
    /// the Astoria carpool pool
    pub airport_merge_zone: String,
    /// borough of the airport merge zone
    pub airport_merge_borough: String,
    /// grams of CO2 emitted per driven mile (EPA estimate)
    pub co2_grams_per_mile: f64,
    /// grams per short ton, for reporting CO2 reduction in tons
    pub grams_per_ton: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            astoria: vec![String::from("Astoria"), String::from("Astoria Park")],
            midtown: vec![
                String::from("Midtown Center"),
                String::from("Midtown North"),
                String::from("Midtown South"),
                String::from("Midtown East"),
            ],
            upper_east_side: vec![
                String::from("Upper East Side North"),
                String::from("Upper East Side South"),
            ],
            airport_zone: String::from("LaGuardia Airport"),
            manhattan_borough: String::from("Manhattan"),
            upper_manhattan_lat: 40.76,
            bounds: CityBounds::default(),
            layer_crs: LayerCrs::default(),
            carpool_goal: 3,
            interval_week_minutes: 15,
            lga_to_astoria_minutes: 20,
            upper_manhattan_to_lga_minutes: 30,
            airport_merge_zone: String::from("Astoria"),
            airport_merge_borough: String::from("Queens"),
            co2_grams_per_mile: 411.0,
            grams_per_ton: 907_185.0,
        }
    }
}

impl AnalysisConfig {
    /// reads a configuration from a TOML file, falling back to the defaults
    /// for any keys not present.
    pub fn from_file(path: &Path) -> Result<Self, TaxipoolError> {
        let conf: AnalysisConfig = config::Config::builder()
            .add_source(config::File::from(path))
            .build()?
            .try_deserialize()?;
        conf.validate()?;
        Ok(conf)
    }

    pub fn validate(&self) -> Result<(), TaxipoolError> {
        if self.carpool_goal == 0 {
            return Err(TaxipoolError::InvalidConfigurationError(String::from(
                "carpool_goal must be at least 1",
            )));
        }
        if self.interval_week_minutes == 0 || self.interval_week_minutes > 7 * 24 * 60 {
            return Err(TaxipoolError::InvalidConfigurationError(format!(
                "interval_week_minutes must be in [1, {}], found {}",
                7 * 24 * 60,
                self.interval_week_minutes
            )));
        }
        Ok(())
    }
}

/// outermost bounding box of the metro area in WGS84 decimal degrees.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CityBounds {
    pub north: f64,
    pub south: f64,
    pub west: f64,
    pub east: f64,
}

impl Default for CityBounds {
    /// the outermost bounds of New York City
    fn default() -> Self {
        Self {
            north: 40.92,
            south: 40.49,
            west: -74.26,
            east: -73.69,
        }
    }
}

impl CityBounds {
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        self.west <= lon && lon <= self.east && self.south <= lat && lat <= self.north
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let conf = AnalysisConfig::default();
        assert!(conf.validate().is_ok());
    }

    #[test]
    fn test_zero_carpool_goal_rejected() {
        let conf = AnalysisConfig {
            carpool_goal: 0,
            ..Default::default()
        };
        assert!(conf.validate().is_err());
    }

    #[test]
    fn test_oversized_interval_rejected() {
        let conf = AnalysisConfig {
            interval_week_minutes: 20_000,
            ..Default::default()
        };
        assert!(conf.validate().is_err());
    }

    #[test]
    fn test_bounds_contains() {
        let bounds = CityBounds::default();
        assert!(bounds.contains(-73.95, 40.75));
        assert!(!bounds.contains(-87.63, 41.88));
        assert!(!bounds.contains(-73.95, 41.88));
    }
}
