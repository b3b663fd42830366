use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::model::TaxipoolError;

/// one row in the taxi zone lookup table published alongside the zone
/// shapefile, keyed by the same LocationID carried on each polygon.
#[derive(Debug, Clone, Deserialize)]
pub struct ZoneLookupRow {
    #[serde(rename = "LocationID")]
    pub location_id: u32,
    #[serde(rename = "Borough")]
    pub borough: String,
    #[serde(rename = "Zone")]
    pub zone: String,
}

/// maps integer zone ids to (borough, zone name) pairs.
#[derive(Debug, Clone, Default)]
pub struct ZoneLookup {
    entries: HashMap<u32, (String, String)>,
}

impl ZoneLookup {
    pub fn from_file(path: &Path) -> Result<ZoneLookup, TaxipoolError> {
        let mut reader = csv::Reader::from_path(path)?;
        let mut entries: HashMap<u32, (String, String)> = HashMap::new();
        for row in reader.deserialize() {
            let row: ZoneLookupRow = row?;
            entries.insert(row.location_id, (row.borough, row.zone));
        }
        log::debug!("loaded {} zone lookup entries from {:?}", entries.len(), path);
        Ok(ZoneLookup { entries })
    }

    pub fn from_rows(rows: Vec<ZoneLookupRow>) -> ZoneLookup {
        let entries = rows
            .into_iter()
            .map(|r| (r.location_id, (r.borough, r.zone)))
            .collect();
        ZoneLookup { entries }
    }

    pub fn get(&self, location_id: u32) -> Option<&(String, String)> {
        self.entries.get(&location_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
