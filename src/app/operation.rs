//! batch operations of the carpool analysis: `extract` reverse-geocodes and
//! filters raw TLC trip files into labeled-trip caches, `analyze` reduces the
//! caches into per-corridor weekly aggregates and prints the consolidation
//! summaries.
use std::path::{Path, PathBuf};

use clap::Subcommand;
use itertools::Itertools;
use kdam::tqdm;
use serde::{Deserialize, Serialize};

use crate::model::aggregate::{aggregate, write_aggregate};
use crate::model::corridor::CorridorGroup;
use crate::model::report::CorridorSummary;
use crate::model::trip::{read_trip_cache, write_trip_cache, TripLoader, TripSchema};
use crate::model::zone::{ZoneLayer, ZoneLookup, ZoneResolver};
use crate::model::{AnalysisConfig, TaxipoolError};

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum TaxipoolOperation {
    /// reverse-geocode raw trip files against the zone layer and cache the
    /// rows matching any corridor predicate
    Extract {
        /// a single trip CSV file or a directory of trip CSV files
        #[arg(long)]
        input: String,
        /// ESRI shapefile with the taxi zone polygons
        #[arg(long)]
        zones_shapefile: String,
        /// CSV table mapping LocationID to (Borough, Zone)
        #[arg(long)]
        zone_lookup: String,
        /// directory receiving one labeled-trip cache per input file
        #[arg(long)]
        output_directory: String,
        /// trip file column layout; inferred from each filename when omitted
        #[arg(long, value_enum)]
        schema: Option<TripSchema>,
        /// optional TOML file overriding the default analysis parameters
        #[arg(long)]
        config: Option<String>,
    },
    /// aggregate labeled-trip caches into per-corridor weekly buckets and
    /// report consolidation potential
    Analyze {
        /// directory of labeled-trip caches produced by extract
        #[arg(long)]
        input: String,
        /// directory receiving one aggregate JSON per corridor group
        #[arg(long)]
        output_directory: String,
        /// optional TOML file overriding the default analysis parameters
        #[arg(long)]
        config: Option<String>,
    },
}

impl TaxipoolOperation {
    pub fn run(&self) -> Result<(), TaxipoolError> {
        match self {
            TaxipoolOperation::Extract {
                input,
                zones_shapefile,
                zone_lookup,
                output_directory,
                schema,
                config,
            } => {
                let config = load_config(config.as_deref())?;
                extract(
                    Path::new(input),
                    Path::new(zones_shapefile),
                    Path::new(zone_lookup),
                    Path::new(output_directory),
                    *schema,
                    &config,
                )
            }
            TaxipoolOperation::Analyze {
                input,
                output_directory,
                config,
            } => {
                let config = load_config(config.as_deref())?;
                analyze(Path::new(input), Path::new(output_directory), &config)
            }
        }
    }
}

fn load_config(path: Option<&str>) -> Result<AnalysisConfig, TaxipoolError> {
    match path {
        Some(p) => AnalysisConfig::from_file(Path::new(p)),
        None => Ok(AnalysisConfig::default()),
    }
}

/// collects the CSV files of a file-or-directory input argument.
fn collect_csv_files(input: &Path) -> Result<Vec<PathBuf>, TaxipoolError> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    let files: Vec<PathBuf> = std::fs::read_dir(input)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().map(|e| e == "csv").unwrap_or(false))
        .sorted()
        .collect();
    Ok(files)
}

fn extract(
    input: &Path,
    zones_shapefile: &Path,
    zone_lookup: &Path,
    output_directory: &Path,
    schema: Option<TripSchema>,
    config: &AnalysisConfig,
) -> Result<(), TaxipoolError> {
    log::info!("loading zone layer from {zones_shapefile:?}");
    let layer = ZoneLayer::from_shapefile(zones_shapefile)?;
    let lookup = ZoneLookup::from_file(zone_lookup)?;
    let resolver = ZoneResolver::new(layer, lookup, config.bounds, config.layer_crs);
    let loader = TripLoader::new(&resolver, config);

    // skip the companion fare files of the pre-2015 layout, they are read
    // alongside their trip file
    let files: Vec<PathBuf> = collect_csv_files(input)?
        .into_iter()
        .filter(|path| {
            !path
                .file_name()
                .map(|n| n.to_string_lossy().contains("trip_fare"))
                .unwrap_or(false)
        })
        .collect();
    if files.is_empty() {
        return Err(TaxipoolError::OtherError(format!(
            "no trip CSV files found at {input:?}"
        )));
    }
    std::fs::create_dir_all(output_directory)?;

    let mut kept = 0;
    let mut failures = vec![];
    let file_iter = tqdm!(files.iter(), total = files.len(), desc = "extract trip files");
    for file in file_iter {
        // one bad file does not abort the batch, but a schema mismatch is
        // reported loudly at the end
        match loader.load_file(file, schema) {
            Ok(trips) => {
                let stem = file
                    .file_stem()
                    .map(|s| s.to_string_lossy().to_string())
                    .unwrap_or_else(|| String::from("trips"));
                let out_path = output_directory.join(format!("{stem}_labeled.csv"));
                write_trip_cache(&out_path, &trips)?;
                kept += trips.len();
            }
            Err(e) => {
                log::error!("failed extracting {file:?}: {e}");
                failures.push(format!("{file:?}: {e}"));
            }
        }
    }
    eprintln!();
    log::info!(
        "extracted {} corridor trips from {} files into {:?}",
        kept,
        files.len(),
        output_directory
    );
    if !failures.is_empty() {
        return Err(TaxipoolError::OtherError(format!(
            "{} of {} files failed extraction: {}",
            failures.len(),
            files.len(),
            failures.join("; ")
        )));
    }
    Ok(())
}

fn analyze(
    input: &Path,
    output_directory: &Path,
    config: &AnalysisConfig,
) -> Result<(), TaxipoolError> {
    let files = collect_csv_files(input)?;
    if files.is_empty() {
        return Err(TaxipoolError::OtherError(format!(
            "no labeled-trip caches found at {input:?}"
        )));
    }
    let mut trips = vec![];
    let file_iter = tqdm!(files.iter(), total = files.len(), desc = "read trip caches");
    for file in file_iter {
        trips.extend(read_trip_cache(file)?);
    }
    eprintln!();
    log::info!("analyzing {} labeled trips from {} caches", trips.len(), files.len());
    std::fs::create_dir_all(output_directory)?;

    let mut summaries = vec![];
    for group in CorridorGroup::ALL {
        log::info!("analyzing corridor group {}", group.key());
        let selected = group.select(&trips, config);
        let buckets = aggregate(&selected, config);
        write_aggregate(&output_directory.join(format!("{}.json", group.key())), &buckets)?;
        summaries.push(CorridorSummary::from_buckets(group.key(), &buckets, config));
    }

    let summary_file = std::fs::File::create(output_directory.join("summary.json"))?;
    serde_json::to_writer_pretty(std::io::BufWriter::new(summary_file), &summaries)?;

    for summary in &summaries {
        println!("\n{}\n{}", summary.group, summary);
    }
    Ok(())
}
