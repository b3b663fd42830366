#[derive(thiserror::Error, Debug)]
pub enum TaxipoolError {
    #[error("failure reading file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("failure processing CSV data: {0}")]
    CsvError(#[from] csv::Error),
    #[error("failure reading configuration: {0}")]
    ConfigError(#[from] config::ConfigError),
    #[error("failure serializing output: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("failed reading zone layer '{path}': {message}")]
    ZoneLayerError { path: String, message: String },
    #[error("cannot determine trip schema for '{0}': filename has no 'yellow' or 'green' tag and no --schema argument was provided")]
    UnknownSchemaError(String),
    #[error("trip file '{0}' uses the pre-2015 schema but its companion fare file '{1}' was not found")]
    MissingFareFileError(String, String),
    #[error("invalid configuration: {0}")]
    InvalidConfigurationError(String),
    #[error("{0}")]
    OtherError(String),
}
