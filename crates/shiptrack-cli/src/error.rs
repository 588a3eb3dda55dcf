//! CLI error types

use thiserror::Error;

/// CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Taxonomy error: {0}")]
    Taxonomy(#[from] shiptrack_types::TaxonomyError),

    #[error(transparent)]
    Key(#[from] shiptrack_types::InvalidKey),

    #[error("Tracker error: {0}")]
    Tracker(#[from] shiptrack_tracker::TrackerError),

    #[error("Shipment error: {0}")]
    Shipment(#[from] shiptrack_shipments::ShipmentError),

    #[error("Upload error: {0}")]
    Intake(#[from] shiptrack_intake::IntakeError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
