//! Configuration for the shiptrack CLI

use serde::{Deserialize, Serialize};
use shiptrack_intake::DEFAULT_EXTENSIONS;
use shiptrack_types::{DocumentTaxonomy, Phase, TaxonomyResult};
use std::path::{Path, PathBuf};

/// Environment variable prefix, e.g. `SHIPTRACK_DATA_FILE`.
pub const ENV_PREFIX: &str = "SHIPTRACK";

/// Main CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Tracker store (document references and phase submissions)
    pub data_file: PathBuf,

    /// Shipment registry store
    pub shipments_file: PathBuf,

    /// Root directory for uploaded document bytes
    pub upload_dir: PathBuf,

    /// Accepted upload file extensions
    pub allowed_extensions: Vec<String>,

    /// Required documents grouped by phase; the coffee export list when unset
    pub taxonomy: Option<Vec<Phase>>,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("data.json"),
            shipments_file: PathBuf::from("shipments.json"),
            upload_dir: PathBuf::from("uploads"),
            allowed_extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            taxonomy: None,
            logging: LoggingConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,

    /// JSON format
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json: false,
        }
    }
}

impl TrackerConfig {
    /// Load configuration: defaults, then the optional file, then
    /// `SHIPTRACK_*` environment variables (`__` separates nested keys).
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("allowed_extensions")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// The configured taxonomy, validated.
    pub fn taxonomy(&self) -> TaxonomyResult<DocumentTaxonomy> {
        match &self.taxonomy {
            Some(phases) => DocumentTaxonomy::new(phases.clone()),
            None => Ok(DocumentTaxonomy::coffee_export()),
        }
    }
}
