//! Per-invocation context.
//!
//! Everything a command needs is opened once per run and passed down
//! explicitly; nothing lives in process-wide state.

use crate::config::TrackerConfig;
use crate::output::OutputFormat;
use crate::CliResult;
use shiptrack_intake::LocalFileIntake;
use shiptrack_shipments::ShipmentRegistry;
use shiptrack_store::JsonFileStore;
use shiptrack_tracker::DocumentTracker;
use tracing::debug;

/// Handles opened for one CLI invocation.
pub struct Context {
    pub config: TrackerConfig,
    pub output: OutputFormat,
    pub tracker: DocumentTracker<JsonFileStore>,
    pub shipments: ShipmentRegistry<JsonFileStore>,
    pub intake: LocalFileIntake,
}

impl Context {
    pub fn open(config: TrackerConfig, output: OutputFormat) -> CliResult<Self> {
        let taxonomy = config.taxonomy()?;
        debug!(
            data_file = %config.data_file.display(),
            shipments_file = %config.shipments_file.display(),
            upload_dir = %config.upload_dir.display(),
            phases = taxonomy.phases().len(),
            "opening shiptrack context"
        );

        Ok(Self {
            tracker: DocumentTracker::new(taxonomy, JsonFileStore::new(&config.data_file)),
            shipments: ShipmentRegistry::new(JsonFileStore::new(&config.shipments_file)),
            intake: LocalFileIntake::with_extensions(&config.upload_dir, &config.allowed_extensions),
            output,
            config,
        })
    }
}
