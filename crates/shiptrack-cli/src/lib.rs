//! Shiptrack CLI - terminal front end for the coffee export document tracker
//!
//! This CLI lets exporters:
//! - Register shipments and update their status
//! - Upload documents against a shipment (or organization member)
//! - See which required documents are uploaded and which are missing
//! - Submit phases once they are ready
//! - Import upload directories written by the earlier tool

use clap::{Args, Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
pub mod config;
mod context;
mod error;
mod output;

use commands::{doc, import, phase, shipment};
pub use crate::config::TrackerConfig;
pub use context::Context;
pub use error::{CliError, CliResult};
use shiptrack_types::SubmissionKey;

/// Shiptrack CLI application
#[derive(Parser)]
#[command(name = "shiptrack")]
#[command(about = "Shiptrack - coffee export shipment and document tracker", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "SHIPTRACK_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Output format (table, json, yaml)
    #[arg(short, long, default_value = "table", global = true)]
    output: output::OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Register and inspect shipments
    Shipment {
        #[command(subcommand)]
        command: shipment::ShipmentCommands,
    },

    /// Upload documents and check their status
    Doc {
        #[command(subcommand)]
        command: doc::DocCommands,
    },

    /// Submit phases and check submission status
    Phase {
        #[command(subcommand)]
        command: phase::PhaseCommands,
    },

    /// Show the required-document taxonomy
    Taxonomy,

    /// Import an upload directory written by the earlier tool
    ImportLegacy(import::ImportArgs),
}

/// Which tracked entity a command applies to: a plain key (usually the
/// shipment id) or an organization member.
#[derive(Args, Debug, Clone)]
pub struct KeyArgs {
    /// Submission key (shipment id)
    #[arg(required_unless_present = "org")]
    key: Option<String>,

    /// Organization, together with --user
    #[arg(long, requires = "user", conflicts_with = "key")]
    org: Option<String>,

    /// User within --org
    #[arg(long, requires = "org")]
    user: Option<String>,
}

impl KeyArgs {
    pub(crate) fn resolve(&self) -> CliResult<SubmissionKey> {
        match (&self.key, &self.org, &self.user) {
            (Some(key), _, _) => Ok(SubmissionKey::new(key)?),
            (None, Some(org), Some(user)) => Ok(SubmissionKey::member(org, user)?),
            _ => Err(CliError::InvalidArgument(
                "give a key, or both --org and --user".into(),
            )),
        }
    }
}

/// Run using the current process arguments.
pub fn run() -> CliResult<()> {
    run_with_args(std::env::args_os())
}

/// Run using the provided argument iterator.
pub fn run_with_args<I, T>(args: I) -> CliResult<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    let config = TrackerConfig::load(cli.config.as_deref())?;

    // Initialize tracing
    let filter = if cli.verbose {
        "debug".to_string()
    } else {
        config.logging.level.clone()
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| filter.into());
    // try_init: a subscriber may already be installed when called in-process
    if cli.log_json || config.logging.json {
        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init();
    } else {
        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .without_time()
                    .with_writer(std::io::stderr),
            )
            .try_init();
    }

    let ctx = Context::open(config, cli.output)?;

    // Execute command
    match cli.command {
        Commands::Shipment { command } => shipment::execute(command, &ctx),
        Commands::Doc { command } => doc::execute(command, &ctx),
        Commands::Phase { command } => phase::execute(command, &ctx),
        Commands::Taxonomy => commands::show_taxonomy(&ctx),
        Commands::ImportLegacy(args) => import::execute(args, &ctx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn key_args_resolve_member_keys() {
        let args = KeyArgs {
            key: None,
            org: Some("acme".into()),
            user: Some("alice".into()),
        };
        assert_eq!(args.resolve().unwrap().as_str(), "acme/alice");

        let args = KeyArgs {
            key: Some("SHP-001".into()),
            org: None,
            user: None,
        };
        assert_eq!(args.resolve().unwrap().as_str(), "SHP-001");

        let args = KeyArgs {
            key: None,
            org: None,
            user: None,
        };
        assert!(args.resolve().is_err());
    }
}
