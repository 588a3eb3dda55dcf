//! Document commands

use crate::output::{emit, heading, print_table, submitted_badge, DocumentRow};
use crate::{CliError, CliResult, Context, KeyArgs};
use clap::Subcommand;
use colored::Colorize;
use serde::Serialize;
use shiptrack_intake::FileIntake;
use shiptrack_tracker::TrackerError;
use shiptrack_types::DocumentReference;
use std::path::PathBuf;
use tabled::Tabled;
use tracing::warn;

/// Document subcommands
#[derive(Subcommand)]
pub enum DocCommands {
    /// Upload a document file
    Upload {
        #[command(flatten)]
        key: KeyArgs,

        /// Document name as listed in the taxonomy
        #[arg(long)]
        document: String,

        /// Phase the document belongs to (defaults to the only phase)
        #[arg(long)]
        phase: Option<String>,

        /// File to upload
        #[arg(long)]
        file: PathBuf,
    },

    /// Show uploaded and missing documents
    Status {
        #[command(flatten)]
        key: KeyArgs,
    },

    /// List missing documents only
    Missing {
        #[command(flatten)]
        key: KeyArgs,
    },

    /// List keys with any uploads or submissions
    Keys,
}

#[derive(Serialize)]
struct UploadOutcome {
    key: String,
    phase: String,
    document: String,
    reference: DocumentReference,
    stored_at: PathBuf,
    replaced: Option<DocumentReference>,
}

/// Table row for a missing document
#[derive(Debug, Tabled)]
struct MissingRow {
    #[tabled(rename = "Phase")]
    phase: String,
    #[tabled(rename = "Document")]
    document: String,
}

/// Table row for a tracked key
#[derive(Debug, Tabled)]
struct KeyRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Uploaded")]
    present: usize,
    #[tabled(rename = "Fully Submitted")]
    fully_submitted: bool,
}

/// Execute document command
pub fn execute(command: DocCommands, ctx: &Context) -> CliResult<()> {
    match command {
        DocCommands::Upload {
            key,
            document,
            phase,
            file,
        } => {
            let key = key.resolve()?;
            let phase = resolve_phase(ctx, phase, &document)?;

            // reject before writing bytes nobody will reference
            if !ctx.tracker.taxonomy().contains(&phase, &document) {
                return Err(TrackerError::UnknownDocument { phase, document }.into());
            }

            let bytes = std::fs::read(&file)?;
            let original_filename = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .ok_or_else(|| CliError::InvalidArgument(format!("not a file: {}", file.display())))?;

            let stored = ctx
                .intake
                .store(&key, &phase, &document, &bytes, &original_filename)?;
            let replaced = match ctx.tracker.record_upload(
                &key,
                &phase,
                &document,
                stored.reference.clone(),
            ) {
                Ok(replaced) => replaced,
                Err(e) => {
                    // nothing references the stored bytes
                    if let Err(rm) = std::fs::remove_file(&stored.path) {
                        warn!(path = %stored.path.display(), error = %rm, "could not remove unrecorded upload");
                    }
                    return Err(e.into());
                }
            };

            let outcome = UploadOutcome {
                key: key.to_string(),
                phase,
                document,
                reference: stored.reference,
                stored_at: stored.path,
                replaced,
            };
            emit(ctx.output, &outcome, || {
                println!(
                    "{} {} uploaded for {}{}.",
                    "✓".green(),
                    outcome.document.bold(),
                    outcome.key.bold(),
                    if outcome.replaced.is_some() {
                        " (replaced earlier upload)"
                    } else {
                        ""
                    }
                );
            })
        }

        DocCommands::Status { key } => {
            let key = key.resolve()?;
            let status = ctx.tracker.status_for(&key);
            emit(ctx.output, &status, || {
                heading(&format!("Documents for {}", status.key));
                print_table(DocumentRow::from_status(&status));
                println!();
                for phase in &status.phases {
                    println!("  {}: {}", phase.name.bold(), submitted_badge(phase.submitted));
                }
                println!("{}/{} uploaded", status.present_count(), status.total());
            })
        }

        DocCommands::Missing { key } => {
            let key = key.resolve()?;
            let missing = ctx.tracker.missing_documents(&key);
            emit(ctx.output, &missing, || {
                if missing.is_empty() {
                    println!("{}", "All required documents uploaded.".green());
                    return;
                }
                print_table(
                    missing
                        .iter()
                        .map(|m| MissingRow {
                            phase: m.phase.clone(),
                            document: m.document.clone(),
                        })
                        .collect(),
                );
            })
        }

        DocCommands::Keys => {
            let keys = ctx.tracker.tracked_keys();
            emit(ctx.output, &keys, || {
                print_table(
                    keys.iter()
                        .map(|key| KeyRow {
                            key: key.to_string(),
                            present: ctx.tracker.status_for(key).present_count(),
                            fully_submitted: ctx.tracker.is_fully_submitted(key),
                        })
                        .collect(),
                );
            })
        }
    }
}

/// Explicit phase, or the only phase of a flat taxonomy, or the single
/// phase requiring `document`.
pub(crate) fn resolve_phase(ctx: &Context, phase: Option<String>, document: &str) -> CliResult<String> {
    if let Some(phase) = phase {
        return Ok(phase);
    }
    let taxonomy = ctx.tracker.taxonomy();
    if let Some(only) = taxonomy.sole_phase() {
        return Ok(only.name.clone());
    }
    let candidates: Vec<_> = taxonomy.phases_requiring(document).collect();
    match candidates.as_slice() {
        [one] => Ok(one.name.clone()),
        [] => Err(TrackerError::UnknownDocument {
            phase: "<any>".into(),
            document: document.to_string(),
        }
        .into()),
        _ => Err(CliError::InvalidArgument(format!(
            "'{}' appears in several phases; pass --phase",
            document
        ))),
    }
}
