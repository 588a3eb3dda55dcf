//! Legacy upload directory import

use crate::output::{emit, heading, print_table};
use crate::{CliResult, Context};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use shiptrack_intake::{scan_legacy_uploads, stored_document_stem};
use shiptrack_types::{DocumentReference, SubmissionKey};
use std::collections::BTreeSet;
use std::path::PathBuf;
use tabled::Tabled;
use tracing::warn;

/// Arguments for `import-legacy`
#[derive(Args)]
pub struct ImportArgs {
    /// Upload root holding one directory per shipment
    dir: PathBuf,

    /// Report what would be imported without recording anything
    #[arg(long)]
    dry_run: bool,
}

#[derive(Debug, Clone, Serialize, Tabled)]
struct ImportedDocument {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Phase")]
    phase: String,
    #[tabled(rename = "Document")]
    document: String,
    #[tabled(rename = "File")]
    filename: String,
}

#[derive(Serialize)]
struct SkippedFile {
    path: PathBuf,
    reason: String,
}

#[derive(Debug, Tabled)]
struct SkippedRow {
    #[tabled(rename = "Skipped File")]
    path: String,
    #[tabled(rename = "Reason")]
    reason: String,
}

/// A required document still absent after the import, with the file name
/// the legacy layout expects for it.
#[derive(Debug, Clone, Serialize, Tabled)]
struct StillMissing {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Document")]
    document: String,
    #[tabled(rename = "Expected File")]
    legacy_name: String,
}

#[derive(Serialize, Default)]
struct ImportReport {
    dry_run: bool,
    imported: Vec<ImportedDocument>,
    skipped: Vec<SkippedFile>,
    still_missing: Vec<StillMissing>,
}

/// Execute import command
pub fn execute(args: ImportArgs, ctx: &Context) -> CliResult<()> {
    let uploads = scan_legacy_uploads(&args.dir)?;
    let taxonomy = ctx.tracker.taxonomy();
    let mut report = ImportReport {
        dry_run: args.dry_run,
        ..Default::default()
    };

    for upload in uploads {
        let key = match SubmissionKey::shipment(&upload.shipment_id) {
            Ok(key) => key,
            Err(e) => {
                report.skipped.push(SkippedFile {
                    path: upload.path,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let Some(phase) = taxonomy.phases_requiring(&upload.document).next() else {
            warn!(document = %upload.document, path = %upload.path.display(), "legacy upload matches no required document");
            report.skipped.push(SkippedFile {
                path: upload.path,
                reason: format!("'{}' is not a required document", upload.document),
            });
            continue;
        };

        if !args.dry_run {
            let reference = DocumentReference::new(upload.filename.clone(), upload.modified_at);
            ctx.tracker
                .record_upload(&key, &phase.name, &upload.document, reference)?;
        }
        report.imported.push(ImportedDocument {
            key: key.to_string(),
            phase: phase.name.clone(),
            document: upload.document,
            filename: upload.filename,
        });
    }

    let mut keys = BTreeSet::new();
    let mut seen = BTreeSet::new();
    for doc in &report.imported {
        keys.insert(doc.key.clone());
        seen.insert((doc.key.clone(), doc.phase.clone(), doc.document.clone()));
    }
    for key in keys {
        let key = SubmissionKey::new(key)?;
        for m in ctx.tracker.missing_documents(&key) {
            // a dry run records nothing, so drop what this run would import
            if seen.contains(&(key.to_string(), m.phase.clone(), m.document.clone())) {
                continue;
            }
            report.still_missing.push(StillMissing {
                key: key.to_string(),
                legacy_name: format!("{}.*", stored_document_stem(&m.document)),
                document: m.document,
            });
        }
    }

    emit(ctx.output, &report, || {
        heading(if report.dry_run {
            "Legacy import (dry run)"
        } else {
            "Legacy import"
        });
        print_table(report.imported.clone());
        if !report.skipped.is_empty() {
            println!();
            print_table(
                report
                    .skipped
                    .iter()
                    .map(|skip| SkippedRow {
                        path: skip.path.display().to_string(),
                        reason: skip.reason.clone(),
                    })
                    .collect(),
            );
        }
        if !report.still_missing.is_empty() {
            println!();
            println!("{}", "Still missing:".yellow());
            print_table(report.still_missing.clone());
        }
        println!();
        println!(
            "{} imported, {} skipped",
            report.imported.len().to_string().green(),
            report.skipped.len()
        );
    })
}
