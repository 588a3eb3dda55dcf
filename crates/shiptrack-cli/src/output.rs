//! Output formatting for CLI

use crate::CliResult;
use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use shiptrack_tracker::CompletionStatus;
use tabled::{Table, Tabled};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// Print `value` as JSON/YAML, or run `table` for the human format.
pub fn emit<T: Serialize>(format: OutputFormat, value: &T, table: impl FnOnce()) -> CliResult<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(value)?),
        OutputFormat::Table => table(),
    }
    Ok(())
}

/// Render `rows` as a table, or a dimmed placeholder when there are none.
pub fn print_table<T: Tabled>(rows: Vec<T>) {
    if rows.is_empty() {
        println!("{}", "No results".dimmed());
    } else {
        println!("{}", Table::new(rows));
    }
}

/// Table row for one required document.
#[derive(Debug, Tabled)]
pub struct DocumentRow {
    #[tabled(rename = "Phase")]
    pub phase: String,
    #[tabled(rename = "Document")]
    pub document: String,
    #[tabled(rename = "State")]
    pub state: &'static str,
    #[tabled(rename = "Uploaded")]
    pub uploaded: String,
}

impl DocumentRow {
    pub fn from_status(status: &CompletionStatus) -> Vec<Self> {
        status
            .phases
            .iter()
            .flat_map(|phase| {
                phase.documents.iter().map(move |doc| DocumentRow {
                    phase: phase.name.clone(),
                    document: doc.name.clone(),
                    state: state_label(doc.is_present()),
                    uploaded: doc
                        .reference
                        .as_ref()
                        .map(|r| {
                            format!(
                                "{} at {}",
                                r.filename,
                                r.uploaded_at.format("%Y-%m-%d %H:%M:%S")
                            )
                        })
                        .unwrap_or_default(),
                })
            })
            .collect()
    }
}

pub fn state_label(present: bool) -> &'static str {
    if present {
        "Uploaded"
    } else {
        "Missing"
    }
}

pub fn submitted_badge(submitted: bool) -> String {
    if submitted {
        "submitted".green().to_string()
    } else {
        "not submitted".yellow().to_string()
    }
}

pub fn heading(text: &str) {
    println!("{}", text.bold().cyan());
    println!("{}", "=".repeat(70));
}
