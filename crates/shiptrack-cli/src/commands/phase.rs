//! Phase submission commands

use crate::output::{emit, heading, print_table, submitted_badge};
use crate::{CliResult, Context, KeyArgs};
use clap::Subcommand;
use colored::Colorize;
use serde::Serialize;
use tabled::Tabled;

/// Phase subcommands
#[derive(Subcommand)]
pub enum PhaseCommands {
    /// Mark a phase submitted (documents need not be complete)
    Submit {
        #[command(flatten)]
        key: KeyArgs,

        /// Phase name
        #[arg(long)]
        phase: String,
    },

    /// Show submission state of every phase
    Status {
        #[command(flatten)]
        key: KeyArgs,
    },
}

#[derive(Serialize)]
struct SubmitOutcome {
    key: String,
    phase: String,
    newly_submitted: bool,
    phase_complete: bool,
    fully_submitted: bool,
}

/// Table row for phase status
#[derive(Debug, Clone, Serialize, Tabled)]
struct PhaseRow {
    #[tabled(rename = "Phase")]
    phase: String,
    #[tabled(rename = "Submitted")]
    submitted: bool,
    #[tabled(rename = "Complete")]
    complete: bool,
    #[tabled(rename = "Present")]
    present: usize,
    #[tabled(rename = "Required")]
    required: usize,
}

#[derive(Serialize)]
struct PhaseReport {
    key: String,
    fully_submitted: bool,
    phases: Vec<PhaseRow>,
}

/// Execute phase command
pub fn execute(command: PhaseCommands, ctx: &Context) -> CliResult<()> {
    match command {
        PhaseCommands::Submit { key, phase } => {
            let key = key.resolve()?;
            let newly_submitted = ctx.tracker.submit_phase(&key, &phase)?;
            let outcome = SubmitOutcome {
                phase_complete: ctx.tracker.is_phase_complete(&key, &phase),
                fully_submitted: ctx.tracker.is_fully_submitted(&key),
                key: key.to_string(),
                phase,
                newly_submitted,
            };

            emit(ctx.output, &outcome, || {
                if outcome.newly_submitted {
                    println!("{} {} submitted.", "✓".green(), outcome.phase.bold());
                } else {
                    println!("{} was already submitted.", outcome.phase.bold());
                }
                if !outcome.phase_complete {
                    println!("{}", "Note: this phase still has missing documents.".yellow());
                }
                if outcome.fully_submitted {
                    println!("{}", "All phases submitted.".green());
                }
            })
        }

        PhaseCommands::Status { key } => {
            let key = key.resolve()?;
            let status = ctx.tracker.status_for(&key);
            let report = PhaseReport {
                key: key.to_string(),
                fully_submitted: ctx.tracker.is_fully_submitted(&key),
                phases: status
                    .phases
                    .iter()
                    .map(|p| PhaseRow {
                        phase: p.name.clone(),
                        submitted: p.submitted,
                        complete: p.is_complete(),
                        present: p.present_count(),
                        required: p.documents.len(),
                    })
                    .collect(),
            };

            emit(ctx.output, &report, || {
                heading(&format!("Phases for {}", report.key));
                print_table(report.phases.iter().map(PhaseRow::clone).collect());
                println!();
                println!(
                    "{} {}",
                    "All phases:".bold(),
                    submitted_badge(report.fully_submitted)
                );
            })
        }
    }
}
