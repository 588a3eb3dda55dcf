//! CLI command implementations

pub mod doc;
pub mod import;
pub mod phase;
pub mod shipment;

use crate::output::{emit, heading};
use crate::{CliResult, Context};
use colored::Colorize;

/// Print the configured taxonomy.
pub fn show_taxonomy(ctx: &Context) -> CliResult<()> {
    let taxonomy = ctx.tracker.taxonomy();
    emit(ctx.output, taxonomy, || {
        heading("Required Documents");
        for (i, phase) in taxonomy.phases().iter().enumerate() {
            println!();
            println!("  {} {}", format!("{}.", i + 1).bold().yellow(), phase.name.bold());
            for document in &phase.documents {
                println!("      - {}", document);
            }
        }
        println!();
        println!(
            "{} documents in {} phase(s)",
            taxonomy.document_count(),
            taxonomy.phases().len()
        );
    })
}
