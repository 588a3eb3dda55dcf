//! Shipment commands

use crate::output::{emit, heading, print_table, DocumentRow};
use crate::{CliResult, Context};
use chrono::{Local, NaiveDate, Utc};
use clap::Subcommand;
use colored::Colorize;
use serde::Serialize;
use shiptrack_shipments::{ShipmentDraft, ShipmentRecord};
use shiptrack_tracker::CompletionStatus;
use shiptrack_types::SubmissionKey;
use tabled::Tabled;

/// Shipment subcommands
#[derive(Subcommand)]
pub enum ShipmentCommands {
    /// Register a new shipment
    Add {
        /// Shipment ID
        #[arg(long)]
        id: String,

        /// Buyer name
        #[arg(long)]
        buyer: String,

        /// Contract date (YYYY-MM-DD)
        #[arg(long)]
        contract_date: NaiveDate,

        /// Estimated time of departure (YYYY-MM-DD)
        #[arg(long)]
        etd: NaiveDate,

        /// Payment term: LC, CAD or TT
        #[arg(long)]
        payment_term: String,
    },

    /// List shipments with their document progress
    List,

    /// Show one shipment and its document checklist
    Show {
        /// Shipment ID
        id: String,
    },

    /// Replace a shipment's status text
    SetStatus {
        /// Shipment ID
        id: String,

        /// New status
        status: String,
    },
}

#[derive(Serialize)]
struct ShipmentOverview {
    #[serde(flatten)]
    shipment: ShipmentRecord,
    documents_present: usize,
    documents_required: usize,
}

/// Table row for shipment listing
#[derive(Debug, Tabled)]
struct ShipmentRow {
    #[tabled(rename = "Shipment")]
    id: String,
    #[tabled(rename = "Buyer")]
    buyer: String,
    #[tabled(rename = "ETD")]
    etd: NaiveDate,
    #[tabled(rename = "Terms")]
    payment_term: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Docs")]
    documents: String,
}

impl From<&ShipmentOverview> for ShipmentRow {
    fn from(o: &ShipmentOverview) -> Self {
        Self {
            id: o.shipment.shipment_id.clone(),
            buyer: o.shipment.buyer.clone(),
            etd: o.shipment.etd,
            payment_term: o.shipment.payment_term.to_string(),
            status: o.shipment.status.clone(),
            documents: format!("{}/{}", o.documents_present, o.documents_required),
        }
    }
}

#[derive(Serialize)]
struct ShipmentDetail {
    shipment: ShipmentRecord,
    documents: CompletionStatus,
}

/// Execute shipment command
pub fn execute(command: ShipmentCommands, ctx: &Context) -> CliResult<()> {
    match command {
        ShipmentCommands::Add {
            id,
            buyer,
            contract_date,
            etd,
            payment_term,
        } => {
            let draft = ShipmentDraft {
                shipment_id: id,
                buyer,
                contract_date,
                etd,
                payment_term,
            };
            let record = ctx
                .shipments
                .add(draft, Local::now().date_naive(), Utc::now())?;
            emit(ctx.output, &record, || {
                println!(
                    "{} Shipment {} added.",
                    "✓".green(),
                    record.shipment_id.bold()
                );
            })
        }

        ShipmentCommands::List => {
            let overviews = ctx
                .shipments
                .list()?
                .into_iter()
                .map(|shipment| {
                    let status = SubmissionKey::shipment(&shipment.shipment_id)
                        .map(|key| ctx.tracker.status_for(&key));
                    ShipmentOverview {
                        documents_present: status.as_ref().map(|s| s.present_count()).unwrap_or(0),
                        documents_required: ctx.tracker.taxonomy().document_count(),
                        shipment,
                    }
                })
                .collect::<Vec<_>>();

            emit(ctx.output, &overviews, || {
                heading("Shipments");
                print_table(overviews.iter().map(ShipmentRow::from).collect());
            })
        }

        ShipmentCommands::Show { id } => {
            let shipment = ctx.shipments.get(&id)?;
            let key = SubmissionKey::shipment(&shipment.shipment_id)?;
            let detail = ShipmentDetail {
                documents: ctx.tracker.status_for(&key),
                shipment,
            };

            emit(ctx.output, &detail, || {
                let s = &detail.shipment;
                heading(&format!("{} - {}", s.shipment_id, s.buyer));
                println!("  Contract Date: {}", s.contract_date);
                println!("  ETD:           {}", s.etd);
                println!("  Payment Term:  {}", s.payment_term);
                println!("  Status:        {}", s.status);
                println!();
                print_table(DocumentRow::from_status(&detail.documents));
                println!();
                let missing = detail.documents.missing();
                if missing.is_empty() {
                    println!("{}", "All required documents uploaded.".green());
                } else {
                    let names: Vec<_> = missing.iter().map(|m| m.document.as_str()).collect();
                    println!("{} {}", "Missing documents:".yellow(), names.join(", "));
                }
            })
        }

        ShipmentCommands::SetStatus { id, status } => {
            let record = ctx.shipments.set_status(&id, &status)?;
            emit(ctx.output, &record, || {
                println!(
                    "{} {} is now '{}'.",
                    "✓".green(),
                    record.shipment_id.bold(),
                    record.status
                );
            })
        }
    }
}
