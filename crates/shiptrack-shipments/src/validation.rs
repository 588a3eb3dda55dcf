use crate::types::{PaymentTerm, ShipmentDraft};
use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

/// A rule a shipment draft breaks.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize)]
pub enum ValidationIssue {
    #[error("Shipment ID cannot be empty.")]
    EmptyShipmentId,

    #[error("Buyer name cannot be empty.")]
    EmptyBuyer,

    #[error("Contract date cannot be in the future.")]
    ContractDateInFuture,

    #[error("ETD must be today or a future date.")]
    EtdInPast,

    #[error("Contract date cannot be after ETD.")]
    ContractAfterEtd,

    #[error("Payment term must be one of LC, CAD, or TT (got '{0}').")]
    UnknownPaymentTerm(String),
}

/// Check a draft against every rule, relative to `today`. Returns all
/// issues found; empty means valid.
pub fn validate(draft: &ShipmentDraft, today: NaiveDate) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    if draft.shipment_id.trim().is_empty() {
        issues.push(ValidationIssue::EmptyShipmentId);
    }
    if draft.buyer.trim().is_empty() {
        issues.push(ValidationIssue::EmptyBuyer);
    }
    if draft.contract_date > today {
        issues.push(ValidationIssue::ContractDateInFuture);
    }
    if draft.etd < today {
        issues.push(ValidationIssue::EtdInPast);
    }
    if draft.contract_date > draft.etd {
        issues.push(ValidationIssue::ContractAfterEtd);
    }
    if let Err(term) = draft.payment_term.parse::<PaymentTerm>() {
        issues.push(ValidationIssue::UnknownPaymentTerm(term));
    }
    issues
}
