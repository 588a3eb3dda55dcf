use crate::validation::ValidationIssue;
use shiptrack_store::StoreError;
use thiserror::Error;

/// Errors from the shipment registry.
#[derive(Debug, Error)]
pub enum ShipmentError {
    #[error("invalid shipment: {}", join_issues(.0))]
    Invalid(Vec<ValidationIssue>),

    #[error("shipment already exists: {0}")]
    Duplicate(String),

    #[error("shipment not found: {0}")]
    NotFound(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Convenience alias for registry results.
pub type ShipmentResult<T> = Result<T, ShipmentError>;

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
