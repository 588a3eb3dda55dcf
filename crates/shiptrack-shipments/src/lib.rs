//! Shipment records for the export tracker.
//!
//! A shipment is a small value object (buyer, contract date, ETD, payment
//! term, free-text status). [`validate`] holds the input rules;
//! [`ShipmentRegistry`] stores validated records through any
//! [`PersistentStore`](shiptrack_store::PersistentStore), keyed by shipment id.

#![deny(unsafe_code)]

mod error;
mod registry;
mod types;
mod validation;

pub use error::{ShipmentError, ShipmentResult};
pub use registry::ShipmentRegistry;
pub use types::{PaymentTerm, ShipmentDraft, ShipmentRecord, DEFAULT_STATUS};
pub use validation::{validate, ValidationIssue};
