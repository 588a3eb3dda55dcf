//! # shiptrack-types
//!
//! Shared vocabulary for the shiptrack workspace:
//!
//! - [`DocumentTaxonomy`] -- the static, ordered phase -> document list that
//!   every shipment is checked against. A flat list is a taxonomy with one
//!   phase.
//! - [`SubmissionKey`] -- the opaque key scoping one tracked entity
//!   (a shipment, or an organization member).
//! - [`DocumentReference`] -- what file intake hands back for an upload:
//!   the original filename and the upload time.

#![deny(unsafe_code)]

pub mod error;
pub mod key;
pub mod reference;
pub mod taxonomy;

pub use error::{TaxonomyError, TaxonomyResult};
pub use key::{InvalidKey, SubmissionKey};
pub use reference::DocumentReference;
pub use taxonomy::{DocumentTaxonomy, Phase, COFFEE_EXPORT_DOCUMENTS, DEFAULT_PHASE};
