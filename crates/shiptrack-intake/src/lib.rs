//! Shiptrack file intake.
//!
//! Accepts the raw bytes of an uploaded document for a
//! (submission key, phase, document) triple, stores them under a
//! collision-resistant path and hands back a
//! [`shiptrack_types::DocumentReference`]. The tracker never sees the bytes;
//! it only records the reference.
//!
//! [`legacy`] reads upload directories written by the earlier tool, where
//! presence was inferred from file names alone.

#![deny(unsafe_code)]

mod error;
pub mod legacy;
pub mod local;

pub use error::{IntakeError, IntakeResult};
pub use legacy::{canonical_document_name, scan_legacy_uploads, stored_document_stem, LegacyUpload};
pub use local::{FileIntake, LocalFileIntake, StoredUpload, DEFAULT_EXTENSIONS};
