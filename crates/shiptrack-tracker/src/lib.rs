//! # shiptrack-tracker
//!
//! Document completion tracking for export shipments.
//!
//! Given a static [`DocumentTaxonomy`](shiptrack_types::DocumentTaxonomy) and
//! a [`PersistentStore`](shiptrack_store::PersistentStore), the
//! [`DocumentTracker`] answers, for any submission key, what is uploaded,
//! what is missing and which phases have been submitted, and records
//! uploads and phase submissions.
//!
//! Completeness and submission are independent: a phase can be submitted
//! while documents are still missing, and a complete phase stays
//! unsubmitted until someone submits it.
//!
//! ```rust
//! use shiptrack_store::InMemoryStore;
//! use shiptrack_tracker::DocumentTracker;
//! use shiptrack_types::{DocumentReference, DocumentTaxonomy, Phase, SubmissionKey};
//!
//! let taxonomy =
//!     DocumentTaxonomy::new(vec![Phase::new("Phase A", ["Contract", "Invoice"])]).unwrap();
//! let tracker = DocumentTracker::new(taxonomy, InMemoryStore::new());
//! let key = SubmissionKey::shipment("SHP-001").unwrap();
//!
//! tracker
//!     .record_upload(&key, "Phase A", "Contract", DocumentReference::now("contract.pdf"))
//!     .unwrap();
//! assert_eq!(tracker.missing_documents(&key).len(), 1);
//! assert!(!tracker.is_fully_submitted(&key));
//! ```
//!
//! ## Concurrency
//!
//! Every operation loads the whole store document and every write replaces
//! it. Writes go through [`PersistentStore::update`](shiptrack_store::PersistentStore::update),
//! so they are only as isolated as the store makes them: the bundled stores
//! serialize writers within one process, nothing coordinates separate
//! processes sharing a backing file.

#![deny(unsafe_code)]

mod error;
pub mod status;
mod tracker;

pub use error::{TrackerError, TrackerResult};
pub use status::{CompletionStatus, DocumentState, MissingDocument, PhaseStatus};
pub use tracker::DocumentTracker;
