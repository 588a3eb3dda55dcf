//! The document completion tracker.

use crate::status::{CompletionStatus, DocumentState, MissingDocument, PhaseStatus};
use crate::{TrackerError, TrackerResult};
use shiptrack_store::{KeyRecord, PersistentStore, StoreSnapshot};
use shiptrack_types::{DocumentReference, DocumentTaxonomy, SubmissionKey};
use tracing::{debug, info, warn};

/// Tracks document presence and phase submission per submission key.
///
/// Unknown phase or document names are rejected on write. Nothing is
/// written in that case.
pub struct DocumentTracker<S> {
    taxonomy: DocumentTaxonomy,
    store: S,
}

impl<S: PersistentStore> DocumentTracker<S> {
    pub fn new(taxonomy: DocumentTaxonomy, store: S) -> Self {
        Self { taxonomy, store }
    }

    pub fn taxonomy(&self) -> &DocumentTaxonomy {
        &self.taxonomy
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Presence of every taxonomy document for `key`.
    pub fn status_for(&self, key: &SubmissionKey) -> CompletionStatus {
        let record = self.load_record(key);

        let phases = self
            .taxonomy
            .phases()
            .iter()
            .map(|phase| PhaseStatus {
                name: phase.name.clone(),
                submitted: record.is_submitted(&phase.name),
                documents: phase
                    .documents
                    .iter()
                    .map(|document| DocumentState {
                        name: document.clone(),
                        reference: record.reference(&phase.name, document).cloned(),
                    })
                    .collect(),
            })
            .collect();

        CompletionStatus {
            key: key.clone(),
            phases,
        }
    }

    /// Missing documents in taxonomy order. Empty means complete.
    pub fn missing_documents(&self, key: &SubmissionKey) -> Vec<MissingDocument> {
        self.status_for(key).missing()
    }

    pub fn is_complete(&self, key: &SubmissionKey) -> bool {
        self.status_for(key).is_complete()
    }

    /// `false` for phases outside the taxonomy.
    pub fn is_phase_complete(&self, key: &SubmissionKey, phase: &str) -> bool {
        self.status_for(key)
            .phase(phase)
            .is_some_and(PhaseStatus::is_complete)
    }

    /// Attach `reference` to (key, phase, document), replacing any earlier
    /// one. Returns the replaced reference.
    pub fn record_upload(
        &self,
        key: &SubmissionKey,
        phase: &str,
        document: &str,
        reference: DocumentReference,
    ) -> TrackerResult<Option<DocumentReference>> {
        if !self.taxonomy.contains(phase, document) {
            warn!(key = %key, phase, document, "rejected upload for unknown document");
            return Err(TrackerError::UnknownDocument {
                phase: phase.to_string(),
                document: document.to_string(),
            });
        }

        let mut previous = None;
        self.store.update(&mut |map| {
            let mut record = KeyRecord::read(map, key);
            previous = record.set_reference(phase, document, reference.clone());
            record.write(map, key);
            true
        })?;

        info!(
            key = %key,
            phase,
            document,
            filename = %reference.filename,
            replaced = previous.is_some(),
            "document recorded"
        );
        Ok(previous)
    }

    /// Mark `phase` submitted for `key`. Idempotent; returns `false` when it
    /// was already submitted. Does not look at completeness.
    pub fn submit_phase(&self, key: &SubmissionKey, phase: &str) -> TrackerResult<bool> {
        if !self.taxonomy.contains_phase(phase) {
            warn!(key = %key, phase, "rejected submission for unknown phase");
            return Err(TrackerError::UnknownPhase(phase.to_string()));
        }

        let mut newly_submitted = false;
        self.store.update(&mut |map| {
            let mut record = KeyRecord::read(map, key);
            newly_submitted = record.mark_submitted(phase);
            if newly_submitted {
                record.write(map, key);
            }
            newly_submitted
        })?;

        if newly_submitted {
            info!(key = %key, phase, "phase submitted");
        } else {
            debug!(key = %key, phase, "phase already submitted");
        }
        Ok(newly_submitted)
    }

    pub fn is_phase_submitted(&self, key: &SubmissionKey, phase: &str) -> bool {
        self.load_record(key).is_submitted(phase)
    }

    /// Every taxonomy phase has been submitted.
    pub fn is_fully_submitted(&self, key: &SubmissionKey) -> bool {
        let record = self.load_record(key);
        self.taxonomy
            .phases()
            .iter()
            .all(|p| record.is_submitted(&p.name))
    }

    /// Submitted taxonomy phases in submission order. Stored phase names
    /// the taxonomy no longer knows are left out.
    pub fn submitted_phases(&self, key: &SubmissionKey) -> Vec<String> {
        self.load_record(key)
            .submitted_phases
            .into_iter()
            .filter(|p| self.taxonomy.contains_phase(p))
            .collect()
    }

    /// Keys with at least one upload or submission.
    pub fn tracked_keys(&self) -> Vec<SubmissionKey> {
        match self.store.load() {
            Ok(map) => StoreSnapshot::from_map(&map).active_keys(),
            Err(e) => {
                warn!(error = %e, "store unavailable, no tracked keys");
                Vec::new()
            }
        }
    }

    fn load_record(&self, key: &SubmissionKey) -> KeyRecord {
        match self.store.load() {
            Ok(map) => {
                let record = KeyRecord::read(&map, key);
                debug!(key = %key, submitted = record.submitted_phases.len(), "record loaded");
                record
            }
            Err(e) => {
                warn!(key = %key, error = %e, "store unavailable, treating as empty");
                KeyRecord::default()
            }
        }
    }
}
