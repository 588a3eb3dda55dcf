//! Completion views computed by the tracker.

use serde::Serialize;
use shiptrack_types::{DocumentReference, SubmissionKey};

/// One required document and its reference, if uploaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentState {
    pub name: String,
    pub reference: Option<DocumentReference>,
}

impl DocumentState {
    pub fn is_present(&self) -> bool {
        self.reference.is_some()
    }
}

/// A phase's documents in taxonomy order, plus its submission flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseStatus {
    pub name: String,
    pub submitted: bool,
    pub documents: Vec<DocumentState>,
}

impl PhaseStatus {
    pub fn is_complete(&self) -> bool {
        self.documents.iter().all(DocumentState::is_present)
    }

    pub fn present_count(&self) -> usize {
        self.documents.iter().filter(|d| d.is_present()).count()
    }
}

/// A required document with no reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingDocument {
    pub phase: String,
    pub document: String,
}

impl MissingDocument {
    pub fn new(phase: impl Into<String>, document: impl Into<String>) -> Self {
        Self {
            phase: phase.into(),
            document: document.into(),
        }
    }
}

/// Presence of every taxonomy document for one key.
///
/// Always has an entry for every (phase, document) in the taxonomy, in
/// taxonomy order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionStatus {
    pub key: SubmissionKey,
    pub phases: Vec<PhaseStatus>,
}

impl CompletionStatus {
    pub fn phase(&self, name: &str) -> Option<&PhaseStatus> {
        self.phases.iter().find(|p| p.name == name)
    }

    /// `None` when the pair is not part of the taxonomy.
    pub fn is_present(&self, phase: &str, document: &str) -> Option<bool> {
        self.document(phase, document).map(DocumentState::is_present)
    }

    pub fn reference(&self, phase: &str, document: &str) -> Option<&DocumentReference> {
        self.document(phase, document)
            .and_then(|d| d.reference.as_ref())
    }

    pub fn missing(&self) -> Vec<MissingDocument> {
        self.phases
            .iter()
            .flat_map(|p| {
                p.documents
                    .iter()
                    .filter(|d| !d.is_present())
                    .map(move |d| MissingDocument::new(&p.name, &d.name))
            })
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.phases.iter().all(PhaseStatus::is_complete)
    }

    pub fn present_count(&self) -> usize {
        self.phases.iter().map(PhaseStatus::present_count).sum()
    }

    pub fn total(&self) -> usize {
        self.phases.iter().map(|p| p.documents.len()).sum()
    }

    fn document(&self, phase: &str, document: &str) -> Option<&DocumentState> {
        self.phase(phase)
            .and_then(|p| p.documents.iter().find(|d| d.name == document))
    }
}
