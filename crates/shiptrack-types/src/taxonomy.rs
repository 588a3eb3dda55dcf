//! Document taxonomy: the static phase -> document list shipments are
//! checked against.
//!
//! A taxonomy is fixed at process start. Phase order and document order
//! within a phase are significant: every status and missing-document listing
//! follows them.

use crate::error::{TaxonomyError, TaxonomyResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Phase name used when a taxonomy is built from a flat document list.
pub const DEFAULT_PHASE: &str = "Required Documents";

/// Documents required for a coffee export shipment, in checklist order.
pub const COFFEE_EXPORT_DOCUMENTS: [&str; 18] = [
    "Signed Contract",
    "Registration Form",
    "LC Application / Undertaking Letter",
    "Commercial Invoice",
    "Packing List",
    "Bill of Lading",
    "Phytosanitary Certificate",
    "Fumigation Certificate",
    "Quality Certificate",
    "Weight Certificate",
    "ICO Certificate",
    "COO Certificate",
    "Beneficiary’s Certificate",
    "Submission Form",
    "Cover Letter",
    "Bank Permit",
    "Transit Agreement",
    "Bank Advice",
];

/// One stage of the export process and the documents it requires.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    pub name: String,
    pub documents: Vec<String>,
}

impl Phase {
    pub fn new<I, S>(name: impl Into<String>, documents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            documents: documents.into_iter().map(Into::into).collect(),
        }
    }

    pub fn requires(&self, document: &str) -> bool {
        self.documents.iter().any(|d| d == document)
    }
}

/// Ordered, validated list of phases.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Phase>", into = "Vec<Phase>")]
pub struct DocumentTaxonomy {
    phases: Vec<Phase>,
}

impl DocumentTaxonomy {
    /// Build a taxonomy, trimming names and rejecting empty or duplicate
    /// phase/document names.
    pub fn new(phases: Vec<Phase>) -> TaxonomyResult<Self> {
        if phases.is_empty() {
            return Err(TaxonomyError::EmptyTaxonomy);
        }

        let mut seen_phases = HashSet::new();
        let mut normalized = Vec::with_capacity(phases.len());
        for phase in phases {
            let name = phase.name.trim().to_string();
            if name.is_empty() {
                return Err(TaxonomyError::EmptyName("phase".into()));
            }
            if !seen_phases.insert(name.clone()) {
                return Err(TaxonomyError::DuplicatePhase(name));
            }

            let mut seen_docs = HashSet::new();
            let mut documents = Vec::with_capacity(phase.documents.len());
            for document in phase.documents {
                let document = document.trim().to_string();
                if document.is_empty() {
                    return Err(TaxonomyError::EmptyName(format!("document in phase '{name}'")));
                }
                if !seen_docs.insert(document.clone()) {
                    return Err(TaxonomyError::DuplicateDocument {
                        phase: name,
                        document,
                    });
                }
                documents.push(document);
            }

            normalized.push(Phase { name, documents });
        }

        Ok(Self { phases: normalized })
    }

    /// Single-phase taxonomy from a flat document list.
    pub fn flat<I, S>(documents: I) -> TaxonomyResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(vec![Phase::new(DEFAULT_PHASE, documents)])
    }

    /// The coffee export checklist as a single phase.
    pub fn coffee_export() -> Self {
        Self {
            phases: vec![Phase::new(DEFAULT_PHASE, COFFEE_EXPORT_DOCUMENTS)],
        }
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    pub fn phase(&self, name: &str) -> Option<&Phase> {
        self.phases.iter().find(|p| p.name == name)
    }

    /// The phase of a flat taxonomy; `None` when there is more than one.
    pub fn sole_phase(&self) -> Option<&Phase> {
        match self.phases.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }

    pub fn contains_phase(&self, phase: &str) -> bool {
        self.phase(phase).is_some()
    }

    pub fn contains(&self, phase: &str, document: &str) -> bool {
        self.phase(phase).is_some_and(|p| p.requires(document))
    }

    /// All phases that require `document`, in taxonomy order.
    pub fn phases_requiring<'a>(&'a self, document: &'a str) -> impl Iterator<Item = &'a Phase> {
        self.phases.iter().filter(move |p| p.requires(document))
    }

    /// Every (phase, document) pair in taxonomy order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.phases.iter().flat_map(|p| {
            p.documents
                .iter()
                .map(move |d| (p.name.as_str(), d.as_str()))
        })
    }

    pub fn document_count(&self) -> usize {
        self.phases.iter().map(|p| p.documents.len()).sum()
    }
}

impl Default for DocumentTaxonomy {
    fn default() -> Self {
        Self::coffee_export()
    }
}

impl TryFrom<Vec<Phase>> for DocumentTaxonomy {
    type Error = TaxonomyError;

    fn try_from(phases: Vec<Phase>) -> Result<Self, Self::Error> {
        Self::new(phases)
    }
}

impl From<DocumentTaxonomy> for Vec<Phase> {
    fn from(taxonomy: DocumentTaxonomy) -> Self {
        taxonomy.phases
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_phase() -> DocumentTaxonomy {
        DocumentTaxonomy::new(vec![
            Phase::new("Phase A", ["Contract", "Invoice"]),
            Phase::new("Phase B", ["Bill of Lading"]),
        ])
        .unwrap()
    }

    #[test]
    fn entries_follow_phase_then_document_order() {
        let taxonomy = two_phase();
        let entries: Vec<_> = taxonomy.entries().collect();
        assert_eq!(
            entries,
            vec![
                ("Phase A", "Contract"),
                ("Phase A", "Invoice"),
                ("Phase B", "Bill of Lading"),
            ]
        );
    }

    #[test]
    fn coffee_export_is_flat_with_eighteen_documents() {
        let taxonomy = DocumentTaxonomy::coffee_export();
        let phase = taxonomy.sole_phase().unwrap();
        assert_eq!(phase.name, DEFAULT_PHASE);
        assert_eq!(taxonomy.document_count(), 18);
        assert!(taxonomy.contains(DEFAULT_PHASE, "Bill of Lading"));
        // the hand-built constant must still satisfy the constructor's rules
        assert_eq!(
            DocumentTaxonomy::flat(COFFEE_EXPORT_DOCUMENTS).unwrap(),
            taxonomy
        );
    }

    #[test]
    fn rejects_duplicates_and_empty_names() {
        assert_eq!(
            DocumentTaxonomy::new(vec![]).unwrap_err(),
            TaxonomyError::EmptyTaxonomy
        );
        assert!(matches!(
            DocumentTaxonomy::new(vec![Phase::new("A", ["x"]), Phase::new(" A ", ["y"])]),
            Err(TaxonomyError::DuplicatePhase(p)) if p == "A"
        ));
        assert!(matches!(
            DocumentTaxonomy::flat(["Invoice", "Invoice"]),
            Err(TaxonomyError::DuplicateDocument { .. })
        ));
        assert!(matches!(
            DocumentTaxonomy::flat(["Invoice", "  "]),
            Err(TaxonomyError::EmptyName(_))
        ));
    }

    #[test]
    fn same_document_may_appear_in_two_phases() {
        let taxonomy = DocumentTaxonomy::new(vec![
            Phase::new("Draft", ["Invoice"]),
            Phase::new("Final", ["Invoice"]),
        ])
        .unwrap();
        assert_eq!(taxonomy.phases_requiring("Invoice").count(), 2);
        assert!(taxonomy.sole_phase().is_none());
    }

    #[test]
    fn deserialization_validates() {
        let ok: DocumentTaxonomy =
            serde_json::from_str(r#"[{"name":"Phase A","documents":["Contract"]}]"#).unwrap();
        assert!(ok.contains("Phase A", "Contract"));

        let dup = serde_json::from_str::<DocumentTaxonomy>(
            r#"[{"name":"A","documents":[]},{"name":"A","documents":[]}]"#,
        );
        assert!(dup.is_err());
    }
}
