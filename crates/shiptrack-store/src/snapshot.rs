//! Typed view over raw store content.
//!
//! This is the only place raw JSON from a store is interpreted. Anything that
//! does not have the expected shape is treated as absent:
//!
//! - a key whose value is not an object reads as an empty record
//! - `documents` that is not an object, or a phase entry that is not an
//!   object, contributes nothing
//! - a document reference that does not deserialize is missing
//! - `submitted_phases` that is not an array reads as empty; non-string
//!   items and duplicates are dropped

use crate::traits::StoreMap;
use serde::Serialize;
use serde_json::{Map, Value};
use shiptrack_types::{DocumentReference, SubmissionKey};
use std::collections::BTreeMap;
use tracing::warn;

const DOCUMENTS_FIELD: &str = "documents";
const SUBMITTED_FIELD: &str = "submitted_phases";

/// Everything the tracker knows about one submission key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KeyRecord {
    /// phase -> document -> reference
    pub documents: BTreeMap<String, BTreeMap<String, DocumentReference>>,
    /// Submitted phases, in submission order, without duplicates.
    pub submitted_phases: Vec<String>,
}

impl KeyRecord {
    /// Coerce a raw stored value into a record.
    pub fn from_value(value: &Value) -> Self {
        let Value::Object(fields) = value else {
            warn!(found = kind(value), "stored record is not an object, ignoring");
            return Self::default();
        };

        Self {
            documents: fields
                .get(DOCUMENTS_FIELD)
                .map(coerce_documents)
                .unwrap_or_default(),
            submitted_phases: fields
                .get(SUBMITTED_FIELD)
                .map(coerce_submitted)
                .unwrap_or_default(),
        }
    }

    /// Record stored under `key`, or an empty one.
    pub fn read(map: &StoreMap, key: &SubmissionKey) -> Self {
        map.get(key.as_str())
            .map(Self::from_value)
            .unwrap_or_default()
    }

    /// Write this record under `key`, keeping any unrelated fields already
    /// stored alongside it.
    pub fn write(&self, map: &mut StoreMap, key: &SubmissionKey) {
        let mut fields = match map.remove(key.as_str()) {
            Some(Value::Object(fields)) => fields,
            _ => Map::new(),
        };
        fields.insert(DOCUMENTS_FIELD.into(), documents_to_value(&self.documents));
        fields.insert(
            SUBMITTED_FIELD.into(),
            Value::Array(
                self.submitted_phases
                    .iter()
                    .cloned()
                    .map(Value::String)
                    .collect(),
            ),
        );
        map.insert(key.as_str().to_string(), Value::Object(fields));
    }

    pub fn reference(&self, phase: &str, document: &str) -> Option<&DocumentReference> {
        self.documents.get(phase).and_then(|docs| docs.get(document))
    }

    /// Attach `reference`, replacing whatever was there. Returns the
    /// previous reference.
    pub fn set_reference(
        &mut self,
        phase: &str,
        document: &str,
        reference: DocumentReference,
    ) -> Option<DocumentReference> {
        self.documents
            .entry(phase.to_string())
            .or_default()
            .insert(document.to_string(), reference)
    }

    pub fn is_submitted(&self, phase: &str) -> bool {
        self.submitted_phases.iter().any(|p| p == phase)
    }

    /// Mark `phase` submitted. Returns `false` when it already was.
    pub fn mark_submitted(&mut self, phase: &str) -> bool {
        if self.is_submitted(phase) {
            return false;
        }
        self.submitted_phases.push(phase.to_string());
        true
    }
}

/// All records in a store, keyed by raw key string.
#[derive(Debug, Clone, Default)]
pub struct StoreSnapshot {
    records: BTreeMap<String, KeyRecord>,
}

impl StoreSnapshot {
    pub fn from_map(map: &StoreMap) -> Self {
        Self {
            records: map
                .iter()
                .map(|(key, value)| (key.clone(), KeyRecord::from_value(value)))
                .collect(),
        }
    }

    pub fn record(&self, key: &SubmissionKey) -> Option<&KeyRecord> {
        self.records.get(key.as_str())
    }

    /// Keys holding at least one reference or submission, sorted. Keys
    /// that are not valid submission keys are skipped.
    pub fn active_keys(&self) -> Vec<SubmissionKey> {
        self.records
            .iter()
            .filter(|(_, r)| !r.documents.values().all(|d| d.is_empty()) || !r.submitted_phases.is_empty())
            .filter_map(|(k, _)| SubmissionKey::new(k).ok())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn coerce_documents(value: &Value) -> BTreeMap<String, BTreeMap<String, DocumentReference>> {
    let Value::Object(phases) = value else {
        warn!(found = kind(value), "stored documents are not an object, ignoring");
        return BTreeMap::new();
    };

    let mut out = BTreeMap::new();
    for (phase, docs) in phases {
        let Value::Object(docs) = docs else {
            warn!(phase = %phase, "stored phase entry is not an object, ignoring");
            continue;
        };
        let references: BTreeMap<_, _> = docs
            .iter()
            .filter_map(|(document, raw)| {
                match serde_json::from_value::<DocumentReference>(raw.clone()) {
                    Ok(reference) => Some((document.clone(), reference)),
                    Err(e) => {
                        warn!(phase = %phase, document = %document, error = %e, "unreadable document reference, treating as missing");
                        None
                    }
                }
            })
            .collect();
        if !references.is_empty() {
            out.insert(phase.clone(), references);
        }
    }
    out
}

fn coerce_submitted(value: &Value) -> Vec<String> {
    let Value::Array(items) = value else {
        warn!(found = kind(value), "stored submitted phases are not a list, ignoring");
        return Vec::new();
    };

    let mut phases: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        if let Value::String(phase) = item {
            if !phases.contains(phase) {
                phases.push(phase.clone());
            }
        }
    }
    phases
}

fn documents_to_value(documents: &BTreeMap<String, BTreeMap<String, DocumentReference>>) -> Value {
    let phases = documents
        .iter()
        .map(|(phase, docs)| {
            let docs = docs
                .iter()
                .map(|(document, reference)| {
                    let value = serde_json::to_value(reference).unwrap_or(Value::Null);
                    (document.clone(), value)
                })
                .collect::<Map<_, _>>();
            (phase.clone(), Value::Object(docs))
        })
        .collect::<Map<_, _>>();
    Value::Object(phases)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
