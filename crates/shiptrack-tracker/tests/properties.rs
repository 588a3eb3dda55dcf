//! Property tests for tracker invariants.

use proptest::prelude::*;
use shiptrack_store::InMemoryStore;
use shiptrack_tracker::DocumentTracker;
use shiptrack_types::{DocumentReference, DocumentTaxonomy, Phase, SubmissionKey};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// Taxonomy with 1..4 phases of 1..5 uniquely named documents each.
fn arb_taxonomy() -> impl Strategy<Value = DocumentTaxonomy> {
    prop::collection::vec(1usize..5, 1..4).prop_map(|sizes| {
        let phases = sizes
            .iter()
            .enumerate()
            .map(|(p, &n)| Phase::new(format!("Phase {p}"), (0..n).map(|d| format!("Doc {p}.{d}"))))
            .collect();
        DocumentTaxonomy::new(phases).unwrap()
    })
}

fn arb_key() -> impl Strategy<Value = SubmissionKey> {
    "[A-Z]{3}-[0-9]{1,4}".prop_map(|s| SubmissionKey::new(s).unwrap())
}

proptest! {
    #[test]
    fn empty_store_lists_every_document_in_order(taxonomy in arb_taxonomy(), key in arb_key()) {
        let tracker = DocumentTracker::new(taxonomy.clone(), InMemoryStore::new());
        let missing: Vec<_> = tracker
            .missing_documents(&key)
            .into_iter()
            .map(|m| (m.phase, m.document))
            .collect();
        let expected: Vec<_> = taxonomy
            .entries()
            .map(|(p, d)| (p.to_string(), d.to_string()))
            .collect();
        prop_assert_eq!(missing, expected);
        prop_assert_eq!(tracker.status_for(&key).present_count(), 0);
    }

    #[test]
    fn submit_is_idempotent(taxonomy in arb_taxonomy(), key in arb_key(), times in 1usize..6) {
        let tracker = DocumentTracker::new(taxonomy.clone(), InMemoryStore::new());
        let phase = taxonomy.phases()[0].name.clone();
        for _ in 0..times {
            tracker.submit_phase(&key, &phase).unwrap();
        }
        prop_assert!(tracker.is_phase_submitted(&key, &phase));
        prop_assert_eq!(tracker.submitted_phases(&key), vec![phase]);
    }

    #[test]
    fn writes_to_one_key_never_touch_another(
        taxonomy in arb_taxonomy(),
        k1 in arb_key(),
        k2 in arb_key(),
        pick in any::<prop::sample::Index>(),
    ) {
        prop_assume!(k1 != k2);
        let tracker = DocumentTracker::new(taxonomy.clone(), InMemoryStore::new());
        let before = tracker.status_for(&k2);

        let entries: Vec<_> = taxonomy.entries().collect();
        let (phase, document) = entries[pick.index(entries.len())];
        tracker
            .record_upload(&k1, phase, document, DocumentReference::now("f.pdf"))
            .unwrap();
        tracker.submit_phase(&k1, phase).unwrap();

        prop_assert_eq!(tracker.status_for(&k2), before);
        prop_assert!(!tracker.is_phase_submitted(&k2, phase));
    }

    #[test]
    fn uploading_everything_completes(taxonomy in arb_taxonomy(), key in arb_key()) {
        let tracker = DocumentTracker::new(taxonomy.clone(), InMemoryStore::new());
        for (phase, document) in taxonomy.entries() {
            tracker
                .record_upload(&key, phase, document, DocumentReference::now("f.pdf"))
                .unwrap();
        }
        prop_assert!(tracker.is_complete(&key));
        prop_assert!(!tracker.is_fully_submitted(&key));
    }
}
