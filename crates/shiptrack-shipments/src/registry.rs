//! Shipment registry over a persistent store.

use crate::types::{PaymentTerm, ShipmentDraft, ShipmentRecord, DEFAULT_STATUS};
use crate::validation::validate;
use crate::{ShipmentError, ShipmentResult};
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use shiptrack_store::{PersistentStore, StoreMap};
use tracing::{info, warn};

/// Shipments keyed by shipment id.
pub struct ShipmentRegistry<S> {
    store: S,
}

impl<S: PersistentStore> ShipmentRegistry<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Validate `draft` against the caller's calendar date `today` and store
    /// it stamped with `created_at`.
    ///
    /// `today` is the local date where the shipment is entered, which can
    /// differ from `created_at.date_naive()` near midnight.
    pub fn add(
        &self,
        draft: ShipmentDraft,
        today: NaiveDate,
        created_at: DateTime<Utc>,
    ) -> ShipmentResult<ShipmentRecord> {
        let issues = validate(&draft, today);
        if !issues.is_empty() {
            return Err(ShipmentError::Invalid(issues));
        }

        let payment_term = draft
            .payment_term
            .parse::<PaymentTerm>()
            .map_err(|term| ShipmentError::Invalid(vec![crate::ValidationIssue::UnknownPaymentTerm(term)]))?;
        let record = ShipmentRecord {
            shipment_id: draft.shipment_id.trim().to_string(),
            buyer: draft.buyer.trim().to_string(),
            contract_date: draft.contract_date,
            etd: draft.etd,
            payment_term,
            status: DEFAULT_STATUS.to_string(),
            created_at,
        };
        let value = serde_json::to_value(&record).map_err(shiptrack_store::StoreError::from)?;

        let mut duplicate = false;
        self.store.update(&mut |map| {
            duplicate = map.contains_key(&record.shipment_id);
            if !duplicate {
                map.insert(record.shipment_id.clone(), value.clone());
            }
            !duplicate
        })?;
        if duplicate {
            return Err(ShipmentError::Duplicate(record.shipment_id));
        }

        info!(shipment_id = %record.shipment_id, buyer = %record.buyer, "shipment added");
        Ok(record)
    }

    pub fn get(&self, shipment_id: &str) -> ShipmentResult<ShipmentRecord> {
        let map = self.store.load()?;
        map.get(shipment_id.trim())
            .and_then(|v| decode(shipment_id, v))
            .ok_or_else(|| ShipmentError::NotFound(shipment_id.to_string()))
    }

    /// All readable shipments, oldest first.
    pub fn list(&self) -> ShipmentResult<Vec<ShipmentRecord>> {
        let map = self.store.load()?;
        Ok(sorted(&map))
    }

    /// Replace the free-text status of a shipment.
    pub fn set_status(&self, shipment_id: &str, status: &str) -> ShipmentResult<ShipmentRecord> {
        let shipment_id = shipment_id.trim();
        let mut updated: Option<ShipmentRecord> = None;
        let mut failure: Option<serde_json::Error> = None;

        self.store.update(&mut |map| {
            let Some(mut record) = map.get(shipment_id).and_then(|v| decode(shipment_id, v)) else {
                return false;
            };
            record.status = status.trim().to_string();
            match serde_json::to_value(&record) {
                Ok(value) => {
                    map.insert(shipment_id.to_string(), value);
                    updated = Some(record);
                    true
                }
                Err(e) => {
                    failure = Some(e);
                    false
                }
            }
        })?;

        if let Some(e) = failure {
            return Err(shiptrack_store::StoreError::from(e).into());
        }
        let record = updated.ok_or_else(|| ShipmentError::NotFound(shipment_id.to_string()))?;
        info!(shipment_id, status = %record.status, "shipment status updated");
        Ok(record)
    }
}

fn decode(shipment_id: &str, value: &Value) -> Option<ShipmentRecord> {
    match serde_json::from_value::<ShipmentRecord>(value.clone()) {
        Ok(record) => Some(record),
        Err(e) => {
            warn!(shipment_id, error = %e, "skipping unreadable shipment record");
            None
        }
    }
}

fn sorted(map: &StoreMap) -> Vec<ShipmentRecord> {
    let mut records: Vec<_> = map.iter().filter_map(|(id, v)| decode(id, v)).collect();
    records.sort_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.shipment_id.cmp(&b.shipment_id))
    });
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValidationIssue;
    use chrono::TimeZone;
    use serde_json::json;
    use shiptrack_store::{InMemoryStore, JsonFileStore};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap()
    }

    fn today() -> NaiveDate {
        now().date_naive()
    }

    fn draft(id: &str) -> ShipmentDraft {
        ShipmentDraft {
            shipment_id: id.into(),
            buyer: " Nordic Roasters ".into(),
            contract_date: NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
            etd: NaiveDate::from_ymd_opt(2026, 11, 15).unwrap(),
            payment_term: "cad".into(),
        }
    }

    #[test]
    fn add_trims_and_stamps() {
        let registry = ShipmentRegistry::new(InMemoryStore::new());
        let record = registry.add(draft(" SHP-001 "), today(), now()).unwrap();
        assert_eq!(record.shipment_id, "SHP-001");
        assert_eq!(record.buyer, "Nordic Roasters");
        assert_eq!(record.payment_term, PaymentTerm::CashAgainstDocuments);
        assert_eq!(record.status, DEFAULT_STATUS);
        assert_eq!(record.created_at, now());
        assert_eq!(registry.get("SHP-001").unwrap(), record);
    }

    #[test]
    fn rejects_invalid_drafts() {
        let registry = ShipmentRegistry::new(InMemoryStore::new());
        let mut d = draft("SHP-001");
        d.etd = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        match registry.add(d, today(), now()) {
            Err(ShipmentError::Invalid(issues)) => {
                assert_eq!(issues, vec![ValidationIssue::EtdInPast])
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
        assert!(registry.list().unwrap().is_empty());
    }

    #[test]
    fn validates_against_local_date_not_utc() {
        // 22:30 UTC on Oct 19 is already Oct 20 in UTC+3
        let registry = ShipmentRegistry::new(InMemoryStore::new());
        let created_at = Utc.with_ymd_and_hms(2026, 10, 19, 22, 30, 0).unwrap();
        let local_today = NaiveDate::from_ymd_opt(2026, 10, 20).unwrap();
        let mut d = draft("SHP-EAT");
        d.contract_date = local_today;
        d.etd = NaiveDate::from_ymd_opt(2026, 10, 25).unwrap();

        let record = registry.add(d.clone(), local_today, created_at).unwrap();
        assert_eq!(record.contract_date, local_today);
        assert_eq!(record.created_at, created_at);

        // the same draft judged by the UTC date is a future contract
        let other = ShipmentRegistry::new(InMemoryStore::new());
        match other.add(d, created_at.date_naive(), created_at) {
            Err(ShipmentError::Invalid(issues)) => {
                assert_eq!(issues, vec![ValidationIssue::ContractDateInFuture])
            }
            result => panic!("expected validation failure, got {result:?}"),
        }
    }

    #[test]
    fn rejects_duplicates() {
        let registry = ShipmentRegistry::new(InMemoryStore::new());
        registry.add(draft("SHP-001"), today(), now()).unwrap();
        assert!(matches!(
            registry.add(draft("SHP-001"), today(), now()),
            Err(ShipmentError::Duplicate(id)) if id == "SHP-001"
        ));
    }

    #[test]
    fn list_orders_by_creation_and_skips_garbage() {
        let store = InMemoryStore::with_raw(json!({"broken": "not a shipment"}));
        let registry = ShipmentRegistry::new(store);
        let later = now() + chrono::Duration::minutes(5);
        registry.add(draft("SHP-B"), today(), later).unwrap();
        registry.add(draft("SHP-A"), today(), now()).unwrap();

        let ids: Vec<_> = registry
            .list()
            .unwrap()
            .into_iter()
            .map(|r| r.shipment_id)
            .collect();
        assert_eq!(ids, vec!["SHP-A", "SHP-B"]);
    }

    #[test]
    fn set_status_updates_record() {
        let dir = tempfile::tempdir().unwrap();
        let registry = ShipmentRegistry::new(JsonFileStore::new(dir.path().join("shipments.json")));
        registry.add(draft("SHP-001"), today(), now()).unwrap();

        let record = registry.set_status("SHP-001", "Shipped").unwrap();
        assert_eq!(record.status, "Shipped");
        assert_eq!(registry.get("SHP-001").unwrap().status, "Shipped");

        assert!(matches!(
            registry.set_status("SHP-404", "Shipped"),
            Err(ShipmentError::NotFound(_))
        ));
    }
}
