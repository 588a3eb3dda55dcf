//! In-memory store for tests and ephemeral sessions.

use crate::traits::{PersistentStore, StoreMap};
use crate::{StoreError, StoreResult};
use serde_json::Value;
use std::sync::Mutex;

/// In-memory store. `update` is atomic under a single lock.
///
/// Holds a raw [`Value`] so tests can seed shapes a real backing file might
/// contain, including ones that are not objects at all.
#[derive(Debug)]
pub struct InMemoryStore {
    data: Mutex<Value>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::with_raw(Value::Object(StoreMap::new()))
    }

    pub fn with_raw(raw: Value) -> Self {
        Self {
            data: Mutex::new(raw),
        }
    }

    /// Current raw content, exactly as last saved or seeded.
    pub fn raw(&self) -> StoreResult<Value> {
        let guard = self.data.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(guard.clone())
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn as_map(raw: &Value) -> StoreMap {
    match raw {
        Value::Object(map) => map.clone(),
        _ => StoreMap::new(),
    }
}

impl PersistentStore for InMemoryStore {
    fn load(&self) -> StoreResult<StoreMap> {
        let guard = self.data.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(as_map(&guard))
    }

    fn save(&self, data: &StoreMap) -> StoreResult<()> {
        let mut guard = self.data.lock().map_err(|_| StoreError::LockPoisoned)?;
        *guard = Value::Object(data.clone());
        Ok(())
    }

    fn update(&self, mutate: &mut dyn FnMut(&mut StoreMap) -> bool) -> StoreResult<bool> {
        let mut guard = self.data.lock().map_err(|_| StoreError::LockPoisoned)?;
        let mut data = as_map(&guard);
        if !mutate(&mut data) {
            return Ok(false);
        }
        *guard = Value::Object(data);
        Ok(true)
    }
}
