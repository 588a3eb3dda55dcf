use crate::StoreResult;
use serde_json::{Map, Value};

/// Whole store document: submission key -> arbitrary nested record.
pub type StoreMap = Map<String, Value>;

/// Key -> record mapping with whole-document load/replace semantics.
///
/// `load` must treat an absent or unreadable backing store as an empty
/// mapping; only failures of the store machinery itself (a poisoned lock)
/// come back as errors.
pub trait PersistentStore: Send + Sync {
    /// Read the full current mapping.
    fn load(&self) -> StoreResult<StoreMap>;

    /// Replace the full mapping.
    fn save(&self, data: &StoreMap) -> StoreResult<()>;

    /// Read-modify-write of the full mapping.
    ///
    /// `mutate` returns whether it changed the mapping; nothing is written
    /// when it returns `false`. Returns whether a save happened.
    ///
    /// Default implementation: load, mutate, save. There is no isolation
    /// between the load and the save; implementations that can serialize
    /// writers override this.
    fn update(&self, mutate: &mut dyn FnMut(&mut StoreMap) -> bool) -> StoreResult<bool> {
        let mut data = self.load()?;
        if !mutate(&mut data) {
            return Ok(false);
        }
        self.save(&data)?;
        Ok(true)
    }
}

impl<T: PersistentStore + ?Sized> PersistentStore for std::sync::Arc<T> {
    fn load(&self) -> StoreResult<StoreMap> {
        (**self).load()
    }

    fn save(&self, data: &StoreMap) -> StoreResult<()> {
        (**self).save(data)
    }

    fn update(&self, mutate: &mut dyn FnMut(&mut StoreMap) -> bool) -> StoreResult<bool> {
        (**self).update(mutate)
    }
}
