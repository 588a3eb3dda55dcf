//! JSON-file backed store.
//!
//! The whole mapping lives in one pretty-printed JSON file. Saves are atomic
//! (write `<file>.tmp`, then rename). Reads never fail on content: a missing
//! file, an unreadable file, invalid JSON or a top-level value that is not an
//! object all read as an empty mapping.

use crate::traits::{PersistentStore, StoreMap};
use crate::{StoreError, StoreResult};
use chrono::Utc;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

/// How the backing file looked on the last read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileState {
    Missing,
    Valid,
    /// Present but unusable; it is moved aside before the next save.
    Unusable,
}

/// JSON-file store.
///
/// Writers going through [`PersistentStore::update`] on the same instance are
/// serialized. Separate processes sharing the file are not: the last
/// writer's full-document replace wins.
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> (StoreMap, FileState) {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return (StoreMap::new(), FileState::Missing),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "store file unreadable, treating as empty");
                return (StoreMap::new(), FileState::Unusable);
            }
        };

        if contents.trim().is_empty() {
            return (StoreMap::new(), FileState::Valid);
        }

        match serde_json::from_str::<Value>(&contents) {
            Ok(Value::Object(map)) => (map, FileState::Valid),
            Ok(other) => {
                warn!(
                    path = %self.path.display(),
                    found = json_kind(&other),
                    "store file is not a JSON object, treating as empty"
                );
                (StoreMap::new(), FileState::Unusable)
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "store file is not valid JSON, treating as empty");
                (StoreMap::new(), FileState::Unusable)
            }
        }
    }

    fn write_map(&self, data: &StoreMap) -> StoreResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        let json = serde_json::to_string_pretty(data)?;

        // Atomic write: write to .tmp then rename
        let tmp_path = self.tmp_path();
        std::fs::write(&tmp_path, json).map_err(|e| StoreError::io(&tmp_path, e))?;
        std::fs::rename(&tmp_path, &self.path).map_err(|e| StoreError::io(&self.path, e))?;

        debug!(path = %self.path.display(), keys = data.len(), "store saved");
        Ok(())
    }

    /// Keep an unusable file around instead of silently overwriting it.
    fn move_aside(&self) {
        let mut aside = self.path.clone().into_os_string();
        aside.push(format!(".corrupt-{}", Utc::now().format("%Y%m%dT%H%M%S")));
        let aside = PathBuf::from(aside);
        match std::fs::rename(&self.path, &aside) {
            Ok(()) => warn!(
                path = %self.path.display(),
                moved_to = %aside.display(),
                "moved unusable store file aside"
            ),
            Err(e) => warn!(path = %self.path.display(), error = %e, "could not move unusable store file aside"),
        }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

impl PersistentStore for JsonFileStore {
    fn load(&self) -> StoreResult<StoreMap> {
        Ok(self.read_map().0)
    }

    fn save(&self, data: &StoreMap) -> StoreResult<()> {
        let _guard = self.write_lock.lock().map_err(|_| StoreError::LockPoisoned)?;
        if self.read_map().1 == FileState::Unusable {
            self.move_aside();
        }
        self.write_map(data)
    }

    fn update(&self, mutate: &mut dyn FnMut(&mut StoreMap) -> bool) -> StoreResult<bool> {
        let _guard = self.write_lock.lock().map_err(|_| StoreError::LockPoisoned)?;
        let (mut data, state) = self.read_map();
        if !mutate(&mut data) {
            return Ok(false);
        }
        if state == FileState::Unusable {
            self.move_aside();
        }
        self.write_map(&data)?;
        Ok(true)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
