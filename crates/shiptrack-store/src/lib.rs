//! Shiptrack persistent store.
//!
//! The store is a whole-document key -> record mapping with load/replace
//! semantics:
//! - [`JsonFileStore`] keeps the mapping in one JSON file and replaces it
//!   atomically on save
//! - [`InMemoryStore`] is the test double
//!
//! Readers never see malformed shapes: [`StoreSnapshot`] and [`KeyRecord`]
//! are the one place where raw JSON is coerced into typed records.

#![deny(unsafe_code)]
#![warn(rust_2018_idioms)]

mod error;
pub mod json_file;
pub mod memory;
pub mod snapshot;
mod traits;

pub use error::{StoreError, StoreResult};
pub use json_file::JsonFileStore;
pub use memory::InMemoryStore;
pub use snapshot::{KeyRecord, StoreSnapshot};
pub use traits::{PersistentStore, StoreMap};
