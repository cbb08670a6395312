//! Single-document keys: profiles, the daily intake accumulator and
//! immunization progress

use crate::error::EngineResult;
use crate::storage::KeyValueStore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

/// Whole-document load and save
pub struct DocumentRepository;

impl DocumentRepository {
    /// Load a document, `None` when absent or malformed
    pub fn load<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> EngineResult<Option<T>> {
        let Some(blob) = store.load(key)? else {
            return Ok(None);
        };

        match serde_json::from_str(&blob) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                warn!(key, error = %err, "Discarding malformed document");
                Ok(None)
            }
        }
    }

    /// Load a document, falling back to `T::default()`
    pub fn load_or_default<T: DeserializeOwned + Default>(
        store: &dyn KeyValueStore,
        key: &str,
    ) -> EngineResult<T> {
        Ok(Self::load(store, key)?.unwrap_or_default())
    }

    /// Serialize and write a document
    pub fn save<T: Serialize>(store: &mut dyn KeyValueStore, key: &str, value: &T) -> EngineResult<()> {
        let blob = serde_json::to_string(value)?;
        store.save(key, &blob)
    }
}
