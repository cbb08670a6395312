//! History keys: newest-first JSON arrays of logged entries

use crate::error::EngineResult;
use crate::storage::KeyValueStore;
use health_metrics_shared::history::HistorySequence;
use health_metrics_shared::models::LoggedEntry;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

/// Bounded history load and save
pub struct HistoryRepository;

impl HistoryRepository {
    /// Load a history, truncated to `cap`.
    ///
    /// A missing or malformed blob yields an empty history.
    pub fn load<T: DeserializeOwned>(
        store: &dyn KeyValueStore,
        key: &str,
        cap: usize,
    ) -> EngineResult<HistorySequence<T>> {
        let Some(blob) = store.load(key)? else {
            return Ok(HistorySequence::new(cap));
        };

        match serde_json::from_str::<Vec<LoggedEntry<T>>>(&blob) {
            Ok(entries) => {
                if entries.len() > cap {
                    debug!(key, stored = entries.len(), cap, "Truncating stored history");
                }
                Ok(HistorySequence::from_entries(cap, entries))
            }
            Err(err) => {
                warn!(key, error = %err, "Discarding malformed history");
                Ok(HistorySequence::new(cap))
            }
        }
    }

    pub fn save<T: Serialize>(
        store: &mut dyn KeyValueStore,
        key: &str,
        history: &HistorySequence<T>,
    ) -> EngineResult<()> {
        let blob = serde_json::to_string(history.entries())?;
        store.save(key, &blob)
    }
}
