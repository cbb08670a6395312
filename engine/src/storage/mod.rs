//! Key-value persistence port
//!
//! The session reads every key once when it opens and writes a key through
//! after each state change. Blobs are JSON documents.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::config::{StorageBackend, StorageConfig};
use crate::error::EngineResult;

/// Storage keys, one per persisted document
pub mod keys {
    pub const SLEEP_HISTORY: &str = "sleepHistory";
    pub const SLEEP_PROFILE: &str = "sleepProfile";
    pub const MEAL_HISTORY: &str = "mealHistory";
    pub const DAILY_INTAKE: &str = "dailyIntake";
    pub const NUTRITION_PROFILE: &str = "nutritionProfile";
    pub const BP_HISTORY: &str = "bpHistory";
    pub const GROWTH_HISTORY: &str = "growthHistory";
    pub const IMMUNIZATION_PROGRESS: &str = "immunizationProgress";

    pub const ALL: [&str; 8] = [
        SLEEP_HISTORY,
        SLEEP_PROFILE,
        MEAL_HISTORY,
        DAILY_INTAKE,
        NUTRITION_PROFILE,
        BP_HISTORY,
        GROWTH_HISTORY,
        IMMUNIZATION_PROGRESS,
    ];
}

/// Durable string blobs addressed by key
pub trait KeyValueStore {
    /// `None` when nothing has been saved under `key`
    fn load(&self, key: &str) -> EngineResult<Option<String>>;

    fn save(&mut self, key: &str, blob: &str) -> EngineResult<()>;
}

/// Build the adapter selected by configuration
pub fn open_store(config: &StorageConfig) -> EngineResult<Box<dyn KeyValueStore>> {
    match config.backend {
        StorageBackend::Memory => Ok(Box::new(MemoryStore::new())),
        StorageBackend::File => Ok(Box::new(FileStore::open(&config.data_dir)?)),
    }
}
