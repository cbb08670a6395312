//! Common test utilities for integration tests

#![allow(dead_code)]

use health_metrics_engine::config::{EngineConfig, StorageBackend};
use health_metrics_engine::Session;
use health_metrics_shared::models::Mood;
use health_metrics_shared::types::SleepForm;
use std::path::Path;
use tempfile::TempDir;

/// A file-backed session in a throwaway directory
pub struct TestSession {
    pub dir: TempDir,
    pub session: Session,
}

impl TestSession {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let session = open_at(dir.path());
        Self { dir, session }
    }

    /// Drop the current session and open a fresh one over the same files
    pub fn reopen(self) -> Self {
        let TestSession { dir, session } = self;
        drop(session);
        let session = open_at(dir.path());
        Self { dir, session }
    }
}

pub fn file_config(dir: &Path) -> EngineConfig {
    let mut config = EngineConfig::default();
    config.storage.backend = StorageBackend::File;
    config.storage.data_dir = dir.to_path_buf();
    config
}

fn open_at(dir: &Path) -> Session {
    Session::from_config(file_config(dir)).expect("Failed to open session")
}

pub fn sleep_form(bedtime: &str, wake_time: &str, quality: u8, caffeine: u32) -> SleepForm {
    SleepForm {
        bedtime: Some(bedtime.to_string()),
        wake_time: Some(wake_time.to_string()),
        quality,
        mood: Mood::Good,
        caffeine_intake: caffeine,
        stress: 3,
        ..SleepForm::default()
    }
}
