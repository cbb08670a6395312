//! Configuration management for the health metrics engine
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: HM__)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub storage: StorageConfig,
    pub history: HistoryConfig,
    #[serde(default)]
    pub sleep: SleepConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Which key-value adapter backs the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    File,
}

/// Storage configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Directory holding one `<key>.json` blob per storage key
    pub data_dir: PathBuf,
}

/// Capacity of each bounded history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryConfig {
    pub bp_cap: usize,
    pub sleep_cap: usize,
    pub meal_cap: usize,
    pub growth_cap: usize,
}

/// Windows and thresholds for sleep aggregates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepConfig {
    /// Entries averaged by the rolling window and inspected by insights
    pub window: usize,
    /// History length below which no insights are produced
    pub insight_min_entries: usize,
    /// Caffeine units above which a night counts as high-caffeine
    pub caffeine_units_threshold: u32,
    /// High-caffeine nights in the window above which the warning fires
    pub caffeine_days_threshold: usize,
    pub mood_window: usize,
    pub chart_window: usize,
}

impl Default for SleepConfig {
    fn default() -> Self {
        Self {
            window: 7,
            insight_min_entries: 3,
            caffeine_units_threshold: 2,
            caffeine_days_threshold: 3,
            mood_window: 30,
            chart_window: 14,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub filter: String,
    /// JSON output instead of pretty output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "health_metrics_engine=info".to_string(),
            json: false,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig {
                backend: StorageBackend::Memory,
                data_dir: PathBuf::from("data"),
            },
            history: HistoryConfig {
                bp_cap: 10,
                sleep_cap: 30,
                meal_cap: 50,
                growth_cap: 50,
            },
            sleep: SleepConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with HM__ prefix
    pub fn load() -> Result<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let config = config::Config::builder()
            .add_source(config::Config::try_from(&EngineConfig::default())?)
            .add_source(config::File::with_name(&config_file).required(false))
            // e.g., HM__HISTORY__SLEEP_CAP=40 sets history.sleep_cap
            .add_source(config::Environment::with_prefix("HM").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }
}
