//! Health Metrics Engine
//!
//! Stateful tracking on top of the shared calculators. A [`state::Session`]
//! owns the bounded histories, the daily intake accumulator, the profiles
//! and immunization progress, and writes every change through a
//! [`storage::KeyValueStore`].
//!
//! ## Architecture
//!
//! - Services: per-domain operations (sleep, nutrition, blood pressure, growth, immunization)
//! - Aggregates: rolling statistics and insights, recomputed on read
//! - Repositories: typed documents and histories over the store
//! - Storage: in-memory and directory-of-JSON adapters

pub mod aggregates;
pub mod config;
pub mod error;
pub mod repositories;
pub mod services;
pub mod state;
pub mod storage;
pub mod telemetry;

pub use config::EngineConfig;
pub use error::{EngineError, EngineResult};
pub use state::Session;
