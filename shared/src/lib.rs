//! Health Metrics Shared Library
//!
//! Pure, side-effect-free domain logic used by the engine and WASM modules:
//! reference tables, classifiers, score calculators, entry models and the
//! bounded history sequence.

pub mod classifier;
pub mod diabetes_risk;
pub mod errors;
pub mod food_database;
pub mod health_metrics;
pub mod history;
pub mod immunization;
pub mod models;
pub mod reference_tables;
pub mod sleep;
pub mod types;
pub mod units;
pub mod validation;

// Re-export commonly used items
pub use classifier::*;
pub use diabetes_risk::*;
pub use errors::*;
pub use health_metrics::*;
pub use history::HistorySequence;
pub use models::*;
pub use sleep::*;
pub use types::*;
pub use units::*;
