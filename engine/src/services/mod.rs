//! Domain services
//!
//! Services validate input, derive results with the shared calculators,
//! update the session and write the changed keys through to storage.

pub mod blood_pressure;
pub mod growth;
pub mod immunization;
pub mod nutrition;
pub mod sleep;

pub use blood_pressure::BloodPressureService;
pub use growth::GrowthService;
pub use immunization::ImmunizationService;
pub use nutrition::NutritionService;
pub use sleep::SleepService;
