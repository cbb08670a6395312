//! Form input types
//!
//! Forms mirror what a UI collects: required fields are `Option`s so that an
//! absent value surfaces as [`MetricError::MissingInput`] instead of a silent
//! default. Each form converts into the concrete input of its calculator.

use crate::diabetes_risk::{IdrsInput, PhysicalActivity};
use crate::errors::{require, require_value, MetricError, MetricResult};
use crate::health_metrics::{BodyMeasurements, HydrationActivity};
use crate::models::{ActivityLevel, BiologicalSex, MealSlot, Mood, Nutrition, UserProfile};
use crate::units::LengthUnit;
use crate::validation::{
    validate_age_years, validate_blood_pressure, validate_height_cm, validate_nutrient,
    validate_quantity, validate_weight_kg,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

// ============================================================================
// Profile and Energy Forms
// ============================================================================

/// Profile inputs for BMR/TDEE and macro targets
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileForm {
    pub age_years: Option<u32>,
    #[serde(default)]
    pub sex: BiologicalSex,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    #[serde(default)]
    pub activity_level: ActivityLevel,
}

impl ProfileForm {
    pub fn to_profile(&self) -> MetricResult<UserProfile> {
        let weight_kg = require(self.weight_kg, "weight")?;
        let height_cm = require(self.height_cm, "height")?;
        let age_years = require_value(self.age_years, "age")?;
        validate_weight_kg(weight_kg)?;
        validate_height_cm(height_cm)?;
        validate_age_years(age_years)?;
        Ok(UserProfile {
            age_years,
            sex: self.sex,
            weight_kg,
            height_cm,
            activity_level: self.activity_level,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BmiForm {
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
}

impl BmiForm {
    /// Required `(weight_kg, height_cm)`
    pub fn values(&self) -> MetricResult<(f64, f64)> {
        Ok((require(self.weight_kg, "weight")?, require(self.height_cm, "height")?))
    }
}

// ============================================================================
// Body Composition Forms
// ============================================================================

/// Circumference inputs for the US Navy body fat formula
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyFatForm {
    #[serde(default)]
    pub sex: BiologicalSex,
    pub age_years: Option<u32>,
    pub weight_kg: Option<f64>,
    pub height: Option<f64>,
    pub neck: Option<f64>,
    pub waist: Option<f64>,
    pub hip: Option<f64>,
    /// Unit of height and circumferences
    #[serde(default = "default_circumference_unit")]
    pub unit: LengthUnit,
}

fn default_circumference_unit() -> LengthUnit {
    LengthUnit::Inches
}

impl Default for BodyFatForm {
    fn default() -> Self {
        Self {
            sex: BiologicalSex::default(),
            age_years: None,
            weight_kg: None,
            height: None,
            neck: None,
            waist: None,
            hip: None,
            unit: default_circumference_unit(),
        }
    }
}

impl BodyFatForm {
    /// Required weight (kg) and measurements converted to centimeters
    pub fn measurements(&self) -> MetricResult<(f64, BodyMeasurements)> {
        let weight_kg = require(self.weight_kg, "weight")?;
        let height = require(self.height, "height")?;
        let neck = require(self.neck, "neck")?;
        let waist = require(self.waist, "waist")?;
        let hip = match self.sex {
            BiologicalSex::Female => Some(require(self.hip, "hip")?),
            BiologicalSex::Male => None,
        };
        Ok((
            weight_kg,
            BodyMeasurements {
                height_cm: self.unit.to_cm(height),
                neck_cm: self.unit.to_cm(neck),
                waist_cm: self.unit.to_cm(waist),
                hip_cm: hip.map(|h| self.unit.to_cm(h)),
            },
        ))
    }
}

/// IDRS questionnaire
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdrsForm {
    pub age_years: Option<u32>,
    #[serde(default)]
    pub sex: BiologicalSex,
    pub waist_cm: Option<f64>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub physical_activity: PhysicalActivity,
    #[serde(default)]
    pub family_history: bool,
    #[serde(default)]
    pub hypertension_meds: bool,
    #[serde(default)]
    pub high_glucose: bool,
}

impl IdrsForm {
    pub fn to_input(&self) -> MetricResult<IdrsInput> {
        Ok(IdrsInput {
            age_years: require_value(self.age_years, "age")?,
            sex: self.sex,
            waist_cm: require(self.waist_cm, "waist")?,
            height_cm: require(self.height_cm, "height")?,
            weight_kg: require(self.weight_kg, "weight")?,
            physical_activity: self.physical_activity,
            family_history: self.family_history,
            hypertension_meds: self.hypertension_meds,
            high_glucose: self.high_glucose,
        })
    }
}

// ============================================================================
// Sleep Form
// ============================================================================

/// One night's sleep log input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct SleepForm {
    /// "HH:MM"
    pub bedtime: Option<String>,
    /// "HH:MM"
    pub wake_time: Option<String>,
    #[validate(range(min = 1, max = 10))]
    pub quality: u8,
    pub mood: Mood,
    pub caffeine_intake: u32,
    #[validate(range(min = 0.0, max = 24.0))]
    pub screen_time_hours: f64,
    pub exercise: bool,
    #[validate(range(min = 1, max = 5))]
    pub stress: u8,
    #[validate(length(max = 1000))]
    pub notes: String,
}

impl Default for SleepForm {
    fn default() -> Self {
        Self {
            bedtime: None,
            wake_time: None,
            quality: 5,
            mood: Mood::Good,
            caffeine_intake: 0,
            screen_time_hours: 0.0,
            exercise: false,
            stress: 3,
            notes: String::new(),
        }
    }
}

impl SleepForm {
    /// Check the bounded fields
    pub fn check(&self) -> MetricResult<()> {
        self.validate().map_err(MetricError::from)
    }
}

// ============================================================================
// Cardiovascular Forms
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BloodPressureForm {
    pub systolic: Option<u32>,
    pub diastolic: Option<u32>,
    /// Adult thresholds apply when absent
    pub age_years: Option<u32>,
}

impl BloodPressureForm {
    /// Required `(systolic, diastolic)`
    pub fn values(&self) -> MetricResult<(u32, u32)> {
        let systolic = require_value(self.systolic, "systolic")?;
        let diastolic = require_value(self.diastolic, "diastolic")?;
        validate_blood_pressure(systolic, diastolic)?;
        Ok((systolic, diastolic))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeartRateForm {
    pub age_years: Option<u32>,
    pub resting_hr: Option<u32>,
}

// ============================================================================
// Pediatric Forms
// ============================================================================

/// A child growth measurement
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GrowthForm {
    #[serde(default)]
    pub sex: BiologicalSex,
    pub age_months: Option<u32>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
}

impl GrowthForm {
    /// Required `(age_months, weight_kg, height_cm)`
    pub fn values(&self) -> MetricResult<(u32, f64, f64)> {
        let age_months = require_value(self.age_months, "age_months")?;
        let weight_kg = require(self.weight_kg, "weight")?;
        let height_cm = require(self.height_cm, "height")?;
        validate_weight_kg(weight_kg)?;
        validate_height_cm(height_cm)?;
        Ok((age_months, weight_kg, height_cm))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BmiForAgeForm {
    #[serde(default)]
    pub sex: BiologicalSex,
    pub age_years: Option<u32>,
    pub bmi: Option<f64>,
}

// ============================================================================
// Nutrition Forms
// ============================================================================

/// A food not in the built-in database
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomFoodForm {
    pub name: Option<String>,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
    pub fiber: Option<f64>,
    /// Serving multiplier, 1 when absent
    pub quantity: Option<f64>,
    #[serde(default)]
    pub meal: MealSlot,
}

impl CustomFoodForm {
    /// Name, per-serving nutrition and quantity.
    ///
    /// Name and calories are required; other nutrients default to 0.
    pub fn to_parts(&self) -> MetricResult<(String, Nutrition, f64)> {
        let name = self
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or(MetricError::MissingInput("name"))?
            .to_string();
        let calories = require(self.calories, "calories")?;

        let nutrition = Nutrition {
            calories,
            protein: self.protein.unwrap_or(0.0),
            carbs: self.carbs.unwrap_or(0.0),
            fat: self.fat.unwrap_or(0.0),
            fiber: self.fiber.unwrap_or(0.0),
        };
        for value in [
            nutrition.calories,
            nutrition.protein,
            nutrition.carbs,
            nutrition.fat,
            nutrition.fiber,
        ] {
            validate_nutrient(value)?;
        }

        let quantity = self.quantity.unwrap_or(1.0);
        validate_quantity(quantity)?;
        Ok((name, nutrition, quantity))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WaterGoalForm {
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub activity: HydrationActivity,
}
