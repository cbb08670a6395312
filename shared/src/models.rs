//! Data models for the health metrics engine
//!
//! Profiles hold the latest user-entered values. Records are the
//! domain-specific payloads of logged history entries; the id and timestamp
//! are attached by [`LoggedEntry`] when a record is appended to a history.

use crate::classifier::{BloodPressureCategory, Classification, GrowthCategory, StatureCategory};
use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};
use uuid::Uuid;

// ============================================================================
// User Profile Types
// ============================================================================

/// Biological sex for physiological calculations and reference charts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BiologicalSex {
    #[default]
    Male,
    Female,
}

impl std::str::FromStr for BiologicalSex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "male" | "m" => Ok(BiologicalSex::Male),
            "female" | "f" => Ok(BiologicalSex::Female),
            _ => Err(format!("Unknown biological sex: {}", s)),
        }
    }
}

/// Activity level for TDEE calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    Light,
    /// Moderate exercise 3-5 days/week
    #[default]
    Moderate,
    /// Hard exercise 6-7 days/week
    Active,
    /// Very hard exercise or physical job
    VeryActive,
}

impl ActivityLevel {
    /// Get the activity multiplier for TDEE calculation
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Little or no exercise",
            ActivityLevel::Light => "Light exercise 1-3 days/week",
            ActivityLevel::Moderate => "Moderate exercise 3-5 days/week",
            ActivityLevel::Active => "Hard exercise 6-7 days/week",
            ActivityLevel::VeryActive => "Very hard exercise or physical job",
        }
    }
}

impl std::str::FromStr for ActivityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "light" => Ok(ActivityLevel::Light),
            "moderate" => Ok(ActivityLevel::Moderate),
            "active" => Ok(ActivityLevel::Active),
            "very_active" => Ok(ActivityLevel::VeryActive),
            _ => Err(format!("Unknown activity level: {}", s)),
        }
    }
}

/// Complete profile needed for energy and macro calculations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Age in years
    pub age_years: u32,
    pub sex: BiologicalSex,
    /// Weight in kilograms
    pub weight_kg: f64,
    /// Height in centimeters
    pub height_cm: f64,
    pub activity_level: ActivityLevel,
}

/// Sleep goals used by the insight rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepProfile {
    #[serde(default)]
    pub age_years: Option<u32>,
    pub sleep_goal_hours: f64,
    pub bedtime_goal: NaiveTime,
}

impl Default for SleepProfile {
    fn default() -> Self {
        Self {
            age_years: None,
            sleep_goal_hours: 8.0,
            bedtime_goal: NaiveTime::from_hms_opt(22, 30, 0).unwrap_or(NaiveTime::MIN),
        }
    }
}

// ============================================================================
// Logged Entries
// ============================================================================

/// A record stamped with its history identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggedEntry<T> {
    pub id: Uuid,
    pub recorded_at: DateTime<Utc>,
    #[serde(flatten)]
    pub record: T,
}

impl<T> LoggedEntry<T> {
    /// Stamp a record with a fresh id and the current time
    pub fn new(record: T) -> Self {
        Self::at(record, Utc::now())
    }

    /// Stamp a record with a fresh id and an explicit time
    pub fn at(record: T, recorded_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            recorded_at,
            record,
        }
    }
}

/// Mood on waking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Excellent,
    #[default]
    Good,
    Fair,
    Poor,
}

impl std::str::FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "excellent" => Ok(Mood::Excellent),
            "good" => Ok(Mood::Good),
            "fair" => Ok(Mood::Fair),
            "poor" => Ok(Mood::Poor),
            _ => Err(format!("Unknown mood: {}", s)),
        }
    }
}

/// One night of sleep with its derived duration and score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepRecord {
    pub bedtime: NaiveTime,
    pub wake_time: NaiveTime,
    /// Self-rated quality, 1-10
    pub quality: u8,
    pub mood: Mood,
    /// Caffeinated drinks during the day
    pub caffeine_intake: u32,
    /// Screen time before bed, hours
    pub screen_time_hours: f64,
    pub exercise: bool,
    /// Self-rated stress, 1-5
    pub stress: u8,
    #[serde(default)]
    pub notes: String,
    /// Hours slept, rounded to one decimal
    pub duration_hours: f64,
    pub sleep_score: i32,
}

/// Meal slot a food was logged under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    #[default]
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl std::str::FromStr for MealSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "breakfast" => Ok(MealSlot::Breakfast),
            "lunch" => Ok(MealSlot::Lunch),
            "dinner" => Ok(MealSlot::Dinner),
            "snack" => Ok(MealSlot::Snack),
            _ => Err(format!(
                "Invalid meal type. Must be one of: breakfast, lunch, dinner, snack (got {})",
                s
            )),
        }
    }
}

/// Macronutrient content of a serving or a logged portion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Nutrition {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    #[serde(default)]
    pub fiber: f64,
}

impl Nutrition {
    /// Scale every nutrient by a serving multiplier
    pub fn scaled(&self, quantity: f64) -> Self {
        Self {
            calories: self.calories * quantity,
            protein: self.protein * quantity,
            carbs: self.carbs * quantity,
            fat: self.fat * quantity,
            fiber: self.fiber * quantity,
        }
    }
}

impl Add for Nutrition {
    type Output = Nutrition;

    fn add(self, rhs: Nutrition) -> Nutrition {
        Nutrition {
            calories: self.calories + rhs.calories,
            protein: self.protein + rhs.protein,
            carbs: self.carbs + rhs.carbs,
            fat: self.fat + rhs.fat,
            fiber: self.fiber + rhs.fiber,
        }
    }
}

impl Sub for Nutrition {
    type Output = Nutrition;

    /// Field-wise difference, floored at zero
    fn sub(self, rhs: Nutrition) -> Nutrition {
        Nutrition {
            calories: (self.calories - rhs.calories).max(0.0),
            protein: (self.protein - rhs.protein).max(0.0),
            carbs: (self.carbs - rhs.carbs).max(0.0),
            fat: (self.fat - rhs.fat).max(0.0),
            fiber: (self.fiber - rhs.fiber).max(0.0),
        }
    }
}

/// A logged food portion; `nutrition` is already scaled by `quantity`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealRecord {
    pub name: String,
    pub meal: MealSlot,
    pub quantity: f64,
    pub nutrition: Nutrition,
}

/// A blood pressure reading with the category assigned at log time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BpRecord {
    pub systolic: u32,
    pub diastolic: u32,
    #[serde(default)]
    pub age_years: Option<u32>,
    pub category: BloodPressureCategory,
}

/// A child growth measurement with its chart classifications
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthRecord {
    pub sex: BiologicalSex,
    pub age_months: u32,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub weight_for_age: Classification<GrowthCategory>,
    pub height_for_age: Classification<StatureCategory>,
}

pub type SleepEntry = LoggedEntry<SleepRecord>;
pub type MealEntry = LoggedEntry<MealRecord>;
pub type BpReading = LoggedEntry<BpRecord>;
pub type GrowthMeasurement = LoggedEntry<GrowthRecord>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_multipliers() {
        assert_eq!(ActivityLevel::Sedentary.multiplier(), 1.2);
        assert_eq!(ActivityLevel::Light.multiplier(), 1.375);
        assert_eq!(ActivityLevel::Moderate.multiplier(), 1.55);
        assert_eq!(ActivityLevel::Active.multiplier(), 1.725);
        assert_eq!(ActivityLevel::VeryActive.multiplier(), 1.9);
    }

    #[test]
    fn test_activity_level_parsing() {
        assert_eq!("very_active".parse::<ActivityLevel>(), Ok(ActivityLevel::VeryActive));
        assert_eq!("LIGHT".parse::<ActivityLevel>(), Ok(ActivityLevel::Light));
        assert!("lightly_active".parse::<ActivityLevel>().is_err());
    }

    #[test]
    fn test_nutrition_scaling_and_floor() {
        let serving = Nutrition { calories: 71.0, protein: 3.0, carbs: 15.0, fat: 0.4, fiber: 2.7 };
        let portion = serving.scaled(2.0);
        assert_eq!(portion.calories, 142.0);
        assert_eq!(portion.fiber, 5.4);

        let total = Nutrition::default() + portion;
        let after = total - portion.scaled(3.0);
        assert_eq!(after, Nutrition::default());
    }

    #[test]
    fn test_default_sleep_profile() {
        let profile = SleepProfile::default();
        assert_eq!(profile.sleep_goal_hours, 8.0);
        assert_eq!(profile.bedtime_goal, NaiveTime::from_hms_opt(22, 30, 0).unwrap());
    }

    #[test]
    fn test_logged_entry_flattens_record() {
        let entry = LoggedEntry::new(MealRecord {
            name: "Roti (1 medium)".to_string(),
            meal: MealSlot::Dinner,
            quantity: 2.0,
            nutrition: Nutrition::default(),
        });
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["name"], "Roti (1 medium)");
        assert_eq!(json["meal"], "dinner");
        assert!(json["id"].is_string());
        assert!(json["recorded_at"].is_string());
    }
}
