//! Health metrics calculations module
//!
//! Provides calculations for BMI, BMR/TDEE, macro targets, body fat,
//! heart-rate training zones and hydration based on user profile data.
//!
//! # Design Principles
//!
//! 1. **Pure Functions**: All calculations are pure, no side effects
//! 2. **Explicit Failure**: Inputs outside a formula's domain yield
//!    [`MetricError::Domain`], never NaN
//! 3. **Reproducible Rounding**: Every rounded output goes through
//!    [`round_half_up`]

use crate::classifier::{classify_body_fat, BodyFatCategory};
use crate::errors::{MetricError, MetricResult};
use crate::models::{ActivityLevel, BiologicalSex, UserProfile};
use serde::{Deserialize, Serialize};

// ============================================================================
// Rounding
// ============================================================================

/// Round to the nearest integer, ties toward positive infinity
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Round to one decimal place, ties toward positive infinity
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0 + 0.5).floor() / 10.0
}

// ============================================================================
// BMI Calculations
// ============================================================================

/// Calculate BMI from weight and height
///
/// Formula: BMI = weight(kg) / height(m)²
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> MetricResult<f64> {
    if !(height_cm.is_finite() && height_cm > 0.0) {
        return Err(MetricError::Domain("Height must be greater than 0".to_string()));
    }
    if !(weight_kg.is_finite() && weight_kg > 0.0) {
        return Err(MetricError::Domain("Weight must be greater than 0".to_string()));
    }
    let height_m = height_cm / 100.0;
    Ok(weight_kg / (height_m * height_m))
}

// ============================================================================
// BMR and TDEE Calculations
// ============================================================================

/// Calculate Basal Metabolic Rate using Mifflin-St Jeor equation
///
/// Men: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) + 5
/// Women: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) - 161
pub fn calculate_bmr_mifflin(weight_kg: f64, height_cm: f64, age_years: u32, sex: BiologicalSex) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age_years as f64;
    match sex {
        BiologicalSex::Male => base + 5.0,
        BiologicalSex::Female => base - 161.0,
    }
}

/// Which multiplier a TDEE estimate applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TdeeVariant {
    /// Scale by the profile's activity level (nutrition tracker)
    #[default]
    ActivityScaled,
    /// Always 1.2, regardless of activity level (calorie-needs tool)
    FlatSedentary,
}

impl TdeeVariant {
    pub fn multiplier(&self, activity_level: ActivityLevel) -> f64 {
        match self {
            TdeeVariant::ActivityScaled => activity_level.multiplier(),
            TdeeVariant::FlatSedentary => ActivityLevel::Sedentary.multiplier(),
        }
    }
}

/// TDEE calculation result with breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TdeeResult {
    /// Basal Metabolic Rate
    pub bmr: f64,
    /// Multiplier applied to the BMR
    pub activity_multiplier: f64,
    /// Total Daily Energy Expenditure
    pub tdee: f64,
    pub variant: TdeeVariant,
}

/// Calculate Total Daily Energy Expenditure
///
/// TDEE = BMR × Activity Multiplier
pub fn calculate_tdee(profile: &UserProfile, variant: TdeeVariant) -> TdeeResult {
    let bmr = calculate_bmr_mifflin(profile.weight_kg, profile.height_cm, profile.age_years, profile.sex);
    let activity_multiplier = variant.multiplier(profile.activity_level);
    TdeeResult {
        bmr,
        activity_multiplier,
        tdee: bmr * activity_multiplier,
        variant,
    }
}

// ============================================================================
// Macro Targets
// ============================================================================

/// Daily nutrition targets derived from the profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroTargets {
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub fiber_g: f64,
    pub water_ml: f64,
}

/// Recommended daily fiber (g) by age and sex
pub fn fiber_target_g(age_years: u32, sex: BiologicalSex) -> f64 {
    match (age_years < 50, sex) {
        (true, BiologicalSex::Male) => 38.0,
        (true, BiologicalSex::Female) => 25.0,
        (false, BiologicalSex::Male) => 30.0,
        (false, BiologicalSex::Female) => 21.0,
    }
}

/// Calculate macro targets
///
/// Protein 1.6 g/kg; carbs 45% and fat 30% of TDEE; water 35 ml/kg.
pub fn calculate_macro_targets(profile: &UserProfile) -> MacroTargets {
    let tdee = calculate_tdee(profile, TdeeVariant::ActivityScaled).tdee;
    MacroTargets {
        calories: round_half_up(tdee),
        protein_g: round_half_up(profile.weight_kg * 1.6),
        carbs_g: round_half_up(tdee * 0.45 / 4.0),
        fat_g: round_half_up(tdee * 0.30 / 9.0),
        fiber_g: fiber_target_g(profile.age_years, profile.sex),
        water_ml: round_half_up(profile.weight_kg * 35.0),
    }
}

/// Intake as a rounded percentage of target; `None` when the target is zero
pub fn percent_of_target(intake: f64, target: f64) -> Option<f64> {
    if target == 0.0 || !target.is_finite() {
        return None;
    }
    Some(round_half_up(intake / target * 100.0))
}

// ============================================================================
// Body Fat Estimation
// ============================================================================

/// Body fat result from circumference measurements
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyFatResult {
    pub percent: f64,
    pub category: BodyFatCategory,
    pub fat_mass_kg: f64,
    pub lean_mass_kg: f64,
}

/// Circumference inputs in centimeters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyMeasurements {
    pub height_cm: f64,
    pub neck_cm: f64,
    pub waist_cm: f64,
    /// Required for the female formula only
    pub hip_cm: Option<f64>,
}

/// US Navy body fat percentage, clamped at 0
///
/// Men: 495 / (1.0324 − 0.19077·log10(waist − neck) + 0.15456·log10(height)) − 450
/// Women: 495 / (1.29579 − 0.35004·log10(waist + hip − neck) + 0.22100·log10(height)) − 450
pub fn calculate_body_fat_navy(sex: BiologicalSex, m: &BodyMeasurements) -> MetricResult<f64> {
    if m.height_cm <= 0.0 {
        return Err(MetricError::Domain("Height must be greater than 0".to_string()));
    }

    let percent = match sex {
        BiologicalSex::Male => {
            let girth = m.waist_cm - m.neck_cm;
            if girth <= 0.0 {
                return Err(MetricError::Domain(
                    "Waist must be larger than neck".to_string(),
                ));
            }
            495.0 / (1.0324 - 0.19077 * girth.log10() + 0.15456 * m.height_cm.log10()) - 450.0
        }
        BiologicalSex::Female => {
            let hip_cm = m.hip_cm.ok_or(MetricError::MissingInput("hip"))?;
            let girth = m.waist_cm + hip_cm - m.neck_cm;
            if girth <= 0.0 {
                return Err(MetricError::Domain(
                    "Waist plus hip must be larger than neck".to_string(),
                ));
            }
            495.0 / (1.29579 - 0.35004 * girth.log10() + 0.22100 * m.height_cm.log10()) - 450.0
        }
    };

    if !percent.is_finite() {
        return Err(MetricError::Domain(
            "Measurements are outside the formula's range".to_string(),
        ));
    }
    Ok(percent.max(0.0))
}

/// Body fat percentage with category and mass split
pub fn calculate_body_fat(
    sex: BiologicalSex,
    weight_kg: f64,
    measurements: &BodyMeasurements,
) -> MetricResult<BodyFatResult> {
    let percent = calculate_body_fat_navy(sex, measurements)?;
    let fat_mass_kg = weight_kg * percent / 100.0;
    Ok(BodyFatResult {
        percent,
        category: classify_body_fat(percent, sex),
        fat_mass_kg,
        lean_mass_kg: weight_kg - fat_mass_kg,
    })
}

// ============================================================================
// Heart Rate Zones
// ============================================================================

/// Resting heart rate assumed when none is given
pub const DEFAULT_RESTING_HR: u32 = 60;

/// (name, description, lower %, upper %) of heart-rate reserve
const ZONES: [(&str, &str, u32, u32); 5] = [
    ("Recovery", "Active recovery", 50, 60),
    ("Aerobic Base", "Fat burning", 60, 70),
    ("Aerobic", "Endurance building", 70, 80),
    ("Lactate Threshold", "Performance", 80, 90),
    ("VO2 Max", "Maximum effort", 90, 100),
];

/// A training zone with Karvonen bpm bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartRateZone {
    pub name: String,
    pub description: String,
    pub min_percent: u32,
    pub max_percent: u32,
    pub min_bpm: u32,
    pub max_bpm: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartRateZones {
    pub max_hr: u32,
    pub resting_hr: u32,
    pub reserve: u32,
    pub zones: Vec<HeartRateZone>,
}

/// Calculate heart-rate training zones (Karvonen method)
///
/// max HR = 220 − age; zone bpm = resting + reserve × intensity
pub fn calculate_heart_rate_zones(age_years: u32, resting_hr: Option<u32>) -> MetricResult<HeartRateZones> {
    let resting_hr = resting_hr.unwrap_or(DEFAULT_RESTING_HR);
    let max_hr = 220u32
        .checked_sub(age_years)
        .ok_or_else(|| MetricError::Domain("Age must be below 220".to_string()))?;
    if resting_hr >= max_hr {
        return Err(MetricError::Domain(
            "Resting heart rate must be below maximum heart rate".to_string(),
        ));
    }
    let reserve = max_hr - resting_hr;

    let bpm = |percent: u32| -> u32 {
        round_half_up(resting_hr as f64 + reserve as f64 * percent as f64 / 100.0) as u32
    };

    let zones = ZONES
        .iter()
        .map(|&(name, description, min_percent, max_percent)| HeartRateZone {
            name: name.to_string(),
            description: description.to_string(),
            min_percent,
            max_percent,
            min_bpm: bpm(min_percent),
            max_bpm: bpm(max_percent),
        })
        .collect();

    Ok(HeartRateZones {
        max_hr,
        resting_hr,
        reserve,
        zones,
    })
}

// ============================================================================
// Hydration Calculations
// ============================================================================

/// Daily goal (litres) when no weight is known
pub const DEFAULT_WATER_GOAL_L: f64 = 2.5;

/// Activity scale used by the hydration calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HydrationActivity {
    Low,
    #[default]
    Moderate,
    High,
}

impl HydrationActivity {
    pub fn multiplier(&self) -> f64 {
        match self {
            HydrationActivity::Low => 1.2,
            HydrationActivity::Moderate => 1.5,
            HydrationActivity::High => 1.8,
        }
    }
}

/// Recommended daily water in litres
///
/// Base 35 ml per kg, scaled by activity. Falls back to
/// [`DEFAULT_WATER_GOAL_L`] without a weight.
pub fn calculate_water_goal_litres(weight_kg: Option<f64>, activity: HydrationActivity) -> f64 {
    match weight_kg {
        Some(w) if w > 0.0 && w.is_finite() => w * 35.0 * activity.multiplier() / 1000.0,
        _ => DEFAULT_WATER_GOAL_L,
    }
}

/// Share of the goal consumed, capped at 100
pub fn water_progress_percent(consumed_ml: f64, goal_ml: f64) -> f64 {
    if goal_ml <= 0.0 {
        return 0.0;
    }
    (consumed_ml / goal_ml * 100.0).min(100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn profile(sex: BiologicalSex, activity_level: ActivityLevel) -> UserProfile {
        UserProfile {
            age_years: 30,
            sex,
            weight_kg: 80.0,
            height_cm: 180.0,
            activity_level,
        }
    }

    // =========================================================================
    // Rounding Tests
    // =========================================================================

    #[test]
    fn test_rounding_ties_toward_positive_infinity() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(84.4), 84.0);
        assert_eq!(round_one_decimal(7.25), 7.3);
        assert_eq!(round_one_decimal(7.24), 7.2);
    }

    // =========================================================================
    // BMI Tests
    // =========================================================================

    #[test]
    fn test_bmi_calculation() {
        // 70kg, 175cm -> BMI ~22.86
        let bmi = calculate_bmi(70.0, 175.0).unwrap();
        assert!((bmi - 22.857).abs() < 0.001);
    }

    #[test]
    fn test_bmi_rejects_non_positive_height() {
        assert!(matches!(calculate_bmi(70.0, 0.0), Err(MetricError::Domain(_))));
        assert!(matches!(calculate_bmi(70.0, -150.0), Err(MetricError::Domain(_))));
    }

    #[rstest]
    #[case(70.0, f64::NAN)]
    #[case(70.0, f64::INFINITY)]
    #[case(f64::NAN, 175.0)]
    #[case(-70.0, 175.0)]
    #[case(0.0, 175.0)]
    fn test_bmi_rejects_invalid_inputs(#[case] weight_kg: f64, #[case] height_cm: f64) {
        assert!(matches!(calculate_bmi(weight_kg, height_cm), Err(MetricError::Domain(_))));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: BMI matches weight / height² in metres
        #[test]
        fn prop_bmi_formula(weight in 20.0f64..300.0, height in 50.0f64..250.0) {
            let bmi = calculate_bmi(weight, height).unwrap();
            let expected = weight / (height / 100.0).powi(2);
            prop_assert!((bmi - expected).abs() < 1e-9);
        }

        /// Property: Scaling weight by k² and height by k leaves BMI unchanged
        #[test]
        fn prop_bmi_scale_invariant(
            weight in 20.0f64..200.0,
            height in 100.0f64..220.0,
            k in 0.5f64..2.0
        ) {
            let a = calculate_bmi(weight, height).unwrap();
            let b = calculate_bmi(weight * k * k, height * k).unwrap();
            prop_assert!((a - b).abs() < 1e-9);
        }

        /// Property: Heavier weight = higher BMI (same height)
        #[test]
        fn prop_bmi_increases_with_weight(
            weight1 in 50.0f64..100.0,
            weight2 in 100.1f64..150.0,
            height in 150.0f64..200.0
        ) {
            let bmi1 = calculate_bmi(weight1, height).unwrap();
            let bmi2 = calculate_bmi(weight2, height).unwrap();
            prop_assert!(bmi2 > bmi1);
        }
    }

    // =========================================================================
    // BMR/TDEE Tests
    // =========================================================================

    #[test]
    fn test_bmr_mifflin() {
        // 10*80 + 6.25*180 - 5*30 + 5 = 1780
        assert_eq!(calculate_bmr_mifflin(80.0, 180.0, 30, BiologicalSex::Male), 1780.0);
        // 10*60 + 6.25*165 - 5*30 - 161 = 1320.25
        assert_eq!(calculate_bmr_mifflin(60.0, 165.0, 30, BiologicalSex::Female), 1320.25);
    }

    #[test]
    fn test_tdee_variants() {
        let p = profile(BiologicalSex::Male, ActivityLevel::Moderate);

        let scaled = calculate_tdee(&p, TdeeVariant::ActivityScaled);
        assert_eq!(scaled.activity_multiplier, 1.55);
        assert!((scaled.tdee - 2759.0).abs() < 1e-9);

        let flat = calculate_tdee(&p, TdeeVariant::FlatSedentary);
        assert_eq!(flat.activity_multiplier, 1.2);
        assert!((flat.tdee - 2136.0).abs() < 1e-9);
    }

    #[test]
    fn test_macro_targets() {
        let targets = calculate_macro_targets(&profile(BiologicalSex::Male, ActivityLevel::Moderate));
        // TDEE 2759
        assert_eq!(targets.calories, 2759.0);
        assert_eq!(targets.protein_g, 128.0);
        assert_eq!(targets.carbs_g, 310.0); // 310.39
        assert_eq!(targets.fat_g, 92.0); // 91.97
        assert_eq!(targets.fiber_g, 38.0);
        assert_eq!(targets.water_ml, 2800.0);
    }

    #[test]
    fn test_fiber_targets() {
        assert_eq!(fiber_target_g(49, BiologicalSex::Female), 25.0);
        assert_eq!(fiber_target_g(50, BiologicalSex::Female), 21.0);
        assert_eq!(fiber_target_g(50, BiologicalSex::Male), 30.0);
    }

    #[test]
    fn test_percent_of_target() {
        assert_eq!(percent_of_target(1379.5, 2759.0), Some(50.0));
        assert_eq!(percent_of_target(10.0, 0.0), None);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: Male BMR exceeds female BMR by exactly 166 kcal
        #[test]
        fn prop_male_female_bmr_gap(
            weight in 40.0f64..150.0,
            height in 140.0f64..210.0,
            age in 18u32..80
        ) {
            let male = calculate_bmr_mifflin(weight, height, age, BiologicalSex::Male);
            let female = calculate_bmr_mifflin(weight, height, age, BiologicalSex::Female);
            prop_assert!((male - female - 166.0).abs() < 1e-9);
        }

        /// Property: TDEE increases with activity level
        #[test]
        fn prop_tdee_monotonic_in_activity(
            weight in 50.0f64..100.0,
            height in 160.0f64..190.0,
            age in 20u32..60
        ) {
            let levels = [
                ActivityLevel::Sedentary,
                ActivityLevel::Light,
                ActivityLevel::Moderate,
                ActivityLevel::Active,
                ActivityLevel::VeryActive,
            ];
            let tdees: Vec<f64> = levels.iter().map(|&activity_level| {
                let p = UserProfile { age_years: age, sex: BiologicalSex::Female, weight_kg: weight, height_cm: height, activity_level };
                calculate_tdee(&p, TdeeVariant::ActivityScaled).tdee
            }).collect();
            prop_assert!(tdees.windows(2).all(|w| w[1] > w[0]));
        }
    }

    // =========================================================================
    // Body Fat Tests
    // =========================================================================

    #[test]
    fn test_body_fat_male() {
        let m = BodyMeasurements { height_cm: 177.8, neck_cm: 38.1, waist_cm: 86.36, hip_cm: None };
        let result = calculate_body_fat(BiologicalSex::Male, 80.0, &m).unwrap();
        // 70 in tall, 15 in neck, 34 in waist
        assert!((result.percent - 17.4).abs() < 0.2, "got {}", result.percent);
        assert_eq!(result.category, BodyFatCategory::Fitness);
        assert!((result.fat_mass_kg + result.lean_mass_kg - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_body_fat_female_requires_hip() {
        let m = BodyMeasurements { height_cm: 165.0, neck_cm: 33.0, waist_cm: 75.0, hip_cm: None };
        assert_eq!(
            calculate_body_fat_navy(BiologicalSex::Female, &m),
            Err(MetricError::MissingInput("hip"))
        );
        let m = BodyMeasurements { hip_cm: Some(100.0), ..m };
        let percent = calculate_body_fat_navy(BiologicalSex::Female, &m).unwrap();
        assert!(percent > 20.0 && percent < 35.0, "got {}", percent);
    }

    #[test]
    fn test_body_fat_log_domain_guard() {
        let m = BodyMeasurements { height_cm: 180.0, neck_cm: 40.0, waist_cm: 40.0, hip_cm: None };
        assert!(matches!(
            calculate_body_fat_navy(BiologicalSex::Male, &m),
            Err(MetricError::Domain(_))
        ));
        let m = BodyMeasurements { height_cm: 0.0, neck_cm: 40.0, waist_cm: 90.0, hip_cm: None };
        assert!(matches!(
            calculate_body_fat_navy(BiologicalSex::Male, &m),
            Err(MetricError::Domain(_))
        ));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: Body fat is never negative
        #[test]
        fn prop_body_fat_non_negative(
            height in 120.0f64..220.0,
            neck in 25.0f64..50.0,
            extra in 0.5f64..100.0
        ) {
            let m = BodyMeasurements { height_cm: height, neck_cm: neck, waist_cm: neck + extra, hip_cm: None };
            let percent = calculate_body_fat_navy(BiologicalSex::Male, &m).unwrap();
            prop_assert!(percent >= 0.0);
        }
    }

    // =========================================================================
    // Heart Rate Zone Tests
    // =========================================================================

    #[test]
    fn test_heart_rate_zones_default_resting() {
        let zones = calculate_heart_rate_zones(30, None).unwrap();
        assert_eq!(zones.max_hr, 190);
        assert_eq!(zones.resting_hr, 60);
        assert_eq!(zones.reserve, 130);
        assert_eq!(zones.zones.len(), 5);
        // 60 + 130 * 0.5 = 125
        assert_eq!(zones.zones[0].min_bpm, 125);
        assert_eq!(zones.zones[4].max_bpm, 190);
        assert_eq!(zones.zones[3].name, "Lactate Threshold");
    }

    #[test]
    fn test_heart_rate_zones_reject_resting_above_max() {
        assert!(calculate_heart_rate_zones(200, Some(30)).is_err());
        assert!(calculate_heart_rate_zones(230, None).is_err());
    }

    // =========================================================================
    // Hydration Tests
    // =========================================================================

    #[test]
    fn test_water_goal() {
        // 70 * 35 * 1.5 / 1000 = 3.675
        let goal = calculate_water_goal_litres(Some(70.0), HydrationActivity::Moderate);
        assert!((goal - 3.675).abs() < 1e-9);
        assert_eq!(calculate_water_goal_litres(None, HydrationActivity::High), 2.5);
    }

    #[test]
    fn test_water_progress_capped() {
        assert_eq!(water_progress_percent(1250.0, 2500.0), 50.0);
        assert_eq!(water_progress_percent(4000.0, 2500.0), 100.0);
        assert_eq!(water_progress_percent(500.0, 0.0), 0.0);
    }
}
