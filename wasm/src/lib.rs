//! Health Metrics WASM Module
//!
//! WebAssembly bindings for the calculators, so the browser UI can show an
//! immediate result before anything is logged.
//!
//! Scalar calculators return a number, or `undefined` for inputs outside
//! the formula's domain. Form-based calculators take the form as JSON and return
//! either the result as JSON or `{"error": {"code", "message", "field"}}`.

use health_metrics_shared::classifier::{
    classify_blood_pressure as bp_category, classify_bmi_for_age as bmi_for_age, CategoryLabel,
};
use health_metrics_shared::diabetes_risk::calculate_idrs;
use health_metrics_shared::errors::{MetricError, MetricResult};
use health_metrics_shared::food_database::search_foods;
use health_metrics_shared::health_metrics::{
    calculate_bmi as bmi_of, calculate_body_fat, calculate_heart_rate_zones, calculate_macro_targets,
    calculate_tdee as tdee_of, TdeeVariant,
};
use health_metrics_shared::models::{ActivityLevel, BiologicalSex, Mood, UserProfile};
use health_metrics_shared::sleep::{
    calculate_sleep_duration as duration_between, calculate_sleep_score as score_of,
    parse_time_of_day,
};
use health_metrics_shared::types::{BodyFatForm, IdrsForm, ProfileForm};
use health_metrics_shared::validation::{user_message, validate_height_cm, validate_weight_kg};
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ============================================================================
// JSON Envelope
// ============================================================================

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

/// Error detail
#[derive(Serialize)]
struct ErrorDetail {
    code: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'static str>,
}

fn error_json(code: &'static str, message: String, field: Option<&'static str>) -> String {
    let body = ErrorResponse {
        error: ErrorDetail { code, message, field },
    };
    serde_json::to_string(&body)
        .unwrap_or_else(|_| r#"{"error":{"code":"INTERNAL_ERROR","message":""}}"#.to_string())
}

fn respond<T: Serialize>(result: MetricResult<T>) -> String {
    match result {
        Ok(value) => serde_json::to_string(&value)
            .unwrap_or_else(|e| error_json("INTERNAL_ERROR", e.to_string(), None)),
        Err(err) => {
            let (code, field) = match &err {
                MetricError::MissingInput(field) => ("MISSING_INPUT", Some(*field)),
                MetricError::Domain(_) => ("DOMAIN_ERROR", None),
                MetricError::Validation(_) => ("VALIDATION_ERROR", None),
            };
            error_json(code, user_message(&err), field)
        }
    }
}

/// Parse a JSON form and run a calculator on it
fn with_form<T, R>(form_json: &str, compute: impl FnOnce(T) -> MetricResult<R>) -> String
where
    T: DeserializeOwned,
    R: Serialize,
{
    match serde_json::from_str::<T>(form_json) {
        Ok(form) => respond(compute(form)),
        Err(e) => error_json("BAD_REQUEST", e.to_string(), None),
    }
}

fn sex_of(is_male: bool) -> BiologicalSex {
    if is_male {
        BiologicalSex::Male
    } else {
        BiologicalSex::Female
    }
}

// ============================================================================
// Series
// ============================================================================

/// Calculate moving average for a series of values
#[wasm_bindgen]
pub fn calculate_moving_average(values: &[f64], window_size: usize) -> Vec<f64> {
    if values.is_empty() || window_size == 0 {
        return vec![];
    }

    let mut result = Vec::with_capacity(values.len());

    for i in 0..values.len() {
        let start = if i >= window_size { i - window_size + 1 } else { 0 };
        let window = &values[start..=i];
        let avg = window.iter().sum::<f64>() / window.len() as f64;
        result.push(avg);
    }

    result
}

// ============================================================================
// Scalar Calculators
// ============================================================================

/// BMI from weight (kg) and height (cm); `undefined` unless both are positive
#[wasm_bindgen]
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> Option<f64> {
    bmi_of(weight_kg, height_cm).ok()
}

/// TDEE using the activity multiplier (Mifflin-St Jeor BMR).
///
/// `activity_level` is one of sedentary, light, moderate, active,
/// very_active. An unknown level or an out-of-range body measurement gives
/// `undefined`.
#[wasm_bindgen]
pub fn calculate_tdee(
    weight_kg: f64,
    height_cm: f64,
    age_years: u32,
    is_male: bool,
    activity_level: &str,
) -> Option<f64> {
    let activity_level = activity_level.parse::<ActivityLevel>().ok()?;
    validate_weight_kg(weight_kg).ok()?;
    validate_height_cm(height_cm).ok()?;
    let profile = UserProfile {
        age_years,
        sex: sex_of(is_male),
        weight_kg,
        height_cm,
        activity_level,
    };
    Some(tdee_of(&profile, TdeeVariant::ActivityScaled).tdee)
}

/// Hours slept between two "HH:MM" times, one decimal; `undefined` if either is malformed
#[wasm_bindgen]
pub fn calculate_sleep_duration(bedtime: &str, wake_time: &str) -> Option<f64> {
    let bed = parse_time_of_day(bedtime, "bedtime").ok()?;
    let wake = parse_time_of_day(wake_time, "wake_time").ok()?;
    Some(duration_between(bed, wake))
}

/// Sleep score. An unrecognised mood scores as "fair".
#[wasm_bindgen]
pub fn calculate_sleep_score(duration_hours: f64, quality: u8, mood: &str, stress: u8) -> i32 {
    let mood = mood.parse::<Mood>().unwrap_or(Mood::Fair);
    score_of(duration_hours, quality, mood, stress)
}

/// Blood pressure category label; adult thresholds when age is absent
#[wasm_bindgen]
pub fn classify_blood_pressure(systolic: u32, diastolic: u32, age_years: Option<u32>) -> String {
    bp_category(systolic, diastolic, age_years).label().to_string()
}

/// BMI-for-age category label, "Unknown" outside ages 5-19
#[wasm_bindgen]
pub fn classify_bmi_for_age(is_male: bool, age_years: u32, bmi: f64) -> String {
    bmi_for_age(sex_of(is_male), age_years, bmi).label().to_string()
}

// ============================================================================
// Form Calculators (JSON in, JSON out)
// ============================================================================

/// US Navy body fat from a body fat form
#[wasm_bindgen]
pub fn calculate_body_fat_json(form_json: &str) -> String {
    with_form(form_json, |form: BodyFatForm| {
        let (weight_kg, measurements) = form.measurements()?;
        calculate_body_fat(form.sex, weight_kg, &measurements)
    })
}

/// Indian Diabetes Risk Score from the questionnaire
#[wasm_bindgen]
pub fn calculate_idrs_json(form_json: &str) -> String {
    with_form(form_json, |form: IdrsForm| calculate_idrs(&form.to_input()?))
}

/// Daily macro targets from a profile form
#[wasm_bindgen]
pub fn calculate_macro_targets_json(form_json: &str) -> String {
    with_form(form_json, |form: ProfileForm| {
        Ok(calculate_macro_targets(&form.to_profile()?))
    })
}

/// Karvonen training zones
#[wasm_bindgen]
pub fn calculate_heart_rate_zones_json(age_years: u32, resting_hr: Option<u32>) -> String {
    respond(calculate_heart_rate_zones(age_years, resting_hr))
}

/// Food database search, case-insensitive
#[wasm_bindgen]
pub fn search_foods_json(term: &str) -> String {
    respond(Ok(search_foods(term)))
}
