//! Input validation functions
//!
//! Range checks applied to form values before they reach a calculator.
//! Bounded form fields additionally use the `validator` derive macros.

use crate::errors::{MetricError, MetricResult};

fn invalid(message: &str) -> MetricError {
    MetricError::Validation(message.to_string())
}

/// Validate body weight (in kg). Covers newborns through adults.
pub fn validate_weight_kg(weight_kg: f64) -> MetricResult<()> {
    if weight_kg.is_nan() || weight_kg.is_infinite() {
        return Err(invalid("Weight must be a valid number"));
    }
    if weight_kg <= 0.0 {
        return Err(invalid("Weight must be greater than 0 kg"));
    }
    if weight_kg > 500.0 {
        return Err(invalid("Weight must be at most 500 kg"));
    }
    Ok(())
}

/// Validate height (in cm)
pub fn validate_height_cm(height_cm: f64) -> MetricResult<()> {
    if height_cm.is_nan() || height_cm.is_infinite() {
        return Err(invalid("Height must be a valid number"));
    }
    if height_cm <= 0.0 {
        return Err(invalid("Height must be greater than 0 cm"));
    }
    if height_cm > 300.0 {
        return Err(invalid("Height must be at most 300 cm"));
    }
    Ok(())
}

/// Validate age in whole years
pub fn validate_age_years(age_years: u32) -> MetricResult<()> {
    if age_years > 150 {
        return Err(invalid("Age cannot exceed 150 years"));
    }
    Ok(())
}

/// Validate a blood pressure pair (mmHg)
pub fn validate_blood_pressure(systolic: u32, diastolic: u32) -> MetricResult<()> {
    if systolic == 0 || diastolic == 0 {
        return Err(invalid("Blood pressure values must be greater than 0"));
    }
    if systolic > 300 {
        return Err(invalid("Systolic pressure must be at most 300 mmHg"));
    }
    if diastolic > 250 {
        return Err(invalid("Diastolic pressure must be at most 250 mmHg"));
    }
    Ok(())
}

/// Validate a serving multiplier
pub fn validate_quantity(quantity: f64) -> MetricResult<()> {
    if !quantity.is_finite() || quantity <= 0.0 {
        return Err(invalid("Quantity must be a positive number"));
    }
    Ok(())
}

/// Validate a nutrient amount (calories or grams)
pub fn validate_nutrient(value: f64) -> MetricResult<()> {
    if value.is_nan() || value.is_infinite() {
        return Err(invalid("Nutrient values must be valid numbers"));
    }
    if value < 0.0 {
        return Err(invalid("Nutrient values cannot be negative"));
    }
    Ok(())
}

/// Validate a single water intake amount (ml)
pub fn validate_water_ml(amount_ml: f64) -> MetricResult<()> {
    if !amount_ml.is_finite() || amount_ml <= 0.0 {
        return Err(invalid("Amount must be greater than 0"));
    }
    if amount_ml > 10000.0 {
        return Err(invalid("Amount cannot exceed 10000ml"));
    }
    Ok(())
}

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map technical field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "weight" | "weight_kg" => "Weight",
        "height" | "height_cm" => "Height",
        "age" | "age_years" => "Age",
        "age_months" => "Age (months)",
        "age_weeks" => "Age (weeks)",
        "neck" => "Neck Circumference",
        "waist" | "waist_cm" => "Waist Circumference",
        "hip" => "Hip Circumference",
        "bedtime" => "Bedtime",
        "wake_time" => "Wake Time",
        "systolic" => "Systolic",
        "diastolic" => "Diastolic",
        "name" => "Food Name",
        "calories" => "Calories",
        "bmi" => "BMI",
        _ => field_name,
    }
}

/// Format a metric error for display next to a form
pub fn user_message(error: &MetricError) -> String {
    match error {
        MetricError::MissingInput(field) => {
            format!("{} is required", get_field_display_label(field))
        }
        MetricError::Domain(message) | MetricError::Validation(message) => message.clone(),
    }
}
