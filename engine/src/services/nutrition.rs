//! Nutrition tracking service
//!
//! Meals are logged from the built-in food database or as custom foods.
//! Every change to the daily totals goes through one update function.

use crate::aggregates::{nutrition_progress, Contribution, NutritionProgress, NutritionTotals};
use crate::error::{EngineError, EngineResult};
use crate::state::Session;
use health_metrics_shared::food_database::find_food;
use health_metrics_shared::health_metrics::{calculate_macro_targets, MacroTargets};
use health_metrics_shared::models::{MealEntry, MealRecord, MealSlot, Nutrition, UserProfile};
use health_metrics_shared::types::{CustomFoodForm, ProfileForm};
use health_metrics_shared::units::{VolumeUnit, ML_PER_GLASS};
use health_metrics_shared::validation::{validate_quantity, validate_water_ml};
use tracing::info;
use uuid::Uuid;

/// Quick-add water amounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaterPreset {
    Glass,
    Bottle,
    Litre,
}

impl WaterPreset {
    pub fn ml(&self) -> f64 {
        match self {
            WaterPreset::Glass => ML_PER_GLASS,
            WaterPreset::Bottle => 500.0,
            WaterPreset::Litre => VolumeUnit::Litres.to_ml(1.0),
        }
    }
}

/// Nutrition service for business logic
pub struct NutritionService;

impl NutritionService {
    /// Store the profile and return the targets it implies
    pub fn set_profile(session: &mut Session, form: &ProfileForm) -> EngineResult<MacroTargets> {
        let profile = form.to_profile()?;
        let targets = calculate_macro_targets(&profile);
        session.commit_nutrition_profile(profile)?;
        info!(calories = targets.calories, "Updated nutrition profile");
        Ok(targets)
    }

    pub fn get_profile(session: &Session) -> Option<&UserProfile> {
        session.nutrition_profile.as_ref()
    }

    /// Daily targets, `None` until a profile has been saved
    pub fn get_targets(session: &Session) -> Option<MacroTargets> {
        session.nutrition_profile.as_ref().map(calculate_macro_targets)
    }

    /// Log `quantity` servings of a database food
    pub fn add_food(
        session: &mut Session,
        food_name: &str,
        quantity: f64,
        meal: MealSlot,
    ) -> EngineResult<MealEntry> {
        let food = find_food(food_name)
            .ok_or_else(|| EngineError::NotFound(format!("food {:?}", food_name)))?;
        validate_quantity(quantity)?;
        Self::log_meal(session, food.name.to_string(), food.nutrition, quantity, meal)
    }

    /// Log a food that is not in the database
    pub fn add_custom_food(session: &mut Session, form: &CustomFoodForm) -> EngineResult<MealEntry> {
        let (name, per_serving, quantity) = form.to_parts()?;
        Self::log_meal(session, name, per_serving, quantity, form.meal)
    }

    fn log_meal(
        session: &mut Session,
        name: String,
        per_serving: Nutrition,
        quantity: f64,
        meal: MealSlot,
    ) -> EngineResult<MealEntry> {
        let nutrition = per_serving.scaled(quantity);
        let mut meals = session.meals.clone();
        let entry = meals
            .append(MealRecord {
                name,
                meal,
                quantity,
                nutrition,
            })
            .clone();
        let intake = Self::apply_contribution(session.intake, Contribution::Add(nutrition));
        session.commit_meals(meals, intake)?;

        info!(entry_id = %entry.id, food = %entry.record.name, calories = nutrition.calories, "Logged meal");
        Ok(entry)
    }

    /// Remove a logged meal and subtract it from today's totals
    pub fn remove_meal(session: &mut Session, id: Uuid) -> EngineResult<MealEntry> {
        let mut meals = session.meals.clone();
        let removed = meals
            .remove(id)
            .ok_or_else(|| EngineError::NotFound(format!("meal {}", id)))?;
        let intake = Self::apply_contribution(session.intake, Contribution::Remove(removed.record.nutrition));
        session.commit_meals(meals, intake)?;
        info!(entry_id = %id, "Removed meal");
        Ok(removed)
    }

    /// Add water in millilitres
    pub fn add_water(session: &mut Session, amount_ml: f64) -> EngineResult<NutritionTotals> {
        validate_water_ml(amount_ml)?;
        let intake = Self::apply_contribution(session.intake, Contribution::Water(amount_ml));
        session.commit_intake(intake)?;
        Ok(intake)
    }

    /// Add water measured in glasses, litres or millilitres
    pub fn add_water_in(
        session: &mut Session,
        amount: f64,
        unit: VolumeUnit,
    ) -> EngineResult<NutritionTotals> {
        Self::add_water(session, unit.to_ml(amount))
    }

    pub fn add_water_preset(session: &mut Session, preset: WaterPreset) -> EngineResult<NutritionTotals> {
        Self::add_water(session, preset.ml())
    }

    /// Zero today's totals. Meal history is kept.
    pub fn reset_day(session: &mut Session) -> EngineResult<()> {
        let mut intake = session.intake;
        intake.reset();
        session.commit_intake(intake)?;
        info!("Reset daily intake");
        Ok(())
    }

    pub fn get_daily_intake(session: &Session) -> NutritionTotals {
        session.intake
    }

    /// Today's totals against the profile's targets
    pub fn get_progress(session: &Session) -> Option<NutritionProgress> {
        Self::get_targets(session).map(|targets| nutrition_progress(&session.intake, &targets))
    }

    /// Logged meals, newest first
    pub fn get_meals(session: &Session, limit: Option<usize>) -> Vec<&MealEntry> {
        session.meals.list(limit).collect()
    }

    /// The single update path for the running totals
    fn apply_contribution(mut intake: NutritionTotals, contribution: Contribution) -> NutritionTotals {
        intake.apply(contribution);
        intake
    }
}
