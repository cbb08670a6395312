//! End-to-end tracking flows over an in-memory session

mod common;

use common::sleep_form;
use health_metrics_engine::aggregates::{BEDTIME_INSIGHT, CAFFEINE_INSIGHT};
use health_metrics_engine::services::{NutritionService, SleepService};
use health_metrics_engine::Session;
use health_metrics_shared::models::{ActivityLevel, BiologicalSex, MealSlot, Nutrition};
use health_metrics_shared::types::{CustomFoodForm, ProfileForm};

#[test]
fn test_meal_cap_and_totals() {
    let mut session = Session::in_memory().unwrap();
    for _ in 0..55 {
        NutritionService::add_food(&mut session, "Banana (1 medium)", 1.0, MealSlot::Snack).unwrap();
    }
    assert_eq!(session.meal_history().len(), 50);
    // Eviction does not touch the running totals
    assert_eq!(session.daily_intake().nutrition.calories, 55.0 * 105.0);
}

#[test]
fn test_custom_food_defaults() {
    let mut session = Session::in_memory().unwrap();
    let form = CustomFoodForm {
        name: Some("Poha".to_string()),
        calories: Some(180.0),
        protein: Some(4.0),
        ..CustomFoodForm::default()
    };
    let entry = NutritionService::add_custom_food(&mut session, &form).unwrap();
    assert_eq!(entry.record.quantity, 1.0);
    assert_eq!(entry.record.meal, MealSlot::Breakfast);
    assert_eq!(
        entry.record.nutrition,
        Nutrition { calories: 180.0, protein: 4.0, carbs: 0.0, fat: 0.0, fiber: 0.0 }
    );
}

#[test]
fn test_remove_more_than_total_floors() {
    let mut session = Session::in_memory().unwrap();
    let big = NutritionService::add_food(&mut session, "Mutton Curry (100g)", 3.0, MealSlot::Dinner).unwrap();
    NutritionService::reset_day(&mut session).unwrap();
    NutritionService::add_food(&mut session, "Apple (1 medium)", 1.0, MealSlot::Snack).unwrap();
    NutritionService::remove_meal(&mut session, big.id).unwrap();

    let totals = session.daily_intake().nutrition;
    assert_eq!(totals, Nutrition::default());
}

#[test]
fn test_progress_against_profile() {
    let mut session = Session::in_memory().unwrap();
    NutritionService::set_profile(
        &mut session,
        &ProfileForm {
            age_years: Some(55),
            sex: BiologicalSex::Female,
            weight_kg: Some(60.0),
            height_cm: Some(160.0),
            activity_level: ActivityLevel::Sedentary,
        },
    )
    .unwrap();
    NutritionService::add_water(&mut session, 2100.0).unwrap();

    let progress = NutritionService::get_progress(&session).unwrap();
    assert_eq!(progress.fiber.target, 21.0);
    assert_eq!(progress.water.target, 2100.0);
    assert_eq!(progress.water.percent, Some(100.0));
}

#[test]
fn test_sleep_insights_end_to_end() {
    let mut session = Session::in_memory().unwrap();
    for _ in 0..4 {
        SleepService::log_sleep(&mut session, &sleep_form("01:00", "09:00", 8, 4)).unwrap();
    }
    let insights = SleepService::get_insights(&session);
    assert_eq!(insights, vec![CAFFEINE_INSIGHT, BEDTIME_INSIGHT]);

    let averages = SleepService::get_averages(&session).unwrap();
    assert_eq!(averages.nights, 4);
    assert_eq!(averages.duration_hours, 8.0);
}

#[test]
fn test_deleting_sleep_updates_aggregates() {
    let mut session = Session::in_memory().unwrap();
    let short = SleepService::log_sleep(&mut session, &sleep_form("23:00", "03:00", 5, 0)).unwrap();
    SleepService::log_sleep(&mut session, &sleep_form("23:00", "07:00", 5, 0)).unwrap();
    assert_eq!(SleepService::get_averages(&session).unwrap().duration_hours, 6.0);

    SleepService::delete_sleep(&mut session, short.id).unwrap();
    assert_eq!(SleepService::get_averages(&session).unwrap().duration_hours, 8.0);
}
