//! Built-in per-serving nutrition for common Indian foods

use crate::models::Nutrition;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FoodItem {
    /// Name including the serving size, e.g. "Roti (1 medium)"
    pub name: &'static str,
    pub nutrition: Nutrition,
}

const fn food(
    name: &'static str,
    calories: f64,
    protein: f64,
    carbs: f64,
    fat: f64,
    fiber: f64,
) -> FoodItem {
    FoodItem {
        name,
        nutrition: Nutrition {
            calories,
            protein,
            carbs,
            fat,
            fiber,
        },
    }
}

static FOODS: [FoodItem; 23] = [
    food("Rice (1 cup cooked)", 205.0, 4.3, 45.0, 0.4, 0.6),
    food("Brown Rice (1 cup cooked)", 216.0, 5.0, 45.0, 1.8, 3.5),
    food("Roti (1 medium)", 71.0, 3.0, 15.0, 0.4, 2.7),
    food("Naan (1 piece)", 262.0, 9.0, 45.0, 5.0, 2.0),
    food("Dal (1 cup)", 230.0, 18.0, 40.0, 0.8, 16.0),
    food("Rajma (1 cup)", 245.0, 15.0, 45.0, 1.0, 13.0),
    food("Chole (1 cup)", 269.0, 15.0, 45.0, 4.0, 12.0),
    food("Chicken Curry (100g)", 165.0, 25.0, 5.0, 5.0, 1.0),
    food("Mutton Curry (100g)", 250.0, 26.0, 3.0, 15.0, 0.5),
    food("Fish Curry (100g)", 136.0, 20.0, 4.0, 4.0, 0.5),
    food("Paneer (100g)", 265.0, 18.0, 1.2, 20.0, 0.0),
    food("Tofu (100g)", 76.0, 8.0, 1.9, 4.8, 0.4),
    food("Egg (1 large)", 70.0, 6.0, 0.6, 5.0, 0.0),
    food("Banana (1 medium)", 105.0, 1.3, 27.0, 0.4, 3.1),
    food("Apple (1 medium)", 95.0, 0.5, 25.0, 0.3, 4.4),
    food("Orange (1 medium)", 62.0, 1.2, 15.4, 0.2, 3.1),
    food("Mango (1 cup sliced)", 107.0, 1.0, 28.0, 0.5, 3.0),
    food("Milk (1 cup)", 150.0, 8.0, 12.0, 8.0, 0.0),
    food("Yogurt (1 cup)", 154.0, 13.0, 17.0, 4.0, 0.0),
    food("Ghee (1 tbsp)", 112.0, 0.0, 0.0, 12.8, 0.0),
    food("Coconut Oil (1 tbsp)", 117.0, 0.0, 0.0, 13.6, 0.0),
    food("Almonds (10 pieces)", 69.0, 2.6, 2.6, 6.0, 1.2),
    food("Walnuts (5 halves)", 65.0, 1.5, 1.4, 6.5, 0.7),
];

pub fn all_foods() -> &'static [FoodItem] {
    &FOODS
}

/// Exact-name lookup
pub fn find_food(name: &str) -> Option<&'static FoodItem> {
    FOODS.iter().find(|item| item.name == name)
}

/// Case-insensitive substring search. An empty term matches everything.
pub fn search_foods(term: &str) -> Vec<&'static FoodItem> {
    let needle = term.trim().to_lowercase();
    FOODS
        .iter()
        .filter(|item| item.name.to_lowercase().contains(&needle))
        .collect()
}
