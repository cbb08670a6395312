//! Rolling views derived from the session's histories
//!
//! Everything here is recomputed on read and never persisted, except the
//! [`NutritionTotals`] accumulator, which the session owns and stores under
//! `dailyIntake`.

use crate::config::SleepConfig;
use chrono::{DateTime, Timelike, Utc};
use health_metrics_shared::health_metrics::{
    percent_of_target, round_half_up, round_one_decimal, water_progress_percent, MacroTargets,
};
use health_metrics_shared::history::HistorySequence;
use health_metrics_shared::models::{Mood, Nutrition, SleepProfile, SleepRecord};
use serde::{Deserialize, Serialize};

// ============================================================================
// Daily Nutrition Accumulator
// ============================================================================

/// Running totals for the current day
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NutritionTotals {
    #[serde(flatten)]
    pub nutrition: Nutrition,
    /// Millilitres
    #[serde(default)]
    pub water: f64,
}

/// A signed change to the accumulator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contribution {
    /// A meal was logged
    Add(Nutrition),
    /// A logged meal was removed
    Remove(Nutrition),
    /// Water in ml
    Water(f64),
}

impl NutritionTotals {
    /// Apply one contribution. Every field is floored at zero.
    pub fn apply(&mut self, contribution: Contribution) {
        match contribution {
            Contribution::Add(n) => self.nutrition = self.nutrition + n,
            Contribution::Remove(n) => self.nutrition = self.nutrition - n,
            Contribution::Water(ml) => self.water = (self.water + ml).max(0.0),
        }
    }

    /// Zero every field, water included
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Consumption against one target
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NutrientProgress {
    pub consumed: f64,
    pub target: f64,
    /// Rounded percentage, absent when the target is zero
    pub percent: Option<f64>,
}

impl NutrientProgress {
    fn new(consumed: f64, target: f64) -> Self {
        Self {
            consumed,
            target,
            percent: percent_of_target(consumed, target),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NutritionProgress {
    pub calories: NutrientProgress,
    pub protein: NutrientProgress,
    pub carbs: NutrientProgress,
    pub fat: NutrientProgress,
    pub fiber: NutrientProgress,
    pub water: NutrientProgress,
    /// Water progress capped at 100
    pub water_bar_percent: f64,
}

pub fn nutrition_progress(totals: &NutritionTotals, targets: &MacroTargets) -> NutritionProgress {
    let n = &totals.nutrition;
    NutritionProgress {
        calories: NutrientProgress::new(n.calories, targets.calories),
        protein: NutrientProgress::new(n.protein, targets.protein_g),
        carbs: NutrientProgress::new(n.carbs, targets.carbs_g),
        fat: NutrientProgress::new(n.fat, targets.fat_g),
        fiber: NutrientProgress::new(n.fiber, targets.fiber_g),
        water: NutrientProgress::new(totals.water, targets.water_ml),
        water_bar_percent: water_progress_percent(totals.water, targets.water_ml),
    }
}

// ============================================================================
// Sleep Aggregates
// ============================================================================

/// Means over the rolling window
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SleepAverages {
    /// Entries actually averaged; at most the window size
    pub nights: usize,
    /// Hours, one decimal
    pub duration_hours: f64,
    /// One decimal
    pub quality: f64,
    pub score: i32,
}

struct WindowMeans {
    nights: usize,
    duration: f64,
    quality: f64,
    score: f64,
}

fn window_means(history: &HistorySequence<SleepRecord>, window: usize) -> Option<WindowMeans> {
    let recent: Vec<&SleepRecord> = history.recent(window).map(|e| &e.record).collect();
    if recent.is_empty() {
        return None;
    }
    let n = recent.len() as f64;
    Some(WindowMeans {
        nights: recent.len(),
        duration: recent.iter().map(|r| r.duration_hours).sum::<f64>() / n,
        quality: recent.iter().map(|r| r.quality as f64).sum::<f64>() / n,
        score: recent.iter().map(|r| r.sleep_score as f64).sum::<f64>() / n,
    })
}

/// Rolling averages over the newest `window` entries; `None` when empty
pub fn sleep_averages(history: &HistorySequence<SleepRecord>, window: usize) -> Option<SleepAverages> {
    window_means(history, window).map(|m| SleepAverages {
        nights: m.nights,
        duration_hours: round_one_decimal(m.duration),
        quality: round_one_decimal(m.quality),
        score: round_half_up(m.score) as i32,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Warning,
    Tip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SleepInsight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub text: &'static str,
}

pub const SHORT_SLEEP_INSIGHT: SleepInsight = SleepInsight {
    kind: InsightKind::Warning,
    text: "You're getting less than 7 hours of sleep on average. Try going to bed earlier.",
};

pub const LOW_QUALITY_INSIGHT: SleepInsight = SleepInsight {
    kind: InsightKind::Tip,
    text: "Your sleep quality is below average. Consider reducing screen time before bed.",
};

pub const CAFFEINE_INSIGHT: SleepInsight = SleepInsight {
    kind: InsightKind::Warning,
    text: "High caffeine intake may be affecting your sleep quality.",
};

pub const BEDTIME_INSIGHT: SleepInsight = SleepInsight {
    kind: InsightKind::Tip,
    text: "Try to maintain a consistent bedtime for better sleep quality.",
};

/// Rule-based insights, in rule order.
///
/// Nothing is reported until the history holds `insight_min_entries`
/// nights. Thresholds compare unrounded means. Bedtime consistency looks at
/// the hour only.
pub fn sleep_insights(
    history: &HistorySequence<SleepRecord>,
    profile: &SleepProfile,
    config: &SleepConfig,
) -> Vec<SleepInsight> {
    if history.len() < config.insight_min_entries {
        return Vec::new();
    }
    let Some(means) = window_means(history, config.window) else {
        return Vec::new();
    };

    let mut insights = Vec::new();
    if means.duration < 7.0 {
        insights.push(SHORT_SLEEP_INSIGHT);
    }
    if means.quality < 6.0 {
        insights.push(LOW_QUALITY_INSIGHT);
    }

    let high_caffeine_nights = history
        .recent(config.window)
        .filter(|e| e.record.caffeine_intake > config.caffeine_units_threshold)
        .count();
    if high_caffeine_nights > config.caffeine_days_threshold {
        insights.push(CAFFEINE_INSIGHT);
    }

    let goal_hour = profile.bedtime_goal.hour() as i32;
    let inconsistent = history
        .recent(config.window)
        .any(|e| (e.record.bedtime.hour() as i32 - goal_hour).abs() > 1);
    if inconsistent {
        insights.push(BEDTIME_INSIGHT);
    }

    insights
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoodCount {
    pub mood: Mood,
    pub count: usize,
}

/// Mood counts over the newest `window` entries, in order of first appearance
pub fn mood_distribution(history: &HistorySequence<SleepRecord>, window: usize) -> Vec<MoodCount> {
    let mut counts: Vec<MoodCount> = Vec::new();
    for entry in history.recent(window) {
        match counts.iter_mut().find(|c| c.mood == entry.record.mood) {
            Some(c) => c.count += 1,
            None => counts.push(MoodCount {
                mood: entry.record.mood,
                count: 1,
            }),
        }
    }
    counts
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SleepChartPoint {
    pub recorded_at: DateTime<Utc>,
    pub duration_hours: f64,
    pub quality: u8,
    pub score: i32,
}

/// The newest `window` entries, oldest first
pub fn sleep_chart_series(history: &HistorySequence<SleepRecord>, window: usize) -> Vec<SleepChartPoint> {
    let mut points: Vec<SleepChartPoint> = history
        .recent(window)
        .map(|e| SleepChartPoint {
            recorded_at: e.recorded_at,
            duration_hours: e.record.duration_hours,
            quality: e.record.quality,
            score: e.record.sleep_score,
        })
        .collect();
    points.reverse();
    points
}
