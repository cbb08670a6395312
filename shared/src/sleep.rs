//! Sleep duration and score
//!
//! Times are time-of-day only. A wake time earlier than the bedtime is taken
//! to fall on the following day.

use crate::errors::{MetricError, MetricResult};
use crate::health_metrics::{round_half_up, round_one_decimal};
use crate::models::{Mood, SleepRecord};
use crate::types::SleepForm;
use chrono::NaiveTime;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Parse an `HH:MM` (or `HH:MM:SS`) time of day
pub fn parse_time_of_day(value: &str, field: &'static str) -> MetricResult<NaiveTime> {
    let value = value.trim();
    if value.is_empty() {
        return Err(MetricError::MissingInput(field));
    }
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| MetricError::Validation(format!("{} must be a time of day (HH:MM)", field)))
}

/// Hours slept, rounded to one decimal
pub fn calculate_sleep_duration(bedtime: NaiveTime, wake_time: NaiveTime) -> f64 {
    let mut seconds = (wake_time - bedtime).num_seconds();
    if seconds < 0 {
        seconds += SECONDS_PER_DAY;
    }
    round_one_decimal(seconds as f64 / 3600.0)
}

impl Mood {
    /// Points contributed to the sleep score
    pub fn score(&self) -> f64 {
        match self {
            Mood::Excellent => 20.0,
            Mood::Good => 15.0,
            Mood::Fair => 10.0,
            Mood::Poor => 5.0,
        }
    }
}

fn duration_points(duration_hours: f64) -> f64 {
    if (7.0..=9.0).contains(&duration_hours) {
        40.0
    } else if (6.0..=10.0).contains(&duration_hours) {
        30.0
    } else if (5.0..=11.0).contains(&duration_hours) {
        20.0
    } else {
        10.0
    }
}

/// Composite sleep score
///
/// duration (10-40) + quality/10 × 30 + mood (5-20) + (5 − stress) × 2,
/// rounded to an integer. No clamping.
pub fn calculate_sleep_score(duration_hours: f64, quality: u8, mood: Mood, stress: u8) -> i32 {
    let score = duration_points(duration_hours)
        + quality as f64 / 10.0 * 30.0
        + mood.score()
        + (5.0 - stress as f64) * 2.0;
    round_half_up(score) as i32
}

/// Validate a sleep form and derive its duration and score
pub fn evaluate_sleep(form: &SleepForm) -> MetricResult<SleepRecord> {
    form.check()?;
    let bedtime = parse_time_of_day(form.bedtime.as_deref().unwrap_or_default(), "bedtime")?;
    let wake_time = parse_time_of_day(form.wake_time.as_deref().unwrap_or_default(), "wake_time")?;

    let duration_hours = calculate_sleep_duration(bedtime, wake_time);
    let sleep_score = calculate_sleep_score(duration_hours, form.quality, form.mood, form.stress);

    Ok(SleepRecord {
        bedtime,
        wake_time,
        quality: form.quality,
        mood: form.mood,
        caffeine_intake: form.caffeine_intake,
        screen_time_hours: form.screen_time_hours,
        exercise: form.exercise,
        stress: form.stress,
        notes: form.notes.clone(),
        duration_hours,
        sleep_score,
    })
}
