//! Sleep tracking service
//!
//! Provides business logic for sleep tracking including:
//! - Sleep logging with derived duration and score
//! - Rolling averages and rule-based insights
//! - Mood distribution and chart series
//! - Sleep goal management

use crate::aggregates::{
    mood_distribution, sleep_averages, sleep_chart_series, sleep_insights, MoodCount,
    SleepAverages, SleepChartPoint, SleepInsight,
};
use crate::error::{EngineError, EngineResult};
use crate::state::Session;
use health_metrics_shared::errors::MetricError;
use health_metrics_shared::models::{SleepEntry, SleepProfile};
use health_metrics_shared::sleep::evaluate_sleep;
use health_metrics_shared::types::SleepForm;
use tracing::{debug, info};
use uuid::Uuid;

/// Everything the sleep dashboard shows, recomputed on read
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SleepOverview {
    pub averages: Option<SleepAverages>,
    pub insights: Vec<SleepInsight>,
    pub moods: Vec<MoodCount>,
    pub chart: Vec<SleepChartPoint>,
}

/// Sleep service for business logic
pub struct SleepService;

impl SleepService {
    /// Log a night of sleep
    pub fn log_sleep(session: &mut Session, form: &SleepForm) -> EngineResult<SleepEntry> {
        let record = evaluate_sleep(form)?;
        let mut sleep = session.sleep.clone();
        let entry = sleep.append(record).clone();
        session.commit_sleep(sleep)?;

        info!(
            entry_id = %entry.id,
            duration_hours = entry.record.duration_hours,
            sleep_score = entry.record.sleep_score,
            "Logged sleep"
        );
        Ok(entry)
    }

    /// Delete a sleep entry
    pub fn delete_sleep(session: &mut Session, id: Uuid) -> EngineResult<SleepEntry> {
        let mut sleep = session.sleep.clone();
        let removed = sleep
            .remove(id)
            .ok_or_else(|| EngineError::NotFound(format!("sleep entry {}", id)))?;
        session.commit_sleep(sleep)?;
        info!(entry_id = %id, "Deleted sleep entry");
        Ok(removed)
    }

    /// Logged nights, newest first
    pub fn get_history(session: &Session, limit: Option<usize>) -> Vec<&SleepEntry> {
        session.sleep.list(limit).collect()
    }

    pub fn clear_history(session: &mut Session) -> EngineResult<()> {
        let mut sleep = session.sleep.clone();
        sleep.clear();
        session.commit_sleep(sleep)
    }

    pub fn get_averages(session: &Session) -> Option<SleepAverages> {
        sleep_averages(&session.sleep, session.config().sleep.window)
    }

    pub fn get_insights(session: &Session) -> Vec<SleepInsight> {
        sleep_insights(&session.sleep, &session.sleep_profile, &session.config().sleep)
    }

    pub fn get_mood_distribution(session: &Session) -> Vec<MoodCount> {
        mood_distribution(&session.sleep, session.config().sleep.mood_window)
    }

    pub fn get_chart_series(session: &Session) -> Vec<SleepChartPoint> {
        sleep_chart_series(&session.sleep, session.config().sleep.chart_window)
    }

    pub fn get_overview(session: &Session) -> SleepOverview {
        let overview = SleepOverview {
            averages: Self::get_averages(session),
            insights: Self::get_insights(session),
            moods: Self::get_mood_distribution(session),
            chart: Self::get_chart_series(session),
        };
        debug!(insights = overview.insights.len(), "Computed sleep overview");
        overview
    }

    /// Replace the sleep goals
    pub fn set_profile(session: &mut Session, profile: SleepProfile) -> EngineResult<SleepProfile> {
        if !(profile.sleep_goal_hours > 0.0 && profile.sleep_goal_hours <= 24.0) {
            return Err(MetricError::Validation(
                "Sleep goal must be between 0 and 24 hours".to_string(),
            )
            .into());
        }
        session.commit_sleep_profile(profile)?;
        Ok(session.sleep_profile.clone())
    }
}
