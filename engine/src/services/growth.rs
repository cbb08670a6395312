//! Child growth tracking service
//!
//! Measurements are classified against the WHO weight-for-age and
//! height-for-age charts when logged. Ages without a chart row are
//! classified as unknown, not rejected.

use crate::error::{EngineError, EngineResult};
use crate::state::Session;
use chrono::{DateTime, Utc};
use health_metrics_shared::classifier::{classify_height_for_age, classify_weight_for_age};
use health_metrics_shared::models::{GrowthMeasurement, GrowthRecord};
use health_metrics_shared::types::GrowthForm;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

/// One point on the growth chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GrowthPoint {
    pub recorded_at: DateTime<Utc>,
    pub age_months: u32,
    pub weight_kg: f64,
    pub height_cm: f64,
}

pub struct GrowthService;

impl GrowthService {
    /// Classify a measurement without logging it
    pub fn assess(form: &GrowthForm) -> EngineResult<GrowthRecord> {
        let (age_months, weight_kg, height_cm) = form.values()?;
        Ok(GrowthRecord {
            sex: form.sex,
            age_months,
            weight_kg,
            height_cm,
            weight_for_age: classify_weight_for_age(form.sex, age_months, weight_kg),
            height_for_age: classify_height_for_age(form.sex, age_months, height_cm),
        })
    }

    pub fn log_measurement(session: &mut Session, form: &GrowthForm) -> EngineResult<GrowthMeasurement> {
        let record = Self::assess(form)?;
        let mut growth = session.growth.clone();
        let entry = growth.append(record).clone();
        session.commit_growth(growth)?;

        info!(
            entry_id = %entry.id,
            age_months = entry.record.age_months,
            weight_for_age = entry.record.weight_for_age.label(),
            "Logged growth measurement"
        );
        Ok(entry)
    }

    pub fn delete_measurement(session: &mut Session, id: Uuid) -> EngineResult<GrowthMeasurement> {
        let mut growth = session.growth.clone();
        let removed = growth
            .remove(id)
            .ok_or_else(|| EngineError::NotFound(format!("growth measurement {}", id)))?;
        session.commit_growth(growth)?;
        Ok(removed)
    }

    /// Measurements, newest first
    pub fn get_history(session: &Session, limit: Option<usize>) -> Vec<&GrowthMeasurement> {
        session.growth.list(limit).collect()
    }

    /// Every measurement, oldest first
    pub fn get_chart_series(session: &Session) -> Vec<GrowthPoint> {
        let mut points: Vec<GrowthPoint> = session
            .growth
            .list(None)
            .map(|e| GrowthPoint {
                recorded_at: e.recorded_at,
                age_months: e.record.age_months,
                weight_kg: e.record.weight_kg,
                height_cm: e.record.height_cm,
            })
            .collect();
        points.reverse();
        points
    }

    pub fn clear_history(session: &mut Session) -> EngineResult<()> {
        let mut growth = session.growth.clone();
        growth.clear();
        session.commit_growth(growth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use health_metrics_shared::classifier::{Classification, GrowthCategory, StatureCategory};
    use health_metrics_shared::models::BiologicalSex;

    fn form(age_months: u32, weight_kg: f64, height_cm: f64) -> GrowthForm {
        GrowthForm {
            sex: BiologicalSex::Male,
            age_months: Some(age_months),
            weight_kg: Some(weight_kg),
            height_cm: Some(height_cm),
        }
    }

    #[test]
    fn test_assess_sampled_age() {
        // Median boy at 12 months
        let record = GrowthService::assess(&form(12, 9.6, 75.7)).unwrap();
        assert_eq!(record.weight_for_age, Classification::Known(GrowthCategory::Normal));
        assert_eq!(record.height_for_age, Classification::Known(StatureCategory::Normal));
    }

    #[test]
    fn test_unsampled_age_is_unknown() {
        let record = GrowthService::assess(&form(7, 8.0, 70.0)).unwrap();
        assert!(record.weight_for_age.is_unknown());
        assert_eq!(record.height_for_age.label(), "Unknown");
    }

    #[test]
    fn test_chart_series_oldest_first() {
        let mut session = Session::in_memory().unwrap();
        GrowthService::log_measurement(&mut session, &form(6, 7.9, 67.6)).unwrap();
        GrowthService::log_measurement(&mut session, &form(12, 9.6, 75.7)).unwrap();
        let ages: Vec<u32> = GrowthService::get_chart_series(&session)
            .iter()
            .map(|p| p.age_months)
            .collect();
        assert_eq!(ages, vec![6, 12]);
    }

    #[test]
    fn test_missing_weight() {
        let input = GrowthForm {
            weight_kg: None,
            ..form(12, 9.6, 75.7)
        };
        assert_eq!(GrowthService::assess(&input).unwrap_err().code(), "MISSING_INPUT");
    }
}
