//! Blood pressure tracking service

use crate::error::{EngineError, EngineResult};
use crate::state::Session;
use health_metrics_shared::classifier::{classify_blood_pressure, BloodPressureCategory};
use health_metrics_shared::models::{BpReading, BpRecord};
use health_metrics_shared::types::BloodPressureForm;
use tracing::info;
use uuid::Uuid;

pub struct BloodPressureService;

impl BloodPressureService {
    /// Classify a reading without logging it
    pub fn classify(form: &BloodPressureForm) -> EngineResult<BloodPressureCategory> {
        let (systolic, diastolic) = form.values()?;
        Ok(classify_blood_pressure(systolic, diastolic, form.age_years))
    }

    /// Classify and log a reading. The category is fixed at log time.
    pub fn log_reading(session: &mut Session, form: &BloodPressureForm) -> EngineResult<BpReading> {
        let (systolic, diastolic) = form.values()?;
        let category = classify_blood_pressure(systolic, diastolic, form.age_years);
        let mut bp = session.bp.clone();
        let entry = bp
            .append(BpRecord {
                systolic,
                diastolic,
                age_years: form.age_years,
                category,
            })
            .clone();
        session.commit_bp(bp)?;

        info!(entry_id = %entry.id, systolic, diastolic, category = ?category, "Logged blood pressure");
        Ok(entry)
    }

    pub fn delete_reading(session: &mut Session, id: Uuid) -> EngineResult<BpReading> {
        let mut bp = session.bp.clone();
        let removed = bp
            .remove(id)
            .ok_or_else(|| EngineError::NotFound(format!("blood pressure reading {}", id)))?;
        session.commit_bp(bp)?;
        Ok(removed)
    }

    /// Readings, newest first
    pub fn get_history(session: &Session, limit: Option<usize>) -> Vec<&BpReading> {
        session.bp.list(limit).collect()
    }

    pub fn clear_history(session: &mut Session) -> EngineResult<()> {
        let mut bp = session.bp.clone();
        bp.clear();
        session.commit_bp(bp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use health_metrics_shared::classifier::CategoryLabel;

    fn form(systolic: u32, diastolic: u32, age_years: Option<u32>) -> BloodPressureForm {
        BloodPressureForm {
            systolic: Some(systolic),
            diastolic: Some(diastolic),
            age_years,
        }
    }

    #[test]
    fn test_classify_by_age() {
        let adult = BloodPressureService::classify(&form(125, 75, None)).unwrap();
        assert_eq!(adult, BloodPressureCategory::Elevated);
        let child = BloodPressureService::classify(&form(125, 75, Some(10))).unwrap();
        assert_eq!(child.label(), "High");
    }

    #[test]
    fn test_eleventh_reading_evicts_first() {
        let mut session = Session::in_memory().unwrap();
        let first = BloodPressureService::log_reading(&mut session, &form(118, 76, None)).unwrap();
        for s in 120..130 {
            BloodPressureService::log_reading(&mut session, &form(s, 80, None)).unwrap();
        }
        let history = BloodPressureService::get_history(&session, None);
        assert_eq!(history.len(), 10);
        assert!(history.iter().all(|r| r.id != first.id));
        assert_eq!(history[0].record.systolic, 129);
    }

    #[test]
    fn test_missing_diastolic() {
        let mut session = Session::in_memory().unwrap();
        let input = BloodPressureForm {
            systolic: Some(120),
            ..BloodPressureForm::default()
        };
        let err = BloodPressureService::log_reading(&mut session, &input).unwrap_err();
        assert_eq!(err.code(), "MISSING_INPUT");
        assert!(session.bp_history().is_empty());
    }

    #[test]
    fn test_delete_reading() {
        let mut session = Session::in_memory().unwrap();
        let entry = BloodPressureService::log_reading(&mut session, &form(150, 95, Some(40))).unwrap();
        assert_eq!(entry.record.category, BloodPressureCategory::Stage2);
        BloodPressureService::delete_reading(&mut session, entry.id).unwrap();
        assert!(BloodPressureService::delete_reading(&mut session, entry.id).is_err());
    }
}
