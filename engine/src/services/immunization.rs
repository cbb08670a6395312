//! Immunization schedule service

use crate::error::EngineResult;
use crate::state::Session;
use health_metrics_shared::immunization::{
    schedule_status, total_vaccines, CompletionSet, MilestoneStatus,
};
use health_metrics_shared::MetricError;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Persisted immunization state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImmunizationProgress {
    /// Child's age in weeks, if entered
    #[serde(default)]
    pub child_age_weeks: Option<f64>,
    #[serde(default)]
    pub completed: CompletionSet,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImmunizationSummary {
    pub completed: usize,
    pub total: usize,
    /// Rounded percentage
    pub percent: f64,
}

pub struct ImmunizationService;

impl ImmunizationService {
    pub fn set_child_age(session: &mut Session, age_weeks: Option<f64>) -> EngineResult<()> {
        if let Some(weeks) = age_weeks {
            if !weeks.is_finite() || weeks < 0.0 {
                return Err(MetricError::Validation("Age must be zero or more weeks".to_string()).into());
            }
        }
        let next = ImmunizationProgress {
            child_age_weeks: age_weeks,
            ..session.immunization.clone()
        };
        session.commit_immunization(next)
    }

    /// Flip a vaccine's completion; returns whether it is now completed
    pub fn toggle_vaccine(session: &mut Session, name: &str) -> EngineResult<bool> {
        let mut next = session.immunization.clone();
        let completed = next.completed.toggle(name)?;
        session.commit_immunization(next)?;
        info!(vaccine = name, completed, "Toggled vaccine");
        Ok(completed)
    }

    /// Every milestone with due and completion flags
    pub fn get_schedule(session: &Session) -> Vec<MilestoneStatus> {
        schedule_status(
            session.immunization.child_age_weeks,
            &session.immunization.completed,
        )
    }

    pub fn get_summary(session: &Session) -> ImmunizationSummary {
        let completed = &session.immunization.completed;
        ImmunizationSummary {
            completed: completed.completed_count(),
            total: total_vaccines(),
            percent: completed.completion_percent(),
        }
    }

    /// Forget all progress, including the child's age
    pub fn reset(session: &mut Session) -> EngineResult<()> {
        session.commit_immunization(ImmunizationProgress::default())
    }
}
