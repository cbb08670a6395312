//! Childhood immunization schedule (WHO / IAP, India)
//!
//! Due status compares the child's age in weeks against each milestone's
//! age descriptor. Completion is tracked separately, keyed by vaccine name.

use crate::errors::{MetricError, MetricResult};
use crate::health_metrics::round_half_up;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

const WEEKS_PER_MONTH: f64 = 4.33;
const WEEKS_PER_YEAR: f64 = 52.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Vaccine {
    pub name: &'static str,
    pub full_name: &'static str,
    pub protects: &'static str,
}

/// Vaccines given at one age
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Milestone {
    /// Age descriptor such as "Birth", "6 weeks" or "4-6 years"
    pub age: &'static str,
    pub vaccines: &'static [Vaccine],
}

impl Milestone {
    pub fn age_weeks(&self) -> f64 {
        age_descriptor_weeks(self.age)
    }

    /// Due once the child is at least the milestone age
    pub fn is_due(&self, child_age_weeks: f64) -> bool {
        child_age_weeks >= self.age_weeks()
    }
}

const fn vaccine(name: &'static str, full_name: &'static str, protects: &'static str) -> Vaccine {
    Vaccine {
        name,
        full_name,
        protects,
    }
}

const DPT: &str = "Diphtheria, Whooping cough, Tetanus";
const HIB: &str = "Meningitis, Pneumonia";
const PCV: &str = "Pneumonia, Meningitis";

static SCHEDULE: [Milestone; 11] = [
    Milestone {
        age: "Birth",
        vaccines: &[
            vaccine("BCG", "Bacillus Calmette-Guérin", "Tuberculosis"),
            vaccine("OPV-0", "Oral Polio Vaccine (Birth dose)", "Poliomyelitis"),
            vaccine("Hepatitis B-1", "Hepatitis B (1st dose)", "Hepatitis B"),
        ],
    },
    Milestone {
        age: "6 weeks",
        vaccines: &[
            vaccine("OPV-1", "Oral Polio Vaccine (1st dose)", "Poliomyelitis"),
            vaccine("DPT-1", "Diphtheria, Pertussis, Tetanus (1st dose)", DPT),
            vaccine("Hepatitis B-2", "Hepatitis B (2nd dose)", "Hepatitis B"),
            vaccine("Hib-1", "Haemophilus influenzae type b (1st dose)", HIB),
            vaccine("PCV-1", "Pneumococcal Conjugate Vaccine (1st dose)", PCV),
            vaccine("Rotavirus-1", "Rotavirus Vaccine (1st dose)", "Severe diarrhea"),
        ],
    },
    Milestone {
        age: "10 weeks",
        vaccines: &[
            vaccine("OPV-2", "Oral Polio Vaccine (2nd dose)", "Poliomyelitis"),
            vaccine("DPT-2", "Diphtheria, Pertussis, Tetanus (2nd dose)", DPT),
            vaccine("Hib-2", "Haemophilus influenzae type b (2nd dose)", HIB),
            vaccine("PCV-2", "Pneumococcal Conjugate Vaccine (2nd dose)", PCV),
            vaccine("Rotavirus-2", "Rotavirus Vaccine (2nd dose)", "Severe diarrhea"),
        ],
    },
    Milestone {
        age: "14 weeks",
        vaccines: &[
            vaccine("OPV-3", "Oral Polio Vaccine (3rd dose)", "Poliomyelitis"),
            vaccine("DPT-3", "Diphtheria, Pertussis, Tetanus (3rd dose)", DPT),
            vaccine("Hepatitis B-3", "Hepatitis B (3rd dose)", "Hepatitis B"),
            vaccine("Hib-3", "Haemophilus influenzae type b (3rd dose)", HIB),
            vaccine("PCV-3", "Pneumococcal Conjugate Vaccine (3rd dose)", PCV),
            vaccine("Rotavirus-3", "Rotavirus Vaccine (3rd dose)", "Severe diarrhea"),
        ],
    },
    Milestone {
        age: "9 months",
        vaccines: &[
            vaccine("Measles-1", "Measles Vaccine (1st dose)", "Measles"),
            vaccine("Vitamin A-1", "Vitamin A Supplementation (1st dose)", "Vitamin A deficiency"),
        ],
    },
    Milestone {
        age: "12 months",
        vaccines: &[
            vaccine("MMR-1", "Measles, Mumps, Rubella (1st dose)", "Measles, Mumps, Rubella"),
            vaccine("Typhoid", "Typhoid Conjugate Vaccine", "Typhoid fever"),
            vaccine("Hepatitis A-1", "Hepatitis A (1st dose)", "Hepatitis A"),
        ],
    },
    Milestone {
        age: "15 months",
        vaccines: &[
            vaccine("PCV Booster", "Pneumococcal Conjugate Vaccine (Booster)", PCV),
            vaccine("Varicella-1", "Varicella Vaccine (1st dose)", "Chickenpox"),
        ],
    },
    Milestone {
        age: "16-18 months",
        vaccines: &[
            vaccine("DPT Booster-1", "DPT (1st Booster)", DPT),
            vaccine("OPV Booster", "OPV (Booster)", "Poliomyelitis"),
            vaccine("Hib Booster", "Hib (Booster)", HIB),
            vaccine("MMR-2", "MMR (2nd dose)", "Measles, Mumps, Rubella"),
            vaccine("Vitamin A-2", "Vitamin A Supplementation (2nd dose)", "Vitamin A deficiency"),
        ],
    },
    Milestone {
        age: "18 months",
        vaccines: &[vaccine("Hepatitis A-2", "Hepatitis A (2nd dose)", "Hepatitis A")],
    },
    Milestone {
        age: "4-6 years",
        vaccines: &[
            vaccine("DPT Booster-2", "DPT (2nd Booster)", DPT),
            vaccine("OPV Booster-2", "OPV (2nd Booster)", "Poliomyelitis"),
            vaccine("Varicella-2", "Varicella (2nd dose)", "Chickenpox"),
        ],
    },
    Milestone {
        age: "10-12 years",
        vaccines: &[
            vaccine("Td", "Tetanus-Diphtheria", "Tetanus, Diphtheria"),
            vaccine("HPV", "Human Papillomavirus (for girls)", "Cervical cancer"),
        ],
    },
];

/// The full schedule in age order
pub fn schedule() -> &'static [Milestone] {
    &SCHEDULE
}

pub fn total_vaccines() -> usize {
    SCHEDULE.iter().map(|m| m.vaccines.len()).sum()
}

pub fn find_vaccine(name: &str) -> Option<&'static Vaccine> {
    SCHEDULE
        .iter()
        .flat_map(|m| m.vaccines.iter())
        .find(|v| v.name == name)
}

/// Convert an age descriptor to weeks.
///
/// Ranges such as "16-18 months" use their leading number. Unrecognised
/// descriptors map to 0.
pub fn age_descriptor_weeks(descriptor: &str) -> f64 {
    if descriptor == "Birth" {
        return 0.0;
    }
    let leading: String = descriptor
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    let Ok(n) = leading.parse::<u32>() else {
        return 0.0;
    };
    let n = n as f64;
    if descriptor.contains("weeks") {
        n
    } else if descriptor.contains("months") {
        n * WEEKS_PER_MONTH
    } else if descriptor.contains("years") {
        n * WEEKS_PER_YEAR
    } else {
        0.0
    }
}

// ============================================================================
// Completion Tracking
// ============================================================================

/// Names of vaccines marked as given
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletionSet(BTreeSet<String>);

impl CompletionSet {
    /// Flip a vaccine's completion; returns whether it is now completed
    pub fn toggle(&mut self, name: &str) -> MetricResult<bool> {
        if find_vaccine(name).is_none() {
            return Err(MetricError::Validation(format!(
                "Unknown vaccine: {}",
                name
            )));
        }
        if self.0.remove(name) {
            Ok(false)
        } else {
            self.0.insert(name.to_string());
            Ok(true)
        }
    }

    pub fn is_completed(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    /// Completed vaccines that appear in the schedule
    pub fn completed_count(&self) -> usize {
        self.0.iter().filter(|name| find_vaccine(name).is_some()).count()
    }

    /// round(completed / total × 100)
    pub fn completion_percent(&self) -> f64 {
        round_half_up(self.completed_count() as f64 / total_vaccines() as f64 * 100.0)
    }
}

// ============================================================================
// Status Views
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VaccineStatus {
    #[serde(flatten)]
    pub vaccine: Vaccine,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MilestoneStatus {
    pub age: &'static str,
    pub age_weeks: f64,
    /// Always false when the child's age is unknown
    pub due: bool,
    pub vaccines: Vec<VaccineStatus>,
}

/// Due and completion status for every milestone
pub fn schedule_status(child_age_weeks: Option<f64>, completed: &CompletionSet) -> Vec<MilestoneStatus> {
    SCHEDULE
        .iter()
        .map(|milestone| MilestoneStatus {
            age: milestone.age,
            age_weeks: milestone.age_weeks(),
            due: child_age_weeks.is_some_and(|weeks| milestone.is_due(weeks)),
            vaccines: milestone
                .vaccines
                .iter()
                .map(|v| VaccineStatus {
                    vaccine: *v,
                    completed: completed.is_completed(v.name),
                })
                .collect(),
        })
        .collect()
}
