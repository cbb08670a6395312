//! Indian Diabetes Risk Score (IDRS)
//!
//! An additive screening heuristic. Each factor contributes a fixed number
//! of points; the total selects a risk tier with static advice.

use crate::health_metrics::{calculate_bmi, round_one_decimal};
use crate::errors::MetricResult;
use crate::models::BiologicalSex;
use serde::{Deserialize, Serialize};

/// Self-reported physical activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PhysicalActivity {
    #[default]
    Daily,
    Occasional,
    #[serde(rename = "none")]
    Inactive,
}

impl PhysicalActivity {
    fn points(&self) -> u32 {
        match self {
            PhysicalActivity::Daily => 0,
            PhysicalActivity::Occasional => 20,
            PhysicalActivity::Inactive => 30,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Low,
    Moderate,
    High,
}

impl RiskTier {
    pub fn from_score(score: u32) -> Self {
        if score < 30 {
            RiskTier::Low
        } else if score < 50 {
            RiskTier::Moderate
        } else {
            RiskTier::High
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskTier::Low => "Low Risk",
            RiskTier::Moderate => "Moderate Risk",
            RiskTier::High => "High Risk",
        }
    }

    pub fn recommendations(&self) -> &'static [&'static str] {
        match self {
            RiskTier::Low => &[
                "Maintain healthy lifestyle",
                "Regular physical activity",
                "Balanced diet with vegetables",
                "Annual health checkups",
            ],
            RiskTier::Moderate => &[
                "Increase physical activity to 150 min/week",
                "Reduce waist circumference",
                "Include more vegetables and fiber",
                "Monitor blood glucose every 6 months",
                "Consult healthcare provider",
            ],
            RiskTier::High => &[
                "Immediate lifestyle modification required",
                "Structured exercise program",
                "Weight reduction if overweight",
                "Regular blood glucose monitoring",
                "Consult endocrinologist",
                "Consider preventive medications",
            ],
        }
    }
}

/// Complete IDRS inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdrsInput {
    pub age_years: u32,
    pub sex: BiologicalSex,
    pub waist_cm: f64,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub physical_activity: PhysicalActivity,
    pub family_history: bool,
    pub hypertension_meds: bool,
    pub high_glucose: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdrsResult {
    pub score: u32,
    pub tier: RiskTier,
    pub risk_level: String,
    pub recommendations: Vec<String>,
    /// BMI rounded to one decimal
    pub bmi: f64,
}

fn age_points(age_years: u32) -> u32 {
    match age_years {
        0..=34 => 0,
        35..=49 => 20,
        _ => 30,
    }
}

fn waist_points(waist_cm: f64, sex: BiologicalSex) -> u32 {
    let (lower, upper) = match sex {
        BiologicalSex::Male => (90.0, 100.0),
        BiologicalSex::Female => (80.0, 90.0),
    };
    if waist_cm >= upper {
        20
    } else if waist_cm >= lower {
        10
    } else {
        0
    }
}

fn bmi_points(bmi: f64) -> u32 {
    if bmi >= 30.0 {
        20
    } else if bmi >= 25.0 {
        10
    } else {
        0
    }
}

/// Score diabetes risk
pub fn calculate_idrs(input: &IdrsInput) -> MetricResult<IdrsResult> {
    let bmi = calculate_bmi(input.weight_kg, input.height_cm)?;

    let flag = |set: bool| if set { 10 } else { 0 };
    let score = age_points(input.age_years)
        + waist_points(input.waist_cm, input.sex)
        + input.physical_activity.points()
        + flag(input.family_history)
        + bmi_points(bmi)
        + flag(input.hypertension_meds)
        + flag(input.high_glucose);

    let tier = RiskTier::from_score(score);
    Ok(IdrsResult {
        score,
        tier,
        risk_level: tier.label().to_string(),
        recommendations: tier.recommendations().iter().map(|r| r.to_string()).collect(),
        bmi: round_one_decimal(bmi),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;
    use crate::errors::MetricError;

    fn baseline() -> IdrsInput {
        IdrsInput {
            age_years: 30,
            sex: BiologicalSex::Male,
            waist_cm: 80.0,
            height_cm: 175.0,
            weight_kg: 65.0,
            physical_activity: PhysicalActivity::Daily,
            family_history: false,
            hypertension_meds: false,
            high_glucose: false,
        }
    }

    #[test]
    fn test_high_risk_profile() {
        let input = IdrsInput {
            age_years: 55,
            sex: BiologicalSex::Male,
            waist_cm: 105.0,
            height_cm: 170.0,
            weight_kg: 90.0,
            physical_activity: PhysicalActivity::Inactive,
            family_history: true,
            hypertension_meds: true,
            high_glucose: false,
        };
        let result = calculate_idrs(&input).unwrap();
        assert_eq!(result.score, 120);
        assert_eq!(result.tier, RiskTier::High);
        assert_eq!(result.risk_level, "High Risk");
        assert_eq!(result.bmi, 31.1);
        assert_eq!(result.recommendations.len(), 6);
    }

    #[test]
    fn test_invalid_body_measurements_are_domain_errors() {
        let nan_weight = IdrsInput {
            weight_kg: f64::NAN,
            ..baseline()
        };
        assert!(matches!(calculate_idrs(&nan_weight), Err(MetricError::Domain(_))));

        let negative_weight = IdrsInput {
            weight_kg: -80.0,
            ..baseline()
        };
        assert!(matches!(calculate_idrs(&negative_weight), Err(MetricError::Domain(_))));
    }

    #[test]
    fn test_low_risk_baseline() {
        let result = calculate_idrs(&baseline()).unwrap();
        assert_eq!(result.score, 0);
        assert_eq!(result.tier, RiskTier::Low);
        assert_eq!(result.recommendations[0], "Maintain healthy lifestyle");
    }

    #[rstest]
    #[case(34, 0)]
    #[case(35, 20)]
    #[case(49, 20)]
    #[case(50, 30)]
    fn test_age_points(#[case] age: u32, #[case] expected: u32) {
        assert_eq!(age_points(age), expected);
    }

    #[rstest]
    #[case(89.9, BiologicalSex::Male, 0)]
    #[case(90.0, BiologicalSex::Male, 10)]
    #[case(100.0, BiologicalSex::Male, 20)]
    #[case(79.9, BiologicalSex::Female, 0)]
    #[case(80.0, BiologicalSex::Female, 10)]
    #[case(90.0, BiologicalSex::Female, 20)]
    fn test_waist_points(#[case] waist: f64, #[case] sex: BiologicalSex, #[case] expected: u32) {
        assert_eq!(waist_points(waist, sex), expected);
    }

    #[rstest]
    #[case(29, RiskTier::Low)]
    #[case(30, RiskTier::Moderate)]
    #[case(49, RiskTier::Moderate)]
    #[case(50, RiskTier::High)]
    fn test_tier_boundaries(#[case] score: u32, #[case] expected: RiskTier) {
        assert_eq!(RiskTier::from_score(score), expected);
    }

    #[test]
    fn test_zero_height_is_domain_error() {
        let input = IdrsInput { height_cm: 0.0, ..baseline() };
        assert!(calculate_idrs(&input).is_err());
    }

    #[test]
    fn test_physical_activity_wire_names() {
        assert_eq!(serde_json::to_string(&PhysicalActivity::Inactive).unwrap(), "\"none\"");
        let parsed: PhysicalActivity = serde_json::from_str("\"occasional\"").unwrap();
        assert_eq!(parsed, PhysicalActivity::Occasional);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: Adding a risk factor never lowers the score
        #[test]
        fn prop_flags_never_lower_score(age in 18u32..90, waist in 60.0f64..130.0) {
            let base = IdrsInput { age_years: age, waist_cm: waist, ..baseline() };
            let flagged = IdrsInput { family_history: true, hypertension_meds: true, high_glucose: true, ..base.clone() };
            let a = calculate_idrs(&base).unwrap().score;
            let b = calculate_idrs(&flagged).unwrap().score;
            prop_assert_eq!(b, a + 30);
        }

        /// Property: Score stays within the additive maximum
        #[test]
        fn prop_score_bounded(age in 0u32..120, waist in 40.0f64..160.0, weight in 30.0f64..200.0) {
            let input = IdrsInput {
                age_years: age,
                waist_cm: waist,
                weight_kg: weight,
                physical_activity: PhysicalActivity::Inactive,
                family_history: true,
                hypertension_meds: true,
                high_glucose: true,
                ..baseline()
            };
            prop_assert!(calculate_idrs(&input).unwrap().score <= 130);
        }
    }
}
