//! Measurement classification
//!
//! Maps a raw measurement, the subject's age and sex to a category label.
//! Percentile charts use exact-match age lookup; blood pressure and body fat
//! use ordered rule sets evaluated first-match-wins.

use crate::models::BiologicalSex;
use crate::reference_tables::{reference_table, ChartKind, PercentileBand};
use serde::{Deserialize, Serialize};

// ============================================================================
// Categories
// ============================================================================

/// Human-readable label for a category
pub trait CategoryLabel {
    fn label(&self) -> &'static str;
}

/// Result of a classification that may miss its reference data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification<C> {
    Known(C),
    /// No reference row exists for the requested age
    Unknown,
}

impl<C> Classification<C> {
    pub fn known(self) -> Option<C> {
        match self {
            Classification::Known(category) => Some(category),
            Classification::Unknown => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Classification::Unknown)
    }
}

impl<C: CategoryLabel> Classification<C> {
    pub fn label(&self) -> &'static str {
        match self {
            Classification::Known(category) => category.label(),
            Classification::Unknown => "Unknown",
        }
    }
}

/// Weight-for-age and BMI-for-age category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthCategory {
    SeverelyUnderweight,
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl From<PercentileBand> for GrowthCategory {
    fn from(band: PercentileBand) -> Self {
        match band {
            PercentileBand::BelowP3 => GrowthCategory::SeverelyUnderweight,
            PercentileBand::P3ToP15 => GrowthCategory::Underweight,
            PercentileBand::P15ToP85 => GrowthCategory::Normal,
            PercentileBand::P85ToP97 => GrowthCategory::Overweight,
            PercentileBand::AtOrAboveP97 => GrowthCategory::Obese,
        }
    }
}

impl CategoryLabel for GrowthCategory {
    fn label(&self) -> &'static str {
        match self {
            GrowthCategory::SeverelyUnderweight => "Severely Underweight",
            GrowthCategory::Underweight => "Underweight",
            GrowthCategory::Normal => "Normal Weight",
            GrowthCategory::Overweight => "Overweight",
            GrowthCategory::Obese => "Obese",
        }
    }
}

/// Height-for-age category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatureCategory {
    SeverelyStunted,
    Stunted,
    Normal,
    Tall,
    VeryTall,
}

impl From<PercentileBand> for StatureCategory {
    fn from(band: PercentileBand) -> Self {
        match band {
            PercentileBand::BelowP3 => StatureCategory::SeverelyStunted,
            PercentileBand::P3ToP15 => StatureCategory::Stunted,
            PercentileBand::P15ToP85 => StatureCategory::Normal,
            PercentileBand::P85ToP97 => StatureCategory::Tall,
            PercentileBand::AtOrAboveP97 => StatureCategory::VeryTall,
        }
    }
}

impl CategoryLabel for StatureCategory {
    fn label(&self) -> &'static str {
        match self {
            StatureCategory::SeverelyStunted => "Severely Stunted",
            StatureCategory::Stunted => "Stunted",
            StatureCategory::Normal => "Normal Height",
            StatureCategory::Tall => "Tall",
            StatureCategory::VeryTall => "Very Tall",
        }
    }
}

/// Blood pressure category.
///
/// Adults use the five-tier scale; children and adolescents use
/// `Normal`, `Elevated` and `High` only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BloodPressureCategory {
    Normal,
    Elevated,
    Stage1,
    Stage2,
    Crisis,
    High,
}

impl CategoryLabel for BloodPressureCategory {
    fn label(&self) -> &'static str {
        match self {
            BloodPressureCategory::Normal => "Normal",
            BloodPressureCategory::Elevated => "Elevated",
            BloodPressureCategory::Stage1 => "High BP Stage 1",
            BloodPressureCategory::Stage2 => "High BP Stage 2",
            BloodPressureCategory::Crisis => "Hypertensive Crisis",
            BloodPressureCategory::High => "High",
        }
    }
}

/// Body fat percentage category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyFatCategory {
    Essential,
    Athletic,
    Fitness,
    Average,
    Obese,
}

impl CategoryLabel for BodyFatCategory {
    fn label(&self) -> &'static str {
        match self {
            BodyFatCategory::Essential => "Essential Fat",
            BodyFatCategory::Athletic => "Athletes",
            BodyFatCategory::Fitness => "Fitness",
            BodyFatCategory::Average => "Average",
            BodyFatCategory::Obese => "Obese",
        }
    }
}

// ============================================================================
// Percentile Charts
// ============================================================================

/// Classify a value against a percentile chart at an exact sampled age
pub fn classify_percentile<C: From<PercentileBand>>(
    kind: ChartKind,
    sex: BiologicalSex,
    age: u32,
    value: f64,
) -> Classification<C> {
    match reference_table(kind, sex).row_for_age(age) {
        Some(row) => Classification::Known(C::from(row.band(value))),
        None => Classification::Unknown,
    }
}

/// Weight (kg) for age in months, 0-60
pub fn classify_weight_for_age(
    sex: BiologicalSex,
    age_months: u32,
    weight_kg: f64,
) -> Classification<GrowthCategory> {
    classify_percentile(ChartKind::WeightForAge, sex, age_months, weight_kg)
}

/// Height (cm) for age in months, 0-60
pub fn classify_height_for_age(
    sex: BiologicalSex,
    age_months: u32,
    height_cm: f64,
) -> Classification<StatureCategory> {
    classify_percentile(ChartKind::HeightForAge, sex, age_months, height_cm)
}

/// BMI for age in whole years, 5-19
pub fn classify_bmi_for_age(
    sex: BiologicalSex,
    age_years: u32,
    bmi: f64,
) -> Classification<GrowthCategory> {
    classify_percentile(ChartKind::BmiForAge, sex, age_years, bmi)
}

// ============================================================================
// Blood Pressure Rules
// ============================================================================

/// How a rule combines its two threshold tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combine {
    All,
    Any,
}

#[derive(Debug, Clone, Copy)]
struct BpRule {
    systolic_below: u32,
    diastolic_below: u32,
    combine: Combine,
    category: BloodPressureCategory,
}

impl BpRule {
    fn matches(&self, systolic: u32, diastolic: u32) -> bool {
        let s = systolic < self.systolic_below;
        let d = diastolic < self.diastolic_below;
        match self.combine {
            Combine::All => s && d,
            Combine::Any => s || d,
        }
    }
}

const fn bp_rule(
    systolic_below: u32,
    diastolic_below: u32,
    combine: Combine,
    category: BloodPressureCategory,
) -> BpRule {
    BpRule {
        systolic_below,
        diastolic_below,
        combine,
        category,
    }
}

struct BpRuleSet {
    rules: &'static [BpRule],
    fallback: BloodPressureCategory,
}

static ADULT_BP_RULES: [BpRule; 4] = [
    bp_rule(120, 80, Combine::All, BloodPressureCategory::Normal),
    bp_rule(130, 80, Combine::All, BloodPressureCategory::Elevated),
    bp_rule(140, 90, Combine::Any, BloodPressureCategory::Stage1),
    bp_rule(180, 120, Combine::Any, BloodPressureCategory::Stage2),
];

static CHILD_BP_RULES: [BpRule; 2] = [
    bp_rule(110, 70, Combine::All, BloodPressureCategory::Normal),
    bp_rule(120, 80, Combine::All, BloodPressureCategory::Elevated),
];

static ADOLESCENT_BP_RULES: [BpRule; 2] = [
    bp_rule(120, 80, Combine::All, BloodPressureCategory::Normal),
    bp_rule(130, 85, Combine::All, BloodPressureCategory::Elevated),
];

/// Age bracket selecting a blood pressure rule set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeBracket {
    /// Under 13
    Child,
    /// 13 to 17
    Adolescent,
    /// 18 and over, or age not given
    Adult,
}

impl AgeBracket {
    pub fn from_age(age_years: Option<u32>) -> Self {
        match age_years {
            Some(age) if age < 13 => AgeBracket::Child,
            Some(age) if age < 18 => AgeBracket::Adolescent,
            _ => AgeBracket::Adult,
        }
    }

    fn bp_rules(&self) -> BpRuleSet {
        match self {
            AgeBracket::Child => BpRuleSet {
                rules: &CHILD_BP_RULES,
                fallback: BloodPressureCategory::High,
            },
            AgeBracket::Adolescent => BpRuleSet {
                rules: &ADOLESCENT_BP_RULES,
                fallback: BloodPressureCategory::High,
            },
            AgeBracket::Adult => BpRuleSet {
                rules: &ADULT_BP_RULES,
                fallback: BloodPressureCategory::Crisis,
            },
        }
    }
}

/// Classify a blood pressure reading. The first matching rule wins.
pub fn classify_blood_pressure(
    systolic: u32,
    diastolic: u32,
    age_years: Option<u32>,
) -> BloodPressureCategory {
    let set = AgeBracket::from_age(age_years).bp_rules();
    set.rules
        .iter()
        .find(|rule| rule.matches(systolic, diastolic))
        .map(|rule| rule.category)
        .unwrap_or(set.fallback)
}

// ============================================================================
// Body Fat Rules
// ============================================================================

/// Ascending `(upper bound, category)` pairs; values at or above the last
/// bound are `Obese`.
static MALE_BODY_FAT: [(f64, BodyFatCategory); 4] = [
    (6.0, BodyFatCategory::Essential),
    (14.0, BodyFatCategory::Athletic),
    (18.0, BodyFatCategory::Fitness),
    (25.0, BodyFatCategory::Average),
];

static FEMALE_BODY_FAT: [(f64, BodyFatCategory); 4] = [
    (14.0, BodyFatCategory::Essential),
    (21.0, BodyFatCategory::Athletic),
    (25.0, BodyFatCategory::Fitness),
    (32.0, BodyFatCategory::Average),
];

/// Classify a body fat percentage
pub fn classify_body_fat(body_fat_percent: f64, sex: BiologicalSex) -> BodyFatCategory {
    let thresholds: &[(f64, BodyFatCategory)] = match sex {
        BiologicalSex::Male => &MALE_BODY_FAT,
        BiologicalSex::Female => &FEMALE_BODY_FAT,
    };
    thresholds
        .iter()
        .find(|(below, _)| body_fat_percent < *below)
        .map(|(_, category)| *category)
        .unwrap_or(BodyFatCategory::Obese)
}

// ============================================================================
// Unified Entry Point
// ============================================================================

/// A raw measurement tagged with its metric kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Measurement {
    WeightForAge { weight_kg: f64 },
    HeightForAge { height_cm: f64 },
    BmiForAge { bmi: f64 },
    BloodPressure { systolic: u32, diastolic: u32 },
    BodyFat { percent: f64 },
}

/// Category from any classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scale", content = "category", rename_all = "snake_case")]
pub enum Category {
    Growth(GrowthCategory),
    Stature(StatureCategory),
    BloodPressure(BloodPressureCategory),
    BodyFat(BodyFatCategory),
}

impl CategoryLabel for Category {
    fn label(&self) -> &'static str {
        match self {
            Category::Growth(c) => c.label(),
            Category::Stature(c) => c.label(),
            Category::BloodPressure(c) => c.label(),
            Category::BodyFat(c) => c.label(),
        }
    }
}

/// Classify any measurement.
///
/// `age` is in months for the 0-60 month growth charts and in years
/// otherwise. Chart lookups without an age are `Unknown`.
pub fn classify(
    measurement: Measurement,
    age: Option<u32>,
    sex: BiologicalSex,
) -> Classification<Category> {
    let chart = |kind: ChartKind, value: f64| -> Classification<PercentileBand> {
        age.and_then(|age| reference_table(kind, sex).row_for_age(age))
            .map(|row| Classification::Known(row.band(value)))
            .unwrap_or(Classification::Unknown)
    };

    match measurement {
        Measurement::WeightForAge { weight_kg } => match chart(ChartKind::WeightForAge, weight_kg) {
            Classification::Known(band) => Classification::Known(Category::Growth(band.into())),
            Classification::Unknown => Classification::Unknown,
        },
        Measurement::HeightForAge { height_cm } => match chart(ChartKind::HeightForAge, height_cm) {
            Classification::Known(band) => Classification::Known(Category::Stature(band.into())),
            Classification::Unknown => Classification::Unknown,
        },
        Measurement::BmiForAge { bmi } => match chart(ChartKind::BmiForAge, bmi) {
            Classification::Known(band) => Classification::Known(Category::Growth(band.into())),
            Classification::Unknown => Classification::Unknown,
        },
        Measurement::BloodPressure { systolic, diastolic } => Classification::Known(
            Category::BloodPressure(classify_blood_pressure(systolic, diastolic, age)),
        ),
        Measurement::BodyFat { percent } => {
            Classification::Known(Category::BodyFat(classify_body_fat(percent, sex)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    use BloodPressureCategory as Bp;

    #[rstest]
    #[case(119, 79, None, Bp::Normal)]
    #[case(120, 79, None, Bp::Elevated)]
    #[case(129, 79, Some(40), Bp::Elevated)]
    #[case(125, 80, Some(40), Bp::Stage1)]
    #[case(135, 70, Some(30), Bp::Stage1)]
    #[case(145, 95, Some(30), Bp::Stage2)]
    #[case(185, 70, Some(30), Bp::Stage1)]
    #[case(185, 125, Some(30), Bp::Crisis)]
    #[case(180, 120, Some(65), Bp::Crisis)]
    fn test_adult_blood_pressure(
        #[case] systolic: u32,
        #[case] diastolic: u32,
        #[case] age: Option<u32>,
        #[case] expected: BloodPressureCategory,
    ) {
        assert_eq!(classify_blood_pressure(systolic, diastolic, age), expected);
    }

    #[rstest]
    #[case(109, 69, Some(8), Bp::Normal)]
    #[case(110, 69, Some(8), Bp::Elevated)]
    #[case(119, 79, Some(0), Bp::Elevated)]
    #[case(120, 60, Some(12), Bp::High)]
    #[case(119, 79, Some(13), Bp::Normal)]
    #[case(129, 84, Some(17), Bp::Elevated)]
    #[case(129, 85, Some(17), Bp::High)]
    #[case(119, 79, Some(18), Bp::Normal)]
    fn test_pediatric_blood_pressure(
        #[case] systolic: u32,
        #[case] diastolic: u32,
        #[case] age: Option<u32>,
        #[case] expected: BloodPressureCategory,
    ) {
        assert_eq!(classify_blood_pressure(systolic, diastolic, age), expected);
    }

    #[rstest]
    #[case(None, AgeBracket::Adult)]
    // A recorded age of zero is an infant, not a missing age
    #[case(Some(0), AgeBracket::Child)]
    #[case(Some(12), AgeBracket::Child)]
    #[case(Some(13), AgeBracket::Adolescent)]
    #[case(Some(17), AgeBracket::Adolescent)]
    #[case(Some(18), AgeBracket::Adult)]
    fn test_age_brackets(#[case] age: Option<u32>, #[case] expected: AgeBracket) {
        assert_eq!(AgeBracket::from_age(age), expected);
    }

    #[test]
    fn test_zero_age_uses_child_thresholds() {
        // 119/79 is Normal for adults
        assert_eq!(classify_blood_pressure(119, 79, None), BloodPressureCategory::Normal);
        assert_eq!(classify_blood_pressure(119, 79, Some(0)), BloodPressureCategory::Elevated);
    }

    #[rstest]
    #[case(5.9, BiologicalSex::Male, BodyFatCategory::Essential)]
    #[case(6.0, BiologicalSex::Male, BodyFatCategory::Athletic)]
    #[case(17.9, BiologicalSex::Male, BodyFatCategory::Fitness)]
    #[case(24.9, BiologicalSex::Male, BodyFatCategory::Average)]
    #[case(25.0, BiologicalSex::Male, BodyFatCategory::Obese)]
    #[case(13.9, BiologicalSex::Female, BodyFatCategory::Essential)]
    #[case(20.0, BiologicalSex::Female, BodyFatCategory::Athletic)]
    #[case(28.0, BiologicalSex::Female, BodyFatCategory::Average)]
    #[case(32.0, BiologicalSex::Female, BodyFatCategory::Obese)]
    fn test_body_fat_categories(
        #[case] percent: f64,
        #[case] sex: BiologicalSex,
        #[case] expected: BodyFatCategory,
    ) {
        assert_eq!(classify_body_fat(percent, sex), expected);
    }

    #[test]
    fn test_weight_for_age_bands() {
        // Boys at 12 months: p3 8.4, p15 9.4, p85 11.7, p97 13.0
        let sex = BiologicalSex::Male;
        assert_eq!(
            classify_weight_for_age(sex, 12, 8.3),
            Classification::Known(GrowthCategory::SeverelyUnderweight)
        );
        assert_eq!(
            classify_weight_for_age(sex, 12, 8.4),
            Classification::Known(GrowthCategory::Underweight)
        );
        assert_eq!(
            classify_weight_for_age(sex, 12, 10.4),
            Classification::Known(GrowthCategory::Normal)
        );
        assert_eq!(
            classify_weight_for_age(sex, 12, 11.7),
            Classification::Known(GrowthCategory::Overweight)
        );
        assert_eq!(
            classify_weight_for_age(sex, 12, 13.0),
            Classification::Known(GrowthCategory::Obese)
        );
    }

    #[test]
    fn test_unsampled_age_is_unknown() {
        let result = classify_weight_for_age(BiologicalSex::Female, 7, 7.5);
        assert_eq!(result, Classification::Unknown);
        assert_eq!(result.label(), "Unknown");
        assert!(classify_bmi_for_age(BiologicalSex::Male, 4, 15.0).is_unknown());
        assert!(classify_bmi_for_age(BiologicalSex::Male, 20, 15.0).is_unknown());
    }

    #[test]
    fn test_height_for_age_uses_stature_labels() {
        let result = classify_height_for_age(BiologicalSex::Female, 24, 79.0);
        assert_eq!(result, Classification::Known(StatureCategory::SeverelyStunted));
        assert_eq!(result.label(), "Severely Stunted");
    }

    #[test]
    fn test_bmi_for_age_shared_between_sexes() {
        let boy = classify_bmi_for_age(BiologicalSex::Male, 10, 19.0);
        let girl = classify_bmi_for_age(BiologicalSex::Female, 10, 19.0);
        assert_eq!(boy, girl);
        assert_eq!(boy.label(), "Overweight");
    }

    #[test]
    fn test_unified_classify() {
        let bp = classify(
            Measurement::BloodPressure { systolic: 135, diastolic: 70 },
            Some(30),
            BiologicalSex::Male,
        );
        assert_eq!(bp, Classification::Known(Category::BloodPressure(Bp::Stage1)));

        let growth = classify(
            Measurement::HeightForAge { height_cm: 75.7 },
            Some(12),
            BiologicalSex::Male,
        );
        assert_eq!(growth, Classification::Known(Category::Stature(StatureCategory::Normal)));

        let missing_age = classify(Measurement::BmiForAge { bmi: 16.0 }, None, BiologicalSex::Female);
        assert!(missing_age.is_unknown());
    }

    /// Tier order along the adult scale
    fn adult_rank(category: BloodPressureCategory) -> u8 {
        match category {
            Bp::Normal => 0,
            Bp::Elevated => 1,
            Bp::Stage1 => 2,
            Bp::Stage2 => 3,
            Bp::Crisis => 4,
            Bp::High => 5,
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: raising systolic with diastolic fixed never lowers the tier
        #[test]
        fn prop_bp_monotonic_in_systolic(
            systolic in 60u32..250,
            step in 1u32..60,
            diastolic in 40u32..140
        ) {
            let low = classify_blood_pressure(systolic, diastolic, Some(40));
            let high = classify_blood_pressure(systolic + step, diastolic, Some(40));
            prop_assert!(adult_rank(high) >= adult_rank(low),
                "{}/{} -> {:?} but {}/{} -> {:?}",
                systolic, diastolic, low, systolic + step, diastolic, high);
        }

        /// Property: raising diastolic with systolic fixed never lowers the tier
        #[test]
        fn prop_bp_monotonic_in_diastolic(
            systolic in 60u32..250,
            diastolic in 40u32..140,
            step in 1u32..40
        ) {
            let low = classify_blood_pressure(systolic, diastolic, None);
            let high = classify_blood_pressure(systolic, diastolic + step, None);
            prop_assert!(adult_rank(high) >= adult_rank(low));
        }

        /// Property: pediatric readings never receive an adult-only tier
        #[test]
        fn prop_pediatric_scale_has_three_tiers(
            systolic in 60u32..250,
            diastolic in 40u32..140,
            age in 0u32..18
        ) {
            let category = classify_blood_pressure(systolic, diastolic, Some(age));
            prop_assert!(matches!(category, Bp::Normal | Bp::Elevated | Bp::High));
        }
    }
}
