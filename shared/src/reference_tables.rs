//! WHO population reference data
//!
//! Percentile curves are sampled at fixed ages only. Lookups are exact-match
//! on the age key; there is no interpolation between rows.

use crate::models::BiologicalSex;
use serde::{Deserialize, Serialize};

/// One sampled age on a percentile chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PercentileRow {
    /// Age key (months for growth charts, years for BMI-for-age)
    pub age: u32,
    pub p3: f64,
    pub p15: f64,
    pub p50: f64,
    pub p85: f64,
    pub p97: f64,
}

/// Position of a value relative to the reference curves.
///
/// Bands are half-open `[lower, upper)`; the median curve is charted but is
/// not a band boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PercentileBand {
    BelowP3,
    P3ToP15,
    P15ToP85,
    P85ToP97,
    AtOrAboveP97,
}

impl PercentileRow {
    /// Locate `value` among this row's curves
    pub fn band(&self, value: f64) -> PercentileBand {
        if value < self.p3 {
            PercentileBand::BelowP3
        } else if value < self.p15 {
            PercentileBand::P3ToP15
        } else if value < self.p85 {
            PercentileBand::P15ToP85
        } else if value < self.p97 {
            PercentileBand::P85ToP97
        } else {
            PercentileBand::AtOrAboveP97
        }
    }
}

/// Which quantity a chart describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Weight (kg) by age in months, 0-60
    WeightForAge,
    /// Length/height (cm) by age in months, 0-60
    HeightForAge,
    /// BMI (kg/m²) by age in years, 5-19
    BmiForAge,
}

impl ChartKind {
    /// Unit of the table's age key
    pub fn age_unit(&self) -> &'static str {
        match self {
            ChartKind::WeightForAge | ChartKind::HeightForAge => "months",
            ChartKind::BmiForAge => "years",
        }
    }
}

/// A percentile chart for one metric and sex
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ReferenceTable {
    pub kind: ChartKind,
    pub rows: &'static [PercentileRow],
}

impl ReferenceTable {
    /// Exact-match row lookup
    pub fn row_for_age(&self, age: u32) -> Option<&'static PercentileRow> {
        self.rows.iter().find(|row| row.age == age)
    }

    /// Ages at which the chart is sampled
    pub fn sampled_ages(&self) -> impl Iterator<Item = u32> + '_ {
        self.rows.iter().map(|row| row.age)
    }
}

const fn row(age: u32, p3: f64, p15: f64, p50: f64, p85: f64, p97: f64) -> PercentileRow {
    PercentileRow { age, p3, p15, p50, p85, p97 }
}

// ============================================================================
// WHO Child Growth Standards (0-60 months)
// ============================================================================

static MALE_WEIGHT_FOR_AGE: [PercentileRow; 7] = [
    row(0, 2.5, 2.9, 3.3, 3.9, 4.4),
    row(6, 6.4, 7.1, 7.9, 8.8, 9.8),
    row(12, 8.4, 9.4, 10.4, 11.7, 13.0),
    row(24, 10.8, 12.2, 13.4, 15.3, 17.1),
    row(36, 12.7, 14.3, 15.7, 17.8, 20.0),
    row(48, 14.1, 16.0, 17.7, 20.3, 23.0),
    row(60, 15.9, 18.0, 20.0, 23.0, 26.0),
];

static MALE_HEIGHT_FOR_AGE: [PercentileRow; 7] = [
    row(0, 46.1, 48.0, 49.9, 51.8, 53.7),
    row(6, 63.3, 65.5, 67.6, 69.8, 72.0),
    row(12, 71.0, 73.4, 75.7, 78.1, 80.5),
    row(24, 81.7, 84.9, 87.1, 90.2, 93.2),
    row(36, 88.7, 92.4, 95.1, 98.7, 102.0),
    row(48, 94.9, 99.1, 102.0, 106.0, 109.9),
    row(60, 100.7, 105.3, 109.0, 113.5, 117.7),
];

static FEMALE_WEIGHT_FOR_AGE: [PercentileRow; 7] = [
    row(0, 2.4, 2.8, 3.2, 3.7, 4.2),
    row(6, 5.9, 6.5, 7.3, 8.2, 9.3),
    row(12, 7.8, 8.7, 9.8, 11.0, 12.4),
    row(24, 10.2, 11.5, 12.8, 14.8, 16.8),
    row(36, 12.2, 13.9, 15.4, 17.6, 20.0),
    row(48, 13.7, 15.7, 17.4, 20.0, 22.9),
    row(60, 15.3, 17.7, 19.7, 22.7, 26.2),
];

static FEMALE_HEIGHT_FOR_AGE: [PercentileRow; 7] = [
    row(0, 45.4, 47.3, 49.1, 51.0, 52.9),
    row(6, 61.2, 63.5, 65.7, 68.0, 70.3),
    row(12, 68.9, 71.4, 74.0, 76.6, 79.2),
    row(24, 80.0, 83.2, 86.4, 89.6, 92.9),
    row(36, 87.4, 91.2, 94.1, 97.9, 101.6),
    row(48, 93.1, 97.4, 100.6, 105.0, 109.0),
    row(60, 98.7, 103.7, 107.4, 112.5, 117.3),
];

// ============================================================================
// WHO Growth Reference, BMI-for-age (5-19 years)
// ============================================================================

/// The BMI-for-age chart is shared by both sexes.
static BMI_FOR_AGE: [PercentileRow; 15] = [
    row(5, 13.1, 13.7, 15.0, 16.8, 18.8),
    row(6, 13.0, 13.6, 15.0, 16.9, 19.3),
    row(7, 12.9, 13.6, 15.1, 17.2, 20.0),
    row(8, 12.9, 13.6, 15.2, 17.5, 20.7),
    row(9, 12.9, 13.7, 15.4, 17.9, 21.4),
    row(10, 13.0, 13.8, 15.6, 18.3, 22.2),
    row(11, 13.1, 14.0, 15.8, 18.8, 23.0),
    row(12, 13.2, 14.2, 16.1, 19.3, 23.8),
    row(13, 13.4, 14.4, 16.4, 19.8, 24.7),
    row(14, 13.6, 14.7, 16.7, 20.3, 25.6),
    row(15, 13.8, 15.0, 17.0, 20.8, 26.4),
    row(16, 14.0, 15.3, 17.4, 21.3, 27.2),
    row(17, 14.2, 15.6, 17.7, 21.7, 27.9),
    row(18, 14.4, 15.8, 18.0, 22.2, 28.6),
    row(19, 14.6, 16.1, 18.3, 22.6, 29.2),
];

/// Select the chart for a metric and sex
pub fn reference_table(kind: ChartKind, sex: BiologicalSex) -> ReferenceTable {
    let rows: &'static [PercentileRow] = match (kind, sex) {
        (ChartKind::WeightForAge, BiologicalSex::Male) => &MALE_WEIGHT_FOR_AGE,
        (ChartKind::WeightForAge, BiologicalSex::Female) => &FEMALE_WEIGHT_FOR_AGE,
        (ChartKind::HeightForAge, BiologicalSex::Male) => &MALE_HEIGHT_FOR_AGE,
        (ChartKind::HeightForAge, BiologicalSex::Female) => &FEMALE_HEIGHT_FOR_AGE,
        (ChartKind::BmiForAge, _) => &BMI_FOR_AGE,
    };
    ReferenceTable { kind, rows }
}
