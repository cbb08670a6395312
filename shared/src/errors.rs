//! Error types for health metric computations

use thiserror::Error;

/// Errors produced by calculators and classifiers.
///
/// A lookup miss against a reference table is not an error: classifiers
/// report it as an `Unknown` classification instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetricError {
    /// A required input field is absent or not a finite number
    #[error("Missing input: {0}")]
    MissingInput(&'static str),

    /// The inputs are present but outside the formula's domain
    #[error("Domain error: {0}")]
    Domain(String),

    /// The inputs are outside the accepted range for the field
    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<validator::ValidationErrors> for MetricError {
    fn from(errors: validator::ValidationErrors) -> Self {
        MetricError::Validation(errors.to_string())
    }
}

/// Result alias for metric computations
pub type MetricResult<T> = Result<T, MetricError>;

/// Unwrap a required form field, rejecting absent and non-finite values.
pub fn require(value: Option<f64>, field: &'static str) -> MetricResult<f64> {
    match value {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(MetricError::MissingInput(field)),
    }
}

/// Unwrap a required non-numeric or integer form field
pub fn require_value<T>(value: Option<T>, field: &'static str) -> MetricResult<T> {
    value.ok_or(MetricError::MissingInput(field))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_present_value() {
        assert_eq!(require(Some(70.0), "weight"), Ok(70.0));
    }

    #[test]
    fn test_require_rejects_absent_and_nan() {
        assert_eq!(require(None, "weight"), Err(MetricError::MissingInput("weight")));
        assert_eq!(
            require(Some(f64::NAN), "height"),
            Err(MetricError::MissingInput("height"))
        );
    }

    #[test]
    fn test_error_messages() {
        let err = MetricError::MissingInput("waist");
        assert_eq!(err.to_string(), "Missing input: waist");
        let err = MetricError::Domain("waist must exceed neck".to_string());
        assert_eq!(err.to_string(), "Domain error: waist must exceed neck");
    }
}
