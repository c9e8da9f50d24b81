//! Metrics error type

use thiserror::Error;

/// Errors raised by the metrics engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetricsError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for metrics computations
pub type MetricsResult<T> = Result<T, MetricsError>;

impl MetricsError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        MetricsError::InvalidInput(msg.into())
    }
}

/// Reject NaN/infinite values, and negatives when `allow_negative` is false
pub(crate) fn ensure_finite(field: &str, value: f64, allow_negative: bool) -> MetricsResult<f64> {
    if !value.is_finite() {
        return Err(MetricsError::invalid(format!("{} must be a number, got {}", field, value)));
    }
    if !allow_negative && value < 0.0 {
        return Err(MetricsError::invalid(format!("{} must not be negative, got {}", field, value)));
    }
    Ok(value)
}

/// Require a finite, strictly positive value
pub(crate) fn ensure_positive(field: &str, value: f64) -> MetricsResult<f64> {
    ensure_finite(field, value, true)?;
    if value <= 0.0 {
        return Err(MetricsError::invalid(format!("{} must be greater than 0, got {}", field, value)));
    }
    Ok(value)
}
