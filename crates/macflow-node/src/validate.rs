//! Shared parameter validation helpers.
//!
//! Every node repeats the same checks before touching its automation
//! surface: required strings are non-empty, numeric values sit inside their
//! declared bounds.  The helpers construct the [`NodeError::Validation`]
//! variant uniformly so the offending parameter is always named.

use crate::error::{NodeError, Result};

/// Require a non-empty string parameter (whitespace-only counts as empty).
/// Returns the trimmed value on success.
pub fn require_non_empty<'a>(
    node: &'static str,
    parameter: &'static str,
    value: &'a str,
) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(NodeError::Validation {
            node,
            parameter,
            reason: "must not be empty".into(),
        });
    }
    Ok(trimmed)
}

/// Require an integer parameter within `[min, max]` inclusive.
pub fn require_range_i64(
    node: &'static str,
    parameter: &'static str,
    value: i64,
    min: i64,
    max: i64,
) -> Result<i64> {
    if value < min || value > max {
        return Err(NodeError::Validation {
            node,
            parameter,
            reason: format!("must be within [{min}, {max}], got {value}"),
        });
    }
    Ok(value)
}

/// Require an integer parameter of at least `min` (no upper bound declared).
pub fn require_at_least_i64(
    node: &'static str,
    parameter: &'static str,
    value: i64,
    min: i64,
) -> Result<i64> {
    if value < min {
        return Err(NodeError::Validation {
            node,
            parameter,
            reason: format!("must be at least {min}, got {value}"),
        });
    }
    Ok(value)
}

/// Require a float parameter within `[min, max]` inclusive.  NaN is rejected.
pub fn require_range_f64(
    node: &'static str,
    parameter: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<f64> {
    if value.is_nan() || value < min || value > max {
        return Err(NodeError::Validation {
            node,
            parameter,
            reason: format!("must be within [{min}, {max}], got {value}"),
        });
    }
    Ok(value)
}
