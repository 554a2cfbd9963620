//! Common Validation Utilities
//!
//! Shared checks so every validator reports the same error for the same
//! problem. All functions are pure.

use crate::{
    errors::{ValidationError, ValidationResult},
    record::Item,
};

/// Numeric value of an item, or the reason it has none
pub fn numeric_value(item: &Item) -> ValidationResult<f64> {
    let value = item.as_f64().ok_or_else(|| ValidationError::NotNumeric {
        item: item.to_string(),
    })?;
    check_finite(value)?;
    Ok(value)
}

/// Reject NaN and infinities
pub fn check_finite(value: f64) -> ValidationResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::InvalidValue)
    }
}

/// Reject values below zero
pub fn check_non_negative(value: f64) -> ValidationResult<()> {
    if value < 0.0 {
        Err(ValidationError::NegativeUnit { value })
    } else {
        Ok(())
    }
}

/// Check `min < value < max`, both bounds exclusive
pub fn check_open_range(value: i64, min: i64, max: i64) -> ValidationResult<()> {
    if value <= min || value >= max {
        Err(ValidationError::OutOfRange { value, min, max })
    } else {
        Ok(())
    }
}

/// Check a transaction-style amount: optionally nonzero, inside the open range
pub fn check_amount(value: i64, min: i64, max: i64, exclude_zero: bool) -> ValidationResult<()> {
    if exclude_zero && value == 0 {
        return Err(ValidationError::ZeroValue);
    }
    check_open_range(value, min, max)
}
