//! Numeric item validators

use crate::{
    constants::TRANSACTION_LIMIT,
    errors::{ValidationError, ValidationResult},
    record::Item,
    traits::Validator,
};

use super::utils;

/// Admits items that parse as an integer or float
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericValidator;

impl Validator for NumericValidator {
    type Value = Item;

    fn validate(&self, item: &Item) -> ValidationResult<()> {
        utils::numeric_value(item).map(|_| ())
    }

    fn name(&self) -> &'static str {
        "NumericValidator"
    }
}

/// Admits numeric items that are not below zero
///
/// Sensor readings are treated as magnitudes, so a negative value means a
/// broken unit.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonNegativeValidator;

impl Validator for NonNegativeValidator {
    type Value = Item;

    fn validate(&self, item: &Item) -> ValidationResult<()> {
        let value = utils::numeric_value(item)?;
        utils::check_non_negative(value)
    }

    fn name(&self) -> &'static str {
        "NonNegativeValidator"
    }
}

/// Admits integers inside an open interval, optionally excluding zero
#[derive(Debug, Clone, Copy)]
pub struct BoundedIntegerValidator {
    /// Exclusive lower bound
    lo: i64,
    /// Exclusive upper bound
    hi: i64,
    /// Whether zero is refused
    exclude_zero: bool,
}

impl BoundedIntegerValidator {
    /// Create validator with custom bounds
    pub fn new(lo: i64, hi: i64, exclude_zero: bool) -> Self {
        // Can't have lo > hi
        let (lo, hi) = if lo > hi { (hi, lo) } else { (lo, hi) };
        Self { lo, hi, exclude_zero }
    }

    /// Transaction amounts: `(-10000, 10000)` without zero
    pub fn transactions() -> Self {
        Self::new(-TRANSACTION_LIMIT, TRANSACTION_LIMIT, true)
    }

    /// Exclusive bounds `(lo, hi)`
    pub fn bounds(&self) -> (i64, i64) {
        (self.lo, self.hi)
    }
}

impl Validator for BoundedIntegerValidator {
    type Value = Item;

    fn validate(&self, item: &Item) -> ValidationResult<()> {
        let value = item.as_int().ok_or_else(|| ValidationError::NotInteger {
            item: item.to_string(),
        })?;
        utils::check_amount(value, self.lo, self.hi, self.exclude_zero)
    }

    fn name(&self) -> &'static str {
        "BoundedIntegerValidator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_items() {
        let v = NumericValidator;
        assert!(v.validate(&Item::Int(1)).is_ok());
        assert!(v.validate(&Item::Float(22.5)).is_ok());
        assert!(v.validate(&Item::from("3.5")).is_ok());
        assert!(v.validate(&Item::from("t")).is_err());
    }

    #[test]
    fn negative_unit_reason() {
        let err = NonNegativeValidator.validate(&Item::Int(-1)).unwrap_err();
        assert_eq!(err, ValidationError::NegativeUnit { value: -1.0 });
        assert!(NonNegativeValidator.validate(&Item::Int(0)).is_ok());
    }

    #[test]
    fn transaction_bounds() {
        let v = BoundedIntegerValidator::transactions();
        assert!(v.validate(&Item::Int(9_999)).is_ok());
        assert!(v.validate(&Item::Int(-9_999)).is_ok());
        assert!(v.validate(&Item::Int(10_000)).is_err());
        assert!(v.validate(&Item::Int(-10_000)).is_err());
        assert!(v.validate(&Item::Int(143_540)).is_err());
        assert_eq!(v.validate(&Item::Int(0)), Err(ValidationError::ZeroValue));
    }

    #[test]
    fn typed_integers_only() {
        let v = BoundedIntegerValidator::transactions();
        assert!(matches!(v.validate(&Item::from("2")), Err(ValidationError::NotInteger { .. })));
        assert!(matches!(v.validate(&Item::Float(2.0)), Err(ValidationError::NotInteger { .. })));
    }

    #[test]
    fn swapped_bounds() {
        assert_eq!(BoundedIntegerValidator::new(10, -10, false).bounds(), (-10, 10));
    }
}
