//! Record validators for the structured data kinds
//!
//! Each validator first checks the record is of its kind, then checks the
//! content. The first offending entry decides the error.

use crate::{
    errors::{ValidationError, ValidationResult},
    record::{Record, RecordKind},
    traits::Validator,
};

use super::{numeric::BoundedIntegerValidator, utils};

fn wrong_kind(expected: RecordKind, record: &Record) -> ValidationError {
    ValidationError::WrongKind { expected, found: record.kind() }
}

/// Admits non-empty sequences of finite numbers
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericSequenceValidator;

impl Validator for NumericSequenceValidator {
    type Value = Record;

    fn validate(&self, record: &Record) -> ValidationResult<()> {
        let Record::Numeric(values) = record else {
            return Err(wrong_kind(RecordKind::Numeric, record));
        };
        if values.is_empty() {
            return Err(ValidationError::Empty { kind: RecordKind::Numeric });
        }
        values.iter().try_for_each(|&v| utils::check_finite(v))
    }

    fn name(&self) -> &'static str {
        "NumericSequenceValidator"
    }
}

/// Admits sensor triples whose readings are all finite and non-negative
#[derive(Debug, Clone, Copy, Default)]
pub struct SensorReadingValidator;

impl Validator for SensorReadingValidator {
    type Value = Record;

    fn validate(&self, record: &Record) -> ValidationResult<()> {
        let Record::Sensor(triple) = record else {
            return Err(wrong_kind(RecordKind::Sensor, record));
        };
        triple.values().iter().try_for_each(|&v| {
            utils::check_finite(v)?;
            utils::check_non_negative(v)
        })
    }

    fn name(&self) -> &'static str {
        "SensorReadingValidator"
    }
}

/// Admits transaction lists whose every amount is admissible
#[derive(Debug, Clone, Copy)]
pub struct TransactionValidator {
    amounts: BoundedIntegerValidator,
}

impl TransactionValidator {
    /// Validate amounts against custom bounds
    pub fn new(amounts: BoundedIntegerValidator) -> Self {
        Self { amounts }
    }
}

impl Default for TransactionValidator {
    fn default() -> Self {
        Self::new(BoundedIntegerValidator::transactions())
    }
}

impl Validator for TransactionValidator {
    type Value = Record;

    fn validate(&self, record: &Record) -> ValidationResult<()> {
        let Record::Transactions(amounts) = record else {
            return Err(wrong_kind(RecordKind::Transactions, record));
        };
        let (lo, hi) = self.amounts.bounds();
        amounts.iter().try_for_each(|&a| utils::check_amount(a, lo, hi, true))
    }

    fn name(&self) -> &'static str {
        "TransactionValidator"
    }
}

/// Admits event lists without blank event names
#[derive(Debug, Clone, Copy, Default)]
pub struct EventValidator;

impl Validator for EventValidator {
    type Value = Record;

    fn validate(&self, record: &Record) -> ValidationResult<()> {
        let Record::Events(events) = record else {
            return Err(wrong_kind(RecordKind::Events, record));
        };
        match events.iter().position(|e| e.trim().is_empty()) {
            Some(index) => Err(ValidationError::BlankEntry { index }),
            None => Ok(()),
        }
    }

    fn name(&self) -> &'static str {
        "EventValidator"
    }
}
