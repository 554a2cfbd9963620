//! Text, string and log-line validators

use crate::{
    errors::{ValidationError, ValidationResult},
    record::{Item, Record, RecordKind},
    traits::Validator,
};

/// Admits items that arrived as strings
#[derive(Debug, Clone, Copy, Default)]
pub struct StringValidator;

impl Validator for StringValidator {
    type Value = Item;

    fn validate(&self, item: &Item) -> ValidationResult<()> {
        match item {
            Item::Str(_) => Ok(()),
            other => Err(ValidationError::NotString { item: other.to_string() }),
        }
    }

    fn name(&self) -> &'static str {
        "StringValidator"
    }
}

/// Admits text records (including a JSON string)
#[derive(Debug, Clone, Copy, Default)]
pub struct TextValidator;

impl Validator for TextValidator {
    type Value = Record;

    fn validate(&self, record: &Record) -> ValidationResult<()> {
        match record.as_text() {
            Some(_) => Ok(()),
            None => Err(ValidationError::WrongKind {
                expected: RecordKind::Text,
                found: record.kind(),
            }),
        }
    }

    fn name(&self) -> &'static str {
        "TextValidator"
    }
}

/// Admits `LEVEL: message` log entries
///
/// The level is everything before the first `:` and must not be blank.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogLineValidator;

impl Validator for LogLineValidator {
    type Value = Record;

    fn validate(&self, record: &Record) -> ValidationResult<()> {
        let line = record.as_text().ok_or(ValidationError::WrongKind {
            expected: RecordKind::LogLine,
            found: record.kind(),
        })?;

        match line.split_once(':') {
            Some((level, _)) if !level.trim().is_empty() => Ok(()),
            _ => Err(ValidationError::MissingSeparator),
        }
    }

    fn name(&self) -> &'static str {
        "LogLineValidator"
    }
}
