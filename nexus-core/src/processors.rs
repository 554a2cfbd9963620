//! Single-record data processors
//!
//! The simplest processing surface: validate one value, turn it into a result
//! line, prefix it for output. Pipelines compose stages; processors stand
//! alone.
//!
//! ```rust
//! use nexus_core::processors::{DataProcessor, LogProcessor};
//! use nexus_core::Record;
//!
//! let log = LogProcessor;
//! let result = log.process(&Record::LogLine("ERROR: Connection timeout".into()))?;
//! assert_eq!(log.format_output(&result), "Output: [ALERT] ERROR level detected: Connection timeout");
//! # Ok::<(), nexus_core::ValidationError>(())
//! ```

use crate::{
    constants::pipeline::PROCESSOR_OUTPUT_PREFIX,
    errors::{ValidationError, ValidationResult},
    record::{Batch, Item, Record, RecordKind},
    traits::Validator,
    validators::{LogLineValidator, NumericValidator, TextValidator},
};

/// Validate-then-process contract shared by the processors
pub trait DataProcessor {
    /// What the processor accepts
    type Input: ?Sized;

    /// Check the input without processing it
    fn validate(&self, data: &Self::Input) -> ValidationResult<()>;

    /// Validate and process, producing the result line
    fn process(&self, data: &Self::Input) -> ValidationResult<String>;

    /// Prefix a result for output
    fn format_output(&self, result: &str) -> String {
        format!("{PROCESSOR_OUTPUT_PREFIX}{result}")
    }
}

/// Counts, sums and averages a batch of numbers
///
/// Numeric strings are accepted and parsed.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericProcessor;

impl DataProcessor for NumericProcessor {
    type Input = Batch;

    fn validate(&self, data: &Batch) -> ValidationResult<()> {
        if data.is_empty() {
            return Err(ValidationError::Empty { kind: RecordKind::Numeric });
        }
        data.iter().try_for_each(|item| NumericValidator.validate(item))
    }

    fn process(&self, data: &Batch) -> ValidationResult<String> {
        self.validate(data)?;
        let values: Vec<f64> = data.iter().filter_map(Item::as_f64).collect();
        let sum: f64 = values.iter().sum();
        let avg = sum / values.len() as f64;
        Ok(format!("Processed {} numeric values, sum={sum}, avg={avg:.1}", values.len()))
    }
}

/// Counts characters and words of a text record
#[derive(Debug, Clone, Copy, Default)]
pub struct TextProcessor;

impl DataProcessor for TextProcessor {
    type Input = Record;

    fn validate(&self, data: &Record) -> ValidationResult<()> {
        TextValidator.validate(data)
    }

    fn process(&self, data: &Record) -> ValidationResult<String> {
        self.validate(data)?;
        let text = data.as_text().unwrap_or_default();
        Ok(format!(
            "Processed text: {} characters, {} words",
            text.chars().count(),
            text.split_whitespace().count()
        ))
    }
}

/// Classifies a `LEVEL: message` log entry
///
/// `ERROR` entries raise an alert; every other level is informational.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProcessor;

impl DataProcessor for LogProcessor {
    type Input = Record;

    fn validate(&self, data: &Record) -> ValidationResult<()> {
        LogLineValidator.validate(data)
    }

    fn process(&self, data: &Record) -> ValidationResult<String> {
        self.validate(data)?;
        let line = data.as_text().unwrap_or_default();
        let (level, message) = line.split_once(':').ok_or(ValidationError::MissingSeparator)?;
        let level = level.trim().to_uppercase();
        let message = message.trim();

        if level == "ERROR" {
            Ok(format!("[ALERT] ERROR level detected: {message}"))
        } else {
            Ok(format!("[INFO] {level} level detected: {message}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch;

    #[test]
    fn numeric_summary() {
        let result = NumericProcessor.process(&batch![1, 2, 3, 4, 5]).unwrap();
        assert_eq!(result, "Processed 5 numeric values, sum=15, avg=3.0");
        assert_eq!(
            NumericProcessor.format_output(&result),
            "Output: Processed 5 numeric values, sum=15, avg=3.0"
        );
    }

    #[test]
    fn numeric_rejects_words() {
        assert_eq!(
            NumericProcessor.process(&batch![1, "two", 3]),
            Err(ValidationError::NotNumeric { item: "two".into() })
        );
        assert!(NumericProcessor.process(&Batch::new()).is_err());
        assert!(NumericProcessor.process(&batch!["4", 2.5]).is_ok());
    }

    #[test]
    fn text_counts() {
        let result = TextProcessor.process(&Record::Text("Hello Nexus World".into())).unwrap();
        assert_eq!(result, "Processed text: 17 characters, 3 words");
        assert!(TextProcessor.process(&Record::Numeric(vec![1.0])).is_err());
    }

    #[test]
    fn log_levels() {
        assert_eq!(
            LogProcessor.process(&Record::LogLine("ERROR: Connection timeout".into())).unwrap(),
            "[ALERT] ERROR level detected: Connection timeout"
        );
        assert_eq!(
            LogProcessor.process(&Record::LogLine("info: System ready".into())).unwrap(),
            "[INFO] INFO level detected: System ready"
        );
        assert_eq!(
            LogProcessor.process(&Record::LogLine("no separator".into())),
            Err(ValidationError::MissingSeparator)
        );
    }
}
