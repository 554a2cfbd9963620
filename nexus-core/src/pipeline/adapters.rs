//! Format adapters
//!
//! An adapter is the terminal behavior a pipeline holds. It knows how to
//! narrate a record of its domain once every stage has passed:
//!
//! | Format | Transform note                        | Narrative                     |
//! |--------|---------------------------------------|-------------------------------|
//! | json   | Enriched with metadata and validation | reading with normal-band check |
//! | csv    | Parsed and structured data            | number of actions logged      |
//! | stream | Aggregated and filtered               | reading count and average     |
//!
//! Adapters look through rendering layers (`Record::origin`) so an output
//! stage in front of them does not hide the domain data.

use core::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    constants::{NORMAL_TEMP_MAX_C, NORMAL_TEMP_MIN_C},
    record::Record,
    stream::count_noun,
    traits::Adapter,
};

/// Format tag of an adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    /// JSON-like objects
    Json,
    /// CSV-like rows
    Csv,
    /// Real-time readings
    Stream,
}

impl Format {
    /// Get the format tag
    pub const fn tag(&self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Csv => "csv",
            Format::Stream => "stream",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

// ============================================================================
// JsonAdapter
// ============================================================================

/// Adapter for JSON-like sensor objects
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonAdapter;

impl JsonAdapter {
    fn describe_object(fields: &Map<String, Value>) -> String {
        let Some(value) = fields.get("value").and_then(Value::as_f64) else {
            return format!("Processed JSON object with {}", count_noun(fields.len(), "field"));
        };
        let unit = fields
            .get("unit")
            .and_then(Value::as_str)
            .map(unit_symbol)
            .unwrap_or("");

        match fields.get("sensor").and_then(Value::as_str) {
            Some("temp" | "temperature") => temperature_reading(value, unit),
            Some(sensor) => format!("Processed {sensor} reading: {value}{unit}"),
            None => format!("Processed reading: {value}{unit}"),
        }
    }
}

fn unit_symbol(unit: &str) -> &str {
    match unit {
        "C" => "°C",
        "F" => "°F",
        "K" => "K",
        other => other,
    }
}

fn temperature_reading(value: f64, unit: &str) -> String {
    // Band is in °C; other scales get no verdict
    if !unit.is_empty() && unit != "°C" {
        return format!("Processed temperature reading: {value}{unit}");
    }
    let band = if (NORMAL_TEMP_MIN_C..=NORMAL_TEMP_MAX_C).contains(&value) {
        "Normal range"
    } else {
        "Out of range"
    };
    format!("Processed temperature reading: {value}°C ({band})")
}

impl Adapter for JsonAdapter {
    fn format(&self) -> Format {
        Format::Json
    }

    fn transform_note(&self) -> &'static str {
        "Enriched with metadata and validation"
    }

    fn describe(&self, record: &Record) -> String {
        match record.origin() {
            Record::Generic(Value::Object(fields)) => Self::describe_object(fields),
            Record::Sensor(triple) => temperature_reading(triple.temperature, "°C"),
            other => format!("Processed {} record: {}", other.kind(), other),
        }
    }
}

// ============================================================================
// CsvAdapter
// ============================================================================

/// Adapter for CSV-like activity rows
///
/// Every non-blank line of a text record is one logged action.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvAdapter;

impl CsvAdapter {
    fn actions(record: &Record) -> usize {
        if let Some(text) = record.as_text() {
            return text.lines().filter(|line| !line.trim().is_empty()).count();
        }
        match record {
            Record::Numeric(values) => values.len(),
            Record::Transactions(amounts) => amounts.len(),
            Record::Events(events) => events.len(),
            Record::Generic(Value::Array(rows)) => rows.len(),
            Record::Generic(Value::Null) => 0,
            _ => 1,
        }
    }
}

impl Adapter for CsvAdapter {
    fn format(&self) -> Format {
        Format::Csv
    }

    fn transform_note(&self) -> &'static str {
        "Parsed and structured data"
    }

    fn describe(&self, record: &Record) -> String {
        let actions = Self::actions(record.origin());
        format!("User activity logged: {} processed", count_noun(actions, "action"))
    }
}

// ============================================================================
// StreamAdapter
// ============================================================================

/// Adapter for real-time reading streams
#[derive(Debug, Clone, Copy, Default)]
pub struct StreamAdapter;

impl Adapter for StreamAdapter {
    fn format(&self) -> Format {
        Format::Stream
    }

    fn transform_note(&self) -> &'static str {
        "Aggregated and filtered"
    }

    fn describe(&self, record: &Record) -> String {
        let values = record.origin().numeric_values();
        if values.is_empty() {
            return "Stream summary: 0 readings".to_string();
        }
        let avg = values.iter().sum::<f64>() / values.len() as f64;
        format!("Stream summary: {}, avg: {avg:.1}°C", count_noun(values.len(), "reading"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Rendered, SensorTriple};
    use serde_json::json;

    #[test]
    fn json_temperature_reading() {
        let record = Record::Generic(json!({"sensor": "temp", "value": 23.5, "unit": "C"}));
        assert_eq!(
            JsonAdapter.describe(&record),
            "Processed temperature reading: 23.5°C (Normal range)"
        );
    }

    #[test]
    fn json_out_of_band() {
        let record = Record::Sensor(SensorTriple::new(41.0, 20.0, 1000.0));
        assert_eq!(
            JsonAdapter.describe(&record),
            "Processed temperature reading: 41°C (Out of range)"
        );
    }

    #[test]
    fn json_object_without_value() {
        let record = Record::Generic(json!({"user": "ana", "action": "login"}));
        assert_eq!(JsonAdapter.describe(&record), "Processed JSON object with 2 fields");
    }

    #[test]
    fn csv_counts_rows() {
        let record = Record::Generic(json!("user,action,timestamp"));
        assert_eq!(CsvAdapter.describe(&record), "User activity logged: 1 action processed");

        let rows = Record::Text("alice,login,1\nbob,logout,2\n\n".into());
        assert_eq!(CsvAdapter.describe(&rows), "User activity logged: 2 actions processed");
    }

    #[test]
    fn stream_average() {
        let record = Record::Numeric(vec![22.0, 22.5, 21.8, 22.1, 22.1]);
        assert_eq!(StreamAdapter.describe(&record), "Stream summary: 5 readings, avg: 22.1°C");
        assert_eq!(
            StreamAdapter.describe(&Record::Text("Real-time sensor stream".into())),
            "Stream summary: 0 readings"
        );
    }

    #[test]
    fn adapters_read_through_rendering() {
        let origin = Record::Numeric(vec![20.0, 24.0]);
        let rendered = Record::Rendered(Rendered { text: "Output [20, 24]".into(), origin: Box::new(origin) });
        assert_eq!(StreamAdapter.describe(&rendered), "Stream summary: 2 readings, avg: 22.0°C");
    }
}
