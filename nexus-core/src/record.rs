//! Records and Batches
//!
//! ## Records
//!
//! A [`Record`] is one unit of domain data flowing through a pipeline. It is a
//! tagged union over the domains the engine understands, so a stage or adapter
//! can never misinterpret what it was handed:
//!
//! ```text
//! Record
//! ├── Numeric       [1.0, 2.0, 3.0]
//! ├── Text          "Hello Nexus World"
//! ├── LogLine       "ERROR: Connection timeout"
//! ├── Sensor        temperature / humidity / pressure
//! ├── Transactions  [100, -150, 75]
//! ├── Events        ["login", "error", "logout"]
//! ├── Generic       any JSON value (objects, CSV rows as strings, ...)
//! └── Rendered      external string form + the record it came from
//! ```
//!
//! Records are values. Stages take a record by value and hand back a new one;
//! nothing is shared or mutated across a component boundary.
//!
//! ## Batches
//!
//! A [`Batch`] is the raw, loosely typed input of the filter engine and the
//! stream processors. Items keep the type they arrived with (integer, float or
//! string) so predicates can tell `2` from `"2"`.

use core::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Discriminant of a [`Record`], used in diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// Sequence of numbers
    Numeric,
    /// Free text
    Text,
    /// `LEVEL: message` log entry
    LogLine,
    /// Temperature, humidity, pressure
    Sensor,
    /// Signed transaction amounts
    Transactions,
    /// Event names
    Events,
    /// Arbitrary JSON-like value
    Generic,
    /// Output of the output stage
    Rendered,
}

impl RecordKind {
    /// Get human-readable name
    pub const fn name(&self) -> &'static str {
        match self {
            RecordKind::Numeric => "numeric",
            RecordKind::Text => "text",
            RecordKind::LogLine => "log",
            RecordKind::Sensor => "sensor",
            RecordKind::Transactions => "transaction",
            RecordKind::Events => "event",
            RecordKind::Generic => "generic",
            RecordKind::Rendered => "rendered",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One environmental reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorTriple {
    /// Temperature in °C
    pub temperature: f64,
    /// Relative humidity in %
    pub humidity: f64,
    /// Pressure in hPa
    pub pressure: f64,
}

impl SensorTriple {
    /// Create a reading
    pub const fn new(temperature: f64, humidity: f64, pressure: f64) -> Self {
        Self { temperature, humidity, pressure }
    }

    /// Readings in batch order
    pub const fn values(&self) -> [f64; 3] {
        [self.temperature, self.humidity, self.pressure]
    }
}

/// A record rendered to its external string form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rendered {
    /// External string form
    pub text: String,
    /// Record the text was rendered from
    pub origin: Box<Record>,
}

/// One unit of domain data flowing through a pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Record {
    /// Sequence of numbers
    Numeric(Vec<f64>),
    /// Free text
    Text(String),
    /// `LEVEL: message` log entry
    LogLine(String),
    /// Temperature, humidity, pressure
    Sensor(SensorTriple),
    /// Signed transaction amounts
    Transactions(Vec<i64>),
    /// Event names
    Events(Vec<String>),
    /// Arbitrary JSON-like value
    Generic(Value),
    /// Output of the output stage
    Rendered(Rendered),
}

impl Record {
    /// Kind of this record
    pub fn kind(&self) -> RecordKind {
        match self {
            Record::Numeric(_) => RecordKind::Numeric,
            Record::Text(_) => RecordKind::Text,
            Record::LogLine(_) => RecordKind::LogLine,
            Record::Sensor(_) => RecordKind::Sensor,
            Record::Transactions(_) => RecordKind::Transactions,
            Record::Events(_) => RecordKind::Events,
            Record::Generic(_) => RecordKind::Generic,
            Record::Rendered(_) => RecordKind::Rendered,
        }
    }

    /// Whether the record carries no data at all
    pub fn is_empty(&self) -> bool {
        match self {
            Record::Numeric(values) => values.is_empty(),
            Record::Text(text) | Record::LogLine(text) => text.is_empty(),
            Record::Sensor(_) => false,
            Record::Transactions(amounts) => amounts.is_empty(),
            Record::Events(events) => events.is_empty(),
            Record::Generic(value) => match value {
                Value::Null => true,
                Value::String(s) => s.is_empty(),
                Value::Array(items) => items.is_empty(),
                Value::Object(fields) => fields.is_empty(),
                Value::Bool(_) | Value::Number(_) => false,
            },
            Record::Rendered(rendered) => rendered.text.is_empty(),
        }
    }

    /// The domain record underneath any rendering layers
    pub fn origin(&self) -> &Record {
        match self {
            Record::Rendered(rendered) => rendered.origin.origin(),
            other => other,
        }
    }

    /// Text content for the text-like kinds
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Record::Text(text) | Record::LogLine(text) => Some(text),
            Record::Generic(Value::String(text)) => Some(text),
            _ => None,
        }
    }

    /// Every number the record carries, in order
    pub fn numeric_values(&self) -> Vec<f64> {
        match self {
            Record::Numeric(values) => values.clone(),
            Record::Sensor(triple) => triple.values().to_vec(),
            Record::Transactions(amounts) => amounts.iter().map(|&a| a as f64).collect(),
            Record::Events(_) => Vec::new(),
            Record::Text(text) | Record::LogLine(text) => numeric_tokens(text),
            Record::Generic(value) => json_numbers(value),
            Record::Rendered(rendered) => rendered.origin.numeric_values(),
        }
    }
}

fn numeric_tokens(text: &str) -> Vec<f64> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter_map(|token| token.parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .collect()
}

fn json_numbers(value: &Value) -> Vec<f64> {
    match value {
        Value::Number(n) => n.as_f64().into_iter().collect(),
        Value::String(s) => numeric_tokens(s),
        Value::Array(items) => items.iter().filter_map(Value::as_f64).collect(),
        Value::Object(fields) => fields.values().filter_map(Value::as_f64).collect(),
        Value::Null | Value::Bool(_) => Vec::new(),
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    f.write_str("[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    f.write_str("]")
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Record::Numeric(values) => write_list(f, values),
            Record::Text(text) | Record::LogLine(text) => f.write_str(text),
            Record::Sensor(t) => write!(
                f,
                "[temp:{}, humidity:{}, pressure:{}]",
                t.temperature, t.humidity, t.pressure
            ),
            Record::Transactions(amounts) => write_list(f, amounts),
            Record::Events(events) => write_list(f, events),
            Record::Generic(Value::String(text)) => f.write_str(text),
            Record::Generic(value) => write!(f, "{value}"),
            Record::Rendered(rendered) => f.write_str(&rendered.text),
        }
    }
}

impl From<SensorTriple> for Record {
    fn from(triple: SensorTriple) -> Self {
        Record::Sensor(triple)
    }
}

impl From<Value> for Record {
    fn from(value: Value) -> Self {
        Record::Generic(value)
    }
}

/// One raw batch element, typed as it arrived
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Item {
    /// Integer
    Int(i64),
    /// Floating point number
    Float(f64),
    /// String
    Str(String),
}

impl Item {
    /// Numeric value, parsing strings
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Item::Int(i) => Some(*i as f64),
            Item::Float(f) => Some(*f),
            Item::Str(s) => s.trim().parse::<f64>().ok(),
        }
    }

    /// Integer value; only items that arrived as integers qualify
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Item::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// String value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Item::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Int(i) => write!(f, "{i}"),
            Item::Float(x) => write!(f, "{x}"),
            Item::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Item {
    fn from(value: i64) -> Self {
        Item::Int(value)
    }
}

impl From<i32> for Item {
    fn from(value: i32) -> Self {
        Item::Int(i64::from(value))
    }
}

impl From<f64> for Item {
    fn from(value: f64) -> Self {
        Item::Float(value)
    }
}

impl From<&str> for Item {
    fn from(value: &str) -> Self {
        Item::Str(value.to_owned())
    }
}

impl From<String> for Item {
    fn from(value: String) -> Self {
        Item::Str(value)
    }
}

/// Ordered, immutable sequence of raw items
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Batch {
    items: Vec<Item>,
}

impl Batch {
    /// Create an empty batch
    pub fn new() -> Self {
        Self::default()
    }

    /// Items in order
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over items
    pub fn iter(&self) -> core::slice::Iter<'_, Item> {
        self.items.iter()
    }

    /// Give up the items
    pub fn into_items(self) -> Vec<Item> {
        self.items
    }
}

impl From<Vec<Item>> for Batch {
    fn from(items: Vec<Item>) -> Self {
        Self { items }
    }
}

impl FromIterator<Item> for Batch {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        Self { items: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a Batch {
    type Item = &'a Item;
    type IntoIter = core::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl fmt::Display for Batch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_list(f, &self.items)
    }
}
