//! Stream Processors for Sensor, Transaction and Event Batches
//!
//! ## Overview
//!
//! Stream processors are the batch counterpart of pipelines. Each one filters
//! a batch with its own predicate and aggregates what is left into a
//! [`StreamSummary`]:
//!
//! | Stream      | Filter                             | Aggregate            |
//! |-------------|------------------------------------|----------------------|
//! | Sensor      | exactly 3 non-negative numbers (hard) | avg temp          |
//! | Transaction | integers in (-10000, 10000) \ {0} (soft) | net flow        |
//! | Event       | strings (soft)                     | events, errors       |
//!
//! ## Polymorphic Processing
//!
//! [`polymorphic_process`] drives several streams through the `DataStream`
//! interface at once and reports how much each one kept and dropped.
//!
//! ```rust
//! use nexus_core::{batch, DataStream};
//! use nexus_core::stream::EventStream;
//!
//! let mut events = EventStream::new("EVENT_001");
//! let summary = events.process_batch(&batch!["login", "error", "logout"])?;
//! assert_eq!(summary.to_string(), "Event analysis: 3 events, 1 error detected");
//! # Ok::<(), nexus_core::StreamError>(())
//! ```

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::record::Batch;
use crate::traits::DataStream;

pub mod event;
pub mod sensor;
pub mod transaction;

pub use event::EventStream;
pub use sensor::SensorStream;
pub use transaction::TransactionStream;

/// Domain of a stream processor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamKind {
    /// Environmental sensor readings
    Sensor,
    /// Financial transactions
    Transaction,
    /// System events
    Event,
}

impl StreamKind {
    /// Get human-readable name
    pub const fn name(&self) -> &'static str {
        match self {
            StreamKind::Sensor => "Sensor",
            StreamKind::Transaction => "Transaction",
            StreamKind::Event => "Event",
        }
    }

    /// What one processed item is called
    pub const fn unit_noun(&self) -> &'static str {
        match self {
            StreamKind::Sensor => "reading",
            StreamKind::Transaction => "operation",
            StreamKind::Event => "event",
        }
    }

    /// Data type label
    pub const fn data_type(&self) -> &'static str {
        match self {
            StreamKind::Sensor => "Environmental Data",
            StreamKind::Transaction => "Financial Data",
            StreamKind::Event => "System Events",
        }
    }
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// `"1 event"`, `"0 events"`, `"3 events"`
pub fn count_noun(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// One classified transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Positive amount
    Buy(i64),
    /// Negative amount
    Sell(i64),
}

impl Operation {
    /// Classify a nonzero amount
    pub fn classify(amount: i64) -> Self {
        if amount > 0 {
            Operation::Buy(amount)
        } else {
            Operation::Sell(amount)
        }
    }

    /// Signed amount
    pub fn amount(&self) -> i64 {
        match self {
            Operation::Buy(a) | Operation::Sell(a) => *a,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Buy(a) => write!(f, "buy:{a}"),
            Operation::Sell(a) => write!(f, "sell:{a}"),
        }
    }
}

/// `[buy:100, sell:-150, buy:75]`
pub fn describe_operations(operations: &[Operation]) -> String {
    let parts: Vec<String> = operations.iter().map(Operation::to_string).collect();
    format!("[{}]", parts.join(", "))
}

/// Aggregate metric of one batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Reported temperature of a sensor batch
    AverageTemperature(f64),
    /// Signed sum of retained transactions
    NetFlow {
        /// Sum of all retained amounts
        net: i64,
        /// Retained transactions in batch order
        operations: Vec<Operation>,
    },
    /// Number of `"error"` events
    ErrorTally {
        /// Error count
        errors: usize,
    },
}

/// Structured result of one `process_batch` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamSummary {
    /// Id of the stream that produced it
    pub stream_id: String,
    /// Domain of the stream
    pub kind: StreamKind,
    /// Items that went into the aggregate
    pub processed: usize,
    /// Items the filter dropped
    pub rejected: usize,
    /// The aggregate
    pub metric: Metric,
}

impl fmt::Display for StreamSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.metric {
            Metric::AverageTemperature(avg) => write!(
                f,
                "Sensor analysis: {} processed, avg temp: {avg}",
                count_noun(self.processed, "reading")
            ),
            Metric::NetFlow { net, .. } => {
                let sign = if *net >= 0 { "+" } else { "" };
                write!(
                    f,
                    "Transaction analysis: {}, net flow: {sign}{net} units",
                    count_noun(self.processed, "operation")
                )
            }
            Metric::ErrorTally { errors } => write!(
                f,
                "Event analysis: {}, {} detected",
                count_noun(self.processed, "event"),
                count_noun(*errors, "error")
            ),
        }
    }
}

/// Counters accumulated by a stream over its lifetime
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamStats {
    /// `process_batch` calls
    pub batches: usize,
    /// Items that went into an aggregate
    pub items_processed: usize,
    /// Items dropped by the filter
    pub items_rejected: usize,
    /// Batches that ended in an error summary
    pub failures: usize,
}

impl StreamStats {
    pub(crate) fn record_success(&mut self, summary: &StreamSummary) {
        self.batches += 1;
        self.items_processed += summary.processed;
        self.items_rejected += summary.rejected;
    }

    pub(crate) fn record_failure(&mut self) {
        self.batches += 1;
        self.failures += 1;
    }
}

// ============================================================================
// Polymorphic processing
// ============================================================================

/// Per-stream line of a [`MixedReport`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MixedEntry {
    /// Stream id
    pub stream_id: String,
    /// Stream domain
    pub kind: StreamKind,
    /// Items the stream's filter admitted
    pub processed: usize,
    /// Items the stream's filter dropped
    pub rejected: usize,
}

impl fmt::Display for MixedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "- {} data: {} processed",
            self.kind,
            count_noun(self.processed, self.kind.unit_noun())
        )
    }
}

/// What several streams kept and dropped from their batches
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MixedReport {
    /// One entry per stream, in the order given
    pub entries: Vec<MixedEntry>,
}

impl MixedReport {
    /// Items dropped across all streams of one kind
    pub fn filtered(&self, kind: StreamKind) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.kind == kind)
            .map(|entry| entry.rejected)
            .sum()
    }
}

impl fmt::Display for MixedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{entry}")?;
        }
        write!(
            f,
            "Filtered results {} transactions, {} events",
            self.filtered(StreamKind::Transaction),
            self.filtered(StreamKind::Event)
        )
    }
}

/// Filter each batch with the stream it is paired with
///
/// Streams and batches pair up positionally; pairing stops at the shorter of
/// the two. Streams are only asked to filter, so their stats are untouched.
pub fn polymorphic_process(streams: &[&dyn DataStream], batches: &[Batch]) -> MixedReport {
    let entries = streams
        .iter()
        .zip(batches)
        .map(|(stream, batch)| {
            let filtered = stream.filter(batch);
            MixedEntry {
                stream_id: stream.stream_id().to_owned(),
                kind: stream.kind(),
                processed: filtered.admitted.len(),
                rejected: filtered.rejected,
            }
        })
        .collect();

    MixedReport { entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch;

    #[test]
    fn pluralization() {
        assert_eq!(count_noun(0, "event"), "0 events");
        assert_eq!(count_noun(1, "event"), "1 event");
        assert_eq!(count_noun(2, "error"), "2 errors");
    }

    #[test]
    fn operations_render_in_order() {
        let ops: Vec<Operation> = [100, -150, 75].into_iter().map(Operation::classify).collect();
        assert_eq!(describe_operations(&ops), "[buy:100, sell:-150, buy:75]");
        assert_eq!(describe_operations(&[]), "[]");
    }

    #[test]
    fn net_flow_sign() {
        let summary = |net| StreamSummary {
            stream_id: "TRANS_001".into(),
            kind: StreamKind::Transaction,
            processed: 2,
            rejected: 0,
            metric: Metric::NetFlow { net, operations: vec![] },
        };
        assert_eq!(summary(0).to_string(), "Transaction analysis: 2 operations, net flow: +0 units");
        assert_eq!(summary(-5).to_string(), "Transaction analysis: 2 operations, net flow: -5 units");
    }

    #[test]
    fn mixed_streams() {
        let sensor = SensorStream::new("SENSOR_001");
        let transactions = TransactionStream::new("TRANS_001");
        let events = EventStream::new("EVENT_001");

        let batches = [
            batch![22.5, 65, 1013],
            batch![100, -150, 75, 4, 35, "2", "e", 143540, -2000, "t", -20, 2],
            batch!["login", "error", "logout"],
        ];
        let streams: [&dyn DataStream; 3] = [&sensor, &transactions, &events];
        let report = polymorphic_process(&streams, &batches);

        assert_eq!(report.entries.len(), 3);
        assert_eq!(report.entries[0].to_string(), "- Sensor data: 3 readings processed");
        assert_eq!(report.entries[1].processed, 8);
        assert_eq!(report.filtered(StreamKind::Transaction), 4);
        assert_eq!(report.filtered(StreamKind::Event), 0);
        assert!(report.to_string().ends_with("Filtered results 4 transactions, 0 events"));
        assert_eq!(transactions.stats().batches, 0);
    }
}
