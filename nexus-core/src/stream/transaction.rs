//! Financial transaction stream
//!
//! Transactions are filtered softly: anything that is not an integer in
//! `(-10000, 10000)` or that is zero is dropped and counted. What remains is
//! classified as buys and sells and summed into a signed net flow.

use crate::{
    errors::{StreamError, StreamResult},
    filter::{self, Filtered},
    record::{Batch, Item},
    traits::DataStream,
    validators::BoundedIntegerValidator,
};

use super::{describe_operations, Metric, Operation, StreamKind, StreamStats, StreamSummary};

/// Processes transaction batches
#[derive(Debug, Clone)]
pub struct TransactionStream {
    id: String,
    validator: BoundedIntegerValidator,
    stats: StreamStats,
}

impl TransactionStream {
    /// Create a transaction stream with the standard bounds
    pub fn new(id: impl Into<String>) -> Self {
        Self::with_validator(id, BoundedIntegerValidator::transactions())
    }

    /// Create a transaction stream with custom bounds
    pub fn with_validator(id: impl Into<String>, validator: BoundedIntegerValidator) -> Self {
        let id = id.into();
        log_debug!("transaction stream '{}' ({}) created", id, StreamKind::Transaction.data_type());
        Self { id, validator, stats: StreamStats::default() }
    }

    /// Retained transactions of a batch, classified, in batch order
    pub fn operations(&self, batch: &Batch) -> Vec<Operation> {
        self.filter(batch)
            .admitted
            .iter()
            .filter_map(Item::as_int)
            .map(Operation::classify)
            .collect()
    }

    /// `[buy:100, sell:-150, ...]` for the retained transactions of a batch
    pub fn describe(&self, batch: &Batch) -> String {
        describe_operations(&self.operations(batch))
    }
}

impl DataStream for TransactionStream {
    fn stream_id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> StreamKind {
        StreamKind::Transaction
    }

    fn filter(&self, batch: &Batch) -> Filtered {
        filter::filter(batch, &self.validator)
    }

    fn process_batch(&mut self, batch: &Batch) -> StreamResult<StreamSummary> {
        let result = self.analyze(batch);
        match &result {
            Ok(summary) => self.stats.record_success(summary),
            Err(_e) => {
                log_warn!("transaction stream '{}': batch refused: {}", self.id, _e);
                self.stats.record_failure();
            }
        }
        result
    }

    fn stats(&self) -> &StreamStats {
        &self.stats
    }
}

impl TransactionStream {
    fn analyze(&self, batch: &Batch) -> StreamResult<StreamSummary> {
        let filtered = self.filter(batch);
        let operations: Vec<Operation> = filtered
            .admitted
            .iter()
            .filter_map(Item::as_int)
            .map(Operation::classify)
            .collect();
        let net = operations
            .iter()
            .try_fold(0i64, |net, op| net.checked_add(op.amount()))
            .ok_or(StreamError::NetFlowOverflow { operations: operations.len() })?;

        log_debug!(
            "transaction stream '{}': {}",
            self.id,
            describe_operations(&operations)
        );

        Ok(StreamSummary {
            stream_id: self.id.clone(),
            kind: StreamKind::Transaction,
            processed: operations.len(),
            rejected: filtered.rejected,
            metric: Metric::NetFlow { net, operations },
        })
    }
}
