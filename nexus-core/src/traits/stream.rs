//! Stream Processing Traits
//!
//! Stream processors work on whole batches instead of single records:
//!
//! ```text
//! Batch → filter (soft drop) → aggregate → StreamSummary
//!                ↘ hard failure → StreamError
//! ```

use crate::errors::StreamResult;
use crate::filter::Filtered;
use crate::record::Batch;
use crate::stream::{StreamKind, StreamStats, StreamSummary};

/// Domain-specific batch analyzer
pub trait DataStream: Send {
    /// Identifier given at construction
    fn stream_id(&self) -> &str;

    /// Domain of this stream
    fn kind(&self) -> StreamKind;

    /// Admitted subsequence of a batch under this stream's own predicate
    ///
    /// Never fails and never mutates the input.
    fn filter(&self, batch: &Batch) -> Filtered;

    /// Filter then aggregate one batch
    fn process_batch(&mut self, batch: &Batch) -> StreamResult<StreamSummary>;

    /// Counters accumulated over every `process_batch` call
    fn stats(&self) -> &StreamStats;
}
