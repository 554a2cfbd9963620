//! System event stream

use crate::{
    constants::ERROR_EVENT,
    errors::StreamResult,
    filter::{self, Filtered},
    record::{Batch, Item},
    traits::DataStream,
    validators::StringValidator,
};

use super::{Metric, StreamKind, StreamStats, StreamSummary};

/// Counts events and `"error"` events in a batch
#[derive(Debug, Clone)]
pub struct EventStream {
    id: String,
    stats: StreamStats,
}

impl EventStream {
    /// Create an event stream
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        log_debug!("event stream '{}' ({}) created", id, StreamKind::Event.data_type());
        Self { id, stats: StreamStats::default() }
    }
}

impl DataStream for EventStream {
    fn stream_id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> StreamKind {
        StreamKind::Event
    }

    fn filter(&self, batch: &Batch) -> Filtered {
        filter::filter(batch, &StringValidator)
    }

    fn process_batch(&mut self, batch: &Batch) -> StreamResult<StreamSummary> {
        let filtered = self.filter(batch);
        let errors = filtered
            .admitted
            .iter()
            .filter_map(Item::as_str)
            .filter(|event| *event == ERROR_EVENT)
            .count();

        let summary = StreamSummary {
            stream_id: self.id.clone(),
            kind: StreamKind::Event,
            processed: filtered.admitted.len(),
            rejected: filtered.rejected,
            metric: Metric::ErrorTally { errors },
        };
        self.stats.record_success(&summary);
        Ok(summary)
    }

    fn stats(&self) -> &StreamStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch;

    #[test]
    fn counts_events_and_errors() {
        let mut stream = EventStream::new("EVENT_001");
        let summary = stream.process_batch(&batch!["login", "error", "logout"]).unwrap();
        assert_eq!(summary.processed, 3);
        assert_eq!(summary.metric, Metric::ErrorTally { errors: 1 });
        assert_eq!(summary.to_string(), "Event analysis: 3 events, 1 error detected");
    }

    #[test]
    fn pluralizes_zero_and_one() {
        let mut stream = EventStream::new("EVENT_001");
        assert_eq!(
            stream.process_batch(&batch!["login"]).unwrap().to_string(),
            "Event analysis: 1 event, 0 errors detected"
        );
        assert_eq!(
            stream.process_batch(&Batch::new()).unwrap().to_string(),
            "Event analysis: 0 events, 0 errors detected"
        );
    }

    #[test]
    fn drops_non_strings() {
        let mut stream = EventStream::new("EVENT_001");
        let summary = stream.process_batch(&batch!["error", 404, "error", 1.5]).unwrap();
        assert_eq!(summary.processed, 2);
        assert_eq!(summary.rejected, 2);
        assert_eq!(summary.to_string(), "Event analysis: 2 events, 2 errors detected");
        assert_eq!(stream.stats().items_rejected, 2);
    }
}
