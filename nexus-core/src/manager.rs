//! Multi-Pipeline Orchestration
//!
//! ## Overview
//!
//! The manager owns a set of pipelines and fans records out to them:
//!
//! ```text
//!                 ┌──→ Pipeline 1 ──→ Completed
//! Payload ──route─┼──→ Pipeline 2 ──✗──→ Backup ──→ Recovered / Failed
//!                 └──→ Pipeline 3 ──→ Completed
//! ```
//!
//! - A single record is broadcast to every pipeline.
//! - A record set of length 1 is broadcast the same way.
//! - A longer record set pairs element *i* with pipeline *i* until either list
//!   runs out.
//! - `None` or an empty set is a single top-level `EmptyInput` failure.
//!
//! A failing pipeline never stops its siblings. Its error is reported in its
//! own [`PipelineOutcome`] and, when a backup pipeline is configured, the
//! record is retried there.
//!
//! ## Fan-Out Modes
//!
//! `Sequential` runs pipelines one after another in registration order.
//! `Concurrent` gives every pipeline its own scoped thread. Either way the
//! outcomes come back in registration order.
//!
//! ```rust
//! use nexus_core::{Manager, Payload, Pipeline, Record};
//! use nexus_core::pipeline::{CsvAdapter, InputStage, StreamAdapter};
//!
//! let mut manager = Manager::new();
//! manager.add_pipeline(Pipeline::builder("csv", CsvAdapter).stage(InputStage).build()?);
//! manager.add_pipeline(Pipeline::builder("stream", StreamAdapter).stage(InputStage).build()?);
//!
//! let report = manager.process_data(Payload::from(Record::Numeric(vec![21.0, 23.0])))?;
//! assert_eq!(report.tally.succeeded, 2);
//! # Ok::<(), nexus_core::PipelineError>(())
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    constants::NOMINAL_THROUGHPUT_PER_SEC,
    errors::{PipelineError, PipelineResult},
    pipeline::{Pipeline, Summary},
    record::Record,
};

// ============================================================================
// Configuration
// ============================================================================

/// How pipelines are driven during a fan-out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FanOutMode {
    /// One pipeline at a time, in registration order
    #[default]
    Sequential,
    /// One scoped thread per pipeline
    Concurrent,
}

/// Manager configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerConfig {
    /// Fan-out mode
    pub mode: FanOutMode,
    /// Per-pipeline deadline in milliseconds (None = no deadline)
    pub deadline_ms: Option<u64>,
    /// Advisory throughput figure, records per second
    pub nominal_throughput: u32,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            mode: FanOutMode::Sequential,
            deadline_ms: None,
            nominal_throughput: NOMINAL_THROUGHPUT_PER_SEC,
        }
    }
}

impl ManagerConfig {
    /// Sequential fan-out, no deadline
    pub fn sequential() -> Self {
        Self::default()
    }

    /// Concurrent fan-out, no deadline
    pub fn concurrent() -> Self {
        Self { mode: FanOutMode::Concurrent, ..Self::default() }
    }

    /// Set the per-pipeline deadline
    ///
    /// Rounded up to whole milliseconds, so a nonzero deadline never becomes 0ms.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        let millis = deadline.as_micros().div_ceil(1000);
        self.deadline_ms = Some(u64::try_from(millis).unwrap_or(u64::MAX));
        self
    }

    /// Deadline as a `Duration`
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_ms.map(Duration::from_millis)
    }

    /// Read a configuration from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

// ============================================================================
// Input and results
// ============================================================================

/// What `process_data` accepts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    /// One record, broadcast to every pipeline
    Record(Record),
    /// Indexed record set
    Set(Vec<Record>),
}

impl From<Record> for Payload {
    fn from(record: Record) -> Self {
        Payload::Record(record)
    }
}

impl From<Vec<Record>> for Payload {
    fn from(records: Vec<Record>) -> Self {
        Payload::Set(records)
    }
}

/// How one pipeline's run ended
#[derive(Debug, Clone, PartialEq)]
pub enum OutcomeStatus {
    /// Every stage passed
    Completed(Summary),
    /// The pipeline failed and the backup pipeline handled the record
    Recovered {
        /// What the original pipeline reported
        error: PipelineError,
        /// Summary from the backup pipeline
        summary: Summary,
    },
    /// The pipeline failed and was skipped
    Failed(PipelineError),
}

/// Outcome of one pipeline in a fan-out
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutcome {
    /// Id of the pipeline
    pub pipeline_id: String,
    /// 0-based registration position
    pub position: usize,
    /// How it ended
    pub status: OutcomeStatus,
}

impl PipelineOutcome {
    /// Summary, from the pipeline itself or its backup
    pub fn summary(&self) -> Option<&Summary> {
        match &self.status {
            OutcomeStatus::Completed(summary) | OutcomeStatus::Recovered { summary, .. } => {
                Some(summary)
            }
            OutcomeStatus::Failed(_) => None,
        }
    }

    /// Error the pipeline reported, recovered or not
    pub fn error(&self) -> Option<&PipelineError> {
        match &self.status {
            OutcomeStatus::Completed(_) => None,
            OutcomeStatus::Recovered { error, .. } | OutcomeStatus::Failed(error) => Some(error),
        }
    }

    /// Whether a summary was produced
    pub fn is_success(&self) -> bool {
        self.summary().is_some()
    }
}

/// Per-run counts of pipeline outcomes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunTally {
    /// Pipelines that completed
    pub succeeded: usize,
    /// Pipelines that failed but were recovered by the backup
    pub recovered: usize,
    /// Pipelines that failed and were skipped
    pub failed: usize,
}

impl RunTally {
    fn count(&mut self, status: &OutcomeStatus) {
        match status {
            OutcomeStatus::Completed(_) => self.succeeded += 1,
            OutcomeStatus::Recovered { .. } => self.recovered += 1,
            OutcomeStatus::Failed(_) => self.failed += 1,
        }
    }

    /// Pipelines that ran
    pub fn total(&self) -> usize {
        self.succeeded + self.recovered + self.failed
    }
}

/// Result of one `process_data` call
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FanOutReport {
    /// One outcome per pipeline that received a record, in registration order
    pub outcomes: Vec<PipelineOutcome>,
    /// Counts over `outcomes`
    pub tally: RunTally,
}

impl FanOutReport {
    /// Summaries that were produced, in registration order
    pub fn summaries(&self) -> impl Iterator<Item = &Summary> {
        self.outcomes.iter().filter_map(PipelineOutcome::summary)
    }

    /// Outcome of the pipeline with the given id
    pub fn outcome(&self, pipeline_id: &str) -> Option<&PipelineOutcome> {
        self.outcomes.iter().find(|outcome| outcome.pipeline_id == pipeline_id)
    }
}

// ============================================================================
// Manager
// ============================================================================

/// Owns pipelines and fans records out to them
pub struct Manager {
    config: ManagerConfig,
    pipelines: Vec<Pipeline>,
    backup: Option<Pipeline>,
    last_tally: Option<RunTally>,
}

impl Default for Manager {
    fn default() -> Self {
        Self::new()
    }
}

impl Manager {
    /// Create a sequential manager without pipelines
    pub fn new() -> Self {
        Self::with_config(ManagerConfig::default())
    }

    /// Create a manager with the given configuration
    pub fn with_config(config: ManagerConfig) -> Self {
        log_debug!(
            "manager created: {:?} fan-out, deadline {:?}",
            config.mode,
            config.deadline_ms
        );
        Self { config, pipelines: Vec::new(), backup: None, last_tally: None }
    }

    /// Current configuration
    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// Append a pipeline; registration order is fan-out order
    pub fn add_pipeline(&mut self, pipeline: Pipeline) {
        log_debug!("manager: pipeline '{}' registered at position {}", pipeline.id(), self.pipelines.len());
        self.pipelines.push(pipeline);
    }

    /// Install the pipeline that failed records are retried on
    pub fn set_backup(&mut self, pipeline: Pipeline) {
        self.backup = Some(pipeline);
    }

    /// Backup pipeline, if any
    pub fn backup(&self) -> Option<&Pipeline> {
        self.backup.as_ref()
    }

    /// Registered pipelines in fan-out order
    pub fn pipelines(&self) -> &[Pipeline] {
        &self.pipelines
    }

    /// Number of registered pipelines
    pub fn len(&self) -> usize {
        self.pipelines.len()
    }

    /// Whether no pipeline is registered
    pub fn is_empty(&self) -> bool {
        self.pipelines.is_empty()
    }

    /// Advisory throughput in records per second. Never enforced.
    pub fn capacity(&self) -> u32 {
        self.config.nominal_throughput
    }

    /// Tally of the most recent `process_data` call
    pub fn last_tally(&self) -> Option<RunTally> {
        self.last_tally
    }

    /// Fan a record or record set out to the managed pipelines
    ///
    /// Fails as a whole only when nothing was supplied. Individual pipeline
    /// failures are reported in the returned [`FanOutReport`].
    pub fn process_data(&mut self, data: impl Into<Option<Payload>>) -> PipelineResult<FanOutReport> {
        let records = self.route(data.into())?;
        let deadline = self.config.deadline();
        let retries = self.backup.is_some().then(|| records.clone());

        let results = match self.config.mode {
            FanOutMode::Sequential => self.run_sequential(records, deadline),
            FanOutMode::Concurrent => self.run_concurrent(records, deadline),
        };

        let mut report = FanOutReport::default();
        for (position, result) in results.into_iter().enumerate() {
            let pipeline_id = self.pipelines[position].id().to_owned();
            let status = match result {
                Ok(summary) => OutcomeStatus::Completed(summary),
                Err(error) => {
                    let retry = retries.as_ref().and_then(|records| records.get(position)).cloned();
                    self.recover(&pipeline_id, error, retry, deadline)
                }
            };
            report.tally.count(&status);
            report.outcomes.push(PipelineOutcome { pipeline_id, position, status });
        }

        log_info!(
            "manager: {} succeeded, {} recovered, {} failed",
            report.tally.succeeded,
            report.tally.recovered,
            report.tally.failed
        );
        self.last_tally = Some(report.tally);
        Ok(report)
    }

    /// Shorthand for broadcasting one record
    pub fn process_record(&mut self, record: Record) -> PipelineResult<FanOutReport> {
        self.process_data(Payload::Record(record))
    }

    /// Chain every pipeline: A's stage output feeds B, B's feeds C
    ///
    /// Only the last pipeline's adapter describes the result. The first
    /// failure breaks the chain and names the pipeline it happened in.
    pub fn process_chain(&mut self, record: Record) -> PipelineResult<Summary> {
        let deadline = self.config.deadline();
        let input = record.to_string();
        let mut current = record;

        for pipeline in self.pipelines.iter_mut() {
            current = pipeline.run_stages(current, deadline).map_err(|error| {
                log_warn!("manager: chain broken at pipeline '{}': {}", pipeline.id(), error);
                PipelineError::ChainBroken { pipeline: pipeline.id().to_owned(), error: Box::new(error) }
            })?;
        }

        let last = self.pipelines.last().ok_or(PipelineError::NoPipelines)?;
        Ok(last.summarize(input, &current))
    }

    /// One record per pipeline that takes part in this run
    fn route(&self, data: Option<Payload>) -> PipelineResult<Vec<Record>> {
        match data {
            None => Err(PipelineError::EmptyInput),
            Some(Payload::Set(records)) if records.is_empty() => Err(PipelineError::EmptyInput),
            Some(Payload::Record(record)) => Ok(self.broadcast(record)),
            Some(Payload::Set(mut records)) if records.len() == 1 => {
                let record = records.remove(0);
                Ok(self.broadcast(record))
            }
            Some(Payload::Set(mut records)) => {
                records.truncate(self.pipelines.len());
                Ok(records)
            }
        }
    }

    fn broadcast(&self, record: Record) -> Vec<Record> {
        vec![record; self.pipelines.len()]
    }

    fn run_sequential(
        &mut self,
        records: Vec<Record>,
        deadline: Option<Duration>,
    ) -> Vec<PipelineResult<Summary>> {
        self.pipelines
            .iter_mut()
            .zip(records)
            .map(|(pipeline, record)| pipeline.process_with_deadline(record, deadline))
            .collect()
    }

    fn run_concurrent(
        &mut self,
        records: Vec<Record>,
        deadline: Option<Duration>,
    ) -> Vec<PipelineResult<Summary>> {
        std::thread::scope(|scope| {
            let handles: Vec<_> = self
                .pipelines
                .iter_mut()
                .zip(records)
                .map(|(pipeline, record)| {
                    scope.spawn(move || pipeline.process_with_deadline(record, deadline))
                })
                .collect();

            // Joined in spawn order, which is registration order
            handles
                .into_iter()
                .map(|handle| handle.join().unwrap_or(Err(PipelineError::WorkerPanicked)))
                .collect()
        })
    }

    fn recover(
        &mut self,
        pipeline_id: &str,
        error: PipelineError,
        retry: Option<Record>,
        deadline: Option<Duration>,
    ) -> OutcomeStatus {
        let (Some(backup), Some(record)) = (self.backup.as_mut(), retry) else {
            log_warn!("manager: skipping pipeline '{}': {}", pipeline_id, error);
            return OutcomeStatus::Failed(error);
        };

        log_info!("manager: pipeline '{}' failed ({}), switching to backup '{}'", pipeline_id, error, backup.id());
        match backup.process_with_deadline(record, deadline) {
            Ok(summary) => OutcomeStatus::Recovered { error, summary },
            Err(_backup_error) => {
                log_warn!(
                    "manager: backup '{}' also failed for '{}': {}",
                    backup.id(),
                    pipeline_id,
                    _backup_error
                );
                OutcomeStatus::Failed(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::StageError;
    use crate::pipeline::{
        CsvAdapter, InputStage, JsonAdapter, MapStage, OutputStage, StreamAdapter, TransformStage,
    };

    fn standard(id: &str) -> Pipeline {
        Pipeline::builder(id, StreamAdapter)
            .stage(InputStage)
            .stage(TransformStage)
            .stage(OutputStage)
            .build()
            .unwrap()
    }

    fn broken(id: &str) -> Pipeline {
        Pipeline::builder(id, CsvAdapter)
            .stage(InputStage)
            .stage(MapStage::new("Reject", |_| Err(StageError::rejected("invalid data format"))))
            .build()
            .unwrap()
    }

    fn manager_with_failing_middle(config: ManagerConfig) -> Manager {
        let mut manager = Manager::with_config(config);
        manager.add_pipeline(standard("first"));
        manager.add_pipeline(broken("second"));
        manager.add_pipeline(standard("third"));
        manager
    }

    #[test]
    fn failing_pipeline_is_isolated() {
        let mut manager = manager_with_failing_middle(ManagerConfig::sequential());
        let report = manager.process_data(Payload::from(Record::Numeric(vec![20.0, 24.0]))).unwrap();

        assert_eq!(report.outcomes.len(), 3);
        assert!(report.outcomes[0].is_success());
        assert_eq!(report.outcomes[1].error().and_then(PipelineError::stage), Some(2));
        assert!(report.outcomes[2].is_success());
        assert_eq!(report.tally, RunTally { succeeded: 2, recovered: 0, failed: 1 });
        assert_eq!(manager.last_tally(), Some(report.tally));
    }

    #[test]
    fn concurrent_keeps_registration_order() {
        let mut manager = manager_with_failing_middle(ManagerConfig::concurrent());
        let report = manager.process_record(Record::Numeric(vec![1.0])).unwrap();

        let ids: Vec<&str> = report.outcomes.iter().map(|o| o.pipeline_id.as_str()).collect();
        assert_eq!(ids, ["first", "second", "third"]);
        assert_eq!(report.tally.failed, 1);
    }

    #[test]
    fn panicking_worker_is_contained() {
        let mut manager = Manager::with_config(ManagerConfig::concurrent());
        manager.add_pipeline(standard("ok"));
        manager.add_pipeline(
            Pipeline::builder("boom", JsonAdapter)
                .stage(MapStage::new("Panic", |_| panic!("stage blew up")))
                .build()
                .unwrap(),
        );

        let report = manager.process_record(Record::Numeric(vec![1.0])).unwrap();
        assert!(report.outcomes[0].is_success());
        assert_eq!(report.outcomes[1].status, OutcomeStatus::Failed(PipelineError::WorkerPanicked));
    }

    #[test]
    fn backup_recovers_failed_record() {
        let mut manager = manager_with_failing_middle(ManagerConfig::default());
        manager.set_backup(standard("backup"));

        let report = manager.process_record(Record::Numeric(vec![20.0])).unwrap();
        assert_eq!(report.tally, RunTally { succeeded: 2, recovered: 1, failed: 0 });
        let recovered = report.outcome("second").unwrap();
        assert!(matches!(recovered.status, OutcomeStatus::Recovered { .. }));
        assert_eq!(recovered.summary().unwrap().pipeline_id, "backup");
    }

    #[test]
    fn record_sets_pair_positionally() {
        let mut manager = Manager::new();
        manager.add_pipeline(standard("a"));
        manager.add_pipeline(standard("b"));
        manager.add_pipeline(standard("c"));

        let set = vec![Record::Numeric(vec![1.0]), Record::Numeric(vec![2.0])];
        let report = manager.process_data(Payload::from(set)).unwrap();
        assert_eq!(report.outcomes.len(), 2);
        assert_eq!(report.outcomes[1].summary().unwrap().input, "[2]");

        let single = vec![Record::Numeric(vec![5.0])];
        assert_eq!(manager.process_data(Payload::from(single)).unwrap().outcomes.len(), 3);
    }

    #[test]
    fn nothing_supplied() {
        let mut manager = Manager::new();
        manager.add_pipeline(standard("a"));
        assert_eq!(manager.process_data(None), Err(PipelineError::EmptyInput));
        assert_eq!(manager.process_data(Payload::Set(vec![])), Err(PipelineError::EmptyInput));
        assert_eq!(manager.last_tally(), None);
    }

    #[test]
    fn chain_feeds_stage_output_forward() {
        let mut manager = Manager::new();
        manager.add_pipeline(
            Pipeline::builder("double", JsonAdapter)
                .stage(MapStage::new("Double", |record| match record {
                    Record::Numeric(values) => Ok(Record::Numeric(values.iter().map(|v| v * 2.0).collect())),
                    other => Ok(other),
                }))
                .build()
                .unwrap(),
        );
        manager.add_pipeline(standard("stream"));

        let summary = manager.process_chain(Record::Numeric(vec![10.0, 12.0])).unwrap();
        assert_eq!(summary.pipeline_id, "stream");
        assert_eq!(summary.input, "[10, 12]");
        assert_eq!(summary.output, "Stream summary: 2 readings, avg: 22.0°C");
    }

    #[test]
    fn chain_reports_breaking_pipeline() {
        let mut manager = manager_with_failing_middle(ManagerConfig::default());
        let err = manager.process_chain(Record::Numeric(vec![1.0])).unwrap_err();
        assert!(matches!(&err, PipelineError::ChainBroken { pipeline, .. } if pipeline == "second"));
        assert_eq!(err.stage(), Some(2));

        assert_eq!(Manager::new().process_chain(Record::Numeric(vec![1.0])), Err(PipelineError::NoPipelines));
    }

    #[test]
    fn config_from_json() {
        let config = ManagerConfig::from_json(r#"{"mode": "concurrent", "deadline_ms": 50}"#).unwrap();
        assert_eq!(config.mode, FanOutMode::Concurrent);
        assert_eq!(config.deadline(), Some(Duration::from_millis(50)));
        assert_eq!(config.nominal_throughput, NOMINAL_THROUGHPUT_PER_SEC);

        assert_eq!(ManagerConfig::from_json("{}").unwrap(), ManagerConfig::default());
        assert!(ManagerConfig::from_json(r#"{"mode": "parallel"}"#).is_err());
    }

    #[test]
    fn sub_millisecond_deadline_rounds_up() {
        let config = ManagerConfig::sequential().with_deadline(Duration::from_micros(300));
        assert_eq!(config.deadline_ms, Some(1));
        assert_eq!(config.deadline(), Some(Duration::from_millis(1)));

        let config = ManagerConfig::sequential().with_deadline(Duration::from_micros(2001));
        assert_eq!(config.deadline_ms, Some(3));
        assert_eq!(ManagerConfig::sequential().with_deadline(Duration::ZERO).deadline_ms, Some(0));
    }

    #[test]
    fn capacity_is_advisory() {
        let mut manager = Manager::new();
        assert_eq!(manager.capacity(), 1000);
        for i in 0..3 {
            manager.add_pipeline(standard(&format!("p{i}")));
        }
        assert_eq!(manager.len(), 3);
    }
}
