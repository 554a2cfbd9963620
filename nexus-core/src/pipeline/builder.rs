//! Pipeline builder and core implementation
//!
//! This module provides the main Pipeline struct and its builder.

use std::time::{Duration, Instant};

use heapless::Vec;

use crate::{
    errors::{PipelineError, PipelineResult},
    record::Record,
};

use super::{
    Adapter, Format, PipelineMetrics, PipelineStage, Summary, MAX_PIPELINE_STAGES,
};

/// Record processing pipeline
///
/// ## Design Goals
///
/// 1. **Fixed order**: stage order is set at construction and never changes
/// 2. **Composable**: stages and adapters can be mixed and matched
/// 3. **Failures are values**: nothing escapes `process` except a `Result`
/// 4. **Observable**: built-in metrics for monitoring
///
/// Stages live in a fixed-capacity vector of `MAX_PIPELINE_STAGES` entries.
pub struct Pipeline {
    /// Pipeline identity
    id: String,
    /// Processing stages, insertion order = execution order
    stages: Vec<Box<dyn PipelineStage>, MAX_PIPELINE_STAGES>,
    /// Terminal format-specific behavior
    adapter: Box<dyn Adapter>,
    /// Pipeline metrics
    metrics: PipelineMetrics,
}

impl Pipeline {
    /// Create a pipeline without stages
    pub fn new<A: Adapter + 'static>(id: impl Into<String>, adapter: A) -> Self {
        Self {
            id: id.into(),
            stages: Vec::new(),
            adapter: Box::new(adapter),
            metrics: PipelineMetrics::new(),
        }
    }

    /// Create a new pipeline builder
    pub fn builder<A: Adapter + 'static>(id: impl Into<String>, adapter: A) -> PipelineBuilder {
        PipelineBuilder::new(id, adapter)
    }

    /// Append a stage
    ///
    /// Fails once `MAX_PIPELINE_STAGES` stages are present.
    pub fn add_stage<S: PipelineStage + 'static>(&mut self, stage: S) -> PipelineResult<()> {
        self.push_boxed(Box::new(stage))
    }

    fn push_boxed(&mut self, stage: Box<dyn PipelineStage>) -> PipelineResult<()> {
        self.stages
            .push(stage)
            .map_err(|_| PipelineError::TooManyStages { limit: MAX_PIPELINE_STAGES })
    }

    /// Pipeline id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Format tag of the bound adapter
    pub fn format(&self) -> Format {
        self.adapter.format()
    }

    /// Number of stages
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Stage names in execution order
    pub fn stage_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.stages.iter().map(|stage| stage.name())
    }

    /// Run a record through every stage, then the adapter
    pub fn process(&mut self, record: Record) -> PipelineResult<Summary> {
        self.process_with_deadline(record, None)
    }

    /// Like [`process`](Self::process), failing as soon as a stage finishes
    /// after `deadline` has elapsed
    ///
    /// A running stage is never interrupted. A pipeline without stages does
    /// no stage work and cannot overrun.
    pub fn process_with_deadline(
        &mut self,
        record: Record,
        deadline: Option<Duration>,
    ) -> PipelineResult<Summary> {
        let input = record.to_string();
        let output = self.run_stages(record, deadline)?;
        Ok(self.summarize(input, &output))
    }

    /// Run only the stages, handing back the final record
    pub(crate) fn run_stages(
        &mut self,
        record: Record,
        deadline: Option<Duration>,
    ) -> PipelineResult<Record> {
        self.metrics.records_received += 1;
        let started = Instant::now();
        let mut current = record;

        for (idx, stage) in self.stages.iter_mut().enumerate() {
            current = match stage.process(current) {
                Ok(next) => next,
                Err(error) => {
                    self.metrics.stage_failures[idx] += 1;
                    log_warn!(
                        "pipeline '{}': error detected in stage {} ({}): {}",
                        self.id,
                        idx + 1,
                        stage.name(),
                        error
                    );
                    return Err(PipelineError::StageFailed {
                        stage: idx + 1,
                        name: stage.name(),
                        error,
                    });
                }
            };

            // A stage that finishes past the deadline fails the run
            if let Some(limit) = deadline {
                let elapsed = started.elapsed();
                if elapsed > limit {
                    self.metrics.deadline_misses += 1;
                    log_warn!("pipeline '{}': deadline exceeded in stage {}", self.id, idx + 1);
                    return Err(PipelineError::DeadlineExceeded {
                        stage: idx + 1,
                        elapsed_ms: elapsed.as_millis() as u64,
                        limit_ms: limit.as_millis() as u64,
                    });
                }
            }
        }

        self.metrics.records_completed += 1;
        Ok(current)
    }

    /// Hand a finished record to the adapter
    pub(crate) fn summarize(&self, input: String, record: &Record) -> Summary {
        Summary {
            pipeline_id: self.id.clone(),
            format: self.adapter.format(),
            input,
            transform: self.adapter.transform_note(),
            output: self.adapter.describe(record),
        }
    }

    /// Get pipeline metrics
    pub fn metrics(&self) -> &PipelineMetrics {
        &self.metrics
    }

    /// Reset all pipeline stages and metrics
    pub fn reset(&mut self) {
        for stage in self.stages.iter_mut() {
            stage.reset();
        }
        self.metrics = PipelineMetrics::new();
    }
}

/// Pipeline builder for constructing pipelines
pub struct PipelineBuilder {
    pipeline: Pipeline,
    overflow: bool,
}

impl PipelineBuilder {
    /// Create a new pipeline builder
    pub fn new<A: Adapter + 'static>(id: impl Into<String>, adapter: A) -> Self {
        Self {
            pipeline: Pipeline::new(id, adapter),
            overflow: false,
        }
    }

    /// Add a processing stage
    pub fn stage<S: PipelineStage + 'static>(self, stage: S) -> Self {
        self.boxed_stage(Box::new(stage))
    }

    /// Add an already boxed stage
    pub fn boxed_stage(mut self, stage: Box<dyn PipelineStage>) -> Self {
        if self.pipeline.push_boxed(stage).is_err() {
            self.overflow = true;
        }
        self
    }

    /// Build the pipeline
    pub fn build(self) -> PipelineResult<Pipeline> {
        if self.overflow {
            return Err(PipelineError::TooManyStages { limit: MAX_PIPELINE_STAGES });
        }
        Ok(self.pipeline)
    }
}
