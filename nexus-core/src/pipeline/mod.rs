//! Record Processing Pipeline with Composable Stages
//!
//! ## Overview
//!
//! A pipeline is an ordered list of stages bound to one adapter. A record
//! runs through every stage in insertion order; the first stage that fails
//! stops the run and the pipeline reports which stage (1-based) it was. When
//! every stage passes, the adapter interprets the final record.
//!
//! ```text
//! Record → InputStage → TransformStage → OutputStage → Adapter → Summary
//!              ↓              ↓               ↓
//!        "no data"        passthrough     "Output ..."
//! ```
//!
//! A pipeline without stages is valid and hands the record straight to its
//! adapter.
//!
//! ## Module Organization
//!
//! - Summary and metrics types (this file)
//! - `stages` - Built-in stages (input, transform, output, validation, map)
//! - `adapters` - JSON, CSV and stream adapters
//! - `builder` - Pipeline and its builder

use core::fmt;

use serde::Serialize;

pub mod adapters;
pub mod builder;
pub mod stages;

// Re-export commonly used types
pub use adapters::{CsvAdapter, Format, JsonAdapter, StreamAdapter};
pub use builder::{Pipeline, PipelineBuilder};
pub use stages::{InputStage, MapStage, OutputStage, TransformStage, ValidationStage};

pub use crate::constants::MAX_PIPELINE_STAGES;
pub use crate::traits::{Adapter, PipelineStage};

/// Structured result of a record that made it through a pipeline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Id of the pipeline that produced this summary
    pub pipeline_id: String,
    /// Format tag of the adapter
    pub format: Format,
    /// The record as it entered the pipeline
    pub input: String,
    /// What the adapter did, in a few words
    pub transform: &'static str,
    /// Domain narrative from the adapter
    pub output: String,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.output)
    }
}

/// Pipeline metrics for monitoring
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineMetrics {
    /// Records handed to the pipeline
    pub records_received: u32,
    /// Records that reached the adapter
    pub records_completed: u32,
    /// Failures per stage position (0-based)
    pub stage_failures: [u32; MAX_PIPELINE_STAGES],
    /// Runs cut short by the deadline
    pub deadline_misses: u32,
}

impl PipelineMetrics {
    /// Zeroed metrics
    pub const fn new() -> Self {
        Self {
            records_received: 0,
            records_completed: 0,
            stage_failures: [0; MAX_PIPELINE_STAGES],
            deadline_misses: 0,
        }
    }

    /// Total stage failures across all positions
    pub fn total_failures(&self) -> u32 {
        self.stage_failures.iter().sum()
    }
}

impl Default for PipelineMetrics {
    fn default() -> Self {
        Self::new()
    }
}
