//! Error Types for Validation, Stage, Pipeline and Stream Failures
//!
//! ## Error Taxonomy
//!
//! Failures are split by how far they are allowed to travel:
//!
//! ### Validation
//! - `ValidationError`: a single item or record fails a predicate. Inside the
//!   filter engine this is absorbed into a rejected count. In per-batch
//!   structural checks (the sensor triple) it aborts the batch.
//!
//! ### Stage
//! - `StageError`: a stage declines to pass its record on. It only ever
//!   escapes to the owning pipeline.
//!
//! ### Pipeline
//! - `PipelineError`: what a pipeline (or the manager) reports back. A stage
//!   failure is converted into `StageFailed` carrying the 1-based index of the
//!   stage that failed. `EmptyInput` is the top-level "no data received".
//!
//! ### Stream
//! - `StreamError`: the error summary of a stream processor batch.
//!
//! ## Handling Strategy
//!
//! ```rust
//! use nexus_core::{PipelineError, StageError};
//!
//! fn report(result: Result<String, PipelineError>) {
//!     match result {
//!         Ok(_summary) => {
//!             // Hand to the presentation layer
//!         }
//!         Err(PipelineError::StageFailed { stage, error: StageError::NoData, .. }) => {
//!             // Nothing reached the pipeline
//!             let _ = stage;
//!         }
//!         Err(PipelineError::DeadlineExceeded { .. }) => {
//!             // Treated like any stage failure
//!         }
//!         Err(_) => {
//!             // Log and move on to the next pipeline
//!         }
//!     }
//! }
//! ```

use thiserror_no_std::Error;

use crate::record::RecordKind;

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Result type for a single stage
pub type StageResult<T> = Result<T, StageError>;

/// Result type for pipeline and manager operations
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Result type for stream processor batches
pub type StreamResult<T> = Result<T, StreamError>;

/// Why an item or record was not admissible
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Item does not parse as an integer or float
    #[error("Invalid numeric data: '{item}' is not a number")]
    NotNumeric {
        /// Rendering of the offending item
        item: String,
    },

    /// Item is numeric but not an integer
    #[error("'{item}' is not an integer")]
    NotInteger {
        /// Rendering of the offending item
        item: String,
    },

    /// Item is not a string
    #[error("'{item}' is not a string")]
    NotString {
        /// Rendering of the offending item
        item: String,
    },

    /// Measurement below zero
    #[error("negative unit: {value}")]
    NegativeUnit {
        /// The negative reading
        value: f64,
    },

    /// Integer outside the open interval (min, max)
    #[error("Value {value} outside range ({min}, {max})")]
    OutOfRange {
        /// The rejected value
        value: i64,
        /// Exclusive lower bound
        min: i64,
        /// Exclusive upper bound
        max: i64,
    },

    /// Zero where zero is excluded
    #[error("zero is not an admissible value")]
    ZeroValue,

    /// NaN or infinity
    #[error("Invalid value: not a finite number")]
    InvalidValue,

    /// Log entry has no level separator
    #[error("Invalid log data: missing ':' separator")]
    MissingSeparator,

    /// Record has nothing in it
    #[error("empty {kind} record")]
    Empty {
        /// Kind of the empty record
        kind: RecordKind,
    },

    /// Record is of a different kind than the validator handles
    #[error("expected {expected} record, found {found}")]
    WrongKind {
        /// Kind the validator handles
        expected: RecordKind,
        /// Kind that was supplied
        found: RecordKind,
    },

    /// An entry inside a record is blank
    #[error("blank entry at position {index}")]
    BlankEntry {
        /// Zero-based position of the blank entry
        index: usize,
    },
}

/// A stage declining to pass its record on
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StageError {
    /// Incoming record was empty or absent
    #[error("no data received")]
    NoData,

    /// Record failed the stage's validator
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Stage-specific refusal
    #[error("{reason}")]
    Rejected {
        /// Human-readable reason
        reason: String,
    },
}

impl StageError {
    /// Build a `Rejected` error from any message
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected { reason: reason.into() }
    }
}

/// Pipeline and manager failures
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// A stage failed; remaining stages and the adapter were not run
    #[error("Error detected in stage {stage} ({name}): {error}")]
    StageFailed {
        /// 1-based position of the failing stage
        stage: usize,
        /// Name of the failing stage
        name: &'static str,
        /// What the stage reported
        #[source]
        error: StageError,
    },

    /// Pipeline ran past its deadline; remaining stages and the adapter were not run
    #[error("deadline of {limit_ms}ms exceeded in stage {stage} ({elapsed_ms}ms elapsed)")]
    DeadlineExceeded {
        /// 1-based position of the stage that finished past the deadline
        stage: usize,
        /// Time spent so far
        elapsed_ms: u64,
        /// Configured deadline
        limit_ms: u64,
    },

    /// Stage capacity reached
    #[error("pipeline holds at most {limit} stages")]
    TooManyStages {
        /// Maximum number of stages
        limit: usize,
    },

    /// Nothing was supplied at all
    #[error("no data received")]
    EmptyInput,

    /// Chaining needs at least one pipeline
    #[error("no pipelines registered")]
    NoPipelines,

    /// A chained pipeline failed
    #[error("pipeline '{pipeline}' broke the chain: {error}")]
    ChainBroken {
        /// Id of the failing pipeline
        pipeline: String,
        /// What it reported
        #[source]
        error: Box<PipelineError>,
    },

    /// Worker thread panicked during concurrent fan-out
    #[error("pipeline worker panicked")]
    WorkerPanicked,
}

impl PipelineError {
    /// 1-based stage index for stage-level failures
    pub fn stage(&self) -> Option<usize> {
        match self {
            Self::StageFailed { stage, .. } | Self::DeadlineExceeded { stage, .. } => Some(*stage),
            Self::ChainBroken { error, .. } => error.stage(),
            _ => None,
        }
    }
}

/// Error summary of a stream processor batch
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StreamError {
    /// Sensor batch without exactly one temperature, humidity and pressure
    #[error("need temperature, humidity and pressure (got {found} of {expected} readings)")]
    MissingReadings {
        /// Readings required
        expected: usize,
        /// Readings supplied
        found: usize,
    },

    /// Hard validation failure inside a batch
    #[error("invalid reading at position {index}: {error}")]
    InvalidReading {
        /// Zero-based position of the offending item
        index: usize,
        /// Why it was refused
        #[source]
        error: ValidationError,
    },

    /// Signed sum of the retained amounts does not fit in an `i64`
    #[error("net flow overflows after {operations} operations")]
    NetFlowOverflow {
        /// Operations retained in the batch
        operations: usize,
    },
}
