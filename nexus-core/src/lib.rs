//! Core pipeline engine for Code Nexus
//!
//! Pushes heterogeneous records (JSON-like objects, CSV-like rows, sensor,
//! transaction and event readings) through ordered stages and hands the
//! result to a format-specific adapter. Batches of raw items go through the
//! filter engine and the stream processors instead.
//!
//! ```text
//! Record → Stage 1 → Stage 2 → ... → Stage N → Adapter → Summary
//! Batch  → Filter → Stream processor (aggregate)          → StreamSummary
//! ```
//!
//! ```no_run
//! use nexus_core::{
//!     pipeline::{Pipeline, InputStage, TransformStage, OutputStage, JsonAdapter},
//!     record::Record,
//! };
//!
//! let mut pipeline = Pipeline::builder("json", JsonAdapter)
//!     .stage(InputStage)
//!     .stage(TransformStage)
//!     .stage(OutputStage)
//!     .build()?;
//!
//! let record = Record::Generic(serde_json::json!({"sensor": "temp", "value": 23.5, "unit": "C"}));
//! match pipeline.process(record) {
//!     Ok(summary) => {}, // Hand to the presentation layer
//!     Err(e) => {},      // Stage failure, reported with its 1-based index
//! }
//! # Ok::<(), nexus_core::PipelineError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod macros;

pub mod constants;
pub mod errors;
pub mod filter;
pub mod manager;
pub mod pipeline;
pub mod processors;
pub mod record;
pub mod stream;
pub mod traits;
pub mod validators;

// Public API
pub use errors::{
    PipelineError, PipelineResult, StageError, StageResult, StreamError, StreamResult,
    ValidationError, ValidationResult,
};
pub use filter::{Filtered, Severity};
pub use manager::{FanOutMode, FanOutReport, Manager, ManagerConfig, Payload};
pub use pipeline::{Pipeline, PipelineBuilder, Summary};
pub use record::{Batch, Item, Record, RecordKind, SensorTriple};
pub use stream::{EventStream, SensorStream, StreamSummary, TransactionStream};
pub use traits::{Adapter, DataStream, PipelineStage, Validator};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
