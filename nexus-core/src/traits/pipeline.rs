//! Record Processing Pipeline Traits
//!
//! ## Pipeline Architecture
//!
//! ```text
//! Record → [Stage 1] → [Stage 2] → ... → [Stage N] → [Adapter] → Summary
//!             ↓            ↓                 ↓
//!          failure      failure           failure   (first one wins)
//! ```
//!
//! Stages run strictly in insertion order. The first failing stage stops the
//! run for that record; the adapter is only reached when every stage passed.

use crate::errors::StageResult;
use crate::pipeline::adapters::Format;
use crate::record::Record;

/// Trait for pipeline stages
///
/// A stage takes a record by value and hands back the record the next stage
/// should see. Returning an error aborts the remaining stages for this
/// record; the pipeline reports the stage's 1-based position.
///
/// ## Example: Uppercasing Stage
///
/// ```rust
/// use nexus_core::traits::PipelineStage;
/// use nexus_core::record::Record;
/// use nexus_core::errors::StageResult;
///
/// struct Uppercase;
///
/// impl PipelineStage for Uppercase {
///     fn process(&mut self, record: Record) -> StageResult<Record> {
///         Ok(match record {
///             Record::Text(text) => Record::Text(text.to_uppercase()),
///             other => other,
///         })
///     }
///
///     fn name(&self) -> &'static str {
///         "Uppercase"
///     }
/// }
/// ```
pub trait PipelineStage: Send {
    /// Transform one record, or decline it
    fn process(&mut self, record: Record) -> StageResult<Record>;

    /// Get stage name for debugging
    ///
    /// Used in logs and in `PipelineError::StageFailed`.
    fn name(&self) -> &'static str;

    /// Reset stage state
    ///
    /// Called when the owning pipeline is reset.
    fn reset(&mut self) {}
}

/// Format-specific terminal behavior bound to a pipeline
///
/// Adapters only attach a domain narrative to a record that made it through
/// every stage. They never alter control flow.
pub trait Adapter: Send {
    /// Format tag of this adapter
    fn format(&self) -> Format;

    /// What the adapter did to the record, in a few words
    fn transform_note(&self) -> &'static str;

    /// Domain narrative for a record that passed every stage
    fn describe(&self, record: &Record) -> String;
}
