//! Built-in pipeline stages
//!
//! The three standard stages form the usual input → transform → output run.
//! `ValidationStage` and `MapStage` cover per-kind validation and ad-hoc
//! transforms.

use crate::{
    constants::OUTPUT_PREFIX,
    errors::{StageError, StageResult},
    record::{Record, Rendered},
    traits::{PipelineStage, Validator},
};

// ============================================================================
// InputStage - Refuses empty records
// ============================================================================

/// Stage 1: input validation
///
/// Fails with "no data received" when the record is empty, otherwise passes
/// it on unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputStage;

impl PipelineStage for InputStage {
    fn process(&mut self, record: Record) -> StageResult<Record> {
        if record.is_empty() {
            return Err(StageError::NoData);
        }
        Ok(record)
    }

    fn name(&self) -> &'static str {
        "InputStage"
    }
}

// ============================================================================
// TransformStage - Enrichment point
// ============================================================================

/// Stage 2: transformation and enrichment
///
/// Passthrough; always succeeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransformStage;

impl PipelineStage for TransformStage {
    fn process(&mut self, record: Record) -> StageResult<Record> {
        Ok(record)
    }

    fn name(&self) -> &'static str {
        "TransformStage"
    }
}

// ============================================================================
// OutputStage - Renders the external string form
// ============================================================================

/// Stage 3: output formatting
///
/// Renders the record to its external string form. The rendered record keeps
/// its origin so adapters can still read the domain data.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputStage;

impl PipelineStage for OutputStage {
    fn process(&mut self, record: Record) -> StageResult<Record> {
        let text = format!("{OUTPUT_PREFIX}{record}");
        Ok(Record::Rendered(Rendered { text, origin: Box::new(record) }))
    }

    fn name(&self) -> &'static str {
        "OutputStage"
    }
}

// ============================================================================
// ValidationStage - Applies a record validator
// ============================================================================

/// Stage that applies a record validator
///
/// Validation looks through rendering layers at the domain record. A refused
/// record fails the stage with the validator's reason.
pub struct ValidationStage<V> {
    validator: V,
}

impl<V> ValidationStage<V>
where
    V: Validator<Value = Record> + Send,
{
    /// Wrap a validator
    pub fn new(validator: V) -> Self {
        Self { validator }
    }
}

impl<V> PipelineStage for ValidationStage<V>
where
    V: Validator<Value = Record> + Send,
{
    fn process(&mut self, record: Record) -> StageResult<Record> {
        self.validator.validate(record.origin())?;
        Ok(record)
    }

    fn name(&self) -> &'static str {
        self.validator.name()
    }
}

// ============================================================================
// MapStage - Closure stage
// ============================================================================

/// Stage built from a closure
pub struct MapStage<F> {
    transform: F,
    name: &'static str,
}

impl<F> MapStage<F>
where
    F: FnMut(Record) -> StageResult<Record> + Send,
{
    /// Create a named closure stage
    pub fn new(name: &'static str, transform: F) -> Self {
        Self { transform, name }
    }
}

impl<F> PipelineStage for MapStage<F>
where
    F: FnMut(Record) -> StageResult<Record> + Send,
{
    fn process(&mut self, record: Record) -> StageResult<Record> {
        (self.transform)(record)
    }

    fn name(&self) -> &'static str {
        self.name
    }
}
