//! Filter Engine
//!
//! Applies an item validator to a whole batch. Two severities exist side by
//! side and are deliberately kept apart:
//!
//! - [`Severity::Drop`] - soft. Inadmissible items are left out of the
//!   admitted batch and counted. Nothing escapes.
//! - [`Severity::Abort`] - hard. The first inadmissible item fails the whole
//!   batch with its position and reason.
//!
//! The input batch is never touched; filtering always produces a new one.
//!
//! ```rust
//! use nexus_core::{batch, filter};
//! use nexus_core::validators::BoundedIntegerValidator;
//!
//! let batch = batch![100, -150, "e", 143540, 0, 2];
//! let filtered = filter::filter(&batch, &BoundedIntegerValidator::transactions());
//!
//! assert_eq!(filtered.admitted, batch![100, -150, 2]);
//! assert_eq!(filtered.rejected, 3);
//! ```

use serde::{Deserialize, Serialize};

use crate::{
    errors::{StreamError, StreamResult},
    record::{Batch, Item},
    traits::Validator,
};

/// How an inadmissible item is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Leave the item out and keep going
    Drop,
    /// Fail the whole batch
    Abort,
}

/// Outcome of filtering one batch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filtered {
    /// Items that passed, in their original order
    pub admitted: Batch,
    /// Number of items left out
    pub rejected: usize,
}

impl Filtered {
    /// Total number of items looked at
    pub fn total(&self) -> usize {
        self.admitted.len() + self.rejected
    }
}

/// Soft filter: keep admissible items, count the rest
pub fn filter<V>(batch: &Batch, validator: &V) -> Filtered
where
    V: Validator<Value = Item> + ?Sized,
{
    let mut rejected = 0;
    let admitted = batch
        .iter()
        .filter(|item| match validator.validate(item) {
            Ok(()) => true,
            Err(_e) => {
                log_debug!("{}: dropping '{}': {}", validator.name(), item, _e);
                rejected += 1;
                false
            }
        })
        .cloned()
        .collect();

    Filtered { admitted, rejected }
}

/// Hard check: every item must be admissible
pub fn enforce<V>(batch: &Batch, validator: &V) -> StreamResult<()>
where
    V: Validator<Value = Item> + ?Sized,
{
    for (index, item) in batch.iter().enumerate() {
        if let Err(error) = validator.validate(item) {
            log_warn!("{}: batch rejected at position {}: {}", validator.name(), index, error);
            return Err(StreamError::InvalidReading { index, error });
        }
    }
    Ok(())
}

/// Filter with an explicit severity
///
/// Under `Abort` a successful call admits the whole batch.
pub fn apply<V>(batch: &Batch, validator: &V, severity: Severity) -> StreamResult<Filtered>
where
    V: Validator<Value = Item> + ?Sized,
{
    match severity {
        Severity::Drop => Ok(filter(batch, validator)),
        Severity::Abort => {
            enforce(batch, validator)?;
            Ok(Filtered { admitted: batch.clone(), rejected: 0 })
        }
    }
}
