//! Core validator trait
//!
//! Keep it simple: a validator is a pure predicate that explains itself when
//! it says no.

use crate::errors::ValidationResult;

/// Core validator trait - implement this for each data kind
///
/// `Ok(())` means admissible, `Err(reason)` carries the diagnostic. A
/// validator never panics on malformed input; a string where a number was
/// expected is just another `Err`.
pub trait Validator {
    /// The type of value this validator handles
    type Value: ?Sized;

    /// Check a single value
    fn validate(&self, value: &Self::Value) -> ValidationResult<()>;

    /// Name for logs and diagnostics
    fn name(&self) -> &'static str;

    /// Convenience boolean form
    fn admits(&self, value: &Self::Value) -> bool {
        self.validate(value).is_ok()
    }
}

impl<V: Validator + ?Sized> Validator for &V {
    type Value = V::Value;

    fn validate(&self, value: &Self::Value) -> ValidationResult<()> {
        (**self).validate(value)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
