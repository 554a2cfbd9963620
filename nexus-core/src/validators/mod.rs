//! Data-Kind Validators
//!
//! ## Overview
//!
//! Pure predicates deciding whether a single item or record is admissible.
//! They come in two families:
//!
//! ### Item validators (`Validator<Value = Item>`)
//! Used by the filter engine on raw batches:
//! - `NumericValidator` - parses as an integer or float
//! - `NonNegativeValidator` - numeric and `>= 0` ("negative unit" otherwise)
//! - `BoundedIntegerValidator` - integer, optionally nonzero, `lo < x < hi`
//! - `StringValidator` - arrived as a string
//!
//! ### Record validators (`Validator<Value = Record>`)
//! One per data kind, used by `ValidationStage` and the data processors:
//! - `NumericSequenceValidator`, `TextValidator`, `LogLineValidator`
//! - `SensorReadingValidator`, `TransactionValidator`, `EventValidator`
//!
//! ## Usage Example
//!
//! ```rust
//! use nexus_core::validators::{NonNegativeValidator, LogLineValidator};
//! use nexus_core::{Validator, Item, Record};
//!
//! assert!(NonNegativeValidator.validate(&Item::Float(22.5)).is_ok());
//! assert!(NonNegativeValidator.validate(&Item::Int(-1)).is_err());
//!
//! let line = Record::LogLine("ERROR: Connection timeout".into());
//! assert!(LogLineValidator.validate(&line).is_ok());
//! ```

pub mod numeric;
pub mod records;
pub mod text;
pub mod utils;

pub use numeric::{BoundedIntegerValidator, NonNegativeValidator, NumericValidator};
pub use records::{
    EventValidator, NumericSequenceValidator, SensorReadingValidator, TransactionValidator,
};
pub use text::{LogLineValidator, StringValidator, TextValidator};
