//! Core Traits and Abstractions for Code Nexus
//!
//! The engine is polymorphic over three capability sets, each defined here:
//!
//! - [`core`] - `Validator`: decide whether one item or record is admissible
//! - [`pipeline`] - `PipelineStage` (`process`) and `Adapter` (`describe`)
//! - [`stream`] - `DataStream` (`process_batch`)
//!
//! Components hold these as trait objects (`Box<dyn PipelineStage>`,
//! `Box<dyn Adapter>`) rather than inheriting from one another. An adapter is
//! something a pipeline *has*, not something a pipeline *is*.
//!
//! ## Usage Example
//!
//! ```rust
//! use nexus_core::traits::Validator;
//! use nexus_core::validators::BoundedIntegerValidator;
//! use nexus_core::record::Item;
//!
//! let validator = BoundedIntegerValidator::transactions();
//!
//! assert!(validator.validate(&Item::Int(100)).is_ok());
//! assert!(validator.validate(&Item::Int(143540)).is_err());
//! assert!(validator.validate(&Item::Int(0)).is_err());
//! ```

pub mod core;
pub mod pipeline;
pub mod stream;

pub use self::core::Validator;
pub use self::pipeline::{Adapter, PipelineStage};
pub use self::stream::DataStream;
