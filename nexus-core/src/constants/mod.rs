//! Constants for Code Nexus Core
//!
//! Every numeric limit and literal the engine relies on lives here, grouped
//! by the component that uses it:
//! - **Pipeline**: stage capacity, manager throughput, rendering prefixes
//! - **Streams**: batch shapes, transaction bounds, normal reading bands

/// Pipeline and manager limits.
pub mod pipeline;

/// Stream processor parameters.
pub mod streams;

pub use pipeline::{MAX_PIPELINE_STAGES, NOMINAL_THROUGHPUT_PER_SEC, OUTPUT_PREFIX};

pub use streams::{
    ERROR_EVENT, NORMAL_TEMP_MAX_C, NORMAL_TEMP_MIN_C, SENSOR_READINGS_PER_BATCH,
    TRANSACTION_LIMIT,
};
