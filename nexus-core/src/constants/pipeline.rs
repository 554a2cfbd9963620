//! Pipeline and Manager Limits

// ===== PIPELINE =====

/// Maximum number of stages a single pipeline holds.
///
/// Stages are stored inline in a fixed-capacity vector:
/// - Input, transform and output cover the common case with room to spare
/// - A longer chain is better expressed as chained pipelines
pub const MAX_PIPELINE_STAGES: usize = 16;

/// Prefix the output stage puts in front of a rendered record.
pub const OUTPUT_PREFIX: &str = "Output ";

/// Prefix data processors put in front of a formatted result.
pub const PROCESSOR_OUTPUT_PREFIX: &str = "Output: ";

// ===== MANAGER =====

/// Nominal manager throughput in streams per second.
///
/// Advisory only: the manager never refuses work based on this figure.
pub const NOMINAL_THROUGHPUT_PER_SEC: u32 = 1000;
