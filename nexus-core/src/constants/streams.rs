//! Stream Processor Parameters

// ===== SENSOR =====

/// Readings in a sensor batch: temperature, humidity, pressure.
pub const SENSOR_READINGS_PER_BATCH: usize = 3;

/// Lower edge of the normal temperature band (°C) reported by the JSON adapter.
pub const NORMAL_TEMP_MIN_C: f64 = 15.0;

/// Upper edge of the normal temperature band (°C) reported by the JSON adapter.
pub const NORMAL_TEMP_MAX_C: f64 = 30.0;

// ===== TRANSACTION =====

/// Transactions must satisfy `-TRANSACTION_LIMIT < x < TRANSACTION_LIMIT`.
///
/// Zero is excluded separately: a zero-unit transaction is neither a buy nor
/// a sell.
pub const TRANSACTION_LIMIT: i64 = 10_000;

// ===== EVENT =====

/// Event name counted as an error.
pub const ERROR_EVENT: &str = "error";
