//! Environmental sensor stream
//!
//! A sensor batch is exactly one temperature, humidity and pressure reading.
//! Anything else is a hard failure: the batch is refused as a whole and no
//! summary is produced.

use crate::{
    constants::SENSOR_READINGS_PER_BATCH,
    errors::{StreamError, StreamResult},
    filter::{self, Filtered},
    record::{Batch, Item, SensorTriple},
    traits::DataStream,
    validators::NonNegativeValidator,
};

use super::{Metric, StreamKind, StreamStats, StreamSummary};

/// Processes temperature, humidity and pressure batches
#[derive(Debug, Clone)]
pub struct SensorStream {
    id: String,
    stats: StreamStats,
}

impl SensorStream {
    /// Create a sensor stream
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        log_debug!("sensor stream '{}' ({}) created", id, StreamKind::Sensor.data_type());
        Self { id, stats: StreamStats::default() }
    }

    /// Read a batch as one sensor triple, with the hard checks applied
    pub fn reading(batch: &Batch) -> StreamResult<SensorTriple> {
        if batch.len() != SENSOR_READINGS_PER_BATCH {
            return Err(StreamError::MissingReadings {
                expected: SENSOR_READINGS_PER_BATCH,
                found: batch.len(),
            });
        }
        filter::enforce(batch, &NonNegativeValidator)?;

        let readings: Vec<f64> = batch.iter().filter_map(Item::as_f64).collect();
        match readings.as_slice() {
            [temperature, humidity, pressure] => {
                Ok(SensorTriple::new(*temperature, *humidity, *pressure))
            }
            _ => Err(StreamError::MissingReadings {
                expected: SENSOR_READINGS_PER_BATCH,
                found: readings.len(),
            }),
        }
    }

    fn analyze(&self, batch: &Batch) -> StreamResult<StreamSummary> {
        let triple = Self::reading(batch)?;

        // Reported as "avg temp" but it is the batch's single temperature
        Ok(StreamSummary {
            stream_id: self.id.clone(),
            kind: StreamKind::Sensor,
            processed: SENSOR_READINGS_PER_BATCH,
            rejected: 0,
            metric: Metric::AverageTemperature(triple.temperature),
        })
    }
}

impl DataStream for SensorStream {
    fn stream_id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> StreamKind {
        StreamKind::Sensor
    }

    fn filter(&self, batch: &Batch) -> Filtered {
        filter::filter(batch, &NonNegativeValidator)
    }

    fn process_batch(&mut self, batch: &Batch) -> StreamResult<StreamSummary> {
        let result = self.analyze(batch);
        match &result {
            Ok(summary) => self.stats.record_success(summary),
            Err(_e) => {
                log_warn!("sensor stream '{}': batch refused: {}", self.id, _e);
                self.stats.record_failure();
            }
        }
        result
    }

    fn stats(&self) -> &StreamStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch;
    use crate::errors::ValidationError;

    #[test]
    fn three_readings() {
        let mut stream = SensorStream::new("SENSOR_001");
        let summary = stream.process_batch(&batch![22.5, 65, 1013]).unwrap();
        assert_eq!(summary.processed, 3);
        assert_eq!(summary.metric, Metric::AverageTemperature(22.5));
        assert_eq!(summary.to_string(), "Sensor analysis: 3 readings processed, avg temp: 22.5");
    }

    #[test]
    fn wrong_shape_is_refused() {
        let mut stream = SensorStream::new("SENSOR_001");
        assert_eq!(
            stream.process_batch(&batch![22.5, 65]),
            Err(StreamError::MissingReadings { expected: 3, found: 2 })
        );
        assert!(stream.process_batch(&batch![22.5, 65, 1013, 4]).is_err());
        assert_eq!(stream.stats().failures, 2);
    }

    #[test]
    fn negative_units_are_hard_failures() {
        let mut stream = SensorStream::new("SENSOR_001");
        let err = stream.process_batch(&batch![-1, 65, 1013]).unwrap_err();
        assert_eq!(
            err,
            StreamError::InvalidReading { index: 0, error: ValidationError::NegativeUnit { value: -1.0 } }
        );
    }

    #[test]
    fn non_numbers_are_hard_failures() {
        let mut stream = SensorStream::new("SENSOR_001");
        assert!(matches!(
            stream.process_batch(&batch![22.5, "humid", 1013]),
            Err(StreamError::InvalidReading { index: 1, error: ValidationError::NotNumeric { .. } })
        ));
    }

    #[test]
    fn soft_filter_drops_instead() {
        let stream = SensorStream::new("SENSOR_001");
        let filtered = stream.filter(&batch![-1, 65, 1013]);
        assert_eq!(filtered.admitted, batch![65, 1013]);
        assert_eq!(filtered.rejected, 1);
    }

    #[test]
    fn reading_builds_a_triple() {
        assert_eq!(
            SensorStream::reading(&batch![22.5, 65, 1013]),
            Ok(SensorTriple::new(22.5, 65.0, 1013.0))
        );
    }
}
