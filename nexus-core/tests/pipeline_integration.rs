//! Integration tests for pipelines and adapters
//!
//! Drives the canonical JSON, CSV and stream records through the standard
//! three-stage pipeline and checks stage failure reporting end to end.

mod common;

use nexus_core::{
    errors::{PipelineError, StageError, ValidationError},
    pipeline::{Format, InputStage, OutputStage, Pipeline, StreamAdapter, TransformStage, ValidationStage},
    record::{Record, SensorTriple},
    validators::{SensorReadingValidator, TransactionValidator},
};

use common::*;

#[test]
fn json_record_through_standard_pipeline() {
    let mut pipeline = json_pipeline();
    let summary = pipeline.process(json_record()).unwrap();

    assert_eq!(summary.format, Format::Json);
    assert_eq!(summary.transform, "Enriched with metadata and validation");
    assert_eq!(summary.output, "Processed temperature reading: 23.5°C (Normal range)");
}

#[test]
fn csv_record_through_standard_pipeline() {
    let mut pipeline = csv_pipeline();
    let summary = pipeline.process(csv_record()).unwrap();

    assert_eq!(summary.input, "user,action,timestamp");
    assert_eq!(summary.transform, "Parsed and structured data");
    assert_eq!(summary.to_string(), "User activity logged: 1 action processed");
}

#[test]
fn stream_record_through_standard_pipeline() {
    let mut pipeline = stream_pipeline();
    let summary = pipeline.process(stream_record()).unwrap();

    assert_eq!(summary.transform, "Aggregated and filtered");
    assert_eq!(summary.output, "Stream summary: 5 readings, avg: 22.1°C");
    assert_eq!(pipeline.metrics().records_completed, 1);
}

#[test]
fn empty_record_fails_input_stage() {
    let mut pipeline = stream_pipeline();
    let err = pipeline.process(Record::Numeric(vec![])).unwrap_err();

    assert_eq!(
        err,
        PipelineError::StageFailed { stage: 1, name: "InputStage", error: StageError::NoData }
    );
    assert_eq!(err.to_string(), "Error detected in stage 1 (InputStage): no data received");
}

#[test]
fn failure_is_reported_at_each_position() {
    for stage in 1..=3 {
        let mut pipeline = failing_pipeline("faulty", stage);
        let err = pipeline.process(json_record()).unwrap_err();
        assert_eq!(err.stage(), Some(stage));
        assert_eq!(pipeline.metrics().stage_failures[stage - 1], 1);
    }
}

#[test]
fn validation_stage_guards_domain_records() {
    let mut pipeline = Pipeline::builder("sensors", StreamAdapter)
        .stage(InputStage)
        .stage(ValidationStage::new(SensorReadingValidator))
        .stage(OutputStage)
        .build()
        .unwrap();

    let summary = pipeline.process(Record::Sensor(SensorTriple::new(22.5, 65.0, 1013.0))).unwrap();
    assert_eq!(summary.input, "[temp:22.5, humidity:65, pressure:1013]");

    let err = pipeline.process(Record::Sensor(SensorTriple::new(22.5, -3.0, 1013.0))).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::StageFailed {
            stage: 2,
            error: StageError::Validation(ValidationError::NegativeUnit { .. }),
            ..
        }
    ));
}

#[test]
fn transaction_validation_stage() {
    let mut pipeline = Pipeline::builder("ledger", nexus_core::pipeline::CsvAdapter)
        .stage(ValidationStage::new(TransactionValidator::default()))
        .stage(TransformStage)
        .build()
        .unwrap();

    let ok = pipeline.process(Record::Transactions(vec![100, -150, 75])).unwrap();
    assert_eq!(ok.output, "User activity logged: 3 actions processed");
    assert!(pipeline.process(Record::Transactions(vec![100, 20_000])).is_err());
}

#[test]
fn reset_clears_metrics() {
    let mut pipeline = failing_pipeline("faulty", 2);
    let _ = pipeline.process(csv_record());
    assert_eq!(pipeline.metrics().total_failures(), 1);

    pipeline.reset();
    assert_eq!(pipeline.metrics().total_failures(), 0);
    assert_eq!(pipeline.metrics().records_received, 0);
}
