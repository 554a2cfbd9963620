//! Shared fixtures for integration tests
//!
//! - Standard three-stage pipelines bound to each adapter
//! - Pipelines that fail at a chosen stage
//! - The canonical JSON, CSV and stream records

#![allow(dead_code)]

use nexus_core::{
    batch,
    errors::StageError,
    pipeline::{
        CsvAdapter, InputStage, JsonAdapter, MapStage, OutputStage, Pipeline, StreamAdapter,
        TransformStage,
    },
    record::{Batch, Record},
    traits::Adapter,
};
use serde_json::json;

/// Input → Transform → Output bound to `adapter`
pub fn standard_pipeline<A: Adapter + 'static>(id: &str, adapter: A) -> Pipeline {
    Pipeline::builder(id, adapter)
        .stage(InputStage)
        .stage(TransformStage)
        .stage(OutputStage)
        .build()
        .expect("three stages fit")
}

pub fn json_pipeline() -> Pipeline {
    standard_pipeline("json", JsonAdapter)
}

pub fn csv_pipeline() -> Pipeline {
    standard_pipeline("csv", CsvAdapter)
}

pub fn stream_pipeline() -> Pipeline {
    standard_pipeline("stream", StreamAdapter)
}

/// Three-stage pipeline whose stage `failing_stage` (1-based) rejects everything
pub fn failing_pipeline(id: &str, failing_stage: usize) -> Pipeline {
    let mut builder = Pipeline::builder(id, CsvAdapter);
    for position in 1..=3 {
        builder = if position == failing_stage {
            builder.stage(MapStage::new("Reject", |_| Err(StageError::rejected("Invalid data format"))))
        } else {
            builder.stage(TransformStage)
        };
    }
    builder.build().expect("three stages fit")
}

pub fn json_record() -> Record {
    Record::Generic(json!({"sensor": "temp", "value": 23.5, "unit": "C"}))
}

pub fn csv_record() -> Record {
    Record::Generic(json!("user,action,timestamp"))
}

pub fn stream_record() -> Record {
    Record::Numeric(vec![22.0, 22.5, 21.8, 22.1, 22.1])
}

/// Twelve mixed transaction items: 8 admissible, 4 not
pub fn mixed_transactions() -> Batch {
    batch![100, -150, 75, 4, 35, "2", "e", 143540, -2000, "t", -20, 2]
}
