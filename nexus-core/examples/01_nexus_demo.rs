//! Code Nexus Pipeline Example
//!
//! Walks through every processing surface of the engine:
//! single-record processors, stream processors, format pipelines under a
//! manager, chaining and backup recovery.
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_nexus_demo
//! ```

use nexus_core::{
    batch,
    errors::StageError,
    manager::OutcomeStatus,
    pipeline::{CsvAdapter, InputStage, JsonAdapter, MapStage, OutputStage, Pipeline, StreamAdapter, TransformStage},
    processors::{DataProcessor, LogProcessor, NumericProcessor, TextProcessor},
    stream::polymorphic_process,
    traits::{Adapter, DataStream},
    EventStream, Manager, ManagerConfig, Payload, PipelineResult, Record, SensorStream,
    TransactionStream,
};
use serde_json::json;

fn standard<A: Adapter + 'static>(id: &str, adapter: A) -> PipelineResult<Pipeline> {
    Pipeline::builder(id, adapter)
        .stage(InputStage)
        .stage(TransformStage)
        .stage(OutputStage)
        .build()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== CODE NEXUS - DATA PROCESSORS ===\n");

    let numeric = NumericProcessor;
    let result = numeric.process(&batch![1, 2, 3, 4, 5])?;
    println!("{}", numeric.format_output(&result));

    let text = TextProcessor;
    let result = text.process(&Record::Text("Hello Nexus World".into()))?;
    println!("{}", text.format_output(&result));

    let log = LogProcessor;
    let result = log.process(&Record::LogLine("ERROR: Connection timeout".into()))?;
    println!("{}", log.format_output(&result));

    println!("\n=== CODE NEXUS - DATA STREAMS ===\n");

    let mut sensor = SensorStream::new("SENSOR_001");
    let mut transactions = TransactionStream::new("TRANS_001");
    let mut events = EventStream::new("EVENT_001");

    let sensor_batch = batch![22.5, 65, 1013];
    let transaction_batch = batch![100, -150, 75, 4, 35, "2", "e", 143540, -2000, "t", -20, 2];
    let event_batch = batch!["login", "error", "logout"];

    println!("Stream ID: {}, Type: {}", sensor.stream_id(), sensor.kind().data_type());
    println!("{}", sensor.process_batch(&sensor_batch)?);
    println!("Stream ID: {}, Type: {}", transactions.stream_id(), transactions.kind().data_type());
    println!("Processing batch: {}", transactions.describe(&transaction_batch));
    println!("{}", transactions.process_batch(&transaction_batch)?);
    println!("Stream ID: {}, Type: {}", events.stream_id(), events.kind().data_type());
    println!("{}", events.process_batch(&event_batch)?);

    println!("\n=== Polymorphic Stream Processing ===");
    let streams: [&dyn DataStream; 3] = [&sensor, &transactions, &events];
    let report = polymorphic_process(&streams, &[sensor_batch, transaction_batch, event_batch]);
    println!("{report}");

    println!("\n=== CODE NEXUS - ENTERPRISE PIPELINE SYSTEM ===\n");

    let mut manager = Manager::with_config(ManagerConfig::concurrent());
    println!("Capacity: {} streams/second", manager.capacity());
    manager.add_pipeline(standard("json", JsonAdapter)?);
    manager.add_pipeline(standard("csv", CsvAdapter)?);
    manager.add_pipeline(standard("stream", StreamAdapter)?);

    let records = vec![
        Record::Generic(json!({"sensor": "temp", "value": 23.5, "unit": "C"})),
        Record::Generic(json!("user,action,timestamp")),
        Record::Numeric(vec![22.0, 22.5, 21.8, 22.1, 22.1]),
    ];
    let report = manager.process_data(Payload::from(records))?;
    for outcome in &report.outcomes {
        if let Some(summary) = outcome.summary() {
            println!("[{}] Input: {}", summary.format, summary.input);
            println!("Transform: {}", summary.transform);
            println!("Output: {}\n", summary.output);
        }
    }

    println!("=== Pipeline Chaining Demo ===");
    let summary = manager.process_chain(Record::Numeric(vec![21.0, 23.0]))?;
    println!("Chain result: {summary}");

    println!("\n=== Error Recovery Test ===");
    let mut manager = Manager::new();
    manager.add_pipeline(
        Pipeline::builder("faulty", CsvAdapter)
            .stage(InputStage)
            .stage(MapStage::new("Reject", |_| Err(StageError::rejected("Invalid data format"))))
            .build()?,
    );
    manager.set_backup(standard("backup", StreamAdapter)?);

    let report = manager.process_data(Payload::from(Record::Numeric(vec![20.0, 24.0])))?;
    for outcome in &report.outcomes {
        match &outcome.status {
            OutcomeStatus::Completed(summary) => println!("{summary}"),
            OutcomeStatus::Recovered { error, summary } => {
                println!("{error}");
                println!("Recovery successful: {summary}");
            }
            OutcomeStatus::Failed(error) => println!("{error}"),
        }
    }

    Ok(())
}
