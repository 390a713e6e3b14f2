//! Benchmark harness for relaxbench
//!
//! Drives stencil and STREAM workloads over caller-chosen sizes and backends,
//! one combination at a time, and hands the samples to a [`sink::ResultSink`].

pub mod config;
pub mod legacy;
pub mod measure;
pub mod registry;
pub mod sink;
pub mod validate;

pub use config::HarnessConfig;
pub use legacy::LegacyTable;
pub use measure::{measure, measure_stencil, measure_stream, FieldInit, Measurements, Workload};
pub use registry::resolve_backends;
pub use sink::{
    bandwidth_series, timing_series, CsvSink, JsonSink, ResultSink, Series, SnapshotStore,
};
pub use validate::{validate_backends, BackendReport, ValidationReport};
