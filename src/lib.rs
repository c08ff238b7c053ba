//! # recordflow
//!
//! Routed, staged record-processing pipelines with fallback recovery.
//!
//! Heterogeneous input records (structured mappings, delimited text,
//! free text) are classified by shape, dispatched through a
//! format-specific chain of transformation stages, and degraded to a
//! fixed fallback summary when the chosen chain rejects the record.
//!
//! ## Overview
//!
//! - **Stage**: one transformation, `process(record, suppressed) -> record`
//! - **Pipeline**: an ordered, fail-fast fold over stages
//! - **Adapter**: a pipeline pre-wired for one input shape, with
//!   shape-specific normalization
//! - **Router**: pure classifier from record shape to adapter kind
//! - **Manager**: dispatch with guaranteed-success fallback, plus
//!   multi-pipeline chaining with elapsed-time measurement
//!
//! Trace output is emitted through `tracing` and gated by the per-call
//! `suppressed` flag; it never affects returned values.
//!
//! ## Example
//!
//! ```
//! use recordflow::{Manager, Record};
//!
//! let manager = Manager::new();
//!
//! // A well-formed structured record dispatches normally.
//! let out = manager.run(Record::from_line(r#"{"sensor": "temp", "value": 23.5}"#));
//! assert_eq!(out, Record::text("Reading processed: value 23.5 (normal range)"));
//!
//! // A malformed one is recovered through the fallback adapter.
//! let out = manager.run(Record::from_line(r#"{"sensor": "temp"}"#));
//! assert_eq!(out, Record::text(recordflow::STREAM_SUMMARY));
//! ```

pub mod adapter;
pub mod error;
pub mod manager;
pub mod pipeline;
pub mod record;
pub mod router;
pub mod stage;

pub use adapter::{Adapter, AdapterKind};
pub use error::FormatError;
pub use manager::{ChainInput, ChainReport, Manager};
pub use pipeline::{Pipeline, Processor};
pub use record::{Record, records_from_str};
pub use router::Router;
pub use stage::{
    FieldCount, InputEcho, Materialize, OutputTrace, Passthrough, STREAM_SUMMARY, Stage,
    TextSummary, VALUE_FIELD, ValueExtract,
};
