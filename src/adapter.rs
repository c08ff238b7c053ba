//! Format-specific adapters: pipelines pre-wired for one input shape.

use std::fmt;

use tracing::info;

use crate::error::FormatError;
use crate::pipeline::{Pipeline, Processor};
use crate::record::Record;
use crate::stage::{FieldCount, InputEcho, Materialize, OutputTrace, TextSummary, ValueExtract};

/// The input shapes the routing rules distinguish, plus the two chain-only
/// variants (analysis and storage) that no router rule selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdapterKind {
    Structured,
    Delimited,
    FreeText,
    Analysis,
    Storage,
}

impl fmt::Display for AdapterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AdapterKind::Structured => "structured",
            AdapterKind::Delimited => "delimited",
            AdapterKind::FreeText => "free-text",
            AdapterKind::Analysis => "analysis",
            AdapterKind::Storage => "storage",
        };
        write!(f, "{label}")
    }
}

/// A pipeline bound to one input shape.
///
/// Construction wires the stage sequence once; the adapter is then
/// reused for every record of its shape. The delimited variant
/// additionally normalizes raw text into fields before the fold.
pub struct Adapter {
    kind: AdapterKind,
    delimiter: char,
    pipeline: Pipeline,
}

impl Adapter {
    /// Mapping records: echo, extract the required value field, trace output.
    pub fn structured() -> Self {
        let mut pipeline = Pipeline::new("structured");
        pipeline.add_stage(Box::new(InputEcho));
        pipeline.add_stage(Box::new(ValueExtract));
        pipeline.add_stage(Box::new(OutputTrace));
        Self {
            kind: AdapterKind::Structured,
            delimiter: ',',
            pipeline,
        }
    }

    /// Delimited text: split on `delimiter`, echo, count actions, trace output.
    pub fn delimited(delimiter: char) -> Self {
        let mut pipeline = Pipeline::new("delimited");
        pipeline.add_stage(Box::new(InputEcho));
        pipeline.add_stage(Box::new(FieldCount));
        pipeline.add_stage(Box::new(OutputTrace));
        Self {
            kind: AdapterKind::Delimited,
            delimiter,
            pipeline,
        }
    }

    /// Free text: echo, fixed summary, trace output. Total over every
    /// record shape, which is what qualifies it as the fallback.
    pub fn free_text() -> Self {
        let mut pipeline = Pipeline::new("free-text");
        pipeline.add_stage(Box::new(InputEcho));
        pipeline.add_stage(Box::new(TextSummary));
        pipeline.add_stage(Box::new(OutputTrace));
        Self {
            kind: AdapterKind::FreeText,
            delimiter: ',',
            pipeline,
        }
    }

    /// Trace-only passthrough, the seam where analysis stages would go.
    pub fn analysis() -> Self {
        let mut pipeline = Pipeline::new("analysis");
        pipeline.add_stage(Box::new(OutputTrace));
        Self {
            kind: AdapterKind::Analysis,
            delimiter: ',',
            pipeline,
        }
    }

    /// Storage stub: materialize a stored marker, trace it. Ignores the
    /// input's content entirely.
    pub fn storage() -> Self {
        let mut pipeline = Pipeline::new("storage");
        pipeline.add_stage(Box::new(Materialize));
        pipeline.add_stage(Box::new(OutputTrace));
        Self {
            kind: AdapterKind::Storage,
            delimiter: ',',
            pipeline,
        }
    }

    pub fn kind(&self) -> AdapterKind {
        self.kind
    }

    /// Shape-specific input normalization, applied before the stage fold.
    fn normalize(&self, record: Record) -> Record {
        match (self.kind, record) {
            (AdapterKind::Delimited, Record::Text(raw)) => {
                Record::Fields(raw.split(self.delimiter).map(str::to_string).collect())
            }
            (_, record) => record,
        }
    }
}

impl Processor for Adapter {
    fn id(&self) -> &str {
        self.pipeline.id()
    }

    fn process(&self, record: Record, suppressed: bool) -> Result<Record, FormatError> {
        if !suppressed {
            info!(adapter = %self.kind, "processing {} record through pipeline", self.kind);
        }
        let record = self.normalize(record);
        self.pipeline.process(record, suppressed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::STREAM_SUMMARY;
    use serde_json::json;

    #[test]
    fn test_structured_adapter_renders_value() {
        let adapter = Adapter::structured();
        let record = Record::map([("sensor", json!("temp")), ("value", json!(23.5))]);
        let out = adapter.process(record, true).unwrap();
        assert_eq!(
            out,
            Record::text("Reading processed: value 23.5 (normal range)")
        );
    }

    #[test]
    fn test_structured_adapter_propagates_missing_field() {
        let adapter = Adapter::structured();
        let record = Record::map([("sensor", json!("temp"))]);
        let err = adapter.process(record, true).unwrap_err();
        assert!(matches!(err, FormatError::MissingField { field: "value", .. }));
    }

    #[test]
    fn test_delimited_adapter_splits_before_fold() {
        let adapter = Adapter::delimited(',');
        let out = adapter
            .process(Record::text("user,action,timestamp"), true)
            .unwrap();
        assert_eq!(out, Record::text("Activity logged: 2 actions processed"));
    }

    #[test]
    fn test_delimited_adapter_passes_fields_through_unsplit() {
        // Already-normalized input skips the split.
        let adapter = Adapter::delimited(',');
        let record = Record::Fields(vec!["a".into(), "b".into()]);
        let out = adapter.process(record, true).unwrap();
        assert_eq!(out, Record::text("Activity logged: 1 actions processed"));
    }

    #[test]
    fn test_free_text_adapter_accepts_any_shape() {
        let adapter = Adapter::free_text();
        for record in [
            Record::text("Real-time sensor stream"),
            Record::map([("sensor", json!("temp"))]),
            Record::Stored,
        ] {
            let out = adapter.process(record, true).unwrap();
            assert_eq!(out, Record::text(STREAM_SUMMARY));
        }
    }

    #[test]
    fn test_storage_adapter_returns_marker() {
        let adapter = Adapter::storage();
        let out = adapter.process(Record::text("payload"), true).unwrap();
        assert_eq!(out, Record::Stored);
    }

    #[test]
    fn test_analysis_adapter_is_passthrough() {
        let adapter = Adapter::analysis();
        let record = Record::text("already processed");
        assert_eq!(adapter.process(record.clone(), true).unwrap(), record);
    }
}
