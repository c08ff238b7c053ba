//! Stage trait and implementations.
//!
//! A stage is a pure transformation of one record into another. Stages
//! validate the shape they expect and fail with a [`FormatError`]
//! otherwise; the trace side channel is gated by the call-scoped
//! `suppressed` flag and never affects the returned value.

use tracing::info;

use crate::error::FormatError;
use crate::record::Record;

/// The field a structured record must carry to be extractable.
pub const VALUE_FIELD: &str = "value";

/// Fixed-shape summary emitted for free-text input and by the degraded
/// fallback path.
pub const STREAM_SUMMARY: &str = "Stream summary: 5 readings, average 22.1";

/// A single transformation step in a pipeline.
///
/// `process` takes `&self`: stages hold no per-call state, so one
/// instance can be reused across every record a pipeline ever sees.
pub trait Stage {
    /// The display name of this stage, used in traces and errors.
    fn name(&self) -> &'static str;

    /// Transform one record, or reject it for having the wrong shape.
    fn process(&self, record: Record, suppressed: bool) -> Result<Record, FormatError>;
}

// ---------------------------------------------------------------------------
// Stage implementations
// ---------------------------------------------------------------------------

/// Passes records through unchanged, without tracing.
pub struct Passthrough;

impl Stage for Passthrough {
    fn name(&self) -> &'static str {
        "passthrough"
    }

    fn process(&self, record: Record, _suppressed: bool) -> Result<Record, FormatError> {
        Ok(record)
    }
}

/// Traces the incoming record and passes it through unchanged.
pub struct InputEcho;

impl Stage for InputEcho {
    fn name(&self) -> &'static str {
        "input"
    }

    fn process(&self, record: Record, suppressed: bool) -> Result<Record, FormatError> {
        if !suppressed {
            info!(stage = self.name(), "input: {record}");
        }
        Ok(record)
    }
}

/// Extracts the required `value` field from a mapping record and renders
/// a reading line containing it.
pub struct ValueExtract;

impl Stage for ValueExtract {
    fn name(&self) -> &'static str {
        "extract"
    }

    fn process(&self, record: Record, suppressed: bool) -> Result<Record, FormatError> {
        let Record::Map(map) = &record else {
            return Err(record.shape_mismatch(self.name(), "mapping"));
        };
        let value = map.get(VALUE_FIELD).ok_or(FormatError::MissingField {
            stage: self.name(),
            field: VALUE_FIELD,
        })?;
        if !suppressed {
            info!(stage = self.name(), "transform: mapping validated and enriched");
        }
        Ok(Record::text(format!(
            "Reading processed: value {value} (normal range)"
        )))
    }
}

/// Counts the fields of a delimited record, treating the first field as
/// a header-like label rather than an action.
pub struct FieldCount;

impl Stage for FieldCount {
    fn name(&self) -> &'static str {
        "count"
    }

    fn process(&self, record: Record, suppressed: bool) -> Result<Record, FormatError> {
        let Record::Fields(fields) = &record else {
            return Err(record.shape_mismatch(self.name(), "fields"));
        };
        if fields.is_empty() {
            return Err(FormatError::EmptyFields { stage: self.name() });
        }
        if !suppressed {
            info!(stage = self.name(), "transform: parsed and structured");
        }
        Ok(Record::text(format!(
            "Activity logged: {} actions processed",
            fields.len() - 1
        )))
    }
}

/// Produces the fixed stream summary regardless of input shape.
///
/// Total over every record shape so the fallback adapter built from it
/// can never fail.
pub struct TextSummary;

impl Stage for TextSummary {
    fn name(&self) -> &'static str {
        "summarize"
    }

    fn process(&self, _record: Record, suppressed: bool) -> Result<Record, FormatError> {
        if !suppressed {
            info!(stage = self.name(), "transform: aggregated and filtered");
        }
        Ok(Record::text(STREAM_SUMMARY))
    }
}

/// Marks a record as durably stored, discarding its content.
///
/// The returned marker is an in-memory sentinel only; no persistence
/// happens here.
pub struct Materialize;

impl Stage for Materialize {
    fn name(&self) -> &'static str {
        "store"
    }

    fn process(&self, _record: Record, suppressed: bool) -> Result<Record, FormatError> {
        if !suppressed {
            info!(stage = self.name(), "store: record marked as stored");
        }
        Ok(Record::Stored)
    }
}

/// Traces the outgoing record and passes it through unchanged.
pub struct OutputTrace;

impl Stage for OutputTrace {
    fn name(&self) -> &'static str {
        "output"
    }

    fn process(&self, record: Record, suppressed: bool) -> Result<Record, FormatError> {
        if !suppressed {
            info!(stage = self.name(), "output: {record}");
        }
        Ok(record)
    }
}
