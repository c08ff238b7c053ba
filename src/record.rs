//! The record value type exchanged between pipeline stages.
//!
//! A `Record` is deliberately loose: stages validate the shape they
//! expect and reject anything else with a [`FormatError`]. There is no
//! fixed schema, only the four shapes the routing rules distinguish.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::FormatError;

/// A single data value flowing through a pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Record {
    /// Structured key-value mapping (parsed from a JSON object).
    Map(Map<String, Value>),
    /// Raw text, free-form or delimiter-separated.
    Text(String),
    /// Delimited text already split into fields by an adapter.
    Fields(Vec<String>),
    /// In-memory marker produced by the materialize stage.
    Stored,
}

impl Record {
    /// Build a text record.
    pub fn text(s: impl Into<String>) -> Self {
        Record::Text(s.into())
    }

    /// Build a mapping record from key-value pairs.
    pub fn map<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Record::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Parse one input line into a record.
    ///
    /// Lines that parse as a JSON object become `Record::Map`; everything
    /// else is kept as text verbatim.
    pub fn from_line(line: &str) -> Self {
        match serde_json::from_str::<Value>(line.trim()) {
            Ok(Value::Object(map)) => Record::Map(map),
            _ => Record::Text(line.to_string()),
        }
    }

    /// Human-readable name of this record's shape, used in traces and
    /// shape-mismatch errors.
    pub fn shape(&self) -> &'static str {
        match self {
            Record::Map(_) => "mapping",
            Record::Text(_) => "text",
            Record::Fields(_) => "fields",
            Record::Stored => "stored marker",
        }
    }

    /// Error for a stage that received a shape it cannot handle.
    pub fn shape_mismatch(&self, stage: &'static str, expected: &'static str) -> FormatError {
        FormatError::ShapeMismatch {
            stage,
            expected,
            found: self.shape(),
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Record::Map(map) => write!(f, "{}", Value::Object(map.clone())),
            Record::Text(s) => write!(f, "{s}"),
            Record::Fields(fields) => write!(f, "[{}]", fields.join(", ")),
            Record::Stored => write!(f, "<stored>"),
        }
    }
}

/// Parse a whole input text into records, one per non-empty line.
pub fn records_from_str(input: &str) -> Vec<Record> {
    input
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(Record::from_line)
        .collect()
}
