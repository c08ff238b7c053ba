//! Shape-based routing of records to adapters.

use crate::adapter::AdapterKind;
use crate::record::Record;

/// Stateless classifier mapping a record's shape to the responsible
/// adapter kind.
///
/// Routing is a pure, total function of the record in hand: the same
/// shape always yields the same kind, and no shape is left unmatched
/// (free text is the default). Prior routing decisions are never
/// consulted.
#[derive(Debug, Clone, Copy)]
pub struct Router {
    delimiter: char,
}

impl Router {
    pub fn new(delimiter: char) -> Self {
        Self { delimiter }
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Classify a record. Priority: mapping, then delimited text, then
    /// free text for everything else.
    pub fn route(&self, record: &Record) -> AdapterKind {
        match record {
            Record::Map(_) => AdapterKind::Structured,
            Record::Text(text) if text.contains(self.delimiter) => AdapterKind::Delimited,
            _ => AdapterKind::FreeText,
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(',')
    }
}
