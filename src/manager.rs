//! Top-level coordinator: dispatch-with-fallback and pipeline chaining.

use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{error, info, warn};

use crate::adapter::{Adapter, AdapterKind};
use crate::error::FormatError;
use crate::pipeline::Processor;
use crate::record::Record;
use crate::router::Router;
use crate::stage::STREAM_SUMMARY;

/// Input to [`Manager::run_chain`]: a single record or a batch.
pub enum ChainInput {
    One(Record),
    Many(Vec<Record>),
}

impl From<Record> for ChainInput {
    fn from(record: Record) -> Self {
        ChainInput::One(record)
    }
}

impl From<Vec<Record>> for ChainInput {
    fn from(records: Vec<Record>) -> Self {
        ChainInput::Many(records)
    }
}

impl ChainInput {
    fn into_records(self) -> Vec<Record> {
        match self {
            ChainInput::One(record) => vec![record],
            ChainInput::Many(records) => records,
        }
    }
}

/// Outcome of a chained run: final outputs plus the wall-clock elapsed
/// time for the whole batch.
#[derive(Debug, Clone, Serialize)]
pub struct ChainReport {
    pub records: usize,
    pub units: usize,
    pub elapsed: Duration,
    pub outputs: Vec<Record>,
}

/// Coordinator owning the router and one pre-built adapter per routable
/// kind, plus the reserved fallback adapter.
///
/// Adapters and their stages are constructed once here and reused for
/// every record; nothing is allocated per call.
pub struct Manager {
    router: Router,
    structured: Adapter,
    delimited: Adapter,
    free_text: Adapter,
    fallback: Adapter,
}

impl Manager {
    /// Manager with the conventional `,` delimiter.
    pub fn new() -> Self {
        Self::with_delimiter(',')
    }

    pub fn with_delimiter(delimiter: char) -> Self {
        Self {
            router: Router::new(delimiter),
            structured: Adapter::structured(),
            delimited: Adapter::delimited(delimiter),
            free_text: Adapter::free_text(),
            fallback: Adapter::free_text(),
        }
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    fn adapter_for(&self, kind: AdapterKind) -> &Adapter {
        match kind {
            AdapterKind::Structured => &self.structured,
            AdapterKind::Delimited => &self.delimited,
            // Analysis and storage adapters are chain-only; the router
            // never selects them, so anything else lands on free text.
            _ => &self.free_text,
        }
    }

    /// Dispatch one record through the adapter its shape routes to.
    ///
    /// Never fails to the caller: any stage rejection is logged and the
    /// record is re-run through the fallback adapter in suppressed mode,
    /// yielding a degraded but well-formed result.
    pub fn run(&self, record: Record) -> Record {
        let kind = self.router.route(&record);
        match self.adapter_for(kind).process(record.clone(), false) {
            Ok(out) => out,
            Err(err) => {
                warn!(adapter = %kind, "dispatch failed: {err}");
                info!("recovery: switching to fallback processor");
                self.recover(record)
            }
        }
    }

    /// Run the fallback adapter, suppressed. The fallback is wired from
    /// total stages only, so the error arm is unreachable; if it is ever
    /// hit the degraded summary is substituted rather than propagating.
    fn recover(&self, record: Record) -> Record {
        match self.fallback.process(record, true) {
            Ok(out) => out,
            Err(err) => {
                error!("fallback adapter rejected a record: {err}");
                Record::text(STREAM_SUMMARY)
            }
        }
    }

    /// Thread records through an ordered chain of processors, suppressed,
    /// measuring elapsed wall-clock time for the whole batch.
    ///
    /// Each record is processed independently: unit *i*'s output becomes
    /// unit *i+1*'s input, and one record's chain never observes
    /// another's. Unlike [`Manager::run`] there is no recovery - the
    /// first stage rejection aborts the remaining batch and propagates.
    pub fn run_chain(
        &self,
        units: &[&dyn Processor],
        input: impl Into<ChainInput>,
    ) -> Result<ChainReport, FormatError> {
        let records = input.into().into_records();
        let total = records.len();
        let start = Instant::now();

        let mut outputs = Vec::with_capacity(total);
        for record in records {
            let mut current = record;
            for unit in units {
                current = unit.process(current, true)?;
            }
            outputs.push(current);
        }

        let elapsed = start.elapsed();
        info!(
            records = total,
            units = units.len(),
            "chain complete in {elapsed:.2?}"
        );

        Ok(ChainReport {
            records: total,
            units: units.len(),
            elapsed,
            outputs,
        })
    }
}

impl Default for Manager {
    fn default() -> Self {
        Self::new()
    }
}
