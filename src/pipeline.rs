//! Ordered stage sequences and the processing seam.

use crate::error::FormatError;
use crate::record::Record;
use crate::stage::Stage;

/// Anything that can fold one record through to a result.
///
/// Implemented by [`Pipeline`] and [`crate::adapter::Adapter`]; the
/// manager's chaining API accepts any mix of the two.
pub trait Processor {
    /// Identifier for traces and chain reports.
    fn id(&self) -> &str;

    /// Process one record, failing fast on the first stage rejection.
    fn process(&self, record: Record, suppressed: bool) -> Result<Record, FormatError>;
}

/// An ordered, exclusively owned sequence of stages.
///
/// Insertion order is execution order; stage *i*'s output becomes stage
/// *i+1*'s input. A pipeline never recovers from a stage failure - the
/// error propagates unmodified to the caller.
pub struct Pipeline {
    id: String,
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            stages: Vec::new(),
        }
    }

    /// Append a stage. No dedup, no reordering.
    pub fn add_stage(&mut self, stage: Box<dyn Stage>) {
        self.stages.push(stage);
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }
}

impl Processor for Pipeline {
    fn id(&self) -> &str {
        &self.id
    }

    fn process(&self, record: Record, suppressed: bool) -> Result<Record, FormatError> {
        let mut current = record;
        for stage in &self.stages {
            current = stage.process(current, suppressed)?;
        }
        Ok(current)
    }
}
