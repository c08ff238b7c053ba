//! Error taxonomy for stage and pipeline failures.

use thiserror::Error;

/// A stage received a record that does not match its expected shape.
///
/// Raised by an individual stage and propagated unmodified through the
/// owning pipeline; only the manager's dispatch path recovers from it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    #[error("{stage}: expected {expected} record, got {found}")]
    ShapeMismatch {
        stage: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("{stage}: mapping is missing required field `{field}`")]
    MissingField {
        stage: &'static str,
        field: &'static str,
    },

    #[error("{stage}: delimited record has no fields")]
    EmptyFields { stage: &'static str },
}
