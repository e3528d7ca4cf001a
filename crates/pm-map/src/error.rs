//! Performance-map errors.

use pm_core::{PmError, Quantity, Variable};
use pm_table::TableError;
use thiserror::Error;

/// Result type for performance-map operations.
pub type MapResult<T> = Result<T, MapError>;

/// Errors that can occur while extending or exporting a performance map.
#[derive(Error, Debug)]
pub enum MapError {
    /// The operating mode is required but has not been set.
    #[error("attribute 'mode' must be set before {before}")]
    ModeNotSet { before: &'static str },

    /// Data has already been normalized once.
    #[error("values are already normalized")]
    AlreadyNormalized,

    /// Invalid mode or quantity text.
    #[error(transparent)]
    Parse(#[from] PmError),

    /// Table columns do not match a correction or rated-value set.
    #[error(
        "column sets do not match \
         (table only: {table_only:?}; other side only: {other_only:?})"
    )]
    ColumnMismatch {
        table_only: Vec<String>,
        other_only: Vec<String>,
    },

    /// The power/capacity/COP trio must have exactly one missing member.
    #[error("exactly one of power, capacity and COP may be missing for {what} ({present} present)")]
    TrioIncomplete { what: String, present: usize },

    /// Only trio quantities carry correction curves.
    #[error("{output} is not a correction output (must be power, capacity or COP)")]
    NotACorrectionOutput { output: Quantity },

    #[error("no correction curves for {input}")]
    MissingCorrection { input: Variable },

    #[error("no {output} correction curve for {input}")]
    MissingCorrectionCurve { input: Variable, output: Quantity },

    #[error("no SHR correction curve")]
    MissingShrCorrection,

    #[error("no manufacturer-value factor for {input}")]
    MissingManvalFactor { input: Variable },

    #[error("no entries configured for {input}")]
    MissingEntries { input: Variable },

    /// The export order argument is neither "row" nor "col".
    #[error("major order must be 'row' or 'col', got {given:?}")]
    InvalidMajorOrder { given: String },

    #[error(transparent)]
    Table(#[from] TableError),

    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_context() {
        let err = MapError::ModeNotSet {
            before: "normalizing",
        };
        assert!(err.to_string().contains("normalizing"));

        let err = MapError::ColumnMismatch {
            table_only: vec!["COP".into()],
            other_only: vec![],
        };
        assert!(err.to_string().contains("COP"));
    }
}
