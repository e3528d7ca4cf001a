//! Table errors.

use pm_core::{Quantity, Variable};
use thiserror::Error;

/// Result type for table operations.
pub type TableResult<T> = Result<T, TableError>;

/// Errors that can occur while building or transforming tables.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    /// A column or key has the wrong length.
    #[error("Shape mismatch for {what}: expected {expected}, got {got}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("No column named {0}")]
    UnknownColumn(Quantity),

    #[error("Column {0} already present")]
    DuplicateColumn(Quantity),

    #[error("No index level named {0}")]
    UnknownLevel(Variable),

    #[error("Index level {0} already present")]
    DuplicateLevel(Variable),

    /// A level reorder must name each existing level exactly once.
    #[error("Invalid level order: {what}")]
    BadLevelOrder { what: &'static str },

    /// Blocks being concatenated disagree on levels or columns.
    #[error("Cannot concatenate tables: {what}")]
    ConcatMismatch { what: &'static str },
}
