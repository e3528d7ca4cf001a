//! pm-table: small multi-index numeric tables.
//!
//! A [`Table`] holds performance data keyed by an ordered tuple of named
//! physical variables (the row index) with one numeric column per output
//! quantity. All operations follow a copy-on-write discipline: they return
//! modified copies and never mutate the caller's table.

pub mod error;
pub mod index;
pub mod table;

pub use error::{TableError, TableResult};
pub use index::MultiIndex;
pub use table::Table;
