//! pm-core: shared vocabulary for the performance-map workspace.
//!
//! Contains:
//! - mode (operating mode + free-text parsing)
//! - quantity (output quantities + the power/capacity/COP trio)
//! - variable (named physical variables used as index levels)
//! - numeric (tolerances + float helpers)
//! - error (shared error types)

pub mod error;
pub mod mode;
pub mod numeric;
pub mod quantity;
pub mod variable;

// Re-exports: nice ergonomics for downstream crates
pub use error::{PmError, PmResult};
pub use mode::Mode;
pub use numeric::*;
pub use quantity::Quantity;
pub use variable::Variable;
