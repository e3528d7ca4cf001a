//! pm-map: fill incomplete heat-pump performance maps.
//!
//! Manufacturer performance tables usually cover only part of the operating
//! envelope: capacity and power over a grid of temperatures, at one
//! compressor frequency and one air flow. This crate extends such a table
//! along the missing dimensions with single-variable correction curves,
//! normalizes it by rated values and writes the result in the fixed format
//! read by TRNSYS Type 3254.
//!
//! ```
//! use pm_core::{Quantity, Variable};
//! use pm_map::{PerformanceMap, RatedValues};
//! use pm_table::{MultiIndex, Table};
//!
//! let index = MultiIndex::new(
//!     vec![Variable::Tdbr, Variable::Twbr, Variable::Tdbo],
//!     vec![
//!         vec![17.8, 12.2, 35.0],
//!         vec![32.2, 22.8, 35.0],
//!     ],
//! )?;
//! let table = Table::new(
//!     index,
//!     vec![
//!         (Quantity::Capacity, vec![3.94, 4.44]),
//!         (Quantity::Power, vec![0.81, 0.65]),
//!     ],
//! )?;
//!
//! let rated = RatedValues::from_power_capacity(0.79, 3.52);
//! let filled = PerformanceMap::new(table)
//!     .set_entries(Variable::Freq, vec![0.5, 1.0])
//!     .set_mode("cooling")?
//!     .fillmap(Some(&rated))?;
//! assert!(filled.normalized());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod corrections;
pub mod curves;
pub mod defaults;
pub mod error;
pub mod export;
pub mod permap;
pub mod rated;

pub use config::MapConfig;
pub use corrections::Corrections;
pub use curves::{exponential, poly, Curve, CurveSet};
pub use defaults::build_default_corrections;
pub use error::{MapError, MapResult};
pub use export::MajorOrder;
pub use permap::PerformanceMap;
pub use rated::RatedValues;
