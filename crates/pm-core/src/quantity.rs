//! Output quantities of a performance map.

use crate::error::{PmError, PmResult};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A named output quantity (a table column).
///
/// Power, capacity and COP form a trio tied together by
/// `capacity = power × COP`; any one of them can be derived from the other
/// two (see [`Quantity::TRIO`]). The sensible/latent capacities only appear
/// after the cooling-mode split and take no part in that identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Quantity {
    #[cfg_attr(feature = "serde", serde(rename = "power"))]
    Power,
    #[cfg_attr(feature = "serde", serde(rename = "capacity"))]
    Capacity,
    #[cfg_attr(feature = "serde", serde(rename = "COP"))]
    Cop,
    #[cfg_attr(feature = "serde", serde(rename = "sensible_capacity"))]
    SensibleCapacity,
    #[cfg_attr(feature = "serde", serde(rename = "latent_capacity"))]
    LatentCapacity,
}

impl Quantity {
    /// The mutually derivable trio, in canonical order.
    pub const TRIO: [Quantity; 3] = [Quantity::Power, Quantity::Capacity, Quantity::Cop];

    pub fn as_str(self) -> &'static str {
        match self {
            Quantity::Power => "power",
            Quantity::Capacity => "capacity",
            Quantity::Cop => "COP",
            Quantity::SensibleCapacity => "sensible_capacity",
            Quantity::LatentCapacity => "latent_capacity",
        }
    }

    /// Whether this quantity takes part in the power/capacity/COP identity.
    pub fn is_trio(self) -> bool {
        Quantity::TRIO.contains(&self)
    }

    pub fn parse(text: &str) -> PmResult<Quantity> {
        match text {
            "power" => Ok(Quantity::Power),
            "capacity" => Ok(Quantity::Capacity),
            "COP" => Ok(Quantity::Cop),
            "sensible_capacity" => Ok(Quantity::SensibleCapacity),
            "latent_capacity" => Ok(Quantity::LatentCapacity),
            _ => Err(PmError::Parse {
                what: "output quantity",
                given: text.to_string(),
            }),
        }
    }
}

impl FromStr for Quantity {
    type Err = PmError;

    fn from_str(s: &str) -> PmResult<Quantity> {
        Quantity::parse(s)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
