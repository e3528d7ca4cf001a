//! Named physical variables used as row-index levels.

use crate::error::{PmError, PmResult};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An input variable of the performance map.
///
/// Temperatures are the room/outdoor dry- and wet-bulb conditions the
/// manufacturer table is indexed by; `AFR` (air-flow ratio) and `freq`
/// (normalized compressor frequency) are the dimensions synthesized from
/// correction curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Variable {
    /// Room dry-bulb temperature.
    Tdbr,
    /// Room wet-bulb temperature.
    Twbr,
    /// Outdoor dry-bulb temperature.
    Tdbo,
    /// Air-flow ratio.
    #[cfg_attr(feature = "serde", serde(rename = "AFR"))]
    Afr,
    /// Normalized compressor frequency.
    #[cfg_attr(feature = "serde", serde(rename = "freq"))]
    Freq,
}

impl Variable {
    pub fn as_str(self) -> &'static str {
        match self {
            Variable::Tdbr => "Tdbr",
            Variable::Twbr => "Twbr",
            Variable::Tdbo => "Tdbo",
            Variable::Afr => "AFR",
            Variable::Freq => "freq",
        }
    }

    pub fn parse(text: &str) -> PmResult<Variable> {
        match text {
            "Tdbr" => Ok(Variable::Tdbr),
            "Twbr" => Ok(Variable::Twbr),
            "Tdbo" => Ok(Variable::Tdbo),
            "AFR" => Ok(Variable::Afr),
            "freq" => Ok(Variable::Freq),
            _ => Err(PmError::Parse {
                what: "input variable",
                given: text.to_string(),
            }),
        }
    }
}

impl FromStr for Variable {
    type Err = PmError;

    fn from_str(s: &str) -> PmResult<Variable> {
        Variable::parse(s)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_roundtrip() {
        for v in [
            Variable::Tdbr,
            Variable::Twbr,
            Variable::Tdbo,
            Variable::Afr,
            Variable::Freq,
        ] {
            assert_eq!(Variable::parse(v.as_str()).unwrap(), v);
        }
    }

    #[test]
    fn rejects_unknown_names() {
        assert!(Variable::parse("Tdb").is_err());
        assert!(Variable::parse("afr").is_err());
    }
}
