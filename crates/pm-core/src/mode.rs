//! Operating mode of a performance map.

use crate::error::{PmError, PmResult};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Operating mode associated with the performance data.
///
/// The mode selects which default correction set applies and how the
/// filled map is laid out before export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Mode {
    Heating,
    Cooling,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Heating => "heating",
            Mode::Cooling => "cooling",
        }
    }

    /// Parse free-form mode text.
    ///
    /// Matching is a case-insensitive substring check: anything containing
    /// "cool" is cooling, otherwise anything containing "heat" is heating.
    /// Text like "heat pump - heating" therefore parses as heating.
    ///
    /// # Errors
    /// Returns [`PmError::Parse`] when neither substring is present.
    pub fn parse(text: &str) -> PmResult<Mode> {
        let lower = text.to_lowercase();
        if lower.contains("cool") {
            Ok(Mode::Cooling)
        } else if lower.contains("heat") {
            Ok(Mode::Heating)
        } else {
            Err(PmError::Parse {
                what: "operating mode",
                given: text.to_string(),
            })
        }
    }
}

impl FromStr for Mode {
    type Err = PmError;

    fn from_str(s: &str) -> PmResult<Mode> {
        Mode::parse(s)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
