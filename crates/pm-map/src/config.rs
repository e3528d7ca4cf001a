//! JSON map configuration.
//!
//! A small project-file schema for the parts of a map that are data rather
//! than code: the operating mode, the entries to synthesize, the
//! manufacturer-value factors and the rated values. Correction curves stay
//! in code; only their inputs are configurable here.

use crate::error::MapResult;
use crate::permap::PerformanceMap;
use crate::rated::RatedValues;
use pm_core::{Mode, Variable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub entries: BTreeMap<Variable, Vec<f64>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub manval_factors: BTreeMap<Variable, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rated_values: Option<RatedValues>,
}

impl MapConfig {
    pub fn from_json(text: &str) -> MapResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> MapResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> MapResult<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> MapResult<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Apply this configuration to a map.
    ///
    /// Entries and factors are installed before the mode so that
    /// `set_mode` does not overwrite configured factors with defaults.
    pub fn apply(&self, map: &PerformanceMap) -> MapResult<PerformanceMap> {
        let mut out = map.clone();
        for (variable, entries) in &self.entries {
            out = out.set_entries(*variable, entries.clone());
        }
        for (variable, ratio) in &self.manval_factors {
            out = out.set_manval_factor(*variable, *ratio);
        }
        if let Some(mode) = self.mode {
            out = out.set_mode(mode.as_str())?;
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_variable_and_mode_names() {
        let config = MapConfig::from_json(
            r#"{
                "mode": "cooling",
                "entries": {"freq": [0.5, 1.0], "AFR": [0.0, 1.0]},
                "manval_factors": {"freq": 2.0},
                "rated_values": {"power": 0.79, "capacity": 3.52}
            }"#,
        )
        .unwrap();
        assert_eq!(config.mode, Some(Mode::Cooling));
        assert_eq!(config.entries[&Variable::Freq], vec![0.5, 1.0]);
        assert_eq!(config.manval_factors[&Variable::Freq], 2.0);
        assert_eq!(config.rated_values.unwrap().capacity, Some(3.52));
    }

    #[test]
    fn empty_sections_are_optional() {
        let config = MapConfig::from_json("{}").unwrap();
        assert_eq!(config, MapConfig::default());
    }

    #[test]
    fn rejects_unknown_variable_names() {
        assert!(MapConfig::from_json(r#"{"entries": {"frequency": [1.0]}}"#).is_err());
    }

    #[test]
    fn json_roundtrip() {
        let mut config = MapConfig::default();
        config.mode = Some(Mode::Heating);
        config.entries.insert(Variable::Freq, vec![0.2, 0.5, 1.0]);
        let text = config.to_json().unwrap();
        assert_eq!(MapConfig::from_json(&text).unwrap(), config);
    }
}
