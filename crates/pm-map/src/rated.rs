//! Rated output values used for normalization.

use crate::error::{MapError, MapResult};
use pm_core::Quantity;
use serde::{Deserialize, Serialize};

/// The rated-condition row a map is normalized by.
///
/// Each member is optional; like correction curves, a single missing trio
/// member can be derived from `capacity = power × COP`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RatedValues {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<f64>,
    #[serde(default, rename = "COP", skip_serializing_if = "Option::is_none")]
    pub cop: Option<f64>,
}

impl RatedValues {
    /// The usual manufacturer pair.
    pub fn from_power_capacity(power: f64, capacity: f64) -> Self {
        Self {
            power: Some(power),
            capacity: Some(capacity),
            cop: None,
        }
    }

    pub fn get(&self, quantity: Quantity) -> Option<f64> {
        match quantity {
            Quantity::Power => self.power,
            Quantity::Capacity => self.capacity,
            Quantity::Cop => self.cop,
            _ => None,
        }
    }

    /// The trio quantities that have a value, in canonical order.
    pub fn present(&self) -> Vec<Quantity> {
        Quantity::TRIO
            .iter()
            .copied()
            .filter(|q| self.get(*q).is_some())
            .collect()
    }

    /// Derive the missing trio value, if any.
    ///
    /// # Errors
    /// [`MapError::TrioIncomplete`] when fewer than two values are present.
    pub fn complete(&self) -> MapResult<RatedValues> {
        let completed = match (self.power, self.capacity, self.cop) {
            (Some(_), Some(_), Some(_)) => *self,
            (None, Some(capacity), Some(cop)) => RatedValues {
                power: Some(capacity / cop),
                ..*self
            },
            (Some(power), None, Some(cop)) => RatedValues {
                capacity: Some(power * cop),
                ..*self
            },
            (Some(power), Some(capacity), None) => RatedValues {
                cop: Some(capacity / power),
                ..*self
            },
            _ => {
                return Err(MapError::TrioIncomplete {
                    what: "rated values".to_string(),
                    present: self.present().len(),
                });
            }
        };
        Ok(completed)
    }
}
