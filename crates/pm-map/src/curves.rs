//! Single-variable correction curves and their algebraic completion.

use crate::error::{MapError, MapResult};
use pm_core::{Quantity, Variable};
use std::sync::Arc;

/// A single-argument correction curve.
///
/// Curves are typically ratio-valued and normalized so that evaluating at
/// the rated condition yields roughly one. They are shared by reference so
/// copies of a map stay cheap.
pub type Curve = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

/// Build a curve from polynomial coefficients in ascending powers.
pub fn poly(coeffs: &[f64]) -> Curve {
    let coeffs = coeffs.to_vec();
    Arc::new(move |x| coeffs.iter().rev().fold(0.0, |acc, c| acc * x + c))
}

/// Build the curve `exp(rate × (x − anchor))`.
///
/// Strictly positive everywhere, so it is always safe to anchor on.
pub fn exponential(rate: f64, anchor: f64) -> Curve {
    Arc::new(move |x| (rate * (x - anchor)).exp())
}

/// Correction curves for the power/capacity/COP trio of one input variable.
///
/// Each member is individually optional before completion; [`CurveSet::complete`]
/// derives a single missing member from `capacity = power × COP`.
#[derive(Clone, Default)]
pub struct CurveSet {
    pub power: Option<Curve>,
    pub capacity: Option<Curve>,
    pub cop: Option<Curve>,
}

impl CurveSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    ///
    /// # Errors
    /// Only trio quantities can carry a correction curve.
    pub fn with(mut self, output: Quantity, curve: Curve) -> MapResult<Self> {
        self.set(output, curve)?;
        Ok(self)
    }

    pub fn set(&mut self, output: Quantity, curve: Curve) -> MapResult<()> {
        match output {
            Quantity::Power => self.power = Some(curve),
            Quantity::Capacity => self.capacity = Some(curve),
            Quantity::Cop => self.cop = Some(curve),
            other => return Err(MapError::NotACorrectionOutput { output: other }),
        }
        Ok(())
    }

    pub fn get(&self, output: Quantity) -> Option<&Curve> {
        match output {
            Quantity::Power => self.power.as_ref(),
            Quantity::Capacity => self.capacity.as_ref(),
            Quantity::Cop => self.cop.as_ref(),
            _ => None,
        }
    }

    /// The trio quantities that currently have a curve, in canonical order.
    pub fn present(&self) -> Vec<Quantity> {
        Quantity::TRIO
            .iter()
            .copied()
            .filter(|q| self.get(*q).is_some())
            .collect()
    }

    /// Derive the missing trio curve, if any.
    ///
    /// Missing power becomes `capacity(x)/COP(x)`, missing capacity
    /// `power(x)×COP(x)` and missing COP `capacity(x)/power(x)`.
    ///
    /// # Errors
    /// [`MapError::TrioIncomplete`] when fewer than two curves are present.
    /// `input` only names the curve set in the error message.
    pub fn complete(&self, input: Variable) -> MapResult<CurveSet> {
        let completed = match (&self.power, &self.capacity, &self.cop) {
            (Some(_), Some(_), Some(_)) => self.clone(),
            (None, Some(capacity), Some(cop)) => {
                let (capacity, cop) = (capacity.clone(), cop.clone());
                CurveSet {
                    power: Some(Arc::new(move |x| capacity(x) / cop(x))),
                    ..self.clone()
                }
            }
            (Some(power), None, Some(cop)) => {
                let (power, cop) = (power.clone(), cop.clone());
                CurveSet {
                    capacity: Some(Arc::new(move |x| power(x) * cop(x))),
                    ..self.clone()
                }
            }
            (Some(power), Some(capacity), None) => {
                let (power, capacity) = (power.clone(), capacity.clone());
                CurveSet {
                    cop: Some(Arc::new(move |x| capacity(x) / power(x))),
                    ..self.clone()
                }
            }
            _ => {
                return Err(MapError::TrioIncomplete {
                    what: format!("{input} corrections"),
                    present: self.present().len(),
                });
            }
        };
        Ok(completed)
    }
}

impl std::fmt::Debug for CurveSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CurveSet")
            .field("present", &self.present())
            .finish()
    }
}
