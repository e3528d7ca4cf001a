//! Per-mode collections of correction curves.

use crate::curves::{Curve, CurveSet};
use crate::error::{MapError, MapResult};
use pm_core::Variable;

/// All correction curves of a performance map.
///
/// `freq` and `AFR` corrections are always present; wet-bulb corrections and
/// the SHR curve only exist in cooling mode. The SHR curve is a scalar
/// correction keyed by the dry-/wet-bulb temperature difference and is never
/// auto-completed.
#[derive(Clone)]
pub struct Corrections {
    pub freq: CurveSet,
    pub afr: CurveSet,
    pub twbr: Option<CurveSet>,
    pub shr: Option<Curve>,
}

impl std::fmt::Debug for Corrections {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Corrections")
            .field("freq", &self.freq)
            .field("afr", &self.afr)
            .field("twbr", &self.twbr)
            .field("shr", &self.shr.as_ref().map(|_| "Curve"))
            .finish()
    }
}

impl Corrections {
    /// The curve set attached to an input variable.
    ///
    /// # Errors
    /// [`MapError::MissingCorrection`] for variables without curves
    /// (temperatures in heating mode, or any plain index variable).
    pub fn get(&self, input: Variable) -> MapResult<&CurveSet> {
        match input {
            Variable::Freq => Ok(&self.freq),
            Variable::Afr => Ok(&self.afr),
            Variable::Twbr => self
                .twbr
                .as_ref()
                .ok_or(MapError::MissingCorrection { input }),
            Variable::Tdbr | Variable::Tdbo => Err(MapError::MissingCorrection { input }),
        }
    }

    /// Replace the curve set of an input variable.
    pub fn set(&mut self, input: Variable, curves: CurveSet) -> MapResult<()> {
        match input {
            Variable::Freq => self.freq = curves,
            Variable::Afr => self.afr = curves,
            Variable::Twbr => self.twbr = Some(curves),
            Variable::Tdbr | Variable::Tdbo => {
                return Err(MapError::MissingCorrection { input });
            }
        }
        Ok(())
    }

    /// Complete every curve set (SHR is exempt).
    pub fn complete_all(&self) -> MapResult<Corrections> {
        Ok(Corrections {
            freq: self.freq.complete(Variable::Freq)?,
            afr: self.afr.complete(Variable::Afr)?,
            twbr: match &self.twbr {
                Some(set) => Some(set.complete(Variable::Twbr)?),
                None => None,
            },
            shr: self.shr.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::poly;
    use pm_core::Quantity;

    fn two_curve_set() -> CurveSet {
        CurveSet::new()
            .with(Quantity::Power, poly(&[0.0, 1.0]))
            .unwrap()
            .with(Quantity::Capacity, poly(&[0.0, 2.0]))
            .unwrap()
    }

    #[test]
    fn temperatures_have_no_curves_by_default() {
        let corrections = Corrections {
            freq: two_curve_set(),
            afr: two_curve_set(),
            twbr: None,
            shr: None,
        };
        assert!(corrections.get(Variable::Freq).is_ok());
        assert!(matches!(
            corrections.get(Variable::Tdbr),
            Err(MapError::MissingCorrection { .. })
        ));
        assert!(matches!(
            corrections.get(Variable::Twbr),
            Err(MapError::MissingCorrection { .. })
        ));
    }

    #[test]
    fn complete_all_fills_every_set() {
        let corrections = Corrections {
            freq: two_curve_set(),
            afr: two_curve_set(),
            twbr: Some(two_curve_set()),
            shr: None,
        };
        let completed = corrections.complete_all().unwrap();
        assert_eq!(completed.freq.present().len(), 3);
        assert_eq!(completed.afr.present().len(), 3);
        assert_eq!(completed.twbr.unwrap().present().len(), 3);
    }
}
