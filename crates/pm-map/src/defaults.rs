//! Default correction curves per operating mode.
//!
//! Curve fits for a generic variable-speed air-to-air heat pump. Frequency
//! and air-flow curves take normalized arguments and evaluate to one at the
//! rated point (1.0); wet-bulb curves are exponential in the deviation from
//! the rated wet-bulb temperature, so they are positive everywhere and safe
//! to anchor on. COP curves are left out and derived from power and
//! capacity on completion.

use crate::corrections::Corrections;
use crate::curves::{exponential, poly, Curve, CurveSet};
use pm_core::Mode;
use std::sync::Arc;

// Normalized compressor frequency fits, f(1) = 1.
const FREQ_POWER: [f64; 4] = [0.0, 0.0, 0.662, 0.338];
const FREQ_CAPACITY: [f64; 3] = [0.0, 0.44, 0.56];

// Air-flow ratio fits, f(1) = 1.
const AFR_POWER_HEATING: [f64; 2] = [0.84, 0.16];
const AFR_CAPACITY_HEATING: [f64; 2] = [0.66, 0.34];
const AFR_POWER_COOLING: [f64; 2] = [0.82, 0.18];
const AFR_CAPACITY_COOLING: [f64; 2] = [0.68, 0.32];

/// Rated room wet-bulb temperature (°C).
const TWBR_RATED: f64 = 19.4;
// Sensitivities per kelvin of wet-bulb deviation.
const TWBR_CAPACITY_RATE: f64 = 0.028;
const TWBR_POWER_RATE: f64 = 0.010;

// Sensible heat ratio vs. dry-/wet-bulb temperature difference (K).
const SHR_INTERCEPT: f64 = 0.45;
const SHR_SLOPE: f64 = 0.058;

/// Build the default correction set for a mode.
pub fn build_default_corrections(mode: Mode) -> Corrections {
    let freq = CurveSet {
        power: Some(poly(&FREQ_POWER)),
        capacity: Some(poly(&FREQ_CAPACITY)),
        cop: None,
    };
    match mode {
        Mode::Heating => Corrections {
            freq,
            afr: CurveSet {
                power: Some(poly(&AFR_POWER_HEATING)),
                capacity: Some(poly(&AFR_CAPACITY_HEATING)),
                cop: None,
            },
            twbr: None,
            shr: None,
        },
        Mode::Cooling => Corrections {
            freq,
            afr: CurveSet {
                power: Some(poly(&AFR_POWER_COOLING)),
                capacity: Some(poly(&AFR_CAPACITY_COOLING)),
                cop: None,
            },
            twbr: Some(CurveSet {
                power: Some(exponential(TWBR_POWER_RATE, TWBR_RATED)),
                capacity: Some(exponential(TWBR_CAPACITY_RATE, TWBR_RATED)),
                cop: None,
            }),
            shr: Some(default_shr_curve()),
        },
    }
}

/// Default sensible-heat-ratio curve, clamped to `[0, 1]` so the sensible
/// part never exceeds total capacity.
pub fn default_shr_curve() -> Curve {
    Arc::new(|dt| (SHR_INTERCEPT + SHR_SLOPE * dt).clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pm_core::{nearly_equal, Quantity};

    #[test]
    fn rated_point_evaluates_to_one() {
        for mode in [Mode::Heating, Mode::Cooling] {
            let corrections = build_default_corrections(mode);
            for set in [&corrections.freq, &corrections.afr] {
                for q in [Quantity::Power, Quantity::Capacity] {
                    let curve = set.get(q).unwrap();
                    assert!(nearly_equal(curve(1.0), 1.0), "{mode} {q} curve at rated");
                }
            }
        }
    }

    #[test]
    fn wet_bulb_curves_only_in_cooling() {
        assert!(build_default_corrections(Mode::Heating).twbr.is_none());
        assert!(build_default_corrections(Mode::Heating).shr.is_none());
        let cooling = build_default_corrections(Mode::Cooling);
        let twbr = cooling.twbr.unwrap();
        let capacity = twbr.get(Quantity::Capacity).unwrap();
        assert!(nearly_equal(capacity(TWBR_RATED), 1.0));
        // Warmer wet bulb means more latent load, hence more capacity used.
        assert!(capacity(TWBR_RATED + 3.0) > 1.0);
    }

    #[test]
    fn shr_stays_within_unit_interval() {
        let shr = default_shr_curve();
        assert!(shr(-100.0) >= 0.0);
        assert!(shr(100.0) <= 1.0);
        assert!(shr(5.6) > 0.0 && shr(5.6) < 1.0);
    }

    #[test]
    fn power_fit_matches_reference_points() {
        let power = poly(&FREQ_POWER);
        assert!(nearly_equal(power(1.0), 1.0));
        assert!((power(0.5) - 0.208).abs() < 5e-3);
    }
}
