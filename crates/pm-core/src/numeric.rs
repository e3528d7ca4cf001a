//! Numeric helpers shared across the workspace.

use crate::error::{PmError, PmResult};

/// Absolute tolerance for comparing performance data.
pub const EPS_ABS: f64 = 1e-12;

/// Relative tolerance for comparing performance data.
pub const EPS_REL: f64 = 1e-9;

/// Compare two values against the workspace tolerances.
pub fn nearly_equal(a: f64, b: f64) -> bool {
    let diff = (a - b).abs();
    diff <= EPS_ABS || diff <= EPS_REL * a.abs().max(b.abs())
}

pub fn ensure_finite(v: f64, what: &'static str) -> PmResult<f64> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(PmError::NonFinite { what, value: v })
    }
}

/// Round to a fixed number of decimal digits.
///
/// Used by the map writer, which rounds every serialized value to ten
/// digits.
pub fn round_to(v: f64, digits: i32) -> f64 {
    let scale = 10f64.powi(digits);
    (v * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_basic() {
        assert!(nearly_equal(1.0, 1.0 + 1e-12));
        assert!(nearly_equal(0.0, 1e-13));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(f64::NAN, "test").unwrap_err();
        assert!(err.to_string().contains("Non-finite"));
    }

    #[test]
    fn round_to_ten_digits() {
        assert_eq!(round_to(0.12345678901234, 10), 0.123456789);
        assert_eq!(round_to(3.0, 10), 3.0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn rounding_is_idempotent(v in -1e6f64..1e6) {
                let once = round_to(v, 10);
                prop_assert_eq!(round_to(once, 10), once);
            }

            #[test]
            fn rounded_value_stays_close(v in -1e3f64..1e3) {
                prop_assert!(nearly_equal(round_to(v, 10), v));
            }
        }
    }
}
