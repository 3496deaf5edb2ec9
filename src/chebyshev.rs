//! Chebyshev series evaluation.
//!
//! SPK type 2 segments store each Cartesian component as a truncated Chebyshev
//! series in the normalized time `tau ∈ [-1, 1]`. Evaluation is abstracted
//! behind [`ChebyshevEvaluator`] so the position/velocity assembly can be
//! driven by any implementation; [`Clenshaw`] is the one used by default.
//!
//! Both operations take the polynomial **order** and expect exactly
//! `order + 1` coefficients, lowest degree first.
//!
//! See also
//! ------------
//! * [`crate::naif::ephemeris_record::ChebyshevRecord::interpolate_with`] – Calls the evaluator per axis.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChebyshevError {
    #[error("Chebyshev series expects {expected} coefficients, got {len}")]
    CoefficientCountMismatch { expected: usize, len: usize },
}

/// Value and first derivative of a Chebyshev series.
///
/// Implementations must be pure: identical inputs give bit-identical outputs.
pub trait ChebyshevEvaluator {
    /// Evaluate `sum(c_k * T_k(tau))` for `k` in `0..=order`.
    fn value(&self, order: usize, tau: f64, coeffs: &[f64]) -> Result<f64, ChebyshevError>;

    /// Evaluate `sum(c_k * T_k'(tau))` for `k` in `0..=order`, the derivative with
    /// respect to `tau`.
    fn derivative(&self, order: usize, tau: f64, coeffs: &[f64]) -> Result<f64, ChebyshevError>;
}

fn check_len(order: usize, coeffs: &[f64]) -> Result<(), ChebyshevError> {
    if coeffs.len() != order + 1 {
        return Err(ChebyshevError::CoefficientCountMismatch {
            expected: order + 1,
            len: coeffs.len(),
        });
    }
    Ok(())
}

/// Clenshaw recurrence for the value, forward `T_k`/`T_k'` recurrence for the
/// derivative.
#[derive(Debug, Clone, Copy, Default)]
pub struct Clenshaw;

impl ChebyshevEvaluator for Clenshaw {
    fn value(&self, order: usize, tau: f64, coeffs: &[f64]) -> Result<f64, ChebyshevError> {
        check_len(order, coeffs)?;
        if order == 0 {
            return Ok(coeffs[0]);
        }

        let two_tau = 2.0 * tau;
        let mut b_k1 = 0.0;
        let mut b_k2 = 0.0;
        for &c_k in coeffs[1..].iter().rev() {
            let b_k = two_tau * b_k1 - b_k2 + c_k;
            b_k2 = b_k1;
            b_k1 = b_k;
        }

        Ok(tau * b_k1 - b_k2 + coeffs[0])
    }

    fn derivative(&self, order: usize, tau: f64, coeffs: &[f64]) -> Result<f64, ChebyshevError> {
        check_len(order, coeffs)?;
        if order == 0 {
            return Ok(0.0);
        }

        // T_k' = 2 T_{k-1} + 2 tau T_{k-1}' - T_{k-2}'
        let two_tau = 2.0 * tau;
        let (mut t_prev2, mut dt_prev2) = (1.0, 0.0);
        let (mut t_prev1, mut dt_prev1) = (tau, 1.0);
        let mut result = coeffs[1];

        for &c_k in &coeffs[2..] {
            let t_k = two_tau * t_prev1 - t_prev2;
            let dt_k = 2.0 * t_prev1 + two_tau * dt_prev1 - dt_prev2;
            result += c_k * dt_k;

            t_prev2 = t_prev1;
            t_prev1 = t_k;
            dt_prev2 = dt_prev1;
            dt_prev1 = dt_k;
        }

        Ok(result)
    }
}

#[cfg(test)]
mod test_chebyshev {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_constant_series() {
        assert_eq!(Clenshaw.value(0, 0.3, &[7.0]), Ok(7.0));
        assert_eq!(Clenshaw.derivative(0, 0.3, &[7.0]), Ok(0.0));
    }

    #[test]
    fn test_cubic_against_closed_form() {
        // T2 = 2t^2 - 1, T3 = 4t^3 - 3t
        let c = [1.5, -2.0, 0.25, 3.0];
        let t: f64 = 0.37;
        let expected = c[0] + c[1] * t + c[2] * (2.0 * t * t - 1.0) + c[3] * (4.0 * t.powi(3) - 3.0 * t);
        let expected_der = c[1] + c[2] * 4.0 * t + c[3] * (12.0 * t * t - 3.0);

        assert_abs_diff_eq!(Clenshaw.value(3, t, &c).unwrap(), expected, epsilon = 1e-14);
        assert_abs_diff_eq!(
            Clenshaw.derivative(3, t, &c).unwrap(),
            expected_der,
            epsilon = 1e-13
        );
    }

    #[test]
    fn test_endpoints() {
        // T_k(1) = 1, T_k(-1) = (-1)^k, T_k'(1) = k^2
        let c = [1.0, 1.0, 1.0, 1.0, 1.0];
        assert_abs_diff_eq!(Clenshaw.value(4, 1.0, &c).unwrap(), 5.0, epsilon = 1e-14);
        assert_abs_diff_eq!(Clenshaw.value(4, -1.0, &c).unwrap(), 1.0, epsilon = 1e-14);
        assert_abs_diff_eq!(
            Clenshaw.derivative(4, 1.0, &c).unwrap(),
            1.0 + 4.0 + 9.0 + 16.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_length_mismatch() {
        let err = Clenshaw.value(3, 0.0, &[1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(
            err,
            ChebyshevError::CoefficientCountMismatch {
                expected: 4,
                len: 3
            }
        );
        assert_eq!(
            err.to_string(),
            "Chebyshev series expects 4 coefficients, got 3"
        );
        assert!(Clenshaw.derivative(0, 0.0, &[]).is_err());
    }
}
