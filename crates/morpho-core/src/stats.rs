//! Normal-distribution utilities shared by the rarity and market-fit scorers.
//!
//! The standard-normal CDF goes through a rational error-function
//! approximation (Abramowitz–Stegun style, |error| ≲ 1.2e-7) so the engine
//! carries no dependency on a platform `erf`. All functions saturate at the
//! tails instead of producing NaN.

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum StatsError {
    #[error("standard deviation must be positive, got {0}")]
    NonPositiveStd(f64),
}

/// Error function via a rational approximation in `t = 1 / (1 + |x|/2)`.
///
/// Odd-symmetric; |absolute error| ≤ 1.2e-7 over the whole real line, and the
/// `exp(-x²)` factor drives the result to ±1 for large |x| without overflow.
pub fn erf(x: f64) -> f64 {
    let t = 1.0 / (1.0 + 0.5 * x.abs());
    let tau = t
        * (-x * x - 1.26551223
            + t * (1.00002368
                + t * (0.37409196
                    + t * (0.09678418
                        + t * (-0.18628806
                            + t * (0.27886807
                                + t * (-1.13520398
                                    + t * (1.48851587
                                        + t * (-0.82215223 + t * 0.17087277)))))))))
        .exp();
    if x >= 0.0 {
        1.0 - tau
    } else {
        tau - 1.0
    }
}

/// Standard-normal CDF (mean 0, std 1).
///
/// `cdf(0) = 0.5`; monotone non-decreasing; `cdf(z) + cdf(-z) = 1`;
/// saturates to 0/1 at the tails.
pub fn normal_cdf(x: f64) -> f64 {
    0.5 * (1.0 + erf(x / std::f64::consts::SQRT_2))
}

/// Gaussian density at `x` for the given mean and standard deviation.
///
/// Errors only on `std <= 0` (including NaN), which is a reference-table
/// defect caught by [`crate::profiles::validate_tables`] at load time.
pub fn normal_pdf(x: f64, mean: f64, std: f64) -> Result<f64, StatsError> {
    if !(std > 0.0) {
        return Err(StatsError::NonPositiveStd(std));
    }
    let z = (x - mean) / std;
    Ok((1.0 / (std * (2.0 * std::f64::consts::PI).sqrt())) * (-0.5 * z * z).exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_erf_zero() {
        assert!(erf(0.0).abs() < 1e-7);
    }

    #[test]
    fn test_erf_known_value() {
        // erf(1) = 0.8427007929497149 to machine precision
        assert_relative_eq!(erf(1.0), 0.842700792949715, epsilon = 1e-6);
    }

    #[test]
    fn test_erf_odd_symmetry() {
        for x in [0.1, 0.5, 1.0, 2.0, 3.7] {
            assert!((erf(x) + erf(-x)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_erf_saturates() {
        assert_relative_eq!(erf(10.0), 1.0, epsilon = 1e-12);
        assert_relative_eq!(erf(-10.0), -1.0, epsilon = 1e-12);
        assert_eq!(erf(f64::INFINITY), 1.0);
        assert_eq!(erf(f64::NEG_INFINITY), -1.0);
    }

    #[test]
    fn test_cdf_at_zero_is_half() {
        assert!((normal_cdf(0.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_cdf_symmetry() {
        for z in [0.25, 1.0, 1.96, 3.0] {
            assert!((normal_cdf(z) + normal_cdf(-z) - 1.0).abs() < 1e-7);
        }
    }

    #[test]
    fn test_cdf_monotone_non_decreasing() {
        let mut prev = normal_cdf(-8.0);
        let mut x = -8.0;
        while x <= 8.0 {
            let cur = normal_cdf(x);
            assert!(cur >= prev - 1e-12, "cdf decreased at x = {x}");
            prev = cur;
            x += 0.05;
        }
    }

    #[test]
    fn test_cdf_known_quantile() {
        // Φ(1.96) ≈ 0.9750021
        assert_relative_eq!(normal_cdf(1.96), 0.9750021, epsilon = 1e-5);
    }

    #[test]
    fn test_cdf_saturates_without_nan() {
        assert_eq!(normal_cdf(40.0), 1.0);
        assert_eq!(normal_cdf(-40.0), 0.0);
        assert_eq!(normal_cdf(f64::INFINITY), 1.0);
        assert_eq!(normal_cdf(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_pdf_peak_at_mean() {
        let std = 0.1;
        let peak = normal_pdf(1.75, 1.75, std).unwrap();
        assert_relative_eq!(peak, 1.0 / (std * (2.0 * std::f64::consts::PI).sqrt()), epsilon = 1e-12);
        // Any other point is strictly below the mode.
        assert!(normal_pdf(1.80, 1.75, std).unwrap() < peak);
    }

    #[test]
    fn test_pdf_symmetric_around_mean() {
        let lo = normal_pdf(0.8, 1.0, 0.15).unwrap();
        let hi = normal_pdf(1.2, 1.0, 0.15).unwrap();
        assert_relative_eq!(lo, hi, epsilon = 1e-12);
    }

    #[test]
    fn test_pdf_rejects_non_positive_std() {
        assert_eq!(normal_pdf(0.0, 0.0, 0.0), Err(StatsError::NonPositiveStd(0.0)));
        assert_eq!(normal_pdf(0.0, 0.0, -1.0), Err(StatsError::NonPositiveStd(-1.0)));
        assert!(normal_pdf(0.0, 0.0, f64::NAN).is_err());
    }

    #[test]
    fn test_pdf_extreme_input_saturates() {
        let p = normal_pdf(1e12, 0.0, 1.0).unwrap();
        assert_eq!(p, 0.0);
        assert!(!p.is_nan());
    }
}
