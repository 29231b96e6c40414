//! Univariate normal distribution.

use condist_core::traits::{BaseDistribution, Distribution};
use condist_core::types::{DistributionError, Interval};
use rand::{Rng, RngCore};
use rand_distr::StandardNormal;
use statrs::function::erf::erfc;
use std::f64::consts::SQRT_2;

/// 1 / sqrt(2 * pi)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// `|Φ⁻¹(1e-14)|`: half-width, in standard deviations, of the reported range.
///
/// The normal support is the whole line; the range is truncated so that each
/// excluded tail carries a mass of 1e-14.
pub const NORMAL_RANGE_QUANTILE: f64 = 7.650_628_092_935_268;

/// Standard normal density φ(z).
#[inline]
pub(crate) fn standard_pdf(z: f64) -> f64 {
    FRAC_1_SQRT_2PI * (-0.5 * z * z).exp()
}

/// Standard normal cumulative distribution Φ(z).
#[inline]
pub(crate) fn standard_cdf(z: f64) -> f64 {
    0.5 * erfc(-z / SQRT_2)
}

/// Normal distribution `N(mean, std_dev²)`.
///
/// # Example
///
/// ```
/// use condist_core::traits::Distribution;
/// use condist_models::univariate::Normal;
///
/// let normal = Normal::standard();
/// assert!((normal.cdf(&[0.0]).unwrap() - 0.5).abs() < 1e-15);
/// assert!((normal.pdf(&[0.0]).unwrap() - 0.398_942_280_401_432_7).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Normal {
    mean: f64,
    std_dev: f64,
}

impl Normal {
    /// Create a normal distribution.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `mean` is not finite or `std_dev` is not
    /// a positive finite number.
    pub fn new(mean: f64, std_dev: f64) -> Result<Self, DistributionError> {
        if !mean.is_finite() {
            return Err(DistributionError::InvalidParameter {
                name: "mean",
                reason: format!("must be finite, got {}", mean),
            });
        }
        if !(std_dev.is_finite() && std_dev > 0.0) {
            return Err(DistributionError::InvalidParameter {
                name: "std_dev",
                reason: format!("must be positive and finite, got {}", std_dev),
            });
        }
        Ok(Self { mean, std_dev })
    }

    /// Standard normal `N(0, 1)`.
    pub fn standard() -> Self {
        Self {
            mean: 0.0,
            std_dev: 1.0,
        }
    }

    /// Location parameter.
    #[inline]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Scale parameter.
    #[inline]
    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Density at `x`.
    #[inline]
    pub fn density(&self, x: f64) -> f64 {
        standard_pdf((x - self.mean) / self.std_dev) / self.std_dev
    }

    /// Cumulative probability at `x`.
    #[inline]
    pub fn probability(&self, x: f64) -> f64 {
        standard_cdf((x - self.mean) / self.std_dev)
    }

    /// Truncated support `[lower, upper]`.
    pub fn bounds(&self) -> (f64, f64) {
        let half_width = NORMAL_RANGE_QUANTILE * self.std_dev;
        (self.mean - half_width, self.mean + half_width)
    }

    /// Draw one variate.
    pub fn draw(&self, rng: &mut dyn RngCore) -> f64 {
        let z: f64 = rng.sample(StandardNormal);
        self.mean + self.std_dev * z
    }
}

impl Distribution for Normal {
    fn dimension(&self) -> usize {
        1
    }

    fn range(&self) -> Interval {
        let (lower, upper) = self.bounds();
        Interval::new(vec![lower], vec![upper]).unwrap_or_else(|_| Interval::unbounded(1))
    }

    fn pdf(&self, point: &[f64]) -> Result<f64, DistributionError> {
        DistributionError::check_dimension(1, point)?;
        Ok(self.density(point[0]))
    }

    fn cdf(&self, point: &[f64]) -> Result<f64, DistributionError> {
        DistributionError::check_dimension(1, point)?;
        Ok(self.probability(point[0]))
    }
}

impl BaseDistribution for Normal {
    fn marginal(&self, indices: &[usize]) -> Result<Box<dyn BaseDistribution>, DistributionError> {
        DistributionError::check_indices(1, indices)?;
        if indices.is_empty() {
            return Err(DistributionError::Unsupported(
                "marginal over no coordinates".to_string(),
            ));
        }
        Ok(Box::new(*self))
    }

    fn sample_into(&self, rng: &mut dyn RngCore, out: &mut [f64]) -> Result<(), DistributionError> {
        DistributionError::check_dimension(1, out)?;
        out[0] = self.draw(rng);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_standard_reference_values() {
        let n = Normal::standard();
        assert_relative_eq!(n.cdf(&[1.0]).unwrap(), 0.841_344_746_068_542_9, epsilon = 1e-14);
        assert_relative_eq!(n.cdf(&[-2.0]).unwrap(), 0.022_750_131_948_179_195, max_relative = 1e-13);
        assert_relative_eq!(n.pdf(&[2.0]).unwrap(), 0.053_990_966_513_188_06, max_relative = 1e-14);
    }

    #[test]
    fn test_location_scale() {
        let n = Normal::new(1.0, 2.0).unwrap();
        assert_relative_eq!(n.pdf(&[3.0]).unwrap(), standard_pdf(1.0) / 2.0, epsilon = 1e-16);
        assert_abs_diff_eq!(n.cdf(&[1.0]).unwrap(), 0.5, epsilon = 1e-16);
    }

    #[test]
    fn test_range_tail_mass() {
        let n = Normal::new(-1.0, 0.5).unwrap();
        let range = n.range();
        let lower = range.lower_bound()[0];
        let upper = range.upper_bound()[0];
        assert_relative_eq!(lower, -1.0 - 0.5 * NORMAL_RANGE_QUANTILE, epsilon = 1e-15);
        assert_relative_eq!(n.probability(lower), 1e-14, max_relative = 1e-6);
        assert_relative_eq!(1.0 - n.probability(upper), 1e-14, max_relative = 2e-2);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(matches!(
            Normal::new(0.0, 0.0),
            Err(DistributionError::InvalidParameter { name: "std_dev", .. })
        ));
        assert!(Normal::new(f64::NAN, 1.0).is_err());
        assert!(Normal::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_dimension_checked() {
        let n = Normal::standard();
        assert!(matches!(
            n.pdf(&[0.0, 1.0]),
            Err(DistributionError::DimensionMismatch { expected: 1, got: 2 })
        ));
        assert!(n.cdf(&[]).is_err());
    }

    #[test]
    fn test_marginal_is_self() {
        let n = Normal::new(2.0, 3.0).unwrap();
        let m = n.marginal(&[0]).unwrap();
        assert_eq!(m.pdf(&[1.0]).unwrap(), n.pdf(&[1.0]).unwrap());
        assert!(n.marginal(&[1]).is_err());
    }

    #[test]
    fn test_sample_moments() {
        let n = Normal::new(3.0, 2.0).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let draws = n.sample(&mut rng, 50_000).unwrap();
        let mean = draws.iter().map(|p| p[0]).sum::<f64>() / draws.len() as f64;
        let var = draws.iter().map(|p| (p[0] - mean).powi(2)).sum::<f64>() / draws.len() as f64;
        assert_abs_diff_eq!(mean, 3.0, epsilon = 0.05);
        assert_abs_diff_eq!(var, 4.0, epsilon = 0.15);
    }
}
