//! Univariate uniform distribution.

use condist_core::traits::{BaseDistribution, Distribution};
use condist_core::types::{DistributionError, Interval};
use rand::{Rng, RngCore};

/// Continuous uniform distribution on `[lower, upper]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Uniform {
    lower: f64,
    upper: f64,
}

impl Uniform {
    /// Create a uniform distribution.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` unless both bounds are finite and
    /// `lower < upper`.
    pub fn new(lower: f64, upper: f64) -> Result<Self, DistributionError> {
        if !(lower.is_finite() && upper.is_finite() && lower < upper) {
            return Err(DistributionError::InvalidParameter {
                name: "uniform bounds",
                reason: format!("need finite lower < upper, got [{}, {}]", lower, upper),
            });
        }
        Ok(Self { lower, upper })
    }

    /// Uniform on `[0, 1]`.
    pub fn unit() -> Self {
        Self {
            lower: 0.0,
            upper: 1.0,
        }
    }

    /// Lower bound of the support.
    #[inline]
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Upper bound of the support.
    #[inline]
    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Density at `x`; zero outside the support.
    #[inline]
    pub fn density(&self, x: f64) -> f64 {
        if self.lower <= x && x <= self.upper {
            1.0 / (self.upper - self.lower)
        } else {
            0.0
        }
    }

    /// Cumulative probability at `x`.
    #[inline]
    pub fn probability(&self, x: f64) -> f64 {
        if x.is_nan() {
            return f64::NAN;
        }
        ((x - self.lower) / (self.upper - self.lower)).clamp(0.0, 1.0)
    }

    /// Draw one variate.
    pub fn draw(&self, rng: &mut dyn RngCore) -> f64 {
        let u: f64 = rng.gen();
        self.lower + (self.upper - self.lower) * u
    }
}

impl Distribution for Uniform {
    fn dimension(&self) -> usize {
        1
    }

    fn range(&self) -> Interval {
        Interval::new(vec![self.lower], vec![self.upper]).unwrap_or_else(|_| Interval::unbounded(1))
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

impl BaseDistribution for Uniform {
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
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_density_and_cdf() {
        let u = Uniform::new(-1.0, 3.0).unwrap();
        assert_eq!(u.pdf(&[0.0]).unwrap(), 0.25);
        assert_eq!(u.pdf(&[3.5]).unwrap(), 0.0);
        assert_eq!(u.cdf(&[-2.0]).unwrap(), 0.0);
        assert_abs_diff_eq!(u.cdf(&[1.0]).unwrap(), 0.5, epsilon = 1e-15);
        assert_eq!(u.cdf(&[10.0]).unwrap(), 1.0);
        assert!(u.cdf(&[f64::NAN]).unwrap().is_nan());
    }

    #[test]
    fn test_range_is_support() {
        let u = Uniform::new(2.0, 5.0).unwrap();
        assert_eq!(u.range().lower_bound(), &[2.0]);
        assert_eq!(u.range().upper_bound(), &[5.0]);
    }

    #[test]
    fn test_invalid_bounds() {
        assert!(Uniform::new(1.0, 1.0).is_err());
        assert!(Uniform::new(2.0, 1.0).is_err());
        assert!(Uniform::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_samples_within_support() {
        let u = Uniform::new(-2.0, -1.0).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let draws = u.sample(&mut rng, 1_000).unwrap();
        assert!(draws.iter().all(|p| u.range().contains(p)));
    }
}
