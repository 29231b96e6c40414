//! CDF estimation strategy selection.

use crate::error::ConfigError;
use condist_core::math::quadrature::QuadratureConfig;

/// Default number of Monte Carlo draws per CDF query.
pub const DEFAULT_SAMPLE_SIZE: usize = 100_000;

/// Monte Carlo estimator parameters.
///
/// With `seed == None` every query draws from a freshly entropy-seeded
/// generator. A fixed seed makes each query reproducible and reuses the same
/// draws for every query point.
///
/// # Example
///
/// ```
/// use condist_engine::strategy::SamplingConfig;
///
/// let config = SamplingConfig::new(10_000).with_seed(42);
/// assert_eq!(config.sample_size, 10_000);
/// assert_eq!(config.seed, Some(42));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SamplingConfig {
    /// Number of draws per query.
    pub sample_size: usize,
    /// Optional seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            sample_size: DEFAULT_SAMPLE_SIZE,
            seed: None,
        }
    }
}

impl SamplingConfig {
    /// Unseeded configuration with `sample_size` draws per query.
    pub fn new(sample_size: usize) -> Self {
        Self {
            sample_size,
            seed: None,
        }
    }

    /// Fix the seed.
    #[inline]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check the sample size.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSampleSize` when `sample_size == 0`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_size == 0 {
            return Err(ConfigError::InvalidSampleSize(self.sample_size));
        }
        Ok(())
    }
}

/// How the conditional CDF is estimated, chosen once at construction.
///
/// - `Integration`: nested adaptive Gauss-Kronrod quadrature of the
///   conditional density. Deterministic; clamped into `[0, 1]`.
/// - `Sampling`: fraction of draws from the unconditioned marginal of the
///   free coordinates lying below the query point. Ignores the reference
///   values, so it matches `Integration` only when the fixed and free blocks
///   are independent.
///
/// # Example
///
/// ```
/// use condist_engine::strategy::CdfStrategy;
///
/// assert!(CdfStrategy::default().is_integration());
/// assert!(CdfStrategy::sampling(0).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "method", rename_all = "snake_case"))]
pub enum CdfStrategy {
    /// Nested adaptive quadrature.
    Integration(QuadratureConfig),
    /// Monte Carlo over the free marginal.
    Sampling(SamplingConfig),
}

impl Default for CdfStrategy {
    fn default() -> Self {
        CdfStrategy::Integration(QuadratureConfig::default())
    }
}

impl CdfStrategy {
    /// Integration with explicit budgets.
    pub fn integration(max_sub_intervals: usize, max_absolute_error: f64) -> Self {
        CdfStrategy::Integration(QuadratureConfig {
            max_sub_intervals,
            max_absolute_error,
        })
    }

    /// Unseeded sampling with `sample_size` draws per query.
    pub fn sampling(sample_size: usize) -> Self {
        CdfStrategy::Sampling(SamplingConfig::new(sample_size))
    }

    /// Returns true for the quadrature strategy.
    pub fn is_integration(&self) -> bool {
        matches!(self, CdfStrategy::Integration(_))
    }

    /// Short name used in logs and reports.
    pub fn name(&self) -> &'static str {
        match self {
            CdfStrategy::Integration(_) => "integration",
            CdfStrategy::Sampling(_) => "sampling",
        }
    }

    /// Validate the strategy parameters.
    ///
    /// # Errors
    ///
    /// - `InvalidSubIntervals`: `max_sub_intervals == 0`
    /// - `InvalidErrorTarget`: error target not positive and finite
    /// - `InvalidSampleSize`: `sample_size == 0`
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            CdfStrategy::Integration(config) => {
                if config.max_sub_intervals == 0 {
                    return Err(ConfigError::InvalidSubIntervals(config.max_sub_intervals));
                }
                if !(config.max_absolute_error.is_finite() && config.max_absolute_error > 0.0) {
                    return Err(ConfigError::InvalidErrorTarget(config.max_absolute_error));
                }
                Ok(())
            }
            CdfStrategy::Sampling(config) => config.validate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SamplingConfig::default();
        assert_eq!(config.sample_size, 100_000);
        assert_eq!(config.seed, None);

        match CdfStrategy::default() {
            CdfStrategy::Integration(q) => {
                assert_eq!(q.max_sub_intervals, 100);
                assert_eq!(q.max_absolute_error, 1e-12);
            }
            other => panic!("unexpected default {:?}", other),
        }
    }

    #[test]
    fn test_validate_integration() {
        assert!(CdfStrategy::integration(50, 1e-8).validate().is_ok());
        assert_eq!(
            CdfStrategy::integration(0, 1e-8).validate(),
            Err(ConfigError::InvalidSubIntervals(0))
        );
        assert_eq!(
            CdfStrategy::integration(10, 0.0).validate(),
            Err(ConfigError::InvalidErrorTarget(0.0))
        );
        assert!(CdfStrategy::integration(10, f64::INFINITY).validate().is_err());
        assert!(CdfStrategy::integration(10, f64::NAN).validate().is_err());
    }

    #[test]
    fn test_validate_sampling() {
        assert!(CdfStrategy::sampling(1).validate().is_ok());
        assert_eq!(
            CdfStrategy::sampling(0).validate(),
            Err(ConfigError::InvalidSampleSize(0))
        );
    }

    #[test]
    fn test_names() {
        assert_eq!(CdfStrategy::default().name(), "integration");
        assert_eq!(CdfStrategy::sampling(10).name(), "sampling");
        assert!(!CdfStrategy::sampling(10).is_integration());
    }
}
