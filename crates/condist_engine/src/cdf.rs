//! Conditional CDF estimators.
//!
//! Both estimators answer `P(Y <= y)` for the free sub-vector `Y`:
//!
//! - [`IntegrationEstimator`]: `∫_{range.lower}^{y} base.pdf(expand(t)) dt / factor`
//!   by nested adaptive Gauss-Kronrod quadrature, clamped into `[0, 1]`
//! - [`SamplingEstimator`]: fraction of draws from the free marginal lying in
//!   `(-inf, y]`, independent of the reference values

use crate::expander::InputExpander;
use crate::strategy::SamplingConfig;
use condist_core::math::quadrature::{GaussKronrodIntegrator, QuadratureConfig};
use condist_core::traits::{BaseDistribution, Distribution};
use condist_core::types::{DistributionError, Interval};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::trace;

/// Quadrature estimator of the conditional CDF.
#[derive(Debug, Clone)]
pub struct IntegrationEstimator {
    integrator: GaussKronrodIntegrator,
}

impl IntegrationEstimator {
    /// Estimator with the shared G11/K23 rule and the given budgets.
    pub fn new(config: QuadratureConfig) -> Self {
        Self {
            integrator: GaussKronrodIntegrator::new(config),
        }
    }

    /// Quadrature budgets.
    pub fn config(&self) -> &QuadratureConfig {
        self.integrator.config()
    }

    /// Conditional CDF at `point` (length = free dimension, already checked).
    ///
    /// A coordinate at or below the range's lower bound gives `0.0 / factor`
    /// (exactly `0.0` unless the factor is zero);
    /// coordinates above the upper bound are truncated to it. Budget
    /// exhaustion is logged at trace level and the estimate is kept.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by `base.pdf` during integration.
    pub fn estimate<D>(
        &self,
        base: &D,
        expander: &InputExpander,
        range: &Interval,
        factor: f64,
        point: &[f64],
    ) -> Result<f64, DistributionError>
    where
        D: Distribution + ?Sized,
    {
        DistributionError::check_dimension(range.dimension(), point)?;
        if point.iter().any(|x| x.is_nan()) {
            return Ok(f64::NAN);
        }
        if point
            .iter()
            .zip(range.lower_bound().iter())
            .any(|(&x, &lo)| x <= lo)
        {
            return Ok(0.0 / factor);
        }
        let upper: Vec<f64> = point
            .iter()
            .zip(range.upper_bound().iter())
            .map(|(&x, &hi)| x.min(hi))
            .collect();

        let mut full = vec![0.0; expander.dimension()];
        let mut failure: Option<DistributionError> = None;
        let result = self.integrator.integrate_box(
            |free: &[f64]| {
                expander.scatter(free, &mut full);
                match base.pdf(&full) {
                    Ok(density) => density,
                    Err(err) => {
                        if failure.is_none() {
                            failure = Some(err);
                        }
                        0.0
                    }
                }
            },
            range.lower_bound(),
            &upper,
        );

        if let Some(err) = failure {
            return Err(err);
        }
        if !result.converged {
            trace!(
                ?point,
                value = result.value,
                error_estimate = result.error_estimate,
                evaluations = result.evaluations,
                "conditional cdf quadrature did not converge"
            );
        }

        Ok((result.value / factor).clamp(0.0, 1.0))
    }
}

/// Monte Carlo estimator of the conditional CDF.
///
/// Draws from the marginal of the free coordinates, built once from the base
/// distribution. The draws are not conditioned on the reference values.
pub struct SamplingEstimator {
    marginal: Option<Box<dyn BaseDistribution>>,
    config: SamplingConfig,
}

impl std::fmt::Debug for SamplingEstimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SamplingEstimator")
            .field(
                "marginal_dimension",
                &self.marginal.as_ref().map(|m| m.dimension()),
            )
            .field("config", &self.config)
            .finish()
    }
}

impl SamplingEstimator {
    /// Build the free marginal of `base`.
    ///
    /// With no free coordinates there is nothing to sample and every
    /// estimate is `1.0`.
    ///
    /// # Errors
    ///
    /// Propagates failures of `base.marginal`.
    pub fn new<D>(
        base: &D,
        free_indices: &[usize],
        config: SamplingConfig,
    ) -> Result<Self, DistributionError>
    where
        D: BaseDistribution + ?Sized,
    {
        let marginal = if free_indices.is_empty() {
            None
        } else {
            Some(base.marginal(free_indices)?)
        };
        Ok(Self { marginal, config })
    }

    /// Sampling parameters.
    pub fn config(&self) -> &SamplingConfig {
        &self.config
    }

    /// Fraction of `sample_size` draws lying componentwise at or below
    /// `point`. Not clamped. A NaN coordinate bounds no draw, giving `0.0`.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` for a point of the wrong length and
    /// propagates sampling failures.
    pub fn estimate(&self, point: &[f64]) -> Result<f64, DistributionError> {
        let Some(marginal) = &self.marginal else {
            DistributionError::check_dimension(0, point)?;
            return Ok(1.0);
        };
        DistributionError::check_dimension(marginal.dimension(), point)?;

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let region = Interval::below(point);
        let mut draw = vec![0.0; point.len()];
        let mut hits = 0_usize;
        for _ in 0..self.config.sample_size {
            marginal.sample_into(&mut rng, &mut draw)?;
            if region.contains(&draw) {
                hits += 1;
            }
        }

        Ok(hits as f64 / self.config.sample_size as f64)
    }
}
