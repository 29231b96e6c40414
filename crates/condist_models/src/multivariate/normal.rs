//! Correlated multivariate normal distribution.

use super::correlation::{CholeskyFactor, CorrelationMatrix};
use crate::univariate::{standard_pdf, NORMAL_RANGE_QUANTILE};
use condist_core::math::quadrature::{GaussKronrodIntegrator, QuadratureConfig};
use condist_core::traits::{default_description, BaseDistribution, Distribution};
use condist_core::types::{DistributionError, Interval};
use rand::{Rng, RngCore};
use rand_distr::StandardNormal;
use statrs::function::erf::erfc;
use std::f64::consts::SQRT_2;

/// Multivariate normal `N(μ, D C D)` with `D = diag(σ)` and correlation `C`.
///
/// The density is evaluated through the Cholesky factor of `C`. There is no
/// closed-form joint CDF above one dimension, so [`cdf`](Distribution::cdf)
/// integrates the density over the truncated support with nested
/// Gauss-Kronrod quadrature.
///
/// # Example
///
/// ```
/// use condist_core::traits::{BaseDistribution, Distribution};
/// use condist_models::multivariate::{CorrelationMatrix, MultivariateNormal};
///
/// let corr = CorrelationMatrix::new(&[1.0, 0.5, 0.5, 1.0], 2).unwrap();
/// let mvn = MultivariateNormal::new(vec![0.0, 1.0], vec![1.0, 2.0], corr).unwrap();
///
/// let marginal = mvn.marginal(&[1]).unwrap();
/// assert!((marginal.cdf(&[1.0]).unwrap() - 0.5).abs() < 1e-15);
/// ```
#[derive(Debug, Clone)]
pub struct MultivariateNormal {
    mean: Vec<f64>,
    std_devs: Vec<f64>,
    correlation: CorrelationMatrix,
    cholesky: CholeskyFactor,
    description: Vec<String>,
    quadrature: QuadratureConfig,
}

impl MultivariateNormal {
    /// Create a multivariate normal from means, standard deviations and a
    /// correlation matrix.
    ///
    /// # Errors
    ///
    /// - `DimensionMismatch` if the parameter lengths disagree
    /// - `InvalidParameter` for an empty mean, non-finite means, non-positive
    ///   standard deviations or a correlation that is not positive definite
    pub fn new(
        mean: Vec<f64>,
        std_devs: Vec<f64>,
        correlation: CorrelationMatrix,
    ) -> Result<Self, DistributionError> {
        if mean.is_empty() {
            return Err(DistributionError::InvalidParameter {
                name: "mean",
                reason: "at least one coordinate is required".to_string(),
            });
        }
        DistributionError::check_dimension(mean.len(), &std_devs)?;
        if correlation.dim() != mean.len() {
            return Err(DistributionError::DimensionMismatch {
                expected: mean.len(),
                got: correlation.dim(),
            });
        }
        if let Some(m) = mean.iter().find(|m| !m.is_finite()) {
            return Err(DistributionError::InvalidParameter {
                name: "mean",
                reason: format!("must be finite, got {}", m),
            });
        }
        if let Some(s) = std_devs.iter().find(|s| !(s.is_finite() && **s > 0.0)) {
            return Err(DistributionError::InvalidParameter {
                name: "std_devs",
                reason: format!("must be positive and finite, got {}", s),
            });
        }

        let cholesky = correlation.cholesky()?;
        let description = default_description(mean.len());
        Ok(Self {
            mean,
            std_devs,
            correlation,
            cholesky,
            description,
            quadrature: QuadratureConfig::default(),
        })
    }

    /// Independent standard normals.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` when `dimension == 0`.
    pub fn standard(dimension: usize) -> Result<Self, DistributionError> {
        Self::new(
            vec![0.0; dimension],
            vec![1.0; dimension],
            CorrelationMatrix::identity(dimension),
        )
    }

    /// Replace the coordinate names.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` for the wrong number of names.
    pub fn with_description(mut self, names: Vec<String>) -> Result<Self, DistributionError> {
        if names.len() != self.mean.len() {
            return Err(DistributionError::DimensionMismatch {
                expected: self.mean.len(),
                got: names.len(),
            });
        }
        self.description = names;
        Ok(self)
    }

    /// Budgets for the quadrature behind [`cdf`](Distribution::cdf).
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for invalid budgets.
    pub fn with_quadrature(mut self, config: QuadratureConfig) -> Result<Self, DistributionError> {
        config.validate()?;
        self.quadrature = config;
        Ok(self)
    }

    /// Mean vector.
    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    /// Marginal standard deviations.
    pub fn std_devs(&self) -> &[f64] {
        &self.std_devs
    }

    /// Correlation matrix.
    pub fn correlation(&self) -> &CorrelationMatrix {
        &self.correlation
    }

    /// Density at `point`, using `scratch` (length `dimension`) as workspace.
    fn density_with(&self, point: &[f64], scratch: &mut [f64]) -> f64 {
        for (i, z) in scratch.iter_mut().enumerate() {
            *z = (point[i] - self.mean[i]) / self.std_devs[i];
        }
        self.cholesky.solve_lower_inplace(scratch);

        let kernel: f64 = scratch.iter().map(|&y| standard_pdf(y)).product();
        let scale: f64 = self.cholesky.diagonal_product() * self.std_devs.iter().product::<f64>();
        kernel / scale
    }
}

impl Distribution for MultivariateNormal {
    fn dimension(&self) -> usize {
        self.mean.len()
    }

    fn range(&self) -> Interval {
        let (lower, upper): (Vec<f64>, Vec<f64>) = self
            .mean
            .iter()
            .zip(self.std_devs.iter())
            .map(|(&m, &s)| (m - NORMAL_RANGE_QUANTILE * s, m + NORMAL_RANGE_QUANTILE * s))
            .unzip();
        Interval::new(lower, upper).unwrap_or_else(|_| Interval::unbounded(self.dimension()))
    }

    fn description(&self) -> Vec<String> {
        self.description.clone()
    }

    fn pdf(&self, point: &[f64]) -> Result<f64, DistributionError> {
        DistributionError::check_dimension(self.dimension(), point)?;
        let mut scratch = vec![0.0; self.dimension()];
        Ok(self.density_with(point, &mut scratch))
    }

    fn cdf(&self, point: &[f64]) -> Result<f64, DistributionError> {
        DistributionError::check_dimension(self.dimension(), point)?;

        if self.dimension() == 1 {
            let z = (point[0] - self.mean[0]) / self.std_devs[0];
            return Ok(0.5 * erfc(-z / SQRT_2));
        }

        if point.iter().any(|x| x.is_nan()) {
            return Ok(f64::NAN);
        }
        let range = self.range();
        if point
            .iter()
            .zip(range.lower_bound().iter())
            .any(|(&x, &lo)| x <= lo)
        {
            return Ok(0.0);
        }
        let upper: Vec<f64> = point
            .iter()
            .zip(range.upper_bound().iter())
            .map(|(&x, &hi)| x.min(hi))
            .collect();

        let integrator = GaussKronrodIntegrator::new(self.quadrature);
        let mut scratch = vec![0.0; self.dimension()];
        let result = integrator.integrate_box(
            |p: &[f64]| self.density_with(p, &mut scratch),
            range.lower_bound(),
            &upper,
        );
        Ok(result.value.clamp(0.0, 1.0))
    }
}

impl BaseDistribution for MultivariateNormal {
    fn marginal(&self, indices: &[usize]) -> Result<Box<dyn BaseDistribution>, DistributionError> {
        DistributionError::check_indices(self.dimension(), indices)?;
        if indices.is_empty() {
            return Err(DistributionError::Unsupported(
                "marginal over no coordinates".to_string(),
            ));
        }
        let marginal = Self::new(
            indices.iter().map(|&i| self.mean[i]).collect(),
            indices.iter().map(|&i| self.std_devs[i]).collect(),
            self.correlation.select(indices)?,
        )?
        .with_description(indices.iter().map(|&i| self.description[i].clone()).collect())?
        .with_quadrature(self.quadrature)?;
        Ok(Box::new(marginal))
    }

    fn sample_into(&self, rng: &mut dyn RngCore, out: &mut [f64]) -> Result<(), DistributionError> {
        DistributionError::check_dimension(self.dimension(), out)?;
        for z in out.iter_mut() {
            *z = rng.sample(StandardNormal);
        }
        self.cholesky.transform_inplace(out);
        for ((x, &m), &s) in out.iter_mut().zip(self.mean.iter()).zip(self.std_devs.iter()) {
            *x = m + s * *x;
        }
        Ok(())
    }
}
