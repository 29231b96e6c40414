//! Independent products of univariate marginals.

use crate::univariate::Univariate;
use condist_core::traits::{default_description, BaseDistribution, Distribution};
use condist_core::types::{DistributionError, Interval};
use rand::RngCore;

/// Joint law of independent univariate components.
///
/// The density and cumulative probability factorise over the components;
/// marginals keep the selected components and their names.
///
/// # Example
///
/// ```
/// use condist_core::traits::Distribution;
/// use condist_models::composed::ComposedDistribution;
/// use condist_models::univariate::{Normal, Uniform};
///
/// let joint = ComposedDistribution::new(vec![
///     Normal::standard().into(),
///     Uniform::new(0.0, 2.0).unwrap().into(),
/// ])
/// .unwrap();
///
/// let pdf = joint.pdf(&[0.0, 1.0]).unwrap();
/// assert!((pdf - 0.398_942_280_401_432_7 * 0.5).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComposedDistribution {
    components: Vec<Univariate>,
    description: Vec<String>,
}

impl ComposedDistribution {
    /// Compose independent components; coordinates are named `X0, X1, ...`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` when `components` is empty.
    pub fn new(components: Vec<Univariate>) -> Result<Self, DistributionError> {
        if components.is_empty() {
            return Err(DistributionError::InvalidParameter {
                name: "components",
                reason: "at least one component is required".to_string(),
            });
        }
        let description = default_description(components.len());
        Ok(Self {
            components,
            description,
        })
    }

    /// `dimension` independent standard normals.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` when `dimension == 0`.
    pub fn standard_normal(dimension: usize) -> Result<Self, DistributionError> {
        Self::new(vec![Univariate::Normal(crate::univariate::Normal::standard()); dimension])
    }

    /// Replace the coordinate names.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` when the number of names differs from the
    /// number of components.
    pub fn with_description(mut self, names: Vec<String>) -> Result<Self, DistributionError> {
        if names.len() != self.components.len() {
            return Err(DistributionError::DimensionMismatch {
                expected: self.components.len(),
                got: names.len(),
            });
        }
        self.description = names;
        Ok(self)
    }

    /// Components in coordinate order.
    pub fn components(&self) -> &[Univariate] {
        &self.components
    }
}

impl Distribution for ComposedDistribution {
    fn dimension(&self) -> usize {
        self.components.len()
    }

    fn range(&self) -> Interval {
        let (lower, upper): (Vec<f64>, Vec<f64>) =
            self.components.iter().map(|c| c.bounds()).unzip();
        Interval::new(lower, upper).unwrap_or_else(|_| Interval::unbounded(self.dimension()))
    }

    fn description(&self) -> Vec<String> {
        self.description.clone()
    }

    fn pdf(&self, point: &[f64]) -> Result<f64, DistributionError> {
        DistributionError::check_dimension(self.dimension(), point)?;
        Ok(self
            .components
            .iter()
            .zip(point.iter())
            .map(|(c, &x)| c.density(x))
            .product())
    }

    fn cdf(&self, point: &[f64]) -> Result<f64, DistributionError> {
        DistributionError::check_dimension(self.dimension(), point)?;
        Ok(self
            .components
            .iter()
            .zip(point.iter())
            .map(|(c, &x)| c.probability(x))
            .product())
    }
}

impl BaseDistribution for ComposedDistribution {
    fn marginal(&self, indices: &[usize]) -> Result<Box<dyn BaseDistribution>, DistributionError> {
        DistributionError::check_indices(self.dimension(), indices)?;
        if indices.is_empty() {
            return Err(DistributionError::Unsupported(
                "marginal over no coordinates".to_string(),
            ));
        }
        Ok(Box::new(Self {
            components: indices.iter().map(|&i| self.components[i]).collect(),
            description: indices.iter().map(|&i| self.description[i].clone()).collect(),
        }))
    }

    fn sample_into(&self, rng: &mut dyn RngCore, out: &mut [f64]) -> Result<(), DistributionError> {
        DistributionError::check_dimension(self.dimension(), out)?;
        for (c, x) in self.components.iter().zip(out.iter_mut()) {
            *x = c.draw(rng);
        }
        Ok(())
    }
}
