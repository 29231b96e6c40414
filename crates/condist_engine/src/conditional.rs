//! Conditional distribution facade.

use crate::cdf::{IntegrationEstimator, SamplingEstimator};
use crate::error::ConditioningError;
use crate::expander::InputExpander;
use crate::mask::ConditioningMask;
use crate::normalization::normalization_factor;
use crate::range::reduce_range;
use crate::strategy::CdfStrategy;
use condist_core::traits::{BaseDistribution, Distribution};
use condist_core::types::{DistributionError, Interval};
use rayon::prelude::*;
use tracing::debug;

#[derive(Debug)]
enum CdfEstimator {
    Integration(IntegrationEstimator),
    Sampling(SamplingEstimator),
}

/// Law of the free coordinates of `base` given the fixed coordinates at
/// their reference values.
///
/// Everything derived from the construction parameters (mask, expander,
/// range, normalisation factor, CDF estimator) is computed once in
/// [`new`](Self::new); queries only read it, so `pdf` and `cdf` may be called
/// concurrently.
///
/// - `pdf(y) = base.pdf(expand(y)) / factor`
/// - `cdf(y)` per the chosen [`CdfStrategy`]
///
/// With no fixed coordinates both delegate to `base` unchanged.
///
/// # Example
///
/// ```
/// use condist_core::traits::Distribution;
/// use condist_engine::conditional::ConditionalDistribution;
/// use condist_engine::strategy::CdfStrategy;
/// use condist_models::composed::ComposedDistribution;
///
/// let base = ComposedDistribution::standard_normal(3).unwrap();
/// let conditional =
///     ConditionalDistribution::new(base, vec![1], vec![2.0], CdfStrategy::default()).unwrap();
///
/// assert_eq!(conditional.dimension(), 2);
/// assert_eq!(conditional.description(), vec!["X0".to_string(), "X2".to_string()]);
///
/// let cdf = conditional.cdf(&[1.0, 1.0]).unwrap();
/// assert!((cdf - 0.707_860_981_737_125_2).abs() < 1e-9);
/// ```
#[derive(Debug)]
pub struct ConditionalDistribution<D: BaseDistribution> {
    base: D,
    mask: ConditioningMask,
    expander: InputExpander,
    range: Interval,
    factor: f64,
    strategy: CdfStrategy,
    estimator: CdfEstimator,
    description: Vec<String>,
}

impl<D: BaseDistribution> ConditionalDistribution<D> {
    /// Condition `base` on `fixed_indices` taking `reference_values`.
    ///
    /// # Errors
    ///
    /// - `ReferenceLengthMismatch`: one reference value per fixed index needed
    /// - `Distribution(IndexOutOfRange | DuplicateIndex)`: invalid fixed indices
    /// - `InvalidStrategy`: rejected strategy parameters
    /// - `Distribution(..)`: failures building the marginals or evaluating the
    ///   normalisation factor
    pub fn new(
        base: D,
        fixed_indices: Vec<usize>,
        reference_values: Vec<f64>,
        strategy: CdfStrategy,
    ) -> Result<Self, ConditioningError> {
        if fixed_indices.len() != reference_values.len() {
            return Err(ConditioningError::ReferenceLengthMismatch {
                indices: fixed_indices.len(),
                values: reference_values.len(),
            });
        }
        let mask = ConditioningMask::new(base.dimension(), &fixed_indices)?;
        strategy.validate()?;

        let expander = InputExpander::new(&mask, reference_values)?;
        let range = reduce_range(&base.range(), &mask)?;
        let factor = normalization_factor(&base, mask.fixed_indices(), expander.reference())?;

        let estimator = match strategy {
            CdfStrategy::Integration(config) => {
                CdfEstimator::Integration(IntegrationEstimator::new(config))
            }
            CdfStrategy::Sampling(config) => CdfEstimator::Sampling(SamplingEstimator::new(
                &base,
                mask.free_indices(),
                config,
            )?),
        };

        let names = base.description();
        let description = mask
            .free_indices()
            .iter()
            .map(|&i| names.get(i).cloned().unwrap_or_else(|| format!("X{}", i)))
            .collect();

        debug!(
            dimension = mask.dimension(),
            fixed = ?mask.fixed_indices(),
            free_dimension = mask.free_dimension(),
            factor,
            strategy = strategy.name(),
            "built conditional distribution"
        );

        Ok(Self {
            base,
            mask,
            expander,
            range,
            factor,
            strategy,
            estimator,
            description,
        })
    }

    /// The unconditioned distribution.
    pub fn base(&self) -> &D {
        &self.base
    }

    /// Fixed indices, in construction order.
    pub fn fixed_indices(&self) -> &[usize] {
        self.mask.fixed_indices()
    }

    /// Free indices, ascending.
    pub fn free_indices(&self) -> &[usize] {
        self.mask.free_indices()
    }

    /// Values of the fixed coordinates.
    pub fn reference_values(&self) -> &[f64] {
        self.expander.reference()
    }

    /// Density of the fixed marginal at the reference values (`1.0` when
    /// nothing is fixed).
    pub fn normalization_factor(&self) -> f64 {
        self.factor
    }

    /// CDF strategy chosen at construction.
    pub fn strategy(&self) -> &CdfStrategy {
        &self.strategy
    }

    /// Full base-space point for a free point.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` for a point of the wrong length.
    pub fn expand(&self, point: &[f64]) -> Result<Vec<f64>, DistributionError> {
        self.expander.expand(point)
    }

    /// [`pdf`](Distribution::pdf) over many points in parallel.
    pub fn pdf_batch<P>(&self, points: &[P]) -> Vec<Result<f64, DistributionError>>
    where
        P: AsRef<[f64]> + Sync,
    {
        points.par_iter().map(|p| self.pdf(p.as_ref())).collect()
    }

    /// [`cdf`](Distribution::cdf) over many points in parallel.
    pub fn cdf_batch<P>(&self, points: &[P]) -> Vec<Result<f64, DistributionError>>
    where
        P: AsRef<[f64]> + Sync,
    {
        points.par_iter().map(|p| self.cdf(p.as_ref())).collect()
    }
}

impl<D: BaseDistribution> Distribution for ConditionalDistribution<D> {
    fn dimension(&self) -> usize {
        self.mask.free_dimension()
    }

    fn range(&self) -> Interval {
        self.range.clone()
    }

    fn description(&self) -> Vec<String> {
        self.description.clone()
    }

    fn pdf(&self, point: &[f64]) -> Result<f64, DistributionError> {
        DistributionError::check_dimension(self.dimension(), point)?;
        if self.mask.is_unconditioned() {
            return self.base.pdf(point);
        }
        let full = self.expander.expand(point)?;
        Ok(self.base.pdf(&full)? / self.factor)
    }

    fn cdf(&self, point: &[f64]) -> Result<f64, DistributionError> {
        DistributionError::check_dimension(self.dimension(), point)?;
        if self.mask.is_unconditioned() {
            return self.base.cdf(point);
        }
        match &self.estimator {
            CdfEstimator::Integration(estimator) => {
                estimator.estimate(&self.base, &self.expander, &self.range, self.factor, point)
            }
            CdfEstimator::Sampling(estimator) => estimator.estimate(point),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::strategy::SamplingConfig;
    use approx::assert_relative_eq;
    use condist_models::composed::ComposedDistribution;
    use condist_models::univariate::Normal;

    fn standard(dimension: usize) -> ComposedDistribution {
        ComposedDistribution::standard_normal(dimension).unwrap()
    }

    #[test]
    fn test_construction_rejects_length_mismatch() {
        let err = ConditionalDistribution::new(standard(3), vec![0, 1], vec![1.0], CdfStrategy::default())
            .unwrap_err();
        assert_eq!(
            err,
            ConditioningError::ReferenceLengthMismatch {
                indices: 2,
                values: 1
            }
        );
    }

    #[test]
    fn test_construction_rejects_bad_indices() {
        let err = ConditionalDistribution::new(standard(3), vec![3], vec![1.0], CdfStrategy::default())
            .unwrap_err();
        assert!(matches!(
            err,
            ConditioningError::Distribution(DistributionError::IndexOutOfRange { index: 3, .. })
        ));

        let err = ConditionalDistribution::new(
            standard(3),
            vec![2, 2],
            vec![1.0, 1.0],
            CdfStrategy::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConditioningError::Distribution(DistributionError::DuplicateIndex(2))
        ));
    }

    #[test]
    fn test_construction_rejects_bad_strategy() {
        let err = ConditionalDistribution::new(standard(2), vec![0], vec![0.0], CdfStrategy::sampling(0))
            .unwrap_err();
        assert_eq!(
            err,
            ConditioningError::InvalidStrategy(ConfigError::InvalidSampleSize(0))
        );

        let err = ConditionalDistribution::new(
            standard(2),
            vec![0],
            vec![0.0],
            CdfStrategy::integration(0, 1e-10),
        )
        .unwrap_err();
        assert!(matches!(err, ConditioningError::InvalidStrategy(_)));
    }

    #[test]
    fn test_accessors() {
        let conditional = ConditionalDistribution::new(
            standard(4),
            vec![3, 1],
            vec![0.5, -0.5],
            CdfStrategy::Sampling(SamplingConfig::new(100).with_seed(1)),
        )
        .unwrap();
        assert_eq!(conditional.fixed_indices(), &[3, 1]);
        assert_eq!(conditional.free_indices(), &[0, 2]);
        assert_eq!(conditional.reference_values(), &[0.5, -0.5]);
        assert_eq!(conditional.strategy().name(), "sampling");
        assert_eq!(conditional.base().dimension(), 4);
        assert_eq!(
            conditional.expand(&[1.0, 2.0]).unwrap(),
            vec![1.0, -0.5, 2.0, 0.5]
        );
        let n = Normal::standard();
        assert_relative_eq!(
            conditional.normalization_factor(),
            n.density(0.5) * n.density(-0.5),
            max_relative = 1e-15
        );
    }

    #[test]
    fn test_query_dimension_checked() {
        let conditional =
            ConditionalDistribution::new(standard(3), vec![1], vec![0.0], CdfStrategy::default()).unwrap();
        assert_eq!(
            conditional.pdf(&[1.0]),
            Err(DistributionError::DimensionMismatch {
                expected: 2,
                got: 1
            })
        );
        assert!(conditional.cdf(&[1.0, 2.0, 3.0]).is_err());
    }

    #[test]
    fn test_description_uses_base_names() {
        let base = standard(3)
            .with_description(vec!["rate".into(), "spot".into(), "vol".into()])
            .unwrap();
        let conditional =
            ConditionalDistribution::new(base, vec![1], vec![0.0], CdfStrategy::default()).unwrap();
        assert_eq!(
            conditional.description(),
            vec!["rate".to_string(), "vol".to_string()]
        );
    }

    #[test]
    fn test_batch_matches_single_queries() {
        let conditional =
            ConditionalDistribution::new(standard(2), vec![0], vec![0.3], CdfStrategy::default()).unwrap();
        let points = vec![vec![-1.0], vec![0.0], vec![1.0], vec![0.0, 1.0]];

        let pdfs = conditional.pdf_batch(&points);
        let cdfs = conditional.cdf_batch(&points);
        assert_eq!(pdfs.len(), 4);
        for (i, point) in points.iter().take(3).enumerate() {
            assert_eq!(pdfs[i], conditional.pdf(point));
            assert_eq!(cdfs[i], conditional.cdf(point));
        }
        assert!(pdfs[3].is_err());
        assert!(cdfs[3].is_err());
    }
}
