//! Distribution capability traits.

use crate::types::{DistributionError, Interval};
use rand::RngCore;
use std::sync::Arc;

/// Default coordinate names `X0, X1, ...`.
///
/// ```
/// use condist_core::traits::default_description;
///
/// assert_eq!(default_description(2), vec!["X0".to_string(), "X1".to_string()]);
/// ```
pub fn default_description(dimension: usize) -> Vec<String> {
    (0..dimension).map(|i| format!("X{}", i)).collect()
}

/// Evaluation interface shared by base distributions and conditional laws.
///
/// Consumers such as plotting utilities only need this trait, so a
/// conditional law composes transparently wherever a base distribution is
/// accepted.
///
/// Implementations must be read-only under evaluation: every method takes
/// `&self` and concurrent calls are allowed.
pub trait Distribution: Send + Sync {
    /// Number of coordinates.
    fn dimension(&self) -> usize;

    /// Bounding box of the support. Bounds may be infinite.
    fn range(&self) -> Interval;

    /// Coordinate names, one per dimension.
    fn description(&self) -> Vec<String> {
        default_description(self.dimension())
    }

    /// Probability density at `point`.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` when `point.len() != dimension()`.
    fn pdf(&self, point: &[f64]) -> Result<f64, DistributionError>;

    /// Cumulative probability `P(X <= point)` componentwise.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` when `point.len() != dimension()`.
    fn cdf(&self, point: &[f64]) -> Result<f64, DistributionError>;
}

/// A distribution the conditioning engine can decompose.
///
/// Adds marginalisation and i.i.d. sampling on top of [`Distribution`].
/// Marginals are returned behind dynamic dispatch since their concrete
/// family is chosen by the implementation.
pub trait BaseDistribution: Distribution {
    /// Marginal law of the coordinates in `indices`, in the order given.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` or `DuplicateIndex` for invalid indices.
    fn marginal(&self, indices: &[usize]) -> Result<Box<dyn BaseDistribution>, DistributionError>;

    /// Draw one point into `out`.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` when `out.len() != dimension()`.
    fn sample_into(&self, rng: &mut dyn RngCore, out: &mut [f64]) -> Result<(), DistributionError>;

    /// Draw `size` i.i.d. points.
    fn sample(
        &self,
        rng: &mut dyn RngCore,
        size: usize,
    ) -> Result<Vec<Vec<f64>>, DistributionError> {
        let mut points = Vec::with_capacity(size);
        for _ in 0..size {
            let mut point = vec![0.0; self.dimension()];
            self.sample_into(rng, &mut point)?;
            points.push(point);
        }
        Ok(points)
    }
}

impl<D: Distribution + ?Sized> Distribution for Box<D> {
    fn dimension(&self) -> usize {
        (**self).dimension()
    }

    fn range(&self) -> Interval {
        (**self).range()
    }

    fn description(&self) -> Vec<String> {
        (**self).description()
    }

    fn pdf(&self, point: &[f64]) -> Result<f64, DistributionError> {
        (**self).pdf(point)
    }

    fn cdf(&self, point: &[f64]) -> Result<f64, DistributionError> {
        (**self).cdf(point)
    }
}

impl<D: BaseDistribution + ?Sized> BaseDistribution for Box<D> {
    fn marginal(&self, indices: &[usize]) -> Result<Box<dyn BaseDistribution>, DistributionError> {
        (**self).marginal(indices)
    }

    fn sample_into(&self, rng: &mut dyn RngCore, out: &mut [f64]) -> Result<(), DistributionError> {
        (**self).sample_into(rng, out)
    }
}

impl<D: Distribution + ?Sized> Distribution for Arc<D> {
    fn dimension(&self) -> usize {
        (**self).dimension()
    }

    fn range(&self) -> Interval {
        (**self).range()
    }

    fn description(&self) -> Vec<String> {
        (**self).description()
    }

    fn pdf(&self, point: &[f64]) -> Result<f64, DistributionError> {
        (**self).pdf(point)
    }

    fn cdf(&self, point: &[f64]) -> Result<f64, DistributionError> {
        (**self).cdf(point)
    }
}

impl<D: BaseDistribution + ?Sized> BaseDistribution for Arc<D> {
    fn marginal(&self, indices: &[usize]) -> Result<Box<dyn BaseDistribution>, DistributionError> {
        (**self).marginal(indices)
    }

    fn sample_into(&self, rng: &mut dyn RngCore, out: &mut [f64]) -> Result<(), DistributionError> {
        (**self).sample_into(rng, out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// Uniform law on the unit square, enough to exercise the provided methods.
    struct UnitSquare;

    impl Distribution for UnitSquare {
        fn dimension(&self) -> usize {
            2
        }

        fn range(&self) -> Interval {
            Interval::new(vec![0.0, 0.0], vec![1.0, 1.0]).unwrap()
        }

        fn pdf(&self, point: &[f64]) -> Result<f64, DistributionError> {
            DistributionError::check_dimension(2, point)?;
            Ok(if self.range().contains(point) { 1.0 } else { 0.0 })
        }

        fn cdf(&self, point: &[f64]) -> Result<f64, DistributionError> {
            DistributionError::check_dimension(2, point)?;
            Ok(point.iter().map(|x| x.clamp(0.0, 1.0)).product())
        }
    }

    impl BaseDistribution for UnitSquare {
        fn marginal(
            &self,
            _indices: &[usize],
        ) -> Result<Box<dyn BaseDistribution>, DistributionError> {
            Err(DistributionError::Unsupported("marginal".to_string()))
        }

        fn sample_into(
            &self,
            rng: &mut dyn RngCore,
            out: &mut [f64],
        ) -> Result<(), DistributionError> {
            DistributionError::check_dimension(2, out)?;
            for x in out.iter_mut() {
                *x = rng.gen();
            }
            Ok(())
        }
    }

    #[test]
    fn test_default_description() {
        assert!(default_description(0).is_empty());
        assert_eq!(UnitSquare.description(), vec!["X0", "X1"]);
    }

    #[test]
    fn test_sample_provided_method() {
        let mut rng = StdRng::seed_from_u64(7);
        let points = UnitSquare.sample(&mut rng, 50).unwrap();
        assert_eq!(points.len(), 50);
        assert!(points.iter().all(|p| UnitSquare.range().contains(p)));
    }

    #[test]
    fn test_boxed_and_shared_forwarding() {
        let boxed: Box<dyn BaseDistribution> = Box::new(UnitSquare);
        assert_eq!(boxed.dimension(), 2);
        assert_eq!(boxed.pdf(&[0.5, 0.5]).unwrap(), 1.0);
        assert!(boxed.marginal(&[0]).is_err());

        let shared: Arc<dyn BaseDistribution> = Arc::new(UnitSquare);
        assert_eq!(shared.cdf(&[0.5, 0.5]).unwrap(), 0.25);
        assert!(shared.pdf(&[0.5]).is_err());
    }
}
