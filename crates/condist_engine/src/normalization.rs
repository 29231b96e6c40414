//! Normalisation constant of the conditional density.

use condist_core::traits::BaseDistribution;
use condist_core::types::DistributionError;

/// Density of the fixed-coordinate marginal at the reference values.
///
/// Returns exactly `1.0` when nothing is fixed. A zero factor is returned
/// as-is; conditional densities divided by it become `inf` or `NaN`.
///
/// # Errors
///
/// Propagates failures of `marginal` and of the marginal's `pdf`.
///
/// # Example
///
/// ```
/// use condist_engine::normalization::normalization_factor;
/// use condist_models::composed::ComposedDistribution;
///
/// let base = ComposedDistribution::standard_normal(3).unwrap();
/// assert_eq!(normalization_factor(&base, &[], &[]).unwrap(), 1.0);
///
/// // φ(2)
/// let factor = normalization_factor(&base, &[1], &[2.0]).unwrap();
/// assert!((factor - 0.053_990_966_513_188_06).abs() < 1e-15);
/// ```
pub fn normalization_factor<D>(
    base: &D,
    fixed_indices: &[usize],
    reference: &[f64],
) -> Result<f64, DistributionError>
where
    D: BaseDistribution + ?Sized,
{
    if fixed_indices.is_empty() {
        return Ok(1.0);
    }
    base.marginal(fixed_indices)?.pdf(reference)
}
