//! Support of the free sub-vector.

use crate::mask::ConditioningMask;
use condist_core::types::{DistributionError, Interval};

/// Bounding box of the free coordinates: the base box with the fixed
/// coordinates dropped, original order kept.
///
/// This is the range of the unconditioned marginal. Under dependence the
/// conditional support can be strictly smaller.
///
/// # Errors
///
/// Returns `DimensionMismatch` when the base box does not match the mask.
///
/// # Example
///
/// ```
/// use condist_core::types::Interval;
/// use condist_engine::mask::ConditioningMask;
/// use condist_engine::range::reduce_range;
///
/// let base = Interval::new(vec![0.0, 1.0, 2.0], vec![10.0, 11.0, 12.0]).unwrap();
/// let mask = ConditioningMask::new(3, &[1]).unwrap();
///
/// let reduced = reduce_range(&base, &mask).unwrap();
/// assert_eq!(reduced.lower_bound(), &[0.0, 2.0]);
/// assert_eq!(reduced.upper_bound(), &[10.0, 12.0]);
/// ```
pub fn reduce_range(
    base_range: &Interval,
    mask: &ConditioningMask,
) -> Result<Interval, DistributionError> {
    if base_range.dimension() != mask.dimension() {
        return Err(DistributionError::DimensionMismatch {
            expected: mask.dimension(),
            got: base_range.dimension(),
        });
    }
    base_range.select(mask.free_indices())
}
