//! Fixed/free partition of the coordinates.

use condist_core::types::DistributionError;

/// Which coordinates of a `dimension`-dimensional point are held fixed.
///
/// Fixed indices keep the order they were given in; reference values are
/// matched to them positionally. Free indices are the remaining coordinates
/// in ascending order.
///
/// # Example
///
/// ```
/// use condist_engine::mask::ConditioningMask;
///
/// let mask = ConditioningMask::new(4, &[3, 1]).unwrap();
/// assert_eq!(mask.as_slice(), &[false, true, false, true]);
/// assert_eq!(mask.fixed_indices(), &[3, 1]);
/// assert_eq!(mask.free_indices(), &[0, 2]);
/// assert_eq!(mask.free_dimension(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditioningMask {
    mask: Vec<bool>,
    fixed: Vec<usize>,
    free: Vec<usize>,
}

impl ConditioningMask {
    /// Partition `0..dimension` into `fixed` and the remaining free indices.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` or `DuplicateIndex` for invalid indices.
    pub fn new(dimension: usize, fixed: &[usize]) -> Result<Self, DistributionError> {
        DistributionError::check_indices(dimension, fixed)?;

        let mut mask = vec![false; dimension];
        for &i in fixed {
            mask[i] = true;
        }
        let free = (0..dimension).filter(|&i| !mask[i]).collect();

        Ok(Self {
            mask,
            fixed: fixed.to_vec(),
            free,
        })
    }

    /// Dimension of the full point.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.mask.len()
    }

    /// Number of free coordinates.
    #[inline]
    pub fn free_dimension(&self) -> usize {
        self.free.len()
    }

    /// Fixed indices, in the order given.
    #[inline]
    pub fn fixed_indices(&self) -> &[usize] {
        &self.fixed
    }

    /// Free indices, ascending.
    #[inline]
    pub fn free_indices(&self) -> &[usize] {
        &self.free
    }

    /// Returns true when nothing is fixed.
    #[inline]
    pub fn is_unconditioned(&self) -> bool {
        self.fixed.is_empty()
    }

    /// Returns true when coordinate `index` is fixed.
    #[inline]
    pub fn is_fixed(&self, index: usize) -> bool {
        self.mask.get(index).copied().unwrap_or(false)
    }

    /// Boolean mask, `true` at fixed coordinates.
    #[inline]
    pub fn as_slice(&self) -> &[bool] {
        &self.mask
    }
}
