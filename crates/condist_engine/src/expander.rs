//! Reconstruction of full points from free sub-vectors.

use crate::error::ConditioningError;
use crate::mask::ConditioningMask;
use condist_core::types::DistributionError;

/// Rebuilds a full point from the free coordinates and the reference values.
///
/// `full[fixed[k]] = reference[k]` and `full[free[k]] = free_point[k]`:
/// two scatter passes over precomputed index lists, no allocation in
/// [`expand_into`](Self::expand_into).
///
/// # Example
///
/// ```
/// use condist_engine::expander::InputExpander;
/// use condist_engine::mask::ConditioningMask;
///
/// let mask = ConditioningMask::new(4, &[3, 1]).unwrap();
/// let expander = InputExpander::new(&mask, vec![30.0, 10.0]).unwrap();
///
/// assert_eq!(expander.expand(&[0.5, 2.5]).unwrap(), vec![0.5, 10.0, 2.5, 30.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct InputExpander {
    fixed: Vec<usize>,
    free: Vec<usize>,
    reference: Vec<f64>,
}

impl InputExpander {
    /// Pair the mask's fixed indices with `reference`.
    ///
    /// # Errors
    ///
    /// Returns `ReferenceLengthMismatch` when `reference` does not have one
    /// value per fixed index.
    pub fn new(mask: &ConditioningMask, reference: Vec<f64>) -> Result<Self, ConditioningError> {
        if reference.len() != mask.fixed_indices().len() {
            return Err(ConditioningError::ReferenceLengthMismatch {
                indices: mask.fixed_indices().len(),
                values: reference.len(),
            });
        }
        Ok(Self {
            fixed: mask.fixed_indices().to_vec(),
            free: mask.free_indices().to_vec(),
            reference,
        })
    }

    /// Length of the full point.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.fixed.len() + self.free.len()
    }

    /// Length of the free sub-vector.
    #[inline]
    pub fn free_dimension(&self) -> usize {
        self.free.len()
    }

    /// Reference values, aligned with the fixed indices.
    #[inline]
    pub fn reference(&self) -> &[f64] {
        &self.reference
    }

    /// Full point for `free_point`.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` when `free_point.len() != free_dimension()`.
    pub fn expand(&self, free_point: &[f64]) -> Result<Vec<f64>, DistributionError> {
        let mut full = vec![0.0; self.dimension()];
        self.expand_into(free_point, &mut full)?;
        Ok(full)
    }

    /// Write the full point for `free_point` into `full`.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` when either buffer has the wrong length.
    pub fn expand_into(&self, free_point: &[f64], full: &mut [f64]) -> Result<(), DistributionError> {
        DistributionError::check_dimension(self.free.len(), free_point)?;
        DistributionError::check_dimension(self.dimension(), full)?;
        self.scatter(free_point, full);
        Ok(())
    }

    /// Unchecked scatter; lengths must already match.
    #[inline]
    pub(crate) fn scatter(&self, free_point: &[f64], full: &mut [f64]) {
        for (&i, &value) in self.fixed.iter().zip(self.reference.iter()) {
            full[i] = value;
        }
        for (&i, &value) in self.free.iter().zip(free_point.iter()) {
            full[i] = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_preserves_relative_order() {
        let mask = ConditioningMask::new(5, &[1, 4]).unwrap();
        let expander = InputExpander::new(&mask, vec![-1.0, -4.0]).unwrap();
        let full = expander.expand(&[0.0, 2.0, 3.0]).unwrap();
        assert_eq!(full, vec![0.0, -1.0, 2.0, 3.0, -4.0]);
    }

    #[test]
    fn test_expand_all_fixed() {
        let mask = ConditioningMask::new(2, &[0, 1]).unwrap();
        let expander = InputExpander::new(&mask, vec![7.0, 8.0]).unwrap();
        assert_eq!(expander.expand(&[]).unwrap(), vec![7.0, 8.0]);
    }

    #[test]
    fn test_expand_nothing_fixed() {
        let mask = ConditioningMask::new(3, &[]).unwrap();
        let expander = InputExpander::new(&mask, vec![]).unwrap();
        assert_eq!(expander.expand(&[1.0, 2.0, 3.0]).unwrap(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_dimension_errors() {
        let mask = ConditioningMask::new(3, &[1]).unwrap();
        let expander = InputExpander::new(&mask, vec![0.0]).unwrap();
        assert_eq!(
            expander.expand(&[1.0]),
            Err(DistributionError::DimensionMismatch {
                expected: 2,
                got: 1
            })
        );
        let mut short = [0.0; 2];
        assert!(expander.expand_into(&[1.0, 2.0], &mut short).is_err());
    }

    #[test]
    fn test_reference_length_checked() {
        let mask = ConditioningMask::new(3, &[0, 2]).unwrap();
        assert_eq!(
            InputExpander::new(&mask, vec![1.0]),
            Err(ConditioningError::ReferenceLengthMismatch {
                indices: 2,
                values: 1
            })
        );
    }

    #[test]
    fn test_expand_into_reuses_buffer() {
        let mask = ConditioningMask::new(3, &[0]).unwrap();
        let expander = InputExpander::new(&mask, vec![9.0]).unwrap();
        let mut full = [0.0; 3];
        expander.expand_into(&[1.0, 2.0], &mut full).unwrap();
        assert_eq!(full, [9.0, 1.0, 2.0]);
        expander.expand_into(&[3.0, 4.0], &mut full).unwrap();
        assert_eq!(full, [9.0, 3.0, 4.0]);
    }
}
