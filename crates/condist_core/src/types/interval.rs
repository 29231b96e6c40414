//! Axis-aligned boxes in R^n.

use super::DistributionError;

/// Axis-aligned box `[lower, upper]` in `dimension()` coordinates.
///
/// Bounds may be infinite. A zero-dimensional interval is legal and contains
/// the empty point.
///
/// # Example
///
/// ```
/// use condist_core::types::Interval;
///
/// let box2 = Interval::new(vec![0.0, -1.0], vec![1.0, 1.0]).unwrap();
/// assert_eq!(box2.dimension(), 2);
/// assert!(box2.contains(&[0.5, 0.0]));
/// assert!(!box2.contains(&[1.5, 0.0]));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval {
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl Interval {
    /// Construct a box from its lower and upper corners.
    ///
    /// # Errors
    ///
    /// * `DimensionMismatch` - corners have different lengths
    /// * `InvalidParameter` - a bound is NaN or `lower[i] > upper[i]`
    pub fn new(lower: Vec<f64>, upper: Vec<f64>) -> Result<Self, DistributionError> {
        DistributionError::check_dimension(lower.len(), &upper)?;
        for (i, (&lo, &hi)) in lower.iter().zip(upper.iter()).enumerate() {
            if lo.is_nan() || hi.is_nan() || lo > hi {
                return Err(DistributionError::InvalidParameter {
                    name: "interval",
                    reason: format!("invalid bounds [{}, {}] at coordinate {}", lo, hi, i),
                });
            }
        }
        Ok(Self { lower, upper })
    }

    /// The whole space `(-inf, +inf)^dimension`.
    pub fn unbounded(dimension: usize) -> Self {
        Self {
            lower: vec![f64::NEG_INFINITY; dimension],
            upper: vec![f64::INFINITY; dimension],
        }
    }

    /// The lower orthant `(-inf, upper]`.
    ///
    /// ```
    /// use condist_core::types::Interval;
    ///
    /// let orthant = Interval::below(&[1.0, 2.0]);
    /// assert!(orthant.contains(&[-100.0, 2.0]));
    /// assert!(!orthant.contains(&[1.0, 2.5]));
    /// ```
    pub fn below(upper: &[f64]) -> Self {
        Self {
            lower: vec![f64::NEG_INFINITY; upper.len()],
            upper: upper.to_vec(),
        }
    }

    /// Number of coordinates.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.lower.len()
    }

    /// Lower corner.
    #[inline]
    pub fn lower_bound(&self) -> &[f64] {
        &self.lower
    }

    /// Upper corner.
    #[inline]
    pub fn upper_bound(&self) -> &[f64] {
        &self.upper
    }

    /// Returns true when every bound is finite.
    pub fn is_finite(&self) -> bool {
        self.lower
            .iter()
            .chain(self.upper.iter())
            .all(|b| b.is_finite())
    }

    /// Componentwise membership test, bounds inclusive.
    ///
    /// Points of the wrong length are never contained.
    pub fn contains(&self, point: &[f64]) -> bool {
        point.len() == self.dimension()
            && point
                .iter()
                .zip(self.lower.iter().zip(self.upper.iter()))
                .all(|(&x, (&lo, &hi))| lo <= x && x <= hi)
    }

    /// Sub-box over `indices`, in the order given.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` or `DuplicateIndex` for invalid indices.
    ///
    /// ```
    /// use condist_core::types::Interval;
    ///
    /// let cube = Interval::new(vec![0.0, 1.0, 2.0], vec![10.0, 11.0, 12.0]).unwrap();
    /// let face = cube.select(&[0, 2]).unwrap();
    /// assert_eq!(face.lower_bound(), &[0.0, 2.0]);
    /// assert_eq!(face.upper_bound(), &[10.0, 12.0]);
    /// ```
    pub fn select(&self, indices: &[usize]) -> Result<Self, DistributionError> {
        DistributionError::check_indices(self.dimension(), indices)?;
        Ok(Self {
            lower: indices.iter().map(|&i| self.lower[i]).collect(),
            upper: indices.iter().map(|&i| self.upper[i]).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_mismatched_corners() {
        let result = Interval::new(vec![0.0, 0.0], vec![1.0]);
        assert!(matches!(
            result,
            Err(DistributionError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_new_rejects_inverted_bounds() {
        assert!(Interval::new(vec![1.0], vec![0.0]).is_err());
        assert!(Interval::new(vec![f64::NAN], vec![0.0]).is_err());
    }

    #[test]
    fn test_new_accepts_degenerate_and_infinite_bounds() {
        assert!(Interval::new(vec![1.0], vec![1.0]).is_ok());
        let half_line = Interval::new(vec![f64::NEG_INFINITY], vec![0.0]).unwrap();
        assert!(!half_line.is_finite());
    }

    #[test]
    fn test_zero_dimensional_contains_empty_point() {
        let empty = Interval::new(vec![], vec![]).unwrap();
        assert_eq!(empty.dimension(), 0);
        assert!(empty.contains(&[]));
        assert!(empty.is_finite());
    }

    #[test]
    fn test_contains_is_inclusive() {
        let unit = Interval::new(vec![0.0, 0.0], vec![1.0, 1.0]).unwrap();
        assert!(unit.contains(&[0.0, 1.0]));
        assert!(!unit.contains(&[-1e-12, 0.5]));
        assert!(!unit.contains(&[0.5]));
    }

    #[test]
    fn test_below_and_unbounded() {
        let orthant = Interval::below(&[0.0]);
        assert!(orthant.contains(&[-1e300]));
        assert!(orthant.contains(&[0.0]));
        assert!(!orthant.contains(&[1e-300]));

        let all = Interval::unbounded(2);
        assert!(all.contains(&[1e300, -1e300]));
    }

    #[test]
    fn test_select_preserves_requested_order() {
        let cube = Interval::new(vec![0.0, 1.0, 2.0], vec![3.0, 4.0, 5.0]).unwrap();
        let swapped = cube.select(&[2, 0]).unwrap();
        assert_eq!(swapped.lower_bound(), &[2.0, 0.0]);
        assert_eq!(swapped.upper_bound(), &[5.0, 3.0]);
        assert!(cube.select(&[3]).is_err());
        assert!(cube.select(&[1, 1]).is_err());
    }
}
