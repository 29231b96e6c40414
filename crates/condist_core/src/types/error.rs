//! Error types for structured error handling.
//!
//! This module provides:
//! - `DistributionError`: Errors from distribution construction and evaluation

use thiserror::Error;

/// Categorised distribution errors.
///
/// Raised by distribution constructors and by point evaluations whose
/// arguments do not match the distribution's shape.
///
/// # Variants
/// - `DimensionMismatch`: Point length differs from the distribution dimension
/// - `IndexOutOfRange`: Coordinate index not in `[0, dimension)`
/// - `DuplicateIndex`: Coordinate index listed more than once
/// - `InvalidParameter`: Invalid distribution parameter
/// - `Unsupported`: Operation not provided by this distribution
///
/// # Examples
/// ```
/// use condist_core::types::DistributionError;
///
/// let err = DistributionError::DimensionMismatch { expected: 3, got: 2 };
/// assert_eq!(format!("{}", err), "Dimension mismatch: expected 3, got 2");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DistributionError {
    /// Point length differs from the expected dimension.
    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Expected number of coordinates
        expected: usize,
        /// Number of coordinates provided
        got: usize,
    },

    /// Coordinate index outside `[0, dimension)`.
    #[error("Index {index} out of range for dimension {dimension}")]
    IndexOutOfRange {
        /// The offending index
        index: usize,
        /// Dimension of the distribution
        dimension: usize,
    },

    /// Coordinate index given more than once.
    #[error("Duplicate index: {0}")]
    DuplicateIndex(usize),

    /// Invalid distribution parameter.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Description of the invalid value
        reason: String,
    },

    /// Operation not supported by this distribution.
    #[error("Unsupported operation: {0}")]
    Unsupported(String),
}

impl DistributionError {
    /// Check that a point has the expected number of coordinates.
    ///
    /// # Examples
    /// ```
    /// use condist_core::types::DistributionError;
    ///
    /// assert!(DistributionError::check_dimension(2, &[0.0, 1.0]).is_ok());
    /// assert!(DistributionError::check_dimension(3, &[0.0, 1.0]).is_err());
    /// ```
    #[inline]
    pub fn check_dimension(expected: usize, point: &[f64]) -> Result<(), Self> {
        if point.len() != expected {
            return Err(Self::DimensionMismatch {
                expected,
                got: point.len(),
            });
        }
        Ok(())
    }

    /// Check that `indices` are distinct and lie in `[0, dimension)`.
    ///
    /// # Examples
    /// ```
    /// use condist_core::types::DistributionError;
    ///
    /// assert!(DistributionError::check_indices(3, &[2, 0]).is_ok());
    /// assert!(DistributionError::check_indices(3, &[0, 0]).is_err());
    /// assert!(DistributionError::check_indices(3, &[3]).is_err());
    /// ```
    pub fn check_indices(dimension: usize, indices: &[usize]) -> Result<(), Self> {
        let mut seen = vec![false; dimension];
        for &index in indices {
            if index >= dimension {
                return Err(Self::IndexOutOfRange { index, dimension });
            }
            if seen[index] {
                return Err(Self::DuplicateIndex(index));
            }
            seen[index] = true;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch_display() {
        let err = DistributionError::DimensionMismatch {
            expected: 3,
            got: 1,
        };
        assert_eq!(err.to_string(), "Dimension mismatch: expected 3, got 1");
    }

    #[test]
    fn test_index_out_of_range_display() {
        let err = DistributionError::IndexOutOfRange {
            index: 5,
            dimension: 3,
        };
        assert!(err.to_string().contains("Index 5"));
        assert!(err.to_string().contains("dimension 3"));
    }

    #[test]
    fn test_invalid_parameter_display() {
        let err = DistributionError::InvalidParameter {
            name: "std_dev",
            reason: "must be positive".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid parameter 'std_dev': must be positive"
        );
    }

    #[test]
    fn test_check_dimension() {
        assert!(DistributionError::check_dimension(0, &[]).is_ok());
        assert_eq!(
            DistributionError::check_dimension(2, &[1.0]),
            Err(DistributionError::DimensionMismatch {
                expected: 2,
                got: 1
            })
        );
    }

    #[test]
    fn test_check_indices() {
        assert!(DistributionError::check_indices(4, &[]).is_ok());
        assert!(DistributionError::check_indices(4, &[3, 1, 0]).is_ok());
        assert_eq!(
            DistributionError::check_indices(4, &[1, 4]),
            Err(DistributionError::IndexOutOfRange {
                index: 4,
                dimension: 4
            })
        );
        assert_eq!(
            DistributionError::check_indices(4, &[2, 1, 2]),
            Err(DistributionError::DuplicateIndex(2))
        );
    }

    #[test]
    fn test_error_is_std_error() {
        fn assert_error<E: std::error::Error>(_: &E) {}
        assert_error(&DistributionError::Unsupported("sample".to_string()));
    }
}
