//! Error types for conditional distribution construction.

use condist_core::types::DistributionError;
use thiserror::Error;

/// Invalid CDF strategy parameters.
///
/// # Examples
/// ```
/// use condist_engine::error::ConfigError;
///
/// let err = ConfigError::InvalidSampleSize(0);
/// assert_eq!(format!("{}", err), "Invalid sample size 0: must be > 0");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Quadrature sub-interval budget of zero.
    #[error("Invalid sub-interval budget {0}: must be > 0")]
    InvalidSubIntervals(usize),

    /// Quadrature error target that is not a positive finite number.
    #[error("Invalid absolute error target {0}: must be positive and finite")]
    InvalidErrorTarget(f64),

    /// Monte Carlo sample size of zero.
    #[error("Invalid sample size {0}: must be > 0")]
    InvalidSampleSize(usize),
}

/// Failure to build a conditional distribution.
///
/// Construction is all-or-nothing: no conditional distribution exists when
/// any of these is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConditioningError {
    /// Number of fixed indices differs from the number of reference values.
    #[error("Reference length mismatch: {indices} fixed indices but {values} reference values")]
    ReferenceLengthMismatch {
        /// Number of fixed indices
        indices: usize,
        /// Number of reference values
        values: usize,
    },

    /// CDF strategy parameters rejected.
    #[error("Invalid CDF strategy: {0}")]
    InvalidStrategy(#[from] ConfigError),

    /// Index validation or a base distribution operation failed.
    #[error(transparent)]
    Distribution(#[from] DistributionError),
}
