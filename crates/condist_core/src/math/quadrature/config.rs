//! Quadrature configuration types.

use crate::types::DistributionError;

/// Configuration for adaptive Gauss-Kronrod integration.
///
/// Both budgets bound the work done per one-dimensional integral. Nested
/// integration applies the same budgets at every level.
///
/// # Example
///
/// ```
/// use condist_core::math::quadrature::QuadratureConfig;
///
/// let config = QuadratureConfig::default();
/// assert_eq!(config.max_sub_intervals, 100);
/// assert!(config.max_absolute_error <= 1e-12);
///
/// let custom = QuadratureConfig::new(32, 1e-8);
/// assert_eq!(custom.max_sub_intervals, 32);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuadratureConfig {
    /// Maximum number of sub-intervals per one-dimensional integral.
    ///
    /// When reached, the current estimate is returned unconverged.
    pub max_sub_intervals: usize,

    /// Target bound on the summed `|Kronrod - Gauss|` error estimate.
    pub max_absolute_error: f64,
}

impl Default for QuadratureConfig {
    /// Default values:
    /// - `max_sub_intervals`: 100
    /// - `max_absolute_error`: 1e-12
    fn default() -> Self {
        Self {
            max_sub_intervals: 100,
            max_absolute_error: 1e-12,
        }
    }
}

impl QuadratureConfig {
    /// Create a new configuration with specified values.
    ///
    /// # Panics
    ///
    /// Panics if `max_sub_intervals == 0` or `max_absolute_error` is not a
    /// positive finite number.
    pub fn new(max_sub_intervals: usize, max_absolute_error: f64) -> Self {
        assert!(max_sub_intervals > 0, "max_sub_intervals must be > 0");
        assert!(
            max_absolute_error.is_finite() && max_absolute_error > 0.0,
            "max_absolute_error must be positive"
        );
        Self {
            max_sub_intervals,
            max_absolute_error,
        }
    }

    /// Check the budgets without panicking.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` naming the offending field.
    pub fn validate(&self) -> Result<(), DistributionError> {
        if self.max_sub_intervals == 0 {
            return Err(DistributionError::InvalidParameter {
                name: "max_sub_intervals",
                reason: "must be > 0".to_string(),
            });
        }
        if !(self.max_absolute_error.is_finite() && self.max_absolute_error > 0.0) {
            return Err(DistributionError::InvalidParameter {
                name: "max_absolute_error",
                reason: format!("must be positive and finite, got {}", self.max_absolute_error),
            });
        }
        Ok(())
    }
}
