//! Correlated multivariate families.
//!
//! - [`CorrelationMatrix`] / [`CholeskyFactor`]: validated correlation and
//!   its factorisation
//! - [`MultivariateNormal`]: Gaussian with per-coordinate scale and
//!   correlation

mod correlation;
mod normal;

pub use correlation::{CholeskyFactor, CorrelationError, CorrelationMatrix};
pub use normal::MultivariateNormal;
