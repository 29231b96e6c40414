//! # condist_engine (L3: Conditioning Engine)
//!
//! Density and cumulative distribution of a sub-vector of a multivariate
//! distribution given that the remaining coordinates are held at fixed
//! reference values, for base distributions with no closed-form conditional.
//!
//! ## Components
//!
//! - [`mask`]: fixed/free partition of the coordinates
//! - [`expander`]: full points rebuilt from free sub-vectors
//! - [`range`]: support of the free sub-vector
//! - [`normalization`]: density of the fixed marginal at the reference values
//! - [`cdf`]: quadrature and Monte Carlo CDF estimators
//! - [`strategy`]: estimator selection and validation
//! - [`conditional`]: the [`ConditionalDistribution`](conditional::ConditionalDistribution)
//!   facade implementing `Distribution`
//!
//! ## Query Flow
//!
//! ```text
//! free point ──► InputExpander ──► base.pdf ──► / factor          (pdf)
//!            └─► CdfStrategy::Integration ──► nested Gauss-Kronrod (cdf)
//!            └─► CdfStrategy::Sampling    ──► free-marginal draws  (cdf)
//! ```
//!
//! ## Numerical Caveats
//!
//! - The range is the unconditioned marginal range of the free coordinates.
//! - A zero normalisation factor is not detected: values become `inf`/`NaN`.
//! - The sampling estimator ignores the reference values and estimates the
//!   unconditioned marginal CDF.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod cdf;
pub mod conditional;
pub mod error;
pub mod expander;
pub mod mask;
pub mod normalization;
pub mod range;
pub mod strategy;

pub use conditional::ConditionalDistribution;
pub use error::{ConditioningError, ConfigError};
pub use strategy::{CdfStrategy, SamplingConfig};
