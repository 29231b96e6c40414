//! Adaptive Gauss-Kronrod quadrature.
//!
//! This module provides the integration primitive the conditioning engine
//! composes for its integration-based CDF estimator.
//!
//! ## Components
//!
//! - [`GaussKronrodRule`]: n-point Gauss / (2n+1)-point Kronrod node pair,
//!   built numerically; the shared G11/K23 rule is cached on first use
//! - [`GaussKronrodIntegrator`]: globally adaptive bisection in one dimension,
//!   iterated (nested) integration over boxes
//! - [`QuadratureConfig`]: sub-interval and absolute-error budgets
//!
//! ## Budget Semantics
//!
//! Running out of sub-intervals is not an error. The integrator returns its
//! best estimate and flags it through [`QuadratureResult::converged`].
//!
//! ## Example
//!
//! ```
//! use condist_core::math::quadrature::{GaussKronrodIntegrator, QuadratureConfig};
//!
//! let integrator = GaussKronrodIntegrator::new(QuadratureConfig::new(50, 1e-10));
//! let result = integrator.integrate(|x: f64| x.cos(), 0.0, std::f64::consts::FRAC_PI_2);
//! assert!((result.value - 1.0).abs() < 1e-10);
//! assert!(result.converged);
//! ```

mod config;
mod integrator;
mod rule;

pub use config::QuadratureConfig;
pub use integrator::{GaussKronrodIntegrator, QuadratureResult};
pub use rule::{GaussKronrodRule, DEFAULT_GAUSS_POINTS};
