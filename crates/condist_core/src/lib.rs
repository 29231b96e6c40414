//! # condist_core: Foundation for the Conditional Distribution Engine
//!
//! ## Layer 1 (Foundation) Role
//!
//! condist_core is the bottom layer of the workspace, providing:
//! - Support boxes: `Interval` (`types::interval`)
//! - Error types: `DistributionError` (`types::error`)
//! - Capability traits: `Distribution`, `BaseDistribution` (`traits`)
//! - Adaptive Gauss-Kronrod quadrature (`math::quadrature`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other condist_* crates, with minimal external dependencies:
//! - rand: `RngCore` in the sampling capability
//! - thiserror: Error derivation
//! - tracing: Budget-exhaustion diagnostics in quadrature
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use condist_core::math::quadrature::{GaussKronrodIntegrator, QuadratureConfig};
//! use condist_core::types::Interval;
//!
//! let unit = Interval::new(vec![0.0, 0.0], vec![1.0, 1.0]).unwrap();
//! assert!(unit.contains(&[0.25, 0.75]));
//!
//! let integrator = GaussKronrodIntegrator::new(QuadratureConfig::default());
//! let area = integrator.integrate_interval(|_: &[f64]| 1.0, &unit);
//! assert!((area.value - 1.0).abs() < 1e-14);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for `Interval` and `QuadratureConfig`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod traits;
pub mod types;
