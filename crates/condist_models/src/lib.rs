//! # condist_models (L2: Base Distributions)
//!
//! Concrete base distributions the conditioning engine decomposes.
//!
//! This crate provides:
//! - Univariate families: [`Normal`](univariate::Normal),
//!   [`Uniform`](univariate::Uniform)
//! - Independent products: [`ComposedDistribution`](composed::ComposedDistribution)
//! - Correlated Gaussians: [`MultivariateNormal`](multivariate::MultivariateNormal)
//!
//! ## Design Principles
//!
//! - **Enum-based univariate families** for static dispatch inside products
//! - **`Box<dyn BaseDistribution>`** only at the marginalisation boundary
//! - Parameters validated at construction, never at evaluation
//!
//! ## Example
//!
//! ```
//! use condist_core::traits::{BaseDistribution, Distribution};
//! use condist_models::composed::ComposedDistribution;
//! use condist_models::univariate::{Normal, Univariate};
//!
//! let joint = ComposedDistribution::new(vec![
//!     Univariate::Normal(Normal::standard()),
//!     Univariate::Normal(Normal::new(1.0, 2.0).unwrap()),
//! ])
//! .unwrap();
//!
//! assert_eq!(joint.dimension(), 2);
//! let marginal = joint.marginal(&[1]).unwrap();
//! assert!((marginal.cdf(&[1.0]).unwrap() - 0.5).abs() < 1e-15);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod composed;
pub mod multivariate;
pub mod univariate;
