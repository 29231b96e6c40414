//! Core traits for probability distributions.
//!
//! This module defines the capability interfaces the conditioning engine
//! consumes and exposes:
//! - [`Distribution`]: Evaluation (`pdf`, `cdf`, `range`, `description`)
//! - [`BaseDistribution`]: Marginalisation and i.i.d. sampling
//!
//! Concrete families dispatch statically inside their own crate (enum-based);
//! `Box<dyn BaseDistribution>` only appears at the marginalisation boundary.

pub mod distribution;

pub use distribution::{default_description, BaseDistribution, Distribution};
