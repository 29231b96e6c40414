//! Core types for the conditioning engine.
//!
//! This module provides:
//! - `Interval`: Axis-aligned box used for supports and integration domains
//! - `DistributionError`: Structured errors for distribution operations

pub mod error;
pub mod interval;

pub use error::DistributionError;
pub use interval::Interval;
