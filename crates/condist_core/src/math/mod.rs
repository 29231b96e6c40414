//! Numerical methods.
//!
//! - [`quadrature`]: Adaptive Gauss-Kronrod integration in one and several dimensions

pub mod quadrature;
