//! Univariate distribution families.
//!
//! [`Univariate`] wraps the concrete families in an enum so products of
//! marginals dispatch statically.

mod normal;
mod uniform;

pub use normal::{Normal, NORMAL_RANGE_QUANTILE};
pub use uniform::Uniform;

pub(crate) use normal::standard_pdf;

use rand::RngCore;

/// Univariate family selected at construction.
///
/// # Example
///
/// ```
/// use condist_models::univariate::{Normal, Uniform, Univariate};
///
/// let components = [
///     Univariate::Normal(Normal::standard()),
///     Univariate::Uniform(Uniform::unit()),
/// ];
/// assert_eq!(components[1].density(0.5), 1.0);
/// assert!((components[0].probability(0.0) - 0.5).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Univariate {
    /// Normal distribution
    Normal(Normal),
    /// Uniform distribution
    Uniform(Uniform),
}

impl Univariate {
    /// Density at `x`.
    #[inline]
    pub fn density(&self, x: f64) -> f64 {
        match self {
            Univariate::Normal(d) => d.density(x),
            Univariate::Uniform(d) => d.density(x),
        }
    }

    /// Cumulative probability at `x`.
    #[inline]
    pub fn probability(&self, x: f64) -> f64 {
        match self {
            Univariate::Normal(d) => d.probability(x),
            Univariate::Uniform(d) => d.probability(x),
        }
    }

    /// Support bounds `(lower, upper)`.
    pub fn bounds(&self) -> (f64, f64) {
        match self {
            Univariate::Normal(d) => d.bounds(),
            Univariate::Uniform(d) => (d.lower(), d.upper()),
        }
    }

    /// Draw one variate.
    pub fn draw(&self, rng: &mut dyn RngCore) -> f64 {
        match self {
            Univariate::Normal(d) => d.draw(rng),
            Univariate::Uniform(d) => d.draw(rng),
        }
    }
}

impl From<Normal> for Univariate {
    fn from(d: Normal) -> Self {
        Univariate::Normal(d)
    }
}

impl From<Uniform> for Univariate {
    fn from(d: Uniform) -> Self {
        Univariate::Uniform(d)
    }
}
