//! Adaptive and nested Gauss-Kronrod integration.

use super::{GaussKronrodRule, QuadratureConfig};
use crate::types::Interval;
use std::sync::Arc;
use tracing::trace;

/// Outcome of an adaptive integration.
///
/// A result that ran out of sub-interval budget is still a usable estimate;
/// `converged` records whether the error target was met.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadratureResult {
    /// Integral estimate.
    pub value: f64,
    /// Summed `|Kronrod - Gauss|` estimate at the outermost level.
    pub error_estimate: f64,
    /// Sub-intervals used at the outermost level.
    pub sub_intervals: usize,
    /// Number of integrand evaluations.
    pub evaluations: usize,
    /// True when every level met `max_absolute_error`.
    pub converged: bool,
}

impl QuadratureResult {
    fn exact(value: f64, evaluations: usize) -> Self {
        Self {
            value,
            error_estimate: 0.0,
            sub_intervals: 0,
            evaluations,
            converged: true,
        }
    }

    fn undefined() -> Self {
        Self {
            value: f64::NAN,
            error_estimate: f64::NAN,
            sub_intervals: 0,
            evaluations: 0,
            converged: false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Segment {
    a: f64,
    b: f64,
    value: f64,
    error: f64,
}

struct NestedState {
    evaluations: usize,
    converged: bool,
}

/// Globally adaptive Gauss-Kronrod integrator.
///
/// The interval carrying the largest error estimate is bisected until the
/// summed error drops below `max_absolute_error` or `max_sub_intervals` is
/// reached. Budget exhaustion is not an error: the current estimate is
/// returned with `converged == false`.
///
/// Infinite bounds are mapped onto finite ones:
/// - `[a, +inf)`: `x = a + t / (1 - t)`, `t ∈ [0, 1)`
/// - `(-inf, b]`: `x = b - (1 - t) / t`, `t ∈ (0, 1]`
/// - `(-inf, +inf)`: `x = t / (1 - t²)`, `t ∈ (-1, 1)`
///
/// # Example
///
/// ```
/// use condist_core::math::quadrature::{GaussKronrodIntegrator, QuadratureConfig};
///
/// let integrator = GaussKronrodIntegrator::new(QuadratureConfig::default());
///
/// let result = integrator.integrate(|x: f64| (-x * x).exp(), f64::NEG_INFINITY, f64::INFINITY);
/// assert!((result.value - std::f64::consts::PI.sqrt()).abs() < 1e-10);
///
/// // ∫∫_[0,1]² x y dx dy = 1/4
/// let result = integrator.integrate_box(|p: &[f64]| p[0] * p[1], &[0.0, 0.0], &[1.0, 1.0]);
/// assert!((result.value - 0.25).abs() < 1e-14);
/// ```
#[derive(Debug, Clone)]
pub struct GaussKronrodIntegrator {
    config: QuadratureConfig,
    rule: Arc<GaussKronrodRule>,
}

impl GaussKronrodIntegrator {
    /// Create an integrator using the shared G11/K23 rule.
    pub fn new(config: QuadratureConfig) -> Self {
        Self::with_rule(config, GaussKronrodRule::g11_k23())
    }

    /// Create an integrator with an explicit rule.
    pub fn with_rule(config: QuadratureConfig, rule: Arc<GaussKronrodRule>) -> Self {
        Self { config, rule }
    }

    /// Create an integrator with default budgets.
    pub fn with_defaults() -> Self {
        Self::new(QuadratureConfig::default())
    }

    /// Budgets in use.
    #[inline]
    pub fn config(&self) -> &QuadratureConfig {
        &self.config
    }

    /// Base rule in use.
    #[inline]
    pub fn rule(&self) -> &GaussKronrodRule {
        &self.rule
    }

    /// Integrate `f` over `[a, b]`; either bound may be infinite.
    ///
    /// Reversed bounds give the negated integral.
    pub fn integrate<F>(&self, mut f: F, a: f64, b: f64) -> QuadratureResult
    where
        F: FnMut(f64) -> f64,
    {
        if a.is_nan() || b.is_nan() {
            return QuadratureResult::undefined();
        }
        if a == b {
            return QuadratureResult::exact(0.0, 0);
        }
        if a > b {
            let flipped = self.integrate(f, b, a);
            return QuadratureResult {
                value: -flipped.value,
                ..flipped
            };
        }

        match (a.is_finite(), b.is_finite()) {
            (true, true) => self.adaptive(&mut f, a, b),
            (true, false) => self.adaptive(
                &mut |t: f64| {
                    let s = 1.0 - t;
                    let y = f(a + t / s);
                    if y == 0.0 {
                        0.0
                    } else {
                        y / (s * s)
                    }
                },
                0.0,
                1.0,
            ),
            (false, true) => self.adaptive(
                &mut |t: f64| {
                    let y = f(b - (1.0 - t) / t);
                    if y == 0.0 {
                        0.0
                    } else {
                        y / (t * t)
                    }
                },
                0.0,
                1.0,
            ),
            (false, false) => self.adaptive(
                &mut |t: f64| {
                    let d = 1.0 - t * t;
                    let y = f(t / d);
                    if y == 0.0 {
                        0.0
                    } else {
                        y * (1.0 + t * t) / (d * d)
                    }
                },
                -1.0,
                1.0,
            ),
        }
    }

    /// Integrate `f` over the box `[lower, upper]` by iterated integration.
    ///
    /// Coordinate 0 is the outermost integral. Each level runs its own
    /// adaptive integration with the configured budgets. A zero-dimensional
    /// box evaluates `f(&[])` once. Corners of different lengths give a
    /// non-converged `NaN` result without evaluating `f`.
    pub fn integrate_box<F>(&self, mut f: F, lower: &[f64], upper: &[f64]) -> QuadratureResult
    where
        F: FnMut(&[f64]) -> f64,
    {
        if lower.len() != upper.len() {
            return QuadratureResult::undefined();
        }

        if lower.is_empty() {
            return QuadratureResult::exact(f(&[]), 1);
        }

        let mut point = vec![0.0; lower.len()];
        let mut state = NestedState {
            evaluations: 0,
            converged: true,
        };
        let outer = self.nested(&mut f, lower, upper, &mut point, 0, &mut state);

        QuadratureResult {
            evaluations: state.evaluations,
            converged: state.converged && outer.converged,
            ..outer
        }
    }

    /// Integrate `f` over `domain`.
    pub fn integrate_interval<F>(&self, f: F, domain: &Interval) -> QuadratureResult
    where
        F: FnMut(&[f64]) -> f64,
    {
        self.integrate_box(f, domain.lower_bound(), domain.upper_bound())
    }

    fn nested<F>(
        &self,
        f: &mut F,
        lower: &[f64],
        upper: &[f64],
        point: &mut [f64],
        level: usize,
        state: &mut NestedState,
    ) -> QuadratureResult
    where
        F: FnMut(&[f64]) -> f64,
    {
        let innermost = level + 1 == lower.len();
        self.integrate(
            |x: f64| {
                point[level] = x;
                if innermost {
                    state.evaluations += 1;
                    f(&*point)
                } else {
                    let inner = self.nested(
                        &mut *f,
                        lower,
                        upper,
                        &mut *point,
                        level + 1,
                        &mut *state,
                    );
                    state.converged &= inner.converged;
                    inner.value
                }
            },
            lower[level],
            upper[level],
        )
    }

    fn adaptive<G>(&self, g: &mut G, a: f64, b: f64) -> QuadratureResult
    where
        G: FnMut(f64) -> f64,
    {
        let per_segment = self.rule.nodes().len();
        let evaluate = |g: &mut G, a: f64, b: f64| {
            let (kronrod, gauss) = self.rule.estimate(g, a, b);
            Segment {
                a,
                b,
                value: kronrod,
                error: (kronrod - gauss).abs(),
            }
        };

        let mut segments = vec![evaluate(g, a, b)];
        let mut evaluations = per_segment;
        let (mut value, mut error) = totals(&segments);

        while error > self.config.max_absolute_error
            && segments.len() < self.config.max_sub_intervals
        {
            let worst = segments
                .iter()
                .enumerate()
                .max_by(|(_, s), (_, t)| s.error.total_cmp(&t.error))
                .map(|(i, _)| i)
                .unwrap_or(0);
            let segment = segments.swap_remove(worst);
            let mid = 0.5 * (segment.a + segment.b);
            if !(segment.a < mid && mid < segment.b) {
                // Interval no longer splittable in floating point
                segments.push(segment);
                break;
            }
            segments.push(evaluate(g, segment.a, mid));
            segments.push(evaluate(g, mid, segment.b));
            evaluations += 2 * per_segment;
            (value, error) = totals(&segments);
        }

        let converged = error <= self.config.max_absolute_error;
        if !converged {
            trace!(
                value,
                error,
                sub_intervals = segments.len(),
                "adaptive quadrature stopped before reaching error target"
            );
        }

        QuadratureResult {
            value,
            error_estimate: error,
            sub_intervals: segments.len(),
            evaluations,
            converged,
        }
    }
}

fn totals(segments: &[Segment]) -> (f64, f64) {
    segments
        .iter()
        .fold((0.0, 0.0), |(v, e), s| (v + s.value, e + s.error))
}
