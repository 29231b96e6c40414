//! Gauss-Kronrod rule construction.
//!
//! The n-point Gauss-Legendre rule is extended to 2n+1 points by adding the
//! n+1 zeros of the Stieltjes polynomial `E_{n+1}`, which is defined by
//!
//! ```text
//! ∫_{-1}^{1} P_n(x) E_{n+1}(x) x^k dx = 0,   k = 0..n
//! ```
//!
//! Nodes and weights are computed once:
//! 1. Gauss-Legendre nodes by Newton iteration on `P_n`
//! 2. `E_{n+1}` expanded in Legendre polynomials, coefficients from the
//!    orthogonality conditions (only odd `k` are non-trivial by parity)
//! 3. Kronrod nodes by bisection between consecutive Gauss nodes
//! 4. Kronrod weights from the Legendre moment equations

use std::f64::consts::PI;
use std::sync::{Arc, OnceLock};

/// Gauss order of the default rule (11-point Gauss, 23-point Kronrod).
pub const DEFAULT_GAUSS_POINTS: usize = 11;

const NEWTON_TOLERANCE: f64 = 1e-15;
const MAX_NEWTON_ITERATIONS: usize = 100;
const MAX_BISECTION_STEPS: usize = 200;

static G11_K23: OnceLock<Arc<GaussKronrodRule>> = OnceLock::new();

/// Embedded Gauss / Gauss-Kronrod pair on `[-1, 1]`.
///
/// Nodes are stored in ascending order. Gauss nodes sit at the odd
/// positions; `gauss_weights` is zero at the Kronrod-only positions so both
/// estimates come out of a single pass over the nodes.
///
/// # Example
///
/// ```
/// use condist_core::math::quadrature::GaussKronrodRule;
///
/// let rule = GaussKronrodRule::g11_k23();
/// assert_eq!(rule.gauss_points(), 11);
/// assert_eq!(rule.nodes().len(), 23);
///
/// // ∫_{-1}^{1} x² dx = 2/3
/// let (kronrod, gauss) = rule.estimate(&mut |x| x * x, -1.0, 1.0);
/// assert!((kronrod - 2.0 / 3.0).abs() < 1e-14);
/// assert!((gauss - 2.0 / 3.0).abs() < 1e-14);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GaussKronrodRule {
    gauss_points: usize,
    nodes: Vec<f64>,
    kronrod_weights: Vec<f64>,
    gauss_weights: Vec<f64>,
}

impl GaussKronrodRule {
    /// Build the `gauss_points`-point Gauss rule and its Kronrod extension.
    ///
    /// # Panics
    ///
    /// Panics if `gauss_points == 0`.
    pub fn new(gauss_points: usize) -> Self {
        assert!(gauss_points > 0, "gauss_points must be > 0");
        let n = gauss_points;

        let (gauss_nodes, gauss_node_weights) = gauss_legendre(n);
        let stieltjes = stieltjes_coefficients(n);

        let mut brackets = Vec::with_capacity(n + 2);
        brackets.push(-1.0);
        brackets.extend_from_slice(&gauss_nodes);
        brackets.push(1.0);

        let mut nodes = Vec::with_capacity(2 * n + 1);
        let mut gauss_weights = Vec::with_capacity(2 * n + 1);
        for i in 0..=n {
            let root = bisect(
                |x| legendre_series(&stieltjes, x),
                brackets[i],
                brackets[i + 1],
            );
            nodes.push(root);
            gauss_weights.push(0.0);
            if i < n {
                nodes.push(gauss_nodes[i]);
                gauss_weights.push(gauss_node_weights[i]);
            }
        }

        let kronrod_weights = moment_weights(&nodes);

        Self {
            gauss_points: n,
            nodes,
            kronrod_weights,
            gauss_weights,
        }
    }

    /// Shared G11/K23 rule, built on first use.
    pub fn g11_k23() -> Arc<Self> {
        Arc::clone(G11_K23.get_or_init(|| Arc::new(Self::new(DEFAULT_GAUSS_POINTS))))
    }

    /// Number of Gauss nodes `n`; the Kronrod rule has `2n + 1`.
    #[inline]
    pub fn gauss_points(&self) -> usize {
        self.gauss_points
    }

    /// Kronrod nodes on `[-1, 1]`, ascending.
    #[inline]
    pub fn nodes(&self) -> &[f64] {
        &self.nodes
    }

    /// Kronrod weights, aligned with [`nodes`](Self::nodes).
    #[inline]
    pub fn kronrod_weights(&self) -> &[f64] {
        &self.kronrod_weights
    }

    /// Embedded Gauss weights, zero at Kronrod-only nodes.
    #[inline]
    pub fn gauss_weights(&self) -> &[f64] {
        &self.gauss_weights
    }

    /// Kronrod and Gauss estimates of `∫_a^b f`.
    pub fn estimate<F>(&self, f: &mut F, a: f64, b: f64) -> (f64, f64)
    where
        F: FnMut(f64) -> f64,
    {
        let center = 0.5 * (a + b);
        let half_length = 0.5 * (b - a);

        let mut kronrod = 0.0;
        let mut gauss = 0.0;
        for ((&z, &wk), &wg) in self
            .nodes
            .iter()
            .zip(self.kronrod_weights.iter())
            .zip(self.gauss_weights.iter())
        {
            let fx = f(center + half_length * z);
            kronrod += wk * fx;
            gauss += wg * fx;
        }

        (kronrod * half_length, gauss * half_length)
    }
}

/// `P_n(x)` and `P'_n(x)` for `|x| < 1`.
fn legendre_with_derivative(n: usize, x: f64) -> (f64, f64) {
    if n == 0 {
        return (1.0, 0.0);
    }
    let mut previous = 1.0;
    let mut current = x;
    for k in 1..n {
        let k = k as f64;
        let next = ((2.0 * k + 1.0) * x * current - k * previous) / (k + 1.0);
        previous = current;
        current = next;
    }
    let derivative = n as f64 * (x * current - previous) / (x * x - 1.0);
    (current, derivative)
}

/// `[P_0(x), ..., P_max_degree(x)]`.
fn legendre_table(max_degree: usize, x: f64) -> Vec<f64> {
    let mut table = Vec::with_capacity(max_degree + 1);
    table.push(1.0);
    if max_degree >= 1 {
        table.push(x);
    }
    for k in 1..max_degree {
        let kf = k as f64;
        let next = ((2.0 * kf + 1.0) * x * table[k] - kf * table[k - 1]) / (kf + 1.0);
        table.push(next);
    }
    table
}

/// `Σ c_j P_j(x)`.
fn legendre_series(coefficients: &[f64], x: f64) -> f64 {
    if coefficients.is_empty() {
        return 0.0;
    }
    legendre_table(coefficients.len() - 1, x)
        .iter()
        .zip(coefficients.iter())
        .map(|(p, c)| p * c)
        .sum()
}

/// Gauss-Legendre nodes (ascending) and weights.
fn gauss_legendre(n: usize) -> (Vec<f64>, Vec<f64>) {
    let mut nodes = vec![0.0; n];
    let mut weights = vec![0.0; n];

    for i in 0..n {
        // Tricomi's initial guess, descending in i
        let mut x = (PI * (i as f64 + 0.75) / (n as f64 + 0.5)).cos();
        for _ in 0..MAX_NEWTON_ITERATIONS {
            let (p, dp) = legendre_with_derivative(n, x);
            let dx = p / dp;
            x -= dx;
            if dx.abs() < NEWTON_TOLERANCE {
                break;
            }
        }
        let (_, dp) = legendre_with_derivative(n, x);
        nodes[n - 1 - i] = x;
        weights[n - 1 - i] = 2.0 / ((1.0 - x * x) * dp * dp);
    }

    (nodes, weights)
}

/// Legendre coefficients of the monic-in-`P_{n+1}` Stieltjes polynomial.
fn stieltjes_coefficients(n: usize) -> Vec<f64> {
    // Exact for the degree 3n + 1 triple products below
    let (xs, ws) = gauss_legendre(2 * n + 2);
    let tables: Vec<Vec<f64>> = xs.iter().map(|&x| legendre_table(n + 1, x)).collect();
    let triple = |j: usize, k: usize| -> f64 {
        tables
            .iter()
            .zip(ws.iter())
            .map(|(p, w)| w * p[n] * p[j] * p[k])
            .sum()
    };

    let unknowns: Vec<usize> = (0..n).filter(|j| (j + n + 1) % 2 == 0).collect();
    let conditions: Vec<usize> = (0..=n).filter(|k| k % 2 == 1).collect();

    let matrix: Vec<Vec<f64>> = conditions
        .iter()
        .map(|&k| unknowns.iter().map(|&j| triple(j, k)).collect())
        .collect();
    let rhs: Vec<f64> = conditions.iter().map(|&k| -triple(n + 1, k)).collect();
    let solution = solve_linear_system(matrix, rhs);

    let mut coefficients = vec![0.0; n + 2];
    coefficients[n + 1] = 1.0;
    for (&j, &c) in unknowns.iter().zip(solution.iter()) {
        coefficients[j] = c;
    }
    coefficients
}

/// Weights integrating `P_0..P_{m-1}` exactly on the `m` given nodes.
fn moment_weights(nodes: &[f64]) -> Vec<f64> {
    let m = nodes.len();
    let tables: Vec<Vec<f64>> = nodes.iter().map(|&x| legendre_table(m - 1, x)).collect();
    let matrix: Vec<Vec<f64>> = (0..m)
        .map(|k| tables.iter().map(|p| p[k]).collect())
        .collect();
    let mut rhs = vec![0.0; m];
    rhs[0] = 2.0;
    solve_linear_system(matrix, rhs)
}

/// Root of `f` in `[lo, hi]` by bisection on the sign change.
fn bisect<F>(f: F, lo: f64, hi: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    let mut a = lo;
    let mut b = hi;
    let mut fa = f(a);

    for _ in 0..MAX_BISECTION_STEPS {
        let mid = 0.5 * (a + b);
        if mid <= a || mid >= b {
            break;
        }
        let fm = f(mid);
        if fm == 0.0 {
            return mid;
        }
        if (fm < 0.0) == (fa < 0.0) {
            a = mid;
            fa = fm;
        } else {
            b = mid;
        }
    }

    0.5 * (a + b)
}

/// Gaussian elimination with partial pivoting on a small dense system.
fn solve_linear_system(mut matrix: Vec<Vec<f64>>, mut rhs: Vec<f64>) -> Vec<f64> {
    let n = rhs.len();

    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&a, &b| {
                matrix[a][col]
                    .abs()
                    .partial_cmp(&matrix[b][col].abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .unwrap_or(col);
        matrix.swap(col, pivot);
        rhs.swap(col, pivot);

        let diag = matrix[col][col];
        for row in (col + 1)..n {
            let factor = matrix[row][col] / diag;
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                matrix[row][k] -= factor * matrix[col][k];
            }
            rhs[row] -= factor * rhs[col];
        }
    }

    let mut solution = vec![0.0; n];
    for row in (0..n).rev() {
        let tail: f64 = ((row + 1)..n)
            .map(|k| matrix[row][k] * solution[k])
            .sum();
        solution[row] = (rhs[row] - tail) / matrix[row][row];
    }
    solution
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    // QUADPACK qk15 constants (positive half, outermost first)
    const XGK15: [f64; 8] = [
        0.991_455_371_120_812_6,
        0.949_107_912_342_758_5,
        0.864_864_423_359_769_1,
        0.741_531_185_599_394_4,
        0.586_087_235_467_691_1,
        0.405_845_151_377_397_2,
        0.207_784_955_007_898_5,
        0.0,
    ];
    const WGK15: [f64; 8] = [
        0.022_935_322_010_529_22,
        0.063_092_092_629_978_55,
        0.104_790_010_322_250_2,
        0.140_653_259_715_525_9,
        0.169_004_726_639_267_9,
        0.190_350_578_064_785_4,
        0.204_432_940_075_298_9,
        0.209_482_141_084_727_8,
    ];
    const WG7: [f64; 4] = [
        0.129_484_966_168_869_7,
        0.279_705_391_489_276_7,
        0.381_830_050_505_118_9,
        0.417_959_183_673_469_4,
    ];

    #[test]
    fn test_gauss_legendre_three_points() {
        let (nodes, weights) = gauss_legendre(3);
        let r = (0.6_f64).sqrt();
        assert_abs_diff_eq!(nodes[0], -r, epsilon = 1e-15);
        assert_abs_diff_eq!(nodes[1], 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(nodes[2], r, epsilon = 1e-15);
        assert_abs_diff_eq!(weights[0], 5.0 / 9.0, epsilon = 1e-15);
        assert_abs_diff_eq!(weights[1], 8.0 / 9.0, epsilon = 1e-15);
    }

    #[test]
    fn test_g7_k15_matches_quadpack() {
        let rule = GaussKronrodRule::new(7);
        assert_eq!(rule.nodes().len(), 15);

        // Upper half of the ascending node list, outermost first
        for i in 0..8 {
            let pos = 14 - i;
            assert_abs_diff_eq!(rule.nodes()[pos], XGK15[i], epsilon = 1e-13);
            assert_abs_diff_eq!(rule.kronrod_weights()[pos], WGK15[i], epsilon = 1e-13);
        }
        for i in 0..4 {
            let pos = 13 - 2 * i;
            assert_abs_diff_eq!(rule.gauss_weights()[pos], WG7[i], epsilon = 1e-13);
        }
    }

    #[test]
    fn test_nodes_symmetric_and_interlaced() {
        let rule = GaussKronrodRule::g11_k23();
        let nodes = rule.nodes();
        assert_eq!(nodes.len(), 23);
        for i in 0..nodes.len() {
            assert_abs_diff_eq!(nodes[i], -nodes[nodes.len() - 1 - i], epsilon = 1e-14);
        }
        assert!(nodes.windows(2).all(|w| w[0] < w[1]));
        assert!(nodes[0] > -1.0 && nodes[22] < 1.0);
        for (i, &wg) in rule.gauss_weights().iter().enumerate() {
            assert_eq!(wg != 0.0, i % 2 == 1, "gauss weight misplaced at {}", i);
        }
    }

    #[test]
    fn test_weights_positive_and_sum_to_two() {
        let rule = GaussKronrodRule::g11_k23();
        assert!(rule.kronrod_weights().iter().all(|&w| w > 0.0));
        assert_abs_diff_eq!(rule.kronrod_weights().iter().sum::<f64>(), 2.0, epsilon = 1e-13);
        assert_abs_diff_eq!(rule.gauss_weights().iter().sum::<f64>(), 2.0, epsilon = 1e-13);
    }

    #[test]
    fn test_polynomial_exactness() {
        let rule = GaussKronrodRule::g11_k23();
        // Kronrod rule with odd n is exact up to degree 3n + 2
        for degree in [0_i32, 2, 10, 21, 34] {
            let exact = if degree % 2 == 0 {
                2.0 / (degree as f64 + 1.0)
            } else {
                0.0
            };
            let (kronrod, _) = rule.estimate(&mut |x: f64| x.powi(degree), -1.0, 1.0);
            assert_abs_diff_eq!(kronrod, exact, epsilon = 1e-13);
        }
        // Gauss part is exact up to degree 2n - 1
        let (_, gauss) = rule.estimate(&mut |x: f64| x.powi(20), -1.0, 1.0);
        assert_abs_diff_eq!(gauss, 2.0 / 21.0, epsilon = 1e-13);
    }

    #[test]
    fn test_estimate_on_shifted_interval() {
        let rule = GaussKronrodRule::g11_k23();
        let (kronrod, gauss) = rule.estimate(&mut |x: f64| x.exp(), 0.0, 1.0);
        let exact = std::f64::consts::E - 1.0;
        assert_abs_diff_eq!(kronrod, exact, epsilon = 1e-14);
        assert_abs_diff_eq!(gauss, exact, epsilon = 1e-14);
    }

    #[test]
    fn test_shared_rule_is_cached() {
        let a = GaussKronrodRule::g11_k23();
        let b = GaussKronrodRule::g11_k23();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    #[should_panic(expected = "gauss_points must be > 0")]
    fn test_zero_points_panics() {
        let _ = GaussKronrodRule::new(0);
    }
}
