//! Cross-family consistency tests.
//!
//! Independent products and identity-correlated Gaussians describe the same
//! law and must agree through the `BaseDistribution` interface.

use approx::assert_relative_eq;
use condist_core::traits::{BaseDistribution, Distribution};
use condist_models::composed::ComposedDistribution;
use condist_models::multivariate::{CorrelationMatrix, MultivariateNormal};
use condist_models::univariate::{Normal, Univariate};
use proptest::prelude::*;

fn pair() -> (ComposedDistribution, MultivariateNormal) {
    let composed = ComposedDistribution::new(vec![
        Univariate::Normal(Normal::new(0.5, 1.5).unwrap()),
        Univariate::Normal(Normal::new(-1.0, 0.7).unwrap()),
        Univariate::Normal(Normal::new(2.0, 1.0).unwrap()),
    ])
    .unwrap();
    let mvn = MultivariateNormal::new(
        vec![0.5, -1.0, 2.0],
        vec![1.5, 0.7, 1.0],
        CorrelationMatrix::identity(3),
    )
    .unwrap();
    (composed, mvn)
}

#[test]
fn test_ranges_agree() {
    let (composed, mvn) = pair();
    let a = composed.range();
    let b = mvn.range();
    for i in 0..3 {
        assert_relative_eq!(a.lower_bound()[i], b.lower_bound()[i], max_relative = 1e-15);
        assert_relative_eq!(a.upper_bound()[i], b.upper_bound()[i], max_relative = 1e-15);
    }
}

#[test]
fn test_marginal_cdfs_agree() {
    let (composed, mvn) = pair();
    let a = composed.marginal(&[2, 0]).unwrap();
    let b = mvn.marginal(&[2, 0]).unwrap();
    let point = [2.5, 0.0];
    assert_relative_eq!(
        a.cdf(&point).unwrap(),
        b.cdf(&point).unwrap(),
        max_relative = 1e-9
    );
}

#[test]
fn test_single_coordinate_marginals_are_exact() {
    let (composed, mvn) = pair();
    for i in 0..3 {
        let a = composed.marginal(&[i]).unwrap();
        let b = mvn.marginal(&[i]).unwrap();
        for x in [-3.0, 0.0, 1.7] {
            assert_relative_eq!(a.cdf(&[x]).unwrap(), b.cdf(&[x]).unwrap(), max_relative = 1e-14);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_pdfs_agree(
        x in -4.0f64..4.0,
        y in -4.0f64..4.0,
        z in -4.0f64..4.0,
    ) {
        let (composed, mvn) = pair();
        let p = [x, y, z];
        let a = composed.pdf(&p).unwrap();
        let b = mvn.pdf(&p).unwrap();
        prop_assert!((a - b).abs() <= 1e-13 * a.max(b).max(1e-300));
    }
}
