//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod check;
pub mod evaluate;

use condist_core::traits::{BaseDistribution, Distribution};
use condist_engine::ConditionalDistribution;
use tracing::debug;

use crate::config::ScenarioConfig;
use crate::Result;

/// Conditional distribution over a type-erased base.
pub type ScenarioDistribution = ConditionalDistribution<Box<dyn BaseDistribution>>;

/// Build the conditional distribution a scenario describes.
pub fn build_distribution(config: &ScenarioConfig) -> Result<ScenarioDistribution> {
    let base = config.base.build()?;
    debug!(dimension = base.dimension(), "built base distribution");

    let conditional = ConditionalDistribution::new(
        base,
        config.conditioning.fixed_indices.clone(),
        config.conditioning.reference_values.clone(),
        config.strategy.to_strategy(),
    )?;
    Ok(conditional)
}

/// Render a float for table output.
pub(crate) fn format_value(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{:.10}", value)
    }
}

/// Render a point as `(a, b, ..)`.
pub(crate) fn format_point(point: &[f64]) -> String {
    let coords: Vec<String> = point.iter().map(|x| format!("{}", x)).collect();
    format!("({})", coords.join(", "))
}
