//! Check command implementation
//!
//! Validates a scenario and reports the derived quantities of the
//! conditional distribution without evaluating any query point.

use condist_core::traits::Distribution;
use serde::Serialize;
use tracing::info;

use super::{build_distribution, format_point, format_value};
use crate::config::ScenarioConfig;
use crate::Result;

/// Derived quantities of a scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckReport {
    /// Names of the free coordinates
    pub description: Vec<String>,
    /// Number of free coordinates
    pub free_dimension: usize,
    /// Lower corner of the free range
    pub range_lower: Vec<f64>,
    /// Upper corner of the free range
    pub range_upper: Vec<f64>,
    /// Density of the fixed marginal at the reference values
    pub normalization_factor: f64,
    /// CDF strategy name
    pub strategy: &'static str,
    /// Number of query points in the scenario
    pub points: usize,
}

/// Build the scenario and collect its derived quantities.
pub fn check(config: &ScenarioConfig) -> Result<CheckReport> {
    let conditional = build_distribution(config)?;
    let range = conditional.range();

    Ok(CheckReport {
        description: conditional.description(),
        free_dimension: conditional.dimension(),
        range_lower: range.lower_bound().to_vec(),
        range_upper: range.upper_bound().to_vec(),
        normalization_factor: conditional.normalization_factor(),
        strategy: conditional.strategy().name(),
        points: config.points.len(),
    })
}

/// Run the check command
pub fn run(config: &ScenarioConfig) -> Result<()> {
    info!("Checking scenario...");
    let report = check(config)?;

    if report.normalization_factor == 0.0 {
        info!("Normalisation factor is zero: pdf and cdf values will be NaN or infinite");
    }

    println!("Scenario OK");
    println!("  Free coordinates:     {}", report.description.join(", "));
    println!("  Free dimension:       {}", report.free_dimension);
    println!("  Range lower:          {}", format_point(&report.range_lower));
    println!("  Range upper:          {}", format_point(&report.range_upper));
    println!(
        "  Normalisation factor: {}",
        format_value(report.normalization_factor)
    );
    println!("  CDF strategy:         {}", report.strategy);
    println!("  Query points:         {}", report.points);

    info!("Check complete");
    Ok(())
}
