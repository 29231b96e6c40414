//! Evaluate command implementation
//!
//! Evaluates the conditional pdf and cdf at every query point of a scenario.

use condist_core::traits::Distribution;
use serde::Serialize;
use tracing::info;

use super::{build_distribution, format_point, format_value};
use crate::config::ScenarioConfig;
use crate::{CliError, Result};

/// Values at one query point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointResult {
    /// Free-coordinate query point
    pub point: Vec<f64>,
    /// Conditional density
    pub pdf: f64,
    /// Conditional cumulative probability
    pub cdf: f64,
}

/// Results for a whole scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationReport {
    /// Names of the free coordinates
    pub description: Vec<String>,
    /// Density of the fixed marginal at the reference values
    pub normalization_factor: f64,
    /// CDF strategy name
    pub strategy: &'static str,
    /// One entry per query point, in scenario order
    pub results: Vec<PointResult>,
}

/// Evaluate every query point of the scenario in parallel.
pub fn evaluate(config: &ScenarioConfig) -> Result<EvaluationReport> {
    let conditional = build_distribution(config)?;

    let pdfs = conditional.pdf_batch(&config.points);
    let cdfs = conditional.cdf_batch(&config.points);

    let results = config
        .points
        .iter()
        .zip(pdfs.into_iter().zip(cdfs))
        .map(|(point, (pdf, cdf))| {
            Ok(PointResult {
                point: point.clone(),
                pdf: pdf?,
                cdf: cdf?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(EvaluationReport {
        description: conditional.description(),
        normalization_factor: conditional.normalization_factor(),
        strategy: conditional.strategy().name(),
        results,
    })
}

/// Run the evaluate command
pub fn run(config: &ScenarioConfig, format: &str) -> Result<()> {
    info!("Starting evaluation...");
    info!("  Query points: {}", config.points.len());
    info!("  CDF strategy: {}", config.strategy.to_strategy().name());
    info!("  Output format: {}", format);

    if !matches!(format, "json" | "table") {
        return Err(CliError::InvalidArgument(format!(
            "Unknown format: {}. Supported: json, table",
            format
        )));
    }

    let report = evaluate(config)?;

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => print_table(&report),
    }

    info!("Evaluation complete");
    Ok(())
}

fn print_table(report: &EvaluationReport) {
    let header = format!("({})", report.description.join(", "));
    let width = report
        .results
        .iter()
        .map(|r| format_point(&r.point).chars().count())
        .chain(std::iter::once(header.chars().count()))
        .max()
        .unwrap_or(0);
    let bar = "─".repeat(width + 2);
    let value_bar = "─".repeat(16);

    println!("\n┌{}┬{}┬{}┐", bar, value_bar, value_bar);
    println!("│ {:<width$} │ {:<14} │ {:<14} │", header, "pdf", "cdf", width = width);
    println!("├{}┼{}┼{}┤", bar, value_bar, value_bar);
    if report.results.is_empty() {
        println!("│ {:<width$} │ {:<14} │ {:<14} │", "(no points)", "", "", width = width);
    }
    for result in &report.results {
        println!(
            "│ {:<width$} │ {:<14} │ {:<14} │",
            format_point(&result.point),
            format_value(result.pdf),
            format_value(result.cdf),
            width = width
        );
    }
    println!("└{}┴{}┴{}┘", bar, value_bar, value_bar);
}
