//! CLI error types.

use std::path::PathBuf;

use condist_core::types::DistributionError;
use condist_engine::ConditioningError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by the `condist` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// Scenario file does not exist
    #[error("Scenario file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Bad command-line argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Scenario could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Conditional distribution could not be built
    #[error(transparent)]
    Conditioning(#[from] ConditioningError),

    /// Base distribution rejected its parameters or a query
    #[error(transparent)]
    Distribution(#[from] DistributionError),

    /// JSON rendering failed
    #[error("Failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
