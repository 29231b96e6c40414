//! Scenario configuration management
//!
//! A scenario is a TOML file describing the base distribution, the
//! conditioning, the CDF strategy and the query points. Environment variables
//! and command-line arguments are layered on top of the file.
//!
//! ```toml
//! log_level = "info"
//! points = [[1.0, 1.0], [0.0, -0.5]]
//!
//! [base]
//! family = "independent"
//! components = [
//!     { kind = "normal", mean = 0.0, std_dev = 1.0 },
//!     { kind = "normal", mean = 0.0, std_dev = 1.0 },
//!     { kind = "uniform", lower = -1.0, upper = 1.0 },
//! ]
//!
//! [conditioning]
//! fixed_indices = [1]
//! reference_values = [2.0]
//!
//! [strategy]
//! method = "integration"
//! max_sub_intervals = 100
//! max_absolute_error = 1e-12
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;

use condist_core::math::quadrature::QuadratureConfig;
use condist_core::traits::BaseDistribution;
use condist_core::types::DistributionError;
use condist_engine::strategy::DEFAULT_SAMPLE_SIZE;
use condist_engine::{CdfStrategy, SamplingConfig};
use condist_models::composed::ComposedDistribution;
use condist_models::multivariate::{CorrelationMatrix, MultivariateNormal};
use condist_models::univariate::{Normal, Uniform, Univariate};
use serde::Deserialize;
use thiserror::Error;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Environment variable error: {0}")]
    EnvError(String),

    #[error("Query point {index} has {got} coordinates, expected {expected}")]
    PointDimension {
        index: usize,
        expected: usize,
        got: usize,
    },
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// One independent univariate component
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ComponentConfig {
    Normal { mean: f64, std_dev: f64 },
    Uniform { lower: f64, upper: f64 },
}

impl ComponentConfig {
    fn build(&self) -> Result<Univariate, DistributionError> {
        match *self {
            ComponentConfig::Normal { mean, std_dev } => Ok(Normal::new(mean, std_dev)?.into()),
            ComponentConfig::Uniform { lower, upper } => Ok(Uniform::new(lower, upper)?.into()),
        }
    }
}

/// Base distribution families
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum BaseConfig {
    /// Product of independent univariate components
    Independent {
        components: Vec<ComponentConfig>,
        #[serde(default)]
        names: Option<Vec<String>>,
    },
    /// Correlated normal; `correlation` is row-major
    MultivariateNormal {
        mean: Vec<f64>,
        std_devs: Vec<f64>,
        correlation: Vec<f64>,
        #[serde(default)]
        names: Option<Vec<String>>,
    },
}

impl BaseConfig {
    /// Number of coordinates of the base distribution
    pub fn dimension(&self) -> usize {
        match self {
            BaseConfig::Independent { components, .. } => components.len(),
            BaseConfig::MultivariateNormal { mean, .. } => mean.len(),
        }
    }

    /// Build the base distribution
    pub fn build(&self) -> Result<Box<dyn BaseDistribution>, DistributionError> {
        match self {
            BaseConfig::Independent { components, names } => {
                let components = components
                    .iter()
                    .map(ComponentConfig::build)
                    .collect::<Result<Vec<_>, _>>()?;
                let mut base = ComposedDistribution::new(components)?;
                if let Some(names) = names {
                    base = base.with_description(names.clone())?;
                }
                Ok(Box::new(base))
            }
            BaseConfig::MultivariateNormal {
                mean,
                std_devs,
                correlation,
                names,
            } => {
                let correlation = CorrelationMatrix::new(correlation, mean.len())?;
                let mut base = MultivariateNormal::new(mean.clone(), std_devs.clone(), correlation)?;
                if let Some(names) = names {
                    base = base.with_description(names.clone())?;
                }
                Ok(Box::new(base))
            }
        }
    }
}

/// Fixed coordinates and their reference values
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConditioningConfig {
    pub fixed_indices: Vec<usize>,
    pub reference_values: Vec<f64>,
}

fn default_max_sub_intervals() -> usize {
    QuadratureConfig::default().max_sub_intervals
}

fn default_max_absolute_error() -> f64 {
    QuadratureConfig::default().max_absolute_error
}

fn default_sample_size() -> usize {
    DEFAULT_SAMPLE_SIZE
}

/// CDF strategy section
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum StrategyConfig {
    Integration {
        #[serde(default = "default_max_sub_intervals")]
        max_sub_intervals: usize,
        #[serde(default = "default_max_absolute_error")]
        max_absolute_error: f64,
    },
    Sampling {
        #[serde(default = "default_sample_size")]
        sample_size: usize,
        #[serde(default)]
        seed: Option<u64>,
    },
}

impl Default for StrategyConfig {
    fn default() -> Self {
        StrategyConfig::Integration {
            max_sub_intervals: default_max_sub_intervals(),
            max_absolute_error: default_max_absolute_error(),
        }
    }
}

impl StrategyConfig {
    /// Engine strategy for this section
    pub fn to_strategy(&self) -> CdfStrategy {
        match *self {
            StrategyConfig::Integration {
                max_sub_intervals,
                max_absolute_error,
            } => CdfStrategy::integration(max_sub_intervals, max_absolute_error),
            StrategyConfig::Sampling { sample_size, seed } => {
                CdfStrategy::Sampling(SamplingConfig { sample_size, seed })
            }
        }
    }

    /// Apply sample size and seed overrides.
    ///
    /// A sample size switches an integration strategy to sampling; a seed
    /// alone only affects a sampling strategy.
    fn override_sampling(&mut self, sample_size: Option<usize>, seed: Option<u64>) {
        match self {
            StrategyConfig::Sampling {
                sample_size: size,
                seed: current,
            } => {
                if let Some(n) = sample_size {
                    *size = n;
                }
                if seed.is_some() {
                    *current = seed;
                }
            }
            StrategyConfig::Integration { .. } => {
                if let Some(n) = sample_size {
                    *self = StrategyConfig::Sampling {
                        sample_size: n,
                        seed,
                    };
                }
            }
        }
    }
}

/// A complete conditioning scenario
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScenarioConfig {
    /// Log level
    #[serde(default, deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Base distribution
    pub base: BaseConfig,
    /// Fixed coordinates
    #[serde(default)]
    pub conditioning: ConditioningConfig,
    /// CDF strategy
    #[serde(default)]
    pub strategy: StrategyConfig,
    /// Free-coordinate query points
    #[serde(default)]
    pub points: Vec<Vec<f64>>,
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

impl ScenarioConfig {
    /// Parse a scenario from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: ScenarioConfig = toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a scenario from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read scenario file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Number of free coordinates implied by the base and the conditioning
    pub fn free_dimension(&self) -> usize {
        self.base
            .dimension()
            .saturating_sub(self.conditioning.fixed_indices.len())
    }

    /// Validate the query points against the free dimension.
    ///
    /// Index and reference checks are left to the engine.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let expected = self.free_dimension();
        for (index, point) in self.points.iter().enumerate() {
            if point.len() != expected {
                return Err(ConfigError::PointDimension {
                    index,
                    expected,
                    got: point.len(),
                });
            }
        }
        Ok(())
    }

    /// Apply `CONDIST_*` environment variables
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(log_level) = std::env::var("CONDIST_LOG_LEVEL") {
            self.log_level = LogLevel::from_str(&log_level)?;
        }

        let sample_size = match std::env::var("CONDIST_SAMPLE_SIZE") {
            Ok(s) => Some(s.parse().map_err(|_| {
                ConfigError::EnvError(format!("CONDIST_SAMPLE_SIZE is not a count: {}", s))
            })?),
            Err(_) => None,
        };
        let seed = match std::env::var("CONDIST_SEED") {
            Ok(s) => Some(s.parse().map_err(|_| {
                ConfigError::EnvError(format!("CONDIST_SEED is not an integer: {}", s))
            })?),
            Err(_) => None,
        };
        self.strategy.override_sampling(sample_size, seed);
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(log_level) = &cli.log_level {
            self.log_level = LogLevel::from_str(log_level)?;
        }
        self.strategy.override_sampling(cli.sample_size, cli.seed);
        Ok(())
    }
}

/// CLI arguments relevant to scenario loading
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Scenario file path
    pub scenario: PathBuf,
    /// Log level override
    pub log_level: Option<String>,
    /// Sample size override
    pub sample_size: Option<usize>,
    /// Seed override
    pub seed: Option<u64>,
}

/// Build the scenario from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Scenario file
pub fn build_config(cli: &CliArgs) -> Result<ScenarioConfig, ConfigError> {
    let mut config = ScenarioConfig::from_file(&cli.scenario)?;
    config.apply_env()?;
    config.merge_with_cli(cli)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use condist_core::traits::Distribution;
    use std::io::Write;

    const INDEPENDENT: &str = r#"
points = [[1.0, 1.0], [0.0, -0.5]]

[base]
family = "independent"
components = [
    { kind = "normal", mean = 0.0, std_dev = 1.0 },
    { kind = "normal", mean = 0.0, std_dev = 1.0 },
    { kind = "uniform", lower = -1.0, upper = 1.0 },
]
names = ["rate", "spot", "vol"]

[conditioning]
fixed_indices = [1]
reference_values = [2.0]
"#;

    const CORRELATED: &str = r#"
log_level = "debug"
points = [[0.5]]

[base]
family = "multivariate_normal"
mean = [0.0, 0.0]
std_devs = [1.0, 1.0]
correlation = [1.0, 0.5, 0.5, 1.0]

[conditioning]
fixed_indices = [1]
reference_values = [1.0]

[strategy]
method = "sampling"
sample_size = 5000
seed = 7
"#;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Info").unwrap(), LogLevel::Info);
        assert_eq!(LogLevel::from_str("WARN").unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::from_str("error").unwrap(), LogLevel::Error);
        assert!(LogLevel::from_str("verbose").is_err());
        assert_eq!(LogLevel::Warn.to_string(), "warn");
    }

    #[test]
    fn test_parse_independent_scenario() {
        let config = ScenarioConfig::from_toml(INDEPENDENT).unwrap();
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.base.dimension(), 3);
        assert_eq!(config.free_dimension(), 2);
        assert_eq!(config.conditioning.fixed_indices, vec![1]);
        assert_eq!(config.strategy, StrategyConfig::default());
        assert_eq!(config.strategy.to_strategy(), CdfStrategy::default());

        let base = config.base.build().unwrap();
        assert_eq!(base.dimension(), 3);
        assert_eq!(base.description()[2], "vol");
    }

    #[test]
    fn test_parse_correlated_scenario() {
        let config = ScenarioConfig::from_toml(CORRELATED).unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(
            config.strategy.to_strategy(),
            CdfStrategy::Sampling(SamplingConfig::new(5000).with_seed(7))
        );
        assert_eq!(config.base.build().unwrap().dimension(), 2);
    }

    #[test]
    fn test_integration_budget_defaults() {
        let toml = format!("{}\n[strategy]\nmethod = \"integration\"\nmax_sub_intervals = 7\n", INDEPENDENT);
        let config = ScenarioConfig::from_toml(&toml).unwrap();
        assert_eq!(
            config.strategy,
            StrategyConfig::Integration {
                max_sub_intervals: 7,
                max_absolute_error: QuadratureConfig::default().max_absolute_error,
            }
        );
    }

    #[test]
    fn test_point_dimension_rejected() {
        let toml = INDEPENDENT.replace("[0.0, -0.5]", "[0.0]");
        let err = ScenarioConfig::from_toml(&toml).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::PointDimension {
                index: 1,
                expected: 2,
                got: 1
            }
        ));
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let toml = format!("log_level = \"loud\"\n{}", INDEPENDENT);
        assert!(matches!(
            ScenarioConfig::from_toml(&toml),
            Err(ConfigError::FileError(_))
        ));
    }

    #[test]
    fn test_invalid_parameters_surface_on_build() {
        let toml = CORRELATED.replace("0.5, 0.5", "1.5, 1.5");
        let config = ScenarioConfig::from_toml(&toml).unwrap();
        assert!(matches!(
            config.base.build(),
            Err(DistributionError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_merge_with_cli() {
        let mut config = ScenarioConfig::from_toml(INDEPENDENT).unwrap();
        let cli = CliArgs {
            log_level: Some("warn".to_string()),
            sample_size: Some(1000),
            seed: Some(3),
            ..Default::default()
        };
        config.merge_with_cli(&cli).unwrap();
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(
            config.strategy,
            StrategyConfig::Sampling {
                sample_size: 1000,
                seed: Some(3)
            }
        );

        let bad = CliArgs {
            log_level: Some("loud".to_string()),
            ..Default::default()
        };
        assert!(config.merge_with_cli(&bad).is_err());
    }

    #[test]
    fn test_seed_alone_keeps_integration() {
        let mut strategy = StrategyConfig::default();
        strategy.override_sampling(None, Some(9));
        assert_eq!(strategy, StrategyConfig::default());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CORRELATED.as_bytes()).unwrap();

        let config = ScenarioConfig::from_file(file.path()).unwrap();
        assert_eq!(config.points, vec![vec![0.5]]);

        let missing = file.path().with_extension("missing");
        assert!(matches!(
            ScenarioConfig::from_file(&missing),
            Err(ConfigError::FileError(_))
        ));
    }
}
