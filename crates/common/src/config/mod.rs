//! Configuration management for Spear
//!
//! Supports loading configuration from:
//! - Environment variables (prefixed with SPEAR__)
//! - Configuration files (config/default, config/{SPEAR_ENV}, config/local)
//! - Default values

use crate::errors::{Result, SpearError};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Ranking algorithm settings
    pub ranking: RankingSettings,

    /// Where activities are read from
    pub input: InputSettings,

    /// How ranked lists are written
    pub output: OutputSettings,

    /// Logging and metrics
    pub observability: ObservabilitySettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RankingSettings {
    /// Number of mutual reinforcement rounds
    #[serde(default = "default_iterations")]
    pub iterations: usize,

    /// Credit function applied to raw action-position scores
    #[serde(default)]
    pub credit: CreditScheme,

    /// Report pipeline progress at info level
    #[serde(default = "default_verbose")]
    pub verbose: bool,

    /// Keep only the top-k entries of each ranked list
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Named credit functions selectable from configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CreditScheme {
    /// C(x) = x^0.5
    #[default]
    Sqrt,
    /// C(x) = 1, which turns the run into classical HITS
    Constant,
    /// C(x) = x
    Linear,
    /// C(x) = ln(1 + x)
    Log,
    /// C(x) = x^exponent
    Power { exponent: f64 },
}

impl CreditScheme {
    /// Evaluate the credit function for a raw score
    pub fn apply(&self, raw: f64) -> f64 {
        match self {
            CreditScheme::Sqrt => raw.sqrt(),
            CreditScheme::Constant => 1.0,
            CreditScheme::Linear => raw,
            CreditScheme::Log => raw.ln_1p(),
            CreditScheme::Power { exponent } => raw.powf(*exponent),
        }
    }

    /// Short label for logs and metrics
    pub fn name(&self) -> &'static str {
        match self {
            CreditScheme::Sqrt => "sqrt",
            CreditScheme::Constant => "constant",
            CreditScheme::Linear => "linear",
            CreditScheme::Log => "log",
            CreditScheme::Power { .. } => "power",
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct InputSettings {
    /// Activity file; the first command-line argument takes precedence
    pub path: Option<String>,

    /// Record layout of the activity file
    #[serde(default)]
    pub format: InputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputFormat {
    /// A single JSON array of records
    #[default]
    Json,
    /// One JSON record per line
    JsonLines,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputSettings {
    #[serde(default)]
    pub format: OutputFormat,

    /// Pretty-print JSON output
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilitySettings {
    /// Log level (trace, debug, info, warn, error); RUST_LOG overrides it
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub json_logging: bool,

    /// Render Prometheus metrics to stderr after the run
    #[serde(default)]
    pub metrics_enabled: bool,
}

// Default value functions
fn default_iterations() -> usize { crate::DEFAULT_ITERATIONS }
fn default_verbose() -> bool { true }
fn default_pretty() -> bool { true }
fn default_log_level() -> String { "info".to_string() }

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            iterations: default_iterations(),
            credit: CreditScheme::default(),
            verbose: default_verbose(),
            limit: None,
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            pretty: default_pretty(),
        }
    }
}

impl Default for ObservabilitySettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logging: false,
            metrics_enabled: false,
        }
    }
}

impl RankingSettings {
    /// Reject settings the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(SpearError::validation(
                "ranking.iterations",
                "iterations must be a positive integer",
            ));
        }
        if self.limit == Some(0) {
            return Err(SpearError::validation(
                "ranking.limit",
                "limit must be positive when set",
            ));
        }
        if let CreditScheme::Power { exponent } = self.credit {
            if !exponent.is_finite() {
                return Err(SpearError::validation(
                    "ranking.credit.exponent",
                    "exponent must be finite",
                ));
            }
        }
        Ok(())
    }
}

impl AppConfig {
    /// Load configuration from environment and files
    pub fn load() -> Result<Self> {
        let env = std::env::var("SPEAR_ENV").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            // Load base config file
            .add_source(File::with_name("config/default").required(false))
            // Load environment-specific config
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            // Load local overrides
            .add_source(File::with_name("config/local").required(false))
            // Load from environment variables with SPEAR__ prefix
            // e.g., SPEAR__RANKING__ITERATIONS=100
            .add_source(
                Environment::with_prefix("SPEAR")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a specific configuration file instead of the `config/` layers
    ///
    /// SPEAR__ environment variables still override the file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path))
            .add_source(
                Environment::with_prefix("SPEAR")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate every section
    pub fn validate(&self) -> Result<()> {
        self.ranking.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.ranking.iterations, 250);
        assert_eq!(config.ranking.credit, CreditScheme::Sqrt);
        assert!(config.ranking.verbose);
        assert_eq!(config.ranking.limit, None);
        assert_eq!(config.input.format, InputFormat::Json);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_credit_schemes() {
        assert_eq!(CreditScheme::Sqrt.apply(9.0), 3.0);
        assert_eq!(CreditScheme::Constant.apply(42.0), 1.0);
        assert_eq!(CreditScheme::Linear.apply(7.0), 7.0);
        assert!((CreditScheme::Log.apply(1.0) - 2f64.ln()).abs() < 1e-12);
        assert_eq!(CreditScheme::Power { exponent: 2.0 }.apply(3.0), 9.0);
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let settings = RankingSettings {
            iterations: 0,
            ..RankingSettings::default()
        };
        let err = settings.validate().unwrap_err();
        assert!(err.is_input_error());
    }

    #[test]
    fn test_zero_limit_rejected() {
        let settings = RankingSettings {
            limit: Some(0),
            ..RankingSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_credit_scheme_deserialization() {
        let settings: RankingSettings =
            serde_json::from_str(r#"{"credit": {"kind": "power", "exponent": 0.25}}"#).unwrap();
        assert_eq!(settings.credit, CreditScheme::Power { exponent: 0.25 });
        assert_eq!(settings.iterations, 250);

        let settings: RankingSettings =
            serde_json::from_str(r#"{"iterations": 10, "credit": {"kind": "constant"}}"#).unwrap();
        assert_eq!(settings.credit, CreditScheme::Constant);
        assert_eq!(settings.iterations, 10);
    }

    fn write_temp_config(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "spear-{}-{}.toml",
            name,
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_from_file() {
        let path = write_temp_config(
            "from-file",
            r#"
[ranking]
iterations = 40
limit = 5
credit = { kind = "power", exponent = 0.75 }

[output]
format = "text"
"#,
        );

        let config = AppConfig::from_file(&path);
        std::fs::remove_file(&path).ok();
        let config = config.unwrap();

        assert_eq!(config.ranking.iterations, 40);
        assert_eq!(config.ranking.limit, Some(5));
        assert_eq!(config.ranking.credit, CreditScheme::Power { exponent: 0.75 });
        assert_eq!(config.output.format, OutputFormat::Text);
        assert_eq!(config.input.format, InputFormat::Json);
    }

    #[test]
    fn test_from_file_validates() {
        let path = write_temp_config("invalid", "[ranking]\niterations = 0\n");

        let err = AppConfig::from_file(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, Err(SpearError::Validation { .. })));
    }

    #[test]
    fn test_from_missing_file_is_configuration_error() {
        let err = AppConfig::from_file(Path::new("/nonexistent/spear.toml")).unwrap_err();
        assert_eq!(err.code(), crate::errors::ErrorCode::ConfigurationError);
    }
}
