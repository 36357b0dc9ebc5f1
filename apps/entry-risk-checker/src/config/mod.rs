//! Configuration loading for the entry risk checker.
//!
//! YAML with `${VAR}` / `${VAR:-default}` environment interpolation. Every
//! section is optional and falls back to the built-in defaults.
//!
//! # Usage
//!
//! ```rust,ignore
//! use entry_risk_checker::config::load_config;
//!
//! // Load from default path (config.yaml)
//! let config = load_config(None)?;
//!
//! let calculator = config.calculator.to_calculator();
//! let result = calculator.calculate(&input, &config.risk);
//! ```

mod analytics;
mod calculator;
mod observability;
mod rules;

use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

pub use analytics::AnalyticsConfig;
pub use calculator::CalculatorConfig;
pub use observability::{LoggingConfig, ObservabilityConfig};
pub use rules::RulesConfig;

use crate::risk::{RiskSettings, SettingsError};

/// Path used when no config file is given.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Risk settings violate their invariant.
    #[error("Invalid risk settings: {0}")]
    InvalidRisk(#[from] SettingsError),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Account and risk settings.
    #[serde(default)]
    pub risk: RiskSettings,
    /// Personal rule list.
    #[serde(default)]
    pub rules: RulesConfig,
    /// Calculator tunables.
    #[serde(default)]
    pub calculator: CalculatorConfig,
    /// Analytics options.
    #[serde(default)]
    pub analytics: AnalyticsConfig,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable interpolation.
///
/// `path` defaults to `config.yaml`.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or(DEFAULT_CONFIG_PATH);

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load `path` if given, otherwise `config.yaml` if present, otherwise defaults.
///
/// An explicitly given path must exist.
pub fn load_config_or_default(path: Option<&str>) -> Result<Config, ConfigError> {
    if path.is_none() && !Path::new(DEFAULT_CONFIG_PATH).exists() {
        info!(path = DEFAULT_CONFIG_PATH, "Config file not found, using defaults");
        let config = Config::default();
        validate_config(&config)?;
        return Ok(config);
    }
    load_config(path)
}

/// Load configuration from a YAML string (useful for testing).
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = serde_yaml_bw::from_str(&interpolated)?;
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax.
#[allow(clippy::expect_used)] // Regex is compile-time constant
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let var_name = cap.get(1).map_or("", |m| m.as_str());
        let default_value = cap.get(2).map_or("", |m| m.as_str());
        match std::env::var(var_name) {
            Ok(v) if !v.is_empty() => v,
            _ => default_value.to_string(),
        }
    })
    .into_owned()
}

/// Validate configuration values.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    config.risk.validate()?;

    if config.calculator.tolerance < Decimal::ZERO {
        return Err(ConfigError::ValidationError(
            "calculator.tolerance must not be negative".to_string(),
        ));
    }

    if config.calculator.reference_jpy_rate <= Decimal::ZERO {
        return Err(ConfigError::ValidationError(
            "calculator.reference_jpy_rate must be positive".to_string(),
        ));
    }

    if config.analytics.offset().is_none() {
        return Err(ConfigError::ValidationError(format!(
            "analytics.utc_offset_minutes must be within one day (got {})",
            config.analytics.utc_offset_minutes
        )));
    }

    if config.analytics.top_rule_count == 0 {
        return Err(ConfigError::ValidationError(
            "analytics.top_rule_count must be positive".to_string(),
        ));
    }

    let logging = &config.observability.logging;
    if !observability::LOG_LEVELS.contains(&logging.level.to_lowercase().as_str()) {
        return Err(ConfigError::ValidationError(format!(
            "observability.logging.level must be one of: {:?}",
            observability::LOG_LEVELS
        )));
    }
    if !observability::LOG_FORMATS.contains(&logging.format.to_lowercase().as_str()) {
        return Err(ConfigError::ValidationError(format!(
            "observability.logging.format must be one of: {:?}",
            observability::LOG_FORMATS
        )));
    }

    Ok(())
}
