//! Configuration management for the classification and derivation engine.
//!
//! This module provides the core configuration infrastructure: [`EngineConfig`]
//! – the validated bundle of tunables the confidence and risk layers read –
//! and [`EngineConfigBuilder`] – the builder that resolves it from a file,
//! then environment overrides.
//!
//! ## Configuration Hierarchy
//!
//! Settings are resolved in the following order (later wins):
//!
//! 1. Compiled defaults
//! 2. Config file (`dspm-core.toml`, `.yaml`, or `.json`)
//! 3. Environment variables (`DSPM_*`)
//!
//! ## Example
//!
//! ```rust,ignore
//! use dspm_core::config::EngineConfigBuilder;
//!
//! let config = EngineConfigBuilder::new()
//!     .with_file("config/dspm.toml")?
//!     .with_env()
//!     .build()?;
//!
//! assert!(config.context_window_size > 0);
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::confidence::{ConfidenceThresholds, ConfidenceWeights};
use crate::risk::RiskFactorWeights;

/// Errors that can occur while resolving an [`EngineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file at {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the configuration file's contents.
    #[error("failed to parse {format} config: {source}")]
    ParseError {
        format: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Unsupported or unrecognised configuration file extension.
    #[error("unsupported config file format: {message}")]
    UnsupportedFormat { message: String },

    /// Configuration validation failed (out-of-range weight, non-monotone
    /// thresholds, weights that don't sum to 1.0, ...).
    #[error("engine config validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// An environment variable held a value that couldn't be parsed.
    #[error("failed to parse environment variable {key}: {message}")]
    EnvParse { key: String, message: String },
}

/// The validated bundle of tunables the confidence and risk layers read.
///
/// Everything here is safe to hot-swap between classification runs; it
/// carries no connection state and no rule patterns (those live behind
/// [`crate::classifier::ClassificationEngine::reload`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Config schema version, for compatibility tracking across deploys.
    pub version: String,
    pub confidence_weights: ConfidenceWeights,
    pub confidence_thresholds: ConfidenceThresholds,
    pub risk_weights: RiskFactorWeights,
    /// Characters of surrounding text examined on each side of a match
    /// when scoring the context sub-signal.
    pub context_window_size: usize,
    /// Blend weight applied to `regex_confidence` in
    /// [`crate::confidence::combine`]; the remainder goes to
    /// `ml_confidence`.
    pub combine_weight: f64,
}

impl EngineConfig {
    /// Validates every nested config struct and the top-level fields this
    /// type owns directly.
    ///
    /// # Errors
    ///
    /// Returns [`validator::ValidationErrors`] wrapping the first
    /// violation found: out-of-range weights, non-monotone thresholds, a
    /// weight vector that doesn't sum to `1.0`, a zero context window, or
    /// a `combine_weight` outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), validator::ValidationErrors> {
        self.confidence_weights.validate_weights()?;
        self.confidence_thresholds.validate_thresholds()?;
        use validator::Validate;
        self.risk_weights.validate()?;

        let mut errors = validator::ValidationErrors::new();
        if self.context_window_size == 0 {
            errors.add("context_window_size", validator::ValidationError::new("must_be_nonzero"));
        }
        if !(0.0..=1.0).contains(&self.combine_weight) {
            errors.add("combine_weight", validator::ValidationError::new("must_be_in_unit_range"));
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            confidence_weights: ConfidenceWeights::default(),
            confidence_thresholds: ConfidenceThresholds::default(),
            risk_weights: RiskFactorWeights::default(),
            context_window_size: 200,
            combine_weight: 0.4,
        }
    }
}

/// Builder for resolving an [`EngineConfig`] from a file and environment
/// overrides.
#[derive(Debug, Default)]
pub struct EngineConfigBuilder {
    base: EngineConfig,
    use_env: bool,
}

impl EngineConfigBuilder {
    /// Creates a builder seeded with compiled defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base: EngineConfig::default(),
            use_env: false,
        }
    }

    /// Loads config from a file, replacing the builder's current base.
    /// Supports YAML, TOML, and JSON, selected by file extension.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

        let config: EngineConfig = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
                format: "YAML".to_string(),
                source: Box::new(e),
            })?,
            Some("toml") => toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                format: "TOML".to_string(),
                source: Box::new(e),
            })?,
            Some("json") => serde_json::from_str(&content).map_err(|e| ConfigError::ParseError {
                format: "JSON".to_string(),
                source: Box::new(e),
            })?,
            _ => {
                return Err(ConfigError::UnsupportedFormat {
                    message: "file extension must be .yaml, .yml, .toml, or .json".to_string(),
                });
            }
        };

        self.base = config;
        Ok(self)
    }

    /// Enables loading overrides from environment variables prefixed
    /// `DSPM_`, e.g. `DSPM_COMBINE_WEIGHT=0.5`, `DSPM_CONTEXT_WINDOW_SIZE=250`.
    #[must_use]
    pub fn with_env(mut self) -> Self {
        self.use_env = true;
        self
    }

    /// Resolves environment overrides (if enabled) and validates the
    /// result.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if an environment variable can't be parsed
    /// or the final config fails validation.
    pub fn build(mut self) -> Result<EngineConfig, ConfigError> {
        if self.use_env {
            dotenvy::dotenv().ok();

            if let Ok(value) = std::env::var("DSPM_COMBINE_WEIGHT") {
                self.base.combine_weight = value.parse().map_err(|_| ConfigError::EnvParse {
                    key: "DSPM_COMBINE_WEIGHT".to_string(),
                    message: "must be a floating-point number".to_string(),
                })?;
            }

            if let Ok(value) = std::env::var("DSPM_CONTEXT_WINDOW_SIZE") {
                self.base.context_window_size = value.parse().map_err(|_| ConfigError::EnvParse {
                    key: "DSPM_CONTEXT_WINDOW_SIZE".to_string(),
                    message: "must be a non-negative integer".to_string(),
                })?;
            }
        }

        self.base.validate()?;
        Ok(self.base)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        EngineConfig::default().validate().unwrap();
    }

    #[test]
    fn builder_with_no_sources_yields_defaults() {
        let config = EngineConfigBuilder::new().build().unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.context_window_size, 200);
    }

    #[test]
    fn zero_context_window_fails_validation() {
        let mut config = EngineConfig::default();
        config.context_window_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn out_of_range_combine_weight_fails_validation() {
        let mut config = EngineConfig::default();
        config.combine_weight = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn env_override_applies_before_validation() {
        // SAFETY: tests in this module do not run concurrently with other
        // tests that read DSPM_COMBINE_WEIGHT.
        unsafe {
            std::env::set_var("DSPM_COMBINE_WEIGHT", "0.6");
        }
        let config = EngineConfigBuilder::new().with_env().build().unwrap();
        assert_eq!(config.combine_weight, 0.6);
        unsafe {
            std::env::remove_var("DSPM_COMBINE_WEIGHT");
        }
    }
}
