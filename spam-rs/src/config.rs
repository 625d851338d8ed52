//! Configuration for spam-rs

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, SpamError};
use crate::spam::ClassifierConfig;

/// Prefix for environment overrides, e.g. `SPAM_RS__LOGGING__LEVEL=debug`
pub const ENV_PREFIX: &str = "SPAM_RS";

/// Main configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Verdict thresholds
    #[serde(default)]
    pub classifier: ClassifierConfig,
    /// Input limits
    #[serde(default)]
    pub limits: LimitsConfig,
    /// Model and training file locations
    #[serde(default)]
    pub storage: StorageConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Input limits
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LimitsConfig {
    /// Longest document accepted for training or classification, in bytes
    #[serde(default = "default_max_document_length")]
    pub max_document_length: usize,
}

/// File locations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Model restored at startup and used as the default save target
    #[serde(default)]
    pub model_path: Option<String>,
    /// Training file loaded by `train` when none is given
    #[serde(default)]
    pub training_path: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,
    /// `pretty`, `compact` or `json`
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_max_document_length() -> usize {
    1000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "compact".to_string()
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_document_length: default_max_document_length(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Render the configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| SpamError::Config(format!("Failed to render config: {}", e)))
    }

    /// Layer defaults, an optional TOML file and `SPAM_RS__*` environment
    /// variables, in that order
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = ::config::Config::try_from(&Config::default())
            .map_err(|e| SpamError::Config(e.to_string()))?;

        let mut builder = ::config::Config::builder().add_source(defaults);
        if let Some(path) = path {
            builder = builder.add_source(
                ::config::File::from(path)
                    .format(::config::FileFormat::Toml)
                    .required(true),
            );
        }

        let config: Config = builder
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .and_then(|settings| settings.try_deserialize())
            .map_err(|e| SpamError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let classifier = &self.classifier;
        for (name, value) in [
            ("spam_threshold", classifier.spam_threshold),
            ("ham_threshold", classifier.ham_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SpamError::Config(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }

        if classifier.ham_threshold > classifier.spam_threshold {
            return Err(SpamError::Config(format!(
                "ham_threshold ({}) is above spam_threshold ({})",
                classifier.ham_threshold, classifier.spam_threshold
            )));
        }

        if self.limits.max_document_length == 0 {
            return Err(SpamError::Config(
                "max_document_length must be positive".to_string(),
            ));
        }

        match self.logging.format.as_str() {
            "pretty" | "compact" | "json" => Ok(()),
            other => Err(SpamError::Config(format!("Unknown log format '{}'", other))),
        }
    }
}
