//! Configuration module for the autocomplete service.
//!
//! Settings are layered: built-in defaults, then an optional file (TOML, YAML or
//! JSON), then environment variables such as `MDK__TRAINER__WORKER_THREADS`.
//! All configuration values are validated for correctness before use.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::config::ConfigError;
use config::{Config, ConfigError as ExternalConfigError, Environment, File, FileFormat};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

pub mod index;
pub mod trainer;

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Default environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "MDK";

/// A trait for types that can be validated.
pub trait Validate {
    /// Validates that the configuration is correct.
    ///
    /// # Returns
    ///
    /// * `Ok(())` if the configuration is valid
    /// * `Err(ConfigError)` if the configuration is invalid
    fn validate(&self) -> ConfigResult<()>;
}

/// Main configuration for the autocomplete service.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AutocompleteConfig {
    /// Word splitting and suggestion display
    pub index: index::IndexConfig,

    /// Training worker pool
    pub trainer: trainer::TrainerConfig,

    /// Log configuration
    pub log: LogConfig,
}

impl Validate for AutocompleteConfig {
    fn validate(&self) -> ConfigResult<()> {
        self.index.validate()?;
        self.trainer.validate()?;
        self.log.validate()?;
        Ok(())
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Whether to log in JSON format
    pub json: bool,

    /// Whether to include source code locations in logs
    pub source_location: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json: false,
            source_location: false,
        }
    }
}

impl Validate for LogConfig {
    fn validate(&self) -> ConfigResult<()> {
        match self.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            _ => Err(ConfigError::ValidationError(format!(
                "Invalid log level: {}",
                self.level
            ))),
        }
    }
}

/// Configuration loader.
#[derive(Debug)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    env_prefix: String,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// # Arguments
    ///
    /// * `config_path` - Optional path to the configuration file
    /// * `env_prefix` - Prefix for environment variables that override configuration values
    pub fn new<P: AsRef<Path>>(config_path: Option<P>, env_prefix: &str) -> Self {
        Self {
            config_path: config_path.map(|p| p.as_ref().to_path_buf()),
            env_prefix: env_prefix.to_string(),
        }
    }

    /// Loads the configuration from a file and environment variables.
    ///
    /// # Returns
    ///
    /// * `Ok(AutocompleteConfig)` if the configuration was loaded and is valid
    /// * `Err(ConfigError)` if there was an error loading the configuration
    pub fn load(&self) -> ConfigResult<AutocompleteConfig> {
        let mut builder = Config::builder().add_source(
            Config::try_from(&AutocompleteConfig::default())
                .map_err(|e| ConfigError::ParseError(e.to_string()))?,
        );

        if let Some(path) = &self.config_path {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.clone()));
            }
            if !path.is_file() {
                return Err(ConfigError::FileReadError(format!(
                    "{} is not a regular file",
                    path.display()
                )));
            }

            let format = match path.extension().and_then(|ext| ext.to_str()) {
                Some("toml") => FileFormat::Toml,
                Some("json") => FileFormat::Json,
                Some("yaml" | "yml") => FileFormat::Yaml,
                _ => {
                    return Err(ConfigError::ParseError(format!(
                        "Unsupported file extension for: {path:?}"
                    )))
                }
            };
            builder = builder.add_source(File::from(path.as_path()).format(format));
        }

        builder = builder.add_source(
            Environment::with_prefix(&self.env_prefix)
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(|e| match e {
            ExternalConfigError::NotFound(path) => ConfigError::FileNotFound(PathBuf::from(path)),
            other => ConfigError::ParseError(other.to_string()),
        })?;

        let loaded: AutocompleteConfig = config
            .try_deserialize()
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        loaded.validate()?;
        tracing::debug!(?loaded, "Configuration loaded");

        Ok(loaded)
    }
}

static GLOBAL_CONFIG: OnceCell<Arc<AutocompleteConfig>> = OnceCell::new();

/// Initialize the global configuration.
///
/// The first call wins; later calls are logged and ignored.
pub fn init_global_config(config: AutocompleteConfig) -> Arc<AutocompleteConfig> {
    let mut installed = false;
    let stored = GLOBAL_CONFIG.get_or_init(|| {
        installed = true;
        Arc::new(config)
    });
    if !installed {
        tracing::warn!("Global configuration was already initialized, ignoring new configuration");
    }
    stored.clone()
}

/// Get the global configuration, if it has been initialized.
pub fn global_config() -> Option<Arc<AutocompleteConfig>> {
    GLOBAL_CONFIG.get().cloned()
}
