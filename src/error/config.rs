//! Errors raised while building an [`AutocompleteConfig`](crate::config::AutocompleteConfig).
//!
//! `ConfigLoader::load` reports a missing or unreadable file before it hands
//! anything to the `config` crate; whatever that crate rejects becomes a
//! [`ConfigError::ParseError`]. The two validation variants come from the
//! `Validate` impls of the individual sections.

use std::path::PathBuf;
use thiserror::Error;

/// Why a configuration could not be loaded or accepted.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The `--config` path does not exist.
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    /// The path exists but is not a readable regular file.
    #[error("Cannot read configuration file: {0}")]
    FileReadError(String),

    /// Unknown file extension, malformed file, or a value of the wrong type.
    #[error("Invalid configuration: {0}")]
    ParseError(String),

    /// A section failed its consistency checks, e.g. an empty boundary set.
    #[error("Configuration rejected: {0}")]
    ValidationError(String),

    /// A numeric setting lies outside the range the index or trainer accepts.
    #[error("{key} is out of range: {message}")]
    ValueOutOfRange {
        /// Dotted key, such as `trainer.shutdown_timeout_ms`
        key: String,
        /// What the accepted range is
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_setting() {
        let err = ConfigError::ValueOutOfRange {
            key: "trainer.shutdown_timeout_ms".to_string(),
            message: "must be greater than 0".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "trainer.shutdown_timeout_ms is out of range: must be greater than 0"
        );

        let err = ConfigError::FileNotFound(PathBuf::from("mdk.toml"));
        assert_eq!(err.to_string(), "Configuration file not found: mdk.toml");
    }
}
