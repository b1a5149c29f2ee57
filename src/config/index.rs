//! Index configuration module.
//!
//! This module defines how passages are cut into words and how many
//! suggestions the interactive front end shows.

use super::{ConfigResult, Validate};
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Index configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Characters that separate words; any run of them counts as one boundary
    pub word_boundaries: String,

    /// Whether passages are lower-cased before splitting
    pub lowercase: bool,

    /// Maximum number of suggestions to display (0 for no limit)
    pub max_suggestions: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            word_boundaries: " .".to_string(),
            lowercase: true,
            max_suggestions: 0,
        }
    }
}

impl Validate for IndexConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.word_boundaries.is_empty() {
            return Err(ConfigError::ValidationError(
                "word_boundaries cannot be empty".to_string(),
            ));
        }

        if let Some(c) = self.word_boundaries.chars().find(|c| c.is_alphanumeric()) {
            return Err(ConfigError::ValidationError(format!(
                "word_boundaries cannot contain word character {c:?}"
            )));
        }

        Ok(())
    }
}
