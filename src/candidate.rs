//! Completion candidates.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A suggested completion: a trained word and how often it was seen.
///
/// Candidates order by descending frequency, then ascending word, so sorting a
/// list puts the most frequent words first with a stable, deterministic order
/// among equals.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Candidate {
    word: String,
    frequency: u32,
}

impl Candidate {
    /// Creates a candidate for `word` seen `frequency` times.
    pub fn new(word: impl Into<String>, frequency: u32) -> Self {
        Self {
            word: word.into(),
            frequency,
        }
    }

    /// The completed word.
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Number of times the word was trained when the candidate was read.
    pub fn frequency(&self) -> u32 {
        self.frequency
    }

    /// Splits the candidate into its word and frequency.
    pub fn into_parts(self) -> (String, u32) {
        (self.word, self.frequency)
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .frequency
            .cmp(&self.frequency)
            .then_with(|| self.word.cmp(&other.word))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" ({})", self.word, self.frequency)
    }
}
