//! Error types for transcript extraction.

use thiserror::Error;

use crate::llm::LlmError;

/// Every problem found in a `TranscriptInput`, reported together.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid transcript input: {}", .issues.join("; "))]
pub struct ValidationError {
    pub issues: Vec<String>,
}

impl ValidationError {
    pub fn single(issue: impl Into<String>) -> Self {
        Self {
            issues: vec![issue.into()],
        }
    }
}

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Extraction failed for field '{field_name}': {source}")]
    Prediction {
        field_name: String,
        #[source]
        source: LlmError,
    },

    #[error("JSON error: {0}")]
    Json(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
