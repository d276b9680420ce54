//! Prediction service collaborators.
//!
//! `FieldPredictor` is the seam between the extraction driver and whatever
//! model answers the per-field question. `OpenAiClient` talks to an
//! OpenAI-compatible chat completions endpoint; `MockPredictor` returns
//! scripted answers for tests and offline runs.

pub mod types;
pub mod prompt;
pub mod parser;
pub mod openai;
pub mod mock;

pub use types::*;
pub use openai::OpenAiClient;
pub use mock::MockPredictor;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Cannot reach prediction service at {0}")]
    Connection(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("Prediction service returned error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),

    #[error("No API key configured")]
    MissingApiKey,
}
