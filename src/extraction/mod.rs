//! Transcript field extraction
//!
//! Turns a conversation plus a list of field definitions into one scored
//! value per field.
//!
//! ```text
//! TranscriptInput → validate → format_transcript → per field: predict → score → TranscriptOutput
//! ```
//!
//! Confidence is the mean linear token probability reported by the model,
//! or 0.5 when the backend returns no log-probabilities.

pub mod error;
pub mod types;
pub mod transcript;
pub mod confidence;
pub mod processor;

pub use error::{ProcessorError, ValidationError};
pub use types::*;
pub use transcript::format_transcript;
pub use confidence::{confidence_from_logprobs, ConfidenceLevel, NEUTRAL_CONFIDENCE};
pub use processor::TranscriptProcessor;
