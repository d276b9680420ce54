//! Structured field extraction from conversation transcripts.
//!
//! ```no_run
//! use transtype::{FieldDefinition, Message, ProcessorConfig, TranscriptInput, TranscriptProcessor};
//!
//! let processor = TranscriptProcessor::new(ProcessorConfig::new("sk-...")).unwrap();
//! let output = processor
//!     .process(&TranscriptInput {
//!         messages: vec![Message::assistant("Hi, this is Marcus from TechFlow Solutions.")],
//!         fields: vec![FieldDefinition::new("representative_name", "string", "Sarah Chen")],
//!     })
//!     .unwrap();
//! println!("{:?}", output.fields[0].field_value);
//! ```

pub mod config;
pub mod extraction;
pub mod llm;

pub use config::{ConfigError, ProcessorConfig};
pub use extraction::{
    FieldDefinition, FieldResult, Message, ProcessorError, Role, TranscriptInput,
    TranscriptOutput, TranscriptProcessor, ValidationError,
};

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber. Logs go to stderr.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();
}
