//! TranscriptProcessor: runs one prediction per field and scores the answers.
//!
//! Sequential by construction: one blocking call to the prediction service
//! per field, in field order. The first failing field aborts the run.

use std::time::Instant;

use super::confidence::{confidence_from_logprobs, thresholds};
use super::error::{ProcessorError, ValidationError};
use super::transcript::format_transcript;
use super::types::*;
use crate::config::{ProcessorConfig, APP_VERSION};
use crate::llm::{FieldPredictor, FieldRequest, OpenAiClient};

/// Extracts field values from transcripts.
pub struct TranscriptProcessor {
    config: ProcessorConfig,
    predictor: Box<dyn FieldPredictor>,
    fields: Vec<FieldDefinition>,
}

impl TranscriptProcessor {
    /// Processor backed by the OpenAI-compatible endpoint in `config`.
    pub fn new(config: ProcessorConfig) -> Result<Self, ProcessorError> {
        let client =
            OpenAiClient::new(&config).map_err(|e| ProcessorError::Config(e.to_string()))?;
        tracing::info!(
            version = APP_VERSION,
            model = client.model(),
            include_reasoning = config.include_reasoning,
            "Transcript processor ready"
        );
        Ok(Self::with_predictor(config, Box::new(client)))
    }

    /// Processor backed by any prediction service.
    pub fn with_predictor(config: ProcessorConfig, predictor: Box<dyn FieldPredictor>) -> Self {
        Self {
            config,
            predictor,
            fields: Vec::new(),
        }
    }

    /// Pre-bind fields used when an input does not name any.
    pub fn with_fields(mut self, fields: Vec<FieldDefinition>) -> Self {
        self.fields = fields;
        self
    }

    pub fn include_reasoning(&self) -> bool {
        self.config.include_reasoning
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Extract every requested field from the transcript.
    ///
    /// Input fields take precedence; pre-bound fields apply only when the
    /// input lists none.
    pub fn process(&self, input: &TranscriptInput) -> Result<TranscriptOutput, ProcessorError> {
        let fields = if input.fields.is_empty() {
            &self.fields
        } else {
            &input.fields
        };

        validate_parts(&input.messages, fields)?;

        let start = Instant::now();
        let transcript = format_transcript(&input.messages);
        let mut results = Vec::with_capacity(fields.len());

        for field in fields {
            results.push(self.extract_field(&transcript, field)?);
        }

        tracing::info!(
            fields = results.len(),
            found = results.iter().filter(|r| r.field_value.is_some()).count(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Transcript processed"
        );

        Ok(TranscriptOutput { fields: results })
    }

    /// JSON-in, JSON-out convenience over `process`.
    pub fn process_value(
        &self,
        input: serde_json::Value,
    ) -> Result<serde_json::Value, ProcessorError> {
        let input: TranscriptInput = serde_json::from_value(input)
            .map_err(|e| ValidationError::single(e.to_string()))?;
        let output = self.process(&input)?;
        serde_json::to_value(&output).map_err(|e| ProcessorError::Json(e.to_string()))
    }

    /// Parse a JSON `TranscriptInput`, process it, and return pretty JSON.
    pub fn process_json(&self, input: &str) -> Result<String, ProcessorError> {
        let input: TranscriptInput = serde_json::from_str(input)
            .map_err(|e| ValidationError::single(e.to_string()))?;
        let output = self.process(&input)?;
        serde_json::to_string_pretty(&output).map_err(|e| ProcessorError::Json(e.to_string()))
    }

    fn extract_field(
        &self,
        transcript: &str,
        field: &FieldDefinition,
    ) -> Result<FieldResult, ProcessorError> {
        let request = FieldRequest {
            transcript,
            field_name: &field.field_name,
            field_type: &field.field_type,
            format_example: &field.format_example,
            field_description: field.field_description.as_deref(),
            include_reasoning: self.config.include_reasoning,
        };

        let prediction =
            self.predictor
                .predict(&request)
                .map_err(|source| ProcessorError::Prediction {
                    field_name: field.field_name.clone(),
                    source,
                })?;

        let confidence = confidence_from_logprobs(prediction.logprobs.as_ref());
        let field_reason = if self.config.include_reasoning {
            prediction.reasoning
        } else {
            None
        };

        tracing::debug!(
            field_name = %field.field_name,
            model = self.predictor.model(),
            found = prediction.field_value.is_some(),
            confidence,
            has_logprobs = prediction.logprobs.is_some(),
            "Field extracted"
        );
        if prediction.field_value.is_some() && confidence < thresholds::LOW {
            tracing::warn!(
                field_name = %field.field_name,
                confidence,
                "Extracted value has low confidence"
            );
        }

        Ok(FieldResult {
            field_name: field.field_name.clone(),
            field_value: prediction.field_value,
            field_confidence: confidence,
            field_reason,
        })
    }
}
