use std::collections::HashMap;
use std::sync::Mutex;

use super::types::{FieldPredictor, FieldRequest, Logprobs, Prediction};
use super::LlmError;

/// A request as the mock saw it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub field_name: String,
    pub field_type: String,
    pub format_example: String,
    pub field_description: Option<String>,
    pub transcript: String,
    pub include_reasoning: bool,
}

/// Mock prediction service for testing. Returns scripted predictions per field.
///
/// Fields without a script get an empty prediction (value not found, no
/// logprobs). Reasoning is only returned when the request asks for it.
pub struct MockPredictor {
    model: String,
    predictions: HashMap<String, Prediction>,
    failing_fields: Vec<String>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockPredictor {
    pub fn new() -> Self {
        Self {
            model: "mock".to_string(),
            predictions: HashMap::new(),
            failing_fields: Vec::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Script the answer for one field.
    pub fn with_prediction(mut self, field_name: &str, prediction: Prediction) -> Self {
        self.predictions.insert(field_name.to_string(), prediction);
        self
    }

    /// Shorthand for a value plus optional reasoning and token logprobs.
    pub fn with_value(
        self,
        field_name: &str,
        value: &str,
        reasoning: Option<&str>,
        logprobs: Option<Logprobs>,
    ) -> Self {
        self.with_prediction(
            field_name,
            Prediction {
                field_value: Some(value.to_string()),
                reasoning: reasoning.map(str::to_string),
                logprobs,
            },
        )
    }

    /// Make every request for `field_name` fail with a server error.
    pub fn failing_on(mut self, field_name: &str) -> Self {
        self.failing_fields.push(field_name.to_string());
        self
    }

    /// Requests received so far, in call order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

impl Default for MockPredictor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldPredictor for MockPredictor {
    fn predict(&self, request: &FieldRequest<'_>) -> Result<Prediction, LlmError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(RecordedRequest {
                field_name: request.field_name.to_string(),
                field_type: request.field_type.to_string(),
                format_example: request.format_example.to_string(),
                field_description: request.field_description.map(str::to_string),
                transcript: request.transcript.to_string(),
                include_reasoning: request.include_reasoning,
            });
        }

        if self.failing_fields.iter().any(|f| f == request.field_name) {
            return Err(LlmError::Api {
                status: 500,
                body: format!("mock failure for {}", request.field_name),
            });
        }

        let mut prediction = self
            .predictions
            .get(request.field_name)
            .cloned()
            .unwrap_or_default();
        if !request.include_reasoning {
            prediction.reasoning = None;
        }
        Ok(prediction)
    }

    fn model(&self) -> &str {
        &self.model
    }
}
