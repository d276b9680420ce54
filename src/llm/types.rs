use serde::{Deserialize, Serialize};

use super::LlmError;

/// One token of a completion with the log-probability the model assigned to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenLogprob {
    pub token: String,
    /// Natural-log probability. Non-positive for well-formed responses.
    pub logprob: f64,
}

/// Per-token log-probabilities of a completion, in OpenAI's `logprobs` shape.
///
/// `content` is `None` when the backend omitted token data (e.g. logprobs
/// were not requested or the provider does not support them).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Logprobs {
    #[serde(default)]
    pub content: Option<Vec<TokenLogprob>>,
}

impl Logprobs {
    pub fn from_tokens(tokens: Vec<TokenLogprob>) -> Self {
        Self {
            content: Some(tokens),
        }
    }

    /// Token records, empty when none were reported.
    pub fn tokens(&self) -> &[TokenLogprob] {
        self.content.as_deref().unwrap_or(&[])
    }
}

/// Everything the prediction service needs to extract one field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRequest<'a> {
    /// Transcript rendered by `transcript::format_transcript`.
    pub transcript: &'a str,
    pub field_name: &'a str,
    pub field_type: &'a str,
    pub format_example: &'a str,
    pub field_description: Option<&'a str>,
    /// Ask the model for a natural-language justification alongside the value.
    pub include_reasoning: bool,
}

/// Raw output of one prediction call, before confidence scoring.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Prediction {
    pub field_value: Option<String>,
    pub reasoning: Option<String>,
    pub logprobs: Option<Logprobs>,
}

/// Prediction service abstraction (allows mocking).
///
/// The reasoning and no-reasoning call shapes are the same capability,
/// selected by `FieldRequest::include_reasoning`.
pub trait FieldPredictor {
    fn predict(&self, request: &FieldRequest<'_>) -> Result<Prediction, LlmError>;

    /// Model identifier the backend sends requests to.
    fn model(&self) -> &str;
}

impl<T: FieldPredictor + ?Sized> FieldPredictor for std::sync::Arc<T> {
    fn predict(&self, request: &FieldRequest<'_>) -> Result<Prediction, LlmError> {
        (**self).predict(request)
    }

    fn model(&self) -> &str {
        (**self).model()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predictor_is_object_safe() {
        fn _assert_predictor(_: &dyn FieldPredictor) {}
    }

    #[test]
    fn logprobs_tokens_empty_when_content_missing() {
        let logprobs: Logprobs = serde_json::from_str("{}").unwrap();
        assert!(logprobs.content.is_none());
        assert!(logprobs.tokens().is_empty());
    }

    #[test]
    fn logprobs_deserializes_openai_shape() {
        let json = r#"{
            "content": [
                {"token": "Marcus", "logprob": -0.01, "bytes": [77], "top_logprobs": []},
                {"token": "\"", "logprob": -0.2}
            ],
            "refusal": null
        }"#;
        let logprobs: Logprobs = serde_json::from_str(json).unwrap();
        assert_eq!(logprobs.tokens().len(), 2);
        assert_eq!(logprobs.tokens()[0].token, "Marcus");
        assert!((logprobs.tokens()[1].logprob + 0.2).abs() < f64::EPSILON);
    }
}
