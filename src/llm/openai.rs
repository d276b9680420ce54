use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::parser::parse_field_answer;
use super::prompt::{build_field_prompt, system_prompt};
use super::types::{FieldPredictor, FieldRequest, Logprobs, Prediction};
use super::LlmError;
use crate::config::ProcessorConfig;

/// Provider prefix carried by model identifiers such as `openai/gpt-4o`.
const PROVIDER_PREFIX: &str = "openai/";

/// Blocking client for an OpenAI-compatible chat completions endpoint.
pub struct OpenAiClient {
    base_url: String,
    api_key: String,
    model: String,
    logprobs: bool,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl OpenAiClient {
    pub fn new(config: &ProcessorConfig) -> Result<Self, LlmError> {
        let api_key = config.api_key.trim();
        if api_key.is_empty() {
            return Err(LlmError::MissingApiKey);
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LlmError::HttpClient(e.to_string()))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: config.model.clone(),
            logprobs: config.logprobs,
            client,
            timeout_secs: config.timeout_secs,
        })
    }
}

/// Model name as the API expects it, without the provider prefix.
pub fn api_model_name(model: &str) -> &str {
    model.strip_prefix(PROVIDER_PREFIX).unwrap_or(model)
}

/// Request body for /chat/completions
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    logprobs: bool,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

/// Response body from /chat/completions
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
    #[serde(default)]
    logprobs: Option<Logprobs>,
}

#[derive(Deserialize)]
struct ChatMessageResponse {
    #[serde(default)]
    content: Option<String>,
}

fn build_chat_request<'a>(
    model: &'a str,
    system: &'a str,
    prompt: &'a str,
    logprobs: bool,
) -> ChatRequest<'a> {
    ChatRequest {
        model: api_model_name(model),
        messages: vec![
            ChatMessage {
                role: "system",
                content: system,
            },
            ChatMessage {
                role: "user",
                content: prompt,
            },
        ],
        temperature: 0.0,
        logprobs,
        response_format: ResponseFormat {
            kind: "json_object",
        },
    }
}

/// Turn a raw /chat/completions body into a `Prediction`.
///
/// Reasoning is dropped when the request did not ask for it, even if the
/// model volunteered some.
pub fn parse_chat_response(body: &str, include_reasoning: bool) -> Result<Prediction, LlmError> {
    let parsed: ChatResponse = serde_json::from_str(body)
        .map_err(|e| LlmError::ResponseParsing(e.to_string()))?;

    let choice = parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::ResponseParsing("Response contained no choices".into()))?;

    let content = choice.message.content.unwrap_or_default();
    let answer = parse_field_answer(&content)?;

    Ok(Prediction {
        field_value: answer.field_value,
        reasoning: if include_reasoning { answer.reasoning } else { None },
        logprobs: choice.logprobs,
    })
}

impl FieldPredictor for OpenAiClient {
    fn predict(&self, request: &FieldRequest<'_>) -> Result<Prediction, LlmError> {
        let url = format!("{}/chat/completions", self.base_url);
        let prompt = build_field_prompt(request);
        let body = build_chat_request(
            &self.model,
            system_prompt(request.include_reasoning),
            &prompt,
            self.logprobs,
        );

        tracing::debug!(
            field_name = request.field_name,
            model = body.model,
            "Sending field extraction request"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    LlmError::Connection(self.base_url.clone())
                } else if e.is_timeout() {
                    LlmError::Timeout(self.timeout_secs)
                } else {
                    LlmError::HttpClient(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let text = response
            .text()
            .map_err(|e| LlmError::ResponseParsing(e.to_string()))?;

        parse_chat_response(&text, request.include_reasoning)
    }

    fn model(&self) -> &str {
        &self.model
    }
}
