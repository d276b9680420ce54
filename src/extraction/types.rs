//! Input and output shapes of a transcript extraction run.
//!
//! All types are JSON-serializable; field names match the wire format.

use serde::{Deserialize, Serialize};

use super::error::ValidationError;

/// Who sent a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single message within a transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: &str) -> Self {
        Self {
            role: Role::User,
            content: content.to_string(),
        }
    }

    pub fn assistant(content: &str) -> Self {
        Self {
            role: Role::Assistant,
            content: content.to_string(),
        }
    }
}

/// One value to extract from a transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub field_name: String,
    pub field_type: String,
    /// Example of the expected value format, e.g. "415-555-9876".
    pub format_example: String,
    #[serde(default)]
    pub field_description: Option<String>,
}

impl FieldDefinition {
    pub fn new(field_name: &str, field_type: &str, format_example: &str) -> Self {
        Self {
            field_name: field_name.to_string(),
            field_type: field_type.to_string(),
            format_example: format_example.to_string(),
            field_description: None,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.field_description = Some(description.to_string());
        self
    }
}

/// Extraction result for one field.
///
/// `field_reason` is `None` unless reasoning mode is enabled and the model
/// supplied a justification. It serializes as `null`, never omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldResult {
    pub field_name: String,
    pub field_value: Option<String>,
    /// Always within [0, 1].
    pub field_confidence: f64,
    pub field_reason: Option<String>,
}

/// A transcript plus the fields to extract from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptInput {
    pub messages: Vec<Message>,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

impl TranscriptInput {
    /// Check the whole input and report every problem at once.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_parts(&self.messages, &self.fields)
    }
}

/// Validate messages and fields together, collecting every issue.
pub fn validate_parts(
    messages: &[Message],
    fields: &[FieldDefinition],
) -> Result<(), ValidationError> {
    let mut issues = Vec::new();

    if messages.is_empty() {
        issues.push("messages: at least one message is required".to_string());
    }

    for (idx, field) in fields.iter().enumerate() {
        if field.field_name.trim().is_empty() {
            issues.push(format!("fields[{idx}].field_name: must not be empty"));
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { issues })
    }
}

/// Extraction results, one per requested field, in request order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptOutput {
    pub fields: Vec<FieldResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_input() -> TranscriptInput {
        TranscriptInput {
            messages: vec![Message::user("Hello")],
            fields: vec![FieldDefinition::new("test", "string", "example")
                .with_description("A test field description")],
        }
    }

    #[test]
    fn input_deserializes_from_wire_format() {
        let json = r#"{
            "messages": [{"role": "user", "content": "Hello"}],
            "fields": [{
                "field_name": "test",
                "field_type": "string",
                "format_example": "example",
                "field_description": "A test field description"
            }]
        }"#;
        let input: TranscriptInput = serde_json::from_str(json).unwrap();
        assert_eq!(input, sample_input());
        assert!(input.validate().is_ok());
    }

    #[test]
    fn missing_content_is_rejected() {
        let json = r#"{"messages": [{"role": "user"}]}"#;
        assert!(serde_json::from_str::<TranscriptInput>(json).is_err());
    }

    #[test]
    fn unknown_role_is_rejected() {
        let json = r#"{"messages": [{"role": "system", "content": "x"}]}"#;
        assert!(serde_json::from_str::<TranscriptInput>(json).is_err());
    }

    #[test]
    fn fields_and_description_are_optional() {
        let json = r#"{"messages": [{"role": "assistant", "content": "Hi"}]}"#;
        let input: TranscriptInput = serde_json::from_str(json).unwrap();
        assert!(input.fields.is_empty());

        let json = r#"{"field_name": "f", "field_type": "string", "format_example": "x"}"#;
        let field: FieldDefinition = serde_json::from_str(json).unwrap();
        assert!(field.field_description.is_none());
    }

    #[test]
    fn validation_collects_every_issue() {
        let input = TranscriptInput {
            messages: vec![],
            fields: vec![
                FieldDefinition::new("ok", "string", "x"),
                FieldDefinition::new("", "string", "x"),
                FieldDefinition::new("   ", "string", "x"),
            ],
        };
        let err = input.validate().unwrap_err();
        assert_eq!(err.issues.len(), 3, "Got {:?}", err.issues);
        assert!(err.issues[0].starts_with("messages"));
        assert!(err.issues[1].starts_with("fields[1]"));
        assert!(err.issues[2].starts_with("fields[2]"));
    }

    #[test]
    fn field_reason_serializes_as_null() {
        let result = FieldResult {
            field_name: "test_field".into(),
            field_value: Some("test_value".into()),
            field_confidence: 0.95,
            field_reason: None,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert!(json["field_reason"].is_null());
        assert!(json.as_object().unwrap().contains_key("field_reason"));
    }

    #[test]
    fn output_round_trips_exactly() {
        let output = TranscriptOutput {
            fields: vec![
                FieldResult {
                    field_name: "agent_name".into(),
                    field_value: Some("Joan London".into()),
                    field_confidence: 0.987_654_321_012_345,
                    field_reason: Some("She introduced herself.".into()),
                },
                FieldResult {
                    field_name: "customer_fax".into(),
                    field_value: None,
                    field_confidence: 0.5,
                    field_reason: None,
                },
            ],
        };
        let json = serde_json::to_string(&output).unwrap();
        let back: TranscriptOutput = serde_json::from_str(&json).unwrap();
        assert_eq!(back, output);
        assert_eq!(
            back.fields[0].field_confidence.to_bits(),
            output.fields[0].field_confidence.to_bits()
        );
    }

    #[test]
    fn role_display_is_lowercase() {
        assert_eq!(Role::User.to_string(), "user");
        assert_eq!(Role::Assistant.to_string(), "assistant");
    }
}
