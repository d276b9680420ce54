use super::types::FieldRequest;

pub const FIELD_EXTRACTION_SYSTEM_PROMPT: &str = r#"
You extract one field value from a conversation transcript. You read the
transcript, find the value the field definition asks for, and report it.

RULES:
1. Use ONLY information stated in the transcript or directly derivable from it
   (e.g. a date computed from a relative reference to another stated date).
2. When a value is corrected later in the conversation, report the latest value.
3. Follow the format of the example value.
4. If the transcript does not contain the value, use null.
5. Explain briefly how you found the value in "reasoning".

OUTPUT FORMAT: a single JSON object, nothing else:
{"reasoning": "short explanation", "field_value": "value or null"}
"#;

pub const FIELD_EXTRACTION_SYSTEM_PROMPT_NO_REASONING: &str = r#"
You extract one field value from a conversation transcript. You read the
transcript, find the value the field definition asks for, and report it.

RULES:
1. Use ONLY information stated in the transcript or directly derivable from it
   (e.g. a date computed from a relative reference to another stated date).
2. When a value is corrected later in the conversation, report the latest value.
3. Follow the format of the example value.
4. If the transcript does not contain the value, use null.

OUTPUT FORMAT: a single JSON object, nothing else:
{"field_value": "value or null"}
"#;

/// System prompt for the requested call shape.
pub fn system_prompt(include_reasoning: bool) -> &'static str {
    if include_reasoning {
        FIELD_EXTRACTION_SYSTEM_PROMPT
    } else {
        FIELD_EXTRACTION_SYSTEM_PROMPT_NO_REASONING
    }
}

/// Build the user prompt for one field.
pub fn build_field_prompt(request: &FieldRequest<'_>) -> String {
    let description = request
        .field_description
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or("No description provided.");

    let output_hint = if request.include_reasoning {
        r#"{"reasoning": "...", "field_value": "..."}"#
    } else {
        r#"{"field_value": "..."}"#
    };

    format!(
        r#"<transcript>
{transcript}
</transcript>

FIELD TO EXTRACT:
- Name: {name}
- Type: {field_type}
- Format example: {example}
- Description: {description}

Answer with {output_hint}"#,
        transcript = request.transcript,
        name = request.field_name,
        field_type = request.field_type,
        example = request.format_example,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(include_reasoning: bool, description: Option<&'static str>) -> FieldRequest<'static> {
        FieldRequest {
            transcript: "Assistant: Hi, this is Marcus.\nUser: Hello Marcus.",
            field_name: "representative_name",
            field_type: "string",
            format_example: "Sarah Chen",
            field_description: description,
            include_reasoning,
        }
    }

    #[test]
    fn prompt_contains_transcript_and_field_metadata() {
        let prompt = build_field_prompt(&request(true, Some("The agent's name")));
        assert!(prompt.contains("Assistant: Hi, this is Marcus."));
        assert!(prompt.contains("- Name: representative_name"));
        assert!(prompt.contains("- Type: string"));
        assert!(prompt.contains("- Format example: Sarah Chen"));
        assert!(prompt.contains("- Description: The agent's name"));
    }

    #[test]
    fn missing_description_uses_placeholder() {
        let prompt = build_field_prompt(&request(true, None));
        assert!(prompt.contains("- Description: No description provided."));

        let blank = build_field_prompt(&request(true, Some("   ")));
        assert!(blank.contains("- Description: No description provided."));
    }

    #[test]
    fn output_hint_follows_reasoning_mode() {
        assert!(build_field_prompt(&request(true, None)).contains("\"reasoning\""));
        assert!(!build_field_prompt(&request(false, None)).contains("\"reasoning\""));
    }

    #[test]
    fn system_prompt_selects_call_shape() {
        assert!(system_prompt(true).contains("\"reasoning\""));
        assert!(!system_prompt(false).contains("\"reasoning\""));
    }
}
