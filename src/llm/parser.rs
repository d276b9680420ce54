use std::sync::LazyLock;

use regex::Regex;

use super::LlmError;

/// Value and reasoning as the model reported them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldAnswer {
    pub field_value: Option<String>,
    pub reasoning: Option<String>,
}

/// Markers models use to say "not in the transcript".
const NOT_FOUND_MARKERS: &[&str] = &["null", "none", "not found", "n/a"];

/// Parse the assistant message content into a `FieldAnswer`.
pub fn parse_field_answer(content: &str) -> Result<FieldAnswer, LlmError> {
    let json_str = extract_json_object(content)?;
    let value: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| LlmError::ResponseParsing(format!("Invalid answer JSON: {e}")))?;

    let object = value.as_object().ok_or_else(|| {
        LlmError::ResponseParsing("Answer is not a JSON object".to_string())
    })?;

    Ok(FieldAnswer {
        field_value: object.get("field_value").and_then(json_to_text).and_then(normalize_value),
        reasoning: object
            .get("reasoning")
            .and_then(json_to_text)
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty()),
    })
}

/// Map empty strings and not-found markers to `None`.
pub fn normalize_value(raw: String) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty()
        || NOT_FOUND_MARKERS
            .iter()
            .any(|m| trimmed.eq_ignore_ascii_case(m))
    {
        return None;
    }
    Some(trimmed.to_string())
}

/// Strings as-is, null as `None`, anything else as compact JSON.
fn json_to_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Locate the JSON object in a model answer, tolerating code fences and
/// surrounding prose.
fn extract_json_object(content: &str) -> Result<&str, LlmError> {
    static FENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(?s)```(?:json)?\s*(\{.*?\})\s*```").expect("valid regex")
    });

    let trimmed = content.trim();

    if let Some(block) = FENCE_RE.captures(trimmed).and_then(|c| c.get(1)) {
        return Ok(block.as_str());
    }

    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if start < end {
            return Ok(&trimmed[start..=end]);
        }
    }

    Err(LlmError::ResponseParsing(
        "No JSON object found in model answer".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_json_answer() {
        let answer =
            parse_field_answer(r#"{"reasoning": "He introduced himself.", "field_value": "Marcus"}"#)
                .unwrap();
        assert_eq!(answer.field_value.as_deref(), Some("Marcus"));
        assert_eq!(answer.reasoning.as_deref(), Some("He introduced himself."));
    }

    #[test]
    fn parses_fenced_answer_with_prose() {
        let content = "Here you go:\n```json\n{\"field_value\": \"217-918-2344\"}\n```\nDone.";
        let answer = parse_field_answer(content).unwrap();
        assert_eq!(answer.field_value.as_deref(), Some("217-918-2344"));
        assert!(answer.reasoning.is_none());
    }

    #[test]
    fn null_and_markers_become_none() {
        for content in [
            r#"{"field_value": null}"#,
            r#"{"field_value": ""}"#,
            r#"{"field_value": "null"}"#,
            r#"{"field_value": "Not Found"}"#,
            r#"{"field_value": "  N/A "}"#,
            r#"{}"#,
        ] {
            let answer = parse_field_answer(content).unwrap();
            assert!(answer.field_value.is_none(), "Expected None for {content}");
        }
    }

    #[test]
    fn non_string_values_are_rendered() {
        let answer = parse_field_answer(r#"{"field_value": 42}"#).unwrap();
        assert_eq!(answer.field_value.as_deref(), Some("42"));
    }

    #[test]
    fn value_is_trimmed() {
        let answer = parse_field_answer(r#"{"field_value": "  Joan London "}"#).unwrap();
        assert_eq!(answer.field_value.as_deref(), Some("Joan London"));
    }

    #[test]
    fn reasoning_is_trimmed_and_blank_dropped() {
        let answer =
            parse_field_answer(r#"{"reasoning": "  Stated at the start.\n", "field_value": "x"}"#)
                .unwrap();
        assert_eq!(answer.reasoning.as_deref(), Some("Stated at the start."));

        let blank = parse_field_answer(r#"{"reasoning": "   ", "field_value": "x"}"#).unwrap();
        assert!(blank.reasoning.is_none());
    }

    #[test]
    fn missing_json_is_an_error() {
        let err = parse_field_answer("Marcus").unwrap_err();
        assert!(matches!(err, LlmError::ResponseParsing(_)));
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = parse_field_answer(r#"{"field_value": "Marcus""#).unwrap_err();
        assert!(matches!(err, LlmError::ResponseParsing(_)));
    }
}
