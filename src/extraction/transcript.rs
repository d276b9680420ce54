use super::types::Message;

/// Render messages as `"<Role>: <content>"` lines joined by newlines.
pub fn format_transcript(messages: &[Message]) -> String {
    messages
        .iter()
        .map(|m| format!("{}: {}", capitalize(m.role.as_str()), m.content))
        .collect::<Vec<_>>()
        .join("\n")
}

/// First character uppercased, the rest lowercased.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
