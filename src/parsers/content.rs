//! Plain-text extraction from tagged message content.

use serde_json::Value;

use crate::models::MessageContent;

/// Extract plain text from a message content value. Never fails.
///
/// - `text`: parts joined with single spaces (or the single part stringified)
/// - `user_editable_context`: profile and instructions separated by a blank line, trimmed
/// - anything else: `parts` as for `text` when present, otherwise empty
pub fn extract_message_content(content: &MessageContent) -> String {
    match content {
        MessageContent::Text { parts } | MessageContent::Other { parts, .. } => {
            parts.as_ref().map(join_parts).unwrap_or_default()
        }
        MessageContent::UserEditableContext { user_profile, user_instructions } => {
            let profile = user_profile.as_ref().and_then(scalar_text).unwrap_or_default();
            let instructions = user_instructions.as_ref().and_then(scalar_text).unwrap_or_default();
            format!("{}\n\n{}", profile, instructions).trim().to_string()
        }
    }
}

fn join_parts(parts: &Value) -> String {
    match parts {
        Value::Array(items) => items.iter().filter_map(scalar_text).collect::<Vec<_>>().join(" "),
        other => scalar_text(other).unwrap_or_default(),
    }
}

/// Text of a scalar part. Structured parts (image pointers and the like) carry no text.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
