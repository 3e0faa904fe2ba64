use serde_json::{Map, Value};

use crate::models::ParseError;

/// A raw record that passed validation, borrowed from the parsed archive
#[derive(Debug, Clone, Copy)]
pub struct ValidRecord<'a> {
    pub id: &'a Value,
    pub record: &'a Value,
    pub mapping: &'a Map<String, Value>,
}

impl ValidRecord<'_> {
    /// The record id as a string (numeric ids are stringified)
    pub fn id_string(&self) -> String {
        id_text(self.id).unwrap_or_default()
    }
}

/// Check that a raw record has the minimum shape needed for processing.
///
/// Checks run in order and the first failure wins:
/// 1. the record is non-null and an object
/// 2. it has a non-empty `id`
/// 3. it has a `mapping` that is an object
pub fn validate_conversation(data: &Value) -> Result<ValidRecord<'_>, ParseError> {
    let object = match data {
        Value::Null => {
            return Err(ParseError::processing_failure(
                "Conversation data is null or undefined",
                None,
            ));
        }
        Value::Object(object) => object,
        _ => return Err(ParseError::malformed_root("Conversation must be an object")),
    };

    let id = match object.get("id") {
        Some(id) if id_text(id).is_some() => id,
        _ => {
            return Err(ParseError::missing_field("Conversation missing required field: id", None));
        }
    };

    let Some(mapping) = object.get("mapping").and_then(Value::as_object) else {
        return Err(ParseError::missing_field(
            "Conversation missing or invalid mapping field",
            id_text(id),
        ));
    };

    Ok(ValidRecord { id, record: data, mapping })
}

/// Best-effort id of a raw record, for attributing errors
pub fn record_id(data: &Value) -> Option<String> {
    data.get("id").and_then(id_text)
}

fn id_text(id: &Value) -> Option<String> {
    match id {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}
