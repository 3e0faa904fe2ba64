use chrono::{DateTime, Utc};
use serde::de::Error;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Custom deserializer for epoch timestamps.
///
/// Accepts numbers (epoch seconds, fractional allowed), numeric strings, RFC3339 strings
/// and null. Missing fields are handled by `#[serde(default)]` on the field.
pub fn deserialize_epoch_seconds<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n.as_f64().map(Some).ok_or_else(|| Error::custom("invalid timestamp")),
        Value::String(s) => {
            let trimmed = s.trim();
            if let Ok(seconds) = trimmed.parse::<f64>() {
                return Ok(Some(seconds));
            }
            trimmed
                .parse::<DateTime<Utc>>()
                .map(|dt| Some(dt.timestamp_millis() as f64 / 1000.0))
                .map_err(|e| Error::custom(format!("invalid RFC3339 timestamp: {}", e)))
        }
        _ => Err(Error::custom("timestamp must be a number, string or null")),
    }
}

/// Custom deserializer for boolean flags where the export writes `null` for "unset"
pub fn deserialize_null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

/// Custom deserializer for node references; anything but a string counts as absent
pub fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(id) => Ok(Some(id)),
        _ => Ok(None),
    }
}

/// Custom deserializer for child id lists: `null` or a non-list is empty and
/// non-string entries are dropped
pub fn deserialize_child_ids<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(id) => Some(id),
                _ => None,
            })
            .collect()),
        _ => Ok(Vec::new()),
    }
}
