use serde::Deserialize;
use serde_json::Value;

const CONTENT_TYPE_TEXT: &str = "text";
const CONTENT_TYPE_USER_EDITABLE_CONTEXT: &str = "user_editable_context";

/// Conversation-level fields of a raw archive record.
///
/// The `id` and `mapping` fields are checked by the validator and read separately,
/// so they are not part of this struct.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConversationRecord {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::parsers::deserializers::deserialize_epoch_seconds"
    )]
    pub create_time: Option<f64>,
    #[serde(
        default,
        deserialize_with = "crate::parsers::deserializers::deserialize_epoch_seconds"
    )]
    pub update_time: Option<f64>,
    #[serde(default)]
    pub gizmo_id: Option<String>,
    #[serde(default)]
    pub gizmo_type: Option<String>,
    #[serde(default)]
    pub default_model_slug: Option<String>,
    #[serde(default)]
    pub conversation_template_id: Option<String>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_null_as_false")]
    pub is_archived: bool,
    #[serde(default)]
    pub is_starred: Option<bool>,
}

/// One entry of a conversation's `mapping` object
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageNode {
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_optional_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub message: Option<Message>,
    /// Non-string parent references are treated as absent, making the node a root
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_optional_id")]
    pub parent: Option<String>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_child_ids")]
    pub children: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Author {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub author: Option<Author>,
    #[serde(
        default,
        deserialize_with = "crate::parsers::deserializers::deserialize_epoch_seconds"
    )]
    pub create_time: Option<f64>,
    #[serde(default)]
    pub content: Option<MessageContent>,
}

/// Message content, dispatched on its `content_type` tag.
///
/// Built infallibly from any JSON value: unknown tags, missing tags and non-object
/// values all land in [`MessageContent::Other`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum MessageContent {
    Text { parts: Option<Value> },
    UserEditableContext { user_profile: Option<Value>, user_instructions: Option<Value> },
    Other { content_type: Option<String>, parts: Option<Value> },
}

impl From<Value> for MessageContent {
    fn from(value: Value) -> Self {
        let field = |name: &str| value.get(name).filter(|v| !v.is_null()).cloned();
        let content_type = value.get("content_type").and_then(Value::as_str);

        match content_type {
            Some(CONTENT_TYPE_TEXT) => MessageContent::Text { parts: field("parts") },
            Some(CONTENT_TYPE_USER_EDITABLE_CONTEXT) => MessageContent::UserEditableContext {
                user_profile: field("user_profile"),
                user_instructions: field("user_instructions"),
            },
            other => MessageContent::Other {
                content_type: other.map(str::to_string),
                parts: field("parts"),
            },
        }
    }
}
