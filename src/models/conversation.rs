use std::fmt;

use serde::{Deserialize, Serialize};

/// Author category of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
    Tool,
}

impl Role {
    /// Parse an archive role name (case-sensitive, as exported)
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "user" => Some(Role::User),
            "assistant" => Some(Role::Assistant),
            "system" => Some(Role::System),
            "tool" => Some(Role::Tool),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
            Role::Tool => "tool",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message emitted by the tree flattener
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedMessage {
    /// Message id (falls back to the node id when the message has none)
    pub id: String,
    pub node_id: String,
    pub role: Role,
    /// Extracted text, never blank
    pub content: String,
    pub create_time: Option<f64>,
    pub is_first_message: bool,
    pub parent_id: Option<String>,
    pub children_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedConversation {
    pub id: String,
    pub title: Option<String>,
    pub create_time: Option<f64>,
    pub update_time: Option<f64>,
    pub gizmo_id: Option<String>,
    pub gizmo_type: Option<String>,
    pub default_model_slug: Option<String>,
    pub conversation_template_id: Option<String>,
    pub is_archived: bool,
    pub is_starred: Option<bool>,
    pub formatted_date: String,
    pub messages: Vec<ProcessedMessage>,
    /// Position in the source array, assigned once at parse time
    pub original_index: usize,
}

impl ProcessedConversation {
    /// Project identifier, treating an empty string as no project
    pub fn project_id(&self) -> Option<&str> {
        self.gizmo_id.as_deref().filter(|id| !id.is_empty())
    }

    pub fn is_standalone(&self) -> bool {
        self.project_id().is_none()
    }

    /// Title for display, with a placeholder for untitled conversations
    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.trim().is_empty() => title,
            _ => "(untitled)",
        }
    }
}
