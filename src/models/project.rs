use serde::{Deserialize, Serialize};

/// Conversations sharing one project identifier (`gizmo_id`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub project_type: Option<String>,
    pub name: String,
    /// Distinct non-empty member titles in first-seen order
    pub titles: Vec<String>,
    /// Member conversation ids in input order
    pub conversation_ids: Vec<String>,
    pub conversation_count: usize,
    /// Original index of the first member conversation
    pub first_conversation_index: usize,
}
