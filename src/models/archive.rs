use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::{ProcessedConversation, Project};

/// Where an archive came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveSource {
    /// File name (last path component), or the caller-supplied name
    pub name: String,
    pub path: Option<PathBuf>,
    pub size_bytes: usize,
}

impl ArchiveSource {
    /// Build source metadata from a caller-supplied name or path.
    ///
    /// Both `/` and `\` are treated as separators so Windows-style names keep
    /// only their file name.
    pub fn from_name(name: &str, size_bytes: usize) -> Self {
        let file_name = name.rsplit(['/', '\\']).next().filter(|n| !n.is_empty()).unwrap_or("unknown");
        let path = (file_name != name).then(|| PathBuf::from(name));
        Self { name: file_name.to_string(), path, size_bytes }
    }
}

/// Result of one parse pass over an archive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveModel {
    pub source: ArchiveSource,
    /// Conversations in input order
    pub conversations: Vec<ProcessedConversation>,
    pub projects: BTreeMap<String, Project>,
    pub total_conversations: usize,
    pub total_projects: usize,
}

impl ArchiveModel {
    pub fn conversation(&self, id: &str) -> Option<&ProcessedConversation> {
        self.conversations.iter().find(|c| c.id == id)
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.get(id)
    }

    /// Project a conversation belongs to, if any
    pub fn project_of(&self, conversation: &ProcessedConversation) -> Option<&Project> {
        conversation.project_id().and_then(|id| self.projects.get(id))
    }

    /// Projects ordered by the position of their first member conversation
    pub fn projects_in_order(&self) -> Vec<&Project> {
        let mut projects: Vec<&Project> = self.projects.values().collect();
        projects.sort_by_key(|p| p.first_conversation_index);
        projects
    }

    /// Conversations without a project identifier
    pub fn standalone_conversations(&self) -> impl Iterator<Item = &ProcessedConversation> {
        self.conversations.iter().filter(|c| c.is_standalone())
    }

    pub fn total_messages(&self) -> usize {
        self.conversations.iter().map(|c| c.messages.len()).sum()
    }
}
