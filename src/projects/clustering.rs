use std::collections::{BTreeMap, HashSet};

use crate::models::{ProcessedConversation, Project};
use crate::projects::naming::derive_project_name;

/// Group conversations by their project identifier (`gizmo_id`).
///
/// Conversations without a project id are left out. Each project keeps its member ids in
/// input order and its distinct non-empty titles in first-seen order; once grouping is done
/// every project is named from its title list.
pub fn group_conversations_by_project(
    conversations: &[ProcessedConversation],
) -> BTreeMap<String, Project> {
    let mut projects: BTreeMap<String, Project> = BTreeMap::new();
    let mut seen_titles: BTreeMap<String, HashSet<String>> = BTreeMap::new();

    for conversation in conversations {
        let Some(project_id) = conversation.project_id() else {
            continue;
        };

        let project = projects.entry(project_id.to_string()).or_insert_with(|| Project {
            id: project_id.to_string(),
            project_type: conversation.gizmo_type.clone(),
            name: String::new(),
            titles: Vec::new(),
            conversation_ids: Vec::new(),
            conversation_count: 0,
            first_conversation_index: conversation.original_index,
        });
        project.conversation_ids.push(conversation.id.clone());

        if let Some(title) = conversation.title.as_deref().filter(|t| !t.is_empty())
            && seen_titles.entry(project_id.to_string()).or_default().insert(title.to_string())
        {
            project.titles.push(title.to_string());
        }
    }

    for project in projects.values_mut() {
        project.name = derive_project_name(&project.id, &project.titles);
        project.conversation_count = project.conversation_ids.len();
    }

    projects
}
