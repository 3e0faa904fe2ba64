use chrono::NaiveDate;

use super::ast::{FieldFilter, FilterExpr, FilterField, FilterOperator, FilterValue};
use crate::models::{ArchiveModel, ProcessedConversation};
use crate::utils::epoch_to_datetime;

/// Project filter value matching conversations outside any project
const STANDALONE: &str = "standalone";

/// Conversations of `archive` matching `filter`, in archive order
///
/// Filter logic:
/// - Same-field OR: model:gpt-4o model:o1 → (gpt-4o OR o1)
/// - Cross-field AND: project:mars archived:false → (mars AND not archived)
/// - Explicit operators override defaults
///
/// Filters are evaluated strictly left to right, without precedence.
pub fn apply_filters<'a>(
    archive: &'a ArchiveModel,
    filter: &FilterExpr,
) -> Vec<&'a ProcessedConversation> {
    archive.conversations.iter().filter(|c| matches_filter(archive, c, filter)).collect()
}

/// Whether one conversation of `archive` matches `filter`; empty filters match everything
pub fn matches_filter(
    archive: &ArchiveModel,
    conversation: &ProcessedConversation,
    filter: &FilterExpr,
) -> bool {
    let Some((first, rest)) = filter.filters.split_first() else {
        return true;
    };

    let mut result = evaluate_field_filter(archive, conversation, first);

    for (operator, next) in filter.operators.iter().zip(rest) {
        result = match operator {
            FilterOperator::And => result && evaluate_field_filter(archive, conversation, next),
            FilterOperator::Or => result || evaluate_field_filter(archive, conversation, next),
        };
    }

    result
}

fn evaluate_field_filter(
    archive: &ArchiveModel,
    conversation: &ProcessedConversation,
    filter: &FieldFilter,
) -> bool {
    match (&filter.field, &filter.value) {
        (FilterField::Project, FilterValue::Needle(needle)) => {
            match_project(archive, conversation, needle)
        }
        (FilterField::Model, FilterValue::Needle(needle)) => {
            contains_lowercase(conversation.default_model_slug.as_deref(), needle)
        }
        (FilterField::Title, FilterValue::Needle(needle)) => {
            contains_lowercase(conversation.title.as_deref(), needle)
        }
        (FilterField::Text, FilterValue::Needle(needle)) => conversation
            .messages
            .iter()
            .any(|m| contains_lowercase(Some(m.content.as_str()), needle)),
        (FilterField::Since, FilterValue::Date(date)) => match_since(conversation, *date),
        (FilterField::Archived, FilterValue::Flag(flag)) => conversation.is_archived == *flag,
        _ => false,
    }
}

/// Project id or derived name (substring); `standalone` selects conversations without one
fn match_project(archive: &ArchiveModel, conversation: &ProcessedConversation, needle: &str) -> bool {
    if needle == STANDALONE {
        return conversation.is_standalone();
    }

    match archive.project_of(conversation) {
        Some(project) => {
            project.id.to_lowercase().contains(needle) || project.name.to_lowercase().contains(needle)
        }
        None => false,
    }
}

/// Created on or after `date` (UTC); conversations without a timestamp never match
fn match_since(conversation: &ProcessedConversation, date: NaiveDate) -> bool {
    conversation
        .create_time
        .and_then(epoch_to_datetime)
        .is_some_and(|created| created.date_naive() >= date)
}

fn contains_lowercase(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|text| text.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::parse_filter;
    use crate::parse_archive;
    use serde_json::json;

    fn sample_archive() -> ArchiveModel {
        let records = json!([
            {
                "id": "c1",
                "title": "Mars Mission Plan",
                "create_time": 1_704_067_200.0,
                "gizmo_id": "g-p-aaa111-mars",
                "default_model_slug": "gpt-4o",
                "mapping": {
                    "n1": {
                        "message": {
                            "author": { "role": "user" },
                            "content": { "content_type": "text", "parts": ["Budget for the rover?"] }
                        },
                        "children": []
                    }
                }
            },
            {
                "id": "c2",
                "title": "Grocery list",
                "create_time": 1_672_531_200.0,
                "default_model_slug": "o1",
                "is_archived": true,
                "mapping": {}
            },
            {
                "id": "c3",
                "title": "Mars Mission Plan follow-up",
                "gizmo_id": "g-p-aaa111-mars",
                "mapping": {}
            }
        ]);
        parse_archive(&records.to_string(), "conversations.json").archive.unwrap()
    }

    fn ids(archive: &ArchiveModel, query: &str) -> Vec<String> {
        let filter = parse_filter(query).unwrap();
        apply_filters(archive, &filter).into_iter().map(|c| c.id.clone()).collect()
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let archive = sample_archive();
        assert_eq!(ids(&archive, ""), ["c1", "c2", "c3"]);
    }

    #[test]
    fn test_project_by_id_name_and_standalone() {
        let archive = sample_archive();
        assert_eq!(ids(&archive, "project:aaa111"), ["c1", "c3"]);
        assert_eq!(ids(&archive, "project:\"mars mission\""), ["c1", "c3"]);
        assert_eq!(ids(&archive, "project:standalone"), ["c2"]);
        assert!(ids(&archive, "project:venus").is_empty());
    }

    #[test]
    fn test_substring_fields_are_case_insensitive() {
        let archive = sample_archive();
        assert_eq!(ids(&archive, "model:GPT"), ["c1"]);
        assert_eq!(ids(&archive, "title:grocery"), ["c2"]);
        assert_eq!(ids(&archive, "text:ROVER"), ["c1"]);
    }

    #[test]
    fn test_since_and_archived() {
        let archive = sample_archive();
        assert_eq!(ids(&archive, "since:2024-01-01"), ["c1"]);
        assert_eq!(ids(&archive, "since:2023-01-01"), ["c1", "c2"]);
        assert_eq!(ids(&archive, "archived:true"), ["c2"]);
        assert_eq!(ids(&archive, "archived:false"), ["c1", "c3"]);
    }

    #[test]
    fn test_implicit_and_explicit_operators() {
        let archive = sample_archive();
        assert_eq!(ids(&archive, "model:gpt-4o model:o1"), ["c1", "c2"]);
        assert_eq!(ids(&archive, "title:mars archived:false"), ["c1", "c3"]);
        assert_eq!(ids(&archive, "title:grocery OR project:mars"), ["c1", "c2", "c3"]);
        assert!(ids(&archive, "model:gpt-4o AND model:o1").is_empty());
    }

    #[test]
    fn test_left_to_right_evaluation() {
        let archive = sample_archive();
        // (title:grocery OR title:follow-up) AND archived:true
        assert_eq!(ids(&archive, "title:grocery OR title:follow-up AND archived:true"), ["c2"]);
    }
}
