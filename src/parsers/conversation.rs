use serde::Deserialize;
use thiserror::Error;

use super::tree::{FlattenError, flatten_mapping};
use super::validation::ValidRecord;
use crate::models::{ConversationRecord, ProcessedConversation};
use crate::utils::format_display_date;

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("invalid conversation fields: {0}")]
    InvalidFields(#[from] serde_json::Error),

    #[error(transparent)]
    Flatten(#[from] FlattenError),
}

/// Turn a validated raw record into a processed conversation.
///
/// `index` is the record's position in the source array and becomes the
/// conversation's `original_index`.
pub fn process_conversation(
    record: &ValidRecord<'_>,
    index: usize,
) -> Result<ProcessedConversation, ProcessError> {
    let messages = flatten_mapping(record.mapping)?;
    let fields = ConversationRecord::deserialize(record.record)?;

    Ok(ProcessedConversation {
        id: record.id_string(),
        title: fields.title,
        create_time: fields.create_time,
        update_time: fields.update_time,
        gizmo_id: fields.gizmo_id,
        gizmo_type: fields.gizmo_type,
        default_model_slug: fields.default_model_slug,
        conversation_template_id: fields.conversation_template_id,
        is_archived: fields.is_archived,
        is_starred: fields.is_starred,
        formatted_date: format_display_date(fields.create_time),
        messages,
        original_index: index,
    })
}
