//! Summary statistics over a parsed archive.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{ArchiveModel, Role};
use crate::utils::{epoch_to_datetime, month_key};

const UNKNOWN_MODEL: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArchiveStats {
    pub total_conversations: usize,
    pub total_messages: usize,
    pub messages_by_role: BTreeMap<Role, usize>,
    /// Conversation count per `default_model_slug`
    pub model_usage: BTreeMap<String, usize>,
    /// Conversation count per creation month ("2024-01")
    pub conversations_by_month: BTreeMap<String, usize>,
    pub archived_conversations: usize,
    pub starred_conversations: usize,
    pub standalone_conversations: usize,
    pub total_projects: usize,
    pub earliest_create_time: Option<f64>,
    pub latest_create_time: Option<f64>,
}

impl ArchiveStats {
    pub fn from_archive(archive: &ArchiveModel) -> Self {
        let mut stats = ArchiveStats {
            total_conversations: archive.total_conversations,
            total_messages: 0,
            messages_by_role: BTreeMap::new(),
            model_usage: BTreeMap::new(),
            conversations_by_month: BTreeMap::new(),
            archived_conversations: 0,
            starred_conversations: 0,
            standalone_conversations: 0,
            total_projects: archive.total_projects,
            earliest_create_time: None,
            latest_create_time: None,
        };

        let mut earliest: Option<(DateTime<Utc>, f64)> = None;
        let mut latest: Option<(DateTime<Utc>, f64)> = None;

        for conversation in &archive.conversations {
            stats.total_messages += conversation.messages.len();
            for message in &conversation.messages {
                *stats.messages_by_role.entry(message.role).or_default() += 1;
            }

            let model = conversation.default_model_slug.as_deref().unwrap_or(UNKNOWN_MODEL);
            *stats.model_usage.entry(model.to_string()).or_default() += 1;

            if let Some(month) = month_key(conversation.create_time) {
                *stats.conversations_by_month.entry(month).or_default() += 1;
            }

            if conversation.is_archived {
                stats.archived_conversations += 1;
            }
            if conversation.is_starred == Some(true) {
                stats.starred_conversations += 1;
            }
            if conversation.is_standalone() {
                stats.standalone_conversations += 1;
            }

            // Compare normalized instants; seconds and milliseconds may be mixed
            if let Some(raw) = conversation.create_time.filter(|t| *t != 0.0)
                && let Some(instant) = epoch_to_datetime(raw)
            {
                if earliest.is_none_or(|(t, _)| instant < t) {
                    earliest = Some((instant, raw));
                }
                if latest.is_none_or(|(t, _)| instant > t) {
                    latest = Some((instant, raw));
                }
            }
        }

        stats.earliest_create_time = earliest.map(|(_, raw)| raw);
        stats.latest_create_time = latest.map(|(_, raw)| raw);
        stats
    }

    /// Models sorted by descending usage, ties by name
    pub fn models_by_usage(&self) -> Vec<(&str, usize)> {
        let mut models: Vec<(&str, usize)> =
            self.model_usage.iter().map(|(name, count)| (name.as_str(), *count)).collect();
        models.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        models
    }
}
