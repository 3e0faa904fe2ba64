use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use log::{debug, info, warn};
use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value;

use super::conversation::process_conversation;
use super::validation::validate_conversation;
use crate::models::{ArchiveModel, ArchiveSource, ParseError, ProcessedConversation};
use crate::projects::group_conversations_by_project;
use crate::utils::read_archive_file;

/// Number of records processed between cancellation checkpoints
pub const DEFAULT_CHUNK_SIZE: usize = 256;

/// Tuning knobs for an archive parse
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Process the records of each chunk on the rayon thread pool
    pub parallel: bool,
    pub chunk_size: usize,
    /// Checked between chunks; setting it stops the parse without a model
    pub cancel: Option<Arc<AtomicBool>>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { parallel: true, chunk_size: DEFAULT_CHUNK_SIZE, cancel: None }
    }
}

impl ParseOptions {
    pub fn sequential() -> Self {
        Self { parallel: false, ..Self::default() }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

/// Model and error list produced by one parse.
///
/// `archive` is `None` only on fatal failures (invalid JSON, non-array root) or
/// cancellation; a non-empty `errors` list does not imply a missing model.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ParseOutcome {
    pub archive: Option<ArchiveModel>,
    pub errors: Vec<ParseError>,
    pub cancelled: bool,
}

impl ParseOutcome {
    fn fatal(error: ParseError) -> Self {
        warn!("Archive parse failed: {}", error.message);
        Self { archive: None, errors: vec![error], cancelled: false }
    }

    pub fn is_success(&self) -> bool {
        self.archive.is_some()
    }
}

/// Parse archive JSON text with default options
///
/// # Examples
///
/// ```
/// use chat_archive_explorer::parse_archive;
///
/// let outcome = parse_archive(r#"[{"id": "c1", "mapping": {}}]"#, "conversations.json");
/// let archive = outcome.archive.unwrap();
/// assert_eq!(archive.total_conversations, 1);
/// assert!(outcome.errors.is_empty());
/// ```
pub fn parse_archive(json: &str, source_name: &str) -> ParseOutcome {
    parse_archive_with_options(json, source_name, &ParseOptions::default())
}

/// Parse archive JSON text.
///
/// Records that fail validation or processing are dropped and reported in
/// [`ParseOutcome::errors`]; the loop always continues with the next record.
/// Conversations and errors keep input order whether or not records are processed
/// in parallel.
pub fn parse_archive_with_options(
    json: &str,
    source_name: &str,
    options: &ParseOptions,
) -> ParseOutcome {
    let root: Value = match serde_json::from_str(json) {
        Ok(root) => root,
        Err(e) => {
            return ParseOutcome::fatal(ParseError::malformed_root(format!(
                "JSON parsing failed: {}",
                e
            )));
        }
    };

    let Value::Array(records) = root else {
        return ParseOutcome::fatal(ParseError::malformed_root(
            "Root level must be an array of conversations",
        ));
    };

    let source = ArchiveSource::from_name(source_name, json.len());
    build_archive(&records, source, options)
}

/// Read an archive file from disk and parse it.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read, is not a `.json` file,
/// is empty, or exceeds the size limit. Problems inside the archive are reported in
/// the returned [`ParseOutcome`] instead.
pub fn parse_archive_file(path: &Path, options: &ParseOptions) -> Result<ParseOutcome> {
    let json = read_archive_file(path)?;
    let mut outcome = parse_archive_with_options(&json, &path.to_string_lossy(), options);
    if let Some(archive) = outcome.archive.as_mut() {
        archive.source.path = Some(path.to_path_buf());
    }
    Ok(outcome)
}

fn build_archive(records: &[Value], source: ArchiveSource, options: &ParseOptions) -> ParseOutcome {
    let chunk_size = options.chunk_size.max(1);
    let mut conversations = Vec::with_capacity(records.len());
    let mut errors = Vec::new();

    for (chunk_index, chunk) in records.chunks(chunk_size).enumerate() {
        let offset = chunk_index * chunk_size;

        if options.is_cancelled() {
            info!("Parse of {} cancelled after {} of {} records", source.name, offset, records.len());
            return ParseOutcome { archive: None, errors, cancelled: true };
        }

        let results: Vec<Result<ProcessedConversation, ParseError>> = if options.parallel {
            chunk.par_iter().enumerate().map(|(i, raw)| process_record(raw, offset + i)).collect()
        } else {
            chunk.iter().enumerate().map(|(i, raw)| process_record(raw, offset + i)).collect()
        };

        for result in results {
            match result {
                Ok(conversation) => conversations.push(conversation),
                Err(error) => {
                    debug!("Skipping record: {}", error);
                    errors.push(error);
                }
            }
        }

        debug!("Processed records {}..{} of {}", offset, offset + chunk.len(), records.len());
    }

    let projects = group_conversations_by_project(&conversations);

    if !errors.is_empty() {
        warn!(
            "Skipped {} of {} conversations in {}",
            errors.len(),
            records.len(),
            source.name
        );
    }
    info!(
        "Parsed {}: {} conversations ({} errors, {} projects)",
        source.name,
        conversations.len(),
        errors.len(),
        projects.len()
    );

    let archive = ArchiveModel {
        source,
        total_conversations: conversations.len(),
        total_projects: projects.len(),
        conversations,
        projects,
    };

    ParseOutcome { archive: Some(archive), errors, cancelled: false }
}

fn process_record(raw: &Value, index: usize) -> Result<ProcessedConversation, ParseError> {
    let record = validate_conversation(raw)?;
    process_conversation(&record, index).map_err(|e| {
        ParseError::processing_failure(
            format!("Failed to process conversation: {}", e),
            Some(record.id_string()),
        )
    })
}
