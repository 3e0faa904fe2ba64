//! Chat Archive Explorer - Parse and browse exported chat archives
//!
//! This library turns a `conversations.json` export (a JSON array of conversation records
//! whose messages form a tree) into a normalized in-memory model. It supports:
//!
//! - Flattening each conversation's message tree into a cycle-safe, ordered message list
//! - Collecting per-conversation failures without aborting the whole parse
//! - Grouping conversations into projects and deriving readable project names
//! - Summary statistics and a small filter query language over the result
//!
//! # Example
//!
//! ```no_run
//! use chat_archive_explorer::{ParseOptions, parse_archive_file};
//! use std::path::PathBuf;
//!
//! let path = PathBuf::from("/Users/alice/Downloads/conversations.json");
//! let outcome = parse_archive_file(&path, &ParseOptions::default())?;
//! if let Some(archive) = outcome.archive {
//!     println!("Parsed {} conversations", archive.total_conversations);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod filters;
pub mod models;
pub mod parsers;
pub mod projects;
pub mod stats;
pub mod utils;

// Re-export commonly used types
pub use models::{
    ArchiveModel, ArchiveSource, ParseError, ParseErrorKind, ProcessedConversation,
    ProcessedMessage, Project, Role,
};
pub use parsers::{ParseOptions, ParseOutcome, parse_archive, parse_archive_file, parse_archive_with_options};
pub use projects::derive_project_name;
pub use stats::ArchiveStats;
pub use utils::paths::format_path_with_tilde;
