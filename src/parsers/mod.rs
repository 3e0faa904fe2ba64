//! Parsers for exported chat archives
//!
//! # Error Handling Strategy
//!
//! This module follows a **graceful degradation** approach:
//!
//! - **Fatal failures**: Text that is not valid JSON, or whose root is not an array, yields no
//!   model and exactly one `malformed-root` [`ParseError`](crate::models::ParseError).
//!
//! - **Record failures**: A record that fails validation (missing `id` or `mapping`) or
//!   processing (malformed nodes, authorless messages, mistyped fields) is dropped and reported with
//!   its id when known. A bad record never aborts the rest of the file.
//!
//! - **Typed internals**: Component failures are `thiserror` enums ([`FlattenError`],
//!   [`ProcessError`]) converted into `ParseError` values at the archive level. Only file access
//!   uses `anyhow::Result`.
//!
//! The caller always receives both the (possibly partial) model and the full error list.

pub mod archive;
pub mod content;
pub mod conversation;
pub mod deserializers;
pub mod tree;
pub mod validation;

pub use archive::{
    DEFAULT_CHUNK_SIZE, ParseOptions, ParseOutcome, parse_archive, parse_archive_file,
    parse_archive_with_options,
};
pub use content::extract_message_content;
pub use conversation::{ProcessError, process_conversation};
pub use tree::{FlattenError, MessageTree, flatten_mapping};
pub use validation::{ValidRecord, record_id, validate_conversation};
