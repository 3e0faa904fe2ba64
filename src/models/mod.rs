//! Data models for exported chat archives.
//!
//! This module defines the data structures used throughout the application:
//!
//! - [`ConversationRecord`], [`MessageNode`], [`Message`], [`MessageContent`] - raw
//!   archive records as they appear in the exported JSON
//! - [`ProcessedConversation`], [`ProcessedMessage`] - flattened conversations ready for display
//! - [`Project`] - conversations clustered under a shared project identifier
//! - [`ArchiveModel`] - the assembled result of one parse pass
//! - [`ParseError`] - non-fatal and fatal problems found while parsing
//!
//! Raw models use serde with custom deserializers for lenient fields (timestamps,
//! nullable flags) from the `parsers::deserializers` module. Everything produced by a
//! parse pass is immutable afterwards.

pub mod archive;
pub mod conversation;
pub mod error;
pub mod project;
pub mod record;

pub use archive::{ArchiveModel, ArchiveSource};
pub use conversation::{ProcessedConversation, ProcessedMessage, Role};
pub use error::{ParseError, ParseErrorKind};
pub use project::Project;
pub use record::{Author, ConversationRecord, Message, MessageContent, MessageNode};
