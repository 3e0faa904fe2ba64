use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParseErrorKind {
    /// The input is not JSON, or its root is not an array (fatal)
    MalformedRoot,
    /// A record lacks `id` or `mapping`
    MissingField,
    /// A record passed validation but could not be processed
    ProcessingFailure,
}

impl ParseErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseErrorKind::MalformedRoot => "malformed-root",
            ParseErrorKind::MissingField => "missing-field",
            ParseErrorKind::ProcessingFailure => "processing-failure",
        }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A problem found while parsing an archive.
///
/// These are values handed back to the caller alongside the (possibly partial) model,
/// not errors that abort the parse.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{kind}: {message}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

impl ParseError {
    pub fn malformed_root(message: impl Into<String>) -> Self {
        Self { kind: ParseErrorKind::MalformedRoot, message: message.into(), conversation_id: None }
    }

    pub fn missing_field(message: impl Into<String>, conversation_id: Option<String>) -> Self {
        Self { kind: ParseErrorKind::MissingField, message: message.into(), conversation_id }
    }

    pub fn processing_failure(message: impl Into<String>, conversation_id: Option<String>) -> Self {
        Self { kind: ParseErrorKind::ProcessingFailure, message: message.into(), conversation_id }
    }
}
