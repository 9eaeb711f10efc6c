//! Error types for the format crate

use std::path::{Path, PathBuf};

use crate::types::TargetType;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input never established the blnk content type. Callers use
    /// this as a signal to fall back to opening the file directly.
    #[error("not a blnk file: {message}")]
    NotBlnk { message: String },

    /// A line could not be parsed. Row numbers are 1-based.
    #[error("{path}:{row}: {message}")]
    Syntax {
        path: String,
        row: usize,
        message: String,
    },

    /// Required fields were absent at save time. Every missing field
    /// is listed; nothing was written.
    #[error("cannot save {target_type} shortcut, missing: {}", .missing.join(", "))]
    Validation {
        target_type: TargetType,
        missing: Vec<String>,
    },

    #[error("refusing to overwrite non-blnk file: {path}")]
    RefusedOverwrite { path: PathBuf },

    #[error("{path} already exists; pass overwrite to replace it")]
    AlreadyExists { path: PathBuf },

    /// A comment attached to this key was never written back.
    #[error("comment for key {key:?} would be lost on save")]
    DroppedComment { key: String },

    #[error("key {key:?} contains the assignment operator {op:?}")]
    OperatorInKey { key: String, op: String },

    /// A shortcut must not point at another shortcut.
    #[error("refusing to target another blnk file: {path}")]
    BlnkTarget { path: PathBuf },

    /// URL shortcuts carry no leaf to derive a name from.
    #[error("a name is required for a URL shortcut")]
    MissingName,

    #[error("document has no target yet")]
    MissingTarget,

    #[error("unknown target type {0:?}")]
    UnknownType(String),

    /// A key was pushed into a section that was never opened. This is
    /// a caller bug, not a file problem.
    #[error("section {section:?} was never opened")]
    UnknownSection { section: String },

    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub fn syntax(path: Option<&Path>, row: usize, message: impl Into<String>) -> Self {
        Error::Syntax {
            path: path
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<input>".to_string()),
            row,
            message: message.into(),
        }
    }

    /// True when the caller should open the file by association
    /// instead of treating this as a failure.
    pub fn is_not_blnk(&self) -> bool {
        matches!(self, Error::NotBlnk { .. })
    }
}
