//! Parsing, validation, and serialization of blnk shortcut files.
//!
//! A blnk file is a small INI-like text document describing one
//! shortcut: what kind of thing it points at, where that thing lives,
//! and when it was last seen. This crate owns the file format only;
//! path resolution and launching live in their own crates.

pub mod document;
pub mod error;
pub mod parser;
pub mod schema;
pub mod serializer;
pub mod types;

pub use document::{
    CommentAnchor, Comments, CreateOptions, Document, Section, CONTENT_TYPE, FILE_EXTENSION,
    SECTION_GLOBAL, SECTION_OPTIONS, SECTION_SOURCE_META, SECTION_TARGET_META,
};
pub use error::{Error, Result};
pub use parser::{load, parse_str};
pub use serializer::{render, save, validate};
pub use types::{AssignOp, FormatDialect, TargetType};
