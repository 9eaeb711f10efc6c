//! Core value types shared across the format crate

use std::fmt;

/// What a shortcut points at.
///
/// The variant decides which key in the options section holds the
/// target value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetType {
    /// A program to execute.
    Exec,
    /// A local document opened by association.
    File,
    /// A local directory opened in the file manager.
    Directory,
    /// A URL opened in the browser.
    Link,
}

impl TargetType {
    pub const ALL: [TargetType; 4] = [
        TargetType::Exec,
        TargetType::File,
        TargetType::Directory,
        TargetType::Link,
    ];

    /// The options-section key that carries the target for this type.
    pub fn target_key(self) -> &'static str {
        match self {
            TargetType::Exec => "Exec",
            TargetType::File | TargetType::Directory => "Path",
            TargetType::Link => "URL",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TargetType::Exec => "Exec",
            TargetType::File => "File",
            TargetType::Directory => "Directory",
            TargetType::Link => "Link",
        }
    }

    /// Parse a `Type` value. Matching is exact; unknown values are
    /// reported to the caller rather than defaulted.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Exec" => Some(TargetType::Exec),
            "File" => Some(TargetType::File),
            "Directory" => Some(TargetType::Directory),
            "Link" => Some(TargetType::Link),
            _ => None,
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the document declared its content type.
///
/// `Modern` files open with an `[X-Blnk]` header; `Legacy` files carry
/// an explicit `Content-Type:` line. The dialect is fixed at parse
/// time and never inferred afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatDialect {
    #[default]
    Modern,
    Legacy,
}

/// Key/value assignment operator for one document.
///
/// `=` is the standard operator. `:` survives for old files and is
/// only adopted when a line contains no `=` and the colon cannot be
/// part of a Windows path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssignOp {
    #[default]
    Equals,
    Colon,
}

impl AssignOp {
    pub fn as_str(self) -> &'static str {
        match self {
            AssignOp::Equals => "=",
            AssignOp::Colon => ":",
        }
    }
}

impl fmt::Display for AssignOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
