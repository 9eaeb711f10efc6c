//! In-memory model of one blnk shortcut document.
//!
//! A document keeps its sections and keys in file order and remembers
//! every comment together with the construct it followed, so a
//! load/save cycle reproduces the file without losing anything.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::types::{AssignOp, FormatDialect, TargetType};

/// Content type every blnk file must declare.
pub const CONTENT_TYPE: &str = "text/blnk";

/// Extension of shortcut files, with the dot.
pub const FILE_EXTENSION: &str = ".blnk";

/// Section holding the shortcut options (type, name, target).
pub const SECTION_OPTIONS: &str = "X-Blnk";

/// Section holding timestamps of the target.
pub const SECTION_TARGET_META: &str = "X-Target Metadata";

/// Section recording where the shortcut was made.
pub const SECTION_SOURCE_META: &str = "X-Source Metadata";

/// Name of the pseudo-section for keys that appear before any
/// bracketed header. It is written back without a header.
pub const SECTION_GLOBAL: &str = "";

pub(crate) const COMMENT_CHAR: char = '#';

/// Strip one layer of matching single or double quotes.
pub(crate) fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() > 1 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Which construct a comment line followed in the source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentAnchor {
    /// Before any construct.
    Top,
    /// After the content-type declaration.
    ContentType,
    /// After a `[section]` header.
    Section(String),
    /// After a key/value line.
    Key(String),
}

/// All comments of a document, grouped by anchor.
#[derive(Debug, Clone, Default)]
pub struct Comments {
    top: Vec<String>,
    content_type: Vec<String>,
    sections: Vec<(String, Vec<String>)>,
    keys: Vec<(String, Vec<String>)>,
}

impl Comments {
    pub fn push(&mut self, anchor: &CommentAnchor, line: String) {
        match anchor {
            CommentAnchor::Top => self.top.push(line),
            CommentAnchor::ContentType => self.content_type.push(line),
            CommentAnchor::Section(name) => push_grouped(&mut self.sections, name, line),
            CommentAnchor::Key(key) => push_grouped(&mut self.keys, key, line),
        }
    }

    pub fn top(&self) -> &[String] {
        &self.top
    }

    pub fn content_type(&self) -> &[String] {
        &self.content_type
    }

    pub fn for_section(&self, name: &str) -> &[String] {
        find_grouped(&self.sections, name)
    }

    pub fn for_key(&self, key: &str) -> &[String] {
        find_grouped(&self.keys, key)
    }

    /// Keys that carry at least one comment, in first-seen order.
    pub fn commented_keys(&self) -> impl Iterator<Item = &str> {
        self.keys
            .iter()
            .filter(|(_, lines)| !lines.is_empty())
            .map(|(key, _)| key.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_empty()
            && self.content_type.is_empty()
            && self.sections.iter().all(|(_, lines)| lines.is_empty())
            && self.keys.iter().all(|(_, lines)| lines.is_empty())
    }
}

fn push_grouped(groups: &mut Vec<(String, Vec<String>)>, name: &str, line: String) {
    if let Some((_, lines)) = groups.iter_mut().find(|(n, _)| n == name) {
        lines.push(line);
    } else {
        groups.push((name.to_string(), vec![line]));
    }
}

fn find_grouped<'a>(groups: &'a [(String, Vec<String>)], name: &str) -> &'a [String] {
    groups
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, lines)| lines.as_slice())
        .unwrap_or(&[])
}

/// One named section with its key/value pairs in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    name: String,
    entries: Vec<(String, String)>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Replace the value in place, or append when the key is new.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Caller-supplied fields when pointing a document at a new target.
#[derive(Debug, Clone)]
pub struct CreateOptions {
    pub target_type: TargetType,
    /// Shortcut name. Required for URL targets, derived from the
    /// target leaf otherwise.
    pub name: Option<String>,
    /// Whether an Exec target wants a terminal.
    pub terminal: bool,
}

/// A parsed or freshly built shortcut document.
#[derive(Debug, Clone)]
pub struct Document {
    pub(crate) path: Option<PathBuf>,
    pub(crate) dialect: FormatDialect,
    pub(crate) assign_op: AssignOp,
    pub(crate) content_type: Option<String>,
    pub(crate) global: Section,
    pub(crate) sections: Vec<Section>,
    pub(crate) comments: Comments,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// An empty modern-dialect document with the three standard
    /// sections already registered.
    pub fn new() -> Self {
        Self {
            path: None,
            dialect: FormatDialect::Modern,
            assign_op: AssignOp::Equals,
            content_type: Some(CONTENT_TYPE.to_string()),
            global: Section::new(SECTION_GLOBAL),
            sections: vec![
                Section::new(SECTION_OPTIONS),
                Section::new(SECTION_TARGET_META),
                Section::new(SECTION_SOURCE_META),
            ],
            comments: Comments::default(),
        }
    }

    /// Parse a shortcut file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        crate::parser::load(path)
    }

    /// Validate, fill defaults, and write to `path`.
    pub fn save(&mut self, path: &Path, overwrite: bool) -> Result<()> {
        crate::serializer::save(self, path, overwrite)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = Some(path.into());
    }

    pub fn dialect(&self) -> FormatDialect {
        self.dialect
    }

    pub fn assign_op(&self) -> AssignOp {
        self.assign_op
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn comments(&self) -> &Comments {
        &self.comments
    }

    pub fn comments_mut(&mut self) -> &mut Comments {
        &mut self.comments
    }

    pub fn global(&self) -> &Section {
        &self.global
    }

    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        if name == SECTION_GLOBAL {
            return Some(&self.global);
        }
        self.sections.iter().find(|s| s.name == name)
    }

    /// Register a section if absent and return it mutably.
    pub fn open_section(&mut self, name: &str) -> &mut Section {
        if name == SECTION_GLOBAL {
            return &mut self.global;
        }
        if let Some(idx) = self.sections.iter().position(|s| s.name == name) {
            return &mut self.sections[idx];
        }
        self.sections.push(Section::new(name));
        self.sections.last_mut().expect("just pushed")
    }

    /// Set a key in an already opened section.
    pub fn set_value(&mut self, section: &str, key: &str, value: &str) -> Result<()> {
        if section == SECTION_GLOBAL {
            self.global.set(key, value);
            return Ok(());
        }
        match self.sections.iter_mut().find(|s| s.name == section) {
            Some(s) => {
                s.set(key, value);
                Ok(())
            }
            None => Err(Error::UnknownSection {
                section: section.to_string(),
            }),
        }
    }

    /// Find a key anywhere in the document. The options section wins,
    /// then the global pseudo-section, then the remaining sections in
    /// file order. The raw (possibly quoted) value is returned.
    pub fn lookup(&self, key: &str) -> Option<(&str, &str)> {
        if let Some(value) = self.section(SECTION_OPTIONS).and_then(|s| s.get(key)) {
            return Some((SECTION_OPTIONS, value));
        }
        if let Some(value) = self.global.get(key) {
            return Some((SECTION_GLOBAL, value));
        }
        for section in &self.sections {
            if section.name == SECTION_OPTIONS {
                continue;
            }
            if let Some(value) = section.get(key) {
                return Some((section.name.as_str(), value));
            }
        }
        None
    }

    /// Like [`lookup`](Self::lookup) but with enclosing quotes
    /// stripped.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.lookup(key).map(|(_, value)| strip_quotes(value))
    }

    pub fn target_type(&self) -> Option<TargetType> {
        self.get("Type").and_then(TargetType::parse)
    }

    /// Raw target value under the key owned by the document's type.
    pub fn target(&self) -> Option<&str> {
        let key = self.target_type()?.target_key();
        self.lookup(key).map(|(_, value)| value)
    }

    /// Point the document at `target`, deriving the shortcut name and
    /// stamping metadata. Also proposes `<Name>.blnk` as the save
    /// path when none is set.
    pub fn set_target(&mut self, target: &str, options: &CreateOptions) -> Result<()> {
        if target.to_lowercase().ends_with(FILE_EXTENSION) {
            return Err(Error::BlnkTarget {
                path: PathBuf::from(target),
            });
        }
        let name = match &options.name {
            Some(name) => name.clone(),
            None => derive_name(target, options.target_type)?,
        };
        if name.starts_with('.') {
            warn!(name = %name, "shortcut name starts with a dot and will be hidden");
        }
        let terminal = if options.terminal { "true" } else { "false" };
        let opts = self.open_section(SECTION_OPTIONS);
        opts.set("Type", options.target_type.as_str());
        opts.set("Name", name.clone());
        opts.set("Terminal", terminal);
        if self.path.is_none() {
            self.path = Some(PathBuf::from(format!("{name}{FILE_EXTENSION}")));
        }
        self.analyze_target(Some(target))
    }

    /// Refresh target metadata: timestamps of the target, hostname of
    /// this machine, and a generated `Comment` when none exists.
    ///
    /// With `target` given, the target key is rewritten; otherwise the
    /// stored target is re-analyzed (a value parked under the wrong
    /// target key is relocated with a warning).
    pub fn analyze_target(&mut self, target: Option<&str>) -> Result<()> {
        let target_type = self
            .target_type()
            .ok_or_else(|| match self.get("Type") {
                Some(other) => Error::UnknownType(other.to_string()),
                None => Error::MissingTarget,
            })?;
        let key = target_type.target_key();

        let target = match target {
            Some(t) => t.to_string(),
            None => match self.lookup(key) {
                Some((_, value)) => strip_quotes(value).to_string(),
                None => self.relocate_target(key)?,
            },
        };

        match target_type {
            TargetType::Link => {
                let accessed = now_rfc3339();
                self.open_section(SECTION_TARGET_META).set("accessed", accessed);
            }
            _ => {
                let meta = fs::metadata(&target)
                    .map_err(|e| Error::io(&target, e))?;
                let modified_at = meta
                    .modified()
                    .map_err(|e| Error::io(&target, e))?;
                let created_at = meta.created().unwrap_or(modified_at);
                let meta_section = self.open_section(SECTION_TARGET_META);
                meta_section.set("created", format_time(created_at));
                meta_section.set("modified", format_time(modified_at));
            }
        }

        let hostname = whoami::fallible::hostname()
            .unwrap_or_else(|_| "localhost".to_string());
        self.open_section(SECTION_SOURCE_META).set("hostname", hostname);

        if self.get("Comment").is_none() {
            let comment = format!("Shortcut to {target}");
            self.open_section(SECTION_OPTIONS).set("Comment", comment);
        }

        let stored = if target.contains(char::is_whitespace) {
            format!("\"{target}\"")
        } else {
            target
        };
        self.open_section(SECTION_OPTIONS).set(key, stored);
        Ok(())
    }

    /// Move a target value parked under another target key to `key`.
    fn relocate_target(&mut self, key: &'static str) -> Result<String> {
        for other in ["Exec", "Path", "URL"] {
            if other == key {
                continue;
            }
            let parked = self.open_section(SECTION_OPTIONS).remove(other);
            if let Some(value) = parked {
                warn!(from = other, to = key, "target stored under wrong key, moving");
                return Ok(strip_quotes(&value).to_string());
            }
        }
        Err(Error::MissingTarget)
    }
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn format_time(time: std::time::SystemTime) -> String {
    let stamp: DateTime<Utc> = time.into();
    stamp.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Derive a shortcut name from the target leaf. Files lose their
/// extension; directories keep every dot in their name.
fn derive_name(target: &str, target_type: TargetType) -> Result<String> {
    if target_type == TargetType::Link {
        return Err(Error::MissingName);
    }
    let trimmed = target.trim_end_matches(['/', '\\']);
    let leaf = Path::new(trimmed)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(trimmed);
    let name = match target_type {
        TargetType::Directory => leaf.to_string(),
        _ => Path::new(leaf)
            .file_stem()
            .and_then(|n| n.to_str())
            .unwrap_or(leaf)
            .to_string(),
    };
    debug!(target = %target, name = %name, "derived shortcut name");
    Ok(name)
}
