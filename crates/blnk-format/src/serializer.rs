//! Validation and deterministic rendering of shortcut documents.
//!
//! Rendering happens into a `String` first and hits the disk in a
//! single write, so a failed save never leaves partial bytes behind.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::document::{Document, Section, CONTENT_TYPE, FILE_EXTENSION};
use crate::error::{Error, Result};
use crate::schema;
use crate::types::{AssignOp, FormatDialect, TargetType};

/// Validate `doc`, fill defaults, and write it to `path`.
///
/// Refuses to replace a file without the `.blnk` extension, and an
/// existing shortcut unless `overwrite` is set.
pub fn save(doc: &mut Document, path: &Path, overwrite: bool) -> Result<()> {
    validate(doc)?;
    if path.exists() {
        let is_blnk = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(&FILE_EXTENSION[1..]));
        if !is_blnk {
            return Err(Error::RefusedOverwrite { path: path.into() });
        }
        if !overwrite {
            return Err(Error::AlreadyExists { path: path.into() });
        }
    }
    let rendered = render(doc)?;
    fs::write(path, &rendered).map_err(|e| Error::io(path, e))?;
    doc.set_path(path);
    debug!(path = %path.display(), bytes = rendered.len(), "wrote shortcut");
    Ok(())
}

/// Fill per-type defaults and collect every missing required field.
pub fn validate(doc: &mut Document) -> Result<TargetType> {
    let target_type = match doc.get("Type") {
        Some(value) => {
            TargetType::parse(value).ok_or_else(|| Error::UnknownType(value.to_string()))?
        }
        None => return Err(Error::MissingTarget),
    };
    for (section, key, value) in schema::default_fields(target_type) {
        if doc.lookup(key).is_none() {
            doc.open_section(section).set(key, value);
            debug!(section, key, value, "filled default");
        }
    }
    let missing: Vec<String> = schema::required_fields(target_type)
        .into_iter()
        .filter(|(_, key)| doc.lookup(key).is_none())
        .map(|(section, key)| format!("{key} in [{section}]"))
        .collect();
    if !missing.is_empty() {
        return Err(Error::Validation {
            target_type,
            missing,
        });
    }
    Ok(target_type)
}

/// Render the document to text, re-emitting every comment exactly
/// once next to the construct it was attached to.
pub fn render(doc: &Document) -> Result<String> {
    let op = doc.assign_op();
    let mut out = String::new();
    let mut commented: HashSet<String> = HashSet::new();

    for line in doc.comments().top() {
        out.push_str(line);
        out.push('\n');
    }
    if doc.dialect() == FormatDialect::Legacy {
        out.push_str("Content-Type: ");
        out.push_str(CONTENT_TYPE);
        out.push('\n');
    }
    // Content-type comments ride near the top either way; legacy files
    // keep them under their declaration.
    for line in doc.comments().content_type() {
        out.push_str(line);
        out.push('\n');
    }
    if !doc.global().is_empty() {
        // Pre-header keys are written back without a header.
        render_entries(&mut out, doc, doc.global(), op, &mut commented)?;
        out.push('\n');
    }
    for section in doc.sections() {
        out.push('[');
        out.push_str(section.name());
        out.push_str("]\n");
        for line in doc.comments().for_section(section.name()) {
            out.push_str(line);
            out.push('\n');
        }
        render_entries(&mut out, doc, section, op, &mut commented)?;
        out.push('\n');
    }

    for key in doc.comments().commented_keys() {
        if !commented.contains(key) {
            return Err(Error::DroppedComment {
                key: key.to_string(),
            });
        }
    }
    Ok(out)
}

fn render_entries(
    out: &mut String,
    doc: &Document,
    section: &Section,
    op: AssignOp,
    commented: &mut HashSet<String>,
) -> Result<()> {
    for (key, value) in section.entries() {
        if key.contains(op.as_str()) {
            return Err(Error::OperatorInKey {
                key: key.to_string(),
                op: op.as_str().to_string(),
            });
        }
        out.push_str(key);
        match op {
            AssignOp::Equals => out.push('='),
            AssignOp::Colon => out.push_str(": "),
        }
        out.push_str(value);
        out.push('\n');
        let lines = doc.comments().for_key(key);
        if !lines.is_empty() {
            if commented.insert(key.to_string()) {
                for line in lines {
                    out.push_str(line);
                    out.push('\n');
                }
            } else {
                warn!(key, "duplicate key, comments already emitted once");
            }
        }
    }
    Ok(())
}
