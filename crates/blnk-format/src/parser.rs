//! Line-oriented parser for the blnk format.
//!
//! The first significant line of a file must establish the content
//! type, either with a modern `[X-Blnk]` header or a legacy
//! `Content-Type:` declaration. Anything else yields [`Error::NotBlnk`]
//! so callers can fall back to opening the file directly.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::document::{
    CommentAnchor, Document, COMMENT_CHAR, CONTENT_TYPE, SECTION_OPTIONS,
};
use crate::error::{Error, Result};
use crate::types::{AssignOp, FormatDialect};

const CONTENT_TYPE_PREFIX: &str = "Content-Type:";

/// What the previous significant line was. Drives comment attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
enum LastLine {
    Nothing,
    ContentType,
    Section(String),
    Key(String),
}

/// All mutable parsing state, carried explicitly between lines.
struct ParseState<'a> {
    doc: Document,
    source: Option<&'a Path>,
    current_section: Option<String>,
    last_line: LastLine,
}

/// Read and parse a shortcut file.
pub fn load(path: &Path) -> Result<Document> {
    let input = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let mut doc = parse_str(&input, Some(path))?;
    doc.set_path(path);
    Ok(doc)
}

/// Parse blnk text. `source` is only used in error messages.
pub fn parse_str(input: &str, source: Option<&Path>) -> Result<Document> {
    let mut doc = Document::new();
    doc.content_type = None;
    let mut state = ParseState {
        doc,
        source,
        current_section: None,
        last_line: LastLine::Nothing,
    };
    for (idx, line) in input.lines().enumerate() {
        push_line(&mut state, line, idx + 1)?;
    }
    if state.doc.content_type.is_none() {
        return Err(Error::NotBlnk {
            message: "no content type declaration".to_string(),
        });
    }
    Ok(state.doc)
}

fn push_line(state: &mut ParseState<'_>, raw: &str, row: usize) -> Result<()> {
    let line = raw.trim();
    if line.is_empty() {
        return Ok(());
    }

    if state.doc.content_type.is_none() {
        if line.starts_with(COMMENT_CHAR) {
            // Only comments may precede the declaration.
            state
                .doc
                .comments_mut()
                .push(&CommentAnchor::Top, line.to_string());
            return Ok(());
        }
        return establish_content_type(state, line);
    }

    if line.starts_with(COMMENT_CHAR) {
        let anchor = match &state.last_line {
            LastLine::Nothing => CommentAnchor::Top,
            LastLine::ContentType => CommentAnchor::ContentType,
            LastLine::Section(name) => CommentAnchor::Section(name.clone()),
            LastLine::Key(key) => CommentAnchor::Key(key.clone()),
        };
        state.doc.comments_mut().push(&anchor, line.to_string());
        return Ok(());
    }

    if let Some(header) = line.strip_prefix('[') {
        let name = header.strip_suffix(']').ok_or_else(|| {
            Error::syntax(state.source, row, "unterminated section header")
        })?;
        if name.is_empty() {
            return Err(Error::syntax(state.source, row, "empty section name"));
        }
        state.doc.open_section(name);
        debug!(section = name, row, "opened section");
        state.current_section = Some(name.to_string());
        state.last_line = LastLine::Section(name.to_string());
        return Ok(());
    }

    let (key, value) = split_line(state, line, row)?;
    if value.contains(COMMENT_CHAR) {
        // Legal (URL fragments), but worth a trace.
        warn!(key = %key, row, "value contains '#', kept verbatim");
    }
    let section = state.current_section.clone().unwrap_or_default();
    state.doc.set_value(&section, &key, &value)?;
    debug!(section = %section, key = %key, row, "parsed key");
    state.last_line = LastLine::Key(key);
    Ok(())
}

/// Handle the first significant line.
fn establish_content_type(state: &mut ParseState<'_>, line: &str) -> Result<()> {
    if line == format!("[{SECTION_OPTIONS}]") {
        state.doc.content_type = Some(CONTENT_TYPE.to_string());
        state.doc.dialect = FormatDialect::Modern;
        state.current_section = Some(SECTION_OPTIONS.to_string());
        state.last_line = LastLine::Section(SECTION_OPTIONS.to_string());
        return Ok(());
    }
    if let Some(rest) = line.strip_prefix(CONTENT_TYPE_PREFIX) {
        // Parameters after ';' are tolerated and discarded.
        let value = rest.split(';').next().unwrap_or("").trim();
        if value != CONTENT_TYPE {
            return Err(Error::NotBlnk {
                message: format!("content type is {value:?}"),
            });
        }
        state.doc.content_type = Some(value.to_string());
        state.doc.dialect = FormatDialect::Legacy;
        state.last_line = LastLine::ContentType;
        return Ok(());
    }
    Err(Error::NotBlnk {
        message: format!("first line is not a content type declaration: {line:?}"),
    })
}

/// Split one `key <op> value` line.
///
/// When the line has no `=`, a lone `:` downgrades the document to the
/// legacy operator, unless the colon looks like part of a Windows path
/// (`:` followed by a single backslash). A `\\` right after the colon
/// is a UNC share and does allow the downgrade.
fn split_line(state: &mut ParseState<'_>, line: &str, row: usize) -> Result<(String, String)> {
    let op = state.doc.assign_op;
    let mut idx = line.find(op.as_str());
    if idx.is_none() && op == AssignOp::Equals {
        if let Some(colon) = line.find(':') {
            let bytes = line.as_bytes();
            let after = bytes.get(colon + 1);
            let after2 = bytes.get(colon + 2);
            let drive_path = after == Some(&b'\\') && after2 != Some(&b'\\');
            if drive_path {
                warn!(row, "colon looks like a drive path, not an operator");
            } else {
                warn!(row, "no '=' found, downgrading to legacy ':' operator");
                state.doc.assign_op = AssignOp::Colon;
                idx = Some(colon);
            }
        }
    }
    let idx = idx.ok_or_else(|| {
        Error::syntax(
            state.source,
            row,
            format!("line contains no {:?} operator", state.doc.assign_op.as_str()),
        )
    })?;
    let key = line[..idx].trim().to_string();
    let value = line[idx + 1..].trim().to_string();
    if key.is_empty() {
        return Err(Error::syntax(state.source, row, "empty key"));
    }
    Ok((key, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{SECTION_GLOBAL, SECTION_SOURCE_META, SECTION_TARGET_META};
    use pretty_assertions::assert_eq;

    const MODERN: &str = "\
[X-Blnk]
Type=File
Name=notes
Path=/home/me/notes.txt

[X-Target Metadata]
created=2024-01-01T00:00:00Z
";

    #[test]
    fn parses_modern_file() {
        let doc = parse_str(MODERN, None).unwrap();
        assert_eq!(doc.dialect(), FormatDialect::Modern);
        assert_eq!(doc.assign_op(), AssignOp::Equals);
        assert_eq!(doc.get("Name"), Some("notes"));
        assert_eq!(
            doc.section(SECTION_TARGET_META).unwrap().get("created"),
            Some("2024-01-01T00:00:00Z")
        );
    }

    #[test]
    fn parses_legacy_declaration_into_global_section() {
        let input = "\
Content-Type: text/blnk
Type: Link
URL: https://example.org
";
        let doc = parse_str(input, None).unwrap();
        assert_eq!(doc.dialect(), FormatDialect::Legacy);
        assert_eq!(doc.assign_op(), AssignOp::Colon);
        assert_eq!(doc.section(SECTION_GLOBAL).unwrap().get("Type"), Some("Link"));
        assert_eq!(doc.get("URL"), Some("https://example.org"));
    }

    #[test]
    fn legacy_colon_not_taken_inside_drive_path() {
        // The '=' operator wins; the colon in C:\ is part of the value.
        let input = "\
[X-Blnk]
Type=File
Path=C:\\Users\\me\\doc.txt
";
        let doc = parse_str(input, None).unwrap();
        assert_eq!(doc.assign_op(), AssignOp::Equals);
        assert_eq!(doc.get("Path"), Some("C:\\Users\\me\\doc.txt"));
    }

    #[test]
    fn drive_path_without_equals_is_a_syntax_error() {
        let input = "\
[X-Blnk]
Path C:\\Users\\me
";
        let err = parse_str(input, None).unwrap_err();
        assert!(matches!(err, Error::Syntax { row: 2, .. }));
    }

    #[test]
    fn unc_colon_downgrades_operator() {
        let input = "\
Content-Type: text/blnk
Path: \\\\server\\share
";
        let doc = parse_str(input, None).unwrap();
        assert_eq!(doc.assign_op(), AssignOp::Colon);
        assert_eq!(doc.get("Path"), Some("\\\\server\\share"));
    }

    #[test]
    fn plain_text_is_not_blnk() {
        let err = parse_str("hello world\n", None).unwrap_err();
        assert!(err.is_not_blnk());
    }

    #[test]
    fn wrong_content_type_is_not_blnk() {
        let err = parse_str("Content-Type: text/plain\n", None).unwrap_err();
        assert!(err.is_not_blnk());
    }

    #[test]
    fn empty_input_is_not_blnk() {
        assert!(parse_str("", None).unwrap_err().is_not_blnk());
    }

    #[test]
    fn empty_section_name_is_syntax_error() {
        let input = "[X-Blnk]\n[]\n";
        let err = parse_str(input, None).unwrap_err();
        assert!(matches!(err, Error::Syntax { row: 2, .. }));
    }

    #[test]
    fn comments_attach_to_preceding_construct() {
        let input = "\
# leading note
[X-Blnk]
# about the section
Type=File
# about the type
Name=n
Path=/tmp/n
";
        let doc = parse_str(input, None).unwrap();
        assert_eq!(doc.comments().top(), ["# leading note"]);
        assert_eq!(
            doc.comments().for_section(SECTION_OPTIONS),
            ["# about the section"]
        );
        assert_eq!(doc.comments().for_key("Type"), ["# about the type"]);
    }

    #[test]
    fn comment_after_content_type_line() {
        let input = "\
Content-Type: text/blnk
# remembered
Type: Link
";
        let doc = parse_str(input, None).unwrap();
        assert_eq!(doc.comments().content_type(), ["# remembered"]);
    }

    #[test]
    fn value_may_contain_hash() {
        let input = "\
[X-Blnk]
URL=https://example.org/page#anchor
";
        let doc = parse_str(input, None).unwrap();
        assert_eq!(doc.get("URL"), Some("https://example.org/page#anchor"));
    }

    #[test]
    fn load_records_source_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.blnk");
        std::fs::write(&path, MODERN).unwrap();
        let doc = load(&path).unwrap();
        assert_eq!(doc.path(), Some(path.as_path()));
        let _ = doc.section(SECTION_SOURCE_META);
    }
}
