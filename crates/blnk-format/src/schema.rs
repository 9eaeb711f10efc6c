//! Required and default fields per target type.

use crate::document::{SECTION_OPTIONS, SECTION_SOURCE_META, SECTION_TARGET_META};
use crate::types::TargetType;

/// `(section, key)` pairs that must be present before a document of
/// this type can be written.
pub fn required_fields(target_type: TargetType) -> Vec<(&'static str, &'static str)> {
    let mut fields = vec![
        (SECTION_OPTIONS, "Type"),
        (SECTION_OPTIONS, "Name"),
        (SECTION_OPTIONS, "Comment"),
    ];
    match target_type {
        TargetType::Exec => {
            fields.push((SECTION_OPTIONS, "Exec"));
            fields.push((SECTION_OPTIONS, "Terminal"));
            fields.push((SECTION_TARGET_META, "created"));
            fields.push((SECTION_TARGET_META, "modified"));
        }
        TargetType::File | TargetType::Directory => {
            fields.push((SECTION_OPTIONS, "Path"));
            fields.push((SECTION_TARGET_META, "created"));
            fields.push((SECTION_TARGET_META, "modified"));
        }
        TargetType::Link => {
            fields.push((SECTION_OPTIONS, "URL"));
            fields.push((SECTION_TARGET_META, "accessed"));
        }
    }
    fields.push((SECTION_SOURCE_META, "hostname"));
    fields
}

/// `(section, key, value)` triples filled in automatically when the
/// key is absent at save time.
pub fn default_fields(target_type: TargetType) -> Vec<(&'static str, &'static str, &'static str)> {
    let mut defaults = vec![(SECTION_OPTIONS, "NoDisplay", "true")];
    if target_type == TargetType::Link {
        defaults.push((SECTION_OPTIONS, "Icon", "folder-remote"));
    }
    defaults
}
