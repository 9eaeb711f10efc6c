//! Refreshing an existing shortcut (`-u`).

use std::path::Path;

use tracing::debug;

use blnk_format::Document;

use crate::error::Result;

/// Re-analyze the target of the shortcut at `path` and save it back.
pub fn run_update(path: &Path) -> Result<()> {
    let mut doc = Document::load(path)?;
    doc.analyze_target(None)?;
    doc.save(path, true)?;
    debug!(path = %path.display(), "refreshed shortcut metadata");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::run_create;
    use blnk_format::SECTION_TARGET_META;
    use tempfile::TempDir;

    #[test]
    fn update_refreshes_timestamps() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("report.txt");
        std::fs::write(&target, "x").unwrap();

        let path =
            run_create(temp_dir.path(), target.to_str().unwrap(), None, false, true).unwrap();
        run_update(&path).unwrap();

        let doc = Document::load(&path).unwrap();
        assert!(doc.section(SECTION_TARGET_META).unwrap().get("modified").is_some());
    }

    #[test]
    fn update_keeps_comments() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("report.txt");
        std::fs::write(&target, "x").unwrap();
        let path =
            run_create(temp_dir.path(), target.to_str().unwrap(), None, false, true).unwrap();

        // Add a hand-written comment the way a user would.
        let text = std::fs::read_to_string(&path).unwrap();
        let annotated = text.replace("Type=File\n", "Type=File\n# monthly numbers\n");
        std::fs::write(&path, annotated).unwrap();

        run_update(&path).unwrap();
        let after = std::fs::read_to_string(&path).unwrap();
        assert!(after.contains("# monthly numbers"));
    }

    #[test]
    fn update_of_missing_file_fails() {
        assert!(run_update(Path::new("/no/such.blnk")).is_err());
    }
}
