//! Shortcut creation (`-s`).

use std::path::{Path, PathBuf};

use tracing::debug;

use blnk_format::{CreateOptions, Document, TargetType};

use crate::error::{CliError, Result};

/// Create a shortcut for `target` in `cwd` and return its path.
///
/// The type is inferred from the target: an existing directory or
/// file, or a URL. `assume_yes` answers the overwrite prompt.
pub fn run_create(
    cwd: &Path,
    target: &str,
    name: Option<&str>,
    terminal: bool,
    assume_yes: bool,
) -> Result<PathBuf> {
    let target_type = classify_target(target)?;
    debug!(%target_type, target, "creating shortcut");

    let name = match (name, target_type) {
        (Some(given), _) => Some(given.to_string()),
        (None, TargetType::Link) => Some(name_from_url(target).ok_or_else(|| {
            CliError::user("cannot derive a name from this URL; pass one as the second argument")
        })?),
        (None, _) => None,
    };

    let mut doc = Document::new();
    let options = CreateOptions {
        target_type,
        name,
        terminal,
    };
    doc.set_target(target, &options)?;

    let file_name = doc
        .path()
        .and_then(|p| p.file_name())
        .map(PathBuf::from)
        .ok_or_else(|| CliError::user("could not derive a shortcut file name"))?;
    let path = cwd.join(file_name);

    match doc.save(&path, false) {
        Ok(()) => Ok(path),
        Err(blnk_format::Error::AlreadyExists { .. }) => {
            if assume_yes || confirm_overwrite(&path)? {
                doc.save(&path, true)?;
                Ok(path)
            } else {
                Err(CliError::user(format!("{} left untouched", path.display())))
            }
        }
        Err(e) => Err(e.into()),
    }
}

fn classify_target(target: &str) -> Result<TargetType> {
    let path = Path::new(target);
    if path.is_dir() {
        return Ok(TargetType::Directory);
    }
    if path.is_file() {
        return Ok(TargetType::File);
    }
    if target.contains("://") {
        return Ok(TargetType::Link);
    }
    Err(CliError::user(format!("target does not exist: {target}")))
}

fn confirm_overwrite(path: &Path) -> Result<bool> {
    let answer = dialoguer::Confirm::new()
        .with_prompt(format!("{} exists, overwrite?", path.display()))
        .default(false)
        .interact()?;
    Ok(answer)
}

/// Derive a readable name from issue-style URLs:
/// `https://host/owner/repo/issues/17` becomes `repo issue 17`.
pub(crate) fn name_from_url(url: &str) -> Option<String> {
    let without_scheme = url.split("://").nth(1)?;
    let segments: Vec<&str> = without_scheme
        .trim_end_matches('/')
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();
    let idx = segments.iter().position(|s| *s == "issues")?;
    let number = segments.get(idx + 1)?;
    if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let mut repo_idx = idx.checked_sub(1)?;
    // GitLab keeps a "/-/" separator before "issues".
    if segments[repo_idx] == "-" {
        repo_idx = repo_idx.checked_sub(1)?;
    }
    Some(format!("{} issue {}", segments[repo_idx], number))
}

#[cfg(test)]
mod tests {
    use super::*;
    use blnk_format::SECTION_TARGET_META;
    use tempfile::TempDir;

    #[test]
    fn creates_a_file_shortcut() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("report.txt");
        std::fs::write(&target, "x").unwrap();

        let path =
            run_create(temp_dir.path(), target.to_str().unwrap(), None, false, true).unwrap();
        assert_eq!(path, temp_dir.path().join("report.blnk"));

        let doc = Document::load(&path).unwrap();
        assert_eq!(doc.target_type(), Some(TargetType::File));
        assert_eq!(doc.get("Path"), target.to_str());
        assert!(doc.section(SECTION_TARGET_META).unwrap().get("created").is_some());
    }

    #[test]
    fn creates_a_directory_shortcut_keeping_dots() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("archive.d");
        std::fs::create_dir(&target).unwrap();

        let path =
            run_create(temp_dir.path(), target.to_str().unwrap(), None, false, true).unwrap();
        assert_eq!(path, temp_dir.path().join("archive.d.blnk"));
        let doc = Document::load(&path).unwrap();
        assert_eq!(doc.target_type(), Some(TargetType::Directory));
    }

    #[test]
    fn recreating_with_assume_yes_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("report.txt");
        std::fs::write(&target, "x").unwrap();

        run_create(temp_dir.path(), target.to_str().unwrap(), None, false, true).unwrap();
        let result = run_create(temp_dir.path(), target.to_str().unwrap(), None, false, true);
        assert!(result.is_ok());
    }

    #[test]
    fn url_without_derivable_name_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let result = run_create(temp_dir.path(), "https://example.org/", None, false, true);
        assert!(matches!(result.unwrap_err(), CliError::User { .. }));
    }

    #[test]
    fn missing_target_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let result = run_create(temp_dir.path(), "/no/such/thing", None, false, true);
        assert!(matches!(result.unwrap_err(), CliError::User { .. }));
    }

    #[test]
    fn issue_urls_derive_names() {
        assert_eq!(
            name_from_url("https://github.com/owner/widget/issues/17"),
            Some("widget issue 17".to_string())
        );
        assert_eq!(
            name_from_url("https://gitlab.com/group/widget/-/issues/9"),
            Some("widget issue 9".to_string())
        );
        assert_eq!(name_from_url("https://example.org/about"), None);
        assert_eq!(name_from_url("https://example.org/issues/abc"), None);
    }
}
