//! End-to-end tests across the format, resolver, and launcher crates.
//!
//! These exercise the complete flow: create a shortcut on disk, load
//! it back, resolve its target, and launch it.

use std::path::Path;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use blnk_format::{CreateOptions, Document, TargetType, SECTION_SOURCE_META};
use blnk_launch::{LaunchConfig, Launcher};
use blnk_resolve::{Resolver, SysDirs};

fn fixed_dirs(home: &Path) -> SysDirs {
    SysDirs {
        home: home.to_path_buf(),
        username: "kim".to_string(),
        profiles_root: home.parent().unwrap_or(home).to_path_buf(),
        appdata: home.join(".config"),
        local_appdata: home.join(".local/share"),
        documents: home.join("Documents"),
        temp: std::env::temp_dir(),
        local_bin: home.join(".local/bin"),
        cloud: None,
    }
}

#[test]
fn create_save_load_keeps_everything() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("report.txt");
    std::fs::write(&target, "data").unwrap();

    let mut doc = Document::new();
    doc.set_target(
        target.to_str().unwrap(),
        &CreateOptions {
            target_type: TargetType::File,
            name: None,
            terminal: false,
        },
    )
    .unwrap();
    let shortcut = temp.path().join("report.blnk");
    doc.save(&shortcut, false).unwrap();

    let loaded = Document::load(&shortcut).unwrap();
    assert_eq!(loaded.target_type(), Some(TargetType::File));
    assert_eq!(loaded.get("Path"), target.to_str());
    assert_eq!(loaded.get("NoDisplay"), Some("true"));
    assert!(loaded
        .section(SECTION_SOURCE_META)
        .unwrap()
        .get("hostname")
        .is_some());
}

#[test]
fn saved_files_are_byte_stable_across_cycles() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("report.txt");
    std::fs::write(&target, "data").unwrap();

    let mut doc = Document::new();
    doc.set_target(
        target.to_str().unwrap(),
        &CreateOptions {
            target_type: TargetType::File,
            name: None,
            terminal: false,
        },
    )
    .unwrap();
    let shortcut = temp.path().join("report.blnk");
    doc.save(&shortcut, false).unwrap();
    let first = std::fs::read_to_string(&shortcut).unwrap();

    let mut reloaded = Document::load(&shortcut).unwrap();
    reloaded.save(&shortcut, true).unwrap();
    let second = std::fs::read_to_string(&shortcut).unwrap();
    assert_eq!(first, second);
}

#[test]
fn legacy_file_with_comments_survives_a_cycle() {
    let temp = TempDir::new().unwrap();
    let shortcut = temp.path().join("old.blnk");
    let original = "\
Content-Type: text/blnk
# migrated from the old machine
Type: Link
Name: tracker
# still the right board?
URL: https://example.org/board
";
    std::fs::write(&shortcut, original).unwrap();

    let doc = Document::load(&shortcut).unwrap();
    let rendered = blnk_format::render(&doc).unwrap();
    assert!(rendered.starts_with("Content-Type: text/blnk\n# migrated from the old machine\n"));
    assert!(rendered.contains("Name: tracker\n# still the right board?\n"));

    let again = blnk_format::render(&blnk_format::parse_str(&rendered, None).unwrap()).unwrap();
    assert_eq!(rendered, again);
}

#[cfg(unix)]
#[test]
fn shortcut_relative_target_resolves_and_runs() {
    use std::os::unix::fs::PermissionsExt;
    let temp = TempDir::new().unwrap();
    let script = temp.path().join("job.sh");
    std::fs::write(&script, "#!/bin/sh\nexit 3\n").unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

    // Target stored relative to the shortcut file.
    let shortcut = temp.path().join("job.blnk");
    std::fs::write(&shortcut, "[X-Blnk]\nType=Exec\nExec=job.sh --now\n").unwrap();

    let doc = Document::load(&shortcut).unwrap();
    let launcher = Launcher::new(
        Resolver::new(fixed_dirs(temp.path())),
        LaunchConfig::default(),
    );
    assert_eq!(launcher.launch(&doc).unwrap(), 3);
}

#[test]
fn foreign_windows_path_resolves_under_home() {
    let temp = TempDir::new().unwrap();
    let shortcut = temp.path().join("docs.blnk");
    std::fs::write(
        &shortcut,
        "[X-Blnk]\nType=Directory\nPath=C:\\Users\\alice\\Documents\n",
    )
    .unwrap();

    let doc = Document::load(&shortcut).unwrap();
    let resolver = Resolver::new(fixed_dirs(temp.path()));
    let resolved = resolver.resolve(&doc, "Path", false).unwrap().unwrap();
    assert_eq!(
        resolved.value,
        temp.path().join("Documents").to_string_lossy()
    );
}
