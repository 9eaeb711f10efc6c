//! Binary-level tests for the blnk CLI.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn blnk() -> Command {
    Command::cargo_bin("blnk").unwrap()
}

#[test]
fn requires_a_target_argument() {
    blnk().assert().failure();
}

#[test]
fn create_writes_a_shortcut_file() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("report.txt");
    std::fs::write(&target, "x").unwrap();

    blnk()
        .current_dir(temp.path())
        .args(["-s", target.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("created"));
    assert!(temp.path().join("report.blnk").is_file());
}

#[test]
fn create_refuses_missing_target() {
    let temp = TempDir::new().unwrap();
    blnk()
        .current_dir(temp.path())
        .args(["-s", "/no/such/target"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn update_refreshes_an_existing_shortcut() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("report.txt");
    std::fs::write(&target, "x").unwrap();

    blnk()
        .current_dir(temp.path())
        .args(["-s", target.to_str().unwrap()])
        .assert()
        .success();
    blnk()
        .current_dir(temp.path())
        .args(["-u", "report.blnk"])
        .assert()
        .success()
        .stdout(predicate::str::contains("updated"));
}

#[test]
fn running_a_directory_suggests_create_mode() {
    let temp = TempDir::new().unwrap();
    blnk()
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("-s"));
}

#[cfg(unix)]
#[test]
fn exec_shortcut_exit_code_is_passed_through() {
    use std::os::unix::fs::PermissionsExt;
    let temp = TempDir::new().unwrap();
    let script = temp.path().join("fail9.sh");
    std::fs::write(&script, "#!/bin/sh\nexit 9\n").unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

    let shortcut = temp.path().join("fail9.blnk");
    std::fs::write(
        &shortcut,
        format!("[X-Blnk]\nType=Exec\nExec={}\n", script.display()),
    )
    .unwrap();

    blnk().arg(&shortcut).assert().code(9);
}

#[test]
fn plain_text_file_is_not_treated_as_broken() {
    let temp = TempDir::new().unwrap();
    let note = temp.path().join("note.xyzunknown");
    std::fs::write(&note, "just text\n").unwrap();

    // Opening falls back to extension handling; without any opener
    // installed the failure is a launch report, not a parse crash.
    let output = blnk().arg(&note).output().unwrap();
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("panicked"), "stderr: {stderr}");
}
