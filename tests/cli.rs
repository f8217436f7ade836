//! Integration tests for top-level CLI behavior.

use std::path::Path;
use std::process::Command;

fn run_bridge(cwd: &Path, args: &[&str], env: &[(&str, &str)]) -> std::process::Output {
    let bin = env!("CARGO_BIN_EXE_tfvc-bridge");
    let mut command = Command::new(bin);
    command
        .args(args)
        .current_dir(cwd)
        .env_remove("TFVC_RECORD")
        .env_remove("TFS_Path")
        .env_remove("TFS_STRICT");
    for (key, value) in env {
        command.env(key, value);
    }
    command.output().expect("failed to run tfvc-bridge binary")
}

#[test]
fn null_write_creates_the_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("draft.txt"), "!1 Hello").unwrap();

    let output = run_bridge(
        dir.path(),
        &["--null", "write", "Page/content.txt", "--author", "ann", "--source", "draft.txt"],
        &[],
    );

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("by ann"));
    let written = std::fs::read_to_string(dir.path().join("Page/content.txt")).unwrap();
    assert_eq!(written, "!1 Hello");
}

#[test]
fn write_survives_a_missing_backend() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("draft.txt"), "text").unwrap();

    let output = run_bridge(
        dir.path(),
        &["write", "content.txt", "--source", "draft.txt"],
        &[("TFS_Path", "/nonexistent/tee")],
    );

    assert!(output.status.success());
    assert!(dir.path().join("content.txt").exists());
}

#[test]
fn strict_write_fails_on_a_missing_backend() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("draft.txt"), "text").unwrap();

    let output = run_bridge(
        dir.path(),
        &["write", "content.txt", "--source", "draft.txt"],
        &[("TFS_Path", "/nonexistent/tee"), ("TFS_STRICT", "1")],
    );

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("backend command"));
}

#[test]
fn revisions_lists_only_existing_files() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("here.txt"), "x").unwrap();

    let output = run_bridge(dir.path(), &["revisions", "here.txt", "gone.txt"], &[]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert_eq!(stdout.lines().count(), 1);
    assert!(stdout.starts_with("here.txt\t"));
}

#[test]
fn history_prints_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_bridge(dir.path(), &["history", "--depth", "5", "here.txt"], &[]);

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn invalid_subcommand_exits_with_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_bridge(dir.path(), &["nonsense"], &[]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unrecognized subcommand"));
}

#[test]
fn record_var_saves_cassettes_for_the_run() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("draft.txt"), "!1 Hello").unwrap();

    let output = run_bridge(
        dir.path(),
        &["--null", "write", "Page/content.txt", "--source", "draft.txt"],
        &[("TFVC_RECORD", "rec"), ("RUST_LOG", "info")],
    );

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("recording session"), "stderr: {stderr}");
    assert!(stderr.contains("Recording saved to"), "stderr: {stderr}");
    let fs_yaml = std::fs::read_to_string(dir.path().join("rec/fs.cassette.yaml")).unwrap();
    assert!(fs_yaml.contains("make_file"));
}
