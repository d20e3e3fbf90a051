//! Binary-level tests for the scaffgit CLI.
//!
//! These tests drive the compiled binary end to end: argument parsing,
//! workspace containment, and JSON output on stdout.

use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Run a git command in the given directory.
fn run_git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("git command failed to spawn");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Create a workspace with a `repo` directory containing one commit.
fn workspace_with_repo() -> TempDir {
    let workspace = TempDir::new().unwrap();
    let repo = workspace.path().join("repo");
    std::fs::create_dir(&repo).unwrap();
    run_git(&repo, &["init", "-b", "main"]);
    run_git(&repo, &["config", "user.email", "test@example.com"]);
    run_git(&repo, &["config", "user.name", "Test User"]);
    std::fs::write(repo.join("README.md"), "# Test\n").unwrap();
    run_git(&repo, &["add", "README.md"]);
    run_git(&repo, &["commit", "-m", "Initial commit"]);
    workspace
}

fn scaffgit() -> Command {
    Command::cargo_bin("scaffgit").unwrap()
}

#[test]
fn help_lists_all_actions() {
    scaffgit()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("clone")
                .and(predicate::str::contains("add"))
                .and(predicate::str::contains("commit"))
                .and(predicate::str::contains("checkout"))
                .and(predicate::str::contains("push"))
                .and(predicate::str::contains("run")),
        );
}

#[test]
fn commit_requires_a_message_flag() {
    scaffgit().arg("commit").assert().failure().stderr(
        predicate::str::contains("--message"),
    );
}

#[test]
fn working_directory_cannot_escape_the_workspace() {
    let workspace = workspace_with_repo();
    scaffgit()
        .args([
            "--workspace",
            workspace.path().to_str().unwrap(),
            "add",
            "--working-directory",
            "../outside",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("escapes the workspace"));
}

#[test]
fn checkout_outside_a_repository_fails_cleanly() {
    let workspace = TempDir::new().unwrap();
    scaffgit()
        .args([
            "--workspace",
            workspace.path().to_str().unwrap(),
            "checkout",
            "--branch-name",
            "main",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a git repository"));
}

#[test]
fn add_then_commit_emits_the_head_record_as_json() {
    let workspace = workspace_with_repo();
    let repo = workspace.path().join("repo");
    std::fs::write(repo.join("new.txt"), "content\n").unwrap();

    scaffgit()
        .args([
            "--workspace",
            workspace.path().to_str().unwrap(),
            "--quiet",
            "add",
            "--file",
            "new.txt",
            "--working-directory",
            "repo",
        ])
        .assert()
        .success();

    let output = scaffgit()
        .args([
            "--workspace",
            workspace.path().to_str().unwrap(),
            "--quiet",
            "commit",
            "--message",
            "add new.txt",
            "--working-directory",
            "repo",
        ])
        .assert()
        .success();

    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["head"]["message"], "add new.txt");
    assert_eq!(parsed["head"]["author"]["name"], "Test User");
    assert_eq!(parsed["head"]["author"]["email"], "test@example.com");
    assert!(parsed["head"]["sha"].as_str().unwrap().len() == 40);
    assert!(parsed["head"]["date"].as_str().unwrap().ends_with('Z'));
}

#[test]
fn checkout_create_switches_branches() {
    let workspace = workspace_with_repo();

    let output = scaffgit()
        .args([
            "--workspace",
            workspace.path().to_str().unwrap(),
            "--quiet",
            "checkout",
            "--branch-name",
            "feature",
            "--create",
            "--working-directory",
            "repo",
        ])
        .assert()
        .success();

    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(parsed["head"]["sha"].is_string());

    let head = Command::new("git")
        .args(["rev-parse", "--abbrev-ref", "HEAD"])
        .current_dir(workspace.path().join("repo"))
        .output()
        .unwrap();
    assert_eq!(String::from_utf8(head.stdout).unwrap().trim(), "feature");
}

#[test]
fn invalid_input_names_the_offending_field() {
    let workspace = workspace_with_repo();
    scaffgit()
        .args([
            "--workspace",
            workspace.path().to_str().unwrap(),
            "commit",
            "--message",
            "msg",
            "--author-name",
            "OnlyName",
            "--working-directory",
            "repo",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid input: author"));
}
