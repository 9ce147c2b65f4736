//! End-to-end tests for the precast binary.
//!
//! Everything here runs with `--yes` (no prompts) and `--no-git` (no
//! dependence on a git binary in the test environment).

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn precast() -> Command {
    Command::cargo_bin("precast").unwrap()
}

#[test]
fn help_lists_subcommands() {
    precast()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("new"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("list"));
}

#[test]
fn version_matches_cargo() {
    precast()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn new_creates_project_with_sidecar() {
    let temp = TempDir::new().unwrap();

    precast()
        .current_dir(temp.path())
        .args([
            "new",
            "demo-app",
            "--framework",
            "react",
            "--no-git",
            "--yes",
        ])
        .assert()
        .success();

    let project = temp.path().join("demo-app");
    assert!(project.join("package.json").exists());
    assert!(project.join("precast.json").exists());
    assert!(project.join("README.md").exists());

    let sidecar = fs::read_to_string(project.join("precast.json")).unwrap();
    assert!(sidecar.contains("\"framework\": \"react\""));
}

#[test]
fn dry_run_writes_nothing() {
    let temp = TempDir::new().unwrap();

    precast()
        .current_dir(temp.path())
        .args(["new", "dry-app", "--no-git", "--yes", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"));

    assert!(!temp.path().join("dry-app").exists());
}

#[test]
fn existing_directory_is_rejected_and_untouched() {
    let temp = TempDir::new().unwrap();
    let project = temp.path().join("taken");
    fs::create_dir(&project).unwrap();
    fs::write(project.join("keep.txt"), "precious").unwrap();

    precast()
        .current_dir(temp.path())
        .args(["new", "taken", "--no-git", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    // The pre-existing content survives untouched.
    assert_eq!(
        fs::read_to_string(project.join("keep.txt")).unwrap(),
        "precious"
    );
    assert!(!project.join("package.json").exists());
}

#[test]
fn incompatible_stack_exits_with_user_error() {
    let temp = TempDir::new().unwrap();

    precast()
        .current_dir(temp.path())
        .args([
            "new",
            "bad-app",
            "--backend",
            "none",
            "--database",
            "postgres",
            "--no-git",
            "--yes",
        ])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("without a backend"));

    assert!(!temp.path().join("bad-app").exists());
}

#[test]
fn mongodb_with_drizzle_is_rejected() {
    let temp = TempDir::new().unwrap();

    precast()
        .current_dir(temp.path())
        .args([
            "new",
            "mongo-app",
            "--database",
            "mongodb",
            "--orm",
            "drizzle",
            "--no-git",
            "--yes",
        ])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("drizzle"));
}

#[test]
fn prisma_sqlite_warns_but_succeeds() {
    let temp = TempDir::new().unwrap();

    precast()
        .current_dir(temp.path())
        .args([
            "new",
            "sqlite-app",
            "--database",
            "sqlite",
            "--orm",
            "prisma",
            "--no-git",
            "--yes",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("not recommended"));

    let project = temp.path().join("sqlite-app");
    assert!(project.join("prisma/schema.prisma").exists());
    // Prisma projects ignore local database files.
    // (.gitignore is only written with git enabled, so check env instead.)
    assert!(project.join(".env").exists());
}

#[test]
fn invalid_project_name_is_rejected() {
    let temp = TempDir::new().unwrap();

    precast()
        .current_dir(temp.path())
        .args(["new", "My_App", "--no-git", "--yes"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Invalid project name"));
}

#[test]
fn unknown_option_exits_not_found() {
    let temp = TempDir::new().unwrap();

    precast()
        .current_dir(temp.path())
        .args(["new", "x-app", "--framework", "ember", "--no-git", "--yes"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("ember"));
}

#[test]
fn list_shows_catalog() {
    precast()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("framework"))
        .stdout(predicate::str::contains("react"))
        .stdout(predicate::str::contains("prisma"));
}

#[test]
fn list_can_filter_by_axis() {
    precast()
        .args(["list", "--axis", "orm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mongoose"))
        .stdout(predicate::str::contains("react").not());
}

#[test]
fn add_requires_a_precast_project() {
    let temp = TempDir::new().unwrap();

    precast()
        .current_dir(temp.path())
        .args(["add", "--ui-library", "shadcn"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("No precast project"));
}

#[test]
fn add_applies_features_to_created_project() {
    let temp = TempDir::new().unwrap();

    precast()
        .current_dir(temp.path())
        .args(["new", "grow-app", "--no-git", "--yes"])
        .assert()
        .success();

    let project = temp.path().join("grow-app");
    precast()
        .current_dir(&project)
        .args(["add", "--ui-library", "shadcn"])
        .assert()
        .success();

    assert!(project.join("components.json").exists());
    let sidecar = fs::read_to_string(project.join("precast.json")).unwrap();
    assert!(sidecar.contains("\"uiLibrary\": \"shadcn\""));
}

#[test]
fn completions_emit_script() {
    precast()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("precast"));
}

#[test]
fn quiet_suppresses_stdout_on_success() {
    let temp = TempDir::new().unwrap();

    precast()
        .current_dir(temp.path())
        .args(["-q", "new", "quiet-app", "--no-git", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}
