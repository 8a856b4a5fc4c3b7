//! Integration tests for CLI commands.
//!
//! Each test scaffolds a site in a temporary directory with `folio init`
//! and drives the other commands against it.

#![allow(deprecated)] // Command::cargo_bin is deprecated but replacement requires newer assert_cmd

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn folio() -> Command {
    let mut cmd = Command::cargo_bin("folio").unwrap();
    cmd.arg("--no-color");
    cmd
}

fn init_site(dir: &Path) {
    folio()
        .args(["init", dir.to_str().unwrap(), "--title", "Test Docs"])
        .assert()
        .success();
}

// ============================================================================
// Init
// ============================================================================

#[test]
fn init_creates_site_files() {
    let temp = TempDir::new().unwrap();
    let site = temp.path().join("docs");

    folio()
        .args(["init", site.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Site initialized"));

    assert!(site.join("folio.toml").exists());
    assert!(site.join("content/index.md").exists());
    assert!(site.join("content/examples/stack.toml").exists());

    let gitignore = fs::read_to_string(site.join(".gitignore")).unwrap();
    assert!(gitignore.contains("public/"));
    assert!(gitignore.contains("folio.local.toml"));

    // Title defaults to the directory name
    let config = fs::read_to_string(site.join("folio.toml")).unwrap();
    assert!(config.contains("title = \"docs\""));
}

#[test]
fn init_writes_title_flag() {
    let temp = TempDir::new().unwrap();
    init_site(temp.path());

    let config = fs::read_to_string(temp.path().join("folio.toml")).unwrap();
    assert!(config.contains("Test Docs"));
    assert!(config.contains("examples/stack"));
}

#[test]
fn init_twice_fails() {
    let temp = TempDir::new().unwrap();
    init_site(temp.path());

    folio()
        .args(["init", temp.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already initialized"));
}

// ============================================================================
// Build
// ============================================================================

#[test]
fn build_writes_every_configured_page() {
    let temp = TempDir::new().unwrap();
    init_site(temp.path());

    folio()
        .args(["build", "--project", temp.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Site built"))
        .stdout(predicate::str::contains("examples/stack"))
        .stdout(predicate::str::contains("(2 pages)"));

    let index = fs::read_to_string(temp.path().join("public/index.html")).unwrap();
    assert!(index.contains("<!DOCTYPE html>"));
    assert!(index.contains("Welcome"));
    assert!(index.contains("href=\"/examples/stack.html\""));
    assert!(index.contains("max-width:600px"));

    let stack = fs::read_to_string(temp.path().join("public/examples/stack.html")).unwrap();
    assert!(stack.contains("max-width:150px"));
    assert!(stack.contains("width=\"150\" height=\"100\""));
}

#[test]
fn build_respects_width_flag() {
    let temp = TempDir::new().unwrap();
    init_site(temp.path());

    folio()
        .args([
            "build",
            "--project",
            temp.path().to_str().unwrap(),
            "--width",
            "375",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("375x800"))
        .stdout(predicate::str::contains("375px"));
}

#[test]
fn build_without_init_fails() {
    let temp = TempDir::new().unwrap();

    folio()
        .args(["build", "--project", temp.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("folio init"));
}

#[test]
fn build_reports_malformed_content() {
    let temp = TempDir::new().unwrap();
    init_site(temp.path());
    fs::write(
        temp.path().join("content/examples/stack.toml"),
        "cap = 150\n",
    )
    .unwrap();

    folio()
        .args(["build", "--project", temp.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("examples/stack"));
}

#[test]
fn build_uses_local_config_overrides() {
    let temp = TempDir::new().unwrap();
    init_site(temp.path());
    fs::write(
        temp.path().join("folio.local.toml"),
        "[output]\ndir = \"site\"\n",
    )
    .unwrap();

    folio()
        .args(["build", "--project", temp.path().to_str().unwrap()])
        .assert()
        .success();

    assert!(temp.path().join("site/index.html").exists());
    assert!(!temp.path().join("public").exists());
}

// ============================================================================
// Render
// ============================================================================

#[test]
fn render_outline_follows_widths() {
    let temp = TempDir::new().unwrap();
    init_site(temp.path());

    folio()
        .args([
            "render",
            "examples/stack",
            "--project",
            temp.path().to_str().unwrap(),
            "--width",
            "1200",
            "--width",
            "100",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("viewport 1200px, column 150px"))
        .stdout(predicate::str::contains("image 150x100"))
        .stdout(predicate::str::contains("viewport 100px, column 100px"))
        .stdout(predicate::str::contains("image 100x67"));
}

#[test]
fn render_skips_repeated_width() {
    let temp = TempDir::new().unwrap();
    init_site(temp.path());

    let output = folio()
        .args([
            "render",
            "index",
            "--project",
            temp.path().to_str().unwrap(),
            "-w",
            "800",
            "-w",
            "800",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.matches("viewport 800px").count(), 1);
}

#[test]
fn render_json_format() {
    let temp = TempDir::new().unwrap();
    init_site(temp.path());

    folio()
        .args([
            "render",
            "examples/stack",
            "--project",
            temp.path().to_str().unwrap(),
            "--width",
            "1200",
            "--format",
            "json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"column_width\": 150"))
        .stdout(predicate::str::contains("\"viewport_width\": 1200"));
}

#[test]
fn render_html_format() {
    let temp = TempDir::new().unwrap();
    init_site(temp.path());

    folio()
        .args([
            "render",
            "index",
            "--project",
            temp.path().to_str().unwrap(),
            "--format",
            "html",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("<main"))
        .stdout(predicate::str::contains("Test Docs"));
}

#[test]
fn render_missing_page_fails() {
    let temp = TempDir::new().unwrap();
    init_site(temp.path());

    folio()
        .args([
            "render",
            "missing",
            "--project",
            temp.path().to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing"));
}
