//! CLI integration tests for sitesrc
//!
//! These tests run the binary against a temporary site and check listing,
//! inspection and creation end to end.

use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Get a command instance for the sitesrc binary
fn sitesrc_cmd() -> assert_cmd::Command {
    assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("sitesrc"))
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Create a small site with items and a layout
fn setup_site() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "content/index.html", "---\ntitle: Home\n---\nWelcome");
    write(dir.path(), "content/about.html", "About us");
    write(dir.path(), "content/about.yaml", "title: About\n");
    write(dir.path(), "content/blog/index.md", "Blog");
    write(dir.path(), "content/logo.png", "\u{0}binary");
    write(dir.path(), "content/about.html~", "stale backup");
    write(dir.path(), "layouts/default.erb", "<html><%= yield %></html>");
    dir
}

// =============================================================================
// Listing
// =============================================================================

#[test]
fn test_items_lists_identifiers() {
    let dir = setup_site();

    sitesrc_cmd()
        .arg("--root")
        .arg(dir.path())
        .arg("items")
        .assert()
        .success()
        .stdout(predicate::str::contains("/about/"))
        .stdout(predicate::str::contains("/blog/"))
        .stdout(predicate::str::contains("/logo/"))
        .stdout(predicate::str::contains("4 item(s)"));
}

#[test]
fn test_items_json() {
    let dir = setup_site();

    let output = sitesrc_cmd()
        .arg("--root")
        .arg(dir.path())
        .args(["--format", "json", "items"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 4);

    let ids: Vec<_> = rows.iter().map(|r| r["identifier"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["/", "/about/", "/blog/", "/logo/"]);

    let logo = rows.iter().find(|r| r["identifier"] == "/logo/").unwrap();
    assert_eq!(logo["binary"], true);
}

#[test]
fn test_layouts_are_listed_separately() {
    let dir = setup_site();

    sitesrc_cmd()
        .arg("--root")
        .arg(dir.path())
        .arg("layouts")
        .assert()
        .success()
        .stdout(predicate::str::contains("/default/"))
        .stdout(predicate::str::contains("1 layout(s)"));
}

#[test]
fn test_empty_site() {
    let dir = TempDir::new().unwrap();

    sitesrc_cmd()
        .arg("--root")
        .arg(dir.path())
        .arg("items")
        .assert()
        .success()
        .stdout(predicate::str::contains("No items found"));
}

// =============================================================================
// Show
// =============================================================================

#[test]
fn test_show_item_with_meta_file() {
    let dir = setup_site();

    sitesrc_cmd()
        .arg("--root")
        .arg(dir.path())
        .args(["show", "/about/"])
        .assert()
        .success()
        .stdout(predicate::str::contains("title: About"))
        .stdout(predicate::str::contains("About us"));
}

#[test]
fn test_show_layout() {
    let dir = setup_site();

    sitesrc_cmd()
        .arg("--root")
        .arg(dir.path())
        .args(["show", "--layout", "default"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<%= yield %>"));
}

#[test]
fn test_show_unknown_identifier_fails() {
    let dir = setup_site();

    sitesrc_cmd()
        .arg("--root")
        .arg(dir.path())
        .args(["show", "/nope/"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No item with identifier /nope/"));
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn test_ambiguous_pairing_reports_key() {
    let dir = setup_site();
    write(dir.path(), "content/about.md", "second content file");

    sitesrc_cmd()
        .arg("--root")
        .arg(dir.path())
        .arg("items")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Found 2 content files"));
}

#[test]
fn test_malformed_front_matter_reports_file() {
    let dir = setup_site();
    write(dir.path(), "content/broken.html", "---\ntitle: never closed\n");

    sitesrc_cmd()
        .arg("--root")
        .arg(dir.path())
        .arg("items")
        .assert()
        .failure()
        .stderr(predicate::str::contains("broken.html"));
}

// =============================================================================
// Create
// =============================================================================

#[test]
fn test_create_item_then_show() {
    let dir = TempDir::new().unwrap();

    sitesrc_cmd()
        .arg("--root")
        .arg(dir.path())
        .args([
            "create-item",
            "/posts/first/",
            "--content",
            "First post",
            "--attr",
            "title=First",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created item"));

    let written = fs::read_to_string(dir.path().join("content/posts/first.html")).unwrap();
    assert_eq!(written, "---\ntitle: First\n---\n\nFirst post");

    sitesrc_cmd()
        .arg("--root")
        .arg(dir.path())
        .args(["--format", "json", "show", "/posts/first/"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"title\":\"First\""))
        .stdout(predicate::str::contains("First post"));
}

#[test]
fn test_create_root_item() {
    let dir = TempDir::new().unwrap();

    sitesrc_cmd()
        .arg("--root")
        .arg(dir.path())
        .args(["create-item", "/", "--content", "home"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(dir.path().join("content/index.html")).unwrap(),
        "home"
    );
}

#[test]
fn test_create_layout_with_extension() {
    let dir = TempDir::new().unwrap();

    sitesrc_cmd()
        .arg("--root")
        .arg(dir.path())
        .args(["create-layout", "/default/", "--ext", ".erb", "--content", "<%= yield %>"])
        .assert()
        .success();

    assert!(dir.path().join("layouts/default.erb").is_file());
}

#[test]
fn test_create_rejects_periods() {
    let dir = TempDir::new().unwrap();

    sitesrc_cmd()
        .arg("--root")
        .arg(dir.path())
        .args(["create-item", "/v1.0/"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("contains a period"));

    assert!(!dir.path().join("content").exists());
}

#[test]
fn test_create_allows_periods_when_configured() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("site.toml"),
        "allow_periods_in_identifiers = true\n",
    )
    .unwrap();

    sitesrc_cmd()
        .arg("--root")
        .arg(dir.path())
        .args(["create-item", "/v1.0/", "--content", "notes"])
        .assert()
        .success();

    sitesrc_cmd()
        .arg("--root")
        .arg(dir.path())
        .arg("items")
        .assert()
        .success()
        .stdout(predicate::str::contains("/v1.0/"));
}

#[test]
fn test_create_rejects_parent_segments() {
    let dir = TempDir::new().unwrap();
    let site = dir.path().join("site");
    fs::create_dir_all(&site).unwrap();
    fs::write(site.join("site.toml"), "allow_periods_in_identifiers = true\n").unwrap();

    sitesrc_cmd()
        .arg("--root")
        .arg(&site)
        .args(["create-item", "/../../escaped/", "--content", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("contains a '..' segment"));

    assert!(!dir.path().join("escaped.html").exists());
    assert!(!site.join("content").exists());
}
