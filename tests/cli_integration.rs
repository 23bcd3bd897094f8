//! Integration tests for the `folio` CLI.
//!
//! Each test runs `folio` as a subprocess against a temp data directory and
//! checks stdout and/or the files it leaves behind.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Get the path to the built `folio` binary.
fn folio_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("folio");
    path
}

fn command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::new(folio_bin());
    cmd.arg("-C")
        .arg(dir)
        .args(args)
        .current_dir(dir)
        .env_remove("FOLIO_DIR")
        .env_remove("FOLIO_LOG");
    cmd
}

fn run_folio(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let output = command(dir, args).output().expect("failed to run folio");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

fn run_folio_ok(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_folio(dir, args);
    if !success {
        panic!(
            "folio {:?} failed:\nstdout: {}\nstderr: {}",
            args, stdout, stderr
        );
    }
    stdout
}

/// Run with `input` piped to stdin.
fn run_folio_with_input(dir: &Path, args: &[&str], input: &str) -> String {
    let mut child = command(dir, args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to run folio");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn show_json(dir: &Path, id: &str) -> serde_json::Value {
    let out = run_folio_ok(dir, &["--json", "show", id]);
    serde_json::from_str(&out).unwrap()
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

#[test]
fn test_init_seeds_store() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_folio_ok(tmp.path(), &["init"]);
    assert!(out.contains("seeded"));
    assert!(tmp.path().join("folio.toml").is_file());
    assert!(tmp.path().join("store").join("index.json").is_file());

    let again = run_folio_ok(tmp.path(), &["init"]);
    assert!(again.contains("store already has 7 projects"));
}

#[test]
fn test_list_default() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_folio_ok(tmp.path(), &["list"]);
    assert_eq!(out.lines().count(), 7);
    assert!(out.lines().next().unwrap().starts_with("clackyai-ui"));
    assert!(out.contains("Design Thinking"));
}

#[test]
fn test_list_category_filter() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_folio_ok(tmp.path(), &["list", "--category", "web"]);
    assert!(out.contains("clackyai-web"));
    assert!(out.contains("showmebug-web"));
    assert!(!out.contains("clackyai-ui"));
}

#[test]
fn test_list_json() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_folio_ok(tmp.path(), &["--json", "list"]);
    let list: Vec<serde_json::Value> = serde_json::from_str(&out).unwrap();
    assert_eq!(list.len(), 7);
    assert_eq!(list[0]["id"], "clackyai-ui");
    assert_eq!(list[0]["category"], "UI/UX");
}

#[test]
fn test_show_not_found() {
    let tmp = tempfile::TempDir::new().unwrap();
    let (_, stderr, success) = run_folio(tmp.path(), &["show", "nope"]);
    assert!(!success);
    assert!(stderr.contains("error: project not found: nope"));
}

#[test]
fn test_url_resolves_against_origin() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_folio_ok(tmp.path(), &["url", "/images/a.jpg"]);
    let first = out.lines().next().unwrap();
    assert!(first.starts_with("https://"));
    assert!(first.ends_with("/images/a.jpg"));
    assert!(out.contains("fallback: "));
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

#[test]
fn test_set_field_persists() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_folio_ok(tmp.path(), &["set", "methodology", "title", "Thinking Aloud"]);
    assert!(out.contains("methodology: title updated"));
    assert_eq!(show_json(tmp.path(), "methodology")["title"], "Thinking Aloud");
    // Other records untouched
    assert_eq!(show_json(tmp.path(), "clackyai-ui")["title"], "ClackyAI");
}

#[test]
fn test_set_bad_category_fails() {
    let tmp = tempfile::TempDir::new().unwrap();
    let (_, stderr, success) = run_folio(tmp.path(), &["set", "methodology", "category", "MUSIC"]);
    assert!(!success);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_image_add_from_file() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::write(tmp.path().join("shot.png"), [0x89, b'P', b'N', b'G']).unwrap();
    let file = tmp.path().join("shot.png");
    run_folio_ok(
        tmp.path(),
        &["image", "add", "methodology", file.to_str().unwrap()],
    );
    let project = show_json(tmp.path(), "methodology");
    let images = project["detailImages"].as_array().unwrap();
    assert_eq!(images.len(), 3);
    assert_eq!(images[2], "data:image/png;base64,iVBORw==");
}

#[test]
fn test_image_rm_declined() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_folio_with_input(tmp.path(), &["image", "rm", "methodology", "1"], "n\n");
    assert!(out.contains("cancelled"));
    let project = show_json(tmp.path(), "methodology");
    assert_eq!(project["detailImages"].as_array().unwrap().len(), 2);
}

#[test]
fn test_image_rm_confirmed() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_folio_with_input(tmp.path(), &["image", "rm", "methodology", "1"], "y\n");
    let project = show_json(tmp.path(), "methodology");
    let images = project["detailImages"].as_array().unwrap();
    assert_eq!(images.len(), 1);
    assert!(images[0].as_str().unwrap().contains("02-design-thinking"));

    let log = run_folio_ok(tmp.path(), &["recovery"]);
    assert!(log.contains("01-design-thinking"));
}

#[test]
fn test_reset_restores_bundled() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_folio_ok(tmp.path(), &["set", "methodology", "year", "1999"]);
    run_folio_ok(tmp.path(), &["reset", "--yes"]);
    assert_eq!(show_json(tmp.path(), "methodology")["year"], "2025");
}

#[test]
fn test_no_persist_discards_edits() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_folio_ok(tmp.path(), &["--no-persist", "set", "methodology", "year", "1999"]);
    assert!(!tmp.path().join("store").exists());
    assert_eq!(show_json(tmp.path(), "methodology")["year"], "2025");
}

#[test]
fn test_export_default_name() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out_path = tmp.path().join("out.json");
    let out = run_folio_ok(
        tmp.path(),
        &["export", "--output", out_path.to_str().unwrap()],
    );
    assert!(out.contains("exported 7 projects"));
    let list: Vec<serde_json::Value> =
        serde_json::from_str(&fs::read_to_string(&out_path).unwrap()).unwrap();
    assert_eq!(list.len(), 7);
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[test]
fn test_config_set_keeps_comments() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_folio_ok(tmp.path(), &["init"]);
    run_folio_ok(tmp.path(), &["config", "set", "upload.max_bytes", "4"]);
    let text = fs::read_to_string(tmp.path().join("folio.toml")).unwrap();
    assert!(text.contains("max_bytes = 4"));
    assert!(text.contains("# folio configuration"));

    // Files over the new limit are refused
    fs::write(tmp.path().join("big.png"), [0u8; 5]).unwrap();
    let big = tmp.path().join("big.png");
    let (_, stderr, success) = run_folio(
        tmp.path(),
        &["cover", "methodology", big.to_str().unwrap()],
    );
    assert!(!success);
    assert!(stderr.contains("too large"));
}

#[test]
fn test_config_set_rejects_invalid_value() {
    let tmp = tempfile::TempDir::new().unwrap();
    let (_, _, success) = run_folio(tmp.path(), &["config", "set", "startup.source", "cloud"]);
    assert!(!success);
    assert!(!tmp.path().join("folio.toml").exists());
}
