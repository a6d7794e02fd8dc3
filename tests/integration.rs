use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn kdx_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("kdx");
    path
}

fn setup_workspace() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    fs::write(
        root.join("a.yaml"),
        "kind: Component\nmetadata:\n  name: db\n",
    )
    .unwrap();
    fs::write(
        root.join("b.yaml"),
        "kind: ComponentInstance\nmetadata:\n  name: db1\nspec:\n  component: db\n",
    )
    .unwrap();

    // A broken manifest and an excluded one must both be non-fatal noise.
    fs::write(root.join("broken.yaml"), "kind: [unterminated\n").unwrap();
    fs::create_dir_all(root.join(".git")).unwrap();
    fs::write(
        root.join(".git/ignored.yaml"),
        "kind: Component\nmetadata:\n  name: ghost\n",
    )
    .unwrap();

    tmp
}

fn run_kdx(root: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = kdx_binary();
    let output = Command::new(&binary)
        .arg("--root")
        .arg(root.to_str().unwrap())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run kdx binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();
    (stdout, stderr, success)
}

#[test]
fn test_index_reports_stats() {
    let tmp = setup_workspace();

    let (stdout, stderr, success) = run_kdx(tmp.path(), &["index"]);
    assert!(success, "index failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("entities indexed: 2"));
    assert!(stdout.contains("parse failures: 1"));
    assert!(stdout.contains("ok"));
}

#[test]
fn test_resolve_finds_definitions() {
    let tmp = setup_workspace();

    let (stdout, _, success) = run_kdx(tmp.path(), &["resolve", "db"]);
    assert!(success);
    assert!(stdout.contains("a.yaml:3:3"), "unexpected: {}", stdout);

    let (stdout, _, success) = run_kdx(tmp.path(), &["resolve", "db1"]);
    assert!(success);
    assert!(stdout.contains("b.yaml:3:3"), "unexpected: {}", stdout);
}

#[test]
fn test_resolve_miss_and_exactness() {
    let tmp = setup_workspace();

    let (stdout, _, success) = run_kdx(tmp.path(), &["resolve", "missing"]);
    assert!(success);
    assert!(stdout.contains("no definition found for 'missing'"));

    // Case-sensitive, no substring match, and excluded files stay invisible.
    for token in ["DB", "d", "ghost"] {
        let (stdout, _, _) = run_kdx(tmp.path(), &["resolve", token]);
        assert!(
            stdout.contains("no definition found"),
            "token {} resolved unexpectedly: {}",
            token,
            stdout
        );
    }
}

#[test]
fn test_resolve_json_output() {
    let tmp = setup_workspace();

    let (stdout, _, success) = run_kdx(tmp.path(), &["resolve", "db", "--json"]);
    assert!(success);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["line"], 2);
    assert_eq!(parsed["column"], 2);

    let (stdout, _, _) = run_kdx(tmp.path(), &["resolve", "missing", "--json"]);
    assert_eq!(stdout.trim(), "null");
}

#[test]
fn test_entities_listing_and_reference_filter() {
    let tmp = setup_workspace();

    let (stdout, _, success) = run_kdx(tmp.path(), &["entities"]);
    assert!(success);
    assert!(stdout.contains("db"));
    assert!(stdout.contains("ComponentInstance"));
    assert!(stdout.contains("2 entities"));

    let (stdout, _, success) = run_kdx(tmp.path(), &["entities", "--referencing", "db"]);
    assert!(success);
    assert!(stdout.contains("db1"));
    assert!(stdout.contains("1 entities"));
}

#[test]
fn test_config_file_workspace() {
    let tmp = setup_workspace();
    let config_path = tmp.path().join("kindex.toml");
    fs::write(
        &config_path,
        format!("[workspace]\nroot = \"{}\"\n", tmp.path().display()),
    )
    .unwrap();

    let binary = kdx_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(&config_path)
        .arg("index")
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("entities indexed: 2"));
}
