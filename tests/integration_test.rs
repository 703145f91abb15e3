use std::path::Path;
use std::process::Command;

use serde_json::Value;
use tempfile::TempDir;

fn quill_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_quill"))
}

fn run(dir: &Path, user: &str, args: &[&str]) -> std::process::Output {
    quill_cmd()
        .current_dir(dir)
        .args(["--user", user])
        .args(args)
        .output()
        .unwrap()
}

fn run_json(dir: &Path, user: &str, args: &[&str]) -> Value {
    let output = run(dir, user, args);
    assert!(
        output.status.success(),
        "command {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

fn init_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let output = run(tmp.path(), "alice", &["init"]);
    assert!(output.status.success());
    tmp
}

fn create(dir: &Path, user: &str, args: &[&str]) -> String {
    let mut full = vec!["create"];
    full.extend_from_slice(args);
    full.push("--json");
    let doc = run_json(dir, user, &full);
    doc["id"].as_str().unwrap().to_string()
}

#[test]
fn test_init_creates_quill_directory() {
    let tmp = TempDir::new().unwrap();

    let output = run(tmp.path(), "alice", &["init"]);
    assert!(output.status.success());
    assert!(tmp.path().join(".quill").exists());
    assert!(tmp.path().join(".quill/quill.db").exists());
}

#[test]
fn test_init_twice_fails() {
    let tmp = init_project();

    let output = run(tmp.path(), "alice", &["init"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Already initialized"));
}

#[test]
fn test_create_without_init_fails() {
    let tmp = TempDir::new().unwrap();

    let output = run(tmp.path(), "alice", &["create", "Orphan"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Not in a quill project"));
}

#[test]
fn test_blank_title_becomes_untitled() {
    let tmp = init_project();

    let doc = run_json(tmp.path(), "alice", &["create", "--json"]);
    assert_eq!(doc["title"], "Untitled");
}

#[test]
fn test_full_document_workflow() {
    let tmp = init_project();

    let root = create(tmp.path(), "alice", &["Project plan"]);
    let child = create(tmp.path(), "alice", &["Milestones", "--parent", &root]);

    // listing roots shows only the root, in creation order
    let listed = run_json(tmp.path(), "alice", &["list", "--json"]);
    let titles: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["Project plan"]);

    let children = run_json(tmp.path(), "alice", &["list", "--parent", &root, "--json"]);
    assert_eq!(children.as_array().unwrap().len(), 1);

    // archive cascades to the child
    let output = run(tmp.path(), "alice", &["archive", &root]);
    assert!(output.status.success());

    let trash = run_json(tmp.path(), "alice", &["trash", "--json"]);
    assert_eq!(trash.as_array().unwrap().len(), 2);
    assert!(run_json(tmp.path(), "alice", &["list", "--json"])
        .as_array()
        .unwrap()
        .is_empty());

    // restore cascades back and keeps the child attached
    let output = run(tmp.path(), "alice", &["restore", &root]);
    assert!(output.status.success());

    let child_doc = run_json(tmp.path(), "alice", &["get", &child, "--json"]);
    assert_eq!(child_doc["is_archived"], false);
    assert_eq!(child_doc["parent_id"].as_str().unwrap(), root);
}

#[test]
fn test_reorder_changes_listing() {
    let tmp = init_project();

    let a = create(tmp.path(), "alice", &["A"]);
    let _b = create(tmp.path(), "alice", &["B"]);
    let c = create(tmp.path(), "alice", &["C"]);

    let output = run(
        tmp.path(),
        "alice",
        &["reorder", &a, "--target", &c, "--position", "after"],
    );
    assert!(output.status.success());

    let listed = run_json(tmp.path(), "alice", &["list", "--json"]);
    let titles: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["B", "C", "A"]);
}

#[test]
fn test_remove_requires_force_and_cascades() {
    let tmp = init_project();

    let root = create(tmp.path(), "alice", &["Root"]);
    let child = create(tmp.path(), "alice", &["Child", "--parent", &root]);

    let output = run(tmp.path(), "alice", &["remove", &root]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--force"));

    let output = run(tmp.path(), "alice", &["remove", &root, "--force"]);
    assert!(output.status.success());

    // the child is gone too
    let output = run(tmp.path(), "alice", &["get", &child]);
    assert!(!output.status.success());
}

#[test]
fn test_ownership_is_enforced_across_users() {
    let tmp = init_project();

    let doc = create(tmp.path(), "alice", &["Private"]);

    let output = run(tmp.path(), "bob", &["archive", &doc]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unauthorized"));

    let output = run(tmp.path(), "bob", &["get", &doc]);
    assert!(!output.status.success());

    // bob's listing does not include alice's documents
    assert!(run_json(tmp.path(), "bob", &["list", "--json"])
        .as_array()
        .unwrap()
        .is_empty());
}

#[test]
fn test_publish_and_update() {
    let tmp = init_project();

    let doc = create(tmp.path(), "alice", &["Launch post"]);

    let output = run(tmp.path(), "alice", &["publish", &doc]);
    assert!(output.status.success());

    let loaded = run_json(tmp.path(), "alice", &["get", &doc, "--json"]);
    assert_eq!(loaded["is_published"], true);

    let updated = run_json(
        tmp.path(),
        "alice",
        &[
            "update",
            &doc,
            "--title",
            "Launch post v2",
            "--icon",
            "🚀",
            "--json",
        ],
    );
    assert_eq!(updated["title"], "Launch post v2");
    assert_eq!(updated["icon"], "🚀");

    let output = run(tmp.path(), "alice", &["unpublish", &doc]);
    assert!(output.status.success());
    let loaded = run_json(tmp.path(), "alice", &["get", &doc, "--json"]);
    assert_eq!(loaded["is_published"], false);
}

#[test]
fn test_workspace_lifecycle() {
    let tmp = init_project();

    let ws = run_json(
        tmp.path(),
        "alice",
        &["workspace", "add", "Engineering", "--json"],
    );
    let ws_id = ws["id"].as_str().unwrap().to_string();

    let doc = create(tmp.path(), "alice", &["Runbook", "--workspace", &ws_id]);

    let listed = run_json(
        tmp.path(),
        "alice",
        &["list", "--workspace", &ws_id, "--json"],
    );
    assert_eq!(listed.as_array().unwrap().len(), 1);

    // archiving the workspace sweeps its documents into the trash
    let output = run(tmp.path(), "alice", &["workspace", "archive", &ws_id]);
    assert!(output.status.success());

    let trash = run_json(tmp.path(), "alice", &["trash", "--json"]);
    assert_eq!(trash.as_array().unwrap().len(), 1);
    assert_eq!(trash[0]["id"].as_str().unwrap(), doc);

    // archived workspaces only show up with --archived
    assert!(run_json(tmp.path(), "alice", &["workspace", "list", "--json"])
        .as_array()
        .unwrap()
        .is_empty());
    let all = run_json(
        tmp.path(),
        "alice",
        &["workspace", "list", "--archived", "--json"],
    );
    assert_eq!(all.as_array().unwrap().len(), 1);

    // removal deletes the workspace and its documents
    let output = run(tmp.path(), "alice", &["workspace", "remove", &ws_id, "--force"]);
    assert!(output.status.success());
    let output = run(tmp.path(), "alice", &["get", &doc]);
    assert!(!output.status.success());
}

#[test]
fn test_search_finds_titles() {
    let tmp = init_project();

    create(tmp.path(), "alice", &["Quarterly planning"]);
    create(tmp.path(), "alice", &["Grocery list"]);

    let hits = run_json(tmp.path(), "alice", &["search", "planning", "--json"]);
    let titles: Vec<&str> = hits
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["Quarterly planning"]);

    // other users see nothing
    assert!(run_json(tmp.path(), "bob", &["search", "planning", "--json"])
        .as_array()
        .unwrap()
        .is_empty());
}

#[test]
fn test_id_prefix_resolution() {
    let tmp = init_project();

    let doc = create(tmp.path(), "alice", &["Prefixed"]);
    let prefix = &doc[..8];

    let loaded = run_json(tmp.path(), "alice", &["get", prefix, "--json"]);
    assert_eq!(loaded["id"].as_str().unwrap(), doc);
}
