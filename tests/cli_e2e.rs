#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn burrow_cmd(data_dir: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin("burrow"));
    cmd.env("BURROW_DIR", data_dir.as_os_str());
    cmd
}

#[test]
fn test_research_session_full_workflow() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();

    // 1. Start a tree
    burrow_cmd(dir)
        .args(["new", "demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created tree 'demo'"));

    // 2. Pose a question under the root and descend into it
    burrow_cmd(dir)
        .args(["add", "why", "is", "the", "cache", "cold"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added [n1] why is the cache cold"));

    burrow_cmd(dir)
        .args(["go", "n1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Now at [n1]"));

    // 3. A sub-question, entered via the first-child shortcut
    burrow_cmd(dir)
        .args(["add", "check", "eviction", "policy"])
        .assert()
        .success();
    burrow_cmd(dir)
        .args(["down"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Now at [n2]"));

    // 4. Closing the sub-question climbs back to its parent
    burrow_cmd(dir)
        .args(["done", "lru,", "as", "expected"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Marked [n2] as done")
                .and(predicate::str::contains("Now at [n1]")),
        );

    // 5. The outline shows the whole trail
    burrow_cmd(dir)
        .args(["show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("demo")
                .and(predicate::str::contains("[n2]"))
                .and(predicate::str::contains("← HERE")),
        );

    burrow_cmd(dir)
        .args(["path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "root:Root → n1:why is the cache cold",
        ));
}

#[test]
fn test_tree_registry_listing_and_switching() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();

    burrow_cmd(dir).args(["new", "alpha"]).assert().success();
    burrow_cmd(dir).args(["new", "beta"]).assert().success();

    // beta was created last, so it is current
    burrow_cmd(dir)
        .args(["ls"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("alpha")
                .and(predicate::str::contains("► beta")),
        );

    burrow_cmd(dir)
        .args(["open", "alpha"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Opened tree 'alpha'"));

    burrow_cmd(dir)
        .args(["ls"])
        .assert()
        .success()
        .stdout(predicate::str::contains("► alpha"));
}

#[test]
fn test_link_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();

    burrow_cmd(dir).args(["new", "demo"]).assert().success();
    burrow_cmd(dir).args(["add", "one"]).assert().success();
    burrow_cmd(dir).args(["add", "two"]).assert().success();

    burrow_cmd(dir)
        .args(["link", "n2", "--from", "n1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Linked [n1] to [n2]"));

    burrow_cmd(dir)
        .args(["link", "n2", "--from", "n1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already links to"));

    burrow_cmd(dir)
        .args(["backlinks", "n2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[n1]"));
}

#[test]
fn test_delete_subtree_repairs_cursor() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();

    burrow_cmd(dir).args(["new", "demo"]).assert().success();
    burrow_cmd(dir).args(["add", "doomed"]).assert().success();
    burrow_cmd(dir).args(["go", "n1"]).assert().success();
    burrow_cmd(dir).args(["add", "child"]).assert().success();

    // cursor sits inside the subtree being deleted
    burrow_cmd(dir)
        .args(["rmnode", "n1", "--yes"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Deleted [n1] and 1 descendant(s)")
                .and(predicate::str::contains("Now at [root]")),
        );

    burrow_cmd(dir)
        .args(["stat"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total nodes: 1"));
}

#[test]
fn test_export_import_round_trip() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();

    burrow_cmd(dir).args(["new", "demo"]).assert().success();
    burrow_cmd(dir).args(["add", "a question"]).assert().success();

    let file = dir.join("demo.json");
    burrow_cmd(dir)
        .args(["export", file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported to"));

    let other = TempDir::new().unwrap();
    burrow_cmd(other.path())
        .args(["import", file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported tree 'demo' (2 nodes)"));

    burrow_cmd(other.path())
        .args(["show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a question"));
}

#[test]
fn test_markdown_export_writes_outline() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();

    burrow_cmd(dir).args(["new", "demo"]).assert().success();
    burrow_cmd(dir).args(["add", "a question"]).assert().success();

    burrow_cmd(dir)
        .args(["export", "--md"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("**[root]**").and(predicate::str::contains("**[n1]**")),
        );
}

#[test]
fn test_back_without_history_is_a_noop() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();

    burrow_cmd(dir).args(["new", "demo"]).assert().success();
    burrow_cmd(dir)
        .args(["back"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No further history"));
}

#[test]
fn test_unknown_node_is_an_error() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();

    burrow_cmd(dir).args(["new", "demo"]).assert().success();
    burrow_cmd(dir)
        .args(["go", "n99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Node not found: n99"));
}

#[test]
fn test_commands_without_a_tree_fail_with_hint() {
    let temp = TempDir::new().unwrap();

    burrow_cmd(temp.path())
        .args(["show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("burrow new"));
}

#[test]
fn test_tree_files_survive_between_invocations() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();

    burrow_cmd(dir).args(["new", "demo"]).assert().success();
    burrow_cmd(dir).args(["add", "persisted"]).assert().success();

    // the tree is one JSON file a text editor can open
    let tree_file = dir.join("trees").join("demo.json");
    assert!(tree_file.exists());
    let raw = fs::read_to_string(&tree_file).unwrap();
    assert!(raw.contains("\"persisted\""));

    burrow_cmd(dir)
        .args(["cat", "n1"])
        .assert()
        .success();
}
