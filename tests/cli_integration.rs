use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn snipstash(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("snipstash").unwrap();
    cmd.env("SNIPSTASH_HOME", home);
    cmd
}

#[test]
fn add_then_list_shows_snippet() {
    let temp_dir = tempfile::tempdir().unwrap();

    snipstash(temp_dir.path())
        .args(["add", "git-amend", "--code", "git commit --amend", "--lang", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Snippet added"));

    snipstash(temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("git-amend"))
        .stdout(predicate::str::contains("[Bash]"));
}

#[test]
fn fresh_vault_is_seeded() {
    let temp_dir = tempfile::tempdir().unwrap();

    snipstash(temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("hello-world"))
        .stdout(predicate::str::contains("git-undo-last-commit"));
}

#[test]
fn show_prints_the_code() {
    let temp_dir = tempfile::tempdir().unwrap();

    snipstash(temp_dir.path())
        .args(["add", "greeter", "--code", "println!(\"hi\");", "--lang", "rust"])
        .assert()
        .success();

    snipstash(temp_dir.path())
        .args(["show", "greeter"])
        .assert()
        .success()
        .stdout(predicate::str::contains("println!(\"hi\");"));
}

#[test]
fn show_resolves_partial_names() {
    let temp_dir = tempfile::tempdir().unwrap();

    snipstash(temp_dir.path())
        .args(["show", "undo-last"])
        .assert()
        .success()
        .stdout(predicate::str::contains("git reset"));
}

#[test]
fn edit_records_prior_code_in_history() {
    let temp_dir = tempfile::tempdir().unwrap();

    snipstash(temp_dir.path())
        .args(["add", "counter", "--code", "x = 1", "--lang", "python"])
        .assert()
        .success();

    snipstash(temp_dir.path())
        .args(["edit", "counter", "--code", "x = 2", "-m", "bump"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Snippet updated"));

    snipstash(temp_dir.path())
        .args(["history", "counter"])
        .assert()
        .success()
        .stdout(predicate::str::contains("x = 1"))
        .stdout(predicate::str::contains("bump"));

    // The snippet itself carries the new code
    snipstash(temp_dir.path())
        .args(["show", "counter"])
        .assert()
        .success()
        .stdout(predicate::str::contains("x = 2"));
}

#[test]
fn history_is_empty_until_code_changes() {
    let temp_dir = tempfile::tempdir().unwrap();

    snipstash(temp_dir.path())
        .args(["add", "untouched", "--code", "true"])
        .assert()
        .success();

    snipstash(temp_dir.path())
        .args(["history", "untouched"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No versions recorded"));
}

#[test]
fn archive_hides_from_default_list() {
    let temp_dir = tempfile::tempdir().unwrap();

    snipstash(temp_dir.path())
        .args(["add", "old-news", "--code", "echo bye"])
        .assert()
        .success();

    snipstash(temp_dir.path())
        .args(["archive", "old-news"])
        .assert()
        .success();

    snipstash(temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("old-news").not());

    snipstash(temp_dir.path())
        .args(["list", "--archived"])
        .assert()
        .success()
        .stdout(predicate::str::contains("old-news"));

    snipstash(temp_dir.path())
        .args(["restore", "old-news"])
        .assert()
        .success();

    snipstash(temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("old-news"));
}

#[test]
fn delete_removes_the_snippet() {
    let temp_dir = tempfile::tempdir().unwrap();

    snipstash(temp_dir.path())
        .args(["add", "doomed", "--code", "rm -rf /tmp/scratch"])
        .assert()
        .success();

    snipstash(temp_dir.path())
        .args(["delete", "doomed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Snippet deleted"));

    snipstash(temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("doomed").not());
}

#[test]
fn delete_unknown_name_fails() {
    let temp_dir = tempfile::tempdir().unwrap();

    snipstash(temp_dir.path())
        .args(["delete", "no-such-snippet"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No snippet matching"));
}

#[test]
fn tag_filter_requires_every_tag() {
    let temp_dir = tempfile::tempdir().unwrap();

    snipstash(temp_dir.path())
        .args(["add", "fetcher", "--code", "curl -s", "--tags", "http,cli"])
        .assert()
        .success();
    snipstash(temp_dir.path())
        .args(["add", "pinger", "--code", "ping -c1", "--tags", "cli"])
        .assert()
        .success();

    snipstash(temp_dir.path())
        .args(["list", "--tag", "http", "--tag", "cli"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fetcher"))
        .stdout(predicate::str::contains("pinger").not());
}

#[test]
fn search_matches_code_text() {
    let temp_dir = tempfile::tempdir().unwrap();

    snipstash(temp_dir.path())
        .args(["add", "opaque-name", "--code", "SELECT zzyzx FROM nowhere"])
        .assert()
        .success();

    snipstash(temp_dir.path())
        .args(["search", "zzyzx"])
        .assert()
        .success()
        .stdout(predicate::str::contains("opaque-name"));
}

#[test]
fn add_reads_code_from_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let source = temp_dir.path().join("deploy.sh");
    std::fs::write(&source, "#!/bin/sh\necho deploying\n").unwrap();

    snipstash(temp_dir.path())
        .args(["add", "deploy"])
        .arg("--file")
        .arg(&source)
        .args(["--lang", "bash"])
        .assert()
        .success();

    snipstash(temp_dir.path())
        .args(["show", "deploy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("echo deploying"));
}

#[test]
fn export_writes_a_gzip_archive() {
    let temp_dir = tempfile::tempdir().unwrap();
    let out = temp_dir.path().join("out.tar.gz");

    snipstash(temp_dir.path())
        .arg("export")
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported"));

    let bytes = std::fs::read(&out).unwrap();
    assert_eq!(&bytes[..2], &[0x1f, 0x8b]);
}

#[test]
fn config_round_trips_owner() {
    let temp_dir = tempfile::tempdir().unwrap();

    snipstash(temp_dir.path())
        .args(["config", "owner", "alice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Config saved"));

    snipstash(temp_dir.path())
        .args(["config", "owner"])
        .assert()
        .success()
        .stdout(predicate::str::contains("owner = alice"));
}

#[test]
fn corrupt_collection_falls_back_to_seed_with_warning() {
    let temp_dir = tempfile::tempdir().unwrap();
    std::fs::write(temp_dir.path().join("collection.json"), "{not json").unwrap();

    snipstash(temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stderr(predicate::str::contains("unreadable"))
        .stdout(predicate::str::contains("hello-world"));
}
