#![cfg(unix)]

use assert_cmd::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

// Output depends only on the "keep" fixups; without "guard" the verifier fails.
const SCRIPT: &str = r#"f="data/fixups/${1%%.*}/$1.yml"; grep -q guard "$f" || exit 1; grep keep "$f" || true"#;

fn write_record(root: &Path, group: &str, act: &str, body: &str) {
    let dir = root.join("data/fixups").join(group);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(format!("{act}.yml")), body).unwrap();
}

fn prune(root: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("prune-fixups"));
    cmd.current_dir(root)
        .env_remove("FIXUP_PRUNE_DIR")
        .env_remove("FIXUP_PRUNE_VERIFIER")
        .env_remove("FIXUP_PRUNE_CONFIG")
        .args(["--verifier", "sh", "--verifier-arg", "-c"])
        .args(["--verifier-arg", SCRIPT, "--verifier-arg", "verifier"]);
    cmd
}

#[test]
fn all_prunes_every_discovered_record() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    write_record(
        root,
        "2012",
        "2012. évi C. törvény",
        "- old: guard\n  new: a\n- old: noise\n  new: b\n- old: keep me\n  new: c\n",
    );
    write_record(root, "2013", "2013.5", "- old: guard\n  new: a\n");

    let output = prune(root).args(["all", "--json"]).output().unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let report: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(report["acts"].as_array().unwrap().len(), 2);
    assert_eq!(report["original_entries"], 4);
    assert_eq!(report["kept_entries"], 3);

    let pruned =
        fs::read_to_string(root.join("data/fixups/2012/2012. évi C. törvény.yml")).unwrap();
    assert_eq!(pruned, "- old: guard\n  new: a\n- old: keep me\n  new: c\n");
    assert_eq!(
        fs::read_to_string(root.join("data/fixups/2013/2013.5.yml")).unwrap(),
        "- old: guard\n  new: a\n"
    );
}

#[test]
fn act_deletes_record_that_is_not_needed() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    write_record(root, "2014", "2014.1", "- old: guard\n  new: a\n");
    // A verifier that ignores the record entirely.
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("prune-fixups"));
    cmd.current_dir(root)
        .env_remove("FIXUP_PRUNE_DIR")
        .env_remove("FIXUP_PRUNE_CONFIG")
        .args(["--verifier", "echo", "act", "2014.1"])
        .assert()
        .success();

    assert!(!root.join("data/fixups/2014/2014.1.yml").exists());
}

#[test]
fn failing_baseline_aborts_with_error() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    write_record(root, "2015", "2015.1", "- old: no protection\n  new: a\n");

    prune(root)
        .args(["act", "2015.1"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("Baseline verifier run for '2015.1'"));

    assert_eq!(
        fs::read_to_string(root.join("data/fixups/2015/2015.1.yml")).unwrap(),
        "- old: no protection\n  new: a\n"
    );
}

#[test]
fn missing_record_is_reported() {
    let temp = tempdir().unwrap();

    prune(temp.path())
        .args(["act", "2016.9"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("No fixup record for act '2016.9'"));
}

#[test]
fn missing_verifier_is_reported() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    write_record(root, "2017", "2017.1", "- old: guard\n  new: a\n");

    Command::new(assert_cmd::cargo::cargo_bin!("prune-fixups"))
        .current_dir(root)
        .env_remove("FIXUP_PRUNE_DIR")
        .env_remove("FIXUP_PRUNE_CONFIG")
        .args(["--verifier", "no-such-verifier-binary", "all"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("Failed to launch verifier"));

    assert!(root.join("data/fixups/2017/2017.1.yml").exists());
}

#[test]
fn config_file_supplies_verifier() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    write_record(root, "2018", "2018.1", "- old: x\n  new: y\n");
    fs::write(
        root.join("prune.toml"),
        "fixups_dir = \"data/fixups\"\n\n[verifier]\nprogram = \"true\"\nstderr = \"null\"\n",
    )
    .unwrap();

    Command::new(assert_cmd::cargo::cargo_bin!("prune-fixups"))
        .current_dir(root)
        .env_remove("FIXUP_PRUNE_DIR")
        .env_remove("FIXUP_PRUNE_VERIFIER")
        .args(["--config", "prune.toml", "all"])
        .assert()
        .success();

    assert!(!root.join("data/fixups/2018/2018.1.yml").exists());
}
