//! CLI command integration tests. Each test uses a temp directory and a
//! fresh --store path for isolation.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn markov_cmd(store: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("markov").unwrap();
    cmd.arg("--store").arg(store);
    cmd
}

fn write_corpus(dir: &TempDir, name: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(
        &path,
        "The cat sat on the mat. The cat sat on the rug. The dog sat on the mat.",
    )
    .unwrap();
    path
}

#[test]
fn stats_on_fresh_store() {
    let dir = TempDir::new().unwrap();
    let store = dir.path().join("fresh.snapshot");
    markov_cmd(&store)
        .args(["stats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("vocabulary: 0"))
        .stdout(predicate::str::contains("mass:       0"));
}

#[test]
fn train_then_stats() {
    let dir = TempDir::new().unwrap();
    let store = dir.path().join("trained.snapshot");
    let corpus = write_corpus(&dir, "corpus.txt");

    markov_cmd(&store)
        .args(["train"])
        .arg(&corpus)
        .assert()
        .success()
        .stdout(predicate::str::contains("trained on"));

    assert!(store.exists());

    let output = markov_cmd(&store).args(["stats"]).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("vocabulary: "));
    assert!(!stdout.contains("vocabulary: 0"));
}

#[test]
fn select_unknown_word() {
    let dir = TempDir::new().unwrap();
    let store = dir.path().join("empty.snapshot");
    markov_cmd(&store)
        .args(["select", "nope"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not found"));
}

#[test]
fn select_after_train() {
    let dir = TempDir::new().unwrap();
    let store = dir.path().join("trained.snapshot");
    let corpus = write_corpus(&dir, "corpus.txt");

    markov_cmd(&store).args(["train"]).arg(&corpus).assert().success();

    markov_cmd(&store)
        .args(["select", "cat"])
        .assert()
        .success()
        .stdout(predicate::str::contains("neighbor"));
}

#[test]
fn generate_from_trained_store() {
    let dir = TempDir::new().unwrap();
    let store = dir.path().join("trained.snapshot");
    let corpus = write_corpus(&dir, "corpus.txt");

    markov_cmd(&store).args(["train"]).arg(&corpus).assert().success();

    markov_cmd(&store)
        .args(["generate", "NOUN,VERB,NOUN,EOS", "cat", "--seed", "7"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn generate_without_anchor_fails() {
    let dir = TempDir::new().unwrap();
    let store = dir.path().join("trained.snapshot");
    let corpus = write_corpus(&dir, "corpus.txt");

    markov_cmd(&store).args(["train"]).arg(&corpus).assert().success();

    markov_cmd(&store)
        .args(["generate", "ADJ,EOS", "cat", "--seed", "7"])
        .assert()
        .failure();
}

#[test]
fn export_import_roundtrip() {
    let dir = TempDir::new().unwrap();
    let store_a = dir.path().join("a.snapshot");
    let store_b = dir.path().join("b.snapshot");
    let corpus = write_corpus(&dir, "corpus.txt");

    markov_cmd(&store_a).args(["train"]).arg(&corpus).assert().success();

    let export_path = dir.path().join("export.json");
    markov_cmd(&store_a)
        .args(["export"])
        .arg(&export_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("exported to"));
    assert!(export_path.exists());

    markov_cmd(&store_b)
        .args(["import"])
        .arg(&export_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("imported from"));

    let stats_a = markov_cmd(&store_a).args(["stats"]).output().unwrap();
    let stats_b = markov_cmd(&store_b).args(["stats"]).output().unwrap();
    assert_eq!(
        String::from_utf8_lossy(&stats_a.stdout),
        String::from_utf8_lossy(&stats_b.stdout)
    );
}

#[test]
fn rate_adjusts_neighbor() {
    let dir = TempDir::new().unwrap();
    let store = dir.path().join("trained.snapshot");
    let corpus = write_corpus(&dir, "corpus.txt");

    markov_cmd(&store).args(["train"]).arg(&corpus).assert().success();

    markov_cmd(&store)
        .args(["rate", "cat", "sat", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rating = 5"));

    markov_cmd(&store)
        .args(["rate", "cat", "sat", "-2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rating = 3"));
}

#[test]
fn rate_unknown_neighbor_fails() {
    let dir = TempDir::new().unwrap();
    let store = dir.path().join("trained.snapshot");
    let corpus = write_corpus(&dir, "corpus.txt");

    markov_cmd(&store).args(["train"]).arg(&corpus).assert().success();

    markov_cmd(&store)
        .args(["rate", "cat", "nonexistent", "1"])
        .assert()
        .failure();
}

#[test]
fn missing_required_args() {
    let dir = TempDir::new().unwrap();
    let store = dir.path().join("x.snapshot");

    markov_cmd(&store)
        .args(["train"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));

    markov_cmd(&store)
        .args(["generate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}
