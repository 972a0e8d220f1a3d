//! End-to-end tests for the `chunkmark-bench` and `chunkmark-chart` binaries.

use assert_cmd::Command;
use predicates::prelude::*;

fn bench() -> Command {
    Command::new(env!("CARGO_BIN_EXE_chunkmark-bench"))
}

fn chart() -> Command {
    Command::new(env!("CARGO_BIN_EXE_chunkmark-chart"))
}

// ============================================================================
// chunkmark-bench
// ============================================================================

#[test]
fn bench_missing_corpus_exits_non_zero() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("no-such-corpus");

    bench()
        .arg("--corpus")
        .arg(&missing)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("cannot load corpus"))
        .stderr(predicate::str::contains("no-such-corpus"));
}

#[test]
fn bench_prints_header_and_every_candidate() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = dir.path().join("sample.txt");
    std::fs::write(&corpus, "Hello world. How are you?\nFine.\n".repeat(200)).unwrap();

    let assert = bench()
        .arg("--corpus")
        .arg(&corpus)
        .args(["--chunk-size", "1024", "--runs", "2"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Benchmarking sample.txt (0MB), 1KB chunks\n\n",
        ));

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    for name in ["delimiter:", "fixed:", "recursive:", "sentence:", "text-splitter:", "naive:"] {
        assert!(stdout.contains(name), "{name} missing from:\n{stdout}");
    }
    assert!(stdout.contains("sentence:      (running 1 iteration - slow)"));
}

#[test]
fn bench_zero_chunk_size_is_reported_per_candidate() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = dir.path().join("sample.txt");
    std::fs::write(&corpus, "abc").unwrap();

    bench()
        .arg("--corpus")
        .arg(&corpus)
        .args(["--chunk-size", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "naive:         (error: invalid chunk size: 0 (must be > 0))",
        ));
}

// ============================================================================
// chunkmark-chart
// ============================================================================

#[test]
fn chart_writes_both_files() {
    let dir = tempfile::tempdir().unwrap();

    chart()
        .arg("--out-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout("Saved benchmark.png and benchmark.svg\n");

    assert!(dir.path().join("benchmark.png").is_file());
    assert!(dir.path().join("benchmark.svg").is_file());
}

#[test]
fn chart_unwritable_directory_exits_non_zero() {
    let dir = tempfile::tempdir().unwrap();

    chart()
        .arg("--out-dir")
        .arg(dir.path().join("missing/nested"))
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("failed to write chart"));
}
