//! Batch driver tests over temporary directories.

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use pauliq_core::batch::{CircuitPair, check_pair, discover_pairs, run_batch};
use pauliq_core::config::CheckerConfig;
use pauliq_core::error::PauliqError;
use tempfile::TempDir;

fn write(dir: &Path, name: &str, body: &str) {
    fs::write(dir.join(name), body).unwrap();
}

fn fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    let p = dir.path();
    // equivalent: commuting reorder
    write(p, "circuit1.exp", "0.3;XX\n0.6;ZZ\n");
    write(p, "circuit1.exp.order", "0.6;ZZ\n0.3;XX\n");
    // not equivalent: anticommuting reorder
    write(p, "circuit2.exp", "0.25;X\n0.25;Z\n");
    write(p, "circuit2.exp.order", "0.25;Z\n0.25;X\n");
    // reference missing
    write(p, "circuit3.exp", "0.1;Y\n");
    // ignored: wrong extension or not a file
    write(p, "notes.txt", "hello");
    fs::create_dir(p.join("nested.exp")).unwrap();
    dir
}

#[test]
fn test_discover_pairs_sorted_and_filtered() {
    let dir = fixture();
    let pairs = discover_pairs(dir.path(), None, &CheckerConfig::default()).unwrap();
    let names: Vec<_> = pairs
        .iter()
        .map(|p| p.circuit.file_name().unwrap().to_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["circuit1.exp", "circuit2.exp", "circuit3.exp"]);
    assert_eq!(pairs[0].reference, dir.path().join("circuit1.exp.order"));
}

#[test]
fn test_discover_pairs_with_prefix() {
    let dir = fixture();
    write(dir.path(), "other.exp", "0.1;Z\n");
    let pairs = discover_pairs(dir.path(), Some("circuit"), &CheckerConfig::default()).unwrap();
    assert_eq!(pairs.len(), 3);
}

#[test]
fn test_discover_pairs_missing_dir() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(
        discover_pairs(dir.path().join("nope"), None, &CheckerConfig::default()),
        Err(PauliqError::Io { .. })
    ));
}

#[test]
fn test_check_pair_outcomes() {
    let dir = fixture();
    let config = CheckerConfig::default();

    let ok = check_pair(&CircuitPair::with_suffix(dir.path().join("circuit1.exp"), ".order"), &config);
    assert!(ok.passed());

    let bad = check_pair(&CircuitPair::with_suffix(dir.path().join("circuit2.exp"), ".order"), &config);
    assert!(!bad.passed());
    assert!(!bad.result.unwrap().equivalent);

    let missing = check_pair(&CircuitPair::with_suffix(dir.path().join("circuit3.exp"), ".order"), &config);
    let err = missing.result.unwrap_err();
    assert!(matches!(err, PauliqError::Io { .. }));
    assert_eq!(err.path(), Some(dir.path().join("circuit3.exp.order").as_path()));
}

#[test]
fn test_malformed_pair_does_not_stop_batch() {
    let dir = fixture();
    write(dir.path(), "circuit0.exp", "garbage\n");
    write(dir.path(), "circuit0.exp.order", "0.1;X\n");
    let config = CheckerConfig::default();
    let pairs = discover_pairs(dir.path(), None, &config).unwrap();

    let report = run_batch(&pairs, &config, false, |_| {});
    assert_eq!(report.outcomes.len(), 4);
    let first = report.outcomes[0].result.as_ref().unwrap_err();
    assert!(matches!(first.root(), PauliqError::MalformedLine { line: 1, .. }));
    assert_eq!(report.passed(), 1);
    assert_eq!(report.failed(), 1);
    assert_eq!(report.errored(), 2);
    assert!(!report.all_passed());
}

#[test]
fn test_parallel_batch_matches_sequential() {
    let dir = fixture();
    let config = CheckerConfig::default();
    let pairs = discover_pairs(dir.path(), None, &config).unwrap();

    let seen = AtomicUsize::new(0);
    let parallel = run_batch(&pairs, &config, true, |_| {
        seen.fetch_add(1, Ordering::Relaxed);
    });
    let sequential = run_batch(&pairs, &config, false, |_| {});

    assert_eq!(seen.load(Ordering::Relaxed), pairs.len());
    for (p, s) in parallel.outcomes.iter().zip(&sequential.outcomes) {
        assert_eq!(p.pair, s.pair);
        assert_eq!(p.passed(), s.passed());
    }
}

#[test]
fn test_summary_serializes_to_json() {
    let dir = fixture();
    let config = CheckerConfig::default();
    let pairs = discover_pairs(dir.path(), None, &config).unwrap();
    let summary = run_batch(&pairs, &config, false, |_| {}).summary();

    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["total"], 3);
    assert_eq!(json["passed"], 1);
    assert_eq!(json["pairs"][0]["equivalent"], true);
    assert!(json["pairs"][2]["error"].is_string());
}
