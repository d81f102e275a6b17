//! # Statistics Tests
//!
//! Counter accounting for each outcome, derived rates, and the two report
//! formats (console summary and results file).

use std::fs;

use csim_core::core::Outcome;
use csim_core::stats::CacheStats;
use pretty_assertions::assert_eq;

fn stats(hits: u64, misses: u64, evictions: u64) -> CacheStats {
    CacheStats {
        hits,
        misses,
        evictions,
    }
}

#[test]
fn default_is_zero() {
    assert_eq!(CacheStats::default().as_tuple(), (0, 0, 0));
    assert_eq!(CacheStats::default().hit_rate(), 0.0);
    assert_eq!(CacheStats::default().miss_rate(), 0.0);
}

#[test]
fn record_folds_each_outcome() {
    let mut s = CacheStats::default();
    s.record(Outcome::Hit);
    assert_eq!(s.as_tuple(), (1, 0, 0));
    s.record(Outcome::Miss);
    assert_eq!(s.as_tuple(), (1, 1, 0));
    s.record(Outcome::MissEvict);
    assert_eq!(s.as_tuple(), (1, 2, 1));
    assert_eq!(s.accesses(), 3);
}

#[test]
fn rates() {
    let s = stats(3, 1, 0);
    assert!((s.hit_rate() - 0.75).abs() < f64::EPSILON);
    assert!((s.miss_rate() - 0.25).abs() < f64::EPSILON);
}

#[test]
fn summary_line_format() {
    assert_eq!(stats(4, 5, 3).to_string(), "hits:4 misses:5 evictions:3");
}

#[test]
fn results_line_format() {
    assert_eq!(stats(4, 5, 3).results_line(), "4 5 3");
}

#[test]
fn write_results_replaces_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".csim_results");
    fs::write(&path, "stale contents that are longer\n").unwrap();

    stats(0, 3, 2).write_results(&path).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "0 3 2\n");
}

#[test]
fn serializes_to_json() {
    let json = serde_json::to_value(stats(1, 2, 3)).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "hits": 1, "misses": 2, "evictions": 3 })
    );
}
