// tests/aggregation_tests.rs
use std::io::Cursor;

use clfstat::report::{average_response_size, format_bytes, top_n};
use clfstat::{AggregateSnapshot, Aggregator, AnalysisError};

const HOME_200: &str =
    r#"192.168.1.1 - - [27/Nov/2025:10:00:00 +0000] "GET /home HTTP/1.1" 200 1234"#;
const HOME_404: &str =
    r#"10.0.0.1 - - [27/Nov/2025:11:00:00 +0000] "GET /home HTTP/1.1" 404 100"#;

fn snapshot_of(lines: &[&str]) -> AggregateSnapshot {
    let mut aggregator = Aggregator::new();
    for line in lines {
        aggregator.feed(line).unwrap();
    }
    aggregator.snapshot()
}

#[test]
fn test_two_line_scenario() {
    let snapshot = snapshot_of(&[HOME_200, HOME_404]);

    assert_eq!(snapshot.total_requests, 2);
    assert_eq!(snapshot.total_bytes, 1334);
    assert_eq!(snapshot.status_counts.get("200"), Some(&1));
    assert_eq!(snapshot.status_counts.get("404"), Some(&1));
    assert_eq!(snapshot.hour_counts.get("10"), Some(&1));
    assert_eq!(snapshot.hour_counts.get("11"), Some(&1));
    assert_eq!(snapshot.path_counts.get("/home"), Some(&2));

    let average = average_response_size(&snapshot).unwrap();
    assert_eq!(format_bytes(average), "667.00 B");
}

#[test]
fn test_valid_count_independent_of_interleaving() {
    let valid = [HOME_200, HOME_404, HOME_200];
    let invalid = ["nonsense", "  ", "GET /home", "500 500"];

    let front: Vec<&str> = invalid.iter().chain(valid.iter()).copied().collect();
    let back: Vec<&str> = valid.iter().chain(invalid.iter()).copied().collect();
    let mixed = [
        invalid[0], valid[0], invalid[1], valid[1], invalid[2], valid[2], invalid[3],
    ];

    for arrangement in [front.as_slice(), back.as_slice(), mixed.as_slice()] {
        let snapshot = snapshot_of(arrangement);
        assert_eq!(snapshot.total_requests, 3);
        assert_eq!(snapshot.total_bytes, 2568);
    }
}

#[test]
fn test_all_counters_sum_to_total() {
    let snapshot = snapshot_of(&[HOME_200, HOME_404, "junk", HOME_200]);

    let total = snapshot.total_requests;
    assert_eq!(snapshot.ip_counts.values().sum::<u64>(), total);
    assert_eq!(snapshot.status_counts.values().sum::<u64>(), total);
    assert_eq!(snapshot.method_counts.values().sum::<u64>(), total);
    assert_eq!(snapshot.path_counts.values().sum::<u64>(), total);
    assert_eq!(snapshot.hour_counts.values().sum::<u64>(), total);
}

#[test]
fn test_empty_and_blank_input() {
    let empty = snapshot_of(&[]);
    assert!(empty.is_empty());
    assert_eq!(average_response_size(&empty), None);

    let blanks = snapshot_of(&["", "   ", "\t"]);
    assert_eq!(blanks.total_requests, 0);
    assert_eq!(average_response_size(&blanks), None);
}

#[test]
fn test_ranking_is_stable_across_calls() {
    let snapshot = snapshot_of(&[HOME_200, HOME_404, HOME_404, HOME_200, HOME_200]);

    let first = top_n(&snapshot.ip_counts, 5);
    let second = top_n(&snapshot.ip_counts, 5);
    assert_eq!(first, second);
    assert_eq!(first[0].0, "192.168.1.1");
}

#[test]
fn test_consume_reads_lazily_line_by_line() {
    let mut aggregator = Aggregator::new();
    let input = Cursor::new(format!("{}\nnot a log line\n{}\n", HOME_200, HOME_404));

    let stats = aggregator.consume(input).unwrap();
    assert_eq!(stats.lines_seen, 3);
    assert_eq!(stats.lines_skipped, 1);
    assert_eq!(aggregator.snapshot().total_requests, 2);
}

#[test]
fn test_numeric_overflow_surfaces_before_any_snapshot() {
    let mut aggregator = Aggregator::new();
    let line =
        r#"10.0.0.1 - - [27/Nov/2025:11:00:00 +0000] "GET / HTTP/1.1" 200 99999999999999999999"#;

    let err = aggregator.consume(Cursor::new(line)).unwrap_err();
    assert!(matches!(err, AnalysisError::NumericFieldInvalid { .. }));
}
