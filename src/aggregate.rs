// src/aggregate.rs
use std::io::BufRead;
use std::time::{Duration, Instant};

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::AnalysisError;
use crate::parser::{parse_line, ParseOutcome};

/// Occurrence counter keyed by observed value. Insertion-ordered so
/// rankings can break count ties by first observation.
pub type Counter = IndexMap<String, u64>;

/// Immutable aggregate view over everything fed so far.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AggregateSnapshot {
    pub total_requests: u64,
    pub total_bytes: u64,
    pub ip_counts: Counter,
    pub status_counts: Counter,
    pub method_counts: Counter,
    pub path_counts: Counter,
    pub hour_counts: Counter,
}

impl AggregateSnapshot {
    /// True when no line has parsed successfully. Derived metrics
    /// that divide by the request count must not be computed in this
    /// state.
    pub fn is_empty(&self) -> bool {
        self.total_requests == 0
    }
}

/// Input-side run statistics, reported on stderr in debug mode.
#[derive(Debug, Default, Clone)]
pub struct RunStats {
    pub lines_seen: u64,
    pub lines_skipped: u64,
    pub elapsed: Duration,
}

/// Single-pass aggregator over a stream of access-log lines.
///
/// One instance owns one run: feed lines (or hand it a whole reader),
/// then take a snapshot. Memory grows only with the number of
/// distinct keys per dimension, never with input length, so inputs
/// far larger than available memory are fine.
pub struct Aggregator {
    total_requests: u64,
    total_bytes: u64,
    ip_counts: Counter,
    status_counts: Counter,
    method_counts: Counter,
    path_counts: Counter,
    hour_counts: Counter,
    stats: RunStats,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl Aggregator {
    pub fn new() -> Self {
        Aggregator {
            total_requests: 0,
            total_bytes: 0,
            ip_counts: Counter::new(),
            status_counts: Counter::new(),
            method_counts: Counter::new(),
            path_counts: Counter::new(),
            hour_counts: Counter::new(),
            stats: RunStats::default(),
        }
    }

    /// Process one raw line. Blank and unmatched lines are absorbed
    /// silently; a parsed line increments every counter exactly once.
    /// The one fatal condition is a size field that fails integer
    /// conversion, which aborts the run.
    pub fn feed(&mut self, line: &str) -> Result<(), AnalysisError> {
        self.stats.lines_seen += 1;

        let trimmed = line.trim();
        if trimmed.is_empty() {
            self.stats.lines_skipped += 1;
            return Ok(());
        }

        match parse_line(trimmed, self.stats.lines_seen as usize)? {
            ParseOutcome::Skip => {
                self.stats.lines_skipped += 1;
            }
            ParseOutcome::Record(record) => {
                self.total_requests += 1;
                self.total_bytes += record.response_size;
                bump(&mut self.ip_counts, record.client_ip);
                bump(&mut self.status_counts, record.status_code);
                bump(&mut self.method_counts, record.method);
                bump(&mut self.path_counts, record.path);
                bump(&mut self.hour_counts, record.hour);
            }
        }

        Ok(())
    }

    /// Drain a line-oriented reader through `feed`. The reader is
    /// consumed lazily, one line at a time.
    pub fn consume<R: BufRead>(&mut self, reader: R) -> Result<RunStats, AnalysisError> {
        let start = Instant::now();

        for line_result in reader.lines() {
            let line = match line_result {
                Ok(line) => line,
                Err(e) => {
                    // Handle broken pipe gracefully
                    if e.kind() == std::io::ErrorKind::UnexpectedEof {
                        break;
                    }
                    return Err(AnalysisError::IoError(e));
                }
            };
            self.feed(&line)?;
        }

        self.stats.elapsed += start.elapsed();
        Ok(self.stats.clone())
    }

    /// Current state as an immutable value. Counters are consistent
    /// at every point of the pass, so a mid-stream call yields a
    /// valid partial view.
    pub fn snapshot(&self) -> AggregateSnapshot {
        AggregateSnapshot {
            total_requests: self.total_requests,
            total_bytes: self.total_bytes,
            ip_counts: self.ip_counts.clone(),
            status_counts: self.status_counts.clone(),
            method_counts: self.method_counts.clone(),
            path_counts: self.path_counts.clone(),
            hour_counts: self.hour_counts.clone(),
        }
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }
}

/// Increment-or-insert for one counter key.
fn bump(counter: &mut Counter, key: String) {
    *counter.entry(key).or_insert(0) += 1;
}
