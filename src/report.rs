// src/report.rs - Derived metrics and report rendering over a snapshot
use std::io::Write;

use serde::Serialize;

use crate::aggregate::{AggregateSnapshot, Counter};
use crate::colors::ColorScheme;
use crate::config::AnalyzerConfig;

/// Byte-count units. Scaling stops at GB regardless of magnitude.
const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Human-readable byte count: divide by 1024 until the value fits,
/// two fractional digits, unit capped at GB.
pub fn format_bytes(size: f64) -> String {
    let mut size = size;
    let mut unit = 0;
    while size > 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", size, UNITS[unit])
}

/// Mean response size in bytes. `None` for an empty snapshot; the
/// caller decides how to surface that condition.
pub fn average_response_size(snapshot: &AggregateSnapshot) -> Option<f64> {
    if snapshot.is_empty() {
        return None;
    }
    Some(snapshot.total_bytes as f64 / snapshot.total_requests as f64)
}

/// Share of the total request count, as a 0..=100 figure. Rendered
/// with one decimal digit everywhere it is displayed.
pub fn percentage(count: u64, total: u64) -> f64 {
    100.0 * count as f64 / total as f64
}

/// Entries ranked by count descending, truncated to `n`. The sort is
/// stable over the counter's insertion order, so count ties keep
/// first-observation order.
pub fn top_n(counter: &Counter, n: usize) -> Vec<(&str, u64)> {
    let mut entries: Vec<(&str, u64)> =
        counter.iter().map(|(key, count)| (key.as_str(), *count)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries.truncate(n);
    entries
}

/// All entries sorted by key, for distributions that read better in
/// key order (status codes, hours).
pub fn sorted_by_key(counter: &Counter) -> Vec<(&str, u64)> {
    let mut entries: Vec<(&str, u64)> =
        counter.iter().map(|(key, count)| (key.as_str(), *count)).collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    entries
}

/// Console report. The caller must have checked `is_empty()` first;
/// an empty snapshot renders headers with no average line.
pub fn render_text<W: Write>(
    out: &mut W,
    snapshot: &AggregateSnapshot,
    config: &AnalyzerConfig,
    colors: &ColorScheme,
) -> std::io::Result<()> {
    writeln!(
        out,
        "{}Total requests{} : {}{}{}",
        colors.label, colors.reset, colors.number, snapshot.total_requests, colors.reset
    )?;
    writeln!(
        out,
        "{}Total traffic{}  : {}{}{}",
        colors.label,
        colors.reset,
        colors.number,
        format_bytes(snapshot.total_bytes as f64),
        colors.reset
    )?;
    if let Some(average) = average_response_size(snapshot) {
        writeln!(
            out,
            "{}Average size{}   : {}{}{}",
            colors.label,
            colors.reset,
            colors.number,
            format_bytes(average),
            colors.reset
        )?;
    }

    render_ranked_section(
        out,
        &format!("Top {} client IPs", config.top_n),
        top_n(&snapshot.ip_counts, config.top_n),
        snapshot.total_requests,
        colors,
    )?;
    render_ranked_section(
        out,
        "Status code distribution",
        sorted_by_key(&snapshot.status_counts),
        snapshot.total_requests,
        colors,
    )?;
    render_ranked_section(
        out,
        "Method distribution",
        top_n(&snapshot.method_counts, snapshot.method_counts.len()),
        snapshot.total_requests,
        colors,
    )?;
    render_ranked_section(
        out,
        &format!("Top {} paths", config.top_n),
        top_n(&snapshot.path_counts, config.top_n),
        snapshot.total_requests,
        colors,
    )?;
    render_ranked_section(
        out,
        "Requests by hour",
        sorted_by_key(&snapshot.hour_counts),
        snapshot.total_requests,
        colors,
    )?;

    Ok(())
}

fn render_ranked_section<W: Write>(
    out: &mut W,
    title: &str,
    entries: Vec<(&str, u64)>,
    total: u64,
    colors: &ColorScheme,
) -> std::io::Result<()> {
    writeln!(out, "\n{}--- {} ---{}", colors.heading, title, colors.reset)?;
    for (key, count) in entries {
        writeln!(
            out,
            "{}{:<24}{} : {}{:<6}{} ({}{:.1}%{})",
            colors.label,
            key,
            colors.reset,
            colors.number,
            count,
            colors.reset,
            colors.percent,
            percentage(count, total),
            colors.reset
        )?;
    }
    Ok(())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    snapshot: &'a AggregateSnapshot,
    average_response_size: Option<f64>,
    total_traffic_human: String,
    average_size_human: Option<String>,
}

/// JSON export of the snapshot plus derived metrics. Counter key
/// order is preserved in the output.
pub fn render_json<W: Write>(out: &mut W, snapshot: &AggregateSnapshot) -> std::io::Result<()> {
    let average = average_response_size(snapshot);
    let report = JsonReport {
        snapshot,
        average_response_size: average,
        total_traffic_human: format_bytes(snapshot.total_bytes as f64),
        average_size_human: average.map(format_bytes),
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}
