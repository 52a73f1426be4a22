// src/parser.rs
use crate::error::AnalysisError;

/// Sentinel used when the request field cannot be split into
/// method / path / protocol.
pub const UNKNOWN: &str = "UNKNOWN";

/// Hour used when the timestamp has no embedded time-of-day.
const FALLBACK_HOUR: &str = "00";

/// One successfully parsed access-log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub client_ip: String,
    pub timestamp_raw: String,
    /// Second `:`-delimited segment of the timestamp ("00" fallback).
    pub hour: String,
    pub method: String,
    pub path: String,
    /// Raw captured digit run. The source format does not bound-check
    /// status codes, so neither do we.
    pub status_code: String,
    pub response_size: u64,
}

/// Outcome of a single parse attempt.
#[derive(Debug)]
pub enum ParseOutcome {
    /// The line matched the grammar end-to-end.
    Record(LogRecord),
    /// The line did not match and contributes nothing.
    Skip,
}

impl ParseOutcome {
    pub fn is_skip(&self) -> bool {
        matches!(self, ParseOutcome::Skip)
    }
}

/// Parse one trimmed line against the Common Log Format grammar:
///
/// `<ip> - - [<timestamp>] "<request>" <status> <size>`
///
/// `<timestamp>` and `<request>` end at the first closing delimiter.
/// Requests containing literal quotes therefore fail to match, which
/// follows CLF convention for well-formed logs. The whole line must
/// match; anything else yields `Skip`.
///
/// The only error is a size field whose digits do not fit in a u64.
pub fn parse_line(line: &str, line_number: usize) -> Result<ParseOutcome, AnalysisError> {
    if line.is_empty() {
        return Ok(ParseOutcome::Skip);
    }

    // <ip>: maximal non-whitespace run, then the literal " - - [".
    let Some(ip_end) = line.find(char::is_whitespace) else {
        return Ok(ParseOutcome::Skip);
    };
    let client_ip = &line[..ip_end];
    if client_ip.is_empty() {
        return Ok(ParseOutcome::Skip);
    }
    let Some(rest) = line[ip_end..].strip_prefix(" - - [") else {
        return Ok(ParseOutcome::Skip);
    };

    // <timestamp>: up to the first ']'.
    let Some(ts_end) = rest.find(']') else {
        return Ok(ParseOutcome::Skip);
    };
    let timestamp_raw = &rest[..ts_end];
    let Some(rest) = rest[ts_end + 1..].strip_prefix(" \"") else {
        return Ok(ParseOutcome::Skip);
    };

    // <request>: up to the first '"'.
    let Some(req_end) = rest.find('"') else {
        return Ok(ParseOutcome::Skip);
    };
    let request = &rest[..req_end];
    let Some(rest) = rest[req_end + 1..].strip_prefix(' ') else {
        return Ok(ParseOutcome::Skip);
    };

    // <status> and <size>: digit runs, size must end the line.
    let (status_code, rest) = take_digits(rest);
    if status_code.is_empty() {
        return Ok(ParseOutcome::Skip);
    }
    let Some(rest) = rest.strip_prefix(' ') else {
        return Ok(ParseOutcome::Skip);
    };
    let (size_digits, rest) = take_digits(rest);
    if size_digits.is_empty() || !rest.is_empty() {
        return Ok(ParseOutcome::Skip);
    }

    let response_size =
        size_digits
            .parse::<u64>()
            .map_err(|source| AnalysisError::NumericFieldInvalid {
                value: size_digits.to_string(),
                line: line_number,
                source,
            })?;

    let (method, path) = split_request(request);

    Ok(ParseOutcome::Record(LogRecord {
        client_ip: client_ip.to_string(),
        timestamp_raw: timestamp_raw.to_string(),
        hour: extract_hour(timestamp_raw),
        method,
        path,
        status_code: status_code.to_string(),
        response_size,
    }))
}

/// Split off the leading ASCII digit run.
fn take_digits(s: &str) -> (&str, &str) {
    let end = s
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len());
    s.split_at(end)
}

/// Decompose the request field. Exactly three whitespace-separated
/// tokens give method / path / protocol (protocol discarded); any
/// other shape degrades to the UNKNOWN sentinels rather than failing
/// the whole line.
fn split_request(request: &str) -> (String, String) {
    let mut tokens = request.split_whitespace();
    match (tokens.next(), tokens.next(), tokens.next(), tokens.next()) {
        (Some(method), Some(path), Some(_protocol), None) => {
            (method.to_string(), path.to_string())
        }
        _ => (UNKNOWN.to_string(), UNKNOWN.to_string()),
    }
}

/// Hour component of `DD/Mon/YYYY:HH:MM:SS +ZZZZ` timestamps.
fn extract_hour(timestamp: &str) -> String {
    match timestamp.split(':').nth(1) {
        Some(hour) => hour.to_string(),
        None => FALLBACK_HOUR.to_string(),
    }
}
