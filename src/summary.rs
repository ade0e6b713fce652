//! Aggregation of result files.
//!
//! Reads lines of the form `n timeSeconds bestCost bestParenthesization` and
//! reports, per chain length, how many samples were seen and their mean,
//! minimum and maximum solve time. Lines whose `n` or time do not parse are
//! skipped.

use std::collections::BTreeMap;
use std::io::BufRead;

use serde::Serialize;
use tracing::debug;

/// Timing statistics for one chain length.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AverageTime {
    pub n: usize,
    pub samples: usize,
    pub mean_s: f64,
    pub min_s: f64,
    pub max_s: f64,
}

/// Per-n timings for one result file.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TimingSummary {
    pub label: String,
    pub rows: Vec<AverageTime>,
    /// Lines that could not be interpreted.
    pub skipped_lines: usize,
}

impl TimingSummary {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Extract `(n, seconds)` from a result line.
pub fn parse_timing(line: &str) -> Option<(usize, f64)> {
    let mut parts = line.split_whitespace();
    let n = parts.next()?.parse().ok()?;
    let t = parts.next()?.parse().ok()?;
    // the cost column must be present even though it is not aggregated
    parts.next()?;
    Some((n, t))
}

/// Group the timings found in `reader` by `n`, in ascending order of `n`.
pub fn summarize<R: BufRead>(label: impl Into<String>, reader: R) -> std::io::Result<TimingSummary> {
    let mut by_n: BTreeMap<usize, Vec<f64>> = BTreeMap::new();
    let mut skipped_lines = 0;
    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_timing(&line) {
            Some((n, t)) => by_n.entry(n).or_default().push(t),
            None => {
                debug!(line = line_no + 1, "skipping malformed result line");
                skipped_lines += 1;
            }
        }
    }

    let rows = by_n
        .into_iter()
        .map(|(n, times)| {
            let samples = times.len();
            let sum: f64 = times.iter().sum();
            let min_s = times.iter().copied().fold(f64::INFINITY, f64::min);
            let max_s = times.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            AverageTime {
                n,
                samples,
                mean_s: sum / samples as f64,
                min_s,
                max_s,
            }
        })
        .collect();

    Ok(TimingSummary {
        label: label.into(),
        rows,
        skipped_lines,
    })
}
