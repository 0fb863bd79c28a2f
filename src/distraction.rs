//! Distraction detection
//!
//! Scans the on-screen signal for maximal contiguous off-screen runs, drops
//! runs shorter than the configured noise threshold, and aggregates the
//! survivors into a summary. Total function: empty input and a missing
//! on-screen signal both yield the zero-valued summary, never an error.

use crate::config::AnalyticsConfig;
use crate::types::{DistractionInterval, DistractionSummary, GazePoint};

/// Detect distraction periods in a gaze series
///
/// Works on any series exposing a timestamp and on-screen flag (raw samples
/// or enriched rows). Interval scan:
/// 1. on→off transitions open candidate intervals, off→on transitions close
///    them.
/// 2. A timeline that begins off-screen gets a synthesized start at index 0;
///    one that ends off-screen gets a synthesized end at the last index.
/// 3. Starts pair with ends positionally up to `min(starts, ends)`; unmatched
///    trailing starts are silently dropped. Given the boundary correction
///    that can only happen on anomalous input, but the truncation is the
///    documented behavior.
/// 4. Intervals shorter than `min_distraction_duration_sec` are discarded as
///    noise (blinks, tracker dropouts). The comparison is inclusive: a run of
///    exactly the threshold duration counts.
///
/// Summary durations are rounded to 2 decimal places; aggregation happens at
/// full precision first.
pub fn detect_distractions<P: GazePoint>(
    series: &[P],
    config: &AnalyticsConfig,
) -> DistractionSummary {
    if series.is_empty() {
        return DistractionSummary::zero();
    }

    // The signal is only usable when every row carries the flag.
    let flags: Option<Vec<bool>> = series.iter().map(|p| p.on_screen()).collect();
    let flags = match flags {
        Some(flags) => flags,
        None => return DistractionSummary::zero(),
    };

    let intervals = scan_intervals(series, &flags);

    let durations: Vec<f64> = intervals
        .iter()
        .map(DistractionInterval::duration_sec)
        .filter(|&d| d >= config.min_distraction_duration_sec)
        .collect();

    if durations.is_empty() {
        return DistractionSummary::zero();
    }

    let count = durations.len();
    let total: f64 = durations.iter().sum();
    let avg = total / count as f64;

    DistractionSummary {
        num_distractions: count as u32,
        total_distraction_duration_sec: round2(total),
        avg_distraction_duration_sec: round2(avg),
    }
}

/// Collect maximal off-screen runs as timestamp intervals
fn scan_intervals<P: GazePoint>(series: &[P], flags: &[bool]) -> Vec<DistractionInterval> {
    let mut starts: Vec<usize> = Vec::new();
    let mut ends: Vec<usize> = Vec::new();

    for i in 1..flags.len() {
        match (flags[i - 1], flags[i]) {
            (true, false) => starts.push(i),
            (false, true) => ends.push(i),
            _ => {}
        }
    }

    // Boundary correction: a timeline already off-screen at either end has no
    // transition marking that run's edge.
    if !flags[0] && starts.first() != Some(&0) {
        starts.insert(0, 0);
    }
    if !flags[flags.len() - 1] {
        ends.push(flags.len() - 1);
    }

    // Positional pairing; any unmatched trailing starts are dropped.
    starts
        .iter()
        .zip(ends.iter())
        .map(|(&start, &end)| DistractionInterval {
            start_ms: series[start].timestamp_ms(),
            end_ms: series[end].timestamp_ms(),
        })
        .collect()
}

/// Round to 2 decimal places, applied only at output time
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
