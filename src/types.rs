//! Core types for the gaze analytics pipeline
//!
//! This module defines the data structures that flow through each stage of the
//! pipeline: raw gaze samples, the enriched kinematic series, and the
//! distraction summary.

use serde::{Deserialize, Serialize};

/// A single raw gaze sample as captured by the tracker
///
/// Field names and types are the wire contract with the upstream capture
/// component. Samples arrive in timeline order; ordering is significant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GazeSample {
    /// Capture timestamp in milliseconds (monotonic, non-decreasing)
    pub timestamp: i64,
    /// Horizontal gaze position in screen pixels
    pub x: f64,
    /// Vertical gaze position in screen pixels
    pub y: f64,
    /// Whether the gaze point fell within the monitored display region.
    /// Optional on the wire; a series without this flag yields a zero-valued
    /// distraction summary.
    #[serde(default)]
    pub on_screen: Option<bool>,
}

/// One row of the enriched series produced by the preprocessor
///
/// Same order and count as the input samples; no rows are dropped or
/// reordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedSample {
    /// Original capture timestamp (milliseconds)
    pub timestamp: i64,
    /// Original on-screen flag, carried through for the detector
    pub on_screen: Option<bool>,
    /// Raw horizontal position (pixels)
    pub x: f64,
    /// Raw vertical position (pixels)
    pub y: f64,
    /// Elapsed seconds since the first sample (first row is 0)
    pub time_sec: f64,
    /// Centered moving average of `x`; raw value near timeline boundaries
    pub x_smooth: f64,
    /// Centered moving average of `y`; raw value near timeline boundaries
    pub y_smooth: f64,
    /// First difference of `x_smooth` (first row is 0)
    pub dx: f64,
    /// First difference of `y_smooth` (first row is 0)
    pub dy: f64,
    /// First difference of `time_sec`; zero deltas are replaced by the
    /// nominal frame interval
    pub dt: f64,
    /// Euclidean norm of `(dx, dy)` in pixels
    pub distance_px: f64,
    /// `distance_px / dt`, 0 wherever `dt` is 0
    pub velocity: f64,
}

/// A maximal contiguous off-screen run, bounded by the timestamps of its
/// first and last sample. Intermediate value; never serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistractionInterval {
    pub start_ms: i64,
    pub end_ms: i64,
}

impl DistractionInterval {
    /// Interval duration in seconds
    pub fn duration_sec(&self) -> f64 {
        (self.end_ms - self.start_ms) as f64 / 1000.0
    }
}

/// Aggregated distraction metrics for one session
///
/// Key names are the schema contract with downstream consumers (report
/// generators, dashboards) and must stay stable. Durations are rounded to
/// 2 decimal places at output time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistractionSummary {
    /// Count of distinct distraction periods surviving the noise filter
    pub num_distractions: u32,
    /// Total time spent distracted (seconds)
    pub total_distraction_duration_sec: f64,
    /// Average duration per distraction (seconds); 0 when there are none
    pub avg_distraction_duration_sec: f64,
}

impl DistractionSummary {
    /// The zero-valued summary returned for empty or signal-less input
    pub fn zero() -> Self {
        Self {
            num_distractions: 0,
            total_distraction_duration_sec: 0.0,
            avg_distraction_duration_sec: 0.0,
        }
    }
}

impl Default for DistractionSummary {
    fn default() -> Self {
        Self::zero()
    }
}

/// Minimal view the distraction detector needs from a series row
///
/// Implemented by both raw samples and enriched rows, so the detector can run
/// on either side of the preprocessor.
pub trait GazePoint {
    /// Capture timestamp in milliseconds
    fn timestamp_ms(&self) -> i64;
    /// On-screen flag, if the capture supplied one
    fn on_screen(&self) -> Option<bool>;
}

impl GazePoint for GazeSample {
    fn timestamp_ms(&self) -> i64 {
        self.timestamp
    }

    fn on_screen(&self) -> Option<bool> {
        self.on_screen
    }
}

impl GazePoint for EnrichedSample {
    fn timestamp_ms(&self) -> i64 {
        self.timestamp
    }

    fn on_screen(&self) -> Option<bool> {
        self.on_screen
    }
}
