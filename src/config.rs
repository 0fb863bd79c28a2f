//! Analysis configuration
//!
//! Numeric settings for the preprocessor and distraction detector. These were
//! once global constants; they are an explicit value passed into each call so
//! concurrent sessions can run with different settings.

use crate::error::AnalyticsError;
use serde::{Deserialize, Serialize};

/// Default smoothing window (samples). Must be odd for true centering.
pub const DEFAULT_SMOOTHING_WINDOW: usize = 5;

/// Default nominal frame interval (seconds), substituted when consecutive
/// samples share a timestamp. Matches a 25 Hz capture rate.
pub const DEFAULT_NOMINAL_FRAME_INTERVAL_SEC: f64 = 0.04;

/// Default minimum duration (seconds) for an off-screen run to count as a
/// distraction. Shorter runs are discarded as noise. The 1.0 s default is
/// deliberately well above blink length; deployments that only want to drop
/// blinks (~100-150 ms) can lower it to ~0.2 s.
pub const DEFAULT_MIN_DISTRACTION_DURATION_SEC: f64 = 1.0;

/// Tunable settings for one analysis run
///
/// Capture frame rate and blink/noise characteristics vary by hardware, so
/// all three knobs are externally configurable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Centered moving-average window for coordinate smoothing (samples).
    /// Must be a positive odd integer; even values bias the window.
    pub smoothing_window: usize,
    /// Fallback time delta (seconds) when consecutive timestamps are equal
    pub nominal_frame_interval_sec: f64,
    /// Off-screen runs shorter than this (seconds) are filtered out as noise.
    /// The comparison is inclusive: a run of exactly this duration counts.
    pub min_distraction_duration_sec: f64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            smoothing_window: DEFAULT_SMOOTHING_WINDOW,
            nominal_frame_interval_sec: DEFAULT_NOMINAL_FRAME_INTERVAL_SEC,
            min_distraction_duration_sec: DEFAULT_MIN_DISTRACTION_DURATION_SEC,
        }
    }
}

impl AnalyticsConfig {
    /// Validate the configuration, returning a typed error on bad values
    pub fn validate(&self) -> Result<(), AnalyticsError> {
        if self.smoothing_window == 0 {
            return Err(AnalyticsError::InvalidConfig(
                "smoothing_window must be positive".to_string(),
            ));
        }
        if self.smoothing_window % 2 == 0 {
            return Err(AnalyticsError::InvalidConfig(format!(
                "smoothing_window must be odd for a centered window, got {}",
                self.smoothing_window
            )));
        }
        if !(self.nominal_frame_interval_sec > 0.0) {
            return Err(AnalyticsError::InvalidConfig(
                "nominal_frame_interval_sec must be positive".to_string(),
            ));
        }
        if !(self.min_distraction_duration_sec >= 0.0) {
            return Err(AnalyticsError::InvalidConfig(
                "min_distraction_duration_sec must be non-negative".to_string(),
            ));
        }
        Ok(())
    }
}
