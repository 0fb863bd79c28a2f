//! Gaze preprocessing
//!
//! Converts raw gaze samples into a time-aligned enriched series: elapsed
//! time, smoothed coordinates, first differences, and velocity. Pure
//! transformation over the whole session; no rows are dropped or reordered.

use crate::config::AnalyticsConfig;
use crate::error::AnalyticsError;
use crate::types::{EnrichedSample, GazeSample};

/// Preprocess a session's raw samples into the enriched series
///
/// Timeline rules:
/// - `time_sec` is relative to the first sample's timestamp.
/// - Smoothing is a centered moving average over `smoothing_window` samples;
///   rows within `window / 2` of either boundary keep their raw coordinates
///   rather than taking a partial average, which would damp the signal at the
///   timeline edges.
/// - `dx`/`dy`/`dt` are backward first differences; the first row's
///   differences are 0 and its `dt` is the nominal frame interval.
/// - A zero `dt` (repeated timestamp) is replaced by the nominal frame
///   interval rather than interpolated.
/// - `velocity` is 0 wherever `dt` is 0; division never panics.
///
/// Non-monotonic timestamps are not validated or repaired; behavior under
/// them is unspecified.
pub fn preprocess(
    samples: &[GazeSample],
    config: &AnalyticsConfig,
) -> Result<Vec<EnrichedSample>, AnalyticsError> {
    config.validate()?;

    if samples.is_empty() {
        return Ok(Vec::new());
    }

    let start_ts = samples[0].timestamp;
    let time_sec: Vec<f64> = samples
        .iter()
        .map(|s| (s.timestamp - start_ts) as f64 / 1000.0)
        .collect();

    let xs: Vec<f64> = samples.iter().map(|s| s.x).collect();
    let ys: Vec<f64> = samples.iter().map(|s| s.y).collect();
    let x_smooth = centered_moving_average(&xs, config.smoothing_window);
    let y_smooth = centered_moving_average(&ys, config.smoothing_window);

    let nominal = config.nominal_frame_interval_sec;
    let mut series = Vec::with_capacity(samples.len());

    for (i, sample) in samples.iter().enumerate() {
        let (dx, dy, dt) = if i == 0 {
            // No prior row: zero displacement, nominal interval.
            (0.0, 0.0, nominal)
        } else {
            let raw_dt = time_sec[i] - time_sec[i - 1];
            let dt = if raw_dt == 0.0 { nominal } else { raw_dt };
            (
                x_smooth[i] - x_smooth[i - 1],
                y_smooth[i] - y_smooth[i - 1],
                dt,
            )
        };

        let distance_px = dx.hypot(dy);
        let velocity = if dt == 0.0 { 0.0 } else { distance_px / dt };

        series.push(EnrichedSample {
            timestamp: sample.timestamp,
            on_screen: sample.on_screen,
            x: sample.x,
            y: sample.y,
            time_sec: time_sec[i],
            x_smooth: x_smooth[i],
            y_smooth: y_smooth[i],
            dx,
            dy,
            dt,
            distance_px,
            velocity,
        });
    }

    Ok(series)
}

/// Centered moving average with raw-value fallback at the boundaries
///
/// A row only gets an averaged value when a full window of neighbors exists
/// on both sides; otherwise the raw value is kept.
fn centered_moving_average(values: &[f64], window: usize) -> Vec<f64> {
    let half = window / 2;
    let n = values.len();

    values
        .iter()
        .enumerate()
        .map(|(i, &raw)| {
            if i >= half && i + half < n {
                let slice = &values[i - half..=i + half];
                slice.iter().sum::<f64>() / window as f64
            } else {
                raw
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample(timestamp: i64, x: f64, y: f64) -> GazeSample {
        GazeSample {
            timestamp,
            x,
            y,
            on_screen: Some(true),
        }
    }

    #[test]
    fn test_empty_input_yields_empty_series() {
        let series = preprocess(&[], &AnalyticsConfig::default()).unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn test_invalid_config_is_a_typed_error() {
        let config = AnalyticsConfig {
            smoothing_window: 2,
            ..Default::default()
        };
        let result = preprocess(&[sample(0, 1.0, 1.0)], &config);
        assert!(matches!(result, Err(AnalyticsError::InvalidConfig(_))));
    }

    #[test]
    fn test_length_and_order_preserved() {
        let samples: Vec<GazeSample> = (0..20)
            .map(|i| sample(i * 40, i as f64 * 3.0, i as f64 * 2.0))
            .collect();
        let series = preprocess(&samples, &AnalyticsConfig::default()).unwrap();

        assert_eq!(series.len(), samples.len());
        for (row, input) in series.iter().zip(&samples) {
            assert_eq!(row.timestamp, input.timestamp);
        }
    }

    #[test]
    fn test_time_sec_relative_to_first_sample() {
        let samples = vec![sample(5000, 0.0, 0.0), sample(5040, 0.0, 0.0)];
        let series = preprocess(&samples, &AnalyticsConfig::default()).unwrap();

        assert_eq!(series[0].time_sec, 0.0);
        assert_eq!(series[1].time_sec, 0.04);
    }

    #[test]
    fn test_constant_signal_smooths_to_itself() {
        // Moving average of a constant is the constant, and boundary rows
        // fall back to the (identical) raw value.
        let samples: Vec<GazeSample> = (0..12).map(|i| sample(i * 40, 640.0, 360.0)).collect();
        let series = preprocess(&samples, &AnalyticsConfig::default()).unwrap();

        for row in &series {
            assert_eq!(row.x_smooth, 640.0);
            assert_eq!(row.y_smooth, 360.0);
        }
    }

    #[test]
    fn test_boundary_rows_keep_raw_coordinates() {
        let samples: Vec<GazeSample> = (0..9)
            .map(|i| sample(i * 40, (i * i) as f64, 0.0))
            .collect();
        let series = preprocess(&samples, &AnalyticsConfig::default()).unwrap();

        // Window 5: the first and last two rows have no full window.
        for i in [0, 1, 7, 8] {
            assert_eq!(series[i].x_smooth, samples[i].x);
        }
        // Interior row 4 averages x over indices 2..=6: (4+9+16+25+36)/5.
        assert_eq!(series[4].x_smooth, 18.0);
    }

    #[test]
    fn test_first_row_differences_are_zero() {
        let samples = vec![sample(0, 10.0, 20.0), sample(40, 13.0, 24.0)];
        let series = preprocess(&samples, &AnalyticsConfig::default()).unwrap();

        assert_eq!(series[0].dx, 0.0);
        assert_eq!(series[0].dy, 0.0);
        assert_eq!(series[0].distance_px, 0.0);
        assert_eq!(series[0].velocity, 0.0);
        assert_eq!(series[0].dt, 0.04);
    }

    #[test]
    fn test_velocity_from_displacement_and_dt() {
        // Two samples 100 ms apart moving a 3-4-5 step: 5 px / 0.1 s.
        let samples = vec![sample(0, 0.0, 0.0), sample(100, 3.0, 4.0)];
        let series = preprocess(&samples, &AnalyticsConfig::default()).unwrap();

        assert_eq!(series[1].distance_px, 5.0);
        assert!((series[1].velocity - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_repeated_timestamp_uses_nominal_interval() {
        let samples = vec![
            sample(0, 0.0, 0.0),
            sample(40, 1.0, 0.0),
            sample(40, 2.0, 0.0),
        ];
        let series = preprocess(&samples, &AnalyticsConfig::default()).unwrap();

        assert_eq!(series[2].dt, 0.04);
        assert!(series[2].velocity.is_finite());
    }

    #[test]
    fn test_velocity_never_nan() {
        let samples: Vec<GazeSample> =
            (0..50).map(|i| sample(i * 40, i as f64, -i as f64)).collect();
        let series = preprocess(&samples, &AnalyticsConfig::default()).unwrap();

        assert!(series.iter().all(|row| row.velocity.is_finite()));
    }

    #[test]
    fn test_single_sample_session() {
        let series = preprocess(&[sample(100, 5.0, 6.0)], &AnalyticsConfig::default()).unwrap();

        assert_eq!(series.len(), 1);
        assert_eq!(series[0].time_sec, 0.0);
        assert_eq!(series[0].x_smooth, 5.0);
        assert_eq!(series[0].velocity, 0.0);
    }

    #[test]
    fn test_window_one_is_identity_smoothing() {
        let config = AnalyticsConfig {
            smoothing_window: 1,
            ..Default::default()
        };
        let samples: Vec<GazeSample> = (0..5)
            .map(|i| sample(i * 40, (i * 7) as f64, (i * 3) as f64))
            .collect();
        let series = preprocess(&samples, &config).unwrap();

        for (row, input) in series.iter().zip(&samples) {
            assert_eq!(row.x_smooth, input.x);
            assert_eq!(row.y_smooth, input.y);
        }
    }
}
