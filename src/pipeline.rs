//! Pipeline orchestration
//!
//! Public API for session analysis. Orchestrates the full pipeline from a raw
//! gaze sample array to a session report: parse → preprocess → detect →
//! encode.

use crate::config::AnalyticsConfig;
use crate::distraction::detect_distractions;
use crate::error::AnalyticsError;
use crate::preprocess::preprocess;
use crate::report::{ReportEncoder, SessionReport};
use crate::types::GazeSample;

/// Parse a JSON array of gaze samples
pub fn parse_samples(json: &str) -> Result<Vec<GazeSample>, AnalyticsError> {
    serde_json::from_str(json)
        .map_err(|e| AnalyticsError::ParseError(format!("Failed to parse gaze samples: {}", e)))
}

/// Analyze a session's gaze sample JSON and return the report JSON
/// (stateless, default configuration).
///
/// An empty sample array is a valid session and produces a zero-valued
/// report.
pub fn gaze_to_report(session_json: &str) -> Result<String, AnalyticsError> {
    GazeAnalyzer::new().analyze_json(session_json)
}

/// Session analyzer holding a configuration and report encoder
///
/// Sessions are independent values; the analyzer keeps no per-session state
/// and can be reused across sessions.
pub struct GazeAnalyzer {
    config: AnalyticsConfig,
    encoder: ReportEncoder,
}

impl Default for GazeAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl GazeAnalyzer {
    /// Create an analyzer with the default configuration
    pub fn new() -> Self {
        Self::with_config(AnalyticsConfig::default())
    }

    /// Create an analyzer with a specific configuration
    pub fn with_config(config: AnalyticsConfig) -> Self {
        Self {
            config,
            encoder: ReportEncoder::new(),
        }
    }

    /// The configuration this analyzer runs with
    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Analyze parsed samples into a session report
    pub fn analyze(&self, samples: &[GazeSample]) -> Result<SessionReport, AnalyticsError> {
        // Stage 1: enrich the raw series
        let series = preprocess(samples, &self.config)?;

        // Stage 2: distraction metrics
        let summary = detect_distractions(&series, &self.config);

        // Stage 3: encode the report
        Ok(self.encoder.encode(&series, summary))
    }

    /// Analyze a gaze sample JSON array and return the report JSON
    pub fn analyze_json(&self, session_json: &str) -> Result<String, AnalyticsError> {
        let samples = parse_samples(session_json)?;
        let report = self.analyze(&samples)?;
        Ok(serde_json::to_string(&report)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_session_json() -> &'static str {
        r#"[
            {"timestamp": 0,    "x": 640.0, "y": 360.0, "on_screen": true},
            {"timestamp": 40,   "x": 642.5, "y": 361.0, "on_screen": true},
            {"timestamp": 80,   "x": 900.0, "y": 10.0,  "on_screen": false},
            {"timestamp": 120,  "x": 905.0, "y": 8.0,   "on_screen": false},
            {"timestamp": 160,  "x": 910.0, "y": 6.0,   "on_screen": false},
            {"timestamp": 2400, "x": 700.0, "y": 300.0, "on_screen": false},
            {"timestamp": 2440, "x": 645.0, "y": 362.0, "on_screen": true}
        ]"#
    }

    #[test]
    fn test_gaze_to_report_stateless() {
        let json = gaze_to_report(sample_session_json()).unwrap();
        let report: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(report["report_version"], "1.0.0");
        assert_eq!(report["producer"]["name"], "gaze-analytics");
        assert_eq!(report["sample_count"], 7);
        assert_eq!(report["session_duration_sec"], 2.44);

        assert_eq!(report["metrics"]["num_distractions"], 1);
        assert_eq!(report["metrics"]["total_distraction_duration_sec"], 2.36);
        assert_eq!(report["metrics"]["avg_distraction_duration_sec"], 2.36);
    }

    #[test]
    fn test_analyzer_with_custom_config() {
        let analyzer = GazeAnalyzer::with_config(AnalyticsConfig {
            min_distraction_duration_sec: 3.0,
            ..Default::default()
        });
        let samples = parse_samples(sample_session_json()).unwrap();
        let report = analyzer.analyze(&samples).unwrap();

        // The 2.36 s run falls under the raised threshold.
        assert_eq!(report.metrics.num_distractions, 0);
    }

    #[test]
    fn test_empty_session_is_a_zero_valued_report() {
        let json = gaze_to_report("[]").unwrap();
        let report: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(report["sample_count"], 0);
        assert_eq!(report["session_duration_sec"], 0.0);
        assert_eq!(report["metrics"]["num_distractions"], 0);
    }

    #[test]
    fn test_invalid_json_is_a_parse_error() {
        let result = gaze_to_report("not valid json");
        assert!(matches!(result, Err(AnalyticsError::ParseError(_))));
    }

    #[test]
    fn test_samples_without_on_screen_flag() {
        let json = r#"[
            {"timestamp": 0,  "x": 1.0, "y": 2.0},
            {"timestamp": 40, "x": 3.0, "y": 4.0}
        ]"#;
        let report_json = gaze_to_report(json).unwrap();
        let report: serde_json::Value = serde_json::from_str(&report_json).unwrap();

        assert_eq!(report["sample_count"], 2);
        assert_eq!(report["metrics"]["num_distractions"], 0);
    }

    #[test]
    fn test_invalid_config_surfaces_from_analyze() {
        let analyzer = GazeAnalyzer::with_config(AnalyticsConfig {
            smoothing_window: 6,
            ..Default::default()
        });
        let samples = parse_samples(sample_session_json()).unwrap();
        assert!(matches!(
            analyzer.analyze(&samples),
            Err(AnalyticsError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_analyzer_reusable_across_sessions() {
        let analyzer = GazeAnalyzer::new();
        let samples = parse_samples(sample_session_json()).unwrap();

        let first = analyzer.analyze(&samples).unwrap();
        let second = analyzer.analyze(&samples).unwrap();

        assert_eq!(first.metrics, second.metrics);
        assert_eq!(
            first.producer.instance_id,
            second.producer.instance_id
        );
    }
}
