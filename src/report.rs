//! Session report encoding
//!
//! Bundles the distraction summary with producer and provenance metadata into
//! the report payload handed to downstream consumers (dashboards, report
//! generators). Plot generation lives with those consumers, not here.

use crate::error::AnalyticsError;
use crate::types::{DistractionSummary, EnrichedSample};
use crate::{GAZE_VERSION, PRODUCER_NAME};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Current report schema version
pub const REPORT_VERSION: &str = "1.0.0";

/// Producer metadata embedded in every report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportProducer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// Report provenance information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportProvenance {
    /// First sample timestamp (milliseconds), absent for empty sessions
    pub session_start_ms: Option<i64>,
    /// Last sample timestamp (milliseconds), absent for empty sessions
    pub session_end_ms: Option<i64>,
    /// When this report was computed (RFC 3339 UTC)
    pub computed_at_utc: String,
}

/// Complete analytics report for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    pub report_version: String,
    pub producer: ReportProducer,
    pub provenance: ReportProvenance,
    /// Number of gaze samples analyzed
    pub sample_count: usize,
    /// Session timespan in seconds (0 for empty sessions)
    pub session_duration_sec: f64,
    /// Distraction metrics
    pub metrics: DistractionSummary,
}

/// Session report encoder
pub struct ReportEncoder {
    instance_id: String,
}

impl Default for ReportEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportEncoder {
    /// Create a new encoder with a unique instance ID
    pub fn new() -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create an encoder with a specific instance ID
    pub fn with_instance_id(instance_id: String) -> Self {
        Self { instance_id }
    }

    /// Encode an analyzed session into a report payload
    pub fn encode(&self, series: &[EnrichedSample], metrics: DistractionSummary) -> SessionReport {
        let producer = ReportProducer {
            name: PRODUCER_NAME.to_string(),
            version: GAZE_VERSION.to_string(),
            instance_id: self.instance_id.clone(),
        };

        let provenance = ReportProvenance {
            session_start_ms: series.first().map(|row| row.timestamp),
            session_end_ms: series.last().map(|row| row.timestamp),
            computed_at_utc: Utc::now().to_rfc3339(),
        };

        let session_duration_sec = series.last().map(|row| row.time_sec).unwrap_or(0.0);

        SessionReport {
            report_version: REPORT_VERSION.to_string(),
            producer,
            provenance,
            sample_count: series.len(),
            session_duration_sec,
            metrics,
        }
    }

    /// Encode to a JSON string
    pub fn encode_to_json(
        &self,
        series: &[EnrichedSample],
        metrics: DistractionSummary,
    ) -> Result<String, AnalyticsError> {
        let report = self.encode(series, metrics);
        Ok(serde_json::to_string(&report)?)
    }
}
