//! Gaze Analytics - batch analytics engine for eye-gaze session data
//!
//! Processes a complete, already-collected session of gaze samples through a
//! deterministic pipeline: preprocessing (smoothed trajectories, velocity) →
//! distraction detection (off-screen interval scan, noise filtering) →
//! report encoding.
//!
//! ## Modules
//!
//! - **Preprocessor**: raw samples → time-aligned enriched series
//! - **Distraction Detector**: on-screen signal → distraction summary
//! - **Pipeline**: session JSON → report JSON orchestration

pub mod config;
pub mod distraction;
pub mod error;
pub mod pipeline;
pub mod preprocess;
pub mod report;
pub mod types;

pub use config::AnalyticsConfig;
pub use distraction::detect_distractions;
pub use error::AnalyticsError;
pub use pipeline::{gaze_to_report, parse_samples, GazeAnalyzer};
pub use preprocess::preprocess;
pub use report::{ReportEncoder, SessionReport};
pub use types::{DistractionSummary, EnrichedSample, GazePoint, GazeSample};

/// Crate version embedded in all session reports
pub const GAZE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for session reports
pub const PRODUCER_NAME: &str = "gaze-analytics";
