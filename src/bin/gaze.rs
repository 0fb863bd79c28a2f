//! Gaze CLI - command-line interface for gaze session analytics
//!
//! Commands:
//! - analyze: Produce a distraction report from a session file
//! - preprocess: Dump the enriched kinematic series
//! - validate: Check a session file against the sample schema

use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use gaze_analytics::config::{
    DEFAULT_MIN_DISTRACTION_DURATION_SEC, DEFAULT_NOMINAL_FRAME_INTERVAL_SEC,
    DEFAULT_SMOOTHING_WINDOW,
};
use gaze_analytics::{
    parse_samples, preprocess, AnalyticsConfig, AnalyticsError, GazeAnalyzer, GAZE_VERSION,
};

/// Gaze - batch analytics for eye-gaze session data
#[derive(Parser)]
#[command(name = "gaze")]
#[command(version = GAZE_VERSION)]
#[command(about = "Analyze eye-gaze sessions for distraction metrics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Produce a distraction report from a session file
    Analyze {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Smoothing window in samples (positive odd integer)
        #[arg(long, default_value_t = DEFAULT_SMOOTHING_WINDOW)]
        window: usize,

        /// Minimum off-screen duration in seconds to count as a distraction
        #[arg(long, default_value_t = DEFAULT_MIN_DISTRACTION_DURATION_SEC)]
        threshold: f64,

        /// Nominal frame interval in seconds (zero-delta fallback)
        #[arg(long, default_value_t = DEFAULT_NOMINAL_FRAME_INTERVAL_SEC)]
        frame_interval: f64,

        /// Pretty-print the report JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Dump the enriched kinematic series as JSON
    Preprocess {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Smoothing window in samples (positive odd integer)
        #[arg(long, default_value_t = DEFAULT_SMOOTHING_WINDOW)]
        window: usize,

        /// Pretty-print the series JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Check a session file against the sample schema
    Validate {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output the validation report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), GazeCliError> {
    match cli.command {
        Commands::Analyze {
            input,
            output,
            window,
            threshold,
            frame_interval,
            pretty,
        } => cmd_analyze(&input, &output, window, threshold, frame_interval, pretty),

        Commands::Preprocess {
            input,
            output,
            window,
            pretty,
        } => cmd_preprocess(&input, &output, window, pretty),

        Commands::Validate { input, json } => cmd_validate(&input, json),
    }
}

fn cmd_analyze(
    input: &Path,
    output: &Path,
    window: usize,
    threshold: f64,
    frame_interval: f64,
    pretty: bool,
) -> Result<(), GazeCliError> {
    let input_data = read_input(input)?;
    let samples = parse_samples(&input_data)?;

    let config = AnalyticsConfig {
        smoothing_window: window,
        nominal_frame_interval_sec: frame_interval,
        min_distraction_duration_sec: threshold,
    };
    let analyzer = GazeAnalyzer::with_config(config);
    let report = analyzer.analyze(&samples)?;

    let json = if pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    write_output(output, &json)
}

fn cmd_preprocess(
    input: &Path,
    output: &Path,
    window: usize,
    pretty: bool,
) -> Result<(), GazeCliError> {
    let input_data = read_input(input)?;
    let samples = parse_samples(&input_data)?;

    let config = AnalyticsConfig {
        smoothing_window: window,
        ..Default::default()
    };
    let series = preprocess(&samples, &config)?;

    let json = if pretty {
        serde_json::to_string_pretty(&series)?
    } else {
        serde_json::to_string(&series)?
    };
    write_output(output, &json)
}

fn cmd_validate(input: &Path, json: bool) -> Result<(), GazeCliError> {
    let input_data = read_input(input)?;
    let samples = parse_samples(&input_data)?;

    let with_flag = samples.iter().filter(|s| s.on_screen.is_some()).count();
    let non_monotonic = samples
        .windows(2)
        .filter(|pair| pair[1].timestamp < pair[0].timestamp)
        .count();

    let report = ValidationReport {
        total_samples: samples.len(),
        samples_with_on_screen_flag: with_flag,
        non_monotonic_steps: non_monotonic,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Validation Report");
        println!("=================");
        println!("Total samples:        {}", report.total_samples);
        println!(
            "With on-screen flag:  {}",
            report.samples_with_on_screen_flag
        );
        println!("Non-monotonic steps:  {}", report.non_monotonic_steps);

        if report.samples_with_on_screen_flag < report.total_samples {
            println!("\nNote: samples without the on_screen flag disable distraction metrics.");
        }
    }

    if non_monotonic > 0 {
        Err(GazeCliError::NonMonotonic(non_monotonic))
    } else {
        Ok(())
    }
}

// Helper functions

fn read_input(input: &Path) -> Result<String, GazeCliError> {
    if input.to_string_lossy() == "-" {
        if atty::is(atty::Stream::Stdin) {
            eprintln!("Reading session JSON from terminal; pipe a file or press Ctrl-D to end.");
        }
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

fn write_output(output: &Path, data: &str) -> Result<(), GazeCliError> {
    if output.to_string_lossy() == "-" {
        let mut stdout = io::stdout();
        writeln!(stdout, "{}", data)?;
        Ok(())
    } else {
        fs::write(output, data)?;
        Ok(())
    }
}

#[derive(serde::Serialize)]
struct ValidationReport {
    total_samples: usize,
    samples_with_on_screen_flag: usize,
    non_monotonic_steps: usize,
}

// Error types

#[derive(Debug)]
enum GazeCliError {
    Io(io::Error),
    Analytics(AnalyticsError),
    Json(serde_json::Error),
    NonMonotonic(usize),
}

impl From<io::Error> for GazeCliError {
    fn from(e: io::Error) -> Self {
        GazeCliError::Io(e)
    }
}

impl From<AnalyticsError> for GazeCliError {
    fn from(e: AnalyticsError) -> Self {
        GazeCliError::Analytics(e)
    }
}

impl From<serde_json::Error> for GazeCliError {
    fn from(e: serde_json::Error) -> Self {
        GazeCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<GazeCliError> for CliError {
    fn from(e: GazeCliError) -> Self {
        match e {
            GazeCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            GazeCliError::Analytics(e) => CliError {
                code: "ANALYTICS_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Run 'gaze validate' on the input file".to_string()),
            },
            GazeCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            GazeCliError::NonMonotonic(count) => CliError {
                code: "NON_MONOTONIC".to_string(),
                message: format!("{} timestamp steps go backwards", count),
                hint: Some("Sort samples by timestamp upstream before analysis".to_string()),
            },
        }
    }
}
