//! CLI argument definitions.

use crate::config::OutputFormat;
use crate::constants::gain;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Bird sound recognition with `BirdNET`, localized species names, and
/// image lookup.
#[derive(Debug, Parser)]
#[command(name = "birdglot")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Input audio files to analyze.
    pub inputs: Vec<PathBuf>,

    /// Common options for analysis.
    #[command(flatten)]
    pub analyze: AnalyzeArgs,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Manage models.
    Models {
        /// Models action to perform.
        #[command(subcommand)]
        action: ModelsAction,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Models subcommand actions.
#[derive(Debug, Subcommand)]
pub enum ModelsAction {
    /// List configured models.
    List,
    /// Add a new model to configuration.
    Add {
        /// Name for this model (e.g., "birdnet-v24").
        name: String,
        /// Path to the ONNX model file.
        #[arg(long)]
        path: PathBuf,
        /// Path to the labels file.
        #[arg(long)]
        labels: PathBuf,
        /// Path to the range filter meta-model.
        #[arg(long)]
        meta_model: Option<PathBuf>,
        /// Set as the default model.
        #[arg(long)]
        default: bool,
    },
    /// Verify model files exist and are valid.
    Check,
}

/// Arguments for the analyze command.
#[derive(Debug, Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct AnalyzeArgs {
    /// Model name from configuration.
    #[arg(short, long, env = "BIRDGLOT_MODEL")]
    pub model: Option<String>,

    /// Output formats (comma-separated: csv,json).
    #[arg(short, long, value_delimiter = ',', env = "BIRDGLOT_FORMAT")]
    pub format: Option<Vec<OutputFormat>>,

    /// Minimum confidence threshold (0.0-1.0).
    #[arg(short = 'c', long, value_parser = parse_confidence, env = "BIRDGLOT_MIN_CONFIDENCE")]
    pub min_confidence: Option<f32>,

    /// Gain boost applied before analysis, in dB (0-30).
    #[arg(short, long, value_parser = parse_gain, env = "BIRDGLOT_GAIN")]
    pub gain: Option<f32>,

    /// Segment overlap in seconds.
    #[arg(long, env = "BIRDGLOT_OVERLAP")]
    pub overlap: Option<f32>,

    /// Inference batch size.
    #[arg(short, long, env = "BIRDGLOT_BATCH_SIZE")]
    pub batch_size: Option<usize>,

    /// Target language for common names (e.g., zh-CN, fi, de).
    #[arg(short, long, env = "BIRDGLOT_LANGUAGE")]
    pub language: Option<String>,

    /// Skip common name translation.
    #[arg(long, conflicts_with = "language")]
    pub no_translate: bool,

    /// Look up a representative image per detected species.
    #[arg(short, long)]
    pub images: bool,

    /// Latitude for range filtering (-90.0 to 90.0).
    #[arg(long, value_parser = parse_latitude, env = "BIRDGLOT_LATITUDE")]
    pub lat: Option<f64>,

    /// Longitude for range filtering (-180.0 to 180.0).
    #[arg(long, value_parser = parse_longitude, env = "BIRDGLOT_LONGITUDE")]
    pub lon: Option<f64>,

    /// Suppress progress output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace+ORT info, -vvv: trace+ORT debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Enable CUDA GPU acceleration.
    #[arg(long, conflicts_with = "cpu")]
    pub gpu: bool,

    /// Force CPU inference.
    #[arg(long, conflicts_with = "gpu")]
    pub cpu: bool,
}

/// Parse and validate latitude value.
fn parse_latitude(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if !(-90.0..=90.0).contains(&value) {
        return Err(format!(
            "latitude must be between -90.0 and 90.0, got {value}"
        ));
    }

    Ok(value)
}

/// Parse and validate longitude value.
fn parse_longitude(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if !(-180.0..=180.0).contains(&value) {
        return Err(format!(
            "longitude must be between -180.0 and 180.0, got {value}"
        ));
    }

    Ok(value)
}

/// Parse and validate confidence value.
fn parse_confidence(s: &str) -> Result<f32, String> {
    let value: f32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if !(0.0..=1.0).contains(&value) {
        return Err(format!(
            "confidence must be between 0.0 and 1.0, got {value}"
        ));
    }

    Ok(value)
}

/// Parse and validate gain value in dB.
fn parse_gain(s: &str) -> Result<f32, String> {
    let value: f32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if !(gain::MIN_DB..=gain::MAX_DB).contains(&value) {
        return Err(format!(
            "gain must be between {} and {} dB, got {value}",
            gain::MIN_DB,
            gain::MAX_DB
        ));
    }

    Ok(value)
}
