//! Configuration type definitions.

use crate::constants::{
    DEFAULT_BATCH_SIZE, DEFAULT_MIN_CONFIDENCE, DEFAULT_OVERLAP, image_search, range_filter,
    translation,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configured models by name.
    #[serde(default)]
    pub models: HashMap<String, ModelConfig>,

    /// Default settings.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Inference settings.
    #[serde(default)]
    pub inference: InferenceConfig,

    /// Translation settings.
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Image enrichment settings.
    #[serde(default)]
    pub enrichment: EnrichmentConfig,
}

/// Configuration for a single model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Path to the ONNX model file.
    pub path: PathBuf,

    /// Path to the labels file.
    pub labels: PathBuf,

    /// Optional model type override (v24, v30, perch).
    #[serde(rename = "type")]
    pub model_type: Option<String>,

    /// Optional meta model for geographic prior filtering.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_model: Option<PathBuf>,
}

/// Default analysis settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Default model name to use.
    pub model: Option<String>,

    /// Minimum confidence threshold.
    pub min_confidence: f32,

    /// Segment overlap in seconds.
    pub overlap: f32,

    /// Batch size for inference.
    pub batch_size: usize,

    /// Default gain boost in dB applied during ingest.
    pub gain_db: f32,

    /// Default recording latitude (used when the CLI omits --lat).
    pub lat: Option<f64>,

    /// Default recording longitude (used when the CLI omits --lon).
    pub lon: Option<f64>,

    /// Output file formats (in addition to printed results).
    pub formats: Vec<OutputFormat>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            model: None,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            overlap: DEFAULT_OVERLAP,
            batch_size: DEFAULT_BATCH_SIZE,
            gain_db: 0.0,
            lat: None,
            lon: None,
            formats: Vec::new(),
        }
    }
}

/// Inference device configuration.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InferenceDevice {
    /// Automatically select (GPU if available, else CPU).
    #[default]
    Auto,
    /// Force GPU (CUDA), fall back to CPU with a warning.
    Gpu,
    /// Force CPU inference.
    Cpu,
}

/// Inference settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Device to use for inference.
    pub device: InferenceDevice,

    /// Location score threshold below which species are filtered out.
    pub range_filter_threshold: f32,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            device: InferenceDevice::default(),
            range_filter_threshold: range_filter::DEFAULT_THRESHOLD,
        }
    }
}

/// Species name translation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    /// Whether translation is enabled.
    pub enabled: bool,

    /// Target language code (e.g. "zh-CN", "fi", "de").
    pub target_language: String,

    /// Translation endpoint URL.
    pub endpoint: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            target_language: translation::DEFAULT_TARGET_LANGUAGE.to_string(),
            endpoint: translation::DEFAULT_ENDPOINT.to_string(),
            timeout_secs: translation::DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Image enrichment settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichmentConfig {
    /// Whether image lookup is enabled (still requires --images on the CLI).
    pub enabled: bool,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout_secs: image_search::DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Supported output file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Generic CSV format.
    Csv,
    /// JSON result file with settings and summary.
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}
