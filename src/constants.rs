//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "birdglot";

/// Default minimum confidence threshold for detections.
pub const DEFAULT_MIN_CONFIDENCE: f32 = 0.1;

/// Default segment overlap in seconds.
pub const DEFAULT_OVERLAP: f32 = 0.0;

/// Default batch size for inference.
pub const DEFAULT_BATCH_SIZE: usize = 8;

/// Default number of top predictions to return per segment.
pub const DEFAULT_TOP_K: usize = 5;

/// Default file name for the canonical working WAV written by ingest.
pub const WORKING_FILE_NAME: &str = "birdglot_working.wav";

/// Gain boost bounds in dB.
pub mod gain {
    /// Minimum gain boost.
    pub const MIN_DB: f32 = 0.0;
    /// Maximum gain boost.
    pub const MAX_DB: f32 = 30.0;
}

/// Confidence value bounds.
pub mod confidence {
    /// Minimum valid confidence value.
    pub const MIN: f32 = 0.0;
    /// Maximum valid confidence value.
    pub const MAX: f32 = 1.0;
    /// Decimal places for confidence formatting.
    pub const DECIMAL_PLACES: usize = 4;
}

/// Translation service constants.
pub mod translation {
    /// Default translation endpoint (public Google Translate web API).
    pub const DEFAULT_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";
    /// Source language of model species labels.
    pub const SOURCE_LANGUAGE: &str = "en";
    /// Default target language for localized names.
    pub const DEFAULT_TARGET_LANGUAGE: &str = "zh-CN";
    /// Default request timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
}

/// Image search constants.
pub mod image_search {
    /// DuckDuckGo front page, queried first to obtain a request token.
    pub const TOKEN_URL: &str = "https://duckduckgo.com/";
    /// DuckDuckGo image search endpoint.
    pub const SEARCH_URL: &str = "https://duckduckgo.com/i.js";
    /// Default request timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
}

/// Search link prefix shown per detection; the species name is appended.
pub const WEB_SEARCH_URL_TEMPLATE: &str = "https://www.bing.com/search?q=";

/// Range filter constants.
pub mod range_filter {
    /// Default range filter threshold.
    pub const DEFAULT_THRESHOLD: f32 = 0.01;
}

/// Output file extensions by format.
pub mod output_extensions {
    /// CSV output extension.
    pub const CSV: &str = ".birdglot.results.csv";
    /// JSON output extension.
    pub const JSON: &str = ".birdglot.json";
}
