//! JSON output format writer.

use crate::error::{Error, Result};
use crate::output::{Detection, OutputWriter};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// JSON result file structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonResultFile {
    /// Source audio file name.
    pub source_file: String,
    /// Analysis timestamp.
    pub analysis_date: DateTime<Utc>,
    /// Model used for analysis.
    pub model: String,
    /// Analysis settings.
    pub settings: JsonSettings,
    /// Detection results.
    pub detections: Vec<JsonDetection>,
    /// Summary statistics.
    pub summary: JsonSummary,
}

/// Analysis settings for JSON output.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonSettings {
    /// Minimum confidence threshold.
    pub min_confidence: f32,
    /// Segment overlap.
    pub overlap: f32,
    /// Gain boost applied during ingest.
    pub gain_db: f32,
    /// Translation target language, if translation ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Latitude (if location filtering).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    /// Longitude (if location filtering).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
}

/// Single detection in JSON format.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonDetection {
    /// Start time in seconds.
    pub start_time: f32,
    /// End time in seconds.
    pub end_time: f32,
    /// Scientific name.
    pub scientific_name: String,
    /// Localized common name.
    pub common_name: String,
    /// English common name from the model.
    pub original_name: String,
    /// Confidence score.
    pub confidence: f32,
}

/// Summary statistics.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonSummary {
    /// Total number of detections.
    pub total_detections: usize,
    /// Number of unique species.
    pub unique_species: usize,
    /// Audio duration in seconds.
    pub audio_duration_seconds: f32,
}

/// Writer for JSON detection output files.
pub struct JsonResultWriter {
    detections: Vec<Detection>,
    output_path: PathBuf,
    source_file: String,
    model: String,
    settings: JsonSettings,
    audio_duration: f32,
}

impl JsonResultWriter {
    /// Create a new JSON result writer.
    pub fn new(
        output_path: &Path,
        source_file: &str,
        audio_duration: f32,
        model: &str,
        settings: JsonSettings,
    ) -> Self {
        Self {
            detections: Vec::new(),
            output_path: output_path.to_path_buf(),
            source_file: source_file.to_string(),
            model: model.to_string(),
            settings,
            audio_duration,
        }
    }

    fn compute_summary(&self) -> JsonSummary {
        let unique_species: HashSet<&str> = self
            .detections
            .iter()
            .map(|d| d.scientific_name.as_str())
            .collect();

        JsonSummary {
            total_detections: self.detections.len(),
            unique_species: unique_species.len(),
            audio_duration_seconds: self.audio_duration,
        }
    }
}

impl OutputWriter for JsonResultWriter {
    fn write_header(&mut self) -> Result<()> {
        // JSON is written in one piece at finalize
        Ok(())
    }

    fn write_detection(&mut self, detection: &Detection) -> Result<()> {
        self.detections.push(detection.clone());
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        let json_detections: Vec<JsonDetection> = self
            .detections
            .iter()
            .map(|d| JsonDetection {
                start_time: d.start_time,
                end_time: d.end_time,
                scientific_name: d.scientific_name.clone(),
                common_name: d.common_name.clone(),
                original_name: d.original_name.clone(),
                confidence: d.confidence,
            })
            .collect();

        let result = JsonResultFile {
            source_file: self.source_file.clone(),
            analysis_date: Utc::now(),
            model: self.model.clone(),
            settings: JsonSettings {
                min_confidence: self.settings.min_confidence,
                overlap: self.settings.overlap,
                gain_db: self.settings.gain_db,
                language: self.settings.language.clone(),
                lat: self.settings.lat,
                lon: self.settings.lon,
            },
            detections: json_detections,
            summary: self.compute_summary(),
        };

        let file = File::create(&self.output_path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), &result).map_err(|e| {
            Error::JsonWrite {
                path: self.output_path.clone(),
                source: e,
            }
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn settings() -> JsonSettings {
        JsonSettings {
            min_confidence: 0.25,
            overlap: 0.0,
            gain_db: 6.0,
            language: Some("zh-CN".to_string()),
            lat: None,
            lon: None,
        }
    }

    #[test]
    fn test_json_writer_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.json");

        let mut writer = JsonResultWriter::new(&path, "clip.wav", 12.5, "birdnet", settings());
        writer.write_header().unwrap();

        let mut detection = Detection::from_label(
            "Passer domesticus_House Sparrow",
            0.8,
            0.0,
            3.0,
            PathBuf::from("clip.wav"),
        );
        detection.localize("家麻雀".to_string());
        writer.write_detection(&detection).unwrap();
        writer.finalize().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let parsed: JsonResultFile = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed.summary.total_detections, 1);
        assert_eq!(parsed.summary.unique_species, 1);
        assert_eq!(parsed.detections[0].common_name, "家麻雀");
        assert_eq!(parsed.detections[0].original_name, "House Sparrow");
        assert_eq!(parsed.settings.language.as_deref(), Some("zh-CN"));
    }

    #[test]
    fn test_summary_counts_unique_species() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.json");
        let mut writer = JsonResultWriter::new(&path, "clip.wav", 30.0, "birdnet", settings());

        for start in [0.0f32, 3.0, 6.0] {
            let detection = Detection::from_label(
                "Turdus merula_Eurasian Blackbird",
                0.5,
                start,
                start + 3.0,
                PathBuf::from("clip.wav"),
            );
            writer.write_detection(&detection).unwrap();
        }
        writer.finalize().unwrap();

        let parsed: JsonResultFile =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed.summary.total_detections, 3);
        assert_eq!(parsed.summary.unique_species, 1);
    }
}
