//! Geographic prior filtering via the birdnet-onnx meta model.
//!
//! When the caller supplies coordinates and the configured model carries a
//! meta model, species unlikely at that location and date are dropped from
//! the predictions before confidence filtering.

use crate::config::ModelConfig;
use crate::error::{Error, Result};
use birdnet_onnx::{LocationScore, Prediction, RangeFilter as BirdnetRangeFilter};
use chrono::Datelike;
use std::path::{Path, PathBuf};
use tracing::info;

/// Runtime configuration for geographic prior filtering.
#[derive(Debug, Clone)]
pub struct RangeFilterConfig {
    /// Path to the meta model file.
    pub meta_model_path: PathBuf,
    /// Location score threshold.
    pub threshold: f32,
    /// Recording latitude.
    pub latitude: f64,
    /// Recording longitude.
    pub longitude: f64,
    /// Month of the recording (1-12).
    pub month: u32,
    /// Day of month (1-31).
    pub day: u32,
}

/// Build a range filter config from coordinates and model configuration.
///
/// Returns `None` when no coordinates are given. Coordinates without a
/// configured meta model are an error: the caller asked for location
/// biasing the model cannot provide.
pub fn build_range_filter_config(
    lat: Option<f64>,
    lon: Option<f64>,
    model_name: &str,
    model_config: &ModelConfig,
    threshold: f32,
) -> Result<Option<RangeFilterConfig>> {
    let (Some(latitude), Some(longitude)) = (lat, lon) else {
        return Ok(None);
    };

    let Some(meta_model_path) = model_config.meta_model.clone() else {
        return Err(Error::MetaModelMissing {
            model_name: model_name.to_string(),
        });
    };

    let today = chrono::Local::now().date_naive();
    let config = RangeFilterConfig {
        meta_model_path,
        threshold,
        latitude,
        longitude,
        month: today.month(),
        day: today.day(),
    };

    info!(
        "Location filter enabled: lat={:.4}, lon={:.4}, date={:02}-{:02}, threshold={:.3}",
        config.latitude, config.longitude, config.month, config.day, config.threshold
    );

    Ok(Some(config))
}

/// Wrapper around the birdnet-onnx `RangeFilter`.
pub struct RangeFilter {
    inner: BirdnetRangeFilter,
}

impl RangeFilter {
    /// Build a range filter for the classifier's label set.
    pub fn from_config(
        meta_model_path: &Path,
        classifier_labels: &[String],
        threshold: f32,
    ) -> Result<Self> {
        let inner = BirdnetRangeFilter::builder()
            .model_path(meta_model_path.to_string_lossy().to_string())
            .from_classifier_labels(classifier_labels)
            .threshold(threshold)
            .build()
            .map_err(|e| Error::RangeFilterBuild {
                reason: e.to_string(),
            })?;

        Ok(Self { inner })
    }

    /// Get location scores for species at the given coordinates and date.
    pub fn predict(
        &self,
        latitude: f64,
        longitude: f64,
        month: u32,
        day: u32,
    ) -> Result<Vec<LocationScore>> {
        #[allow(clippy::cast_possible_truncation)]
        self.inner
            .predict(latitude as f32, longitude as f32, month, day)
            .map_err(|e| Error::RangeFilterPredict {
                reason: e.to_string(),
            })
    }

    /// Filter predictions using location scores.
    pub fn filter_predictions(
        &self,
        predictions: &[Prediction],
        location_scores: &[LocationScore],
    ) -> Vec<Prediction> {
        self.inner
            .filter_predictions(predictions, location_scores, false)
    }
}
