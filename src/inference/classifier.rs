//! Inference classifier wrapper around birdnet-onnx.

use crate::config::{InferenceDevice, ModelConfig};
use crate::error::{Error, Result};
use crate::inference::{RangeFilter, RangeFilterConfig};
use birdnet_onnx::{
    Classifier, ClassifierBuilder, ExecutionProviderInfo, InferenceOptions, PredictionResult,
    available_execution_providers,
};
use tracing::{debug, info, warn};

/// GPU provider priority order tried in Auto and Gpu modes.
const GPU_PRIORITY: [(ExecutionProviderInfo, &str); 6] = [
    (ExecutionProviderInfo::TensorRt, "TensorRT"),
    (ExecutionProviderInfo::Cuda, "CUDA"),
    (ExecutionProviderInfo::DirectMl, "DirectML"),
    (ExecutionProviderInfo::CoreMl, "CoreML"),
    (ExecutionProviderInfo::Rocm, "ROCm"),
    (ExecutionProviderInfo::OpenVino, "OpenVINO"),
];

/// Wrapper around the birdnet-onnx `Classifier`.
///
/// Constructed explicitly once per run and handed to the pipeline; there is
/// no hidden process-global instance. Construction failure fails the whole
/// analysis with the cause.
pub struct BirdClassifier {
    inner: Classifier,
    range_filter: Option<RangeFilter>,
    range_filter_config: Option<RangeFilterConfig>,
}

impl BirdClassifier {
    /// Build a classifier from model configuration.
    pub fn from_config(
        model_config: &ModelConfig,
        device: InferenceDevice,
        min_confidence: f32,
        top_k: usize,
        range_filter_config: Option<RangeFilterConfig>,
    ) -> Result<Self> {
        let available = available_execution_providers();
        debug!(
            "Available execution providers: {}",
            available
                .iter()
                .map(|p| format!("{p:?}"))
                .collect::<Vec<_>>()
                .join(", ")
        );

        let builder = ClassifierBuilder::new()
            .model_path(model_config.path.to_string_lossy().to_string())
            .labels_path(model_config.labels.to_string_lossy().to_string())
            .top_k(top_k)
            .min_confidence(min_confidence);

        let builder = match device {
            InferenceDevice::Cpu => {
                info!("Requested device: CPU");
                builder
            }
            InferenceDevice::Auto => {
                if let Some(&(provider, name)) =
                    GPU_PRIORITY.iter().find(|(p, _)| available.contains(p))
                {
                    info!("Auto mode: {} available, attempting GPU", name);
                    add_execution_provider(builder, provider)
                } else {
                    info!("Auto mode: no GPU providers available, using CPU");
                    builder
                }
            }
            InferenceDevice::Gpu => {
                if let Some(&(provider, name)) =
                    GPU_PRIORITY.iter().find(|(p, _)| available.contains(p))
                {
                    info!("GPU requested: selected {} provider", name);
                    add_execution_provider(builder, provider)
                } else {
                    warn!("GPU requested but no GPU providers available, using CPU");
                    builder
                }
            }
        };

        let inner = builder.build().map_err(|e| Error::ClassifierBuild {
            reason: e.to_string(),
        })?;

        info!(
            "Loaded model: {:?}, sample_rate: {}, segment_duration: {}s",
            inner.config().model_type,
            inner.config().sample_rate,
            inner.config().segment_duration
        );

        let range_filter = match &range_filter_config {
            Some(rf_config) => Some(RangeFilter::from_config(
                &rf_config.meta_model_path,
                inner.labels(),
                rf_config.threshold,
            )?),
            None => None,
        };

        Ok(Self {
            inner,
            range_filter,
            range_filter_config,
        })
    }

    /// Get the expected sample rate for this model.
    pub fn sample_rate(&self) -> u32 {
        self.inner.config().sample_rate
    }

    /// Get the expected segment duration in seconds.
    pub fn segment_duration(&self) -> f32 {
        self.inner.config().segment_duration
    }

    /// Run inference on a single audio segment.
    pub fn predict(&self, segment: &[f32]) -> Result<PredictionResult> {
        self.inner
            .predict(segment, &InferenceOptions::default())
            .map_err(|e| Error::Inference {
                reason: e.to_string(),
            })
    }

    /// Run inference on a batch of audio segments.
    pub fn predict_batch(&self, segments: &[&[f32]]) -> Result<Vec<PredictionResult>> {
        self.inner
            .predict_batch(segments, &InferenceOptions::default())
            .map_err(|e| Error::Inference {
                reason: e.to_string(),
            })
    }

    /// Apply geographic prior filtering to predictions if configured.
    ///
    /// Without a configured filter the predictions pass through unchanged.
    pub fn apply_range_filter(
        &self,
        mut predictions: Vec<PredictionResult>,
    ) -> Result<Vec<PredictionResult>> {
        let (Some(range_filter), Some(rf_config)) =
            (self.range_filter.as_ref(), self.range_filter_config.as_ref())
        else {
            return Ok(predictions);
        };

        // One location-score prediction covers every segment of the call
        let location_scores = range_filter.predict(
            rf_config.latitude,
            rf_config.longitude,
            rf_config.month,
            rf_config.day,
        )?;

        for result in &mut predictions {
            let before = result.predictions.len();
            result.predictions =
                range_filter.filter_predictions(&result.predictions, &location_scores);
            let after = result.predictions.len();
            if before != after {
                debug!("Location filter removed {} prediction(s)", before - after);
            }
        }

        Ok(predictions)
    }
}

/// Add an execution provider to the builder.
fn add_execution_provider(
    builder: ClassifierBuilder,
    provider: ExecutionProviderInfo,
) -> ClassifierBuilder {
    use birdnet_onnx::ort_execution_providers::{
        CoreMLExecutionProvider, DirectMLExecutionProvider, OpenVINOExecutionProvider,
        ROCmExecutionProvider,
    };

    match provider {
        ExecutionProviderInfo::Cuda => builder.with_cuda(),
        ExecutionProviderInfo::TensorRt => builder.with_tensorrt(),
        ExecutionProviderInfo::DirectMl => {
            builder.execution_provider(DirectMLExecutionProvider::default())
        }
        ExecutionProviderInfo::CoreMl => {
            builder.execution_provider(CoreMLExecutionProvider::default())
        }
        ExecutionProviderInfo::Rocm => builder.execution_provider(ROCmExecutionProvider::default()),
        ExecutionProviderInfo::OpenVino => {
            builder.execution_provider(OpenVINOExecutionProvider::default())
        }
        // CPU and specialized providers need no explicit registration here
        _ => builder,
    }
}
