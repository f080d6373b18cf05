//! Single recording analysis pipeline.

use crate::audio::{AudioArtifact, AudioChunk, chunk_audio, decode_audio_file, resample};
use crate::config::OutputFormat;
use crate::constants::output_extensions;
use crate::error::Result;
use crate::inference::BirdClassifier;
use crate::output::{
    CsvWriter, Detection, JsonResultWriter, JsonSettings, OutputWriter, progress,
};
use crate::translate::Translator;
use birdnet_onnx::Prediction;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Tunable analysis parameters.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisOptions {
    /// Minimum confidence threshold (0.0-1.0).
    pub min_confidence: f32,
    /// Overlap between segments in seconds.
    pub overlap: f32,
    /// Number of segments per inference batch.
    pub batch_size: usize,
    /// Whether to show a segment progress bar.
    pub progress_enabled: bool,
}

/// Result of analyzing a single recording.
#[derive(Debug)]
pub struct AnalysisOutcome {
    /// Detections above the confidence threshold, localized when a
    /// translator was supplied.
    pub detections: Vec<Detection>,
    /// Number of segments classified.
    pub segments: usize,
    /// Wall-clock analysis duration in seconds.
    pub duration_secs: f64,
    /// Audio duration in seconds.
    pub audio_duration_secs: f32,
}

/// Analyze one ingested recording: decode, resample, chunk, classify,
/// and localize common names.
///
/// `source_path` is the user's original file; detections reference it
/// rather than the working artifact. Translation is per-detection and
/// memoized inside the translator, so repeated species cost one lookup.
pub fn analyze_file(
    artifact: &AudioArtifact,
    source_path: &Path,
    classifier: &BirdClassifier,
    translator: Option<&mut Translator>,
    options: &AnalysisOptions,
) -> Result<AnalysisOutcome> {
    use std::time::Instant;

    let start_time = Instant::now();

    info!("Analyzing: {}", source_path.display());

    let decoded = decode_audio_file(&artifact.path)?;
    let audio_duration_secs = decoded.duration_secs;

    // Resample to the model's expected sample rate
    let target_rate = classifier.sample_rate();
    let samples = if decoded.sample_rate == target_rate {
        decoded.samples
    } else {
        debug!(
            "Resampling from {} Hz to {} Hz...",
            decoded.sample_rate, target_rate
        );
        resample(decoded.samples, decoded.sample_rate, target_rate)?
    };

    let segment_duration = classifier.segment_duration();
    debug!(
        "Chunking into {:.1}s segments with {:.1}s overlap...",
        segment_duration, options.overlap
    );
    let chunks = chunk_audio(&samples, target_rate, segment_duration, options.overlap);

    if chunks.is_empty() {
        info!("No segments to classify (audio too short)");
        return Ok(AnalysisOutcome {
            detections: Vec::new(),
            segments: 0,
            duration_secs: start_time.elapsed().as_secs_f64(),
            audio_duration_secs,
        });
    }

    let file_name = source_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown");
    let segment_progress =
        progress::create_segment_progress(chunks.len(), file_name, options.progress_enabled);

    debug!("Running inference on {} segments...", chunks.len());
    let inference = run_inference(
        &chunks,
        classifier,
        source_path,
        options.min_confidence,
        options.batch_size,
        segment_progress.as_ref(),
    );
    progress::finish_progress(segment_progress, "Inference complete");
    let mut detections = inference?;

    info!(
        "Found {} detections above {:.1}% confidence",
        detections.len(),
        options.min_confidence * 100.0
    );

    if let Some(translator) = translator {
        localize_detections(&mut detections, translator);
    }

    let duration_secs = start_time.elapsed().as_secs_f64();
    let realtime_factor = if duration_secs > 0.0 {
        f64::from(audio_duration_secs) / duration_secs
    } else {
        0.0
    };
    info!(
        "Classified {} segments in {:.2}s ({:.1}x realtime)",
        chunks.len(),
        duration_secs,
        realtime_factor
    );

    Ok(AnalysisOutcome {
        detections,
        segments: chunks.len(),
        duration_secs,
        audio_duration_secs,
    })
}

/// Run inference on audio chunks.
fn run_inference(
    chunks: &[AudioChunk],
    classifier: &BirdClassifier,
    file_path: &Path,
    min_confidence: f32,
    batch_size: usize,
    segment_progress: Option<&indicatif::ProgressBar>,
) -> Result<Vec<Detection>> {
    let mut detections = Vec::new();

    for batch_chunks in chunks.chunks(batch_size.max(1)) {
        let segments: Vec<&[f32]> = batch_chunks.iter().map(|c| c.samples.as_slice()).collect();

        let results = if segments.len() == 1 {
            vec![classifier.predict(segments[0])?]
        } else {
            classifier.predict_batch(&segments)?
        };

        // Apply range filtering if configured
        let results = classifier.apply_range_filter(results)?;

        for (chunk, result) in batch_chunks.iter().zip(results.iter()) {
            for pred in filter_by_confidence(&result.predictions, min_confidence) {
                detections.push(Detection::from_label(
                    &pred.species,
                    pred.confidence,
                    chunk.start_time,
                    chunk.end_time,
                    file_path.to_path_buf(),
                ));
            }
            progress::inc_progress(segment_progress);
        }
    }

    // Sort by start time, then by confidence (descending)
    detections.sort_by(|a, b| {
        a.start_time
            .partial_cmp(&b.start_time)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| {
                b.confidence
                    .partial_cmp(&a.confidence)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    });

    Ok(detections)
}

/// Keep predictions at or above the confidence threshold.
fn filter_by_confidence(predictions: &[Prediction], min_confidence: f32) -> Vec<&Prediction> {
    predictions
        .iter()
        .filter(|pred| pred.confidence >= min_confidence)
        .collect()
}

/// Replace each detection's common name with its translation.
///
/// A failed or empty translation leaves the English name in place; the
/// translator itself handles memoization and fallback logging.
fn localize_detections(detections: &mut [Detection], translator: &mut Translator) {
    for detection in detections.iter_mut() {
        let localized = translator.translate(&detection.original_name);
        detection.localize(localized);
    }
}

/// Metadata embedded in structured result files.
#[derive(Debug)]
pub struct ReportContext<'a> {
    /// Model name the detections came from.
    pub model: &'a str,
    /// Settings the analysis ran with.
    pub settings: JsonSettings,
    /// Audio duration in seconds.
    pub audio_duration_secs: f32,
}

/// Write detections to result files next to the source recording.
///
/// Returns the paths written, in the order of `formats`.
pub fn write_results(
    source_path: &Path,
    formats: &[OutputFormat],
    detections: &[Detection],
    context: &ReportContext<'_>,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(formats.len());

    for format in formats {
        let output_path = output_path_for(source_path, *format);
        debug!("Writing {} output: {}", format, output_path.display());

        let source_file = source_path.display().to_string();
        let mut writer: Box<dyn OutputWriter> = match format {
            OutputFormat::Csv => Box::new(CsvWriter::new(&output_path)?),
            OutputFormat::Json => Box::new(JsonResultWriter::new(
                &output_path,
                &source_file,
                context.audio_duration_secs,
                context.model,
                JsonSettings {
                    min_confidence: context.settings.min_confidence,
                    overlap: context.settings.overlap,
                    gain_db: context.settings.gain_db,
                    language: context.settings.language.clone(),
                    lat: context.settings.lat,
                    lon: context.settings.lon,
                },
            )),
        };

        writer.write_header()?;
        for detection in detections {
            writer.write_detection(detection)?;
        }
        writer.finalize()?;
        written.push(output_path);
    }

    Ok(written)
}

/// Result file path for a source recording and format.
///
/// The source file name keeps its extension; the format suffix is
/// appended, so `clip.mp3` yields `clip.mp3.birdglot.json`.
pub fn output_path_for(source_path: &Path, format: OutputFormat) -> PathBuf {
    let suffix = match format {
        OutputFormat::Csv => output_extensions::CSV,
        OutputFormat::Json => output_extensions::JSON,
    };
    let mut name = OsString::from(source_path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}
